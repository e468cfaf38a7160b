//! Variant selection: resolve (mnemonic, operand shapes) to one catalog row.
//!
//! Selection applies the documented precedence: arity filter, per-slot shape
//! compatibility, prefix-hint compatibility, then size minimization with
//! memory width weighted ahead of immediate width, exact-match explicit
//! memory sizes, and table position as the final tie-break.

use crate::error::Error;
use crate::ir::{ImmWidth, Instr, MemOperand, Operand, PrefixHint, Reg, RegClass, RelWidth};
use crate::table::{self, Pat, Variant};

/// A resolved selection: the winning row plus the operands in signature
/// order (prefix hints stripped).
#[derive(Debug)]
pub(crate) struct Selected {
    pub variant: &'static Variant,
    pub ops: [Operand; 4],
    pub arity: usize,
}

/// How one operand relates to one pattern slot.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotMatch {
    Yes,
    No,
    /// Would match if the memory operand had no explicit size.
    SizeOnly,
}

pub(crate) fn select(instr: &Instr) -> Result<Selected, Error> {
    let mnemonic = instr.mnemonic;
    let rows = table::variants(mnemonic);
    if rows.is_empty() {
        return Err(Error::NoSuchMnemonic { mnemonic });
    }

    // Prefix hints constrain selection but do not occupy a signature slot.
    let mut ops = [Operand::None; 4];
    let mut arity = 0usize;
    let mut want_66 = false;
    let mut want_w = false;
    for op in &instr.operands {
        match op {
            Operand::Pref(PrefixHint::P66) => want_66 = true,
            Operand::Pref(PrefixHint::RexW) => want_w = true,
            Operand::None => {}
            other => {
                ops[arity] = *other;
                arity += 1;
            }
        }
    }

    let mut arity_matched = false;
    let mut hinted_away = false;
    let mut size_blocked: Option<u16> = None;
    let mut best: Option<(u16, u16, usize)> = None;

    for (idx, v) in rows.iter().enumerate() {
        if v.arity() != arity {
            continue;
        }
        arity_matched = true;

        let mut fit = SlotMatch::Yes;
        for k in 0..arity {
            match matches_slot(v.sig[k], &ops[k]) {
                SlotMatch::Yes => {}
                SlotMatch::SizeOnly => {
                    if fit == SlotMatch::Yes {
                        fit = SlotMatch::SizeOnly;
                    }
                }
                SlotMatch::No => {
                    fit = SlotMatch::No;
                    break;
                }
            }
        }
        match fit {
            SlotMatch::No => continue,
            SlotMatch::SizeOnly => {
                // Shape fits but an explicit memory size has no encoding in
                // this row; remember the requested width for diagnostics.
                if size_blocked.is_none() {
                    size_blocked = explicit_mem_bits(&ops[..arity]);
                }
                continue;
            }
            SlotMatch::Yes => {}
        }

        if (want_66 && !v.p66) || (want_w && !v.rexw) {
            hinted_away = true;
            continue;
        }

        let score = (mem_score(v, &ops[..arity]), field_score(v, &ops[..arity]), idx);
        if best.map_or(true, |b| score < b) {
            best = Some(score);
        }
    }

    if let Some((_, _, idx)) = best {
        return Ok(Selected {
            variant: &rows[idx],
            ops,
            arity,
        });
    }
    if hinted_away {
        return Err(Error::PrefixConflict { mnemonic });
    }
    if let Some(bits) = size_blocked {
        return Err(Error::SizeUnavailable { mnemonic, bits });
    }
    if arity_matched {
        return Err(Error::OperandMismatch { mnemonic });
    }
    Err(Error::NoSuchForm { mnemonic, arity })
}

/// Summed width of memory patterns bound to size-unspecified memory
/// operands; the minimization key that picks the narrowest memory form.
fn mem_score(v: &Variant, ops: &[Operand]) -> u16 {
    let mut score = 0;
    for (pat, op) in v.sig.iter().zip(ops) {
        if let Operand::Mem(m) = op {
            if m.size.is_none() {
                score += pat.mem_bits();
            }
        }
    }
    score
}

/// Summed width of immediate/relative fields bound to auto-width operands.
fn field_score(v: &Variant, ops: &[Operand]) -> u16 {
    let mut score = 0;
    for (pat, op) in v.sig.iter().zip(ops) {
        match op {
            Operand::Imm {
                width: ImmWidth::Auto,
                ..
            }
            | Operand::Rel {
                width: RelWidth::Auto,
                ..
            } => score += pat.field_bits(),
            _ => {}
        }
    }
    score
}

fn explicit_mem_bits(ops: &[Operand]) -> Option<u16> {
    ops.iter().find_map(|op| match op {
        Operand::Mem(m) => m.size.map(|s| s.bits()),
        _ => None,
    })
}

fn matches_slot(pat: Pat, op: &Operand) -> SlotMatch {
    match pat {
        Pat::None => no(op.is_none()),

        Pat::R8 => no(is_class(op, RegClass::Gpr8) || is_class(op, RegClass::Gpr8h)),
        Pat::R16 => no(is_class(op, RegClass::Gpr16)),
        Pat::R32 => no(is_class(op, RegClass::Gpr32)),
        Pat::R64 => no(is_class(op, RegClass::Gpr64)),
        Pat::Sreg => no(is_class(op, RegClass::Seg)),
        Pat::Cr => no(is_class(op, RegClass::Cr)),
        Pat::Dr => no(is_class(op, RegClass::Dr)),
        Pat::Mm => no(is_class(op, RegClass::Mmx)),
        Pat::Xmm => no(is_class(op, RegClass::Xmm)),
        Pat::Ymm => no(is_class(op, RegClass::Ymm)),
        Pat::St => no(is_class(op, RegClass::St)),

        Pat::Al => no(is_reg(op, Reg::Al)),
        Pat::Cl => no(is_reg(op, Reg::Cl)),
        Pat::Ax => no(is_reg(op, Reg::Ax)),
        Pat::Eax => no(is_reg(op, Reg::Eax)),
        Pat::Rax => no(is_reg(op, Reg::Rax)),
        Pat::St0 => no(is_reg(op, Reg::St0)),

        Pat::Rm8 => reg_or_mem(op, &[RegClass::Gpr8, RegClass::Gpr8h], 8),
        Pat::Rm16 => reg_or_mem(op, &[RegClass::Gpr16], 16),
        Pat::Rm32 => reg_or_mem(op, &[RegClass::Gpr32], 32),
        Pat::Rm64 => reg_or_mem(op, &[RegClass::Gpr64], 64),
        Pat::XmmM32 => reg_or_mem(op, &[RegClass::Xmm], 32),
        Pat::XmmM64 => reg_or_mem(op, &[RegClass::Xmm], 64),
        Pat::XmmM128 => reg_or_mem(op, &[RegClass::Xmm], 128),
        Pat::YmmM256 => reg_or_mem(op, &[RegClass::Ymm], 256),
        Pat::MmM64 => reg_or_mem(op, &[RegClass::Mmx], 64),

        Pat::M => match op {
            Operand::Mem(m) => no(mem_shape_valid(m)),
            _ => SlotMatch::No,
        },
        Pat::M16 => mem_only(op, 16),
        Pat::M32 => mem_only(op, 32),
        Pat::M64 => mem_only(op, 64),

        Pat::One => no(matches!(
            op,
            Operand::Imm {
                width: ImmWidth::Auto,
                value: 1,
            }
        )),
        Pat::Imm8 => imm_in(op, ImmWidth::W8, -128, 255),
        Pat::SImm8 => imm_in(op, ImmWidth::W8, i64::from(i8::MIN), i64::from(i8::MAX)),
        Pat::Imm16 => imm_in(op, ImmWidth::W16, -32768, 65535),
        Pat::Imm32 => imm_in(op, ImmWidth::W32, i64::from(i32::MIN), i64::from(u32::MAX)),
        Pat::SImm32 => imm_in(op, ImmWidth::W32, i64::from(i32::MIN), i64::from(i32::MAX)),
        Pat::Imm64 => no(matches!(
            op,
            Operand::Imm {
                width: ImmWidth::W64 | ImmWidth::Auto,
                ..
            }
        )),
        Pat::Moffs => no(matches!(
            op,
            Operand::Imm {
                width: ImmWidth::Ptr,
                ..
            }
        )),

        Pat::Rel8 => no(matches!(
            op,
            Operand::Rel {
                width: RelWidth::Auto | RelWidth::R8,
                ..
            }
        )),
        Pat::Rel32 => no(matches!(
            op,
            Operand::Rel {
                width: RelWidth::Auto | RelWidth::R32,
                ..
            }
        )),
    }
}

fn no(cond: bool) -> SlotMatch {
    if cond {
        SlotMatch::Yes
    } else {
        SlotMatch::No
    }
}

fn is_reg(op: &Operand, reg: Reg) -> bool {
    matches!(op, Operand::Reg(r) if *r == reg)
}

fn is_class(op: &Operand, class: RegClass) -> bool {
    matches!(op, Operand::Reg(r) if r.class() == class)
}

fn reg_or_mem(op: &Operand, classes: &[RegClass], bits: u16) -> SlotMatch {
    match op {
        Operand::Reg(r) => no(classes.contains(&r.class())),
        Operand::Mem(m) => mem_width(m, bits),
        _ => SlotMatch::No,
    }
}

fn mem_only(op: &Operand, bits: u16) -> SlotMatch {
    match op {
        Operand::Mem(m) => mem_width(m, bits),
        _ => SlotMatch::No,
    }
}

fn mem_width(m: &MemOperand, bits: u16) -> SlotMatch {
    if !mem_shape_valid(m) {
        return SlotMatch::No;
    }
    match m.size {
        None => SlotMatch::Yes,
        Some(s) if s.bits() == bits => SlotMatch::Yes,
        Some(_) => SlotMatch::SizeOnly,
    }
}

/// Structural validity of a memory reference, independent of width.
///
/// Bases are 64-bit GPRs or the RIP pseudo-bases; indices are 64-bit GPRs
/// other than RSP (its SIB slot means "no index"); RIP bases take no index.
fn mem_shape_valid(m: &MemOperand) -> bool {
    let base_ok = match m.base {
        None => true,
        Some(b) => matches!(b.class(), RegClass::Gpr64 | RegClass::IpBase),
    };
    let index_ok = match m.index {
        None => true,
        Some(i) => i.class() == RegClass::Gpr64 && i != Reg::Rsp,
    };
    let seg_ok = match m.segment {
        None => true,
        Some(s) => s.class() == RegClass::Seg,
    };
    let rip_ok = !matches!(m.base, Some(Reg::Rip | Reg::RipRel)) || m.index.is_none();
    base_ok && index_ok && seg_ok && rip_ok
}

fn imm_in(op: &Operand, exact: ImmWidth, min: i64, max: i64) -> SlotMatch {
    match op {
        Operand::Imm { width, value } if *width == exact || *width == ImmWidth::Auto => {
            no((min..=max).contains(value))
        }
        _ => SlotMatch::No,
    }
}
