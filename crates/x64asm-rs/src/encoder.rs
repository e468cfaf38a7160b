//! Byte emitter: one resolved variant + operand values → machine code.
//!
//! Emission follows the architectural order: legacy prefixes (segment
//! override, operand-size, mandatory SSE prefix), VEX or REX, opcode bytes,
//! ModR/M, SIB, displacement, then immediate/relative/absolute tails.
//! Relative sites are emitted as zero placeholders and reported as a
//! [`PendingFixup`] for the linker's second pass.

use crate::error::{set_last_error, Error};
use crate::ir::{Instr, MemOperand, Operand, Reg};
use crate::selector::{select, Selected};
use crate::table::{Role, Variant, EXT_NONE};

/// Fixed-capacity buffer for a single instruction (x86-64 caps at 15 bytes).
#[derive(Clone, Copy)]
pub struct InstrBytes {
    buf: [u8; 16],
    len: u8,
}

impl InstrBytes {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; 16],
            len: 0,
        }
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) {
        assert!((self.len as usize) < 16, "instruction exceeds 15 bytes");
        self.buf[self.len as usize] = byte;
        self.len += 1;
    }

    /// Append a byte slice.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for InstrBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl core::ops::Deref for InstrBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl core::ops::DerefMut for InstrBytes {
    fn deref_mut(&mut self) -> &mut [u8] {
        let len = self.len as usize;
        &mut self.buf[..len]
    }
}

impl AsRef<[u8]> for InstrBytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl core::fmt::Debug for InstrBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "InstrBytes[")?;
        for (i, b) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        write!(f, "]")
    }
}

impl PartialEq for InstrBytes {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl Eq for InstrBytes {}

impl PartialEq<[u8]> for InstrBytes {
    fn eq(&self, other: &[u8]) -> bool {
        **self == *other
    }
}

/// A displacement site awaiting the linker's second pass.
///
/// Plain data, not a callback: `offset` is relative to the start of the
/// holding instruction, `width` is 1 or 4, and `delta` is the instruction
/// delta the site targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingFixup {
    pub offset: u8,
    pub width: u8,
    pub delta: i32,
}

/// One encoded instruction plus its unresolved relative site, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Encoded {
    pub bytes: InstrBytes,
    pub fixup: Option<PendingFixup>,
}

// ─── Bit-level helpers ───────────────────────────────────────

/// Build a REX prefix byte.
#[inline]
pub(crate) fn rex(w: bool, r: bool, x: bool, b: bool) -> u8 {
    0x40 | ((w as u8) << 3) | ((r as u8) << 2) | ((x as u8) << 1) | (b as u8)
}

/// Whether any REX bit is set.
#[inline]
pub(crate) fn needs_rex(w: bool, r: bool, x: bool, b: bool) -> bool {
    w || r || x || b
}

/// Build a ModR/M byte.
#[inline]
pub(crate) fn modrm(mod_: u8, reg: u8, rm: u8) -> u8 {
    (mod_ << 6) | ((reg & 7) << 3) | (rm & 7)
}

/// Build a SIB byte. `scale` must already be normalized to 1/2/4/8.
#[inline]
fn sib(scale: u8, index: u8, base: u8) -> u8 {
    let ss = match scale {
        2 => 1,
        4 => 2,
        8 => 3,
        _ => 0,
    };
    (ss << 6) | ((index & 7) << 3) | (base & 7)
}

/// Emit a 2-byte VEX prefix: C5 [R vvvv L pp].
fn emit_vex2(buf: &mut InstrBytes, r: bool, vvvv: u8, l: bool, pp: u8) {
    let byte1 = (if r { 0 } else { 0x80 })
        | (((!vvvv) & 0x0F) << 3)
        | (if l { 0x04 } else { 0 })
        | (pp & 0x03);
    buf.push(0xC5);
    buf.push(byte1);
}

/// Emit a 3-byte VEX prefix: C4 [R X B mmmmm] [W vvvv L pp].
#[allow(clippy::too_many_arguments)]
fn emit_vex3(buf: &mut InstrBytes, r: bool, x: bool, b: bool, mm: u8, w: bool, vvvv: u8, l: bool, pp: u8) {
    let byte1 = (if r { 0 } else { 0x80 })
        | (if x { 0 } else { 0x40 })
        | (if b { 0 } else { 0x20 })
        | (mm & 0x1F);
    let byte2 = (if w { 0x80 } else { 0 })
        | (((!vvvv) & 0x0F) << 3)
        | (if l { 0x04 } else { 0 })
        | (pp & 0x03);
    buf.push(0xC4);
    buf.push(byte1);
    buf.push(byte2);
}

/// Fold an out-of-set SIB scale to 1, preserving source compatibility.
fn normalize_scale(scale: u8) -> u8 {
    match scale {
        1 | 2 | 4 | 8 => scale,
        other => {
            log::debug!("memory operand scale {} is not 1/2/4/8; using 1", other);
            1
        }
    }
}

/// Segment whose override byte is implicit for this base register.
fn default_segment(base: Option<Reg>) -> Reg {
    match base {
        Some(Reg::Rsp | Reg::Rbp) => Reg::Ss,
        _ => Reg::Ds,
    }
}

/// Emit a segment override byte when the reference names a non-default
/// segment. FS/GS always emit; CS/DS/ES/SS only when they differ from the
/// base's default.
fn emit_segment_override(buf: &mut InstrBytes, mem: &MemOperand) {
    let Some(seg) = mem.segment else { return };
    let byte = match seg {
        Reg::Fs => Some(0x64),
        Reg::Gs => Some(0x65),
        _ if seg == default_segment(mem.base) => None,
        Reg::Es => Some(0x26),
        Reg::Cs => Some(0x2E),
        Reg::Ss => Some(0x36),
        Reg::Ds => Some(0x3E),
        _ => None,
    };
    if let Some(b) = byte {
        buf.push(b);
    }
}

// ─── Instruction emission ────────────────────────────────────

/// Encode a single instruction record (relative sites stay placeholders).
pub(crate) fn encode_instr(instr: &Instr) -> Result<Encoded, Error> {
    let sel = select(instr)?;
    emit_selected(instr, &sel)
}

fn op_reg(op: &Operand) -> Reg {
    match op {
        Operand::Reg(r) => *r,
        _ => unreachable!("selector bound a register pattern to a non-register"),
    }
}

fn op_imm(op: &Operand) -> i64 {
    match op {
        Operand::Imm { value, .. } => *value,
        _ => unreachable!("selector bound an immediate pattern to a non-immediate"),
    }
}

fn emit_selected(instr: &Instr, sel: &Selected) -> Result<Encoded, Error> {
    let v: &Variant = sel.variant;

    let mut modreg: Option<Reg> = None;
    let mut vvvv: Option<Reg> = None;
    let mut opreg: Option<Reg> = None;
    let mut rm_reg: Option<Reg> = None;
    let mut rm_mem: Option<MemOperand> = None;
    let mut tail_imm: Option<(i64, u8)> = None;
    let mut tail_moffs: Option<i64> = None;
    let mut tail_rel: Option<(i32, u8)> = None;

    for k in 0..sel.arity {
        let op = &sel.ops[k];
        match v.enc[k] {
            Role::Reg => modreg = Some(op_reg(op)),
            Role::Vvvv => vvvv = Some(op_reg(op)),
            Role::OpReg => opreg = Some(op_reg(op)),
            Role::Rm => match op {
                Operand::Reg(r) => rm_reg = Some(*r),
                Operand::Mem(m) => rm_mem = Some(*m),
                _ => unreachable!("selector bound an r/m pattern to a bad operand"),
            },
            Role::Imm => tail_imm = Some((op_imm(op), v.sig[k].field_len())),
            Role::Moffs => tail_moffs = Some(op_imm(op)),
            Role::Rel => match op {
                Operand::Rel { delta, .. } => tail_rel = Some((*delta, v.sig[k].field_len())),
                _ => unreachable!("selector bound a relative pattern to a bad operand"),
            },
            Role::Imp | Role::None => {}
        }
    }

    // REX/VEX extension bits.
    let r_ext = modreg.is_some_and(Reg::is_extended);
    let x_ext = rm_mem.and_then(|m| m.index).is_some_and(Reg::is_extended);
    let b_ext = rm_reg.is_some_and(Reg::is_extended)
        || rm_mem.and_then(|m| m.base).is_some_and(Reg::is_extended)
        || opreg.is_some_and(Reg::is_extended);

    let mut buf = InstrBytes::new();
    let mut fixup: Option<PendingFixup> = None;

    if let Some(m) = &rm_mem {
        emit_segment_override(&mut buf, m);
    }

    if let Some(vex) = v.vex {
        // VEX path: the prefix subsumes REX and the mandatory prefix; the
        // compact 2-byte form applies for the 0F map with W, X, B all clear.
        let vvvv_code = vvvv.map_or(0, Reg::code);
        if vex.mm == 1 && !vex.w && !x_ext && !b_ext {
            emit_vex2(&mut buf, r_ext, vvvv_code, vex.l, vex.pp);
        } else {
            emit_vex3(
                &mut buf, r_ext, x_ext, b_ext, vex.mm, vex.w, vvvv_code, vex.l, vex.pp,
            );
        }
    } else {
        if v.p66 {
            buf.push(0x66);
        }
        if v.mandatory != 0 {
            buf.push(v.mandatory);
        }

        // Byte-context registers decide REX presence and legality.
        let ctx = [modreg, rm_reg, opreg];
        let force_rex = ctx
            .iter()
            .flatten()
            .any(|r| r.requires_rex_for_byte());
        let has_high = ctx.iter().flatten().any(|r| r.is_high_byte());
        let need = needs_rex(v.rexw, r_ext, x_ext, b_ext) || force_rex;
        if need {
            if has_high {
                return Err(Error::InvalidHighByteWithRex {
                    mnemonic: instr.mnemonic,
                });
            }
            buf.push(rex(v.rexw, r_ext, x_ext, b_ext));
        }
    }

    // Opcode, with the low 3 bits of the last byte carrying an opcode+reg
    // operand where the variant says so.
    let opcode = v.opcode();
    match opreg {
        Some(r) => {
            let (last, head) = opcode.split_last().unwrap_or((&0, &[]));
            buf.extend_from_slice(head);
            buf.push(last | r.base_code());
        }
        None => buf.extend_from_slice(opcode),
    }

    // ModR/M, SIB, displacement.
    let reg_field = if v.ext != EXT_NONE {
        v.ext
    } else {
        modreg.map_or(0, Reg::base_code)
    };
    if let Some(r) = rm_reg {
        buf.push(modrm(0b11, reg_field, r.base_code()));
    } else if let Some(m) = &rm_mem {
        if let Some((offset, delta)) = emit_mem_modrm(&mut buf, reg_field, m) {
            fixup = Some(PendingFixup {
                offset: offset as u8,
                width: 4,
                delta,
            });
        }
    }

    if let Some(addr) = tail_moffs {
        buf.extend_from_slice(&addr.to_le_bytes());
    }
    if let Some((value, width)) = tail_imm {
        buf.extend_from_slice(&value.to_le_bytes()[..width as usize]);
    }
    if let Some((delta, width)) = tail_rel {
        let offset = buf.len() as u8;
        buf.extend_from_slice(&[0u8; 4][..width as usize]);
        fixup = Some(PendingFixup {
            offset,
            width,
            delta,
        });
    }

    Ok(Encoded { bytes: buf, fixup })
}

/// Emit ModR/M + SIB + displacement for a memory reference, choosing the
/// shortest displacement form. Returns the placeholder site for a `RipRel`
/// base.
fn emit_mem_modrm(
    buf: &mut InstrBytes,
    reg_field: u8,
    mem: &MemOperand,
) -> Option<(usize, i32)> {
    let disp = mem.disp;

    match (mem.base, mem.index) {
        // [rip + disp32] — displacement taken verbatim.
        (Some(Reg::Rip), _) => {
            buf.push(modrm(0b00, reg_field, 0b101));
            buf.extend_from_slice(&disp.to_le_bytes());
            None
        }
        // [$+k] — placeholder displacement, linker patches.
        (Some(Reg::RipRel), _) => {
            buf.push(modrm(0b00, reg_field, 0b101));
            let offset = buf.len();
            buf.extend_from_slice(&0i32.to_le_bytes());
            Some((offset, disp))
        }
        // [disp32] — absolute requires SIB in 64-bit mode.
        (None, None) => {
            buf.push(modrm(0b00, reg_field, 0b100));
            buf.push(sib(1, 0b100, 0b101));
            buf.extend_from_slice(&disp.to_le_bytes());
            None
        }
        // [index*scale + disp32] — mod=00 with SIB base 101 means no base.
        (None, Some(idx)) => {
            buf.push(modrm(0b00, reg_field, 0b100));
            buf.push(sib(normalize_scale(mem.scale), idx.base_code(), 0b101));
            buf.extend_from_slice(&disp.to_le_bytes());
            None
        }
        (Some(base), index) => {
            // RSP/R12 as base always needs SIB; RBP/R13 cannot use mod=00.
            let need_sib = index.is_some() || base.base_code() == 0b100;
            let (mod_bits, disp_len) = if disp == 0 && base.base_code() != 0b101 {
                (0b00, 0)
            } else if (-128..=127).contains(&disp) {
                (0b01, 1)
            } else {
                (0b10, 4)
            };

            if need_sib {
                let idx_code = index.map_or(0b100, Reg::base_code);
                buf.push(modrm(mod_bits, reg_field, 0b100));
                buf.push(sib(normalize_scale(mem.scale), idx_code, base.base_code()));
            } else {
                buf.push(modrm(mod_bits, reg_field, base.base_code()));
            }

            match disp_len {
                1 => buf.push(disp as i8 as u8),
                4 => buf.extend_from_slice(&disp.to_le_bytes()),
                _ => {}
            }
            None
        }
    }
}

/// Encode one instruction into `out` and return the byte length.
///
/// `out` must hold at least 15 bytes (the x86-64 instruction length limit).
/// Relative operands and `RipRel` references are emitted as zero
/// placeholders — this entry point performs no linking; use
/// [`assemble`](crate::assemble) for sequences that need it.
///
/// # Errors
///
/// Any selection or emission failure is returned and recorded in the
/// last-error channel. An undersized buffer fails with
/// [`Error::InvalidArgument`].
pub fn emit_one(instr: &Instr, out: &mut [u8]) -> Result<usize, Error> {
    if out.len() < 15 {
        return Err(set_last_error(Error::InvalidArgument {
            detail: "output buffer must hold at least 15 bytes",
        }));
    }
    match encode_instr(instr) {
        Ok(enc) => {
            out[..enc.bytes.len()].copy_from_slice(&enc.bytes);
            Ok(enc.bytes.len())
        }
        Err(e) => Err(set_last_error(e)),
    }
}
