//! Intel-syntax rendering of instruction records.
//!
//! The symmetric debug path of the encoder: the same records that assemble
//! to bytes render to readable text. Memory references print as
//! `[base + index*scale + disp]` with a `seg:` prefix and a `... ptr`
//! qualifier when the reference carries an explicit size; relative operands
//! print as `$+k`, instruction-relative references as `[$+k]`.

use alloc::string::String;
use core::fmt;

use crate::ir::{ImmWidth, Instr, MemOperand, Operand, PrefixHint, Reg};

/// Render a sequence, one instruction per line.
///
/// Multi-instruction sequences are tab-indented, matching common listing
/// output; a single instruction renders bare.
#[must_use]
pub fn stringify(instrs: &[Instr]) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    for instr in instrs {
        if instrs.len() > 1 {
            out.push('\t');
        }
        let _ = writeln!(out, "{}", instr);
    }
    out
}

/// Render one instruction without a trailing newline.
#[must_use]
pub fn stringify_one(instr: &Instr) -> String {
    use alloc::string::ToString;

    instr.to_string()
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        let mut first = true;
        for op in &self.operands {
            if op.is_none() {
                continue;
            }
            if first {
                write!(f, " ")?;
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Reg(r) => write!(f, "{}", r),
            Operand::Imm { width, value } => match width {
                // Pointer-width immediates are absolute addresses.
                ImmWidth::Ptr => write!(f, "[0x{:X}]", value),
                _ => write_signed_hex(f, *value),
            },
            Operand::Mem(m) => write!(f, "{}", m),
            Operand::Rel { delta, .. } => write_rel(f, *delta),
            Operand::Pref(PrefixHint::P66) => write!(f, "pref66"),
            Operand::Pref(PrefixHint::RexW) => write!(f, "prefrexw"),
        }
    }
}

impl fmt::Display for MemOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(size) = self.size {
            write!(f, "{} ptr ", size)?;
        }
        if let Some(seg) = self.segment {
            write!(f, "{}:", seg)?;
        }

        // Instruction-relative reference: the displacement is a delta.
        if self.base == Some(Reg::RipRel) {
            write!(f, "[")?;
            write_rel(f, self.disp)?;
            return write!(f, "]");
        }

        write!(f, "[")?;
        let mut parts = false;
        if let Some(base) = self.base {
            write!(f, "{}", base)?;
            parts = true;
        }
        if let Some(index) = self.index {
            if parts {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", index, self.scale)?;
            parts = true;
        }
        if self.disp != 0 || !parts {
            if parts {
                write!(f, " {} ", if self.disp < 0 { "-" } else { "+" })?;
                write!(f, "0x{:X}", self.disp.unsigned_abs())?;
            } else {
                write_signed_hex(f, i64::from(self.disp))?;
            }
        }
        write!(f, "]")
    }
}

fn write_signed_hex(f: &mut fmt::Formatter<'_>, v: i64) -> fmt::Result {
    if v < 0 {
        write!(f, "-0x{:X}", v.unsigned_abs())
    } else {
        write!(f, "0x{:X}", v)
    }
}

fn write_rel(f: &mut fmt::Formatter<'_>, delta: i32) -> fmt::Result {
    if delta < 0 {
        write!(f, "$-{}", delta.unsigned_abs())
    } else {
        write!(f, "$+{}", delta)
    }
}
