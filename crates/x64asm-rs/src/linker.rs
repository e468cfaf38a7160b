//! Sequence assembly: emit every instruction, then patch relative sites.
//!
//! Pass 1 encodes each record into a growing output buffer and collects
//! `start[i]` byte offsets plus flat [`Fixup`] records for every
//! instruction-relative operand. Pass 2 converts each fixup's target
//! instruction index into a byte displacement and writes it in place.
//! Fixup sites are disjoint, so patch order is unobservable.

use alloc::vec::Vec;

use crate::encoder::encode_instr;
use crate::error::{set_last_error, Error};
use crate::ir::Instr;

/// Offsets are 32-bit; sequences past 4 GiB of output are unsupported.
const MAX_OUTPUT: usize = u32::MAX as usize;

/// A recorded displacement site, resolved in pass 2.
#[derive(Debug, Clone, Copy)]
struct Fixup {
    /// Byte offset of the displacement field in the output.
    offset: u32,
    /// Field width in bytes: 1 or 4.
    width: u8,
    /// Index of the instruction holding the site.
    instr: u32,
    /// Index of the target instruction (`start[target]` is the destination).
    target: u32,
}

/// Assemble a sequence of instruction records into machine code.
///
/// Returns an exact-sized buffer of x86-64 machine code with every
/// [`rel`](crate::ir::rel) operand and [`riprel`](crate::ir::riprel)
/// reference resolved to a byte displacement. A `rel(k)` in instruction `i`
/// targets the start of instruction `i + k`; `k` may reach one past the last
/// instruction to address the end of the sequence.
///
/// # Errors
///
/// Fails with [`Error::InvalidArgument`] for an empty slice or an
/// out-of-sequence relative target, [`Error::RelOutOfRange`] when a resolved
/// displacement does not fit its encoded width, [`Error::OutOfMemory`] when
/// the output would cross the 4 GiB offset limit, and with the selection and
/// emission errors of [`emit_one`](crate::emit_one) otherwise. Every failure
/// is recorded in the last-error channel before returning.
pub fn assemble(instrs: &[Instr]) -> Result<Vec<u8>, Error> {
    assemble_inner(instrs).map_err(set_last_error)
}

fn assemble_inner(instrs: &[Instr]) -> Result<Vec<u8>, Error> {
    if instrs.is_empty() {
        return Err(Error::InvalidArgument {
            detail: "instruction sequence is empty",
        });
    }

    let n = instrs.len();
    let mut out: Vec<u8> = Vec::with_capacity(n * 4);
    let mut starts: Vec<u32> = Vec::with_capacity(n + 1);
    let mut fixups: Vec<Fixup> = Vec::new();

    // Pass 1 — emit.
    for (i, instr) in instrs.iter().enumerate() {
        starts.push(out.len() as u32);
        let enc = encode_instr(instr)?;
        if out.len() + enc.bytes.len() > MAX_OUTPUT {
            return Err(Error::OutOfMemory);
        }
        if let Some(f) = enc.fixup {
            let target = i as i64 + i64::from(f.delta);
            if target < 0 || target > n as i64 {
                return Err(Error::InvalidArgument {
                    detail: "relative operand targets outside the sequence",
                });
            }
            fixups.push(Fixup {
                offset: out.len() as u32 + u32::from(f.offset),
                width: f.width,
                instr: i as u32,
                target: target as u32,
            });
        }
        out.extend_from_slice(&enc.bytes);
    }
    starts.push(out.len() as u32);

    // Pass 2 — link.
    for f in &fixups {
        let target_offset = i64::from(starts[f.target as usize]);
        let here_end = i64::from(starts[f.instr as usize + 1]);
        let disp = target_offset - here_end;
        let site = f.offset as usize;
        match f.width {
            1 => {
                if i8::try_from(disp).is_err() {
                    return Err(Error::RelOutOfRange {
                        instr: f.instr as usize,
                        disp,
                        max: i64::from(i8::MAX),
                    });
                }
                out[site] = disp as i8 as u8;
            }
            _ => {
                if i32::try_from(disp).is_err() {
                    return Err(Error::RelOutOfRange {
                        instr: f.instr as usize,
                        disp,
                        max: i64::from(i32::MAX),
                    });
                }
                out[site..site + 4].copy_from_slice(&(disp as i32).to_le_bytes());
            }
        }
    }

    log::trace!(
        "assembled {} instructions into {} bytes ({} fixups)",
        n,
        out.len(),
        fixups.len()
    );
    Ok(out)
}
