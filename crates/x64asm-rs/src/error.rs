//! Error types and the last-error channel.

use core::fmt;

use crate::ir::Mnemonic;

/// Assembly error.
///
/// Every failure mode of the encoder pipeline maps to exactly one variant.
/// All payloads are `Copy` so errors can be stored in the thread-local
/// last-error slot without allocation; the static-string payload limits
/// serde support to `Serialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// Empty instruction slice or an undersized output buffer.
    InvalidArgument {
        /// What was wrong with the call.
        detail: &'static str,
    },

    /// The mnemonic has no entry in the encoding catalog.
    NoSuchMnemonic {
        /// The unknown mnemonic.
        mnemonic: Mnemonic,
    },

    /// The mnemonic exists but no encoding takes this many operands.
    NoSuchForm {
        /// The mnemonic.
        mnemonic: Mnemonic,
        /// The operand count that failed to match.
        arity: usize,
    },

    /// An encoding with this arity exists but an operand's shape does not fit.
    OperandMismatch {
        /// The mnemonic.
        mnemonic: Mnemonic,
    },

    /// A memory operand carries an explicit size the mnemonic cannot encode.
    SizeUnavailable {
        /// The mnemonic.
        mnemonic: Mnemonic,
        /// The requested memory operand size in bits.
        bits: u16,
    },

    /// A `PREF66` / `PREFREXW` hint is incompatible with every matching
    /// encoding.
    PrefixConflict {
        /// The mnemonic.
        mnemonic: Mnemonic,
    },

    /// AH/BH/CH/DH combined with an operand that forces a REX prefix.
    InvalidHighByteWithRex {
        /// The mnemonic.
        mnemonic: Mnemonic,
    },

    /// A resolved relative displacement does not fit the encoded width.
    RelOutOfRange {
        /// Index of the instruction holding the relative operand.
        instr: usize,
        /// The resolved byte displacement.
        disp: i64,
        /// Maximum magnitude the encoded field can hold.
        max: i64,
    },

    /// Output growth failed, or the sequence crossed the 4 GiB offset limit.
    OutOfMemory,
}

impl Error {
    /// Stable numeric code for the C-style accessor.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Error::InvalidArgument { .. } => 1,
            Error::NoSuchMnemonic { .. } => 2,
            Error::NoSuchForm { .. } => 3,
            Error::OperandMismatch { .. } => 4,
            Error::SizeUnavailable { .. } => 5,
            Error::PrefixConflict { .. } => 6,
            Error::InvalidHighByteWithRex { .. } => 7,
            Error::RelOutOfRange { .. } => 8,
            Error::OutOfMemory => 9,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { detail } => {
                write!(f, "invalid argument: {}", detail)
            }
            Error::NoSuchMnemonic { mnemonic } => {
                write!(f, "no encoding catalog entry for '{}'", mnemonic)
            }
            Error::NoSuchForm { mnemonic, arity } => {
                write!(f, "'{}' takes no {}-operand form", mnemonic, arity)
            }
            Error::OperandMismatch { mnemonic } => {
                write!(f, "operand combination not encodable for '{}'", mnemonic)
            }
            Error::SizeUnavailable { mnemonic, bits } => {
                write!(
                    f,
                    "'{}' has no encoding for a {}-bit memory operand",
                    mnemonic, bits
                )
            }
            Error::PrefixConflict { mnemonic } => {
                write!(
                    f,
                    "prefix hint incompatible with every '{}' encoding",
                    mnemonic
                )
            }
            Error::InvalidHighByteWithRex { mnemonic } => {
                write!(
                    f,
                    "'{}': high-byte register (AH/BH/CH/DH) cannot combine with a REX-requiring operand",
                    mnemonic
                )
            }
            Error::RelOutOfRange { instr, disp, max } => {
                write!(
                    f,
                    "instruction {}: relative displacement {} exceeds ±{}",
                    instr, disp, max
                )
            }
            Error::OutOfMemory => write!(f, "output buffer growth failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ─── Last-error channel ──────────────────────────────────────

#[cfg(feature = "std")]
std::thread_local! {
    static LAST_ERROR: core::cell::Cell<Option<Error>> = const { core::cell::Cell::new(None) };
}

/// Record `err` in the thread-local last-error slot and pass it through.
///
/// Only the assembler entry points write the slot; reading never clears it.
#[cfg(feature = "std")]
pub(crate) fn set_last_error(err: Error) -> Error {
    LAST_ERROR.with(|slot| slot.set(Some(err)));
    err
}

#[cfg(not(feature = "std"))]
pub(crate) fn set_last_error(err: Error) -> Error {
    err
}

/// The most recent error recorded on this thread, if any.
///
/// [`assemble`](crate::assemble) and [`emit_one`](crate::emit_one) populate
/// the slot on failure; successful calls leave it untouched. The primary
/// error surface is the `Result` return value — this accessor exists for
/// callers porting from last-error style APIs.
#[cfg(feature = "std")]
#[must_use]
pub fn last_error() -> Option<Error> {
    LAST_ERROR.with(core::cell::Cell::get)
}
