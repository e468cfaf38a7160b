//! # x64asm-rs — Record-Based x86-64 Runtime Assembler
//!
//! `x64asm-rs` turns flat sequences of instruction records — a mnemonic plus
//! up to four operands — into legal x86-64 machine code at runtime,
//! resolving instruction-relative references in a second pass, and can map
//! the result into executable memory.
//!
//! ## Quick Start
//!
//! ```rust
//! use x64asm_rs::{assemble, imm, insn0, insn2, Mnemonic, RAX};
//!
//! let code = assemble(&[
//!     insn2(Mnemonic::Mov, RAX, imm(0)),
//!     insn0(Mnemonic::Ret),
//! ])
//! .unwrap();
//! assert_eq!(code, vec![0x48, 0xC7, 0xC0, 0x00, 0x00, 0x00, 0x00, 0xC3]);
//! ```
//!
//! ## Features
//!
//! - **Record-based** — no text parsing; instruction records are plain
//!   `Copy` structs usable in `static` initializers.
//! - **Table-driven** — a static catalog of encoding variants selected
//!   under size-minimization rules (smallest memory width, then smallest
//!   immediate).
//! - **Two-pass linking** — `rel(k)` branch targets and `[$+k]` memory
//!   references become byte-accurate displacements despite variable-length
//!   encodings.
//! - **`no_std` + `alloc`** core; the `jit` feature adds executable-memory
//!   mapping on top of `std`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// An encoder performs many deliberate narrowing casts between integer
// widths and traffics in dense hex literals (0x0F38, 0xC0). The lints
// below are expected and acceptable in this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::enum_glob_use,
    clippy::wildcard_imports,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::missing_errors_doc
)]

extern crate alloc;

/// Byte emitter: prefixes, REX/VEX, ModR/M, SIB, displacement, immediates.
pub mod encoder;
/// Error types and the thread-local last-error channel.
pub mod error;
/// Instruction records: registers, operands, memory references, mnemonics.
pub mod ir;
/// Executable-memory facade.
#[cfg(feature = "jit")]
pub mod jit;
/// Sequence assembly and relative-reference linking.
pub mod linker;
/// Intel-syntax rendering.
pub mod stringify;

pub(crate) mod selector;
pub(crate) mod table;

// Re-exports
pub use encoder::{emit_one, InstrBytes};
#[cfg(feature = "std")]
pub use error::last_error;
pub use error::Error;
pub use ir::*;
#[cfg(feature = "jit")]
pub use jit::ExecMem;
pub use linker::assemble;
pub use stringify::{stringify, stringify_one};
