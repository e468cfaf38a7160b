//! Instruction records: registers, operands, memory references, mnemonics.
//!
//! These types are the input to the encoder pipeline. An [`Instr`] is a
//! POD-like aggregate of one [`Mnemonic`] and up to four [`Operand`]s, cheap
//! to copy and usable in `static` initializers. Helper constructors
//! ([`imm`], [`mem`], [`rel`], the register constants) keep call sites close
//! to assembly notation:
//!
//! ```rust
//! use x64asm_rs::{insn2, imm, Mnemonic, RAX};
//!
//! let record = insn2(Mnemonic::Mov, RAX, imm(0));
//! ```

use core::fmt;

/// x86-64 register.
///
/// Covers every architectural register the operand model names: general
/// purpose in all four widths (with the high-byte AH/CH/DH/BH forms as their
/// own class), the RIP pseudo-bases, segment, control, debug, MMX, SSE, AVX,
/// x87 stack, opmask, and bound registers. Each variant knows its own
/// 4-bit encoding index (see [`Reg::code`]) and class (see [`Reg::class`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reg {
    // -- 64-bit general-purpose registers --
    /// RAX — 64-bit accumulator.
    Rax,
    /// RCX — 64-bit counter.
    Rcx,
    /// RDX — 64-bit data.
    Rdx,
    /// RBX — 64-bit base.
    Rbx,
    /// RSP — 64-bit stack pointer.
    Rsp,
    /// RBP — 64-bit frame pointer.
    Rbp,
    /// RSI — 64-bit source index.
    Rsi,
    /// RDI — 64-bit destination index.
    Rdi,
    /// R8–R15 — extended 64-bit registers (require REX.B/R/X).
    R8,
    /// Extended 64-bit register.
    R9,
    /// Extended 64-bit register.
    R10,
    /// Extended 64-bit register.
    R11,
    /// Extended 64-bit register.
    R12,
    /// Extended 64-bit register.
    R13,
    /// Extended 64-bit register.
    R14,
    /// Extended 64-bit register.
    R15,
    // -- 32-bit general-purpose registers --
    /// EAX — 32-bit accumulator.
    Eax,
    /// 32-bit counter.
    Ecx,
    /// 32-bit data.
    Edx,
    /// 32-bit base.
    Ebx,
    /// 32-bit stack pointer.
    Esp,
    /// 32-bit frame pointer.
    Ebp,
    /// 32-bit source index.
    Esi,
    /// 32-bit destination index.
    Edi,
    /// Low 32 bits of R8.
    R8d,
    /// Low 32 bits of R9.
    R9d,
    /// Low 32 bits of R10.
    R10d,
    /// Low 32 bits of R11.
    R11d,
    /// Low 32 bits of R12.
    R12d,
    /// Low 32 bits of R13.
    R13d,
    /// Low 32 bits of R14.
    R14d,
    /// Low 32 bits of R15.
    R15d,
    // -- 16-bit general-purpose registers --
    /// AX — 16-bit accumulator.
    Ax,
    /// 16-bit counter.
    Cx,
    /// 16-bit data.
    Dx,
    /// 16-bit base.
    Bx,
    /// 16-bit stack pointer.
    Sp,
    /// 16-bit frame pointer.
    Bp,
    /// 16-bit source index.
    Si,
    /// 16-bit destination index.
    Di,
    /// Low 16 bits of R8.
    R8w,
    /// Low 16 bits of R9.
    R9w,
    /// Low 16 bits of R10.
    R10w,
    /// Low 16 bits of R11.
    R11w,
    /// Low 16 bits of R12.
    R12w,
    /// Low 16 bits of R13.
    R13w,
    /// Low 16 bits of R14.
    R14w,
    /// Low 16 bits of R15.
    R15w,
    // -- 8-bit general-purpose registers (low byte) --
    /// AL — low byte of RAX.
    Al,
    /// Low byte of RCX.
    Cl,
    /// Low byte of RDX.
    Dl,
    /// Low byte of RBX.
    Bl,
    /// SPL — low byte of RSP (only addressable with a REX prefix).
    Spl,
    /// BPL — low byte of RBP (only addressable with a REX prefix).
    Bpl,
    /// SIL — low byte of RSI (only addressable with a REX prefix).
    Sil,
    /// DIL — low byte of RDI (only addressable with a REX prefix).
    Dil,
    /// Low byte of R8.
    R8b,
    /// Low byte of R9.
    R9b,
    /// Low byte of R10.
    R10b,
    /// Low byte of R11.
    R11b,
    /// Low byte of R12.
    R12b,
    /// Low byte of R13.
    R13b,
    /// Low byte of R14.
    R14b,
    /// Low byte of R15.
    R15b,
    // -- 8-bit general-purpose registers (high byte) --
    /// AH — bits 8–15 of RAX. Incompatible with any REX prefix.
    Ah,
    /// CH — bits 8–15 of RCX. Incompatible with any REX prefix.
    Ch,
    /// DH — bits 8–15 of RDX. Incompatible with any REX prefix.
    Dh,
    /// BH — bits 8–15 of RBX. Incompatible with any REX prefix.
    Bh,
    // -- Instruction-pointer pseudo-bases --
    /// RIP — valid only as a memory base: `[rip + disp32]` with a
    /// caller-supplied absolute displacement from the end of the instruction.
    Rip,
    /// Instruction-relative pseudo-base: `[$+k]`. Valid only as a memory
    /// base inside [`assemble`](crate::assemble); the displacement field is
    /// an instruction delta the linker converts to a byte displacement.
    RipRel,
    // -- Segment registers --
    /// ES — extra segment.
    Es,
    /// CS — code segment.
    Cs,
    /// SS — stack segment.
    Ss,
    /// DS — data segment.
    Ds,
    /// FS — thread-local segment on x86-64 Linux.
    Fs,
    /// GS — thread-local segment on x86-64 Windows.
    Gs,
    // -- Control registers --
    /// CR0 — system control flags.
    Cr0,
    /// Control register 2 (page-fault linear address).
    Cr2,
    /// Control register 3 (page-table base).
    Cr3,
    /// Control register 4.
    Cr4,
    /// CR8 — task-priority register (encoded via REX.R).
    Cr8,
    // -- Debug registers --
    /// Debug address register 0.
    Dr0,
    /// Debug address register 1.
    Dr1,
    /// Debug address register 2.
    Dr2,
    /// Debug address register 3.
    Dr3,
    /// Debug status register.
    Dr6,
    /// Debug control register.
    Dr7,
    // -- 64-bit MMX registers --
    /// MMX register 0.
    Mm0,
    /// MMX register 1.
    Mm1,
    /// MMX register 2.
    Mm2,
    /// MMX register 3.
    Mm3,
    /// MMX register 4.
    Mm4,
    /// MMX register 5.
    Mm5,
    /// MMX register 6.
    Mm6,
    /// MMX register 7.
    Mm7,
    // -- 128-bit SSE registers --
    /// SSE register 0.
    Xmm0,
    /// SSE register 1.
    Xmm1,
    /// SSE register 2.
    Xmm2,
    /// SSE register 3.
    Xmm3,
    /// SSE register 4.
    Xmm4,
    /// SSE register 5.
    Xmm5,
    /// SSE register 6.
    Xmm6,
    /// SSE register 7.
    Xmm7,
    /// Extended SSE register (requires REX/VEX).
    Xmm8,
    /// Extended SSE register 9.
    Xmm9,
    /// Extended SSE register 10.
    Xmm10,
    /// Extended SSE register 11.
    Xmm11,
    /// Extended SSE register 12.
    Xmm12,
    /// Extended SSE register 13.
    Xmm13,
    /// Extended SSE register 14.
    Xmm14,
    /// Extended SSE register 15.
    Xmm15,
    // -- 256-bit AVX registers --
    /// AVX register 0.
    Ymm0,
    /// AVX register 1.
    Ymm1,
    /// AVX register 2.
    Ymm2,
    /// AVX register 3.
    Ymm3,
    /// AVX register 4.
    Ymm4,
    /// AVX register 5.
    Ymm5,
    /// AVX register 6.
    Ymm6,
    /// AVX register 7.
    Ymm7,
    /// Extended AVX register 8.
    Ymm8,
    /// Extended AVX register 9.
    Ymm9,
    /// Extended AVX register 10.
    Ymm10,
    /// Extended AVX register 11.
    Ymm11,
    /// Extended AVX register 12.
    Ymm12,
    /// Extended AVX register 13.
    Ymm13,
    /// Extended AVX register 14.
    Ymm14,
    /// Extended AVX register 15.
    Ymm15,
    // -- x87 FPU stack --
    /// ST(0) — x87 stack top.
    St0,
    /// x87 stack register 1.
    St1,
    /// x87 stack register 2.
    St2,
    /// x87 stack register 3.
    St3,
    /// x87 stack register 4.
    St4,
    /// x87 stack register 5.
    St5,
    /// x87 stack register 6.
    St6,
    /// x87 stack register 7.
    St7,
    // -- AVX-512 opmask registers (operand model only; no catalog entries) --
    /// Opmask register 0.
    K0,
    /// Opmask register 1.
    K1,
    /// Opmask register 2.
    K2,
    /// Opmask register 3.
    K3,
    /// Opmask register 4.
    K4,
    /// Opmask register 5.
    K5,
    /// Opmask register 6.
    K6,
    /// Opmask register 7.
    K7,
    // -- MPX bound registers (operand model only; no catalog entries) --
    /// Bound register 0.
    Bnd0,
    /// Bound register 1.
    Bnd1,
    /// Bound register 2.
    Bnd2,
    /// Bound register 3.
    Bnd3,
}

/// Register class — the coarse kind used for operand-shape matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegClass {
    /// 8-bit general purpose, low byte (AL..DIL, R8B..R15B).
    Gpr8,
    /// 8-bit general purpose, high byte (AH, CH, DH, BH).
    Gpr8h,
    /// 16-bit general purpose.
    Gpr16,
    /// 32-bit general purpose.
    Gpr32,
    /// 64-bit general purpose.
    Gpr64,
    /// RIP / instruction-relative pseudo-base.
    IpBase,
    /// Segment register.
    Seg,
    /// Control register.
    Cr,
    /// Debug register.
    Dr,
    /// 64-bit MMX register.
    Mmx,
    /// 128-bit SSE register.
    Xmm,
    /// 256-bit AVX register.
    Ymm,
    /// x87 stack register.
    St,
    /// AVX-512 opmask register.
    K,
    /// MPX bound register.
    Bnd,
}

impl Reg {
    /// The full 4-bit register index (0–15; CR8 is 8).
    #[must_use]
    pub fn code(self) -> u8 {
        use Reg::*;
        match self {
            Rax | Eax | Ax | Al | Es | Cr0 | Dr0 | Mm0 | Xmm0 | Ymm0 | St0 | K0 | Bnd0 => 0,
            Rcx | Ecx | Cx | Cl | Cs | Dr1 | Mm1 | Xmm1 | Ymm1 | St1 | K1 | Bnd1 => 1,
            Rdx | Edx | Dx | Dl | Ss | Cr2 | Dr2 | Mm2 | Xmm2 | Ymm2 | St2 | K2 | Bnd2 => 2,
            Rbx | Ebx | Bx | Bl | Ds | Cr3 | Dr3 | Mm3 | Xmm3 | Ymm3 | St3 | K3 | Bnd3 => 3,
            Rsp | Esp | Sp | Spl | Ah | Fs | Cr4 | Mm4 | Xmm4 | Ymm4 | St4 | K4 => 4,
            Rbp | Ebp | Bp | Bpl | Ch | Gs | Rip | RipRel | Mm5 | Xmm5 | Ymm5 | St5 | K5 => 5,
            Rsi | Esi | Si | Sil | Dh | Dr6 | Mm6 | Xmm6 | Ymm6 | St6 | K6 => 6,
            Rdi | Edi | Di | Dil | Bh | Dr7 | Mm7 | Xmm7 | Ymm7 | St7 | K7 => 7,
            R8 | R8d | R8w | R8b | Cr8 | Xmm8 | Ymm8 => 8,
            R9 | R9d | R9w | R9b | Xmm9 | Ymm9 => 9,
            R10 | R10d | R10w | R10b | Xmm10 | Ymm10 => 10,
            R11 | R11d | R11w | R11b | Xmm11 | Ymm11 => 11,
            R12 | R12d | R12w | R12b | Xmm12 | Ymm12 => 12,
            R13 | R13d | R13w | R13b | Xmm13 | Ymm13 => 13,
            R14 | R14d | R14w | R14b | Xmm14 | Ymm14 => 14,
            R15 | R15d | R15w | R15b | Xmm15 | Ymm15 => 15,
        }
    }

    /// The 3-bit encoding written into ModR/M, SIB, or an opcode+reg byte.
    #[must_use]
    pub fn base_code(self) -> u8 {
        self.code() & 7
    }

    /// Whether bit 3 of the index is set, requiring REX/VEX `.R`/`.X`/`.B`.
    #[must_use]
    pub fn is_extended(self) -> bool {
        self.code() >= 8
    }

    /// Whether this is a high-byte register (AH, CH, DH, BH).
    ///
    /// A REX prefix changes register codes 4–7 in byte context from
    /// AH/CH/DH/BH to SPL/BPL/SIL/DIL, so high-byte registers cannot appear
    /// in any instruction that emits REX.
    #[must_use]
    pub fn is_high_byte(self) -> bool {
        matches!(self, Reg::Ah | Reg::Ch | Reg::Dh | Reg::Bh)
    }

    /// Whether addressing this register in byte context forces a REX prefix
    /// (SPL, BPL, SIL, DIL).
    #[must_use]
    pub fn requires_rex_for_byte(self) -> bool {
        matches!(self, Reg::Spl | Reg::Bpl | Reg::Sil | Reg::Dil)
    }

    /// Register class.
    #[must_use]
    pub fn class(self) -> RegClass {
        use Reg::*;
        match self {
            Rax | Rcx | Rdx | Rbx | Rsp | Rbp | Rsi | Rdi | R8 | R9 | R10 | R11 | R12 | R13
            | R14 | R15 => RegClass::Gpr64,
            Eax | Ecx | Edx | Ebx | Esp | Ebp | Esi | Edi | R8d | R9d | R10d | R11d | R12d
            | R13d | R14d | R15d => RegClass::Gpr32,
            Ax | Cx | Dx | Bx | Sp | Bp | Si | Di | R8w | R9w | R10w | R11w | R12w | R13w
            | R14w | R15w => RegClass::Gpr16,
            Al | Cl | Dl | Bl | Spl | Bpl | Sil | Dil | R8b | R9b | R10b | R11b | R12b | R13b
            | R14b | R15b => RegClass::Gpr8,
            Ah | Ch | Dh | Bh => RegClass::Gpr8h,
            Rip | RipRel => RegClass::IpBase,
            Es | Cs | Ss | Ds | Fs | Gs => RegClass::Seg,
            Cr0 | Cr2 | Cr3 | Cr4 | Cr8 => RegClass::Cr,
            Dr0 | Dr1 | Dr2 | Dr3 | Dr6 | Dr7 => RegClass::Dr,
            Mm0 | Mm1 | Mm2 | Mm3 | Mm4 | Mm5 | Mm6 | Mm7 => RegClass::Mmx,
            Xmm0 | Xmm1 | Xmm2 | Xmm3 | Xmm4 | Xmm5 | Xmm6 | Xmm7 | Xmm8 | Xmm9 | Xmm10
            | Xmm11 | Xmm12 | Xmm13 | Xmm14 | Xmm15 => RegClass::Xmm,
            Ymm0 | Ymm1 | Ymm2 | Ymm3 | Ymm4 | Ymm5 | Ymm6 | Ymm7 | Ymm8 | Ymm9 | Ymm10
            | Ymm11 | Ymm12 | Ymm13 | Ymm14 | Ymm15 => RegClass::Ymm,
            St0 | St1 | St2 | St3 | St4 | St5 | St6 | St7 => RegClass::St,
            K0 | K1 | K2 | K3 | K4 | K5 | K6 | K7 => RegClass::K,
            Bnd0 | Bnd1 | Bnd2 | Bnd3 => RegClass::Bnd,
        }
    }

    /// Register width in bits (ST reports 80, segments 16, K 64, BND 128).
    #[must_use]
    pub fn size_bits(self) -> u16 {
        match self.class() {
            RegClass::Gpr8 | RegClass::Gpr8h => 8,
            RegClass::Gpr16 | RegClass::Seg => 16,
            RegClass::Gpr32 => 32,
            RegClass::Gpr64 | RegClass::IpBase | RegClass::Cr | RegClass::Dr | RegClass::Mmx
            | RegClass::K => 64,
            RegClass::Xmm | RegClass::Bnd => 128,
            RegClass::Ymm => 256,
            RegClass::St => 80,
        }
    }

    /// Intel-syntax register name (lowercase).
    #[must_use]
    pub fn name(self) -> &'static str {
        use Reg::*;
        match self {
            Rax => "rax",
            Rcx => "rcx",
            Rdx => "rdx",
            Rbx => "rbx",
            Rsp => "rsp",
            Rbp => "rbp",
            Rsi => "rsi",
            Rdi => "rdi",
            R8 => "r8",
            R9 => "r9",
            R10 => "r10",
            R11 => "r11",
            R12 => "r12",
            R13 => "r13",
            R14 => "r14",
            R15 => "r15",
            Eax => "eax",
            Ecx => "ecx",
            Edx => "edx",
            Ebx => "ebx",
            Esp => "esp",
            Ebp => "ebp",
            Esi => "esi",
            Edi => "edi",
            R8d => "r8d",
            R9d => "r9d",
            R10d => "r10d",
            R11d => "r11d",
            R12d => "r12d",
            R13d => "r13d",
            R14d => "r14d",
            R15d => "r15d",
            Ax => "ax",
            Cx => "cx",
            Dx => "dx",
            Bx => "bx",
            Sp => "sp",
            Bp => "bp",
            Si => "si",
            Di => "di",
            R8w => "r8w",
            R9w => "r9w",
            R10w => "r10w",
            R11w => "r11w",
            R12w => "r12w",
            R13w => "r13w",
            R14w => "r14w",
            R15w => "r15w",
            Al => "al",
            Cl => "cl",
            Dl => "dl",
            Bl => "bl",
            Spl => "spl",
            Bpl => "bpl",
            Sil => "sil",
            Dil => "dil",
            R8b => "r8b",
            R9b => "r9b",
            R10b => "r10b",
            R11b => "r11b",
            R12b => "r12b",
            R13b => "r13b",
            R14b => "r14b",
            R15b => "r15b",
            Ah => "ah",
            Ch => "ch",
            Dh => "dh",
            Bh => "bh",
            Rip => "rip",
            RipRel => "$",
            Es => "es",
            Cs => "cs",
            Ss => "ss",
            Ds => "ds",
            Fs => "fs",
            Gs => "gs",
            Cr0 => "cr0",
            Cr2 => "cr2",
            Cr3 => "cr3",
            Cr4 => "cr4",
            Cr8 => "cr8",
            Dr0 => "dr0",
            Dr1 => "dr1",
            Dr2 => "dr2",
            Dr3 => "dr3",
            Dr6 => "dr6",
            Dr7 => "dr7",
            Mm0 => "mm0",
            Mm1 => "mm1",
            Mm2 => "mm2",
            Mm3 => "mm3",
            Mm4 => "mm4",
            Mm5 => "mm5",
            Mm6 => "mm6",
            Mm7 => "mm7",
            Xmm0 => "xmm0",
            Xmm1 => "xmm1",
            Xmm2 => "xmm2",
            Xmm3 => "xmm3",
            Xmm4 => "xmm4",
            Xmm5 => "xmm5",
            Xmm6 => "xmm6",
            Xmm7 => "xmm7",
            Xmm8 => "xmm8",
            Xmm9 => "xmm9",
            Xmm10 => "xmm10",
            Xmm11 => "xmm11",
            Xmm12 => "xmm12",
            Xmm13 => "xmm13",
            Xmm14 => "xmm14",
            Xmm15 => "xmm15",
            Ymm0 => "ymm0",
            Ymm1 => "ymm1",
            Ymm2 => "ymm2",
            Ymm3 => "ymm3",
            Ymm4 => "ymm4",
            Ymm5 => "ymm5",
            Ymm6 => "ymm6",
            Ymm7 => "ymm7",
            Ymm8 => "ymm8",
            Ymm9 => "ymm9",
            Ymm10 => "ymm10",
            Ymm11 => "ymm11",
            Ymm12 => "ymm12",
            Ymm13 => "ymm13",
            Ymm14 => "ymm14",
            Ymm15 => "ymm15",
            St0 => "st0",
            St1 => "st1",
            St2 => "st2",
            St3 => "st3",
            St4 => "st4",
            St5 => "st5",
            St6 => "st6",
            St7 => "st7",
            K0 => "k0",
            K1 => "k1",
            K2 => "k2",
            K3 => "k3",
            K4 => "k4",
            K5 => "k5",
            K6 => "k6",
            K7 => "k7",
            Bnd0 => "bnd0",
            Bnd1 => "bnd1",
            Bnd2 => "bnd2",
            Bnd3 => "bnd3",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Memory operand size qualifier (`byte ptr`, `qword ptr`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandSize {
    /// 8-bit (`byte ptr`).
    Byte,
    /// 16-bit (`word ptr`).
    Word,
    /// 32-bit (`dword ptr`).
    Dword,
    /// 64-bit (`qword ptr`).
    Qword,
    /// 128-bit (`xmmword ptr`).
    Xmmword,
    /// 256-bit (`ymmword ptr`).
    Ymmword,
    /// 512-bit (`zmmword ptr`).
    Zmmword,
}

impl OperandSize {
    /// Size in bits.
    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            OperandSize::Byte => 8,
            OperandSize::Word => 16,
            OperandSize::Dword => 32,
            OperandSize::Qword => 64,
            OperandSize::Xmmword => 128,
            OperandSize::Ymmword => 256,
            OperandSize::Zmmword => 512,
        }
    }
}

impl fmt::Display for OperandSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandSize::Byte => f.write_str("byte"),
            OperandSize::Word => f.write_str("word"),
            OperandSize::Dword => f.write_str("dword"),
            OperandSize::Qword => f.write_str("qword"),
            OperandSize::Xmmword => f.write_str("xmmword"),
            OperandSize::Ymmword => f.write_str("ymmword"),
            OperandSize::Zmmword => f.write_str("zmmword"),
        }
    }
}

/// Immediate width selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmWidth {
    /// Exactly 8 bits.
    W8,
    /// Exactly 16 bits.
    W16,
    /// Exactly 32 bits.
    W32,
    /// Exactly 64 bits.
    W64,
    /// Pointer-width absolute address (`moffs` forms).
    Ptr,
    /// Let the selector pick the smallest legal width.
    Auto,
}

/// Relative-operand width selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelWidth {
    /// Smallest form the catalog offers (usually `rel8` where one exists).
    Auto,
    /// Force an 8-bit displacement.
    R8,
    /// Force a 32-bit displacement.
    R32,
}

/// Encoding prefix hint, passed as an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefixHint {
    /// Restrict selection to encodings that carry the 66 operand-size
    /// override (16-bit forms).
    P66,
    /// Restrict selection to encodings that set REX.W (64-bit forms).
    RexW,
}

/// A memory (indirect) operand.
///
/// All fields are optional; [`MemOperand::new`] (or [`mem`]) starts from the
/// empty reference and the builder methods fill it in. `scale` values other
/// than 1/2/4/8 are folded to 1 at encode time.
///
/// Special bases: [`Reg::Rip`] addresses `[rip + disp32]` with the
/// caller-supplied displacement taken verbatim; [`Reg::RipRel`] marks the
/// reference as instruction-relative — `disp` is then an instruction delta
/// and the linker computes the byte displacement. Neither accepts an index
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemOperand {
    /// Explicit size qualifier, or `None` to let the selector infer.
    pub size: Option<OperandSize>,
    /// Base register.
    pub base: Option<Reg>,
    /// Index register (never RSP).
    pub index: Option<Reg>,
    /// Index scale: 1, 2, 4, or 8.
    pub scale: u8,
    /// Signed 32-bit displacement (instruction delta for a `RipRel` base).
    pub disp: i32,
    /// Segment override.
    pub segment: Option<Reg>,
}

impl Default for MemOperand {
    fn default() -> Self {
        Self::new()
    }
}

impl MemOperand {
    /// The empty memory reference (`[0]` once encoded).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            size: None,
            base: None,
            index: None,
            scale: 1,
            disp: 0,
            segment: None,
        }
    }

    /// Set the base register.
    #[must_use]
    pub const fn base(mut self, base: Reg) -> Self {
        self.base = Some(base);
        self
    }

    /// Set the displacement.
    #[must_use]
    pub const fn disp(mut self, disp: i32) -> Self {
        self.disp = disp;
        self
    }

    /// Set the index register and scale.
    #[must_use]
    pub const fn index(mut self, index: Reg, scale: u8) -> Self {
        self.index = Some(index);
        self.scale = scale;
        self
    }

    /// Set the segment override.
    #[must_use]
    pub const fn segment(mut self, segment: Reg) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Set an explicit operand size (`byte ptr` …).
    #[must_use]
    pub const fn size(mut self, size: OperandSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// A single instruction operand.
///
/// Unused trailing slots of an [`Instr`] hold [`Operand::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// Absent operand.
    #[default]
    None,
    /// A register.
    Reg(Reg),
    /// An immediate value.
    Imm {
        /// Width selector.
        width: ImmWidth,
        /// The value, two's complement for negatives.
        value: i64,
    },
    /// A memory reference.
    Mem(MemOperand),
    /// An instruction-relative branch target: `delta` instructions away,
    /// `0` meaning the start of the holding instruction itself.
    Rel {
        /// Displacement width selector.
        width: RelWidth,
        /// Instruction delta (may be negative).
        delta: i32,
    },
    /// An encoding prefix hint.
    Pref(PrefixHint),
}

impl Operand {
    /// Whether this slot is empty.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

impl From<Reg> for Operand {
    fn from(r: Reg) -> Self {
        Operand::Reg(r)
    }
}

impl From<MemOperand> for Operand {
    fn from(m: MemOperand) -> Self {
        Operand::Mem(m)
    }
}

// ─── Operand constructors ────────────────────────────────────

/// Immediate with automatic width selection.
#[must_use]
pub const fn imm(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::Auto,
        value,
    }
}

/// 8-bit immediate.
#[must_use]
pub const fn im8(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::W8,
        value,
    }
}

/// 16-bit immediate.
#[must_use]
pub const fn im16(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::W16,
        value,
    }
}

/// 32-bit immediate.
#[must_use]
pub const fn im32(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::W32,
        value,
    }
}

/// 64-bit immediate.
#[must_use]
pub const fn im64(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::W64,
        value,
    }
}

/// Pointer-width absolute address, for the accumulator `moffs` forms.
#[must_use]
pub const fn imptr(value: i64) -> Operand {
    Operand::Imm {
        width: ImmWidth::Ptr,
        value,
    }
}

/// Memory reference with the given base register.
#[must_use]
pub const fn mem(base: Reg) -> MemOperand {
    MemOperand::new().base(base)
}

/// Absolute memory reference `[disp32]` (no base, no index).
#[must_use]
pub const fn mem_abs(disp: i32) -> MemOperand {
    MemOperand::new().disp(disp)
}

/// RIP-relative reference `[rip + disp]` with a caller-supplied displacement
/// from the end of the instruction.
#[must_use]
pub const fn rip(disp: i32) -> MemOperand {
    MemOperand::new().base(Reg::Rip).disp(disp)
}

/// Instruction-relative memory reference `[$+delta]`; the linker computes
/// the byte displacement.
#[must_use]
pub const fn riprel(delta: i32) -> MemOperand {
    MemOperand::new().base(Reg::RipRel).disp(delta)
}

/// Instruction-relative branch target, width-minimized.
#[must_use]
pub const fn rel(delta: i32) -> Operand {
    Operand::Rel {
        width: RelWidth::Auto,
        delta,
    }
}

/// Instruction-relative branch target forced to an 8-bit displacement.
#[must_use]
pub const fn rel8(delta: i32) -> Operand {
    Operand::Rel {
        width: RelWidth::R8,
        delta,
    }
}

/// Instruction-relative branch target forced to a 32-bit displacement.
#[must_use]
pub const fn rel32(delta: i32) -> Operand {
    Operand::Rel {
        width: RelWidth::R32,
        delta,
    }
}

/// Force the 66 operand-size override (select a 16-bit form).
pub const PREF66: Operand = Operand::Pref(PrefixHint::P66);

/// Force REX.W (select a 64-bit form).
pub const PREFREXW: Operand = Operand::Pref(PrefixHint::RexW);

macro_rules! mem_sized {
    ($($(#[$doc:meta])* $name:ident => $size:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub const fn $name(m: MemOperand) -> MemOperand {
                m.size(OperandSize::$size)
            }
        )*
    };
}

mem_sized! {
    /// Qualify a memory reference as `byte ptr`.
    m8 => Byte;
    /// Qualify a memory reference as `word ptr`.
    m16 => Word;
    /// Qualify a memory reference as `dword ptr`.
    m32 => Dword;
    /// Qualify a memory reference as `qword ptr`.
    m64 => Qword;
    /// Qualify a memory reference as `xmmword ptr`.
    m128 => Xmmword;
    /// Qualify a memory reference as `ymmword ptr`.
    m256 => Ymmword;
    /// Qualify a memory reference as `zmmword ptr`.
    m512 => Zmmword;
}

macro_rules! reg_consts {
    ($($const_name:ident => $variant:ident;)*) => {
        $(
            #[doc = concat!("The `", stringify!($variant), "` register as an operand.")]
            pub const $const_name: Operand = Operand::Reg(Reg::$variant);
        )*
    };
}

reg_consts! {
    RAX => Rax; RCX => Rcx; RDX => Rdx; RBX => Rbx;
    RSP => Rsp; RBP => Rbp; RSI => Rsi; RDI => Rdi;
    R8 => R8; R9 => R9; R10 => R10; R11 => R11;
    R12 => R12; R13 => R13; R14 => R14; R15 => R15;
    EAX => Eax; ECX => Ecx; EDX => Edx; EBX => Ebx;
    ESP => Esp; EBP => Ebp; ESI => Esi; EDI => Edi;
    R8D => R8d; R9D => R9d; R10D => R10d; R11D => R11d;
    R12D => R12d; R13D => R13d; R14D => R14d; R15D => R15d;
    AX => Ax; CX => Cx; DX => Dx; BX => Bx;
    SP => Sp; BP => Bp; SI => Si; DI => Di;
    R8W => R8w; R9W => R9w; R10W => R10w; R11W => R11w;
    R12W => R12w; R13W => R13w; R14W => R14w; R15W => R15w;
    AL => Al; CL => Cl; DL => Dl; BL => Bl;
    SPL => Spl; BPL => Bpl; SIL => Sil; DIL => Dil;
    R8B => R8b; R9B => R9b; R10B => R10b; R11B => R11b;
    R12B => R12b; R13B => R13b; R14B => R14b; R15B => R15b;
    AH => Ah; CH => Ch; DH => Dh; BH => Bh;
    ES => Es; CS => Cs; SS => Ss; DS => Ds; FS => Fs; GS => Gs;
    CR0 => Cr0; CR2 => Cr2; CR3 => Cr3; CR4 => Cr4; CR8 => Cr8;
    DR0 => Dr0; DR1 => Dr1; DR2 => Dr2; DR3 => Dr3; DR6 => Dr6; DR7 => Dr7;
    MM0 => Mm0; MM1 => Mm1; MM2 => Mm2; MM3 => Mm3;
    MM4 => Mm4; MM5 => Mm5; MM6 => Mm6; MM7 => Mm7;
    XMM0 => Xmm0; XMM1 => Xmm1; XMM2 => Xmm2; XMM3 => Xmm3;
    XMM4 => Xmm4; XMM5 => Xmm5; XMM6 => Xmm6; XMM7 => Xmm7;
    XMM8 => Xmm8; XMM9 => Xmm9; XMM10 => Xmm10; XMM11 => Xmm11;
    XMM12 => Xmm12; XMM13 => Xmm13; XMM14 => Xmm14; XMM15 => Xmm15;
    YMM0 => Ymm0; YMM1 => Ymm1; YMM2 => Ymm2; YMM3 => Ymm3;
    YMM4 => Ymm4; YMM5 => Ymm5; YMM6 => Ymm6; YMM7 => Ymm7;
    YMM8 => Ymm8; YMM9 => Ymm9; YMM10 => Ymm10; YMM11 => Ymm11;
    YMM12 => Ymm12; YMM13 => Ymm13; YMM14 => Ymm14; YMM15 => Ymm15;
    ST0 => St0; ST1 => St1; ST2 => St2; ST3 => St3;
    ST4 => St4; ST5 => St5; ST6 => St6; ST7 => St7;
    K0 => K0; K1 => K1; K2 => K2; K3 => K3;
    K4 => K4; K5 => K5; K6 => K6; K7 => K7;
    BND0 => Bnd0; BND1 => Bnd1; BND2 => Bnd2; BND3 => Bnd3;
}

// ─── Instruction record ──────────────────────────────────────

/// One instruction record: a mnemonic plus up to four operands.
///
/// The layout is caller-visible and stable; records work in `static`
/// initializers and arrays. Trailing unused slots are [`Operand::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instr {
    /// The instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Operand slots, in Intel order (destination first).
    pub operands: [Operand; 4],
}

impl Instr {
    /// Build a record from explicit operand slots.
    #[must_use]
    pub const fn new(mnemonic: Mnemonic, operands: [Operand; 4]) -> Self {
        Self { mnemonic, operands }
    }
}

/// Zero-operand instruction record.
#[must_use]
pub fn insn0(mnemonic: Mnemonic) -> Instr {
    Instr::new(mnemonic, [Operand::None; 4])
}

/// One-operand instruction record.
#[must_use]
pub fn insn1(mnemonic: Mnemonic, a: impl Into<Operand>) -> Instr {
    Instr::new(
        mnemonic,
        [a.into(), Operand::None, Operand::None, Operand::None],
    )
}

/// Two-operand instruction record.
#[must_use]
pub fn insn2(mnemonic: Mnemonic, a: impl Into<Operand>, b: impl Into<Operand>) -> Instr {
    Instr::new(mnemonic, [a.into(), b.into(), Operand::None, Operand::None])
}

/// Three-operand instruction record.
#[must_use]
pub fn insn3(
    mnemonic: Mnemonic,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
    c: impl Into<Operand>,
) -> Instr {
    Instr::new(mnemonic, [a.into(), b.into(), c.into(), Operand::None])
}

/// Four-operand instruction record.
#[must_use]
pub fn insn4(
    mnemonic: Mnemonic,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
    c: impl Into<Operand>,
    d: impl Into<Operand>,
) -> Instr {
    Instr::new(mnemonic, [a.into(), b.into(), c.into(), d.into()])
}

// ─── Mnemonics ───────────────────────────────────────────────

macro_rules! mnemonics {
    ($($variant:ident => $name:literal,)*) => {
        /// Instruction mnemonic — a dense identifier into the encoding
        /// catalog.
        ///
        /// The set is closed; every variant has at least one catalog entry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u16)]
        #[allow(missing_docs)]
        pub enum Mnemonic {
            $($variant,)*
        }

        impl Mnemonic {
            /// Every mnemonic, in declaration order.
            pub const ALL: &'static [Mnemonic] = &[$(Mnemonic::$variant,)*];

            /// Intel-syntax mnemonic text (lowercase).
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Mnemonic::$variant => $name,)*
                }
            }
        }

        impl core::str::FromStr for Mnemonic {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, ()> {
                match s {
                    $($name => Ok(Mnemonic::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}

mnemonics! {
    // Data movement
    Mov => "mov",
    Movzx => "movzx",
    Movsx => "movsx",
    Movsxd => "movsxd",
    Lea => "lea",
    Xchg => "xchg",
    Push => "push",
    Pop => "pop",
    Bswap => "bswap",
    Xadd => "xadd",
    Cmpxchg => "cmpxchg",
    // Integer arithmetic and logic
    Add => "add",
    Or => "or",
    Adc => "adc",
    Sbb => "sbb",
    And => "and",
    Sub => "sub",
    Xor => "xor",
    Cmp => "cmp",
    Test => "test",
    Inc => "inc",
    Dec => "dec",
    Not => "not",
    Neg => "neg",
    Mul => "mul",
    Imul => "imul",
    Div => "div",
    Idiv => "idiv",
    // Shifts and rotates
    Rol => "rol",
    Ror => "ror",
    Rcl => "rcl",
    Rcr => "rcr",
    Shl => "shl",
    Shr => "shr",
    Sar => "sar",
    Shld => "shld",
    Shrd => "shrd",
    // Bit manipulation
    Bt => "bt",
    Bts => "bts",
    Btr => "btr",
    Btc => "btc",
    Bsf => "bsf",
    Bsr => "bsr",
    Popcnt => "popcnt",
    Lzcnt => "lzcnt",
    Tzcnt => "tzcnt",
    // Conditional jumps (condition-code order)
    Jo => "jo",
    Jno => "jno",
    Jb => "jb",
    Jae => "jae",
    Jz => "jz",
    Jnz => "jnz",
    Jbe => "jbe",
    Ja => "ja",
    Js => "js",
    Jns => "jns",
    Jp => "jp",
    Jnp => "jnp",
    Jl => "jl",
    Jge => "jge",
    Jle => "jle",
    Jg => "jg",
    // Conditional set
    Seto => "seto",
    Setno => "setno",
    Setb => "setb",
    Setae => "setae",
    Setz => "setz",
    Setnz => "setnz",
    Setbe => "setbe",
    Seta => "seta",
    Sets => "sets",
    Setns => "setns",
    Setp => "setp",
    Setnp => "setnp",
    Setl => "setl",
    Setge => "setge",
    Setle => "setle",
    Setg => "setg",
    // Conditional move
    Cmovo => "cmovo",
    Cmovno => "cmovno",
    Cmovb => "cmovb",
    Cmovae => "cmovae",
    Cmovz => "cmovz",
    Cmovnz => "cmovnz",
    Cmovbe => "cmovbe",
    Cmova => "cmova",
    Cmovs => "cmovs",
    Cmovns => "cmovns",
    Cmovp => "cmovp",
    Cmovnp => "cmovnp",
    Cmovl => "cmovl",
    Cmovge => "cmovge",
    Cmovle => "cmovle",
    Cmovg => "cmovg",
    // Control flow
    Jmp => "jmp",
    Call => "call",
    Ret => "ret",
    Leave => "leave",
    Int => "int",
    Int3 => "int3",
    Ud2 => "ud2",
    Syscall => "syscall",
    Hlt => "hlt",
    Nop => "nop",
    Pause => "pause",
    // Flag manipulation
    Clc => "clc",
    Stc => "stc",
    Cmc => "cmc",
    Cld => "cld",
    Std => "std",
    Sahf => "sahf",
    Lahf => "lahf",
    // Width conversion
    Cbw => "cbw",
    Cwde => "cwde",
    Cdqe => "cdqe",
    Cwd => "cwd",
    Cdq => "cdq",
    Cqo => "cqo",
    // System
    Cpuid => "cpuid",
    Rdtsc => "rdtsc",
    // SSE/SSE2 moves
    Movd => "movd",
    Movq => "movq",
    Movaps => "movaps",
    Movups => "movups",
    Movapd => "movapd",
    Movupd => "movupd",
    Movss => "movss",
    Movsd => "movsd",
    Movdqa => "movdqa",
    Movdqu => "movdqu",
    // SSE/SSE2 arithmetic
    Addps => "addps",
    Addpd => "addpd",
    Addss => "addss",
    Addsd => "addsd",
    Subps => "subps",
    Subpd => "subpd",
    Subss => "subss",
    Subsd => "subsd",
    Mulps => "mulps",
    Mulpd => "mulpd",
    Mulss => "mulss",
    Mulsd => "mulsd",
    Divps => "divps",
    Divpd => "divpd",
    Divss => "divss",
    Divsd => "divsd",
    Sqrtps => "sqrtps",
    Sqrtpd => "sqrtpd",
    Sqrtss => "sqrtss",
    Sqrtsd => "sqrtsd",
    Andps => "andps",
    Andpd => "andpd",
    Orps => "orps",
    Orpd => "orpd",
    Xorps => "xorps",
    Xorpd => "xorpd",
    Ucomiss => "ucomiss",
    Ucomisd => "ucomisd",
    // Scalar conversions
    Cvtsi2ss => "cvtsi2ss",
    Cvtsi2sd => "cvtsi2sd",
    Cvttss2si => "cvttss2si",
    Cvttsd2si => "cvttsd2si",
    Cvtss2sd => "cvtss2sd",
    Cvtsd2ss => "cvtsd2ss",
    // Packed integer (MMX and SSE2 forms share the mnemonic)
    Pxor => "pxor",
    Pand => "pand",
    Por => "por",
    Paddb => "paddb",
    Paddw => "paddw",
    Paddd => "paddd",
    Paddq => "paddq",
    Psubb => "psubb",
    Psubw => "psubw",
    Psubd => "psubd",
    Psubq => "psubq",
    // AVX (VEX-encoded)
    Vmovaps => "vmovaps",
    Vmovups => "vmovups",
    Vmovdqa => "vmovdqa",
    Vmovdqu => "vmovdqu",
    Vaddps => "vaddps",
    Vaddpd => "vaddpd",
    Vaddss => "vaddss",
    Vaddsd => "vaddsd",
    Vsubps => "vsubps",
    Vsubpd => "vsubpd",
    Vsubss => "vsubss",
    Vsubsd => "vsubsd",
    Vmulps => "vmulps",
    Vmulpd => "vmulpd",
    Vmulss => "vmulss",
    Vmulsd => "vmulsd",
    Vdivps => "vdivps",
    Vdivpd => "vdivpd",
    Vdivss => "vdivss",
    Vdivsd => "vdivsd",
    Vsqrtps => "vsqrtps",
    Vsqrtpd => "vsqrtpd",
    Vandps => "vandps",
    Vandpd => "vandpd",
    Vorps => "vorps",
    Vorpd => "vorpd",
    Vxorps => "vxorps",
    Vxorpd => "vxorpd",
    Vpxor => "vpxor",
    Vpand => "vpand",
    Vpor => "vpor",
    Vpaddb => "vpaddb",
    Vpaddw => "vpaddw",
    Vpaddd => "vpaddd",
    Vpaddq => "vpaddq",
    Vpsubb => "vpsubb",
    Vpsubw => "vpsubw",
    Vpsubd => "vpsubd",
    Vpsubq => "vpsubq",
    // x87 FPU
    Fld => "fld",
    Fst => "fst",
    Fstp => "fstp",
    Fild => "fild",
    Fistp => "fistp",
    Fadd => "fadd",
    Faddp => "faddp",
    Fsub => "fsub",
    Fsubp => "fsubp",
    Fmul => "fmul",
    Fmulp => "fmulp",
    Fdiv => "fdiv",
    Fdivp => "fdivp",
    Fxch => "fxch",
    Fabs => "fabs",
    Fchs => "fchs",
    Fsqrt => "fsqrt",
    Fld1 => "fld1",
    Fldz => "fldz",
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
