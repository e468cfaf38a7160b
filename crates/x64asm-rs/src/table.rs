//! The static encoding catalog.
//!
//! One [`Variant`] row fully specifies how a matching operand combination
//! turns into bytes: the operand shape signature, the per-slot encoding
//! roles, opcode bytes (with legacy escapes), ModR/M extension digit, prefix
//! flags, and VEX fields. Rows are grouped per mnemonic in `static` slices;
//! [`variants`] dispatches on the mnemonic enum, which compiles down to an
//! offset lookup.
//!
//! Row order matters: the selector breaks exact ties by table position, so
//! shorter or more specific encodings come first within each group.

use crate::ir::Mnemonic;

/// Operand shape pattern — the table side of shape matching.
///
/// `Rm*` accepts a register of the width or a memory reference that is
/// unsized or explicitly of the width; `M*` accepts memory only. Immediate
/// patterns are split by storage width, with `SImm*` restricted to values
/// that survive sign extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pat {
    /// Unused slot.
    None,
    // Register classes
    R8,
    R16,
    R32,
    R64,
    Sreg,
    Cr,
    Dr,
    Mm,
    Xmm,
    Ymm,
    St,
    // Fixed registers
    Al,
    Cl,
    Ax,
    Eax,
    Rax,
    St0,
    // Register or memory
    Rm8,
    Rm16,
    Rm32,
    Rm64,
    XmmM32,
    XmmM64,
    XmmM128,
    YmmM256,
    MmM64,
    // Memory only
    M,
    M16,
    M32,
    M64,
    // Immediates
    One,
    Imm8,
    SImm8,
    Imm16,
    Imm32,
    SImm32,
    Imm64,
    Moffs,
    // Relative branch targets
    Rel8,
    Rel32,
}

impl Pat {
    /// Memory width this pattern can bind (0 = unconstrained or not memory).
    pub(crate) fn mem_bits(self) -> u16 {
        match self {
            Pat::Rm8 => 8,
            Pat::Rm16 | Pat::M16 => 16,
            Pat::Rm32 | Pat::M32 | Pat::XmmM32 => 32,
            Pat::Rm64 | Pat::M64 | Pat::XmmM64 | Pat::MmM64 => 64,
            Pat::XmmM128 => 128,
            Pat::YmmM256 => 256,
            _ => 0,
        }
    }

    /// Immediate/relative field width in bits (0 = no trailing field).
    pub(crate) fn field_bits(self) -> u16 {
        match self {
            Pat::Imm8 | Pat::SImm8 | Pat::Rel8 => 8,
            Pat::Imm16 => 16,
            Pat::Imm32 | Pat::SImm32 | Pat::Rel32 => 32,
            Pat::Imm64 | Pat::Moffs => 64,
            _ => 0,
        }
    }

    /// Bytes the emitter appends for an immediate/relative in this slot.
    pub(crate) fn field_len(self) -> u8 {
        (self.field_bits() / 8) as u8
    }
}

/// How an operand slot participates in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    /// Unused slot.
    None,
    /// Register index goes into ModRM.reg.
    Reg,
    /// Register or memory reference goes into ModRM.rm (+ SIB/disp).
    Rm,
    /// Register index goes into VEX.vvvv.
    Vvvv,
    /// Trailing immediate bytes.
    Imm,
    /// Trailing relative-displacement bytes (placeholder until link).
    Rel,
    /// Trailing 64-bit absolute address (`moffs` forms).
    Moffs,
    /// Register index is OR-ed into the low 3 bits of the last opcode byte.
    OpReg,
    /// Operand is implied by the opcode and emits nothing.
    Imp,
}

/// VEX prefix fields. `vvvv` sourcing is a [`Role`], not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Vex {
    /// Implied mandatory prefix: 0=none, 1=66, 2=F3, 3=F2.
    pub pp: u8,
    /// Escape map: 1=0F, 2=0F38, 3=0F3A.
    pub mm: u8,
    /// Vector length: false=128, true=256.
    pub l: bool,
    /// VEX.W.
    pub w: bool,
}

/// ModR/M extension sentinel: the reg field comes from an operand.
pub(crate) const EXT_NONE: u8 = 0xFF;

/// One encoding variant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Variant {
    /// Operand shape signature, [`Pat::None`]-padded.
    pub sig: [Pat; 4],
    /// Encoding role per slot.
    pub enc: [Role; 4],
    /// Opcode bytes (legacy escapes included; excluded under VEX).
    op: [u8; 3],
    oplen: u8,
    /// ModRM.reg extension digit, or [`EXT_NONE`].
    pub ext: u8,
    /// Mandatory SSE prefix byte (0, 0x66, 0xF2, 0xF3).
    pub mandatory: u8,
    /// Emit the 66 operand-size override.
    pub p66: bool,
    /// Set REX.W.
    pub rexw: bool,
    /// VEX encoding fields, when vector-encoded.
    pub vex: Option<Vex>,
}

const fn copy_op(src: &[u8]) -> ([u8; 3], u8) {
    let mut out = [0u8; 3];
    let mut i = 0;
    while i < src.len() {
        out[i] = src[i];
        i += 1;
    }
    (out, src.len() as u8)
}

impl Variant {
    pub(crate) fn opcode(&self) -> &[u8] {
        &self.op[..self.oplen as usize]
    }

    /// Number of operand slots in use.
    pub(crate) fn arity(&self) -> usize {
        let mut n = 0;
        while n < 4 && !matches!(self.sig[n], Pat::None) {
            n += 1;
        }
        n
    }

    const fn raw(op: &[u8]) -> Self {
        let (bytes, len) = copy_op(op);
        Variant {
            sig: [Pat::None; 4],
            enc: [Role::None; 4],
            op: bytes,
            oplen: len,
            ext: EXT_NONE,
            mandatory: 0,
            p66: false,
            rexw: false,
            // Written as `Option::None`: the file-level `use Pat::*` glob
            // makes a bare `None` resolve to the pattern variant.
            vex: Option::None,
        }
    }

    const fn slots2(mut self, a: Pat, ra: Role, b: Pat, rb: Role) -> Self {
        self.sig[0] = a;
        self.enc[0] = ra;
        self.sig[1] = b;
        self.enc[1] = rb;
        self
    }

    const fn slots3(mut self, c: Pat, rc: Role) -> Self {
        self.sig[2] = c;
        self.enc[2] = rc;
        self
    }

    // ── Row constructors, named after the encoding shape ──

    /// No operands; opcode bytes only.
    const fn fixed(op: &[u8]) -> Self {
        Self::raw(op)
    }

    /// `/r` with the r/m operand first: `op rm, reg`.
    const fn rm_r(op: &[u8], rm: Pat, r: Pat) -> Self {
        Self::raw(op).slots2(rm, Role::Rm, r, Role::Reg)
    }

    /// `/r` with the register operand first: `op reg, rm`.
    const fn r_rm(op: &[u8], r: Pat, rm: Pat) -> Self {
        Self::raw(op).slots2(r, Role::Reg, rm, Role::Rm)
    }

    /// `/digit` unary form.
    const fn rm_only(op: &[u8], ext: u8, rm: Pat) -> Self {
        let mut v = Self::raw(op);
        v.ext = ext;
        v.sig[0] = rm;
        v.enc[0] = Role::Rm;
        v
    }

    /// `/digit` with a trailing immediate.
    const fn rm_imm(op: &[u8], ext: u8, rm: Pat, i: Pat) -> Self {
        let mut v = Self::raw(op);
        v.ext = ext;
        v = v.slots2(rm, Role::Rm, i, Role::Imm);
        v
    }

    /// `/digit` shift with an implied second operand (`1` or `cl`).
    const fn rm_imp(op: &[u8], ext: u8, rm: Pat, imp: Pat) -> Self {
        let mut v = Self::raw(op);
        v.ext = ext;
        v = v.slots2(rm, Role::Rm, imp, Role::Imp);
        v
    }

    /// Accumulator short form with a trailing immediate; no ModR/M.
    const fn acc_imm(op: &[u8], acc: Pat, i: Pat) -> Self {
        Self::raw(op).slots2(acc, Role::Imp, i, Role::Imm)
    }

    /// Register in the low 3 opcode bits.
    const fn opreg(op: &[u8], r: Pat) -> Self {
        let mut v = Self::raw(op);
        v.sig[0] = r;
        v.enc[0] = Role::OpReg;
        v
    }

    /// Opcode+reg with a trailing immediate (`B0+rb`, `B8+rd`).
    const fn opreg_imm(op: &[u8], r: Pat, i: Pat) -> Self {
        Self::raw(op).slots2(r, Role::OpReg, i, Role::Imm)
    }

    /// Single relative-displacement operand.
    const fn rel_op(op: &[u8], p: Pat) -> Self {
        let mut v = Self::raw(op);
        v.sig[0] = p;
        v.enc[0] = Role::Rel;
        v
    }

    /// Single immediate operand, no ModR/M (`INT n`, `PUSH imm`).
    const fn imm_only(op: &[u8], i: Pat) -> Self {
        let mut v = Self::raw(op);
        v.sig[0] = i;
        v.enc[0] = Role::Imm;
        v
    }

    /// Accumulator ← absolute address (`A0`/`A1`).
    const fn acc_moffs(op: &[u8], acc: Pat) -> Self {
        Self::raw(op).slots2(acc, Role::Imp, Pat::Moffs, Role::Moffs)
    }

    /// Absolute address ← accumulator (`A2`/`A3`).
    const fn moffs_acc(op: &[u8], acc: Pat) -> Self {
        Self::raw(op).slots2(Pat::Moffs, Role::Moffs, acc, Role::Imp)
    }

    /// Three-operand `/r` + immediate (`IMUL r, rm, imm`).
    const fn r_rm_imm(op: &[u8], r: Pat, rm: Pat, i: Pat) -> Self {
        Self::raw(op)
            .slots2(r, Role::Reg, rm, Role::Rm)
            .slots3(i, Role::Imm)
    }

    /// Three-operand `/r` with rm first + immediate (`SHLD rm, r, imm8`).
    const fn rm_r_imm(op: &[u8], rm: Pat, r: Pat, i: Pat) -> Self {
        Self::raw(op)
            .slots2(rm, Role::Rm, r, Role::Reg)
            .slots3(i, Role::Imm)
    }

    /// Three-operand `/r` with an implied third operand (`SHLD rm, r, cl`).
    const fn rm_r_imp(op: &[u8], rm: Pat, r: Pat, imp: Pat) -> Self {
        Self::raw(op)
            .slots2(rm, Role::Rm, r, Role::Reg)
            .slots3(imp, Role::Imp)
    }

    /// Accumulator + opcode-reg pair (`XCHG rAX, r`).
    const fn acc_opreg(op: &[u8], acc: Pat, r: Pat) -> Self {
        Self::raw(op).slots2(acc, Role::Imp, r, Role::OpReg)
    }

    /// Opcode-reg + accumulator pair (`XCHG r, rAX`).
    const fn opreg_acc(op: &[u8], r: Pat, acc: Pat) -> Self {
        Self::raw(op).slots2(r, Role::OpReg, acc, Role::Imp)
    }

    /// x87 `ST(i)` in the low 3 bits of the second opcode byte.
    const fn st_opreg(op: &[u8]) -> Self {
        let mut v = Self::raw(op);
        v.sig[0] = Pat::St;
        v.enc[0] = Role::OpReg;
        v
    }

    /// x87 two-operand form `op st0, st(i)`.
    const fn st0_st(op: &[u8]) -> Self {
        Self::raw(op).slots2(Pat::St0, Role::Imp, Pat::St, Role::OpReg)
    }

    /// x87 two-operand form `op st(i), st0`.
    const fn st_st0(op: &[u8]) -> Self {
        Self::raw(op).slots2(Pat::St, Role::OpReg, Pat::St0, Role::Imp)
    }

    /// VEX three-operand `op dst, src1, src2` (`NDS` — src1 in vvvv).
    const fn v_rvm(op: &[u8], d: Pat, s1: Pat, s2: Pat) -> Self {
        Self::raw(op)
            .slots2(d, Role::Reg, s1, Role::Vvvv)
            .slots3(s2, Role::Rm)
    }

    /// VEX two-operand `op dst, src` (vvvv unused).
    const fn v_rm(op: &[u8], d: Pat, s: Pat) -> Self {
        Self::raw(op).slots2(d, Role::Reg, s, Role::Rm)
    }

    /// VEX two-operand store form `op dst, src` with dst in r/m.
    const fn v_mr(op: &[u8], d: Pat, s: Pat) -> Self {
        Self::raw(op).slots2(d, Role::Rm, s, Role::Reg)
    }

    // ── Modifiers ──

    /// Require REX.W.
    const fn w(mut self) -> Self {
        self.rexw = true;
        self
    }

    /// Emit the 66 operand-size override (16-bit form).
    const fn o16(mut self) -> Self {
        self.p66 = true;
        self
    }

    /// Mandatory 66 prefix (legacy SSE).
    const fn m66(mut self) -> Self {
        self.mandatory = 0x66;
        self
    }

    /// Mandatory F3 prefix.
    const fn f3(mut self) -> Self {
        self.mandatory = 0xF3;
        self
    }

    /// Mandatory F2 prefix.
    const fn f2(mut self) -> Self {
        self.mandatory = 0xF2;
        self
    }

    /// VEX-encode with the 0F map: `pp` as in the prefix byte, `l` selects
    /// 256-bit length.
    const fn vex(mut self, pp: u8, l: bool) -> Self {
        self.vex = Some(Vex {
            pp,
            mm: 1,
            l,
            w: false,
        });
        self
    }
}

// ─── Row families ────────────────────────────────────────────

use Pat::*;

type V = Variant;

/// The eight group-1 ALU operations share one shape; `b` is the base opcode
/// (`00` for ADD) and `ext` the `/digit` of the 80/81/83 immediate forms.
const fn alu(b: u8, ext: u8) -> [Variant; 19] {
    [
        V::acc_imm(&[b + 4], Al, Imm8),
        V::acc_imm(&[b + 5], Ax, Imm16).o16(),
        V::acc_imm(&[b + 5], Eax, Imm32),
        V::acc_imm(&[b + 5], Rax, SImm32).w(),
        V::rm_imm(&[0x80], ext, Rm8, Imm8),
        V::rm_imm(&[0x83], ext, Rm16, SImm8).o16(),
        V::rm_imm(&[0x81], ext, Rm16, Imm16).o16(),
        V::rm_imm(&[0x83], ext, Rm32, SImm8),
        V::rm_imm(&[0x81], ext, Rm32, Imm32),
        V::rm_imm(&[0x83], ext, Rm64, SImm8).w(),
        V::rm_imm(&[0x81], ext, Rm64, SImm32).w(),
        V::rm_r(&[b], Rm8, R8),
        V::rm_r(&[b + 1], Rm16, R16).o16(),
        V::rm_r(&[b + 1], Rm32, R32),
        V::rm_r(&[b + 1], Rm64, R64).w(),
        V::r_rm(&[b + 2], R8, Rm8),
        V::r_rm(&[b + 3], R16, Rm16).o16(),
        V::r_rm(&[b + 3], R32, Rm32),
        V::r_rm(&[b + 3], R64, Rm64).w(),
    ]
}

/// Group-2 shifts and rotates: by 1, by CL, by imm8, in four widths.
const fn shift(ext: u8) -> [Variant; 12] {
    [
        V::rm_imp(&[0xD0], ext, Rm8, One),
        V::rm_imp(&[0xD2], ext, Rm8, Cl),
        V::rm_imm(&[0xC0], ext, Rm8, Imm8),
        V::rm_imp(&[0xD1], ext, Rm16, One).o16(),
        V::rm_imp(&[0xD3], ext, Rm16, Cl).o16(),
        V::rm_imm(&[0xC1], ext, Rm16, Imm8).o16(),
        V::rm_imp(&[0xD1], ext, Rm32, One),
        V::rm_imp(&[0xD3], ext, Rm32, Cl),
        V::rm_imm(&[0xC1], ext, Rm32, Imm8),
        V::rm_imp(&[0xD1], ext, Rm64, One).w(),
        V::rm_imp(&[0xD3], ext, Rm64, Cl).w(),
        V::rm_imm(&[0xC1], ext, Rm64, Imm8).w(),
    ]
}

const fn jcc(cc: u8) -> [Variant; 2] {
    [
        V::rel_op(&[0x70 + cc], Rel8),
        V::rel_op(&[0x0F, 0x80 + cc], Rel32),
    ]
}

const fn setcc(cc: u8) -> [Variant; 1] {
    [V::rm_only(&[0x0F, 0x90 + cc], 0, Rm8)]
}

const fn cmovcc(cc: u8) -> [Variant; 3] {
    [
        V::r_rm(&[0x0F, 0x40 + cc], R16, Rm16).o16(),
        V::r_rm(&[0x0F, 0x40 + cc], R32, Rm32),
        V::r_rm(&[0x0F, 0x40 + cc], R64, Rm64).w(),
    ]
}

/// Bit test family: register form plus `/digit` imm8 form.
const fn bittest(op_r: u8, ext: u8) -> [Variant; 6] {
    [
        V::rm_r(&[0x0F, op_r], Rm16, R16).o16(),
        V::rm_r(&[0x0F, op_r], Rm32, R32),
        V::rm_r(&[0x0F, op_r], Rm64, R64).w(),
        V::rm_imm(&[0x0F, 0xBA], ext, Rm16, Imm8).o16(),
        V::rm_imm(&[0x0F, 0xBA], ext, Rm32, Imm8),
        V::rm_imm(&[0x0F, 0xBA], ext, Rm64, Imm8).w(),
    ]
}

/// `0F`-escape `/r` reg←rm in three widths (BSF/BSR/POPCNT shapes).
const fn r_rm3(op: u8, mandatory: u8) -> [Variant; 3] {
    let mut rows = [
        V::r_rm(&[0x0F, op], R16, Rm16).o16(),
        V::r_rm(&[0x0F, op], R32, Rm32),
        V::r_rm(&[0x0F, op], R64, Rm64).w(),
    ];
    rows[0].mandatory = mandatory;
    rows[1].mandatory = mandatory;
    rows[2].mandatory = mandatory;
    rows
}

/// Legacy-SSE packed op: `0F op /r xmm, xmm/m128` with a mandatory prefix.
const fn sse_packed(op: u8, mandatory: u8) -> [Variant; 1] {
    let mut v = V::r_rm(&[0x0F, op], Xmm, XmmM128);
    v.mandatory = mandatory;
    [v]
}

/// Legacy-SSE scalar op: `xmm, xmm/m32` (F3) or `xmm, xmm/m64` (F2).
const fn sse_scalar(op: u8, mandatory: u8, rm: Pat) -> [Variant; 1] {
    let mut v = V::r_rm(&[0x0F, op], Xmm, rm);
    v.mandatory = mandatory;
    [v]
}

/// MMX + SSE2 packed-integer op pair sharing one mnemonic.
const fn px(op: u8) -> [Variant; 2] {
    [
        V::r_rm(&[0x0F, op], Mm, MmM64),
        V::r_rm(&[0x0F, op], Xmm, XmmM128).m66(),
    ]
}

/// VEX NDS arithmetic in 128- and 256-bit lengths.
const fn vex_rvm(op: u8, pp: u8) -> [Variant; 2] {
    [
        V::v_rvm(&[op], Xmm, Xmm, XmmM128).vex(pp, false),
        V::v_rvm(&[op], Ymm, Ymm, YmmM256).vex(pp, true),
    ]
}

/// VEX NDS scalar arithmetic (LIG encoded as L=0).
const fn vex_rvm_scalar(op: u8, pp: u8, rm: Pat) -> [Variant; 1] {
    [V::v_rvm(&[op], Xmm, Xmm, rm).vex(pp, false)]
}

/// VEX load/store pair in both lengths.
const fn vex_mov(op_load: u8, op_store: u8, pp: u8) -> [Variant; 4] {
    [
        V::v_rm(&[op_load], Xmm, XmmM128).vex(pp, false),
        V::v_mr(&[op_store], XmmM128, Xmm).vex(pp, false),
        V::v_rm(&[op_load], Ymm, YmmM256).vex(pp, true),
        V::v_mr(&[op_store], YmmM256, Ymm).vex(pp, true),
    ]
}

// ─── Per-mnemonic tables ─────────────────────────────────────

static ALU: [[Variant; 19]; 8] = [
    alu(0x00, 0), // add
    alu(0x08, 1), // or
    alu(0x10, 2), // adc
    alu(0x18, 3), // sbb
    alu(0x20, 4), // and
    alu(0x28, 5), // sub
    alu(0x30, 6), // xor
    alu(0x38, 7), // cmp
];

static SHIFT: [[Variant; 12]; 7] = [
    shift(0), // rol
    shift(1), // ror
    shift(2), // rcl
    shift(3), // rcr
    shift(4), // shl
    shift(5), // shr
    shift(7), // sar
];

static JCC: [[Variant; 2]; 16] = [
    jcc(0),
    jcc(1),
    jcc(2),
    jcc(3),
    jcc(4),
    jcc(5),
    jcc(6),
    jcc(7),
    jcc(8),
    jcc(9),
    jcc(10),
    jcc(11),
    jcc(12),
    jcc(13),
    jcc(14),
    jcc(15),
];

static SETCC: [[Variant; 1]; 16] = [
    setcc(0),
    setcc(1),
    setcc(2),
    setcc(3),
    setcc(4),
    setcc(5),
    setcc(6),
    setcc(7),
    setcc(8),
    setcc(9),
    setcc(10),
    setcc(11),
    setcc(12),
    setcc(13),
    setcc(14),
    setcc(15),
];

static CMOVCC: [[Variant; 3]; 16] = [
    cmovcc(0),
    cmovcc(1),
    cmovcc(2),
    cmovcc(3),
    cmovcc(4),
    cmovcc(5),
    cmovcc(6),
    cmovcc(7),
    cmovcc(8),
    cmovcc(9),
    cmovcc(10),
    cmovcc(11),
    cmovcc(12),
    cmovcc(13),
    cmovcc(14),
    cmovcc(15),
];

static MOV: &[Variant] = &[
    // Register/memory moves.
    V::rm_r(&[0x88], Rm8, R8),
    V::rm_r(&[0x89], Rm16, R16).o16(),
    V::rm_r(&[0x89], Rm32, R32),
    V::rm_r(&[0x89], Rm64, R64).w(),
    V::r_rm(&[0x8A], R8, Rm8),
    V::r_rm(&[0x8B], R16, Rm16).o16(),
    V::r_rm(&[0x8B], R32, Rm32),
    V::r_rm(&[0x8B], R64, Rm64).w(),
    // Immediate loads: opcode+reg first (shorter than C6/C7 where equal).
    V::opreg_imm(&[0xB0], R8, Imm8),
    V::opreg_imm(&[0xB8], R16, Imm16).o16(),
    V::opreg_imm(&[0xB8], R32, Imm32),
    V::rm_imm(&[0xC7], 0, Rm64, SImm32).w(),
    V::opreg_imm(&[0xB8], R64, Imm64).w(),
    V::rm_imm(&[0xC6], 0, Rm8, Imm8),
    V::rm_imm(&[0xC7], 0, Rm16, Imm16).o16(),
    V::rm_imm(&[0xC7], 0, Rm32, Imm32),
    // Absolute accumulator forms.
    V::acc_moffs(&[0xA0], Al),
    V::acc_moffs(&[0xA1], Ax).o16(),
    V::acc_moffs(&[0xA1], Eax),
    V::acc_moffs(&[0xA1], Rax).w(),
    V::moffs_acc(&[0xA2], Al),
    V::moffs_acc(&[0xA3], Ax).o16(),
    V::moffs_acc(&[0xA3], Eax),
    V::moffs_acc(&[0xA3], Rax).w(),
    // Segment register moves.
    V::rm_r(&[0x8C], Rm16, Sreg).o16(),
    V::rm_r(&[0x8C], Rm64, Sreg).w(),
    V::r_rm(&[0x8E], Sreg, Rm16),
    // Control/debug register moves.
    V::rm_r(&[0x0F, 0x20], R64, Cr),
    V::r_rm(&[0x0F, 0x22], Cr, R64),
    V::rm_r(&[0x0F, 0x21], R64, Dr),
    V::r_rm(&[0x0F, 0x23], Dr, R64),
];

static MOVZX: &[Variant] = &[
    V::r_rm(&[0x0F, 0xB6], R16, Rm8).o16(),
    V::r_rm(&[0x0F, 0xB6], R32, Rm8),
    V::r_rm(&[0x0F, 0xB6], R64, Rm8).w(),
    V::r_rm(&[0x0F, 0xB7], R32, Rm16),
    V::r_rm(&[0x0F, 0xB7], R64, Rm16).w(),
];

static MOVSX: &[Variant] = &[
    V::r_rm(&[0x0F, 0xBE], R16, Rm8).o16(),
    V::r_rm(&[0x0F, 0xBE], R32, Rm8),
    V::r_rm(&[0x0F, 0xBE], R64, Rm8).w(),
    V::r_rm(&[0x0F, 0xBF], R32, Rm16),
    V::r_rm(&[0x0F, 0xBF], R64, Rm16).w(),
];

static MOVSXD: &[Variant] = &[V::r_rm(&[0x63], R64, Rm32).w()];

static LEA: &[Variant] = &[
    V::r_rm(&[0x8D], R16, M).o16(),
    V::r_rm(&[0x8D], R32, M),
    V::r_rm(&[0x8D], R64, M).w(),
];

static XCHG: &[Variant] = &[
    V::acc_opreg(&[0x90], Ax, R16).o16(),
    V::opreg_acc(&[0x90], R16, Ax).o16(),
    V::acc_opreg(&[0x90], Eax, R32),
    V::opreg_acc(&[0x90], R32, Eax),
    V::acc_opreg(&[0x90], Rax, R64).w(),
    V::opreg_acc(&[0x90], R64, Rax).w(),
    V::rm_r(&[0x86], Rm8, R8),
    V::r_rm(&[0x86], R8, Rm8),
    V::rm_r(&[0x87], Rm16, R16).o16(),
    V::r_rm(&[0x87], R16, Rm16).o16(),
    V::rm_r(&[0x87], Rm32, R32),
    V::r_rm(&[0x87], R32, Rm32),
    V::rm_r(&[0x87], Rm64, R64).w(),
    V::r_rm(&[0x87], R64, Rm64).w(),
];

static PUSH: &[Variant] = &[
    V::opreg(&[0x50], R64),
    V::imm_only(&[0x6A], SImm8),
    V::imm_only(&[0x68], SImm32),
    V::rm_only(&[0xFF], 6, Rm64),
];

static POP: &[Variant] = &[V::opreg(&[0x58], R64), V::rm_only(&[0x8F], 0, Rm64)];

static BSWAP: &[Variant] = &[
    V::opreg(&[0x0F, 0xC8], R32),
    V::opreg(&[0x0F, 0xC8], R64).w(),
];

static XADD: &[Variant] = &[
    V::rm_r(&[0x0F, 0xC0], Rm8, R8),
    V::rm_r(&[0x0F, 0xC1], Rm16, R16).o16(),
    V::rm_r(&[0x0F, 0xC1], Rm32, R32),
    V::rm_r(&[0x0F, 0xC1], Rm64, R64).w(),
];

static CMPXCHG: &[Variant] = &[
    V::rm_r(&[0x0F, 0xB0], Rm8, R8),
    V::rm_r(&[0x0F, 0xB1], Rm16, R16).o16(),
    V::rm_r(&[0x0F, 0xB1], Rm32, R32),
    V::rm_r(&[0x0F, 0xB1], Rm64, R64).w(),
];

static TEST: &[Variant] = &[
    V::acc_imm(&[0xA8], Al, Imm8),
    V::acc_imm(&[0xA9], Ax, Imm16).o16(),
    V::acc_imm(&[0xA9], Eax, Imm32),
    V::acc_imm(&[0xA9], Rax, SImm32).w(),
    V::rm_imm(&[0xF6], 0, Rm8, Imm8),
    V::rm_imm(&[0xF7], 0, Rm16, Imm16).o16(),
    V::rm_imm(&[0xF7], 0, Rm32, Imm32),
    V::rm_imm(&[0xF7], 0, Rm64, SImm32).w(),
    V::rm_r(&[0x84], Rm8, R8),
    V::rm_r(&[0x85], Rm16, R16).o16(),
    V::rm_r(&[0x85], Rm32, R32),
    V::rm_r(&[0x85], Rm64, R64).w(),
];

static INC: &[Variant] = &[
    V::rm_only(&[0xFE], 0, Rm8),
    V::rm_only(&[0xFF], 0, Rm16).o16(),
    V::rm_only(&[0xFF], 0, Rm32),
    V::rm_only(&[0xFF], 0, Rm64).w(),
];

static DEC: &[Variant] = &[
    V::rm_only(&[0xFE], 1, Rm8),
    V::rm_only(&[0xFF], 1, Rm16).o16(),
    V::rm_only(&[0xFF], 1, Rm32),
    V::rm_only(&[0xFF], 1, Rm64).w(),
];

/// F6/F7 group-3 unary family (`NOT`, `NEG`, `MUL`, `DIV`, …).
const fn group3(ext: u8) -> [Variant; 4] {
    [
        V::rm_only(&[0xF6], ext, Rm8),
        V::rm_only(&[0xF7], ext, Rm16).o16(),
        V::rm_only(&[0xF7], ext, Rm32),
        V::rm_only(&[0xF7], ext, Rm64).w(),
    ]
}

static NOT: [Variant; 4] = group3(2);
static NEG: [Variant; 4] = group3(3);
static MUL: [Variant; 4] = group3(4);
static DIV: [Variant; 4] = group3(6);
static IDIV: [Variant; 4] = group3(7);

static IMUL: &[Variant] = &[
    V::rm_only(&[0xF6], 5, Rm8),
    V::rm_only(&[0xF7], 5, Rm16).o16(),
    V::rm_only(&[0xF7], 5, Rm32),
    V::rm_only(&[0xF7], 5, Rm64).w(),
    V::r_rm(&[0x0F, 0xAF], R16, Rm16).o16(),
    V::r_rm(&[0x0F, 0xAF], R32, Rm32),
    V::r_rm(&[0x0F, 0xAF], R64, Rm64).w(),
    V::r_rm_imm(&[0x6B], R16, Rm16, SImm8).o16(),
    V::r_rm_imm(&[0x69], R16, Rm16, Imm16).o16(),
    V::r_rm_imm(&[0x6B], R32, Rm32, SImm8),
    V::r_rm_imm(&[0x69], R32, Rm32, Imm32),
    V::r_rm_imm(&[0x6B], R64, Rm64, SImm8).w(),
    V::r_rm_imm(&[0x69], R64, Rm64, SImm32).w(),
];

static SHLD: &[Variant] = &[
    V::rm_r_imm(&[0x0F, 0xA4], Rm16, R16, Imm8).o16(),
    V::rm_r_imm(&[0x0F, 0xA4], Rm32, R32, Imm8),
    V::rm_r_imm(&[0x0F, 0xA4], Rm64, R64, Imm8).w(),
    V::rm_r_imp(&[0x0F, 0xA5], Rm16, R16, Cl).o16(),
    V::rm_r_imp(&[0x0F, 0xA5], Rm32, R32, Cl),
    V::rm_r_imp(&[0x0F, 0xA5], Rm64, R64, Cl).w(),
];

static SHRD: &[Variant] = &[
    V::rm_r_imm(&[0x0F, 0xAC], Rm16, R16, Imm8).o16(),
    V::rm_r_imm(&[0x0F, 0xAC], Rm32, R32, Imm8),
    V::rm_r_imm(&[0x0F, 0xAC], Rm64, R64, Imm8).w(),
    V::rm_r_imp(&[0x0F, 0xAD], Rm16, R16, Cl).o16(),
    V::rm_r_imp(&[0x0F, 0xAD], Rm32, R32, Cl),
    V::rm_r_imp(&[0x0F, 0xAD], Rm64, R64, Cl).w(),
];

static BT: [Variant; 6] = bittest(0xA3, 4);
static BTS: [Variant; 6] = bittest(0xAB, 5);
static BTR: [Variant; 6] = bittest(0xB3, 6);
static BTC: [Variant; 6] = bittest(0xBB, 7);

static BSF: [Variant; 3] = r_rm3(0xBC, 0);
static BSR: [Variant; 3] = r_rm3(0xBD, 0);
static POPCNT: [Variant; 3] = r_rm3(0xB8, 0xF3);
static LZCNT: [Variant; 3] = r_rm3(0xBD, 0xF3);
static TZCNT: [Variant; 3] = r_rm3(0xBC, 0xF3);

static JMP: &[Variant] = &[
    V::rel_op(&[0xEB], Rel8),
    V::rel_op(&[0xE9], Rel32),
    V::rm_only(&[0xFF], 4, Rm64),
];

static CALL: &[Variant] = &[V::rel_op(&[0xE8], Rel32), V::rm_only(&[0xFF], 2, Rm64)];

static RET: &[Variant] = &[V::fixed(&[0xC3]), V::imm_only(&[0xC2], Imm16)];

static INT: &[Variant] = &[V::imm_only(&[0xCD], Imm8)];

static MOVD: &[Variant] = &[
    V::r_rm(&[0x0F, 0x6E], Mm, Rm32),
    V::rm_r(&[0x0F, 0x7E], Rm32, Mm),
    V::r_rm(&[0x0F, 0x6E], Xmm, Rm32).m66(),
    V::rm_r(&[0x0F, 0x7E], Rm32, Xmm).m66(),
];

static MOVQ: &[Variant] = &[
    V::r_rm(&[0x0F, 0x7E], Xmm, XmmM64).f3(),
    V::rm_r(&[0x0F, 0xD6], XmmM64, Xmm).m66(),
    V::r_rm(&[0x0F, 0x6F], Mm, MmM64),
    V::rm_r(&[0x0F, 0x7F], MmM64, Mm),
    V::r_rm(&[0x0F, 0x6E], Xmm, Rm64).m66().w(),
    V::rm_r(&[0x0F, 0x7E], Rm64, Xmm).m66().w(),
    V::r_rm(&[0x0F, 0x6E], Mm, Rm64).w(),
    V::rm_r(&[0x0F, 0x7E], Rm64, Mm).w(),
];

/// SSE register↔memory move pair (`load`, `store`) with a mandatory prefix.
const fn sse_mov(load: u8, store: u8, mandatory: u8, rm: Pat) -> [Variant; 2] {
    let mut a = V::r_rm(&[0x0F, load], Xmm, rm);
    let mut b = V::rm_r(&[0x0F, store], rm, Xmm);
    a.mandatory = mandatory;
    b.mandatory = mandatory;
    [a, b]
}

static MOVAPS: [Variant; 2] = sse_mov(0x28, 0x29, 0, XmmM128);
static MOVUPS: [Variant; 2] = sse_mov(0x10, 0x11, 0, XmmM128);
static MOVAPD: [Variant; 2] = sse_mov(0x28, 0x29, 0x66, XmmM128);
static MOVUPD: [Variant; 2] = sse_mov(0x10, 0x11, 0x66, XmmM128);
static MOVSS: [Variant; 2] = sse_mov(0x10, 0x11, 0xF3, XmmM32);
static MOVSD: [Variant; 2] = sse_mov(0x10, 0x11, 0xF2, XmmM64);
static MOVDQA: [Variant; 2] = sse_mov(0x6F, 0x7F, 0x66, XmmM128);
static MOVDQU: [Variant; 2] = sse_mov(0x6F, 0x7F, 0xF3, XmmM128);

static ADDPS: [Variant; 1] = sse_packed(0x58, 0);
static ADDPD: [Variant; 1] = sse_packed(0x58, 0x66);
static ADDSS: [Variant; 1] = sse_scalar(0x58, 0xF3, XmmM32);
static ADDSD: [Variant; 1] = sse_scalar(0x58, 0xF2, XmmM64);
static SUBPS: [Variant; 1] = sse_packed(0x5C, 0);
static SUBPD: [Variant; 1] = sse_packed(0x5C, 0x66);
static SUBSS: [Variant; 1] = sse_scalar(0x5C, 0xF3, XmmM32);
static SUBSD: [Variant; 1] = sse_scalar(0x5C, 0xF2, XmmM64);
static MULPS: [Variant; 1] = sse_packed(0x59, 0);
static MULPD: [Variant; 1] = sse_packed(0x59, 0x66);
static MULSS: [Variant; 1] = sse_scalar(0x59, 0xF3, XmmM32);
static MULSD: [Variant; 1] = sse_scalar(0x59, 0xF2, XmmM64);
static DIVPS: [Variant; 1] = sse_packed(0x5E, 0);
static DIVPD: [Variant; 1] = sse_packed(0x5E, 0x66);
static DIVSS: [Variant; 1] = sse_scalar(0x5E, 0xF3, XmmM32);
static DIVSD: [Variant; 1] = sse_scalar(0x5E, 0xF2, XmmM64);
static SQRTPS: [Variant; 1] = sse_packed(0x51, 0);
static SQRTPD: [Variant; 1] = sse_packed(0x51, 0x66);
static SQRTSS: [Variant; 1] = sse_scalar(0x51, 0xF3, XmmM32);
static SQRTSD: [Variant; 1] = sse_scalar(0x51, 0xF2, XmmM64);
static ANDPS: [Variant; 1] = sse_packed(0x54, 0);
static ANDPD: [Variant; 1] = sse_packed(0x54, 0x66);
static ORPS: [Variant; 1] = sse_packed(0x56, 0);
static ORPD: [Variant; 1] = sse_packed(0x56, 0x66);
static XORPS: [Variant; 1] = sse_packed(0x57, 0);
static XORPD: [Variant; 1] = sse_packed(0x57, 0x66);
static UCOMISS: [Variant; 1] = sse_scalar(0x2E, 0, XmmM32);
static UCOMISD: [Variant; 1] = sse_scalar(0x2E, 0x66, XmmM64);

static CVTSI2SS: &[Variant] = &[
    V::r_rm(&[0x0F, 0x2A], Xmm, Rm32).f3(),
    V::r_rm(&[0x0F, 0x2A], Xmm, Rm64).f3().w(),
];
static CVTSI2SD: &[Variant] = &[
    V::r_rm(&[0x0F, 0x2A], Xmm, Rm32).f2(),
    V::r_rm(&[0x0F, 0x2A], Xmm, Rm64).f2().w(),
];
static CVTTSS2SI: &[Variant] = &[
    V::r_rm(&[0x0F, 0x2C], R32, XmmM32).f3(),
    V::r_rm(&[0x0F, 0x2C], R64, XmmM32).f3().w(),
];
static CVTTSD2SI: &[Variant] = &[
    V::r_rm(&[0x0F, 0x2C], R32, XmmM64).f2(),
    V::r_rm(&[0x0F, 0x2C], R64, XmmM64).f2().w(),
];
static CVTSS2SD: [Variant; 1] = sse_scalar(0x5A, 0xF3, XmmM32);
static CVTSD2SS: [Variant; 1] = sse_scalar(0x5A, 0xF2, XmmM64);

static PXOR: [Variant; 2] = px(0xEF);
static PAND: [Variant; 2] = px(0xDB);
static POR: [Variant; 2] = px(0xEB);
static PADDB: [Variant; 2] = px(0xFC);
static PADDW: [Variant; 2] = px(0xFD);
static PADDD: [Variant; 2] = px(0xFE);
static PADDQ: [Variant; 2] = px(0xD4);
static PSUBB: [Variant; 2] = px(0xF8);
static PSUBW: [Variant; 2] = px(0xF9);
static PSUBD: [Variant; 2] = px(0xFA);
static PSUBQ: [Variant; 2] = px(0xFB);

static VMOVAPS: [Variant; 4] = vex_mov(0x28, 0x29, 0);
static VMOVUPS: [Variant; 4] = vex_mov(0x10, 0x11, 0);
static VMOVDQA: [Variant; 4] = vex_mov(0x6F, 0x7F, 1);
static VMOVDQU: [Variant; 4] = vex_mov(0x6F, 0x7F, 2);

static VADDPS: [Variant; 2] = vex_rvm(0x58, 0);
static VADDPD: [Variant; 2] = vex_rvm(0x58, 1);
static VADDSS: [Variant; 1] = vex_rvm_scalar(0x58, 2, XmmM32);
static VADDSD: [Variant; 1] = vex_rvm_scalar(0x58, 3, XmmM64);
static VSUBPS: [Variant; 2] = vex_rvm(0x5C, 0);
static VSUBPD: [Variant; 2] = vex_rvm(0x5C, 1);
static VSUBSS: [Variant; 1] = vex_rvm_scalar(0x5C, 2, XmmM32);
static VSUBSD: [Variant; 1] = vex_rvm_scalar(0x5C, 3, XmmM64);
static VMULPS: [Variant; 2] = vex_rvm(0x59, 0);
static VMULPD: [Variant; 2] = vex_rvm(0x59, 1);
static VMULSS: [Variant; 1] = vex_rvm_scalar(0x59, 2, XmmM32);
static VMULSD: [Variant; 1] = vex_rvm_scalar(0x59, 3, XmmM64);
static VDIVPS: [Variant; 2] = vex_rvm(0x5E, 0);
static VDIVPD: [Variant; 2] = vex_rvm(0x5E, 1);
static VDIVSS: [Variant; 1] = vex_rvm_scalar(0x5E, 2, XmmM32);
static VDIVSD: [Variant; 1] = vex_rvm_scalar(0x5E, 3, XmmM64);
static VSQRTPS: &[Variant] = &[
    V::v_rm(&[0x51], Xmm, XmmM128).vex(0, false),
    V::v_rm(&[0x51], Ymm, YmmM256).vex(0, true),
];
static VSQRTPD: &[Variant] = &[
    V::v_rm(&[0x51], Xmm, XmmM128).vex(1, false),
    V::v_rm(&[0x51], Ymm, YmmM256).vex(1, true),
];
static VANDPS: [Variant; 2] = vex_rvm(0x54, 0);
static VANDPD: [Variant; 2] = vex_rvm(0x54, 1);
static VORPS: [Variant; 2] = vex_rvm(0x56, 0);
static VORPD: [Variant; 2] = vex_rvm(0x56, 1);
static VXORPS: [Variant; 2] = vex_rvm(0x57, 0);
static VXORPD: [Variant; 2] = vex_rvm(0x57, 1);
static VPXOR: [Variant; 2] = vex_rvm(0xEF, 1);
static VPAND: [Variant; 2] = vex_rvm(0xDB, 1);
static VPOR: [Variant; 2] = vex_rvm(0xEB, 1);
static VPADDB: [Variant; 2] = vex_rvm(0xFC, 1);
static VPADDW: [Variant; 2] = vex_rvm(0xFD, 1);
static VPADDD: [Variant; 2] = vex_rvm(0xFE, 1);
static VPADDQ: [Variant; 2] = vex_rvm(0xD4, 1);
static VPSUBB: [Variant; 2] = vex_rvm(0xF8, 1);
static VPSUBW: [Variant; 2] = vex_rvm(0xF9, 1);
static VPSUBD: [Variant; 2] = vex_rvm(0xFA, 1);
static VPSUBQ: [Variant; 2] = vex_rvm(0xFB, 1);

static FLD: &[Variant] = &[
    V::rm_only(&[0xD9], 0, M32),
    V::rm_only(&[0xDD], 0, M64),
    V::st_opreg(&[0xD9, 0xC0]),
];
static FST: &[Variant] = &[
    V::rm_only(&[0xD9], 2, M32),
    V::rm_only(&[0xDD], 2, M64),
    V::st_opreg(&[0xDD, 0xD0]),
];
static FSTP: &[Variant] = &[
    V::rm_only(&[0xD9], 3, M32),
    V::rm_only(&[0xDD], 3, M64),
    V::st_opreg(&[0xDD, 0xD8]),
];
static FILD: &[Variant] = &[
    V::rm_only(&[0xDF], 0, M16),
    V::rm_only(&[0xDB], 0, M32),
    V::rm_only(&[0xDF], 5, M64),
];
static FISTP: &[Variant] = &[
    V::rm_only(&[0xDF], 3, M16),
    V::rm_only(&[0xDB], 3, M32),
    V::rm_only(&[0xDF], 7, M64),
];
static FADD: &[Variant] = &[
    V::rm_only(&[0xD8], 0, M32),
    V::rm_only(&[0xDC], 0, M64),
    V::st0_st(&[0xD8, 0xC0]),
    V::st_st0(&[0xDC, 0xC0]),
];
static FADDP: &[Variant] = &[V::st_st0(&[0xDE, 0xC0]), V::fixed(&[0xDE, 0xC1])];
static FSUB: &[Variant] = &[
    V::rm_only(&[0xD8], 4, M32),
    V::rm_only(&[0xDC], 4, M64),
    V::st0_st(&[0xD8, 0xE0]),
    V::st_st0(&[0xDC, 0xE8]),
];
static FSUBP: &[Variant] = &[V::st_st0(&[0xDE, 0xE8]), V::fixed(&[0xDE, 0xE9])];
static FMUL: &[Variant] = &[
    V::rm_only(&[0xD8], 1, M32),
    V::rm_only(&[0xDC], 1, M64),
    V::st0_st(&[0xD8, 0xC8]),
    V::st_st0(&[0xDC, 0xC8]),
];
static FMULP: &[Variant] = &[V::st_st0(&[0xDE, 0xC8]), V::fixed(&[0xDE, 0xC9])];
static FDIV: &[Variant] = &[
    V::rm_only(&[0xD8], 6, M32),
    V::rm_only(&[0xDC], 6, M64),
    V::st0_st(&[0xD8, 0xF0]),
    V::st_st0(&[0xDC, 0xF8]),
];
static FDIVP: &[Variant] = &[V::st_st0(&[0xDE, 0xF8]), V::fixed(&[0xDE, 0xF9])];
static FXCH: &[Variant] = &[V::st_opreg(&[0xD9, 0xC8]), V::fixed(&[0xD9, 0xC9])];

macro_rules! fixed_rows {
    ($($name:ident => $row:expr;)*) => {
        $(static $name: &[Variant] = &[$row];)*
    };
}

fixed_rows! {
    LEAVE => V::fixed(&[0xC9]);
    INT3 => V::fixed(&[0xCC]);
    UD2 => V::fixed(&[0x0F, 0x0B]);
    SYSCALL => V::fixed(&[0x0F, 0x05]);
    HLT => V::fixed(&[0xF4]);
    NOP => V::fixed(&[0x90]);
    PAUSE => V::fixed(&[0xF3, 0x90]);
    CLC => V::fixed(&[0xF8]);
    STC => V::fixed(&[0xF9]);
    CMC => V::fixed(&[0xF5]);
    CLD => V::fixed(&[0xFC]);
    STD => V::fixed(&[0xFD]);
    SAHF => V::fixed(&[0x9E]);
    LAHF => V::fixed(&[0x9F]);
    CBW => V::fixed(&[0x98]).o16();
    CWDE => V::fixed(&[0x98]);
    CDQE => V::fixed(&[0x98]).w();
    CWD => V::fixed(&[0x99]).o16();
    CDQ => V::fixed(&[0x99]);
    CQO => V::fixed(&[0x99]).w();
    CPUID => V::fixed(&[0x0F, 0xA2]);
    RDTSC => V::fixed(&[0x0F, 0x31]);
    FABS => V::fixed(&[0xD9, 0xE1]);
    FCHS => V::fixed(&[0xD9, 0xE0]);
    FSQRT => V::fixed(&[0xD9, 0xFA]);
    FLD1 => V::fixed(&[0xD9, 0xE8]);
    FLDZ => V::fixed(&[0xD9, 0xEE]);
}

/// Catalog entries for a mnemonic, in precedence order.
pub(crate) fn variants(m: Mnemonic) -> &'static [Variant] {
    use Mnemonic as M;

    // Condition-code and group families index by distance from the family
    // base; the mnemonic declaration keeps each family contiguous and in
    // hardware encoding order.
    let mi = m as u16;
    if (M::Add as u16..=M::Cmp as u16).contains(&mi) {
        return &ALU[(mi - M::Add as u16) as usize];
    }
    if (M::Rol as u16..=M::Sar as u16).contains(&mi) {
        return &SHIFT[(mi - M::Rol as u16) as usize];
    }
    if (M::Jo as u16..=M::Jg as u16).contains(&mi) {
        return &JCC[(mi - M::Jo as u16) as usize];
    }
    if (M::Seto as u16..=M::Setg as u16).contains(&mi) {
        return &SETCC[(mi - M::Seto as u16) as usize];
    }
    if (M::Cmovo as u16..=M::Cmovg as u16).contains(&mi) {
        return &CMOVCC[(mi - M::Cmovo as u16) as usize];
    }

    match m {
        M::Mov => MOV,
        M::Movzx => MOVZX,
        M::Movsx => MOVSX,
        M::Movsxd => MOVSXD,
        M::Lea => LEA,
        M::Xchg => XCHG,
        M::Push => PUSH,
        M::Pop => POP,
        M::Bswap => BSWAP,
        M::Xadd => XADD,
        M::Cmpxchg => CMPXCHG,
        M::Test => TEST,
        M::Inc => INC,
        M::Dec => DEC,
        M::Not => &NOT,
        M::Neg => &NEG,
        M::Mul => &MUL,
        M::Imul => IMUL,
        M::Div => &DIV,
        M::Idiv => &IDIV,
        M::Shld => SHLD,
        M::Shrd => SHRD,
        M::Bt => &BT,
        M::Bts => &BTS,
        M::Btr => &BTR,
        M::Btc => &BTC,
        M::Bsf => &BSF,
        M::Bsr => &BSR,
        M::Popcnt => &POPCNT,
        M::Lzcnt => &LZCNT,
        M::Tzcnt => &TZCNT,
        M::Jmp => JMP,
        M::Call => CALL,
        M::Ret => RET,
        M::Leave => LEAVE,
        M::Int => INT,
        M::Int3 => INT3,
        M::Ud2 => UD2,
        M::Syscall => SYSCALL,
        M::Hlt => HLT,
        M::Nop => NOP,
        M::Pause => PAUSE,
        M::Clc => CLC,
        M::Stc => STC,
        M::Cmc => CMC,
        M::Cld => CLD,
        M::Std => STD,
        M::Sahf => SAHF,
        M::Lahf => LAHF,
        M::Cbw => CBW,
        M::Cwde => CWDE,
        M::Cdqe => CDQE,
        M::Cwd => CWD,
        M::Cdq => CDQ,
        M::Cqo => CQO,
        M::Cpuid => CPUID,
        M::Rdtsc => RDTSC,
        M::Movd => MOVD,
        M::Movq => MOVQ,
        M::Movaps => &MOVAPS,
        M::Movups => &MOVUPS,
        M::Movapd => &MOVAPD,
        M::Movupd => &MOVUPD,
        M::Movss => &MOVSS,
        M::Movsd => &MOVSD,
        M::Movdqa => &MOVDQA,
        M::Movdqu => &MOVDQU,
        M::Addps => &ADDPS,
        M::Addpd => &ADDPD,
        M::Addss => &ADDSS,
        M::Addsd => &ADDSD,
        M::Subps => &SUBPS,
        M::Subpd => &SUBPD,
        M::Subss => &SUBSS,
        M::Subsd => &SUBSD,
        M::Mulps => &MULPS,
        M::Mulpd => &MULPD,
        M::Mulss => &MULSS,
        M::Mulsd => &MULSD,
        M::Divps => &DIVPS,
        M::Divpd => &DIVPD,
        M::Divss => &DIVSS,
        M::Divsd => &DIVSD,
        M::Sqrtps => &SQRTPS,
        M::Sqrtpd => &SQRTPD,
        M::Sqrtss => &SQRTSS,
        M::Sqrtsd => &SQRTSD,
        M::Andps => &ANDPS,
        M::Andpd => &ANDPD,
        M::Orps => &ORPS,
        M::Orpd => &ORPD,
        M::Xorps => &XORPS,
        M::Xorpd => &XORPD,
        M::Ucomiss => &UCOMISS,
        M::Ucomisd => &UCOMISD,
        M::Cvtsi2ss => CVTSI2SS,
        M::Cvtsi2sd => CVTSI2SD,
        M::Cvttss2si => CVTTSS2SI,
        M::Cvttsd2si => CVTTSD2SI,
        M::Cvtss2sd => &CVTSS2SD,
        M::Cvtsd2ss => &CVTSD2SS,
        M::Pxor => &PXOR,
        M::Pand => &PAND,
        M::Por => &POR,
        M::Paddb => &PADDB,
        M::Paddw => &PADDW,
        M::Paddd => &PADDD,
        M::Paddq => &PADDQ,
        M::Psubb => &PSUBB,
        M::Psubw => &PSUBW,
        M::Psubd => &PSUBD,
        M::Psubq => &PSUBQ,
        M::Vmovaps => &VMOVAPS,
        M::Vmovups => &VMOVUPS,
        M::Vmovdqa => &VMOVDQA,
        M::Vmovdqu => &VMOVDQU,
        M::Vaddps => &VADDPS,
        M::Vaddpd => &VADDPD,
        M::Vaddss => &VADDSS,
        M::Vaddsd => &VADDSD,
        M::Vsubps => &VSUBPS,
        M::Vsubpd => &VSUBPD,
        M::Vsubss => &VSUBSS,
        M::Vsubsd => &VSUBSD,
        M::Vmulps => &VMULPS,
        M::Vmulpd => &VMULPD,
        M::Vmulss => &VMULSS,
        M::Vmulsd => &VMULSD,
        M::Vdivps => &VDIVPS,
        M::Vdivpd => &VDIVPD,
        M::Vdivss => &VDIVSS,
        M::Vdivsd => &VDIVSD,
        M::Vsqrtps => VSQRTPS,
        M::Vsqrtpd => VSQRTPD,
        M::Vandps => &VANDPS,
        M::Vandpd => &VANDPD,
        M::Vorps => &VORPS,
        M::Vorpd => &VORPD,
        M::Vxorps => &VXORPS,
        M::Vxorpd => &VXORPD,
        M::Vpxor => &VPXOR,
        M::Vpand => &VPAND,
        M::Vpor => &VPOR,
        M::Vpaddb => &VPADDB,
        M::Vpaddw => &VPADDW,
        M::Vpaddd => &VPADDD,
        M::Vpaddq => &VPADDQ,
        M::Vpsubb => &VPSUBB,
        M::Vpsubw => &VPSUBW,
        M::Vpsubd => &VPSUBD,
        M::Vpsubq => &VPSUBQ,
        M::Fld => FLD,
        M::Fst => FST,
        M::Fstp => FSTP,
        M::Fild => FILD,
        M::Fistp => FISTP,
        M::Fadd => FADD,
        M::Faddp => FADDP,
        M::Fsub => FSUB,
        M::Fsubp => FSUBP,
        M::Fmul => FMUL,
        M::Fmulp => FMULP,
        M::Fdiv => FDIV,
        M::Fdivp => FDIVP,
        M::Fxch => FXCH,
        M::Fabs => FABS,
        M::Fchs => FCHS,
        M::Fsqrt => FSQRT,
        M::Fld1 => FLD1,
        M::Fldz => FLDZ,
        // Families handled above; unreachable via the range guards.
        M::Add | M::Or | M::Adc | M::Sbb | M::And | M::Sub | M::Xor | M::Cmp | M::Rol
        | M::Ror | M::Rcl | M::Rcr | M::Shl | M::Shr | M::Sar | M::Jo | M::Jno | M::Jb
        | M::Jae | M::Jz | M::Jnz | M::Jbe | M::Ja | M::Js | M::Jns | M::Jp | M::Jnp
        | M::Jl | M::Jge | M::Jle | M::Jg | M::Seto | M::Setno | M::Setb | M::Setae
        | M::Setz | M::Setnz | M::Setbe | M::Seta | M::Sets | M::Setns | M::Setp
        | M::Setnp | M::Setl | M::Setge | M::Setle | M::Setg | M::Cmovo | M::Cmovno
        | M::Cmovb | M::Cmovae | M::Cmovz | M::Cmovnz | M::Cmovbe | M::Cmova | M::Cmovs
        | M::Cmovns | M::Cmovp | M::Cmovnp | M::Cmovl | M::Cmovge | M::Cmovle | M::Cmovg => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mnemonic_has_rows() {
        for &m in Mnemonic::ALL {
            assert!(
                !variants(m).is_empty(),
                "no catalog entries for {:?}",
                m
            );
        }
    }

    #[test]
    fn family_indexing_matches_encoding_order() {
        // ADD is /0 with base 00, CMP is /7 with base 38.
        let add = variants(Mnemonic::Add);
        assert_eq!(add[0].opcode(), &[0x04]);
        let cmp = variants(Mnemonic::Cmp);
        assert_eq!(cmp[0].opcode(), &[0x3C]);
        // JZ is condition code 4.
        let jz = variants(Mnemonic::Jz);
        assert_eq!(jz[0].opcode(), &[0x74]);
        assert_eq!(jz[1].opcode(), &[0x0F, 0x84]);
        // SAR carries /7, skipping the unused /6 slot.
        let sar = variants(Mnemonic::Sar);
        assert_eq!(sar[0].ext, 7);
    }

    #[test]
    fn arity_counts_signature_slots() {
        let lea = variants(Mnemonic::Lea);
        assert_eq!(lea[0].arity(), 2);
        let ret = variants(Mnemonic::Ret);
        assert_eq!(ret[0].arity(), 0);
        assert_eq!(ret[1].arity(), 1);
    }

    #[test]
    fn vex_rows_carry_vector_fields() {
        let v = variants(Mnemonic::Vaddps);
        let vex = v[0].vex.expect("vex fields");
        assert_eq!(vex.pp, 0);
        assert_eq!(vex.mm, 1);
        assert!(!vex.l);
        let vex256 = v[1].vex.expect("vex fields");
        assert!(vex256.l);
    }
}
