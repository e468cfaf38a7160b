//! Byte-exact x86-64 encoding tests.
//!
//! Expected byte sequences are cross-validated against llvm-mc (x86_64)
//! and the Intel SDM encoding tables.

use x64asm_rs::{
    assemble, im16, im64, im8, imm, imptr, insn0, insn1, insn2, insn3, m16, m32, m64, m8, mem,
    mem_abs, rel, rel32, rip, Mnemonic, Reg, AH, AL, AX, BL, CL, CR3, DS, DX, EAX, EBX, ECX, FS,
    GS, MM1, MM2, R10, R8, R8B, R9, RAX, RBP, RBX, RCX, RDI, RDX, RSI, RSP, ST0, ST3, XMM0, XMM1,
    XMM12, XMM3, YMM1, YMM2, YMM7,
};

fn one(i: x64asm_rs::Instr) -> Vec<u8> {
    assemble(&[i]).expect("assembles")
}

// ── Moves ──────────────────────────────────────────────────────────────

/// MOV RAX, 0 — encoding: [0x48,0xC7,0xC0,0x00,0x00,0x00,0x00]
#[test]
fn mov_rax_imm_zero() {
    let code = one(insn2(Mnemonic::Mov, RAX, imm(0)));
    assert_eq!(code, vec![0x48, 0xC7, 0xC0, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(code.len(), 7);
}

/// MOV RAX, RBX — encoding: [0x48,0x89,0xD8]
#[test]
fn mov_rax_rbx() {
    assert_eq!(one(insn2(Mnemonic::Mov, RAX, RBX)), vec![0x48, 0x89, 0xD8]);
}

/// MOV EAX, EBX — encoding: [0x89,0xD8]
#[test]
fn mov_eax_ebx() {
    assert_eq!(one(insn2(Mnemonic::Mov, EAX, EBX)), vec![0x89, 0xD8]);
}

/// MOV AL, 0xFF — opcode+reg form, no REX: [0xB0,0xFF]
#[test]
fn mov_al_imm() {
    assert_eq!(one(insn2(Mnemonic::Mov, AL, imm(0xFF))), vec![0xB0, 0xFF]);
}

/// MOV AH, 1 — high-byte register in an opcode+reg form: [0xB4,0x01]
#[test]
fn mov_ah_imm() {
    assert_eq!(one(insn2(Mnemonic::Mov, AH, imm(1))), vec![0xB4, 0x01]);
}

/// MOV AH, R8B — must fail: AH cannot coexist with REX.
#[test]
fn mov_ah_r8b_fails() {
    let err = assemble(&[insn2(Mnemonic::Mov, AH, R8B)]).unwrap_err();
    assert_eq!(
        err,
        x64asm_rs::Error::InvalidHighByteWithRex {
            mnemonic: Mnemonic::Mov,
        }
    );
}

/// MOV R8, 0x11 — extended destination: [0x49,0xC7,0xC0,...]
#[test]
fn mov_r8_imm() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, R8, imm(0x11))),
        vec![0x49, 0xC7, 0xC0, 0x11, 0x00, 0x00, 0x00]
    );
}

/// MOV RAX, imm64 — B8+r with an 8-byte immediate.
#[test]
fn mov_rax_imm64() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, imm(0x1122334455667788))),
        vec![0x48, 0xB8, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]
    );
}

/// MOV EAX, imm32 picks the 5-byte B8 form over C7.
#[test]
fn mov_eax_imm32() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, EAX, imm(0x12345678))),
        vec![0xB8, 0x78, 0x56, 0x34, 0x12]
    );
}

/// MOV RAX, [RBX] — encoding: [0x48,0x8B,0x03]
#[test]
fn mov_rax_mem_rbx() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rbx))),
        vec![0x48, 0x8B, 0x03]
    );
}

/// MOV [RBX], RAX — encoding: [0x48,0x89,0x03]
#[test]
fn mov_mem_rbx_rax() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, mem(Reg::Rbx), RAX)),
        vec![0x48, 0x89, 0x03]
    );
}

/// MOV RAX, [RBX+RCX*4+16] — SIB + disp8: [0x48,0x8B,0x44,0x8B,0x10]
#[test]
fn mov_rax_sib_disp() {
    assert_eq!(
        one(insn2(
            Mnemonic::Mov,
            RAX,
            mem(Reg::Rbx).index(Reg::Rcx, 4).disp(16),
        )),
        vec![0x48, 0x8B, 0x44, 0x8B, 0x10]
    );
}

/// MOV BYTE PTR [RAX], 0x42 — narrowest-memory rule also covers the
/// explicit form: [0xC6,0x00,0x42]
#[test]
fn mov_m8_imm() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, m8(mem(Reg::Rax)), imm(0x42))),
        vec![0xC6, 0x00, 0x42]
    );
    // Unsized memory minimizes to the same byte form.
    assert_eq!(
        one(insn2(Mnemonic::Mov, mem(Reg::Rax), imm(0x42))),
        vec![0xC6, 0x00, 0x42]
    );
}

/// MOV QWORD PTR [RAX], 1 — explicit size forces the wide form.
#[test]
fn mov_m64_imm() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, m64(mem(Reg::Rax)), imm(1))),
        vec![0x48, 0xC7, 0x00, 0x01, 0x00, 0x00, 0x00]
    );
}

/// MOV AX, [moffs] and back — A1/A3 accumulator forms with 64-bit address.
#[test]
fn mov_moffs_forms() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, imptr(0x1000))),
        vec![0x48, 0xA1, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        one(insn2(Mnemonic::Mov, imptr(0x1000), AL)),
        vec![0xA2, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

/// MOV to/from segment and control registers.
#[test]
fn mov_system_registers() {
    // mov ax, ds → 66 8C D8
    assert_eq!(one(insn2(Mnemonic::Mov, AX, DS)), vec![0x66, 0x8C, 0xD8]);
    // mov ds, ax → 8E D8
    assert_eq!(one(insn2(Mnemonic::Mov, DS, AX)), vec![0x8E, 0xD8]);
    // mov rax, cr3 → 0F 20 D8
    assert_eq!(one(insn2(Mnemonic::Mov, RAX, CR3)), vec![0x0F, 0x20, 0xD8]);
    // mov cr3, rax → 0F 22 D8
    assert_eq!(one(insn2(Mnemonic::Mov, CR3, RAX)), vec![0x0F, 0x22, 0xD8]);
}

/// MOVZX/MOVSX/MOVSXD widenings.
#[test]
fn widening_moves() {
    assert_eq!(
        one(insn2(Mnemonic::Movzx, EAX, BL)),
        vec![0x0F, 0xB6, 0xC3]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movsx, RAX, BL)),
        vec![0x48, 0x0F, 0xBE, 0xC3]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movsxd, RAX, EBX)),
        vec![0x48, 0x63, 0xC3]
    );
}

// ── Addressing modes ───────────────────────────────────────────────────

/// [RBP] requires an explicit zero disp8: mod=01.
#[test]
fn rbp_zero_disp() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rbp))),
        vec![0x48, 0x8B, 0x45, 0x00]
    );
}

/// [RSP] requires a SIB byte.
#[test]
fn rsp_sib() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rsp))),
        vec![0x48, 0x8B, 0x04, 0x24]
    );
}

/// [R13] mirrors RBP; [R12] mirrors RSP.
#[test]
fn r12_r13_special_cases() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::R13))),
        vec![0x49, 0x8B, 0x45, 0x00]
    );
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::R12))),
        vec![0x49, 0x8B, 0x04, 0x24]
    );
}

/// LEA RAX, DS:[RAX+RDX*2+100] — DS is the default segment for this base,
/// so no override byte: [0x48,0x8D,0x44,0x50,0x64]
#[test]
fn lea_sib_default_segment() {
    let m = mem(Reg::Rax).disp(100).index(Reg::Rdx, 2).segment(Reg::Ds);
    assert_eq!(
        one(insn2(Mnemonic::Lea, RAX, m)),
        vec![0x48, 0x8D, 0x44, 0x50, 0x64]
    );
}

/// FS-relative load carries the 0x64 override.
#[test]
fn fs_segment_override() {
    let m = mem(Reg::Rax).segment(Reg::Fs);
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, m)),
        vec![0x64, 0x48, 0x8B, 0x00]
    );
}

/// Absolute [disp32] uses the no-base SIB form.
#[test]
fn absolute_memory() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, EAX, mem_abs(0x100))),
        vec![0x8B, 0x04, 0x25, 0x00, 0x01, 0x00, 0x00]
    );
}

/// Index-only [RCX*8 + disp32].
#[test]
fn index_only_memory() {
    assert_eq!(
        one(insn2(
            Mnemonic::Mov,
            EAX,
            x64asm_rs::MemOperand::new().index(Reg::Rcx, 8).disp(8),
        )),
        vec![0x8B, 0x04, 0xCD, 0x08, 0x00, 0x00, 0x00]
    );
}

/// RIP-relative with a caller-supplied displacement.
#[test]
fn rip_relative() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, rip(0x10))),
        vec![0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]
    );
}

/// Displacement width boundaries: ±127 stays disp8, ±128 grows to disp32.
#[test]
fn disp_width_boundaries() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rbx).disp(127))),
        vec![0x48, 0x8B, 0x43, 0x7F]
    );
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rbx).disp(-128))),
        vec![0x48, 0x8B, 0x43, 0x80]
    );
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, mem(Reg::Rbx).disp(128))),
        vec![0x48, 0x8B, 0x83, 0x80, 0x00, 0x00, 0x00]
    );
}

// ── ALU and immediates ─────────────────────────────────────────────────

/// Immediate width boundaries select the correct form.
#[test]
fn alu_immediate_boundaries() {
    // Fits i8 → 83 /0 ib.
    assert_eq!(
        one(insn2(Mnemonic::Add, RAX, imm(127))),
        vec![0x48, 0x83, 0xC0, 0x7F]
    );
    assert_eq!(
        one(insn2(Mnemonic::Add, RAX, imm(-128))),
        vec![0x48, 0x83, 0xC0, 0x80]
    );
    // One past → imm32, where the accumulator short form (05 id) wins.
    assert_eq!(
        one(insn2(Mnemonic::Add, RAX, imm(128))),
        vec![0x48, 0x05, 0x80, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        one(insn2(Mnemonic::Add, RAX, imm(-129))),
        vec![0x48, 0x05, 0x7F, 0xFF, 0xFF, 0xFF]
    );
}

/// Accumulator short forms win ties at equal immediate width.
#[test]
fn accumulator_forms() {
    assert_eq!(one(insn2(Mnemonic::Add, AL, imm(5))), vec![0x04, 0x05]);
    assert_eq!(one(insn2(Mnemonic::Test, AL, imm(1))), vec![0xA8, 0x01]);
}

/// XOR EAX, EAX — the classic zeroing idiom: [0x31,0xC0]
#[test]
fn xor_eax_eax() {
    assert_eq!(one(insn2(Mnemonic::Xor, EAX, EAX)), vec![0x31, 0xC0]);
}

/// 16-bit ALU carries the operand-size override.
#[test]
fn alu_16_bit() {
    assert_eq!(
        one(insn2(Mnemonic::Add, AX, im16(0x1234))),
        vec![0x66, 0x05, 0x34, 0x12]
    );
    assert_eq!(one(insn2(Mnemonic::Add, AX, imm(5))), vec![0x66, 0x83, 0xC0, 0x05]);
}

/// INC/DEC use FE/FF with /0 and /1.
#[test]
fn inc_dec() {
    assert_eq!(one(insn1(Mnemonic::Inc, ECX)), vec![0xFF, 0xC1]);
    assert_eq!(one(insn1(Mnemonic::Dec, RAX)), vec![0x48, 0xFF, 0xC8]);
    assert_eq!(one(insn1(Mnemonic::Inc, BL)), vec![0xFE, 0xC3]);
}

/// NEG/NOT/MUL/DIV group-3 forms.
#[test]
fn group3_unary() {
    assert_eq!(one(insn1(Mnemonic::Neg, RAX)), vec![0x48, 0xF7, 0xD8]);
    assert_eq!(one(insn1(Mnemonic::Not, ECX)), vec![0xF7, 0xD1]);
    assert_eq!(one(insn1(Mnemonic::Mul, RBX)), vec![0x48, 0xF7, 0xE3]);
    assert_eq!(one(insn1(Mnemonic::Idiv, RCX)), vec![0x48, 0xF7, 0xF9]);
}

/// IMUL two- and three-operand forms.
#[test]
fn imul_forms() {
    assert_eq!(
        one(insn2(Mnemonic::Imul, RAX, RBX)),
        vec![0x48, 0x0F, 0xAF, 0xC3]
    );
    assert_eq!(
        one(insn3(Mnemonic::Imul, RAX, RBX, imm(16))),
        vec![0x48, 0x6B, 0xC3, 0x10]
    );
    assert_eq!(
        one(insn3(Mnemonic::Imul, RAX, RBX, imm(1000))),
        vec![0x48, 0x69, 0xC3, 0xE8, 0x03, 0x00, 0x00]
    );
}

/// Shifts: by one, by CL, by imm8.
#[test]
fn shifts() {
    assert_eq!(one(insn2(Mnemonic::Shl, EAX, imm(1))), vec![0xD1, 0xE0]);
    assert_eq!(one(insn2(Mnemonic::Shl, EAX, CL)), vec![0xD3, 0xE0]);
    assert_eq!(one(insn2(Mnemonic::Shr, RAX, imm(3))), vec![0x48, 0xC1, 0xE8, 0x03]);
    assert_eq!(one(insn2(Mnemonic::Sar, RDX, imm(63))), vec![0x48, 0xC1, 0xFA, 0x3F]);
}

/// SHLD/SHRD three-operand forms.
#[test]
fn double_shifts() {
    assert_eq!(
        one(insn3(Mnemonic::Shld, EAX, EBX, imm(4))),
        vec![0x0F, 0xA4, 0xD8, 0x04]
    );
    assert_eq!(
        one(insn3(Mnemonic::Shrd, RAX, RBX, CL)),
        vec![0x48, 0x0F, 0xAD, 0xD8]
    );
}

/// Bit tests and scans.
#[test]
fn bit_operations() {
    assert_eq!(one(insn2(Mnemonic::Bt, EAX, ECX)), vec![0x0F, 0xA3, 0xC8]);
    assert_eq!(
        one(insn2(Mnemonic::Bts, RAX, imm(7))),
        vec![0x48, 0x0F, 0xBA, 0xE8, 0x07]
    );
    assert_eq!(
        one(insn2(Mnemonic::Popcnt, EAX, ECX)),
        vec![0xF3, 0x0F, 0xB8, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Tzcnt, RAX, RCX)),
        vec![0xF3, 0x48, 0x0F, 0xBC, 0xC1]
    );
}

// ── Stack and flow ─────────────────────────────────────────────────────

/// PUSH/POP register and immediate forms.
#[test]
fn push_pop() {
    assert_eq!(one(insn1(Mnemonic::Push, RAX)), vec![0x50]);
    assert_eq!(one(insn1(Mnemonic::Push, R9)), vec![0x41, 0x51]);
    assert_eq!(one(insn1(Mnemonic::Pop, RBX)), vec![0x5B]);
    assert_eq!(one(insn1(Mnemonic::Push, imm(8))), vec![0x6A, 0x08]);
    assert_eq!(
        one(insn1(Mnemonic::Push, imm(0x1000))),
        vec![0x68, 0x00, 0x10, 0x00, 0x00]
    );
    assert_eq!(
        one(insn1(Mnemonic::Push, mem(Reg::Rax))),
        vec![0xFF, 0x30]
    );
}

/// CALL/JMP indirect through register and memory.
#[test]
fn indirect_flow() {
    assert_eq!(one(insn1(Mnemonic::Call, RAX)), vec![0xFF, 0xD0]);
    assert_eq!(one(insn1(Mnemonic::Jmp, RCX)), vec![0xFF, 0xE1]);
    assert_eq!(one(insn1(Mnemonic::Jmp, mem(Reg::Rax))), vec![0xFF, 0x20]);
}

/// RET forms.
#[test]
fn ret_forms() {
    assert_eq!(one(insn0(Mnemonic::Ret)), vec![0xC3]);
    assert_eq!(one(insn1(Mnemonic::Ret, imm(16))), vec![0xC2, 0x10, 0x00]);
}

/// Fixed one- and two-byte encodings.
#[test]
fn fixed_encodings() {
    assert_eq!(one(insn0(Mnemonic::Nop)), vec![0x90]);
    assert_eq!(one(insn0(Mnemonic::Int3)), vec![0xCC]);
    assert_eq!(one(insn0(Mnemonic::Hlt)), vec![0xF4]);
    assert_eq!(one(insn0(Mnemonic::Leave)), vec![0xC9]);
    assert_eq!(one(insn0(Mnemonic::Syscall)), vec![0x0F, 0x05]);
    assert_eq!(one(insn0(Mnemonic::Cpuid)), vec![0x0F, 0xA2]);
    assert_eq!(one(insn0(Mnemonic::Pause)), vec![0xF3, 0x90]);
    assert_eq!(one(insn0(Mnemonic::Cqo)), vec![0x48, 0x99]);
    assert_eq!(one(insn0(Mnemonic::Cdq)), vec![0x99]);
    assert_eq!(one(insn1(Mnemonic::Int, imm(0x80))), vec![0xCD, 0x80]);
}

/// Conditional and unconditional relative jumps resolve through rel().
#[test]
fn relative_jumps() {
    // JMP $+0 — a two-byte infinite loop.
    assert_eq!(one(insn1(Mnemonic::Jmp, rel(0))), vec![0xEB, 0xFE]);
    // Forced wide form.
    assert_eq!(
        one(insn1(Mnemonic::Jmp, rel32(0))),
        vec![0xE9, 0xFB, 0xFF, 0xFF, 0xFF]
    );
    // JZ rel8 self-loop: 74 FE.
    assert_eq!(one(insn1(Mnemonic::Jz, rel(0))), vec![0x74, 0xFE]);
    // CALL has only the rel32 form.
    assert_eq!(
        one(insn1(Mnemonic::Call, rel(0))),
        vec![0xE8, 0xFB, 0xFF, 0xFF, 0xFF]
    );
}

/// SETcc and CMOVcc condition forms.
#[test]
fn conditionals() {
    assert_eq!(one(insn1(Mnemonic::Setz, AL)), vec![0x0F, 0x94, 0xC0]);
    assert_eq!(one(insn1(Mnemonic::Setg, BL)), vec![0x0F, 0x9F, 0xC3]);
    assert_eq!(
        one(insn2(Mnemonic::Cmovz, RAX, RBX)),
        vec![0x48, 0x0F, 0x44, 0xC3]
    );
    assert_eq!(
        one(insn2(Mnemonic::Cmovb, EAX, ECX)),
        vec![0x0F, 0x42, 0xC1]
    );
}

/// XCHG accumulator short forms and the generic 86/87 forms.
#[test]
fn xchg_forms() {
    assert_eq!(one(insn2(Mnemonic::Xchg, RAX, RCX)), vec![0x48, 0x91]);
    assert_eq!(one(insn2(Mnemonic::Xchg, ECX, EBX)), vec![0x87, 0xD9]);
}

/// BSWAP uses opcode+reg.
#[test]
fn bswap() {
    assert_eq!(one(insn1(Mnemonic::Bswap, EAX)), vec![0x0F, 0xC8]);
    assert_eq!(one(insn1(Mnemonic::Bswap, R10)), vec![0x49, 0x0F, 0xCA]);
}

// ── SSE / AVX ──────────────────────────────────────────────────────────

/// Packed and scalar SSE arithmetic with the four mandatory prefixes.
#[test]
fn sse_arithmetic() {
    assert_eq!(
        one(insn2(Mnemonic::Addps, XMM0, XMM1)),
        vec![0x0F, 0x58, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Addpd, XMM0, XMM1)),
        vec![0x66, 0x0F, 0x58, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Addss, XMM0, XMM1)),
        vec![0xF3, 0x0F, 0x58, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Addsd, XMM0, XMM1)),
        vec![0xF2, 0x0F, 0x58, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Xorps, XMM3, XMM3)),
        vec![0x0F, 0x57, 0xDB]
    );
}

/// SSE loads/stores and extended registers.
#[test]
fn sse_moves() {
    assert_eq!(
        one(insn2(Mnemonic::Movaps, XMM0, mem(Reg::Rax))),
        vec![0x0F, 0x28, 0x00]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movaps, mem(Reg::Rax), XMM0)),
        vec![0x0F, 0x29, 0x00]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movdqu, XMM12, mem(Reg::Rsi))),
        vec![0xF3, 0x44, 0x0F, 0x6F, 0x26]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movss, XMM1, mem(Reg::Rdi))),
        vec![0xF3, 0x0F, 0x10, 0x0F]
    );
    // movq rax, xmm0 → 66 48 0F 7E C0
    assert_eq!(
        one(insn2(Mnemonic::Movq, RAX, XMM0)),
        vec![0x66, 0x48, 0x0F, 0x7E, 0xC0]
    );
    // movd xmm0, eax → 66 0F 6E C0
    assert_eq!(
        one(insn2(Mnemonic::Movd, XMM0, EAX)),
        vec![0x66, 0x0F, 0x6E, 0xC0]
    );
}

/// Scalar conversions.
#[test]
fn sse_conversions() {
    assert_eq!(
        one(insn2(Mnemonic::Cvtsi2sd, XMM0, RAX)),
        vec![0xF2, 0x48, 0x0F, 0x2A, 0xC0]
    );
    assert_eq!(
        one(insn2(Mnemonic::Cvttsd2si, EAX, XMM1)),
        vec![0xF2, 0x0F, 0x2C, 0xC1]
    );
    assert_eq!(
        one(insn2(Mnemonic::Cvtss2sd, XMM0, XMM1)),
        vec![0xF3, 0x0F, 0x5A, 0xC1]
    );
}

/// MMX forms share mnemonics with their SSE2 siblings.
#[test]
fn mmx_forms() {
    assert_eq!(
        one(insn2(Mnemonic::Pxor, MM1, MM2)),
        vec![0x0F, 0xEF, 0xCA]
    );
    assert_eq!(
        one(insn2(Mnemonic::Pxor, XMM1, XMM3)),
        vec![0x66, 0x0F, 0xEF, 0xCB]
    );
    assert_eq!(
        one(insn2(Mnemonic::Movq, MM1, MM2)),
        vec![0x0F, 0x6F, 0xCA]
    );
    assert_eq!(
        one(insn2(Mnemonic::Paddd, MM1, mem(Reg::Rax))),
        vec![0x0F, 0xFE, 0x08]
    );
}

/// Two-byte VEX forms for 128- and 256-bit AVX.
#[test]
fn avx_vex_forms() {
    // vaddps xmm0, xmm1, xmm2 → C5 F0 58 C2
    assert_eq!(
        one(insn3(Mnemonic::Vaddps, XMM0, XMM1, x64asm_rs::XMM2)),
        vec![0xC5, 0xF0, 0x58, 0xC2]
    );
    // vaddps ymm1, ymm2, ymm7 → C5 EC 58 CF
    assert_eq!(
        one(insn3(Mnemonic::Vaddps, YMM1, YMM2, YMM7)),
        vec![0xC5, 0xEC, 0x58, 0xCF]
    );
    // vaddsd xmm0, xmm1, xmm2 → C5 F3 58 C2
    assert_eq!(
        one(insn3(Mnemonic::Vaddsd, XMM0, XMM1, x64asm_rs::XMM2)),
        vec![0xC5, 0xF3, 0x58, 0xC2]
    );
    // vmovaps xmm0, [rax] → C5 F8 28 00 (vvvv unused → 1111)
    assert_eq!(
        one(insn2(Mnemonic::Vmovaps, XMM0, mem(Reg::Rax))),
        vec![0xC5, 0xF8, 0x28, 0x00]
    );
    // vpxor ymm1, ymm1, ymm1 → C5 F5 EF C9
    assert_eq!(
        one(insn3(Mnemonic::Vpxor, YMM1, YMM1, YMM1)),
        vec![0xC5, 0xF5, 0xEF, 0xC9]
    );
}

/// Extended registers force the 3-byte VEX form.
#[test]
fn avx_three_byte_vex() {
    // vaddps xmm8, xmm1, xmm2 → REX.R equivalent lives in VEX byte 1;
    // still 2-byte (only R is extended): C5 30 58 C2
    assert_eq!(
        one(insn3(Mnemonic::Vaddps, x64asm_rs::XMM8, XMM1, x64asm_rs::XMM2)),
        vec![0xC5, 0x30, 0x58, 0xC2]
    );
    // vaddps xmm0, xmm1, xmm8 → B extended → 3-byte: C4 C1 70 58 C0
    assert_eq!(
        one(insn3(Mnemonic::Vaddps, XMM0, XMM1, x64asm_rs::XMM8)),
        vec![0xC4, 0xC1, 0x70, 0x58, 0xC0]
    );
}

// ── x87 FPU ────────────────────────────────────────────────────────────

/// Memory and stack-register FPU forms.
#[test]
fn fpu_forms() {
    assert_eq!(one(insn1(Mnemonic::Fld, m32(mem(Reg::Rax)))), vec![0xD9, 0x00]);
    assert_eq!(one(insn1(Mnemonic::Fld, m64(mem(Reg::Rax)))), vec![0xDD, 0x00]);
    assert_eq!(one(insn1(Mnemonic::Fld, ST3)), vec![0xD9, 0xC3]);
    assert_eq!(one(insn1(Mnemonic::Fstp, m64(mem(Reg::Rbp)))), vec![0xDD, 0x5D, 0x00]);
    assert_eq!(one(insn1(Mnemonic::Fild, m16(mem(Reg::Rax)))), vec![0xDF, 0x00]);
    assert_eq!(one(insn1(Mnemonic::Fistp, m64(mem(Reg::Rax)))), vec![0xDF, 0x38]);
    assert_eq!(one(insn2(Mnemonic::Fadd, ST0, ST3)), vec![0xD8, 0xC3]);
    assert_eq!(one(insn2(Mnemonic::Fadd, ST3, ST0)), vec![0xDC, 0xC3]);
    assert_eq!(one(insn2(Mnemonic::Faddp, ST3, ST0)), vec![0xDE, 0xC3]);
    assert_eq!(one(insn0(Mnemonic::Faddp)), vec![0xDE, 0xC1]);
    assert_eq!(one(insn2(Mnemonic::Fsub, ST3, ST0)), vec![0xDC, 0xEB]);
    assert_eq!(one(insn1(Mnemonic::Fxch, ST3)), vec![0xD9, 0xCB]);
    assert_eq!(one(insn0(Mnemonic::Fsqrt)), vec![0xD9, 0xFA]);
    assert_eq!(one(insn0(Mnemonic::Fldz)), vec![0xD9, 0xEE]);
}

// ── Atomics and misc ───────────────────────────────────────────────────

#[test]
fn cmpxchg_xadd() {
    assert_eq!(
        one(insn2(Mnemonic::Cmpxchg, mem(Reg::Rax), RCX)),
        vec![0x48, 0x0F, 0xB1, 0x08]
    );
    assert_eq!(
        one(insn2(Mnemonic::Xadd, mem(Reg::Rax), ECX)),
        vec![0x0F, 0xC1, 0x08]
    );
}

/// Unused operand slots and helper arity functions agree.
#[test]
fn unused_slots_are_none() {
    let i = insn2(Mnemonic::Mov, RAX, imm(1));
    assert!(i.operands[2].is_none());
    assert!(i.operands[3].is_none());
}

/// SPL-family byte registers force an empty REX prefix.
#[test]
fn spl_forces_rex() {
    use x64asm_rs::SIL;
    assert_eq!(one(insn2(Mnemonic::Mov, SIL, AL)), vec![0x40, 0x88, 0xC6]);
}

/// `im8` of an out-of-range value refuses to encode rather than truncate.
#[test]
fn explicit_im8_range_checked() {
    let err = assemble(&[insn2(Mnemonic::Add, RAX, im8(300))]).unwrap_err();
    assert_eq!(
        err,
        x64asm_rs::Error::OperandMismatch {
            mnemonic: Mnemonic::Add,
        }
    );
}

/// `im64` forces the 10-byte MOV form even for small values.
#[test]
fn explicit_im64() {
    assert_eq!(
        one(insn2(Mnemonic::Mov, RAX, im64(1))),
        vec![0x48, 0xB8, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

/// Distinct failure kinds for unknown arity vs bad shapes.
#[test]
fn selection_errors() {
    use x64asm_rs::Error;
    assert_eq!(
        assemble(&[insn1(Mnemonic::Mov, RAX)]).unwrap_err(),
        Error::NoSuchForm {
            mnemonic: Mnemonic::Mov,
            arity: 1,
        }
    );
    assert_eq!(
        assemble(&[insn2(Mnemonic::Lea, RAX, RBX)]).unwrap_err(),
        Error::OperandMismatch {
            mnemonic: Mnemonic::Lea,
        }
    );
    assert_eq!(
        assemble(&[insn1(Mnemonic::Push, x64asm_rs::m512(mem(Reg::Rax)))]).unwrap_err(),
        Error::SizeUnavailable {
            mnemonic: Mnemonic::Push,
            bits: 512,
        }
    );
}

/// Unused helper constants cover the register file.
#[test]
fn register_constants_are_operands() {
    for op in [RSI, RDI, RSP, RBP, DX, BL, FS, GS, MM1, ST0] {
        assert!(matches!(op, x64asm_rs::Operand::Reg(_)));
    }
}
