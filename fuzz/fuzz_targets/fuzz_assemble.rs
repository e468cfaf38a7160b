#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use x64asm_rs::{
    im16, im32, im64, im8, imm, imptr, rel, rel32, rel8, Instr, MemOperand, Mnemonic, Operand,
    OperandSize, Reg, PREF66, PREFREXW,
};

const REGS: &[Reg] = &[
    Reg::Rax, Reg::Rcx, Reg::Rsp, Reg::Rbp, Reg::R8, Reg::R12, Reg::R13, Reg::R15, Reg::Eax,
    Reg::Ebp, Reg::R9d, Reg::Ax, Reg::Di, Reg::R10w, Reg::Al, Reg::Cl, Reg::Spl, Reg::Dil,
    Reg::R11b, Reg::Ah, Reg::Bh, Reg::Rip, Reg::RipRel, Reg::Es, Reg::Fs, Reg::Gs, Reg::Cr0,
    Reg::Cr8, Reg::Dr7, Reg::Mm0, Reg::Mm7, Reg::Xmm0, Reg::Xmm8, Reg::Xmm15, Reg::Ymm0,
    Reg::Ymm11, Reg::St0, Reg::St5, Reg::K3, Reg::Bnd1,
];

const SIZES: &[OperandSize] = &[
    OperandSize::Byte,
    OperandSize::Word,
    OperandSize::Dword,
    OperandSize::Qword,
    OperandSize::Xmmword,
    OperandSize::Ymmword,
    OperandSize::Zmmword,
];

fn pick<'a, T: Copy>(u: &mut Unstructured<'a>, pool: &[T]) -> arbitrary::Result<T> {
    let idx = usize::from(u8::arbitrary(u)?) % pool.len();
    Ok(pool[idx])
}

fn arb_operand(u: &mut Unstructured<'_>) -> arbitrary::Result<Operand> {
    Ok(match u8::arbitrary(u)? % 12 {
        0 => Operand::None,
        1 | 2 => Operand::Reg(pick(u, REGS)?),
        3 => imm(i64::arbitrary(u)?),
        4 => im8(i64::from(i8::arbitrary(u)?)),
        5 => im16(i64::from(i16::arbitrary(u)?)),
        6 => im32(i64::from(i32::arbitrary(u)?)),
        7 => im64(i64::arbitrary(u)?),
        8 => imptr(i64::arbitrary(u)?),
        9 => {
            let mut m = MemOperand::new();
            if bool::arbitrary(u)? {
                m = m.base(pick(u, REGS)?);
            }
            if bool::arbitrary(u)? {
                m = m.index(pick(u, REGS)?, u8::arbitrary(u)?);
            }
            if bool::arbitrary(u)? {
                m = m.segment(pick(u, REGS)?);
            }
            if bool::arbitrary(u)? {
                m = m.size(pick(u, SIZES)?);
            }
            Operand::Mem(m.disp(i32::arbitrary(u)?))
        }
        10 => match u8::arbitrary(u)? % 3 {
            0 => rel(i32::from(i8::arbitrary(u)?)),
            1 => rel8(i32::from(i8::arbitrary(u)?)),
            _ => rel32(i32::from(i16::arbitrary(u)?)),
        },
        _ => {
            if bool::arbitrary(u)? {
                PREF66
            } else {
                PREFREXW
            }
        }
    })
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(count) = u8::arbitrary(&mut u) else { return };
    let mut seq = Vec::new();
    for _ in 0..(count % 32) {
        let Ok(mn_idx) = u16::arbitrary(&mut u) else { break };
        let mnemonic = Mnemonic::ALL[usize::from(mn_idx) % Mnemonic::ALL.len()];
        let mut operands = [Operand::None; 4];
        for slot in &mut operands {
            match arb_operand(&mut u) {
                Ok(op) => *slot = op,
                Err(_) => break,
            }
        }
        seq.push(Instr::new(mnemonic, operands));
    }
    if seq.is_empty() {
        return;
    }

    // Must never panic — only return Ok with ≤15 bytes per instruction
    // or a structured error.
    if let Ok(code) = x64asm_rs::assemble(&seq) {
        assert!(code.len() <= seq.len() * 15);
    }

    // The stringifier is total over every record, encodable or not.
    let _ = x64asm_rs::stringify(&seq);

    // Single-instruction emission agrees with the error surface.
    let mut buf = [0u8; 15];
    for instr in &seq {
        let _ = x64asm_rs::emit_one(instr, &mut buf);
    }
});
