//! Basic usage: build instruction records, assemble, print the bytes.
//!
//! Run with: `cargo run --example basic`

use x64asm_rs::{
    assemble, imm, insn0, insn1, insn2, mem, rel, stringify, Mnemonic, Reg, EAX, ECX, RAX, RBP,
    RSP,
};

fn print_hex(prefix: &str, bytes: &[u8]) {
    print!("{}", prefix);
    for b in bytes {
        print!("{:02x} ", b);
    }
    println!();
}

fn main() {
    // --- A function prologue and a simple computation ---
    let program = [
        insn1(Mnemonic::Push, RBP),
        insn2(Mnemonic::Mov, RBP, RSP),
        insn2(Mnemonic::Mov, EAX, imm(0)),
        insn2(Mnemonic::Mov, ECX, imm(10)),
        insn2(Mnemonic::Add, EAX, ECX), // loop body, target of the JNZ below
        insn1(Mnemonic::Dec, ECX),
        insn1(Mnemonic::Jnz, rel(-2)),
        insn1(Mnemonic::Pop, RBP),
        insn0(Mnemonic::Ret),
    ];

    println!("source:");
    print!("{}", stringify(&program));

    let code = assemble(&program).expect("assembly failed");
    println!("\n{} bytes of machine code:", code.len());
    print_hex("  ", &code);

    // --- Memory operands ---
    let loads = [
        insn2(Mnemonic::Mov, RAX, mem(Reg::Rbp).disp(-8)),
        insn2(Mnemonic::Mov, mem(Reg::Rsp).disp(16), RAX),
        insn2(Mnemonic::Lea, RAX, mem(Reg::Rax).index(Reg::Rcx, 4).disp(100)),
    ];
    println!("\naddressing modes:");
    for instr in &loads {
        let bytes = assemble(&[*instr]).expect("assembly failed");
        print!("  {:32}", x64asm_rs::stringify_one(instr));
        print_hex("", &bytes);
    }
}
