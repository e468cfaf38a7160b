//! Assemble a function at runtime, map it executable, and call it.
//!
//! Run with: `cargo run --example jit_fn --features jit`

use x64asm_rs::{assemble, insn0, insn2, ExecMem, Mnemonic, EAX, EDI, ESI};

fn main() {
    // int add(int a, int b) — System V: a in EDI, b in ESI, result in EAX.
    let code = assemble(&[
        insn2(Mnemonic::Mov, EAX, EDI),
        insn2(Mnemonic::Add, EAX, ESI),
        insn0(Mnemonic::Ret),
    ])
    .expect("assembly failed");

    println!("assembled {} bytes", code.len());

    let mem = ExecMem::with_code(&code).expect("executable mapping failed");
    // SAFETY: the buffer holds a complete function following the C ABI.
    let add: extern "C" fn(i32, i32) -> i32 = unsafe { std::mem::transmute(mem.as_ptr()) };

    for (a, b) in [(2, 3), (40, 2), (-7, 7)] {
        println!("add({a}, {b}) = {}", add(a, b));
    }
}
