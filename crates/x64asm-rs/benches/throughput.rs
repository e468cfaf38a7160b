//! Performance benchmarks for `x64asm_rs`.
//!
//! Measures:
//! - Single-instruction encode latency across encoding shapes
//! - Multi-instruction throughput (MB/s of emitted code)
//! - Fixup-heavy workloads (every instruction branches)
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use x64asm_rs::{
    assemble, emit_one, imm, insn0, insn1, insn2, insn3, mem, rel, Instr, Mnemonic, Reg, EAX,
    RAX, RBX, RCX, XMM0, XMM1, XMM2,
};

// ─── Single-Instruction Latency ──────────────────────────────────────────────

fn bench_single_instruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_instruction");

    group.bench_function("nop", |b| {
        b.iter(|| assemble(black_box(&[insn0(Mnemonic::Nop)])).unwrap())
    });

    group.bench_function("mov_reg_imm", |b| {
        let i = insn2(Mnemonic::Mov, RAX, imm(0x1234));
        b.iter(|| assemble(black_box(&[i])).unwrap())
    });

    group.bench_function("add_reg_reg", |b| {
        let i = insn2(Mnemonic::Add, RAX, RBX);
        b.iter(|| assemble(black_box(&[i])).unwrap())
    });

    group.bench_function("mov_mem_sib", |b| {
        let i = insn2(
            Mnemonic::Mov,
            mem(Reg::Rax).index(Reg::Rcx, 8).disp(0x10),
            x64asm_rs::RDX,
        );
        b.iter(|| assemble(black_box(&[i])).unwrap())
    });

    group.bench_function("vaddps_avx", |b| {
        let i = insn3(Mnemonic::Vaddps, XMM0, XMM1, XMM2);
        b.iter(|| assemble(black_box(&[i])).unwrap())
    });

    group.bench_function("emit_one_no_alloc", |b| {
        let i = insn2(Mnemonic::Add, RAX, RBX);
        let mut buf = [0u8; 15];
        b.iter(|| emit_one(black_box(&i), &mut buf).unwrap())
    });

    group.finish();
}

// ─── Multi-Instruction Throughput ────────────────────────────────────────────

fn mixed_workload(n: usize) -> Vec<Instr> {
    let mut seq = Vec::with_capacity(n);
    for k in 0..n {
        seq.push(match k % 8 {
            0 => insn2(Mnemonic::Mov, RAX, imm(k as i64)),
            1 => insn2(Mnemonic::Add, RAX, RBX),
            2 => insn2(Mnemonic::Mov, mem(Reg::Rsp).disp(-8), RAX),
            3 => insn2(Mnemonic::Xor, EAX, EAX),
            4 => insn1(Mnemonic::Push, RCX),
            5 => insn1(Mnemonic::Pop, RCX),
            6 => insn2(Mnemonic::Addsd, XMM0, XMM1),
            _ => insn0(Mnemonic::Nop),
        });
    }
    seq
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    for &n in &[64usize, 1024, 16384] {
        let seq = mixed_workload(n);
        let bytes = assemble(&seq).unwrap().len() as u64;
        group.throughput(Throughput::Bytes(bytes));
        group.bench_function(format!("mixed_{n}"), |b| {
            b.iter(|| assemble(black_box(&seq)).unwrap())
        });
    }

    group.finish();
}

// ─── Fixup-Heavy Workload ────────────────────────────────────────────────────

fn bench_fixups(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixups");

    // Every second instruction is a short branch over its neighbor.
    let mut seq = Vec::new();
    for _ in 0..2048 {
        seq.push(insn1(Mnemonic::Jmp, rel(2)));
        seq.push(insn0(Mnemonic::Nop));
    }
    group.bench_function("branch_sled_4096", |b| {
        b.iter(|| assemble(black_box(&seq)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_single_instruction, bench_throughput, bench_fixups);
criterion_main!(benches);
