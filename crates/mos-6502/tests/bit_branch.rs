//! 65C02 bit manipulation and bit-test-and-branch instructions.

use emu_core::SimpleBus;
use mos_6502::{Mos6502, Variant};

/// Run one timing/execution pair.
fn step(cpu: &mut Mos6502, bus: &mut SimpleBus) {
    cpu.step_timing(bus).expect("timing step");
    cpu.execute(bus).expect("execution step");
}

/// Load a program at $0000 on a CMOS part and run it to completion.
fn run_cmos(program: &[u8], steps: usize) -> (Mos6502, SimpleBus) {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Variant::Cmos);
    cpu.load_program(&mut bus, 0x0000, program).expect("load");
    for _ in 0..steps {
        step(&mut cpu, &mut bus);
    }
    (cpu, bus)
}

#[test]
fn test_bbr0_not_taken_when_bit_set() {
    // bit 0 of $55 is 1, so branch-if-clear falls through
    let (cpu, _) = run_cmos(
        &[
            0xA9, 0x55, // LDA #$55
            0x85, 0x00, // STA $00
            0x0F, 0x00, 0x11, // BBR0 $00,$11
        ],
        3,
    );
    assert_eq!(cpu.regs.pc, 0x0007);
}

#[test]
fn test_bbr1_taken_when_bit_clear() {
    // bit 1 of $55 is 0: branch lands at $07 + $11
    let (cpu, _) = run_cmos(
        &[
            0xA9, 0x55, // LDA #$55
            0x85, 0x00, // STA $00
            0x1F, 0x00, 0x11, // BBR1 $00,$11
        ],
        3,
    );
    assert_eq!(cpu.regs.pc, 0x0018);
}

#[test]
fn test_bbr_all_bits() {
    // $55 = 0101_0101: even bits set, odd bits clear
    for bit in 0..8u8 {
        let opcode = 0x0F | (bit << 4);
        let (cpu, _) = run_cmos(
            &[0xA9, 0x55, 0x85, 0x00, opcode, 0x00, 0x11],
            3,
        );
        let expected = if bit % 2 == 0 { 0x0007 } else { 0x0018 };
        assert_eq!(cpu.regs.pc, expected, "BBR{bit}");
    }
}

#[test]
fn test_bbs_all_bits() {
    for bit in 0..8u8 {
        let opcode = 0x8F | (bit << 4);
        let (cpu, _) = run_cmos(
            &[0xA9, 0x55, 0x85, 0x00, opcode, 0x00, 0x11],
            3,
        );
        let expected = if bit % 2 == 0 { 0x0018 } else { 0x0007 };
        assert_eq!(cpu.regs.pc, expected, "BBS{bit}");
    }
}

#[test]
fn test_bbr_branches_backwards() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Variant::Cmos);
    bus.poke(0x0010, 0x00); // bit 0 clear: taken
    cpu.load_program(&mut bus, 0x0200, &[0x0F, 0x10, 0xFB]).expect("load"); // BBR0 $10,-5
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x01FE, "offset is sign-extended");
}

#[test]
fn test_bit_branch_is_undefined_on_nmos() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Variant::Nmos);
    bus.poke(0x0010, 0x00);
    cpu.load_program(&mut bus, 0x0200, &[0x0F, 0x10, 0x11]).expect("load");
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0203, "three-byte no-op, no branch");
}

#[test]
fn test_rmb_clears_the_numbered_bit() {
    for bit in 0..8u8 {
        let opcode = 0x07 | (bit << 4);
        let mut bus = SimpleBus::new();
        let mut cpu = Mos6502::new(Variant::Cmos);
        bus.poke(0x0010, 0xFF);
        cpu.load_program(&mut bus, 0x0200, &[opcode, 0x10]).expect("load");
        step(&mut cpu, &mut bus);
        assert_eq!(bus.peek(0x0010), 0xFF & !(1 << bit), "RMB{bit}");
        assert_eq!(cpu.regs.pc, 0x0202);
    }
}

#[test]
fn test_smb_sets_the_numbered_bit() {
    for bit in 0..8u8 {
        let opcode = 0x87 | (bit << 4);
        let mut bus = SimpleBus::new();
        let mut cpu = Mos6502::new(Variant::Cmos);
        cpu.load_program(&mut bus, 0x0200, &[opcode, 0x10]).expect("load");
        step(&mut cpu, &mut bus);
        assert_eq!(bus.peek(0x0010), 1 << bit, "SMB{bit}");
    }
}

#[test]
fn test_rmb_smb_leave_flags_alone() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Variant::Cmos);
    bus.poke(0x0010, 0xFF);
    let before = cpu.regs.p;
    cpu.load_program(&mut bus, 0x0200, &[0x77, 0x10]).expect("load"); // RMB7 $10
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.p, before);
}
