use crate::{
    bus::Bus,
    cpu::{
        cpu::CPU,
        flags::{FLAG_CARRY, FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO},
    },
};

struct TestBus {
    mem: [u8; 65536],
}

impl TestBus {
    fn new() -> Self {
        Self { mem: [0; 65536] }
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }
}

fn new_cpu(bus: TestBus) -> CPU<TestBus> {
    CPU::new(bus)
}

/// Poke `program` at $8000 and point the reset vector there.
fn bus_with_program(program: &[u8]) -> TestBus {
    let mut bus = TestBus::new();
    bus.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
    bus.mem[0xFFFC] = 0x00;
    bus.mem[0xFFFD] = 0x80;
    bus
}

#[test]
fn reset_loads_vector_and_clears_state() {
    let bus = bus_with_program(&[]);
    let mut cpu = new_cpu(bus);
    cpu.a = 0x55;
    cpu.x = 0x55;
    cpu.y = 0x55;
    cpu.status = 0xFF;

    cpu.reset();

    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xFD);
    assert_eq!(cpu.a, 0);
    assert_eq!(cpu.x, 0);
    assert_eq!(cpu.y, 0);
    assert_eq!(cpu.status, 0);
    assert_eq!(cpu.cycles, 7, "reset charges a BRK's worth of cycles");
}

#[test]
fn lda_tax_inx_sets_negative() {
    let bus = bus_with_program(&[
        0xA9, 0xC0, // LDA #$C0
        0xAA, // TAX
        0xE8, // INX
    ]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0xC0);
    assert_eq!(cpu.x, 0xC1);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
    assert!(cpu.status & FLAG_ZERO == 0);
}

#[test]
fn sbc_borrow_updates_carry_and_overflow() {
    // SEC ; LDA #$50 ; SBC #$F0 -> $60 with a borrow. $50 - (-$10) = $60 stays
    // in signed range, so V is clear; the borrow clears C.
    let bus = bus_with_program(&[0x38, 0xA9, 0x50, 0xE9, 0xF0]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0x60);
    assert!(cpu.status & FLAG_CARRY == 0, "borrow clears carry");
    assert!(cpu.status & FLAG_OVERFLOW == 0);
    assert!(cpu.status & FLAG_NEGATIVE == 0);
    assert!(cpu.status & FLAG_ZERO == 0);
}

#[test]
fn sbc_signed_overflow() {
    // SEC ; LDA #$50 ; SBC #$B0: $50 - (-$50) = $A0 = 160, out of signed range.
    let bus = bus_with_program(&[0x38, 0xA9, 0x50, 0xE9, 0xB0]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0xA0);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_CARRY != 0, "no borrow");
}

#[test]
fn adc_signed_overflow() {
    // CLC ; LDA #$7F ; ADC #$01 -> $80: positive + positive = negative.
    let bus = bus_with_program(&[0x18, 0xA9, 0x7F, 0x69, 0x01]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0x80);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_CARRY == 0);
    assert!(cpu.status & FLAG_ZERO == 0);
}

#[test]
fn adc_carry_out() {
    // CLC ; LDA #$F0 ; ADC #$20 -> $10 with carry out, no signed overflow.
    let bus = bus_with_program(&[0x18, 0xA9, 0xF0, 0x69, 0x20]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0x10);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_OVERFLOW == 0);
}

#[test]
fn adc_then_sbc_restores_accumulator() {
    // CLC ; LDA #$F0 ; ADC #$20 ; SBC #$20 with the carry the ADC produced.
    let bus = bus_with_program(&[0x18, 0xA9, 0xF0, 0x69, 0x20, 0xE9, 0x20]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    for _ in 0..4 {
        cpu.step();
    }
    assert_eq!(cpu.a, 0xF0);

    // SEC ; LDA #$10 ; ADC #$20 ; SBC #$20: the other carry pairing.
    let bus = bus_with_program(&[0x38, 0xA9, 0x10, 0x69, 0x20, 0xE9, 0x20]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    for _ in 0..4 {
        cpu.step();
    }
    assert_eq!(cpu.a, 0x10);
}

#[test]
fn asl_shifts_top_bit_into_carry() {
    // LDA #$80 ; ASL A -> 0 with carry, zero set, negative clear.
    let bus = bus_with_program(&[0xA9, 0x80, 0x0A]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0x00);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_ZERO != 0);
    assert!(cpu.status & FLAG_NEGATIVE == 0);
}

#[test]
fn double_asl_then_double_lsr_keeps_low_six_bits() {
    for value in [0xFFu8, 0xC3, 0x5A, 0x01, 0x80] {
        let bus = bus_with_program(&[0xA9, value, 0x0A, 0x0A, 0x4A, 0x4A]);
        let mut cpu = new_cpu(bus);
        cpu.reset();

        for _ in 0..5 {
            cpu.step();
        }
        assert_eq!(cpu.a, value & 0x3F, "value ${:02X}", value);
    }
}

#[test]
fn ror_then_rol_round_trips_through_carry() {
    // The bit ROR drops into carry is exactly what ROL pulls back in.
    for value in [0xB5u8, 0x00, 0xFF, 0x01] {
        let bus = bus_with_program(&[0x38, 0xA9, value, 0x6A, 0x2A]);
        let mut cpu = new_cpu(bus);
        cpu.reset();

        for _ in 0..4 {
            cpu.step();
        }
        assert_eq!(cpu.a, value, "value ${:02X}", value);
        assert!(cpu.status & FLAG_CARRY != 0, "original carry restored");
    }
}

#[test]
fn pha_pla_round_trips_accumulator_and_stack() {
    let bus = bus_with_program(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68]);
    let mut cpu = new_cpu(bus);
    cpu.reset();
    let sp = cpu.sp;

    for _ in 0..4 {
        cpu.step();
    }

    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.sp, sp);
}

#[test]
fn php_plp_round_trips_status_modulo_break() {
    // SEC ; SED ; PHP ; CLC ; CLD ; PLP
    let bus = bus_with_program(&[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    let pushed_from = cpu.status;
    for _ in 0..4 {
        cpu.step();
    }

    // PLP drops the pushed B bit and forces the unused bit on.
    assert_eq!(cpu.status, pushed_from | FLAG_UNUSED);
    assert_eq!(cpu.sp, 0xFD);
}

#[test]
fn jsr_then_rts_returns_past_the_call() {
    let mut bus = bus_with_program(&[0x20, 0x34, 0x12]); // JSR $1234
    bus.mem[0x1234] = 0x60; // RTS
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step(); // JSR
    assert_eq!(cpu.pc, 0x1234);
    assert_eq!(cpu.sp, 0xFB);

    cpu.step(); // RTS
    assert_eq!(cpu.pc, 0x8003);
    assert_eq!(cpu.sp, 0xFD);
}

#[test]
fn brk_then_rti_resumes_after_padding_byte() {
    let mut bus = bus_with_program(&[0x38, 0x00]); // SEC ; BRK
    bus.mem[0xFFFE] = 0x00;
    bus.mem[0xFFFF] = 0x90;
    bus.mem[0x9000] = 0x40; // RTI
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step(); // SEC
    let status = cpu.status;
    cpu.step(); // BRK
    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.status & crate::cpu::flags::FLAG_INTERRUPT_DISABLE != 0);

    cpu.step(); // RTI
    assert_eq!(cpu.pc, 0x8003, "BRK skips its padding byte");
    assert_eq!(cpu.status, status | FLAG_UNUSED);
}

#[test]
fn bit_copies_operand_bits_into_flags() {
    let mut bus = bus_with_program(&[0xA9, 0xC0, 0x24, 0x10]); // LDA #$C0 ; BIT $10
    bus.mem[0x0010] = 0xC0;
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();

    assert!(cpu.status & FLAG_NEGATIVE != 0);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_ZERO == 0);
}

#[test]
fn cmp_is_unsigned_and_preserves_register() {
    let bus = bus_with_program(&[0xA9, 0x40, 0xC9, 0x41]); // LDA #$40 ; CMP #$41
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a, 0x40);
    assert!(cpu.status & FLAG_CARRY == 0, "register < operand");
    assert!(cpu.status & FLAG_ZERO == 0);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
}

#[test]
fn indexed_read_pays_for_page_cross() {
    // LDX #$01 ; LDA $80FF,X crosses into $8100.
    let bus = bus_with_program(&[0xA2, 0x01, 0xBD, 0xFF, 0x80]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    assert_eq!(cpu.step(), 5, "4 base + 1 page-cross penalty");

    // Same read without a crossing stays at the base cost.
    let bus = bus_with_program(&[0xA2, 0x01, 0xBD, 0x00, 0x80]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    assert_eq!(cpu.step(), 4);
}

#[test]
fn indexed_store_never_pays_the_penalty() {
    // LDX #$01 ; STA $02FF,X
    let bus = bus_with_program(&[0xA2, 0x01, 0x9D, 0xFF, 0x02]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    assert_eq!(cpu.step(), 5, "fixed cost regardless of crossing");
}

#[test]
fn branch_cycle_penalties() {
    // BNE not taken: 2 cycles.
    let bus = bus_with_program(&[0xA9, 0x00, 0xD0, 0x10]); // LDA #0 ; BNE +16
    let mut cpu = new_cpu(bus);
    cpu.reset();
    cpu.step();
    assert_eq!(cpu.step(), 2);

    // BNE taken within the page: 3 cycles.
    let bus = bus_with_program(&[0xA9, 0x01, 0xD0, 0x10]);
    let mut cpu = new_cpu(bus);
    cpu.reset();
    cpu.step();
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc, 0x8014);

    // BNE taken across a page: 4 cycles.
    let mut bus = bus_with_program(&[0xA9, 0x01]);
    bus.mem[0x80FD] = 0xD0; // BNE +$10, operand ends the page
    bus.mem[0x80FE] = 0x10;
    let mut cpu = new_cpu(bus);
    cpu.reset();
    cpu.step();
    cpu.pc = 0x80FD;
    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc, 0x810F);
}

#[test]
fn relative_branch_goes_backwards() {
    // LDX #3 ; DEX ; BNE -3 loops until X is zero.
    let bus = bus_with_program(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    for _ in 0..7 {
        cpu.step();
    }
    assert_eq!(cpu.x, 0x00);
    assert_eq!(cpu.pc, 0x8005);
}

#[test]
fn jmp_indirect_replicates_the_page_wrap_bug() {
    let mut bus = bus_with_program(&[0x6C, 0xFF, 0x02]); // JMP ($02FF)
    bus.mem[0x02FF] = 0x34;
    bus.mem[0x0300] = 0x9A; // would be the high byte on a fixed CPU
    bus.mem[0x0200] = 0x12; // the byte the NMOS bug actually fetches
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn jmp_indirect_bug_can_be_disabled() {
    let mut bus = bus_with_program(&[0x6C, 0xFF, 0x02]);
    bus.mem[0x02FF] = 0x34;
    bus.mem[0x0300] = 0x9A;
    bus.mem[0x0200] = 0x12;
    let mut cpu = new_cpu(bus);
    cpu.emulate_indirect_jmp_bug = false;
    cpu.reset();

    cpu.step();
    assert_eq!(cpu.pc, 0x9A34);
}

#[test]
fn zero_page_indexing_wraps_in_page_zero() {
    // LDX #$05 ; LDA $FE,X reads $0003, not $0103.
    let mut bus = bus_with_program(&[0xA2, 0x05, 0xB5, 0xFE]);
    bus.mem[0x0003] = 0x77;
    bus.mem[0x0103] = 0x11;
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    assert_eq!(cpu.a, 0x77);
}

#[test]
fn stack_pointer_wraps_without_fault() {
    let bus = bus_with_program(&[0x48, 0x48]); // PHA ; PHA
    let mut cpu = new_cpu(bus);
    cpu.reset();
    cpu.sp = 0x00;

    cpu.step();
    assert_eq!(cpu.sp, 0xFF);
    cpu.step();
    assert_eq!(cpu.sp, 0xFE);
}

#[test]
fn undocumented_opcodes_execute_as_nops() {
    // $80 is a two-byte NOP, $04 a zero-page NOP, $1A a one-byte NOP.
    let bus = bus_with_program(&[0x80, 0xAA, 0x04, 0x10, 0x1A, 0xA9, 0x55]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc, 0x8002);
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc, 0x8004);
    assert_eq!(cpu.step(), 2);
    cpu.step(); // the LDA still lines up
    assert_eq!(cpu.a, 0x55);
}

#[test]
fn irq_is_gated_on_interrupt_disable() {
    let mut bus = bus_with_program(&[0x78]); // SEI
    bus.mem[0xFFFE] = 0x00;
    bus.mem[0xFFFF] = 0x90;
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.irq();
    assert_eq!(cpu.pc, 0x8001, "IRQ ignored while I is set");

    cpu.status &= !crate::cpu::flags::FLAG_INTERRUPT_DISABLE;
    cpu.irq();
    assert_eq!(cpu.pc, 0x9000);
}

#[test]
fn nmi_is_not_gated() {
    let mut bus = bus_with_program(&[0x78]); // SEI
    bus.mem[0xFFFA] = 0x00;
    bus.mem[0xFFFB] = 0xA0;
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    let sp = cpu.sp;
    cpu.nmi();
    assert_eq!(cpu.pc, 0xA000);
    assert_eq!(cpu.sp, sp.wrapping_sub(3), "PC and P pushed");
}

#[test]
fn run_spends_at_least_the_budget() {
    // An endless JMP $8000 loop; each pass costs 3 cycles.
    let bus = bus_with_program(&[0x4C, 0x00, 0x80]);
    let mut cpu = new_cpu(bus);
    cpu.reset();

    let spent = cpu.run(100);
    assert!(spent >= 100);
    assert!(spent < 103, "stops at the first instruction past the budget");
}

#[test]
fn total_cycle_counter_accumulates() {
    let bus = bus_with_program(&[0xA9, 0x01, 0x69, 0x01]); // LDA #1 ; ADC #1
    let mut cpu = new_cpu(bus);
    cpu.reset();

    cpu.step();
    cpu.step();
    assert_eq!(cpu.cycles, 7 + 2 + 2);
}
