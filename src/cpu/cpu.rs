//! 6502 / 2A03 CPU interpreter.
//!
//! Fetch, decode through the 256-entry opcode table, execute, account cycles.
//! Decimal mode is absent on the 2A03, so ADC/SBC ignore the D flag. Interrupt
//! entry (BRK, IRQ, NMI) and the reset sequence follow the
//! [NESdev CPU pages](https://www.nesdev.org/wiki/CPU).

use crate::{
    bus::Bus,
    cpu::flags::{
        self, FLAG_BREAK, FLAG_CARRY, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
        FLAG_UNUSED, FLAG_ZERO,
    },
    cpu::opcodes::{Mode, Op, OPCODES},
};

/// Reset vector ($FFFC–$FFFD), IRQ/BRK vector ($FFFE–$FFFF), NMI vector ($FFFA–$FFFB).
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;
pub const NMI_VECTOR: u16 = 0xFFFA;

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Running cycle total; the single source of truth for emulated time.
    pub cycles: u64,
    /// Emulate the NMOS JMP ($xxFF) page-wrap bug. On by default to match hardware.
    pub emulate_indirect_jmp_bug: bool,
    pub bus: B,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: 0,
            cycles: 0,
            emulate_indirect_jmp_bug: true,
            bus,
        }
    }

    /// Power-on / reset: registers cleared, SP at $FD, PC loaded from the reset
    /// vector, and a BRK's worth of cycles charged.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.status = 0;
        self.sp = 0xFD; // resets at $FD instead of $FF for some reason

        let lo = self.bus.read(RESET_VECTOR) as u16;
        let hi = self.bus.read(RESET_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        self.cycles = 7;
    }

    /// Execute one instruction and return its cycle cost, or 0 when the debugger
    /// refuses the current PC. Any DMA stall the instruction caused is collected
    /// into the running total before returning.
    pub fn step(&mut self) -> u8 {
        if !self.bus.may_continue(self.pc) {
            return 0;
        }

        let opcode = self.fetch_byte();
        let instr = OPCODES[opcode as usize];
        if instr.op() == Op::NOP && opcode != 0xEA {
            log::warn!(
                "undocumented opcode ${:02X} at ${:04X}, executing as NOP",
                opcode,
                self.pc.wrapping_sub(1)
            );
        }

        let (addr, page_crossed) = self.operand_addr(instr.mode());
        let extra = self.execute(instr.op(), instr.mode(), addr);

        let mut cost = instr.cycles() + extra;
        if page_crossed && instr.page_penalty() {
            cost += 1;
        }

        let stall = self.bus.take_stall();
        self.cycles += cost as u64 + stall;
        cost
    }

    /// Execute whole instructions until at least `budget` cycles have elapsed,
    /// returning the cycles actually spent. Stops short only when the debugger
    /// refuses to continue.
    pub fn run(&mut self, budget: u64) -> u64 {
        let start = self.cycles;
        while self.cycles.wrapping_sub(start) < budget {
            if self.step() == 0 {
                break;
            }
        }
        self.cycles.wrapping_sub(start)
    }

    /// Hardware IRQ: gated on the I flag, pushes PC and P (B clear), targets $FFFE.
    pub fn irq(&mut self) {
        if flags::is_set(self.status, FLAG_INTERRUPT_DISABLE) {
            return;
        }

        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;

        let lo = self.bus.read(IRQ_VECTOR) as u16;
        let hi = self.bus.read(IRQ_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        self.cycles += 7;
    }

    /// Non-maskable interrupt: same frame as IRQ but not gated on I, targets $FFFA.
    pub fn nmi(&mut self) {
        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;

        let lo = self.bus.read(NMI_VECTOR) as u16;
        let hi = self.bus.read(NMI_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        self.cycles += 7;
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Resolve the operand's effective address for `mode`, consuming operand bytes.
    /// Returns the address and whether an indexed mode crossed a page boundary.
    /// REL, ACC and IMP have no address; branches fetch their own offset.
    fn operand_addr(&mut self, mode: Mode) -> (u16, bool) {
        match mode {
            Mode::IMM => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            Mode::ZP0 => (self.fetch_byte() as u16, false),
            Mode::ZPX => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.x) as u16, false)
            }
            Mode::ZPY => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.y) as u16, false)
            }
            Mode::ABS => (self.fetch_word(), false),
            Mode::ABX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.x as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            Mode::ABY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.y as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            Mode::IND => {
                let ptr = self.fetch_word();
                let lo = self.bus.read(ptr) as u16;
                // The NMOS 6502 fetches the high byte from the start of the same
                // page when the pointer sits at $xxFF.
                let hi_addr = if self.emulate_indirect_jmp_bug {
                    (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = self.bus.read(hi_addr) as u16;
                ((hi << 8) | lo, false)
            }
            Mode::IDX => {
                let ptr = self.fetch_byte().wrapping_add(self.x);
                let lo = self.bus.read(ptr as u16) as u16;
                let hi = self.bus.read(ptr.wrapping_add(1) as u16) as u16;
                ((hi << 8) | lo, false)
            }
            Mode::IDY => {
                let zp = self.fetch_byte();
                let lo = self.bus.read(zp as u16) as u16;
                let hi = self.bus.read(zp.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(self.y as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            Mode::REL | Mode::ACC | Mode::IMP => (0, false),
        }
    }

    /// Execute `op`. Returns extra cycles beyond the tabled base (branch penalties).
    fn execute(&mut self, op: Op, mode: Mode, addr: u16) -> u8 {
        match op {
            Op::ADC => {
                let value = self.bus.read(addr);
                self.adc(value);
            }
            Op::SBC => {
                let value = self.bus.read(addr);
                self.sbc(value);
            }
            Op::AND => {
                self.a &= self.bus.read(addr);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::ORA => {
                self.a |= self.bus.read(addr);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::EOR => {
                self.a ^= self.bus.read(addr);
                self.update_zero_and_negative_flags(self.a);
            }

            Op::ASL => self.asl(mode, addr),
            Op::LSR => self.lsr(mode, addr),
            Op::ROL => self.rol(mode, addr),
            Op::ROR => self.ror(mode, addr),

            Op::BIT => {
                let value = self.bus.read(addr);
                self.status = flags::set(self.status, FLAG_ZERO, self.a & value == 0);
                self.status = flags::set(self.status, FLAG_NEGATIVE, value & 0x80 != 0);
                self.status = flags::set(self.status, FLAG_OVERFLOW, value & 0x40 != 0);
            }

            Op::CMP => {
                let value = self.bus.read(addr);
                self.compare(self.a, value);
            }
            Op::CPX => {
                let value = self.bus.read(addr);
                self.compare(self.x, value);
            }
            Op::CPY => {
                let value = self.bus.read(addr);
                self.compare(self.y, value);
            }

            Op::INC => {
                let value = self.bus.read(addr).wrapping_add(1);
                self.bus.write(addr, value);
                self.update_zero_and_negative_flags(value);
            }
            Op::DEC => {
                let value = self.bus.read(addr).wrapping_sub(1);
                self.bus.write(addr, value);
                self.update_zero_and_negative_flags(value);
            }
            Op::INX => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::DEX => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::INY => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Op::DEY => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
            }

            Op::LDA => {
                self.a = self.bus.read(addr);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::LDX => {
                self.x = self.bus.read(addr);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::LDY => {
                self.y = self.bus.read(addr);
                self.update_zero_and_negative_flags(self.y);
            }
            Op::STA => self.bus.write(addr, self.a),
            Op::STX => self.bus.write(addr, self.x),
            Op::STY => self.bus.write(addr, self.y),

            Op::TAX => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Op::TAY => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Op::TSX => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            Op::TXA => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Op::TXS => self.sp = self.x,
            Op::TYA => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }

            Op::JMP => self.pc = addr,
            Op::JSR => {
                let return_addr = self.pc.wrapping_sub(1);
                self.push((return_addr >> 8) as u8);
                self.push(return_addr as u8);
                self.pc = addr;
            }
            Op::RTS => {
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = ((hi << 8) | lo).wrapping_add(1);
            }
            Op::RTI => {
                let status = self.pop();
                self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = (hi << 8) | lo;
            }
            Op::BRK => self.brk(),

            Op::BCC => return self.branch(!flags::is_set(self.status, FLAG_CARRY)),
            Op::BCS => return self.branch(flags::is_set(self.status, FLAG_CARRY)),
            Op::BEQ => return self.branch(flags::is_set(self.status, FLAG_ZERO)),
            Op::BNE => return self.branch(!flags::is_set(self.status, FLAG_ZERO)),
            Op::BMI => return self.branch(flags::is_set(self.status, FLAG_NEGATIVE)),
            Op::BPL => return self.branch(!flags::is_set(self.status, FLAG_NEGATIVE)),
            Op::BVS => return self.branch(flags::is_set(self.status, FLAG_OVERFLOW)),
            Op::BVC => return self.branch(!flags::is_set(self.status, FLAG_OVERFLOW)),

            Op::PHA => self.push(self.a),
            Op::PHP => self.push(self.status | FLAG_BREAK | FLAG_UNUSED),
            Op::PLA => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
            }
            Op::PLP => {
                let value = self.pop();
                self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
            }

            Op::CLC => self.status &= !FLAG_CARRY,
            Op::SEC => self.status |= FLAG_CARRY,
            Op::CLI => self.status &= !FLAG_INTERRUPT_DISABLE,
            Op::SEI => self.status |= FLAG_INTERRUPT_DISABLE,
            Op::CLV => self.status &= !FLAG_OVERFLOW,
            Op::CLD => self.status &= !flags::FLAG_DECIMAL,
            Op::SED => self.status |= flags::FLAG_DECIMAL,

            Op::NOP => {
                // Undocumented memory NOPs still perform their dummy operand read.
                if !matches!(mode, Mode::IMP | Mode::ACC | Mode::IMM) {
                    let _ = self.bus.read(addr);
                }
            }
        }
        0
    }

    fn adc(&mut self, value: u8) {
        let carry_in = if flags::is_set(self.status, FLAG_CARRY) {
            1
        } else {
            0
        };
        let sum = self.a as u16 + value as u16 + carry_in as u16;
        let result = sum as u8;

        self.status = flags::set(self.status, FLAG_CARRY, sum > 0xFF);
        self.status = flags::set(
            self.status,
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    // SBC is ADC of the complement: carry out is the inverted borrow.
    fn sbc(&mut self, value: u8) {
        let carry_in = if flags::is_set(self.status, FLAG_CARRY) {
            1
        } else {
            0
        };
        let value = value ^ 0xFF;
        let sum = self.a as u16 + value as u16 + carry_in as u16;
        let result = sum as u8;

        self.status = flags::set(self.status, FLAG_CARRY, sum > 0xFF);
        self.status = flags::set(
            self.status,
            FLAG_OVERFLOW,
            ((self.a ^ result) & (result ^ value)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.status = flags::set(self.status, FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(result);
    }

    fn asl(&mut self, mode: Mode, addr: u16) {
        let value = self.read_shift_operand(mode, addr);
        self.status = flags::set(self.status, FLAG_CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.write_shift_result(mode, addr, result);
    }

    fn lsr(&mut self, mode: Mode, addr: u16) {
        let value = self.read_shift_operand(mode, addr);
        self.status = flags::set(self.status, FLAG_CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.write_shift_result(mode, addr, result);
    }

    fn rol(&mut self, mode: Mode, addr: u16) {
        let value = self.read_shift_operand(mode, addr);
        let old_carry = flags::is_set(self.status, FLAG_CARRY) as u8;
        self.status = flags::set(self.status, FLAG_CARRY, value & 0x80 != 0);
        let result = (value << 1) | old_carry;
        self.write_shift_result(mode, addr, result);
    }

    fn ror(&mut self, mode: Mode, addr: u16) {
        let value = self.read_shift_operand(mode, addr);
        let old_carry = flags::is_set(self.status, FLAG_CARRY) as u8;
        self.status = flags::set(self.status, FLAG_CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (old_carry << 7);
        self.write_shift_result(mode, addr, result);
    }

    fn read_shift_operand(&mut self, mode: Mode, addr: u16) -> u8 {
        if mode == Mode::ACC {
            self.a
        } else {
            self.bus.read(addr)
        }
    }

    fn write_shift_result(&mut self, mode: Mode, addr: u16, result: u8) {
        if mode == Mode::ACC {
            self.a = result;
        } else {
            self.bus.write(addr, result);
        }
        self.update_zero_and_negative_flags(result);
    }

    fn brk(&mut self) {
        self.pc = self.pc.wrapping_add(1); // +1 because of padding byte

        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);

        self.status |= FLAG_INTERRUPT_DISABLE;

        let lo = self.bus.read(IRQ_VECTOR) as u16;
        let hi = self.bus.read(IRQ_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;
    }

    /// Conditional branch. Fetches the signed offset, and when taken charges one
    /// extra cycle, two when the target lands in a different page.
    fn branch(&mut self, condition: bool) -> u8 {
        let offset = self.fetch_byte() as i8;

        if condition {
            let old_pc = self.pc;
            self.pc = self.pc.wrapping_add(offset as u16);

            if (old_pc & 0xFF00) != (self.pc & 0xFF00) {
                2
            } else {
                1
            }
        } else {
            0
        }
    }

    fn push(&mut self, value: u8) {
        let addr = 0x0100 | self.sp as u16;
        self.bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = 0x0100 | self.sp as u16;
        self.bus.read(addr)
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.status = flags::set(self.status, FLAG_ZERO, value == 0);
        self.status = flags::set(self.status, FLAG_NEGATIVE, value & 0x80 != 0);
    }
}
