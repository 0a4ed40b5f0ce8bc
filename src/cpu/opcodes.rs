//! 6502 opcode decode table.
//!
//! 16×16 grid keyed on the opcode byte, matching the datasheet matrix. Each entry
//! names the operation, the addressing mode, the base cycle cost, and whether an
//! indexed read pays one extra cycle when the effective address crosses a page.
//! Undocumented opcodes are entered as NOPs with their conventional mode and cost
//! so a badly behaved ROM keeps its program counter and timing aligned.

/// Operations of the documented 6502 instruction set.
#[rustfmt::skip]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Op {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC, CLD, CLI,
    CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP, JSR, LDA, LDX, LDY,
    LSR, NOP, ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI, RTS, SBC, SEC, SED, SEI, STA,
    STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
}

/// Addressing modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mode {
    IMM,
    ZP0, ZPX, ZPY,
    ABS, ABX, ABY,
    IND, IDX, IDY,
    REL, ACC, IMP,
}

/// One decode table entry: (operation, mode, base cycles, page-cross penalty).
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Opcode(pub Op, pub Mode, pub u8, pub bool);

impl Opcode {
    pub fn op(&self) -> Op {
        self.0
    }
    pub fn mode(&self) -> Mode {
        self.1
    }
    pub fn cycles(&self) -> u8 {
        self.2
    }
    pub fn page_penalty(&self) -> bool {
        self.3
    }
}

use Mode::*;
use Op::*;

// Page-cross penalty column: applies to indexed loads, compares and ALU reads only
// (stores and read-modify-write instructions always pay the fixed cost).
const N: bool = false;
const P: bool = true;

#[rustfmt::skip]
pub const OPCODES: [Opcode; 256] = [
    Opcode(BRK, IMP, 7, N), Opcode(ORA, IDX, 6, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDX, 8, N), Opcode(NOP, ZP0, 3, N), Opcode(ORA, ZP0, 3, N), Opcode(ASL, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(PHP, IMP, 3, N), Opcode(ORA, IMM, 2, N), Opcode(ASL, ACC, 2, N), Opcode(NOP, IMM, 2, N), Opcode(NOP, ABS, 4, N), Opcode(ORA, ABS, 4, N), Opcode(ASL, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BPL, REL, 2, N), Opcode(ORA, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(ORA, ZPX, 4, N), Opcode(ASL, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(CLC, IMP, 2, N), Opcode(ORA, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(ORA, ABX, 4, P), Opcode(ASL, ABX, 7, N), Opcode(NOP, ABX, 7, N),
    Opcode(JSR, ABS, 6, N), Opcode(AND, IDX, 6, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDX, 8, N), Opcode(BIT, ZP0, 3, N), Opcode(AND, ZP0, 3, N), Opcode(ROL, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(PLP, IMP, 4, N), Opcode(AND, IMM, 2, N), Opcode(ROL, ACC, 2, N), Opcode(NOP, IMM, 2, N), Opcode(BIT, ABS, 4, N), Opcode(AND, ABS, 4, N), Opcode(ROL, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BMI, REL, 2, N), Opcode(AND, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(AND, ZPX, 4, N), Opcode(ROL, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(SEC, IMP, 2, N), Opcode(AND, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(AND, ABX, 4, P), Opcode(ROL, ABX, 7, N), Opcode(NOP, ABX, 7, N),
    Opcode(RTI, IMP, 6, N), Opcode(EOR, IDX, 6, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDX, 8, N), Opcode(NOP, ZP0, 3, N), Opcode(EOR, ZP0, 3, N), Opcode(LSR, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(PHA, IMP, 3, N), Opcode(EOR, IMM, 2, N), Opcode(LSR, ACC, 2, N), Opcode(NOP, IMM, 2, N), Opcode(JMP, ABS, 3, N), Opcode(EOR, ABS, 4, N), Opcode(LSR, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BVC, REL, 2, N), Opcode(EOR, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(EOR, ZPX, 4, N), Opcode(LSR, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(CLI, IMP, 2, N), Opcode(EOR, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(EOR, ABX, 4, P), Opcode(LSR, ABX, 7, N), Opcode(NOP, ABX, 7, N),
    Opcode(RTS, IMP, 6, N), Opcode(ADC, IDX, 6, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDX, 8, N), Opcode(NOP, ZP0, 3, N), Opcode(ADC, ZP0, 3, N), Opcode(ROR, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(PLA, IMP, 4, N), Opcode(ADC, IMM, 2, N), Opcode(ROR, ACC, 2, N), Opcode(NOP, IMM, 2, N), Opcode(JMP, IND, 5, N), Opcode(ADC, ABS, 4, N), Opcode(ROR, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BVS, REL, 2, N), Opcode(ADC, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(ADC, ZPX, 4, N), Opcode(ROR, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(SEI, IMP, 2, N), Opcode(ADC, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(ADC, ABX, 4, P), Opcode(ROR, ABX, 7, N), Opcode(NOP, ABX, 7, N),
    Opcode(NOP, IMM, 2, N), Opcode(STA, IDX, 6, N), Opcode(NOP, IMM, 2, N), Opcode(NOP, IDX, 6, N), Opcode(STY, ZP0, 3, N), Opcode(STA, ZP0, 3, N), Opcode(STX, ZP0, 3, N), Opcode(NOP, ZP0, 3, N), Opcode(DEY, IMP, 2, N), Opcode(NOP, IMM, 2, N), Opcode(TXA, IMP, 2, N), Opcode(NOP, IMM, 2, N), Opcode(STY, ABS, 4, N), Opcode(STA, ABS, 4, N), Opcode(STX, ABS, 4, N), Opcode(NOP, ABS, 4, N),
    Opcode(BCC, REL, 2, N), Opcode(STA, IDY, 6, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 6, N), Opcode(STY, ZPX, 4, N), Opcode(STA, ZPX, 4, N), Opcode(STX, ZPY, 4, N), Opcode(NOP, ZPY, 4, N), Opcode(TYA, IMP, 2, N), Opcode(STA, ABY, 5, N), Opcode(TXS, IMP, 2, N), Opcode(NOP, ABY, 5, N), Opcode(NOP, ABX, 5, N), Opcode(STA, ABX, 5, N), Opcode(NOP, ABY, 5, N), Opcode(NOP, ABY, 5, N),
    Opcode(LDY, IMM, 2, N), Opcode(LDA, IDX, 6, N), Opcode(LDX, IMM, 2, N), Opcode(NOP, IDX, 6, N), Opcode(LDY, ZP0, 3, N), Opcode(LDA, ZP0, 3, N), Opcode(LDX, ZP0, 3, N), Opcode(NOP, ZP0, 3, N), Opcode(TAY, IMP, 2, N), Opcode(LDA, IMM, 2, N), Opcode(TAX, IMP, 2, N), Opcode(NOP, IMM, 2, N), Opcode(LDY, ABS, 4, N), Opcode(LDA, ABS, 4, N), Opcode(LDX, ABS, 4, N), Opcode(NOP, ABS, 4, N),
    Opcode(BCS, REL, 2, N), Opcode(LDA, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 5, P), Opcode(LDY, ZPX, 4, N), Opcode(LDA, ZPX, 4, N), Opcode(LDX, ZPY, 4, N), Opcode(NOP, ZPY, 4, N), Opcode(CLV, IMP, 2, N), Opcode(LDA, ABY, 4, P), Opcode(TSX, IMP, 2, N), Opcode(NOP, ABY, 4, P), Opcode(LDY, ABX, 4, P), Opcode(LDA, ABX, 4, P), Opcode(LDX, ABY, 4, P), Opcode(NOP, ABY, 4, P),
    Opcode(CPY, IMM, 2, N), Opcode(CMP, IDX, 6, N), Opcode(NOP, IMM, 2, N), Opcode(NOP, IDX, 8, N), Opcode(CPY, ZP0, 3, N), Opcode(CMP, ZP0, 3, N), Opcode(DEC, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(INY, IMP, 2, N), Opcode(CMP, IMM, 2, N), Opcode(DEX, IMP, 2, N), Opcode(NOP, IMM, 2, N), Opcode(CPY, ABS, 4, N), Opcode(CMP, ABS, 4, N), Opcode(DEC, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BNE, REL, 2, N), Opcode(CMP, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(CMP, ZPX, 4, N), Opcode(DEC, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(CLD, IMP, 2, N), Opcode(CMP, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(CMP, ABX, 4, P), Opcode(DEC, ABX, 7, N), Opcode(NOP, ABX, 7, N),
    Opcode(CPX, IMM, 2, N), Opcode(SBC, IDX, 6, N), Opcode(NOP, IMM, 2, N), Opcode(NOP, IDX, 8, N), Opcode(CPX, ZP0, 3, N), Opcode(SBC, ZP0, 3, N), Opcode(INC, ZP0, 5, N), Opcode(NOP, ZP0, 5, N), Opcode(INX, IMP, 2, N), Opcode(SBC, IMM, 2, N), Opcode(NOP, IMP, 2, N), Opcode(NOP, IMM, 2, N), Opcode(CPX, ABS, 4, N), Opcode(SBC, ABS, 4, N), Opcode(INC, ABS, 6, N), Opcode(NOP, ABS, 6, N),
    Opcode(BEQ, REL, 2, N), Opcode(SBC, IDY, 5, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, IDY, 8, N), Opcode(NOP, ZPX, 4, N), Opcode(SBC, ZPX, 4, N), Opcode(INC, ZPX, 6, N), Opcode(NOP, ZPX, 6, N), Opcode(SED, IMP, 2, N), Opcode(SBC, ABY, 4, P), Opcode(NOP, IMP, 2, N), Opcode(NOP, ABY, 7, N), Opcode(NOP, ABX, 4, P), Opcode(SBC, ABX, 4, P), Opcode(INC, ABX, 7, N), Opcode(NOP, ABX, 7, N),
];
