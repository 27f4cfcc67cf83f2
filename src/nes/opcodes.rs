use super::Nes;

/// Addressing modes the dispatch table can name. Indexed and relative forms
/// report whether the effective address crossed a page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Relative,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

/// Memory-access category of an instruction. Only `Read` instructions pay
/// the extra cycle when an indexed addressing mode crosses a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    None,
    Read,
    Write,
    ReadModifyWrite,
}

pub(crate) type OpcodeFn = fn(&mut Nes, &Opcode, u16);

/// One row of the dispatch table: how to decode the operand, how far to
/// advance PC, the base cycle cost, and what to execute.
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub bytes: u8,
    pub cycles: u8,
    pub access: Access,
    pub(crate) run: OpcodeFn,
}

const fn op(
    mnemonic: &'static str,
    mode: AddrMode,
    bytes: u8,
    cycles: u8,
    access: Access,
    run: OpcodeFn,
) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        bytes,
        cycles,
        access,
        run,
    }
}

use Access::{None as Non, Read, ReadModifyWrite as Rmw, Write};
use AddrMode::*;

/// The 256-entry decode table, indexed directly by opcode byte. Rows marked
/// `*` are the stable undocumented instructions; unstable ones (ANC, ALR,
/// ARR, ANE, LXA, SBX, TAS, SHA/SHX/SHY, LAS, and the jam group) run as NOPs
/// of the documented shape.
pub(crate) static OPCODES: [Opcode; 256] = [
    op("BRK", Implied, 2, 7, Non, Nes::brk),                 // 00
    op("ORA", IndexedIndirect, 2, 6, Read, Nes::ora),        // 01
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 02
    op("*SLO", IndexedIndirect, 2, 8, Rmw, Nes::slo),        // 03
    op("*NOP", ZeroPage, 2, 3, Read, Nes::nop_read),         // 04
    op("ORA", ZeroPage, 2, 3, Read, Nes::ora),               // 05
    op("ASL", ZeroPage, 2, 5, Rmw, Nes::asl),                // 06
    op("*SLO", ZeroPage, 2, 5, Rmw, Nes::slo),               // 07
    op("PHP", Implied, 1, 3, Non, Nes::php),                 // 08
    op("ORA", Immediate, 2, 2, Read, Nes::ora),              // 09
    op("ASL", Accumulator, 1, 2, Non, Nes::asl),             // 0A
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 0B
    op("*NOP", Absolute, 3, 4, Read, Nes::nop_read),         // 0C
    op("ORA", Absolute, 3, 4, Read, Nes::ora),               // 0D
    op("ASL", Absolute, 3, 6, Rmw, Nes::asl),                // 0E
    op("*SLO", Absolute, 3, 6, Rmw, Nes::slo),               // 0F
    op("BPL", Relative, 2, 2, Non, Nes::bpl),                // 10
    op("ORA", IndirectIndexed, 2, 5, Read, Nes::ora),        // 11
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 12
    op("*SLO", IndirectIndexed, 2, 8, Rmw, Nes::slo),        // 13
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // 14
    op("ORA", ZeroPageX, 2, 4, Read, Nes::ora),              // 15
    op("ASL", ZeroPageX, 2, 6, Rmw, Nes::asl),               // 16
    op("*SLO", ZeroPageX, 2, 6, Rmw, Nes::slo),              // 17
    op("CLC", Implied, 1, 2, Non, Nes::clc),                 // 18
    op("ORA", AbsoluteY, 3, 4, Read, Nes::ora),              // 19
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 1A
    op("*SLO", AbsoluteY, 3, 7, Rmw, Nes::slo),              // 1B
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // 1C
    op("ORA", AbsoluteX, 3, 4, Read, Nes::ora),              // 1D
    op("ASL", AbsoluteX, 3, 7, Rmw, Nes::asl),               // 1E
    op("*SLO", AbsoluteX, 3, 7, Rmw, Nes::slo),              // 1F
    op("JSR", Absolute, 3, 6, Non, Nes::jsr),                // 20
    op("AND", IndexedIndirect, 2, 6, Read, Nes::and),        // 21
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 22
    op("*RLA", IndexedIndirect, 2, 8, Rmw, Nes::rla),        // 23
    op("BIT", ZeroPage, 2, 3, Read, Nes::bit),               // 24
    op("AND", ZeroPage, 2, 3, Read, Nes::and),               // 25
    op("ROL", ZeroPage, 2, 5, Rmw, Nes::rol),                // 26
    op("*RLA", ZeroPage, 2, 5, Rmw, Nes::rla),               // 27
    op("PLP", Implied, 1, 4, Non, Nes::plp),                 // 28
    op("AND", Immediate, 2, 2, Read, Nes::and),              // 29
    op("ROL", Accumulator, 1, 2, Non, Nes::rol),             // 2A
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 2B
    op("BIT", Absolute, 3, 4, Read, Nes::bit),               // 2C
    op("AND", Absolute, 3, 4, Read, Nes::and),               // 2D
    op("ROL", Absolute, 3, 6, Rmw, Nes::rol),                // 2E
    op("*RLA", Absolute, 3, 6, Rmw, Nes::rla),               // 2F
    op("BMI", Relative, 2, 2, Non, Nes::bmi),                // 30
    op("AND", IndirectIndexed, 2, 5, Read, Nes::and),        // 31
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 32
    op("*RLA", IndirectIndexed, 2, 8, Rmw, Nes::rla),        // 33
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // 34
    op("AND", ZeroPageX, 2, 4, Read, Nes::and),              // 35
    op("ROL", ZeroPageX, 2, 6, Rmw, Nes::rol),               // 36
    op("*RLA", ZeroPageX, 2, 6, Rmw, Nes::rla),              // 37
    op("SEC", Implied, 1, 2, Non, Nes::sec),                 // 38
    op("AND", AbsoluteY, 3, 4, Read, Nes::and),              // 39
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 3A
    op("*RLA", AbsoluteY, 3, 7, Rmw, Nes::rla),              // 3B
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // 3C
    op("AND", AbsoluteX, 3, 4, Read, Nes::and),              // 3D
    op("ROL", AbsoluteX, 3, 7, Rmw, Nes::rol),               // 3E
    op("*RLA", AbsoluteX, 3, 7, Rmw, Nes::rla),              // 3F
    op("RTI", Implied, 1, 6, Non, Nes::rti),                 // 40
    op("EOR", IndexedIndirect, 2, 6, Read, Nes::eor),        // 41
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 42
    op("*SRE", IndexedIndirect, 2, 8, Rmw, Nes::sre),        // 43
    op("*NOP", ZeroPage, 2, 3, Read, Nes::nop_read),         // 44
    op("EOR", ZeroPage, 2, 3, Read, Nes::eor),               // 45
    op("LSR", ZeroPage, 2, 5, Rmw, Nes::lsr),                // 46
    op("*SRE", ZeroPage, 2, 5, Rmw, Nes::sre),               // 47
    op("PHA", Implied, 1, 3, Non, Nes::pha),                 // 48
    op("EOR", Immediate, 2, 2, Read, Nes::eor),              // 49
    op("LSR", Accumulator, 1, 2, Non, Nes::lsr),             // 4A
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 4B
    op("JMP", Absolute, 3, 3, Non, Nes::jmp),                // 4C
    op("EOR", Absolute, 3, 4, Read, Nes::eor),               // 4D
    op("LSR", Absolute, 3, 6, Rmw, Nes::lsr),                // 4E
    op("*SRE", Absolute, 3, 6, Rmw, Nes::sre),               // 4F
    op("BVC", Relative, 2, 2, Non, Nes::bvc),                // 50
    op("EOR", IndirectIndexed, 2, 5, Read, Nes::eor),        // 51
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 52
    op("*SRE", IndirectIndexed, 2, 8, Rmw, Nes::sre),        // 53
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // 54
    op("EOR", ZeroPageX, 2, 4, Read, Nes::eor),              // 55
    op("LSR", ZeroPageX, 2, 6, Rmw, Nes::lsr),               // 56
    op("*SRE", ZeroPageX, 2, 6, Rmw, Nes::sre),              // 57
    op("CLI", Implied, 1, 2, Non, Nes::cli),                 // 58
    op("EOR", AbsoluteY, 3, 4, Read, Nes::eor),              // 59
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 5A
    op("*SRE", AbsoluteY, 3, 7, Rmw, Nes::sre),              // 5B
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // 5C
    op("EOR", AbsoluteX, 3, 4, Read, Nes::eor),              // 5D
    op("LSR", AbsoluteX, 3, 7, Rmw, Nes::lsr),               // 5E
    op("*SRE", AbsoluteX, 3, 7, Rmw, Nes::sre),              // 5F
    op("RTS", Implied, 1, 6, Non, Nes::rts),                 // 60
    op("ADC", IndexedIndirect, 2, 6, Read, Nes::adc),        // 61
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 62
    op("*RRA", IndexedIndirect, 2, 8, Rmw, Nes::rra),        // 63
    op("*NOP", ZeroPage, 2, 3, Read, Nes::nop_read),         // 64
    op("ADC", ZeroPage, 2, 3, Read, Nes::adc),               // 65
    op("ROR", ZeroPage, 2, 5, Rmw, Nes::ror),                // 66
    op("*RRA", ZeroPage, 2, 5, Rmw, Nes::rra),               // 67
    op("PLA", Implied, 1, 4, Non, Nes::pla),                 // 68
    op("ADC", Immediate, 2, 2, Read, Nes::adc),              // 69
    op("ROR", Accumulator, 1, 2, Non, Nes::ror),             // 6A
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 6B
    op("JMP", Indirect, 3, 5, Non, Nes::jmp),                // 6C
    op("ADC", Absolute, 3, 4, Read, Nes::adc),               // 6D
    op("ROR", Absolute, 3, 6, Rmw, Nes::ror),                // 6E
    op("*RRA", Absolute, 3, 6, Rmw, Nes::rra),               // 6F
    op("BVS", Relative, 2, 2, Non, Nes::bvs),                // 70
    op("ADC", IndirectIndexed, 2, 5, Read, Nes::adc),        // 71
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 72
    op("*RRA", IndirectIndexed, 2, 8, Rmw, Nes::rra),        // 73
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // 74
    op("ADC", ZeroPageX, 2, 4, Read, Nes::adc),              // 75
    op("ROR", ZeroPageX, 2, 6, Rmw, Nes::ror),               // 76
    op("*RRA", ZeroPageX, 2, 6, Rmw, Nes::rra),              // 77
    op("SEI", Implied, 1, 2, Non, Nes::sei),                 // 78
    op("ADC", AbsoluteY, 3, 4, Read, Nes::adc),              // 79
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 7A
    op("*RRA", AbsoluteY, 3, 7, Rmw, Nes::rra),              // 7B
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // 7C
    op("ADC", AbsoluteX, 3, 4, Read, Nes::adc),              // 7D
    op("ROR", AbsoluteX, 3, 7, Rmw, Nes::ror),               // 7E
    op("*RRA", AbsoluteX, 3, 7, Rmw, Nes::rra),              // 7F
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 80
    op("STA", IndexedIndirect, 2, 6, Write, Nes::sta),       // 81
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 82
    op("*SAX", IndexedIndirect, 2, 6, Write, Nes::sax),      // 83
    op("STY", ZeroPage, 2, 3, Write, Nes::sty),              // 84
    op("STA", ZeroPage, 2, 3, Write, Nes::sta),              // 85
    op("STX", ZeroPage, 2, 3, Write, Nes::stx),              // 86
    op("*SAX", ZeroPage, 2, 3, Write, Nes::sax),             // 87
    op("DEY", Implied, 1, 2, Non, Nes::dey),                 // 88
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 89
    op("TXA", Implied, 1, 2, Non, Nes::txa),                 // 8A
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // 8B
    op("STY", Absolute, 3, 4, Write, Nes::sty),              // 8C
    op("STA", Absolute, 3, 4, Write, Nes::sta),              // 8D
    op("STX", Absolute, 3, 4, Write, Nes::stx),              // 8E
    op("*SAX", Absolute, 3, 4, Write, Nes::sax),             // 8F
    op("BCC", Relative, 2, 2, Non, Nes::bcc),                // 90
    op("STA", IndirectIndexed, 2, 6, Write, Nes::sta),       // 91
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // 92
    op("*NOP", IndirectIndexed, 2, 6, Non, Nes::nop),        // 93
    op("STY", ZeroPageX, 2, 4, Write, Nes::sty),             // 94
    op("STA", ZeroPageX, 2, 4, Write, Nes::sta),             // 95
    op("STX", ZeroPageY, 2, 4, Write, Nes::stx),             // 96
    op("*SAX", ZeroPageY, 2, 4, Write, Nes::sax),            // 97
    op("TYA", Implied, 1, 2, Non, Nes::tya),                 // 98
    op("STA", AbsoluteY, 3, 5, Write, Nes::sta),             // 99
    op("TXS", Implied, 1, 2, Non, Nes::txs),                 // 9A
    op("*NOP", AbsoluteY, 3, 5, Non, Nes::nop),              // 9B
    op("*NOP", AbsoluteX, 3, 5, Non, Nes::nop),              // 9C
    op("STA", AbsoluteX, 3, 5, Write, Nes::sta),             // 9D
    op("*NOP", AbsoluteY, 3, 5, Non, Nes::nop),              // 9E
    op("*NOP", AbsoluteY, 3, 5, Non, Nes::nop),              // 9F
    op("LDY", Immediate, 2, 2, Read, Nes::ldy),              // A0
    op("LDA", IndexedIndirect, 2, 6, Read, Nes::lda),        // A1
    op("LDX", Immediate, 2, 2, Read, Nes::ldx),              // A2
    op("*LAX", IndexedIndirect, 2, 6, Read, Nes::lax),       // A3
    op("LDY", ZeroPage, 2, 3, Read, Nes::ldy),               // A4
    op("LDA", ZeroPage, 2, 3, Read, Nes::lda),               // A5
    op("LDX", ZeroPage, 2, 3, Read, Nes::ldx),               // A6
    op("*LAX", ZeroPage, 2, 3, Read, Nes::lax),              // A7
    op("TAY", Implied, 1, 2, Non, Nes::tay),                 // A8
    op("LDA", Immediate, 2, 2, Read, Nes::lda),              // A9
    op("TAX", Implied, 1, 2, Non, Nes::tax),                 // AA
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // AB
    op("LDY", Absolute, 3, 4, Read, Nes::ldy),               // AC
    op("LDA", Absolute, 3, 4, Read, Nes::lda),               // AD
    op("LDX", Absolute, 3, 4, Read, Nes::ldx),               // AE
    op("*LAX", Absolute, 3, 4, Read, Nes::lax),              // AF
    op("BCS", Relative, 2, 2, Non, Nes::bcs),                // B0
    op("LDA", IndirectIndexed, 2, 5, Read, Nes::lda),        // B1
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // B2
    op("*LAX", IndirectIndexed, 2, 5, Read, Nes::lax),       // B3
    op("LDY", ZeroPageX, 2, 4, Read, Nes::ldy),              // B4
    op("LDA", ZeroPageX, 2, 4, Read, Nes::lda),              // B5
    op("LDX", ZeroPageY, 2, 4, Read, Nes::ldx),              // B6
    op("*LAX", ZeroPageY, 2, 4, Read, Nes::lax),             // B7
    op("CLV", Implied, 1, 2, Non, Nes::clv),                 // B8
    op("LDA", AbsoluteY, 3, 4, Read, Nes::lda),              // B9
    op("TSX", Implied, 1, 2, Non, Nes::tsx),                 // BA
    op("*NOP", AbsoluteY, 3, 4, Read, Nes::nop_read),        // BB
    op("LDY", AbsoluteX, 3, 4, Read, Nes::ldy),              // BC
    op("LDA", AbsoluteX, 3, 4, Read, Nes::lda),              // BD
    op("LDX", AbsoluteY, 3, 4, Read, Nes::ldx),              // BE
    op("*LAX", AbsoluteY, 3, 4, Read, Nes::lax),             // BF
    op("CPY", Immediate, 2, 2, Read, Nes::cpy),              // C0
    op("CMP", IndexedIndirect, 2, 6, Read, Nes::cmp),        // C1
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // C2
    op("*DCP", IndexedIndirect, 2, 8, Rmw, Nes::dcp),        // C3
    op("CPY", ZeroPage, 2, 3, Read, Nes::cpy),               // C4
    op("CMP", ZeroPage, 2, 3, Read, Nes::cmp),               // C5
    op("DEC", ZeroPage, 2, 5, Rmw, Nes::dec),                // C6
    op("*DCP", ZeroPage, 2, 5, Rmw, Nes::dcp),               // C7
    op("INY", Implied, 1, 2, Non, Nes::iny),                 // C8
    op("CMP", Immediate, 2, 2, Read, Nes::cmp),              // C9
    op("DEX", Implied, 1, 2, Non, Nes::dex),                 // CA
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // CB
    op("CPY", Absolute, 3, 4, Read, Nes::cpy),               // CC
    op("CMP", Absolute, 3, 4, Read, Nes::cmp),               // CD
    op("DEC", Absolute, 3, 6, Rmw, Nes::dec),                // CE
    op("*DCP", Absolute, 3, 6, Rmw, Nes::dcp),               // CF
    op("BNE", Relative, 2, 2, Non, Nes::bne),                // D0
    op("CMP", IndirectIndexed, 2, 5, Read, Nes::cmp),        // D1
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // D2
    op("*DCP", IndirectIndexed, 2, 8, Rmw, Nes::dcp),        // D3
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // D4
    op("CMP", ZeroPageX, 2, 4, Read, Nes::cmp),              // D5
    op("DEC", ZeroPageX, 2, 6, Rmw, Nes::dec),               // D6
    op("*DCP", ZeroPageX, 2, 6, Rmw, Nes::dcp),              // D7
    op("CLD", Implied, 1, 2, Non, Nes::cld),                 // D8
    op("CMP", AbsoluteY, 3, 4, Read, Nes::cmp),              // D9
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // DA
    op("*DCP", AbsoluteY, 3, 7, Rmw, Nes::dcp),              // DB
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // DC
    op("CMP", AbsoluteX, 3, 4, Read, Nes::cmp),              // DD
    op("DEC", AbsoluteX, 3, 7, Rmw, Nes::dec),               // DE
    op("*DCP", AbsoluteX, 3, 7, Rmw, Nes::dcp),              // DF
    op("CPX", Immediate, 2, 2, Read, Nes::cpx),              // E0
    op("SBC", IndexedIndirect, 2, 6, Read, Nes::sbc),        // E1
    op("*NOP", Immediate, 2, 2, Read, Nes::nop_read),        // E2
    op("*ISB", IndexedIndirect, 2, 8, Rmw, Nes::isb),        // E3
    op("CPX", ZeroPage, 2, 3, Read, Nes::cpx),               // E4
    op("SBC", ZeroPage, 2, 3, Read, Nes::sbc),               // E5
    op("INC", ZeroPage, 2, 5, Rmw, Nes::inc),                // E6
    op("*ISB", ZeroPage, 2, 5, Rmw, Nes::isb),               // E7
    op("INX", Implied, 1, 2, Non, Nes::inx),                 // E8
    op("SBC", Immediate, 2, 2, Read, Nes::sbc),              // E9
    op("NOP", Implied, 1, 2, Non, Nes::nop),                 // EA
    op("*SBC", Immediate, 2, 2, Read, Nes::sbc),             // EB
    op("CPX", Absolute, 3, 4, Read, Nes::cpx),               // EC
    op("SBC", Absolute, 3, 4, Read, Nes::sbc),               // ED
    op("INC", Absolute, 3, 6, Rmw, Nes::inc),                // EE
    op("*ISB", Absolute, 3, 6, Rmw, Nes::isb),               // EF
    op("BEQ", Relative, 2, 2, Non, Nes::beq),                // F0
    op("SBC", IndirectIndexed, 2, 5, Read, Nes::sbc),        // F1
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // F2
    op("*ISB", IndirectIndexed, 2, 8, Rmw, Nes::isb),        // F3
    op("*NOP", ZeroPageX, 2, 4, Read, Nes::nop_read),        // F4
    op("SBC", ZeroPageX, 2, 4, Read, Nes::sbc),              // F5
    op("INC", ZeroPageX, 2, 6, Rmw, Nes::inc),               // F6
    op("*ISB", ZeroPageX, 2, 6, Rmw, Nes::isb),              // F7
    op("SED", Implied, 1, 2, Non, Nes::sed),                 // F8
    op("SBC", AbsoluteY, 3, 4, Read, Nes::sbc),              // F9
    op("*NOP", Implied, 1, 2, Non, Nes::nop),                // FA
    op("*ISB", AbsoluteY, 3, 7, Rmw, Nes::isb),              // FB
    op("*NOP", AbsoluteX, 3, 4, Read, Nes::nop_read),        // FC
    op("SBC", AbsoluteX, 3, 4, Read, Nes::sbc),              // FD
    op("INC", AbsoluteX, 3, 7, Rmw, Nes::inc),               // FE
    op("*ISB", AbsoluteX, 3, 7, Rmw, Nes::isb),              // FF
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_opcode() {
        assert_eq!(OPCODES.len(), 256);
        for row in &OPCODES {
            assert!(row.bytes >= 1 && row.bytes <= 3);
            assert!(row.cycles >= 2 && row.cycles <= 8);
        }
    }

    #[test]
    fn byte_lengths_match_addressing_modes() {
        for row in &OPCODES {
            let expected = match row.mode {
                // BRK advances past its padding byte.
                Implied if row.mnemonic == "BRK" => 2,
                Implied | Accumulator => 1,
                Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
                _ => 2,
            };
            assert_eq!(row.bytes, expected, "{} / {:?}", row.mnemonic, row.mode);
        }
    }

    #[test]
    fn stores_and_rmw_never_use_read_access() {
        for row in &OPCODES {
            if matches!(row.mnemonic, "STA" | "STX" | "STY" | "*SAX") {
                assert_eq!(row.access, Access::Write, "{}", row.mnemonic);
            }
            if matches!(
                row.mnemonic,
                "ASL" | "LSR" | "ROL" | "ROR" | "INC" | "DEC"
            ) && !matches!(row.mode, Accumulator)
            {
                assert_eq!(row.access, Access::ReadModifyWrite, "{}", row.mnemonic);
            }
        }
    }
}
