use super::opcodes::{Access, AddrMode, OPCODES, Opcode};
use super::{
    FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT, FLAG_NEGATIVE, FLAG_OVERFLOW,
    FLAG_UNUSED, FLAG_ZERO, IRQ_VECTOR, NMI_VECTOR, Nes,
};

impl Nes {
    /// Execute one CPU-visible step and return the cycles it consumed: a DMA
    /// stall, an interrupt entry, or a single instruction. Interrupts are
    /// only taken here, so they always land on an instruction boundary.
    pub(crate) fn step_cpu(&mut self) -> u32 {
        self.debug.cpu_steps = self.debug.cpu_steps.wrapping_add(1);

        if self.dma_stall > 0 {
            let stalled = self.dma_stall;
            self.dma_stall = 0;
            self.total_cycles += stalled as u64;
            return stalled;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.service_interrupt(NMI_VECTOR);
            self.debug.nmi_serviced = self.debug.nmi_serviced.wrapping_add(1);
            self.total_cycles += 7;
            return 7;
        }

        if self.irq_pending && !self.flag(FLAG_INTERRUPT) {
            self.irq_pending = false;
            self.service_interrupt(IRQ_VECTOR);
            self.debug.irq_serviced = self.debug.irq_serviced.wrapping_add(1);
            self.total_cycles += 7;
            return 7;
        }

        let pc = self.pc;
        let opcode = self.cpu_read(pc);
        let op = &OPCODES[opcode as usize];
        self.pc = pc.wrapping_add(op.bytes as u16);
        self.extra_cycles = 0;
        (op.run)(self, op, pc);

        let cycles = op.cycles as u32 + self.extra_cycles;
        self.total_cycles += cycles as u64;
        cycles
    }

    /// Push PC and P (B clear, U set), disable interrupts, jump through the
    /// given vector. Shared by NMI and IRQ entry.
    fn service_interrupt(&mut self, vector: u16) {
        self.push_word(self.pc);
        self.push((self.p & !FLAG_BREAK) | FLAG_UNUSED);
        self.set_flag(FLAG_INTERRUPT, true);
        self.pc = self.read_word(vector);
    }

    /// Request a level-triggered IRQ; serviced at the next instruction
    /// boundary unless the I flag masks it.
    pub fn trigger_irq(&mut self) {
        self.irq_pending = true;
    }

    // ---- flags ----

    pub(crate) fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.p |= flag;
        } else {
            self.p &= !flag;
        }
    }

    pub(crate) fn flag(&self, flag: u8) -> bool {
        self.p & flag != 0
    }

    pub(crate) fn update_zn(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    // ---- stack ----

    pub(crate) fn push(&mut self, value: u8) {
        self.cpu_write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.cpu_read(0x0100 | self.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    // ---- addressing ----

    /// Resolve the operand address for an instruction whose opcode byte sat
    /// at `pc`. Indexed and relative forms also report a page crossing.
    fn operand_address(&mut self, mode: AddrMode, pc: u16) -> (u16, bool) {
        match mode {
            AddrMode::Implied | AddrMode::Accumulator | AddrMode::Immediate => {
                (pc.wrapping_add(1), false)
            }
            AddrMode::ZeroPage => (self.cpu_read(pc.wrapping_add(1)) as u16, false),
            AddrMode::ZeroPageX => {
                let base = self.cpu_read(pc.wrapping_add(1));
                (base.wrapping_add(self.x) as u16, false)
            }
            AddrMode::ZeroPageY => {
                let base = self.cpu_read(pc.wrapping_add(1));
                (base.wrapping_add(self.y) as u16, false)
            }
            AddrMode::Absolute => (self.read_word(pc.wrapping_add(1)), false),
            AddrMode::AbsoluteX => {
                let base = self.read_word(pc.wrapping_add(1));
                let addr = base.wrapping_add(self.x as u16);
                (addr, base & 0xFF00 != addr & 0xFF00)
            }
            AddrMode::AbsoluteY => {
                let base = self.read_word(pc.wrapping_add(1));
                let addr = base.wrapping_add(self.y as u16);
                (addr, base & 0xFF00 != addr & 0xFF00)
            }
            AddrMode::Relative => {
                let offset = self.cpu_read(pc.wrapping_add(1)) as i8;
                let base = pc.wrapping_add(2);
                let addr = base.wrapping_add(offset as u16);
                (addr, base & 0xFF00 != addr & 0xFF00)
            }
            AddrMode::Indirect => {
                let ptr = self.read_word(pc.wrapping_add(1));
                (self.read_word_bug(ptr), false)
            }
            AddrMode::IndexedIndirect => {
                let zp = self.cpu_read(pc.wrapping_add(1)).wrapping_add(self.x);
                (self.read_zero_page_word(zp), false)
            }
            AddrMode::IndirectIndexed => {
                let zp = self.cpu_read(pc.wrapping_add(1));
                let base = self.read_zero_page_word(zp);
                let addr = base.wrapping_add(self.y as u16);
                (addr, base & 0xFF00 != addr & 0xFF00)
            }
        }
    }

    /// Fetch the operand byte, charging the page-cross cycle for
    /// read-category instructions only.
    fn operand_value(&mut self, op: &Opcode, pc: u16) -> u8 {
        if op.mode == AddrMode::Immediate {
            return self.cpu_read(pc.wrapping_add(1));
        }
        let (addr, crossed) = self.operand_address(op.mode, pc);
        if crossed && op.access == Access::Read {
            self.extra_cycles += 1;
        }
        self.cpu_read(addr)
    }

    fn branch_on(&mut self, pc: u16, taken: bool) {
        if !taken {
            return;
        }
        let (target, crossed) = self.operand_address(AddrMode::Relative, pc);
        self.pc = target;
        self.extra_cycles += 1 + u32::from(crossed);
    }

    // ---- ALU helpers ----

    fn add_with_carry(&mut self, value: u8) {
        let carry_in = u16::from(self.flag(FLAG_CARRY));
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (self.a ^ result) & (value ^ result) & 0x80 != 0,
        );
        self.a = result;
        self.update_zn(self.a);
    }

    fn subtract_with_carry(&mut self, value: u8) {
        self.add_with_carry(value ^ 0xFF);
    }

    fn compare_register(&mut self, register: u8, value: u8) {
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zn(register.wrapping_sub(value));
    }

    fn shift_left(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.update_zn(result);
        result
    }

    fn shift_right(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.update_zn(result);
        result
    }

    fn rotate_left(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.flag(FLAG_CARRY));
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.update_zn(result);
        result
    }

    fn rotate_right(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.flag(FLAG_CARRY)) << 7;
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.update_zn(result);
        result
    }

    /// Read-modify-write scaffold shared by the shift/inc/dec family and the
    /// undocumented combined forms.
    fn modify_memory(&mut self, op: &Opcode, pc: u16, apply: fn(&mut Self, u8) -> u8) -> u8 {
        let (addr, _) = self.operand_address(op.mode, pc);
        let value = self.cpu_read(addr);
        let result = apply(self, value);
        self.cpu_write(addr, result);
        result
    }

    // ---- load / store ----

    pub(crate) fn lda(&mut self, op: &Opcode, pc: u16) {
        self.a = self.operand_value(op, pc);
        self.update_zn(self.a);
    }

    pub(crate) fn ldx(&mut self, op: &Opcode, pc: u16) {
        self.x = self.operand_value(op, pc);
        self.update_zn(self.x);
    }

    pub(crate) fn ldy(&mut self, op: &Opcode, pc: u16) {
        self.y = self.operand_value(op, pc);
        self.update_zn(self.y);
    }

    pub(crate) fn sta(&mut self, op: &Opcode, pc: u16) {
        let (addr, _) = self.operand_address(op.mode, pc);
        self.cpu_write(addr, self.a);
    }

    pub(crate) fn stx(&mut self, op: &Opcode, pc: u16) {
        let (addr, _) = self.operand_address(op.mode, pc);
        self.cpu_write(addr, self.x);
    }

    pub(crate) fn sty(&mut self, op: &Opcode, pc: u16) {
        let (addr, _) = self.operand_address(op.mode, pc);
        self.cpu_write(addr, self.y);
    }

    // ---- arithmetic / logic ----

    pub(crate) fn adc(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.add_with_carry(value);
    }

    pub(crate) fn sbc(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.subtract_with_carry(value);
    }

    pub(crate) fn and(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.a &= value;
        self.update_zn(self.a);
    }

    pub(crate) fn ora(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.a |= value;
        self.update_zn(self.a);
    }

    pub(crate) fn eor(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.a ^= value;
        self.update_zn(self.a);
    }

    pub(crate) fn cmp(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.compare_register(self.a, value);
    }

    pub(crate) fn cpx(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.compare_register(self.x, value);
    }

    pub(crate) fn cpy(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.compare_register(self.y, value);
    }

    pub(crate) fn bit(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.set_flag(FLAG_ZERO, self.a & value == 0);
        self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    // ---- shifts and rotates ----

    pub(crate) fn asl(&mut self, op: &Opcode, pc: u16) {
        if op.mode == AddrMode::Accumulator {
            self.a = self.shift_left(self.a);
        } else {
            self.modify_memory(op, pc, Self::shift_left);
        }
    }

    pub(crate) fn lsr(&mut self, op: &Opcode, pc: u16) {
        if op.mode == AddrMode::Accumulator {
            self.a = self.shift_right(self.a);
        } else {
            self.modify_memory(op, pc, Self::shift_right);
        }
    }

    pub(crate) fn rol(&mut self, op: &Opcode, pc: u16) {
        if op.mode == AddrMode::Accumulator {
            self.a = self.rotate_left(self.a);
        } else {
            self.modify_memory(op, pc, Self::rotate_left);
        }
    }

    pub(crate) fn ror(&mut self, op: &Opcode, pc: u16) {
        if op.mode == AddrMode::Accumulator {
            self.a = self.rotate_right(self.a);
        } else {
            self.modify_memory(op, pc, Self::rotate_right);
        }
    }

    pub(crate) fn inc(&mut self, op: &Opcode, pc: u16) {
        self.modify_memory(op, pc, |nes, value| {
            let result = value.wrapping_add(1);
            nes.update_zn(result);
            result
        });
    }

    pub(crate) fn dec(&mut self, op: &Opcode, pc: u16) {
        self.modify_memory(op, pc, |nes, value| {
            let result = value.wrapping_sub(1);
            nes.update_zn(result);
            result
        });
    }

    // ---- register inc/dec and transfers ----

    pub(crate) fn inx(&mut self, _op: &Opcode, _pc: u16) {
        self.x = self.x.wrapping_add(1);
        self.update_zn(self.x);
    }

    pub(crate) fn iny(&mut self, _op: &Opcode, _pc: u16) {
        self.y = self.y.wrapping_add(1);
        self.update_zn(self.y);
    }

    pub(crate) fn dex(&mut self, _op: &Opcode, _pc: u16) {
        self.x = self.x.wrapping_sub(1);
        self.update_zn(self.x);
    }

    pub(crate) fn dey(&mut self, _op: &Opcode, _pc: u16) {
        self.y = self.y.wrapping_sub(1);
        self.update_zn(self.y);
    }

    pub(crate) fn tax(&mut self, _op: &Opcode, _pc: u16) {
        self.x = self.a;
        self.update_zn(self.x);
    }

    pub(crate) fn tay(&mut self, _op: &Opcode, _pc: u16) {
        self.y = self.a;
        self.update_zn(self.y);
    }

    pub(crate) fn txa(&mut self, _op: &Opcode, _pc: u16) {
        self.a = self.x;
        self.update_zn(self.a);
    }

    pub(crate) fn tya(&mut self, _op: &Opcode, _pc: u16) {
        self.a = self.y;
        self.update_zn(self.a);
    }

    pub(crate) fn tsx(&mut self, _op: &Opcode, _pc: u16) {
        self.x = self.sp;
        self.update_zn(self.x);
    }

    pub(crate) fn txs(&mut self, _op: &Opcode, _pc: u16) {
        self.sp = self.x;
    }

    // ---- stack operations ----

    pub(crate) fn pha(&mut self, _op: &Opcode, _pc: u16) {
        self.push(self.a);
    }

    pub(crate) fn pla(&mut self, _op: &Opcode, _pc: u16) {
        self.a = self.pop();
        self.update_zn(self.a);
    }

    pub(crate) fn php(&mut self, _op: &Opcode, _pc: u16) {
        self.push(self.p | FLAG_BREAK | FLAG_UNUSED);
    }

    pub(crate) fn plp(&mut self, _op: &Opcode, _pc: u16) {
        self.p = (self.pop() & !FLAG_BREAK) | FLAG_UNUSED;
    }

    // ---- jumps, calls, interrupts ----

    pub(crate) fn jmp(&mut self, op: &Opcode, pc: u16) {
        let (addr, _) = self.operand_address(op.mode, pc);
        self.pc = addr;
    }

    pub(crate) fn jsr(&mut self, op: &Opcode, pc: u16) {
        let (target, _) = self.operand_address(op.mode, pc);
        self.push_word(pc.wrapping_add(2));
        self.pc = target;
    }

    pub(crate) fn rts(&mut self, _op: &Opcode, _pc: u16) {
        self.pc = self.pop_word().wrapping_add(1);
    }

    pub(crate) fn rti(&mut self, _op: &Opcode, _pc: u16) {
        self.p = (self.pop() & !FLAG_BREAK) | FLAG_UNUSED;
        self.pc = self.pop_word();
    }

    pub(crate) fn brk(&mut self, _op: &Opcode, pc: u16) {
        self.push_word(pc.wrapping_add(2));
        self.push(self.p | FLAG_BREAK | FLAG_UNUSED);
        self.set_flag(FLAG_INTERRUPT, true);
        self.pc = self.read_word(IRQ_VECTOR);
    }

    // ---- branches ----

    pub(crate) fn bpl(&mut self, _op: &Opcode, pc: u16) {
        let taken = !self.flag(FLAG_NEGATIVE);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bmi(&mut self, _op: &Opcode, pc: u16) {
        let taken = self.flag(FLAG_NEGATIVE);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bvc(&mut self, _op: &Opcode, pc: u16) {
        let taken = !self.flag(FLAG_OVERFLOW);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bvs(&mut self, _op: &Opcode, pc: u16) {
        let taken = self.flag(FLAG_OVERFLOW);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bcc(&mut self, _op: &Opcode, pc: u16) {
        let taken = !self.flag(FLAG_CARRY);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bcs(&mut self, _op: &Opcode, pc: u16) {
        let taken = self.flag(FLAG_CARRY);
        self.branch_on(pc, taken);
    }

    pub(crate) fn bne(&mut self, _op: &Opcode, pc: u16) {
        let taken = !self.flag(FLAG_ZERO);
        self.branch_on(pc, taken);
    }

    pub(crate) fn beq(&mut self, _op: &Opcode, pc: u16) {
        let taken = self.flag(FLAG_ZERO);
        self.branch_on(pc, taken);
    }

    // ---- flag instructions ----

    pub(crate) fn clc(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_CARRY, false);
    }

    pub(crate) fn sec(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_CARRY, true);
    }

    pub(crate) fn cli(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_INTERRUPT, false);
    }

    pub(crate) fn sei(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_INTERRUPT, true);
    }

    pub(crate) fn cld(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_DECIMAL, false);
    }

    pub(crate) fn sed(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_DECIMAL, true);
    }

    pub(crate) fn clv(&mut self, _op: &Opcode, _pc: u16) {
        self.set_flag(FLAG_OVERFLOW, false);
    }

    // ---- no-ops ----

    pub(crate) fn nop(&mut self, _op: &Opcode, _pc: u16) {}

    /// Multi-byte undocumented NOP: performs the operand read so its timing
    /// (including the page-cross cycle) matches hardware.
    pub(crate) fn nop_read(&mut self, op: &Opcode, pc: u16) {
        let _ = self.operand_value(op, pc);
    }

    // ---- stable undocumented instructions ----

    pub(crate) fn lax(&mut self, op: &Opcode, pc: u16) {
        let value = self.operand_value(op, pc);
        self.a = value;
        self.x = value;
        self.update_zn(value);
    }

    pub(crate) fn sax(&mut self, op: &Opcode, pc: u16) {
        let (addr, _) = self.operand_address(op.mode, pc);
        self.cpu_write(addr, self.a & self.x);
    }

    pub(crate) fn dcp(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, |_, value| value.wrapping_sub(1));
        self.compare_register(self.a, result);
    }

    pub(crate) fn isb(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, |_, value| value.wrapping_add(1));
        self.subtract_with_carry(result);
    }

    pub(crate) fn slo(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, Self::shift_left);
        self.a |= result;
        self.update_zn(self.a);
    }

    pub(crate) fn rla(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, Self::rotate_left);
        self.a &= result;
        self.update_zn(self.a);
    }

    pub(crate) fn sre(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, Self::shift_right);
        self.a ^= result;
        self.update_zn(self.a);
    }

    pub(crate) fn rra(&mut self, op: &Opcode, pc: u16) {
        let result = self.modify_memory(op, pc, Self::rotate_right);
        self.add_with_carry(result);
    }

    // ---- tracing ----

    /// One nestest-style disassembly line for the instruction at PC. Uses
    /// side-effect-free peeks so tracing never perturbs PPU register state.
    pub fn trace_line(&self) -> String {
        let pc = self.pc;
        let opcode = self.debug_peek(pc);
        let op = &OPCODES[opcode as usize];

        let mut bytes = format!("{opcode:02X}");
        for offset in 1..op.bytes as u16 {
            bytes.push_str(&format!(" {:02X}", self.debug_peek(pc.wrapping_add(offset))));
        }

        format!(
            "{:04X}  {:<8} {:>4}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, bytes, op.mnemonic, self.a, self.x, self.y, self.p, self.sp, self.total_cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 32 KiB PRG image, NOP-filled, with the vectors used by the tests:
    // reset -> 0x0600 (RAM), NMI -> 0x0680, IRQ/BRK -> 0x06C0.
    fn test_nes() -> Nes {
        let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0, 0];
        image.resize(16, 0);
        let prg_start = image.len();
        image.extend(std::iter::repeat_n(0xEA, 2 * 16 * 1024));
        image[prg_start + 0x7FFA] = 0x80; // NMI vector
        image[prg_start + 0x7FFB] = 0x06;
        image[prg_start + 0x7FFC] = 0x00; // reset vector
        image[prg_start + 0x7FFD] = 0x06;
        image[prg_start + 0x7FFE] = 0xC0; // IRQ/BRK vector
        image[prg_start + 0x7FFF] = 0x06;
        image.extend(std::iter::repeat_n(0u8, 8 * 1024));
        Nes::load(&image).unwrap()
    }

    fn load_program(nes: &mut Nes, addr: u16, program: &[u8]) {
        for (offset, byte) in program.iter().enumerate() {
            nes.cpu_write(addr.wrapping_add(offset as u16), *byte);
        }
    }

    #[test]
    fn reset_state() {
        let nes = test_nes();
        assert_eq!(nes.pc, 0x0600);
        assert_eq!(nes.sp, 0xFD);
        assert_eq!(nes.p, 0x24);
        assert!(nes.flag(FLAG_INTERRUPT));
        assert!(nes.flag(FLAG_UNUSED));
    }

    #[test]
    fn lda_immediate_zero() {
        let mut nes = test_nes();
        load_program(&mut nes, 0x0600, &[0xA9, 0x00]);
        let cycles = nes.step_cpu();
        assert_eq!(nes.a, 0);
        assert!(nes.flag(FLAG_ZERO));
        assert!(!nes.flag(FLAG_NEGATIVE));
        assert_eq!(cycles, 2);
        assert_eq!(nes.pc, 0x0602);
    }

    #[test]
    fn adc_signed_overflow() {
        let mut nes = test_nes();
        nes.a = 0x50;
        nes.set_flag(FLAG_CARRY, false);
        load_program(&mut nes, 0x0600, &[0x69, 0x50]);
        nes.step_cpu();
        assert_eq!(nes.a, 0xA0);
        assert!(!nes.flag(FLAG_CARRY));
        assert!(!nes.flag(FLAG_ZERO));
        assert!(nes.flag(FLAG_OVERFLOW));
        assert!(nes.flag(FLAG_NEGATIVE));
    }

    #[test]
    fn sbc_with_borrow() {
        let mut nes = test_nes();
        nes.a = 0x50;
        nes.set_flag(FLAG_CARRY, true);
        load_program(&mut nes, 0x0600, &[0xE9, 0xF0]);
        nes.step_cpu();
        assert_eq!(nes.a, 0x60);
        assert!(!nes.flag(FLAG_CARRY));
        assert!(!nes.flag(FLAG_ZERO));
        assert!(!nes.flag(FLAG_OVERFLOW));
        assert!(!nes.flag(FLAG_NEGATIVE));
    }

    #[test]
    fn jmp_indirect_page_wrap_bug() {
        let mut nes = test_nes();
        nes.cpu_write(0x0200, 0x40);
        nes.cpu_write(0x02FF, 0x80);
        nes.cpu_write(0x0300, 0x50);
        load_program(&mut nes, 0x0600, &[0x6C, 0xFF, 0x02]);
        let cycles = nes.step_cpu();
        // high byte comes from 0x0200, not 0x0300
        assert_eq!(nes.pc, 0x4080);
        assert_eq!(cycles, 5);
    }

    #[test]
    fn branch_cycle_accounting() {
        let mut nes = test_nes();
        // not taken: 2 cycles
        nes.set_flag(FLAG_ZERO, false);
        load_program(&mut nes, 0x0600, &[0xF0, 0x10]);
        assert_eq!(nes.step_cpu(), 2);
        assert_eq!(nes.pc, 0x0602);

        // taken, same page: 3 cycles
        let mut nes = test_nes();
        nes.set_flag(FLAG_ZERO, true);
        load_program(&mut nes, 0x0600, &[0xF0, 0x10]);
        assert_eq!(nes.step_cpu(), 3);
        assert_eq!(nes.pc, 0x0612);

        // taken, crossing into the previous page: 4 cycles
        let mut nes = test_nes();
        nes.set_flag(FLAG_ZERO, true);
        load_program(&mut nes, 0x0600, &[0xF0, 0x80]);
        assert_eq!(nes.step_cpu(), 4);
        assert_eq!(nes.pc, 0x0582);
    }

    #[test]
    fn page_cross_charges_reads_but_not_writes() {
        // LDA abs,Y crossing: 4 + 1
        let mut nes = test_nes();
        nes.y = 0x20;
        load_program(&mut nes, 0x0600, &[0xB9, 0xF0, 0x02]);
        assert_eq!(nes.step_cpu(), 5);

        // LDA abs,Y without crossing: 4
        let mut nes = test_nes();
        nes.y = 0x05;
        load_program(&mut nes, 0x0600, &[0xB9, 0xF0, 0x02]);
        assert_eq!(nes.step_cpu(), 4);

        // STA abs,Y always 5, crossing or not
        let mut nes = test_nes();
        nes.y = 0x20;
        load_program(&mut nes, 0x0600, &[0x99, 0xF0, 0x02]);
        assert_eq!(nes.step_cpu(), 5);

        // INC abs,X (read-modify-write) stays 7 on a cross
        let mut nes = test_nes();
        nes.x = 0x20;
        load_program(&mut nes, 0x0600, &[0xFE, 0xF0, 0x02]);
        assert_eq!(nes.step_cpu(), 7);
    }

    #[test]
    fn indirect_indexed_page_cross() {
        let mut nes = test_nes();
        nes.y = 0x20;
        nes.cpu_write(0x0040, 0xF0);
        nes.cpu_write(0x0041, 0x02);
        load_program(&mut nes, 0x0600, &[0xB1, 0x40]);
        assert_eq!(nes.step_cpu(), 6);

        let mut nes = test_nes();
        nes.y = 0x05;
        nes.cpu_write(0x0040, 0xF0);
        nes.cpu_write(0x0041, 0x02);
        load_program(&mut nes, 0x0600, &[0xB1, 0x40]);
        assert_eq!(nes.step_cpu(), 5);
    }

    #[test]
    fn indexed_indirect_wraps_in_zero_page() {
        let mut nes = test_nes();
        nes.x = 0x05;
        nes.cpu_write(0x00FF, 0x34);
        nes.cpu_write(0x0000, 0x02);
        nes.cpu_write(0x0234, 0x77);
        // pointer at (0xFA + 5) = 0xFF, whose high byte wraps to 0x00
        load_program(&mut nes, 0x0600, &[0xA1, 0xFA]);
        nes.step_cpu();
        assert_eq!(nes.a, 0x77);
    }

    #[test]
    fn stack_round_trip_and_plp_forcing() {
        let mut nes = test_nes();
        nes.a = 0xC3;
        load_program(&mut nes, 0x0600, &[0x48, 0xA9, 0x00, 0x68]);
        nes.step_cpu(); // PHA
        assert_eq!(nes.sp, 0xFC);
        nes.step_cpu(); // LDA #0
        nes.step_cpu(); // PLA
        assert_eq!(nes.a, 0xC3);
        assert_eq!(nes.sp, 0xFD);
        assert!(nes.flag(FLAG_NEGATIVE));

        // PHP pushes with B and U set; PLP restores with B clear, U set
        let mut nes = test_nes();
        nes.p = 0x24;
        load_program(&mut nes, 0x0600, &[0x08, 0x28]);
        nes.step_cpu();
        assert_eq!(nes.debug_peek(0x01FD), 0x24 | FLAG_BREAK | FLAG_UNUSED);
        nes.step_cpu();
        assert_eq!(nes.p & FLAG_BREAK, 0);
        assert_ne!(nes.p & FLAG_UNUSED, 0);
    }

    #[test]
    fn compares_leave_registers_alone() {
        let mut nes = test_nes();
        nes.a = 0x42;
        nes.x = 0x10;
        nes.y = 0x99;
        load_program(&mut nes, 0x0600, &[0xC9, 0x42, 0xE0, 0x20, 0xC0, 0x99]);
        nes.step_cpu(); // CMP
        assert!(nes.flag(FLAG_ZERO));
        assert!(nes.flag(FLAG_CARRY));
        nes.step_cpu(); // CPX: 0x10 < 0x20
        assert!(!nes.flag(FLAG_CARRY));
        nes.step_cpu(); // CPY
        assert!(nes.flag(FLAG_CARRY));
        assert_eq!((nes.a, nes.x, nes.y), (0x42, 0x10, 0x99));
    }

    #[test]
    fn brk_pushes_past_padding_and_rti_returns() {
        let mut nes = test_nes();
        nes.p = 0x24;
        load_program(&mut nes, 0x0600, &[0x00, 0xFF]);
        nes.cpu_write(0x06C0, 0x40); // RTI at the BRK vector
        let cycles = nes.step_cpu();
        assert_eq!(cycles, 7);
        assert_eq!(nes.pc, 0x06C0);
        assert!(nes.flag(FLAG_INTERRUPT));
        // pushed status has B and U set; pushed return address is 0x0602
        assert_eq!(nes.debug_peek(0x01FB), 0x24 | FLAG_BREAK | FLAG_UNUSED);
        assert_eq!(nes.debug_peek(0x01FC), 0x02);
        assert_eq!(nes.debug_peek(0x01FD), 0x06);
        nes.step_cpu();
        assert_eq!(nes.pc, 0x0602);
        assert_eq!(nes.p & FLAG_BREAK, 0);
    }

    #[test]
    fn nmi_service_sequence() {
        let mut nes = test_nes();
        nes.p = 0x24;
        load_program(&mut nes, 0x0600, &[0xEA]);
        nes.nmi_pending = true;
        let cycles = nes.step_cpu();
        assert_eq!(cycles, 7);
        assert_eq!(nes.pc, 0x0680);
        assert!(nes.flag(FLAG_INTERRUPT));
        // pushed status has B clear, U set
        assert_eq!(nes.debug_peek(0x01FB), 0x24 | FLAG_UNUSED);
        assert_eq!(nes.debug_peek(0x01FC), 0x00);
        assert_eq!(nes.debug_peek(0x01FD), 0x06);
    }

    #[test]
    fn irq_respects_interrupt_disable() {
        let mut nes = test_nes();
        load_program(&mut nes, 0x0600, &[0xEA, 0x58, 0xEA]);
        nes.trigger_irq();
        nes.step_cpu(); // NOP runs; IRQ masked by I=1
        assert_eq!(nes.pc, 0x0601);
        nes.step_cpu(); // CLI
        nes.step_cpu(); // IRQ taken at the boundary
        assert_eq!(nes.pc, 0x06C0);
        assert!(!nes.irq_pending);
    }

    #[test]
    fn nmi_ignores_interrupt_disable() {
        let mut nes = test_nes();
        load_program(&mut nes, 0x0600, &[0xEA]);
        nes.nmi_pending = true;
        nes.set_flag(FLAG_INTERRUPT, true);
        nes.step_cpu();
        assert_eq!(nes.pc, 0x0680);
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut nes = test_nes();
        load_program(&mut nes, 0x0600, &[0x20, 0x20, 0x06]);
        nes.cpu_write(0x0620, 0x60); // RTS
        nes.step_cpu();
        assert_eq!(nes.pc, 0x0620);
        assert_eq!(nes.step_cpu(), 6);
        assert_eq!(nes.pc, 0x0603);
    }

    #[test]
    fn shifts_and_rotates_move_carry() {
        let mut nes = test_nes();
        nes.a = 0x81;
        load_program(&mut nes, 0x0600, &[0x0A, 0x6A]);
        nes.step_cpu(); // ASL A: 0x81 -> 0x02, C=1
        assert_eq!(nes.a, 0x02);
        assert!(nes.flag(FLAG_CARRY));
        nes.step_cpu(); // ROR A: carry rotates into bit 7
        assert_eq!(nes.a, 0x81);
        assert!(!nes.flag(FLAG_CARRY));
    }

    #[test]
    fn rmw_memory_operand() {
        let mut nes = test_nes();
        nes.cpu_write(0x0010, 0xFF);
        load_program(&mut nes, 0x0600, &[0xE6, 0x10]);
        assert_eq!(nes.step_cpu(), 5);
        assert_eq!(nes.debug_peek(0x0010), 0x00);
        assert!(nes.flag(FLAG_ZERO));
    }

    #[test]
    fn lax_and_sax() {
        let mut nes = test_nes();
        nes.cpu_write(0x0010, 0x5A);
        load_program(&mut nes, 0x0600, &[0xA7, 0x10]);
        nes.step_cpu();
        assert_eq!(nes.a, 0x5A);
        assert_eq!(nes.x, 0x5A);

        let mut nes = test_nes();
        nes.a = 0xF0;
        nes.x = 0x3C;
        load_program(&mut nes, 0x0600, &[0x87, 0x20]);
        nes.step_cpu();
        assert_eq!(nes.debug_peek(0x0020), 0x30);
    }

    #[test]
    fn dcp_decrements_then_compares() {
        let mut nes = test_nes();
        nes.a = 0x40;
        nes.cpu_write(0x0010, 0x41);
        load_program(&mut nes, 0x0600, &[0xC7, 0x10]);
        assert_eq!(nes.step_cpu(), 5);
        assert_eq!(nes.debug_peek(0x0010), 0x40);
        assert!(nes.flag(FLAG_ZERO));
        assert!(nes.flag(FLAG_CARRY));
    }

    #[test]
    fn isb_increments_then_subtracts() {
        let mut nes = test_nes();
        nes.a = 0x10;
        nes.set_flag(FLAG_CARRY, true);
        nes.cpu_write(0x0010, 0x0F);
        load_program(&mut nes, 0x0600, &[0xE7, 0x10]);
        nes.step_cpu();
        assert_eq!(nes.debug_peek(0x0010), 0x10);
        assert_eq!(nes.a, 0x00);
        assert!(nes.flag(FLAG_ZERO));
        assert!(nes.flag(FLAG_CARRY));
    }

    #[test]
    fn unstable_opcodes_run_as_nops() {
        let mut nes = test_nes();
        nes.a = 0x12;
        nes.x = 0x34;
        load_program(&mut nes, 0x0600, &[0x8B, 0xFF, 0x9E, 0x00, 0x03]);
        assert_eq!(nes.step_cpu(), 2); // ANE -> 2-byte NOP
        assert_eq!(nes.a, 0x12);
        assert_eq!(nes.pc, 0x0602);
        assert_eq!(nes.step_cpu(), 5); // SHX -> 3-byte NOP
        assert_eq!(nes.pc, 0x0605);
        assert_eq!(nes.debug_peek(0x0300), 0x00);
    }

    #[test]
    fn stack_pointer_wraps() {
        let mut nes = test_nes();
        nes.sp = 0x00;
        load_program(&mut nes, 0x0600, &[0x48, 0x48]);
        nes.step_cpu();
        assert_eq!(nes.sp, 0xFF);
        nes.step_cpu();
        assert_eq!(nes.sp, 0xFE);
    }

    #[test]
    fn trace_line_formats_instruction() {
        let mut nes = test_nes();
        load_program(&mut nes, 0x0600, &[0xA9, 0x42]);
        let line = nes.trace_line();
        assert!(line.starts_with("0600  A9 42"));
        assert!(line.contains("LDA"));
    }
}
