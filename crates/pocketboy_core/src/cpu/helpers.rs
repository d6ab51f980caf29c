use crate::bus::Bus;

use super::operand::Addr8;
use super::{math, Cpu};

impl Cpu {
    /// Read the byte at PC and advance PC, wrapping at the top of the
    /// address space.
    #[inline]
    pub(crate) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a little-endian 16-bit immediate.
    #[inline]
    pub(crate) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let low = self.fetch8(bus);
        let high = self.fetch8(bus);
        math::merge(low, high)
    }

    /// Push a word: SP moves down two, low byte lands at SP, high at SP+1.
    ///
    /// Running the stack off the bottom of the address space is a broken ROM
    /// or host, not something the CPU can recover from.
    pub(crate) fn push16(&mut self, bus: &mut dyn Bus, value: u16) {
        if self.regs.sp < 2 {
            panic!(
                "stack overflow: PUSH with SP=0x{:04X} at PC=0x{:04X}",
                self.regs.sp, self.regs.pc
            );
        }
        let (low, high) = math::split(value);
        self.regs.sp -= 2;
        bus.write8(self.regs.sp, low);
        bus.write8(self.regs.sp.wrapping_add(1), high);
    }

    /// Pop a word pushed by `push16`.
    pub(crate) fn pop16(&mut self, bus: &mut dyn Bus) -> u16 {
        if self.regs.sp > 0xFFFD {
            panic!(
                "stack underflow: POP with SP=0x{:04X} at PC=0x{:04X}",
                self.regs.sp, self.regs.pc
            );
        }
        let low = bus.read8(self.regs.sp);
        let high = bus.read8(self.regs.sp + 1);
        self.regs.sp += 2;
        math::merge(low, high)
    }

    /// Read an 8-bit operand, fetching immediates and applying the HL
    /// post-increment/decrement modes.
    pub(crate) fn read_operand(&mut self, bus: &mut dyn Bus, operand: Addr8) -> u8 {
        match operand {
            Addr8::Reg(r) => self.regs.get8(r),
            Addr8::Ind(rr) => bus.read8(self.regs.get16(rr)),
            Addr8::IndInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                bus.read8(hl)
            }
            Addr8::IndDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                bus.read8(hl)
            }
            Addr8::Imm => self.fetch8(bus),
        }
    }

    /// Write an 8-bit operand. Immediates are not writable; the table
    /// builder never produces one as a destination.
    pub(crate) fn write_operand(&mut self, bus: &mut dyn Bus, operand: Addr8, value: u8) {
        match operand {
            Addr8::Reg(r) => self.regs.set8(r, value),
            Addr8::Ind(rr) => bus.write8(self.regs.get16(rr), value),
            Addr8::IndInc => {
                let hl = self.regs.hl();
                bus.write8(hl, value);
                self.regs.set_hl(hl.wrapping_add(1));
            }
            Addr8::IndDec => {
                let hl = self.regs.hl();
                bus.write8(hl, value);
                self.regs.set_hl(hl.wrapping_sub(1));
            }
            Addr8::Imm => unreachable!("immediate operand as destination"),
        }
    }
}
