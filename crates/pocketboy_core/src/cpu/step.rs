use crate::bus::Bus;

use super::{opcodes, Cpu};

impl Cpu {
    /// Execute a single instruction and return the machine cycles taken.
    ///
    /// A halted CPU idles at one cycle per call until the host clears
    /// `halted`. The `0xCB` prefix redirects dispatch through the extended
    /// table; everything else goes through the base table, including the
    /// warn-and-continue placeholders in the undefined slots.
    pub fn step(&mut self, bus: &mut dyn Bus) -> u32 {
        if self.halted {
            self.cycles += 1;
            return 1;
        }

        let opcode = self.fetch8(bus);
        let cycles = if opcode == 0xCB {
            let sub = self.fetch8(bus);
            opcodes::EXTENDED[sub].execute(self, bus)
        } else {
            opcodes::BASE[opcode].execute(self, bus)
        };

        self.cycles += u64::from(cycles);
        cycles
    }
}
