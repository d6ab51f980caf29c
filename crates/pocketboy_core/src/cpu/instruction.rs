use crate::bus::Bus;

use super::Cpu;

type ExecFn = Box<dyn Fn(&mut Cpu, &mut dyn Bus) -> u32 + Send + Sync>;

/// A single decoded opcode: an executor plus its fixed disassembly name.
///
/// The executor mutates CPU state through the bus and returns the number of
/// machine cycles consumed, including the taken/not-taken split for
/// conditional branches.
pub struct Instruction {
    name: String,
    exec: ExecFn,
}

impl Instruction {
    pub(crate) fn new(
        name: impl Into<String>,
        exec: impl Fn(&mut Cpu, &mut dyn Bus) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            exec: Box::new(exec),
        }
    }

    /// Filler for opcode bytes with no implementation (the hardware's opcode
    /// holes). Executing one warns and costs nothing, so a run can proceed
    /// past it as if it were a zero-cycle NOP.
    pub(crate) fn unimplemented(opcode: u8) -> Self {
        Self::new(format!("UNIMPLEMENTED(0x{opcode:02X})"), move |cpu, _| {
            log::warn!(
                "unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}",
                pc = cpu.regs.pc.wrapping_sub(1),
            );
            0
        })
    }

    /// Fixed disassembly string, e.g. `"LD A, B"` or `"BIT 3, (HL)"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn execute(&self, cpu: &mut Cpu, bus: &mut dyn Bus) -> u32 {
        (self.exec)(cpu, bus)
    }
}
