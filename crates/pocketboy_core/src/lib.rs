//! Sharp LR35902 (Game Boy DMG) CPU interpreter core.
//!
//! The crate models the fetch/decode/execute loop at instruction
//! granularity: `Cpu::step` fetches one opcode, dispatches it through a
//! 256-entry table (512 counting the `CB`-prefixed page), and returns the
//! number of machine cycles the instruction consumed. Graphics, audio,
//! timers, and cartridge mappers live behind the [`Bus`] trait and are
//! provided by the host.

pub mod bus;
pub mod cpu;

pub use bus::{Bus, FlatBus};
pub use cpu::{base_opcode_name, extended_opcode_name, Cpu, Flag, Reg16, Reg8, Registers};
