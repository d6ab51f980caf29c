//! Step a ROM through the CPU core and print a disassembly trace.
//!
//! Usage: `trace <rom_path> [max_steps]`

use std::path::PathBuf;

use anyhow::{Context, Result};

use pocketboy_core::{base_opcode_name, extended_opcode_name, Bus, Cpu, FlatBus};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: trace <rom_path> [max_steps]");
        std::process::exit(2);
    });
    let max_steps: u64 = args
        .next()
        .unwrap_or_else(|| "200".to_string())
        .parse()
        .context("max_steps must be an integer")?;

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let mut bus = FlatBus::new();
    bus.load_rom(&rom);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    for _ in 0..max_steps {
        if cpu.halted {
            log::info!("CPU halted at PC=0x{:04X}", cpu.regs.pc);
            break;
        }

        let pc = cpu.regs.pc;
        let opcode = bus.read8(pc);
        let name = if opcode == 0xCB {
            extended_opcode_name(bus.read8(pc.wrapping_add(1)))
        } else {
            base_opcode_name(opcode)
        };

        let cycles = cpu.step(&mut bus);
        println!("0x{pc:04X}  {opcode:02X}  {name:<18} {cycles}");
    }

    println!("total machine cycles: {}", cpu.cycles);
    Ok(())
}
