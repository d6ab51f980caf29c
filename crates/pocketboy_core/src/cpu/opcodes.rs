//! The base (unprefixed) opcode page.
//!
//! Both 256-entry tables are built once, on first dispatch, from small
//! factory functions that close over operand kinds and cycle counts. Slots
//! the hardware leaves undefined keep a warning placeholder.

use std::ops::Index;

use once_cell::sync::Lazy;

use super::alu::{AluOp, RotOp};
use super::instruction::Instruction;
use super::operand::{Addr8, Cond};
use super::regs::{Flag, Reg16, Reg8};
use super::{cb, math};

pub struct OpcodeTable {
    entries: Vec<Instruction>,
}

impl OpcodeTable {
    pub(crate) fn from_entries(entries: Vec<Instruction>) -> Self {
        debug_assert_eq!(entries.len(), 256);
        Self { entries }
    }

    pub fn name(&self, opcode: u8) -> &str {
        self.entries[opcode as usize].name()
    }
}

impl Index<u8> for OpcodeTable {
    type Output = Instruction;

    fn index(&self, opcode: u8) -> &Instruction {
        &self.entries[opcode as usize]
    }
}

pub(crate) static BASE: Lazy<OpcodeTable> = Lazy::new(base_table);
pub(crate) static EXTENDED: Lazy<OpcodeTable> = Lazy::new(cb::extended_table);

/// Disassembly name for a base-page opcode byte.
pub fn base_opcode_name(opcode: u8) -> &'static str {
    BASE[opcode].name()
}

/// Disassembly name for a `CB`-prefixed opcode byte.
pub fn extended_opcode_name(opcode: u8) -> &'static str {
    EXTENDED[opcode].name()
}

fn base_table() -> OpcodeTable {
    let mut t: Vec<Instruction> = (0u8..=255).map(Instruction::unimplemented).collect();

    t[0x00] = Instruction::new("NOP", |_, _| 1);

    // Register-pair rows: LD rr,u16 / INC rr / ADD HL,rr / DEC rr.
    for (i, rr) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP]
        .into_iter()
        .enumerate()
    {
        let row = i << 4;
        t[row | 0x01] = ld16_imm(rr);
        t[row | 0x03] = inc16(rr);
        t[row | 0x09] = add_hl(rr);
        t[row | 0x0B] = dec16(rr);
    }

    // A to/from memory through a pair, with post-inc/dec on the HL rows.
    for (i, mem) in [
        Addr8::Ind(Reg16::BC),
        Addr8::Ind(Reg16::DE),
        Addr8::IndInc,
        Addr8::IndDec,
    ]
    .into_iter()
    .enumerate()
    {
        let row = i << 4;
        t[row | 0x02] = load(mem, Addr8::Reg(Reg8::A));
        t[row | 0x0A] = load(Addr8::Reg(Reg8::A), mem);
    }

    // INC r / DEC r / LD r,u8 over the eight-entry operand column.
    for i in 0..8u8 {
        let target = Addr8::index(i);
        let row = (i as usize) << 3;
        t[row | 0x04] = inc8(target);
        t[row | 0x05] = dec8(target);
        t[row | 0x06] = load(target, Addr8::Imm);
    }

    // Accumulator rotate shorthands.
    t[0x07] = rotate_a(RotOp::Rlc);
    t[0x0F] = rotate_a(RotOp::Rrc);
    t[0x17] = rotate_a(RotOp::Rl);
    t[0x1F] = rotate_a(RotOp::Rr);

    t[0x08] = Instruction::new("LD (u16), SP", |cpu, bus| {
        let addr = cpu.fetch16(bus);
        let (low, high) = math::split(cpu.regs.sp);
        bus.write8(addr, low);
        bus.write8(addr.wrapping_add(1), high);
        5
    });

    // STOP parks the CPU like HALT; the joypad wake line that would resume
    // it belongs to the host. The padding byte is consumed so PC matches
    // hardware.
    t[0x10] = Instruction::new("STOP", |cpu, bus| {
        let _padding = cpu.fetch8(bus);
        cpu.halted = true;
        1
    });

    t[0x18] = jr(Cond::Always);

    // Conditional branch rows.
    for i in 0..4u8 {
        let cond = Cond::index(i);
        let row = (i as usize) << 3;
        t[0x20 + row] = jr(cond);
        t[0xC0 + row] = ret(cond);
        t[0xC2 + row] = jp(cond);
        t[0xC4 + row] = call(cond);
    }

    t[0x27] = Instruction::new("DAA", |cpu, _| {
        cpu.alu_daa();
        1
    });
    t[0x2F] = Instruction::new("CPL", |cpu, _| {
        cpu.regs.a = !cpu.regs.a;
        cpu.regs.set_flag(Flag::N, true);
        cpu.regs.set_flag(Flag::H, true);
        1
    });
    t[0x37] = Instruction::new("SCF", |cpu, _| {
        cpu.regs.set_flag(Flag::N, false);
        cpu.regs.set_flag(Flag::H, false);
        cpu.regs.set_flag(Flag::C, true);
        1
    });
    t[0x3F] = Instruction::new("CCF", |cpu, _| {
        let carry = cpu.regs.flag(Flag::C);
        cpu.regs.set_flag(Flag::N, false);
        cpu.regs.set_flag(Flag::H, false);
        cpu.regs.set_flag(Flag::C, !carry);
        1
    });

    // 8-bit transfers, with HALT in the (HL),(HL) slot.
    for op in 0x40..=0x7Fusize {
        if op == 0x76 {
            t[op] = Instruction::new("HALT", |cpu, _| {
                cpu.halted = true;
                1
            });
            continue;
        }
        let dst = Addr8::index((op >> 3) as u8 & 0x07);
        let src = Addr8::index(op as u8 & 0x07);
        t[op] = load(dst, src);
    }

    // Accumulator arithmetic and logic, register column then the u8 column.
    for op in 0x80..=0xBFusize {
        let alu = AluOp::from_row((op >> 3) as u8 & 0x07);
        t[op] = arithmetic(alu, Addr8::index(op as u8 & 0x07));
    }
    for i in 0..8u8 {
        t[0xC6 + ((i as usize) << 3)] = arithmetic(AluOp::from_row(i), Addr8::Imm);
    }

    // Stack rows: POP/PUSH over BC, DE, HL, AF.
    for (i, rr) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF]
        .into_iter()
        .enumerate()
    {
        let row = i << 4;
        t[0xC1 + row] = pop(rr);
        t[0xC5 + row] = push(rr);
    }

    // RST vectors at 0x00, 0x08, .., 0x38.
    for i in 0..8u8 {
        t[0xC7 + ((i as usize) << 3)] = rst(i * 8);
    }

    t[0xC3] = jp(Cond::Always);
    t[0xC9] = ret(Cond::Always);
    t[0xCD] = call(Cond::Always);
    t[0xD9] = Instruction::new("RETI", |cpu, bus| {
        cpu.regs.pc = cpu.pop16(bus);
        cpu.ime = true;
        4
    });

    t[0xE0] = Instruction::new("LDH (u8), A", |cpu, bus| {
        let offset = cpu.fetch8(bus);
        bus.write8(0xFF00 | u16::from(offset), cpu.regs.a);
        3
    });
    t[0xF0] = Instruction::new("LDH A, (u8)", |cpu, bus| {
        let offset = cpu.fetch8(bus);
        cpu.regs.a = bus.read8(0xFF00 | u16::from(offset));
        3
    });
    t[0xE2] = Instruction::new("LD (0xFF00+C), A", |cpu, bus| {
        bus.write8(0xFF00 | u16::from(cpu.regs.c), cpu.regs.a);
        2
    });
    t[0xF2] = Instruction::new("LD A, (0xFF00+C)", |cpu, bus| {
        cpu.regs.a = bus.read8(0xFF00 | u16::from(cpu.regs.c));
        2
    });
    t[0xEA] = Instruction::new("LD (u16), A", |cpu, bus| {
        let addr = cpu.fetch16(bus);
        bus.write8(addr, cpu.regs.a);
        4
    });
    t[0xFA] = Instruction::new("LD A, (u16)", |cpu, bus| {
        let addr = cpu.fetch16(bus);
        cpu.regs.a = bus.read8(addr);
        4
    });

    t[0xE8] = Instruction::new("ADD SP, i8", |cpu, bus| {
        let imm = cpu.fetch8(bus);
        cpu.regs.sp = cpu.alu_sp_plus_offset(imm);
        4
    });
    t[0xE9] = Instruction::new("JP HL", |cpu, _| {
        cpu.regs.pc = cpu.regs.hl();
        1
    });
    t[0xF8] = Instruction::new("LD HL, SP+i8", |cpu, bus| {
        let imm = cpu.fetch8(bus);
        let value = cpu.alu_hl_from_sp_offset(imm);
        cpu.regs.set_hl(value);
        3
    });
    t[0xF9] = Instruction::new("LD SP, HL", |cpu, _| {
        cpu.regs.sp = cpu.regs.hl();
        2
    });

    t[0xF3] = Instruction::new("DI", |cpu, _| {
        cpu.ime = false;
        1
    });
    t[0xFB] = Instruction::new("EI", |cpu, _| {
        cpu.ime = true;
        1
    });

    OpcodeTable::from_entries(t)
}

fn load(dst: Addr8, src: Addr8) -> Instruction {
    let cycles = 1 + dst.access_cycles() + src.access_cycles();
    Instruction::new(format!("LD {dst}, {src}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, src);
        cpu.write_operand(bus, dst, value);
        cycles
    })
}

fn ld16_imm(rr: Reg16) -> Instruction {
    Instruction::new(format!("LD {rr}, u16"), move |cpu, bus| {
        let value = cpu.fetch16(bus);
        cpu.regs.set16(rr, value);
        3
    })
}

fn inc8(target: Addr8) -> Instruction {
    Instruction::new(format!("INC {target}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        let result = cpu.alu_inc8(value);
        cpu.write_operand(bus, target, result);
        if target.is_reg() {
            1
        } else {
            3
        }
    })
}

fn dec8(target: Addr8) -> Instruction {
    Instruction::new(format!("DEC {target}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        let result = cpu.alu_dec8(value);
        cpu.write_operand(bus, target, result);
        if target.is_reg() {
            1
        } else {
            3
        }
    })
}

fn inc16(rr: Reg16) -> Instruction {
    Instruction::new(format!("INC {rr}"), move |cpu, _| {
        let value = cpu.regs.get16(rr).wrapping_add(1);
        cpu.regs.set16(rr, value);
        2
    })
}

fn dec16(rr: Reg16) -> Instruction {
    Instruction::new(format!("DEC {rr}"), move |cpu, _| {
        let value = cpu.regs.get16(rr).wrapping_sub(1);
        cpu.regs.set16(rr, value);
        2
    })
}

fn arithmetic(op: AluOp, src: Addr8) -> Instruction {
    Instruction::new(format!("{} A, {src}", op.mnemonic()), move |cpu, bus| {
        let value = cpu.read_operand(bus, src);
        cpu.alu_accumulator(op, value);
        if src.is_reg() {
            1
        } else {
            2
        }
    })
}

fn add_hl(rr: Reg16) -> Instruction {
    Instruction::new(format!("ADD HL, {rr}"), move |cpu, _| {
        let value = cpu.regs.get16(rr);
        cpu.alu_add16_hl(value);
        2
    })
}

fn rotate_a(op: RotOp) -> Instruction {
    Instruction::new(format!("{}A", op.mnemonic()), move |cpu, _| {
        let value = cpu.regs.a;
        cpu.regs.a = cpu.alu_rotate(op, value, true);
        1
    })
}

fn push(rr: Reg16) -> Instruction {
    Instruction::new(format!("PUSH {rr}"), move |cpu, bus| {
        let value = cpu.regs.get16(rr);
        cpu.push16(bus, value);
        4
    })
}

fn pop(rr: Reg16) -> Instruction {
    Instruction::new(format!("POP {rr}"), move |cpu, bus| {
        let value = cpu.pop16(bus);
        cpu.regs.set16(rr, value);
        3
    })
}

fn jr(cond: Cond) -> Instruction {
    Instruction::new(cond.label("JR", "i8"), move |cpu, bus| {
        let offset = math::sign_extend(cpu.fetch8(bus));
        if cond.holds(&cpu.regs) {
            cpu.regs.pc = cpu.regs.pc.wrapping_add(offset);
            3
        } else {
            2
        }
    })
}

fn jp(cond: Cond) -> Instruction {
    Instruction::new(cond.label("JP", "u16"), move |cpu, bus| {
        let target = cpu.fetch16(bus);
        if cond.holds(&cpu.regs) {
            cpu.regs.pc = target;
            4
        } else {
            3
        }
    })
}

fn call(cond: Cond) -> Instruction {
    Instruction::new(cond.label("CALL", "u16"), move |cpu, bus| {
        let target = cpu.fetch16(bus);
        if cond.holds(&cpu.regs) {
            let ret = cpu.regs.pc;
            cpu.push16(bus, ret);
            cpu.regs.pc = target;
            6
        } else {
            3
        }
    })
}

fn ret(cond: Cond) -> Instruction {
    Instruction::new(cond.label("RET", ""), move |cpu, bus| {
        if cond == Cond::Always {
            cpu.regs.pc = cpu.pop16(bus);
            4
        } else if cond.holds(&cpu.regs) {
            cpu.regs.pc = cpu.pop16(bus);
            5
        } else {
            2
        }
    })
}

fn rst(vector: u8) -> Instruction {
    Instruction::new(format!("RST {vector:02X}h"), move |cpu, bus| {
        let ret = cpu.regs.pc;
        cpu.push16(bus, ret);
        cpu.regs.pc = u16::from(vector);
        4
    })
}
