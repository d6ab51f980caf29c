//! The `CB`-prefixed opcode page: rotates, shifts, swaps, and single-bit
//! operations.
//!
//! The whole page is regular, so every entry is derived from the opcode
//! byte's bit fields: bits 7-6 pick the block, bits 5-3 the operation row or
//! bit number, and bits 2-0 the operand in the fixed order B, C, D, E, H, L,
//! (HL), A.

use super::alu::RotOp;
use super::instruction::Instruction;
use super::opcodes::OpcodeTable;
use super::operand::Addr8;

pub(super) fn extended_table() -> OpcodeTable {
    let entries = (0u8..=255)
        .map(|op| {
            let target = Addr8::index(op & 0x07);
            let row = (op >> 3) & 0x07;
            match op >> 6 {
                0 => rotate(RotOp::from_row(row), target),
                1 => bit_test(row, target),
                2 => res_bit(row, target),
                _ => set_bit(row, target),
            }
        })
        .collect();
    OpcodeTable::from_entries(entries)
}

fn operand_cycles(target: Addr8) -> u32 {
    if target.is_reg() {
        2
    } else {
        4
    }
}

fn rotate(op: RotOp, target: Addr8) -> Instruction {
    Instruction::new(format!("{} {target}", op.mnemonic()), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        let result = cpu.alu_rotate(op, value, false);
        cpu.write_operand(bus, target, result);
        operand_cycles(target)
    })
}

fn bit_test(bit: u8, target: Addr8) -> Instruction {
    Instruction::new(format!("BIT {bit}, {target}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        cpu.alu_bit(bit, value);
        operand_cycles(target)
    })
}

fn res_bit(bit: u8, target: Addr8) -> Instruction {
    Instruction::new(format!("RES {bit}, {target}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        cpu.write_operand(bus, target, value & !(1 << bit));
        operand_cycles(target)
    })
}

fn set_bit(bit: u8, target: Addr8) -> Instruction {
    Instruction::new(format!("SET {bit}, {target}"), move |cpu, bus| {
        let value = cpu.read_operand(bus, target);
        cpu.write_operand(bus, target, value | (1 << bit));
        operand_cycles(target)
    })
}
