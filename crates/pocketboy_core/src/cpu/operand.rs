use std::fmt;

use super::regs::{Flag, Reg16, Reg8, Registers};

/// Addressing mode of an 8-bit data operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Addr8 {
    /// One of the eight CPU registers.
    Reg(Reg8),
    /// The byte at the address held in a register pair: `(BC)`, `(DE)`, `(HL)`.
    Ind(Reg16),
    /// `(HL+)`: the byte at HL, with HL incremented after the access.
    IndInc,
    /// `(HL-)`: the byte at HL, with HL decremented after the access.
    IndDec,
    /// Immediate byte from the instruction stream.
    Imm,
}

impl Addr8 {
    /// Operand for a three-bit register index in the standard table order:
    /// B, C, D, E, H, L, (HL), A.
    pub(crate) fn index(i: u8) -> Addr8 {
        match i & 0x07 {
            0 => Addr8::Reg(Reg8::B),
            1 => Addr8::Reg(Reg8::C),
            2 => Addr8::Reg(Reg8::D),
            3 => Addr8::Reg(Reg8::E),
            4 => Addr8::Reg(Reg8::H),
            5 => Addr8::Reg(Reg8::L),
            6 => Addr8::Ind(Reg16::HL),
            _ => Addr8::Reg(Reg8::A),
        }
    }

    #[inline]
    pub(crate) fn is_reg(self) -> bool {
        matches!(self, Addr8::Reg(_))
    }

    /// Extra machine cycles an access through this operand costs on top of
    /// the one-cycle opcode fetch.
    pub(crate) fn access_cycles(self) -> u32 {
        match self {
            Addr8::Reg(_) => 0,
            Addr8::Ind(_) | Addr8::IndInc | Addr8::IndDec | Addr8::Imm => 1,
        }
    }
}

impl fmt::Display for Addr8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr8::Reg(r) => write!(f, "{r}"),
            Addr8::Ind(rr) => write!(f, "({rr})"),
            Addr8::IndInc => f.write_str("(HL+)"),
            Addr8::IndDec => f.write_str("(HL-)"),
            Addr8::Imm => f.write_str("u8"),
        }
    }
}

/// Branch condition of a jump, call, or return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Always,
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    /// Condition for a two-bit `cc` field: NZ, Z, NC, C.
    pub(crate) fn index(i: u8) -> Cond {
        match i & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }

    pub fn holds(self, regs: &Registers) -> bool {
        match self {
            Cond::Always => true,
            Cond::NZ => !regs.flag(Flag::Z),
            Cond::Z => regs.flag(Flag::Z),
            Cond::NC => !regs.flag(Flag::C),
            Cond::C => regs.flag(Flag::C),
        }
    }

    /// Disassembly name for a conditional instruction, e.g.
    /// `label("JR", "i8")` gives `"JR i8"` or `"JR NZ, i8"`.
    pub(crate) fn label(self, mnemonic: &str, operand: &str) -> String {
        match (self, operand.is_empty()) {
            (Cond::Always, true) => mnemonic.to_string(),
            (Cond::Always, false) => format!("{mnemonic} {operand}"),
            (_, true) => format!("{mnemonic} {self}"),
            (_, false) => format!("{mnemonic} {self}, {operand}"),
        }
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Cond::Always => "",
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        };
        f.write_str(text)
    }
}
