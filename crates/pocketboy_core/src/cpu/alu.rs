use super::{math, Cpu, Flag};

/// Accumulator operation selected by bits 5-3 of the ALU opcode block,
/// in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    pub(crate) fn from_row(i: u8) -> AluOp {
        match i & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    pub(crate) fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Adc => "ADC",
            AluOp::Sub => "SUB",
            AluOp::Sbc => "SBC",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Or => "OR",
            AluOp::Cp => "CP",
        }
    }
}

/// Rotate/shift operation of the first CB-page block, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl RotOp {
    pub(crate) fn from_row(i: u8) -> RotOp {
        match i & 0x07 {
            0 => RotOp::Rlc,
            1 => RotOp::Rrc,
            2 => RotOp::Rl,
            3 => RotOp::Rr,
            4 => RotOp::Sla,
            5 => RotOp::Sra,
            6 => RotOp::Swap,
            _ => RotOp::Srl,
        }
    }

    pub(crate) fn mnemonic(self) -> &'static str {
        match self {
            RotOp::Rlc => "RLC",
            RotOp::Rrc => "RRC",
            RotOp::Rl => "RL",
            RotOp::Rr => "RR",
            RotOp::Sla => "SLA",
            RotOp::Sra => "SRA",
            RotOp::Swap => "SWAP",
            RotOp::Srl => "SRL",
        }
    }
}

impl Cpu {
    pub(crate) fn alu_accumulator(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// Core 8-bit ADD/ADC on A.
    ///
    /// ADC is two chained adds; H and C are the OR of the two stages.
    pub(crate) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry_in = u8::from(use_carry && self.regs.flag(Flag::C));
        let (partial, carry_a, half_a) = math::add8(self.regs.a, value);
        let (result, carry_b, half_b) = math::add8(partial, carry_in);

        self.regs.a = result;
        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::H, half_a || half_b);
        self.regs.set_flag(Flag::C, carry_a || carry_b);
    }

    /// Core 8-bit SUB/SBC on A, chained like `alu_add`.
    pub(crate) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = u8::from(use_carry && self.regs.flag(Flag::C));
        let (partial, borrow_a, half_a) = math::sub8(self.regs.a, value);
        let (result, borrow_b, half_b) = math::sub8(partial, carry_in);

        self.regs.a = result;
        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, half_a || half_b);
        self.regs.set_flag(Flag::C, borrow_a || borrow_b);
    }

    /// Compare A with `value`: SUB flags without writing A.
    pub(crate) fn alu_cp(&mut self, value: u8) {
        let (result, borrow, half) = math::sub8(self.regs.a, value);

        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, half);
        self.regs.set_flag(Flag::C, borrow);
    }

    #[inline]
    pub(crate) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::H, true);
        // N and C are already cleared.
    }

    #[inline]
    pub(crate) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
    }

    #[inline]
    pub(crate) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, result == 0);
    }

    /// 8-bit increment. Updates Z, N, H; C is untouched.
    #[inline]
    pub(crate) fn alu_inc8(&mut self, value: u8) -> u8 {
        let (result, _, half) = math::add8(value, 1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, half);
        result
    }

    /// 8-bit decrement. Updates Z, N, H; C is untouched.
    #[inline]
    pub(crate) fn alu_dec8(&mut self, value: u8) -> u8 {
        let (result, _, half) = math::sub8(value, 1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, half);
        result
    }

    /// `ADD HL, rr`. Z is unaffected; N cleared; H and C from the 16-bit add.
    pub(crate) fn alu_add16_hl(&mut self, value: u16) {
        let (result, carry, half) = math::add16(self.regs.hl(), value);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, half);
        self.regs.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// `LD HL, SP+i8`: SP plus the sign-extended immediate, with Z cleared
    /// and H/C taken from the 16-bit add of the widened offset.
    pub(crate) fn alu_hl_from_sp_offset(&mut self, imm: u8) -> u16 {
        let (result, carry, half) = math::add16(self.regs.sp, math::sign_extend(imm));
        self.regs.clear_flags();
        self.regs.set_flag(Flag::H, half);
        self.regs.set_flag(Flag::C, carry);
        result
    }

    /// `ADD SP, i8`: the sum uses the sign-extended immediate, while H and C
    /// come from the 16-bit add of the raw byte.
    pub(crate) fn alu_sp_plus_offset(&mut self, imm: u8) -> u16 {
        let (_, carry, half) = math::add16(self.regs.sp, u16::from(imm));
        self.regs.clear_flags();
        self.regs.set_flag(Flag::H, half);
        self.regs.set_flag(Flag::C, carry);
        self.regs.sp.wrapping_add(math::sign_extend(imm))
    }

    /// Rotate/shift/swap a byte, setting Z (unless forced clear), N=0, H=0,
    /// and C from the shifted-out bit.
    ///
    /// `clear_z` selects the accumulator shorthand behaviour (RLCA and
    /// friends), which always reports Z=0.
    pub(crate) fn alu_rotate(&mut self, op: RotOp, value: u8, clear_z: bool) -> u8 {
        let carry_in = self.regs.flag(Flag::C);
        let (result, carry) = match op {
            RotOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            RotOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            RotOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            RotOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            RotOp::Sla => (value << 1, value & 0x80 != 0),
            RotOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            RotOp::Swap => (value.rotate_left(4), false),
            RotOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.regs.clear_flags();
        self.regs.set_flag(Flag::Z, !clear_z && result == 0);
        self.regs.set_flag(Flag::C, carry);
        result
    }

    /// `BIT n, r`: Z reflects the complement of the tested bit; C is untouched
    /// and the operand is never written back.
    pub(crate) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.regs.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, true);
    }

    /// Decimal adjust A after BCD addition or subtraction.
    ///
    /// Uses C, H, N, and A to pick a correction value, then updates A, Z, H,
    /// and C; N is left unchanged.
    pub(crate) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.flag(Flag::C) { 0x60 } else { 0x00 };
        if self.regs.flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flag::N) {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flag::C, adjust >= 0x60);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }
}
