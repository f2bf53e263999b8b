// Arithmetic instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Arithmetic Instructions
    // ========================================

    /// ADC - Add with Carry
    ///
    /// Adds the value from memory to the accumulator, plus the carry flag.
    /// This is used for multi-byte addition and arithmetic operations.
    ///
    /// Formula: A = A + M + C
    ///
    /// The Overflow (V) flag is set when the sign of the result is incorrect:
    /// - Adding two positive numbers produces a negative result
    /// - Adding two negative numbers produces a positive result
    ///
    /// Flags affected: C, Z, V, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn adc(&mut self, bus: &Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let carry = if self.get_carry() { 1 } else { 0 };

        // Perform addition with carry using u16 to detect overflow
        let sum = self.a as u16 + value as u16 + carry as u16;

        // Set carry flag if result exceeds 255
        self.set_carry(sum > 0xFF);

        // Convert result to u8
        let result = sum as u8;

        // Set overflow flag
        // Overflow occurs when:
        // - Both operands have the same sign (bit 7)
        // - The result has a different sign than the operands
        // This can be checked with: (A^result) & (M^result) & 0x80
        let overflow = (self.a ^ result) & (value ^ result) & 0x80 != 0;
        self.set_overflow(overflow);

        // Update accumulator
        self.a = result;

        // Update zero and negative flags
        self.update_zero_and_negative_flags(result);
    }

    /// SBC - Subtract with Carry
    ///
    /// Subtracts the value from memory from the accumulator, minus (1 - carry).
    /// This is used for multi-byte subtraction and comparison operations.
    ///
    /// Formula: A = A - M - (1 - C)
    /// Equivalent to: A = A + ~M + C (using two's complement)
    ///
    /// The Overflow (V) flag is set when the sign of the result is incorrect.
    ///
    /// Flags affected: C, Z, V, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn sbc(&mut self, bus: &Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);

        // SBC is equivalent to ADC with the one's complement of the value
        // A - M - (1-C) = A + ~M + C
        let inverted = !value;
        let carry = if self.get_carry() { 1 } else { 0 };

        // Perform subtraction using addition with inverted value
        let sum = self.a as u16 + inverted as u16 + carry as u16;

        // Set carry flag if no borrow occurred (result >= 0)
        self.set_carry(sum > 0xFF);

        // Convert result to u8
        let result = sum as u8;

        // Set overflow flag
        // Overflow occurs when:
        // - The operands have different signs
        // - The result has a different sign than the accumulator
        let overflow = (self.a ^ result) & (inverted ^ result) & 0x80 != 0;
        self.set_overflow(overflow);

        // Update accumulator
        self.a = result;

        // Update zero and negative flags
        self.update_zero_and_negative_flags(result);
    }

    /// INC - Increment Memory
    ///
    /// Increments the value at the specified memory location by 1.
    /// Wraps around from 0xFF to 0x00.
    ///
    /// Flags affected: Z, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from and write to
    /// * `addr_result` - The addressing result containing the memory address
    pub fn inc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let result = value.wrapping_add(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - Decrement Memory
    ///
    /// Decrements the value at the specified memory location by 1.
    /// Wraps around from 0x00 to 0xFF.
    ///
    /// Flags affected: Z, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from and write to
    /// * `addr_result` - The addressing result containing the memory address
    pub fn dec(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let result = value.wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    // ========================================
    // Register Increment/Decrement Instructions
    // ========================================

    /// INX - Increment X Register
    ///
    /// Increments the X register by 1.
    /// Wraps around from 0xFF to 0x00.
    ///
    /// Flags affected: Z, N
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    ///
    /// Increments the Y register by 1.
    /// Wraps around from 0xFF to 0x00.
    ///
    /// Flags affected: Z, N
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    ///
    /// Decrements the X register by 1.
    /// Wraps around from 0x00 to 0xFF.
    ///
    /// Flags affected: Z, N
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    ///
    /// Decrements the Y register by 1.
    /// Wraps around from 0x00 to 0xFF.
    ///
    /// Flags affected: Z, N
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
