// Load and Store instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Load Instructions
    // ========================================
    // Load instructions read a value from memory into a register
    // and update the Zero (Z) and Negative (N) flags.

    /// LDA - Load Accumulator
    ///
    /// Loads a byte from memory into the accumulator (A register).
    /// Updates Zero and Negative flags based on the loaded value.
    ///
    /// Flags affected: Z, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn lda(&mut self, bus: &Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDX - Load X Register
    ///
    /// Loads a byte from memory into the X register.
    /// Updates Zero and Negative flags based on the loaded value.
    ///
    /// Flags affected: Z, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn ldx(&mut self, bus: &Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDY - Load Y Register
    ///
    /// Loads a byte from memory into the Y register.
    /// Updates Zero and Negative flags based on the loaded value.
    ///
    /// Flags affected: Z, N
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn ldy(&mut self, bus: &Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.y = value;
        self.update_zero_and_negative_flags(value);
    }

    // ========================================
    // Store Instructions
    // ========================================
    // Store instructions write a register value to memory.
    // They do NOT affect any processor flags.

    /// STA - Store Accumulator
    ///
    /// Stores the value from the accumulator (A register) into memory.
    /// Does not affect any flags.
    ///
    /// Flags affected: None
    ///
    /// # Arguments
    /// * `bus` - The memory bus to write to
    /// * `addr_result` - The addressing result containing the memory address
    pub fn sta(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a);
    }

    /// STX - Store X Register
    ///
    /// Stores the value from the X register into memory.
    /// Does not affect any flags.
    ///
    /// Flags affected: None
    ///
    /// # Arguments
    /// * `bus` - The memory bus to write to
    /// * `addr_result` - The addressing result containing the memory address
    pub fn stx(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.x);
    }

    /// STY - Store Y Register
    ///
    /// Stores the value from the Y register into memory.
    /// Does not affect any flags.
    ///
    /// Flags affected: None
    ///
    /// # Arguments
    /// * `bus` - The memory bus to write to
    /// * `addr_result` - The addressing result containing the memory address
    pub fn sty(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.y);
    }
}
