// 6502 CPU core.
//
// The CPU is driven one clock tick at a time through [`Cpu::cycle`]. Fetch,
// address-mode resolution, and execution of an instruction all happen
// atomically on the tick where `remaining_cycles` reaches zero; every other
// tick just counts down. This mirrors how the bus drives the whole machine
// one oscillator tick at a time instead of "run one instruction" stepping.

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use crate::bus::Bus;
use crate::register::Register;

/// Status register flag bitmasks.
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// Interrupt vector addresses.
pub mod vectors {
    pub const NMI: u16 = 0xFFFA;
    pub const RESET: u16 = 0xFFFC;
    pub const IRQ: u16 = 0xFFFE;
}

/// MOS 6502 register file and cycle-accounting state.
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Register<u8>,

    /// Cycles left to burn before the next instruction may be decoded.
    pub remaining_cycles: u8,
    /// Running total of cycles ticked since power-on (wraps, never reset by
    /// a soft reset — see DESIGN.md for why this implementation diverges
    /// from real hardware on that point).
    pub total_cycles: u64,

    /// Opcode byte of the instruction currently (or most recently) decoded.
    pub current_opcode: u8,
    /// Effective address (or accumulator sentinel / resolved branch target)
    /// produced by the last addressing-mode resolution.
    pub current_address: u16,
    /// Addressing mode that produced `current_address`.
    pub current_mode: addressing::AddressingMode,
}

impl Cpu {
    pub fn new() -> Self {
        let mut status = Register::new(0u8);
        status.set(flags::UNUSED);
        status.set(flags::INTERRUPT_DISABLE);

        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status,
            remaining_cycles: 0,
            total_cycles: 0,
            current_opcode: 0,
            current_address: 0,
            current_mode: addressing::AddressingMode::Implied,
        }
    }

    /// The decode-table entry for the instruction currently (or most
    /// recently) decoded.
    pub fn current_instruction(&self) -> &'static opcodes::OpcodeInfo {
        &opcodes::OPCODE_TABLE[self.current_opcode as usize]
    }

    /// Reset the CPU as if the console's reset line had been pulsed.
    ///
    /// Loads PC from the reset vector and consumes 7 cycles before the
    /// first post-reset instruction can be decoded.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;

        self.status.set_value(0);
        self.status.set(flags::UNUSED);
        self.status.set(flags::INTERRUPT_DISABLE);

        let lo = bus.read(vectors::RESET) as u16;
        let hi = bus.read(vectors::RESET.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        self.total_cycles = 0;
        self.remaining_cycles = 7;
    }

    // ========================================
    // Flag accessors
    // ========================================

    pub fn get_flag(&self, flag: u8) -> bool {
        self.status.is_set(flag)
    }

    pub fn set_flag(&mut self, flag: u8) {
        self.status.set(flag);
    }

    pub fn clear_flag(&mut self, flag: u8) {
        self.status.clear(flag);
    }

    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        self.status.set_if(flag, condition);
    }

    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    pub fn get_break(&self) -> bool {
        self.get_flag(flags::BREAK)
    }
    pub fn set_break(&mut self, value: bool) {
        self.update_flag(flags::BREAK, value);
    }

    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative from a freshly-computed byte value, the
    /// standard post-ALU/post-load flag update every 6502 accumulator and
    /// index-register instruction performs.
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative(value & 0x80 != 0);
    }

    // ========================================
    // Interrupts
    // ========================================

    /// Non-maskable interrupt: always taken, regardless of Interrupt-Disable.
    pub fn nmi(&mut self, bus: &mut Bus) {
        self.stack_push_u16(bus, self.pc);
        let mut pushed = self.status;
        pushed.clear(flags::BREAK);
        pushed.set(flags::UNUSED);
        self.stack_push(bus, pushed.get_value());
        self.set_interrupt_disable(true);

        let lo = bus.read(vectors::NMI) as u16;
        let hi = bus.read(vectors::NMI.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;
        self.remaining_cycles = 7;
    }

    /// Maskable interrupt request; ignored while Interrupt-Disable is set.
    pub fn irq(&mut self, bus: &mut Bus) {
        if self.get_interrupt_disable() {
            return;
        }

        self.stack_push_u16(bus, self.pc);
        let mut pushed = self.status;
        pushed.clear(flags::BREAK);
        pushed.set(flags::UNUSED);
        self.stack_push(bus, pushed.get_value());
        self.set_interrupt_disable(true);

        let lo = bus.read(vectors::IRQ) as u16;
        let hi = bus.read(vectors::IRQ.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;
        self.remaining_cycles = 7;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
