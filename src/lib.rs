// NES emulator core library.
//
// A cycle-driven 6502 CPU interpreter, memory bus, iNES cartridge loader,
// and the CPU-visible slice of the PPU register interface. Audio synthesis,
// controller polling, and video presentation live outside this crate; see
// `bus` for the stubbed dispatch slots they would occupy.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod ppu;
pub mod ram;
pub mod register;

pub use bus::{Bus, MemoryMappedDevice};
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, Mirroring};
pub use cpu::Cpu;
pub use debug::{
    disassemble_count, disassemble_instruction, disassemble_range, DisassembledInstruction,
    LogLevel, Logger, TraceEntry,
};
pub use ppu::Ppu;
pub use ram::Ram;
pub use register::Register;
