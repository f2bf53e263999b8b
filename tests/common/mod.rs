// Shared test-ROM-building helpers for the integration test crate.
//
// These build minimal iNES images entirely in memory (no fixture files on
// disk) so cartridge/bus/CPU integration tests can control the reset vector
// and PRG contents precisely.

#![allow(dead_code)]

use nes_rs::bus::Bus;
use nes_rs::cartridge::Cartridge;

const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Build a single-bank NROM cartridge whose reset vector points at
/// `reset_vector`, leaving NMI/IRQ vectors at 0x0000 (unused by these tests).
pub fn nrom_cartridge_with_reset_vector(reset_vector: u16) -> Cartridge {
    nrom_cartridge_with_vectors(reset_vector, 0x0000, 0x0000)
}

/// Build a single-bank NROM cartridge with all three interrupt vectors set
/// explicitly.
pub fn nrom_cartridge_with_vectors(reset_vector: u16, nmi_vector: u16, irq_vector: u16) -> Cartridge {
    let mut prg = vec![0u8; PRG_BANK_SIZE];
    write_vector(&mut prg, PRG_BANK_SIZE - 6, nmi_vector);
    write_vector(&mut prg, PRG_BANK_SIZE - 4, reset_vector);
    write_vector(&mut prg, PRG_BANK_SIZE - 2, irq_vector);

    build_cartridge(1, 1, &prg, &vec![0u8; CHR_BANK_SIZE])
}

/// Build a single-bank (16 KiB) NROM cartridge with `prg_fill` written at
/// PRG offset 0, for testing the mirroring of `0x8000` and `0xC000` onto the
/// same bank.
pub fn single_bank_cartridge_with_fill(prg_fill: u8) -> Cartridge {
    let mut prg = vec![0u8; PRG_BANK_SIZE];
    prg[0] = prg_fill;
    build_cartridge(1, 1, &prg, &vec![0u8; CHR_BANK_SIZE])
}

fn write_vector(prg: &mut [u8], offset: usize, vector: u16) {
    prg[offset] = (vector & 0xFF) as u8;
    prg[offset + 1] = (vector >> 8) as u8;
}

fn build_cartridge(prg_banks: u8, chr_banks: u8, prg: &[u8], chr: &[u8]) -> Cartridge {
    let mut bytes = vec![0u8; 16];
    bytes[0..4].copy_from_slice(&INES_MAGIC);
    bytes[4] = prg_banks;
    bytes[5] = chr_banks;
    bytes.extend_from_slice(prg);
    bytes.extend_from_slice(chr);
    Cartridge::from_ines_bytes(&bytes).expect("synthetic test cartridge should parse")
}

/// Reset the bus and drain the 7 cycles real 6502 hardware burns before the
/// first post-reset instruction can be decoded. Tests call this, then take
/// `bus.cpu.total_cycles` as a baseline, so the cycle counts asserted below
/// reflect the instruction under test rather than the reset sequence.
pub fn settle_reset(bus: &mut Bus) {
    bus.reset();
    for _ in 0..7 {
        bus.cycle();
    }
}

/// Run exactly one instruction, assuming `bus.cpu.remaining_cycles == 0` on
/// entry (i.e. the CPU is parked at an instruction boundary).
pub fn run_one_instruction(bus: &mut Bus) {
    bus.cycle();
    while bus.cpu.remaining_cycles > 0 {
        bus.cycle();
    }
}
