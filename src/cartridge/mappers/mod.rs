// Mapper abstraction.
//
// A tagged enum instead of `Box<dyn Mapper>`: each variant carries whatever
// state that mapper needs, and `map_prg`/`map_chr` are inherent methods that
// match on the variant. Mmc1/Cnrom exist as declared extension points that
// the cartridge loader refuses to construct today.

mod mapper0;

pub use mapper0::NromMapper;

/// Error constructing a mapper for a cartridge.
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper number is not supported.
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// A cartridge's address-translation strategy.
#[derive(Debug, Clone, Copy)]
pub enum Mapper {
    Nrom(NromMapper),
    /// MMC1 — declared, not yet implemented.
    Mmc1,
    /// CNROM — declared, not yet implemented.
    Cnrom,
}

impl Mapper {
    /// Build the mapper named by an iNES mapper id.
    ///
    /// # Errors
    /// Returns `MapperError::UnsupportedMapper` for any id this crate does
    /// not yet implement, including the declared-but-unimplemented Mmc1 (1)
    /// and Cnrom (3) extension points.
    pub fn construct(mapper_id: u8, prg_banks: u8) -> Result<Self, MapperError> {
        match mapper_id {
            0 => Ok(Mapper::Nrom(NromMapper::new(prg_banks))),
            other => Err(MapperError::UnsupportedMapper(other)),
        }
    }

    /// Translate a CPU address into a PRG-ROM byte index.
    pub fn map_prg(&self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.map_prg(addr),
            Mapper::Mmc1 | Mapper::Cnrom => None,
        }
    }

    /// Translate a PPU address into a CHR byte index.
    pub fn map_chr(&self, addr: u16) -> usize {
        match self {
            Mapper::Nrom(m) => m.map_chr(addr),
            Mapper::Mmc1 | Mapper::Cnrom => addr as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_zero_constructs_nrom() {
        let mapper = Mapper::construct(0, 1).unwrap();
        assert!(matches!(mapper, Mapper::Nrom(_)));
    }

    #[test]
    fn mmc1_is_declared_but_refused_at_construction() {
        let result = Mapper::construct(1, 1);
        assert!(matches!(result, Err(MapperError::UnsupportedMapper(1))));
    }

    #[test]
    fn cnrom_is_declared_but_refused_at_construction() {
        let result = Mapper::construct(3, 1);
        assert!(matches!(result, Err(MapperError::UnsupportedMapper(3))));
    }

    #[test]
    fn unknown_mapper_id_is_refused() {
        let result = Mapper::construct(99, 1);
        assert!(matches!(result, Err(MapperError::UnsupportedMapper(99))));
    }
}
