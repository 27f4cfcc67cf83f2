use super::cartridge::LoadError;

pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Address-translation policy for the cartridge. Mappers are pure: they turn
/// a bus address into an offset into the PRG or CHR data and hold no state of
/// their own (true for NROM; bank-switching mappers would grow registers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapper {
    Nrom,
}

impl Mapper {
    pub fn from_id(id: u8) -> Result<Self, LoadError> {
        match id {
            0 => Ok(Mapper::Nrom),
            id => Err(LoadError::UnsupportedMapper(id)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mapper::Nrom => "NROM",
        }
    }

    /// Map a CPU address in 0x8000-0xFFFF to a PRG-ROM offset. A single
    /// 16 KiB bank mirrors 0x8000-0xBFFF into 0xC000-0xFFFF.
    pub fn prg_map(self, bank_count: usize, addr: u16) -> usize {
        match self {
            Mapper::Nrom => {
                let window = if bank_count <= 1 {
                    PRG_BANK_SIZE
                } else {
                    2 * PRG_BANK_SIZE
                };
                addr as usize % window
            }
        }
    }

    /// Map a PPU address in 0x0000-0x1FFF to a CHR offset.
    pub fn chr_map(self, _bank_count: usize, addr: u16) -> usize {
        match self {
            Mapper::Nrom => addr as usize % CHR_BANK_SIZE,
        }
    }
}
