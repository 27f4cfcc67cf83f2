use thiserror::Error;

use super::mapper::{CHR_BANK_SIZE, Mapper, Mirroring, PRG_BANK_SIZE};

const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("not an iNES image (bad header magic)")]
    InvalidImage,
    #[error("iNES image ends before the data its header claims")]
    TruncatedImage,
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
}

/// A parsed iNES image. Immutable after load except for CHR-RAM writes.
#[derive(Debug, Clone)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    prg_banks: usize,
    chr_banks: usize,
    mapper: Mapper,
    mirroring: Mirroring,
}

impl Cartridge {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        if bytes.len() < HEADER_SIZE {
            return Err(LoadError::TruncatedImage);
        }
        if bytes[0..4] != INES_MAGIC {
            return Err(LoadError::InvalidImage);
        }

        let prg_banks = (bytes[4] as usize).max(1);
        let chr_banks = bytes[5] as usize;
        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);
        let mapper = Mapper::from_id(mapper_id)?;
        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut cursor = HEADER_SIZE;
        if flags6 & 0x04 != 0 {
            cursor += TRAINER_SIZE;
        }

        let prg_size = prg_banks * PRG_BANK_SIZE;
        if bytes.len() < cursor + prg_size {
            return Err(LoadError::TruncatedImage);
        }
        let prg_rom = bytes[cursor..cursor + prg_size].to_vec();
        cursor += prg_size;

        let (chr, chr_is_ram) = if chr_banks == 0 {
            (vec![0; CHR_BANK_SIZE], true)
        } else {
            let chr_size = chr_banks * CHR_BANK_SIZE;
            if bytes.len() < cursor + chr_size {
                return Err(LoadError::TruncatedImage);
            }
            (bytes[cursor..cursor + chr_size].to_vec(), false)
        };

        Ok(Self {
            prg_rom,
            chr,
            chr_is_ram,
            prg_banks,
            chr_banks,
            mapper,
            mirroring,
        })
    }

    pub fn read_prg(&self, addr: u16) -> u8 {
        let offset = self.mapper.prg_map(self.prg_banks, addr);
        self.prg_rom[offset % self.prg_rom.len()]
    }

    pub fn read_chr(&self, addr: u16) -> u8 {
        let offset = self.mapper.chr_map(self.chr_banks, addr);
        self.chr[offset % self.chr.len()]
    }

    pub fn write_chr(&mut self, addr: u16, value: u8) {
        if self.chr_is_ram {
            let offset = self.mapper.chr_map(self.chr_banks, addr) % self.chr.len();
            self.chr[offset] = value;
        }
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn mapper(&self) -> Mapper {
        self.mapper
    }
}
