//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper and mirroring),
//! then PRG ROM, then CHR ROM. CHR may be ROM or RAM depending on the board. The
//! [Mapper](https://www.nesdev.org/wiki/Mapper) implements CPU PRG ($8000–$FFFF) and PPU CHR
//! ($0000–$1FFF) address decoding.

use std::fmt;
use std::fs;

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::mapper::Mirroring;

const INES_MAGIC: [u8; 4] = [b'N', b'E', b'S', 0x1A];
const HEADER_LEN: usize = 16;

/// Failures while loading a cartridge image.
#[derive(Debug)]
pub enum CartridgeError {
    Io(std::io::Error),
    /// The first four bytes are not "NES\x1A".
    BadMagic,
    /// The image is shorter than the header's PRG/CHR sizes claim.
    Truncated,
    UnsupportedMapper(u8),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::Io(err) => write!(f, "failed to read ROM: {}", err),
            CartridgeError::BadMagic => write!(f, "not an iNES image (bad magic)"),
            CartridgeError::Truncated => write!(f, "iNES image truncated"),
            CartridgeError::UnsupportedMapper(id) => write!(f, "unsupported mapper {}", id),
        }
    }
}

impl std::error::Error for CartridgeError {}

impl From<std::io::Error> for CartridgeError {
    fn from(err: std::io::Error) -> Self {
        CartridgeError::Io(err)
    }
}

/// Cartridge: holds the mapper that implements PRG/CHR read/write and nametable
/// mirroring. The CPU reads PRG via the bus at $4020–$FFFF; the PPU reads CHR at
/// $0000–$1FFF (pattern tables).
pub struct Cartridge {
    pub mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Load a cartridge from an iNES file on disk.
    pub fn load(path: &str) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        let cart = Self::from_bytes(&data)?;
        log::info!("loaded {}", path);
        Ok(cart)
    }

    /// Build a cartridge from an iNES image already in memory. Header bytes 4–5
    /// give PRG/CHR sizes; bytes 6–7 give mirroring and the mapper number
    /// (low nibble of 6 | high nibble of 7).
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN || data[0..4] != INES_MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_rom_size = data[4] as usize * 16 * 1024; // PRG ROM size in 16 KiB units
        let chr_rom_size = data[5] as usize * 8 * 1024; // CHR ROM size in 8 KiB units (0 → 8 KiB RAM)

        let prg_start = HEADER_LEN;
        let prg_end = prg_start + prg_rom_size;
        let chr_end = prg_end + chr_rom_size;
        if data.len() < chr_end {
            return Err(CartridgeError::Truncated);
        }

        let prg_rom = data[prg_start..prg_end].to_vec();
        let chr_writable = chr_rom_size == 0;
        let chr = if chr_writable {
            vec![0; 8 * 1024] // No CHR ROM → 8 KiB CHR RAM
        } else {
            data[prg_end..chr_end].to_vec()
        };

        // Mirroring from iNES byte 6: bit 3 = four-screen, else bit 0 picks
        // vertical (1) or horizontal (0).
        let mirroring = if data[6] & 0x08 != 0 {
            Mirroring::FourScreen
        } else if data[6] & 1 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mapper_id = (data[6] >> 4) | (data[7] & 0xF0);
        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Mapper0::new(prg_rom, chr, chr_writable, mirroring)),
            id => return Err(CartridgeError::UnsupportedMapper(id)),
        };

        log::info!(
            "iNES image: {} KiB PRG, {} KiB CHR{}, mapper {}, {:?} mirroring",
            prg_rom_size / 1024,
            if chr_writable { 8 } else { chr_rom_size / 1024 },
            if chr_writable { " RAM" } else { "" },
            mapper_id,
            mirroring
        );

        Ok(Self { mapper })
    }

    /// Read: PRG space ($4020–$FFFF) or CHR ($0000–$1FFF) depending on addr.
    pub fn read(&self, addr: u16) -> u8 {
        self.mapper.read(addr)
    }

    /// Write: CHR RAM (if present) or mapper registers. PRG ROM is read-only.
    pub fn write(&mut self, addr: u16, data: u8) {
        self.mapper.write(addr, data);
    }

    /// Current nametable mirroring, queried by the PPU on every nametable access.
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ines_image(prg_banks: u8, chr_banks: u8, flags6: u8) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(&INES_MAGIC);
        data[4] = prg_banks;
        data[5] = chr_banks;
        data[6] = flags6;
        data.extend(vec![0u8; prg_banks as usize * 16 * 1024]);
        data.extend(vec![0u8; chr_banks as usize * 8 * 1024]);
        data
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(
            Cartridge::from_bytes(&[0u8; 32]),
            Err(CartridgeError::BadMagic)
        ));
    }

    #[test]
    fn rejects_truncated_image() {
        let mut data = ines_image(1, 1, 0);
        data.truncate(HEADER_LEN + 100);
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(CartridgeError::Truncated)
        ));
    }

    #[test]
    fn rejects_unknown_mapper() {
        let data = ines_image(1, 1, 0x40); // mapper 4 in the low nibble position
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(CartridgeError::UnsupportedMapper(4))
        ));
    }

    #[test]
    fn parses_mirroring_bit() {
        let cart = Cartridge::from_bytes(&ines_image(1, 1, 0x01)).unwrap();
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        let cart = Cartridge::from_bytes(&ines_image(1, 1, 0x00)).unwrap();
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn four_screen_bit_wins_over_the_mirroring_bit() {
        let cart = Cartridge::from_bytes(&ines_image(1, 1, 0x09)).unwrap();
        assert_eq!(cart.mirroring(), Mirroring::FourScreen);
    }

    #[test]
    fn sixteen_kib_prg_is_mirrored() {
        let mut data = ines_image(1, 1, 0);
        data[HEADER_LEN] = 0xAB; // first PRG byte
        let cart = Cartridge::from_bytes(&data).unwrap();
        assert_eq!(cart.read(0x8000), 0xAB);
        assert_eq!(cart.read(0xC000), 0xAB);
    }

    #[test]
    fn chr_ram_is_writable_chr_rom_is_not() {
        let mut ram_cart = Cartridge::from_bytes(&ines_image(1, 0, 0)).unwrap();
        ram_cart.write(0x0010, 0x55);
        assert_eq!(ram_cart.read(0x0010), 0x55);

        let mut rom_cart = Cartridge::from_bytes(&ines_image(1, 1, 0)).unwrap();
        rom_cart.write(0x0010, 0x55);
        assert_eq!(rom_cart.read(0x0010), 0x00);
    }
}
