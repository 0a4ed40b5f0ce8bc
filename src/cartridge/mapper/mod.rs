//! NES mappers for PRG/CHR memory mapping and nametable mirroring.
//!
//! - **Mapper 0** ([NROM](https://www.nesdev.org/wiki/NROM)): no bank switching.
//!
//! Mirroring controls how the PPU maps the four logical nametables ($2000, $2400, $2800, $2C00)
//! onto physical nametable RAM. See [PPU nametables](https://www.nesdev.org/wiki/PPU_nametables#Nametable_mirroring).

/// Nametable mirroring, in NESdev terms: Horizontal = $2000/$2400 share one table and
/// $2800/$2C00 the other (vertical arrangement); Vertical = $2000/$2800 share and
/// $2400/$2C00 share (horizontal arrangement).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    /// All four logical nametables map to the first physical table.
    OneScreenLower,
    /// All four logical nametables map to the second physical table.
    OneScreenUpper,
    /// Four physical tables, no sharing (cartridge supplies the extra RAM).
    FourScreen,
}

impl Mirroring {
    /// Map a logical nametable index (0–3, from address bits 10–11) to the
    /// physical table the PPU should access.
    pub fn physical_index(self, logical: usize) -> usize {
        match self {
            Mirroring::Horizontal => logical >> 1,
            Mirroring::Vertical => logical & 1,
            Mirroring::OneScreenLower => 0,
            Mirroring::OneScreenUpper => 1,
            Mirroring::FourScreen => logical,
        }
    }
}

pub mod mapper;

pub mod mapper0;

#[cfg(test)]
mod tests {
    use super::Mirroring;

    #[test]
    fn horizontal_pairs_tables_top_and_bottom() {
        let map: Vec<usize> = (0..4).map(|l| Mirroring::Horizontal.physical_index(l)).collect();
        assert_eq!(map, [0, 0, 1, 1]);
    }

    #[test]
    fn vertical_pairs_tables_left_and_right() {
        let map: Vec<usize> = (0..4).map(|l| Mirroring::Vertical.physical_index(l)).collect();
        assert_eq!(map, [0, 1, 0, 1]);
    }

    #[test]
    fn one_screen_collapses_all_four_tables() {
        for logical in 0..4 {
            assert_eq!(Mirroring::OneScreenLower.physical_index(logical), 0);
            assert_eq!(Mirroring::OneScreenUpper.physical_index(logical), 1);
        }
    }

    #[test]
    fn four_screen_keeps_tables_distinct() {
        for logical in 0..4 {
            assert_eq!(Mirroring::FourScreen.physical_index(logical), logical);
        }
    }
}
