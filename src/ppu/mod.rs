//! PPU (Picture Processing Unit) emulation for the NES.
//!
//! See [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers),
//! [PPU scrolling](https://www.nesdev.org/wiki/PPU_scrolling). Scanline renderer: the frame
//! driver interleaves CPU time with one rendered scanline at a time, then signals vblank
//! and the optional NMI. Output is a 256×240 RGBA framebuffer plus an info plane used
//! for sprite priority and sprite-zero hit detection.

pub mod oam;
pub mod palette;
pub mod ppu;
