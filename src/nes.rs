//! Top-level NES core: CPU + PPU behind the bus, with the frame driver.
//!
//! The PPU does not tick dot by dot; instead `draw_frame` interleaves a fixed
//! CPU cycle budget with one rendered scanline at a time, then runs the
//! post-render line, raises vblank (and NMI when enabled), runs the ~20
//! scanline vblank period and clears vblank. See
//! [NESdev frame timing](https://www.nesdev.org/wiki/PPU_frame_timing): one
//! scanline is 341 PPU dots, a third of that in CPU cycles.

use crate::bus::NesBus;
use crate::cartridge::cartridge::Cartridge;
use crate::cpu::cpu::CPU;
use crate::debugger::Debugger;

/// CPU cycles charged per scanline (341 dots / 3).
pub const CYCLES_PER_SCANLINE: u64 = 113;
/// Visible scanlines per frame.
pub const VISIBLE_SCANLINES: u16 = 240;
/// Scanlines of vblank after the post-render line.
pub const VBLANK_SCANLINES: u64 = 20;

/// The emulator core: owns the CPU, which owns the bus, which owns PPU and cartridge.
pub struct Nes {
    pub cpu: CPU<NesBus>,
}

impl Nes {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            cpu: CPU::new(NesBus::new(cart)),
        }
    }

    /// Build a core with a debugger attached to the bus.
    pub fn with_debugger(cart: Cartridge, debugger: Box<dyn Debugger>) -> Self {
        Self {
            cpu: CPU::new(NesBus::with_debugger(cart, debugger)),
        }
    }

    /// Put CPU and PPU into their power-on state and load PC from the reset vector.
    pub fn reset(&mut self) {
        self.cpu.bus.ppu.reset();
        self.cpu.reset();
    }

    /// Execute one CPU instruction; returns its cycle cost.
    pub fn step(&mut self) -> u8 {
        self.cpu.step()
    }

    /// Run one full frame: 240 scanlines of interleaved CPU time and rendering,
    /// the post-render line, vblank entry with optional NMI, the vblank period,
    /// and vblank exit.
    pub fn draw_frame(&mut self) {
        self.cpu.bus.ppu.begin_frame();

        for line in 0..VISIBLE_SCANLINES {
            self.cpu.bus.ppu.scanline = line;
            self.cpu.run(CYCLES_PER_SCANLINE);
            self.cpu.bus.render_scanline();
        }

        // Post-render line.
        self.cpu.run(CYCLES_PER_SCANLINE + 1);

        self.cpu.bus.ppu.set_vblank();
        if self.cpu.bus.ppu.nmi_enabled() {
            log::trace!("NMI at vblank, scanline {}", VISIBLE_SCANLINES);
            self.cpu.nmi();
        }

        self.cpu.run(CYCLES_PER_SCANLINE * VBLANK_SCANLINES);

        self.cpu.bus.ppu.clear_vblank();
    }

    /// The most recently drawn frame: 256×240 packed RGBA, alpha always 255.
    pub fn last_frame(&self) -> &[u8] {
        self.cpu.bus.ppu.frame()
    }
}
