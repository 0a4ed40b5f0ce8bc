//! Velora: the core of an NES (Nintendo Entertainment System) emulator.
//!
//! Implements the CPU/PPU pair of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the 6502-derived
//! 2A03 interpreter, the 2C02 PPU with its loopy v/t/x scroll registers, and the
//! memory map that lets them share an address space.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM mirroring,
//!   PPU register dispatch, [OAM DMA](https://www.nesdev.org/wiki/PPU_registers#OAMDMA) stall
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: documented opcodes, table-driven
//!   decode, cycle accounting, [NMI](https://www.nesdev.org/wiki/NMI)/IRQ/BRK
//! - **debugger** – host hooks for single-stepping and register tracing
//! - **nes** – frame driver: scanline-interleaved CPU execution and VBlank timing
//! - **ppu** – [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers),
//!   [PPU scrolling](https://www.nesdev.org/wiki/PPU_scrolling), OAM, nametables, 256×240 RGBA output
//!
//! The crate never opens a window itself; `Nes::last_frame` publishes a packed RGBA
//! buffer for an external presenter (the demo binary uses minifb).

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debugger;
pub mod nes;
pub mod ppu;
