//! CPU memory map.
//!
//! The NES CPU address space ([CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map)):
//! $0000–$07FF 2 KiB RAM, mirrored through $1FFF; $2000–$2007 PPU registers, mirrored
//! through $3FFF; $4014 OAM DMA; $4000–$401F APU/controller I/O (attachable);
//! $4020–$FFFF cartridge. Unmapped reads return 0, unmapped writes are dropped.

use crate::cartridge::cartridge::Cartridge;
use crate::debugger::{AccessKind, Debugger, NullDebugger, RegisterAccess};
use crate::ppu::ppu::PPU;

/// CPU cycles the OAM DMA transfer steals from the CPU.
pub const DMA_STALL_CYCLES: u64 = 512;

/// Memory and I/O access as seen from the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Copy the inclusive range `start..=end` into `out`.
    fn read_block(&mut self, start: u16, end: u16, out: &mut [u8]) {
        for (i, addr) in (start..=end).enumerate() {
            out[i] = self.read(addr);
        }
    }

    /// Cycles a DMA transfer has stalled the CPU for since the last call.
    fn take_stall(&mut self) -> u64 {
        0
    }

    /// Debugger gate: may the CPU fetch at `pc`?
    fn may_continue(&mut self, _pc: u16) -> bool {
        true
    }
}

/// External device claiming the $4000–$401F I/O range (controllers, APU).
pub trait IoDevice {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// The NES bus: RAM, the PPU register window, the DMA port and the cartridge.
pub struct NesBus {
    pub ram: [u8; 2048],
    pub ppu: PPU,
    pub cart: Cartridge,
    pub io: Option<Box<dyn IoDevice>>,
    pub debugger: Box<dyn Debugger>,
    stall: u64,
}

impl NesBus {
    pub fn new(cart: Cartridge) -> Self {
        Self::with_debugger(cart, Box::new(NullDebugger))
    }

    pub fn with_debugger(cart: Cartridge, debugger: Box<dyn Debugger>) -> Self {
        Self {
            ram: [0; 2048],
            ppu: PPU::new(),
            cart,
            io: None,
            debugger,
            stall: 0,
        }
    }

    /// Attach a controller/APU implementation to $4000–$401F.
    pub fn attach_io(&mut self, device: Box<dyn IoDevice>) {
        self.io = Some(device);
    }

    /// Draw the PPU's current scanline (the PPU needs the cartridge for CHR).
    pub fn render_scanline(&mut self) {
        self.ppu.render_scanline(&mut self.cart);
    }

    /// $2000–$3FFF: the eight PPU registers, mirrored every 8 bytes.
    fn ppu_register_read(&mut self, addr: u16) -> u8 {
        let value = match addr & 0x0007 {
            2 => self.ppu.read_status(),
            4 => self.ppu.oam.read_data(),
            7 => self.ppu.read_data(&mut self.cart),
            _ => 0, // write-only registers
        };
        self.debugger.on_register(RegisterAccess {
            addr,
            value,
            kind: AccessKind::Read,
        });
        value
    }

    fn ppu_register_write(&mut self, addr: u16, value: u8) {
        self.debugger.on_register(RegisterAccess {
            addr,
            value,
            kind: AccessKind::Write,
        });
        match addr & 0x0007 {
            0 => self.ppu.write_ctrl(value),
            1 => self.ppu.write_mask(value),
            3 => self.ppu.oam.set_addr(value),
            4 => self.ppu.oam.write_data(value),
            5 => self.ppu.write_scroll(value),
            6 => self.ppu.write_addr(value),
            7 => self.ppu.write_data(&mut self.cart, value),
            _ => {} // $2002 is read-only
        }
    }

    /// $4014: copy one CPU page into OAM and stall the CPU for 512 cycles.
    fn oam_dma(&mut self, page: u8) {
        self.debugger.on_register(RegisterAccess {
            addr: 0x4014,
            value: page,
            kind: AccessKind::Write,
        });
        let start = (page as u16) << 8;
        let mut buffer = [0u8; 256];
        self.read_block(start, start | 0x00FF, &mut buffer);
        self.ppu.oam.load(&buffer);
        self.stall += DMA_STALL_CYCLES;
        log::debug!("OAM DMA from ${:02X}00", page);
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu_register_read(addr),
            0x4000..=0x401F => match &mut self.io {
                Some(device) => device.read(addr),
                None => 0,
            },
            0x4020..=0xFFFF => self.cart.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu_register_write(addr, data),
            0x4014 => self.oam_dma(data),
            0x4000..=0x401F => {
                if let Some(device) = &mut self.io {
                    device.write(addr, data);
                }
            }
            0x4020..=0xFFFF => self.cart.write(addr, data),
        }
    }

    fn take_stall(&mut self) -> u64 {
        std::mem::take(&mut self.stall)
    }

    fn may_continue(&mut self, pc: u16) -> bool {
        self.debugger.may_continue(pc)
    }
}
