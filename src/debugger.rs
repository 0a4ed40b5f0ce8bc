//! Host debugger hooks.
//!
//! The interpreter asks the debugger before every instruction fetch whether it may
//! continue at the current PC, and the bus reports every PPU register access. Both
//! hooks default to doing nothing, so an unattached core runs at full speed.

/// Direction of a reported register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// One PPU register access as seen from the CPU bus.
#[derive(Debug, Clone, Copy)]
pub struct RegisterAccess {
    /// CPU-side address of the access ($2000–$3FFF or $4014).
    pub addr: u16,
    /// Value read from or written to the register.
    pub value: u8,
    pub kind: AccessKind,
}

/// Debugger interface, injected into the bus at construction.
pub trait Debugger {
    /// May execution continue at `pc`? Returning `false` stops the current run loop.
    fn may_continue(&mut self, _pc: u16) -> bool {
        true
    }

    /// Called for every PPU register read or write.
    fn on_register(&mut self, _access: RegisterAccess) {}
}

/// Default debugger: never breaks, ignores all accesses.
pub struct NullDebugger;

impl Debugger for NullDebugger {}
