//! Core traits and types for 6502-family emulation.
//!
//! The CPU core never touches memory directly: every access goes through
//! the [`Bus`] trait, and unmapped addresses surface as [`BusError`].
//! Driver code runs the CPU through the two-phase [`Cpu`] protocol.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, BusError, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
