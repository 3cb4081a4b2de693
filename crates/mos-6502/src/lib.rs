//! MOS 6502/65C02 CPU emulator.
//!
//! Timing-first emulation: each instruction is decoded once by a timing
//! step that reports its cycle cost (page crossings, variant deltas, and
//! interrupt entry included), and the paired execution step then applies
//! the decoded snapshot. The two steps share state and must alternate.
//!
//! Both the NMOS 6502 and the CMOS 65C02 (with the Rockwell/WDC bit
//! instructions) are supported; the variant is chosen at construction.

mod addressing;
mod cpu;
mod error;
pub mod flags;
mod opcodes;
mod registers;

pub use cpu::{IRQ_VECTOR, Mos6502, NMI_VECTOR, RESET_VECTOR, Variant};
pub use error::CpuError;
pub use flags::Status;
pub use opcodes::{AddressMode, Mnemonic, OPCODES, OpcodeRecord};
pub use registers::Registers;
