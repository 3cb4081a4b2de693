//! Fatal error conditions surfaced by the processor core.
//!
//! All of these are local-invariant violations, not recoverable states.
//! The core never retries or substitutes default values; doing so would
//! mask emulation-accuracy bugs.

use std::error::Error;
use std::fmt;

use emu_core::BusError;

use crate::opcodes::AddressMode;

/// A fatal fault raised by the instruction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// A store was attempted against a read-only addressing mode.
    /// Always a table-construction or dispatch error.
    IllegalAddressingMode(AddressMode),
    /// Decimal-mode arithmetic was given an operand whose nibbles are not
    /// decimal digits.
    InvalidBcd(u8),
    /// A jump decoded with an addressing mode outside the set JMP supports
    /// (absolute, indirect, absolute,X).
    UnsupportedJumpMode(AddressMode),
    /// A bus access hit an address with no device mapped.
    Bus(BusError),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::IllegalAddressingMode(mode) => {
                write!(f, "address mode {mode:?} is not valid for a store")
            }
            CpuError::InvalidBcd(value) => {
                write!(f, "invalid BCD operand ${value:02X}")
            }
            CpuError::UnsupportedJumpMode(mode) => {
                write!(f, "address mode {mode:?} is not valid for JMP")
            }
            CpuError::Bus(err) => err.fmt(f),
        }
    }
}

impl Error for CpuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CpuError::Bus(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BusError> for CpuError {
    fn from(err: BusError) -> Self {
        CpuError::Bus(err)
    }
}
