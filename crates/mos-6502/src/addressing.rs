//! Addressing-mode operand resolution.
//!
//! Resolution happens once, during the timing step, and produces both the
//! operand value and the store target. The execution step only ever
//! consumes that snapshot: resolution side effects that matter for cycle
//! counting (page crossings) must never be recomputed differently.

use emu_core::Bus;

use crate::cpu::Mos6502;
use crate::error::CpuError;
use crate::opcodes::AddressMode;

/// Where a resolved instruction writes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// The accumulator itself.
    Accumulator,
    /// A bus address.
    Memory(u16),
    /// Read-only mode: storing is an illegal operation.
    None,
}

/// Sign-extend a branch offset byte to 16 bits.
pub(crate) const fn sign_extend(byte: u8) -> u16 {
    byte as i8 as i16 as u16
}

impl Mos6502 {
    /// Immediate byte: the byte after the op-code.
    pub(crate) fn imm_byte<B: Bus>(&self, bus: &mut B) -> Result<u8, CpuError> {
        Ok(bus.read(self.regs.pc.wrapping_add(1))?)
    }

    /// Immediate word: little-endian in the two bytes after the op-code.
    pub(crate) fn imm_word<B: Bus>(&self, bus: &mut B) -> Result<u16, CpuError> {
        let lo = bus.read(self.regs.pc.wrapping_add(1))?;
        let hi = bus.read(self.regs.pc.wrapping_add(2))?;
        Ok(u16::from(lo) | (u16::from(hi) << 8))
    }

    /// Little-endian word at an arbitrary address.
    pub(crate) fn read_word<B: Bus>(&self, bus: &mut B, address: u16) -> Result<u16, CpuError> {
        let lo = bus.read(address)?;
        let hi = bus.read(address.wrapping_add(1))?;
        Ok(u16::from(lo) | (u16::from(hi) << 8))
    }

    /// Resolve the operand value and store target for the given mode.
    pub(crate) fn resolve_operand<B: Bus>(
        &self,
        mode: AddressMode,
        bus: &mut B,
    ) -> Result<(u16, Target), CpuError> {
        match mode {
            AddressMode::Accumulator => Ok((u16::from(self.regs.a), Target::Accumulator)),

            AddressMode::Absolute => {
                let addr = self.imm_word(bus)?;
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }
            AddressMode::AbsoluteX => {
                let addr = self.imm_word(bus)?.wrapping_add(u16::from(self.regs.x));
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }
            AddressMode::AbsoluteY => {
                let addr = self.imm_word(bus)?.wrapping_add(u16::from(self.regs.y));
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }

            AddressMode::Immediate => Ok((u16::from(self.imm_byte(bus)?), Target::None)),

            AddressMode::Implied => Ok((0, Target::None)),

            // The immediate word is a pointer to the 16-bit operand.
            AddressMode::Indirect => {
                let pointer = self.imm_word(bus)?;
                Ok((self.read_word(bus, pointer)?, Target::None))
            }

            // Zero-page pointer plus X, wrapping within the zero page; the
            // word there is the effective address.
            AddressMode::XIndirect => {
                let pointer = self.imm_byte(bus)?.wrapping_add(self.regs.x);
                let addr = self.read_word(bus, u16::from(pointer))?;
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }

            // Y is added after dereferencing, with no zero-page wrap on
            // the addition.
            AddressMode::IndirectY => {
                let ptr = u16::from(self.imm_byte(bus)?);
                let base = self.read_word(bus, ptr)?;
                let addr = base.wrapping_add(u16::from(self.regs.y));
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }

            AddressMode::Relative => {
                Ok((sign_extend(self.imm_byte(bus)?), Target::None))
            }

            AddressMode::ZeroPage => {
                let addr = u16::from(self.imm_byte(bus)?);
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }
            AddressMode::ZeroPageX => {
                let addr = u16::from(self.imm_byte(bus)?.wrapping_add(self.regs.x));
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }
            AddressMode::ZeroPageY => {
                let addr = u16::from(self.imm_byte(bus)?.wrapping_add(self.regs.y));
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }

            // One level of indirection through the zero-page word.
            AddressMode::ZeroPageIndirect => {
                let ptr = u16::from(self.imm_byte(bus)?);
                let addr = self.read_word(bus, ptr)?;
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }

            // Same as zero page; the bit-test-and-branch handler fetches
            // its relative offset separately.
            AddressMode::BranchExt => {
                let addr = u16::from(self.imm_byte(bus)?);
                Ok((u16::from(bus.read(addr)?), Target::Memory(addr)))
            }
        }
    }

    /// Write a result through the resolved store target.
    pub(crate) fn store_operand<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: AddressMode,
        target: Target,
        value: u8,
    ) -> Result<(), CpuError> {
        match target {
            Target::Accumulator => {
                self.regs.a = value;
                Ok(())
            }
            Target::Memory(addr) => {
                bus.write(addr, value)?;
                Ok(())
            }
            Target::None => Err(CpuError::IllegalAddressingMode(mode)),
        }
    }
}
