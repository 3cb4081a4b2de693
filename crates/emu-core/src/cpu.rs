//! CPU core trait.

use crate::Bus;

/// A CPU core driven by the two-phase timing/execution protocol.
///
/// Driver code alternates one timing step (which pre-decodes the next
/// instruction and returns its cycle cost, so an external clock can be
/// advanced before the instruction's effects become visible) with one
/// execution step (which applies the decoded instruction to registers,
/// flags, and memory). The two steps share the decoded instruction;
/// interleaving or skipping steps is outside the contract.
///
/// The bus is passed in, not owned, so it can be shared with other
/// components between instruction boundaries.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// The error type surfaced by fallible operations.
    type Error;

    /// Decode the next instruction (arbitrating any pending interrupt)
    /// and return the number of clock cycles it will consume.
    fn step_timing<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Self::Error>;

    /// Apply the instruction decoded by the preceding timing step.
    fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Latch a maskable interrupt request. Serviced at the next
    /// instruction boundary once interrupts are enabled.
    fn interrupt(&mut self);

    /// Latch a non-maskable interrupt request.
    fn nmi(&mut self);

    /// Re-read the power-on vector into the program counter and return
    /// the CPU to its post-reset interrupt state. Other registers are
    /// left for the caller to define.
    fn boot<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error>;
}
