//! 6502 CPU implementation.
//!
//! The engine runs the two-phase protocol: a timing step fetches and
//! decodes the next instruction (arbitrating pending interrupts) and
//! returns its cycle cost; the execution step then applies the decoded
//! snapshot to registers, flags, and memory. Driver code keeps the two in
//! lockstep.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::addressing::{Target, sign_extend};
use crate::error::CpuError;
use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::{AddressMode, Mnemonic, OPCODES, OpcodeRecord};
use crate::{Registers, Status};

/// Non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Power-on/reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Hardware interrupt vector, shared by IRQ and BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Fixed cost of entering an interrupt service routine.
const INTERRUPT_CYCLES: u32 = 6;

/// Processor variant.
///
/// Immutable after construction. The CMOS part changes a handful of cycle
/// counts, clears decimal mode on hardware interrupt entry, and adds the
/// 65C02 extension instructions (which execute as no-ops on NMOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The original NMOS 6502.
    Nmos,
    /// The CMOS 65C02 (Rockwell/WDC bit instructions included).
    Cmos,
}

/// Decoded-instruction snapshot shared by the timing and execution steps.
#[derive(Debug, Clone, Copy)]
struct Decoded {
    record: &'static OpcodeRecord,
    operand: u16,
    target: Target,
}

/// The MOS 6502 CPU.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,

    /// NMOS or CMOS behavior, fixed at construction.
    variant: Variant,

    /// Snapshot produced by the timing step, consumed by execution.
    decoded: Option<Decoded>,

    /// NMI edge latch.
    nmi_pending: bool,

    /// IRQ level latch.
    irq_pending: bool,

    /// Total cycles accounted (for diagnostics).
    total_cycles: u64,
}

impl Mos6502 {
    /// Create a CPU of the given variant in reset state.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            regs: Registers::new(),
            variant,
            decoded: None,
            nmi_pending: false,
            irq_pending: false,
            total_cycles: 0,
        }
    }

    /// The processor variant chosen at construction.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// True while a non-maskable interrupt is latched.
    #[must_use]
    pub const fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// True while a maskable interrupt is latched.
    #[must_use]
    pub const fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Latch a maskable interrupt request.
    pub fn interrupt(&mut self) {
        self.irq_pending = true;
    }

    /// Latch a non-maskable interrupt request.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Re-read the power-on vector into PC and force the post-reset
    /// interrupt state. Other registers keep their values; callers that
    /// need determinism set them explicitly.
    pub fn boot<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        self.regs.pc = self.read_word(bus, RESET_VECTOR)?;
        self.regs.p.set(I);
        self.nmi_pending = false;
        self.irq_pending = false;
        self.decoded = None;
        Ok(())
    }

    /// Load a program image onto the bus and point PC at its first byte.
    pub fn load_program<B: Bus>(
        &mut self,
        bus: &mut B,
        start: u16,
        program: &[u8],
    ) -> Result<(), CpuError> {
        bus.load(start, program)?;
        self.regs.pc = start;
        Ok(())
    }

    /// Format the instruction at PC without mutating any state.
    pub fn disassemble_next<B: Bus>(&self, bus: &mut B) -> Result<String, CpuError> {
        let record = &OPCODES[usize::from(bus.read(self.regs.pc)?)];
        let operand = if record.bytes == 3 {
            self.imm_word(bus)?
        } else {
            u16::from(self.imm_byte(bus)?)
        };
        Ok(record.disassemble(operand))
    }

    /// Decode the next instruction and return its cycle cost.
    ///
    /// A latched NMI (or IRQ, when enabled) overrides the fetch address
    /// with the handler entry point and adds the fixed interrupt-entry
    /// cost; the latch itself is consumed by the execution step.
    pub fn step_timing<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        let mut cycles: u32 = 0;
        let mut fetch_pc = self.regs.pc;

        if self.nmi_pending {
            fetch_pc = self.read_word(bus, NMI_VECTOR)?;
            cycles += INTERRUPT_CYCLES;
        } else if !self.regs.p.is_set(I) && self.irq_pending {
            fetch_pc = self.read_word(bus, IRQ_VECTOR)?;
            cycles += INTERRUPT_CYCLES;
        }

        let record = &OPCODES[usize::from(bus.read(fetch_pc)?)];
        let (operand, target) = self.resolve_operand(record.mode, bus)?;

        cycles += record.cycles;
        if self.variant == Variant::Cmos {
            cycles = self.cmos_cycle_adjust(record, operand, fetch_pc, cycles);
        }
        if record.page_penalty && self.page_crossed(record.mode, bus)? {
            cycles += 1;
        }

        self.decoded = Some(Decoded {
            record,
            operand,
            target,
        });
        self.total_cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Variant-specific cycle deltas (CMOS only).
    fn cmos_cycle_adjust(
        &self,
        record: &OpcodeRecord,
        operand: u16,
        fetch_pc: u16,
        mut cycles: u32,
    ) -> u32 {
        let p = self.regs.p;
        match record.mnemonic {
            // decimal mode costs one extra cycle on the 65C02
            Mnemonic::Adc | Mnemonic::Sbc if p.is_set(D) => cycles += 1,

            // the 65C02 fixes the indirect-JMP page-wrap bug at the cost
            // of an extra cycle
            Mnemonic::Jmp if record.mode == AddressMode::Indirect => cycles += 1,

            // shift/rotate absolute,X completes one cycle sooner
            Mnemonic::Asl | Mnemonic::Lsr | Mnemonic::Rol | Mnemonic::Ror
                if record.mode == AddressMode::AbsoluteX =>
            {
                cycles -= 1;
            }

            mnemonic => {
                let taken = match mnemonic {
                    Mnemonic::Bcc => !p.is_set(C),
                    Mnemonic::Bcs => p.is_set(C),
                    Mnemonic::Beq => p.is_set(Z),
                    Mnemonic::Bne => !p.is_set(Z),
                    Mnemonic::Bmi => p.is_set(N),
                    Mnemonic::Bpl => !p.is_set(N),
                    Mnemonic::Bvc => !p.is_set(V),
                    Mnemonic::Bvs => p.is_set(V),
                    Mnemonic::Bra => true,
                    _ => return cycles,
                };
                let next_pc = fetch_pc.wrapping_add(record.bytes);
                cycles += branch_penalty(taken, operand, next_pc);
            }
        }
        cycles
    }

    /// One extra cycle when indexing carries into the address high byte.
    fn page_crossed<B: Bus>(&self, mode: AddressMode, bus: &mut B) -> Result<bool, CpuError> {
        match mode {
            AddressMode::AbsoluteX => {
                let base = self.imm_word(bus)?;
                Ok(pages_differ(base, base.wrapping_add(u16::from(self.regs.x))))
            }
            AddressMode::AbsoluteY => {
                let base = self.imm_word(bus)?;
                Ok(pages_differ(base, base.wrapping_add(u16::from(self.regs.y))))
            }
            AddressMode::IndirectY => {
                let ptr = u16::from(self.imm_byte(bus)?);
                let base = self.read_word(bus, ptr)?;
                Ok(pages_differ(base, base.wrapping_add(u16::from(self.regs.y))))
            }
            _ => Ok(false),
        }
    }

    /// Apply the instruction decoded by the preceding timing step.
    ///
    /// Pending interrupts are serviced first: NMI always wins, and a
    /// simultaneously latched IRQ stays latched for the next boundary.
    pub fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        if self.nmi_pending {
            self.enter_interrupt(bus, NMI_VECTOR, false)?;
            self.nmi_pending = false;
        } else if !self.regs.p.is_set(I) && self.irq_pending {
            self.enter_interrupt(bus, IRQ_VECTOR, false)?;
            self.irq_pending = false;
        }

        let Some(decoded) = self.decoded.take() else {
            unreachable!("execute() without a preceding step_timing()");
        };

        // CMOS extensions are undefined on the NMOS part and execute as
        // no-ops of the table-specified length.
        if self.variant == Variant::Nmos && decoded.record.cmos_only {
            self.advance(decoded.record.bytes);
            return Ok(());
        }

        self.dispatch(bus, decoded)
    }

    fn dispatch<B: Bus>(&mut self, bus: &mut B, d: Decoded) -> Result<(), CpuError> {
        let record = d.record;
        let value = d.operand as u8;

        match record.mnemonic {
            Mnemonic::Adc => {
                if self.regs.p.is_set(D) {
                    self.adc_decimal(value)?;
                } else {
                    self.adc_binary(value);
                }
                self.advance(record.bytes);
            }
            Mnemonic::Sbc => {
                if self.regs.p.is_set(D) {
                    self.sbc_decimal(value)?;
                } else {
                    // SBC is ADC of the complemented operand
                    self.adc_binary(!value);
                }
                self.advance(record.bytes);
            }

            Mnemonic::And => {
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }
            Mnemonic::Ora => {
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }
            Mnemonic::Eor => {
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }

            Mnemonic::Asl => {
                let result = self.asl(value);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }
            Mnemonic::Lsr => {
                let result = self.lsr(value);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }
            Mnemonic::Rol => {
                let result = self.rol(value);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }
            Mnemonic::Ror => {
                let result = self.ror(value);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }

            Mnemonic::Inc => {
                let result = value.wrapping_add(1);
                self.regs.p.update_nz(result);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }
            Mnemonic::Dec => {
                let result = value.wrapping_sub(1);
                self.regs.p.update_nz(result);
                self.store_operand(bus, record.mode, d.target, result)?;
                self.advance(record.bytes);
            }

            Mnemonic::Bit => {
                // N and V are untouched in immediate mode on the 65C02
                if record.mode != AddressMode::Immediate {
                    self.regs.p.set_if(N, value & 0x80 != 0);
                    self.regs.p.set_if(V, value & 0x40 != 0);
                }
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.advance(record.bytes);
            }
            Mnemonic::Trb => {
                self.store_operand(bus, record.mode, d.target, !self.regs.a & value)?;
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.advance(record.bytes);
            }
            Mnemonic::Tsb => {
                self.store_operand(bus, record.mode, d.target, self.regs.a | value)?;
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.advance(record.bytes);
            }

            Mnemonic::Rmb => {
                let mask = 1u8 << ((record.opcode >> 4) & 0x07);
                self.store_operand(bus, record.mode, d.target, value & !mask)?;
                self.advance(record.bytes);
            }
            Mnemonic::Smb => {
                let mask = 1u8 << ((record.opcode >> 4) & 0x07);
                self.store_operand(bus, record.mode, d.target, value | mask)?;
                self.advance(record.bytes);
            }
            Mnemonic::Bbr => self.bit_branch(bus, &d, false)?,
            Mnemonic::Bbs => self.bit_branch(bus, &d, true)?,

            Mnemonic::Bcc => self.branch(&d, !self.regs.p.is_set(C)),
            Mnemonic::Bcs => self.branch(&d, self.regs.p.is_set(C)),
            Mnemonic::Beq => self.branch(&d, self.regs.p.is_set(Z)),
            Mnemonic::Bne => self.branch(&d, !self.regs.p.is_set(Z)),
            Mnemonic::Bmi => self.branch(&d, self.regs.p.is_set(N)),
            Mnemonic::Bpl => self.branch(&d, !self.regs.p.is_set(N)),
            Mnemonic::Bvc => self.branch(&d, !self.regs.p.is_set(V)),
            Mnemonic::Bvs => self.branch(&d, self.regs.p.is_set(V)),
            Mnemonic::Bra => self.branch(&d, true),

            Mnemonic::Brk => {
                // software interrupt: the byte after BRK is padding
                self.regs.pc = self.regs.pc.wrapping_add(2);
                self.enter_interrupt(bus, IRQ_VECTOR, true)?;
            }

            Mnemonic::Jmp => match (record.mode, d.target) {
                (AddressMode::Absolute, Target::Memory(addr)) => self.regs.pc = addr,
                (AddressMode::Indirect, _) => self.regs.pc = d.operand,
                (AddressMode::AbsoluteX, Target::Memory(addr)) => {
                    self.regs.pc = self.read_word(bus, addr)?;
                }
                (mode, _) => return Err(CpuError::UnsupportedJumpMode(mode)),
            },
            Mnemonic::Jsr => {
                // the pushed return address is one short; RTS adds it back
                let Target::Memory(addr) = d.target else {
                    return Err(CpuError::UnsupportedJumpMode(record.mode));
                };
                self.push_word(bus, self.regs.pc.wrapping_add(2))?;
                self.regs.pc = addr;
            }
            Mnemonic::Rts => {
                self.regs.pc = self.pop_word(bus)?.wrapping_add(1);
            }
            Mnemonic::Rti => {
                let status = self.pop_byte(bus)?;
                self.regs.p = Status::from_byte(status);
                self.regs.pc = self.pop_word(bus)?;
            }

            Mnemonic::Lda => {
                self.regs.a = value;
                self.regs.p.update_nz(value);
                self.advance(record.bytes);
            }
            Mnemonic::Ldx => {
                self.regs.x = value;
                self.regs.p.update_nz(value);
                self.advance(record.bytes);
            }
            Mnemonic::Ldy => {
                self.regs.y = value;
                self.regs.p.update_nz(value);
                self.advance(record.bytes);
            }
            Mnemonic::Sta => {
                self.store_operand(bus, record.mode, d.target, self.regs.a)?;
                self.advance(record.bytes);
            }
            Mnemonic::Stx => {
                self.store_operand(bus, record.mode, d.target, self.regs.x)?;
                self.advance(record.bytes);
            }
            Mnemonic::Sty => {
                self.store_operand(bus, record.mode, d.target, self.regs.y)?;
                self.advance(record.bytes);
            }
            Mnemonic::Stz => {
                self.store_operand(bus, record.mode, d.target, 0)?;
                self.advance(record.bytes);
            }

            Mnemonic::Cmp => {
                self.compare(self.regs.a, value);
                self.advance(record.bytes);
            }
            Mnemonic::Cpx => {
                self.compare(self.regs.x, value);
                self.advance(record.bytes);
            }
            Mnemonic::Cpy => {
                self.compare(self.regs.y, value);
                self.advance(record.bytes);
            }

            Mnemonic::Clc => {
                self.regs.p.clear(C);
                self.advance(record.bytes);
            }
            Mnemonic::Cld => {
                self.regs.p.clear(D);
                self.advance(record.bytes);
            }
            Mnemonic::Cli => {
                self.regs.p.clear(I);
                self.advance(record.bytes);
            }
            Mnemonic::Clv => {
                self.regs.p.clear(V);
                self.advance(record.bytes);
            }
            Mnemonic::Sec => {
                self.regs.p.set(C);
                self.advance(record.bytes);
            }
            Mnemonic::Sed => {
                self.regs.p.set(D);
                self.advance(record.bytes);
            }
            Mnemonic::Sei => {
                self.regs.p.set(I);
                self.advance(record.bytes);
            }

            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                self.advance(record.bytes);
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                self.advance(record.bytes);
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                self.advance(record.bytes);
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                self.advance(record.bytes);
            }

            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                self.advance(record.bytes);
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                self.advance(record.bytes);
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                self.advance(record.bytes);
            }
            Mnemonic::Txs => {
                // TXS does not affect flags
                self.regs.s = self.regs.x;
                self.advance(record.bytes);
            }

            Mnemonic::Pha => {
                self.push_byte(bus, self.regs.a)?;
                self.advance(record.bytes);
            }
            Mnemonic::Phx => {
                self.push_byte(bus, self.regs.x)?;
                self.advance(record.bytes);
            }
            Mnemonic::Phy => {
                self.push_byte(bus, self.regs.y)?;
                self.advance(record.bytes);
            }
            Mnemonic::Php => {
                // PHP pushes with the break bit set, like BRK
                let status = self.regs.p.to_byte_brk();
                self.push_byte(bus, status)?;
                self.advance(record.bytes);
            }
            Mnemonic::Pla => {
                self.regs.a = self.pop_byte(bus)?;
                self.regs.p.update_nz(self.regs.a);
                self.advance(record.bytes);
            }
            Mnemonic::Plx => {
                self.regs.x = self.pop_byte(bus)?;
                self.regs.p.update_nz(self.regs.x);
                self.advance(record.bytes);
            }
            Mnemonic::Ply => {
                self.regs.y = self.pop_byte(bus)?;
                self.regs.p.update_nz(self.regs.y);
                self.advance(record.bytes);
            }
            Mnemonic::Plp => {
                let status = self.pop_byte(bus)?;
                self.regs.p = Status::from_byte(status);
                self.advance(record.bytes);
            }

            // STP halts and WAI sleeps on real silicon; both retire as
            // no-ops here, as do the undocumented codes.
            Mnemonic::Nop | Mnemonic::Stp | Mnemonic::Wai => {
                self.advance(record.bytes);
            }
        }

        Ok(())
    }

    // ========================================================================
    // Control flow helpers
    // ========================================================================

    fn advance(&mut self, bytes: u16) {
        self.regs.pc = self.regs.pc.wrapping_add(bytes);
    }

    /// PC-relative branch: PC first advances past the instruction, then
    /// takes the sign-extended offset when the condition holds.
    fn branch(&mut self, d: &Decoded, taken: bool) {
        self.advance(d.record.bytes);
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add(d.operand);
        }
    }

    /// BBRx/BBSx: test the op-code-numbered bit of the zero-page operand
    /// and branch by the offset byte in the third instruction byte.
    fn bit_branch<B: Bus>(
        &mut self,
        bus: &mut B,
        d: &Decoded,
        branch_if_set: bool,
    ) -> Result<(), CpuError> {
        let mask = 1u8 << ((d.record.opcode >> 4) & 0x07);
        let offset = sign_extend(bus.read(self.regs.pc.wrapping_add(2))?);
        self.advance(d.record.bytes);
        if ((d.operand as u8) & mask != 0) == branch_if_set {
            self.regs.pc = self.regs.pc.wrapping_add(offset);
        }
        Ok(())
    }

    /// Vectored interrupt entry, shared by NMI, IRQ, and BRK.
    fn enter_interrupt<B: Bus>(
        &mut self,
        bus: &mut B,
        vector: u16,
        is_brk: bool,
    ) -> Result<(), CpuError> {
        self.push_word(bus, self.regs.pc)?;
        let status = if is_brk {
            self.regs.p.to_byte_brk()
        } else {
            self.regs.p.to_byte_irq()
        };
        self.push_byte(bus, status)?;
        self.regs.p.set(I);
        // the 65C02 clears decimal mode on hardware interrupt entry; BRK
        // leaves it alone
        if self.variant == Variant::Cmos && !is_brk {
            self.regs.p.clear(D);
        }
        self.regs.pc = self.read_word(bus, vector)?;
        Ok(())
    }

    // ========================================================================
    // Stack helpers
    // ========================================================================

    fn push_byte<B: Bus>(&mut self, bus: &mut B, value: u8) -> Result<(), CpuError> {
        let addr = self.regs.push();
        bus.write(addr, value)?;
        Ok(())
    }

    fn pop_byte<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError> {
        let addr = self.regs.pop();
        Ok(bus.read(addr)?)
    }

    /// Push high byte first so the low byte sits at the lower address.
    fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<(), CpuError> {
        self.push_byte(bus, (value >> 8) as u8)?;
        self.push_byte(bus, value as u8)
    }

    fn pop_word<B: Bus>(&mut self, bus: &mut B) -> Result<u16, CpuError> {
        let lo = self.pop_byte(bus)?;
        let hi = self.pop_byte(bus)?;
        Ok(u16::from(lo) | (u16::from(hi) << 8))
    }

    // ========================================================================
    // ALU helpers
    // ========================================================================

    fn adc_binary(&mut self, oper: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(oper) + u16::from(self.regs.p.is_set(C));
        let result = sum as u8;
        self.regs.p.set_if(C, sum > 0xFF);
        self.regs
            .p
            .set_if(V, !(a ^ oper) & (a ^ result) & 0x80 != 0);
        self.regs.p.update_nz(result);
        self.regs.a = result;
    }

    fn adc_decimal(&mut self, oper: u8) -> Result<(), CpuError> {
        let mut result = i16::from(bcd_to_bin(self.regs.a)?) + i16::from(bcd_to_bin(oper)?);
        if self.regs.p.is_set(C) {
            result += 1;
        }
        self.regs.p.set_if(C, result > 99);
        if result > 99 {
            result -= 100;
        }
        self.regs.p.set_if(Z, result == 0);
        self.regs.a = bin_to_bcd(result as u8);
        // N reflects the high bit of the re-encoded BCD value, not the
        // binary sum
        self.regs.p.set_if(N, self.regs.a > 0x7F);
        Ok(())
    }

    fn sbc_decimal(&mut self, oper: u8) -> Result<(), CpuError> {
        let mut result = i16::from(bcd_to_bin(self.regs.a)?) - i16::from(bcd_to_bin(oper)?);
        if !self.regs.p.is_set(C) {
            result -= 1;
        }
        self.regs.p.set_if(C, result >= 0);
        // BCD subtraction wraps on underflow
        if result < 0 {
            result += 100;
        }
        self.regs.p.set_if(Z, result == 0);
        self.regs.a = bin_to_bcd(result as u8);
        self.regs.p.set_if(N, self.regs.a > 0x7F);
        Ok(())
    }

    /// Unsigned comparison: carry means no borrow.
    fn compare(&mut self, register: u8, oper: u8) {
        self.regs.p.set_if(C, register >= oper);
        self.regs.p.update_nz(register.wrapping_sub(oper));
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.regs.p.set_if(C, value & 0x80 != 0);
        let result = value << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.regs.p.set_if(C, value & 0x01 != 0);
        let result = value >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.p.is_set(C) { 0x80 } else { 0 };
        self.regs.p.set_if(C, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }
}

/// Extra cycles for a branch: one when taken, another when the target
/// sits on a different page than the following instruction.
fn branch_penalty(taken: bool, operand: u16, next_pc: u16) -> u32 {
    if !taken {
        return 0;
    }
    if pages_differ(next_pc, next_pc.wrapping_add(operand)) {
        2
    } else {
        1
    }
}

const fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

/// Unpack a BCD byte, faulting unless both nibbles are decimal digits.
fn bcd_to_bin(value: u8) -> Result<u8, CpuError> {
    if value > 0x99 || value & 0x0F > 0x09 {
        return Err(CpuError::InvalidBcd(value));
    }
    Ok((value >> 4) * 10 + (value & 0x0F))
}

const fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = CpuError;

    fn step_timing<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        Mos6502::step_timing(self, bus)
    }

    fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        Mos6502::execute(self, bus)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn interrupt(&mut self) {
        Mos6502::interrupt(self);
    }

    fn nmi(&mut self) {
        Mos6502::nmi(self);
    }

    fn boot<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        Mos6502::boot(self, bus)
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.0.into()),
            "flags.c" | "c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" | "z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" | "i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" | "d" => Some(self.regs.p.is_set(D).into()),
            "flags.v" | "v" => Some(self.regs.p.is_set(V).into()),
            "flags.n" | "n" => Some(self.regs.p.is_set(N).into()),
            "cycle" => Some(Value::U64(self.total_cycles)),
            "variant" => Some(match self.variant {
                Variant::Nmos => "NMOS".into(),
                Variant::Cmos => "CMOS".into(),
            }),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc", "a", "x", "y", "s", "p", "flags.c", "flags.z", "flags.i", "flags.d", "flags.v",
            "flags.n", "cycle", "variant",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    #[test]
    fn test_lda_immediate() {
        let mut cpu = Mos6502::new(Variant::Nmos);
        let mut bus = SimpleBus::new();

        // LDA #$42
        bus.load(0x0000, &[0xA9, 0x42]).unwrap();
        cpu.regs.pc = 0x0000;

        let cycles = cpu.step_timing(&mut bus).unwrap();
        cpu.execute(&mut bus).unwrap();

        assert_eq!(cycles, 2);
        assert_eq!(cpu.regs.a, 0x42);
        assert_eq!(cpu.regs.pc, 0x0002);
    }

    #[test]
    fn test_sta_zeropage() {
        let mut cpu = Mos6502::new(Variant::Nmos);
        let mut bus = SimpleBus::new();

        cpu.regs.a = 0x55;
        // STA $10
        bus.load(0x0000, &[0x85, 0x10]).unwrap();
        cpu.regs.pc = 0x0000;

        let cycles = cpu.step_timing(&mut bus).unwrap();
        cpu.execute(&mut bus).unwrap();

        assert_eq!(cycles, 3);
        assert_eq!(bus.peek(0x0010), 0x55);
    }

    #[test]
    fn test_jmp_absolute() {
        let mut cpu = Mos6502::new(Variant::Nmos);
        let mut bus = SimpleBus::new();

        // JMP $1234
        bus.load(0x0000, &[0x4C, 0x34, 0x12]).unwrap();
        cpu.regs.pc = 0x0000;

        let cycles = cpu.step_timing(&mut bus).unwrap();
        cpu.execute(&mut bus).unwrap();

        assert_eq!(cycles, 3);
        assert_eq!(cpu.regs.pc, 0x1234);
    }

    #[test]
    fn test_disassemble_does_not_mutate() {
        let mut cpu = Mos6502::new(Variant::Cmos);
        let mut bus = SimpleBus::new();

        bus.load(0x0000, &[0xA9, 0x55]).unwrap();
        cpu.regs.pc = 0x0000;

        assert_eq!(cpu.disassemble_next(&mut bus).unwrap(), "LDA #$55");
        assert_eq!(cpu.regs.pc, 0x0000);
        assert_eq!(cpu.regs.a, 0x00);
    }

    #[test]
    fn test_observable_paths() {
        let cpu = Mos6502::new(Variant::Cmos);
        assert_eq!(cpu.query("variant"), Some("CMOS".into()));
        assert_eq!(cpu.query("s"), Some(Value::U8(0xFD)));
        assert_eq!(cpu.query("flags.i"), Some(Value::Bool(true)));
        assert_eq!(cpu.query("bogus"), None);
        assert_eq!(cpu.query("pc").map(|v| v.to_string()), Some("0x0000".into()));

        for path in cpu.query_paths() {
            assert!(cpu.query(path).is_some(), "{path} should resolve");
        }
    }

    #[test]
    fn test_drives_through_the_cpu_trait() {
        fn run_one<C: Cpu>(cpu: &mut C, bus: &mut SimpleBus) -> Result<u32, C::Error> {
            let cycles = cpu.step_timing(bus)?;
            cpu.execute(bus)?;
            Ok(cycles)
        }

        let mut cpu = Mos6502::new(Variant::Nmos);
        let mut bus = SimpleBus::new();

        bus.poke(0xFFFC, 0x00);
        bus.poke(0xFFFD, 0x02);
        bus.load(0x0200, &[0xE8]).unwrap(); // INX

        Cpu::boot(&mut cpu, &mut bus).unwrap();
        assert_eq!(Cpu::pc(&cpu), 0x0200);

        let cycles = run_one(&mut cpu, &mut bus).unwrap();
        assert_eq!(cycles, 2);
        assert_eq!(Cpu::registers(&cpu).x, 1);
    }
}
