//! Static op-code table.
//!
//! One record per 8-bit value, built once and immutable. Lookup is plain
//! array indexing and cannot fail: undefined op-codes hold no-op records
//! with the byte lengths and cycle counts the 65C02 documents for them.
//! Both processor variants share the table; variant-specific cycle deltas
//! are applied by the timing step, and CMOS-only records fall back to
//! no-ops on the NMOS part at execution.

use std::fmt::Write as _;

/// Rule for locating an instruction's operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Operand is the accumulator itself.
    Accumulator,
    /// 16-bit little-endian address in the two bytes after the op-code.
    Absolute,
    /// Absolute address offset by X.
    AbsoluteX,
    /// Absolute address offset by Y.
    AbsoluteY,
    /// Operand is the byte after the op-code.
    Immediate,
    /// No operand.
    Implied,
    /// The immediate word points at the 16-bit operand (JMP only).
    Indirect,
    /// Zero-page pointer formed by adding X to the immediate byte.
    XIndirect,
    /// Word at the zero-page immediate, then offset by Y.
    IndirectY,
    /// Sign-extended PC-relative branch offset.
    Relative,
    /// 8-bit address in the zero page.
    ZeroPage,
    /// Zero-page address offset by X, wrapping within the page.
    ZeroPageX,
    /// Zero-page address offset by Y, wrapping within the page.
    ZeroPageY,
    /// CMOS (zp): the zero-page word is dereferenced once.
    ZeroPageIndirect,
    /// Zero-page operand for the bit-test-and-branch instructions, which
    /// also carry a relative offset in their third byte.
    BranchExt,
}

/// Instruction mnemonic, shared by every addressing-mode form.
///
/// The bit-numbered families (BBR0-7, BBS0-7, RMB0-7, SMB0-7) use one
/// variant each; the bit index comes from the op-code's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bbr, Bbs, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Bra, Brk,
    Bvc, Bvs, Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc,
    Inx, Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Phx, Phy,
    Pla, Plp, Plx, Ply, Rmb, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Smb,
    Sta, Stp, Stx, Sty, Stz, Tax, Tay, Trb, Tsb, Tsx, Txa, Txs, Tya, Wai,
}

impl Mnemonic {
    /// Base assembler name, without the bit digit of the numbered families.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bbr => "BBR", Mnemonic::Bbs => "BBS", Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ", Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE", Mnemonic::Bpl => "BPL",
            Mnemonic::Bra => "BRA", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Phx => "PHX", Mnemonic::Phy => "PHY",
            Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP", Mnemonic::Plx => "PLX",
            Mnemonic::Ply => "PLY", Mnemonic::Rmb => "RMB", Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI", Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC", Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI", Mnemonic::Smb => "SMB", Mnemonic::Sta => "STA",
            Mnemonic::Stp => "STP", Mnemonic::Stx => "STX", Mnemonic::Sty => "STY",
            Mnemonic::Stz => "STZ", Mnemonic::Tax => "TAX", Mnemonic::Tay => "TAY",
            Mnemonic::Trb => "TRB", Mnemonic::Tsb => "TSB", Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA", Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA",
            Mnemonic::Wai => "WAI",
        }
    }
}

/// One entry of the op-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeRecord {
    /// The op-code byte itself.
    pub opcode: u8,
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Addressing mode.
    pub mode: AddressMode,
    /// Instruction length in bytes (1-3).
    pub bytes: u16,
    /// Base cycle count before variant and page adjustments.
    pub cycles: u32,
    /// Whether indexing past a page boundary costs an extra cycle.
    pub page_penalty: bool,
    /// 65C02 extension: executes as a no-op on the NMOS part.
    pub cmos_only: bool,
}

impl OpcodeRecord {
    /// Assembler label, including the bit digit of the numbered families
    /// (e.g. `BBR3`, `SMB7`).
    #[must_use]
    pub fn label(&self) -> String {
        match self.mnemonic {
            Mnemonic::Bbr | Mnemonic::Bbs | Mnemonic::Rmb | Mnemonic::Smb => {
                format!("{}{}", self.mnemonic.name(), (self.opcode >> 4) & 0x07)
            }
            m => m.name().to_string(),
        }
    }

    /// Format the instruction with its operand bytes.
    ///
    /// `operand` holds the immediate word for 3-byte instructions, else
    /// the immediate byte.
    #[must_use]
    pub fn disassemble(&self, operand: u16) -> String {
        let mut out = self.label();
        let byte = operand as u8;
        match self.mode {
            AddressMode::Accumulator => out.push_str(" A"),
            AddressMode::Absolute | AddressMode::AbsoluteX | AddressMode::AbsoluteY => {
                let _ = write!(out, " ${operand:04X}");
                match self.mode {
                    AddressMode::AbsoluteX => out.push_str(",X"),
                    AddressMode::AbsoluteY => out.push_str(",Y"),
                    _ => {}
                }
            }
            AddressMode::Immediate => {
                let _ = write!(out, " #${byte:02X}");
            }
            AddressMode::Implied => {}
            AddressMode::Indirect => {
                let _ = write!(out, " (${operand:04X})");
            }
            AddressMode::XIndirect => {
                let _ = write!(out, " (${byte:02X},X)");
            }
            AddressMode::IndirectY => {
                let _ = write!(out, " (${byte:02X}),Y");
            }
            AddressMode::Relative | AddressMode::ZeroPage => {
                let _ = write!(out, " ${byte:02X}");
            }
            AddressMode::ZeroPageX => {
                let _ = write!(out, " ${byte:02X},X");
            }
            AddressMode::ZeroPageY => {
                let _ = write!(out, " ${byte:02X},Y");
            }
            AddressMode::ZeroPageIndirect => {
                let _ = write!(out, " (${byte:02X})");
            }
            AddressMode::BranchExt => {
                // third byte is the relative offset
                let _ = write!(out, " ${byte:02X},${:02X}", operand >> 8);
            }
        }
        out
    }
}

const fn op(opcode: u8, mnemonic: Mnemonic, mode: AddressMode, bytes: u16, cycles: u32) -> OpcodeRecord {
    OpcodeRecord { opcode, mnemonic, mode, bytes, cycles, page_penalty: false, cmos_only: false }
}

/// A read that pays one extra cycle when indexing crosses a page.
const fn page(opcode: u8, mnemonic: Mnemonic, mode: AddressMode, bytes: u16, cycles: u32) -> OpcodeRecord {
    OpcodeRecord { opcode, mnemonic, mode, bytes, cycles, page_penalty: true, cmos_only: false }
}

/// A 65C02 extension instruction.
const fn cmos(opcode: u8, mnemonic: Mnemonic, mode: AddressMode, bytes: u16, cycles: u32) -> OpcodeRecord {
    OpcodeRecord { opcode, mnemonic, mode, bytes, cycles, page_penalty: false, cmos_only: true }
}

/// A 65C02 extension read with the page-crossing penalty.
const fn cmos_page(opcode: u8, mnemonic: Mnemonic, mode: AddressMode, bytes: u16, cycles: u32) -> OpcodeRecord {
    OpcodeRecord { opcode, mnemonic, mode, bytes, cycles, page_penalty: true, cmos_only: true }
}

/// An op-code with no defined instruction: a no-op with the documented
/// 65C02 byte length and cycle count.
const fn undoc(opcode: u8, bytes: u16, cycles: u32) -> OpcodeRecord {
    op(opcode, Mnemonic::Nop, AddressMode::Implied, bytes, cycles)
}

use AddressMode::*;
use Mnemonic::*;

/// The op-code table, indexed by op-code byte.
pub static OPCODES: [OpcodeRecord; 256] = [
    // $00
    op(0x00, Brk, Implied, 1, 7),
    op(0x01, Ora, XIndirect, 2, 6),
    undoc(0x02, 2, 2),
    undoc(0x03, 1, 1),
    cmos(0x04, Tsb, ZeroPage, 2, 5),
    op(0x05, Ora, ZeroPage, 2, 3),
    op(0x06, Asl, ZeroPage, 2, 5),
    cmos(0x07, Rmb, ZeroPage, 2, 5),
    op(0x08, Php, Implied, 1, 3),
    op(0x09, Ora, Immediate, 2, 2),
    op(0x0A, Asl, Accumulator, 1, 2),
    undoc(0x0B, 1, 1),
    cmos(0x0C, Tsb, Absolute, 3, 6),
    op(0x0D, Ora, Absolute, 3, 4),
    op(0x0E, Asl, Absolute, 3, 6),
    cmos(0x0F, Bbr, BranchExt, 3, 5),
    // $10
    op(0x10, Bpl, Relative, 2, 2),
    page(0x11, Ora, IndirectY, 2, 5),
    cmos(0x12, Ora, ZeroPageIndirect, 2, 5),
    undoc(0x13, 1, 1),
    cmos(0x14, Trb, ZeroPage, 2, 5),
    op(0x15, Ora, ZeroPageX, 2, 4),
    op(0x16, Asl, ZeroPageX, 2, 6),
    cmos(0x17, Rmb, ZeroPage, 2, 5),
    op(0x18, Clc, Implied, 1, 2),
    page(0x19, Ora, AbsoluteY, 3, 4),
    cmos(0x1A, Inc, Accumulator, 1, 2),
    undoc(0x1B, 1, 1),
    cmos(0x1C, Trb, Absolute, 3, 6),
    page(0x1D, Ora, AbsoluteX, 3, 4),
    op(0x1E, Asl, AbsoluteX, 3, 7),
    cmos(0x1F, Bbr, BranchExt, 3, 5),
    // $20
    op(0x20, Jsr, Absolute, 3, 6),
    op(0x21, And, XIndirect, 2, 6),
    undoc(0x22, 2, 2),
    undoc(0x23, 1, 1),
    op(0x24, Bit, ZeroPage, 2, 3),
    op(0x25, And, ZeroPage, 2, 3),
    op(0x26, Rol, ZeroPage, 2, 5),
    cmos(0x27, Rmb, ZeroPage, 2, 5),
    op(0x28, Plp, Implied, 1, 4),
    op(0x29, And, Immediate, 2, 2),
    op(0x2A, Rol, Accumulator, 1, 2),
    undoc(0x2B, 1, 1),
    op(0x2C, Bit, Absolute, 3, 4),
    op(0x2D, And, Absolute, 3, 4),
    op(0x2E, Rol, Absolute, 3, 6),
    cmos(0x2F, Bbr, BranchExt, 3, 5),
    // $30
    op(0x30, Bmi, Relative, 2, 2),
    page(0x31, And, IndirectY, 2, 5),
    cmos(0x32, And, ZeroPageIndirect, 2, 5),
    undoc(0x33, 1, 1),
    cmos(0x34, Bit, ZeroPageX, 2, 4),
    op(0x35, And, ZeroPageX, 2, 4),
    op(0x36, Rol, ZeroPageX, 2, 6),
    cmos(0x37, Rmb, ZeroPage, 2, 5),
    op(0x38, Sec, Implied, 1, 2),
    page(0x39, And, AbsoluteY, 3, 4),
    cmos(0x3A, Dec, Accumulator, 1, 2),
    undoc(0x3B, 1, 1),
    cmos_page(0x3C, Bit, AbsoluteX, 3, 4),
    page(0x3D, And, AbsoluteX, 3, 4),
    op(0x3E, Rol, AbsoluteX, 3, 7),
    cmos(0x3F, Bbr, BranchExt, 3, 5),
    // $40
    op(0x40, Rti, Implied, 1, 6),
    op(0x41, Eor, XIndirect, 2, 6),
    undoc(0x42, 2, 2),
    undoc(0x43, 1, 1),
    undoc(0x44, 2, 3),
    op(0x45, Eor, ZeroPage, 2, 3),
    op(0x46, Lsr, ZeroPage, 2, 5),
    cmos(0x47, Rmb, ZeroPage, 2, 5),
    op(0x48, Pha, Implied, 1, 3),
    op(0x49, Eor, Immediate, 2, 2),
    op(0x4A, Lsr, Accumulator, 1, 2),
    undoc(0x4B, 1, 1),
    op(0x4C, Jmp, Absolute, 3, 3),
    op(0x4D, Eor, Absolute, 3, 4),
    op(0x4E, Lsr, Absolute, 3, 6),
    cmos(0x4F, Bbr, BranchExt, 3, 5),
    // $50
    op(0x50, Bvc, Relative, 2, 2),
    page(0x51, Eor, IndirectY, 2, 5),
    cmos(0x52, Eor, ZeroPageIndirect, 2, 5),
    undoc(0x53, 1, 1),
    undoc(0x54, 2, 4),
    op(0x55, Eor, ZeroPageX, 2, 4),
    op(0x56, Lsr, ZeroPageX, 2, 6),
    cmos(0x57, Rmb, ZeroPage, 2, 5),
    op(0x58, Cli, Implied, 1, 2),
    page(0x59, Eor, AbsoluteY, 3, 4),
    cmos(0x5A, Phy, Implied, 1, 3),
    undoc(0x5B, 1, 1),
    undoc(0x5C, 3, 8),
    page(0x5D, Eor, AbsoluteX, 3, 4),
    op(0x5E, Lsr, AbsoluteX, 3, 7),
    cmos(0x5F, Bbr, BranchExt, 3, 5),
    // $60
    op(0x60, Rts, Implied, 1, 6),
    op(0x61, Adc, XIndirect, 2, 6),
    undoc(0x62, 2, 2),
    undoc(0x63, 1, 1),
    cmos(0x64, Stz, ZeroPage, 2, 3),
    op(0x65, Adc, ZeroPage, 2, 3),
    op(0x66, Ror, ZeroPage, 2, 5),
    cmos(0x67, Rmb, ZeroPage, 2, 5),
    op(0x68, Pla, Implied, 1, 4),
    op(0x69, Adc, Immediate, 2, 2),
    op(0x6A, Ror, Accumulator, 1, 2),
    undoc(0x6B, 1, 1),
    op(0x6C, Jmp, Indirect, 3, 5),
    op(0x6D, Adc, Absolute, 3, 4),
    op(0x6E, Ror, Absolute, 3, 6),
    cmos(0x6F, Bbr, BranchExt, 3, 5),
    // $70
    op(0x70, Bvs, Relative, 2, 2),
    page(0x71, Adc, IndirectY, 2, 5),
    cmos(0x72, Adc, ZeroPageIndirect, 2, 5),
    undoc(0x73, 1, 1),
    cmos(0x74, Stz, ZeroPageX, 2, 4),
    op(0x75, Adc, ZeroPageX, 2, 4),
    op(0x76, Ror, ZeroPageX, 2, 6),
    cmos(0x77, Rmb, ZeroPage, 2, 5),
    op(0x78, Sei, Implied, 1, 2),
    page(0x79, Adc, AbsoluteY, 3, 4),
    cmos(0x7A, Ply, Implied, 1, 4),
    undoc(0x7B, 1, 1),
    cmos(0x7C, Jmp, AbsoluteX, 3, 6),
    page(0x7D, Adc, AbsoluteX, 3, 4),
    op(0x7E, Ror, AbsoluteX, 3, 7),
    cmos(0x7F, Bbr, BranchExt, 3, 5),
    // $80
    // BRA is listed one cycle under the documentation; the branch-taken
    // adjustment in the timing step always fires for it.
    cmos(0x80, Bra, Relative, 2, 2),
    op(0x81, Sta, XIndirect, 2, 6),
    undoc(0x82, 2, 2),
    undoc(0x83, 1, 1),
    op(0x84, Sty, ZeroPage, 2, 3),
    op(0x85, Sta, ZeroPage, 2, 3),
    op(0x86, Stx, ZeroPage, 2, 3),
    cmos(0x87, Smb, ZeroPage, 2, 5),
    op(0x88, Dey, Implied, 1, 2),
    cmos(0x89, Bit, Immediate, 2, 2),
    op(0x8A, Txa, Implied, 1, 2),
    undoc(0x8B, 1, 1),
    op(0x8C, Sty, Absolute, 3, 4),
    op(0x8D, Sta, Absolute, 3, 4),
    op(0x8E, Stx, Absolute, 3, 4),
    cmos(0x8F, Bbs, BranchExt, 3, 5),
    // $90
    op(0x90, Bcc, Relative, 2, 2),
    op(0x91, Sta, IndirectY, 2, 6),
    cmos(0x92, Sta, ZeroPageIndirect, 2, 5),
    undoc(0x93, 1, 1),
    op(0x94, Sty, ZeroPageX, 2, 4),
    op(0x95, Sta, ZeroPageX, 2, 4),
    op(0x96, Stx, ZeroPageY, 2, 4),
    cmos(0x97, Smb, ZeroPage, 2, 5),
    op(0x98, Tya, Implied, 1, 2),
    op(0x99, Sta, AbsoluteY, 3, 5),
    op(0x9A, Txs, Implied, 1, 2),
    undoc(0x9B, 1, 1),
    cmos(0x9C, Stz, Absolute, 3, 4),
    op(0x9D, Sta, AbsoluteX, 3, 5),
    cmos(0x9E, Stz, AbsoluteX, 3, 5),
    cmos(0x9F, Bbs, BranchExt, 3, 5),
    // $A0
    op(0xA0, Ldy, Immediate, 2, 2),
    op(0xA1, Lda, XIndirect, 2, 6),
    op(0xA2, Ldx, Immediate, 2, 2),
    undoc(0xA3, 1, 1),
    op(0xA4, Ldy, ZeroPage, 2, 3),
    op(0xA5, Lda, ZeroPage, 2, 3),
    op(0xA6, Ldx, ZeroPage, 2, 3),
    cmos(0xA7, Smb, ZeroPage, 2, 5),
    op(0xA8, Tay, Implied, 1, 2),
    op(0xA9, Lda, Immediate, 2, 2),
    op(0xAA, Tax, Implied, 1, 2),
    undoc(0xAB, 1, 1),
    op(0xAC, Ldy, Absolute, 3, 4),
    op(0xAD, Lda, Absolute, 3, 4),
    op(0xAE, Ldx, Absolute, 3, 4),
    cmos(0xAF, Bbs, BranchExt, 3, 5),
    // $B0
    op(0xB0, Bcs, Relative, 2, 2),
    page(0xB1, Lda, IndirectY, 2, 5),
    cmos(0xB2, Lda, ZeroPageIndirect, 2, 5),
    undoc(0xB3, 1, 1),
    op(0xB4, Ldy, ZeroPageX, 2, 4),
    op(0xB5, Lda, ZeroPageX, 2, 4),
    op(0xB6, Ldx, ZeroPageY, 2, 4),
    cmos(0xB7, Smb, ZeroPage, 2, 5),
    op(0xB8, Clv, Implied, 1, 2),
    page(0xB9, Lda, AbsoluteY, 3, 4),
    op(0xBA, Tsx, Implied, 1, 2),
    undoc(0xBB, 1, 1),
    page(0xBC, Ldy, AbsoluteX, 3, 4),
    page(0xBD, Lda, AbsoluteX, 3, 4),
    page(0xBE, Ldx, AbsoluteY, 3, 4),
    cmos(0xBF, Bbs, BranchExt, 3, 5),
    // $C0
    op(0xC0, Cpy, Immediate, 2, 2),
    op(0xC1, Cmp, XIndirect, 2, 6),
    undoc(0xC2, 2, 2),
    undoc(0xC3, 1, 1),
    op(0xC4, Cpy, ZeroPage, 2, 3),
    op(0xC5, Cmp, ZeroPage, 2, 3),
    op(0xC6, Dec, ZeroPage, 2, 5),
    cmos(0xC7, Smb, ZeroPage, 2, 5),
    op(0xC8, Iny, Implied, 1, 2),
    op(0xC9, Cmp, Immediate, 2, 2),
    op(0xCA, Dex, Implied, 1, 2),
    cmos(0xCB, Wai, Implied, 1, 3),
    op(0xCC, Cpy, Absolute, 3, 4),
    op(0xCD, Cmp, Absolute, 3, 4),
    op(0xCE, Dec, Absolute, 3, 6),
    cmos(0xCF, Bbs, BranchExt, 3, 5),
    // $D0
    op(0xD0, Bne, Relative, 2, 2),
    page(0xD1, Cmp, IndirectY, 2, 5),
    cmos(0xD2, Cmp, ZeroPageIndirect, 2, 5),
    undoc(0xD3, 1, 1),
    undoc(0xD4, 2, 4),
    op(0xD5, Cmp, ZeroPageX, 2, 4),
    op(0xD6, Dec, ZeroPageX, 2, 6),
    cmos(0xD7, Smb, ZeroPage, 2, 5),
    op(0xD8, Cld, Implied, 1, 2),
    page(0xD9, Cmp, AbsoluteY, 3, 4),
    cmos(0xDA, Phx, Implied, 1, 3),
    cmos(0xDB, Stp, Implied, 1, 3),
    undoc(0xDC, 3, 4),
    page(0xDD, Cmp, AbsoluteX, 3, 4),
    op(0xDE, Dec, AbsoluteX, 3, 7),
    cmos(0xDF, Bbs, BranchExt, 3, 5),
    // $E0
    op(0xE0, Cpx, Immediate, 2, 2),
    op(0xE1, Sbc, XIndirect, 2, 6),
    undoc(0xE2, 2, 2),
    undoc(0xE3, 1, 1),
    op(0xE4, Cpx, ZeroPage, 2, 3),
    op(0xE5, Sbc, ZeroPage, 2, 3),
    op(0xE6, Inc, ZeroPage, 2, 5),
    cmos(0xE7, Smb, ZeroPage, 2, 5),
    op(0xE8, Inx, Implied, 1, 2),
    op(0xE9, Sbc, Immediate, 2, 2),
    op(0xEA, Nop, Implied, 1, 2),
    undoc(0xEB, 1, 1),
    op(0xEC, Cpx, Absolute, 3, 4),
    op(0xED, Sbc, Absolute, 3, 4),
    op(0xEE, Inc, Absolute, 3, 6),
    cmos(0xEF, Bbs, BranchExt, 3, 5),
    // $F0
    op(0xF0, Beq, Relative, 2, 2),
    page(0xF1, Sbc, IndirectY, 2, 5),
    cmos(0xF2, Sbc, ZeroPageIndirect, 2, 5),
    undoc(0xF3, 1, 1),
    undoc(0xF4, 2, 4),
    op(0xF5, Sbc, ZeroPageX, 2, 4),
    op(0xF6, Inc, ZeroPageX, 2, 6),
    cmos(0xF7, Smb, ZeroPage, 2, 5),
    op(0xF8, Sed, Implied, 1, 2),
    page(0xF9, Sbc, AbsoluteY, 3, 4),
    cmos(0xFA, Plx, Implied, 1, 4),
    undoc(0xFB, 1, 1),
    undoc(0xFC, 3, 4),
    page(0xFD, Sbc, AbsoluteX, 3, 4),
    op(0xFE, Inc, AbsoluteX, 3, 7),
    cmos(0xFF, Bbs, BranchExt, 3, 5),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_is_at_its_own_index() {
        for (index, record) in OPCODES.iter().enumerate() {
            assert_eq!(usize::from(record.opcode), index);
        }
    }

    #[test]
    fn every_entry_has_a_plausible_shape() {
        for record in &OPCODES {
            assert!(
                (1..=3).contains(&record.bytes),
                "${:02X}: bytes {}",
                record.opcode,
                record.bytes
            );
            assert!(
                record.cycles >= 1,
                "${:02X}: cycles {}",
                record.opcode,
                record.cycles
            );
        }
    }

    #[test]
    fn page_penalty_marks_only_indexed_reads() {
        for record in &OPCODES {
            if record.page_penalty {
                assert!(
                    matches!(
                        record.mode,
                        AddressMode::AbsoluteX | AddressMode::AbsoluteY | AddressMode::IndirectY
                    ),
                    "${:02X} flagged in mode {:?}",
                    record.opcode,
                    record.mode
                );
                // stores and read-modify-writes pay their fixed cost instead
                assert!(!matches!(
                    record.mnemonic,
                    Mnemonic::Sta | Mnemonic::Stz | Mnemonic::Asl | Mnemonic::Lsr
                        | Mnemonic::Rol | Mnemonic::Ror | Mnemonic::Inc | Mnemonic::Dec
                ));
            }
        }
    }

    #[test]
    fn bit_numbered_families_label_their_bit() {
        assert_eq!(OPCODES[0x0F].label(), "BBR0");
        assert_eq!(OPCODES[0x7F].label(), "BBR7");
        assert_eq!(OPCODES[0x8F].label(), "BBS0");
        assert_eq!(OPCODES[0xFF].label(), "BBS7");
        assert_eq!(OPCODES[0x07].label(), "RMB0");
        assert_eq!(OPCODES[0xF7].label(), "SMB7");
    }

    #[test]
    fn disassembly_formats_per_mode() {
        assert_eq!(OPCODES[0xA9].disassemble(0x55), "LDA #$55");
        assert_eq!(OPCODES[0x8D].disassemble(0x1234), "STA $1234");
        assert_eq!(OPCODES[0xBD].disassemble(0x1234), "LDA $1234,X");
        assert_eq!(OPCODES[0x6C].disassemble(0x1234), "JMP ($1234)");
        assert_eq!(OPCODES[0xB1].disassemble(0x0012), "LDA ($12),Y");
        assert_eq!(OPCODES[0x0A].disassemble(0), "ASL A");
        assert_eq!(OPCODES[0xEA].disassemble(0), "NOP");
        assert_eq!(OPCODES[0x0F].disassemble(0x1100), "BBR0 $00,$11");
        assert_eq!(OPCODES[0xB2].disassemble(0x0044), "LDA ($44)");
    }
}
