//! Linear decoding of CIL code streams, ECMA-335 III.
//!
//! Every opcode is decoded just far enough to step over its operand. Token operands are kept
//! so the loader can resolve the ones it is interested in; immediates and branch targets are
//! kept raw.

use crate::{file::parser::Parser, metadata::token::Token, Result};

/// `newobj` - allocate an object and call its constructor
pub const NEWOBJ: u8 = 0x73;
/// `stfld` - store into an instance field
pub const STFLD: u8 = 0x7D;
/// Prefix byte of the two-byte opcodes
pub const PREFIX_FE: u8 = 0xFE;

/// The encoding of an instruction's operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// No operand
    None,
    /// 1 byte immediate, local index or short branch
    Int8,
    /// 2 byte local or argument index
    Int16,
    /// 4 byte immediate or branch
    Int32,
    /// 8 byte immediate
    Int64,
    /// 4 byte metadata token
    Token,
    /// `switch` jump table
    Switch,
}

/// A decoded operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// No operand
    None,
    /// Immediate value or branch offset, as raw little-endian bits
    Immediate(u64),
    /// Metadata token
    Token(Token),
    /// Branch offsets of a `switch`
    Switch(Vec<u32>),
}

/// One decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    /// Offset of the instruction inside the code stream
    pub offset: usize,
    /// `0xFE` for two-byte opcodes, `0` otherwise
    pub prefix: u8,
    /// The opcode byte following the prefix
    pub opcode: u8,
    /// The operand
    pub operand: Operand,
}

impl RawInstruction {
    /// The token operand, if any
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        match self.operand {
            Operand::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// Operand encoding of a one-byte opcode, `None` for reserved opcodes
#[must_use]
pub fn operand_type(opcode: u8) -> Option<OperandType> {
    let operand = match opcode {
        0x00..=0x0D | 0x14..=0x1E | 0x25 | 0x26 | 0x2A | 0x46..=0x6E | 0x76 | 0x7A
        | 0x82..=0x8B | 0x8E | 0x90..=0xA2 | 0xB3..=0xBA | 0xC3 | 0xD1..=0xDC | 0xDF | 0xE0 => {
            OperandType::None
        }
        0x0E..=0x13 | 0x1F | 0x2B..=0x37 | 0xDE => OperandType::Int8,
        0x20 | 0x22 | 0x38..=0x44 | 0xDD => OperandType::Int32,
        0x21 | 0x23 => OperandType::Int64,
        0x27..=0x29 | 0x6F..=0x75 | 0x79 | 0x7B..=0x81 | 0x8C | 0x8D | 0x8F | 0xA3..=0xA5
        | 0xC2 | 0xC6 | 0xD0 => OperandType::Token,
        0x45 => OperandType::Switch,
        _ => return None,
    };

    Some(operand)
}

/// Operand encoding of a `0xFE` prefixed opcode, `None` for reserved opcodes
#[must_use]
pub fn operand_type_fe(opcode: u8) -> Option<OperandType> {
    let operand = match opcode {
        0x00..=0x05 | 0x0F | 0x11 | 0x13 | 0x14 | 0x17 | 0x18 | 0x1A | 0x1D | 0x1E => {
            OperandType::None
        }
        0x06 | 0x07 | 0x15 | 0x16 | 0x1C => OperandType::Token,
        0x09..=0x0E => OperandType::Int16,
        0x12 | 0x19 => OperandType::Int8,
        _ => return None,
    };

    Some(operand)
}

/// Decode the instruction at the parser position
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for a reserved opcode, or an error if the operand is
/// truncated
pub fn decode_instruction(parser: &mut Parser) -> Result<RawInstruction> {
    let offset = parser.pos();
    let first_byte = parser.read_le::<u8>()?;

    let (prefix, opcode, operand_type) = if first_byte == PREFIX_FE {
        let second_byte = parser.read_le::<u8>()?;
        match operand_type_fe(second_byte) {
            Some(operand_type) => (PREFIX_FE, second_byte, operand_type),
            None => {
                return Err(malformed_error!(
                    "Invalid opcode: FE {:02X} at {}",
                    second_byte,
                    offset
                ))
            }
        }
    } else {
        match operand_type(first_byte) {
            Some(operand_type) => (0, first_byte, operand_type),
            None => {
                return Err(malformed_error!(
                    "Invalid opcode: {:02X} at {}",
                    first_byte,
                    offset
                ))
            }
        }
    };

    let operand = match operand_type {
        OperandType::None => Operand::None,
        OperandType::Int8 => Operand::Immediate(u64::from(parser.read_le::<u8>()?)),
        OperandType::Int16 => Operand::Immediate(u64::from(parser.read_le::<u16>()?)),
        OperandType::Int32 => Operand::Immediate(u64::from(parser.read_le::<u32>()?)),
        OperandType::Int64 => Operand::Immediate(parser.read_le::<u64>()?),
        OperandType::Token => Operand::Token(Token::new(parser.read_le::<u32>()?)),
        OperandType::Switch => {
            let case_count = parser.read_le::<u32>()? as usize;
            if case_count.saturating_mul(4) > parser.len() - parser.pos() {
                return Err(out_of_bounds_error!());
            }

            let mut targets = Vec::with_capacity(case_count);
            for _ in 0..case_count {
                targets.push(parser.read_le::<u32>()?);
            }

            Operand::Switch(targets)
        }
    };

    Ok(RawInstruction {
        offset,
        prefix,
        opcode,
        operand,
    })
}

/// Decode a complete code stream
///
/// # Errors
/// Returns an error on the first invalid or truncated instruction
pub fn decode_stream(code: &[u8]) -> Result<Vec<RawInstruction>> {
    let mut parser = Parser::new(code);
    let mut instructions = Vec::new();

    while parser.has_more_data() {
        instructions.push(decode_instruction(&mut parser)?);
    }

    Ok(instructions)
}
