use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::{BytecodeError, Opcode, OperandKind, Result};

/// One decoded instruction: its offset inside the method body, the opcode
/// and the raw operand bytes that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub offset: usize,
    pub opcode: Opcode,
    pub operands: Vec<u8>,
}

impl Instruction {
    pub fn operand_u8(&self) -> Option<u8> {
        self.operands.first().copied()
    }

    pub fn operand_i8(&self) -> Option<i8> {
        self.operand_u8().map(|b| b as i8)
    }

    pub fn operand_u16(&self) -> Option<u16> {
        self.operands.get(..2).map(BigEndian::read_u16)
    }

    pub fn operand_i16(&self) -> Option<i16> {
        self.operands.get(..2).map(BigEndian::read_i16)
    }

    pub fn operand_i32(&self) -> Option<i32> {
        self.operands.get(..4).map(BigEndian::read_i32)
    }

    /// The jump table of a tableswitch instruction.
    pub fn range_table(&self) -> Option<RangeTable> {
        if self.opcode != Opcode::Tableswitch {
            return None;
        }

        let data = self.operands.get(switch_padding(self.offset + 1)..)?;
        let default = BigEndian::read_i32(data.get(0..4)?);
        let low = BigEndian::read_i32(data.get(4..8)?);
        let high = BigEndian::read_i32(data.get(8..12)?);

        let count = usize::try_from(high as i64 - low as i64 + 1).ok()?;
        let mut jumps = Vec::with_capacity(count);
        for i in 0..count {
            jumps.push(BigEndian::read_i32(data.get(12 + 4 * i..16 + 4 * i)?));
        }

        Some(RangeTable {
            default,
            low,
            high,
            jumps,
        })
    }

    /// The match pairs of a lookupswitch instruction.
    pub fn lookup_table(&self) -> Option<LookupTable> {
        if self.opcode != Opcode::Lookupswitch {
            return None;
        }

        let data = self.operands.get(switch_padding(self.offset + 1)..)?;
        let default = BigEndian::read_i32(data.get(0..4)?);
        let npairs = BigEndian::read_i32(data.get(4..8)?);

        let count = usize::try_from(npairs).ok()?;
        let mut match_offsets = Vec::with_capacity(count);
        for i in 0..count {
            match_offsets.push((
                BigEndian::read_i32(data.get(8 + 8 * i..12 + 8 * i)?),
                BigEndian::read_i32(data.get(12 + 8 * i..16 + 8 * i)?),
            ));
        }

        Some(LookupTable {
            default,
            match_offsets,
        })
    }

    /// The modified opcode behind a wide prefix, its 16-bit local index
    /// and, for iinc, the widened increment.
    pub fn wide_target(&self) -> Option<(Opcode, u16, Option<i16>)> {
        if self.opcode != Opcode::Wide {
            return None;
        }

        let target = Opcode::from_byte(*self.operands.first()?)?;
        let index = BigEndian::read_u16(self.operands.get(1..3)?);
        let constant = self.operands.get(3..5).map(BigEndian::read_i16);

        Some((target, index, constant))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.offset, self.opcode.mnemonic())?;
        for byte in &self.operands {
            write!(f, " {:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct RangeTable {
    pub default: i32,
    pub low: i32,
    pub high: i32,
    pub jumps: Vec<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LookupTable {
    pub default: i32,
    pub match_offsets: Vec<(i32, i32)>,
}

/// Decodes a method body into its instruction sequence. The cursor moves
/// strictly left to right and must land exactly on the end of the buffer;
/// anything else desyncs every later offset and is reported as an error.
pub fn decode(code: &[u8]) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();
    let mut ix = 0;

    while ix < code.len() {
        let offset = ix;
        let byte = code[ix];
        let opcode = Opcode::from_byte(byte).ok_or(BytecodeError::UnknownOpcode {
            opcode: byte,
            offset,
        })?;
        ix += 1;

        let width = match opcode.operand_kind().fixed_width() {
            Some(width) => width,
            None if opcode == Opcode::Tableswitch => table_switch_width(code, offset)?,
            None if opcode == Opcode::Lookupswitch => lookup_switch_width(code, offset)?,
            None => wide_width(code, offset)?,
        };

        let operands = code
            .get(ix..ix + width)
            .ok_or(BytecodeError::TruncatedOperand {
                mnemonic: opcode.mnemonic(),
                offset,
            })?
            .to_vec();
        ix += width;

        instructions.push(Instruction {
            offset,
            opcode,
            operands,
        });
    }

    Ok(instructions)
}

/// Pad bytes needed to 4-align a switch operand starting at `start`,
/// measured from the beginning of the method body.
fn switch_padding(start: usize) -> usize {
    ((start + 3) & !3) - start
}

/// tableswitch: padding, then default/low/high, then `high - low + 1`
/// 32-bit jump offsets. The header has to be read before the total operand
/// width is known.
fn table_switch_width(code: &[u8], offset: usize) -> Result<usize> {
    let pad = switch_padding(offset + 1);
    let header = offset + 1 + pad;
    let low = read_i32(code, header + 4, Opcode::Tableswitch, offset)?;
    let high = read_i32(code, header + 8, Opcode::Tableswitch, offset)?;

    if low > high {
        return Err(BytecodeError::BadSwitchBounds {
            mnemonic: Opcode::Tableswitch.mnemonic(),
            offset,
        });
    }

    let jumps = (high as i64 - low as i64 + 1) as usize;
    Ok(pad + 12 + 4 * jumps)
}

/// lookupswitch: padding, then default/npairs, then `npairs` match/offset
/// pairs.
fn lookup_switch_width(code: &[u8], offset: usize) -> Result<usize> {
    let pad = switch_padding(offset + 1);
    let header = offset + 1 + pad;
    let npairs = read_i32(code, header + 4, Opcode::Lookupswitch, offset)?;

    if npairs < 0 {
        return Err(BytecodeError::BadSwitchBounds {
            mnemonic: Opcode::Lookupswitch.mnemonic(),
            offset,
        });
    }

    Ok(pad + 8 + 8 * npairs as usize)
}

/// wide doubles the width of the next opcode's local-variable operand; only
/// the load/store family, ret and iinc can follow it.
fn wide_width(code: &[u8], offset: usize) -> Result<usize> {
    let byte = *code
        .get(offset + 1)
        .ok_or(BytecodeError::TruncatedOperand {
            mnemonic: Opcode::Wide.mnemonic(),
            offset,
        })?;

    match Opcode::from_byte(byte).map(Opcode::operand_kind) {
        Some(OperandKind::LocalIndex) => Ok(3),
        Some(OperandKind::LocalIndexAndConst) => Ok(5),
        _ => Err(BytecodeError::InvalidWideTarget {
            opcode: byte,
            offset,
        }),
    }
}

fn read_i32(code: &[u8], pos: usize, opcode: Opcode, offset: usize) -> Result<i32> {
    code.get(pos..pos + 4)
        .map(BigEndian::read_i32)
        .ok_or(BytecodeError::TruncatedOperand {
            mnemonic: opcode.mnemonic(),
            offset,
        })
}
