use crate::errors::{DecodeError, Result};
use crate::{ByteSource, ModRegRM};
use d86_instruction::{Displacement, OperandSize};
use std::io::BufRead;

pub trait OpCodeExt {
    fn operand_size(self) -> OperandSize;

    /// The `d` bit: the `reg` field names the destination operand.
    fn reg_is_destination(self) -> bool;

    /// The `s` bit of the immediate group: the immediate is a single byte, sign-extended.
    fn sign_extends(self) -> bool;
}

impl OpCodeExt for u8 {
    fn operand_size(self) -> OperandSize {
        if self & 1 == 0 {
            OperandSize::Byte
        } else {
            OperandSize::Word
        }
    }

    fn reg_is_destination(self) -> bool {
        (self >> 1) & 1 == 1
    }

    fn sign_extends(self) -> bool {
        (self >> 1) & 1 == 1
    }
}

/// Reads the fields following the op code. Every read here is part of an instruction that has
/// already started, so running out of bytes is a [DecodeError::TruncatedStream].
pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    /// Reads a 16-bit value, or a single byte sign-extended to 16 bits.
    fn next_value(&mut self, word: bool) -> Result<i16> {
        if word {
            Ok(self.read_u16()? as i16)
        } else {
            Ok(self.read_u8()? as i8 as i16)
        }
    }

    fn read_immediate(&mut self, data_size: OperandSize) -> Result<i16> {
        self.next_value(data_size == OperandSize::Word)
    }

    fn read_displacement(&mut self, operand_size: OperandSize) -> Result<Displacement> {
        Ok(match operand_size {
            OperandSize::Byte => Displacement::Byte(self.read_u8()? as i8),
            OperandSize::Word => Displacement::Word(self.read_u16()? as i16),
        })
    }

    fn read_mrrm(&mut self) -> Result<ModRegRM>
    where
        Self: Sized,
    {
        let mrrm_byte = self.read_u8()?;
        ModRegRM::try_from_byte(mrrm_byte, self)
    }
}

impl<R: BufRead> ReadExt for ByteSource<R> {
    fn read_u8(&mut self) -> Result<u8> {
        match self.next_byte()? {
            Some(byte) => Ok(byte),
            None => Err(DecodeError::TruncatedStream {
                offset: self.position(),
            }),
        }
    }
}
