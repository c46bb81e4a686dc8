use crate::errors::Result;
use crate::traits::ReadExt;
use crate::FromLowBits;
use d86_instruction::{
    AddressingMode, Displacement, Operand, OperandSize, RegisterEncoding, SizedRegisterEncoding,
};

/// The second operand described by the `mod` and `r/m` fields.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOrMemory {
    Direct(u16),
    Indirect(AddressingMode, Displacement),
    Register(RegisterEncoding),
}

impl RegisterOrMemory {
    /// Resolves the `mod` and `r/m` fields of `mod_rm_byte`, reading any displacement or direct
    /// address that follows it.
    pub fn try_from_modrm(mod_rm_byte: u8, it: &mut impl ReadExt) -> Result<Self> {
        let mode = mod_rm_byte >> 6;
        let rm = mod_rm_byte & 0b111;

        Ok(match mode {
            0b00 if rm == 0b110 => RegisterOrMemory::Direct(it.read_u16()?),
            0b00 => RegisterOrMemory::Indirect(AddressingMode::from_low_bits(rm), Displacement::None),
            0b01 => RegisterOrMemory::Indirect(
                AddressingMode::from_low_bits(rm),
                it.read_displacement(OperandSize::Byte)?,
            ),
            0b10 => RegisterOrMemory::Indirect(
                AddressingMode::from_low_bits(rm),
                it.read_displacement(OperandSize::Word)?,
            ),
            _ => RegisterOrMemory::Register(RegisterEncoding::from_low_bits(rm)),
        })
    }

    pub fn into_operand(self, operand_size: OperandSize) -> Operand {
        match self {
            RegisterOrMemory::Direct(address) => Operand::Direct(address, operand_size),
            RegisterOrMemory::Indirect(addressing_mode, displacement) => {
                Operand::Indirect(addressing_mode, displacement, operand_size)
            }
            RegisterOrMemory::Register(register) => {
                Operand::Register(SizedRegisterEncoding(register, operand_size))
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ModRegRM {
    pub register: RegisterEncoding,
    pub register_or_memory: RegisterOrMemory,
}

impl ModRegRM {
    pub fn new(register: RegisterEncoding, register_or_memory: RegisterOrMemory) -> Self {
        Self {
            register,
            register_or_memory,
        }
    }

    pub fn try_from_byte(mod_rm_byte: u8, it: &mut impl ReadExt) -> Result<Self> {
        let register = RegisterEncoding::from_low_bits(mod_rm_byte >> 3);
        let register_or_memory = RegisterOrMemory::try_from_modrm(mod_rm_byte, it)?;

        Ok(Self::new(register, register_or_memory))
    }
}
