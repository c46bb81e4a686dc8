use crate::SizedRegisterEncoding;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSize {
    Byte,
    Word,
}

impl Display for OperandSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandSize::Byte => write!(f, "byte"),
            OperandSize::Word => write!(f, "word"),
        }
    }
}

/// Base register combination of an effective address, encoded in the `r/m` field when `mod`
/// is not `11`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

/// Base expressions, indexed by the 3-bit `r/m` encoding.
///
/// `bp` (`0b110`) is only reachable with a displacement; `mod == 00` with `r/m == 110` encodes a
/// direct address instead.
pub const EFFECTIVE_ADDRESSES: [&str; 8] = [
    "bx + si", "bx + di", "bp + si", "bp + di", "si", "di", "bp", "bx",
];

impl AddressingMode {
    pub const ALL: [AddressingMode; 8] = [
        AddressingMode::BxSi,
        AddressingMode::BxDi,
        AddressingMode::BpSi,
        AddressingMode::BpDi,
        AddressingMode::Si,
        AddressingMode::Di,
        AddressingMode::Bp,
        AddressingMode::Bx,
    ];

    pub fn expression(self) -> &'static str {
        EFFECTIVE_ADDRESSES[self as usize]
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.expression())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    None,
    Byte(i8),
    Word(i16),
}

impl Displacement {
    /// The displacement sign-extended to 16 bits.
    pub fn value(&self) -> i16 {
        match self {
            Displacement::None => 0,
            Displacement::Byte(offset) => *offset as i16,
            Displacement::Word(offset) => *offset,
        }
    }
}

/// Writes the offset term of an effective address, e.g. ` + 4` or ` - 37`. Zero writes nothing.
impl Display for Displacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = self.value() as i32;
        match value {
            0 => Ok(()),
            v if v < 0 => write!(f, " - {}", -v),
            v => write!(f, " + {}", v),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Absolute memory address, e.g. `[3458]`.
    Direct(u16, OperandSize),
    /// Memory addressed through base registers, e.g. `[bp + di - 37]`.
    Indirect(AddressingMode, Displacement, OperandSize),
    Register(SizedRegisterEncoding),
    Immediate(i16),
}

impl Operand {
    pub fn operand_size(&self) -> Option<OperandSize> {
        match self {
            Operand::Direct(_, operand_size) | Operand::Indirect(_, _, operand_size) => {
                Some(*operand_size)
            }
            Operand::Register(SizedRegisterEncoding(_, operand_size)) => Some(*operand_size),
            Operand::Immediate(_) => None,
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Direct(..) | Operand::Indirect(..))
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, Operand::Immediate(_))
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Direct(address, _) => write!(f, "[{}]", address),
            Operand::Indirect(addressing_mode, displacement, _) => {
                write!(f, "[{}{}]", addressing_mode, displacement)
            }
            Operand::Register(register) => write!(f, "{}", register),
            Operand::Immediate(value) => write!(f, "{}", value),
        }
    }
}
