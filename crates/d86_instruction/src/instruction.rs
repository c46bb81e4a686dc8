use crate::{Operand, Operation};
use std::fmt::{Display, Formatter};

/// Representation of a decoded 8086 instruction with a destination and a source operand.
///
/// ```rust
/// use d86_instruction::*;
///
/// // add word [bp + di - 37], 29
/// let i = Instruction::new(
///     Operation::ADD,
///     Operand::Indirect(
///         AddressingMode::BpDi,
///         Displacement::Byte(-37),
///         OperandSize::Word,
///     ),
///     Operand::Immediate(29),
/// );
///
/// assert_eq!(i.to_string(), "add word [bp + di - 37], 29");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub destination: Operand,
    pub source: Operand,
}

impl Instruction {
    /// Create a new instruction with the given [Operation] and operands, already in
    /// destination/source order.
    pub fn new(operation: Operation, destination: Operand, source: Operand) -> Self {
        Self {
            operation,
            destination,
            source,
        }
    }

    /// Create a new instruction from a register operand and a register/memory operand. When
    /// `reg_is_destination` is set, the register is written first.
    pub fn with_direction(
        operation: Operation,
        reg_is_destination: bool,
        reg: Operand,
        reg_mem: Operand,
    ) -> Self {
        if reg_is_destination {
            Self::new(operation, reg, reg_mem)
        } else {
            Self::new(operation, reg_mem, reg)
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.operation)?;

        // Neither a memory operand nor an immediate carries a size on its own.
        if self.destination.is_memory() && self.source.is_immediate() {
            if let Some(operand_size) = self.destination.operand_size() {
                write!(f, "{} ", operand_size)?;
            }
        }

        write!(f, "{}, {}", self.destination, self.source)
    }
}
