use crate::OperandSize;

/// One of the 8 general purpose register slots. Which name the slot has depends on the
/// [OperandSize] of the instruction, e.g. `AlAx` is `al` for byte operations and `ax` for word
/// operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterEncoding {
    AlAx,
    ClCx,
    DlDx,
    BlBx,
    AhSp,
    ChBp,
    DhSi,
    BhDi,
}

impl RegisterEncoding {
    pub const ALL: [RegisterEncoding; 8] = [
        RegisterEncoding::AlAx,
        RegisterEncoding::ClCx,
        RegisterEncoding::DlDx,
        RegisterEncoding::BlBx,
        RegisterEncoding::AhSp,
        RegisterEncoding::ChBp,
        RegisterEncoding::DhSi,
        RegisterEncoding::BhDi,
    ];
}

/// Register names, indexed by [OperandSize] and then by the 3-bit register encoding.
pub const REGISTER_NAMES: [[&str; 8]; 2] = [
    ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"],
    ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"],
];

/// A register slot together with the size it is accessed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedRegisterEncoding(pub RegisterEncoding, pub OperandSize);

impl SizedRegisterEncoding {
    pub fn name(&self) -> &'static str {
        REGISTER_NAMES[self.1 as usize][self.0 as usize]
    }
}

impl std::fmt::Display for SizedRegisterEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
