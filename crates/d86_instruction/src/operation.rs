#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    MOV, // Move
    ADD, // Add
    SUB, // Subtract
    CMP, // Compare
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Operation::*;
        write!(
            f,
            "{}",
            match self {
                MOV => "mov",
                ADD => "add",
                SUB => "sub",
                CMP => "cmp",
            }
        )
    }
}
