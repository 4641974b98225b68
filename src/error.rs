use thiserror::Error;

/// Matrix operand named in an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
    C,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operand::A => "A",
            Operand::B => "B",
            Operand::C => "C",
        };
        f.write_str(name)
    }
}

/// Every way a GEMM call can be rejected. All checks run before the first
/// write to C, so an error always leaves C untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GemmError {
    #[error("argument error: operand {operand} is null")]
    NullOperand { operand: Operand },
    #[error("invalid block sizes mc={mc} kc={kc} nb={nb} (all > 0, mc a multiple of 4)")]
    InvalidBlockSizes { mc: usize, kc: usize, nb: usize },
    #[error("n={n} exceeds the packed-B panel capacity nb={nb}")]
    CapacityExceeded { n: usize, nb: usize },
    #[error("shape mismatch: A is {a:?}, B is {b:?}, C is {c:?}")]
    ShapeMismatch {
        a: (usize, usize),
        b: (usize, usize),
        c: (usize, usize),
    },
    #[error("leading dimension of {operand} is {ld}, needs at least {min}")]
    LeadingDimension { operand: Operand, ld: usize, min: usize },
    #[error("leading dimension {ld} of {operand} overflows the addressable range")]
    AddressOverflow { operand: Operand, ld: usize },
    #[error("buffer for {operand} holds {len} elements, needs {required}")]
    BufferTooSmall {
        operand: Operand,
        len: usize,
        required: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GemmError>;
