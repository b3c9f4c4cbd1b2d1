// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-6.html

mod decoder;
mod error;
mod opcode;

pub use decoder::{decode, Instruction, LookupTable, RangeTable};
pub use error::BytecodeError;
pub use opcode::{Opcode, OperandKind};

pub type Result<T, E = BytecodeError> = std::result::Result<T, E>;
