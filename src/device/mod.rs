//! The time traveller's wrist device: a register machine with sixteen
//! opcodes, an optional instruction-pointer register, and the solver that
//! recovers opcode numbering from observed samples.

mod cpu;
mod instruction;
mod opcode;
mod registers;
mod solver;

use thiserror::Error;

pub use cpu::{Cpu, MachineState, Program, RunState};
pub use instruction::{Instruction, RawInstruction};
pub use opcode::{Opcode, OpcodeSet, Operand};
pub use registers::{Registers, MAX_REGISTERS};
pub use solver::{ambiguous_count, parse_manual, resolve_mapping, Experiment, OpcodeMap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("register {index} does not exist (the device has {count})")]
    InvalidOperand {index: i64, count: usize},
    #[error("value {0} is not a valid opcode")]
    UnknownOpcode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("opcode slots {unresolved:?} stay ambiguous")]
    Ambiguous {unresolved: Vec<usize>},
    #[error("no operation is consistent with every sample of slot {slot}")]
    Contradiction {slot: usize},
}
