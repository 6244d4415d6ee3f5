use std::num::ParseIntError;

use thiserror::Error;

use crate::device::{DeviceError, MappingError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("cannot parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Regex(#[from] regex::Error),
    #[error("no solution: {0}")]
    Unsolvable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("day {0} has no solver")]
    NoSolver(u8),
}

impl Error {
    pub fn parse(what: &'static str, input: impl Into<String>) -> Self {
        Error::Parse { what, input: input.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
