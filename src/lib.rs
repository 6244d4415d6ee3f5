pub mod days;
pub mod device;
mod error;

pub use error::{Error, Result};
