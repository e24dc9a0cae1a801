//! Interface for writing COFF object file components.
//!
//! This module provides [`StringTable`] for the deduplicated string table,
//! and [`AuxSectionDefinition`] and [`AuxWeakExternal`] for the two kinds of
//! auxiliary symbol record. Each type packs to the exact byte layout the
//! format mandates; an object file assembler concatenates the packed bytes
//! at the appropriate offsets.

use core::fmt;
use core::result;

mod coff;
pub use coff::{
    section_checksum, AuxSectionDefinition, AuxWeakExternal, ComdatType, WeakExternalSearch,
};

mod string;
pub use string::StringTable;

mod util;
pub use util::WritableBuffer;

/// The error type used within the write module.
///
/// All errors are detected synchronously by the call whose contract would be
/// violated, before any output is produced; nothing is retried or recovered
/// internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value passed to [`StringTable::append`] is not a valid encoded
    /// string.
    InvalidInput(&'static str),
    /// A table or buffer has outgrown what its size field can address.
    ///
    /// Contains the size in bytes that could not be represented.
    CapacityExceeded(usize),
    /// A record field was given a value outside its legal set.
    InvalidField {
        /// The name of the rejected field.
        name: &'static str,
        /// The rejected value.
        value: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            Error::CapacityExceeded(size) => {
                write!(f, "size {:#x} exceeds the 32-bit size field", size)
            }
            Error::InvalidField { name, value } => {
                write!(f, "invalid value {:#x} for field `{}`", value, name)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The result type used within the write module.
pub type Result<T> = result::Result<T, Error>;
