//! # `coff-write`
//!
//! The `coff-write` crate provides encoders for the pieces of a COFF object
//! file with a bit-exact layout contract: the string table, and the fixed-size
//! auxiliary symbol records for section definitions and weak externals.
//!
//! The types in [`write`] are small value objects. Each packs to the exact
//! byte layout consumed by linkers; callers treat the packed bytes as opaque
//! blobs and concatenate them at the appropriate file offsets. Assembling a
//! complete object file (section headers, relocations, the primary symbol
//! table, file headers) is left to the caller, as is all file I/O.
//!
//! Reading COFF files back is out of scope; this crate is write-only.
//!
//! ## Example
//!
//! ```
//! use coff_write::write::{AuxWeakExternal, StringTable, WeakExternalSearch};
//!
//! // Names too long for the symbol table's inline field go in the string
//! // table, and symbols refer to them by offset.
//! let mut strtab = StringTable::new();
//! strtab.append(b"an_inconveniently_long_symbol_name")?;
//! assert_eq!(strtab.offset_of(b"an_inconveniently_long_symbol_name"), Some(4));
//!
//! // An auxiliary record follows its primary symbol table entry.
//! let aux = AuxWeakExternal {
//!     tag_index: 5,
//!     characteristics: WeakExternalSearch::NoLibrary,
//! };
//! let mut buffer = aux.pack().to_vec();
//! buffer.extend_from_slice(&strtab.pack()?);
//! # Ok::<(), coff_write::write::Error>(())
//! ```
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![no_std]

#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[allow(unused_imports)]
extern crate std;

pub mod coff;
pub mod endian;

mod pod;
pub use pod::{bytes_of, bytes_of_slice, Pod};

pub mod write;
