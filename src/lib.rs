//! # Compressed full-text indexing for nucleotide sequences
//!
//! This library builds and queries an FM-index over very long DNA
//! sequences packed at 2 bits per base, supporting exact substring
//! search without ever holding an uncompressed suffix array in memory
//! after construction.
//!
//! ## Core pipeline
//!
//! 1. **Packing**: [`PackedDna`] stores four bases per byte.
//! 2. **Suffix sorting**: [`suffix_array`] runs SACA-K — linear time,
//!    constant extra workspace via induced sorting and recursive
//!    problem reduction.
//! 3. **Indexing**: [`FmIndex::build`] extracts the Burrows-Wheeler
//!    transform, samples every 32nd suffix position, and layers a
//!    two-level rank structure on top; the suffix array is then
//!    discarded.
//! 4. **Queries**: backward search ([`FmIndex::count`],
//!    [`FmIndex::search`], [`FmIndex::locate`]), maximal mappable
//!    suffixes ([`FmIndex::mms`]), and position recovery
//!    ([`FmIndex::sa_position`]) all run against the compressed
//!    representation only.
//!
//! ## Usage example
//!
//! ```
//! use franklin::{encode_pattern, FmIndex, PackedDna};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = PackedDna::from_ascii(b"GATTACAGATTACA")?;
//! let index = FmIndex::build(&text)?;
//!
//! assert_eq!(index.count(&encode_pattern(b"TTA")?)?, 2);
//! let offset = index.locate(&encode_pattern(b"GATT")?)?.unwrap();
//! assert!(offset == 0 || offset == 7);
//! # Ok(())
//! # }
//! ```
//!
//! Once built, the index is immutable: queries take `&self` and can be
//! shared across threads without synchronization.

#![warn(missing_docs, missing_debug_implementations)]

pub mod index;
pub mod sequence;
pub mod suffix;

pub use index::{BuildError, FmIndex, QueryError, SuffixMatch};
pub use sequence::{encode_pattern, Base, PackedDna, SequenceError, WILDCARD};
pub use suffix::{suffix_array, SuffixArrayError};
