//! Season archive adapters.
//!
//! - [`JsonlSeasonArchive`]: append-only JSONL file, one record per line
//! - [`InMemorySeasonArchive`]: for tests and runs without an archive path

mod in_memory;
mod jsonl_archive;

pub use in_memory::InMemorySeasonArchive;
pub use jsonl_archive::JsonlSeasonArchive;
