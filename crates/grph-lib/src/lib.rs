// grph: Overlap graphs from FASTA records
//
// Builds the directed overlap graph of a sequence collection: an edge A -> B
// exists when the trailing k-mer of A equals the leading k-mer of B.

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod config;
pub mod kmer;
pub mod record;
pub mod parse;
pub mod buckets;
pub mod overlap;

// Re-export common types at crate root
pub use config::{parse_overlap, OverlapConfig};
pub use error::{GrphError, Result};
pub use kmer::{find_kmers, leading_kmer, terminal_kmers, trailing_kmer, KmerKey};
pub use record::SequenceRecord;
pub use parse::{open_input, parse_records, parse_records_from_path, read_records};
pub use buckets::KmerBuckets;
pub use overlap::{
    build_overlap_pairs, IndexSummary, OverlapIndex, OverlapIndexBuilder, OverlapPair,
};

/// Version information
pub fn version() -> (u8, u8, u8) {
    constants::VERSION
}
