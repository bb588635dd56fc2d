//! Overlap index and pair enumeration
//!
//! Records are classified in a single left-to-right pass by their leading and
//! trailing k-mer. Once the pass is complete the index is frozen and the
//! overlap pairs are enumerated: for every k-mer that is both some record's
//! trailing k-mer and some record's leading k-mer, each (end owner, start
//! owner) combination with distinct ids is an edge of the overlap graph.
//!
//! Pairs for one k-mer are emitted end bucket first, start bucket second,
//! both in input order. K-mers themselves are visited in the order their end
//! bucket was first filled.

use crate::buckets::KmerBuckets;
use crate::kmer::{terminal_kmers, KmerKey};
use crate::record::SequenceRecord;
use std::fmt;
use tracing::debug;

/// An edge of the overlap graph
///
/// The last `k` characters of `source` equal the first `k` characters of
/// `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlapPair {
    /// Id of the record owning the matching suffix
    pub source: String,
    /// Id of the record owning the matching prefix
    pub target: String,
}

impl OverlapPair {
    /// Create a pair from suffix owner and prefix owner
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for OverlapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.target)
    }
}

/// Statistics about an overlap index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Overlap length
    pub k: usize,
    /// Records offered to the builder
    pub records_seen: usize,
    /// Records with at least `k` characters
    pub records_indexed: usize,
    /// Records shorter than `k`, ignored
    pub records_skipped: usize,
    /// Distinct leading k-mers
    pub start_keys: usize,
    /// Distinct trailing k-mers
    pub end_keys: usize,
    /// K-mers that are both leading and trailing
    pub shared_keys: usize,
}

impl IndexSummary {
    /// Log the summary via tracing
    pub fn print_summary(&self) {
        debug!("Overlap Index Summary (k = {}):", self.k);
        debug!("  records seen: {}", self.records_seen);
        debug!("  records indexed: {}", self.records_indexed);
        debug!("  records skipped (shorter than k): {}", self.records_skipped);
        debug!("  distinct leading k-mers: {}", self.start_keys);
        debug!("  distinct trailing k-mers: {}", self.end_keys);
        debug!("  shared k-mers: {}", self.shared_keys);
    }
}

/// Builder that classifies records by their leading and trailing k-mer
#[derive(Debug, Clone)]
pub struct OverlapIndexBuilder {
    k: usize,
    starts: KmerBuckets,
    ends: KmerBuckets,
    records_seen: usize,
    records_skipped: usize,
}

impl OverlapIndexBuilder {
    /// Create an empty builder for overlap length `k`
    ///
    /// `k` is expected to be at least 1; see [`crate::OverlapConfig`].
    pub fn new(k: usize) -> Self {
        Self {
            k,
            starts: KmerBuckets::new(),
            ends: KmerBuckets::new(),
            records_seen: 0,
            records_skipped: 0,
        }
    }

    /// Overlap length
    pub fn k(&self) -> usize {
        self.k
    }

    /// Classify one record
    ///
    /// Returns `false` if the record is shorter than `k` and was ignored.
    pub fn add_record(&mut self, record: &SequenceRecord) -> bool {
        self.add(&record.id, &record.sequence)
    }

    /// Classify one `(id, sequence)` pair
    pub fn add(&mut self, id: &str, sequence: &str) -> bool {
        self.records_seen += 1;
        match terminal_kmers(sequence, self.k) {
            Some((first, last)) => {
                self.starts.insert(first, id);
                self.ends.insert(last, id);
                true
            }
            None => {
                debug!("skipping '{}': shorter than k = {}", id, self.k);
                self.records_skipped += 1;
                false
            }
        }
    }

    /// Freeze the index
    pub fn build(self) -> OverlapIndex {
        OverlapIndex {
            k: self.k,
            starts: self.starts,
            ends: self.ends,
            records_seen: self.records_seen,
            records_skipped: self.records_skipped,
        }
    }
}

impl Extend<SequenceRecord> for OverlapIndexBuilder {
    fn extend<I: IntoIterator<Item = SequenceRecord>>(&mut self, records: I) {
        for record in records {
            self.add_record(&record);
        }
    }
}

/// Read-only index of records by leading and trailing k-mer
#[derive(Debug, Clone)]
pub struct OverlapIndex {
    k: usize,
    starts: KmerBuckets,
    ends: KmerBuckets,
    records_seen: usize,
    records_skipped: usize,
}

impl OverlapIndex {
    /// Build an index from records in arrival order
    pub fn from_records<I>(records: I, k: usize) -> Self
    where
        I: IntoIterator<Item = SequenceRecord>,
    {
        let mut builder = OverlapIndexBuilder::new(k);
        builder.extend(records);
        builder.build()
    }

    /// Overlap length
    pub fn k(&self) -> usize {
        self.k
    }

    /// Records grouped by leading k-mer
    pub fn starts(&self) -> &KmerBuckets {
        &self.starts
    }

    /// Records grouped by trailing k-mer
    pub fn ends(&self) -> &KmerBuckets {
        &self.ends
    }

    /// K-mers that are a trailing k-mer and a leading k-mer
    pub fn shared_keys(&self) -> impl Iterator<Item = &KmerKey> + '_ {
        self.ends
            .keys()
            .filter(move |key| self.starts.contains_key(key.as_str()))
    }

    /// Enumerate the overlap pairs
    pub fn pairs(&self) -> impl Iterator<Item = OverlapPair> + '_ {
        self.ends
            .iter()
            .filter_map(move |(key, ends)| {
                self.starts.get(key.as_str()).map(|starts| (ends, starts))
            })
            .flat_map(|(ends, starts)| {
                ends.iter().flat_map(move |source| {
                    starts
                        .iter()
                        .filter(move |target| *target != source)
                        .map(move |target| OverlapPair::new(source.as_str(), target.as_str()))
                })
            })
    }

    /// Collect the overlap pairs
    pub fn overlap_pairs(&self) -> Vec<OverlapPair> {
        self.pairs().collect()
    }

    /// Index statistics
    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            k: self.k,
            records_seen: self.records_seen,
            records_indexed: self.records_seen - self.records_skipped,
            records_skipped: self.records_skipped,
            start_keys: self.starts.len(),
            end_keys: self.ends.len(),
            shared_keys: self.shared_keys().count(),
        }
    }

    /// Dump both bucket maps at debug level
    pub fn log_buckets(&self) {
        debug!("STARTS");
        for (key, ids) in self.starts.iter() {
            debug!("  {}: {:?}", key, ids);
        }
        debug!("ENDS");
        for (key, ids) in self.ends.iter() {
            debug!("  {}: {:?}", key, ids);
        }
    }
}

/// Build the overlap pairs of `records` for overlap length `k`
///
/// Each pair is `(suffix owner, prefix owner)`. Records shorter than `k` take
/// no part, and no record is paired with itself.
///
/// # Examples
/// ```
/// use grph_lib::{build_overlap_pairs, OverlapPair, SequenceRecord};
///
/// let records = vec![
///     SequenceRecord::new("a", "GATTACA"),
///     SequenceRecord::new("b", "ACATT"),
/// ];
/// assert_eq!(build_overlap_pairs(records, 3), vec![OverlapPair::new("a", "b")]);
/// ```
pub fn build_overlap_pairs<I>(records: I, k: usize) -> Vec<OverlapPair>
where
    I: IntoIterator<Item = SequenceRecord>,
{
    OverlapIndex::from_records(records, k).overlap_pairs()
}
