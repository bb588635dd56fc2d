//! Ordered k-mer buckets
//!
//! A multi-map from k-mer key to the ids of the records that own that key.
//! Buckets are created on first insertion, and both the order of keys and
//! the order of ids inside a bucket follow insertion order, so iteration is
//! deterministic for a given input.

use crate::kmer::KmerKey;
use ahash::AHashMap;

/// Multi-map from k-mer to record ids, in insertion order
#[derive(Debug, Clone, Default)]
pub struct KmerBuckets {
    /// Key -> position in `buckets`
    slots: AHashMap<KmerKey, usize>,
    buckets: Vec<(KmerKey, Vec<String>)>,
    num_ids: usize,
}

impl KmerBuckets {
    /// Create an empty bucket map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the bucket of `kmer`, creating the bucket if needed
    pub fn insert(&mut self, kmer: &str, id: impl Into<String>) {
        let id = id.into();
        match self.slots.get(kmer) {
            Some(&slot) => self.buckets[slot].1.push(id),
            None => {
                let key = KmerKey::from(kmer);
                self.slots.insert(key.clone(), self.buckets.len());
                self.buckets.push((key, vec![id]));
            }
        }
        self.num_ids += 1;
    }

    /// Ids whose k-mer equals `kmer`, in insertion order
    pub fn get(&self, kmer: &str) -> Option<&[String]> {
        self.slots
            .get(kmer)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    /// True if some id was inserted under `kmer`
    pub fn contains_key(&self, kmer: &str) -> bool {
        self.slots.contains_key(kmer)
    }

    /// Iterate buckets in key insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&KmerKey, &[String])> + '_ {
        self.buckets.iter().map(|(key, ids)| (key, ids.as_slice()))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &KmerKey> + '_ {
        self.buckets.iter().map(|(key, _)| key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of ids across all buckets
    pub fn num_ids(&self) -> usize {
        self.num_ids
    }
}
