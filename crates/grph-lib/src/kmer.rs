//! K-mer extraction over sequence strings
//!
//! A k-mer is a contiguous window of exactly `k` characters. Windows are
//! counted in characters rather than bytes, so every function here is safe on
//! arbitrary `&str` input; for nucleotide text the two coincide.
//!
//! The overlap index only ever needs the first and last window of a sequence,
//! see [`terminal_kmers`]. [`find_kmers`] produces the full list.

use std::borrow::Borrow;
use std::fmt;

/// A leading or trailing k-mer used as an index key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerKey(String);

impl KmerKey {
    /// Wrap a k-mer string
    pub fn new(kmer: impl Into<String>) -> Self {
        Self(kmer.into())
    }

    /// The k-mer as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the k-mer in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True for the empty key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KmerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for KmerKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for KmerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KmerKey {
    fn from(kmer: &str) -> Self {
        Self(kmer.to_string())
    }
}

/// Byte offset of the `n`-th character boundary, `None` past the end
#[inline]
fn char_offset(s: &str, n: usize) -> Option<usize> {
    if s.is_ascii() {
        return (n <= s.len()).then_some(n);
    }
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .nth(n)
}

/// Find all k-mers of `sequence`, left to right
///
/// Returns `len - k + 1` windows of length `k`, or nothing when the sequence
/// is shorter than `k`.
///
/// # Examples
/// ```
/// use grph_lib::find_kmers;
///
/// assert_eq!(find_kmers("ACTG", 2), vec!["AC", "CT", "TG"]);
/// assert!(find_kmers("ACTG", 5).is_empty());
/// ```
pub fn find_kmers(sequence: &str, k: usize) -> Vec<&str> {
    let bounds: Vec<usize> = sequence
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(sequence.len()))
        .collect();
    let num_chars = bounds.len() - 1;
    if num_chars < k {
        return Vec::new();
    }
    (0..=num_chars - k)
        .map(|n| &sequence[bounds[n]..bounds[n + k]])
        .collect()
}

/// First k-mer of `sequence`, if it has one
pub fn leading_kmer(sequence: &str, k: usize) -> Option<&str> {
    char_offset(sequence, k).map(|end| &sequence[..end])
}

/// Last k-mer of `sequence`, if it has one
pub fn trailing_kmer(sequence: &str, k: usize) -> Option<&str> {
    let num_chars = if sequence.is_ascii() {
        sequence.len()
    } else {
        sequence.chars().count()
    };
    let start = num_chars.checked_sub(k)?;
    char_offset(sequence, start).map(|start| &sequence[start..])
}

/// Leading and trailing k-mers of `sequence`
///
/// Equivalent to the first and last element of [`find_kmers`], without
/// materialising the windows in between. `None` when the sequence is shorter
/// than `k`.
pub fn terminal_kmers(sequence: &str, k: usize) -> Option<(&str, &str)> {
    Some((leading_kmer(sequence, k)?, trailing_kmer(sequence, k)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_find_kmers() {
        assert!(find_kmers("", 1).is_empty());
        assert_eq!(find_kmers("ACTG", 1), vec!["A", "C", "T", "G"]);
        assert_eq!(find_kmers("ACTG", 2), vec!["AC", "CT", "TG"]);
        assert_eq!(find_kmers("ACTG", 3), vec!["ACT", "CTG"]);
        assert_eq!(find_kmers("ACTG", 4), vec!["ACTG"]);
        assert!(find_kmers("ACTG", 5).is_empty());
    }

    #[test]
    fn test_find_kmers_empty_for_any_k() {
        for k in 1..10 {
            assert!(find_kmers("", k).is_empty(), "k={}", k);
        }
    }

    #[test]
    fn test_find_kmers_multibyte() {
        assert_eq!(find_kmers("AéT", 2), vec!["Aé", "éT"]);
    }

    #[test]
    fn test_terminal_kmers() {
        assert_eq!(terminal_kmers("AAATTTT", 3), Some(("AAA", "TTT")));
        assert_eq!(terminal_kmers("ACG", 3), Some(("ACG", "ACG")));
        assert_eq!(terminal_kmers("AC", 3), None);
        assert_eq!(terminal_kmers("", 1), None);
    }

    #[test]
    fn test_leading_trailing_short_sequence() {
        assert_eq!(leading_kmer("ACGT", 5), None);
        assert_eq!(trailing_kmer("ACGT", 5), None);
        assert_eq!(leading_kmer("ACGT", 4), Some("ACGT"));
        assert_eq!(trailing_kmer("ACGT", 4), Some("ACGT"));
    }

    #[test]
    fn test_kmer_key() {
        let key = KmerKey::from("ACG");
        assert_eq!(key.as_str(), "ACG");
        assert_eq!(key.len(), 3);
        assert!(!key.is_empty());
        assert_eq!(key.to_string(), "ACG");
    }

    proptest! {
        #[test]
        fn prop_find_kmers_count_and_length(
            seq in "[ACGT]{0,40}",
            k in 1usize..12,
        ) {
            let kmers = find_kmers(&seq, k);
            prop_assert_eq!(kmers.len(), (seq.len() + 1).saturating_sub(k));
            for kmer in &kmers {
                prop_assert_eq!(kmer.len(), k);
            }
        }

        #[test]
        fn prop_terminal_kmers_match_find_kmers(
            seq in "[ACGT]{0,40}",
            k in 1usize..12,
        ) {
            let kmers = find_kmers(&seq, k);
            let expected = kmers.first().copied().zip(kmers.last().copied());
            prop_assert_eq!(terminal_kmers(&seq, k), expected);
        }
    }
}
