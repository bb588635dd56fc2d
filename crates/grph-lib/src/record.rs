//! Sequence records as produced by the FASTA parser

/// One FASTA record: an identifier and its full sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Record identifier (header text up to the first whitespace)
    pub id: String,
    /// Sequence with line breaks removed
    pub sequence: String,
}

impl SequenceRecord {
    /// Create a record from an id and a sequence
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Sequence length in characters
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    /// True when the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl<I: Into<String>, S: Into<String>> From<(I, S)> for SequenceRecord {
    fn from((id, sequence): (I, S)) -> Self {
        Self::new(id, sequence)
    }
}
