//! FASTA parsing
//!
//! Reads records from a FASTA file or any open reader using `needletail`,
//! with transparent gzip decompression. Records are handed to a callback in
//! file order. FASTQ input is rejected: only FASTA records are accepted.

use crate::error::{GrphError, Result};
use crate::record::SequenceRecord;
use needletail::errors::ParseErrorKind;
use needletail::parse_fastx_reader;
use needletail::parser::Format;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Record id: header text up to the first whitespace
fn record_id(header: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
    let end = header
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(header.len());
    Ok(std::str::from_utf8(&header[..end])?.to_string())
}

/// Sequence text with line breaks already removed and spaces dropped
fn sequence_text(seq: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
    let text = std::str::from_utf8(seq)?;
    Ok(text.replace(' ', ""))
}

/// Open a FASTA file for reading
///
/// The first block of the file is read eagerly, so a path that opens but
/// cannot be read (a directory, for instance) fails here rather than looking
/// like an empty file.
///
/// # Errors
/// Returns [`GrphError::Open`] if the path cannot be opened or read.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let open_error = |source: io::Error| GrphError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    if file.metadata().map_err(open_error)?.is_dir() {
        return Err(open_error(io::Error::other("Is a directory")));
    }
    let mut reader = BufReader::new(file);
    reader.fill_buf().map_err(open_error)?;
    Ok(reader)
}

/// Parse FASTA records from an open reader and call a function for each
///
/// # Arguments
/// * `reader` - Open input stream (may be gzipped)
/// * `source_name` - Name used in error messages
/// * `callback` - Function called for each record, in input order
///
/// # Returns
/// Number of records parsed. An empty stream yields zero records.
///
/// # Errors
/// Returns [`GrphError::Io`] if the stream cannot be read and
/// [`GrphError::Parse`] if it is not FASTA, a record is malformed, or an id or
/// sequence is not valid UTF-8. Errors from the callback are propagated
/// unchanged.
pub fn parse_records<R, F>(reader: R, source_name: &str, mut callback: F) -> Result<usize>
where
    R: Read + Send,
    F: FnMut(SequenceRecord) -> Result<()>,
{
    // needletail reports any failed first read as an empty file, so look at
    // the stream first.
    let mut reader = BufReader::new(reader);
    if reader.fill_buf()?.is_empty() {
        debug!("{} is empty", source_name);
        return Ok(0);
    }

    let mut reader = match parse_fastx_reader(reader) {
        Ok(reader) => reader,
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
            debug!("{} is empty", source_name);
            return Ok(0);
        }
        Err(e) => return Err(GrphError::parse(source_name, e)),
    };

    let mut num_records = 0;
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| GrphError::parse(source_name, e))?;
        if matches!(record.format(), Format::Fastq) {
            return Err(GrphError::parse(
                source_name,
                format!("record {} is not a FASTA record", num_records + 1),
            ));
        }

        let id = record_id(record.id()).map_err(|e| {
            let message = format!("record {} has a non-UTF-8 id: {}", num_records + 1, e);
            GrphError::parse(source_name, message)
        })?;
        let sequence = sequence_text(&record.seq()).map_err(|e| {
            let message = format!("record '{}' has a non-UTF-8 sequence: {}", id, e);
            GrphError::parse(source_name, message)
        })?;

        callback(SequenceRecord::new(id, sequence))?;
        num_records += 1;
    }

    Ok(num_records)
}

/// Parse a FASTA file and call a function for each record
///
/// # Errors
/// Returns [`GrphError::Open`] if the file cannot be opened or read (see
/// [`open_input`]), otherwise the errors of [`parse_records`].
pub fn parse_records_from_path<P, F>(path: P, callback: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnMut(SequenceRecord) -> Result<()>,
{
    let path = path.as_ref();
    let input = open_input(path)?;
    parse_records(input, &path.display().to_string(), callback)
}

/// Read every FASTA record of an open reader into memory
pub fn read_records<R>(reader: R, source_name: &str) -> Result<Vec<SequenceRecord>>
where
    R: Read + Send,
{
    let mut records = Vec::new();
    parse_records(reader, source_name, |record| {
        records.push(record);
        Ok(())
    })?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Reader whose every read fails
    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read refused"))
        }
    }

    #[test]
    fn test_record_id_stops_at_whitespace() {
        assert_eq!(record_id(b"Rosalind_0498").unwrap(), "Rosalind_0498");
        assert_eq!(record_id(b"seq1 some description").unwrap(), "seq1");
        assert_eq!(record_id(b"seq2\tx").unwrap(), "seq2");
        assert!(record_id(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_parse_fasta_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, ">seq1 first record")?;
        writeln!(temp_file, "ACGT")?;
        writeln!(temp_file, ">seq2")?;
        writeln!(temp_file, "TGCA")?;
        writeln!(temp_file, "TTGG")?;
        temp_file.flush()?;

        let mut records = Vec::new();
        let n = parse_records_from_path(temp_file.path(), |record| {
            records.push(record);
            Ok(())
        })?;

        assert_eq!(n, 2);
        assert_eq!(records[0], SequenceRecord::new("seq1", "ACGT"));
        assert_eq!(records[1], SequenceRecord::new("seq2", "TGCATTGG"));

        Ok(())
    }

    #[test]
    fn test_read_records_from_reader() -> Result<()> {
        let input = b">a\nAAATAAA\n>b\nAAATTTT\n";
        let records = read_records(&input[..], "<stream>")?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].sequence, "AAATTTT");
        Ok(())
    }

    #[test]
    fn test_empty_input_yields_no_records() -> Result<()> {
        let records = read_records(&b""[..], "<stream>")?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_unreadable_stream_is_io_error() {
        let err = read_records(FailingReader, "<stream>").unwrap_err();
        assert!(matches!(err, GrphError::Io(_)), "got {:?}", err);
    }

    #[test]
    fn test_directory_is_open_error() {
        let dir = TempDir::new().unwrap();
        let err = open_input(dir.path()).unwrap_err();
        assert!(matches!(err, GrphError::Open { .. }));
        assert!(err.is_usage());
        assert!(err.to_string().contains("Is a directory"));

        let err = parse_records_from_path(dir.path(), |_| Ok(())).unwrap_err();
        assert!(matches!(err, GrphError::Open { .. }));
    }

    #[test]
    fn test_open_input_reads_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, ">a")?;
        writeln!(temp_file, "ACGT")?;
        temp_file.flush()?;

        let records = read_records(open_input(temp_file.path())?, "<file>")?;
        assert_eq!(records, vec![SequenceRecord::new("a", "ACGT")]);
        Ok(())
    }

    #[test]
    fn test_spaces_are_removed_from_sequences() -> Result<()> {
        let input = b">a\nAA ATTT\n>b\n TTT CCC \n";
        let records = read_records(&input[..], "<stream>")?;
        assert_eq!(records[0], SequenceRecord::new("a", "AAATTT"));
        assert_eq!(records[1], SequenceRecord::new("b", "TTTCCC"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = parse_records_from_path("/nonexistent/dir/input.fa", |_| Ok(())).unwrap_err();
        assert!(matches!(err, GrphError::Open { .. }));
        assert!(err.is_usage());
    }

    #[test]
    fn test_fastq_is_rejected() {
        let input = b"@r1\nACGT\n+\nIIII\n";
        let err = read_records(&input[..], "reads.fq").unwrap_err();
        assert!(matches!(err, GrphError::Parse { .. }));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let input = b"this is not a sequence file\n";
        assert!(read_records(&input[..], "notes.txt").is_err());
    }

    #[test]
    fn test_callback_error_stops_parsing() {
        let input = b">a\nACGT\n>b\nACGT\n";
        let mut seen = 0;
        let result = parse_records(&input[..], "<stream>", |_| {
            seen += 1;
            Err(GrphError::parse("<stream>", "stop"))
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }
}
