//! Tab-separated extract reading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::record::RawRecord;

/// Read every data line of the extract at `path`.
///
/// The first line is a header and is discarded. Lines are returned as-is,
/// including ones with too few fields; each stage decides what it needs.
pub fn read_extract(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let records = read_extract_from(BufReader::new(file), path)?;
    debug!(path = %path.display(), records = records.len(), "read extract");
    Ok(records)
}

/// Read extract lines from any reader. `path` is only used in errors.
pub fn read_extract_from<R: Read>(input: R, path: &Path) -> Result<Vec<RawRecord>> {
    // Quoting is off: a '"' in a street address is data, not a delimiter.
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let mut records = Vec::new();
    let mut last_line = 1u64;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Decode {
            path: path.to_path_buf(),
            line: source
                .position()
                .map_or(last_line + 1, csv::Position::line),
            source,
        })?;
        let line = record
            .position()
            .map_or(last_line + 1, csv::Position::line);
        last_line = line;
        records.push(RawRecord::new(
            line,
            record.iter().map(str::to_string).collect(),
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::record::Column;

    fn create_temp_extract(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_header_is_discarded() {
        let file = create_temp_extract("Name\tAddress\nJane Doe\t123 St\n");
        let records = read_extract(file.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field(Column::CustomerName), Some("Jane Doe"));
        assert_eq!(records[0].line(), 2);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let file = create_temp_extract("h\n  Jane Doe \t 123 St  \n");
        let records = read_extract(file.path()).unwrap();

        assert_eq!(records[0].field(Column::CustomerName), Some("Jane Doe"));
        assert_eq!(records[0].field(Column::Address), Some("123 St"));
    }

    #[test]
    fn test_short_lines_are_kept() {
        let file = create_temp_extract("h\ta\tb\na\tb\tc\td\te\tf\nshort\n");
        let records = read_extract(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 6);
        assert_eq!(records[1].len(), 1);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let records =
            read_extract_from("h\n\nJane Doe\t123 St\n\n".as_bytes(), Path::new("x.tsv")).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field(Column::CustomerName), Some("Jane Doe"));
    }

    #[test]
    fn test_quotes_are_data() {
        let file = create_temp_extract("h\nJane \"JD\" Doe\t\"Main\" St\n");
        let records = read_extract(file.path()).unwrap();

        assert_eq!(records[0].field(Column::CustomerName), Some("Jane \"JD\" Doe"));
    }

    #[test]
    fn test_missing_file() {
        let result = read_extract(Path::new("/nonexistent/extract.tsv"));

        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_header_only() {
        let file = create_temp_extract("Name\tAddress\n");
        let records = read_extract(file.path()).unwrap();

        assert!(records.is_empty());
    }
}
