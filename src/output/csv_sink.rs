//! CSV-backed record sink

use crate::extract::{ListingRecord, CSV_HEADER};
use crate::output::traits::{RecordSink, SinkResult};
use std::fs::File;
use std::path::Path;

/// Writes listing records to a CSV file with the fixed 8-column header.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Creates the output file, writes the header row and flushes it.
    ///
    /// Missing parent directories are created. The header hits the disk
    /// before the first record so even an immediately-aborted run leaves a
    /// well-formed file.
    pub fn create<P: AsRef<Path>>(path: P) -> SinkResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;

        Ok(Self { writer })
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &ListingRecord) -> SinkResult<()> {
        self.writer.write_record(record.fields())?;
        Ok(())
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ListingRecord {
        ListingRecord {
            city: "Bordeaux".to_string(),
            property_type: "Maison".to_string(),
            surface: "85".to_string(),
            rooms: "4".to_string(),
            bedrooms: "2".to_string(),
            bathrooms: "1".to_string(),
            energy: "C".to_string(),
            price: "250000".to_string(),
        }
    }

    #[test]
    fn test_header_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let _sink = CsvSink::create(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "Ville,Type,Surface,NbrPieces,NbrChambres,NbrSdb,DPE,Prix"
        );
    }

    #[test]
    fn test_append_and_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&sample_record()).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Bordeaux,Maison,85,4,2,1,C,250000");
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/raw/out.csv");

        let _sink = CsvSink::create(&path).unwrap();
        assert!(path.exists());
    }
}
