//! Tabular output for catalog records

use crate::catalog::Record;
use crate::CatalogError;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

/// Streams records of one type into CSV, one row per record
///
/// The header row (the record's columns) is written on creation, so an empty
/// listing still yields a well-formed file. Absent values are empty cells.
pub struct CsvSink<W: Write, R> {
    writer: Writer<W>,
    rows: usize,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> CsvSink<File, R> {
    /// Creates (or truncates) the file at `path`, creating parent directories
    pub fn create(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(File::create(path)?)
    }
}

impl<W: Write, R: Record> CsvSink<W, R> {
    /// Wraps `inner` and writes the header row
    pub fn new(inner: W) -> Result<Self, CatalogError> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(R::columns())?;
        Ok(Self {
            writer,
            rows: 0,
            _record: PhantomData,
        })
    }

    /// Appends one record
    pub fn push(&mut self, record: &R) -> Result<(), CatalogError> {
        let row: Vec<String> = record
            .fields()
            .into_iter()
            .map(|(_, value)| value.to_string())
            .collect();
        self.writer.write_record(&row)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes the output and returns the number of records written
    pub fn finish(mut self) -> Result<usize, CatalogError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Brand, DeviceFullSpecs, DeviceSummary};
    use tempfile::TempDir;

    fn summary(title: &str) -> DeviceSummary {
        DeviceSummary {
            title: title.to_string(),
            extended_title: format!("{}, a phone", title),
            image_link: format!("https://fdn2.gsmarena.com/{}.jpg", title),
            detail_link: format!("https://www.gsmarena.com/{}.php", title),
        }
    }

    #[test]
    fn test_header_written_for_empty_listing() {
        let mut buffer = Vec::new();
        let sink: CsvSink<_, DeviceSummary> = CsvSink::new(&mut buffer).unwrap();
        assert_eq!(sink.finish().unwrap(), 0);

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "title,extended_title,img_link,gsmarena_link\n");
    }

    #[test]
    fn test_rows_follow_columns() {
        let mut buffer = Vec::new();
        let mut sink = CsvSink::new(&mut buffer).unwrap();
        sink.push(&summary("a")).unwrap();
        sink.push(&summary("b")).unwrap();
        assert_eq!(sink.rows(), 2);
        assert_eq!(sink.finish().unwrap(), 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "a,\"a, a phone\",https://fdn2.gsmarena.com/a.jpg,https://www.gsmarena.com/a.php"
        );
    }

    #[test]
    fn test_integer_and_absent_cells() {
        let mut buffer = Vec::new();
        let mut sink = CsvSink::new(&mut buffer).unwrap();
        sink.push(&Brand {
            id: "acer-phones-59".to_string(),
            name: "Acer".to_string(),
            catalog_link: "https://www.gsmarena.com/acer-phones-59.php".to_string(),
            device_count: 100,
        })
        .unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("acer-phones-59,Acer,100,https://www.gsmarena.com/acer-phones-59.php")
        );

        let mut buffer = Vec::new();
        let mut sink = CsvSink::new(&mut buffer).unwrap();
        sink.push(&DeviceFullSpecs {
            model_name: "Nokia 3310".to_string(),
            ..Default::default()
        })
        .unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("Nokia 3310,,"));
        assert_eq!(row.matches(',').count(), DeviceFullSpecs::columns().len() - 1);
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brands").join("samsung_devices.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.push(&summary("x")).unwrap();
        assert_eq!(sink.finish().unwrap(), 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("title,extended_title,img_link,gsmarena_link\n"));
    }
}
