//! CSV output writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::tables::RECORD_COLUMNS;
use super::{OutputConfig, Table};
use crate::Record;
use crate::error::{ChatstatsError, Result};
use crate::record::RECORD_TIMESTAMP_FORMAT;
use crate::stats::StatsReport;

/// Writes every report table into `dir` as `<table>.csv`.
///
/// The directory is created if needed. Returns the written paths in table
/// order.
pub fn write_tables(
    report: &StatsReport,
    dir: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for table in report.tables() {
        let path = dir.join(table.file_name());
        write_table(&table, &path, config)?;
        written.push(path);
    }

    info!(dir = %dir.display(), tables = written.len(), "wrote report tables");
    Ok(written)
}

/// Writes one table to a CSV file.
pub fn write_table(table: &Table, path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_table_to(table, file, config)?;
    debug!(table = table.name, rows = table.rows.len(), "wrote table");
    Ok(())
}

/// Renders one table as a CSV string.
pub fn to_csv(table: &Table, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_table_to(table, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_table_to<W: Write>(table: &Table, out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(out);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the normalized record set: `fecha, nombre, mensaje`.
pub fn write_records_csv(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        let timestamp = record.timestamp.format(RECORD_TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            timestamp.as_str(),
            record.participant.as_str(),
            record.text.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a records CSV written by [`write_records_csv`].
///
/// The header must be `fecha, nombre, mensaje`. Rows with a missing field
/// or an unparseable timestamp are skipped; only I/O failures and a foreign
/// header abort.
pub fn read_records_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;

    let headers = reader.headers()?;
    if headers.iter().ne(RECORD_COLUMNS) {
        return Err(ChatstatsError::invalid_record(
            1,
            format!("expected columns {}", RECORD_COLUMNS.join(", ")),
        ));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        let parsed = match (row.get(0), row.get(1), row.get(2)) {
            (Some(ts), Some(name), Some(text)) => ts
                .parse::<NaiveDateTime>()
                .ok()
                .map(|timestamp| Record::new(timestamp, name, text)),
            _ => None,
        };

        match parsed {
            Some(record) => records.push(record),
            None => {
                let line = row.position().map_or(0, |p| p.line());
                debug!(line, "skipping malformed record row");
                skipped += 1;
            }
        }
    }

    info!(records = records.len(), skipped, "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_records() -> Vec<Record> {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        vec![
            Record::new(ts, "Ana", "hola, \"Pablo\""),
            Record::new(ts, "Pablo", "uno\ndos"),
        ]
    }

    #[test]
    fn test_to_csv_quotes_when_needed() {
        let mut table = Table::new("t", vec!["a", "b"]);
        table.push_row(vec!["x,y".to_string(), "z".to_string()]);

        let csv = to_csv(&table, &OutputConfig::new()).unwrap();
        assert_eq!(csv, "a,b\n\"x,y\",z\n");
    }

    #[test]
    fn test_to_csv_custom_delimiter() {
        let mut table = Table::new("t", vec!["a", "b"]);
        table.push_row(vec!["1".to_string(), "2".to_string()]);

        let csv = to_csv(&table, &OutputConfig::new().with_delimiter(b';')).unwrap();
        assert_eq!(csv, "a;b\n1;2\n");
    }

    #[test]
    fn test_records_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let records = sample_records();

        write_records_csv(&records, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("fecha,nombre,mensaje\n2024-01-01T10:00:00,Ana,"));

        assert_eq!(read_records_csv(&path).unwrap(), records);
    }

    #[test]
    fn test_read_records_skips_bad_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        fs::write(
            &path,
            "fecha,nombre,mensaje\n\
             2024-01-01T10:00:00,Ana,hola\n\
             ayer,Pablo,hola\n\
             2024-01-01T10:02:00,Miriam\n\
             2024-01-01T10:03:00,Pablo,adios\n",
        )
        .unwrap();

        let records = read_records_csv(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].participant, "Pablo");
    }

    #[test]
    fn test_read_records_rejects_foreign_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.csv");
        fs::write(&path, "date,sender,content\n2024-01-01T10:00:00,Ana,hola\n").unwrap();

        let err = read_records_csv(&path).unwrap_err();
        assert!(matches!(err, ChatstatsError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("CSV error") || err.is_io());
    }
}
