use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rail_core::{Reservation, TrainListing};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

pub const SCHEDULE_COLUMNS: &[&str] = &["train_no", "date", "departure", "arrival", "time"];

/// A row type with a fixed column schema. Field declaration order must match
/// `COLUMNS`, since rows are written positionally.
pub trait Record: Serialize + DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

impl Record for TrainListing {
    const COLUMNS: &'static [&'static str] = SCHEDULE_COLUMNS;
}

impl Record for Reservation {
    const COLUMNS: &'static [&'static str] = SCHEDULE_COLUMNS;
}

/// A single comma-delimited table file with one header row.
///
/// Every call hits the file synchronously. There is no locking: concurrent
/// appenders may interleave and concurrent rewrites are last-writer-wins.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _record: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row. A missing file is an empty table.
    pub fn load_all(&self) -> StoreResult<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Table {} not found, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let mut records: Vec<T> = Vec::new();
        for row in reader.records() {
            let mut row = row?;
            // Short rows: absent trailing fields read as empty strings.
            while row.len() < headers.len() {
                row.push_field("");
            }
            records.push(row.deserialize(Some(&headers))?);
        }

        debug!("Loaded {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Write one row at the end of the table, emitting the header first when
    /// the file is new or empty.
    pub fn append(&self, record: &T) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();
        let needs_header = len == 0;

        // The last line must be terminated or the new row joins it.
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::Start(len - 1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        if needs_header {
            writer.write_record(T::COLUMNS)?;
        }
        writer.serialize(record)?;
        writer.flush()?;

        debug!("Appended row to {}", self.path.display());
        Ok(())
    }

    /// Truncate the table and write the header followed by `records` in order.
    pub fn overwrite_all(&self, records: &[T]) -> StoreResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        writer.write_record(T::COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!("Rewrote {} with {} rows", self.path.display(), records.len());
        Ok(())
    }

    /// Create the table with only a header row. Returns `false` when the file
    /// already existed and was left untouched.
    pub fn ensure_exists(&self) -> StoreResult<bool> {
        let file = match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer.write_record(T::COLUMNS)?;
        writer.flush()?;

        debug!("Created table {}", self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn reservation(no: &str, date: &str, time: &str) -> Reservation {
        Reservation {
            train_no: no.to_string(),
            date: date.to_string(),
            departure: "Seoul".to_string(),
            arrival: "Busan".to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Reservation> = RecordStore::new(dir.path().join("absent.csv"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_overwrite_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Reservation> = RecordStore::new(dir.path().join("reservations.csv"));
        let records = vec![
            reservation("KTX-9", "2024-01-02", "09:00"),
            reservation("KTX-1", "2024-01-01", "07:30"),
            reservation("SRT, special", "2024-01-01", "\"late\""),
        ];

        store.overwrite_all(&records).unwrap();
        assert_eq!(store.load_all().unwrap(), records);
    }

    #[test]
    fn test_overwrite_empty_writes_header_only() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Reservation> = RecordStore::new(dir.path().join("reservations.csv"));
        store.overwrite_all(&[]).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "train_no,date,departure,arrival,time\n");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_to_missing_file_writes_header() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Reservation> = RecordStore::new(dir.path().join("reservations.csv"));
        store.append(&reservation("KTX-1", "2024-01-01", "07:30")).unwrap();
        store.append(&reservation("KTX-2", "2024-01-01", "08:30")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "train_no,date,departure,arrival,time\n\
             KTX-1,2024-01-01,Seoul,Busan,07:30\n\
             KTX-2,2024-01-01,Seoul,Busan,08:30\n"
        );
    }

    #[test]
    fn test_append_after_unterminated_last_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reservations.csv");
        fs::write(
            &path,
            "train_no,date,departure,arrival,time\nR1,2024-01-01,Seoul,Busan,07:30",
        )
        .unwrap();

        let store: RecordStore<Reservation> = RecordStore::new(&path);
        store.append(&reservation("R2", "2024-01-02", "08:30")).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].train_no, "R1");
        assert_eq!(loaded[0].time, "07:30");
        assert_eq!(loaded[1].train_no, "R2");
        assert_eq!(loaded[1].time, "08:30");
    }

    #[test]
    fn test_ensure_exists_is_idempotent() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Reservation> = RecordStore::new(dir.path().join("reservations.csv"));

        assert!(store.ensure_exists().unwrap());
        store.append(&reservation("KTX-1", "2024-01-01", "07:30")).unwrap();
        assert!(!store.ensure_exists().unwrap());

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_short_rows_and_extra_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trains.csv");
        fs::write(
            &path,
            "train_no,date,departure,arrival,time,details\n\
             KTX-1,2024-01-01,Seoul,Busan,07:30,window\n\
             KTX-2,2024-01-02,Seoul\n",
        )
        .unwrap();

        let store: RecordStore<TrainListing> = RecordStore::new(&path);
        let trains = store.load_all().unwrap();
        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].time, "07:30");
        assert_eq!(trains[1].departure, "Seoul");
        assert_eq!(trains[1].arrival, "");
        assert_eq!(trains[1].time, "");
    }

    #[test]
    fn test_unwritable_medium_is_an_error() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("missing-dir").join("reservations.csv"));
        assert!(store.append(&reservation("KTX-1", "2024-01-01", "07:30")).is_err());
        assert!(store.overwrite_all(&[]).is_err());
    }
}
