//! Whole-table CSV persistence.
//!
//! Every table is read completely into memory, mutated there, and written back
//! in full. There is no append or partial write path: `save` truncates the file
//! and rewrites the header and every row.

use crate::error::CoreError;
use crate::models::Roster;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A row type that maps one-to-one onto a CSV table.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Unique key of a row within its table.
    type Key: Ord + Clone + fmt::Display;

    /// Canonical header, in file order.
    const COLUMNS: &'static [&'static str];

    /// Whether a file whose header lacks the leading `id` column may be read
    /// by numbering its rows `1..=n` in file order.
    const BACKFILL_ID: bool = false;

    fn key(&self) -> Self::Key;
}

/// A record carrying an auto-assigned integer id.
pub trait Identified: Record {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

fn id_space_exhausted(after: u64) -> CoreError {
    CoreError::InvalidRange(format!("no id is left after {}", after))
}

/// Returns `max(id) + 1`, or `1` for an empty table.
pub fn next_id<R: Identified>(table: &[R]) -> Result<u64, CoreError> {
    match table.iter().map(Identified::id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| id_space_exhausted(max)),
    }
}

/// Numbers `rows` sequentially starting at `first`.
pub fn assign_ids<R: Identified>(rows: &mut [R], first: u64) -> Result<(), CoreError> {
    let mut id = first;
    for (index, row) in rows.iter_mut().enumerate() {
        if index > 0 {
            id = id.checked_add(1).ok_or_else(|| id_space_exhausted(id))?;
        }
        row.set_id(id);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Canonical,
    LegacyWithoutId,
}

/// Handle on one persisted table.
#[derive(Debug, Clone)]
pub struct CsvStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> CsvStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Reads the whole table. A missing file is an empty table.
    pub fn load(&self) -> Result<Vec<R>, CoreError> {
        match self.read() {
            Err(CoreError::MissingStore(path)) => {
                debug!(path = %path.display(), "table file absent, starting empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Overwrites the table file with `rows`, in the order given.
    ///
    /// Fails with [`CoreError::DuplicateId`] before touching the file if two
    /// rows share a key.
    pub fn save(&self, rows: &[R]) -> Result<(), CoreError> {
        check_unique_keys(rows)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        write_table(file, rows)?;
        debug!(path = %self.path.display(), rows = rows.len(), "table saved");
        Ok(())
    }

    fn read(&self) -> Result<Vec<R>, CoreError> {
        let file = open_existing(&self.path)?;
        read_table(file, &self.path)
    }
}

fn open_existing(path: &Path) -> Result<File, CoreError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CoreError::MissingStore(path.to_path_buf()),
        _ => CoreError::Io(e),
    })
}

/// Parses a table in `R`'s canonical shape (or its legacy id-less shape).
///
/// `source` only labels schema errors.
pub fn read_table<R: Record, T: io::Read>(reader: T, source: &Path) -> Result<Vec<R>, CoreError> {
    read_rows(reader, source, R::COLUMNS, R::BACKFILL_ID)
}

/// Writes the canonical header followed by `rows`.
pub fn write_table<R: Record, W: io::Write>(writer: W, rows: &[R]) -> Result<(), CoreError> {
    write_rows(writer, R::COLUMNS, rows)
}

pub(crate) fn read_rows<T, Rd>(
    reader: Rd,
    source: &Path,
    columns: &[&str],
    backfill_id: bool,
) -> Result<Vec<T>, CoreError>
where
    T: DeserializeOwned,
    Rd: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let shape = if headers.iter().eq(columns.iter().copied()) {
        Shape::Canonical
    } else if backfill_id
        && columns.first() == Some(&"id")
        && headers.iter().eq(columns[1..].iter().copied())
    {
        Shape::LegacyWithoutId
    } else {
        return Err(CoreError::SchemaMismatch {
            path: source.to_path_buf(),
            expected: columns.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(String::from).collect(),
        });
    };

    let canonical = csv::StringRecord::from(columns.to_vec());
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = match shape {
            Shape::Canonical => record.deserialize(Some(&canonical))?,
            Shape::LegacyWithoutId => {
                let mut migrated = csv::StringRecord::new();
                migrated.push_field(&(index + 1).to_string());
                migrated.extend(record.iter());
                migrated.deserialize(Some(&canonical))?
            }
        };
        rows.push(row);
    }

    if shape == Shape::LegacyWithoutId {
        warn!(
            path = %source.display(),
            rows = rows.len(),
            "table has no id column, numbered rows in file order (save to persist)"
        );
    }
    debug!(path = %source.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

pub(crate) fn write_rows<T, W>(writer: W, columns: &[&str], rows: &[T]) -> Result<(), CoreError>
where
    T: Serialize,
    W: io::Write,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn check_unique_keys<R: Record>(rows: &[R]) -> Result<(), CoreError> {
    let mut seen = BTreeSet::new();
    for row in rows {
        if !seen.insert(row.key()) {
            return Err(CoreError::DuplicateId(row.key().to_string()));
        }
    }
    Ok(())
}

/// Reads the team roster: a single `name` column, order preserved.
///
/// Unlike the data tables, a missing roster file is an error.
pub fn load_roster(path: &Path) -> Result<Roster, CoreError> {
    let file = open_existing(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(["name"]) {
        return Err(CoreError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: vec!["name".to_string()],
            found: headers.iter().map(String::from).collect(),
        });
    }

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        names.push(record.get(0).unwrap_or_default().to_string());
    }

    let roster = Roster::new(names);
    debug!(path = %path.display(), members = roster.names().len(), "roster loaded");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OnHoldProject, SupportAssignment, Task, TaskStatus};
    use chrono::NaiveDate;

    fn task(id: u64, week: u32, member: &str) -> Task {
        Task {
            id,
            week,
            team_member: member.to_string(),
            label: format!("label {id}"),
            description: format!("description {id}"),
            status: TaskStatus::ToBeStarted,
        }
    }

    #[test]
    fn test_next_id_empty_and_max() {
        assert_eq!(next_id::<Task>(&[]).unwrap(), 1);
        let table = vec![task(4, 1, "A"), task(9, 1, "B"), task(2, 2, "A")];
        assert_eq!(next_id(&table).unwrap(), 10);
    }

    #[test]
    fn test_next_id_at_the_top_of_the_id_space() {
        let table = vec![task(u64::MAX, 1, "A")];
        assert!(matches!(next_id(&table), Err(CoreError::InvalidRange(_))));
    }

    #[test]
    fn test_assign_ids_is_sequential() {
        let mut rows = vec![task(0, 1, "A"), task(0, 1, "B"), task(0, 1, "C")];
        assign_ids(&mut rows, 7).unwrap();
        assert_eq!(rows.iter().map(|t| t.id).collect::<Vec<_>>(), vec![7, 8, 9]);
    }

    #[test]
    fn test_assign_ids_stops_at_the_top_of_the_id_space() {
        let mut one = vec![task(0, 1, "A")];
        assign_ids(&mut one, u64::MAX).unwrap();
        assert_eq!(one[0].id, u64::MAX);

        let mut two = vec![task(0, 1, "A"), task(0, 1, "B")];
        assert!(matches!(assign_ids(&mut two, u64::MAX), Err(CoreError::InvalidRange(_))));
    }

    #[test]
    fn test_read_canonical_table() {
        let data = "id,week,team_member,label,description,status\n\
                    3,1,Alice,Deploy,\"Roll out v2, then monitor\",In progress\n\
                    5,2,Bob,Review,Code review,Done\n";
        let rows: Vec<Task> = read_table(data.as_bytes(), Path::new("tasks.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].description, "Roll out v2, then monitor");
        assert_eq!(rows[0].status, TaskStatus::InProgress);
        assert_eq!(rows[1].status, TaskStatus::Done);
    }

    #[test]
    fn test_legacy_table_gets_sequential_ids() {
        let data = "week,team_member,label,description,status\n\
                    1,Alice,A,first,To be started\n\
                    1,Bob,B,second,Done\n\
                    2,Alice,C,third,In progress\n";
        let rows: Vec<Task> = read_table(data.as_bytes(), Path::new("tasks.csv")).unwrap();
        assert_eq!(rows.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[2].label, "C");
    }

    #[test]
    fn test_legacy_on_hold_table_gets_ids() {
        let data = "team_member,label,description,status\nAlice,Later,someday,To be started\n";
        let rows: Vec<OnHoldProject> = read_table(data.as_bytes(), Path::new("on_hold.csv")).unwrap();
        assert_eq!(rows[0].id, 1);
    }

    #[test]
    fn test_unknown_columns_are_rejected() {
        let data = "id,week,team_member,label,description,status,priority\n";
        let err = read_table::<Task, _>(data.as_bytes(), Path::new("tasks.csv")).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_reordered_columns_are_rejected() {
        let data = "id,team_member,week,label,description,status\n";
        let err = read_table::<Task, _>(data.as_bytes(), Path::new("tasks.csv")).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_support_table_never_backfills() {
        let data = "primary_support,secondary_support\nAlice,Bob\n";
        let err = read_table::<SupportAssignment, _>(data.as_bytes(), Path::new("s.csv")).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        let rows: Vec<Task> = read_table("".as_bytes(), Path::new("tasks.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_write_support_rows_with_blanks() {
        let rows = vec![SupportAssignment {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            primary_support: Some("Alice".to_string()),
            secondary_support: None,
        }];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,primary_support,secondary_support\n2026-01-05,Alice,\n"
        );
    }

    #[test]
    fn test_blank_and_loose_status_cells() {
        let data = "id,week,team_member,label,description,status\n\
                    1,1,Alice,New row,added in the grid,\n\
                    2,1,Bob,Hand edited,typed by hand,done\n";
        let rows: Vec<Task> = read_table(data.as_bytes(), Path::new("tasks.csv")).unwrap();
        assert_eq!(rows[0].status, TaskStatus::ToBeStarted);
        assert_eq!(rows[1].status, TaskStatus::Done);

        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1,1,Alice,New row,added in the grid,To be started\n"));
        assert!(text.contains("2,1,Bob,Hand edited,typed by hand,Done\n"));
    }

    #[test]
    fn test_unknown_status_is_a_csv_error() {
        let data = "id,week,team_member,label,description,status\n1,1,Alice,L,D,finished\n";
        let err = read_table::<Task, _>(data.as_bytes(), Path::new("tasks.csv")).unwrap_err();
        assert!(matches!(err, CoreError::Csv(_)));
    }

    #[test]
    fn test_empty_support_cells_read_as_none() {
        let data = "date,primary_support,secondary_support\n2026-01-05,,Bob\n";
        let rows: Vec<SupportAssignment> = read_table(data.as_bytes(), Path::new("s.csv")).unwrap();
        assert_eq!(rows[0].primary_support, None);
        assert_eq!(rows[0].secondary_support.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_duplicate_keys_are_fatal() {
        let rows = vec![task(1, 1, "A"), task(1, 2, "B")];
        let err = check_unique_keys(&rows).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(ref id) if id == "1"));
    }
}
