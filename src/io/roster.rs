//! CSV roster reader.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::encode::ParticipantRecord;
use crate::error::{Result, SeatingError};

/// Which header columns hold the name, the categorical attributes and the topic tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterColumns {
    pub name: String,
    pub attributes: Vec<String>,
    pub topics: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            attributes: vec![
                "Primary Organization".into(),
                "Years at BNL".into(),
                "Career State".into(),
            ],
            topics: "Technical Interests".into(),
        }
    }
}

fn column_position(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SeatingError::MissingColumn {
            column: column.to_string(),
        })
}

/// Reads participant records from CSV with a header row.
///
/// Fields are trimmed; columns not named in `columns` are ignored.
pub fn read_roster<R: std::io::Read>(
    reader: R,
    columns: &RosterColumns,
) -> Result<Vec<ParticipantRecord>> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv.headers()?.clone();

    let name_at = column_position(&headers, &columns.name)?;
    let topics_at = column_position(&headers, &columns.topics)?;
    let attributes_at = columns
        .attributes
        .iter()
        .map(|a| column_position(&headers, a).map(|i| (a.as_str(), i)))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default();
        let mut record = ParticipantRecord::new(field(name_at), field(topics_at));
        for &(attribute, i) in &attributes_at {
            record = record.with_attribute(attribute, field(i));
        }
        records.push(record);
    }
    debug!(rows = records.len(), "Read roster.");
    Ok(records)
}

pub fn read_roster_path(
    path: impl AsRef<Path>,
    columns: &RosterColumns,
) -> Result<Vec<ParticipantRecord>> {
    read_roster(File::open(path)?, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
Name,Primary Organization,Years at BNL,Career State,Technical Interests,Email
Ada, BNL ,0-5,Early,ML;HPC;,ada@example.org
Grace,SBU,5-10,Mid,Quantum,grace@example.org
";

    #[test]
    fn test_read_roster_default_columns() {
        let records = read_roster(ROSTER.as_bytes(), &RosterColumns::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].topics, "ML;HPC;");
        assert_eq!(records[0].attribute("Primary Organization").unwrap(), "BNL");
        assert_eq!(records[1].attribute("Career State").unwrap(), "Mid");
        assert!(records[0].attribute("Email").is_err());
    }

    #[test]
    fn test_missing_column() {
        let columns = RosterColumns {
            topics: "Interests".into(),
            ..RosterColumns::default()
        };
        let err = read_roster(ROSTER.as_bytes(), &columns).unwrap_err();
        assert!(matches!(err, SeatingError::MissingColumn { ref column } if column == "Interests"));
    }
}
