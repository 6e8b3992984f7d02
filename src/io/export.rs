//! CSV writers for the assignment table and the score trace.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::anneal::ScoreTrace;
use crate::error::Result;
use crate::plan::ExportRecord;

/// Writes `Name, <attributes...>, Table ID, Topic` rows.
pub fn write_assignment<W: std::io::Write, S: AsRef<str>>(
    writer: W,
    attribute_names: &[S],
    rows: &[ExportRecord],
) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    let mut header = vec!["Name"];
    header.extend(attribute_names.iter().map(AsRef::as_ref));
    header.extend(["Table ID", "Topic"]);
    csv.write_record(&header)?;

    for row in rows {
        let table_id = row.table_id.to_string();
        let mut fields: Vec<&str> = Vec::with_capacity(row.attributes.len() + 3);
        fields.push(&row.name);
        fields.extend(row.attributes.iter().map(String::as_str));
        fields.push(&table_id);
        fields.push(row.topic.as_deref().unwrap_or_default());
        csv.write_record(&fields)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_assignment_path<S: AsRef<str>>(
    path: impl AsRef<Path>,
    attribute_names: &[S],
    rows: &[ExportRecord],
) -> Result<()> {
    write_assignment(File::create(path)?, attribute_names, rows)
}

/// Writes one `checkpoint,t,temperature,score,accepted` row per trace entry.
pub fn write_trace<W: std::io::Write>(writer: W, trace: &ScoreTrace) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["checkpoint", "t", "temperature", "score", "accepted"])?;
    for e in trace.entries() {
        csv.write_record([
            e.checkpoint.to_string(),
            e.t.to_string(),
            e.temperature.to_string(),
            e.score.to_string(),
            e.accepted.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_trace_path(path: impl AsRef<Path>, trace: &ScoreTrace) -> Result<()> {
    write_trace(File::create(path)?, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{AnnealConfig, AnnealRunner};
    use crate::assignment::Assignment;
    use crate::score::TableObjective;

    struct Size;

    impl TableObjective for Size {
        fn table_score(&self, members: &[usize]) -> f64 {
            members.len() as f64
        }
    }

    #[test]
    fn test_write_assignment() {
        let rows = vec![
            ExportRecord {
                name: "Ada".into(),
                attributes: vec!["BNL".into()],
                table_id: 2,
                topic: Some("ML".into()),
            },
            ExportRecord {
                name: "Grace, Jr.".into(),
                attributes: vec!["SBU".into()],
                table_id: 1,
                topic: None,
            },
        ];
        let mut out = Vec::new();
        write_assignment(&mut out, &["Org"], &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["Name,Org,Table ID,Topic", "Ada,BNL,2,ML", "\"Grace, Jr.\",SBU,1,"]
        );
    }

    #[test]
    fn test_write_trace_rows() {
        let config = AnnealConfig::default().with_steps(5).with_microsteps(2).with_seed(1);
        let result = AnnealRunner::run(&Size, Assignment::initialize(6, 3).unwrap(), &config).unwrap();
        let mut out = Vec::new();
        write_trace(&mut out, &result.trace).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "checkpoint,t,temperature,score,accepted");
        assert!(lines[1].starts_with("0,0.2,"));
    }
}
