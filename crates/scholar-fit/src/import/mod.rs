//! Scholarship corpus import from CSV catalog exports.
//!
//! Expected headers: `id,name,category`, one column per dimension
//! (`academics` … `adversity`), `priorities` as a `;`-separated list of
//! dimension names, and an optional `deadline` in `YYYY-MM-DD`. Blank weight
//! cells and missing dimension columns read as zero.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::matching::domain::{Dimension, ScholarshipRecord, UnknownDimension};
use crate::matching::intake::{IntakeError, IntakeGuard};

#[derive(Debug)]
pub enum CorpusImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidWeight {
        line: usize,
        dimension: Dimension,
        value: String,
    },
    UnknownPriority {
        line: usize,
        source: UnknownDimension,
    },
    InvalidDeadline {
        line: usize,
        value: String,
    },
    Intake {
        line: usize,
        source: IntakeError,
    },
}

impl std::fmt::Display for CorpusImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusImportError::Io(err) => write!(f, "failed to read scholarship corpus: {}", err),
            CorpusImportError::Csv(err) => write!(f, "invalid scholarship CSV data: {}", err),
            CorpusImportError::InvalidWeight {
                line,
                dimension,
                value,
            } => write!(
                f,
                "line {}: {} weight '{}' is not a number",
                line, dimension, value
            ),
            CorpusImportError::UnknownPriority { line, source } => {
                write!(f, "line {}: {}", line, source)
            }
            CorpusImportError::InvalidDeadline { line, value } => write!(
                f,
                "line {}: deadline '{}' must be formatted YYYY-MM-DD",
                line, value
            ),
            CorpusImportError::Intake { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for CorpusImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusImportError::Io(err) => Some(err),
            CorpusImportError::Csv(err) => Some(err),
            CorpusImportError::UnknownPriority { source, .. } => Some(source),
            CorpusImportError::Intake { source, .. } => Some(source),
            CorpusImportError::InvalidWeight { .. } | CorpusImportError::InvalidDeadline { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CorpusImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CorpusImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ScholarshipCsvImporter;

impl ScholarshipCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScholarshipRecord>, CorpusImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows keep file order, which is the order ranking ties fall back to.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ScholarshipRecord>, CorpusImportError> {
        let guard = IntakeGuard;
        parser::parse_submissions(reader)?
            .into_iter()
            .map(|(line, submission)| {
                guard
                    .scholarship_from_submission(submission)
                    .map_err(|source| CorpusImportError::Intake { line, source })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "id,name,category,academics,leadership,community,need,innovation,research,adversity,priorities,deadline\n";

    #[test]
    fn importer_reads_weights_priorities_and_deadlines() {
        let csv = format!(
            "{HEADER}merit,Merit Award,Merit,0.9,0.7,0.3,0.1,0.35,0.6,0.15,academics; leadership,2026-03-01\n"
        );

        let corpus = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect("imports");

        assert_eq!(corpus.len(), 1);
        let merit = &corpus[0];
        assert_eq!(merit.id.0, "merit");
        assert_eq!(merit.weights.get(Dimension::Academics), 0.9);
        assert_eq!(merit.weights.get(Dimension::Adversity), 0.15);
        assert_eq!(
            merit.priorities,
            vec![Dimension::Academics, Dimension::Leadership]
        );
        assert_eq!(
            merit.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn blank_cells_and_missing_columns_read_as_zero() {
        let csv = "id,name,need\nneed-based,Need Grant,\nfirst-gen,First Gen,0.8\n";

        let corpus = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect("imports");

        assert_eq!(corpus.len(), 2);
        assert!(corpus[0].weights.is_zero());
        assert_eq!(corpus[1].weights.get(Dimension::Need), 0.8);
        assert_eq!(corpus[1].weights.get(Dimension::Research), 0.0);
        assert_eq!(corpus[1].category, "General");
        assert!(corpus[1].priorities.is_empty());
        assert!(corpus[1].deadline.is_none());
    }

    #[test]
    fn negative_weights_are_floored_at_import() {
        let csv = "id,name,academics,research\nodd,Odd Weights,-0.4,0.5\n";

        let corpus = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect("imports");

        assert_eq!(corpus[0].weights.get(Dimension::Academics), 0.0);
        assert_eq!(corpus[0].weights.get(Dimension::Research), 0.5);
    }

    #[test]
    fn importer_reports_line_of_bad_weight() {
        let csv = "id,name,academics\nok,Fine,0.5\nbad,Broken,lots\n";

        let error = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect_err("bad weight");

        match error {
            CorpusImportError::InvalidWeight {
                line,
                dimension,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(dimension, Dimension::Academics);
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_unknown_priorities_and_bad_deadlines() {
        let csv = "id,name,priorities\nx,X,academics;athletics\n";
        let error = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect_err("priority");
        assert!(matches!(error, CorpusImportError::UnknownPriority { line: 2, .. }));

        let csv = "id,name,deadline\nx,X,03/01/2026\n";
        let error = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect_err("deadline");
        assert!(matches!(error, CorpusImportError::InvalidDeadline { line: 2, .. }));
    }

    #[test]
    fn importer_rejects_blank_ids() {
        let csv = "id,name\n ,Nameless\n";
        let error = ScholarshipCsvImporter::from_reader(Cursor::new(csv)).expect_err("blank id");
        assert!(matches!(error, CorpusImportError::Intake { line: 2, .. }));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ScholarshipCsvImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            CorpusImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn priority_lists_skip_empty_entries() {
        assert_eq!(
            parser::parse_priorities(" need ;; Research ;"),
            Ok(vec![Dimension::Need, Dimension::Research])
        );
    }
}
