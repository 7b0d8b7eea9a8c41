use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::CorpusImportError;
use crate::matching::domain::{Dimension, DimensionVector};
use crate::matching::intake::ScholarshipSubmission;

/// Header row plus one data row per scholarship; the first data row is line 2.
const FIRST_DATA_LINE: usize = 2;

pub(crate) fn parse_submissions<R: Read>(
    reader: R,
) -> Result<Vec<(usize, ScholarshipSubmission)>, CorpusImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut submissions = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let line = index + FIRST_DATA_LINE;
        let row = record?;
        submissions.push((line, row.into_submission(line)?));
    }

    Ok(submissions)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    academics: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    leadership: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    community: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    need: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    innovation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    research: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    adversity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    priorities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
}

impl CatalogRow {
    fn cell(&self, dimension: Dimension) -> Option<&str> {
        let cell = match dimension {
            Dimension::Academics => &self.academics,
            Dimension::Leadership => &self.leadership,
            Dimension::Community => &self.community,
            Dimension::Need => &self.need,
            Dimension::Innovation => &self.innovation,
            Dimension::Research => &self.research,
            Dimension::Adversity => &self.adversity,
        };
        cell.as_deref()
    }

    fn into_submission(self, line: usize) -> Result<ScholarshipSubmission, CorpusImportError> {
        let mut weights = DimensionVector::ZERO;
        for dimension in Dimension::ALL {
            if let Some(raw) = self.cell(dimension) {
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| CorpusImportError::InvalidWeight {
                        line,
                        dimension,
                        value: raw.to_string(),
                    })?;
                weights.set(dimension, value);
            }
        }

        let priorities = match self.priorities.as_deref() {
            Some(raw) => parse_priorities(raw)
                .map_err(|source| CorpusImportError::UnknownPriority { line, source })?,
            None => Vec::new(),
        };

        let deadline = match self.deadline.as_deref() {
            Some(raw) => Some(parse_deadline(raw).ok_or_else(|| {
                CorpusImportError::InvalidDeadline {
                    line,
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(ScholarshipSubmission {
            id: self.id,
            name: self.name,
            category: self.category,
            weights,
            priorities,
            deadline,
        })
    }
}

pub(super) fn parse_priorities(
    raw: &str,
) -> Result<Vec<Dimension>, crate::matching::UnknownDimension> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse::<Dimension>)
        .collect()
}

fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
