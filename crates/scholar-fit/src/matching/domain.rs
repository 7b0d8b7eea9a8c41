use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Evaluation axis shared by student features and scholarship weights.
///
/// Declaration order is the canonical order used to break every tie in
/// normalization, explanation, and statistics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Academics,
    Leadership,
    Community,
    Need,
    Innovation,
    Research,
    Adversity,
}

impl Dimension {
    pub const COUNT: usize = 7;

    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::Academics,
        Dimension::Leadership,
        Dimension::Community,
        Dimension::Need,
        Dimension::Innovation,
        Dimension::Research,
        Dimension::Adversity,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Academics => "academics",
            Dimension::Leadership => "leadership",
            Dimension::Community => "community",
            Dimension::Need => "need",
            Dimension::Innovation => "innovation",
            Dimension::Research => "research",
            Dimension::Adversity => "adversity",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Dimension::Academics => "Academics",
            Dimension::Leadership => "Leadership",
            Dimension::Community => "Community",
            Dimension::Need => "Financial Need",
            Dimension::Innovation => "Innovation",
            Dimension::Research => "Research",
            Dimension::Adversity => "Adversity",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension '{0}'")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.label() == normalized)
            .ok_or_else(|| UnknownDimension(raw.trim().to_string()))
    }
}

/// Fixed-axis numeric vector. Absent keys deserialize as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionVector {
    pub academics: f64,
    pub leadership: f64,
    pub community: f64,
    pub need: f64,
    pub innovation: f64,
    pub research: f64,
    pub adversity: f64,
}

impl DimensionVector {
    pub const ZERO: DimensionVector = DimensionVector {
        academics: 0.0,
        leadership: 0.0,
        community: 0.0,
        need: 0.0,
        innovation: 0.0,
        research: 0.0,
        adversity: 0.0,
    };

    pub fn from_fn(mut value_for: impl FnMut(Dimension) -> f64) -> Self {
        let mut vector = Self::ZERO;
        for dimension in Dimension::ALL {
            vector.set(dimension, value_for(dimension));
        }
        vector
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Academics => self.academics,
            Dimension::Leadership => self.leadership,
            Dimension::Community => self.community,
            Dimension::Need => self.need,
            Dimension::Innovation => self.innovation,
            Dimension::Research => self.research,
            Dimension::Adversity => self.adversity,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        let slot = match dimension {
            Dimension::Academics => &mut self.academics,
            Dimension::Leadership => &mut self.leadership,
            Dimension::Community => &mut self.community,
            Dimension::Need => &mut self.need,
            Dimension::Innovation => &mut self.innovation,
            Dimension::Research => &mut self.research,
            Dimension::Adversity => &mut self.adversity,
        };
        *slot = value;
    }

    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        self.set(dimension, value);
        self
    }

    /// Entries in canonical dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }

    pub fn map(&self, mut f: impl FnMut(Dimension, f64) -> f64) -> Self {
        Self::from_fn(|dimension| f(dimension, self.get(dimension)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, value)| value).sum()
    }

    pub fn dot(&self, other: &DimensionVector) -> f64 {
        Dimension::ALL
            .into_iter()
            .map(|dimension| self.get(dimension) * other.get(dimension))
            .sum()
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, value)| value.is_finite())
    }
}

impl FromIterator<(Dimension, f64)> for DimensionVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        let mut vector = Self::ZERO;
        for (dimension, value) in iter {
            vector.set(dimension, value);
        }
        vector
    }
}

/// Student strengths, each value expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub DimensionVector);

impl FeatureVector {
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    pub fn values(&self) -> &DimensionVector {
        &self.0
    }
}

impl FromIterator<(Dimension, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scholarship importance per dimension; non-negative with no sum constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(pub DimensionVector);

impl WeightVector {
    pub const ZERO: WeightVector = WeightVector(DimensionVector::ZERO);

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    pub fn values(&self) -> &DimensionVector {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|(_, weight)| weight == 0.0)
    }
}

impl FromIterator<(Dimension, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipId(pub String);

impl fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scholarship as supplied by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub id: ScholarshipId,
    pub name: String,
    pub category: String,
    pub weights: WeightVector,
    /// Dimensions the scholarship foregrounds for display. Decoupled from `weights`.
    #[serde(default)]
    pub priorities: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl ScholarshipRecord {
    pub fn prioritizes(&self, dimension: Dimension) -> bool {
        self.priorities.contains(&dimension)
    }

    /// Scholarships without a deadline are treated as rolling.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.deadline.map_or(true, |deadline| deadline >= date)
    }
}

/// Student as supplied by the profile collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub features: FeatureVector,
    /// Upstream recommendation order; authoritative when enough ids resolve.
    #[serde(default)]
    pub recommended_scholarship_ids: Vec<ScholarshipId>,
}
