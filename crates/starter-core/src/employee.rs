//! Employee catalog types shared by the selector, the catalog loader and the CLI.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One weighted entry of the employee probability catalog.
///
/// `probability` is the weight of the primary outcome and `shard_probability`
/// the weight of the shard outcome. Across a well-formed catalog the two
/// columns sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityRecord {
    pub name: String,
    pub grade: String,
    pub probability: f64,
    pub shard_probability: f64,
}

impl ProbabilityRecord {
    pub fn new(
        name: impl Into<String>,
        grade: impl Into<String>,
        probability: f64,
        shard_probability: f64,
    ) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            probability,
            shard_probability,
        }
    }

    /// Records with a blank name never take part in sampling.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Combined weight of both outcomes.
    pub fn total_weight(&self) -> f64 {
        self.probability + self.shard_probability
    }
}

/// Which pair of weight columns in the catalog feeds a selection request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbabilityGroup {
    #[default]
    GoldCoin,
    #[serde(rename = "ISCoin")]
    IsCoin,
}

/// Catalog column holding the employee name.
pub const NAME_COLUMN: &str = "名稱";
/// Catalog column holding the employee grade.
pub const GRADE_COLUMN: &str = "等級";

impl ProbabilityGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoldCoin => "GoldCoin",
            Self::IsCoin => "ISCoin",
        }
    }

    /// Source column of the primary-outcome weight for this group.
    pub fn probability_column(&self) -> &'static str {
        match self {
            Self::GoldCoin => "金幣單張機率",
            Self::IsCoin => "IS單張機率",
        }
    }

    /// Source column of the shard-outcome weight for this group.
    pub fn shard_probability_column(&self) -> &'static str {
        match self {
            Self::GoldCoin => "金幣碎片機率",
            Self::IsCoin => "IS碎片機率",
        }
    }
}

impl fmt::Display for ProbabilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything other than `ISCoin` resolves to [`ProbabilityGroup::GoldCoin`].
impl FromStr for ProbabilityGroup {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ISCoin" => Ok(Self::IsCoin),
            _ => Ok(Self::GoldCoin),
        }
    }
}

/// One sampling result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedEntry {
    pub name: String,
    pub grade: String,
    pub is_shard: bool,
}

impl SelectedEntry {
    pub(crate) fn from_record(record: &ProbabilityRecord, is_shard: bool) -> Self {
        Self {
            name: record.name.clone(),
            grade: record.grade.clone(),
            is_shard,
        }
    }
}

/// Response envelope of a selection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeConnection {
    pub items: Vec<SelectedEntry>,
    pub version: String,
}
