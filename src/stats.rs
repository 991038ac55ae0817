use crate::table::{Table, TableError};
use std::{collections::HashSet, fmt};

/// Distinct non-null values in `column`. Missing cells are not a value.
pub fn count_distinct(table: &Table, column: &str) -> Result<usize, TableError> {
    let values = table.column(column)?;
    let distinct: HashSet<&str> = values.iter().flatten().collect();
    Ok(distinct.len())
}

pub fn count_rows(table: &Table) -> usize {
    table.num_rows()
}

/// `total - unique`, signed. Negative when the keyed table references
/// more identifiers than the other table has rows.
pub fn difference(total: usize, unique: usize) -> i64 {
    total as i64 - unique as i64
}

/// How titles participate in the title / alternate-title relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participation {
    /// Every title has at least one alternate title.
    Total,
    /// Some titles have none (or the counts disagree the other way).
    Partial,
}

impl Participation {
    pub fn classify(difference: i64) -> Self {
        if difference == 0 {
            Participation::Total
        } else {
            Participation::Partial
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Participation::Total => "total",
            Participation::Partial => "partial",
        }
    }
}

impl fmt::Display for Participation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
