use crate::{
    config::ReportConfig,
    stats::{count_distinct, count_rows, difference, Participation},
    table::load_table,
};
use anyhow::{Context, Result};
use std::{fmt, io::Write};
use tracing::info;

/// Result of comparing distinct alternate-title keys against title rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub key_column: String,
    pub unique: usize,
    pub total: usize,
    pub difference: i64,
}

impl Report {
    pub fn new(key_column: impl Into<String>, unique: usize, total: usize) -> Self {
        Self {
            key_column: key_column.into(),
            unique,
            total,
            difference: difference(total, unique),
        }
    }

    pub fn participation(&self) -> Participation {
        Participation::classify(self.difference)
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!(
                "Number of unique values in '{}': {}",
                self.key_column, self.unique
            ),
            format!("Number of records in Title Basics: {}", self.total),
            format!(
                "There are {} titles which do not have an alternative title.",
                self.difference
            ),
        ]
    }

    /// Writes the three lines to `out`, surfacing write failures such as a
    /// closed pipe instead of panicking.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Load both tables, count, and subtract. Nothing is printed here, so a
/// failure at any step leaves no partial report behind.
#[tracing::instrument(level = "info", skip(config), fields(akas = %config.akas_path.display(), basics = %config.basics_path.display()))]
pub fn run(config: &ReportConfig) -> Result<Report> {
    let options = config.read_options();

    let akas = load_table(&config.akas_path, &options).context("loading alternate titles")?;
    let basics = load_table(&config.basics_path, &options).context("loading title basics")?;

    let unique = count_distinct(&akas, &config.key_column)
        .with_context(|| format!("counting distinct '{}'", config.key_column))?;
    let total = count_rows(&basics);
    let report = Report::new(config.key_column.clone(), unique, total);

    info!(
        unique,
        total,
        difference = report.difference,
        participation = %report.participation(),
        "relationship participation"
    );
    Ok(report)
}
