//! Value table export.
//!
//! JSON keeps the full shape and reloads losslessly. CSV is a flat view for
//! plotting tools: one row per discrete state, bucket indices first, then one
//! column per action.

use std::io::Write;

use crate::error::Result;
use crate::table::QTable;

impl QTable {
    /// # Errors
    ///
    /// Returns [`QLearnError::Serialization`](crate::QLearnError::Serialization)
    /// if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a table written by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or when the value count does not
    /// match the declared shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the table as CSV with headers `s0..sk, a0..an`.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::Csv`](crate::QLearnError::Csv) on write
    /// failures.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let header: Vec<String> = (0..self.bucket_counts().len())
            .map(|d| format!("s{d}"))
            .chain((0..self.action_count()).map(|a| format!("a{a}")))
            .collect();
        csv.write_record(&header)?;

        for (state, row) in self
            .states()
            .zip(self.values().chunks(self.action_count().max(1)))
        {
            let record: Vec<String> = state
                .indices()
                .iter()
                .map(ToString::to_string)
                .chain(row.iter().map(ToString::to_string))
                .collect();
            csv.write_record(&record)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
