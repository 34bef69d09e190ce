//! CSV sink for raw environment output.
//!
//! Each row is `episode, step, tag, reward, terminal, obs_0 … obs_n`. The
//! step column is empty for resets and `terminal` is written as `0`/`1`.
//! Observation columns are sized from the first record.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use qlearn::{StepObserver, StepRecord};

pub struct CsvStepLog<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl CsvStepLog<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating the file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> CsvStepLog<W> {
    #[must_use]
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(writer),
            header_written: false,
        }
    }

    fn write_header(&mut self, obs_len: usize) -> csv::Result<()> {
        let mut header: Vec<String> = ["episode", "step", "tag", "reward", "terminal"]
            .iter()
            .map(ToString::to_string)
            .collect();
        header.extend((0..obs_len).map(|i| format!("obs_{i}")));
        self.writer.write_record(&header)
    }
}

impl<W: Write> StepObserver for CsvStepLog<W> {
    fn record(&mut self, record: &StepRecord<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        if !self.header_written {
            self.write_header(record.observation.len())?;
            self.header_written = true;
        }
        let mut row = vec![
            record.episode.to_string(),
            record.step.map(|s| s.to_string()).unwrap_or_default(),
            record.tag.as_str().to_string(),
            record.reward.to_string(),
            u8::from(record.terminal).to_string(),
        ];
        row.extend(record.observation.iter().map(ToString::to_string));
        self.writer.write_record(&row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.writer.flush()?;
        Ok(())
    }
}
