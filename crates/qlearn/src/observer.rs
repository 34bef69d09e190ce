use std::error::Error;

/// Where in an episode a [`StepRecord`] was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepTag {
    /// Initial observation after an environment reset.
    Reset,
    /// Observation after applying an action.
    Step,
}

impl StepTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Step => "step",
        }
    }
}

/// Raw environment output for one reset or step.
#[derive(Clone, Copy, Debug)]
pub struct StepRecord<'a> {
    pub episode: usize,
    /// Step index within the episode; `None` for resets.
    pub step: Option<usize>,
    pub tag: StepTag,
    /// Full observation, including dimensions that are not binned.
    pub observation: &'a [f64],
    pub reward: f64,
    pub terminal: bool,
}

/// Append-only sink for environment output.
///
/// A failing observer never stops training; the trainer logs the error and
/// keeps going.
pub trait StepObserver {
    /// Records one reset or step.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying sink.
    fn record(&mut self, record: &StepRecord<'_>) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Called once when the attempt finishes, successfully or not.
    ///
    /// # Errors
    ///
    /// Returns any error raised while flushing the sink.
    fn finish(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}

/// Observer that drops every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn record(&mut self, _record: &StepRecord<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}

/// Observer that keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub rows: Vec<RecordedStep>,
}

/// Owned copy of a [`StepRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedStep {
    pub episode: usize,
    pub step: Option<usize>,
    pub tag: StepTag,
    pub observation: Vec<f64>,
    pub reward: f64,
    pub terminal: bool,
}

impl StepObserver for RecordingObserver {
    fn record(&mut self, record: &StepRecord<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.rows.push(RecordedStep {
            episode: record.episode,
            step: record.step,
            tag: record.tag,
            observation: record.observation.to_vec(),
            reward: record.reward,
            terminal: record.terminal,
        });
        Ok(())
    }
}
