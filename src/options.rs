use serde::Deserialize;

/// Settings for one parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Log progress while reading.
    pub verbose: bool,
    /// How many progress messages to aim for over the whole input.
    pub reporting_frequency: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { verbose: true, reporting_frequency: 10 }
    }
}

impl ParseOptions {
    pub fn quiet() -> Self {
        Self { verbose: false, ..Self::default() }
    }

    /// Number of lines between two progress messages. Never zero.
    pub fn progress_interval(&self, total_lines: usize) -> usize {
        (total_lines / self.reporting_frequency.max(1)).max(1)
    }
}
