//! Token durations and sample-count policies.

use crate::error::{AudioError, AudioResult};

/// Fixed durations, in seconds, for each kind of Morse element.
///
/// There is no words-per-minute calibration; the defaults are the table the
/// original recordings were made with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingTable {
    /// Tone length of a dot.
    pub dot: f64,
    /// Tone length of a dash.
    pub dash: f64,
    /// Silence for an inter-word separator.
    pub word_gap: f64,
    /// Silence for a space between symbols.
    pub symbol_gap: f64,
    /// Silence emitted after every dot or dash.
    pub post_tone: f64,
}

impl Default for TimingTable {
    fn default() -> Self {
        Self {
            dot: 0.3,
            dash: 0.6,
            word_gap: 0.6,
            symbol_gap: 0.9,
            post_tone: 0.4,
        }
    }
}

impl TimingTable {
    /// Checks every duration is finite and non-negative.
    pub fn validate(&self) -> AudioResult<()> {
        for duration in [
            self.dot,
            self.dash,
            self.word_gap,
            self.symbol_gap,
            self.post_tone,
        ] {
            if !duration.is_finite() || duration < 0.0 {
                return Err(AudioError::InvalidDuration { duration });
            }
        }
        Ok(())
    }
}

/// How a burst duration is turned into a number of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleCount {
    /// `floor(duration * rate)`.
    #[default]
    Nominal,
    /// `floor(duration * rate * duration)`.
    ///
    /// Squares the duration. Only useful to reproduce files rendered by the
    /// legacy tool, whose timing differs from the nominal durations.
    Legacy,
}

impl SampleCount {
    /// Number of samples for a burst of `duration` seconds.
    pub fn samples(self, duration: f64, sample_rate: u32) -> usize {
        let rate = sample_rate as f64;
        let exact = match self {
            SampleCount::Nominal => duration * rate,
            SampleCount::Legacy => duration * rate * duration,
        };
        exact.max(0.0).floor() as usize
    }
}
