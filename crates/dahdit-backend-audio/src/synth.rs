//! Morse tone synthesis.
//!
//! Walks a Morse string one character at a time:
//!
//! - separator or space: silence for the gap's duration
//! - dot or dash: a sine burst, then the post-tone silence
//!
//! There is no look-ahead and no state beyond the current token, so the
//! output is a pure function of the input and the [`SynthConfig`].


use crate::error::{AudioError, AudioResult};
use crate::sink::{BufferSink, ToneSink};
use crate::timing::{SampleCount, TimingTable};
use crate::token::{tokenize, Token};
use crate::tone::{ToneSpec, PEAK_AMPLITUDE};
use crate::wav::{samples_to_pcm16, WavFormat, WavResult};

/// Fixed output sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Tone frequency in Hz.
pub const DEFAULT_FREQUENCY: f64 = 1240.0;

/// Inter-word separator understood by default.
pub const DEFAULT_WORD_SEPARATOR: char = ';';

/// Synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude of tone bursts, in 16-bit sample units.
    pub amplitude: f64,
    /// Character that marks a word gap.
    pub separator: char,
    /// Durations per token kind.
    pub timing: TimingTable,
    /// How durations become sample counts.
    pub sample_count: SampleCount,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency: DEFAULT_FREQUENCY,
            amplitude: PEAK_AMPLITUDE,
            separator: DEFAULT_WORD_SEPARATOR,
            timing: TimingTable::default(),
            sample_count: SampleCount::Nominal,
        }
    }
}

impl SynthConfig {
    /// Sets the word separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the sample-count policy.
    pub fn with_sample_count(mut self, sample_count: SampleCount) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the tone frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Checks every parameter is usable.
    pub fn validate(&self) -> AudioResult<()> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(AudioError::InvalidFrequency {
                freq: self.frequency,
            });
        }
        if !(0.0..=PEAK_AMPLITUDE).contains(&self.amplitude) {
            return Err(AudioError::invalid_param(
                "amplitude",
                format!("must be between 0 and {PEAK_AMPLITUDE}"),
            ));
        }
        if matches!(self.separator, '.' | '-' | ' ') {
            return Err(AudioError::invalid_param(
                "separator",
                format!("'{}' is already a Morse token", self.separator),
            ));
        }
        self.timing.validate()
    }

    /// WAV header metadata for this configuration.
    pub fn format(&self) -> WavFormat {
        WavFormat::mono(self.sample_rate)
    }
}

/// Samples plus header metadata from [`ToneSynthesizer::synthesize`].
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Rendered samples, in order.
    pub samples: Vec<i16>,
    /// Header metadata (1 channel, 16-bit).
    pub format: WavFormat,
    /// Number of tone specifications rendered.
    pub num_tones: usize,
}

impl SynthesisResult {
    /// Raw little-endian PCM bytes.
    pub fn pcm_bytes(&self) -> Vec<u8> {
        samples_to_pcm16(&self.samples)
    }

    /// Serializes to a complete WAV file.
    pub fn to_wav(&self) -> WavResult {
        WavResult::from_mono(&self.samples, self.format.sample_rate)
    }

    /// Length of the rendered audio in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.format.sample_rate as f64
    }
}

/// Renders Morse strings to PCM.
#[derive(Debug, Clone, Default)]
pub struct ToneSynthesizer {
    config: SynthConfig,
}

impl ToneSynthesizer {
    /// Creates a synthesizer after validating `config`.
    pub fn new(config: SynthConfig) -> AudioResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    fn burst(&self, duration: f64, amplitude: f64) -> ToneSpec {
        ToneSpec {
            duration,
            amplitude,
            frequency: self.config.frequency,
            sample_rate: self.config.sample_rate,
            sample_count: self.config.sample_count,
        }
    }

    /// Tones emitted for a single token.
    pub fn token_tones(&self, token: Token) -> Vec<ToneSpec> {
        let timing = &self.config.timing;
        match token {
            Token::WordGap => vec![self.burst(timing.word_gap, 0.0)],
            Token::SymbolGap => vec![self.burst(timing.symbol_gap, 0.0)],
            Token::Dot | Token::Dash => {
                let duration = if token == Token::Dot {
                    timing.dot
                } else {
                    timing.dash
                };
                vec![
                    self.burst(duration, self.config.amplitude),
                    self.burst(timing.post_tone, 0.0),
                ]
            }
        }
    }

    /// Expands a Morse string into its tone sequence.
    pub fn tones(&self, morse: &str) -> AudioResult<Vec<ToneSpec>> {
        let tokens = tokenize(morse, self.config.separator)?;
        Ok(tokens
            .into_iter()
            .flat_map(|token| self.token_tones(token))
            .collect())
    }

    /// Feeds every tone of `morse` to `sink`, in order.
    ///
    /// The whole string is tokenized first, so a bad character means the
    /// sink receives nothing.
    pub fn stream<S: ToneSink + ?Sized>(&self, morse: &str, sink: &mut S) -> AudioResult<usize> {
        let tones = self.tones(morse)?;
        for tone in &tones {
            sink.write_tone(tone)?;
        }
        Ok(tones.len())
    }

    /// Renders `morse` to an in-memory sample buffer.
    pub fn synthesize(&self, morse: &str) -> AudioResult<SynthesisResult> {
        let mut sink = BufferSink::new();
        let num_tones = self.stream(morse, &mut sink)?;
        Ok(SynthesisResult {
            samples: sink.into_samples(),
            format: self.config.format(),
            num_tones,
        })
    }

    /// Number of samples `morse` renders to, without rendering it.
    pub fn sample_len(&self, morse: &str) -> AudioResult<usize> {
        Ok(self.tones(morse)?.iter().map(ToneSpec::num_samples).sum())
    }
}
