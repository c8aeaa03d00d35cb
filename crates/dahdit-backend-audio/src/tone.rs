//! Tone specifications and sample rendering.

use crate::timing::SampleCount;

/// 2 * PI.
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Peak magnitude of a signed 16-bit sample.
pub const PEAK_AMPLITUDE: f64 = 32767.0;

/// One burst of sine tone or silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Length in seconds.
    pub duration: f64,
    /// Peak amplitude in 16-bit sample units (0 = silence).
    pub amplitude: f64,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Policy used to size the burst.
    pub sample_count: SampleCount,
}

impl ToneSpec {
    /// A silent burst.
    pub fn silence(
        duration: f64,
        frequency: f64,
        sample_rate: u32,
        sample_count: SampleCount,
    ) -> Self {
        Self {
            duration,
            amplitude: 0.0,
            frequency,
            sample_rate,
            sample_count,
        }
    }

    /// Returns true if every rendered sample is zero.
    pub fn is_silent(&self) -> bool {
        self.amplitude == 0.0
    }

    /// Number of samples this burst renders to.
    pub fn num_samples(&self) -> usize {
        self.sample_count.samples(self.duration, self.sample_rate)
    }

    /// Sample `i` of the burst: `round(amplitude * sin(2*pi*f*i/rate))`.
    #[inline]
    pub fn sample_at(&self, i: usize) -> i16 {
        if self.is_silent() {
            return 0;
        }
        let phase = TWO_PI * self.frequency * i as f64 / self.sample_rate as f64;
        (self.amplitude * phase.sin()).round() as i16
    }

    /// Appends the rendered burst to `out`.
    pub fn render_into(&self, out: &mut Vec<i16>) {
        let n = self.num_samples();
        out.reserve(n);
        out.extend((0..n).map(|i| self.sample_at(i)));
    }

    /// Renders the burst to a new buffer.
    pub fn render(&self) -> Vec<i16> {
        let mut out = Vec::new();
        self.render_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(duration: f64) -> ToneSpec {
        ToneSpec {
            duration,
            amplitude: PEAK_AMPLITUDE,
            frequency: 1240.0,
            sample_rate: 44100,
            sample_count: SampleCount::Nominal,
        }
    }

    #[test]
    fn test_render_length() {
        assert_eq!(tone(0.1).render().len(), 4410);
        assert_eq!(tone(0.1).num_samples(), 4410);
    }

    #[test]
    fn test_first_sample_is_zero() {
        assert_eq!(tone(0.1).render()[0], 0);
    }

    #[test]
    fn test_sample_values_follow_formula() {
        let spec = tone(0.01);
        let samples = spec.render();
        for (i, &s) in samples.iter().enumerate() {
            let expected = (32767.0 * (TWO_PI * 1240.0 * i as f64 / 44100.0).sin()).round() as i16;
            assert_eq!(s, expected);
        }
    }

    #[test]
    fn test_tone_reaches_near_peak() {
        let samples = tone(0.1).render();
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 32000, "peak was {peak}");
    }

    #[test]
    fn test_silence_is_zero_for_any_frequency() {
        for freq in [0.0, 440.0, 1240.0, 20000.0] {
            let spec = ToneSpec::silence(0.05, freq, 44100, SampleCount::Nominal);
            assert!(spec.is_silent());
            assert!(spec.render().iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn test_legacy_burst_length() {
        let spec = ToneSpec {
            sample_count: SampleCount::Legacy,
            ..tone(0.5)
        };
        assert_eq!(spec.render().len(), 11025);
    }

    #[test]
    fn test_render_into_appends() {
        let mut out = vec![7i16; 3];
        tone(0.001).render_into(&mut out);
        assert_eq!(out.len(), 3 + 44);
        assert_eq!(&out[..3], &[7, 7, 7]);
    }
}
