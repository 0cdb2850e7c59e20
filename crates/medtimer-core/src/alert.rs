//! Audio cue synthesis for due-soon alerts.
//!
//! The core performs no I/O: `beep_wav` is a pure leaf that renders a
//! sine tone as 16-bit mono PCM WAV bytes, which the driver may play or
//! write to disk when the due-soon list is non-empty.

/// Parameters for the alert tone.
#[derive(Debug, Clone, Copy)]
pub struct BeepSpec {
    pub seconds: f64,
    pub freq_hz: f64,
    /// Linear amplitude in `[0.0, 1.0]`.
    pub volume: f64,
    pub sample_rate: u32,
}

impl Default for BeepSpec {
    fn default() -> Self {
        Self {
            seconds: 0.6,
            freq_hz: 880.0,
            volume: 0.5,
            sample_rate: 44_100,
        }
    }
}

/// Render the tone as a complete WAV file (RIFF header + PCM data).
pub fn beep_wav(spec: &BeepSpec) -> Vec<u8> {
    let n_samples = (spec.seconds * f64::from(spec.sample_rate)) as u32;
    let data_len = n_samples * 2; // 16-bit mono
    let byte_rate = spec.sample_rate * 2;

    let mut buf = Vec::with_capacity(44 + data_len as usize);

    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_len).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // mono
    buf.extend_from_slice(&spec.sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&2u16.to_le_bytes()); // block align
    buf.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..n_samples {
        let t = f64::from(i) / f64::from(spec.sample_rate);
        let sample = spec.volume * (2.0 * std::f64::consts::PI * spec.freq_hz * t).sin();
        let value = (sample * 32767.0) as i16;
        buf.extend_from_slice(&value.to_le_bytes());
    }

    buf
}
