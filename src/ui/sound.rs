/// Sound engine: short procedural effects via rodio.
///
/// Buffers are synthesized once at startup and encoded as in-memory WAV.
/// Playback is fire-and-forget on rodio's own threads.
///
/// Without the "sound" feature the stub SoundEngine does nothing.

use crate::sim::event::GameEvent;

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_key: Arc<Vec<u8>>,
        sfx_delete: Arc<Vec<u8>>,
        sfx_submit: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_key: Arc::new(encode_wav(&tone(880.0, 0.025, 0.15))),
                sfx_delete: Arc::new(encode_wav(&tone(440.0, 0.03, 0.15))),
                sfx_submit: Arc::new(encode_wav(&sweep(300.0, 600.0, 0.09))),
                sfx_win: Arc::new(encode_wav(&arpeggio(&[523.0, 659.0, 784.0, 1047.0], 0.09))),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }

        pub fn play_key(&self) { self.play(&self.sfx_key); }
        pub fn play_delete(&self) { self.play(&self.sfx_delete); }
        pub fn play_submit(&self) { self.play(&self.sfx_submit); }
        pub fn play_win(&self) { self.play(&self.sfx_win); }
    }

    fn samples(duration: f32) -> usize {
        (SAMPLE_RATE as f32 * duration) as usize
    }

    /// Sine click with linear fade-out.
    fn tone(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples(duration);
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - i as f32 / n as f32;
                (t * freq * TAU).sin() * env * volume
            })
            .collect()
    }

    /// Rising chirp for a submitted row.
    fn sweep(from: f32, to: f32, duration: f32) -> Vec<f32> {
        let n = samples(duration);
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let p = i as f32 / n as f32;
                phase += (from + (to - from) * p) * TAU / SAMPLE_RATE as f32;
                phase.sin() * (1.0 - p).powf(0.7) * 0.25
            })
            .collect()
    }

    /// Notes back to back, each with a soft attack and decay.
    fn arpeggio(notes: &[f32], note_dur: f32) -> Vec<f32> {
        let n = samples(note_dur);
        let mut out = Vec::with_capacity(n * notes.len());
        for &freq in notes {
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let p = i as f32 / n as f32;
                let env = (p * 20.0).min(1.0) * (1.0 - p * 0.4);
                let wave = (t * freq * TAU).sin() * 0.7 + (t * freq * 2.0 * TAU).sin() * 0.3;
                out.push(wave * env * 0.3);
            }
        }
        out
    }

    /// 16-bit mono PCM WAV.
    fn encode_wav(samples: &[f32]) -> Vec<u8> {
        let data_len = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_len as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_len).to_le_bytes());
        buf.extend_from_slice(b"WAVEfmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes()); // block align
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_len.to_le_bytes());

        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }
}

// ── Public API: no-ops when the sound feature is off ──

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_key(&self) {}
    pub fn play_delete(&self) {}
    pub fn play_submit(&self) {}
    pub fn play_win(&self) {}
}

/// Play the effect for each event, if audio is available.
pub fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::LetterEntered { .. } => sfx.play_key(),
            GameEvent::LetterCleared { .. } => sfx.play_delete(),
            GameEvent::RowSubmitted { .. } => sfx.play_submit(),
            GameEvent::Won { .. } => sfx.play_win(),
            GameEvent::RowAppended { .. } | GameEvent::Reset => {}
        }
    }
}
