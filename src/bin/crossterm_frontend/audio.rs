use rodio::{source::SineWave, OutputStream, Sink, Source};
use thiserror::Error;

/// Pitch of the tone played while the sound timer runs.
const FREQUENCY: f32 = 440.0;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("could not start playback: {0}")]
    Play(#[from] rodio::PlayError),
}

/// A sine tone that is switched on and off, never restarted.
pub struct Beep {
    sink: Sink,
    gate: Gate,
    // Playback stops when the stream is dropped
    _stream: OutputStream,
}

impl Beep {
    pub fn new() -> Result<Beep, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        sink.append(SineWave::new(FREQUENCY).repeat_infinite());
        sink.pause();

        Ok(Beep {
            sink,
            gate: Gate::default(),
            _stream: stream,
        })
    }

    /// Play the tone while `active`, stay silent otherwise.
    pub fn set(&mut self, active: bool) {
        match self.gate.update(active) {
            Some(true) => self.sink.play(),
            Some(false) => self.sink.pause(),
            None => {}
        }
    }
}

/// Remembers whether the tone is on, and reports only the changes.
#[derive(Debug, Default)]
struct Gate {
    on: bool,
}

impl Gate {
    fn update(&mut self, active: bool) -> Option<bool> {
        if self.on == active {
            return None;
        }
        self.on = active;
        Some(active)
    }
}
