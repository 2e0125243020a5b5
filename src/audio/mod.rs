//! Audio feedback
//!
//! The game only ever fires cues and controls the background stream; it
//! never reads anything back. Backends decide what a cue sounds like.

use std::io::Write;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The snake ate the food
    Eat,
    /// The snake hit a wall or itself
    Collision,
}

/// Long-running sounds that can be paused and resumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Fire-and-forget audio output used by the game
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start(&mut self, stream: Stream);
    fn stop(&mut self, stream: Stream);
    fn pause(&mut self, stream: Stream);
    fn resume(&mut self, stream: Stream);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }

    fn start(&mut self, stream: Stream) {
        (**self).start(stream);
    }

    fn stop(&mut self, stream: Stream) {
        (**self).stop(stream);
    }

    fn pause(&mut self, stream: Stream) {
        (**self).pause(stream);
    }

    fn resume(&mut self, stream: Stream) {
        (**self).resume(stream);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
    fn start(&mut self, _stream: Stream) {}
    fn stop(&mut self, _stream: Stream) {}
    fn pause(&mut self, _stream: Stream) {}
    fn resume(&mut self, _stream: Stream) {}
}

/// Rings the terminal bell for cues
///
/// Terminals have no way to play music, so the background stream is only
/// tracked as state for the UI and the log.
pub struct TerminalBell<W: Write> {
    out: W,
    background: StreamState,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            background: StreamState::Stopped,
        }
    }

    pub fn background(&self) -> StreamState {
        self.background
    }

    fn ring(&mut self, times: usize) {
        let result = self
            .out
            .write_all(&b"\x07".repeat(times))
            .and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::warn!(%err, "failed to ring terminal bell");
        }
    }

    fn transition(&mut self, stream: Stream, from: &[StreamState], to: StreamState) {
        if from.contains(&self.background) {
            tracing::debug!(?stream, from = ?self.background, ?to, "audio stream");
            self.background = to;
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Eat => self.ring(1),
            Cue::Collision => self.ring(2),
        }
    }

    fn start(&mut self, stream: Stream) {
        self.transition(
            stream,
            &[StreamState::Stopped, StreamState::Paused, StreamState::Playing],
            StreamState::Playing,
        );
    }

    fn stop(&mut self, stream: Stream) {
        self.transition(
            stream,
            &[StreamState::Playing, StreamState::Paused],
            StreamState::Stopped,
        );
    }

    fn pause(&mut self, stream: Stream) {
        self.transition(stream, &[StreamState::Playing], StreamState::Paused);
    }

    fn resume(&mut self, stream: Stream) {
        self.transition(stream, &[StreamState::Paused], StreamState::Playing);
    }
}

/// Every call made to a [`RecordingAudio`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play(Cue),
    Start(Stream),
    Stop(Stream),
    Pause(Stream),
    Resume(Stream),
}

/// Keeps a log of calls, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.events)
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.events.push(AudioEvent::Play(cue));
    }

    fn start(&mut self, stream: Stream) {
        self.events.push(AudioEvent::Start(stream));
    }

    fn stop(&mut self, stream: Stream) {
        self.events.push(AudioEvent::Stop(stream));
    }

    fn pause(&mut self, stream: Stream) {
        self.events.push(AudioEvent::Pause(stream));
    }

    fn resume(&mut self, stream: Stream) {
        self.events.push(AudioEvent::Resume(stream));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_per_cue() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Cue::Eat);
        assert_eq!(bell.out, b"\x07");

        bell.play(Cue::Collision);
        assert_eq!(bell.out, b"\x07\x07\x07");
    }

    #[test]
    fn test_background_transitions() {
        let mut bell = TerminalBell::new(std::io::sink());
        assert_eq!(bell.background(), StreamState::Stopped);

        bell.resume(Stream::Background);
        assert_eq!(bell.background(), StreamState::Stopped);

        bell.start(Stream::Background);
        assert_eq!(bell.background(), StreamState::Playing);

        bell.pause(Stream::Background);
        assert_eq!(bell.background(), StreamState::Paused);

        bell.resume(Stream::Background);
        assert_eq!(bell.background(), StreamState::Playing);

        bell.stop(Stream::Background);
        assert_eq!(bell.background(), StreamState::Stopped);

        bell.pause(Stream::Background);
        assert_eq!(bell.background(), StreamState::Stopped);
    }

    #[test]
    fn test_recording() {
        let mut audio = RecordingAudio::new();
        audio.start(Stream::Background);
        audio.play(Cue::Eat);

        assert_eq!(
            audio.take(),
            vec![AudioEvent::Start(Stream::Background), AudioEvent::Play(Cue::Eat)]
        );
        assert!(audio.events.is_empty());
    }
}
