//! The hover cue.

use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio playback is blocked")]
    Blocked,
    #[error("audio output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can play a short cue. Callers treat playback as fire and
/// forget.
pub trait Chime {
    fn play(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Rings the terminal bell. Terminals have no volume control, so any
/// non-zero volume rings it.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> Chime for TerminalBell<W> {
    fn play(&mut self, volume: f32) -> Result<(), AudioError> {
        if volume <= 0.0 {
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Refuses every cue, like a page whose autoplay is blocked
pub struct Silent;

impl Chime for Silent {
    fn play(&mut self, _volume: f32) -> Result<(), AudioError> {
        Err(AudioError::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_writes_bel() {
        let mut buf = Vec::new();
        TerminalBell::new(&mut buf).play(0.1).unwrap();
        assert_eq!(buf, b"\x07");
    }

    #[test]
    fn muted_bell_is_quiet() {
        let mut buf = Vec::new();
        TerminalBell::new(&mut buf).play(0.0).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn silent_always_fails() {
        assert!(matches!(Silent.play(0.1), Err(AudioError::Blocked)));
    }
}
