// Per-round shared state every actor reads and writes.
use bevy::log::{debug, warn};

use crate::cast::VoiceLine;
use crate::error::GameError;
use crate::rounds::Backdrop;

/// Identifies one playback of a voice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceTicket(pub u64);

/// Something the media adapter should do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Voice { line: VoiceLine, ticket: VoiceTicket },
    Silence,
    Backdrop(Backdrop),
}

/// Held steering keys, one frame at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Default)]
pub struct RoundContext {
    round_event: u32,
    win_round: u32,
    pub next_round: bool,
    pub game_over: bool,
    pub end_game: bool,
    pub restart: bool,
    /// Re-run the spawn table for the current beat.
    pub respawn: bool,
    voice: Option<VoiceTicket>,
    next_ticket: u64,
    cues: Vec<Cue>,
    pub steering: Steering,
}

impl RoundContext {
    pub fn round_event(&self) -> u32 {
        self.round_event
    }

    pub fn win_round(&self) -> u32 {
        self.win_round
    }

    /// Move the beat forward. Going backwards is refused.
    pub fn set_beat(&mut self, value: u32) -> Result<(), GameError> {
        if value < self.round_event {
            return Err(GameError::BeatRegression {
                current: self.round_event,
                requested: value,
            });
        }
        if value != self.round_event {
            debug!("round event {} -> {}", self.round_event, value);
            self.round_event = value;
        }
        Ok(())
    }

    pub fn advance_beat(&mut self, step: u32) {
        let target = self.round_event.saturating_add(step);
        if let Err(err) = self.set_beat(target) {
            warn!("{err}");
        }
    }

    pub fn add_win(&mut self, amount: u32) {
        self.win_round += amount;
    }

    pub fn set_win(&mut self, value: u32) {
        self.win_round = value;
    }

    /// Start a voice line, cutting off whatever was playing.
    pub fn play(&mut self, line: VoiceLine) -> VoiceTicket {
        let ticket = VoiceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.voice = Some(ticket);
        self.cues.push(Cue::Voice { line, ticket });
        ticket
    }

    pub fn stop_voices(&mut self) {
        self.voice = None;
        self.cues.push(Cue::Silence);
    }

    pub fn voice_idle(&self) -> bool {
        self.voice.is_none()
    }

    /// A playback ended. Tickets of lines that were already replaced are ignored.
    pub fn voice_finished(&mut self, ticket: VoiceTicket) -> bool {
        if self.voice == Some(ticket) {
            self.voice = None;
            true
        } else {
            false
        }
    }

    pub fn cue_backdrop(&mut self, backdrop: Backdrop) {
        self.cues.push(Cue::Backdrop(backdrop));
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Fresh counters for a new round. Voices keep playing across the cut.
    pub fn reset_round(&mut self) {
        self.round_event = 0;
        self.win_round = 0;
        self.next_round = false;
        self.respawn = false;
    }

    /// Back to a blank slate, keeping ticket numbering and queued cues so
    /// late completions of old lines stay stale.
    pub fn restart(&mut self) {
        *self = Self {
            next_ticket: self.next_ticket,
            cues: std::mem::take(&mut self.cues),
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beat_never_goes_backwards() {
        let mut ctx = RoundContext::default();
        ctx.advance_beat(3);
        assert_eq!(ctx.round_event(), 3);
        assert!(matches!(
            ctx.set_beat(1),
            Err(GameError::BeatRegression { current: 3, requested: 1 })
        ));
        assert_eq!(ctx.round_event(), 3);
        assert!(ctx.set_beat(3).is_ok());
    }

    #[test]
    fn replaced_voice_tickets_are_stale() {
        let mut ctx = RoundContext::default();
        let first = ctx.play(VoiceLine::FairyIntro);
        let second = ctx.play(VoiceLine::FairySupplies);
        assert!(!ctx.voice_finished(first));
        assert!(!ctx.voice_idle());
        assert!(ctx.voice_finished(second));
        assert!(ctx.voice_idle());
    }

    #[test]
    fn restart_keeps_ticket_numbering() {
        let mut ctx = RoundContext::default();
        let old = ctx.play(VoiceLine::RhinoCall);
        ctx.advance_beat(2);
        ctx.restart();
        assert_eq!(ctx.round_event(), 0);
        let new = ctx.play(VoiceLine::RhinoCall);
        assert_ne!(old, new);
        assert!(!ctx.voice_finished(old));
    }

    #[test]
    fn stop_voices_queues_silence() {
        let mut ctx = RoundContext::default();
        ctx.play(VoiceLine::LionNail);
        ctx.stop_voices();
        let cues = ctx.drain_cues();
        assert!(matches!(cues.last(), Some(Cue::Silence)));
        assert!(ctx.drain_cues().is_empty());
    }
}
