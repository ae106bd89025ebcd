// Recording player adapter - Player port that remembers every command

use std::time::Duration;

use crate::ports::PlayerPort;

/// Command received by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Seek(Duration),
    Play,
    Pause,
}

/// Headless player used by the CLI and by tests
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    events: Vec<PlayerEvent>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PlayerEvent] {
        &self.events
    }

    /// Most recent seek target
    pub fn last_seek(&self) -> Option<Duration> {
        self.events.iter().rev().find_map(|event| match event {
            PlayerEvent::Seek(position) => Some(*position),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PlayerPort for RecordingPlayer {
    fn seek(&mut self, input_position: Duration) {
        self.events.push(PlayerEvent::Seek(input_position));
    }

    fn play(&mut self) {
        self.events.push(PlayerEvent::Play);
    }

    fn pause(&mut self) {
        self.events.push(PlayerEvent::Pause);
    }
}
