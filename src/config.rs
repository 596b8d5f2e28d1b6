//! Engine, session and front-end settings
//!
//! All settings have working defaults. The structs derive `Deserialize` with
//! `#[serde(default)]` so a host application can store a partial override
//! in whatever format it already persists.

use serde::{Deserialize, Serialize};

use crate::board::Mark;

/// Difficulty levels.
///
/// `Zen` plays with the sliding window and reuses `Relaxed`'s search knob.
/// `LocalTwoPlayer` has no automated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Relaxed,
    Hard,
    Zen,
    LocalTwoPlayer,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Relaxed,
        Difficulty::Hard,
        Difficulty::Zen,
        Difficulty::LocalTwoPlayer,
    ];

    /// Difficulty whose search knob this one uses. Zen is pinned to Relaxed.
    #[inline]
    pub fn search_profile(self) -> Difficulty {
        match self {
            Difficulty::Zen => Difficulty::Relaxed,
            other => other,
        }
    }

    /// Marks form a three-cell sliding window
    #[inline]
    pub fn is_windowed(self) -> bool {
        self == Difficulty::Zen
    }

    /// A full board can end the game in a draw
    #[inline]
    pub fn draws_possible(self) -> bool {
        !self.is_windowed()
    }

    /// One side is played by the engine
    #[inline]
    pub fn has_automated_opponent(self) -> bool {
        self != Difficulty::LocalTwoPlayer
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Hard => "Hard",
            Difficulty::Zen => "Zen",
            Difficulty::LocalTwoPlayer => "Two players",
        }
    }
}

/// Move search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chance of a uniformly random move on Relaxed (and Zen)
    pub relaxed_randomness: f64,
    /// Chance of a uniformly random move on Hard
    pub hard_randomness: f64,
    /// Answer the first engine move with center, else corner 0, without searching
    pub opening_shortcut: bool,
    /// Prune the minimax tree. Never changes the chosen move.
    pub alpha_beta: bool,
    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relaxed_randomness: 0.70,
            hard_randomness: 0.10,
            opening_shortcut: true,
            alpha_beta: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Randomness disabled on every difficulty
    #[must_use]
    pub fn optimal() -> Self {
        Self {
            relaxed_randomness: 0.0,
            hard_randomness: 0.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    #[must_use]
    pub fn with_opening_shortcut(mut self, enabled: bool) -> Self {
        self.opening_shortcut = enabled;
        self
    }

    #[must_use]
    pub fn with_randomness(mut self, relaxed: f64, hard: f64) -> Self {
        self.relaxed_randomness = relaxed;
        self.hard_randomness = hard;
        self
    }

    /// Probability of ignoring the search for `difficulty`, clamped to `[0, 1]`.
    /// `LocalTwoPlayer` never searches and reports 0.
    pub fn randomness(&self, difficulty: Difficulty) -> f64 {
        let p = match difficulty.search_profile() {
            Difficulty::Hard => self.hard_randomness,
            Difficulty::Relaxed => self.relaxed_randomness,
            _ => 0.0,
        };
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }
}

/// Per-game session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    /// Side controlled by the local player; the engine plays the other one
    pub human: Mark,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Relaxed,
            human: Mark::X,
        }
    }
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

/// Front-end pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Simulated thinking time before the engine's move is shown
    pub ai_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { ai_delay_ms: 800 }
    }
}
