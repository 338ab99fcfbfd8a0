//! Frame-driven facade binding an [`Adventure`] to its random source.
use crate::adventure::{Adventure, Command};
use crate::config::GameConfig;
use crate::effects::Effects;
use crate::input::Key;
use crate::rng::{RandomSource, SeededRng};

/// One running game. Call [`Session::on_tick`] once per frame and
/// [`Session::on_input`] per key event.
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SeededRng> {
    adventure: Adventure,
    rng: R,
}

impl Session<SeededRng> {
    /// Fresh session with default tuning and a seeded stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameConfig::default(), SeededRng::from_seed(seed))
    }

    /// Seed the stream was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> Session<R> {
    #[must_use]
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            adventure: Adventure::new(config),
            rng,
        }
    }

    /// Advance one frame.
    pub fn on_tick(&mut self) -> Effects {
        self.adventure.update(&mut self.rng)
    }

    pub fn on_input(&mut self, key: Key) -> Effects {
        self.adventure.handle_input(key, &mut self.rng)
    }

    /// Shorthand for [`Session::on_input`] with a typed character.
    pub fn press(&mut self, c: char) -> Effects {
        self.on_input(Key::from_char(c))
    }

    /// Apply a command directly, bypassing the key table lookup.
    pub fn apply(&mut self, command: Command) -> Effects {
        self.adventure.apply(command, &mut self.rng)
    }

    /// Run `ticks` frames, collecting every effect in order.
    pub fn advance(&mut self, ticks: u32) -> Effects {
        let mut fx = Effects::new();
        for _ in 0..ticks {
            fx.extend(self.on_tick());
        }
        fx
    }

    #[must_use]
    pub const fn adventure(&self) -> &Adventure {
        &self.adventure
    }

    pub const fn adventure_mut(&mut self) -> &mut Adventure {
        &mut self.adventure
    }

    /// Apply a closure to the mutable adventure.
    pub fn with_adventure_mut<T>(&mut self, f: impl FnOnce(&mut Adventure) -> T) -> T {
        f(&mut self.adventure)
    }

    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Start over from the lore screen, keeping the tuning and the stream.
    pub fn reset(&mut self) {
        let tick = self.adventure.tick;
        self.adventure = Adventure::new(self.adventure.config.clone());
        self.adventure.tick = tick;
    }

    #[must_use]
    pub fn into_adventure(self) -> Adventure {
        self.adventure
    }
}
