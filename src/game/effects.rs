// Transient cosmetic effects
//
// Effects are fire-and-forget: spawn at a position, live for the kind's
// fixed duration, then disappear. The particle simulation itself is the
// renderer's job; this only tracks lifetimes.

use log::debug;

/// How long a death burst stays alive, in seconds
const DEATH_BURST_DURATION: f32 = 1.0;

/// Kinds of transient effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Particle burst spawned where a character died
    DeathBurst,
}

impl EffectKind {
    /// Fixed lifetime of this effect kind
    pub fn duration(self) -> f32 {
        match self {
            EffectKind::DeathBurst => DEATH_BURST_DURATION,
        }
    }
}

/// A spawned effect still playing out
#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    /// Seconds until removal
    pub remaining: f32,
}

/// Tracks transient effects and removes them when they expire
#[derive(Debug, Default)]
pub struct TransientEffects {
    active: Vec<ActiveEffect>,
}

impl TransientEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an effect at a position; it self-removes after its duration
    pub fn spawn(&mut self, kind: EffectKind, x: f32, y: f32) {
        debug!("spawn {:?} at ({:.2}, {:.2})", kind, x, y);
        self.active.push(ActiveEffect {
            kind,
            x,
            y,
            remaining: kind.duration(),
        });
    }

    /// Advance lifetimes and drop expired effects
    pub fn update(&mut self, dt: f32) {
        for effect in &mut self.active {
            effect.remaining -= dt;
        }
        self.active.retain(|effect| effect.remaining > 0.0);
    }

    /// Effects currently alive
    pub fn active(&self) -> &[ActiveEffect] {
        &self.active
    }

    pub fn count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_expire() {
        let mut effects = TransientEffects::new();
        effects.spawn(EffectKind::DeathBurst, 1.0, 2.0);
        assert_eq!(effects.count(), 1);

        // Still alive just before the duration elapses
        effects.update(DEATH_BURST_DURATION - 0.01);
        assert_eq!(effects.count(), 1);

        effects.update(0.02);
        assert_eq!(effects.count(), 0);
    }

    #[test]
    fn test_effects_expire_independently() {
        let mut effects = TransientEffects::new();
        effects.spawn(EffectKind::DeathBurst, 0.0, 0.0);
        effects.update(0.5);
        effects.spawn(EffectKind::DeathBurst, 3.0, 0.0);

        effects.update(0.6);
        assert_eq!(effects.count(), 1, "only the older burst expired");
        assert_eq!(effects.active()[0].x, 3.0);
    }

    #[test]
    fn test_spawn_position_is_kept() {
        let mut effects = TransientEffects::new();
        effects.spawn(EffectKind::DeathBurst, -4.5, 1.25);

        let effect = &effects.active()[0];
        assert_eq!(effect.x, -4.5);
        assert_eq!(effect.y, 1.25);
        assert_eq!(effect.remaining, EffectKind::DeathBurst.duration());
    }
}
