// Character movement tuning
//
// Every character shares the same base numbers; NPC instances get a
// transient jitter on top so a crowd doesn't move in lockstep. The
// stored values are never permanently perturbed.

use thiserror::Error;

/// Symmetric jitter applied to the speed cap for NPC instances
pub const MAX_SPEED_JITTER: f32 = 0.25;

/// Symmetric jitter applied to the jump impulse for NPC instances
pub const JUMP_FORCE_JITTER: f32 = 20.0;

/// Movement constants for a character
#[derive(Debug, Clone)]
pub struct CharacterTuning {
    /// Horizontal speed cap (units/second)
    pub max_speed: f32,
    /// Horizontal drive force applied while below the cap
    pub move_speed: f32,
    /// Fraction of horizontal velocity removed per grounded neutral tick, in [0, 1)
    pub damp_amount: f32,
    /// Upward jump impulse strength
    pub jump_force: f32,
    /// Collider width in world units
    pub width: f32,
    /// Collider height in world units
    pub height: f32,
}

/// The base tuning shared by every character
pub const BASE_TUNING: CharacterTuning = CharacterTuning {
    max_speed: 3.0,
    move_speed: 20.0,
    damp_amount: 0.20,
    jump_force: 350.0,
    width: 1.0,
    height: 2.0,
};

impl Default for CharacterTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}

/// Validation failure for a tuning set
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("damp_amount must be within [0, 1), got {0}")]
    DampOutOfRange(f32),
}

impl CharacterTuning {
    /// Check that every constant is usable
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("max_speed", self.max_speed),
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("width", self.width),
            ("height", self.height),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if !(0.0..1.0).contains(&self.damp_amount) {
            return Err(TuningError::DampOutOfRange(self.damp_amount));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_tuning_is_valid() {
        assert!(BASE_TUNING.validate().is_ok());
    }

    #[test]
    fn test_default_matches_base() {
        let tuning = CharacterTuning::default();
        assert_eq!(tuning.max_speed, 3.0);
        assert_eq!(tuning.move_speed, 20.0);
        assert_eq!(tuning.damp_amount, 0.20);
        assert_eq!(tuning.jump_force, 350.0);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let tuning = CharacterTuning {
            max_speed: 0.0,
            ..BASE_TUNING
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { field: "max_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_full_damp() {
        let tuning = CharacterTuning {
            damp_amount: 1.0,
            ..BASE_TUNING
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::DampOutOfRange(_))
        ));
    }
}
