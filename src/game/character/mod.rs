// Character system
//
// Everything about a single character: movement intent and clamping,
// ground probing, jump/kill actions, death listeners and tuning.

pub mod controller;
pub mod listener;
pub mod tuning;

// Re-export commonly used types
pub use controller::{CharacterController, CharacterId, CharacterManager, MoveDirection};
pub use listener::{CharacterListener, ListenerHandle};
pub use tuning::{CharacterTuning, TuningError, BASE_TUNING};
