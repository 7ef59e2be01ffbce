// Scene hooks - the presentation services a character talks to
//
// Rendering, animation blending and audio mixing live outside this crate.
// Characters reach them through this trait, the host supplies the real
// implementation.

use log::debug;

/// Sound effects a character can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Death,
}

/// Presentation-side services consumed by characters
pub trait SceneHooks {
    /// Set a named float parameter on the animation graph
    fn set_animation_float(&mut self, name: &str, value: f32);

    /// Fire a named one-shot trigger on the animation graph
    fn fire_animation_trigger(&mut self, name: &str);

    /// Play a sound once at the given pitch
    fn play_sound(&mut self, sound: Sound, pitch: f32);

    /// Show or hide the character's sprite
    fn set_visible(&mut self, visible: bool);
}

/// Hooks implementation that logs every call
///
/// Stands in for a renderer/mixer in the headless demo.
#[derive(Debug, Default)]
pub struct LogHooks;

impl SceneHooks for LogHooks {
    fn set_animation_float(&mut self, name: &str, value: f32) {
        debug!("anim float {} = {:.3}", name, value);
    }

    fn fire_animation_trigger(&mut self, name: &str) {
        debug!("anim trigger {}", name);
    }

    fn play_sound(&mut self, sound: Sound, pitch: f32) {
        debug!("play {:?} at pitch {:.2}", sound, pitch);
    }

    fn set_visible(&mut self, visible: bool) {
        debug!("visible = {}", visible);
    }
}

/// Hooks implementation that records every call, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub floats: Vec<(String, f32)>,
    pub triggers: Vec<String>,
    pub sounds: Vec<(Sound, f32)>,
    pub visibility: Vec<bool>,
}

#[cfg(test)]
impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds_of(&self, sound: Sound) -> usize {
        self.sounds.iter().filter(|(s, _)| *s == sound).count()
    }

    pub fn last_float(&self, name: &str) -> Option<f32> {
        self.floats
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
impl SceneHooks for RecordingHooks {
    fn set_animation_float(&mut self, name: &str, value: f32) {
        self.floats.push((name.to_string(), value));
    }

    fn fire_animation_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }

    fn play_sound(&mut self, sound: Sound, pitch: f32) {
        self.sounds.push((sound, pitch));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visibility.push(visible);
    }
}
