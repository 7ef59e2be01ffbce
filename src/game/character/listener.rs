// Death observers
//
// Listeners are registered on a character and notified synchronously,
// in registration order, exactly once when the character dies.

use std::cell::RefCell;
use std::rc::Rc;

use super::controller::CharacterController;

/// Observer notified when a character dies
pub trait CharacterListener {
    /// Called once, synchronously, from inside the character's kill path.
    /// The character is already marked dead when this runs.
    fn on_kill(&mut self, character: &CharacterController);
}

/// Shared handle to a listener, cloneable into several characters
pub type ListenerHandle = Rc<RefCell<dyn CharacterListener>>;

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Listener that counts notifications and remembers who died
    #[derive(Debug, Default)]
    pub struct CountingListener {
        pub kills_seen: u32,
        pub last_victim: Option<String>,
    }

    impl CharacterListener for CountingListener {
        fn on_kill(&mut self, character: &CharacterController) {
            self.kills_seen += 1;
            self.last_victim = Some(character.name().to_string());
        }
    }

    /// Listener that appends a tag to a shared journal, for ordering checks
    pub struct JournalListener {
        pub tag: &'static str,
        pub journal: Rc<RefCell<Vec<&'static str>>>,
    }

    impl CharacterListener for JournalListener {
        fn on_kill(&mut self, _character: &CharacterController) {
            self.journal.borrow_mut().push(self.tag);
        }
    }
}
