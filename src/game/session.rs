// Game session state
//
// The character core never touches global state; the player's death
// reaches the session through the listener mechanism and flips the
// game-over flag that the outer loop polls.

use log::info;
use std::cell::RefCell;
use std::rc::Rc;

use super::character::{CharacterController, CharacterListener};

/// Process-wide run state, owned by the host loop
#[derive(Debug, Default)]
pub struct GameSession {
    game_over: bool,
    deaths: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session behind a shared handle so it can be registered
    /// as a listener and polled by the host loop at the same time
    pub fn shared() -> Rc<RefCell<GameSession>> {
        Rc::new(RefCell::new(GameSession::new()))
    }

    /// True once the player-controlled character has died
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Total deaths observed this session, player or NPC
    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}

impl CharacterListener for GameSession {
    fn on_kill(&mut self, character: &CharacterController) {
        self.deaths += 1;
        if character.is_player_controlled() {
            self.game_over = true;
            info!("player died, game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::PhysicsWorld;
    use crate::game::character::{CharacterManager, BASE_TUNING};
    use crate::game::effects::TransientEffects;
    use crate::game::hooks::RecordingHooks;

    fn setup() -> (PhysicsWorld, CharacterManager, Rc<RefCell<GameSession>>) {
        let mut world = PhysicsWorld::new();
        let mut manager = CharacterManager::new();
        let session = GameSession::shared();

        for (name, is_player) in [("player", true), ("rival", false)] {
            let id = manager
                .spawn_character(name, is_player, BASE_TUNING, &mut world, 0.0, 1.0)
                .unwrap();
            manager.get_mut(id).unwrap().add_listener(session.clone());
        }

        (world, manager, session)
    }

    #[test]
    fn test_npc_death_is_not_game_over() {
        let (mut world, mut manager, session) = setup();
        let rival = manager.all().iter().find(|c| !c.is_player_controlled()).unwrap().id();

        let mut hooks = RecordingHooks::new();
        let mut effects = TransientEffects::new();
        manager.kill(rival, &mut world, &mut hooks, &mut effects);

        assert!(!session.borrow().is_game_over());
        assert_eq!(session.borrow().deaths(), 1);
    }

    #[test]
    fn test_player_death_ends_the_game() {
        let (mut world, mut manager, session) = setup();
        let player = manager.player().unwrap().id();

        let mut hooks = RecordingHooks::new();
        let mut effects = TransientEffects::new();
        manager.kill(player, &mut world, &mut hooks, &mut effects);

        assert!(session.borrow().is_game_over());
    }

    #[test]
    fn test_repeat_kill_counts_once() {
        let (mut world, mut manager, session) = setup();
        let player = manager.player().unwrap().id();

        let mut hooks = RecordingHooks::new();
        let mut effects = TransientEffects::new();
        manager.kill(player, &mut world, &mut hooks, &mut effects);
        manager.kill(player, &mut world, &mut hooks, &mut effects);

        assert_eq!(session.borrow().deaths(), 1);
    }
}
