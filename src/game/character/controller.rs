// Character controller and roster management

use log::info;
use rand::Rng;
use rapier2d::prelude::{vector, QueryFilter};

use crate::engine::game_loop::SIMULATION_TIMESTEP;
use crate::engine::physics::{
    body::presets, ColliderHandle, CollisionLayer, PhysicsWorld, RigidBodyHandle,
};
use crate::game::effects::{EffectKind, TransientEffects};
use crate::game::hooks::{SceneHooks, Sound};

use super::listener::ListenerHandle;
use super::tuning::{CharacterTuning, TuningError, JUMP_FORCE_JITTER, MAX_SPEED_JITTER};

/// Unique identifier for a character
pub type CharacterId = u32;

/// Number of downward ground probes per tick
const NUMBER_OF_RAYS: usize = 5;

/// Length of each ground probe in world units
const PROBE_LENGTH: f32 = 0.05;

/// Requested horizontal movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDirection {
    Left,
    Right,
    #[default]
    None,
}

impl MoveDirection {
    /// Signed horizontal factor: -1, +1 or 0
    pub fn as_sign(self) -> f32 {
        match self {
            MoveDirection::Left => -1.0,
            MoveDirection::Right => 1.0,
            MoveDirection::None => 0.0,
        }
    }
}

/// A player-controlled or NPC character in the game
///
/// Owns movement intent, ground-contact state and alive/dead status.
/// The host drives it through `on_simulation_tick` (fixed clock) and
/// `on_presentation_tick` (frame clock); physics and presentation
/// services are passed in explicitly.
pub struct CharacterController {
    /// Unique identifier
    id: CharacterId,
    /// Character name (for logs)
    name: String,
    /// Whether a human drives this instance; NPC instances get tuning jitter
    is_player_controlled: bool,

    // Physics
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,

    /// Movement constants; never permanently perturbed
    tuning: CharacterTuning,

    /// Current movement intent, set externally each tick
    direction: MoveDirection,
    /// Recomputed every simulation tick from the probe pass
    is_grounded: bool,
    /// Monotonic: flips to false once, then stays false
    is_alive: bool,
    /// Horizontal sprite mirror from the last nonzero direction
    facing_scale: f32,

    /// Death observers, notified once in registration order
    listeners: Vec<ListenerHandle>,
}

impl CharacterController {
    /// Create a character and add its body to the physics world
    pub fn new(
        id: CharacterId,
        name: &str,
        is_player_controlled: bool,
        tuning: CharacterTuning,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Self {
        let body = presets::character_body(spawn_x, spawn_y);
        let body_handle = physics.add_rigid_body(body);

        let collider = presets::character_collider(tuning.width, tuning.height);
        let collider_handle = physics.add_collider(collider, body_handle);

        Self {
            id,
            name: name.to_string(),
            is_player_controlled,
            body_handle,
            collider_handle,
            tuning,
            direction: MoveDirection::None,
            is_grounded: false,
            is_alive: true,
            facing_scale: 1.0,
            listeners: Vec::new(),
        }
    }

    /// Fixed-clock tick: refresh ground contact, then drive movement
    pub fn on_simulation_tick(&mut self, physics: &mut PhysicsWorld) {
        self.refresh_grounded(physics);
        self.move_toward(self.direction, physics);
    }

    /// Frame-clock tick: facing mirror and animation parameters
    pub fn on_presentation_tick(&mut self, physics: &PhysicsWorld, hooks: &mut dyn SceneHooks) {
        match self.direction {
            MoveDirection::Left => self.facing_scale = -1.0,
            MoveDirection::Right => self.facing_scale = 1.0,
            MoveDirection::None => {}
        }

        let Some(body) = physics.get_rigid_body(self.body_handle) else {
            return;
        };
        let vel = body.linvel();

        hooks.set_animation_float("HorizontalVelocity", vel.x.abs());
        let falling = if self.is_grounded {
            0.0
        } else {
            (-vel.y).max(0.0)
        };
        hooks.set_animation_float("VerticalVelocity", falling);
    }

    /// Drive horizontal movement toward a direction
    ///
    /// Non-neutral: push with `move_speed` while below the cap, then
    /// hard-clamp the horizontal axis to the cap. The pre-force check and
    /// the post-hoc clamp are intentionally asymmetric; both use the same
    /// transiently jittered cap for NPC instances. Neutral while grounded:
    /// exponentially damp horizontal velocity. Airborne momentum is kept.
    pub fn move_toward(&mut self, direction: MoveDirection, physics: &mut PhysicsWorld) {
        if direction != MoveDirection::None {
            let sign = direction.as_sign();

            let mut cap = self.tuning.max_speed;
            if !self.is_player_controlled {
                cap += rand::thread_rng().gen_range(-MAX_SPEED_JITTER..=MAX_SPEED_JITTER);
            }

            let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
                return;
            };

            if sign * body.linvel().x < cap {
                body.apply_impulse(
                    vector![sign * self.tuning.move_speed * SIMULATION_TIMESTEP, 0.0],
                    true,
                );
            }

            let vel = *body.linvel();
            if vel.x.abs() > cap {
                body.set_linvel(vector![vel.x.signum() * cap, vel.y], true);
            }
        } else if self.is_grounded {
            let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
                return;
            };
            let vel = *body.linvel();
            body.set_linvel(vector![vel.x * (1.0 - self.tuning.damp_amount), vel.y], true);
        }
    }

    /// Jump off the ground; a no-op while airborne
    pub fn jump(&mut self, physics: &mut PhysicsWorld, hooks: &mut dyn SceneHooks) {
        if !self.is_grounded {
            return;
        }

        let mut force = self.tuning.jump_force;
        if !self.is_player_controlled {
            force += rand::thread_rng().gen_range(-JUMP_FORCE_JITTER..=JUMP_FORCE_JITTER);
        }

        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            return;
        };
        body.apply_impulse(vector![0.0, force * SIMULATION_TIMESTEP], true);

        hooks.fire_animation_trigger("Jump");
        hooks.play_sound(Sound::Jump, random_pitch());
    }

    /// Kill the character; a no-op once dead
    ///
    /// Disables collision response and rendering, spawns a death burst,
    /// plays the death sound, then notifies listeners in registration
    /// order. Each listener hears about a given death exactly once.
    pub fn kill(
        &mut self,
        physics: &mut PhysicsWorld,
        hooks: &mut dyn SceneHooks,
        effects: &mut TransientEffects,
    ) {
        if !self.is_alive {
            return;
        }
        info!("{} was killed", self.name);
        self.is_alive = false;

        physics.set_collider_enabled(self.collider_handle, false);
        hooks.set_visible(false);

        if let Some((x, y)) = self.position(physics) {
            effects.spawn(EffectKind::DeathBurst, x, y);
        }
        hooks.play_sound(Sound::Death, random_pitch());

        // Listeners may look back at the character, so lend them `self`
        // with the list temporarily moved out.
        let listeners = std::mem::take(&mut self.listeners);
        for listener in &listeners {
            listener.borrow_mut().on_kill(self);
        }
        self.listeners = listeners;
    }

    /// Register a death observer; notification order is registration order
    pub fn add_listener(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Set the movement intent for the coming ticks
    pub fn set_direction(&mut self, direction: MoveDirection) {
        self.direction = direction;
    }

    pub fn direction(&self) -> MoveDirection {
        self.direction
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_player_controlled(&self) -> bool {
        self.is_player_controlled
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Sprite mirror factor: 1.0 facing right, -1.0 facing left
    pub fn facing_scale(&self) -> f32 {
        self.facing_scale
    }

    pub fn tuning(&self) -> &CharacterTuning {
        &self.tuning
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }

    /// Current position of the character's body
    pub fn position(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let pos = body.translation();
            (pos.x, pos.y)
        })
    }

    /// Current velocity of the character's body
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let vel = body.linvel();
            (vel.x, vel.y)
        })
    }

    /// Recompute ground contact from the probe pass
    ///
    /// Casts evenly spaced short rays down from the bottom edge of the
    /// collider's bounding box; any terrain hit means grounded. Straddling
    /// a gap narrower than the ray spacing still counts as grounded.
    fn refresh_grounded(&mut self, physics: &PhysicsWorld) {
        self.is_grounded = false;

        let Some(aabb) = physics.collider_aabb(self.collider_handle) else {
            return;
        };

        let ray_spacing = (aabb.maxs.x - aabb.mins.x) / (NUMBER_OF_RAYS - 1) as f32;
        let filter = QueryFilter::default()
            .exclude_rigid_body(self.body_handle)
            .groups(CollisionLayer::Terrain.probe_groups());

        for i in 0..NUMBER_OF_RAYS {
            let origin = vector![aabb.mins.x + ray_spacing * i as f32, aabb.mins.y];

            if physics
                .raycast(origin, vector![0.0, -1.0], PROBE_LENGTH, true, filter)
                .is_some()
            {
                self.is_grounded = true;
            }
        }
    }
}

/// Random playback pitch for one-shot sounds
fn random_pitch() -> f32 {
    rand::thread_rng().gen_range(0.9..=1.1)
}

/// Manages all characters in the game
#[derive(Default)]
pub struct CharacterManager {
    characters: Vec<CharacterController>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Spawn a new character after validating its tuning
    pub fn spawn_character(
        &mut self,
        name: &str,
        is_player_controlled: bool,
        tuning: CharacterTuning,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<CharacterId, TuningError> {
        tuning.validate()?;

        let id = self.next_id;
        self.next_id += 1;

        let character = CharacterController::new(
            id,
            name,
            is_player_controlled,
            tuning,
            physics,
            spawn_x,
            spawn_y,
        );
        physics.set_entity_mapping(character.body_handle(), id as u64);
        self.characters.push(character);

        Ok(id)
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&CharacterController> {
        self.characters.iter().find(|c| c.id() == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut CharacterController> {
        self.characters.iter_mut().find(|c| c.id() == id)
    }

    /// Get the player-controlled character, if any
    pub fn player(&self) -> Option<&CharacterController> {
        self.characters.iter().find(|c| c.is_player_controlled())
    }

    /// All characters
    pub fn all(&self) -> &[CharacterController] {
        &self.characters
    }

    /// Run the fixed-clock tick for every character
    pub fn simulation_tick(&mut self, physics: &mut PhysicsWorld) {
        for character in &mut self.characters {
            character.on_simulation_tick(physics);
        }
    }

    /// Run the frame-clock tick for every character
    pub fn presentation_tick(&mut self, physics: &PhysicsWorld, hooks: &mut dyn SceneHooks) {
        for character in &mut self.characters {
            character.on_presentation_tick(physics, hooks);
        }
    }

    /// Kill a character by ID
    pub fn kill(
        &mut self,
        id: CharacterId,
        physics: &mut PhysicsWorld,
        hooks: &mut dyn SceneHooks,
        effects: &mut TransientEffects,
    ) {
        if let Some(character) = self.get_mut(id) {
            character.kill(physics, hooks, effects);
        }
    }

    pub fn count(&self) -> usize {
        self.characters.len()
    }

    /// Number of characters still alive
    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }
}
