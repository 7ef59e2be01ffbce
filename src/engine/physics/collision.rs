use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision layers for filtering what objects can touch each other
///
/// The ground probes depend on this - they must only test against the
/// terrain layer, never against characters or cosmetic effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    /// Default layer - interacts with everything
    Default = 0b0000_0001,

    /// Player and NPC characters
    Character = 0b0000_0010,

    /// Static terrain: floors, walls, platforms
    Terrain = 0b0000_0100,

    /// Lethal zones (spikes, pits, crushers)
    Hazard = 0b0000_1000,

    /// Trigger zones - detect without physical response
    Sensor = 0b0001_0000,
}

impl CollisionLayer {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters land on terrain and are detected by hazards and sensors.
            // Characters pass through each other.
            CollisionLayer::Character => Group::from_bits_truncate(
                CollisionLayer::Terrain as u32
                    | CollisionLayer::Hazard as u32
                    | CollisionLayer::Sensor as u32,
            ),

            // Terrain blocks characters and other terrain pieces
            CollisionLayer::Terrain => Group::from_bits_truncate(
                CollisionLayer::Character as u32 | CollisionLayer::Terrain as u32,
            ),

            // Hazards only care about characters
            CollisionLayer::Hazard => Group::from_bits_truncate(CollisionLayer::Character as u32),

            // Sensors see everything but never push back
            CollisionLayer::Sensor => Group::ALL,

            // Default interacts with everything
            CollisionLayer::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Interaction groups for a geometric query that should only see this layer
    ///
    /// Used by the ground probes: the query belongs to every group but
    /// filters down to the requested layer's membership bit.
    pub fn probe_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self as u32))
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during the physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// rapier2d reports contacts through its EventHandler trait
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Force magnitudes are not used by the game logic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_have_unique_bits() {
        let layers = [
            CollisionLayer::Default,
            CollisionLayer::Character,
            CollisionLayer::Terrain,
            CollisionLayer::Hazard,
            CollisionLayer::Sensor,
        ];

        for (i, layer1) in layers.iter().enumerate() {
            for (j, layer2) in layers.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *layer1 as u32, *layer2 as u32,
                        "Layers must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_characters_pass_through_each_other() {
        let groups = CollisionLayer::Character.to_interaction_groups();

        assert!(
            !groups.filter.contains(groups.memberships),
            "Characters should not collide with other characters"
        );
    }

    #[test]
    fn test_character_lands_on_terrain() {
        let character = CollisionLayer::Character.to_interaction_groups();
        let terrain_bit = Group::from_bits_truncate(CollisionLayer::Terrain as u32);

        assert!(character.filter.contains(terrain_bit));
    }

    #[test]
    fn test_probe_groups_select_one_layer() {
        let probe = CollisionLayer::Terrain.probe_groups();
        let terrain = CollisionLayer::Terrain.to_interaction_groups();
        let character = CollisionLayer::Character.to_interaction_groups();

        assert!(probe.test(terrain), "probe must see terrain colliders");
        assert!(!probe.test(character), "probe must ignore characters");
    }
}
