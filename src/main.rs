use anyhow::Result;
use log::info;
use std::thread;
use std::time::Duration;

mod core;
mod engine;
mod game;

use crate::core::math::{clamp, lerp};
use engine::game_loop::GameLoop;
use engine::physics::{body::presets, CollisionEvent, PhysicsWorld};
use game::character::{CharacterId, CharacterManager, MoveDirection, BASE_TUNING};
use game::effects::TransientEffects;
use game::hooks::LogHooks;
use game::session::GameSession;

/// Demo time limit so a broken run can't spin forever
const MAX_RUN_SECS: f32 = 30.0;

/// Horizontal extent the demo camera may pan over
const ARENA_HALF_WIDTH: f32 = 18.0;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tumbledown demo...");

    let mut physics = PhysicsWorld::new();
    let mut manager = CharacterManager::new();
    let mut effects = TransientEffects::new();
    let mut hooks = LogHooks;
    let session = GameSession::shared();

    // Arena: one long floor with a spike pit partway along it
    let floor = physics.add_rigid_body(presets::terrain_body(0.0, -0.5));
    physics.add_collider(presets::terrain_collider(2.0 * ARENA_HALF_WIDTH, 1.0), floor);

    let spikes = physics.add_rigid_body(presets::terrain_body(10.0, 0.25));
    let spike_collider = physics.add_collider(presets::hazard_collider(1.5, 0.5), spikes);

    let player = manager
        .spawn_character("player", true, BASE_TUNING, &mut physics, 0.0, 1.5)
        .map_err(|e| anyhow::anyhow!("bad player tuning: {e}"))?;
    let rival = manager
        .spawn_character("rival", false, BASE_TUNING, &mut physics, -3.0, 1.5)
        .map_err(|e| anyhow::anyhow!("bad rival tuning: {e}"))?;

    for id in [player, rival] {
        if let Some(character) = manager.get_mut(id) {
            character.add_listener(session.clone());
        }
    }

    let mut game_loop = GameLoop::new();
    let mut camera_x = 0.0_f32;

    while !session.borrow().is_game_over() && game_loop.elapsed_secs() < MAX_RUN_SECS {
        let ticks = game_loop.begin_frame();

        for _ in 0..ticks {
            // Both characters march toward the spike pit; the rival hops along
            for id in [player, rival] {
                if let Some(character) = manager.get_mut(id) {
                    character.set_direction(MoveDirection::Right);
                }
            }
            if let Some(npc) = manager.get_mut(rival) {
                if npc.is_grounded() && game_loop.tick_count() % 120 == 0 {
                    npc.jump(&mut physics, &mut hooks);
                }
            }

            manager.simulation_tick(&mut physics);
            physics.step();

            for event in physics.get_collision_events() {
                let CollisionEvent::Started {
                    collider1,
                    collider2,
                } = event
                else {
                    continue;
                };
                for (hazard, other) in [(collider1, collider2), (collider2, collider1)] {
                    if hazard != spike_collider {
                        continue;
                    }
                    if let Some(body) = physics.body_of_collider(other) {
                        if let Some(entity) = physics.get_entity_id(body) {
                            manager.kill(
                                entity as CharacterId,
                                &mut physics,
                                &mut hooks,
                                &mut effects,
                            );
                        }
                    }
                }
            }

            effects.update(game_loop.simulation_timestep());
        }

        manager.presentation_tick(&physics, &mut hooks);

        // Smooth camera follow, clamped to the arena
        if let Some((x, _)) = manager
            .get(player)
            .and_then(|c| c.position(&physics))
        {
            camera_x = clamp(lerp(camera_x, x, 0.1), -ARENA_HALF_WIDTH, ARENA_HALF_WIDTH);
        }

        // Headless stand-in for vsync
        thread::sleep(Duration::from_millis(4));
    }

    info!(
        "Demo finished after {:.1}s: {} deaths, game over = {}, camera at {:.1}",
        game_loop.elapsed_secs(),
        session.borrow().deaths(),
        session.borrow().is_game_over(),
        camera_x,
    );

    Ok(())
}
