// Engine modules: physics simulation and loop timing

pub mod game_loop;
pub mod physics;
