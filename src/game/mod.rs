// Game logic modules

pub mod character;
pub mod effects;
pub mod hooks;
pub mod session;
