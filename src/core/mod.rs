// Engine-agnostic utilities

pub mod math;
