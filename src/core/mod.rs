// Core utilities shared by the engine and the game: math, colors, configuration

pub mod color;
pub mod config;
pub mod math;
