// Engine modules: assets, rendering, timing and scheduling

pub mod assets;
pub mod game_loop;
pub mod renderer;
pub mod timeline;
