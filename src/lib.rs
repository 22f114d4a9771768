pub mod classify;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod enums;
pub mod extract;
pub mod icons;
pub mod load_config;
pub mod model;
pub mod normalize;
pub mod patch;
pub mod patterns;
pub mod pipeline;
pub mod slots;
pub mod source;

pub use cli::{run, Cli, Commands};
