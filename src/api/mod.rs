mod engine;
mod engine_config;
mod spiral_frame_builder;
mod timeline_frame_builder;

pub use engine::UsageSpiralEngine;
pub use engine_config::{EngineConfig, ViewStyle};
