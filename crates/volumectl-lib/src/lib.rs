//! volumectl — volume and mute control through the platform's native mixer tools.

pub mod backend;
pub mod config;
pub mod error;
pub mod exec;
pub mod mixer;

pub use error::VolumeError;
pub use mixer::Mixer;
