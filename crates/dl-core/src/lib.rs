//! dl-core: graph-driven dungeon layout
//!
//! Takes an abstract graph of room roles plus a catalogue of room blueprints
//! and assembles a non-overlapping, doorway-connected layout of rooms in
//! world space. Rendering is left to the embedding application, which is
//! notified through [`dungeon::RoomObserver`].
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! File loading is gated behind `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::borrow::ToOwned;
    pub use alloc::collections::VecDeque;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod dungeon;
pub mod level;

mod config;
mod rng;

pub use config::{ConfigError, GenerationConfig};
pub use level::LevelDefinition;
#[cfg(feature = "std")]
pub use level::LevelLoadError;
pub use rng::LayoutRng;
