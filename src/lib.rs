//! Locates triangles and squares in a camera feed and streams their
//! positions to a motion controller over a serial link, pausing whenever the
//! controller asks it to.

pub mod annotate;
pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod modules;
pub mod pipeline;
pub mod protocol;
pub mod state;
pub mod tracker;

pub use error::{LocatorError, Result};
