//! Lane Runner Library
//!
//! An obstacle-avoidance lane game whose simulation can run headless or
//! behind a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
