//! dahdit CLI library.
//!
//! This crate provides the command implementations behind the `dahdit`
//! binary: translation, sound rendering, the practice quiz and the doctor
//! check. The binary itself only parses arguments and dispatches here.

pub mod commands;
pub mod input;
pub mod quiz;
pub mod signal;
