//! Command implementations for the dahdit CLI

pub mod doctor;
pub mod quiz;
pub mod sound;
pub mod text;
