//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `wheel_host` owns the engine for one board; the remaining components are
//! chrome that read and write `GameState` from context.

pub mod energy_counter;
pub mod game_timer;
pub mod wheel_host;
pub mod zoom_controls;
