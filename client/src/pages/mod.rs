//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (room metadata, the game clock)
//! and delegates board rendering to `components::wheel_host`.

pub mod game;
