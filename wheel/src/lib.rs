//! Radial board engine for the energy-allocation wheel.
//!
//! This crate owns everything about the wheel that does not need a browser:
//! the board schema and its validation, annular-sector geometry, curved text
//! layout, the rotation / pan / click-suppression state machines, the energy
//! economy, marker placement, and the SVG scene builder. Hosts (the Leptos
//! client and the CLI) forward raw pointer input to [`engine::EngineCore`] and
//! carry out the [`engine::Action`]s it returns through a [`sync::BoardStore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] and the host action list |
//! | [`board`] | Board, ring and tile types with load-time validation |
//! | [`geometry`] | Polar math and annular-sector path construction |
//! | [`text`] | Word wrapping and curved line placement inside a wedge |
//! | [`rotation`] | Per-ring rotation state and wrap-around normalization |
//! | [`camera`] | Pan/zoom state and its CSS transform |
//! | [`input`] | Buttons, tile references and the drag session machine |
//! | [`gate`] | Click suppression right after a drag |
//! | [`economy`] | Energy balance and the active marker set |
//! | [`markers`] | Marker placement and glyph selection |
//! | [`render`] | SVG scene builder |
//! | [`sync`] | Remote store trait, in-memory store and polling adapter |
//! | [`clock`] | Game countdown with pause accounting |
//! | [`config`] | Tunable engine configuration |
//! | [`consts`] | Shared numeric defaults |

pub mod board;
pub mod camera;
pub mod clock;
pub mod config;
pub mod consts;
pub mod economy;
pub mod engine;
pub mod gate;
pub mod geometry;
pub mod input;
pub mod markers;
pub mod render;
pub mod rotation;
pub mod sync;
pub mod text;

#[cfg(test)]
#[path = "fixtures_test.rs"]
pub(crate) mod fixtures;
