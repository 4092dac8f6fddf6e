//! Networking modules for the game REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the engine's `BoardStore` over HTTP and fetches room
//! metadata; `types` defines the request/response bodies.

pub mod api;
pub mod types;
