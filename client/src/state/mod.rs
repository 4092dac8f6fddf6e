//! Reactive application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages own the engine; `GameState` is the projection of it the surrounding
//! chrome (counter, timer, zoom buttons, tooltip) renders from.

pub mod game;
