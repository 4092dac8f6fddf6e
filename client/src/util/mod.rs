//! Browser helpers shared by pages and components.

pub mod pointer;
pub mod time;
