//! Step definitions for response delivery BDD scenarios.

pub mod world;

mod given;
mod then;
