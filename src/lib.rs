//! A small side-scrolling shooter played on a fixed 800×600 field.
//!
//! The game logic (`entities`, `aliens`, `scene`) never touches the terminal;
//! drawing goes through the [`display::Canvas`] trait so the tick loop can be
//! driven and inspected in tests.

pub mod aliens;
pub mod assets;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod scene;
