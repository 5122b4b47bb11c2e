//! Terminal UI for the draw engine.
//!
//! A single ratatui screen: mode selector, option list with input, the jar
//! or wheel stage, and the result. The event loop feeds key presses to the
//! session as intents and advances its clock by wall-clock time.

pub mod app;
pub mod panels;
pub mod shared;
pub mod terminal;
