// File: ./src/model/mod.rs
pub mod display;
pub mod item;

pub use display::{Glyph, TaskDisplay, TodoLine};
pub use item::{Due, Priority, Project, Task, TaskStatus};
