pub mod adapters;
pub mod display;
pub mod dlist;
pub mod engine;

pub use adapters::{Queue, Stack};
pub use dlist::DList;
