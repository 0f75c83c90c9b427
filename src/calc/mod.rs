pub mod grid;
pub mod view;

pub use view::{Scope, ViewMode, ViewSelection};
