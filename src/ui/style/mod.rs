pub mod theme;

pub use theme::{Theme, by_name, names};
