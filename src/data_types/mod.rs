pub mod axis;
pub mod color;
pub mod config;
pub mod record;

pub use axis::*;
pub use color::{darker, parse_color, steelblue, to_hex, Palette, DARKEN_FACTOR};
pub use config::*;
pub use record::*;
