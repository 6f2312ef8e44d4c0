// Plot types module

pub mod scatter;

pub use scatter::{Mark, ScatterPlot};
