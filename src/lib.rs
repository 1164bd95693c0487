pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fractals;
pub mod math;
pub mod persist;
pub mod render;

pub use error::{Error, Result};
pub use render::{render_mandelbrot, render_snowflake, RenderSummary, Rendered};
