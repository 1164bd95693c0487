pub mod koch;
pub mod mandelbrot;
pub mod palette;
pub mod snowflake;

pub use koch::{PixelRounding, RecursionDepth, DEPTH_DEFAULT, DEPTH_MAX};
pub use mandelbrot::{escape_time, ComplexSample, Grid, IterationResult, Samples};
pub use palette::{color_for, IN_SET_COLOR, MAX_COLORS_DEFAULT};
pub use snowflake::{layout, SnowflakeLayout};
