mod color;
mod rect;
mod segment;

pub use color::Color;
pub use rect::Rectangle;
pub use segment::{Point2D, Segment};

/// Point of the complex plane, `re + im·i`
pub type Complex = num_complex::Complex64;
