use super::mandelbrot::IterationResult;
use crate::math::Color;

pub const MAX_COLORS_DEFAULT: u32 = 256;

/// Colour of points that never escaped
pub const IN_SET_COLOR: Color = Color::BLACK;

/// Spreads the small colour index across the packed 24-bit RGB range
const COLOR_SPREAD: u32 = 65_535;

/// Map an escape result to a colour.
///
/// Escaped points use `(max_colors % n) * 65535` packed as `0xRRGGBB`,
/// keeping only the low 24 bits. Deliberately not a gradient. Bounded
/// points get [`IN_SET_COLOR`].
pub fn color_for(result: IterationResult, max_colors: u32) -> Color {
    match result {
        IterationResult::Bounded => IN_SET_COLOR,
        IterationResult::Escaped(n) => {
            let index = max_colors % n.max(1);
            Color::from_packed_rgb(index.wrapping_mul(COLOR_SPREAD))
        }
    }
}
