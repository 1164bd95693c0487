//! Escape-time sampling of the Mandelbrot set over a regular lattice.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::CancelToken;
use crate::math::Complex;

pub const MAX_ITERATIONS_DEFAULT: u32 = 10_000;

/// Squared escape radius, |z| ≥ 2
const ESCAPE_NORM_SQR: f64 = 4.0;

/// Most samples along one axis. Finer steps are coarsened to this.
pub const MAX_AXIS_SAMPLES: usize = 65_536;

/// Outcome of iterating one point
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IterationResult {
    /// |z_n| reached 2 after `n` steps, `1 <= n < max_iterations`
    Escaped(u32),
    /// Still bounded at the iteration cap; treated as inside the set
    Bounded,
}

impl IterationResult {
    pub fn is_bounded(self) -> bool {
        matches!(self, IterationResult::Bounded)
    }
}

/// One lattice point and its classification
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexSample {
    pub c: Complex,
    pub result: IterationResult,
}

/// Iterate z ← z² + c from z₀ = 0.
///
/// Reaching the cap counts as bounded even if that last step escaped.
#[inline]
pub fn escape_time(c: Complex, max_iterations: u32) -> IterationResult {
    let mut z = Complex::new(0.0, 0.0);
    let mut n = 0;
    while z.norm_sqr() < ESCAPE_NORM_SQR && n < max_iterations {
        z = z * z + c;
        n += 1;
    }

    if n >= max_iterations {
        IterationResult::Bounded
    } else {
        IterationResult::Escaped(n)
    }
}

/// Rectangular region of the complex plane sampled every `step` units.
///
/// Sample order is the real axis outer, imaginary axis inner; one fixed
/// real value and all of its imaginary samples form a *strip*.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    pub step: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            re_min: -2.0,
            re_max: 2.0,
            im_min: -2.0,
            im_max: 2.0,
            step: 0.001,
        }
    }
}

fn axis_len(min: f64, max: f64, step: f64) -> usize {
    // Tolerance so that e.g. 4.0 / 0.001 still lands on the end point
    let intervals = ((max - min) / step + 1e-9).floor();
    if intervals >= 0.0 && intervals < MAX_AXIS_SAMPLES as f64 {
        intervals as usize + 1
    } else if intervals < 0.0 {
        1
    } else {
        MAX_AXIS_SAMPLES
    }
}

impl Grid {
    pub fn new(re_min: f64, re_max: f64, im_min: f64, im_max: f64, step: f64) -> Self {
        Self { re_min, re_max, im_min, im_max, step }
    }

    /// Repair unusable values: bad step → default step, inverted or
    /// non-finite ranges → swapped or default. A step too fine for
    /// [`MAX_AXIS_SAMPLES`] is raised until both axes fit.
    pub fn sanitized(self) -> Self {
        let default = Grid::default();
        let mut grid = self;

        if !(grid.step.is_finite() && grid.step > 0.0) {
            warn!("Grid step {} is not positive, using {}", grid.step, default.step);
            grid.step = default.step;
        }
        if !(grid.re_min.is_finite() && grid.re_max.is_finite()) {
            warn!("Real range is not finite, using default");
            grid.re_min = default.re_min;
            grid.re_max = default.re_max;
        }
        if !(grid.im_min.is_finite() && grid.im_max.is_finite()) {
            warn!("Imaginary range is not finite, using default");
            grid.im_min = default.im_min;
            grid.im_max = default.im_max;
        }
        if grid.re_min > grid.re_max {
            std::mem::swap(&mut grid.re_min, &mut grid.re_max);
        }
        if grid.im_min > grid.im_max {
            std::mem::swap(&mut grid.im_min, &mut grid.im_max);
        }
        if !(grid.re_max - grid.re_min).is_finite() {
            warn!("Real range is too wide, using default");
            grid.re_min = default.re_min;
            grid.re_max = default.re_max;
        }
        if !(grid.im_max - grid.im_min).is_finite() {
            warn!("Imaginary range is too wide, using default");
            grid.im_min = default.im_min;
            grid.im_max = default.im_max;
        }

        let span = (grid.re_max - grid.re_min).max(grid.im_max - grid.im_min);
        let min_step = span / (MAX_AXIS_SAMPLES - 1) as f64;
        if grid.step < min_step {
            warn!(
                "Grid step {} exceeds {} samples per axis, using {}",
                grid.step, MAX_AXIS_SAMPLES, min_step
            );
            grid.step = min_step;
        }
        grid
    }

    /// Samples along the real axis (number of strips)
    pub fn strips(&self) -> usize {
        axis_len(self.re_min, self.re_max, self.step)
    }

    /// Samples along the imaginary axis (length of each strip)
    pub fn strip_len(&self) -> usize {
        axis_len(self.im_min, self.im_max, self.step)
    }

    /// Total lattice points, saturating at `usize::MAX`
    pub fn sample_count(&self) -> usize {
        self.strips().saturating_mul(self.strip_len())
    }

    #[inline]
    pub fn re_at(&self, i: usize) -> f64 {
        self.re_min + i as f64 * self.step
    }

    #[inline]
    pub fn im_at(&self, j: usize) -> f64 {
        self.im_min + j as f64 * self.step
    }

    pub fn point(&self, i: usize, j: usize) -> Complex {
        Complex::new(self.re_at(i), self.im_at(j))
    }

    /// Lazy sequential walk over every lattice point. Calling again
    /// restarts from the first sample.
    pub fn samples(&self, max_iterations: u32) -> Samples {
        Samples {
            grid: *self,
            max_iterations,
            strips: self.strips(),
            strip_len: self.strip_len(),
            i: 0,
            j: 0,
        }
    }

    /// Classify every point of strip `i`
    pub fn sample_strip(&self, i: usize, max_iterations: u32) -> Vec<IterationResult> {
        let re = self.re_at(i);
        (0..self.strip_len())
            .map(|j| escape_time(Complex::new(re, self.im_at(j)), max_iterations))
            .collect()
    }

    /// Sample the grid in parallel, handing finished strips to `on_strip`
    /// in sequential order.
    ///
    /// Strips are computed `band` at a time on the rayon pool. The token is
    /// checked before each strip; a band touched by cancellation is thrown
    /// away whole, so `on_strip` only ever sees complete strips. Returns
    /// `false` if cancelled.
    pub fn sample_par<F>(&self, max_iterations: u32, band: usize, cancel: &CancelToken, mut on_strip: F) -> bool
    where
        F: FnMut(usize, &[IterationResult]),
    {
        let strips = self.strips();
        let band = band.max(1);
        debug!(
            "Sampling {} strips of {} in bands of {}, cap {}",
            strips,
            self.strip_len(),
            band,
            max_iterations
        );

        for start in (0..strips).step_by(band) {
            let end = (start + band).min(strips);
            let results: Option<Vec<Vec<IterationResult>>> = (start..end)
                .into_par_iter()
                .map(|i| {
                    if cancel.is_cancelled() {
                        None
                    } else {
                        Some(self.sample_strip(i, max_iterations))
                    }
                })
                .collect();

            let Some(results) = results else {
                return false;
            };
            for (offset, strip) in results.iter().enumerate() {
                on_strip(start + offset, strip);
            }
        }
        true
    }
}

/// Iterator returned by [`Grid::samples`]
#[derive(Clone, Debug)]
pub struct Samples {
    grid: Grid,
    max_iterations: u32,
    strips: usize,
    strip_len: usize,
    i: usize,
    j: usize,
}

impl Iterator for Samples {
    type Item = ComplexSample;

    fn next(&mut self) -> Option<ComplexSample> {
        if self.i >= self.strips || self.strip_len == 0 {
            return None;
        }

        let c = self.grid.point(self.i, self.j);
        self.j += 1;
        if self.j == self.strip_len {
            self.j = 0;
            self.i += 1;
        }

        Some(ComplexSample {
            c,
            result: escape_time(c, self.max_iterations),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.i >= self.strips {
            0
        } else {
            (self.strips - self.i).saturating_mul(self.strip_len) - self.j
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples {}
