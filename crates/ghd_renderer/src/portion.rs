//! Row-range portions for rendering an image across several calls.
//!
//! A render is split into horizontal bands. Band `k` of a render with
//! fraction `f` covers rows `[k * floor(h * f), (k + 1) * floor(h * f))`,
//! and the final band always extends to the last row so rounding never
//! leaves a gap.

use std::ops::Range;

/// Rows covered by one portion.
///
/// The result is clamped to `[0, height)`; a portion past the end of the
/// image is empty.
pub fn row_range(height: u32, fraction: f64, portion_id: u32, is_final: bool) -> Range<u32> {
    let rows_per_portion = (f64::from(height) * fraction).floor().max(0.0) as u32;

    let start = portion_id.saturating_mul(rows_per_portion).min(height);
    let end = if is_final {
        height
    } else {
        portion_id
            .saturating_add(1)
            .saturating_mul(rows_per_portion)
            .min(height)
    };

    start..end.max(start)
}

/// Every row range for an image split into `portions` equal bands.
pub fn portion_ranges(height: u32, portions: u32) -> Vec<Range<u32>> {
    let portions = portions.max(1);
    let fraction = 1.0 / f64::from(portions);

    (0..portions)
        .map(|id| row_range(height, fraction, id, id + 1 == portions))
        .collect()
}

/// Arguments for one `partial_render` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portion {
    /// Fraction of the image height per portion
    pub fraction: f64,
    /// Index of this portion, starting at 0
    pub id: u32,
    /// Whether this portion absorbs the remaining rows
    pub is_final: bool,
}

/// Frame-loop bookkeeping for a render spread over several frames.
///
/// The renderer keeps no progress state of its own; a host calls
/// [`RenderSchedule::next_portion`] once per frame while
/// [`RenderSchedule::is_rendering`] holds and feeds the result to
/// `Renderer::partial_render`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSchedule {
    portions: u32,
    next_portion: u32,
    rendering: bool,
}

impl RenderSchedule {
    pub fn new(portions: u32) -> Self {
        Self {
            portions: portions.max(1),
            next_portion: 0,
            rendering: false,
        }
    }

    /// Begin a new render from the first portion.
    pub fn start(&mut self) {
        self.next_portion = 0;
        self.rendering = true;
    }

    /// Abandon the current render.
    pub fn cancel(&mut self) {
        self.next_portion = 0;
        self.rendering = false;
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn portions(&self) -> u32 {
        self.portions
    }

    /// Change the number of portions. Ignored while a render is running.
    pub fn set_portions(&mut self, portions: u32) {
        if !self.rendering {
            self.portions = portions.max(1);
        }
    }

    /// The portion the next call will return.
    pub fn current(&self) -> u32 {
        self.next_portion
    }

    /// Status text such as `"Portion: 2 / 3"`.
    pub fn progress(&self) -> String {
        format!("Portion: {} / {}", self.next_portion + 1, self.portions)
    }

    /// Next portion to render, or `None` when idle.
    ///
    /// Handing out the final portion ends the render and rewinds to 0.
    pub fn next_portion(&mut self) -> Option<Portion> {
        if !self.rendering {
            return None;
        }

        let fraction = 1.0 / f64::from(self.portions);
        let id = self.next_portion;

        if id + 1 < self.portions {
            self.next_portion += 1;
            Some(Portion {
                fraction,
                id,
                is_final: false,
            })
        } else {
            self.next_portion = 0;
            self.rendering = false;
            Some(Portion {
                fraction,
                id,
                is_final: true,
            })
        }
    }
}

impl Default for RenderSchedule {
    fn default() -> Self {
        Self::new(3)
    }
}
