//! Linear mappings from data space into pixel space.
//!
//! Every constructor guards its degenerate input so `map` never divides by zero.

use chrono::{DateTime, TimeDelta, Utc};

/// Maps `[domain_min, domain_max]` onto `[range_start, range_end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_span: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let span = domain.1 - domain.0;
        let domain_span = if span.is_finite() && span > 0.0 { span } else { 1.0 };
        Self {
            domain_min: domain.0,
            domain_span,
            range_start: range.0,
            range_end: range.1,
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / self.domain_span;
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Like `map` but keeps the result inside the range.
    pub fn map_clamped(&self, value: f64) -> f64 {
        let t = ((value - self.domain_min) / self.domain_span).clamp(0.0, 1.0);
        self.range_start + t * (self.range_end - self.range_start)
    }
}

/// Horizontal time scale. When every timestamp is equal all points land on the left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    scale: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, left: f64, right: f64) -> Self {
        let span = (end - start).num_milliseconds() as f64;
        Self {
            start,
            end,
            scale: LinearScale::new((0.0, span), (left, right)),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn map(&self, time: &DateTime<Utc>) -> f64 {
        self.scale
            .map_clamped((*time - self.start).num_milliseconds() as f64)
    }

    /// `count` evenly spaced instants from start to end, a single one for a zero range.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        if self.is_degenerate() || count <= 1 {
            return vec![self.start];
        }
        let span = (self.end - self.start).num_milliseconds();
        let steps = (count - 1) as i64;
        (0..=steps)
            .map(|step| self.start + TimeDelta::milliseconds(span * step / steps))
            .collect()
    }
}

/// Most intervals a value axis is split into before its step widens tenfold.
pub const MAX_TICK_INTERVALS: i64 = 10;

/// Value axis that runs from zero to the next multiple of `step` at or above the total.
///
/// `step` starts at the requested step and grows by powers of ten until the axis has at
/// most [`MAX_TICK_INTERVALS`] intervals, so `max` is always a multiple of `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueAxis {
    pub step: i64,
    pub max: i64,
}

impl ValueAxis {
    pub fn new(total: i64, step: i64) -> Self {
        let mut step = step.max(1);
        loop {
            let max = if total <= 0 {
                Some(step)
            } else {
                ((total - 1) / step + 1).checked_mul(step)
            };
            match max {
                Some(max) if max / step <= MAX_TICK_INTERVALS => return Self { step, max },
                _ => match step.checked_mul(10) {
                    Some(wider) => step = wider,
                    // Past the last power of ten a single interval spans the whole range.
                    None => {
                        return Self {
                            step: i64::MAX,
                            max: i64::MAX,
                        }
                    }
                },
            }
        }
    }

    pub fn ticks(&self) -> impl Iterator<Item = i64> + '_ {
        (0..=self.max / self.step).map(move |tick| tick * self.step)
    }
}
