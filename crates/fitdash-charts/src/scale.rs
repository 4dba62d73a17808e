//! Projections from domain values to output coordinates.
//!
//! Every scale is an immutable value built once per chart per render. An
//! empty domain or a zero-width range never panics: positions collapse to
//! the origin of the range.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

/// Visual channel a scale feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Color,
    Angle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Domain {
    Categories { values: Vec<String> },
    Interval { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum MappingLaw {
    Band { range: (f64, f64), padding: f64, bandwidth: f64 },
    Point { range: (f64, f64) },
    Linear { range: (f64, f64) },
    Angular { start_angle: f64, end_angle: f64 },
    Ordinal { palette: Vec<String> },
}

/// Backend-facing description of one projection: domain, range and law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub channel: Channel,
    pub domain: Domain,
    pub mapping: MappingLaw,
}

/// Continuous projection of `[d0, d1]` onto `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// `[0, max]` onto `range`. Negative or non-finite maxima become `0`.
    pub fn from_max(max: f64, range: (f64, f64)) -> Self {
        let max = if max.is_finite() && max > 0.0 { max } else { 0.0 };
        Self::new((0.0, max), range)
    }

    /// `[0, max * headroom]` so the largest value stays off the boundary.
    pub fn with_headroom(max: f64, headroom: f64, range: (f64, f64)) -> Self {
        Self::from_max(max * headroom, range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn project(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Extend the domain outwards to multiples of a 1/2/5 x 10^k step.
    pub fn nice(self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut lo, mut hi) = if reversed { (d1, d0) } else { (d0, d1) };

        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_step(lo, hi, count);
            if step == 0.0 || step == previous {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
            previous = step;
        }

        let domain = if reversed { (hi, lo) } else { (lo, hi) };
        Self { domain, ..self }
    }

    /// Round tick values inside the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        if !(lo.is_finite() && hi.is_finite()) {
            return Vec::new();
        }

        let step = tick_step(lo, hi, count);
        if step == 0.0 {
            return vec![lo];
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| snap_to_step(i as f64 * step, step)).collect()
    }

    pub fn spec(&self, channel: Channel) -> ScaleSpec {
        ScaleSpec {
            channel,
            domain: Domain::Interval { min: self.domain.0, max: self.domain.1 },
            mapping: MappingLaw::Linear { range: self.range },
        }
    }
}

/// Step between ticks: a power of ten times 1, 2, 5 or 10.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10_f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Decimal places needed to print multiples of `step` exactly.
pub fn step_precision(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

fn snap_to_step(value: f64, step: f64) -> f64 {
    let scale = 10_f64.powi(step_precision(step) as i32);
    (value * scale).round() / scale
}

/// Equal-width slots for a fixed list of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K> {
    domain: Vec<K>,
    range: (f64, f64),
    padding: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: PartialEq> BandScale<K> {
    /// Same padding inside and outside the slots.
    pub fn new(domain: Vec<K>, range: (f64, f64), padding: f64) -> Self {
        Self::with_padding(domain, range, padding, padding)
    }

    pub fn with_padding(
        domain: Vec<K>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let (r0, r1) = range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let n = domain.len() as f64;

        if domain.is_empty() {
            return Self { domain, range, padding: padding_inner, start: r0, step: 0.0, bandwidth: 0.0 };
        }

        let step = (hi - lo) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding_inner)) * 0.5;
        let bandwidth = step * (1.0 - padding_inner);

        Self { domain, range, padding: padding_inner, start, step, bandwidth }
    }

    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Start of the slot for `key`; keys outside the domain collapse to
    /// the range origin.
    pub fn position(&self, key: &K) -> f64 {
        let Some(index) = self.domain.iter().position(|k| k == key) else {
            return self.range.0;
        };
        let slot = if self.range.1 < self.range.0 { self.domain.len() - 1 - index } else { index };
        self.start + self.step * slot as f64
    }

    pub fn center(&self, key: &K) -> f64 {
        self.position(key) + self.bandwidth / 2.0
    }

    pub fn spec(&self, channel: Channel, label: impl Fn(&K) -> String) -> ScaleSpec {
        ScaleSpec {
            channel,
            domain: Domain::Categories { values: self.domain.iter().map(label).collect() },
            mapping: MappingLaw::Band {
                range: self.range,
                padding: self.padding,
                bandwidth: self.bandwidth,
            },
        }
    }
}

/// Evenly spaced coordinates for categories, with no slot width.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale<K> {
    inner: BandScale<K>,
}

impl<K: PartialEq> PointScale<K> {
    pub fn new(domain: Vec<K>, range: (f64, f64)) -> Self {
        Self { inner: BandScale::with_padding(domain, range, 1.0, 0.0) }
    }

    pub fn domain(&self) -> &[K] {
        self.inner.domain()
    }

    pub fn position(&self, key: &K) -> f64 {
        self.inner.position(key)
    }

    pub fn step(&self) -> f64 {
        self.inner.step()
    }

    pub fn spec(&self, channel: Channel, label: impl Fn(&K) -> String) -> ScaleSpec {
        ScaleSpec {
            channel,
            domain: Domain::Categories { values: self.inner.domain.iter().map(label).collect() },
            mapping: MappingLaw::Point { range: self.inner.range },
        }
    }
}

/// Categories mapped onto a repeating palette.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<K> {
    domain: Vec<K>,
    palette: Vec<String>,
}

impl<K: PartialEq> OrdinalScale<K> {
    pub fn new(domain: Vec<K>, palette: Vec<String>) -> Self {
        Self { domain, palette }
    }

    pub fn color(&self, key: &K) -> &str {
        if self.palette.is_empty() {
            return "black";
        }
        let index = self.domain.iter().position(|k| k == key).unwrap_or(0);
        &self.palette[index % self.palette.len()]
    }

    pub fn spec(&self, label: impl Fn(&K) -> String) -> ScaleSpec {
        ScaleSpec {
            channel: Channel::Color,
            domain: Domain::Categories { values: self.domain.iter().map(label).collect() },
            mapping: MappingLaw::Ordinal { palette: self.palette.clone() },
        }
    }
}

/// One wedge of a pie, angles in radians clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSlice {
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + (self.end_angle - self.start_angle) / 2.0
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Labels on the right half read left-to-right from their anchor.
    pub fn is_right_half(&self) -> bool {
        self.mid_angle() < PI
    }
}

/// Angular projection: proportional shares onto `[start_angle, end_angle]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    start_angle: f64,
    end_angle: f64,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self { start_angle: 0.0, end_angle: TAU }
    }
}

impl PieLayout {
    pub fn with_angles(start_angle: f64, end_angle: f64) -> Self {
        Self { start_angle, end_angle }
    }

    /// Consecutive slices in input order. Negative values count as zero; a
    /// zero total gives zero-width slices at the start angle.
    pub fn slices(&self, values: &[f64]) -> Vec<ArcSlice> {
        let clamp = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let total: f64 = values.iter().map(|v| clamp(*v)).sum();
        let k = if total > 0.0 { (self.end_angle - self.start_angle) / total } else { 0.0 };

        let mut angle = self.start_angle;
        values
            .iter()
            .map(|value| {
                let start_angle = angle;
                angle += clamp(*value) * k;
                ArcSlice { value: *value, start_angle, end_angle: angle }
            })
            .collect()
    }

    pub fn spec(&self, labels: Vec<String>) -> ScaleSpec {
        ScaleSpec {
            channel: Channel::Angle,
            domain: Domain::Categories { values: labels },
            mapping: MappingLaw::Angular {
                start_angle: self.start_angle,
                end_angle: self.end_angle,
            },
        }
    }
}

/// Offset from the pie centre of a point at `radius` along `angle`.
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Centre of the annular sector between `inner` and `outer` radii.
pub fn arc_centroid(slice: &ArcSlice, inner: f64, outer: f64) -> (f64, f64) {
    let r = (inner + outer) / 2.0;
    let a = slice.mid_angle() - FRAC_PI_2;
    (r * a.cos(), r * a.sin())
}
