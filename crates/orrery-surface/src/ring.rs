//! One-pixel-tall radial gradients for planetary rings.
//!
//! The renderer maps texture `u` from the inner to the outer ring radius.

use orrery_bodies::{RingDescriptor, Rgb};

use crate::{SynthesisError, Texture, bitmap::channel};

/// A color and alpha at a position `t` in `[0, 1]` across the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub t: f64,
    pub color: Rgb,
    pub alpha: f64,
}

impl GradientStop {
    pub fn new(t: f64, color: Rgb, alpha: f64) -> Self {
        Self {
            t: t.clamp(0.0, 1.0),
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// Fractional bands darkened by [`RingGradient::with_gaps`]. The wide one
/// sits where a Cassini-like division would.
pub const RING_GAPS: [(f64, f64); 2] = [(0.42, 0.47), (0.78, 0.80)];

/// Alpha multiplier inside a gap.
const GAP_ALPHA: f64 = 0.15;

/// Piecewise-linear gradient over sorted stops.
#[derive(Clone, Debug, PartialEq)]
pub struct RingGradient {
    stops: Vec<GradientStop>,
    gaps: Vec<(f64, f64)>,
}

impl RingGradient {
    /// # Errors
    ///
    /// [`SynthesisError::EmptyGradient`] when `stops` is empty.
    pub fn new(mut stops: Vec<GradientStop>) -> Result<Self, SynthesisError> {
        if stops.is_empty() {
            return Err(SynthesisError::EmptyGradient);
        }
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Ok(Self {
            stops,
            gaps: Vec::new(),
        })
    }

    /// Transparent edges fading to a translucent peak of `color` mid-ring.
    pub fn fade(color: Rgb) -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, color, 0.0),
                GradientStop::new(0.5, color, 0.8),
                GradientStop::new(1.0, color, 0.0),
            ],
            gaps: Vec::new(),
        }
    }

    /// Fade stops in the ring's tint, or white when it has none, plus gaps
    /// when the descriptor asks for them.
    pub fn for_ring(ring: &RingDescriptor) -> Self {
        let gradient = Self::fade(ring.color.unwrap_or(Rgb::WHITE));
        if ring.has_gaps {
            gradient.with_gaps(&RING_GAPS)
        } else {
            gradient
        }
    }

    pub fn with_gaps(mut self, gaps: &[(f64, f64)]) -> Self {
        self.gaps.extend_from_slice(gaps);
        self
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Interpolated RGBA at `t`, clamped to the outermost stops. NaN reads
    /// the first stop.
    pub fn sample(&self, t: f64) -> [u8; 4] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (first, last) = (self.stops[0], self.stops[self.stops.len() - 1]);
        let (color, mut alpha) = if t <= first.t {
            (first.color.to_f64(), first.alpha)
        } else if t >= last.t {
            (last.color.to_f64(), last.alpha)
        } else {
            let i = self.stops.partition_point(|s| s.t <= t);
            let (a, b) = (self.stops[i - 1], self.stops[i]);
            let span = b.t - a.t;
            let f = if span > 0.0 { (t - a.t) / span } else { 0.0 };
            let (ca, cb) = (a.color.to_f64(), b.color.to_f64());
            (
                [
                    lerp(ca[0], cb[0], f),
                    lerp(ca[1], cb[1], f),
                    lerp(ca[2], cb[2], f),
                ],
                lerp(a.alpha, b.alpha, f),
            )
        };

        if self.gaps.iter().any(|&(lo, hi)| t >= lo && t <= hi) {
            alpha *= GAP_ALPHA;
        }
        [
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
            channel(alpha * 255.0),
        ]
    }

    /// Rasterize into a `width` x 1 bitmap, pixel centers sampled.
    pub fn rasterize(&self, width: u32) -> Result<Texture, SynthesisError> {
        Texture::from_fn(width, 1, |x, _| {
            self.sample((x as f64 + 0.5) / width as f64)
        })
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturn_ring(has_gaps: bool) -> RingDescriptor {
        RingDescriptor {
            inner_radius: 10.0,
            outer_radius: 18.0,
            color: None,
            tilt: [0.0; 3],
            has_gaps,
        }
    }

    #[test]
    fn test_empty_gradient_rejected() {
        assert!(matches!(
            RingGradient::new(Vec::new()),
            Err(SynthesisError::EmptyGradient)
        ));
    }

    #[test]
    fn test_fade_is_transparent_at_edges() {
        let gradient = RingGradient::fade(Rgb::WHITE);
        assert_eq!(gradient.sample(0.0)[3], 0);
        assert_eq!(gradient.sample(1.0)[3], 0);
        assert_eq!(gradient.sample(0.5), [255, 255, 255, 204]);
    }

    #[test]
    fn test_non_finite_positions_clamp() {
        let gradient = RingGradient::fade(Rgb::WHITE);
        assert_eq!(gradient.sample(f64::NAN), gradient.sample(0.0));
        assert_eq!(gradient.sample(f64::INFINITY), gradient.sample(1.0));
        assert_eq!(gradient.sample(f64::NEG_INFINITY), gradient.sample(0.0));
    }

    #[test]
    fn test_stops_sorted_on_construction() {
        let gradient = RingGradient::new(vec![
            GradientStop::new(1.0, Rgb::BLACK, 1.0),
            GradientStop::new(0.0, Rgb::WHITE, 1.0),
        ])
        .unwrap();
        assert_eq!(gradient.stops()[0].color, Rgb::WHITE);
        assert_eq!(gradient.sample(0.5)[0], 128);
    }

    #[test]
    fn test_gaps_reduce_alpha() {
        let plain = RingGradient::for_ring(&saturn_ring(false));
        let gapped = RingGradient::for_ring(&saturn_ring(true));
        assert!(gapped.sample(0.45)[3] < plain.sample(0.45)[3]);
        assert_eq!(gapped.sample(0.6), plain.sample(0.6));
    }

    #[test]
    fn test_rasterize_is_one_pixel_tall() {
        let tex = RingGradient::for_ring(&saturn_ring(true)).rasterize(256).unwrap();
        assert_eq!(tex.dimensions(), (256, 1));
        assert!(tex.pixels().iter().all(|p| p[0] == 255));
    }

    #[test]
    fn test_tinted_ring_uses_color() {
        let mut ring = saturn_ring(false);
        ring.color = Some(Rgb::new(10, 20, 30));
        let [r, g, b, _] = RingGradient::for_ring(&ring).sample(0.3);
        assert_eq!((r, g, b), (10, 20, 30));
    }
}
