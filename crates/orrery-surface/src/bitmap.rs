//! An owned RGBA bitmap stored as row-major pixels.

use crate::SynthesisError;

/// Immutable-after-synthesis RGBA bitmap handed to the renderer as a material map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// Fill a `width` x `height` bitmap by evaluating `shade` at every pixel,
    /// row by row.
    ///
    /// # Errors
    ///
    /// [`SynthesisError::ZeroResolution`] for an empty extent and
    /// [`SynthesisError::Allocation`] when the pixel storage cannot be reserved.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut shade: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, SynthesisError> {
        if width == 0 || height == 0 {
            return Err(SynthesisError::ZeroResolution);
        }
        let count = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| SynthesisError::Allocation { bytes: count * 4 })?;

        for y in 0..height {
            for x in 0..width {
                pixels.push(shade(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Raw bytes in RGBA8 order, ready for upload or encoding.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of distinct RGB triples, ignoring alpha.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = std::collections::HashSet::new();
        for [r, g, b, _] in &self.pixels {
            colors.insert((*r, *g, *b));
        }
        colors.len()
    }

    /// True if every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 255)
    }
}

/// Round and clamp a shading result into a channel. Out-of-range values
/// saturate rather than wrap.
pub(crate) fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn rgba(r: f64, g: f64, b: f64) -> [u8; 4] {
    [channel(r), channel(g), channel(b), 255]
}
