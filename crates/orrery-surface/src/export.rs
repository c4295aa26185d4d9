//! PNG export for inspecting synthesized textures.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{SynthesisError, Texture};

/// Encode a texture as 8-bit RGBA PNG into `writer`.
pub fn encode_png<W: Write>(texture: &Texture, writer: W) -> Result<(), SynthesisError> {
    let mut encoder = png::Encoder::new(writer, texture.width(), texture.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(texture.as_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Write a texture to `path`, creating parent directories as needed.
pub fn write_png(texture: &Texture, path: &Path) -> Result<(), SynthesisError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    encode_png(texture, BufWriter::new(file))?;
    log::debug!("Wrote {}x{} texture to {}", texture.width(), texture.height(), path.display());
    Ok(())
}
