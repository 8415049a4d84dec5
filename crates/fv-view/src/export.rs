//! Binary PPM export of textures.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fv_core::Result;

use crate::texture::FieldTexture;

/// Encode as binary PPM (P6), top row first. NaN texels are black.
pub fn encode_ppm(texture: &FieldTexture) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", texture.width(), texture.height());
    let mut bytes = header.into_bytes();
    bytes.extend(texture.to_rgb8());
    bytes
}

pub fn write_ppm(path: &Path, texture: &FieldTexture) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&encode_ppm(texture))?;
    file.flush()?;
    Ok(())
}
