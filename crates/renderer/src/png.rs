//! PNG encoding for RGBA tile rasters.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the tile has ≤256 unique colors.
//!   Colormapped weather tiles almost always qualify.
//! - **RGBA PNG (color type 6)**: fallback for tiles with >256 colors.
//!
//! [`read_png_dimensions`] goes the other way and pulls width/height out of
//! the IHDR chunk of an already-encoded image, which is all the pyramid
//! generator needs to validate backends that hand back encoded PNGs.

use crate::RenderError;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

type Palette = Vec<(u8, u8, u8, u8)>;

/// Encode RGBA pixels, choosing indexed or RGBA PNG automatically.
pub fn create_png_auto(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    check_buffer(pixels, width, height)?;
    let num_pixels = pixels.len() / 4;

    let palette_result = if num_pixels >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), RenderError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    (
        packed as u8,
        (packed >> 8) as u8,
        (packed >> 16) as u8,
        (packed >> 24) as u8,
    )
}

fn extract_palette_sequential(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger tiles.
///
/// Unique colors are collected per chunk, merged, and only then are pixels
/// mapped to palette indices. Palette order therefore depends on chunking,
/// which is fine since the index mapping is built from the same palette.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let chunk_size = (pixels.len() / 4 / rayon::current_num_threads()).max(256) * 4;

    let unique_colors: Vec<u32> = pixels
        .par_chunks(chunk_size)
        .flat_map(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for pixel in chunk.chunks_exact(4) {
                local.insert(pack_color(pixel[0], pixel[1], pixel[2], pixel[3]), ());
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut global: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for packed in unique_colors {
        if !global.contains_key(&packed) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            global.insert(packed, palette.len() as u8);
            palette.push(unpack_color(packed));
        }
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|p| {
            global
                .get(&pack_color(p[0], p[1], p[2], p[3]))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: u32,
    height: u32,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> Result<Vec<u8>, RenderError> {
    if indices.len() != width as usize * height as usize {
        return Err(RenderError::BufferSize {
            expected: width as usize * height as usize,
            actual: indices.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only if some palette entry is not opaque
    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an RGBA PNG (color type 6).
pub fn create_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    check_buffer(pixels, width, height)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat = deflate_scanlines(pixels, width as usize * 4, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each row with filter byte 0 (none) and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    if row_bytes == 0 || height == 0 {
        return Err(RenderError::Encode("cannot encode an empty image".to_string()));
    }

    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| RenderError::Encode(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| RenderError::Encode(format!("IDAT compression failed: {}", e)))
}

/// Read `(width, height)` from the IHDR chunk of an encoded PNG.
pub fn read_png_dimensions(data: &[u8]) -> Result<(u32, u32), RenderError> {
    if data.len() < 24 || data[..8] != PNG_SIGNATURE {
        return Err(RenderError::InvalidPng("missing PNG signature".to_string()));
    }
    if &data[12..16] != b"IHDR" {
        return Err(RenderError::InvalidPng("first chunk is not IHDR".to_string()));
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        let pixels = [
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red again
        ];

        let (palette, indices) = extract_palette_sequential(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0], indices[3]);
    }

    #[test]
    fn test_extract_palette_parallel_matches_pixels() {
        // 128x128 is above PARALLEL_THRESHOLD
        let mut pixels = Vec::with_capacity(128 * 128 * 4);
        for y in 0..128u32 {
            for x in 0..128u32 {
                let band = ((x / 8 + y / 8) % 50) as u8;
                pixels.extend_from_slice(&[band * 5, 100 + band * 3, 200 - band * 2, 255]);
            }
        }

        let (palette, indices) = extract_palette_parallel(&pixels).unwrap();
        assert!(palette.len() <= 50);
        assert_eq!(indices.len(), 128 * 128);

        for (pixel, &idx) in pixels.chunks_exact(4).zip(&indices) {
            let (r, g, b, a) = palette[idx as usize];
            assert_eq!(pixel, &[r, g, b, a]);
        }
    }

    #[test]
    fn test_too_many_colors_falls_back_to_rgba() {
        let mut pixels = Vec::with_capacity(300 * 4);
        for i in 0..300u32 {
            pixels.extend_from_slice(&[(i % 256) as u8, (i / 2 % 256) as u8, (i / 3 % 256) as u8, 255]);
        }
        assert!(extract_palette_sequential(&pixels).is_none());

        let png = create_png_auto(&pixels, 300, 1).unwrap();
        // color type byte of IHDR
        assert_eq!(png[25], 6);
    }

    #[test]
    fn test_indexed_png_has_transparency_chunk() {
        let pixels = [255, 0, 0, 255, 0, 0, 0, 0];
        let png = create_png_auto(&pixels, 2, 1).unwrap();
        assert_eq!(png[25], 3);
        assert!(png.windows(4).any(|w| w == b"tRNS"));
    }

    #[test]
    fn test_read_png_dimensions() {
        let pixels = vec![10u8; 7 * 3 * 4];
        let png = create_png(&pixels, 7, 3).unwrap();
        assert_eq!(read_png_dimensions(&png).unwrap(), (7, 3));
    }

    #[test]
    fn test_read_png_dimensions_rejects_garbage() {
        assert!(matches!(
            read_png_dimensions(b"definitely not a png file"),
            Err(RenderError::InvalidPng(_))
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = create_png(&[0u8; 12], 2, 2).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 16, actual: 12 }));
    }
}
