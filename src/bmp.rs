//! Uncompressed 24-bit BMP output.
//!
//! Layout: 14 byte file header, 40 byte info header, then the pixel rows
//! bottom to top, left to right, as blue-green-red triples, every row padded
//! with zeros to a multiple of four bytes. [`Image`] rows are already stored
//! bottom first, so they are written in order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::EngineError;
use crate::render::Image;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const PIXELS_PER_METER: i32 = 2835;

fn row_size(width: u32) -> u32 {
    (width * 3 + 3) / 4 * 4
}

/// Serializes `image` to `out`.
pub fn write_bmp<W: Write>(image: &Image, out: &mut W) -> std::io::Result<()> {
    let (width, height) = (image.width(), image.height());
    let row_size = row_size(width);
    let data_size = row_size * height;
    let offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

    // 0 - 2 bytes - "BM"
    out.write_all(b"BM")?;
    // 2 - 4 bytes - file size
    out.write_u32::<LittleEndian>(offset + data_size)?;
    // 6 - 4 bytes - reserved
    out.write_u32::<LittleEndian>(0)?;
    // 10 - 4 bytes - offset of the pixel array
    out.write_u32::<LittleEndian>(offset)?;

    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32)?;
    // planes, bits per pixel
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(24)?;
    // compression
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(data_size)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    // palette colours, important colours
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    let padding = vec![0u8; (row_size - width * 3) as usize];
    for row in image.pixels().chunks(width.max(1) as usize) {
        for pixel in row {
            out.write_all(&[pixel.b, pixel.g, pixel.r])?;
        }
        out.write_all(&padding)?;
    }
    Ok(())
}

/// BMP bytes of `image`.
pub fn encode_bmp(image: &Image) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(
        (FILE_HEADER_SIZE + INFO_HEADER_SIZE + row_size(image.width()) * image.height()) as usize,
    );
    write_bmp(image, &mut bytes)?;
    Ok(bytes)
}

/// Writes `image` to a BMP file at `path`.
pub fn save_bmp<P: AsRef<Path>>(image: &Image, path: P) -> Result<(), EngineError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_bmp(image, &mut out)?;
    out.flush()?;
    Ok(())
}
