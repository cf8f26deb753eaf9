//! Small helpers around rendered images.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageResult, RgbImage};

pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(image, width, height, FilterType::Triangle)
}

pub fn encode_png(image: &RgbImage) -> ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub fn write_png(image: &RgbImage, path: impl AsRef<Path>) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Png)
}
