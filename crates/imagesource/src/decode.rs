use image::imageops::flip_vertical_in_place;

use crate::SourceError;

/// Tightly packed RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_rgba(bytes: &[u8], label: &str) -> Result<DecodedImage, SourceError> {
    let image = image::load_from_memory(bytes).map_err(|source| SourceError::Decode {
        label: label.to_string(),
        source,
    })?;
    let mut rgba = image.to_rgba8();
    flip_vertical_in_place(&mut rgba);
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_and_flips_rows() {
        let mut image = RgbaImage::new(2, 2);
        for x in 0..2 {
            image.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
            image.put_pixel(x, 1, Rgba([0, 0, 255, 255]));
        }
        let decoded = decode_rgba(&encode_png(&image), "test.png").expect("decode");
        assert_eq!((decoded.width, decoded.height), (2, 2));
        assert_eq!(decoded.pixels.len(), 16);
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&decoded.pixels[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn garbage_bytes_fail_with_label() {
        let err = decode_rgba(b"not an image", "broken.jpg").unwrap_err();
        assert!(err.to_string().contains("broken.jpg"));
    }
}
