//! Post-processing of glyph rasters: trimming to the visible ink and
//! centering on a square canvas.

use image::imageops;
use image::{DynamicImage, Rgb, RgbImage};

use crate::{CropRect, Error};

/// Factor the doubled background difference is divided by.
pub const DIFF_SCALE: f32 = 2.0;
/// Bias added to the scaled difference. Channel differences up to 100 vanish,
/// which keeps faint anti-aliasing noise out of the bounding box.
pub const DIFF_OFFSET: f32 = -100.0;

const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

fn amplify(diff: u8) -> u8 {
    let sum = u32::from(diff) * 2;
    (sum as f32 / DIFF_SCALE + DIFF_OFFSET).clamp(0.0, 255.0) as u8
}

/// Smallest rectangle holding every pixel that differs noticeably from the
/// top-left pixel, or `None` if the image is all background.
#[must_use]
pub fn content_bounds(img: &RgbImage) -> Option<CropRect> {
    if img.width() == 0 || img.height() == 0 {
        return None;
    }
    let background = *img.get_pixel(0, 0);

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.enumerate_pixels() {
        let visible = pixel
            .0
            .iter()
            .zip(background.0.iter())
            .any(|(&c, &bg)| amplify(c.abs_diff(bg)) != 0);
        if !visible {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    bounds.map(|(x0, y0, x1, y1)| CropRect {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}

/// Side length of the output canvas: `size`, or the larger content dimension when `size` is 0.
#[must_use]
pub fn canvas_side(size: u32, width: u32, height: u32) -> u32 {
    if size == 0 {
        width.max(height)
    } else {
        size
    }
}

/// Offset that centers `len` pixels on `side`, rounded toward zero. Odd
/// leftovers put the extra pixel after the content.
#[must_use]
pub fn centered_offset(side: u32, len: u32) -> i64 {
    (i64::from(side) - i64::from(len)) / 2
}

/// A finished glyph image and how it was laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    /// The square output image.
    pub image: RgbImage,
    /// Part of the raster that was kept, if it was cropped.
    pub crop: Option<CropRect>,
    /// Canvas side length.
    pub side: u32,
    /// Column the content starts at.
    pub offset_x: i64,
    /// Row the content starts at.
    pub offset_y: i64,
}

/// Converts `raster` to RGB, optionally crops it to [`content_bounds`], and
/// pastes it centered on a white square canvas.
///
/// # Errors
///
/// [`Error::EmptyGlyph`] when cropping is requested and the raster holds no
/// visible pixels; `label` names the glyph in the message.
pub fn normalize(raster: &DynamicImage, size: u32, crop: bool, label: &str) -> Result<Normalized, Error> {
    let mut img = raster.to_rgb8();

    let mut crop_rect = None;
    if crop {
        let bounds = content_bounds(&img).ok_or_else(|| Error::EmptyGlyph(label.to_owned()))?;
        img = imageops::crop_imm(&img, bounds.x, bounds.y, bounds.width, bounds.height).to_image();
        crop_rect = Some(bounds);
    }

    let (w, h) = img.dimensions();
    let side = canvas_side(size, w, h);
    if w > side || h > side {
        log::warn!("{label}: content {w}x{h} does not fit the {side}x{side} canvas and will be clipped");
    }

    let offset_x = centered_offset(side, w);
    let offset_y = centered_offset(side, h);
    let mut canvas = RgbImage::from_pixel(side, side, BACKGROUND);
    imageops::replace(&mut canvas, &img, offset_x, offset_y);

    Ok(Normalized {
        image: canvas,
        crop: crop_rect,
        side,
        offset_x,
        offset_y,
    })
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use pretty_assertions::assert_eq;

    use super::*;

    const INK: Rgb<u8> = Rgb([0, 0, 0]);

    /// White image with a black block at (`x`, `y`) of `w`×`h`.
    fn block(width: u32, height: u32, x: u32, y: u32, w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |px, py| {
            if (x..x + w).contains(&px) && (y..y + h).contains(&py) {
                INK
            } else {
                BACKGROUND
            }
        })
    }

    #[test]
    fn amplified_difference() {
        assert_eq!(amplify(0), 0);
        assert_eq!(amplify(100), 0);
        assert_eq!(amplify(101), 1);
        assert_eq!(amplify(255), 155);
    }

    #[test]
    fn bounds_of_block() {
        let img = block(100, 80, 10, 20, 40, 30);
        assert_eq!(
            content_bounds(&img),
            Some(CropRect {
                x: 10,
                y: 20,
                width: 40,
                height: 30
            })
        );
    }

    #[test]
    fn faint_pixels_are_background() {
        let mut img = block(20, 20, 5, 5, 2, 2);
        img.put_pixel(0, 19, Rgb([0xFF, 0xFF - 100, 0xFF]));
        img.put_pixel(19, 0, Rgb([0x90, 0x90, 0x90]));
        assert_eq!(
            content_bounds(&img),
            Some(CropRect {
                x: 5,
                y: 0,
                width: 15,
                height: 7
            })
        );
    }

    #[test]
    fn background_is_the_corner_pixel() {
        let mut img = RgbImage::from_pixel(10, 10, INK);
        img.put_pixel(3, 4, BACKGROUND);
        assert_eq!(
            content_bounds(&img),
            Some(CropRect {
                x: 3,
                y: 4,
                width: 1,
                height: 1
            })
        );
    }

    #[test]
    fn blank_image_has_no_bounds() {
        assert_eq!(content_bounds(&RgbImage::from_pixel(16, 16, BACKGROUND)), None);
        assert_eq!(content_bounds(&RgbImage::new(0, 0)), None);
    }

    #[test]
    fn offsets() {
        assert_eq!(centered_offset(500, 300), 100);
        assert_eq!(centered_offset(500, 301), 99);
        assert_eq!(centered_offset(10, 13), -1);
        assert_eq!(canvas_side(0, 40, 30), 40);
        assert_eq!(canvas_side(0, 12, 31), 31);
        assert_eq!(canvas_side(500, 40, 30), 500);
    }

    #[test]
    fn auto_sized_canvas() {
        let raster = DynamicImage::ImageRgb8(block(100, 100, 7, 9, 40, 30));
        let out = normalize(&raster, 0, true, "x").unwrap();
        assert_eq!(out.side, 40);
        assert_eq!(out.image.dimensions(), (40, 40));
        assert_eq!((out.offset_x, out.offset_y), (0, 5));
        assert_eq!(*out.image.get_pixel(0, 4), BACKGROUND);
        assert_eq!(*out.image.get_pixel(0, 5), INK);
        assert_eq!(*out.image.get_pixel(39, 34), INK);
        assert_eq!(*out.image.get_pixel(39, 35), BACKGROUND);
    }

    #[test]
    fn fixed_canvas_contains_content() {
        let raster = DynamicImage::ImageRgb8(block(64, 64, 3, 3, 21, 10));
        let out = normalize(&raster, 50, true, "x").unwrap();
        assert_eq!(out.image.dimensions(), (50, 50));
        assert_eq!((out.offset_x, out.offset_y), (14, 20));
        assert_eq!(
            content_bounds(&out.image),
            Some(CropRect {
                x: 14,
                y: 20,
                width: 21,
                height: 10
            })
        );
    }

    #[test]
    fn grayscale_input_is_converted() {
        let mut gray = GrayImage::from_pixel(8, 8, Luma([0xFF]));
        gray.put_pixel(2, 3, Luma([0]));
        let out = normalize(&DynamicImage::ImageLuma8(gray), 0, true, "dot").unwrap();
        assert_eq!(out.side, 1);
        assert_eq!(*out.image.get_pixel(0, 0), INK);
    }

    #[test]
    fn uncropped_raster_keeps_its_margins() {
        let raster = DynamicImage::ImageRgb8(block(30, 20, 0, 0, 0, 0));
        let out = normalize(&raster, 0, false, "blank").unwrap();
        assert_eq!(out.crop, None);
        assert_eq!(out.side, 30);
        assert_eq!((out.offset_x, out.offset_y), (0, 5));
    }

    #[test]
    fn blank_raster_is_fatal_when_cropping() {
        let raster = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, BACKGROUND));
        assert!(matches!(
            normalize(&raster, 500, true, "space"),
            Err(Error::EmptyGlyph(label)) if label == "space"
        ));
    }

    #[test]
    fn oversized_content_is_clipped() {
        let raster = DynamicImage::ImageRgb8(block(12, 12, 0, 0, 12, 12));
        let out = normalize(&raster, 0, false, "x").unwrap();
        assert_eq!(out.side, 12);
        let out = normalize(&DynamicImage::ImageRgb8(out.image), 10, false, "x").unwrap();
        assert_eq!((out.offset_x, out.offset_y), (-1, -1));
        assert!(out.image.pixels().all(|p| *p == INK));
    }
}
