//! Font access: the glyph inventory and a rasterizer for single glyphs.

use std::collections::HashMap;
use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use rusttype::{point, Font, GlyphId, Scale, VMetrics};

use crate::Error;

/// Blank rows/columns kept around every raster, so the top-left pixel is
/// always background.
const MARGIN: i32 = 1;

/// What the exporter needs to know about a glyph before rendering it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphEntry {
    /// Index of the glyph inside the font.
    pub id: u16,
    /// PostScript name from the `post` or `CFF` table, if the font has one.
    pub name: Option<String>,
    /// Lowest Unicode codepoint mapped to the glyph.
    pub codepoint: Option<u32>,
    /// Whether the glyph has any contours to draw.
    pub has_outline: bool,
}

/// A collection of glyphs that can be rendered to images.
pub trait GlyphSource {
    /// All glyphs, in glyph id order.
    fn glyphs(&self) -> &[GlyphEntry];

    /// Renders `glyph` with an em size of `pixel_size` pixels, dark ink on a
    /// light background.
    ///
    /// # Errors
    ///
    /// Implementation specific; [`RasterFont`] never fails.
    fn rasterize(&self, glyph: &GlyphEntry, pixel_size: u32) -> Result<DynamicImage, Error>;
}

/// A TrueType/OpenType font, held in memory for the length of a run.
pub struct RasterFont {
    font: Font<'static>,
    glyphs: Vec<GlyphEntry>,
}

impl RasterFont {
    /// Reads and parses the font at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::FontParse`] if it is not a font.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(data)
    }

    /// Parses font data.
    ///
    /// # Errors
    ///
    /// [`Error::FontParse`] if `data` is not a font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let glyphs = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| Error::FontParse(e.to_string()))?;
            glyph_inventory(&face)
        };
        let font = Font::try_from_vec(data)
            .ok_or_else(|| Error::FontParse("unsupported font data".to_owned()))?;

        log::debug!("font has {} glyphs", glyphs.len());
        Ok(RasterFont { font, glyphs })
    }
}

fn glyph_inventory(face: &ttf_parser::Face) -> Vec<GlyphEntry> {
    let mut codepoints = HashMap::<u16, u32>::new();
    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|codepoint| {
                if let Some(gid) = subtable.glyph_index(codepoint) {
                    codepoints
                        .entry(gid.0)
                        .and_modify(|cp| *cp = (*cp).min(codepoint))
                        .or_insert(codepoint);
                }
            });
        }
    }

    (0..face.number_of_glyphs())
        .map(|id| {
            let gid = ttf_parser::GlyphId(id);
            GlyphEntry {
                id,
                name: face.glyph_name(gid).map(str::to_owned),
                codepoint: codepoints.get(&id).copied(),
                has_outline: face.glyph_bounding_box(gid).is_some(),
            }
        })
        .collect()
}

impl GlyphSource for RasterFont {
    fn glyphs(&self) -> &[GlyphEntry] {
        &self.glyphs
    }

    fn rasterize(&self, glyph: &GlyphEntry, pixel_size: u32) -> Result<DynamicImage, Error> {
        let scale = Scale::uniform(pixel_size as f32);
        let VMetrics {
            ascent, descent, ..
        } = self.font.v_metrics(scale);

        let scaled = self.font.glyph(GlyphId(glyph.id)).scaled(scale);
        let advance_width = scaled.h_metrics().advance_width;
        let positioned = scaled.positioned(point(0.0, 0.0));

        // em box relative to the pen position on the baseline, y pointing down
        let mut min_x = 0;
        let mut min_y = -(ascent.ceil() as i32);
        let mut max_x = advance_width.ceil() as i32;
        let mut max_y = (-descent).ceil() as i32;

        let bounding_box = positioned.pixel_bounding_box();
        if let Some(bb) = bounding_box {
            min_x = min_x.min(bb.min.x);
            min_y = min_y.min(bb.min.y);
            max_x = max_x.max(bb.max.x);
            max_y = max_y.max(bb.max.y);
        }
        min_x -= MARGIN;
        min_y -= MARGIN;
        max_x += MARGIN;
        max_y += MARGIN;

        let width = (max_x - min_x) as u32;
        let height = (max_y - min_y) as u32;
        let mut outbuf = GrayImage::from_pixel(width, height, Luma([0xFF]));

        if let Some(bb) = bounding_box {
            positioned.draw(|x, y, v| {
                let x = (bb.min.x - min_x) as u32 + x;
                let y = (bb.min.y - min_y) as u32 + y;
                let ink = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                *outbuf.get_pixel_mut(x, y) = Luma([0xFF - ink]);
            });
        }

        Ok(DynamicImage::ImageLuma8(outbuf))
    }
}
