/// Record of one export run: the settings it ran with and every file it wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct GlyphManifest {
    /// Path of the font the glyphs were rendered from, as given on the command line.
    pub font: String,
    /// Pixel size the glyphs were rasterized at.
    pub resolution: u32,
    /// Configured canvas side length; 0 means every canvas was sized to its content.
    pub size: u32,
    /// One entry per written image, in export order.
    pub glyphs: Vec<ManifestEntry>,
}

/// A single exported glyph image.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct ManifestEntry {
    /// Resolved output label, the file stem of the image.
    pub label: String,
    /// File name of the image relative to the output directory.
    pub file: String,
    /// Index of the glyph inside the font.
    pub glyph_id: u16,
    /// The glyph's name in the font, if it has one.
    pub glyph_name: Option<String>,
    /// Lowest Unicode codepoint mapped to the glyph, if any.
    pub codepoint: Option<u32>,
    /// The range expression that selected this glyph, when selecting by codepoint.
    pub source: Option<String>,
    /// Region of the raw raster that was kept, if the raster was cropped.
    pub crop: Option<CropRect>,
    /// Side length of the square output image.
    pub side: u32,
    /// Horizontal position of the content on the canvas. Negative when the
    /// content is wider than a fixed canvas.
    pub offset_x: i64,
    /// Vertical position of the content on the canvas.
    pub offset_y: i64,
}

/// Axis-aligned pixel rectangle, with exclusive right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct CropRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl CropRect {
    /// Column just past the right edge.
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Row just past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

impl GlyphManifest {
    /// Looks up the entry written under `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ManifestEntry> {
        self.glyphs.iter().find(|entry| entry.label == label)
    }
}
