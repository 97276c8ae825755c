//! The export loop: select, rasterize, normalize and write each glyph in turn.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::canvas::normalize;
use crate::font::GlyphSource;
use crate::select::Selector;
use crate::{Error, ManifestEntry};

/// Settings for one export run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Directory the images are written to.
    pub out_dir: PathBuf,
    /// Em size, in pixels, glyphs are rasterized at.
    pub resolution: u32,
    /// Side length of the output images; 0 sizes each image to its content.
    pub size: u32,
    /// Trim each raster to its visible ink before placing it.
    pub crop: bool,
    /// Empty the output directory before writing.
    pub clean: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            out_dir: PathBuf::from("tmp"),
            resolution: 1000,
            size: 500,
            crop: true,
            clean: false,
        }
    }
}

/// Where the image for `label` goes.
#[must_use]
pub fn output_path(out_dir: &Path, label: &str) -> PathBuf {
    out_dir.join(format!("{label}.png"))
}

/// Creates `dir` if needed. With `clean`, also deletes everything inside it
/// except hidden entries.
///
/// # Errors
///
/// [`Error::Io`] if the directory cannot be created, listed or emptied.
pub fn prepare_out_dir(dir: &Path, clean: bool) -> Result<(), Error> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    if !clean {
        return Ok(());
    }

    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        let removed = if file_type.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removed.map_err(|e| Error::io(&path, e))?;
        log::debug!("removed {}", path.display());
    }
    Ok(())
}

/// Exports every glyph of `source` that `selector` picks, in glyph order.
///
/// Each image is written once, after post-processing. The first error ends
/// the run; images already written are left in place.
///
/// # Errors
///
/// Any error from selection, rasterization, post-processing or writing.
pub fn export_glyphs<S: GlyphSource + ?Sized>(
    source: &S,
    selector: &Selector,
    options: &ExportOptions,
) -> Result<Vec<ManifestEntry>, Error> {
    prepare_out_dir(&options.out_dir, options.clean)?;

    let mut written = Vec::new();
    let mut labels = HashSet::new();
    for glyph in source.glyphs() {
        let Some(selection) = selector.select(glyph)? else {
            continue;
        };

        let path = output_path(&options.out_dir, &selection.label);
        log::info!("exporting {}", path.display());
        if !labels.insert(selection.label.clone()) {
            log::warn!(
                "glyph {} resolves to {} as well, overwriting the earlier image",
                glyph.id,
                selection.label
            );
        }

        let raster = source.rasterize(glyph, options.resolution)?;
        let normalized = normalize(&raster, options.size, options.crop, &selection.label)?;
        normalized
            .image
            .save(&path)
            .map_err(|e| Error::Image {
                path: path.clone(),
                source: e,
            })?;

        written.push(ManifestEntry {
            file: format!("{}.png", selection.label),
            label: selection.label,
            glyph_id: glyph.id,
            glyph_name: glyph.name.clone(),
            codepoint: glyph.codepoint,
            source: selection.source,
            crop: normalized.crop,
            side: normalized.side,
            offset_x: normalized.offset_x,
            offset_y: normalized.offset_y,
        });
    }

    log::info!("exported {} glyphs", written.len());
    Ok(written)
}
