use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::charset::{CaseFlags, UnicodeTable};
use crate::export::{export_glyphs, ExportOptions};
use crate::font::RasterFont;
use crate::select::Selector;
use crate::{Error, GlyphManifest};

/// How glyphs are picked out of the font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// By glyph name: single letters filtered by case, and `numr` numerals
    Names,
    /// By codepoint, from `--unicode` ranges and the case flags
    Unicode,
}

/// Command line arguments of `font2img`.
#[derive(Parser, Debug)]
#[command(author, version, about = "Export glyphs of a font as individual square PNG images", long_about = None)]
pub struct Args {
    /// Path to the font file to export glyphs from
    pub font: PathBuf,
    /// Font pixel size used for rendering
    #[arg(short, long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    pub resolution: u32,
    /// Side length of the square output images; 0 sizes each image to its content
    #[arg(short, long, default_value_t = 500)]
    pub size: u32,
    /// Output directory
    #[arg(short, long, default_value = "tmp")]
    pub out: PathBuf,
    /// Include upper-case letters
    #[arg(short, long)]
    pub upper: bool,
    /// Include lower-case letters
    #[arg(short, long)]
    pub lower: bool,
    /// Include numeric values
    #[arg(short, long)]
    pub number: bool,
    /// Regex the output name of a glyph has to match
    #[arg(short, long, conflicts_with = "unicode")]
    pub filter: Option<String>,
    /// Comma separated Unicode codepoints or start-end ranges, written in hex
    #[arg(long)]
    pub unicode: Option<String>,
    /// Glyph selection strategy; defaults to `unicode` when --unicode is given
    #[arg(long, value_enum)]
    pub select: Option<Strategy>,
    /// Crop each glyph to its bounding box before placing it (default)
    #[arg(short, long, overrides_with = "no_bounding_box")]
    pub bounding_box: bool,
    /// Place the whole raster without cropping
    #[arg(long, overrides_with = "bounding_box")]
    pub no_bounding_box: bool,
    /// Delete the contents of the output directory first
    #[arg(long)]
    pub clean: bool,
    /// Where to write a manifest of the exported images (.ron, .json or .rkyv)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl Args {
    /// Selection strategy in effect.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match (self.select, &self.unicode) {
            (Some(strategy), _) => strategy,
            (None, Some(_)) => Strategy::Unicode,
            (None, None) => Strategy::Names,
        }
    }

    /// Character classes enabled on the command line.
    #[must_use]
    pub fn case_flags(&self) -> CaseFlags {
        CaseFlags {
            upper: self.upper,
            lower: self.lower,
            number: self.number,
        }
    }

    /// Export settings derived from the arguments.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            out_dir: self.out.clone(),
            resolution: self.resolution,
            size: self.size,
            crop: !self.no_bounding_box,
            clean: self.clean,
        }
    }

    fn selector(&self) -> Result<Selector, Error> {
        let flags = self.case_flags();
        match self.strategy() {
            Strategy::Names => {
                if self.unicode.is_some() {
                    log::warn!("--unicode has no effect when selecting by name");
                }
                Selector::by_name(flags, self.filter.as_deref())
            }
            Strategy::Unicode => {
                if self.filter.is_some() {
                    log::warn!("--filter has no effect when selecting by codepoint");
                }
                let table = UnicodeTable::build(flags, self.unicode.as_deref())?;
                if table.is_empty() {
                    log::warn!("No codepoints selected, nothing will be exported");
                }
                Ok(Selector::Unicode(table))
            }
        }
    }
}

/// Runs a complete export as described by `args`.
///
/// # Errors
///
/// The first error hit; see [`Error`].
pub fn run(args: &Args) -> Result<GlyphManifest, Error> {
    let options = args.export_options();
    log::info!("font:        {}", args.font.display());
    log::info!("resolution:  {}", options.resolution);
    log::info!("size:        {}", options.size);
    log::info!("upper case:  {}", args.upper);
    log::info!("lower case:  {}", args.lower);
    log::info!("numeric:     {}", args.number);
    log::info!("strategy:    {:?}", args.strategy());
    log::info!("crop:        {}", options.crop);
    log::info!("out dir:     {}", options.out_dir.display());

    let selector = args.selector()?;
    let font = RasterFont::open(&args.font)?;
    let glyphs = export_glyphs(&font, &selector, &options)?;

    let manifest = GlyphManifest {
        font: args.font.display().to_string(),
        resolution: options.resolution,
        size: options.size,
        glyphs,
    };

    if let Some(path) = &args.manifest {
        write_manifest(path, &manifest)?;
        log::info!("wrote manifest {}", path.display());
    }

    Ok(manifest)
}

/// Writes `manifest` to `path`, in the format named by its extension.
///
/// # Errors
///
/// [`Error::ManifestFormat`] for an unsupported extension, [`Error::Serialize`]
/// or [`Error::Io`] if encoding or writing fails.
pub fn write_manifest(path: &Path, manifest: &GlyphManifest) -> Result<(), Error> {
    let bytes = match path.extension().map(|os_str| os_str.to_str()) {
        Some(Some("ron")) => {
            ron::ser::to_string_pretty(manifest, ron::ser::PrettyConfig::default())
                .map_err(|e| Error::Serialize(e.to_string()))?
                .into_bytes()
        }
        Some(Some("json")) => serde_json::to_vec_pretty(manifest)
            .map_err(|e| Error::Serialize(e.to_string()))?,
        Some(Some("rkyv")) => rkyv::to_bytes::<_, 4096>(manifest)
            .map_err(|e| Error::Serialize(format!("{e:?}")))?
            .to_vec(),
        _ => return Err(Error::ManifestFormat(path.to_path_buf())),
    };
    std::fs::write(path, bytes).map_err(|e| Error::io(path, e))
}
