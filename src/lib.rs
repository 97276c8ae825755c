//! Batch exporter for per-glyph raster images, and the de-/serializable
//! manifest it leaves next to them.
//!
//! The `font2img` binary renders the selected glyphs of a font one by one,
//! crops each raster to its visible ink and centers it on a white square
//! canvas. Optionally it writes a [`GlyphManifest`] describing every file it
//! produced; this crate can read that manifest back without pulling in the
//! rasterization stack.
//!
//! # Usage
//! ## RON
//! ```
//! # fn test() -> Result<(), ron::Error> {
//! // Requires Cargo feature `serde-deserialize` and the `ron` crate:
//! const MANIFEST: &'static str = r#"(
//!     font: "Inter.ttf",
//!     resolution: 1000,
//!     size: 500,
//!     glyphs: [(
//!         label: "7",
//!         file: "7.png",
//!         glyph_id: 1204,
//!         glyph_name: Some("seven.numr"),
//!         codepoint: None,
//!         source: None,
//!         crop: Some((x: 31, y: 112, width: 402, height: 566)),
//!         side: 500,
//!         offset_x: 49,
//!         offset_y: -33,
//!     )],
//! )"#;
//! let manifest: glyph_export::GlyphManifest = ron::from_str(MANIFEST)?;
//! assert_eq!(manifest.glyphs[0].label, "7");
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```
//!
//! ## JSON
//! ```
//! # fn test() -> Result<(), serde_json::Error> {
//! // Requires Cargo feature `serde-deserialize` and the `serde_json` crate:
//! const MANIFEST: &'static str = r#"{
//!     "font": "Inter.ttf", "resolution": 1000, "size": 0,
//!     "glyphs": [{
//!         "label": "A", "file": "A.png", "glyph_id": 36,
//!         "glyph_name": "A", "codepoint": 65, "source": "0x41-0x5A",
//!         "crop": null, "side": 712, "offset_x": 0, "offset_y": 0
//!     }]
//! }"#;
//! let manifest: glyph_export::GlyphManifest = serde_json::from_str(MANIFEST)?;
//! assert_eq!(manifest.glyphs[0].codepoint, Some(0x41));
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```
//!
//! ## RKYV
//! ```
//! // Requires Cargo features `rkyv-serialize` and `rkyv-deserialize`:
//! use glyph_export::GlyphManifest;
//! let manifest = GlyphManifest {
//!     font: "Inter.ttf".into(),
//!     resolution: 1000,
//!     size: 500,
//!     glyphs: Vec::new(),
//! };
//! // `font2img --manifest glyphs.rkyv` writes exactly these bytes:
//! let bytes = rkyv::to_bytes::<_, 4096>(&manifest).unwrap();
//!
//! // Using the unsafe API for maximum performance, on suitably aligned bytes:
//! let archived = unsafe { rkyv::archived_root::<GlyphManifest>(&bytes) };
//! assert_eq!(archived.resolution, 1000);
//! // Optionally, unpack the archived manifest before use:
//! use rkyv::Deserialize;
//! let deserialized: GlyphManifest = archived.deserialize(&mut rkyv::Infallible).unwrap();
//! assert_eq!(deserialized, manifest);
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod manifest;

pub use manifest::{CropRect, GlyphManifest, ManifestEntry};

#[cfg(feature = "bin")]
pub mod canvas;
#[cfg(feature = "bin")]
pub mod charset;
#[cfg(feature = "bin")]
mod cli;
#[cfg(feature = "bin")]
mod error;
#[cfg(feature = "bin")]
pub mod export;
#[cfg(feature = "bin")]
pub mod font;
#[cfg(feature = "bin")]
pub mod select;

#[cfg(feature = "bin")]
pub use cli::{run, write_manifest, Args, Strategy};
#[cfg(feature = "bin")]
pub use error::Error;
