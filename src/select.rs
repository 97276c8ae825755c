//! Deciding which glyphs to export and what to call the resulting files.

use regex::Regex;

use crate::charset::{CaseFlags, UnicodeTable};
use crate::font::GlyphEntry;
use crate::Error;

const NUMBER_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Marker that numeral-style glyph names carry, as in `seven.numr`.
pub const NUMERAL_MARKER: &str = "numr";

/// The digit spelled by `word`, e.g. `"7"` for `"seven"`.
#[must_use]
pub fn number_word(word: &str) -> Option<&'static str> {
    NUMBER_WORDS
        .iter()
        .position(|&w| w == word)
        .map(|idx| DIGITS[idx])
}

/// A glyph chosen for export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// File stem of the output image.
    pub label: String,
    /// Range expression that matched the glyph's codepoint, when selecting by codepoint.
    pub source: Option<String>,
}

/// The two ways of picking glyphs out of a font.
#[derive(Clone, Debug)]
pub enum Selector {
    /// Pick glyphs by the shape of their names: single letters filtered by
    /// case, and `numr` numerals mapped to digits.
    Names {
        /// Character classes to keep.
        flags: CaseFlags,
        /// Optional pattern the resolved label has to match.
        filter: Option<Regex>,
    },
    /// Pick glyphs whose codepoint is in the table.
    Unicode(UnicodeTable),
}

impl Selector {
    /// Name-based selector; `filter` is compiled here.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFilter`] if `filter` is not a valid regular expression.
    pub fn by_name(flags: CaseFlags, filter: Option<&str>) -> Result<Self, Error> {
        let filter = filter.map(Regex::new).transpose()?;
        Ok(Selector::Names { flags, filter })
    }

    /// Decides whether `glyph` is exported, and under which label.
    ///
    /// Glyphs without visible contours are never selected.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNumeral`] for a `numr` glyph whose base name is not a number word.
    pub fn select(&self, glyph: &GlyphEntry) -> Result<Option<Selection>, Error> {
        if !glyph.has_outline {
            return Ok(None);
        }

        match self {
            Selector::Names { flags, filter } => {
                let Some(name) = glyph.name.as_deref() else {
                    return Ok(None);
                };
                let Some(label) = label_from_name(name, *flags)? else {
                    return Ok(None);
                };
                if !is_file_stem(&label) {
                    log::warn!("skipping glyph {}: {label:?} is not usable as a file name", glyph.id);
                    return Ok(None);
                }
                if filter.as_ref().is_some_and(|re| !re.is_match(&label)) {
                    return Ok(None);
                }
                Ok(Some(Selection {
                    label,
                    source: None,
                }))
            }
            Selector::Unicode(table) => {
                let Some(codepoint) = glyph.codepoint else {
                    return Ok(None);
                };
                let Some(source) = table.label_source(codepoint) else {
                    return Ok(None);
                };
                let label = glyph
                    .name
                    .as_deref()
                    .map(strip_style)
                    .filter(|label| is_file_stem(label))
                    .unwrap_or_else(|| format!("uni{codepoint:04X}"));
                Ok(Some(Selection {
                    label,
                    source: Some(source.to_owned()),
                }))
            }
        }
    }
}

/// Resolves a glyph name to an output label under the name heuristic.
///
/// Returns `None` for glyphs the heuristic skips: names that are neither a
/// single character nor a numeral, letters whose case is not enabled, and
/// numerals carrying an extra style suffix such as `seven.numr.ss02`.
///
/// # Errors
///
/// [`Error::UnknownNumeral`] for a `numr` name whose first token is not a number word.
pub fn label_from_name(name: &str, flags: CaseFlags) -> Result<Option<String>, Error> {
    if name.contains(NUMERAL_MARKER) {
        if !flags.number {
            return Ok(None);
        }
        let tokens: Vec<&str> = name.split('.').collect();
        if tokens.len() > 2 {
            return Ok(None);
        }
        let digit = number_word(tokens[0]).ok_or_else(|| Error::UnknownNumeral(name.to_owned()))?;
        return Ok(Some(digit.to_owned()));
    }

    let mut chars = name.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Ok(None);
    };
    if ch.is_lowercase() && !flags.lower {
        return Ok(None);
    }
    if ch.is_uppercase() && !flags.upper {
        return Ok(None);
    }
    Ok(Some(name.to_owned()))
}

/// Whether `label` can be used as a file name inside the output directory:
/// non-empty, not `.` or `..`, and free of path separators and NUL.
#[must_use]
pub fn is_file_stem(label: &str) -> bool {
    !label.is_empty()
        && label != "."
        && label != ".."
        && !label.contains(['/', '\\', '\0'])
}

/// Drops style suffixes (`one.ss02` → `one`) and spells number words as digits.
#[must_use]
pub fn strip_style(name: &str) -> String {
    let base = name.split('.').next().unwrap_or(name);
    number_word(base).unwrap_or(base).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(name: &str, codepoint: Option<u32>) -> GlyphEntry {
        GlyphEntry {
            id: 1,
            name: Some(name.to_owned()),
            codepoint,
            has_outline: true,
        }
    }

    const ALL: CaseFlags = CaseFlags {
        upper: true,
        lower: true,
        number: true,
    };

    #[test]
    fn numerals() {
        let flags = CaseFlags {
            number: true,
            ..Default::default()
        };
        assert_eq!(label_from_name("seven.numr", flags).unwrap().as_deref(), Some("7"));
        assert_eq!(label_from_name("zero.numr", flags).unwrap().as_deref(), Some("0"));
        assert_eq!(label_from_name("seven.numr.ss02", flags).unwrap(), None);
        assert_eq!(label_from_name("seven.numr.ss02", ALL).unwrap(), None);
        assert_eq!(label_from_name("seven.numr", CaseFlags::default()).unwrap(), None);
    }

    #[test]
    fn unknown_numeral_is_an_error() {
        assert!(matches!(
            label_from_name("eleven.numr", ALL),
            Err(Error::UnknownNumeral(name)) if name == "eleven.numr"
        ));
    }

    #[test]
    fn letters_by_case() {
        let upper = CaseFlags {
            upper: true,
            ..Default::default()
        };
        assert_eq!(label_from_name("A", upper).unwrap().as_deref(), Some("A"));
        assert_eq!(label_from_name("a", upper).unwrap(), None);
        assert_eq!(label_from_name("a", ALL).unwrap().as_deref(), Some("a"));
        assert_eq!(label_from_name("seven", ALL).unwrap(), None);
        assert_eq!(label_from_name("A.ss01", ALL).unwrap(), None);
        // uncased single characters pass regardless of flags
        assert_eq!(
            label_from_name("_", CaseFlags::default()).unwrap().as_deref(),
            Some("_")
        );
    }

    #[test]
    fn name_filter_applies_to_label() {
        let selector = Selector::by_name(ALL, Some("^[0-4]$")).unwrap();
        let hit = selector.select(&glyph("three.numr", None)).unwrap();
        assert_eq!(hit.map(|s| s.label).as_deref(), Some("3"));
        assert_eq!(selector.select(&glyph("seven.numr", None)).unwrap(), None);
        assert_eq!(selector.select(&glyph("A", None)).unwrap(), None);
    }

    #[test]
    fn bad_filter() {
        assert!(matches!(
            Selector::by_name(ALL, Some("(")),
            Err(Error::InvalidFilter(_))
        ));
    }

    #[test]
    fn empty_glyphs_are_skipped() {
        let selector = Selector::by_name(ALL, None).unwrap();
        let mut space = glyph("A", Some(0x41));
        space.has_outline = false;
        assert_eq!(selector.select(&space).unwrap(), None);
    }

    #[test]
    fn unicode_labels() {
        let table = UnicodeTable::build(CaseFlags::default(), Some("0x30-0x39")).unwrap();
        let selector = Selector::Unicode(table);

        let seven = selector.select(&glyph("seven.lf", Some(0x37))).unwrap().unwrap();
        assert_eq!(seven.label, "7");
        assert_eq!(seven.source.as_deref(), Some("0x30-0x39"));

        assert_eq!(selector.select(&glyph("A", Some(0x41))).unwrap(), None);
        assert_eq!(selector.select(&glyph("seven.numr", None)).unwrap(), None);

        let mut unnamed = glyph("", Some(0x35));
        unnamed.name = None;
        let five = selector.select(&unnamed).unwrap().unwrap();
        assert_eq!(five.label, "uni0035");
    }

    #[test]
    fn unusable_names_fall_back_to_codepoint() {
        let table = UnicodeTable::build(CaseFlags::default(), Some("41-43")).unwrap();
        let selector = Selector::Unicode(table);
        for (name, cp, label) in [
            ("../../etc/passwd", 0x41, "uni0041"),
            ("..", 0x42, "uni0042"),
            ("a\\b", 0x43, "uni0043"),
        ] {
            let hit = selector.select(&glyph(name, Some(cp))).unwrap().unwrap();
            assert_eq!(hit.label, label);
        }
    }

    #[test]
    fn unusable_names_are_skipped_by_name() {
        let selector = Selector::by_name(ALL, None).unwrap();
        assert_eq!(selector.select(&glyph("/", None)).unwrap(), None);
        assert_eq!(selector.select(&glyph("\\", None)).unwrap(), None);
        assert_eq!(selector.select(&glyph(".", None)).unwrap(), None);
    }

    #[test]
    fn file_stems() {
        assert!(is_file_stem("A"));
        assert!(is_file_stem("7"));
        assert!(is_file_stem("uni0041"));
        assert!(!is_file_stem(""));
        assert!(!is_file_stem("."));
        assert!(!is_file_stem(".."));
        assert!(!is_file_stem("a/b"));
        assert!(!is_file_stem("a\\b"));
    }

    #[test]
    fn strip() {
        assert_eq!(strip_style("one.ss02"), "1");
        assert_eq!(strip_style("a.sc"), "a");
        assert_eq!(strip_style("Aring"), "Aring");
    }
}
