//! Codepoint range parsing and the codepoint → label table used by the
//! unicode selection strategy.
//!
//! A range expression is a comma separated list of hex codepoints or
//! inclusive `start-end` ranges, e.g. `0x30-0x39,U+00C0-U+00FF,20AC`.

use std::collections::BTreeMap;

use crate::Error;

/// Which character classes to export, as set by `--upper`, `--lower` and `--number`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseFlags {
    /// Include upper-case letters.
    pub upper: bool,
    /// Include lower-case letters.
    pub lower: bool,
    /// Include digits.
    pub number: bool,
}

/// An inclusive run of codepoints together with the text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodepointRange {
    /// First codepoint.
    pub start: u32,
    /// Last codepoint, inclusive.
    pub end: u32,
    /// The expression this range came from, trimmed.
    pub source: String,
}

impl CodepointRange {
    fn flag(start: u32, end: u32) -> Self {
        CodepointRange {
            start,
            end,
            source: format!("{start:#x}-{end:#x}"),
        }
    }
}

const UPPER: (u32, u32) = (0x41, 0x5A);
const LOWER: (u32, u32) = (0x61, 0x7A);
const NUMBER: (u32, u32) = (0x30, 0x39);

fn parse_codepoint(raw: &str) -> Result<u32, Error> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .or_else(|| raw.strip_prefix("U+"))
        .or_else(|| raw.strip_prefix("u+"))
        .unwrap_or(raw);
    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|&codepoint| char::from_u32(codepoint).is_some())
        .ok_or_else(|| Error::InvalidCodepoint(raw.to_owned()))
}

/// Parses a comma separated list of hex codepoints and `start-end` ranges.
///
/// # Errors
///
/// [`Error::MalformedRange`] for an item with more than one `-`,
/// [`Error::InvalidCodepoint`] for a bound that is not a hex Unicode scalar
/// value (surrogates and anything above `10FFFF` are rejected), and
/// [`Error::InvalidRange`] when a range ends before it starts.
pub fn parse_ranges(expr: &str) -> Result<Vec<CodepointRange>, Error> {
    let mut ranges = Vec::new();
    for item in expr.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let mut pieces = item.split('-');
        let fst = pieces.next().unwrap_or_default().trim();
        let snd = pieces.next().map(str::trim);
        if pieces.next().is_some() {
            return Err(Error::MalformedRange(item.to_owned()));
        }

        let start = parse_codepoint(fst)?;
        let end = match snd {
            Some(snd) => parse_codepoint(snd)?,
            None => start,
        };
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }

        ranges.push(CodepointRange {
            start,
            end,
            source: item.to_owned(),
        });
    }
    Ok(ranges)
}

/// Maps each selected codepoint to the range expression that selected it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnicodeTable {
    entries: BTreeMap<u32, usize>,
    sources: Vec<String>,
}

impl UnicodeTable {
    /// Table holding the ranges implied by the case flags.
    #[must_use]
    pub fn from_flags(flags: CaseFlags) -> Self {
        let mut table = UnicodeTable::default();
        for (enabled, (start, end)) in [
            (flags.upper, UPPER),
            (flags.lower, LOWER),
            (flags.number, NUMBER),
        ] {
            if enabled {
                table.insert_range(&CodepointRange::flag(start, end));
            }
        }
        table
    }

    /// Builds the table from the case flags, then the explicit ranges in `expr`.
    /// A codepoint covered more than once keeps the label of the last range.
    ///
    /// # Errors
    ///
    /// Propagates parse errors from [`parse_ranges`].
    pub fn build(flags: CaseFlags, expr: Option<&str>) -> Result<Self, Error> {
        let mut table = UnicodeTable::from_flags(flags);
        if let Some(expr) = expr {
            for range in parse_ranges(expr)? {
                table.insert_range(&range);
            }
        }
        Ok(table)
    }

    /// Adds every scalar value of `range`, overwriting existing labels.
    /// Surrogates inside the range are skipped.
    pub fn insert_range(&mut self, range: &CodepointRange) {
        let source = self.sources.len();
        self.sources.push(range.source.clone());
        for ch in (range.start..=range.end).filter_map(char::from_u32) {
            self.entries.insert(u32::from(ch), source);
        }
    }

    /// The range expression that selected `codepoint`.
    #[must_use]
    pub fn label_source(&self, codepoint: u32) -> Option<&str> {
        self.entries
            .get(&codepoint)
            .map(|&source| self.sources[source].as_str())
    }

    /// Whether `codepoint` was selected.
    #[must_use]
    pub fn contains(&self, codepoint: u32) -> bool {
        self.entries.contains_key(&codepoint)
    }

    /// Number of selected codepoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no codepoint is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected codepoints with their labels, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .map(|(&cp, &source)| (cp, self.sources[source].as_str()))
    }
}
