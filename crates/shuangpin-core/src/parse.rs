//! Parser for Unicode Han database style pinyin annotation lines.
//!
//! Line format: `U+4E2D: zhōng,zhòng  # 中`

use crate::initials::InitialTable;
use crate::unicode::fold_diacritics;

/// One parsed annotation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRecord {
    pub code_point: u32,
    pub glyph: String,
    /// One initial per recognized pronunciation, in source order.
    pub initials: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing ':' after code point")]
    MissingColon,
    #[error("code point {0:?} does not start with U+")]
    MissingCodePointPrefix(String),
    #[error("invalid hexadecimal code point {0:?}")]
    InvalidCodePoint(String),
    #[error("missing '#' before glyph")]
    MissingGlyphSeparator,
    #[error("empty glyph field")]
    EmptyGlyph,
}

/// Parse one non-empty, non-comment line.
///
/// Pronunciations whose folded form starts with no known initial are
/// dropped; a record may come back with no initials at all.
pub fn parse_line(line: &str, table: &InitialTable) -> Result<CharRecord, ParseError> {
    let (code_field, rest) = line.split_once(':').ok_or(ParseError::MissingColon)?;
    let (pron_field, annotation) = rest
        .split_once('#')
        .ok_or(ParseError::MissingGlyphSeparator)?;

    let code_field = code_field.trim();
    let hex = code_field
        .strip_prefix("U+")
        .ok_or_else(|| ParseError::MissingCodePointPrefix(code_field.to_string()))?;
    let code_point = u32::from_str_radix(hex, 16)
        .map_err(|_| ParseError::InvalidCodePoint(code_field.to_string()))?;

    let glyph = annotation
        .split_whitespace()
        .next()
        .ok_or(ParseError::EmptyGlyph)?;

    let initials = pron_field
        .split(',')
        .filter_map(|pron| {
            let folded = fold_diacritics(&pron.trim().to_lowercase());
            table.match_prefix(&folded)
        })
        .collect();

    Ok(CharRecord {
        code_point,
        glyph: glyph.to_string(),
        initials,
    })
}
