//! Character-level helpers for hanzi and romanized pinyin.

use std::ops::RangeInclusive;

/// CJK Unified Ideographs block (U+4E00..U+9FFF). Extensions A–G are excluded.
pub const COMMON_RANGE: RangeInclusive<u32> = 0x4E00..=0x9FFF;

/// Whether `code_point` is a common hanzi eligible for the tables.
pub fn is_common(code_point: u32) -> bool {
    COMMON_RANGE.contains(&code_point)
}

/// Fold tone marks and other diacritics to plain ASCII (`zhōng` → `zhong`,
/// `lǜ` → `lu`).
pub fn fold_diacritics(s: &str) -> String {
    deunicode::deunicode(s)
}
