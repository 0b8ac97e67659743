//! Script-variant projection of an aggregated table onto the 26 keys.

use tracing::debug;

use crate::initials::{InitialTable, KEY_COUNT};
use crate::table::CharTable;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("unknown conversion profile {0:?} (available: s2t, s2tw, s2hk, t2s)")]
    UnknownProfile(String),
}

/// String → string script conversion.
pub trait ScriptConverter {
    fn convert(&self, text: &str) -> String;

    /// Profile name, for logging.
    fn profile(&self) -> &str;
}

/// OpenCC-style conversion backed by `zhconv`.
#[derive(Debug, Clone)]
pub struct ZhConverter {
    profile: String,
    target: zhconv::Variant,
}

impl ZhConverter {
    /// Accepts OpenCC profile names with or without the `.json` suffix.
    pub fn from_profile(name: &str) -> Result<Self, VariantError> {
        let base = name.strip_suffix(".json").unwrap_or(name);
        let target = match base {
            "s2t" => zhconv::Variant::ZhHant,
            "s2tw" => zhconv::Variant::ZhTW,
            "s2hk" => zhconv::Variant::ZhHK,
            "t2s" => zhconv::Variant::ZhHans,
            _ => return Err(VariantError::UnknownProfile(name.to_string())),
        };
        Ok(Self {
            profile: base.to_string(),
            target,
        })
    }
}

impl ScriptConverter for ZhConverter {
    fn convert(&self, text: &str) -> String {
        zhconv::zhconv(text, self.target)
    }

    fn profile(&self) -> &str {
        &self.profile
    }
}

/// Per-key character strings in `'a'..='z'` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    rows: Vec<String>,
}

impl KeyTable {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Characters for `key`, or `None` if it is not `'a'..='z'`.
    pub fn get(&self, key: char) -> Option<&str> {
        if !key.is_ascii_lowercase() {
            return None;
        }
        self.rows
            .get((key as u8 - b'a') as usize)
            .map(String::as_str)
    }

    /// `(key, chars)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| ((b'a' + i as u8) as char, row.as_str()))
    }
}

/// Lay `table` out by key, optionally converting each row.
///
/// A converted row is kept exactly as the converter returns it. Two
/// simplified glyphs sharing a traditional form both survive, so the row
/// can hold that form twice.
pub fn project(
    table: &CharTable,
    initials: &InitialTable,
    converter: Option<&dyn ScriptConverter>,
) -> KeyTable {
    let mut rows = Vec::with_capacity(KEY_COUNT);
    for (key, initial) in initials.keys() {
        let chars: String = table.chars(initial).concat();
        let row = match converter {
            Some(c) => c.convert(&chars),
            None => chars,
        };
        debug!(
            "{key} -> {initial}: {} chars{}",
            row.chars().count(),
            converter.map_or(String::new(), |c| format!(" ({})", c.profile()))
        );
        rows.push(row);
    }
    KeyTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Folds 松 into 鬆, so both glyphs convert to the same form.
    struct MergeConverter;

    impl ScriptConverter for MergeConverter {
        fn convert(&self, text: &str) -> String {
            text.replace('松', "鬆")
        }

        fn profile(&self) -> &str {
            "merge"
        }
    }

    fn sample_table() -> CharTable {
        let mut table = CharTable::new(InitialTable::standard());
        table.insert("zh", "中");
        table.insert("zh", "重");
        table.insert("ch", "重");
        table.insert("s", "松");
        table.insert("s", "鬆");
        table
    }

    #[test]
    fn identity_projection_has_26_rows_in_key_order() {
        let initials = InitialTable::standard();
        let keys = project(&sample_table(), initials, None);
        assert_eq!(keys.rows().len(), KEY_COUNT);
        let order: String = keys.iter().map(|(k, _)| k).collect();
        assert_eq!(order, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(keys.get('v'), Some("中重"));
        assert_eq!(keys.get('i'), Some("重"));
        assert_eq!(keys.get('s'), Some("松鬆"));
        assert_eq!(keys.get('a'), Some(""));
        assert_eq!(keys.get('?'), None);
    }

    #[test]
    fn converted_projection_keeps_duplicates() {
        let initials = InitialTable::standard();
        let converter: &dyn ScriptConverter = &MergeConverter;
        let keys = project(&sample_table(), initials, Some(converter));
        assert_eq!(keys.get('s'), Some("鬆鬆"));
        assert_eq!(keys.get('v'), Some("中重"));
    }

    #[test]
    fn zh_converter_profiles() {
        assert_eq!(ZhConverter::from_profile("s2t").unwrap().profile(), "s2t");
        assert_eq!(
            ZhConverter::from_profile("s2t.json").unwrap().profile(),
            "s2t"
        );
        assert!(ZhConverter::from_profile("s2tw").is_ok());
        assert_eq!(
            ZhConverter::from_profile("klingon").unwrap_err(),
            VariantError::UnknownProfile("klingon".to_string())
        );
    }

    #[test]
    fn zh_converter_simplified_to_traditional() {
        let conv = ZhConverter::from_profile("s2t").unwrap();
        assert_eq!(conv.convert("汉"), "漢");
        assert_eq!(conv.convert("中"), "中");
    }
}
