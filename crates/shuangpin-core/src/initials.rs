//! Syllable initials and their shuangpin keys.
//!
//! Single-letter initials sit on their own key. The three retroflex
//! initials take over the letters no single-letter initial claims:
//! `sh` → `u`, `ch` → `i`, `zh` → `v`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Recognized initials in keyboard-row order.
pub const INITIALS: [&str; 26] = [
    "q", "w", "e", "r", "t", "y", "sh", "ch", "o", "p", "a", "s", "d", "f", "g", "h", "j", "k",
    "l", "z", "x", "c", "zh", "b", "n", "m",
];

/// Keys reused as shorthand for the multi-letter initials.
pub const SPECIAL_KEYS: [(&str, char); 3] = [("sh", 'u'), ("ch", 'i'), ("zh", 'v')];

pub const KEY_COUNT: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitialTableError {
    #[error("initial {0:?} is listed more than once")]
    DuplicateInitial(String),
    #[error("initial {0:?} has no key mapping")]
    Unmapped(String),
    #[error("key '{key}' is claimed by both {first:?} and {second:?}")]
    KeyConflict {
        key: char,
        first: String,
        second: String,
    },
    #[error("key '{0}' has no initial")]
    MissingKey(char),
    #[error("key {0:?} is not a lowercase ASCII letter")]
    InvalidKey(char),
}

/// Bidirectional initial ↔ key lookup, validated to be a bijection over
/// `'a'..='z'`.
#[derive(Debug, Clone)]
pub struct InitialTable {
    // Indexed by key - 'a'.
    by_key: [&'static str; KEY_COUNT],
    keys: HashMap<&'static str, char>,
}

impl InitialTable {
    /// Build the standard table from [`INITIALS`] and [`SPECIAL_KEYS`].
    pub fn new() -> Result<Self, InitialTableError> {
        Self::from_parts(&INITIALS, &SPECIAL_KEYS)
    }

    /// Build a table from an initial list plus explicit key overrides.
    ///
    /// Every single-letter initial maps to itself; every longer initial
    /// needs an override. The result must cover all 26 keys exactly once.
    pub fn from_parts(
        initials: &[&'static str],
        overrides: &[(&'static str, char)],
    ) -> Result<Self, InitialTableError> {
        let mut keys: HashMap<&'static str, char> = HashMap::with_capacity(initials.len());
        let mut by_key: [Option<&'static str>; KEY_COUNT] = [None; KEY_COUNT];

        for &initial in initials {
            let key = if initial.len() == 1 {
                initial.chars().next()
            } else {
                overrides
                    .iter()
                    .find(|(name, _)| *name == initial)
                    .map(|&(_, key)| key)
            };
            let Some(key) = key else {
                return Err(InitialTableError::Unmapped(initial.to_string()));
            };
            if !key.is_ascii_lowercase() {
                return Err(InitialTableError::InvalidKey(key));
            }
            if keys.insert(initial, key).is_some() {
                return Err(InitialTableError::DuplicateInitial(initial.to_string()));
            }
            let slot = &mut by_key[key_index(key)];
            if let Some(first) = slot {
                return Err(InitialTableError::KeyConflict {
                    key,
                    first: first.to_string(),
                    second: initial.to_string(),
                });
            }
            *slot = Some(initial);
        }

        let mut resolved = [""; KEY_COUNT];
        for (i, slot) in by_key.iter().enumerate() {
            match slot {
                Some(initial) => resolved[i] = initial,
                None => return Err(InitialTableError::MissingKey(index_key(i))),
            }
        }

        Ok(Self {
            by_key: resolved,
            keys,
        })
    }

    /// The built-in table, validated on first use.
    pub fn standard() -> &'static InitialTable {
        static INSTANCE: OnceLock<InitialTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            InitialTable::new().unwrap_or_else(|e| panic!("built-in initial table is invalid: {e}"))
        })
    }

    pub fn key_of(&self, initial: &str) -> Option<char> {
        self.keys.get(initial).copied()
    }

    pub fn initial_of(&self, key: char) -> Option<&'static str> {
        if key.is_ascii_lowercase() {
            Some(self.by_key[key_index(key)])
        } else {
            None
        }
    }

    pub fn contains(&self, initial: &str) -> bool {
        self.keys.contains_key(initial)
    }

    /// `(key, initial)` pairs in `'a'..='z'` order.
    pub fn keys(&self) -> impl Iterator<Item = (char, &'static str)> + '_ {
        self.by_key
            .iter()
            .enumerate()
            .map(|(i, &initial)| (index_key(i), initial))
    }

    /// Longest known initial that prefixes `pinyin`, trying two letters
    /// before one.
    pub fn match_prefix(&self, pinyin: &str) -> Option<&'static str> {
        [2, 1].into_iter().find_map(|n| {
            let prefix = pinyin.get(..n)?;
            self.keys.get_key_value(prefix).map(|(&initial, _)| initial)
        })
    }
}

fn key_index(key: char) -> usize {
    (key as u8 - b'a') as usize
}

fn index_key(i: usize) -> char {
    (b'a' + i as u8) as char
}
