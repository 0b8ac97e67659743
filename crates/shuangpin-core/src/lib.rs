//! Builds shuangpin initial → hanzi lookup tables from pinyin annotation
//! corpora and splices them into an Emacs Lisp source file.

pub mod aggregate;
pub mod emit;
pub mod initials;
pub mod parse;
pub mod pipeline;
pub mod settings;
pub mod splice;
pub mod table;
pub mod unicode;
pub mod variant;
