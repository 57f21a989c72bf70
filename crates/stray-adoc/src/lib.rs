//! AsciiDoc macro scanning and reference normalization.
//!
//! This crate provides the text-level core of the auditor: finding
//! image/include/xref macros in raw AsciiDoc source and resolving their
//! targets to canonical catalog paths of the form
//! `modules/<module>/<family-directory>/<relative-path>`.

pub mod family;
pub mod normalize;
pub mod scanner;

pub use family::FamilyMap;
pub use normalize::{normalize_target, NormalizeError};
pub use scanner::{scan_macros, MacroKind, MacroOccurrence};
