pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;

pub use checker::dictionary::{Dictionary, ImportStrategy, NeighborPair};
pub use checker::document::DocumentBuffer;
pub use checker::{CheckError, SpellChecker};
pub use config::Config;

/// Outcome of checking one document.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub unknown_count: usize,
    pub fixed_count: usize,
    pub reports: Vec<UnknownWord>,
}

/// One unknown word found during a scan.
///
/// `predecessor` and `successor` are the nearest dictionary words on either
/// side; either may be empty when the word sorts before or after the whole
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord {
    pub word: String,
    /// Character offset of the word in the document.
    pub offset: usize,
    pub predecessor: String,
    pub successor: String,
}
