//! Corpus loading: fetches a tab-separated review file and yields a [`Corpus`].
//!
//! [`Corpus`]: revlens_core::Corpus

mod parse;
mod source;

pub use parse::parse_tsv;
pub use source::{CorpusSource, FileCorpusSource, HttpCorpusSource, LoadError};
