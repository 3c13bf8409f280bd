//! Lexis NLP — local keyword extraction and text statistics.
//!
//! Pipeline: normalize → tokenize → POS-tag → keep nouns → lemmatize →
//! drop stop words → rank by frequency. Pure and deterministic, no I/O.

pub mod keywords;
pub mod lemma;
pub mod pos;
pub mod stopwords;
pub mod text;

pub use keywords::{extract_keywords, get_text_stats, KeywordExtractor, KeywordFrequency, TextStats};
pub use lemma::lemmatize_noun;
pub use pos::{tag_tokens, PosTag};
pub use text::{clean_text, split_sentences, tokenize};
