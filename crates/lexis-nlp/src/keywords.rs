//! Noun-frequency keyword extraction and text statistics.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::lemma::lemmatize_noun;
use crate::pos::tag_tokens;
use crate::stopwords::ENGLISH_STOP_WORDS;
use crate::text::{self, split_sentences, tokenize};

/// Minimum token length is exclusive: tokens must be strictly longer.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Keyword lemmas with their counts, most frequent first.
pub type KeywordFrequency = Vec<(String, usize)>;

/// Process-wide default extractor. Built once, read-only afterwards.
static SHARED: Lazy<KeywordExtractor> = Lazy::new(KeywordExtractor::new);

/// Summary statistics for a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub keywords: Vec<String>,
    pub keyword_frequency: KeywordFrequency,
}

/// Extracts keywords as the most frequent noun lemmas of a text.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    /// Stop words, stored as noun lemmas so they match lemmatized tokens.
    stop_words: HashSet<String>,
    min_word_length: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// English stop words and the default minimum length.
    pub fn new() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied(), DEFAULT_MIN_WORD_LENGTH)
    }

    /// Custom stop-word set and minimum token length.
    pub fn with_stop_words<I, S>(stop_words: I, min_word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(|w| lemmatize_noun(&w.as_ref().to_lowercase()))
            .collect();
        Self {
            stop_words,
            min_word_length,
        }
    }

    /// The shared default instance.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub fn clean_text(&self, text: &str) -> String {
        text::clean_text(text)
    }

    fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(&lemmatize_noun(token))
    }

    /// Noun lemmas in text order, stop words and short tokens removed.
    pub fn extract_nouns(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text);
        let tokens = tokenize(&cleaned);
        let tags = tag_tokens(&tokens);

        tokens
            .iter()
            .zip(tags)
            .filter(|(word, tag)| tag.is_noun() && word.len() > self.min_word_length)
            .filter_map(|(word, _)| {
                let lemma = lemmatize_noun(word);
                (!self.stop_words.contains(&lemma)).then_some(lemma)
            })
            .collect()
    }

    /// Top `top_n` noun lemmas with counts. Ties keep first-occurrence order.
    pub fn get_keyword_frequency(&self, text: &str, top_n: usize) -> KeywordFrequency {
        let mut counts: KeywordFrequency = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for noun in self.extract_nouns(text) {
            match index.get(&noun) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(noun.clone(), counts.len());
                    counts.push((noun, 1));
                }
            }
        }

        // sort_by is stable, so equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(top_n);
        counts
    }

    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        let keywords: Vec<String> = self
            .get_keyword_frequency(text, top_n)
            .into_iter()
            .map(|(word, _)| word)
            .collect();
        tracing::debug!(count = keywords.len(), top_n, "Extracted keywords");
        keywords
    }

    /// Number of non-stop-word tokens in the normalized text.
    pub fn get_word_count(&self, text: &str) -> usize {
        let cleaned = self.clean_text(text);
        tokenize(&cleaned)
            .into_iter()
            .filter(|w| !self.is_stop_word(w))
            .count()
    }

    pub fn get_sentence_count(&self, text: &str) -> usize {
        split_sentences(text).len()
    }

    pub fn get_text_stats(&self, text: &str, top_n: usize) -> TextStats {
        let keyword_frequency = self.get_keyword_frequency(text, top_n);
        TextStats {
            word_count: self.get_word_count(text),
            sentence_count: self.get_sentence_count(text),
            keywords: keyword_frequency.iter().map(|(w, _)| w.clone()).collect(),
            keyword_frequency,
        }
    }
}

/// Extract keywords with the shared default extractor.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    KeywordExtractor::shared().extract_keywords(text, top_n)
}

/// Text statistics with the shared default extractor.
pub fn get_text_stats(text: &str, top_n: usize) -> TextStats {
    KeywordExtractor::shared().get_text_stats(text, top_n)
}
