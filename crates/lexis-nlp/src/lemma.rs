//! Noun lemmatizer: maps plural noun forms to their singular dictionary form.
//!
//! Irregular plurals and invariant nouns come from a fixed table; everything
//! else goes through suffix rules, longest suffix first. Lemmatization is
//! idempotent on singular forms, which is what stop-word matching relies on.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Irregular plural → singular, plus invariant nouns mapped to themselves.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("hypotheses", "hypothesis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("pies", "pie"),
        ("ties", "tie"),
        ("lies", "lie"),
        ("news", "news"),
        ("series", "series"),
        ("species", "species"),
        ("physics", "physics"),
        ("mathematics", "mathematics"),
        ("economics", "economics"),
        ("politics", "politics"),
        ("ethics", "ethics"),
        ("athletics", "athletics"),
        ("lens", "lens"),
    ]
    .into_iter()
    .collect()
});

/// Lemmatize a lowercase token as a noun.
pub fn lemmatize_noun(word: &str) -> String {
    if let Some(&lemma) = IRREGULAR.get(word) {
        return lemma.to_string();
    }

    if word.len() <= 3 {
        return word.to_string();
    }

    // Singular forms that merely end in "s"
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    // (suffix, replacement), longer suffixes first
    let suffixes: &[(&str, &str)] = &[
        ("sses", "ss"),
        ("zzes", "zz"),
        ("ches", "ch"),
        ("shes", "sh"),
        ("xes", "x"),
        ("ies", "y"),
        ("s", ""),
    ];

    for &(suffix, replacement) in suffixes {
        if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            return format!("{}{}", stem, replacement);
        }
    }

    word.to_string()
}
