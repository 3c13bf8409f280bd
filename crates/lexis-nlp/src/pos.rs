//! Rule-based part-of-speech tagger for normalized (lowercase) tokens.
//!
//! Tags come from, in order: a closed-class lexicon (determiners, pronouns,
//! prepositions, ...), an open-class lexicon of common verbs, adjectives and
//! adverbs, suffix rules, and finally left/right context. Unknown words are
//! nouns, which is also what statistical taggers fall back to.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    PluralNoun,
    Verb,
    Gerund,
    PastVerb,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Modal,
    Number,
    /// Infinitival "to".
    Particle,
}

impl PosTag {
    /// Whether the tag denotes a noun category.
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::PluralNoun)
    }

    /// Tags after which a following word is read as a nominal head.
    fn introduces_noun(self) -> bool {
        matches!(self, PosTag::Determiner | PosTag::Adjective | PosTag::Number)
    }
}

/// Closed-class and high-frequency words with a fixed tag.
static LEXICON: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let groups: &[(PosTag, &[&str])] = &[
        (PosTag::Determiner, &[
            "the", "a", "an", "this", "that", "these", "those", "each", "every", "some",
            "any", "no", "all", "both", "either", "neither", "another", "such", "what",
            "which", "whose", "my", "your", "his", "her", "its", "our", "their",
        ]),
        (PosTag::Pronoun, &[
            "i", "me", "mine", "myself", "we", "us", "ours", "ourselves", "you", "yours",
            "yourself", "yourselves", "he", "him", "himself", "she", "hers", "herself",
            "it", "itself", "they", "them", "theirs", "themselves", "who", "whom",
            "someone", "something", "anyone", "anything", "everyone", "everything",
            "nobody", "nothing", "one",
        ]),
        (PosTag::Preposition, &[
            "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
            "into", "through", "during", "before", "after", "above", "below", "from",
            "up", "down", "out", "off", "over", "under", "across", "along", "among",
            "around", "behind", "beside", "beyond", "near", "since", "toward", "towards",
            "upon", "within", "without", "via", "per", "than", "like",
        ]),
        (PosTag::Conjunction, &[
            "and", "but", "or", "nor", "so", "yet", "because", "although", "though",
            "while", "if", "unless", "until", "whereas", "whether", "as", "when",
            "where", "why", "how",
        ]),
        (PosTag::Modal, &[
            "can", "could", "may", "might", "must", "shall", "should", "will", "would",
        ]),
        (PosTag::Particle, &["to"]),
        (PosTag::Adverb, &[
            "not", "very", "also", "just", "only", "often", "always", "never",
            "sometimes", "now", "then", "here", "there", "again", "further", "once",
            "too", "quite", "rather", "really", "already", "still", "soon", "however",
            "therefore", "thus", "well", "even", "almost", "perhaps", "instead",
            "together", "away", "back", "ever", "yes",
        ]),
        (PosTag::Verb, &[
            "be", "is", "are", "am", "been", "being", "have", "has", "having", "do",
            "does", "doing", "get", "gets", "make", "makes", "take", "takes", "go",
            "goes", "come", "comes", "say", "says", "see", "sees", "know", "knows",
            "think", "thinks", "give", "gives", "tell", "tells", "become", "becomes",
            "seem", "seems", "leave", "leaves", "feel", "feels", "keep", "keeps",
            "begin", "begins", "bring", "brings", "want", "wants", "provide",
            "provides", "include", "includes", "allow", "allows", "create", "creates",
            "remain", "remains", "enable", "enables", "require", "requires", "offer",
            "offers", "explain", "explains", "describe", "describes", "discuss",
            "discusses", "contain", "contains", "consider", "considers", "believe",
            "believes", "suggest", "suggests", "become", "let", "lets", "put", "puts",
            "mean", "means", "like", "likes", "love", "loves", "hate", "hates",
            "improve", "improves", "reduce", "reduces", "increase", "increases",
        ]),
        (PosTag::PastVerb, &[
            "was", "were", "had", "did", "said", "made", "went", "took", "came", "saw",
            "knew", "got", "gave", "found", "thought", "told", "became", "left", "felt",
            "kept", "began", "brought", "held", "stood", "heard", "meant", "met", "ran",
            "paid", "sat", "spoke", "led", "grew", "lost", "fell", "sent", "built",
            "understood", "drew", "broke", "spent", "rose", "drove", "bought", "wore",
            "chose", "caught", "fought", "taught", "sold", "won", "ate", "wrote", "sang",
            "flew", "threw", "hung", "hid", "shook", "used", "done", "gone", "seen", "known",
            "taken", "given", "written", "begun", "chosen", "spoken", "broken", "eaten",
        ]),
        (PosTag::Adjective, &[
            "new", "good", "great", "important", "large", "small", "big", "high", "low",
            "different", "same", "other", "many", "much", "few", "more", "most", "less",
            "least", "long", "short", "early", "late", "young", "old", "major", "main",
            "best", "better", "worse", "worst", "key", "significant", "modern", "recent",
            "several", "various", "common", "possible", "able", "free", "full", "whole",
            "public", "local", "social", "human", "real", "strong", "clear", "simple",
            "open", "certain", "difficult", "easy", "hard", "available", "global",
            "happy", "sad", "bad", "own", "fast", "slow", "quick", "brown", "red",
            "blue", "green", "black", "white", "first", "last", "next", "little",
            "huge", "tiny", "nice", "poor", "rich", "safe", "true", "false", "wide",
            "deep", "complex", "positive", "negative", "neutral", "entire", "overall",
        ]),
    ];
    for (tag, words) in groups {
        for w in *words {
            m.insert(*w, *tag);
        }
    }
    m
});

/// Words whose surface suffix would mislead the suffix rules.
static NOUN_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "family", "supply", "assembly", "reply", "italy", "july", "anomaly",
        "monopoly", "butterfly", "ally", "rally", "belly", "jelly", "bully",
        "thing", "things", "king", "kings", "ring", "rings", "spring", "string",
        "strings", "morning", "evening", "ceiling", "wing", "wings", "sibling",
        "siblings", "building", "buildings", "meeting", "meetings", "feeling",
        "feelings", "painting", "paintings", "wedding", "pudding", "need", "seed",
        "speed", "bed", "shed", "feed", "breed", "greed", "creed", "reed",
        "company", "economy", "army", "enemy", "academy", "anatomy", "body", "study",
        "lady", "baby", "candy", "remedy", "comedy", "tragedy", "melody", "subsidy",
        "colony", "harmony", "ceremony", "agony", "party", "copy", "penny", "puppy",
        "hobby", "lobby", "pony", "duty", "beauty", "animal", "signal", "journal",
        "hospital", "capital", "proposal", "arrival", "approval", "festival",
        "terminal", "portal", "manual", "material", "interval", "crystal", "scandal",
        "mammal", "removal", "survival", "renewal", "referral", "denial", "serial",
        "editorial", "tutorial", "memorial", "rental", "disposal", "withdrawal",
        "cathedral", "carnival", "sandal", "spiral", "arsenal", "tribunal", "recital",
        "refusal", "dismissal", "rehearsal", "appraisal", "metal", "rival", "trial",
        "canal", "medal", "petal", "pedal",
    ]
    .into_iter()
    .collect()
});

/// Tag a slice of normalized tokens. Output is aligned with the input.
pub fn tag_tokens(tokens: &[&str]) -> Vec<PosTag> {
    let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());

    for (i, &word) in tokens.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| (tokens[j], tags[j]));
        let next = tokens.get(i + 1).copied();
        tags.push(tag_word(word, prev, next));
    }

    tags
}

fn tag_word(word: &str, prev: Option<(&str, PosTag)>, next: Option<&str>) -> PosTag {
    let prev_tag = prev.map(|(_, t)| t);

    if let Some(&tag) = LEXICON.get(word) {
        return apply_lexicon_context(tag, prev_tag);
    }

    if word.bytes().all(|b| b.is_ascii_digit()) {
        return PosTag::Number;
    }

    if NOUN_EXCEPTIONS.contains(word) {
        return if word.ends_with('s') && !word.ends_with("ss") {
            PosTag::PluralNoun
        } else {
            PosTag::Noun
        };
    }

    // After a modal the next open-class word is a base verb
    if matches!(prev_tag, Some(PosTag::Modal)) {
        return PosTag::Verb;
    }

    let len = word.len();

    if len > 4 && word.ends_with("ly") {
        return PosTag::Adverb;
    }

    if len > 5 && word.ends_with("ing") {
        let nominal = prev_tag.is_some_and(|t| t.introduces_noun() || t.is_noun())
            || prev.is_some_and(|(w, _)| w == "of");
        return if nominal { PosTag::Noun } else { PosTag::Gerund };
    }

    if len > 4 && word.ends_with("ed") {
        return if prev_tag.is_some_and(PosTag::introduces_noun) {
            PosTag::Adjective
        } else {
            PosTag::PastVerb
        };
    }

    const ADJECTIVE_SUFFIXES: &[&str] = &[
        "ous", "ful", "ive", "able", "ible", "al", "less", "ish",
    ];
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Adjective;
    }

    if len > 4 && (word.ends_with("ize") || word.ends_with("ify")) {
        return PosTag::Verb;
    }

    // "the lazy dog": consonant + y between a noun introducer and a nominal head
    if len > 3
        && is_adjectival_y(word)
        && prev_tag.is_some_and(PosTag::introduces_noun)
        && next.is_some_and(looks_nominal)
    {
        return PosTag::Adjective;
    }

    let singular_s = word.ends_with("ss") || word.ends_with("us") || word.ends_with("is");
    if len > 3 && word.ends_with('s') && !singular_s {
        // Third-person verb after a subject pronoun, or after a noun and before
        // its object or a modifier ("the fox jumps over")
        let verbal = matches!(prev_tag, Some(PosTag::Pronoun))
            || (prev_tag.is_some_and(PosTag::is_noun)
                && next.and_then(lookahead_tag).is_some_and(|t| {
                    matches!(
                        t,
                        PosTag::Determiner
                            | PosTag::Pronoun
                            | PosTag::Preposition
                            | PosTag::Adverb
                            | PosTag::Particle
                    )
                }));
        return if verbal { PosTag::Verb } else { PosTag::PluralNoun };
    }

    PosTag::Noun
}

/// Consonant + "y", minus the endings that are almost always nouns
/// (-ity, -ety, -ry, -gy, -cy, -phy).
fn is_adjectival_y(word: &str) -> bool {
    const NOMINAL_Y: &[&str] = &["ity", "ety", "ry", "gy", "cy", "phy"];
    let bytes = word.as_bytes();
    bytes.len() >= 2
        && bytes[bytes.len() - 1] == b'y'
        && !matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
        && !NOMINAL_Y.iter().any(|s| word.ends_with(s))
}

/// Tag of a not-yet-tagged right neighbour, where it can be told without context.
fn lookahead_tag(word: &str) -> Option<PosTag> {
    if let Some(&tag) = LEXICON.get(word) {
        return Some(tag);
    }
    if word.len() > 4 && word.ends_with("ly") && !NOUN_EXCEPTIONS.contains(word) {
        return Some(PosTag::Adverb);
    }
    None
}

/// Open-class word with no verbal or adverbial ending.
fn looks_nominal(word: &str) -> bool {
    !LEXICON.contains_key(word)
        && !word.bytes().all(|b| b.is_ascii_digit())
        && !["ly", "ed", "ing"].iter().any(|s| word.ends_with(s))
}

/// Lexicon verbs read as nouns after a determiner or adjective ("the use", "a need").
fn apply_lexicon_context(tag: PosTag, prev_tag: Option<PosTag>) -> PosTag {
    match tag {
        PosTag::Verb if prev_tag.is_some_and(PosTag::introduces_noun) => PosTag::Noun,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(s: &str) -> Vec<PosTag> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        tag_tokens(&tokens)
    }

    #[test]
    fn test_closed_class() {
        assert_eq!(
            tags("the dog and a cat"),
            vec![
                PosTag::Determiner,
                PosTag::Noun,
                PosTag::Conjunction,
                PosTag::Determiner,
                PosTag::Noun
            ]
        );
    }

    #[test]
    fn test_suffix_rules() {
        let t = tags("she quickly finished the beautiful paintings");
        assert_eq!(t[1], PosTag::Adverb);
        assert_eq!(t[2], PosTag::PastVerb);
        assert_eq!(t[4], PosTag::Adjective);
        assert_eq!(t[5], PosTag::PluralNoun);
    }

    #[test]
    fn test_context_rules() {
        // gerund vs noun
        assert_eq!(tags("machine learning")[1], PosTag::Noun);
        assert_eq!(tags("they are running")[2], PosTag::Gerund);
        // modal forces a verb
        assert_eq!(tags("we should schedule")[2], PosTag::Verb);
        // third-person verb after pronoun
        assert_eq!(tags("it handles")[1], PosTag::Verb);
        assert_eq!(tags("the server handles the requests")[2], PosTag::Verb);
        assert_eq!(tags("many requests")[1], PosTag::PluralNoun);
        // lexicon verb used as a noun
        assert_eq!(tags("the need")[1], PosTag::Noun);
    }

    #[test]
    fn test_adjective_suffixes() {
        let t = tags("artificial intelligence");
        assert_eq!(t, vec![PosTag::Adjective, PosTag::Noun]);
        assert_eq!(tags("a national park")[1], PosTag::Adjective);
        // listed nouns keep their reading
        assert_eq!(tags("the animal")[1], PosTag::Noun);
        assert_eq!(tags("the hospital")[1], PosTag::Noun);
    }

    #[test]
    fn test_y_adjective_before_noun() {
        assert_eq!(tags("the lazy dog")[1], PosTag::Adjective);
        assert_eq!(tags("a noisy room")[1], PosTag::Adjective);
        // no nominal head to the right
        assert_eq!(tags("the lazy")[1], PosTag::Noun);
        assert_eq!(tags("the messy ended")[1], PosTag::Noun);
        // nominal endings and listed nouns stay nouns
        assert_eq!(tags("the technology sector")[1], PosTag::Noun);
        assert_eq!(tags("the company plans")[1], PosTag::Noun);
    }

    #[test]
    fn test_third_person_before_modifier() {
        let t = tags("the quick brown fox jumps over the lazy dog");
        assert_eq!(t[3], PosTag::Noun);
        assert_eq!(t[4], PosTag::Verb);
        assert_eq!(t[5], PosTag::Preposition);
        assert_eq!(t[7], PosTag::Adjective);
        assert_eq!(t[8], PosTag::Noun);

        assert_eq!(tags("the cat sleeps soundly")[2], PosTag::Verb);
        assert_eq!(tags("the dog tries to eat")[2], PosTag::Verb);
        // plural subject before a verb
        assert_eq!(tags("machine learning algorithms are")[2], PosTag::PluralNoun);
    }

    #[test]
    fn test_numbers_and_empty() {
        assert_eq!(tags("2024"), vec![PosTag::Number]);
        assert!(tag_tokens(&[]).is_empty());
    }
}
