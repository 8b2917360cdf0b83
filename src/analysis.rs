//! Word and sentence statistics over subtitle text.
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());

pub const DEFAULT_TOP_WORDS: usize = 50;

#[rustfmt::skip]
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what", "which", "this", "that",
    "these", "those", "then", "just", "so", "than", "such", "both", "through", "about", "for",
    "is", "of", "while", "during", "to", "from", "in", "out", "on", "off", "over", "under",
    "again", "once", "here", "there", "when", "where", "why", "how", "all", "any", "each", "few",
    "more", "most", "other", "some", "no", "nor", "not", "only", "own", "same", "too", "very",
    "s", "t", "can", "will", "don", "should", "now", "i", "me", "my", "myself", "we", "our",
    "ours", "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "am", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "would", "could", "ought", "im", "youre",
    "hes", "shes", "theyre", "ive", "youve", "weve", "theyve", "id", "youd", "hed", "shed",
    "wed", "theyd", "isnt", "arent", "wasnt", "werent", "hasnt", "havent", "hadnt", "doesnt",
    "dont", "didnt",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub total_words: usize,
    pub unique_words: usize,
    pub total_sentences: usize,
    pub word_frequencies: BTreeMap<String, usize>,
    pub top_words: Vec<WordCount>,
    pub sentences: Vec<String>,
}

impl Analysis {
    pub fn average_words_per_sentence(&self) -> f64 {
        if self.total_sentences == 0 {
            return 0.0;
        }
        self.total_words as f64 / self.total_sentences as f64
    }

    /// Characters of the counted words (stopwords excluded unless included in the
    /// count) divided by `total_words`, which always includes stopwords.
    pub fn average_word_length(&self) -> f64 {
        if self.total_words == 0 {
            return 0.0;
        }
        let chars: usize = self
            .word_frequencies
            .iter()
            .map(|(word, count)| word.chars().count() * count)
            .sum();
        chars as f64 / self.total_words as f64
    }
}

pub struct Analyzer {
    stopwords: HashSet<&'static str>,
    include_stopwords: bool,
    top: usize,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            include_stopwords: false,
            top: DEFAULT_TOP_WORDS,
        }
    }

    pub fn include_stopwords(mut self, include: bool) -> Self {
        self.include_stopwords = include;
        self
    }

    pub fn top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        let words = tokenize_words(text);
        let sentences = tokenize_sentences(text);

        let counted = words
            .iter()
            .filter(|w| self.include_stopwords || !self.is_stopword(w));
        let ranked = rank(counted);

        Analysis {
            total_words: words.len(),
            unique_words: ranked.len(),
            total_sentences: sentences.len(),
            word_frequencies: ranked.iter().map(|wc| (wc.word.clone(), wc.count)).collect(),
            top_words: ranked.into_iter().take(self.top).collect(),
            sentences,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased word tokens, without purely numeric ones.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !w.chars().all(|c| c.is_numeric()))
        .map(String::from)
        .collect()
}

pub fn tokenize_sentences(text: &str) -> Vec<String> {
    SENTENCE_END
        .split(text.trim())
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .collect()
}

// Most common first; equal counts keep the order words first appeared in.
fn rank<'a, I: Iterator<Item = &'a String>>(words: I) -> Vec<WordCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();
    for word in words {
        match positions.get(word.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(word.as_str(), counts.len());
                counts.push(WordCount {
                    word: word.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by_key(|wc| Reverse(wc.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_words() {
        assert_eq!(
            tokenize_words("Hello, WORLD! It's 2024 and R2D2 is here."),
            vec!["hello", "world", "it", "s", "and", "r2d2", "is", "here"]
        );
        assert!(tokenize_words("").is_empty());
        assert_eq!(tokenize_words("Ünïcode wörds"), vec!["ünïcode", "wörds"]);
    }

    #[test]
    fn tokenizes_sentences() {
        assert_eq!(
            tokenize_sentences("Hi there. How are you?! Fine... thanks"),
            vec!["Hi there", "How are you", "Fine", "thanks"]
        );
        assert_eq!(tokenize_sentences("Trailing stop."), vec!["Trailing stop."]);
        assert!(tokenize_sentences("   ").is_empty());
    }

    #[test]
    fn counts_without_stopwords() {
        let analysis = Analyzer::new().analyze("The cat saw the dog. The dog ran away! A cat sat.");
        assert_eq!(analysis.total_words, 12);
        assert_eq!(analysis.total_sentences, 3);
        assert_eq!(analysis.unique_words, 6);
        assert_eq!(analysis.word_frequencies.get("the"), None);
        assert_eq!(analysis.word_frequencies["cat"], 2);
        assert_eq!(analysis.word_frequencies["dog"], 2);
        assert_eq!(
            analysis.top_words,
            vec![
                WordCount { word: "cat".into(), count: 2 },
                WordCount { word: "dog".into(), count: 2 },
                WordCount { word: "saw".into(), count: 1 },
                WordCount { word: "ran".into(), count: 1 },
                WordCount { word: "away".into(), count: 1 },
                WordCount { word: "sat".into(), count: 1 },
            ]
        );
        assert_eq!(analysis.average_words_per_sentence(), 4.0);
    }

    #[test]
    fn counts_with_stopwords() {
        let analysis = Analyzer::new()
            .include_stopwords(true)
            .top(1)
            .analyze("The cat saw the dog. The dog ran!");
        assert_eq!(analysis.unique_words, 5);
        assert_eq!(analysis.word_frequencies["the"], 3);
        assert_eq!(analysis.top_words, vec![WordCount { word: "the".into(), count: 3 }]);
    }

    #[test]
    fn empty_text() {
        let analysis = Analyzer::new().analyze("");
        assert_eq!(analysis.total_words, 0);
        assert_eq!(analysis.unique_words, 0);
        assert_eq!(analysis.total_sentences, 0);
        assert!(analysis.top_words.is_empty());
        assert_eq!(analysis.average_words_per_sentence(), 0.0);
        assert_eq!(analysis.average_word_length(), 0.0);
    }

    #[test]
    fn average_word_length() {
        let analysis = Analyzer::new().include_stopwords(true).analyze("ab abcd");
        assert_eq!(analysis.average_word_length(), 3.0);

        // "the" is not counted but still divides.
        let analysis = Analyzer::new().analyze("The cat ran");
        assert_eq!(analysis.total_words, 3);
        assert_eq!(analysis.average_word_length(), 2.0);
    }

    #[test]
    fn knows_stopwords() {
        let analyzer = Analyzer::new();
        assert!(analyzer.is_stopword("the"));
        assert!(analyzer.is_stopword("dont"));
        assert!(!analyzer.is_stopword("movie"));
    }
}
