//! Per-message sentiment.
//!
//! A lexicon and rule scorer: each word carries a valence between -4 and
//! 4, adjusted by nearby negations and intensifiers, shouting and
//! exclamation marks. The sum is squashed into a compound score in
//! `[-1, 1]` and labelled with the configured thresholds.
//!
//! ```
//! use chatlens::analysis::sentiment::{SentimentAnalyzer, SentimentLabel};
//!
//! let analyzer = SentimentAnalyzer::default();
//! assert_eq!(analyzer.label("I love this, great job!"), SentimentLabel::Positive);
//! assert_eq!(analyzer.label("this is not good"), SentimentLabel::Negative);
//! assert_eq!(analyzer.label("meeting at five"), SentimentLabel::Neutral);
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::emoji::extract_emojis;
use crate::config::AnalysisConfig;
use crate::core::filter::TableView;

const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 3;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Word valences.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("brilliant", 2.8),
    ("perfect", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("nice", 1.8),
    ("cool", 1.3),
    ("fine", 0.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("happy", 2.7),
    ("glad", 2.0),
    ("joy", 2.8),
    ("fun", 2.3),
    ("funny", 1.9),
    ("haha", 2.0),
    ("hahaha", 2.2),
    ("lol", 1.8),
    ("lmao", 2.0),
    ("yay", 2.4),
    ("yes", 1.7),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("thx", 1.5),
    ("welcome", 2.0),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("beautiful", 2.9),
    ("pretty", 2.2),
    ("cute", 2.0),
    ("sweet", 2.0),
    ("kind", 2.4),
    ("proud", 2.1),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("win", 2.8),
    ("won", 2.7),
    ("success", 2.7),
    ("successful", 2.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("hope", 1.9),
    ("wow", 2.8),
    ("safe", 1.9),
    ("smart", 1.7),
    ("agree", 1.5),
    ("care", 2.2),
    ("blessed", 2.9),
    ("grateful", 2.0),
    ("pleased", 1.9),
    ("delighted", 2.8),
    ("superb", 3.1),
    ("wonderfully", 2.9),
    ("incredible", 2.8),
    ("lucky", 1.9),
    ("relaxed", 2.2),
    ("calm", 1.3),
    ("healthy", 1.7),
    ("laugh", 2.6),
    ("smile", 1.5),
    ("friend", 2.2),
    ("friends", 2.1),
    ("party", 1.7),
    ("celebrate", 2.7),
    ("favorite", 2.0),
    ("favourite", 2.0),
    ("recommend", 1.5),
    ("helpful", 1.9),
    ("ready", 1.5),
    ("free", 1.7),
    ("win-win", 2.5),
    // negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("poor", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("dislike", -1.6),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("cry", -2.1),
    ("crying", -2.1),
    ("angry", -2.3),
    ("mad", -2.2),
    ("upset", -1.6),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("boring", -1.3),
    ("bored", -1.1),
    ("tired", -1.9),
    ("sick", -2.3),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("sorry", -0.3),
    ("wrong", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("lost", -1.3),
    ("lose", -1.7),
    ("stupid", -2.4),
    ("idiot", -2.3),
    ("ugly", -2.3),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("worried", -1.2),
    ("worry", -1.9),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("fear", -2.2),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("useless", -1.8),
    ("broken", -1.6),
    ("damn", -1.7),
    ("shit", -2.6),
    ("crap", -1.6),
    ("sucks", -1.5),
    ("no", -1.2),
    ("kill", -3.7),
    ("dead", -3.3),
    ("die", -2.9),
    ("died", -2.6),
    ("death", -2.9),
    ("miserable", -2.2),
    ("lonely", -1.5),
    ("depressed", -2.3),
    ("furious", -2.7),
    ("disgusting", -2.4),
    ("rude", -2.0),
    ("late", -0.4),
    ("trouble", -1.7),
    ("difficult", -1.5),
    ("hard", -0.4),
    ("ugh", -1.8),
];

/// Emoji valences.
const EMOJI_LEXICON: &[(&str, f64)] = &[
    ("😂", 1.8),
    ("🤣", 1.9),
    ("😀", 2.1),
    ("😃", 2.1),
    ("😄", 2.2),
    ("😁", 2.0),
    ("😊", 2.2),
    ("🙂", 1.2),
    ("😍", 2.8),
    ("🥰", 2.8),
    ("😘", 2.3),
    ("❤", 2.9),
    ("💕", 2.6),
    ("💖", 2.6),
    ("👍", 1.8),
    ("👏", 2.0),
    ("🙏", 1.5),
    ("🎉", 2.5),
    ("🥳", 2.5),
    ("🔥", 1.5),
    ("💯", 2.0),
    ("😎", 1.7),
    ("😉", 1.4),
    ("😢", -2.1),
    ("😭", -1.8),
    ("😞", -2.1),
    ("😔", -1.8),
    ("😟", -1.7),
    ("😠", -2.4),
    ("😡", -2.8),
    ("🤬", -3.0),
    ("💔", -2.6),
    ("👎", -1.8),
    ("😒", -1.5),
    ("🙄", -1.0),
    ("😩", -1.8),
    ("😫", -1.8),
    ("🤮", -2.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "nowhere", "neither", "nor", "cannot",
    "cant", "can't", "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't",
    "wasnt", "wasn't", "wont", "won't", "wouldnt", "wouldn't", "shouldnt", "shouldn't", "aint",
    "ain't", "without",
];

/// Intensifiers (positive) and dampeners (negative).
const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("absolutely", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("too", BOOSTER_INCREMENT),
    ("most", BOOSTER_INCREMENT),
    ("quite", BOOSTER_INCREMENT),
    ("bahut", BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("hardly", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
    ("little", -BOOSTER_INCREMENT),
    ("marginally", -BOOSTER_INCREMENT),
];

/// Sentiment class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Scores message text.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    emojis: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    positive_threshold: f64,
    negative_threshold: f64,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl SentimentAnalyzer {
    /// Creates an analyzer with the configured label thresholds.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            emojis: EMOJI_LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            positive_threshold: config.sentiment_positive_threshold,
            negative_threshold: config.sentiment_negative_threshold,
        }
    }

    /// Compound score in `[-1, 1]`; 0 for text without scored words.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let words: Vec<String> = tokens.iter().map(|t| normalize(t)).collect();
        let shouting = is_mixed_case(&tokens);

        let mut sum = 0.0;
        for (i, word) in words.iter().enumerate() {
            if self.boosters.contains_key(word.as_str()) {
                continue;
            }
            let Some(&base) = self.lexicon.get(word.as_str()) else {
                continue;
            };
            // "no" only counts as a word on its own; otherwise it negates
            if word == "no" && words.get(i + 1).is_some_and(|w| self.lexicon.contains_key(w.as_str())) {
                continue;
            }

            let mut valence = base;
            if shouting && is_all_caps(tokens[i]) {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            for distance in 1..=3 {
                let Some(prev) = i.checked_sub(distance).map(|j| words[j].as_str()) else {
                    break;
                };
                if let Some(&boost) = self.boosters.get(prev) {
                    let decay = match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += boost * valence.signum() * decay;
                }
                if NEGATIONS.contains(&prev) {
                    valence *= NEGATION_SCALAR;
                    break;
                }
            }

            sum += valence;
        }

        for emoji in extract_emojis(text) {
            if let Some(&valence) = self.emojis.get(emoji) {
                sum += valence;
            }
        }

        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS);
            sum += (bangs as f64 * EXCLAMATION_INCREMENT).copysign(sum);
        }

        normalize_score(sum)
    }

    /// Labels a compound score.
    pub fn classify(&self, compound: f64) -> SentimentLabel {
        if compound >= self.positive_threshold {
            SentimentLabel::Positive
        } else if compound <= self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Scores and labels text.
    pub fn label(&self, text: &str) -> SentimentLabel {
        self.classify(self.compound(text))
    }
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .to_lowercase()
}

fn normalize_score(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

fn is_all_caps(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// Some but not all words are shouted.
fn is_mixed_case(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Score and label of one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRow {
    pub sender: String,
    pub timestamp: NaiveDateTime,
    pub body: String,
    pub compound: f64,
    pub label: SentimentLabel,
}

/// How many messages got each label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Per-message sentiment table with its label summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentReport {
    pub rows: Vec<SentimentRow>,
    pub counts: SentimentCounts,
}

impl SentimentReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Scores every message of the view.
///
/// Notifications and empty bodies are neutral with a score of 0.
pub fn sentiment_analysis(view: &TableView<'_>, analyzer: &SentimentAnalyzer) -> SentimentReport {
    let mut report = SentimentReport::default();

    for record in view.iter() {
        let compound = if record.is_notification() || record.body.trim().is_empty() {
            0.0
        } else {
            analyzer.compound(&record.body)
        };
        let label = if compound == 0.0 {
            SentimentLabel::Neutral
        } else {
            analyzer.classify(compound)
        };

        report.counts.add(label);
        report.rows.push(SentimentRow {
            sender: record.sender.clone(),
            timestamp: record.timestamp,
            body: record.body.clone(),
            compound,
            label,
        });
    }

    report
}
