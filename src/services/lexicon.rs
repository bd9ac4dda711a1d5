//! Polarity lexicon used by the default scorer.
//!
//! Values follow the pattern/TextBlob English lexicon closely enough that
//! everyday call transcripts score the same direction and similar magnitude.

use std::collections::{HashMap, HashSet};

/// Word polarities in [-1.0, 1.0]
const POLARITY: &[(&str, f64)] = &[
    // Positive
    ("amazing", 0.6),
    ("appreciate", 0.4),
    ("appreciated", 0.4),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("cheerful", 0.6),
    ("clean", 0.37),
    ("clear", 0.1),
    ("comfortable", 0.4),
    ("convenient", 0.3),
    ("courteous", 0.5),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("efficient", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("exceptional", 0.67),
    ("fabulous", 0.4),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("fixed", 0.1),
    ("friendly", 0.38),
    ("glad", 0.5),
    ("good", 0.7),
    ("grateful", 0.6),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("honest", 0.6),
    ("impressed", 1.0),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("kind", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("lucky", 0.33),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("pleased", 0.5),
    ("polite", 0.5),
    ("positive", 0.23),
    ("professional", 0.1),
    ("prompt", 0.3),
    ("quick", 0.33),
    ("reasonable", 0.2),
    ("recommend", 0.3),
    ("reliable", 0.5),
    ("resolved", 0.3),
    ("right", 0.29),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("solved", 0.3),
    ("sorted", 0.2),
    ("superb", 1.0),
    ("supportive", 0.5),
    ("sure", 0.5),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("thankful", 0.5),
    ("useful", 0.3),
    ("valuable", 0.5),
    ("welcome", 0.8),
    ("wonderful", 1.0),
    ("wow", 0.1),
    // Negative
    ("abusive", -0.8),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("anxious", -0.25),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("careless", -0.5),
    ("complain", -0.3),
    ("complaint", -0.3),
    ("confused", -0.4),
    ("confusing", -0.3),
    ("crazy", -0.6),
    ("cancel", -0.1),
    ("damaged", -0.4),
    ("dead", -0.2),
    ("delay", -0.2),
    ("delayed", -0.2),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dirty", -0.6),
    ("disgusting", -1.0),
    ("dissatisfied", -0.5),
    ("dreadful", -0.9),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("fault", -0.3),
    ("faulty", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.4),
    ("furious", -1.0),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("impossible", -0.67),
    ("incompetent", -0.5),
    ("incorrect", -0.5),
    ("inconvenient", -0.4),
    ("late", -0.3),
    ("lost", -0.1),
    ("mad", -0.63),
    ("mess", -0.3),
    ("miserable", -1.0),
    ("missing", -0.2),
    ("negative", -0.3),
    ("nightmare", -0.7),
    ("poor", -0.4),
    ("problem", -0.2),
    ("rude", -0.6),
    ("sad", -0.5),
    ("scam", -0.8),
    ("slow", -0.3),
    ("sorry", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unacceptable", -0.6),
    ("unfortunately", -0.5),
    ("unhappy", -0.6),
    ("unhelpful", -0.5),
    ("unreliable", -0.5),
    ("upset", -0.4),
    ("useless", -0.5),
    ("waste", -0.2),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
    // Emoticons
    (":)", 0.5),
    (":-)", 0.5),
    ("=)", 0.5),
    (":d", 1.0),
    (":-d", 1.0),
    (":p", 0.3),
    (";)", 0.3),
    (":(", -0.75),
    (":-(", -0.75),
    ("=(", -0.75),
    (":|", -0.1),
];

/// Words that flip (and soften) the polarity of what follows
const NEGATIONS: &[&str] = &[
    "ain't", "aren't", "barely", "can't", "cannot", "couldn't", "didn't", "doesn't", "don't",
    "hardly", "isn't", "never", "no", "none", "nor", "not", "nothing", "wasn't", "weren't",
    "won't", "wouldn't",
];

/// Multipliers applied to the polarity of the next word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("completely", 1.4),
    ("especially", 1.3),
    ("extremely", 1.6),
    ("highly", 1.5),
    ("incredibly", 1.5),
    ("pretty", 1.1),
    ("quite", 1.1),
    ("rather", 1.05),
    ("really", 1.3),
    ("slightly", 0.5),
    ("so", 1.3),
    ("somewhat", 0.7),
    ("super", 1.5),
    ("too", 1.2),
    ("totally", 1.4),
    ("truly", 1.3),
    ("very", 1.3),
];

pub struct Lexicon {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Built-in English lexicon
    pub fn new() -> Self {
        Self {
            words: POLARITY
                .iter()
                .map(|(w, p)| (w.to_string(), *p))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
        }
    }

    pub fn polarity(&self, token: &str) -> Option<f64> {
        self.words.get(token).copied()
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }

    pub fn intensity(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_polarities_in_range() {
        for (word, polarity) in POLARITY {
            assert!(
                (-1.0..=1.0).contains(polarity),
                "{word} has polarity {polarity}"
            );
        }
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.words.len(), POLARITY.len(), "duplicate lexicon entries");
    }

    #[test]
    fn test_lookups() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.polarity("great"), Some(0.8));
        assert_eq!(lexicon.polarity("terrible"), Some(-1.0));
        assert_eq!(lexicon.polarity("table"), None);
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("don't"));
        assert_eq!(lexicon.intensity("very"), Some(1.3));
    }

    #[test]
    fn test_intensifiers_carry_no_polarity_of_their_own() {
        let lexicon = Lexicon::new();
        for (word, _) in INTENSIFIERS {
            assert_eq!(lexicon.polarity(word), None, "{word} is also a polarity word");
            assert!(!lexicon.is_negation(word), "{word} is also a negation");
        }
    }
}
