use crate::models::{SentimentLabel, SentimentResult};
use crate::services::lexicon::Lexicon;
use crate::utils::text::clauses;

/// Negated polarities are flipped and halved ("not good" is mildly negative)
const NEGATION_FACTOR: f64 = -0.5;

/// Scores text polarity in [-1.0, 1.0]. Implementations must be deterministic.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Averages lexicon polarities with negation and intensifier handling
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::new())
    }
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl LexiconScorer {
    /// Whether the hit at `i` is negated: the token right before it is a
    /// negation, or an intensifier directly preceded by one ("not very good").
    fn is_negated(&self, clause: &[String], i: usize) -> bool {
        let Some(prev) = i.checked_sub(1) else {
            return false;
        };
        if self.lexicon.is_negation(&clause[prev]) {
            return true;
        }
        self.lexicon.intensity(&clause[prev]).is_some()
            && prev
                .checked_sub(1)
                .is_some_and(|before| self.lexicon.is_negation(&clause[before]))
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut contributions = Vec::new();

        for clause in clauses(text) {
            for (i, token) in clause.iter().enumerate() {
                let Some(mut polarity) = self.lexicon.polarity(token) else {
                    continue;
                };

                if let Some(multiplier) = i
                    .checked_sub(1)
                    .and_then(|prev| self.lexicon.intensity(&clause[prev]))
                {
                    polarity = (polarity * multiplier).clamp(-1.0, 1.0);
                }

                if self.is_negated(&clause, i) {
                    polarity *= NEGATION_FACTOR;
                }

                contributions.push(polarity);
            }
        }

        if contributions.is_empty() {
            return 0.0;
        }

        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

/// Maps a polarity score to its label by sign
pub fn classify(score: f64) -> SentimentLabel {
    if score > 0.0 {
        SentimentLabel::Positive
    } else if score < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn analyze_sentiment(scorer: &dyn PolarityScorer, text: &str) -> SentimentResult {
    let score = scorer.polarity(text);
    SentimentResult {
        label: classify(score),
        score,
    }
}

/// Maps a score in [-1, 1] linearly onto a progress value in [0, 1]
pub fn normalized_progress(score: f64) -> f64 {
    ((score + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> SentimentResult {
        analyze_sentiment(&LexiconScorer::default(), text)
    }

    #[test]
    fn test_positive_text() {
        let result = analyze("I love this, it was great");
        assert!(result.score > 0.0);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_negative_text() {
        let result = analyze("This was terrible and awful");
        assert!(result.score < 0.0);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.score, -1.0);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let result = analyze("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_text_without_opinion_words_is_neutral() {
        let result = analyze("Agent: your ticket number is 4471. Customer: ok.");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_negation_flips_and_softens() {
        let result = analyze("the agent was not helpful");
        assert!((result.score - (-0.25)).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Negative);

        let result = analyze("no problem at all");
        assert!(result.score > 0.0);
    }

    #[test]
    fn test_negation_stays_inside_its_clause() {
        assert_eq!(analyze("No. It was great.").label, SentimentLabel::Positive);
        assert_eq!(analyze("No, it was great").label, SentimentLabel::Positive);
        assert!((analyze("No, it was great").score - 0.8).abs() < 1e-9);
        assert!((analyze("It was not great").score - (-0.4)).abs() < 1e-9);
        assert_eq!(analyze("not very good").label, SentimentLabel::Negative);
        // Only the word right before the hit negates it
        assert_eq!(analyze("never had a good call").label, SentimentLabel::Positive);
    }

    #[test]
    fn test_speaker_tags_are_not_emoticons() {
        for text in [
            "Agent:Did you receive the invoice?",
            "Customer:Please check order 42",
            "Status:pending",
        ] {
            let result = analyze(text);
            assert_eq!(result.score, 0.0, "{text}");
            assert_eq!(result.label, SentimentLabel::Neutral, "{text}");
        }
        assert_eq!(analyze("thanks :D").label, SentimentLabel::Positive);
    }

    #[test]
    fn test_transcript_lines() {
        let cases = [
            (
                "Agent: Thank you for calling, how can I help?\nCustomer: My order arrived damaged.",
                SentimentLabel::Negative,
            ),
            (
                "Agent:Did you receive the invoice?\nCustomer:Yes. Order 42, ref 7781.",
                SentimentLabel::Neutral,
            ),
            (
                "Customer: No, that's fine. The agent was really helpful, thanks!",
                SentimentLabel::Positive,
            ),
            (
                "Customer: I've called three times and nobody fixed it. This is unacceptable.\n\
                 Agent: I'm sorry about the delay.",
                SentimentLabel::Negative,
            ),
            (
                "Agent: Is everything working now?\nCustomer: Not bad at all, great support :)",
                SentimentLabel::Positive,
            ),
            (
                "Customer: It wasn't helpful. Agent: Understood, I'll escalate it.",
                SentimentLabel::Negative,
            ),
        ];

        for (text, expected) in cases {
            assert_eq!(analyze(text).label, expected, "{text}");
        }
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        let plain = analyze("good service").score;
        let boosted = analyze("very good service").score;
        assert!(boosted > plain);
        assert_eq!(analyze("extremely terrible").score, -1.0);
    }

    #[test]
    fn test_emoticons_count() {
        assert_eq!(analyze("thanks :)").label, SentimentLabel::Positive);
        assert_eq!(analyze("still waiting :(").label, SentimentLabel::Negative);
    }

    #[test]
    fn test_label_matches_sign_of_score() {
        let samples = [
            "",
            "fine",
            "not fine",
            "the refund was late and the agent was rude",
            "great great great terrible",
            "sorry for the delay, thanks for your patience",
            "absolutely perfect support :D",
            "12345",
        ];
        for text in samples {
            let result = analyze(text);
            assert!((-1.0..=1.0).contains(&result.score), "{text}");
            assert_eq!(result.label, classify(result.score), "{text}");
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let text = "The first agent was rude but the second one was really helpful.";
        assert_eq!(analyze(text), analyze(text));
    }

    #[test]
    fn test_normalized_progress_bounds_and_monotonicity() {
        assert_eq!(normalized_progress(-1.0), 0.0);
        assert_eq!(normalized_progress(0.0), 0.5);
        assert_eq!(normalized_progress(1.0), 1.0);

        let mut previous = normalized_progress(-1.0);
        for step in 1..=200 {
            let score = -1.0 + step as f64 * 0.01;
            let progress = normalized_progress(score);
            assert!(progress >= previous);
            assert!((0.0..=1.0).contains(&progress));
            previous = progress;
        }
    }
}
