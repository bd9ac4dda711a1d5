use regex::Regex;
use std::sync::LazyLock;

/// Letters and digits, with inner apostrophes kept ("isn't", "customer's")
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*").expect("word regex is valid")
});

/// A whole whitespace-delimited chunk that is a common ASCII emoticon
static EMOTICON_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[:;=][-']?[()\[\]dDpP|]$").expect("emoticon regex is valid")
});

/// Punctuation that ends a clause or follows a speaker tag
const CLAUSE_BREAKS: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Words never drawn in a word cloud
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd",
    "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Lowercased tokens of `text` grouped by clause, in reading order.
///
/// Emoticons only count when they stand alone between whitespace, so speaker
/// tags such as `Agent:Did` yield `agent` and `did`. Curly apostrophes are
/// folded to `'`.
pub fn clauses(text: &str) -> Vec<Vec<String>> {
    let mut clauses = Vec::new();
    let mut current = Vec::new();

    for chunk in text.split_whitespace() {
        if EMOTICON_REGEX.is_match(chunk) {
            current.push(chunk.to_lowercase());
            continue;
        }

        let mut last = 0;
        for word in WORD_REGEX.find_iter(chunk) {
            if chunk[last..word.start()].contains(CLAUSE_BREAKS) {
                end_clause(&mut clauses, &mut current);
            }
            current.push(word.as_str().replace('’', "'").to_lowercase());
            last = word.end();
        }
        if chunk[last..].contains(CLAUSE_BREAKS) {
            end_clause(&mut clauses, &mut current);
        }
    }

    end_clause(&mut clauses, &mut current);
    clauses
}

fn end_clause(clauses: &mut Vec<Vec<String>>, current: &mut Vec<String>) {
    if !current.is_empty() {
        clauses.push(std::mem::take(current));
    }
}

/// Lowercased tokens of `text` with clause boundaries dropped
pub fn tokenize(text: &str) -> Vec<String> {
    clauses(text).into_iter().flatten().collect()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// True for tokens made of letters or digits, false for emoticons
pub fn is_word(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphanumeric)
}

/// Escapes text for use inside HTML or SVG content and attribute values
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            tokenize("I love this, it was GREAT!"),
            vec!["i", "love", "this", "it", "was", "great"]
        );
    }

    #[test]
    fn test_tokenize_keeps_contractions_and_emoticons() {
        assert_eq!(
            tokenize("Don’t worry :) it isn't bad :("),
            vec!["don't", "worry", ":)", "it", "isn't", "bad", ":("]
        );
    }

    #[test]
    fn test_emoticons_need_whitespace_around_them() {
        assert_eq!(
            tokenize("Agent:Did you get it? Status:pending"),
            vec!["agent", "did", "you", "get", "it", "status", "pending"]
        );
        assert_eq!(tokenize("thanks :D"), vec!["thanks", ":d"]);
        assert_eq!(tokenize("ok;p"), vec!["ok", "p"]);
    }

    #[test]
    fn test_clauses_split_on_punctuation_and_speaker_tags() {
        assert_eq!(
            clauses("No. It was great, thanks!"),
            vec![vec!["no"], vec!["it", "was", "great"], vec!["thanks"]]
        );
        assert_eq!(
            clauses("Agent:Hello Customer: hi :) bye"),
            vec![vec!["agent"], vec!["hello", "customer"], vec!["hi", ":)", "bye"]]
        );
        assert_eq!(clauses("v1.2"), vec![vec!["v1"], vec!["2"]]);
        assert!(clauses("... ,,, !").is_empty());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_stopwords_sorted_for_binary_search() {
        let mut sorted = STOPWORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOPWORDS);
        assert!(is_stopword("the"));
        assert!(is_stopword("wouldn't"));
        assert!(!is_stopword("refund"));
    }

    #[test]
    fn test_is_word() {
        assert!(is_word("refund"));
        assert!(is_word("42"));
        assert!(!is_word(":)"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_markup("plain text"), "plain text");
    }
}
