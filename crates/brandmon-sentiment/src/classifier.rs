use brandmon_core::Sentiment;

/// Full positive vocabulary, used by the site-scoped search path.
const FULL_POSITIVE: &[&str] = &[
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "perfect",
    "love",
    "like",
    "good",
    "best",
    "awesome",
    "brilliant",
    "outstanding",
    "positive",
    "happy",
    "pleased",
    "satisfied",
    "impressive",
    "innovative",
    "success",
    "win",
    "winning",
    "winner",
    "achievement",
    "breakthrough",
];

/// Full negative vocabulary, used by the site-scoped search path.
const FULL_NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "poor",
    "disappointing",
    "hate",
    "dislike",
    "negative",
    "unhappy",
    "angry",
    "frustrated",
    "upset",
    "fail",
    "failure",
    "failing",
    "problem",
    "issue",
    "bug",
    "crash",
    "error",
    "broken",
    "wrong",
    "incorrect",
    "inferior",
    "subpar",
    "mediocre",
];

/// Compact vocabularies, used by the direct platform clients and the mock
/// generator. Kept separate from the full lists on purpose.
const COMPACT_POSITIVE: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "best",
    "awesome",
    "perfect",
    "happy",
    "wonderful",
];

const COMPACT_NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "hate",
    "disappointed",
    "poor",
    "sad",
    "angry",
];

/// Classify text with the full vocabulary.
///
/// Tokenizes on whitespace, case-folds each token, and counts exact
/// membership in the positive and negative sets. Strict majority wins;
/// ties (including no matches at all) are neutral. Tokens keep their
/// punctuation, so `"best!"` does not match `"best"` — the stored data was
/// produced this way and parity matters more than recall.
#[must_use]
pub fn classify(text: &str) -> Sentiment {
    score(text, FULL_POSITIVE, FULL_NEGATIVE)
}

/// Classify text with the compact vocabulary used by the platform clients.
#[must_use]
pub fn classify_compact(text: &str) -> Sentiment {
    score(text, COMPACT_POSITIVE, COMPACT_NEGATIVE)
}

fn score(text: &str, positive: &[&str], negative: &[&str]) -> Sentiment {
    let mut positive_count = 0_usize;
    let mut negative_count = 0_usize;

    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if positive.contains(&word.as_str()) {
            positive_count += 1;
        }
        if negative.contains(&word.as_str()) {
            negative_count += 1;
        }
    }

    if positive_count > negative_count {
        Sentiment::Positive
    } else if negative_count > positive_count {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(classify(""), Sentiment::Neutral);
        assert_eq!(classify_compact(""), Sentiment::Neutral);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(classify("the quick brown fox"), Sentiment::Neutral);
    }

    #[test]
    fn positive_majority_wins() {
        assert_eq!(
            classify("this product is amazing and the support is great"),
            Sentiment::Positive
        );
    }

    #[test]
    fn negative_majority_wins() {
        assert_eq!(
            classify("terrible experience, every update is broken"),
            Sentiment::Negative
        );
    }

    #[test]
    fn tie_is_neutral() {
        // one positive ("good"), one negative ("bad")
        assert_eq!(classify("good parts bad parts"), Sentiment::Neutral);
    }

    #[test]
    fn classify_is_deterministic() {
        let text = "I love widget, it's the best thing since sliced bread";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn case_is_folded() {
        assert_eq!(classify("GREAT product"), Sentiment::Positive);
        assert_eq!(classify_compact("TERRIBLE product"), Sentiment::Negative);
    }

    #[test]
    fn punctuation_blocks_a_match() {
        // "best!" is not a token in the set; "love" still is.
        assert_eq!(classify("love best!"), Sentiment::Positive);
        assert_eq!(classify("best!"), Sentiment::Neutral);
    }

    #[test]
    fn scenario_a_snippet_is_positive() {
        assert_eq!(
            classify("I love widget, it's the best!"),
            Sentiment::Positive
        );
    }

    #[test]
    fn lexica_diverge_on_purpose() {
        // "innovative" is only in the full list, "sad" only in the compact one.
        assert_eq!(classify("an innovative approach"), Sentiment::Positive);
        assert_eq!(
            classify_compact("an innovative approach"),
            Sentiment::Neutral
        );
        assert_eq!(classify_compact("a sad day"), Sentiment::Negative);
        assert_eq!(classify("a sad day"), Sentiment::Neutral);
    }
}
