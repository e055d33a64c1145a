//! Author extraction from search-result titles.
//!
//! Each platform has an ordered list of (pattern, extractor) rules encoding
//! the title conventions of the external search index. Rules are tried
//! first-match-wins; a platform-specific placeholder is the mandatory
//! terminal default, so the result is never empty.

use brandmon_core::Platform;
use regex::{Captures, Regex};

type Extractor = fn(&Captures<'_>) -> String;

struct AuthorRule {
    pattern: &'static str,
    extract: Extractor,
}

fn first_group(caps: &Captures<'_>) -> String {
    caps[1].trim().to_string()
}

fn subreddit(caps: &Captures<'_>) -> String {
    format!("r/{}", caps[1].trim())
}

// "Username on X" is the current index convention; "on Twitter" still shows
// up for older results.
const TWITTER_RULES: &[AuthorRule] = &[
    AuthorRule {
        pattern: r"^(.+?)\s+on X\b",
        extract: first_group,
    },
    AuthorRule {
        pattern: r"^(.+?)\s+on Twitter\b",
        extract: first_group,
    },
];

const REDDIT_RULES: &[AuthorRule] = &[AuthorRule {
    pattern: r": r/([^:]+)",
    extract: subreddit,
}];

const FACEBOOK_RULES: &[AuthorRule] = &[
    AuthorRule {
        pattern: r"^(.+?)\s+-\s+Facebook\b",
        extract: first_group,
    },
    AuthorRule {
        pattern: r"^(.+?)\s+\|\s+Facebook\b",
        extract: first_group,
    },
];

const NEWS_RULES: &[AuthorRule] = &[AuthorRule {
    pattern: r"\s+-\s+([^-]+)$",
    extract: first_group,
}];

fn rules_for(platform: Platform) -> &'static [AuthorRule] {
    match platform {
        Platform::Twitter => TWITTER_RULES,
        Platform::Reddit => REDDIT_RULES,
        Platform::Facebook => FACEBOOK_RULES,
        Platform::News => NEWS_RULES,
    }
}

fn default_for(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => "Unknown User",
        Platform::Reddit => "Unknown Subreddit",
        Platform::Facebook => "Facebook Page",
        Platform::News => "Unknown Source",
    }
}

/// Derives a display author from a result title.
///
/// For Reddit, a title miss falls back to scanning the snippet for an
/// `r/<subreddit>` token before giving up. Always returns a non-empty
/// string.
#[must_use]
pub fn extract_author(title: &str, platform: Platform, snippet: Option<&str>) -> String {
    for rule in rules_for(platform) {
        let re = Regex::new(rule.pattern).expect("valid regex");
        if let Some(caps) = re.captures(title) {
            let author = (rule.extract)(&caps);
            if !author.is_empty() {
                return author;
            }
        }
    }

    if platform == Platform::Reddit {
        if let Some(snippet) = snippet {
            let re = Regex::new(r"\br/([A-Za-z0-9_]+)").expect("valid regex");
            if let Some(caps) = re.captures(snippet) {
                return format!("r/{}", &caps[1]);
            }
        }
    }

    default_for(platform).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_username_on_x() {
        assert_eq!(
            extract_author("Jane Doe on X", Platform::Twitter, None),
            "Jane Doe"
        );
    }

    #[test]
    fn twitter_username_on_x_with_trailing_text() {
        assert_eq!(
            extract_author(
                "Jane Doe on X: \"I love widget\"",
                Platform::Twitter,
                None
            ),
            "Jane Doe"
        );
    }

    #[test]
    fn twitter_legacy_on_twitter_title() {
        assert_eq!(
            extract_author("Jane Doe on Twitter: hello", Platform::Twitter, None),
            "Jane Doe"
        );
    }

    #[test]
    fn twitter_default_placeholder() {
        assert_eq!(
            extract_author("Some unrelated title", Platform::Twitter, None),
            "Unknown User"
        );
    }

    #[test]
    fn reddit_subreddit_from_title() {
        assert_eq!(
            extract_author("What do you think of widget? : r/technology", Platform::Reddit, None),
            "r/technology"
        );
    }

    #[test]
    fn reddit_falls_back_to_snippet() {
        assert_eq!(
            extract_author(
                "widget discussion thread",
                Platform::Reddit,
                Some("Posted in r/gadgets yesterday"),
            ),
            "r/gadgets"
        );
    }

    #[test]
    fn reddit_default_placeholder() {
        assert_eq!(
            extract_author("widget discussion thread", Platform::Reddit, None),
            "Unknown Subreddit"
        );
    }

    #[test]
    fn facebook_page_name() {
        assert_eq!(
            extract_author("Tech News - Facebook", Platform::Facebook, None),
            "Tech News"
        );
    }

    #[test]
    fn facebook_pipe_variant() {
        assert_eq!(
            extract_author("Tech News | Facebook", Platform::Facebook, None),
            "Tech News"
        );
    }

    #[test]
    fn facebook_default_placeholder() {
        assert_eq!(
            extract_author("widget chatter", Platform::Facebook, None),
            "Facebook Page"
        );
    }

    #[test]
    fn news_source_after_last_dash() {
        assert_eq!(
            extract_author("Widget launches new model - TechCrunch", Platform::News, None),
            "TechCrunch"
        );
    }

    #[test]
    fn news_default_placeholder() {
        assert_eq!(
            extract_author("Widget launches new model", Platform::News, None),
            "Unknown Source"
        );
    }

    #[test]
    fn never_returns_empty() {
        for platform in Platform::ALL {
            assert!(!extract_author("", platform, Some("")).is_empty());
        }
    }
}
