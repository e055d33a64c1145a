//! Synthetic mention generation.
//!
//! Used whenever platform credentials are absent or a live request fails, so
//! the dashboard always has representative data during development and
//! demos. Each call produces a fixed-size batch with templated content per
//! sentiment bucket; the batch is clearly synthetic (ids carry a `mock-`
//! prefix) and randomized, so tests assert structure rather than exact
//! values.

use brandmon_core::{Engagement, Mention, Platform, Sentiment};
use chrono::{Duration, Utc};
use rand::Rng;

const MOCK_BATCH_SIZE: usize = 5;

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

const TWITTER_USERNAMES: [&str; 5] = ["user1", "user2", "user3", "user4", "user5"];
const TWITTER_NAMES: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Williams",
    "Charlie Brown",
];

const REDDIT_USERNAMES: [&str; 5] = [
    "redditor1",
    "redditor2",
    "redditor3",
    "redditor4",
    "redditor5",
];
const REDDIT_SUBREDDITS: [&str; 5] = [
    "technology",
    "business",
    "marketing",
    "startups",
    "entrepreneur",
];

const FACEBOOK_NAMES: [&str; 5] = [
    "John Smith",
    "Sarah Johnson",
    "Michael Brown",
    "Emily Davis",
    "David Wilson",
];
const FACEBOOK_PAGES: [&str; 5] = [
    "Tech News",
    "Business Insider",
    "Marketing Weekly",
    "Startup Hub",
    "Entrepreneur Daily",
];

const NEWS_SOURCES: [&str; 5] = [
    "Tech Daily",
    "Business Journal",
    "Market Watch Weekly",
    "The Startup Times",
    "Industry Insider",
];

/// Generates a fixed-size batch of synthetic mentions for one platform.
///
/// Authors cycle through a fixed per-platform list, sentiment is drawn
/// uniformly, content is templated by sentiment bucket and always contains
/// the keyword, and timestamps are back-dated within the last 7 days.
pub fn mock_mentions(keyword: &str, platform: Platform, rng: &mut impl Rng) -> Vec<Mention> {
    (0..MOCK_BATCH_SIZE)
        .map(|i| mock_mention(keyword, platform, i, rng))
        .collect()
}

fn mock_mention(keyword: &str, platform: Platform, index: usize, rng: &mut impl Rng) -> Mention {
    let sentiment = SENTIMENTS[rng.random_range(0..SENTIMENTS.len())];
    let content = content_for(keyword, platform, sentiment);
    let id = format!("mock-{platform}-{index}-{}", token(rng));
    let backdate_secs = rng.random_range(0..7 * 24 * 60 * 60);
    let created_at = Utc::now() - Duration::seconds(backdate_secs);

    let (author, url) = match platform {
        Platform::Twitter => {
            let username = TWITTER_USERNAMES[index % TWITTER_USERNAMES.len()];
            let name = TWITTER_NAMES[index % TWITTER_NAMES.len()];
            (
                format!("{name} (@{username})"),
                format!("https://twitter.com/{username}/status/{id}"),
            )
        }
        Platform::Reddit => {
            let username = REDDIT_USERNAMES[index % REDDIT_USERNAMES.len()];
            let subreddit = REDDIT_SUBREDDITS[index % REDDIT_SUBREDDITS.len()];
            (
                format!("u/{username}"),
                format!("https://reddit.com/r/{subreddit}/comments/{id}"),
            )
        }
        Platform::Facebook => {
            let name = FACEBOOK_NAMES[index % FACEBOOK_NAMES.len()];
            let page = FACEBOOK_PAGES[index % FACEBOOK_PAGES.len()];
            (
                format!("{name} ({page})"),
                format!("https://facebook.com/{page}/posts/{id}"),
            )
        }
        Platform::News => {
            let source = NEWS_SOURCES[index % NEWS_SOURCES.len()];
            (
                source.to_string(),
                format!("https://news.example.com/articles/{id}"),
            )
        }
    };

    Mention {
        id,
        content,
        platform,
        author,
        sentiment,
        url: Some(url),
        engagement: Some(mock_engagement(platform, rng)),
        created_at,
        updated_at: Utc::now(),
    }
}

fn content_for(keyword: &str, platform: Platform, sentiment: Sentiment) -> String {
    match (platform, sentiment) {
        (Platform::Twitter, Sentiment::Positive) => format!(
            "I love {keyword}! It's amazing and has really improved my workflow. Highly recommend!"
        ),
        (Platform::Twitter, Sentiment::Negative) => format!(
            "I'm disappointed with {keyword}. It doesn't work as advertised and was a waste of money."
        ),
        (Platform::Twitter, Sentiment::Neutral) => format!(
            "Just tried {keyword} for the first time. Not sure what to think yet, will update later."
        ),
        (Platform::Reddit, Sentiment::Positive) => format!(
            "I've been using {keyword} for a while now and it's been a game-changer for my workflow. Highly recommend!"
        ),
        (Platform::Reddit, Sentiment::Negative) => format!(
            "I'm having issues with {keyword}. The interface is confusing and support hasn't been helpful."
        ),
        (Platform::Reddit, Sentiment::Neutral) => format!(
            "Just discovered {keyword}. Anyone have experience with it? Looking for honest reviews."
        ),
        (Platform::Facebook, Sentiment::Positive) => format!(
            "Just discovered {keyword} and I'm absolutely loving it! The features are exactly what I needed. Highly recommend checking it out! 👍"
        ),
        (Platform::Facebook, Sentiment::Negative) => format!(
            "Disappointed with my experience using {keyword}. The interface is confusing and customer support hasn't been helpful. Hoping for improvements soon. 😕"
        ),
        (Platform::Facebook, Sentiment::Neutral) => format!(
            "Has anyone tried {keyword}? Looking for honest reviews before making a decision. Let me know your thoughts! 🤔"
        ),
        (Platform::News, Sentiment::Positive) => format!(
            "Industry analysts praise {keyword} in a glowing new report, calling it one of the year's standout launches."
        ),
        (Platform::News, Sentiment::Negative) => format!(
            "New report raises concerns about {keyword}, citing a string of problems and disappointed customers."
        ),
        (Platform::News, Sentiment::Neutral) => format!(
            "This week's coverage roundup mentions {keyword} among several products to watch."
        ),
    }
}

fn mock_engagement(platform: Platform, rng: &mut impl Rng) -> Engagement {
    match platform {
        Platform::Twitter => Engagement {
            likes: Some(rng.random_range(0..100)),
            retweets: Some(rng.random_range(0..50)),
            replies: Some(rng.random_range(0..20)),
            ..Engagement::default()
        },
        Platform::Reddit => Engagement {
            likes: Some(rng.random_range(0..100)),
            comments: Some(rng.random_range(0..20)),
            ..Engagement::default()
        },
        Platform::Facebook => Engagement {
            likes: Some(rng.random_range(0..200)),
            shares: Some(rng.random_range(0..50)),
            comments: Some(rng.random_range(0..30)),
            ..Engagement::default()
        },
        Platform::News => Engagement {
            shares: Some(rng.random_range(0..100)),
            ..Engagement::default()
        },
    }
}

fn token(rng: &mut impl Rng) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..6)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
