//! Engagement extraction from search-result text.
//!
//! Scans the snippet (then title) for numeric tokens adjacent to known unit
//! words, accepting `k`-shorthand (`1.5k` → 1500) and stripping thousands
//! separators. When no per-metric token parses but a combined
//! `"N engagements"` phrase is present, the total is distributed across the
//! platform's counters using fixed percentage splits. When nothing parses at
//! all, bounded random placeholder values stand in for the missing
//! telemetry — callers that need determinism seed the injected RNG.

use brandmon_core::{Engagement, Platform};
use rand::Rng;
use regex::Regex;

/// Derives engagement counters for one raw result.
///
/// Never fails: unparseable text falls through to the per-platform random
/// placeholder ranges. Every populated counter is a non-negative integer.
pub fn extract_engagement(
    title: &str,
    snippet: &str,
    platform: Platform,
    rng: &mut impl Rng,
) -> Engagement {
    // Snippet first: the index puts counters there far more often than in
    // the title.
    let text = format!("{snippet} {title}");

    let mut engagement = parse_metrics(&text, platform);

    if engagement.is_empty() {
        if let Some(total) = parse_combined_total(&text) {
            engagement = split_total(total, platform);
        }
    }

    if engagement.is_empty() {
        engagement = random_fallback(platform, rng);
    }

    engagement
}

fn parse_metrics(text: &str, platform: Platform) -> Engagement {
    let re = Regex::new(
        r"(?i)\b(\d[\d,]*(?:\.\d+)?k?)\s*(likes?|retweets?|rt|repl(?:y|ies)|comments?|shares?|upvotes?|points?|karma|views?|reads?)\b",
    )
    .expect("valid regex");

    let mut engagement = Engagement::default();
    for caps in re.captures_iter(text) {
        let Some(value) = parse_count(&caps[1]) else {
            continue;
        };
        let unit = caps[2].to_lowercase();
        assign_unit(&mut engagement, platform, &unit, value);
    }
    engagement
}

/// Routes a parsed (unit, value) pair to the platform's counter, first
/// occurrence wins. Unit words that have no counter on the platform are
/// dropped.
fn assign_unit(engagement: &mut Engagement, platform: Platform, unit: &str, value: u32) {
    let slot = match platform {
        Platform::Twitter => {
            if unit.starts_with("like") {
                &mut engagement.likes
            } else if unit.starts_with("retweet") || unit == "rt" {
                &mut engagement.retweets
            } else if unit.starts_with("repl") {
                &mut engagement.replies
            } else {
                return;
            }
        }
        Platform::Reddit => {
            if unit.starts_with("upvote")
                || unit.starts_with("point")
                || unit == "karma"
                || unit.starts_with("like")
            {
                &mut engagement.likes
            } else if unit.starts_with("comment") || unit.starts_with("repl") {
                &mut engagement.comments
            } else {
                return;
            }
        }
        Platform::Facebook => {
            if unit.starts_with("like") {
                &mut engagement.likes
            } else if unit.starts_with("share") {
                &mut engagement.shares
            } else if unit.starts_with("comment") {
                &mut engagement.comments
            } else {
                return;
            }
        }
        // News articles only carry a share count; views/reads are the
        // closest proxy the index exposes for it.
        Platform::News => {
            if unit.starts_with("share") || unit.starts_with("view") || unit.starts_with("read") {
                &mut engagement.shares
            } else {
                return;
            }
        }
    };

    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Parses a numeric token: strips thousands separators, applies the
/// `k * 1000` shorthand, truncates any fractional remainder.
fn parse_count(raw: &str) -> Option<u32> {
    let cleaned = raw.replace(',', "");
    if let Some(stem) = cleaned
        .strip_suffix('k')
        .or_else(|| cleaned.strip_suffix('K'))
    {
        let value = stem.parse::<f64>().ok()?;
        if value < 0.0 {
            return None;
        }
        return Some((value * 1000.0).round() as u32);
    }
    let value = cleaned.parse::<f64>().ok()?;
    if value < 0.0 {
        return None;
    }
    Some(value.trunc() as u32)
}

fn parse_combined_total(text: &str) -> Option<u32> {
    let re = Regex::new(r"(?i)\b(\d[\d,]*(?:\.\d+)?k?)\s*engagements?\b").expect("valid regex");
    re.captures(text).and_then(|caps| parse_count(&caps[1]))
}

/// Distributes a combined engagement total across the platform's counters
/// using fixed percentage splits (twitter 60/20/20 likes/retweets/replies,
/// reddit 80/20 likes/comments, facebook 60/20/20 likes/shares/comments,
/// news 100 shares).
fn split_total(total: u32, platform: Platform) -> Engagement {
    let pct = |p: u32| -> u32 {
        let scaled = u64::from(total) * u64::from(p) / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    };

    match platform {
        Platform::Twitter => Engagement {
            likes: Some(pct(60)),
            retweets: Some(pct(20)),
            replies: Some(pct(20)),
            ..Engagement::default()
        },
        Platform::Reddit => Engagement {
            likes: Some(pct(80)),
            comments: Some(pct(20)),
            ..Engagement::default()
        },
        Platform::Facebook => Engagement {
            likes: Some(pct(60)),
            shares: Some(pct(20)),
            comments: Some(pct(20)),
            ..Engagement::default()
        },
        Platform::News => Engagement {
            shares: Some(total),
            ..Engagement::default()
        },
    }
}

/// Bounded random placeholders for results where no telemetry parsed.
fn random_fallback(platform: Platform, rng: &mut impl Rng) -> Engagement {
    match platform {
        Platform::Twitter => Engagement {
            likes: Some(rng.random_range(10..100)),
            retweets: Some(rng.random_range(5..50)),
            replies: Some(rng.random_range(2..20)),
            ..Engagement::default()
        },
        Platform::Reddit => Engagement {
            likes: Some(rng.random_range(10..100)),
            comments: Some(rng.random_range(2..20)),
            ..Engagement::default()
        },
        Platform::Facebook => Engagement {
            likes: Some(rng.random_range(20..200)),
            shares: Some(rng.random_range(5..50)),
            comments: Some(rng.random_range(3..30)),
            ..Engagement::default()
        },
        Platform::News => Engagement {
            shares: Some(rng.random_range(5..100)),
            ..Engagement::default()
        },
    }
}
