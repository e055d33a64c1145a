//! Deterministic mention IDs derived from source URLs.
//!
//! The ID is the upsert key at the persistence layer, so any URL matching a
//! known platform pattern must always map to the same ID. URLs with no
//! recognizable pattern get a `news-` ID carrying a random suffix; missing
//! URLs get a purely random token.

use rand::Rng;
use regex::Regex;
use reqwest::Url;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derives a mention ID from a source URL.
///
/// Priority order: Twitter/X status ID (`twitter-<digits>`), Reddit thread
/// ID (`reddit-<base36>`), Facebook post/photo ID (`facebook-<digits>`),
/// then a generic `news-` ID built from the first three path segments plus a
/// short random suffix. An empty or unparseable URL yields a random token.
pub fn stable_id(url: &str, rng: &mut impl Rng) -> String {
    if url.is_empty() {
        return random_token(rng, 10);
    }

    let Ok(parsed) = Url::parse(url) else {
        return random_token(rng, 10);
    };
    let host = parsed.host_str().unwrap_or_default();
    let path = parsed.path();

    if host_matches(host, "twitter.com") || host_matches(host, "x.com") {
        let re = Regex::new(r"/status(?:es)?/(\d+)").expect("valid regex");
        if let Some(caps) = re.captures(path) {
            return format!("twitter-{}", &caps[1]);
        }
    }

    if host_matches(host, "reddit.com") {
        let re = Regex::new(r"/comments/([a-z0-9]+)").expect("valid regex");
        if let Some(caps) = re.captures(path) {
            return format!("reddit-{}", &caps[1]);
        }
    }

    if host_matches(host, "facebook.com") || host_matches(host, "fb.com") {
        let re = Regex::new(r"(\d{5,})").expect("valid regex");
        if let Some(caps) = re.captures(path) {
            return format!("facebook-{}", &caps[1]);
        }
    }

    generic_id(&parsed, rng)
}

/// Exact host or any subdomain of it.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

fn generic_id(url: &Url, rng: &mut impl Rng) -> String {
    let segments: Vec<String> = url
        .path_segments()
        .map(|parts| {
            parts
                .filter(|s| !s.is_empty())
                .take(3)
                .map(sanitize_segment)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let suffix = random_token(rng, 6);
    if segments.is_empty() {
        format!("news-{suffix}")
    } else {
        format!("news-{}-{suffix}", segments.join("-"))
    }
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

fn random_token(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect()
}
