//! Contact extractors: email, phone, social links and address.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Extracted;
use crate::models::SocialLink;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email regex")
});

/// Tried in order; the first pattern with any match wins.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Unformatted run of 10+ digits, optionally with a leading `+`.
        r"\+?\d{10,}",
        // International: +44 20 7946 0958, +1-555-123-4567
        r"\+\d{1,3}[\s.\-]?\(?\d{1,4}\)?[\s.\-]?\d{3,4}[\s.\-]?\d{3,4}",
        // North American: (555) 123-4567, 555-123-4567, 555.123.4567
        r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("phone regex"))
    .collect()
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?(?:www\.)?linkedin\.com/[A-Za-z0-9_\-/%]+")
        .expect("linkedin regex")
});

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_\-]+(?:/[A-Za-z0-9_.\-]+)?")
        .expect("github regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)[^\s,;|()<>]+").expect("url regex"));

static PROTOCOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:https?://)?(?:www\.)?").expect("protocol regex"));

const WEBSITE_LABELS: &[&str] = &["website", "portfolio", "web", "homepage", "blog"];

/// Address line prefixes. `city:`-style prefixes keep their colon because the bare
/// words are too common ("State University").
const ADDRESS_PREFIXES: &[&str] = &["address", "location", "city:", "state:", "country:"];

pub fn extract_email(text: &str) -> Extracted<String> {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .into()
}

pub fn extract_phone(text: &str) -> Extracted<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
        .into()
}

/// Finds LinkedIn, GitHub and personal website links, normalized without protocol.
pub fn extract_social_links(text: &str) -> Vec<SocialLink> {
    let mut links = Vec::new();

    if let Some(m) = LINKEDIN_RE.find(text) {
        links.push(SocialLink::new("LinkedIn", normalize_link(m.as_str())));
    }
    if let Some(m) = GITHUB_RE.find(text) {
        links.push(SocialLink::new("GitHub", normalize_link(m.as_str())));
    }
    if let Some(site) = find_website(text) {
        links.push(SocialLink::new("Website", site));
    }

    links
}

pub fn extract_address(lines: &[String]) -> Extracted<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .find(|line| {
            let lower = line.to_lowercase();
            ADDRESS_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .map(|line| {
            line.split_once(':')
                .map_or(line, |(_, value)| value)
                .trim()
                .to_string()
        })
        .filter(|value| !value.is_empty())
        .into()
}

/// Strips protocol, `www.` and trailing punctuation from a matched link.
pub fn normalize_link(raw: &str) -> String {
    PROTOCOL_RE
        .replace(raw.trim(), "")
        .trim_end_matches(['.', ',', ')', ';', '/'])
        .to_string()
}

fn find_website(text: &str) -> Option<String> {
    let by_url = URL_RE
        .find_iter(text)
        .map(|m| normalize_link(m.as_str()))
        .find(|link| !is_known_platform(link) && !link.is_empty());
    if by_url.is_some() {
        return by_url;
    }

    text.lines().find_map(|line| {
        let (label, value) = line.split_once(':')?;
        let label = label.trim().to_lowercase();
        let value = value.trim();
        (WEBSITE_LABELS.contains(&label.as_str())
            && !value.is_empty()
            && !value.contains('@')
            && !is_known_platform(value))
        .then(|| normalize_link(value))
    })
}

fn is_known_platform(link: &str) -> bool {
    let lower = link.to_lowercase();
    lower.contains("linkedin.com") || lower.contains("github.com")
}
