//! Presentation strings for the URL printed under each card's number.

use crate::config::UrlDisplayStyle;
use url::Url;

const MAX_DISPLAY_CHARS: usize = 40;
const ELLIPSIS: &str = "...";
const REFERRAL_PATH: &str = "/referral";
const CODE_PREVIEW_CHARS: usize = 4;

/// A URL broken over two printed lines. `line2` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    pub line1: String,
    pub line2: String,
}

/// What a card prints below its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLines {
    Hidden,
    Truncated(String),
    Full(SplitUrl),
}

struct ReferralLink<'a> {
    host: &'a str,
    token: &'a str,
}

/// Recognizes `<host>/referral?code=<token>`, with or without a trailing
/// slash on the path. The token is kept raw and ends at the next `&`.
fn parse_referral(parsed: &Url) -> Option<ReferralLink<'_>> {
    let path = parsed.path();
    if path.strip_suffix('/').unwrap_or(path) != REFERRAL_PATH {
        return None;
    }
    let host = parsed.host_str()?;
    let token = parsed
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("code="))
        .filter(|token| !token.is_empty())?;
    Some(ReferralLink { host, token })
}

fn truncate_chars(text: &str) -> String {
    if text.chars().count() > MAX_DISPLAY_CHARS {
        let kept: String = text
            .chars()
            .take(MAX_DISPLAY_CHARS - ELLIPSIS.len())
            .collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        text.to_string()
    }
}

/// The compact single-line form of a URL.
///
/// Referral links keep the first four characters of their token; other URLs
/// print as host plus path, and unparseable input prints as-is. Both are cut
/// to 40 characters with a trailing ellipsis.
pub fn truncate_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            if let Some(referral) = parse_referral(&parsed) {
                let preview: String = referral.token.chars().take(CODE_PREVIEW_CHARS).collect();
                return format!(
                    "{}{}?code={}{}",
                    referral.host, REFERRAL_PATH, preview, ELLIPSIS
                );
            }
            let compact = format!("{}{}", parsed.host_str().unwrap_or_default(), parsed.path());
            truncate_chars(&compact)
        }
        Err(_) => truncate_chars(url),
    }
}

/// The two-line form of a URL: referral links split before their token,
/// anything else prints whole on the first line.
pub fn split_url(url: &str) -> SplitUrl {
    if let Ok(parsed) = Url::parse(url)
        && let Some(referral) = parse_referral(&parsed)
    {
        return SplitUrl {
            line1: format!("{}{}?code=", referral.host, REFERRAL_PATH),
            line2: referral.token.to_string(),
        };
    }
    SplitUrl {
        line1: url.to_string(),
        line2: String::new(),
    }
}

pub fn display_lines(url: &str, style: UrlDisplayStyle) -> DisplayLines {
    match style {
        UrlDisplayStyle::Hidden => DisplayLines::Hidden,
        UrlDisplayStyle::Truncated => DisplayLines::Truncated(truncate_url(url)),
        UrlDisplayStyle::Full => DisplayLines::Full(split_url(url)),
    }
}
