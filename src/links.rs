//! Link extraction: raw uploaded text to an ordered list of URLs.

use crate::config::format_code_number;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Unicode whitespace plus the byte-order mark, which spreadsheet exports
/// leave at the start of files and cells.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn is_url_char(c: char) -> bool {
    !is_blank(c) && c != ','
}

/// Finds the first `http://` or `https://` token in `line`.
///
/// The token runs from the scheme up to the next whitespace or comma. A
/// scheme with nothing after it is skipped and the scan continues.
pub fn find_first_url(line: &str) -> Option<&str> {
    let mut offset = 0;
    while offset < line.len() {
        let rest = &line[offset..];
        let Some(start) = rest.find("http") else {
            return None;
        };
        let candidate = &rest[start..];
        if let Some(scheme) = SCHEMES.iter().find(|s| candidate.starts_with(**s)) {
            let body = &candidate[scheme.len()..];
            let body_len = body.find(|c| !is_url_char(c)).unwrap_or(body.len());
            if body_len > 0 {
                return Some(&candidate[..scheme.len() + body_len]);
            }
        }
        offset += start + "http".len();
    }
    None
}

/// Parses uploaded text into URLs, one per matching line, in input order.
///
/// Lines are trimmed and blank lines dropped. On each remaining line only the
/// first URL is kept (so `URL,Name` rows work); lines without one are skipped.
pub fn parse_links_from_text(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_matches(is_blank))
        .filter(|line| !line.is_empty())
        .filter_map(find_first_url)
        .map(str::to_string)
        .collect()
}

/// One link with its position in the input and the number printed on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub url: String,
    pub sequence_index: usize,
    pub code_number: String,
}

impl LinkRecord {
    pub fn from_urls<I>(urls: I, start_number: i64) -> Vec<LinkRecord>
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(sequence_index, url)| LinkRecord {
                url,
                sequence_index,
                code_number: format_code_number(start_number, sequence_index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_links_from_text("").is_empty());
        assert!(parse_links_from_text("\n\n   \n").is_empty());
    }

    #[test]
    fn csv_rows_and_noise_lines() {
        let links = parse_links_from_text("nope\nhttp://a.com\nhttp://b.com,Name\n");
        assert_eq!(links, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn url_is_found_anywhere_in_the_line() {
        assert_eq!(
            find_first_url("Alice: https://x.io/referral?code=ABC thanks"),
            Some("https://x.io/referral?code=ABC")
        );
    }

    #[test]
    fn only_first_url_per_line_is_kept() {
        let links = parse_links_from_text("https://one.com https://two.com");
        assert_eq!(links, vec!["https://one.com"]);
    }

    #[test]
    fn bare_or_malformed_schemes_are_skipped() {
        assert_eq!(find_first_url("http:// nothing"), None);
        assert_eq!(find_first_url("ftp://files.com"), None);
        assert_eq!(find_first_url("httpx://a.com"), None);
        assert_eq!(find_first_url("https://, then http://b.com"), Some("http://b.com"));
    }

    #[test]
    fn scheme_match_is_case_sensitive() {
        assert_eq!(find_first_url("HTTPS://A.COM"), None);
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let links = parse_links_from_text("https://a.com\r\nhttps://b.com\r\n");
        assert_eq!(links, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn byte_order_marks_end_the_url() {
        let links = parse_links_from_text("\u{feff}https://a.com\u{feff}\nhttps://b.com\u{feff},x");
        assert_eq!(links, vec!["https://a.com", "https://b.com"]);
        assert_eq!(find_first_url("https://c.com\u{feff}tail"), Some("https://c.com"));
    }

    #[test]
    fn trailing_punctuation_other_than_comma_is_kept() {
        assert_eq!(find_first_url("see https://a.com/x."), Some("https://a.com/x."));
    }

    #[test]
    fn records_carry_order_and_code_numbers() {
        let records = LinkRecord::from_urls(
            vec!["https://a.com".to_string(), "https://b.com".to_string()],
            50,
        );
        assert_eq!(records[1].sequence_index, 1);
        assert_eq!(records[1].code_number, "051");
        assert_eq!(records[0].url, "https://a.com");
    }
}
