/// Convert a top-left-origin Y coordinate to PDF's bottom-left origin.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F, indexed from 0x80.
/// Unassigned slots hold `None`.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None,             Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None,             Some('\u{017D}'), None,
    None,             Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None,             Some('\u{017E}'), Some('\u{0178}'),
];

/// The WinAnsiEncoding byte for a printable character, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => Some(code as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&slot| slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode text for a WinAnsi-encoded standard font. Characters the encoding
/// cannot represent are replaced with `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_y_mirrors_against_page_height() {
        assert_eq!(flip_y(0.0, 842.0), 842.0);
        assert_eq!(flip_y(42.0, 842.0), 800.0);
    }

    #[test]
    fn latin1_passes_through() {
        assert_eq!(to_win_ansi("a é"), vec![b'a', b' ', 0xE9]);
    }

    #[test]
    fn typographic_punctuation_uses_the_high_range() {
        let bytes = to_win_ansi("Let\u{2019}s Meet \u{2014} \u{20AC}5");
        assert_eq!(bytes, b"Let\x92s Meet \x97 \x805".to_vec());
        assert_eq!(
            to_win_ansi("\u{201C}Q\u{201D} 1\u{2013}2 \u{2026}"),
            b"\x93Q\x94 1\x962 \x85".to_vec()
        );
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(to_win_ansi("\u{0085}\u{4E2D}\u{1F600}"), b"???".to_vec());
        assert_eq!(win_ansi_byte('\u{81}'), None);
        assert_eq!(win_ansi_byte('\n'), None);
    }
}
