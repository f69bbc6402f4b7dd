//! American Soundex

use unicode_normalization::UnicodeNormalization;

const CODE_LEN: usize = 4;

/// Digit class of a consonant; `None` for vowels, H, W, Y and non-letters.
fn digit(c: char) -> Option<char> {
    match c {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}

/// Encode `text` as a 4-character Soundex code (first letter + 3 digits).
///
/// Adjacent letters in the same digit class collapse to one digit, also
/// across an H or W. Vowels and other characters separate repeats.
pub fn soundex(text: &str) -> String {
    let upper: String = text.nfkd().collect::<String>().to_uppercase();
    let mut chars = upper.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };

    let mut code = String::with_capacity(CODE_LEN);
    code.push(first);
    let mut count = 1;
    let mut last = digit(first);

    for c in chars {
        match digit(c) {
            Some(d) => {
                if Some(d) != last {
                    code.push(d);
                    count += 1;
                }
                last = Some(d);
            }
            None => {
                if c != 'H' && c != 'W' {
                    last = None;
                }
            }
        }
        if count == CODE_LEN {
            break;
        }
    }

    for _ in count..CODE_LEN {
        code.push('0');
    }
    code
}
