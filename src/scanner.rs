//! Reads keys and opcodes out of corpus and instruction text.

use std::iter::Peekable;
use std::str::Chars;

/// Tokenizer over an in-memory file.
///
/// A token is either a run of non-whitespace characters or a double-quoted
/// string, which may contain whitespace and uses `\` to escape the next
/// character. Tokens are normalized with [`normalize`] before being handed
/// out.
pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Next non-whitespace character.
    pub fn next_opcode(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.next()
    }

    /// Next token exactly as written, without its surrounding quotes.
    pub fn next_raw(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.chars.next_if_eq(&'"').is_some() {
            return Some(self.read_quoted());
        }

        let mut raw = String::new();
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            raw.push(c);
        }
        if raw.is_empty() {
            None
        } else {
            Some(raw)
        }
    }

    fn read_quoted(&mut self) -> String {
        let mut raw = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.chars.next() {
                        raw.push(escaped);
                    }
                }
                c => raw.push(c),
            }
        }
        raw
    }

    /// Next token, normalized. May be empty if the token held nothing but
    /// punctuation and digits.
    pub fn next_token(&mut self) -> Option<String> {
        self.next_raw().map(|raw| normalize(&raw))
    }
}

impl Iterator for Scanner<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Turns a raw token into a dictionary key.
///
/// ASCII punctuation and digits are dropped, ASCII letters are lowercased and
/// every run of whitespace is reduced to its first character.
pub fn normalize(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push(c);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_punctuation() || c.is_ascii_digit() {
            continue;
        }
        key.push(c.to_ascii_lowercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hello,"), "hello");
        assert_eq!(normalize("don't"), "dont");
        assert_eq!(normalize("R2D2"), "rd");
        assert_eq!(normalize("42!"), "");
        assert_eq!(normalize("New   York"), "new york");
        assert_eq!(normalize("a - b"), "a  b");
        assert_eq!(normalize("Café"), "café");
    }

    #[test]
    fn test_tokens_and_strings() {
        let mut s = Scanner::new("  The quick,\n\"Brown  Fox\" jumps\t\"\" 99 ");
        assert_eq!(s.next_token().as_deref(), Some("the"));
        assert_eq!(s.next_token().as_deref(), Some("quick"));
        assert_eq!(s.next_token().as_deref(), Some("brown fox"));
        assert_eq!(s.next_token().as_deref(), Some("jumps"));
        assert_eq!(s.next_token().as_deref(), Some(""));
        assert_eq!(s.next_token().as_deref(), Some(""));
        assert_eq!(s.next_token(), None);
    }

    #[test]
    fn test_escapes_and_unterminated() {
        let mut s = Scanner::new(r#""say \"hi\"" "open ended"#);
        assert_eq!(s.next_raw().as_deref(), Some("say \"hi\""));
        assert_eq!(s.next_raw().as_deref(), Some("open ended"));
        assert_eq!(s.next_raw(), None);
    }

    #[test]
    fn test_opcodes() {
        let mut s = Scanner::new("i apple\n  r\ns\nf \"Apple Pie\"");
        assert_eq!(s.next_opcode(), Some('i'));
        assert_eq!(s.next_token().as_deref(), Some("apple"));
        assert_eq!(s.next_opcode(), Some('r'));
        assert_eq!(s.next_opcode(), Some('s'));
        assert_eq!(s.next_opcode(), Some('f'));
        assert_eq!(s.next_token().as_deref(), Some("apple pie"));
        assert_eq!(s.next_opcode(), None);
    }
}
