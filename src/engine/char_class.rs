//! Character classes used by the character ratio families
//!
//! The classes overlap on purpose (`AsciiLetters` covers both cases, and
//! whitespace characters are also `Another`). Each class is an independent
//! signal, not a partition.

use super::ratios::RatioClass;

/// Character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Digit: [0-9]
    Digits,
    /// Uppercase: [A-Z]
    AsciiUppercase,
    /// Lowercase: [a-z]
    AsciiLowercase,
    /// Alphabetic: [a-zA-Z]
    AsciiLetters,
    /// Whitespace: [ \t\n\r\x0b\x0c]
    Whitespaces,
    /// Line feed
    Newlines,
    /// Backslash
    Backslash,
    /// Anything that is not an ASCII letter or digit
    Another,
}

impl CharClass {
    /// Check if `c` belongs to this class
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digits => c.is_ascii_digit(),
            CharClass::AsciiUppercase => c.is_ascii_uppercase(),
            CharClass::AsciiLowercase => c.is_ascii_lowercase(),
            CharClass::AsciiLetters => c.is_ascii_alphabetic(),
            CharClass::Whitespaces => is_whitespace(c),
            CharClass::Newlines => c == '\n',
            CharClass::Backslash => c == '\\',
            CharClass::Another => !c.is_ascii_alphanumeric(),
        }
    }
}

// Includes vertical tab, which char::is_ascii_whitespace does not
#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

impl RatioClass for CharClass {
    type Item = char;

    const ALL: &'static [Self] = &[
        CharClass::Digits,
        CharClass::AsciiUppercase,
        CharClass::AsciiLowercase,
        CharClass::AsciiLetters,
        CharClass::Whitespaces,
        CharClass::Newlines,
        CharClass::Backslash,
        CharClass::Another,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            CharClass::Digits => "digits",
            CharClass::AsciiUppercase => "ascii_uppercase",
            CharClass::AsciiLowercase => "ascii_lowercase",
            CharClass::AsciiLetters => "ascii_letters",
            CharClass::Whitespaces => "whitespaces",
            CharClass::Newlines => "newlines",
            CharClass::Backslash => "backslash",
            CharClass::Another => "another",
        }
    }

    fn matches(self, item: &char) -> bool {
        CharClass::matches(self, *item)
    }
}
