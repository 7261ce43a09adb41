use std::iter::{Enumerate, Skip};
use std::str::Chars;

/// A single word pulled out of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Character offset of the token's first letter in the source text.
    pub offset: usize,
}

/// Lazy left-to-right iterator over the letter runs of a text.
///
/// A token is a maximal run of ASCII letters; whitespace, punctuation, and
/// anything else separates tokens.
pub struct Tokens<'a> {
    chars: Skip<Enumerate<Chars<'a>>>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_offset(text, 0)
    }

    /// Tokens whose letters sit at or after the `start` character offset.
    pub fn from_offset(text: &'a str, start: usize) -> Self {
        Tokens {
            chars: text.chars().enumerate().skip(start),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut text = String::new();
        let mut offset = 0;

        for (index, ch) in self.chars.by_ref() {
            if ch.is_ascii_alphabetic() {
                if text.is_empty() {
                    offset = index;
                }
                text.push(ch);
            } else if !text.is_empty() {
                return Some(Token { text, offset });
            }
        }

        if text.is_empty() {
            None
        } else {
            Some(Token { text, offset })
        }
    }
}
