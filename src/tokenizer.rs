use clap::ValueEnum;

use crate::types::Token as TokenTrait;

/// How raw text is split before alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Every non-whitespace character is a token (CER).
    #[default]
    Chars,
    /// Runs of word characters, and single punctuation characters (WER).
    Words,
}

#[derive(Clone, Debug)]
pub struct Token<'a> {
    /// Text of the token
    pub text: &'a str,
    /// Byte offset of the token in the original text.
    pub start: usize,
}

// Tokens from different texts compare by content only.
impl<'a> PartialEq for Token<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<'a> Eq for Token<'a> {}

impl<'a> TokenTrait for Token<'a> {
    fn text(&self) -> &str {
        self.text
    }
}

#[derive(PartialEq, Debug)]
enum CharType {
    WhiteSpace,
    Word,
    Other,
}

fn char_type(c: char) -> CharType {
    if c.is_whitespace() {
        CharType::WhiteSpace
    } else if c.is_alphanumeric() || c == '_' {
        CharType::Word
    } else {
        CharType::Other
    }
}

#[derive(Debug)]
pub struct TokenParser<'a> {
    source: &'a str,
    position: usize,
    mode: Mode,
}

impl<'a> TokenParser<'a> {
    pub fn parse(text: &'a str, mode: Mode) -> TokenParser<'a> {
        TokenParser {
            source: text,
            position: 0,
            mode,
        }
    }

    /// Byte length of the token starting at the current position.
    fn token_len(&self, rest_of_text: &str, first: char) -> usize {
        match (self.mode, char_type(first)) {
            (Mode::Words, CharType::Word) => rest_of_text
                .chars()
                .take_while(|x| char_type(*x) == CharType::Word)
                .map(|x| x.len_utf8())
                .sum::<usize>(),
            _ => first.len_utf8(),
        }
    }
}

impl<'a> Iterator for TokenParser<'a> {
    type Item = Token<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest_of_text = &self.source[self.position..];
            let first = rest_of_text.chars().next()?;
            let len = self.token_len(rest_of_text, first);
            let start = self.position;
            self.position += len;
            if char_type(first) != CharType::WhiteSpace {
                return Some(Token {
                    text: &self.source[start..self.position],
                    start,
                });
            }
        }
    }
}

pub fn tokenize(text: &str, mode: Mode) -> Vec<Token<'_>> {
    TokenParser::parse(text, mode).collect()
}
