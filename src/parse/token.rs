use logos::Logos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unknown token")]
    UnknownToken,
}

/// Control characters are only recognised when they stand alone, so `a<b` and
/// `>>` lex as words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[logos(skip r"[ \n]+", error = LexerError)]
pub enum Token<'a> {
    #[token("|")]
    Pipe,
    #[token(">")]
    Write,
    #[token("<")]
    Read,

    #[regex(r"[^ \n]+")]
    Word(&'a str),
}
