// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The second lexing phase "cooks" a raw token stream, transforming it into tokens that
//! directly correspond to components in the ECMAScript grammar. Multi-character operators are
//! assembled from singles, identifiers are classified as keywords, and template chunks are
//! classified by their position in the template.
//!
//! Whitespace and comment tokens are discarded, but every cooked token remembers whether a
//! line terminator preceded it, which drives automatic semicolon insertion and the restricted
//! productions.
//!
//! Tokens never contain substrings from the original input, but are simply labels that refer
//! back to regions in the input. Lexing never fails, but may produce error tokens.

#[cfg(test)]
mod tests;

use super::{
    raw::{self, Number, Single},
    Delim, Radix, TemplateEnding, TemplateStart,
};
use crate::keyword::Keyword;
use enum_iterator::Sequence;
use miette::Diagnostic;
use std::{
    fmt::{self, Display, Formatter},
    iter::Peekable,
};
use thiserror::Error;
use umc_data_structures::span::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
    /// True if a line terminator appeared between this token and the previous one.
    pub(crate) newline_before: bool,
}

#[derive(Clone, Copy, Debug, Diagnostic, Eq, Error, PartialEq)]
pub(crate) enum Error {
    #[error("expected `{0}` to complete {1}, found {2}")]
    #[diagnostic(code("umc.lex.incomplete"))]
    Incomplete(raw::Single, TokenKind, Found, #[label] Span),

    #[error("unterminated block comment")]
    #[diagnostic(code("umc.lex.unterminated_comment"))]
    UnterminatedComment(#[label] Span),

    #[error("unterminated regular expression literal")]
    #[diagnostic(code("umc.lex.unterminated_regex"))]
    UnterminatedRegex(#[label] Span),

    #[error("unterminated string literal")]
    #[diagnostic(code("umc.lex.unterminated_string"))]
    UnterminatedString(#[label] Span),

    #[error("unterminated template literal")]
    #[diagnostic(code("umc.lex.unterminated_template"))]
    UnterminatedTemplate(#[label] Span),

    #[error("unrecognized character `{0}`")]
    #[diagnostic(code("umc.lex.unknown_char"))]
    Unknown(char, #[label] Span),
}

/// What the lexer actually found when a compound operator was left incomplete.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Found {
    Eof,
    Token(raw::TokenKind),
}

impl Display for Found {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Found::Eof => f.write_str("EOF"),
            Found::Token(kind) => write!(f, "{kind:?}"),
        }
    }
}

/// A token kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub(crate) enum TokenKind {
    /// `=>`
    Arrow,
    /// `!`
    Bang,
    /// A `BigInt` literal.
    BigInt(Radix),
    /// A closed binary operator not followed by an equals token.
    BinOp(ClosedBinOp),
    /// A closed binary operator followed by an equals token.
    BinOpEq(ClosedBinOp),
    /// A closing delimiter.
    Close(Delim),
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    DotDotDot,
    /// End of file.
    Eof,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `===`
    EqEqEq,
    /// A floating-point literal.
    Float,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `#`
    Hash,
    /// An identifier.
    Ident,
    /// An integer literal.
    Int(Radix),
    /// A keyword.
    Keyword(Keyword),
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `--`
    MinusMinus,
    /// `!=`
    Ne,
    /// `!==`
    NeEq,
    /// An opening delimiter.
    Open(Delim),
    /// `++`
    PlusPlus,
    /// `?`
    Question,
    /// `?.`
    QuestionDot,
    /// A regular expression literal.
    Regex,
    /// `;`
    Semi,
    /// A string literal.
    String,
    /// A template with no interpolations: `` `…` ``.
    TemplateComplete,
    /// The first chunk of an interpolated template: `` `…${ ``.
    TemplateHead,
    /// A middle chunk of an interpolated template: `}…${`.
    TemplateMiddle,
    /// The last chunk of an interpolated template: `` }…` ``.
    TemplateTail,
    /// `~`
    Tilde,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TokenKind::Arrow => f.write_str("`=>`"),
            TokenKind::Bang => f.write_str("`!`"),
            TokenKind::BigInt(_) => f.write_str("BigInt literal"),
            TokenKind::BinOp(op) => write!(f, "`{op}`"),
            TokenKind::BinOpEq(op) => write!(f, "`{op}=`"),
            TokenKind::Close(Delim::Brace) => f.write_str("`}`"),
            TokenKind::Close(Delim::Bracket) => f.write_str("`]`"),
            TokenKind::Close(Delim::Paren) => f.write_str("`)`"),
            TokenKind::Colon => f.write_str("`:`"),
            TokenKind::Comma => f.write_str("`,`"),
            TokenKind::Dot => f.write_str("`.`"),
            TokenKind::DotDotDot => f.write_str("`...`"),
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Eq => f.write_str("`=`"),
            TokenKind::EqEq => f.write_str("`==`"),
            TokenKind::EqEqEq => f.write_str("`===`"),
            TokenKind::Float => f.write_str("number"),
            TokenKind::Gt => f.write_str("`>`"),
            TokenKind::Gte => f.write_str("`>=`"),
            TokenKind::Hash => f.write_str("`#`"),
            TokenKind::Ident => f.write_str("identifier"),
            TokenKind::Int(_) => f.write_str("number"),
            TokenKind::Keyword(keyword) => write!(f, "keyword `{keyword}`"),
            TokenKind::Lt => f.write_str("`<`"),
            TokenKind::Lte => f.write_str("`<=`"),
            TokenKind::MinusMinus => f.write_str("`--`"),
            TokenKind::Ne => f.write_str("`!=`"),
            TokenKind::NeEq => f.write_str("`!==`"),
            TokenKind::Open(Delim::Brace) => f.write_str("`{`"),
            TokenKind::Open(Delim::Bracket) => f.write_str("`[`"),
            TokenKind::Open(Delim::Paren) => f.write_str("`(`"),
            TokenKind::PlusPlus => f.write_str("`++`"),
            TokenKind::Question => f.write_str("`?`"),
            TokenKind::QuestionDot => f.write_str("`?.`"),
            TokenKind::Regex => f.write_str("regular expression"),
            TokenKind::Semi => f.write_str("`;`"),
            TokenKind::String => f.write_str("string"),
            TokenKind::TemplateComplete
            | TokenKind::TemplateHead
            | TokenKind::TemplateMiddle
            | TokenKind::TemplateTail => f.write_str("template"),
            TokenKind::Tilde => f.write_str("`~`"),
        }
    }
}

impl From<Number> for TokenKind {
    fn from(value: Number) -> Self {
        match value {
            Number::BigInt(radix) => Self::BigInt(radix),
            Number::Float => Self::Float,
            Number::Int(radix) => Self::Int(radix),
        }
    }
}

/// A binary operator with a compound-assignment form, like `+` and `+=`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub(crate) enum ClosedBinOp {
    /// `&`
    Amp,
    /// `&&`
    AmpAmp,
    /// `|`
    Bar,
    /// `||`
    BarBar,
    /// `^`
    Caret,
    /// `-`
    Minus,
    /// `%`
    Percent,
    /// `+`
    Plus,
    /// `??`
    QuestionQuestion,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `>>>`
    UShr,
}

impl Display for ClosedBinOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            ClosedBinOp::Amp => "&",
            ClosedBinOp::AmpAmp => "&&",
            ClosedBinOp::Bar => "|",
            ClosedBinOp::BarBar => "||",
            ClosedBinOp::Caret => "^",
            ClosedBinOp::Minus => "-",
            ClosedBinOp::Percent => "%",
            ClosedBinOp::Plus => "+",
            ClosedBinOp::QuestionQuestion => "??",
            ClosedBinOp::Shl => "<<",
            ClosedBinOp::Shr => ">>",
            ClosedBinOp::Slash => "/",
            ClosedBinOp::Star => "*",
            ClosedBinOp::StarStar => "**",
            ClosedBinOp::UShr => ">>>",
        })
    }
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    len: u32,
    newline: bool,
    tokens: Peekable<raw::Lexer<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            len: input
                .len()
                .try_into()
                .expect("input length should fit into u32"),
            newline: false,
            tokens: raw::Lexer::new(input).peekable(),
        }
    }

    fn offset(&mut self) -> u32 {
        self.tokens.peek().map_or(self.len, |t| t.offset)
    }

    fn next_if_eq(&mut self, single: Single) -> bool {
        self.tokens
            .next_if(|t| t.kind == raw::TokenKind::Single(single))
            .is_some()
    }

    fn expect(&mut self, single: Single, complete: TokenKind) -> Result<(), Error> {
        if self.next_if_eq(single) {
            Ok(())
        } else if let Some(&raw::Token { kind, offset }) = self.tokens.peek() {
            let mut tokens = self.tokens.clone();
            let hi = tokens.nth(1).map_or(self.len, |t| t.offset);
            let span = Span { lo: offset, hi };
            Err(Error::Incomplete(single, complete, Found::Token(kind), span))
        } else {
            let lo = self.len;
            let span = Span { lo, hi: lo };
            Err(Error::Incomplete(single, complete, Found::Eof, span))
        }
    }

    fn cook(&mut self, token: &raw::Token) -> Result<Option<TokenKind>, Error> {
        match token.kind {
            raw::TokenKind::Whitespace { newline } => {
                self.newline |= newline;
                Ok(None)
            }
            raw::TokenKind::Comment {
                terminated: true,
                newline,
            } => {
                self.newline |= newline;
                Ok(None)
            }
            raw::TokenKind::Comment {
                terminated: false, ..
            } => Err(Error::UnterminatedComment(Span {
                lo: token.offset,
                hi: token.offset,
            })),
            raw::TokenKind::Ident => {
                let ident = &self.input[token.offset as usize..self.offset() as usize];
                Ok(Some(
                    ident
                        .parse()
                        .map(TokenKind::Keyword)
                        .unwrap_or(TokenKind::Ident),
                ))
            }
            raw::TokenKind::Number(number) => Ok(Some(number.into())),
            raw::TokenKind::Regex { terminated: true } => Ok(Some(TokenKind::Regex)),
            raw::TokenKind::Regex { terminated: false } => Err(Error::UnterminatedRegex(Span {
                lo: token.offset,
                hi: token.offset,
            })),
            raw::TokenKind::String { terminated: true } => Ok(Some(TokenKind::String)),
            raw::TokenKind::String { terminated: false } => Err(Error::UnterminatedString(Span {
                lo: token.offset,
                hi: token.offset,
            })),
            raw::TokenKind::Template(start, Some(ending)) => {
                Ok(Some(match (start, ending) {
                    (TemplateStart::Backtick, TemplateEnding::Backtick) => {
                        TokenKind::TemplateComplete
                    }
                    (TemplateStart::Backtick, TemplateEnding::DollarBrace) => {
                        TokenKind::TemplateHead
                    }
                    (TemplateStart::RBrace, TemplateEnding::DollarBrace) => {
                        TokenKind::TemplateMiddle
                    }
                    (TemplateStart::RBrace, TemplateEnding::Backtick) => TokenKind::TemplateTail,
                }))
            }
            raw::TokenKind::Template(_, None) => Err(Error::UnterminatedTemplate(Span {
                lo: token.offset,
                hi: token.offset,
            })),
            raw::TokenKind::Single(single) => self.single(single).map(Some),
            raw::TokenKind::Unknown => {
                let c = self.input[token.offset as usize..]
                    .chars()
                    .next()
                    .expect("token offset should be the start of a character");
                let span = Span {
                    lo: token.offset,
                    hi: self.offset(),
                };
                Err(Error::Unknown(c, span))
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn single(&mut self, single: Single) -> Result<TokenKind, Error> {
        match single {
            Single::Amp => {
                if self.next_if_eq(Single::Amp) {
                    Ok(self.closed_bin_op(ClosedBinOp::AmpAmp))
                } else {
                    Ok(self.closed_bin_op(ClosedBinOp::Amp))
                }
            }
            Single::Bang => {
                if self.next_if_eq(Single::Eq) {
                    if self.next_if_eq(Single::Eq) {
                        Ok(TokenKind::NeEq)
                    } else {
                        Ok(TokenKind::Ne)
                    }
                } else {
                    Ok(TokenKind::Bang)
                }
            }
            Single::Bar => {
                if self.next_if_eq(Single::Bar) {
                    Ok(self.closed_bin_op(ClosedBinOp::BarBar))
                } else {
                    Ok(self.closed_bin_op(ClosedBinOp::Bar))
                }
            }
            Single::Caret => Ok(self.closed_bin_op(ClosedBinOp::Caret)),
            Single::Close(delim) => Ok(TokenKind::Close(delim)),
            Single::Colon => Ok(TokenKind::Colon),
            Single::Comma => Ok(TokenKind::Comma),
            Single::Dot => {
                if self.next_if_eq(Single::Dot) {
                    self.expect(Single::Dot, TokenKind::DotDotDot)?;
                    Ok(TokenKind::DotDotDot)
                } else {
                    Ok(TokenKind::Dot)
                }
            }
            Single::Eq => {
                if self.next_if_eq(Single::Eq) {
                    if self.next_if_eq(Single::Eq) {
                        Ok(TokenKind::EqEqEq)
                    } else {
                        Ok(TokenKind::EqEq)
                    }
                } else if self.next_if_eq(Single::Gt) {
                    Ok(TokenKind::Arrow)
                } else {
                    Ok(TokenKind::Eq)
                }
            }
            Single::Gt => {
                if self.next_if_eq(Single::Eq) {
                    Ok(TokenKind::Gte)
                } else if self.next_if_eq(Single::Gt) {
                    if self.next_if_eq(Single::Gt) {
                        Ok(self.closed_bin_op(ClosedBinOp::UShr))
                    } else {
                        Ok(self.closed_bin_op(ClosedBinOp::Shr))
                    }
                } else {
                    Ok(TokenKind::Gt)
                }
            }
            Single::Hash => Ok(TokenKind::Hash),
            Single::Lt => {
                if self.next_if_eq(Single::Eq) {
                    Ok(TokenKind::Lte)
                } else if self.next_if_eq(Single::Lt) {
                    Ok(self.closed_bin_op(ClosedBinOp::Shl))
                } else {
                    Ok(TokenKind::Lt)
                }
            }
            Single::Minus => {
                if self.next_if_eq(Single::Minus) {
                    Ok(TokenKind::MinusMinus)
                } else {
                    Ok(self.closed_bin_op(ClosedBinOp::Minus))
                }
            }
            Single::Open(delim) => Ok(TokenKind::Open(delim)),
            Single::Percent => Ok(self.closed_bin_op(ClosedBinOp::Percent)),
            Single::Plus => {
                if self.next_if_eq(Single::Plus) {
                    Ok(TokenKind::PlusPlus)
                } else {
                    Ok(self.closed_bin_op(ClosedBinOp::Plus))
                }
            }
            Single::Question => {
                if self.next_if_eq(Single::Dot) {
                    Ok(TokenKind::QuestionDot)
                } else if self.next_if_eq(Single::Question) {
                    Ok(self.closed_bin_op(ClosedBinOp::QuestionQuestion))
                } else {
                    Ok(TokenKind::Question)
                }
            }
            Single::Semi => Ok(TokenKind::Semi),
            Single::Slash => Ok(self.closed_bin_op(ClosedBinOp::Slash)),
            Single::Star => {
                if self.next_if_eq(Single::Star) {
                    Ok(self.closed_bin_op(ClosedBinOp::StarStar))
                } else {
                    Ok(self.closed_bin_op(ClosedBinOp::Star))
                }
            }
            Single::Tilde => Ok(TokenKind::Tilde),
        }
    }

    fn closed_bin_op(&mut self, op: ClosedBinOp) -> TokenKind {
        if self.next_if_eq(Single::Eq) {
            TokenKind::BinOpEq(op)
        } else {
            TokenKind::BinOp(op)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(token) = self.tokens.next() {
            match self.cook(&token) {
                Ok(None) => {}
                Ok(Some(kind)) => {
                    let newline_before = self.newline;
                    self.newline = false;
                    return Some(Ok(Token {
                        kind,
                        span: Span {
                            lo: token.offset,
                            hi: self.offset(),
                        },
                        newline_before,
                    }));
                }
                Err(err) => return Some(Err(err)),
            }
        }

        None
    }
}
