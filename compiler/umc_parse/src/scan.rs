// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::Error;
use crate::{
    lex::{Lexer, Token, TokenKind},
    ErrorKind,
};
use umc_ast::ast::SourceType;
use umc_data_structures::span::Span;

pub(super) struct ParserContext<'a> {
    input: &'a str,
    tokens: Lexer<'a>,
    errors: Vec<Error>,
    peek: Token,
    offset: u32,
    source_type: SourceType,
    /// True while parsing the init clause of a `for` head, where `in` is not an operator.
    no_in: bool,
}

impl<'a> ParserContext<'a> {
    pub(super) fn new(input: &'a str, source_type: SourceType) -> Self {
        let mut tokens = Lexer::new(input);
        let (peek, errors) = next_ok(&mut tokens);
        Self {
            input,
            tokens,
            errors: errors
                .into_iter()
                .map(|e| Error(ErrorKind::Lex(e)))
                .collect(),
            peek: peek.unwrap_or_else(|| eof(input.len())),
            offset: 0,
            source_type,
            no_in: false,
        }
    }

    pub(super) fn peek(&self) -> Token {
        self.peek
    }

    pub(super) fn read(&self) -> &'a str {
        &self.input[self.peek.span]
    }

    pub(super) fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub(super) fn span(&self, from: u32) -> Span {
        Span {
            lo: from,
            hi: self.offset,
        }
    }

    pub(super) fn advance(&mut self) {
        if self.peek.kind != TokenKind::Eof {
            self.offset = self.peek.span.hi;
            let (peek, errors) = next_ok(&mut self.tokens);
            self.errors
                .extend(errors.into_iter().map(|e| Error(ErrorKind::Lex(e))));
            self.peek = peek.unwrap_or_else(|| eof(self.input.len()));
        }
    }

    /// True if a line terminator appeared before the current token, which matters for
    /// automatic semicolon insertion and the restricted productions.
    pub(super) fn newline_before(&self) -> bool {
        self.peek.newline_before
    }

    pub(super) fn no_in(&self) -> bool {
        self.no_in
    }

    pub(super) fn with_no_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let old = self.no_in;
        self.no_in = true;
        let result = f(self);
        self.no_in = old;
        result
    }

    pub(super) fn push_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub(super) fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

fn eof(offset: usize) -> Token {
    let offset = offset.try_into().expect("eof offset should fit into u32");
    Token {
        kind: TokenKind::Eof,
        span: Span {
            lo: offset,
            hi: offset,
        },
        newline_before: false,
    }
}

/// Advances the iterator by skipping [`Err`] values until the first [`Ok`] value is found.
/// Returns the found value or [`None`] if the iterator is exhausted. All skipped errors are
/// also accumulated into a vector and returned.
fn next_ok<T, E>(iter: impl Iterator<Item = Result<T, E>>) -> (Option<T>, Vec<E>) {
    let mut errors = Vec::new();
    for result in iter {
        match result {
            Ok(v) => return (Some(v), errors),
            Err(e) => errors.push(e),
        }
    }

    (None, errors)
}
