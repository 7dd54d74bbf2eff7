// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The unmangle parser uses recursive descent to turn an input string into an ECMAScript
//! abstract syntax tree. The parser produces a tree with placeholder node identifiers that are
//! expected to be replaced with unique identifiers by a later stage.

mod expr;
mod keyword;
mod lex;
mod module;
mod prim;
mod scan;
mod stmt;
#[cfg(test)]
mod tests;

use lex::TokenKind;
use miette::Diagnostic;
use scan::ParserContext;
use std::result;
use thiserror::Error;
use umc_ast::ast::{Module, SourceType};
use umc_data_structures::span::Span;

#[derive(Clone, Copy, Debug, Diagnostic, Eq, Error, PartialEq)]
#[error(transparent)]
#[diagnostic(transparent)]
pub struct Error(ErrorKind);

#[derive(Clone, Copy, Debug, Diagnostic, Eq, Error, PartialEq)]
enum ErrorKind {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(lex::Error),
    #[error("invalid {0} literal")]
    #[diagnostic(code("umc.parse.literal"))]
    Lit(&'static str, #[label] Span),
    #[error("expected {0}, found {1}")]
    #[diagnostic(code("umc.parse.token"))]
    Token(TokenKind, TokenKind, #[label] Span),
    #[error("expected {0}, found {1}")]
    #[diagnostic(code("umc.parse.rule"))]
    Rule(&'static str, TokenKind, #[label] Span),
    #[error("expected {0}, found {1}")]
    #[diagnostic(code("umc.parse.convert"))]
    Convert(&'static str, &'static str, #[label] Span),
    #[error("expected statement to end with a semicolon")]
    #[diagnostic(code("umc.parse.missing_semi"))]
    MissingSemi(#[label] Span),
    #[error("import and export declarations require a module source")]
    #[diagnostic(code("umc.parse.module_syntax"))]
    ModuleSyntax(#[label] Span),
}

type Result<T> = result::Result<T, Error>;

trait Parser<T>: FnMut(&mut ParserContext) -> Result<T> {}

impl<T, F: FnMut(&mut ParserContext) -> Result<T>> Parser<T> for F {}

/// Parses a complete source file under the given parse goal.
///
/// The returned module is valid only when the error list is empty; parse errors leave behind a
/// partial tree that callers should discard.
#[must_use]
pub fn module(input: &str, source_type: SourceType) -> (Module, Vec<Error>) {
    let mut scanner = ParserContext::new(input, source_type);
    match module::parse_module(&mut scanner, source_type) {
        Ok(module) => (module, scanner.into_errors()),
        Err(error) => {
            let mut errors = scanner.into_errors();
            errors.push(error);
            (Module::default(), errors)
        }
    }
}
