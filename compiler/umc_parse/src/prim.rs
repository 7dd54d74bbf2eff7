// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{Error, Parser, Result};
use crate::{
    lex::{Delim, TokenKind},
    scan::ParserContext,
    ErrorKind,
};
use umc_ast::ast::{Ident, Name, NodeId, ObjectPatProp, ObjectPatPropKind, Pat, PatKind, PropKey};

pub(super) fn token(s: &mut ParserContext, t: TokenKind) -> Result<()> {
    if s.peek().kind == t {
        s.advance();
        Ok(())
    } else {
        Err(Error(ErrorKind::Token(t, s.peek().kind, s.peek().span)))
    }
}

/// Consumes the current token if it is the identifier `word`. Contextual keywords (`of`, `as`,
/// `from`, `async`, `get`, `set`, `static`) lex as plain identifiers, so this is how the
/// grammar reaches them.
pub(super) fn eat_word(s: &mut ParserContext, word: &str) -> bool {
    if s.peek().kind == TokenKind::Ident && s.read() == word {
        s.advance();
        true
    } else {
        false
    }
}

pub(super) fn peek_word(s: &ParserContext, word: &str) -> bool {
    s.peek().kind == TokenKind::Ident && s.read() == word
}

pub(super) fn ident(s: &mut ParserContext) -> Result<Box<Ident>> {
    let peek = s.peek();
    if peek.kind == TokenKind::Ident {
        let name = s.read().into();
        s.advance();
        Ok(Box::new(Ident {
            id: NodeId::default(),
            span: peek.span,
            name,
        }))
    } else {
        Err(Error(ErrorKind::Rule("identifier", peek.kind, peek.span)))
    }
}

/// Parses an identifier or keyword token as a plain [`Name`]. Member accesses, property keys,
/// and import/export external names admit keywords (`a.new`, `{ default: x }`).
pub(super) fn name(s: &mut ParserContext) -> Result<Box<Name>> {
    let peek = s.peek();
    match peek.kind {
        TokenKind::Ident | TokenKind::Keyword(_) => {
            let name = s.read().into();
            s.advance();
            Ok(Box::new(Name {
                id: NodeId::default(),
                span: peek.span,
                name,
            }))
        }
        _ => Err(Error(ErrorKind::Rule("name", peek.kind, peek.span))),
    }
}

/// Parses a private name `#x`.
pub(super) fn private_name(s: &mut ParserContext) -> Result<Box<Name>> {
    let lo = s.peek().span.lo;
    token(s, TokenKind::Hash)?;
    let id = ident(s)?;
    Ok(Box::new(Name {
        id: NodeId::default(),
        span: s.span(lo),
        name: format!("#{}", id.name).into(),
    }))
}

/// Optionally parse with the given parser.
/// Returns Ok(Some(value)) if the parser succeeded,
/// Ok(None) if the parser failed on the first token,
/// Err(error) if the parser failed after consuming some tokens.
pub(super) fn opt<T>(s: &mut ParserContext, mut p: impl Parser<T>) -> Result<Option<T>> {
    let offset = s.peek().span.lo;
    match p(s) {
        Ok(x) => Ok(Some(x)),
        Err(error) if advanced(s, offset) => Err(error),
        Err(_) => Ok(None),
    }
}

pub(super) fn many<T>(s: &mut ParserContext, mut p: impl Parser<T>) -> Result<Vec<T>> {
    let mut xs = Vec::new();
    while let Some(x) = opt(s, &mut p)? {
        xs.push(x);
    }
    Ok(xs)
}

/// Parses a sequence of items separated by commas. A trailing comma is accepted, as
/// everywhere in the language.
pub(super) fn seq<T>(s: &mut ParserContext, mut p: impl Parser<T>) -> Result<Vec<T>> {
    let mut xs = Vec::new();
    while let Some(x) = opt(s, &mut p)? {
        xs.push(x);
        if token(s, TokenKind::Comma).is_err() {
            break;
        }
    }
    Ok(xs)
}

/// Parses a binding pattern without a default: an identifier, array pattern, or object
/// pattern.
pub(super) fn pat(s: &mut ParserContext) -> Result<Box<Pat>> {
    let peek = s.peek();
    let lo = peek.span.lo;
    let kind = if peek.kind == TokenKind::Ident {
        PatKind::Ident(ident(s)?)
    } else if token(s, TokenKind::Open(Delim::Bracket)).is_ok() {
        let elements = array_pat_elements(s)?;
        token(s, TokenKind::Close(Delim::Bracket))?;
        PatKind::Array(elements.into_boxed_slice())
    } else if token(s, TokenKind::Open(Delim::Brace)).is_ok() {
        let props = seq(s, object_pat_prop)?;
        token(s, TokenKind::Close(Delim::Brace))?;
        PatKind::Object(props.into_boxed_slice())
    } else {
        return Err(Error(ErrorKind::Rule("pattern", peek.kind, peek.span)));
    };

    Ok(Box::new(Pat {
        id: NodeId::default(),
        span: s.span(lo),
        kind: Box::new(kind),
    }))
}

/// Parses a binding pattern with an optional `= default` initializer.
pub(super) fn pat_with_default(s: &mut ParserContext) -> Result<Box<Pat>> {
    let lo = s.peek().span.lo;
    let pat = pat(s)?;
    if token(s, TokenKind::Eq).is_ok() {
        let default = crate::expr::expr_single(s)?;
        Ok(Box::new(Pat {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(PatKind::Assign(pat, default)),
        }))
    } else {
        Ok(pat)
    }
}

/// Parses a rest or defaulted pattern, as found in array patterns and parameter lists.
pub(super) fn pat_element(s: &mut ParserContext) -> Result<Box<Pat>> {
    let peek = s.peek();
    if token(s, TokenKind::DotDotDot).is_ok() {
        let inner = pat(s)?;
        Ok(Box::new(Pat {
            id: NodeId::default(),
            span: s.span(peek.span.lo),
            kind: Box::new(PatKind::Rest(inner)),
        }))
    } else {
        pat_with_default(s)
    }
}

fn array_pat_elements(s: &mut ParserContext) -> Result<Vec<Option<Box<Pat>>>> {
    let mut elements = Vec::new();
    loop {
        if s.peek().kind == TokenKind::Close(Delim::Bracket) {
            break;
        }
        if token(s, TokenKind::Comma).is_ok() {
            elements.push(None);
            continue;
        }
        elements.push(Some(pat_element(s)?));
        if token(s, TokenKind::Comma).is_err() {
            break;
        }
        while token(s, TokenKind::Comma).is_ok() {
            elements.push(None);
        }
    }
    Ok(elements)
}

fn object_pat_prop(s: &mut ParserContext) -> Result<ObjectPatProp> {
    let peek = s.peek();
    let lo = peek.span.lo;

    let kind = if token(s, TokenKind::DotDotDot).is_ok() {
        ObjectPatPropKind::Rest(pat(s)?)
    } else if peek.kind == TokenKind::Ident {
        let local = ident(s)?;
        if token(s, TokenKind::Colon).is_ok() {
            let key = PropKey::Name(Box::new(Name {
                id: NodeId::default(),
                span: local.span,
                name: local.name,
            }));
            ObjectPatPropKind::KeyValue(key, pat_with_default(s)?)
        } else if token(s, TokenKind::Eq).is_ok() {
            ObjectPatPropKind::Shorthand(local, Some(crate::expr::expr_single(s)?))
        } else {
            ObjectPatPropKind::Shorthand(local, None)
        }
    } else {
        let key = prop_key(s)?;
        token(s, TokenKind::Colon)?;
        ObjectPatPropKind::KeyValue(key, pat_with_default(s)?)
    };

    Ok(ObjectPatProp {
        id: NodeId::default(),
        span: s.span(lo),
        kind,
    })
}

/// Parses a property key: a name, string or numeric literal, computed key, or private name.
pub(super) fn prop_key(s: &mut ParserContext) -> Result<PropKey> {
    let peek = s.peek();
    match peek.kind {
        TokenKind::Ident | TokenKind::Keyword(_) => Ok(PropKey::Name(name(s)?)),
        TokenKind::String => {
            let raw = s.read().into();
            s.advance();
            Ok(PropKey::Str(Box::new(Name {
                id: NodeId::default(),
                span: peek.span,
                name: raw,
            })))
        }
        TokenKind::Int(_) | TokenKind::Float | TokenKind::BigInt(_) => {
            let raw = s.read().into();
            s.advance();
            Ok(PropKey::Num(Box::new(Name {
                id: NodeId::default(),
                span: peek.span,
                name: raw,
            })))
        }
        TokenKind::Open(Delim::Bracket) => {
            s.advance();
            let key = crate::expr::expr_single(s)?;
            token(s, TokenKind::Close(Delim::Bracket))?;
            Ok(PropKey::Computed(key))
        }
        TokenKind::Hash => Ok(PropKey::Private(private_name(s)?)),
        _ => Err(Error(ErrorKind::Rule("property key", peek.kind, peek.span))),
    }
}

fn advanced(s: &ParserContext, from: u32) -> bool {
    s.peek().span.lo > from
}

pub(super) fn shorten(from_start: usize, from_end: usize, s: &str) -> &str {
    &s[from_start..s.len() - from_end]
}

pub(super) fn map_rule_name(name: &'static str, error: Error) -> Error {
    Error(match error.0 {
        ErrorKind::Rule(_, found, span) => ErrorKind::Rule(name, found, span),
        ErrorKind::Convert(_, found, span) => ErrorKind::Convert(name, found, span),
        kind => kind,
    })
}
