// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Expression parsing makes use of Pratt parsing (or "top-down operator-precedence parsing")
//! to handle relative precedence of operators.

use crate::{
    keyword::Keyword,
    lex::{ClosedBinOp, Delim, Radix, TokenKind},
    prim::{
        ident, map_rule_name, name, opt, pat_element, peek_word, private_name, prop_key, seq,
        shorten, token,
    },
    scan::ParserContext,
    stmt, Error, ErrorKind, Result,
};
use num_bigint::BigInt;
use num_traits::Num;
use std::rc::Rc;
use umc_ast::ast::{
    Arrow, ArrowBody, BinOp, Class, ClassMember, ClassMemberKind, Expr, ExprKind, Func, Ident,
    Lit, MemberProp, MethodKind, Name, NodeId, ObjectPatProp, ObjectPatPropKind, Pat, PatKind,
    Prop, PropKey, PropKind, Template, UnOp, UpdateOp,
};
use umc_data_structures::span::Span;

const SEQ_PRECEDENCE: u8 = 1;
const ASSIGN_PRECEDENCE: u8 = 2;
const EXP_PRECEDENCE: u8 = 14;
const UNARY_PRECEDENCE: u8 = 15;
const POSTFIX_PRECEDENCE: u8 = 16;
const CALL_PRECEDENCE: u8 = 17;

struct PrefixOp {
    kind: PrefixKind,
    precedence: u8,
}

enum PrefixKind {
    Unary(UnOp),
    Update(UpdateOp),
    Await,
}

struct MixfixOp {
    kind: OpKind,
    precedence: u8,
}

enum OpKind {
    Postfix(UpdateOp),
    Binary(BinOp, Assoc),
    Assign(Option<BinOp>),
    Rich(fn(&mut ParserContext, Box<Expr>) -> Result<Box<ExprKind>>),
    /// A tagged template. The template parser consumes its own tokens, so the operator token
    /// must not be advanced past beforehand.
    Tagged,
}

#[derive(Clone, Copy)]
enum Assoc {
    Left,
    Right,
}

/// Parses a full expression, including the comma operator.
pub(super) fn expr(s: &mut ParserContext) -> Result<Box<Expr>> {
    expr_op(s, SEQ_PRECEDENCE)
}

/// Parses a single assignment expression, stopping before any comma operator.
pub(super) fn expr_single(s: &mut ParserContext) -> Result<Box<Expr>> {
    expr_op(s, ASSIGN_PRECEDENCE)
}

fn expr_op(s: &mut ParserContext, min_precedence: u8) -> Result<Box<Expr>> {
    let lo = s.peek().span.lo;
    let lhs = if let Some(op) = prefix_op(s) {
        s.advance();
        let rhs = expr_op(s, op.precedence)?;
        let kind = match op.kind {
            PrefixKind::Unary(un) => ExprKind::Unary(un, rhs),
            PrefixKind::Update(update) => ExprKind::Update(update, true, rhs),
            PrefixKind::Await => ExprKind::Await(rhs),
        };
        Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(kind),
        })
    } else {
        expr_base(s)?
    };

    expr_suffix(s, lhs, lo, min_precedence)
}

/// Continues Pratt parsing with an already-parsed left-hand side. Also the entry point for
/// statement parsing that has committed to an expression head, like dynamic `import(…)`.
pub(super) fn expr_suffix(
    s: &mut ParserContext,
    mut lhs: Box<Expr>,
    lo: u32,
    min_precedence: u8,
) -> Result<Box<Expr>> {
    while let Some(op) = mixfix_op(s) {
        if op.precedence < min_precedence {
            break;
        }

        let kind = match op.kind {
            OpKind::Tagged => Box::new(ExprKind::TaggedTemplate(lhs, template(s)?)),
            OpKind::Postfix(update) => {
                s.advance();
                Box::new(ExprKind::Update(update, false, lhs))
            }
            OpKind::Binary(bin, assoc) => {
                s.advance();
                let precedence = next_precedence(op.precedence, assoc);
                let rhs = expr_op(s, precedence)?;
                Box::new(ExprKind::Bin(bin, lhs, rhs))
            }
            OpKind::Assign(bin) => {
                s.advance();
                let rhs = expr_op(s, op.precedence)?;
                Box::new(ExprKind::Assign(bin, lhs, rhs))
            }
            OpKind::Rich(f) => {
                s.advance();
                f(s, lhs)?
            }
        };

        lhs = Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind,
        });
    }

    Ok(lhs)
}

#[allow(clippy::too_many_lines)]
fn expr_base(s: &mut ParserContext) -> Result<Box<Expr>> {
    let lo = s.peek().span.lo;
    let kind = if s.peek().kind == TokenKind::Open(Delim::Paren) {
        return paren_or_arrow(s);
    } else if token(s, TokenKind::Open(Delim::Bracket)).is_ok() {
        let elements = array_elements(s)?;
        token(s, TokenKind::Close(Delim::Bracket))?;
        Ok(ExprKind::Array(elements.into_boxed_slice()))
    } else if s.peek().kind == TokenKind::Open(Delim::Brace) {
        object(s)
    } else if token(s, TokenKind::Keyword(Keyword::Function)).is_ok() {
        function_expr(s, false)
    } else if token(s, TokenKind::Keyword(Keyword::Class)).is_ok() {
        let name = opt(s, ident)?;
        let class = class_tail(s)?;
        Ok(ExprKind::Class(name, Box::new(class)))
    } else if token(s, TokenKind::Keyword(Keyword::New)).is_ok() {
        new_expr(s)
    } else if token(s, TokenKind::Keyword(Keyword::This)).is_ok() {
        Ok(ExprKind::This)
    } else if token(s, TokenKind::Keyword(Keyword::Super)).is_ok() {
        Ok(ExprKind::Super)
    } else if token(s, TokenKind::Keyword(Keyword::Import)).is_ok() {
        if token(s, TokenKind::Dot).is_ok() {
            let meta = name(s)?;
            if meta.name.as_ref() != "meta" {
                return Err(Error(ErrorKind::Rule(
                    "`meta`",
                    s.peek().kind,
                    meta.span,
                )));
            }
            Ok(ExprKind::ImportMeta)
        } else {
            token(s, TokenKind::Open(Delim::Paren))?;
            let argument = expr_single(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            Ok(ExprKind::ImportCall(argument))
        }
    } else if token(s, TokenKind::Keyword(Keyword::Yield)).is_ok() {
        yield_expr(s)
    } else if let Some(lit) = lit(s)? {
        Ok(ExprKind::Lit(lit))
    } else if s.peek().kind == TokenKind::TemplateComplete
        || s.peek().kind == TokenKind::TemplateHead
    {
        Ok(ExprKind::Template(template(s)?))
    } else if s.peek().kind == TokenKind::Ident {
        let id = ident(s)?;
        if id.name.as_ref() == "async" && !s.newline_before() {
            if token(s, TokenKind::Keyword(Keyword::Function)).is_ok() {
                function_expr(s, true)
            } else if s.peek().kind == TokenKind::Ident {
                let param = ident(s)?;
                token(s, TokenKind::Arrow)?;
                Ok(*arrow_tail(s, true, vec![ident_pat(param)], lo)?)
            } else {
                Ok(ExprKind::Ident(id))
            }
        } else {
            Ok(ExprKind::Ident(id))
        }
    } else {
        Err(Error(ErrorKind::Rule(
            "expression",
            s.peek().kind,
            s.peek().span,
        )))
    }?;

    Ok(Box::new(Expr {
        id: NodeId::default(),
        span: s.span(lo),
        kind: Box::new(kind),
    }))
}

/// Parses `(…)` as either a parenthesized expression or an arrow-function parameter list,
/// deciding when the closing parenthesis is followed by `=>`.
fn paren_or_arrow(s: &mut ParserContext) -> Result<Box<Expr>> {
    let lo = s.peek().span.lo;
    token(s, TokenKind::Open(Delim::Paren))?;

    if token(s, TokenKind::Close(Delim::Paren)).is_ok() {
        token(s, TokenKind::Arrow)?;
        let kind = arrow_tail(s, false, Vec::new(), lo)?;
        return Ok(Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(*kind),
        }));
    }

    let elements = seq(s, arg)?;
    token(s, TokenKind::Close(Delim::Paren))?;

    if s.peek().kind == TokenKind::Arrow {
        s.advance();
        let params = elements
            .into_iter()
            .map(expr_to_pat)
            .collect::<Result<Vec<_>>>()?;
        let kind = arrow_tail(s, false, params, lo)?;
        return Ok(Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(*kind),
        }));
    }

    let mut elements = elements;
    let inner = if elements.len() == 1 {
        elements.pop().expect("vector should have exactly one item")
    } else {
        Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(ExprKind::Seq(elements.into_boxed_slice())),
        })
    };

    if let ExprKind::Spread(_) = &*inner.kind {
        return Err(Error(ErrorKind::Convert(
            "expression",
            "rest element",
            inner.span,
        )));
    }

    Ok(Box::new(Expr {
        id: NodeId::default(),
        span: s.span(lo),
        kind: Box::new(ExprKind::Paren(inner)),
    }))
}

fn arrow_tail(
    s: &mut ParserContext,
    is_async: bool,
    params: Vec<Box<Pat>>,
    lo: u32,
) -> Result<Box<ExprKind>> {
    let body = if s.peek().kind == TokenKind::Open(Delim::Brace) {
        ArrowBody::Block(stmt::parse_block(s)?)
    } else {
        ArrowBody::Expr(expr_op(s, ASSIGN_PRECEDENCE)?)
    };

    Ok(Box::new(ExprKind::Arrow(Box::new(Arrow {
        id: NodeId::default(),
        span: s.span(lo),
        is_async,
        params: params.into_boxed_slice(),
        body,
    }))))
}

fn ident_pat(id: Box<Ident>) -> Box<Pat> {
    let span = id.span;
    Box::new(Pat {
        id: NodeId::default(),
        span,
        kind: Box::new(PatKind::Ident(id)),
    })
}

/// Converts an expression that was parsed under the arrow-function cover grammar into the
/// parameter pattern it actually denotes.
fn expr_to_pat(expr: Box<Expr>) -> Result<Box<Pat>> {
    let span = expr.span;
    let kind = match *expr.kind {
        ExprKind::Ident(id) => PatKind::Ident(id),
        ExprKind::Assign(None, target, value) => PatKind::Assign(expr_to_pat(target)?, value),
        ExprKind::Spread(inner) => PatKind::Rest(expr_to_pat(inner)?),
        ExprKind::Paren(inner) => return expr_to_pat(inner),
        ExprKind::Array(elements) => {
            let elements = elements
                .into_vec()
                .into_iter()
                .map(|e| e.map(expr_to_pat).transpose())
                .collect::<Result<Vec<_>>>()?;
            PatKind::Array(elements.into_boxed_slice())
        }
        ExprKind::Object(props) => {
            let props = props
                .into_vec()
                .into_iter()
                .map(prop_to_pat)
                .collect::<Result<Vec<_>>>()?;
            PatKind::Object(props.into_boxed_slice())
        }
        _ => {
            return Err(Error(ErrorKind::Convert("pattern", "expression", span)));
        }
    };

    Ok(Box::new(Pat {
        id: NodeId::default(),
        span,
        kind: Box::new(kind),
    }))
}

fn prop_to_pat(prop: Prop) -> Result<ObjectPatProp> {
    let kind = match prop.kind {
        PropKind::Shorthand(id, default) => ObjectPatPropKind::Shorthand(id, default),
        PropKind::KeyValue(key, value) => ObjectPatPropKind::KeyValue(key, expr_to_pat(value)?),
        PropKind::Spread(inner) => ObjectPatPropKind::Rest(expr_to_pat(inner)?),
        PropKind::Method(..) => {
            return Err(Error(ErrorKind::Convert("pattern", "method", prop.span)));
        }
    };

    Ok(ObjectPatProp {
        id: prop.id,
        span: prop.span,
        kind,
    })
}

fn yield_expr(s: &mut ParserContext) -> Result<ExprKind> {
    if s.newline_before() {
        return Ok(ExprKind::Yield(None, false));
    }

    let delegate = matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star));
    if delegate {
        s.advance();
        return Ok(ExprKind::Yield(Some(expr_op(s, ASSIGN_PRECEDENCE)?), true));
    }

    match opt(s, |s| expr_op(s, ASSIGN_PRECEDENCE))? {
        Some(operand) => Ok(ExprKind::Yield(Some(operand), false)),
        None => Ok(ExprKind::Yield(None, false)),
    }
}

/// Parses the callee of a `new` expression: member accesses bind to the callee, and the first
/// argument list belongs to the `new`.
fn new_expr(s: &mut ParserContext) -> Result<ExprKind> {
    if token(s, TokenKind::Dot).is_ok() {
        let target = name(s)?;
        if target.name.as_ref() != "target" {
            return Err(Error(ErrorKind::Rule(
                "`target`",
                s.peek().kind,
                target.span,
            )));
        }
        return Ok(ExprKind::NewTarget);
    }

    let lo = s.peek().span.lo;
    let mut callee = expr_base(s)?;

    loop {
        if token(s, TokenKind::Dot).is_ok() {
            let prop = member_prop(s)?;
            callee = Box::new(Expr {
                id: NodeId::default(),
                span: s.span(lo),
                kind: Box::new(ExprKind::Member(callee, prop, false)),
            });
        } else if token(s, TokenKind::Open(Delim::Bracket)).is_ok() {
            let index = expr(s)?;
            token(s, TokenKind::Close(Delim::Bracket))?;
            callee = Box::new(Expr {
                id: NodeId::default(),
                span: s.span(lo),
                kind: Box::new(ExprKind::Member(
                    callee,
                    MemberProp::Computed(index),
                    false,
                )),
            });
        } else {
            break;
        }
    }

    let args = if token(s, TokenKind::Open(Delim::Paren)).is_ok() {
        let args = seq(s, arg)?;
        token(s, TokenKind::Close(Delim::Paren))?;
        Some(args.into_boxed_slice())
    } else {
        None
    };

    Ok(ExprKind::New(callee, args))
}

fn member_prop(s: &mut ParserContext) -> Result<MemberProp> {
    if s.peek().kind == TokenKind::Hash {
        Ok(MemberProp::Private(private_name(s)?))
    } else {
        Ok(MemberProp::Name(
            name(s).map_err(|e| map_rule_name("member name", e))?,
        ))
    }
}

/// Parses a call or spread argument.
fn arg(s: &mut ParserContext) -> Result<Box<Expr>> {
    let lo = s.peek().span.lo;
    if token(s, TokenKind::DotDotDot).is_ok() {
        let inner = expr_single(s)?;
        Ok(Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(ExprKind::Spread(inner)),
        }))
    } else {
        expr_single(s)
    }
}

fn array_elements(s: &mut ParserContext) -> Result<Vec<Option<Box<Expr>>>> {
    let mut elements = Vec::new();
    loop {
        if s.peek().kind == TokenKind::Close(Delim::Bracket) {
            break;
        }
        if token(s, TokenKind::Comma).is_ok() {
            elements.push(None);
            continue;
        }
        elements.push(Some(arg(s)?));
        if token(s, TokenKind::Comma).is_err() {
            break;
        }
        while s.peek().kind == TokenKind::Comma {
            s.advance();
            elements.push(None);
        }
    }
    Ok(elements)
}

fn object(s: &mut ParserContext) -> Result<ExprKind> {
    token(s, TokenKind::Open(Delim::Brace))?;
    let props = seq(s, object_prop)?;
    token(s, TokenKind::Close(Delim::Brace))?;
    Ok(ExprKind::Object(props.into_boxed_slice()))
}

#[allow(clippy::too_many_lines)]
fn object_prop(s: &mut ParserContext) -> Result<Prop> {
    let peek = s.peek();
    let lo = peek.span.lo;

    let kind = if token(s, TokenKind::DotDotDot).is_ok() {
        PropKind::Spread(expr_single(s)?)
    } else if matches!(peek.kind, TokenKind::BinOp(ClosedBinOp::Star)) {
        s.advance();
        let key = prop_key(s)?;
        PropKind::Method(MethodKind::Method, key, method_func(s, false, true, lo)?)
    } else if peek.kind == TokenKind::Ident {
        let id = ident(s)?;
        let word = Rc::clone(&id.name);
        match s.peek().kind {
            TokenKind::Colon => {
                s.advance();
                let key = name_key(&id);
                PropKind::KeyValue(key, expr_single(s)?)
            }
            TokenKind::Open(Delim::Paren) => {
                let key = name_key(&id);
                PropKind::Method(MethodKind::Method, key, method_func(s, false, false, lo)?)
            }
            TokenKind::Eq => {
                s.advance();
                PropKind::Shorthand(id, Some(expr_single(s)?))
            }
            TokenKind::Comma | TokenKind::Close(Delim::Brace) => PropKind::Shorthand(id, None),
            _ if word.as_ref() == "get" || word.as_ref() == "set" => {
                let kind = if word.as_ref() == "get" {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                };
                let key = prop_key(s)?;
                PropKind::Method(kind, key, method_func(s, false, false, lo)?)
            }
            _ if word.as_ref() == "async" => {
                let is_generator = if matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star))
                {
                    s.advance();
                    true
                } else {
                    false
                };
                let key = prop_key(s)?;
                PropKind::Method(
                    MethodKind::Method,
                    key,
                    method_func(s, true, is_generator, lo)?,
                )
            }
            _ => {
                return Err(Error(ErrorKind::Rule(
                    "property",
                    s.peek().kind,
                    s.peek().span,
                )));
            }
        }
    } else {
        let key = prop_key(s)?;
        if token(s, TokenKind::Colon).is_ok() {
            PropKind::KeyValue(key, expr_single(s)?)
        } else if s.peek().kind == TokenKind::Open(Delim::Paren) {
            PropKind::Method(MethodKind::Method, key, method_func(s, false, false, lo)?)
        } else {
            return Err(Error(ErrorKind::Rule(
                "property",
                s.peek().kind,
                s.peek().span,
            )));
        }
    };

    Ok(Prop {
        id: NodeId::default(),
        span: s.span(lo),
        kind,
    })
}

fn name_key(id: &Ident) -> PropKey {
    PropKey::Name(Box::new(Name {
        id: NodeId::default(),
        span: id.span,
        name: Rc::clone(&id.name),
    }))
}

/// Parses a parameter list and body into a method's function node.
fn method_func(
    s: &mut ParserContext,
    is_async: bool,
    is_generator: bool,
    lo: u32,
) -> Result<Box<Func>> {
    let params = params(s)?;
    let body = stmt::parse_block(s)?;
    Ok(Box::new(Func {
        id: NodeId::default(),
        span: s.span(lo),
        is_async,
        is_generator,
        params,
        body,
    }))
}

pub(super) fn params(s: &mut ParserContext) -> Result<Box<[Box<Pat>]>> {
    token(s, TokenKind::Open(Delim::Paren))?;
    let params = seq(s, pat_element)?;
    token(s, TokenKind::Close(Delim::Paren))?;
    Ok(params.into_boxed_slice())
}

/// Parses a function expression after the `function` keyword has been consumed.
fn function_expr(s: &mut ParserContext, is_async: bool) -> Result<ExprKind> {
    let (name, func) = function_parts(s, is_async)?;
    Ok(ExprKind::Func(name, func))
}

/// Parses the remainder of a function after the `function` keyword: an optional `*`, an
/// optional name, the parameter list, and the body.
pub(super) fn function_parts(
    s: &mut ParserContext,
    is_async: bool,
) -> Result<(Option<Box<Ident>>, Box<Func>)> {
    let lo = s.peek().span.lo;
    let is_generator = if matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star)) {
        s.advance();
        true
    } else {
        false
    };
    let name = opt(s, ident)?;
    let params = params(s)?;
    let body = stmt::parse_block(s)?;
    Ok((
        name,
        Box::new(Func {
            id: NodeId::default(),
            span: s.span(lo),
            is_async,
            is_generator,
            params,
            body,
        }),
    ))
}

/// Parses the heritage clause and body of a class, after the name.
pub(super) fn class_tail(s: &mut ParserContext) -> Result<Class> {
    let lo = s.peek().span.lo;
    let parent = if token(s, TokenKind::Keyword(Keyword::Extends)).is_ok() {
        Some(expr_op(s, CALL_PRECEDENCE)?)
    } else {
        None
    };

    token(s, TokenKind::Open(Delim::Brace))?;
    let mut members = Vec::new();
    loop {
        if s.peek().kind == TokenKind::Close(Delim::Brace) {
            break;
        }
        if token(s, TokenKind::Semi).is_ok() {
            continue;
        }
        members.push(class_member(s)?);
    }
    token(s, TokenKind::Close(Delim::Brace))?;

    Ok(Class {
        id: NodeId::default(),
        span: s.span(lo),
        parent,
        members: members.into_boxed_slice(),
    })
}

#[allow(clippy::too_many_lines)]
fn class_member(s: &mut ParserContext) -> Result<ClassMember> {
    let lo = s.peek().span.lo;

    let is_static = if peek_word(s, "static") {
        // `static` may itself be a member name, as in `static() {}`.
        let id = ident(s)?;
        if matches!(
            s.peek().kind,
            TokenKind::Open(Delim::Paren) | TokenKind::Eq
        ) {
            return class_member_rest(s, false, name_key(&id), lo);
        }
        true
    } else {
        false
    };

    let mut is_async = false;
    let mut is_generator = false;
    let mut accessor = None;

    if peek_word(s, "async") {
        let id = ident(s)?;
        if matches!(
            s.peek().kind,
            TokenKind::Open(Delim::Paren) | TokenKind::Eq
        ) {
            return class_member_rest(s, is_static, name_key(&id), lo);
        }
        is_async = true;
    } else if peek_word(s, "get") || peek_word(s, "set") {
        let id = ident(s)?;
        if matches!(
            s.peek().kind,
            TokenKind::Open(Delim::Paren) | TokenKind::Eq
        ) {
            return class_member_rest(s, is_static, name_key(&id), lo);
        }
        accessor = Some(if id.name.as_ref() == "get" {
            MethodKind::Get
        } else {
            MethodKind::Set
        });
    }

    if matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star)) {
        s.advance();
        is_generator = true;
    }

    let key = prop_key(s)?;
    if let Some(kind) = accessor {
        let func = method_func(s, false, false, lo)?;
        return Ok(ClassMember {
            id: NodeId::default(),
            span: s.span(lo),
            is_static,
            kind: ClassMemberKind::Method(kind, key, func),
        });
    }

    if s.peek().kind == TokenKind::Open(Delim::Paren) {
        let func = method_func(s, is_async, is_generator, lo)?;
        return Ok(ClassMember {
            id: NodeId::default(),
            span: s.span(lo),
            is_static,
            kind: ClassMemberKind::Method(MethodKind::Method, key, func),
        });
    }

    class_member_rest(s, is_static, key, lo)
}

/// Parses the remainder of a member whose key has been consumed: a method body or a field
/// initializer.
fn class_member_rest(
    s: &mut ParserContext,
    is_static: bool,
    key: PropKey,
    lo: u32,
) -> Result<ClassMember> {
    if s.peek().kind == TokenKind::Open(Delim::Paren) {
        let func = method_func(s, false, false, lo)?;
        return Ok(ClassMember {
            id: NodeId::default(),
            span: s.span(lo),
            is_static,
            kind: ClassMemberKind::Method(MethodKind::Method, key, func),
        });
    }

    let init = if token(s, TokenKind::Eq).is_ok() {
        Some(expr_single(s)?)
    } else {
        None
    };
    stmt::semi(s)?;

    Ok(ClassMember {
        id: NodeId::default(),
        span: s.span(lo),
        is_static,
        kind: ClassMemberKind::Field(key, init),
    })
}

fn template(s: &mut ParserContext) -> Result<Template> {
    let lo = s.peek().span.lo;
    let mut quasis = Vec::new();
    let mut exprs = Vec::new();

    if s.peek().kind == TokenKind::TemplateComplete {
        quasis.push(template_chunk(s, 1, 1));
        s.advance();
    } else {
        token_is(s, TokenKind::TemplateHead)?;
        quasis.push(template_chunk(s, 1, 2));
        s.advance();
        loop {
            exprs.push(expr(s)?);
            match s.peek().kind {
                TokenKind::TemplateMiddle => {
                    quasis.push(template_chunk(s, 1, 2));
                    s.advance();
                }
                TokenKind::TemplateTail => {
                    quasis.push(template_chunk(s, 1, 1));
                    s.advance();
                    break;
                }
                kind => {
                    return Err(Error(ErrorKind::Rule("template", kind, s.peek().span)));
                }
            }
        }
    }

    Ok(Template {
        id: NodeId::default(),
        span: s.span(lo),
        quasis: quasis.into_boxed_slice(),
        exprs: exprs.into_boxed_slice(),
    })
}

fn token_is(s: &ParserContext, t: TokenKind) -> Result<()> {
    if s.peek().kind == t {
        Ok(())
    } else {
        Err(Error(ErrorKind::Token(t, s.peek().kind, s.peek().span)))
    }
}

fn template_chunk(s: &ParserContext, from_start: usize, from_end: usize) -> Box<Name> {
    Box::new(Name {
        id: NodeId::default(),
        span: s.peek().span,
        name: shorten(from_start, from_end, s.read()).into(),
    })
}

fn lit(s: &mut ParserContext) -> Result<Option<Lit>> {
    let lexeme = s.read();
    let token = s.peek();
    match lit_token(lexeme, token.kind, token.span) {
        Ok(Some(lit)) => {
            s.advance();
            Ok(Some(lit))
        }
        Ok(None) => Ok(None),
        Err(err) => {
            s.advance();
            Err(err)
        }
    }
}

fn lit_token(lexeme: &str, kind: TokenKind, span: Span) -> Result<Option<Lit>> {
    match kind {
        TokenKind::Int(Radix::Decimal) | TokenKind::Float => {
            let cleaned = lexeme.replace('_', "");
            let value = cleaned
                .parse()
                .map_err(|_| Error(ErrorKind::Lit("number", span)))?;
            Ok(Some(Lit::Num(value, lexeme.into())))
        }
        TokenKind::Int(radix) => {
            let digits = lexeme[2..].replace('_', "");
            let value = u128::from_str_radix(&digits, radix.into())
                .map_err(|_| Error(ErrorKind::Lit("number", span)))?;
            #[allow(clippy::cast_precision_loss)]
            let value = value as f64;
            Ok(Some(Lit::Num(value, lexeme.into())))
        }
        TokenKind::BigInt(radix) => {
            let offset = if radix == Radix::Decimal { 0 } else { 2 };
            let digits = shorten(offset, 1, lexeme).replace('_', "");
            let value = BigInt::from_str_radix(&digits, radix.into())
                .map_err(|_| Error(ErrorKind::Lit("BigInt", span)))?;
            Ok(Some(Lit::BigInt(Box::new(value), lexeme.into())))
        }
        TokenKind::String => {
            let value = unescape(shorten(1, 1, lexeme));
            Ok(Some(Lit::Str(value.into(), lexeme.into())))
        }
        TokenKind::Regex => Ok(Some(Lit::Regex(lexeme.into()))),
        TokenKind::Keyword(Keyword::True) => Ok(Some(Lit::Bool(true))),
        TokenKind::Keyword(Keyword::False) => Ok(Some(Lit::Bool(false))),
        TokenKind::Keyword(Keyword::Null) => Ok(Some(Lit::Null)),
        _ => Ok(None),
    }
}

/// Cooks the escape sequences of a string literal body. String escapes never fail: an
/// unrecognized escape denotes the escaped character itself.
fn unescape(s: &str) -> String {
    let mut chars = s.chars().peekable();
    let mut buf = String::with_capacity(s.len());
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            buf.push(ch);
            continue;
        }
        let Some(escape) = chars.next() else {
            break;
        };
        match escape {
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'b' => buf.push('\u{8}'),
            'f' => buf.push('\u{c}'),
            'v' => buf.push('\u{b}'),
            '0' => buf.push('\0'),
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => buf.push(c),
                    None => buf.push_str(&hex),
                }
            }
            'u' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        buf.push(c);
                    }
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(c) => buf.push(c),
                        None => buf.push_str(&hex),
                    }
                }
            }
            other => buf.push(other),
        }
    }
    buf
}

fn prefix_op(s: &ParserContext) -> Option<PrefixOp> {
    let kind = match s.peek().kind {
        TokenKind::Bang => PrefixKind::Unary(UnOp::Not),
        TokenKind::Tilde => PrefixKind::Unary(UnOp::BitNot),
        TokenKind::BinOp(ClosedBinOp::Plus) => PrefixKind::Unary(UnOp::Pos),
        TokenKind::BinOp(ClosedBinOp::Minus) => PrefixKind::Unary(UnOp::Neg),
        TokenKind::Keyword(Keyword::TypeOf) => PrefixKind::Unary(UnOp::TypeOf),
        TokenKind::Keyword(Keyword::Void) => PrefixKind::Unary(UnOp::Void),
        TokenKind::Keyword(Keyword::Delete) => PrefixKind::Unary(UnOp::Delete),
        TokenKind::PlusPlus => PrefixKind::Update(UpdateOp::Incr),
        TokenKind::MinusMinus => PrefixKind::Update(UpdateOp::Decr),
        TokenKind::Keyword(Keyword::Await) => PrefixKind::Await,
        _ => return None,
    };

    Some(PrefixOp {
        kind,
        precedence: UNARY_PRECEDENCE,
    })
}

#[allow(clippy::too_many_lines)]
fn mixfix_op(s: &ParserContext) -> Option<MixfixOp> {
    match s.peek().kind {
        TokenKind::Comma => Some(MixfixOp {
            kind: OpKind::Rich(seq_op),
            precedence: SEQ_PRECEDENCE,
        }),
        TokenKind::Eq => Some(MixfixOp {
            kind: OpKind::Assign(None),
            precedence: ASSIGN_PRECEDENCE,
        }),
        TokenKind::BinOpEq(op) => Some(MixfixOp {
            kind: OpKind::Assign(Some(closed_bin_op(op))),
            precedence: ASSIGN_PRECEDENCE,
        }),
        TokenKind::Arrow => Some(MixfixOp {
            kind: OpKind::Rich(arrow_op),
            precedence: ASSIGN_PRECEDENCE,
        }),
        TokenKind::Question => Some(MixfixOp {
            kind: OpKind::Rich(cond_op),
            precedence: ASSIGN_PRECEDENCE,
        }),
        TokenKind::BinOp(op) => {
            let (bin, precedence, assoc) = match op {
                ClosedBinOp::QuestionQuestion => (BinOp::Coalesce, 3, Assoc::Left),
                ClosedBinOp::BarBar => (BinOp::Or, 4, Assoc::Left),
                ClosedBinOp::AmpAmp => (BinOp::And, 5, Assoc::Left),
                ClosedBinOp::Bar => (BinOp::BitOr, 6, Assoc::Left),
                ClosedBinOp::Caret => (BinOp::BitXor, 7, Assoc::Left),
                ClosedBinOp::Amp => (BinOp::BitAnd, 8, Assoc::Left),
                ClosedBinOp::Shl => (BinOp::Shl, 11, Assoc::Left),
                ClosedBinOp::Shr => (BinOp::Shr, 11, Assoc::Left),
                ClosedBinOp::UShr => (BinOp::UShr, 11, Assoc::Left),
                ClosedBinOp::Plus => (BinOp::Add, 12, Assoc::Left),
                ClosedBinOp::Minus => (BinOp::Sub, 12, Assoc::Left),
                ClosedBinOp::Star => (BinOp::Mul, 13, Assoc::Left),
                ClosedBinOp::Slash => (BinOp::Div, 13, Assoc::Left),
                ClosedBinOp::Percent => (BinOp::Mod, 13, Assoc::Left),
                ClosedBinOp::StarStar => (BinOp::Exp, EXP_PRECEDENCE, Assoc::Right),
            };
            Some(MixfixOp {
                kind: OpKind::Binary(bin, assoc),
                precedence,
            })
        }
        TokenKind::EqEq => binary(BinOp::Eq, 9),
        TokenKind::Ne => binary(BinOp::Neq, 9),
        TokenKind::EqEqEq => binary(BinOp::StrictEq, 9),
        TokenKind::NeEq => binary(BinOp::StrictNeq, 9),
        TokenKind::Lt => binary(BinOp::Lt, 10),
        TokenKind::Lte => binary(BinOp::Lte, 10),
        TokenKind::Gt => binary(BinOp::Gt, 10),
        TokenKind::Gte => binary(BinOp::Gte, 10),
        TokenKind::Keyword(Keyword::In) if !s.no_in() => binary(BinOp::In, 10),
        TokenKind::Keyword(Keyword::InstanceOf) => binary(BinOp::InstanceOf, 10),
        TokenKind::PlusPlus if !s.newline_before() => Some(MixfixOp {
            kind: OpKind::Postfix(UpdateOp::Incr),
            precedence: POSTFIX_PRECEDENCE,
        }),
        TokenKind::MinusMinus if !s.newline_before() => Some(MixfixOp {
            kind: OpKind::Postfix(UpdateOp::Decr),
            precedence: POSTFIX_PRECEDENCE,
        }),
        TokenKind::Open(Delim::Paren) => Some(MixfixOp {
            kind: OpKind::Rich(call_op),
            precedence: CALL_PRECEDENCE,
        }),
        TokenKind::Open(Delim::Bracket) => Some(MixfixOp {
            kind: OpKind::Rich(index_op),
            precedence: CALL_PRECEDENCE,
        }),
        TokenKind::Dot => Some(MixfixOp {
            kind: OpKind::Rich(member_op),
            precedence: CALL_PRECEDENCE,
        }),
        TokenKind::QuestionDot => Some(MixfixOp {
            kind: OpKind::Rich(optional_op),
            precedence: CALL_PRECEDENCE,
        }),
        TokenKind::TemplateComplete | TokenKind::TemplateHead => Some(MixfixOp {
            kind: OpKind::Tagged,
            precedence: CALL_PRECEDENCE,
        }),
        _ => None,
    }
}

fn binary(bin: BinOp, precedence: u8) -> Option<MixfixOp> {
    Some(MixfixOp {
        kind: OpKind::Binary(bin, Assoc::Left),
        precedence,
    })
}

fn closed_bin_op(op: ClosedBinOp) -> BinOp {
    match op {
        ClosedBinOp::Amp => BinOp::BitAnd,
        ClosedBinOp::AmpAmp => BinOp::And,
        ClosedBinOp::Bar => BinOp::BitOr,
        ClosedBinOp::BarBar => BinOp::Or,
        ClosedBinOp::Caret => BinOp::BitXor,
        ClosedBinOp::Minus => BinOp::Sub,
        ClosedBinOp::Percent => BinOp::Mod,
        ClosedBinOp::Plus => BinOp::Add,
        ClosedBinOp::QuestionQuestion => BinOp::Coalesce,
        ClosedBinOp::Shl => BinOp::Shl,
        ClosedBinOp::Shr => BinOp::Shr,
        ClosedBinOp::Slash => BinOp::Div,
        ClosedBinOp::Star => BinOp::Mul,
        ClosedBinOp::StarStar => BinOp::Exp,
        ClosedBinOp::UShr => BinOp::UShr,
    }
}

fn seq_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    let rhs = expr_op(s, SEQ_PRECEDENCE + 1)?;
    let exprs = if let ExprKind::Seq(exprs) = *lhs.kind {
        let mut exprs = exprs.into_vec();
        exprs.push(rhs);
        exprs
    } else {
        vec![lhs, rhs]
    };
    Ok(Box::new(ExprKind::Seq(exprs.into_boxed_slice())))
}

fn cond_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    let then = expr_single(s)?;
    token(s, TokenKind::Colon)?;
    let otherwise = expr_op(s, ASSIGN_PRECEDENCE)?;
    Ok(Box::new(ExprKind::Cond(lhs, then, otherwise)))
}

fn arrow_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    let lo = lhs.span.lo;
    let (is_async, params) = match *lhs.kind {
        ExprKind::Ident(id) => (false, vec![ident_pat(id)]),
        ExprKind::Call(callee, args, false)
            if matches!(&*callee.kind, ExprKind::Ident(id) if id.name.as_ref() == "async") =>
        {
            let params = args
                .into_vec()
                .into_iter()
                .map(expr_to_pat)
                .collect::<Result<Vec<_>>>()?;
            (true, params)
        }
        _ => {
            return Err(Error(ErrorKind::Convert(
                "arrow parameters",
                "expression",
                lhs.span,
            )));
        }
    };

    arrow_tail(s, is_async, params, lo)
}

fn call_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    let args = seq(s, arg)?;
    token(s, TokenKind::Close(Delim::Paren))?;
    Ok(Box::new(ExprKind::Call(
        lhs,
        args.into_boxed_slice(),
        false,
    )))
}

fn index_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    let index = expr(s)?;
    token(s, TokenKind::Close(Delim::Bracket))?;
    Ok(Box::new(ExprKind::Member(
        lhs,
        MemberProp::Computed(index),
        false,
    )))
}

fn member_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    Ok(Box::new(ExprKind::Member(lhs, member_prop(s)?, false)))
}

fn optional_op(s: &mut ParserContext, lhs: Box<Expr>) -> Result<Box<ExprKind>> {
    if token(s, TokenKind::Open(Delim::Paren)).is_ok() {
        let args = seq(s, arg)?;
        token(s, TokenKind::Close(Delim::Paren))?;
        Ok(Box::new(ExprKind::Call(lhs, args.into_boxed_slice(), true)))
    } else if token(s, TokenKind::Open(Delim::Bracket)).is_ok() {
        let index = expr(s)?;
        token(s, TokenKind::Close(Delim::Bracket))?;
        Ok(Box::new(ExprKind::Member(
            lhs,
            MemberProp::Computed(index),
            true,
        )))
    } else {
        Ok(Box::new(ExprKind::Member(lhs, member_prop(s)?, true)))
    }
}

fn next_precedence(precedence: u8, assoc: Assoc) -> u8 {
    match assoc {
        Assoc::Left => precedence + 1,
        Assoc::Right => precedence,
    }
}
