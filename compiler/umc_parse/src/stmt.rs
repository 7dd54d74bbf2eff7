// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{
    expr::{self, expr},
    keyword::Keyword,
    module,
    prim::{ident, many, opt, pat, token},
    Error, Result,
};
use crate::{
    lex::{Delim, TokenKind},
    scan::ParserContext,
    ErrorKind,
};
use umc_ast::ast::{
    Block, CatchClause, DeclKind, Expr, ExprKind, ForHead, ForInit, FuncDecl, Name, NodeId, Stmt,
    StmtKind, SwitchCase, VarDecl, VarDeclarator,
};
use umc_data_structures::span::Span;

#[allow(clippy::too_many_lines)]
pub(super) fn parse(s: &mut ParserContext) -> Result<Box<Stmt>> {
    let peek = s.peek();
    let lo = peek.span.lo;

    let kind = match peek.kind {
        TokenKind::Semi => {
            s.advance();
            StmtKind::Empty
        }
        TokenKind::Open(Delim::Brace) => StmtKind::Block(parse_block(s)?),
        TokenKind::Keyword(Keyword::Var) => parse_var(s, DeclKind::Var)?,
        TokenKind::Keyword(Keyword::Let) => parse_var(s, DeclKind::Let)?,
        TokenKind::Keyword(Keyword::Const) => parse_var(s, DeclKind::Const)?,
        TokenKind::Keyword(Keyword::Function) => {
            s.advance();
            parse_func_decl(s, false)?
        }
        TokenKind::Keyword(Keyword::Class) => {
            s.advance();
            let name = ident(s)?;
            let class = expr::class_tail(s)?;
            StmtKind::Class(Box::new(umc_ast::ast::ClassDecl {
                id: NodeId::default(),
                span: s.span(lo),
                name,
                class: Box::new(class),
            }))
        }
        TokenKind::Keyword(Keyword::If) => {
            s.advance();
            token(s, TokenKind::Open(Delim::Paren))?;
            let cond = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            let body = parse(s)?;
            let otherwise = if token(s, TokenKind::Keyword(Keyword::Else)).is_ok() {
                Some(parse(s)?)
            } else {
                None
            };
            StmtKind::If(cond, body, otherwise)
        }
        TokenKind::Keyword(Keyword::While) => {
            s.advance();
            token(s, TokenKind::Open(Delim::Paren))?;
            let cond = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            StmtKind::While(cond, parse(s)?)
        }
        TokenKind::Keyword(Keyword::Do) => {
            s.advance();
            let body = parse(s)?;
            token(s, TokenKind::Keyword(Keyword::While))?;
            token(s, TokenKind::Open(Delim::Paren))?;
            let cond = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            semi(s)?;
            StmtKind::DoWhile(body, cond)
        }
        TokenKind::Keyword(Keyword::For) => {
            s.advance();
            parse_for(s)?
        }
        TokenKind::Keyword(Keyword::Switch) => {
            s.advance();
            token(s, TokenKind::Open(Delim::Paren))?;
            let scrutinee = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            token(s, TokenKind::Open(Delim::Brace))?;
            let cases = many(s, parse_case)?;
            token(s, TokenKind::Close(Delim::Brace))?;
            StmtKind::Switch(scrutinee, cases.into_boxed_slice())
        }
        TokenKind::Keyword(Keyword::Try) => {
            s.advance();
            let block = parse_block(s)?;
            let catch = if token(s, TokenKind::Keyword(Keyword::Catch)).is_ok() {
                let catch_lo = s.span(lo).hi;
                let param = if token(s, TokenKind::Open(Delim::Paren)).is_ok() {
                    let param = pat(s)?;
                    token(s, TokenKind::Close(Delim::Paren))?;
                    Some(param)
                } else {
                    None
                };
                let body = parse_block(s)?;
                Some(CatchClause {
                    id: NodeId::default(),
                    span: s.span(catch_lo),
                    param,
                    body,
                })
            } else {
                None
            };
            let finally = if token(s, TokenKind::Keyword(Keyword::Finally)).is_ok() {
                Some(parse_block(s)?)
            } else {
                None
            };
            StmtKind::Try(block, catch, finally)
        }
        TokenKind::Keyword(Keyword::Throw) => {
            s.advance();
            let argument = expr(s)?;
            semi(s)?;
            StmtKind::Throw(argument)
        }
        TokenKind::Keyword(Keyword::Return) => {
            s.advance();
            let argument = if stmt_ends(s) {
                None
            } else {
                Some(expr(s)?)
            };
            semi(s)?;
            StmtKind::Return(argument)
        }
        TokenKind::Keyword(Keyword::Break) => {
            s.advance();
            let label = parse_label(s)?;
            semi(s)?;
            StmtKind::Break(label)
        }
        TokenKind::Keyword(Keyword::Continue) => {
            s.advance();
            let label = parse_label(s)?;
            semi(s)?;
            StmtKind::Continue(label)
        }
        TokenKind::Keyword(Keyword::With) => {
            s.advance();
            token(s, TokenKind::Open(Delim::Paren))?;
            let object = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            StmtKind::With(object, parse(s)?)
        }
        TokenKind::Keyword(Keyword::Debugger) => {
            s.advance();
            semi(s)?;
            StmtKind::Debugger
        }
        TokenKind::Keyword(Keyword::Import) => module::parse_import(s)?,
        TokenKind::Keyword(Keyword::Export) => module::parse_export(s)?,
        _ => parse_expr_stmt(s)?,
    };

    Ok(Box::new(Stmt {
        id: NodeId::default(),
        span: s.span(lo),
        kind: Box::new(kind),
    }))
}

/// Parses an expression statement, then reinterprets the two shapes that only a statement
/// position distinguishes: a labeled statement (`loop1: …`) and an `async function`
/// declaration, which the expression grammar has no other way to reach.
fn parse_expr_stmt(s: &mut ParserContext) -> Result<StmtKind> {
    let e = expr(s)?;

    if let ExprKind::Ident(_) = &*e.kind {
        if token(s, TokenKind::Colon).is_ok() {
            let ExprKind::Ident(id) = *e.kind else {
                unreachable!("kind was just matched as an identifier");
            };
            let label = Box::new(Name {
                id: NodeId::default(),
                span: id.span,
                name: id.name,
            });
            return Ok(StmtKind::Labeled(label, parse(s)?));
        }
    }

    if let ExprKind::Func(Some(_), _) = &*e.kind {
        let span = e.span;
        let ExprKind::Func(Some(name), func) = *e.kind else {
            unreachable!("kind was just matched as a named function");
        };
        return Ok(StmtKind::Func(Box::new(FuncDecl {
            id: NodeId::default(),
            span,
            name,
            func,
        })));
    }

    semi(s)?;
    Ok(StmtKind::Expr(e))
}

fn parse_label(s: &mut ParserContext) -> Result<Option<Box<Name>>> {
    if s.newline_before() || s.peek().kind != TokenKind::Ident {
        return Ok(None);
    }
    let id = ident(s)?;
    Ok(Some(Box::new(Name {
        id: NodeId::default(),
        span: id.span,
        name: id.name,
    })))
}

fn parse_var(s: &mut ParserContext, kind: DeclKind) -> Result<StmtKind> {
    let decl = var_decl(s, kind)?;
    semi(s)?;
    Ok(StmtKind::Var(decl))
}

/// Parses a variable declaration without the trailing semicolon, as `for` heads need.
pub(super) fn var_decl(s: &mut ParserContext, kind: DeclKind) -> Result<Box<VarDecl>> {
    let lo = s.peek().span.lo;
    s.advance();

    let mut decls = Vec::new();
    loop {
        decls.push(var_declarator(s)?);
        if token(s, TokenKind::Comma).is_err() {
            break;
        }
    }

    Ok(Box::new(VarDecl {
        id: NodeId::default(),
        span: s.span(lo),
        kind,
        decls: decls.into_boxed_slice(),
    }))
}

fn var_declarator(s: &mut ParserContext) -> Result<VarDeclarator> {
    let lo = s.peek().span.lo;
    let pat = pat(s)?;
    let init = if token(s, TokenKind::Eq).is_ok() {
        Some(expr::expr_single(s)?)
    } else {
        None
    };

    Ok(VarDeclarator {
        id: NodeId::default(),
        span: s.span(lo),
        pat,
        init,
    })
}

pub(super) fn parse_func_decl(s: &mut ParserContext, is_async: bool) -> Result<StmtKind> {
    let lo = s.peek().span.lo;
    let (name, func) = expr::function_parts(s, is_async)?;
    let name = name.ok_or_else(|| {
        Error(ErrorKind::Rule(
            "function name",
            s.peek().kind,
            s.peek().span,
        ))
    })?;

    Ok(StmtKind::Func(Box::new(FuncDecl {
        id: NodeId::default(),
        span: s.span(lo),
        name,
        func,
    })))
}

#[allow(clippy::too_many_lines)]
fn parse_for(s: &mut ParserContext) -> Result<StmtKind> {
    let is_await = token(s, TokenKind::Keyword(Keyword::Await)).is_ok();
    token(s, TokenKind::Open(Delim::Paren))?;

    // No init clause at all.
    if token(s, TokenKind::Semi).is_ok() {
        let (test, update, body) = for_tail(s)?;
        return Ok(StmtKind::For(None, test, update, body));
    }

    let decl_kind = match s.peek().kind {
        TokenKind::Keyword(Keyword::Var) => Some(DeclKind::Var),
        TokenKind::Keyword(Keyword::Let) => Some(DeclKind::Let),
        TokenKind::Keyword(Keyword::Const) => Some(DeclKind::Const),
        _ => None,
    };

    if let Some(kind) = decl_kind {
        let decl = s.with_no_in(|s| var_decl(s, kind))?;
        if token(s, TokenKind::Keyword(Keyword::In)).is_ok() {
            let object = expr(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            return Ok(StmtKind::ForIn(ForHead::Var(decl), object, parse(s)?));
        }
        if eat_of(s) {
            let iterable = expr::expr_single(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            return Ok(StmtKind::ForOf(
                is_await,
                ForHead::Var(decl),
                iterable,
                parse(s)?,
            ));
        }
        token(s, TokenKind::Semi)?;
        let (test, update, body) = for_tail(s)?;
        return Ok(StmtKind::For(Some(ForInit::Var(decl)), test, update, body));
    }

    let init = s.with_no_in(expr)?;
    if token(s, TokenKind::Keyword(Keyword::In)).is_ok() {
        let object = expr(s)?;
        token(s, TokenKind::Close(Delim::Paren))?;
        return Ok(StmtKind::ForIn(ForHead::Expr(init), object, parse(s)?));
    }
    if eat_of(s) {
        let iterable = expr::expr_single(s)?;
        token(s, TokenKind::Close(Delim::Paren))?;
        return Ok(StmtKind::ForOf(
            is_await,
            ForHead::Expr(init),
            iterable,
            parse(s)?,
        ));
    }
    token(s, TokenKind::Semi)?;
    let (test, update, body) = for_tail(s)?;
    Ok(StmtKind::For(Some(ForInit::Expr(init)), test, update, body))
}

fn eat_of(s: &mut ParserContext) -> bool {
    if s.peek().kind == TokenKind::Ident && s.read() == "of" {
        s.advance();
        true
    } else {
        false
    }
}

type ForTail = (Option<Box<Expr>>, Option<Box<Expr>>, Box<Stmt>);

fn for_tail(s: &mut ParserContext) -> Result<ForTail> {
    let test = if s.peek().kind == TokenKind::Semi {
        None
    } else {
        Some(expr(s)?)
    };
    token(s, TokenKind::Semi)?;

    let update = if s.peek().kind == TokenKind::Close(Delim::Paren) {
        None
    } else {
        Some(expr(s)?)
    };
    token(s, TokenKind::Close(Delim::Paren))?;

    Ok((test, update, parse(s)?))
}

fn parse_case(s: &mut ParserContext) -> Result<SwitchCase> {
    let peek = s.peek();
    let lo = peek.span.lo;

    let test = if token(s, TokenKind::Keyword(Keyword::Case)).is_ok() {
        Some(expr(s)?)
    } else if token(s, TokenKind::Keyword(Keyword::Default)).is_ok() {
        None
    } else {
        return Err(Error(ErrorKind::Rule("switch case", peek.kind, peek.span)));
    };

    token(s, TokenKind::Colon)?;
    let body = many(s, parse)?;

    Ok(SwitchCase {
        id: NodeId::default(),
        span: s.span(lo),
        test,
        body: body.into_boxed_slice(),
    })
}

pub(super) fn parse_block(s: &mut ParserContext) -> Result<Block> {
    let lo = s.peek().span.lo;
    token(s, TokenKind::Open(Delim::Brace))?;
    let stmts = many(s, parse)?;
    token(s, TokenKind::Close(Delim::Brace))?;

    Ok(Block {
        id: NodeId::default(),
        span: s.span(lo),
        stmts: stmts.into_boxed_slice(),
    })
}

/// True if the current position ends a statement for automatic semicolon insertion: a `;`, a
/// closing brace, the end of the file, or a preceding line terminator.
fn stmt_ends(s: &ParserContext) -> bool {
    matches!(
        s.peek().kind,
        TokenKind::Semi | TokenKind::Close(Delim::Brace) | TokenKind::Eof
    ) || s.newline_before()
}

/// Consumes a statement terminator, applying automatic semicolon insertion.
pub(super) fn semi(s: &mut ParserContext) -> Result<()> {
    if token(s, TokenKind::Semi).is_ok() {
        return Ok(());
    }

    let peek = s.peek();
    if peek.kind == TokenKind::Close(Delim::Brace)
        || peek.kind == TokenKind::Eof
        || s.newline_before()
    {
        Ok(())
    } else {
        Err(Error(ErrorKind::MissingSemi(Span {
            lo: peek.span.lo,
            hi: peek.span.lo,
        })))
    }
}
