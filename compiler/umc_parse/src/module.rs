// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Parsing for module items: `import` and `export` declarations and the module entry point.

use super::{
    expr,
    keyword::Keyword,
    prim::{eat_word, ident, many, name, opt, seq, token},
    stmt, Error, Result,
};
use crate::{
    lex::{ClosedBinOp, Delim, TokenKind},
    scan::ParserContext,
    ErrorKind,
};
use umc_ast::ast::{
    Expr, ExportAll, ExportDecl, ExportDefault, ExportDefaultKind, ExportNamed, ExportSpecifier,
    ExprKind, ImportDecl, ImportSpecifier, ImportSpecifierKind, Module, Name, NodeId, SourceType,
    StmtKind,
};
use umc_data_structures::span::Span;

pub(super) fn parse_module(s: &mut ParserContext, source_type: SourceType) -> Result<Module> {
    let lo = s.peek().span.lo;
    let stmts = many(s, stmt::parse)?;
    token(s, TokenKind::Eof)?;

    Ok(Module {
        id: NodeId::default(),
        span: s.span(lo),
        source_type,
        stmts: stmts.into_boxed_slice(),
    })
}

/// Parses a statement that begins with `import`: an import declaration, or an expression
/// statement headed by `import(…)` or `import.meta`.
pub(super) fn parse_import(s: &mut ParserContext) -> Result<StmtKind> {
    let lo = s.peek().span.lo;
    token(s, TokenKind::Keyword(Keyword::Import))?;

    if s.peek().kind == TokenKind::Open(Delim::Paren) || s.peek().kind == TokenKind::Dot {
        let kind = if token(s, TokenKind::Dot).is_ok() {
            let meta = name(s)?;
            if meta.name.as_ref() != "meta" {
                return Err(Error(ErrorKind::Rule("`meta`", s.peek().kind, meta.span)));
            }
            ExprKind::ImportMeta
        } else {
            token(s, TokenKind::Open(Delim::Paren))?;
            let argument = expr::expr_single(s)?;
            token(s, TokenKind::Close(Delim::Paren))?;
            ExprKind::ImportCall(argument)
        };

        let base = Box::new(Expr {
            id: NodeId::default(),
            span: s.span(lo),
            kind: Box::new(kind),
        });
        let e = expr::expr_suffix(s, base, lo, 1)?;
        stmt::semi(s)?;
        return Ok(StmtKind::Expr(e));
    }

    if s.source_type() == SourceType::Script {
        return Err(Error(ErrorKind::ModuleSyntax(s.peek().span)));
    }

    if s.peek().kind == TokenKind::String {
        let source = string_name(s)?;
        stmt::semi(s)?;
        return Ok(StmtKind::Import(Box::new(ImportDecl {
            id: NodeId::default(),
            span: s.span(lo),
            specifiers: Box::new([]),
            source,
        })));
    }

    let mut specifiers = Vec::new();

    if s.peek().kind == TokenKind::Ident {
        let local = ident(s)?;
        specifiers.push(specifier(ImportSpecifierKind::Default(local)));
        if token(s, TokenKind::Comma).is_ok() {
            import_clause(s, &mut specifiers)?;
        }
    } else {
        import_clause(s, &mut specifiers)?;
    }

    if !eat_word(s, "from") {
        return Err(Error(ErrorKind::Rule(
            "`from`",
            s.peek().kind,
            s.peek().span,
        )));
    }
    let source = string_name(s)?;
    stmt::semi(s)?;

    Ok(StmtKind::Import(Box::new(ImportDecl {
        id: NodeId::default(),
        span: s.span(lo),
        specifiers: specifiers.into_boxed_slice(),
        source,
    })))
}

/// Parses a namespace (`* as ns`) or named (`{ … }`) import clause.
fn import_clause(s: &mut ParserContext, specifiers: &mut Vec<ImportSpecifier>) -> Result<()> {
    if matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star)) {
        s.advance();
        if !eat_word(s, "as") {
            return Err(Error(ErrorKind::Rule("`as`", s.peek().kind, s.peek().span)));
        }
        let local = ident(s)?;
        specifiers.push(specifier(ImportSpecifierKind::Namespace(local)));
        return Ok(());
    }

    token(s, TokenKind::Open(Delim::Brace))?;
    let named = seq(s, named_import)?;
    token(s, TokenKind::Close(Delim::Brace))?;
    specifiers.extend(named);
    Ok(())
}

fn named_import(s: &mut ParserContext) -> Result<ImportSpecifier> {
    let peek = s.peek();
    let lo = peek.span.lo;

    let kind = if peek.kind == TokenKind::Ident {
        let first = ident(s)?;
        if eat_word(s, "as") {
            let imported = Box::new(Name {
                id: NodeId::default(),
                span: first.span,
                name: first.name,
            });
            ImportSpecifierKind::Named(Some(imported), ident(s)?)
        } else {
            ImportSpecifierKind::Named(None, first)
        }
    } else {
        // The external name may be any keyword (`{ default as d }`), but the local binding
        // must then be renamed with `as`.
        let imported = name(s)?;
        if !eat_word(s, "as") {
            return Err(Error(ErrorKind::Rule("`as`", s.peek().kind, s.peek().span)));
        }
        ImportSpecifierKind::Named(Some(imported), ident(s)?)
    };

    Ok(ImportSpecifier {
        id: NodeId::default(),
        span: s.span(lo),
        kind,
    })
}

fn specifier(kind: ImportSpecifierKind) -> ImportSpecifier {
    let span = match &kind {
        ImportSpecifierKind::Named(imported, local) => Span {
            lo: imported.as_ref().map_or(local.span.lo, |i| i.span.lo),
            hi: local.span.hi,
        },
        ImportSpecifierKind::Default(local) | ImportSpecifierKind::Namespace(local) => local.span,
    };

    ImportSpecifier {
        id: NodeId::default(),
        span,
        kind,
    }
}

/// Parses a statement that begins with `export`.
pub(super) fn parse_export(s: &mut ParserContext) -> Result<StmtKind> {
    let lo = s.peek().span.lo;
    token(s, TokenKind::Keyword(Keyword::Export))?;

    if s.source_type() == SourceType::Script {
        return Err(Error(ErrorKind::ModuleSyntax(s.peek().span)));
    }

    if matches!(s.peek().kind, TokenKind::BinOp(ClosedBinOp::Star)) {
        s.advance();
        let alias = if eat_word(s, "as") { Some(name(s)?) } else { None };
        if !eat_word(s, "from") {
            return Err(Error(ErrorKind::Rule(
                "`from`",
                s.peek().kind,
                s.peek().span,
            )));
        }
        let source = string_name(s)?;
        stmt::semi(s)?;
        return Ok(StmtKind::ExportAll(Box::new(ExportAll {
            id: NodeId::default(),
            span: s.span(lo),
            alias,
            source,
        })));
    }

    if token(s, TokenKind::Open(Delim::Brace)).is_ok() {
        let specifiers = seq(s, export_specifier)?;
        token(s, TokenKind::Close(Delim::Brace))?;
        let source = if eat_word(s, "from") {
            Some(string_name(s)?)
        } else {
            None
        };
        stmt::semi(s)?;
        return Ok(StmtKind::ExportNamed(Box::new(ExportNamed {
            id: NodeId::default(),
            span: s.span(lo),
            specifiers: specifiers.into_boxed_slice(),
            source,
        })));
    }

    if token(s, TokenKind::Keyword(Keyword::Default)).is_ok() {
        let kind = if token(s, TokenKind::Keyword(Keyword::Function)).is_ok() {
            let (name, func) = expr::function_parts(s, false)?;
            ExportDefaultKind::Func(name, func)
        } else if peek_async_function(s) {
            s.advance();
            token(s, TokenKind::Keyword(Keyword::Function))?;
            let (name, func) = expr::function_parts(s, true)?;
            ExportDefaultKind::Func(name, func)
        } else if token(s, TokenKind::Keyword(Keyword::Class)).is_ok() {
            let name = opt(s, ident)?;
            let class = expr::class_tail(s)?;
            ExportDefaultKind::Class(name, Box::new(class))
        } else {
            let value = expr::expr_single(s)?;
            stmt::semi(s)?;
            ExportDefaultKind::Expr(value)
        };

        return Ok(StmtKind::ExportDefault(Box::new(ExportDefault {
            id: NodeId::default(),
            span: s.span(lo),
            kind,
        })));
    }

    let decl = stmt::parse(s)?;
    if !matches!(
        &*decl.kind,
        StmtKind::Var(_) | StmtKind::Func(_) | StmtKind::Class(_)
    ) {
        return Err(Error(ErrorKind::Rule(
            "exportable declaration",
            s.peek().kind,
            decl.span,
        )));
    }

    Ok(StmtKind::ExportDecl(Box::new(ExportDecl {
        id: NodeId::default(),
        span: s.span(lo),
        decl,
    })))
}

fn export_specifier(s: &mut ParserContext) -> Result<ExportSpecifier> {
    let lo = s.peek().span.lo;
    let local = ident(s)?;
    let exported = if eat_word(s, "as") { Some(name(s)?) } else { None };

    Ok(ExportSpecifier {
        id: NodeId::default(),
        span: s.span(lo),
        local,
        exported,
    })
}

/// Parses a module-source string literal as a raw [`Name`].
fn string_name(s: &mut ParserContext) -> Result<Box<Name>> {
    let peek = s.peek();
    if peek.kind != TokenKind::String {
        return Err(Error(ErrorKind::Rule(
            "module source",
            peek.kind,
            peek.span,
        )));
    }
    let raw = s.read().into();
    s.advance();
    Ok(Box::new(Name {
        id: NodeId::default(),
        span: peek.span,
        name: raw,
    }))
}

/// True if the next token is the contextual `async` of `async function`. Only called where a
/// default export is expected, so a bare `async` identifier cannot occur here.
fn peek_async_function(s: &ParserContext) -> bool {
    s.peek().kind == TokenKind::Ident && s.read() == "async"
}
