// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::module;
use indoc::indoc;
use umc_ast::ast::{Module, SourceType, Stmt, StmtKind};

fn parse(input: &str) -> Module {
    let (module, errors) = module(input, SourceType::Module);
    assert!(errors.is_empty(), "program has syntax errors: {errors:#?}");
    module
}

fn parse_script(input: &str) -> Module {
    let (module, errors) = module(input, SourceType::Script);
    assert!(errors.is_empty(), "program has syntax errors: {errors:#?}");
    module
}

#[test]
fn statements_parse() {
    let sources = [
        "const a = 1, [b, c] = xs, { d, e: f = 2, ...rest } = o;",
        "function f(a, b = 1, ...rest) { return a + b; }",
        "async function g() { await h(); }",
        "function* gen() { yield 1; yield* others(); }",
        "class A extends B { constructor() { super(); } get x() { return this.#x; } static m() {} #x = 1; }",
        "if (a) b(); else { c(); }",
        "for (let i = 0; i < n; i++) { total += i; }",
        "for (const [k, v] of entries) use(k, v);",
        "for (k in o) delete o[k];",
        "do { tick(); } while (alive);",
        "switch (x) { case 1: f(); break; default: g(); }",
        "try { risky(); } catch ({ message }) { log(message); } finally { done(); }",
        "label: while (true) { break label; }",
        "const f = (x, y) => x * y;",
        "const g = async x => { await x; };",
        "const o = { a, b: 1, [k]: 2, 'c': 3, 0: 4, m() {}, get p() { return 1; }, ...rest };",
        "const t = `a${b}c${d}e`;",
        "const r = /ab+c/gi.test(s);",
        "new Map([[1, 2]]);",
        "x = a ?? b?.c?.[d]?.(e);",
        "const big = 10n ** 2n;",
        "a ||= b, c &&= d, e ??= f;",
        "(function named() { named(); });",
        "import('./mod').then(use);",
        "const tagged = html`<p>${x}</p>`;",
    ];

    for source in sources {
        parse(source);
    }
}

#[test]
fn module_items_parse() {
    let module = parse(indoc! {r#"
        import def, { a as b, c } from "mod";
        import * as ns from "other";
        import "side-effect";
        export { b, c as d };
        export const e = 1;
        export default function f() {}
        export * as g from "again";
        export { h } from "elsewhere";
    "#});

    let kinds: Vec<&str> = module
        .stmts
        .iter()
        .map(|stmt| match &*stmt.kind {
            StmtKind::Import(_) => "import",
            StmtKind::ExportNamed(_) => "export-named",
            StmtKind::ExportDecl(_) => "export-decl",
            StmtKind::ExportDefault(_) => "export-default",
            StmtKind::ExportAll(_) => "export-all",
            _ => "other",
        })
        .collect();

    assert_eq!(
        kinds,
        [
            "import",
            "import",
            "import",
            "export-named",
            "export-decl",
            "export-default",
            "export-all",
            "export-named",
        ],
    );
}

#[test]
fn with_statement_parses_in_scripts() {
    let module = parse_script("with (o) { f(x); }");
    assert!(matches!(&*module.stmts[0].kind, StmtKind::With(..)));
}

#[test]
fn import_is_rejected_in_scripts() {
    let (_, errors) = module("import \"m\";", SourceType::Script);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "import and export declarations require a module source",
    );
}

#[test]
fn missing_semicolon_is_an_error() {
    let (_, errors) = module("let a = 1 let b = 2", SourceType::Module);
    assert!(!errors.is_empty());
    assert_eq!(
        errors[0].to_string(),
        "expected statement to end with a semicolon",
    );
}

#[test]
fn newline_inserts_semicolon() {
    let module = parse("let a = 1\nlet b = 2\n");
    assert_eq!(module.stmts.len(), 2);
}

#[test]
fn return_is_a_restricted_production() {
    let module = parse("function f() { return\n1; }");
    let StmtKind::Func(decl) = &*module.stmts[0].kind else {
        panic!("expected a function declaration");
    };

    let stmts: Vec<&Stmt> = decl.func.body.stmts.iter().map(Box::as_ref).collect();
    assert_eq!(stmts.len(), 2);
    assert!(matches!(&*stmts[0].kind, StmtKind::Return(None)));
    assert!(matches!(&*stmts[1].kind, StmtKind::Expr(_)));
}

#[test]
fn postfix_update_does_not_cross_lines() {
    // `a` and `++b` are separate statements when a line terminator intervenes.
    let module = parse("a\n++b;");
    assert_eq!(module.stmts.len(), 2);
}

#[test]
fn async_function_declaration() {
    let module = parse("async function f() {}");
    assert!(matches!(&*module.stmts[0].kind, StmtKind::Func(_)));
}

#[test]
fn labeled_statement() {
    let module = parse("outer: for (;;) { continue outer; }");
    assert!(matches!(&*module.stmts[0].kind, StmtKind::Labeled(..)));
}
