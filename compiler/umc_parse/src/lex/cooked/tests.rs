// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::Lexer;
use expect_test::{expect, Expect};
use std::fmt::Write;

fn check(input: &str, expect: &Expect) {
    let mut out = String::new();
    for token in Lexer::new(input) {
        match token {
            Ok(token) => {
                writeln!(out, "{:?} {}", token.kind, token.span).expect("write should succeed");
            }
            Err(error) => writeln!(out, "error: {error}").expect("write should succeed"),
        }
    }
    expect.assert_eq(&out);
}

#[test]
fn declaration() {
    check(
        "let x = 1;",
        &expect![[r#"
            Keyword(Let) [0-3]
            Ident [4-5]
            Eq [6-7]
            Int(Decimal) [8-9]
            Semi [9-10]
        "#]],
    );
}

#[test]
fn compound_operators() {
    check(
        "a ??= b ** c >>> 2;",
        &expect![[r#"
            Ident [0-1]
            BinOpEq(QuestionQuestion) [2-5]
            Ident [6-7]
            BinOp(StarStar) [8-10]
            Ident [11-12]
            BinOp(UShr) [13-16]
            Int(Decimal) [17-18]
            Semi [18-19]
        "#]],
    );
}

#[test]
fn optional_chain() {
    check(
        "a?.b?.(c)",
        &expect![[r#"
            Ident [0-1]
            QuestionDot [1-3]
            Ident [3-4]
            QuestionDot [4-6]
            Open(Paren) [6-7]
            Ident [7-8]
            Close(Paren) [8-9]
        "#]],
    );
}

#[test]
fn template_with_interpolation() {
    check(
        "`x${b}`",
        &expect![[r#"
            TemplateHead [0-4]
            Ident [4-5]
            TemplateTail [5-7]
        "#]],
    );
}

#[test]
fn template_nested_braces() {
    check(
        "`${ {a: 1} }`",
        &expect![[r#"
            TemplateHead [0-3]
            Open(Brace) [4-5]
            Ident [5-6]
            Colon [6-7]
            Int(Decimal) [8-9]
            Close(Brace) [9-10]
            TemplateTail [11-13]
        "#]],
    );
}

#[test]
fn regex_after_operator() {
    check(
        "x = a / b; y = /re/g;",
        &expect![[r#"
            Ident [0-1]
            Eq [2-3]
            Ident [4-5]
            BinOp(Slash) [6-7]
            Ident [8-9]
            Semi [9-10]
            Ident [11-12]
            Eq [13-14]
            Regex [15-20]
            Semi [20-21]
        "#]],
    );
}

#[test]
fn regex_after_return() {
    check(
        "return /ab[/]c/;",
        &expect![[r#"
            Keyword(Return) [0-6]
            Regex [7-15]
            Semi [15-16]
        "#]],
    );
}

#[test]
fn numbers() {
    check(
        "0x1f 1_000 1.5e3 10n .5",
        &expect![[r#"
            Int(Hex) [0-4]
            Int(Decimal) [5-10]
            Float [11-16]
            BigInt(Decimal) [17-20]
            Float [21-23]
        "#]],
    );
}

#[test]
fn comments_are_skipped() {
    check(
        "a // one\n/* two */ b",
        &expect![[r#"
            Ident [0-1]
            Ident [19-20]
        "#]],
    );
}

#[test]
fn unterminated_string() {
    check(
        "'abc",
        &expect![[r#"
            error: unterminated string literal
        "#]],
    );
}

#[test]
fn newline_before_is_tracked() {
    let tokens: Vec<_> = Lexer::new("a\nb c")
        .map(|t| t.expect("token should lex"))
        .collect();
    assert!(!tokens[0].newline_before);
    assert!(tokens[1].newline_before);
    assert!(!tokens[2].newline_before);
}
