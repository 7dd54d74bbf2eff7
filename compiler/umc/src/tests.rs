// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::{
    approximate_tokens, rename_module, Candidate, NameOracle, OracleError, RenameOptions,
    RenameOutput, SuggestRequest, SuggestResponse,
};
use async_trait::async_trait;
use expect_test::{expect, Expect};
use indoc::indoc;
use rustc_hash::FxHashMap;
use umc_ast::ast::SourceType;

/// A deterministic in-process oracle: each rule matches a symbol by its original name and,
/// optionally, a fragment of its declaration snippet.
struct RuleOracle {
    rules: Vec<Rule>,
}

struct Rule {
    name: &'static str,
    snippet: Option<&'static str>,
    candidates: Vec<(&'static str, f64)>,
}

fn rule(name: &'static str, proposal: &'static str) -> Rule {
    Rule {
        name,
        snippet: None,
        candidates: vec![(proposal, 0.9)],
    }
}

fn snippet_rule(name: &'static str, snippet: &'static str, proposal: &'static str) -> Rule {
    Rule {
        name,
        snippet: Some(snippet),
        candidates: vec![(proposal, 0.9)],
    }
}

#[async_trait(?Send)]
impl NameOracle for RuleOracle {
    async fn suggest_names(&self, request: SuggestRequest) -> Result<SuggestResponse, OracleError> {
        let mut candidates = FxHashMap::default();
        for symbol in &request.symbols {
            let list: Vec<Candidate> = self
                .rules
                .iter()
                .filter(|rule| {
                    rule.name == symbol.original_name
                        && rule
                            .snippet
                            .map_or(true, |s| symbol.declaration_snippet.contains(s))
                })
                .flat_map(|rule| {
                    rule.candidates.iter().map(|(name, confidence)| Candidate {
                        name: (*name).to_string(),
                        confidence: *confidence,
                        rationale: None,
                    })
                })
                .collect();
            candidates.insert(symbol.symbol_id.clone(), list);
        }
        Ok(SuggestResponse { candidates })
    }
}

/// An oracle that proposes every symbol's own name back.
struct IdentityOracle;

#[async_trait(?Send)]
impl NameOracle for IdentityOracle {
    async fn suggest_names(&self, request: SuggestRequest) -> Result<SuggestResponse, OracleError> {
        let mut candidates = FxHashMap::default();
        for symbol in &request.symbols {
            candidates.insert(
                symbol.symbol_id.clone(),
                vec![Candidate {
                    name: symbol.original_name.clone(),
                    confidence: 1.0,
                    rationale: None,
                }],
            );
        }
        Ok(SuggestResponse { candidates })
    }
}

/// An oracle that always fails.
struct BrokenOracle;

#[async_trait(?Send)]
impl NameOracle for BrokenOracle {
    async fn suggest_names(&self, _: SuggestRequest) -> Result<SuggestResponse, OracleError> {
        Err(OracleError("service unavailable".to_string()))
    }
}

async fn run(source: &str, rules: Vec<Rule>) -> RenameOutput {
    let oracle = RuleOracle { rules };
    rename_module(source, &oracle, approximate_tokens, &RenameOptions::default())
        .await
        .expect("rename should succeed")
}

async fn check(source: &str, rules: Vec<Rule>, expect: &Expect) {
    let output = run(source, rules).await;
    assert!(
        output.diagnostics.validation_failure.is_none(),
        "validation failed: {:?}",
        output.diagnostics.validation_failure,
    );
    expect.assert_eq(&output.source);
}

#[tokio::test]
async fn trivial_rename() {
    check(
        "const a = 1;",
        vec![rule("a", "b")],
        &expect![[r#"
            const b = 1;
        "#]],
    )
    .await;
}

#[tokio::test]
async fn shadowed_bindings_rename_independently() {
    check(
        indoc! {"
            const a = 1;
            (function () { const a = 2; });
        "},
        vec![
            snippet_rule("a", "= 1", "c"),
            snippet_rule("a", "= 2", "d"),
        ],
        &expect![[r#"
            const c = 1;
            (function() {
                const d = 2;
            });
        "#]],
    )
    .await;
}

#[tokio::test]
async fn shorthand_expands_to_preserve_keys() {
    check(
        indoc! {"
            const a = 1;
            const obj = { a };
        "},
        vec![rule("a", "userId")],
        &expect![[r#"
            const userId = 1;
            const obj = { a: userId };
        "#]],
    )
    .await;
}

#[tokio::test]
async fn named_export_splits_to_preserve_the_interface() {
    check(
        "export function a() { return 1; }",
        vec![rule("a", "getValue")],
        &expect![[r#"
            function getValue() {
                return 1;
            }
            export { getValue as a };
        "#]],
    )
    .await;
}

#[tokio::test]
async fn swaps_survive_the_two_phase_rename() {
    check(
        indoc! {"
            const a = 1;
            const b = 2;
        "},
        vec![rule("a", "b"), rule("b", "a")],
        &expect![[r#"
            const b = 1;
            const a = 2;
        "#]],
    )
    .await;
}

#[tokio::test]
async fn collisions_with_existing_bindings_disambiguate() {
    check(
        indoc! {"
            const foo = 1;
            const bar = 2;
        "},
        vec![rule("foo", "bar")],
        &expect![[r#"
            const _bar = 1;
            const bar = 2;
        "#]],
    )
    .await;
}

#[tokio::test]
async fn eval_keeps_the_whole_chain_untouched() {
    let output = run(
        indoc! {r#"
            function foo() { let a = 1; eval("a"); return a; }
        "#},
        vec![rule("a", "value"), rule("foo", "doThing")],
    )
    .await;

    expect![[r#"
        function foo() {
            let a = 1;
            eval("a");
            return a;
        }
    "#]]
    .assert_eq(&output.source);
    assert_eq!(output.diagnostics.tainted_bindings_skipped, 2);
}

#[tokio::test]
async fn exported_specifiers_keep_their_external_names() {
    check(
        indoc! {"
            const a = 1;
            export { a };
        "},
        vec![rule("a", "limit")],
        &expect![[r#"
            const limit = 1;
            export { limit as a };
        "#]],
    )
    .await;
}

#[tokio::test]
async fn imports_are_never_renamed() {
    check(
        indoc! {"
            import { x } from 'm';
            const a = x;
        "},
        vec![rule("x", "value"), rule("a", "copy")],
        &expect![[r#"
            import { x } from 'm';
            const copy = x;
        "#]],
    )
    .await;
}

#[tokio::test]
async fn property_keys_are_untouched() {
    check(
        indoc! {"
            const a = 1;
            const o = { a: a, b() { return a; } };
            use(o.a);
        "},
        vec![rule("a", "z")],
        &expect![[r#"
            const z = 1;
            const o = { a: z, b() {
                return z;
            } };
            use(o.a);
        "#]],
    )
    .await;
}

#[tokio::test]
async fn oracle_failure_degrades_to_no_renames() {
    let source = "const a = 1;\n";
    let output = rename_module(
        source,
        &BrokenOracle,
        approximate_tokens,
        &RenameOptions::default(),
    )
    .await
    .expect("rename should succeed");

    assert_eq!(output.source, "const a = 1;\n");
    assert_eq!(output.diagnostics.failed_jobs, 1);
}

#[tokio::test]
async fn identity_oracle_is_a_no_op() {
    let source = indoc! {"
        const a = 1;
        function f(x) { return x + a; }
        export { f };
    "};
    let output = rename_module(
        source,
        &IdentityOracle,
        approximate_tokens,
        &RenameOptions::default(),
    )
    .await
    .expect("rename should succeed");

    // Identity renames leave the tree alone, so the output is exactly the normalized
    // emission of the parsed input.
    let (module, errors) = umc_parse::module(source, SourceType::Module);
    assert!(errors.is_empty());
    assert_eq!(output.source, umc_codegen::emit(&module));
}

#[tokio::test]
async fn renaming_is_deterministic() {
    let source = indoc! {"
        const a = 1;
        function f(x, y) { return a + x + y; }
    "};
    let rules = || {
        vec![
            rule("a", "base"),
            rule("x", "left"),
            rule("y", "right"),
            rule("f", "add"),
        ]
    };

    let first = run(source, rules()).await;
    let second = run(source, rules()).await;
    assert_eq!(first.source, second.source);
}
