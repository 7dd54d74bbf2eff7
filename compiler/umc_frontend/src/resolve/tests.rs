// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{resolve, Access, Resolutions};
use expect_test::{expect, Expect};
use indoc::indoc;
use std::fmt::Write;
use umc_ast::{assigner::Assigner, ast::SourceType, mut_visit::MutVisitor};

fn check(input: &str, expect: &Expect) {
    let (mut module, errors) = umc_parse::module(input, SourceType::Module);
    assert!(errors.is_empty(), "program has syntax errors: {errors:#?}");
    let mut assigner = Assigner::new();
    assigner.visit_module(&mut module);
    expect.assert_eq(&dump(&resolve(&module)));
}

fn dump(res: &Resolutions) -> String {
    let mut out = String::new();

    for scope in res.scopes.iter() {
        let parent = scope
            .parent
            .map_or_else(|| "-".to_string(), |p| usize::from(p).to_string());
        let declared: Vec<String> = scope
            .declared
            .iter()
            .map(|&b| res.bindings.get(b).name.to_string())
            .collect();
        let mut free: Vec<String> = scope.free_names.iter().map(ToString::to_string).collect();
        free.sort();
        writeln!(
            out,
            "scope {} {:?} parent {} declared [{}] free [{}]",
            usize::from(scope.id),
            scope.kind,
            parent,
            declared.join(" "),
            free.join(" "),
        )
        .expect("write should succeed");
    }

    for binding in res.bindings.iter() {
        let writes = binding
            .references
            .iter()
            .filter(|r| r.access == Access::Write)
            .count();
        writeln!(
            out,
            "binding {} {} {:?} scope {} refs {} writes {}",
            usize::from(binding.id),
            binding.name,
            binding.kind,
            usize::from(binding.declaring_scope),
            binding.references.len(),
            writes,
        )
        .expect("write should succeed");
    }

    for &(scope, sink) in &res.sinks {
        writeln!(out, "sink {:?} in scope {}", sink, usize::from(scope))
            .expect("write should succeed");
    }

    out
}

#[test]
fn declarations_and_references() {
    check(
        indoc! {"
            const a = 1;
            function f(x) { return a + x; }
        "},
        &expect![[r#"
            scope 0 Module parent - declared [a f] free []
            scope 1 Function parent 0 declared [x] free []
            scope 2 Block parent 1 declared [] free []
            binding 0 a Const scope 0 refs 1 writes 0
            binding 1 f Function scope 0 refs 0 writes 0
            binding 2 x Param scope 1 refs 1 writes 0
        "#]],
    );
}

#[test]
fn var_hoists_to_function_scope() {
    check(
        indoc! {"
            function f() { if (x) { var a = 1; } a = 2; }
            var a;
        "},
        &expect![[r#"
            scope 0 Module parent - declared [f a] free [x]
            scope 1 Function parent 0 declared [a] free [x]
            scope 2 Block parent 1 declared [] free [x]
            scope 3 Block parent 2 declared [] free []
            binding 0 f Function scope 0 refs 0 writes 0
            binding 1 a Var scope 1 refs 1 writes 1
            binding 2 a Var scope 0 refs 0 writes 0
        "#]],
    );
}

#[test]
fn function_expression_name_binds_inside() {
    check(
        indoc! {"
            const a = 1;
            const g = function inner() { const a = 2; return inner(a); };
        "},
        &expect![[r#"
            scope 0 Module parent - declared [a g] free []
            scope 1 Function parent 0 declared [inner] free []
            scope 2 Block parent 1 declared [a] free []
            binding 0 a Const scope 0 refs 0 writes 0
            binding 1 g Const scope 0 refs 0 writes 0
            binding 2 inner Function scope 1 refs 1 writes 0
            binding 3 a Const scope 2 refs 1 writes 0
        "#]],
    );
}

#[test]
fn catch_and_for_header_scopes() {
    check(
        indoc! {"
            try { f(); } catch (e) { log(e); }
            for (const x of xs) { use(x); }
        "},
        &expect![[r#"
            scope 0 Module parent - declared [] free [f log use xs]
            scope 1 Block parent 0 declared [] free [f]
            scope 2 Catch parent 0 declared [e] free [log]
            scope 3 Block parent 2 declared [] free [log]
            scope 4 ForHeader parent 0 declared [x] free [use xs]
            scope 5 Block parent 4 declared [] free [use]
            binding 0 e Catch scope 2 refs 1 writes 0
            binding 1 x Const scope 4 refs 1 writes 0
        "#]],
    );
}

#[test]
fn sinks_are_attributed_to_their_scope() {
    check(
        indoc! {r#"
            function foo() { let a = 1; eval("a"); return a; }
            setTimeout("code", 10);
            const t = setInterval(f, 5);
        "#},
        &expect![[r#"
            scope 0 Module parent - declared [foo t] free [eval f setInterval setTimeout]
            scope 1 Function parent 0 declared [] free [eval]
            scope 2 Block parent 1 declared [a] free [eval]
            binding 0 foo Function scope 0 refs 0 writes 0
            binding 1 a Let scope 2 refs 1 writes 0
            binding 2 t Const scope 0 refs 0 writes 0
            sink Eval in scope 2
            sink StringTimer in scope 0
        "#]],
    );
}

#[test]
fn destructuring_assignment_writes() {
    check(
        indoc! {"
            let a, b;
            [a, b] = [b, a];
            ({ a } = o);
        "},
        &expect![[r#"
            scope 0 Module parent - declared [a b] free [o]
            binding 0 a Let scope 0 refs 3 writes 2
            binding 1 b Let scope 0 refs 2 writes 1
        "#]],
    );
}

#[test]
fn local_eval_is_not_a_sink() {
    check(
        indoc! {"
            function f(eval) { eval(code); }
        "},
        &expect![[r#"
            scope 0 Module parent - declared [f] free [code]
            scope 1 Function parent 0 declared [eval] free [code]
            scope 2 Block parent 1 declared [] free [code]
            binding 0 f Function scope 0 refs 0 writes 0
            binding 1 eval Param scope 1 refs 1 writes 0
        "#]],
    );
}
