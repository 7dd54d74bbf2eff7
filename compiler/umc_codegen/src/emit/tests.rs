// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::emit;
use expect_test::{expect, Expect};
use umc_ast::ast::SourceType;

fn check(input: &str, expect: &Expect) {
    let (module, errors) = umc_parse::module(input, SourceType::Module);
    assert!(errors.is_empty(), "program has syntax errors: {errors:#?}");
    expect.assert_eq(&emit(&module));
}

/// Emitted output must itself parse back to the same emission.
fn check_stable(input: &str) {
    let (module, errors) = umc_parse::module(input, SourceType::Module);
    assert!(errors.is_empty(), "program has syntax errors: {errors:#?}");
    let first = emit(&module);
    let (reparsed, errors) = umc_parse::module(&first, SourceType::Module);
    assert!(errors.is_empty(), "emitted source has syntax errors: {errors:#?}");
    assert_eq!(first, emit(&reparsed));
}

#[test]
fn declaration() {
    check("const a=1;", &expect![[r#"
        const a = 1;
    "#]]);
}

#[test]
fn function_declaration() {
    check(
        "function f(a,b){return a+b;}",
        &expect![[r#"
            function f(a, b) {
                return a + b;
            }
        "#]],
    );
}

#[test]
fn if_else() {
    check(
        "if(x){y();}else z();",
        &expect![[r#"
            if (x) {
                y();
            } else
                z();
        "#]],
    );
}

#[test]
fn arrow_with_object_body() {
    check(
        "const f=(x)=>({a:x});",
        &expect![[r#"
            const f = (x) => ({ a: x });
        "#]],
    );
}

#[test]
fn template() {
    check("const s=`a${b}c`;", &expect![[r#"
        const s = `a${b}c`;
    "#]]);
}

#[test]
fn class_members() {
    check(
        "class A extends B{constructor(){super();}get x(){return 1;}}",
        &expect![[r#"
            class A extends B {
                constructor() {
                    super();
                }
                get x() {
                    return 1;
                }
            }
        "#]],
    );
}

#[test]
fn for_of_destructuring() {
    check(
        "for(const [a,b] of xs){use(a,b);}",
        &expect![[r#"
            for (const [a, b] of xs) {
                use(a, b);
            }
        "#]],
    );
}

#[test]
fn switch_cases() {
    check(
        "switch(x){case 1:f();break;default:g();}",
        &expect![[r#"
            switch (x) {
                case 1:
                    f();
                    break;
                default:
                    g();
            }
        "#]],
    );
}

#[test]
fn module_items() {
    check(
        "import a,{b as c}from'm';export{a};",
        &expect![[r#"
            import a, { b as c } from 'm';
            export { a };
        "#]],
    );
}

#[test]
fn parenthesized_precedence() {
    check("(a+b)*c;", &expect![[r#"
        (a + b) * c;
    "#]]);
}

#[test]
fn optional_chain() {
    check("a?.b?.[c]?.(d);", &expect![[r#"
        a?.b?.[c]?.(d);
    "#]]);
}

#[test]
fn emission_is_stable() {
    let sources = [
        "const a = 1, { b, c: d = 2, ...rest } = o;",
        "async function f() { return await g(); }",
        "function* gen() { yield* xs; }",
        "const o = { a, m() { return 1; }, get p() { return 2; }, ...r };",
        "try { f(); } catch (e) { g(e); } finally { h(); }",
        "label: for (let i = 0; i < n; i++) continue label;",
        "do f(); while (x);",
        "x = y ? a ?? b : -c ** 2;",
        "new Map([[1, 2]]).get(1);",
        "export default class {}",
        "throw new Error(`bad ${x}`);",
    ];

    for source in sources {
        check_stable(source);
    }
}
