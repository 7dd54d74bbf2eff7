// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::{analyze, AnalysisUnit, Error};
use crate::resolve::{Binding, ExportStatus};
use indoc::indoc;
use umc_ast::ast::SourceType;

fn unit(input: &str) -> AnalysisUnit {
    analyze(input, SourceType::Module).expect("source should analyze")
}

fn binding<'a>(unit: &'a AnalysisUnit, name: &str) -> &'a Binding {
    unit.bindings
        .iter()
        .find(|b| b.name.as_ref() == name)
        .expect("binding should exist")
}

#[test]
fn malformed_source_is_fatal() {
    let error = analyze("const = ;", SourceType::Module).expect_err("parse should fail");
    let Error::MalformedSource(errors) = error;
    assert!(!errors.is_empty());
}

#[test]
fn eval_taints_the_enclosing_chain() {
    let unit = unit(indoc! {r#"
        function safe() { let s = 1; return s; }
        function risky() { eval("x"); }
    "#});

    // The tainted chain runs from the eval site to the root, so both top-level functions
    // become unsafe, but bindings inside the sibling function stay renameable.
    assert!(binding(&unit, "risky").is_unsafe(&unit.scopes));
    assert!(binding(&unit, "safe").is_unsafe(&unit.scopes));
    assert!(!binding(&unit, "s").is_unsafe(&unit.scopes));
    assert!(unit.is_renameable(binding(&unit, "s")));
}

#[test]
fn function_sink_taints_only_the_root_in_modules() {
    let unit = unit(indoc! {r#"
        function mk(body) { return new Function(body); }
    "#});

    // `Function` strings evaluate in the global scope; in a module only the module scope can
    // leak names to them.
    assert!(binding(&unit, "mk").is_unsafe(&unit.scopes));
    assert!(!binding(&unit, "body").is_unsafe(&unit.scopes));
}

#[test]
fn with_taints_in_scripts() {
    let unit = analyze("function f(x) { with (o) { g(x); } }", SourceType::Script)
        .expect("source should analyze");

    assert!(binding(&unit, "f").is_unsafe(&unit.scopes));
    assert!(binding(&unit, "x").is_unsafe(&unit.scopes));
}

#[test]
fn export_and_import_metadata() {
    let unit = unit(indoc! {r#"
        export const a = 1;
        const b = 2;
        export { b as bee };
        export default function c() {}
        import { d as e } from 'm';
    "#});

    let exports: Vec<(String, String)> = unit
        .exports
        .iter()
        .map(|entry| {
            (
                unit.bindings.get(entry.binding).name.to_string(),
                entry.exported.to_string(),
            )
        })
        .collect();
    assert_eq!(
        exports,
        [
            ("a".to_string(), "a".to_string()),
            ("b".to_string(), "bee".to_string()),
            ("c".to_string(), "default".to_string()),
        ],
    );

    assert_eq!(
        binding(&unit, "a").export_status,
        ExportStatus::ByDeclaration
    );
    assert_eq!(
        binding(&unit, "b").export_status,
        ExportStatus::BySpecifier
    );
    assert_eq!(
        binding(&unit, "c").export_status,
        ExportStatus::ByDeclaration
    );

    let import = &unit.imports[0];
    assert_eq!(import.imported.as_ref(), "d");
    assert_eq!(unit.bindings.get(import.binding).name.as_ref(), "e");
    assert!(binding(&unit, "e").is_imported);
    assert!(!unit.is_renameable(binding(&unit, "e")));
}

#[test]
fn is_constant_tracks_writes() {
    let unit = unit("let a = 1; a += 1; const b = 2; use(b);");
    assert!(!binding(&unit, "a").is_constant);
    assert!(binding(&unit, "b").is_constant);
}
