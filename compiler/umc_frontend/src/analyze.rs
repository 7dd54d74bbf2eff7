// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The analysis entry point: parse, assign node IDs, build scopes and bindings, resolve
//! references, propagate taint, and collect export/import metadata. The result is frozen; no
//! later stage mutates it except the rewrite engine, which takes the tree by value.

#[cfg(test)]
mod tests;

use crate::{
    exports::{self, ExportEntry, ImportEntry},
    resolve::{self, Binding, BindingTable, Names, ScopeTable},
    taint,
};
use miette::Diagnostic;
use std::rc::Rc;
use thiserror::Error;
use umc_ast::{
    assigner::Assigner,
    ast::{Module, SourceType},
    mut_visit::MutVisitor,
};

#[derive(Clone, Debug, Diagnostic, Error)]
pub enum Error {
    /// The source failed to parse; renaming cannot proceed.
    #[error("malformed source")]
    #[diagnostic(code("umc.frontend.malformed_source"))]
    MalformedSource(#[related] Vec<umc_parse::Error>),
}

/// The frozen result of analyzing one module.
#[derive(Debug)]
pub struct AnalysisUnit {
    pub module: Module,
    pub source: Rc<str>,
    pub scopes: ScopeTable,
    pub bindings: BindingTable,
    pub names: Names,
    pub exports: Vec<ExportEntry>,
    pub imports: Vec<ImportEntry>,
    /// The node-ID assigner, carried so rewrite passes can mint fresh nodes.
    pub assigner: Assigner,
}

impl AnalysisUnit {
    /// True if the binding may be renamed at all: not tainted and not an import.
    #[must_use]
    pub fn is_renameable(&self, binding: &Binding) -> bool {
        !binding.is_unsafe(&self.scopes) && !binding.is_imported
    }

    /// The source text of a span.
    #[must_use]
    pub fn text(&self, span: umc_data_structures::span::Span) -> &str {
        &self.source[span]
    }
}

/// Analyzes a source file.
pub fn analyze(source: &str, source_type: SourceType) -> Result<AnalysisUnit, Error> {
    let (mut module, errors) = umc_parse::module(source, source_type);
    if !errors.is_empty() {
        return Err(Error::MalformedSource(errors));
    }

    let mut assigner = Assigner::new();
    assigner.visit_module(&mut module);

    let resolutions = resolve::resolve(&module);
    let resolve::Resolutions {
        mut scopes,
        mut bindings,
        names,
        sinks,
    } = resolutions;

    taint::propagate(&mut scopes, &sinks, source_type);
    let (exports, imports) = exports::collect(&module, &names, &mut bindings);

    log::debug!(
        "analyzed module: {} scopes, {} bindings, {} sinks, {} exports, {} imports",
        scopes.len(),
        bindings.len(),
        sinks.len(),
        exports.len(),
        imports.len(),
    );

    Ok(AnalysisUnit {
        module,
        source: source.into(),
        scopes,
        bindings,
        names,
        exports,
        imports,
        assigner,
    })
}
