// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Dossier construction: a compact, language-neutral summary of how each renameable binding
//! is used, derived entirely from the recorded references and one read-only walk of the tree.
//! Dossiers are what the oracle sees; they carry no pointers back into the syntax tree.

#[cfg(test)]
mod tests;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::BTreeSet;
use umc_ast::{
    ast::{Expr, ExprKind, Lit, MemberProp, NodeId, PatKind, Stmt, StmtKind},
    visit::{self as ast_visit, Visitor},
};
use umc_frontend::{
    analyze::AnalysisUnit,
    resolve::{Access, BindingId, Names},
};

/// The usage summary of one binding over all of its references. Sets are ordered so the
/// summary serializes deterministically.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub reference_count: usize,
    pub is_called: bool,
    pub is_constructed: bool,
    pub is_awaited: bool,
    pub is_iterated: bool,
    pub is_returned: bool,
    pub is_assigned_to: bool,
    pub unary_operators: BTreeSet<String>,
    pub binary_operators: BTreeSet<String>,
    pub compared_literals: BTreeSet<String>,
    pub called_methods: BTreeSet<String>,
    pub member_reads: BTreeSet<String>,
    pub member_writes: BTreeSet<String>,
}

/// The evidence bundle handed to the oracle for one binding.
#[derive(Clone, Debug)]
pub struct Dossier {
    pub binding: BindingId,
    pub summary: UsageSummary,
    pub snippet: String,
    pub hints: Vec<String>,
}

/// Usage summaries for every binding, plus the facts style inference needs.
#[derive(Debug, Default)]
pub struct UsageTable {
    summaries: FxHashMap<BindingId, UsageSummary>,
    /// Bindings whose declarator initializes a lone identifier to a primitive literal.
    literal_consts: FxHashSet<BindingId>,
}

impl UsageTable {
    #[must_use]
    pub fn summary(&self, binding: BindingId) -> Option<&UsageSummary> {
        self.summaries.get(&binding)
    }

    #[must_use]
    pub fn is_literal_const(&self, binding: BindingId) -> bool {
        self.literal_consts.contains(&binding)
    }
}

/// Collects usage summaries for every binding in the module.
#[must_use]
pub fn collect_usage(unit: &AnalysisUnit) -> UsageTable {
    let mut collector = UsageCollector {
        names: &unit.names,
        table: UsageTable::default(),
        skip_member_of: FxHashSet::default(),
    };
    collector.visit_module(&unit.module);

    let mut table = collector.table;
    for binding in unit.bindings.iter() {
        let summary = table.summaries.entry(binding.id).or_default();
        summary.reference_count = binding.references.len();
        summary.is_assigned_to = binding
            .references
            .iter()
            .any(|r| r.access == Access::Write);
    }
    table
}

/// Builds dossiers for every renameable binding, truncating declaration snippets to the given
/// byte budget.
#[must_use]
pub fn build(unit: &AnalysisUnit, usage: &UsageTable, snippet_budget: usize) -> Vec<Dossier> {
    let mut dossiers = Vec::new();
    for binding in unit.bindings.iter() {
        if !unit.is_renameable(binding) {
            continue;
        }
        let summary = usage
            .summary(binding.id)
            .cloned()
            .unwrap_or_default();
        let hints = type_hints(&summary);
        dossiers.push(Dossier {
            binding: binding.id,
            snippet: truncate(unit.text(binding.stmt_span), snippet_budget),
            summary,
            hints,
        });
    }
    dossiers
}

/// Truncates text to a byte budget on a character boundary, appending a marker when cut.
#[must_use]
pub fn truncate(text: &str, budget: usize) -> String {
    if text.len() <= budget {
        return text.to_string();
    }
    let mut end = budget;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

const ARRAY_METHODS: &[&str] = &[
    "concat", "every", "filter", "find", "findIndex", "flat", "flatMap", "forEach", "includes",
    "indexOf", "join", "map", "pop", "push", "reduce", "reverse", "shift", "slice", "some",
    "sort", "splice", "unshift",
];

const PROMISE_METHODS: &[&str] = &["catch", "finally", "then"];

/// Advisory type hints derived from the usage summary. They inform the oracle's choice of
/// name and never affect correctness.
#[must_use]
pub fn type_hints(summary: &UsageSummary) -> Vec<String> {
    let mut hints = Vec::new();

    if summary
        .called_methods
        .iter()
        .any(|m| ARRAY_METHODS.contains(&m.as_str()))
    {
        hints.push("array-like".to_string());
    }
    if summary.is_awaited
        || summary
            .called_methods
            .iter()
            .any(|m| PROMISE_METHODS.contains(&m.as_str()))
    {
        hints.push("promise-like".to_string());
    }
    if summary.member_reads.contains("length") {
        hints.push("array/string-like".to_string());
    }
    if summary.is_called {
        hints.push("callable".to_string());
    }
    if summary.is_constructed {
        hints.push("constructor".to_string());
    }
    if summary
        .binary_operators
        .iter()
        .any(|op| matches!(op.as_str(), "-" | "*" | "/" | "%" | "**"))
    {
        hints.push("number-like".to_string());
    }

    hints
}

struct UsageCollector<'a> {
    names: &'a Names,
    table: UsageTable,
    /// Member nodes already accounted for as method calls or member writes, so the generic
    /// member-read case skips them.
    skip_member_of: FxHashSet<NodeId>,
}

impl UsageCollector<'_> {
    fn summary(&mut self, ident_node: NodeId) -> Option<&mut UsageSummary> {
        let binding = *self.names.get(ident_node)?;
        Some(self.table.summaries.entry(binding).or_default())
    }

    fn with_ident(&mut self, expr: &Expr, f: impl FnOnce(&mut UsageSummary)) {
        if let ExprKind::Ident(ident) = &*expr.kind {
            if let Some(summary) = self.summary(ident.id) {
                f(summary);
            }
        }
    }

    /// The identifier at the root of a member/call chain, if any: `x` in `x.a().b`.
    fn chain_root<'b>(expr: &'b Expr) -> Option<&'b umc_ast::ast::Ident> {
        match &*expr.kind {
            ExprKind::Ident(ident) => Some(ident),
            ExprKind::Member(object, ..) => Self::chain_root(object),
            ExprKind::Call(callee, ..) => Self::chain_root(callee),
            ExprKind::Paren(inner) => Self::chain_root(inner),
            _ => None,
        }
    }

    fn record_comparison(&mut self, op: umc_ast::ast::BinOp, side: &Expr, other: &Expr) {
        let is_comparison = matches!(
            op,
            umc_ast::ast::BinOp::Eq
                | umc_ast::ast::BinOp::Neq
                | umc_ast::ast::BinOp::StrictEq
                | umc_ast::ast::BinOp::StrictNeq
                | umc_ast::ast::BinOp::Lt
                | umc_ast::ast::BinOp::Lte
                | umc_ast::ast::BinOp::Gt
                | umc_ast::ast::BinOp::Gte
        );

        let literal = if is_comparison {
            literal_repr(other)
        } else {
            None
        };

        self.with_ident(side, |summary| {
            summary.binary_operators.insert(op.to_string());
            if let Some(literal) = literal {
                summary.compared_literals.insert(literal);
            }
        });
    }
}

/// A compact, stable representation of a literal for `compared_literals`.
fn literal_repr(expr: &Expr) -> Option<String> {
    match &*expr.kind {
        ExprKind::Lit(Lit::Num(_, raw) | Lit::BigInt(_, raw) | Lit::Str(_, raw)) => {
            Some(raw.to_string())
        }
        ExprKind::Lit(Lit::Bool(true)) => Some("true".to_string()),
        ExprKind::Lit(Lit::Bool(false)) => Some("false".to_string()),
        ExprKind::Lit(Lit::Null) => Some("null".to_string()),
        _ => None,
    }
}

impl<'a> Visitor<'a> for UsageCollector<'_> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &*stmt.kind {
            StmtKind::Return(Some(argument)) => {
                self.with_ident(argument, |summary| summary.is_returned = true);
            }
            StmtKind::ForOf(_, _, iterable, _) => {
                self.with_ident(iterable, |summary| summary.is_iterated = true);
            }
            _ => {}
        }
        ast_visit::walk_stmt(self, stmt);
    }

    fn visit_var_declarator(&mut self, decl: &'a umc_ast::ast::VarDeclarator) {
        if let (PatKind::Ident(ident), Some(init)) = (&*decl.pat.kind, &decl.init) {
            if matches!(&*init.kind, ExprKind::Lit(_)) {
                if let Some(&binding) = self.names.get(ident.id) {
                    self.table.literal_consts.insert(binding);
                }
            }
        }
        ast_visit::walk_var_declarator(self, decl);
    }

    #[allow(clippy::too_many_lines)]
    fn visit_expr(&mut self, expr: &'a Expr) {
        match &*expr.kind {
            ExprKind::Call(callee, _, _) => {
                match &*callee.kind {
                    ExprKind::Ident(ident) => {
                        if let Some(summary) = self.summary(ident.id) {
                            summary.is_called = true;
                        }
                    }
                    ExprKind::Member(object, MemberProp::Name(method), _) => {
                        if let Some(root) = Self::chain_root(object) {
                            let method = method.name.to_string();
                            if let Some(summary) = self.summary(root.id) {
                                summary.called_methods.insert(method);
                            }
                        }
                        self.skip_member_of.insert(callee.id);
                    }
                    _ => {}
                }
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::New(callee, _) => {
                self.with_ident(callee, |summary| summary.is_constructed = true);
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::Await(operand) => {
                self.with_ident(operand, |summary| summary.is_awaited = true);
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::Unary(op, operand) => {
                let op = op.to_string();
                self.with_ident(operand, |summary| {
                    summary.unary_operators.insert(op);
                });
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::Bin(op, lhs, rhs) => {
                self.record_comparison(*op, lhs, rhs);
                self.record_comparison(*op, rhs, lhs);
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::Assign(_, target, _) => {
                if let ExprKind::Member(object, MemberProp::Name(member), _) = &*target.kind {
                    if let ExprKind::Ident(ident) = &*object.kind {
                        let member = member.name.to_string();
                        if let Some(summary) = self.summary(ident.id) {
                            summary.member_writes.insert(member);
                        }
                        self.skip_member_of.insert(target.id);
                    }
                }
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::Member(object, MemberProp::Name(member), _) => {
                if !self.skip_member_of.contains(&expr.id) {
                    if let ExprKind::Ident(ident) = &*object.kind {
                        let member = member.name.to_string();
                        if let Some(summary) = self.summary(ident.id) {
                            summary.member_reads.insert(member);
                        }
                    }
                }
                ast_visit::walk_expr(self, expr);
            }
            _ => ast_visit::walk_expr(self, expr),
        }
    }
}
