// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::{
    ast::{
        Block, Expr, ExprKind, Ident, Module, Name, NodeId, Pat, PatKind, Prop, Stmt, StmtKind,
    },
    visit::{self, Visitor},
};
use std::collections::BTreeMap;
use umc_data_structures::index_map::IndexMap;

/// Panics on default or duplicate node IDs. Run after assignment in debug flows.
#[derive(Default)]
pub struct Validator {
    ids: IndexMap<NodeId, ()>,
}

impl Validator {
    fn check(&mut self, id: NodeId) {
        assert!(!id.is_default(), "default node ID should be replaced");
        assert!(!self.ids.contains_key(id), "duplicate node ID: {id}");
        self.ids.insert(id, ());
    }
}

impl Visitor<'_> for Validator {
    fn visit_module(&mut self, module: &Module) {
        self.check(module.id);
        visit::walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.check(stmt.id);
        visit::walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &Block) {
        self.check(block.id);
        visit::walk_block(self, block);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.check(expr.id);
        visit::walk_expr(self, expr);
    }

    fn visit_pat(&mut self, pat: &Pat) {
        self.check(pat.id);
        visit::walk_pat(self, pat);
    }

    fn visit_ident(&mut self, ident: &Ident) {
        self.check(ident.id);
    }

    fn visit_name(&mut self, name: &Name) {
        self.check(name.id);
    }
}

/// Counts syntax-node kinds. Two trees that describe the same program modulo identifier names
/// produce equal counts, which is the structural-equivalence check used after re-parsing
/// emitted output.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct NodeCounts {
    counts: BTreeMap<&'static str, usize>,
}

impl NodeCounts {
    /// Counts the nodes of a module.
    #[must_use]
    pub fn of(module: &Module) -> Self {
        let mut counter = Counter::default();
        counter.visit_module(module);
        counter.counts
    }
}

#[derive(Default)]
struct Counter {
    counts: NodeCounts,
}

impl Counter {
    fn bump(&mut self, label: &'static str) {
        *self.counts.counts.entry(label).or_insert(0) += 1;
    }
}

impl Visitor<'_> for Counter {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.bump(stmt_label(&stmt.kind));
        visit::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.bump(expr_label(&expr.kind));
        visit::walk_expr(self, expr);
    }

    fn visit_pat(&mut self, pat: &Pat) {
        self.bump(pat_label(&pat.kind));
        visit::walk_pat(self, pat);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        self.bump("prop");
        visit::walk_prop(self, prop);
    }

    fn visit_ident(&mut self, _: &Ident) {
        self.bump("ident");
    }

    fn visit_name(&mut self, _: &Name) {
        self.bump("name");
    }
}

fn stmt_label(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::Block(_) => "stmt-block",
        StmtKind::Var(_) => "stmt-var",
        StmtKind::Func(_) => "stmt-func",
        StmtKind::Class(_) => "stmt-class",
        StmtKind::Expr(_) => "stmt-expr",
        StmtKind::If(..) => "stmt-if",
        StmtKind::For(..) => "stmt-for",
        StmtKind::ForIn(..) => "stmt-for-in",
        StmtKind::ForOf(..) => "stmt-for-of",
        StmtKind::While(..) => "stmt-while",
        StmtKind::DoWhile(..) => "stmt-do-while",
        StmtKind::Switch(..) => "stmt-switch",
        StmtKind::Try(..) => "stmt-try",
        StmtKind::Throw(_) => "stmt-throw",
        StmtKind::Return(_) => "stmt-return",
        StmtKind::Break(_) => "stmt-break",
        StmtKind::Continue(_) => "stmt-continue",
        StmtKind::Labeled(..) => "stmt-labeled",
        StmtKind::With(..) => "stmt-with",
        StmtKind::Debugger => "stmt-debugger",
        StmtKind::Empty => "stmt-empty",
        StmtKind::Import(_) => "stmt-import",
        StmtKind::ExportDecl(_) => "stmt-export-decl",
        StmtKind::ExportNamed(_) => "stmt-export-named",
        StmtKind::ExportDefault(_) => "stmt-export-default",
        StmtKind::ExportAll(_) => "stmt-export-all",
    }
}

fn expr_label(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Ident(_) => "expr-ident",
        ExprKind::Lit(_) => "expr-lit",
        ExprKind::Template(_) => "expr-template",
        ExprKind::TaggedTemplate(..) => "expr-tagged-template",
        ExprKind::Array(_) => "expr-array",
        ExprKind::Object(_) => "expr-object",
        ExprKind::Func(..) => "expr-func",
        ExprKind::Arrow(_) => "expr-arrow",
        ExprKind::Class(..) => "expr-class",
        ExprKind::Unary(..) => "expr-unary",
        ExprKind::Update(..) => "expr-update",
        ExprKind::Bin(..) => "expr-bin",
        ExprKind::Assign(..) => "expr-assign",
        ExprKind::Cond(..) => "expr-cond",
        ExprKind::Call(..) => "expr-call",
        ExprKind::New(..) => "expr-new",
        ExprKind::Member(..) => "expr-member",
        ExprKind::Seq(_) => "expr-seq",
        ExprKind::Await(_) => "expr-await",
        ExprKind::Yield(..) => "expr-yield",
        ExprKind::Spread(_) => "expr-spread",
        ExprKind::Paren(_) => "expr-paren",
        ExprKind::This => "expr-this",
        ExprKind::Super => "expr-super",
        ExprKind::NewTarget => "expr-new-target",
        ExprKind::ImportMeta => "expr-import-meta",
        ExprKind::ImportCall(_) => "expr-import-call",
        ExprKind::Err => "expr-err",
    }
}

fn pat_label(kind: &PatKind) -> &'static str {
    match kind {
        PatKind::Ident(_) => "pat-ident",
        PatKind::Array(_) => "pat-array",
        PatKind::Object(_) => "pat-object",
        PatKind::Assign(..) => "pat-assign",
        PatKind::Rest(_) => "pat-rest",
        PatKind::Err => "pat-err",
    }
}
