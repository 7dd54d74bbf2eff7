// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! Scope-tree construction and reference resolution.
//!
//! Analysis runs in two walks over the tree. [`ScopeBuilder`] opens a scope for every
//! scope-introducing node and declares bindings with the hoisting rules of the language:
//! `var` and function declarations bind in the nearest function or program scope,
//! `let`/`const`/`class` in the immediate scope, parameters and a function expression's own
//! name in the function scope, catch parameters in the catch scope, and `for`-header
//! declarations in a scope of their own. [`Resolver`] re-walks the tree with the recorded
//! scope map and resolves every identifier reference to the innermost declaring scope,
//! recording read or write access. Names that resolve to no binding are recorded as free on
//! every scope they are visible from.
//!
//! Property keys, member names, labels, private names, and import/export external names are
//! [`Name`] nodes rather than [`Ident`] nodes, so neither walk can reach them.

#[cfg(test)]
mod tests;

use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;
use umc_ast::{
    ast::{
        Arrow, Block, CatchClause, Class, Expr, ExportDefaultKind, ExprKind, Func, Ident,
        ImportSpecifierKind, Lit, Module, NodeId, ObjectPatProp, ObjectPatPropKind, Pat, PatKind,
        SourceType, Stmt, StmtKind, VarDecl,
    },
    visit::{self as ast_visit, Visitor as AstVisitor},
};
use umc_data_structures::{index_map::IndexMap, span::Span};

/// The resolution of identifier nodes to bindings: declaration sites and references alike.
pub type Names = IndexMap<NodeId, BindingId>;

/// A stable identifier for a scope, minted in visit order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program root scope.
    #[must_use]
    pub fn root() -> Self {
        ScopeId(0)
    }
}

impl From<ScopeId> for usize {
    fn from(value: ScopeId) -> Self {
        value.0 as usize
    }
}

impl From<usize> for ScopeId {
    fn from(value: usize) -> Self {
        ScopeId(value.try_into().expect("scope ID should fit into u32"))
    }
}

/// A stable identifier for a binding, minted in declaration order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BindingId(u32);

impl From<BindingId> for usize {
    fn from(value: BindingId) -> Self {
        value.0 as usize
    }
}

impl From<usize> for BindingId {
    fn from(value: usize) -> Self {
        BindingId(value.try_into().expect("binding ID should fit into u32"))
    }
}

/// The kind of a lexical scope.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    Program,
    Module,
    Function,
    Class,
    Block,
    Catch,
    ForHeader,
}

/// A node in the lexical-scope tree.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub span: Span,
    /// Bindings declared directly in this scope, in declaration order.
    pub declared: Vec<BindingId>,
    /// Child scopes in visit order.
    pub children: Vec<ScopeId>,
    /// True if renaming bindings of this scope is unsound.
    pub tainted: bool,
    /// Names referenced somewhere in this scope's subtree that resolve to no binding. A
    /// rename must never collide with one of these, or it would capture a global.
    pub free_names: FxHashSet<Rc<str>>,
    names: FxHashMap<Rc<str>, BindingId>,
}

impl Scope {
    /// The binding a name resolves to directly in this scope, ignoring ancestors.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<BindingId> {
        self.names.get(name).copied()
    }

    /// True if this scope is a chunk scope: a unit the job planner groups bindings by.
    #[must_use]
    pub fn is_chunk(&self) -> bool {
        matches!(
            self.kind,
            ScopeKind::Program | ScopeKind::Module | ScopeKind::Function | ScopeKind::Class
        )
    }
}

/// The kind of a binding's declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingKind {
    Param,
    Const,
    Let,
    Var,
    Function,
    Class,
    Catch,
    Import,
}

/// How a binding participates in the module's exports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExportStatus {
    #[default]
    NotExported,
    /// The declaration itself is `export …`.
    ByDeclaration,
    /// The binding is referenced in an `export { x }` specifier.
    BySpecifier,
}

/// Whether a reference reads or writes the binding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    Read,
    Write,
}

/// One non-declaring occurrence of a binding.
#[derive(Clone, Copy, Debug)]
pub struct Reference {
    pub node: NodeId,
    pub span: Span,
    pub access: Access,
}

/// The preferred naming convention for a binding's replacement name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NameStyle {
    #[default]
    Camel,
    Pascal,
    UpperSnake,
}

/// A declared identifier.
#[derive(Debug)]
pub struct Binding {
    pub id: BindingId,
    pub name: Rc<str>,
    pub declaring_scope: ScopeId,
    pub kind: BindingKind,
    /// True iff the binding is never written after declaration.
    pub is_constant: bool,
    pub is_imported: bool,
    pub export_status: ExportStatus,
    /// Non-declaring occurrences, in source order.
    pub references: Vec<Reference>,
    pub desired_style: NameStyle,
    /// The span of the declaring identifier.
    pub decl_span: Span,
    /// The span of the enclosing statement, used for declaration snippets.
    pub stmt_span: Span,
    /// The node ID of the declaring identifier.
    pub decl_node: NodeId,
}

impl Binding {
    /// True iff renaming this binding is unsound because its declaring scope is tainted.
    #[must_use]
    pub fn is_unsafe(&self, scopes: &ScopeTable) -> bool {
        scopes.get(self.declaring_scope).tainted
    }
}

/// The scope tree of one module.
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: IndexMap<ScopeId, Scope>,
    len: u32,
}

impl ScopeTable {
    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id).expect("scope ID should be valid")
    }

    pub(crate) fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        self.scopes.get_mut(id).expect("scope ID should be valid")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The chain of scopes from `id` up to and including the root.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = &Scope> {
        let mut current = Some(id);
        std::iter::from_fn(move || {
            let scope = self.get(current?);
            current = scope.parent;
            Some(scope)
        })
    }

    /// The depth of a scope: the root has depth zero.
    #[must_use]
    pub fn depth(&self, id: ScopeId) -> usize {
        self.ancestors(id).count() - 1
    }

    fn insert(&mut self, parent: Option<ScopeId>, kind: ScopeKind, span: Span) -> ScopeId {
        let id = ScopeId(self.len);
        self.len += 1;
        self.scopes.insert(
            id,
            Scope {
                id,
                parent,
                kind,
                span,
                declared: Vec::new(),
                children: Vec::new(),
                tainted: false,
                free_names: FxHashSet::default(),
                names: FxHashMap::default(),
            },
        );
        if let Some(parent) = parent {
            self.get_mut(parent).children.push(id);
        }
        id
    }
}

/// The binding table of one module.
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: IndexMap<BindingId, Binding>,
    len: u32,
}

impl BindingTable {
    #[must_use]
    pub fn get(&self, id: BindingId) -> &Binding {
        self.bindings.get(id).expect("binding ID should be valid")
    }

    pub fn get_mut(&mut self, id: BindingId) -> &mut Binding {
        self.bindings.get_mut(id).expect("binding ID should be valid")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn insert(&mut self, binding: Binding) -> BindingId {
        let id = BindingId(self.len);
        self.len += 1;
        self.bindings.insert(
            id,
            Binding {
                id,
                ..binding
            },
        );
        id
    }
}

/// A renaming-unsafe construct discovered during resolution, attributed to the innermost
/// scope containing it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sink {
    /// A call to an unbound `eval`.
    Eval,
    /// A `with` statement.
    With,
    /// A call to or construction of an unbound `Function`.
    Function,
    /// A string literal handed to an unbound `setTimeout`/`setInterval`.
    StringTimer,
}

/// The complete result of scope and binding analysis, before taint propagation.
pub struct Resolutions {
    pub scopes: ScopeTable,
    pub bindings: BindingTable,
    pub names: Names,
    /// Taint sites in visit order, attributed to their innermost scope.
    pub sinks: Vec<(ScopeId, Sink)>,
}

/// Builds the scope tree and binding table, then resolves references.
#[must_use]
pub fn resolve(module: &Module) -> Resolutions {
    let mut builder = ScopeBuilder::new(module);
    builder.visit_module(module);
    let (mut scopes, mut bindings, mut names, scope_of_node) = builder.into_tables();

    let mut resolver = Resolver {
        scopes: &mut scopes,
        bindings: &mut bindings,
        names: &mut names,
        scope_of_node: &scope_of_node,
        stack: vec![ScopeId::root()],
        sinks: Vec::new(),
    };
    ast_visit::walk_module(&mut resolver, module);
    let sinks = resolver.sinks;

    for binding in bindings.bindings.values_mut() {
        binding.is_constant = binding
            .references
            .iter()
            .all(|r| r.access == Access::Read);
    }

    Resolutions {
        scopes,
        bindings,
        names,
        sinks,
    }
}

struct ScopeBuilder {
    scopes: ScopeTable,
    bindings: BindingTable,
    names: Names,
    /// Scope opened by each scope-introducing node, for the second walk to follow.
    scope_of_node: FxHashMap<NodeId, ScopeId>,
    stack: Vec<ScopeId>,
    stmt_spans: Vec<Span>,
}

impl ScopeBuilder {
    fn new(module: &Module) -> Self {
        let mut scopes = ScopeTable::default();
        let kind = match module.source_type {
            SourceType::Script => ScopeKind::Program,
            SourceType::Module => ScopeKind::Module,
        };
        let root = scopes.insert(None, kind, module.span);
        let mut scope_of_node = FxHashMap::default();
        scope_of_node.insert(module.id, root);

        Self {
            scopes,
            bindings: BindingTable::default(),
            names: Names::default(),
            scope_of_node,
            stack: vec![root],
            stmt_spans: Vec::new(),
        }
    }

    fn into_tables(self) -> (ScopeTable, BindingTable, Names, FxHashMap<NodeId, ScopeId>) {
        (self.scopes, self.bindings, self.names, self.scope_of_node)
    }

    fn current(&self) -> ScopeId {
        *self.stack.last().expect("scope stack should not be empty")
    }

    fn open(&mut self, node: NodeId, kind: ScopeKind, span: Span) {
        let id = self.scopes.insert(Some(self.current()), kind, span);
        self.scope_of_node.insert(node, id);
        self.stack.push(id);
    }

    fn close(&mut self) {
        self.stack.pop().expect("scope stack should not be empty");
    }

    /// The scope a binding of the given kind lands in: `var` and function declarations hoist
    /// to the nearest function or program scope, everything else binds where it stands.
    fn target_scope(&self, kind: BindingKind) -> ScopeId {
        match kind {
            BindingKind::Var | BindingKind::Function => *self
                .stack
                .iter()
                .rev()
                .find(|id| {
                    matches!(
                        self.scopes.get(**id).kind,
                        ScopeKind::Program | ScopeKind::Module | ScopeKind::Function
                    )
                })
                .expect("a function or program scope should always enclose"),
            _ => self.current(),
        }
    }

    fn declare(&mut self, ident: &Ident, kind: BindingKind) {
        let target = self.target_scope(kind);

        // Redeclaration (`var a; var a;`, merged function declarations) reuses the binding;
        // the extra declaring identifier is recorded as a write so renaming reaches it.
        if let Some(existing) = self.scopes.get(target).binding(&ident.name) {
            self.names.insert(ident.id, existing);
            self.bindings.get_mut(existing).references.push(Reference {
                node: ident.id,
                span: ident.span,
                access: Access::Write,
            });
            return;
        }

        let stmt_span = self
            .stmt_spans
            .last()
            .copied()
            .unwrap_or(self.scopes.get(target).span);
        let id = self.bindings.insert(Binding {
            id: BindingId(0),
            name: Rc::clone(&ident.name),
            declaring_scope: target,
            kind,
            is_constant: true,
            is_imported: kind == BindingKind::Import,
            export_status: ExportStatus::default(),
            references: Vec::new(),
            desired_style: NameStyle::default(),
            decl_span: ident.span,
            stmt_span,
            decl_node: ident.id,
        });
        self.names.insert(ident.id, id);
        let scope = self.scopes.get_mut(target);
        scope.declared.push(id);
        scope.names.insert(Rc::clone(&ident.name), id);
    }

    /// Declares every identifier bound by a pattern.
    fn declare_pat(&mut self, pat: &Pat, kind: BindingKind) {
        match &*pat.kind {
            PatKind::Ident(ident) => self.declare(ident, kind),
            PatKind::Array(elements) => {
                for element in elements.iter().flatten() {
                    self.declare_pat(element, kind);
                }
            }
            PatKind::Object(props) => {
                for prop in props.iter() {
                    match &prop.kind {
                        ObjectPatPropKind::Shorthand(ident, _) => self.declare(ident, kind),
                        ObjectPatPropKind::KeyValue(_, value) => self.declare_pat(value, kind),
                        ObjectPatPropKind::Rest(inner) => self.declare_pat(inner, kind),
                    }
                }
            }
            PatKind::Assign(inner, _) | PatKind::Rest(inner) => self.declare_pat(inner, kind),
            PatKind::Err => {}
        }
    }

    fn declare_var_decl(&mut self, decl: &VarDecl) {
        let kind = match decl.kind {
            umc_ast::ast::DeclKind::Var => BindingKind::Var,
            umc_ast::ast::DeclKind::Let => BindingKind::Let,
            umc_ast::ast::DeclKind::Const => BindingKind::Const,
        };
        for declarator in decl.decls.iter() {
            self.declare_pat(&declarator.pat, kind);
        }
    }

    fn enter_func(&mut self, name: Option<&Ident>, func: &Func) {
        self.open(func.id, ScopeKind::Function, func.span);
        if let Some(name) = name {
            // A function expression's own name binds inside the function scope.
            self.declare(name, BindingKind::Function);
        }
        for param in func.params.iter() {
            self.declare_pat(param, BindingKind::Param);
        }
        ast_visit::walk_func(self, func);
        self.close();
    }

    fn enter_class(&mut self, name: Option<&Ident>, class: &Class) {
        self.open(class.id, ScopeKind::Class, class.span);
        if let Some(name) = name {
            self.declare(name, BindingKind::Class);
        }
        ast_visit::walk_class(self, class);
        self.close();
    }

    /// True if a `for` head introduces lexical bindings and therefore its own scope.
    fn for_head_is_lexical(decl: &VarDecl) -> bool {
        matches!(
            decl.kind,
            umc_ast::ast::DeclKind::Let | umc_ast::ast::DeclKind::Const
        )
    }
}

impl<'a> AstVisitor<'a> for ScopeBuilder {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        self.stmt_spans.push(stmt.span);

        match &*stmt.kind {
            StmtKind::Var(decl) => {
                self.declare_var_decl(decl);
                ast_visit::walk_stmt(self, stmt);
            }
            StmtKind::Func(decl) => {
                self.declare(&decl.name, BindingKind::Function);
                self.enter_func(None, &decl.func);
            }
            StmtKind::Class(decl) => {
                self.declare(&decl.name, BindingKind::Class);
                self.enter_class(None, &decl.class);
            }
            StmtKind::Import(decl) => {
                for specifier in decl.specifiers.iter() {
                    match &specifier.kind {
                        ImportSpecifierKind::Named(_, local)
                        | ImportSpecifierKind::Default(local)
                        | ImportSpecifierKind::Namespace(local) => {
                            self.declare(local, BindingKind::Import);
                        }
                    }
                }
            }
            StmtKind::ExportDefault(export) => match &export.kind {
                ExportDefaultKind::Func(name, func) => {
                    if let Some(name) = name {
                        self.declare(name, BindingKind::Function);
                    }
                    self.enter_func(None, func);
                }
                ExportDefaultKind::Class(name, class) => {
                    if let Some(name) = name {
                        self.declare(name, BindingKind::Class);
                    }
                    self.enter_class(None, class);
                }
                ExportDefaultKind::Expr(_) => ast_visit::walk_stmt(self, stmt),
            },
            StmtKind::For(Some(umc_ast::ast::ForInit::Var(decl)), ..)
                if Self::for_head_is_lexical(decl) =>
            {
                self.open(stmt.id, ScopeKind::ForHeader, stmt.span);
                self.declare_var_decl(decl);
                ast_visit::walk_stmt(self, stmt);
                self.close();
            }
            StmtKind::ForIn(umc_ast::ast::ForHead::Var(decl), ..)
            | StmtKind::ForOf(_, umc_ast::ast::ForHead::Var(decl), ..)
                if Self::for_head_is_lexical(decl) =>
            {
                self.open(stmt.id, ScopeKind::ForHeader, stmt.span);
                self.declare_var_decl(decl);
                ast_visit::walk_stmt(self, stmt);
                self.close();
            }
            StmtKind::For(Some(umc_ast::ast::ForInit::Var(decl)), ..)
            | StmtKind::ForIn(umc_ast::ast::ForHead::Var(decl), ..)
            | StmtKind::ForOf(_, umc_ast::ast::ForHead::Var(decl), ..) => {
                self.declare_var_decl(decl);
                ast_visit::walk_stmt(self, stmt);
            }
            _ => ast_visit::walk_stmt(self, stmt),
        }

        self.stmt_spans.pop();
    }

    fn visit_block(&mut self, block: &'a Block) {
        self.open(block.id, ScopeKind::Block, block.span);
        ast_visit::walk_block(self, block);
        self.close();
    }

    fn visit_catch_clause(&mut self, catch: &'a CatchClause) {
        self.open(catch.id, ScopeKind::Catch, catch.span);
        if let Some(param) = &catch.param {
            self.declare_pat(param, BindingKind::Catch);
        }
        ast_visit::walk_catch_clause(self, catch);
        self.close();
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match &*expr.kind {
            ExprKind::Func(name, func) => self.enter_func(name.as_deref(), func),
            ExprKind::Class(name, class) => self.enter_class(name.as_deref(), class),
            _ => ast_visit::walk_expr(self, expr),
        }
    }

    fn visit_arrow(&mut self, arrow: &'a Arrow) {
        self.open(arrow.id, ScopeKind::Function, arrow.span);
        for param in arrow.params.iter() {
            self.declare_pat(param, BindingKind::Param);
        }
        ast_visit::walk_arrow(self, arrow);
        self.close();
    }

    fn visit_func(&mut self, func: &'a Func) {
        // Reached for methods, which have no binding name of their own.
        self.enter_func(None, func);
    }

    fn visit_pat(&mut self, pat: &'a Pat) {
        // Binding identifiers are declared by the enclosing construct; only the embedded
        // expressions (defaults and computed keys) are walked here, and they are expressions
        // of the enclosing scope.
        ast_visit::walk_pat(self, pat);
    }
}

struct Resolver<'a> {
    scopes: &'a mut ScopeTable,
    bindings: &'a mut BindingTable,
    names: &'a mut Names,
    scope_of_node: &'a FxHashMap<NodeId, ScopeId>,
    stack: Vec<ScopeId>,
    sinks: Vec<(ScopeId, Sink)>,
}

impl Resolver<'_> {
    fn current(&self) -> ScopeId {
        *self.stack.last().expect("scope stack should not be empty")
    }

    fn enter(&mut self, node: NodeId) {
        let id = self
            .scope_of_node
            .get(&node)
            .copied()
            .expect("scope should have been recorded for node");
        self.stack.push(id);
    }

    fn leave(&mut self) {
        self.stack.pop().expect("scope stack should not be empty");
    }

    /// Resolves a reference to the innermost declaring scope, or records a free name.
    fn resolve_ident(&mut self, ident: &Ident, access: Access) {
        for &scope in self.stack.iter().rev() {
            if let Some(binding) = self.scopes.get(scope).binding(&ident.name) {
                self.names.insert(ident.id, binding);
                self.bindings.get_mut(binding).references.push(Reference {
                    node: ident.id,
                    span: ident.span,
                    access,
                });
                return;
            }
        }

        // Free names stay visible on the whole enclosing chain so the solver can avoid
        // capturing them.
        for &scope in &self.stack {
            self.scopes
                .get_mut(scope)
                .free_names
                .insert(Rc::clone(&ident.name));
        }
    }

    /// True if the name does not resolve to any binding in the current chain.
    fn is_unbound(&self, name: &str) -> bool {
        !self
            .stack
            .iter()
            .rev()
            .any(|&scope| self.scopes.get(scope).binding(name).is_some())
    }

    /// Records a taint sink attributed to the innermost scope.
    fn sink(&mut self, sink: Sink) {
        self.sinks.push((self.current(), sink));
    }

    /// Detects renaming-unsafe constructs at a call or construction site. The callee must be
    /// a bare identifier that resolves to no binding; a local `eval` or `Function` is an
    /// ordinary variable.
    fn detect_sink(&mut self, callee: &Expr, args: Option<&[Box<Expr>]>, construct: bool) {
        let ExprKind::Ident(callee) = &*callee.kind else {
            return;
        };
        if !self.is_unbound(&callee.name) {
            return;
        }

        match callee.name.as_ref() {
            "eval" if !construct => self.sink(Sink::Eval),
            "Function" => self.sink(Sink::Function),
            "setTimeout" | "setInterval" if !construct => {
                let string_first = args
                    .and_then(<[Box<Expr>]>::first)
                    .is_some_and(|arg| matches!(&*arg.kind, ExprKind::Lit(Lit::Str(..))));
                if string_first {
                    self.sink(Sink::StringTimer);
                }
            }
            _ => {}
        }
    }

    /// Resolves the identifiers written by an assignment target, which may be a full
    /// destructuring shape built from expression syntax.
    fn resolve_target(&mut self, target: &'_ Expr) {
        match &*target.kind {
            ExprKind::Ident(ident) => self.resolve_ident(ident, Access::Write),
            ExprKind::Paren(inner) | ExprKind::Spread(inner) => self.resolve_target(inner),
            ExprKind::Array(elements) => {
                for element in elements.iter().flatten() {
                    self.resolve_target(element);
                }
            }
            ExprKind::Object(props) => {
                for prop in props.iter() {
                    match &prop.kind {
                        umc_ast::ast::PropKind::Shorthand(ident, default) => {
                            self.resolve_ident(ident, Access::Write);
                            if let Some(default) = default {
                                self.visit_expr(default);
                            }
                        }
                        umc_ast::ast::PropKind::KeyValue(key, value) => {
                            ast_visit::walk_prop_key(self, key);
                            self.resolve_target(value);
                        }
                        umc_ast::ast::PropKind::Method(_, key, func) => {
                            ast_visit::walk_prop_key(self, key);
                            self.visit_func(func);
                        }
                        umc_ast::ast::PropKind::Spread(inner) => self.resolve_target(inner),
                    }
                }
            }
            ExprKind::Assign(None, inner, default) => {
                self.resolve_target(inner);
                self.visit_expr(default);
            }
            _ => self.visit_expr(target),
        }
    }
}

impl<'a> AstVisitor<'a> for Resolver<'_> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &*stmt.kind {
            StmtKind::Func(decl) => {
                self.enter(decl.func.id);
                ast_visit::walk_func(self, &decl.func);
                self.leave();
            }
            StmtKind::Class(decl) => {
                self.enter(decl.class.id);
                ast_visit::walk_class(self, &decl.class);
                self.leave();
            }
            StmtKind::Import(_) => {}
            StmtKind::ExportNamed(export) => {
                if export.source.is_none() {
                    for specifier in export.specifiers.iter() {
                        self.resolve_ident(&specifier.local, Access::Read);
                    }
                }
            }
            StmtKind::ExportDefault(export) => match &export.kind {
                ExportDefaultKind::Func(_, func) => {
                    self.enter(func.id);
                    ast_visit::walk_func(self, func);
                    self.leave();
                }
                ExportDefaultKind::Class(_, class) => {
                    self.enter(class.id);
                    ast_visit::walk_class(self, class);
                    self.leave();
                }
                ExportDefaultKind::Expr(_) => ast_visit::walk_stmt(self, stmt),
            },
            StmtKind::With(object, body) => {
                self.visit_expr(object);
                self.sink(Sink::With);
                self.visit_stmt(body);
            }
            StmtKind::ForIn(umc_ast::ast::ForHead::Expr(target), object, body) => {
                self.resolve_target(target);
                self.visit_expr(object);
                self.visit_stmt(body);
            }
            StmtKind::ForOf(_, umc_ast::ast::ForHead::Expr(target), iterable, body) => {
                self.resolve_target(target);
                self.visit_expr(iterable);
                self.visit_stmt(body);
            }
            _ => {
                if self.scope_of_node.contains_key(&stmt.id) {
                    self.enter(stmt.id);
                    ast_visit::walk_stmt(self, stmt);
                    self.leave();
                } else {
                    ast_visit::walk_stmt(self, stmt);
                }
            }
        }
    }

    fn visit_block(&mut self, block: &'a Block) {
        self.enter(block.id);
        ast_visit::walk_block(self, block);
        self.leave();
    }

    fn visit_catch_clause(&mut self, catch: &'a CatchClause) {
        self.enter(catch.id);
        ast_visit::walk_catch_clause(self, catch);
        self.leave();
    }

    fn visit_func(&mut self, func: &'a Func) {
        self.enter(func.id);
        ast_visit::walk_func(self, func);
        self.leave();
    }

    fn visit_arrow(&mut self, arrow: &'a Arrow) {
        self.enter(arrow.id);
        ast_visit::walk_arrow(self, arrow);
        self.leave();
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match &*expr.kind {
            ExprKind::Ident(ident) => self.resolve_ident(ident, Access::Read),
            ExprKind::Func(_, func) => self.visit_func(func),
            ExprKind::Class(_, class) => {
                self.enter(class.id);
                ast_visit::walk_class(self, class);
                self.leave();
            }
            ExprKind::Assign(_, target, value) => {
                self.resolve_target(target);
                self.visit_expr(value);
            }
            ExprKind::Update(_, _, operand) => {
                if let ExprKind::Ident(ident) = &*operand.kind {
                    self.resolve_ident(ident, Access::Write);
                } else {
                    self.visit_expr(operand);
                }
            }
            ExprKind::Call(callee, args, _) => {
                self.detect_sink(callee, Some(args), false);
                ast_visit::walk_expr(self, expr);
            }
            ExprKind::New(callee, args) => {
                self.detect_sink(callee, args.as_deref(), true);
                ast_visit::walk_expr(self, expr);
            }
            _ => ast_visit::walk_expr(self, expr),
        }
    }

    fn visit_pat(&mut self, pat: &'a Pat) {
        // Binding identifiers were mapped during scope building; only embedded expressions
        // resolve here.
        match &*pat.kind {
            PatKind::Ident(_) => {}
            _ => ast_visit::walk_pat(self, pat),
        }
    }

    fn visit_object_pat_prop(&mut self, prop: &'a ObjectPatProp) {
        match &prop.kind {
            ObjectPatPropKind::Shorthand(_, default) => {
                if let Some(default) = default {
                    self.visit_expr(default);
                }
            }
            _ => ast_visit::walk_object_pat_prop(self, prop),
        }
    }
}
