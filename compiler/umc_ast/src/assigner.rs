// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::{
    ast::{
        Arrow, Block, CatchClause, Class, ClassMember, Expr, ExportSpecifier, Func, Ident,
        ImportSpecifier, Module, Name, NodeId, ObjectPatProp, Pat, Prop, Stmt, StmtKind,
        SwitchCase, Template, VarDecl, VarDeclarator,
    },
    mut_visit::{self, MutVisitor},
};

/// Replaces default node IDs with fresh unique IDs. Owned by one analysis; there is no
/// process-wide counter to reset between runs.
#[derive(Debug)]
pub struct Assigner {
    next_id: NodeId,
}

impl Assigner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: NodeId::FIRST,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id = self.next_id.successor();
        id
    }

    fn assign(&mut self, id: &mut NodeId) {
        if id.is_default() {
            *id = self.next_id();
        }
    }
}

impl Default for Assigner {
    fn default() -> Self {
        Self::new()
    }
}

impl MutVisitor for Assigner {
    fn visit_module(&mut self, module: &mut Module) {
        self.assign(&mut module.id);
        mut_visit::walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        self.assign(&mut stmt.id);

        // Declaration wrappers have no visitor hook of their own, so their IDs are assigned
        // here before the walk descends into them.
        match &mut *stmt.kind {
            StmtKind::Func(decl) => self.assign(&mut decl.id),
            StmtKind::Class(decl) => self.assign(&mut decl.id),
            StmtKind::Import(decl) => self.assign(&mut decl.id),
            StmtKind::ExportDecl(decl) => self.assign(&mut decl.id),
            StmtKind::ExportNamed(export) => self.assign(&mut export.id),
            StmtKind::ExportDefault(export) => self.assign(&mut export.id),
            StmtKind::ExportAll(export) => self.assign(&mut export.id),
            _ => {}
        }

        mut_visit::walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &mut Block) {
        self.assign(&mut block.id);
        mut_visit::walk_block(self, block);
    }

    fn visit_var_decl(&mut self, decl: &mut VarDecl) {
        self.assign(&mut decl.id);
        mut_visit::walk_var_decl(self, decl);
    }

    fn visit_var_declarator(&mut self, decl: &mut VarDeclarator) {
        self.assign(&mut decl.id);
        mut_visit::walk_var_declarator(self, decl);
    }

    fn visit_func(&mut self, func: &mut Func) {
        self.assign(&mut func.id);
        mut_visit::walk_func(self, func);
    }

    fn visit_arrow(&mut self, arrow: &mut Arrow) {
        self.assign(&mut arrow.id);
        mut_visit::walk_arrow(self, arrow);
    }

    fn visit_class(&mut self, class: &mut Class) {
        self.assign(&mut class.id);
        mut_visit::walk_class(self, class);
    }

    fn visit_class_member(&mut self, member: &mut ClassMember) {
        self.assign(&mut member.id);
        mut_visit::walk_class_member(self, member);
    }

    fn visit_switch_case(&mut self, case: &mut SwitchCase) {
        self.assign(&mut case.id);
        mut_visit::walk_switch_case(self, case);
    }

    fn visit_catch_clause(&mut self, catch: &mut CatchClause) {
        self.assign(&mut catch.id);
        mut_visit::walk_catch_clause(self, catch);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        self.assign(&mut expr.id);
        mut_visit::walk_expr(self, expr);
    }

    fn visit_template(&mut self, template: &mut Template) {
        self.assign(&mut template.id);
        mut_visit::walk_template(self, template);
    }

    fn visit_prop(&mut self, prop: &mut Prop) {
        self.assign(&mut prop.id);
        mut_visit::walk_prop(self, prop);
    }

    fn visit_pat(&mut self, pat: &mut Pat) {
        self.assign(&mut pat.id);
        mut_visit::walk_pat(self, pat);
    }

    fn visit_object_pat_prop(&mut self, prop: &mut ObjectPatProp) {
        self.assign(&mut prop.id);
        mut_visit::walk_object_pat_prop(self, prop);
    }

    fn visit_import_specifier(&mut self, specifier: &mut ImportSpecifier) {
        self.assign(&mut specifier.id);
        mut_visit::walk_import_specifier(self, specifier);
    }

    fn visit_export_specifier(&mut self, specifier: &mut ExportSpecifier) {
        self.assign(&mut specifier.id);
        mut_visit::walk_export_specifier(self, specifier);
    }

    fn visit_ident(&mut self, ident: &mut Ident) {
        self.assign(&mut ident.id);
        mut_visit::walk_ident(self, ident);
    }

    fn visit_name(&mut self, name: &mut Name) {
        self.assign(&mut name.id);
        mut_visit::walk_name(self, name);
    }
}
