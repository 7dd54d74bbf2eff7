// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::ast::{
    Arrow, ArrowBody, Block, CatchClause, Class, ClassMember, ClassMemberKind, Expr,
    ExportDefaultKind, ExportSpecifier, ExprKind, ForHead, ForInit, Func, Ident, ImportSpecifier,
    ImportSpecifierKind, MemberProp, Module, Name, ObjectPatProp, ObjectPatPropKind, Pat, PatKind,
    Prop, PropKey, PropKind, Stmt, StmtKind, SwitchCase, Template, VarDecl, VarDeclarator,
};
use umc_data_structures::span::Span;

pub trait MutVisitor: Sized {
    fn visit_module(&mut self, module: &mut Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &mut Block) {
        walk_block(self, block);
    }

    fn visit_var_decl(&mut self, decl: &mut VarDecl) {
        walk_var_decl(self, decl);
    }

    fn visit_var_declarator(&mut self, decl: &mut VarDeclarator) {
        walk_var_declarator(self, decl);
    }

    fn visit_func(&mut self, func: &mut Func) {
        walk_func(self, func);
    }

    fn visit_arrow(&mut self, arrow: &mut Arrow) {
        walk_arrow(self, arrow);
    }

    fn visit_class(&mut self, class: &mut Class) {
        walk_class(self, class);
    }

    fn visit_class_member(&mut self, member: &mut ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_switch_case(&mut self, case: &mut SwitchCase) {
        walk_switch_case(self, case);
    }

    fn visit_catch_clause(&mut self, catch: &mut CatchClause) {
        walk_catch_clause(self, catch);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
    }

    fn visit_template(&mut self, template: &mut Template) {
        walk_template(self, template);
    }

    fn visit_prop(&mut self, prop: &mut Prop) {
        walk_prop(self, prop);
    }

    fn visit_prop_key(&mut self, key: &mut PropKey) {
        walk_prop_key(self, key);
    }

    fn visit_pat(&mut self, pat: &mut Pat) {
        walk_pat(self, pat);
    }

    fn visit_object_pat_prop(&mut self, prop: &mut ObjectPatProp) {
        walk_object_pat_prop(self, prop);
    }

    fn visit_import_specifier(&mut self, specifier: &mut ImportSpecifier) {
        walk_import_specifier(self, specifier);
    }

    fn visit_export_specifier(&mut self, specifier: &mut ExportSpecifier) {
        walk_export_specifier(self, specifier);
    }

    fn visit_ident(&mut self, ident: &mut Ident) {
        walk_ident(self, ident);
    }

    fn visit_name(&mut self, name: &mut Name) {
        walk_name(self, name);
    }

    fn visit_span(&mut self, _: &mut Span) {}
}

pub fn walk_module(vis: &mut impl MutVisitor, module: &mut Module) {
    vis.visit_span(&mut module.span);
    module.stmts.iter_mut().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_stmt(vis: &mut impl MutVisitor, stmt: &mut Stmt) {
    vis.visit_span(&mut stmt.span);

    match &mut *stmt.kind {
        StmtKind::Block(block) => vis.visit_block(block),
        StmtKind::Var(decl) => vis.visit_var_decl(decl),
        StmtKind::Func(decl) => {
            vis.visit_ident(&mut decl.name);
            vis.visit_func(&mut decl.func);
        }
        StmtKind::Class(decl) => {
            vis.visit_ident(&mut decl.name);
            vis.visit_class(&mut decl.class);
        }
        StmtKind::Expr(expr) | StmtKind::Throw(expr) => vis.visit_expr(expr),
        StmtKind::If(cond, body, otherwise) => {
            vis.visit_expr(cond);
            vis.visit_stmt(body);
            otherwise.iter_mut().for_each(|s| vis.visit_stmt(s));
        }
        StmtKind::For(init, test, update, body) => {
            match init {
                Some(ForInit::Var(decl)) => vis.visit_var_decl(decl),
                Some(ForInit::Expr(expr)) => vis.visit_expr(expr),
                None => {}
            }
            test.iter_mut().for_each(|e| vis.visit_expr(e));
            update.iter_mut().for_each(|e| vis.visit_expr(e));
            vis.visit_stmt(body);
        }
        StmtKind::ForIn(head, object, body) => {
            walk_for_head(vis, head);
            vis.visit_expr(object);
            vis.visit_stmt(body);
        }
        StmtKind::ForOf(_, head, iterable, body) => {
            walk_for_head(vis, head);
            vis.visit_expr(iterable);
            vis.visit_stmt(body);
        }
        StmtKind::While(cond, body) => {
            vis.visit_expr(cond);
            vis.visit_stmt(body);
        }
        StmtKind::DoWhile(body, cond) => {
            vis.visit_stmt(body);
            vis.visit_expr(cond);
        }
        StmtKind::Switch(scrutinee, cases) => {
            vis.visit_expr(scrutinee);
            cases.iter_mut().for_each(|c| vis.visit_switch_case(c));
        }
        StmtKind::Try(block, catch, finally) => {
            vis.visit_block(block);
            catch.iter_mut().for_each(|c| vis.visit_catch_clause(c));
            finally.iter_mut().for_each(|b| vis.visit_block(b));
        }
        StmtKind::Return(expr) => expr.iter_mut().for_each(|e| vis.visit_expr(e)),
        StmtKind::Break(label) | StmtKind::Continue(label) => {
            label.iter_mut().for_each(|l| vis.visit_name(l));
        }
        StmtKind::Labeled(label, body) => {
            vis.visit_name(label);
            vis.visit_stmt(body);
        }
        StmtKind::With(object, body) => {
            vis.visit_expr(object);
            vis.visit_stmt(body);
        }
        StmtKind::Debugger | StmtKind::Empty => {}
        StmtKind::Import(decl) => {
            decl.specifiers
                .iter_mut()
                .for_each(|s| vis.visit_import_specifier(s));
            vis.visit_name(&mut decl.source);
        }
        StmtKind::ExportDecl(decl) => vis.visit_stmt(&mut decl.decl),
        StmtKind::ExportNamed(export) => {
            export
                .specifiers
                .iter_mut()
                .for_each(|s| vis.visit_export_specifier(s));
            export.source.iter_mut().for_each(|n| vis.visit_name(n));
        }
        StmtKind::ExportDefault(export) => match &mut export.kind {
            ExportDefaultKind::Func(name, func) => {
                name.iter_mut().for_each(|n| vis.visit_ident(n));
                vis.visit_func(func);
            }
            ExportDefaultKind::Class(name, class) => {
                name.iter_mut().for_each(|n| vis.visit_ident(n));
                vis.visit_class(class);
            }
            ExportDefaultKind::Expr(expr) => vis.visit_expr(expr),
        },
        StmtKind::ExportAll(export) => {
            export.alias.iter_mut().for_each(|n| vis.visit_name(n));
            vis.visit_name(&mut export.source);
        }
    }
}

fn walk_for_head(vis: &mut impl MutVisitor, head: &mut ForHead) {
    match head {
        ForHead::Var(decl) => vis.visit_var_decl(decl),
        ForHead::Expr(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_block(vis: &mut impl MutVisitor, block: &mut Block) {
    vis.visit_span(&mut block.span);
    block.stmts.iter_mut().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_var_decl(vis: &mut impl MutVisitor, decl: &mut VarDecl) {
    vis.visit_span(&mut decl.span);
    decl.decls
        .iter_mut()
        .for_each(|d| vis.visit_var_declarator(d));
}

pub fn walk_var_declarator(vis: &mut impl MutVisitor, decl: &mut VarDeclarator) {
    vis.visit_span(&mut decl.span);
    vis.visit_pat(&mut decl.pat);
    decl.init.iter_mut().for_each(|e| vis.visit_expr(e));
}

pub fn walk_func(vis: &mut impl MutVisitor, func: &mut Func) {
    vis.visit_span(&mut func.span);
    func.params.iter_mut().for_each(|p| vis.visit_pat(p));
    vis.visit_block(&mut func.body);
}

pub fn walk_arrow(vis: &mut impl MutVisitor, arrow: &mut Arrow) {
    vis.visit_span(&mut arrow.span);
    arrow.params.iter_mut().for_each(|p| vis.visit_pat(p));
    match &mut arrow.body {
        ArrowBody::Block(block) => vis.visit_block(block),
        ArrowBody::Expr(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_class(vis: &mut impl MutVisitor, class: &mut Class) {
    vis.visit_span(&mut class.span);
    class.parent.iter_mut().for_each(|e| vis.visit_expr(e));
    class
        .members
        .iter_mut()
        .for_each(|m| vis.visit_class_member(m));
}

pub fn walk_class_member(vis: &mut impl MutVisitor, member: &mut ClassMember) {
    vis.visit_span(&mut member.span);
    match &mut member.kind {
        ClassMemberKind::Method(_, key, func) => {
            vis.visit_prop_key(key);
            vis.visit_func(func);
        }
        ClassMemberKind::Field(key, init) => {
            vis.visit_prop_key(key);
            init.iter_mut().for_each(|e| vis.visit_expr(e));
        }
    }
}

pub fn walk_switch_case(vis: &mut impl MutVisitor, case: &mut SwitchCase) {
    vis.visit_span(&mut case.span);
    case.test.iter_mut().for_each(|e| vis.visit_expr(e));
    case.body.iter_mut().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_catch_clause(vis: &mut impl MutVisitor, catch: &mut CatchClause) {
    vis.visit_span(&mut catch.span);
    catch.param.iter_mut().for_each(|p| vis.visit_pat(p));
    vis.visit_block(&mut catch.body);
}

pub fn walk_expr(vis: &mut impl MutVisitor, expr: &mut Expr) {
    vis.visit_span(&mut expr.span);

    match &mut *expr.kind {
        ExprKind::Ident(ident) => vis.visit_ident(ident),
        ExprKind::Lit(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::NewTarget
        | ExprKind::ImportMeta
        | ExprKind::Err => {}
        ExprKind::Template(template) => vis.visit_template(template),
        ExprKind::TaggedTemplate(tag, template) => {
            vis.visit_expr(tag);
            vis.visit_template(template);
        }
        ExprKind::Array(elements) => elements
            .iter_mut()
            .flatten()
            .for_each(|e| vis.visit_expr(e)),
        ExprKind::Object(props) => props.iter_mut().for_each(|p| vis.visit_prop(p)),
        ExprKind::Func(name, func) => {
            name.iter_mut().for_each(|n| vis.visit_ident(n));
            vis.visit_func(func);
        }
        ExprKind::Arrow(arrow) => vis.visit_arrow(arrow),
        ExprKind::Class(name, class) => {
            name.iter_mut().for_each(|n| vis.visit_ident(n));
            vis.visit_class(class);
        }
        ExprKind::Unary(_, operand)
        | ExprKind::Update(_, _, operand)
        | ExprKind::Await(operand)
        | ExprKind::Spread(operand)
        | ExprKind::Paren(operand)
        | ExprKind::ImportCall(operand) => vis.visit_expr(operand),
        ExprKind::Bin(_, lhs, rhs) | ExprKind::Assign(_, lhs, rhs) => {
            vis.visit_expr(lhs);
            vis.visit_expr(rhs);
        }
        ExprKind::Cond(cond, then, otherwise) => {
            vis.visit_expr(cond);
            vis.visit_expr(then);
            vis.visit_expr(otherwise);
        }
        ExprKind::Call(callee, args, _) => {
            vis.visit_expr(callee);
            args.iter_mut().for_each(|a| vis.visit_expr(a));
        }
        ExprKind::New(callee, args) => {
            vis.visit_expr(callee);
            args.iter_mut().flatten().for_each(|a| vis.visit_expr(a));
        }
        ExprKind::Member(object, prop, _) => {
            vis.visit_expr(object);
            match prop {
                MemberProp::Name(name) | MemberProp::Private(name) => vis.visit_name(name),
                MemberProp::Computed(index) => vis.visit_expr(index),
            }
        }
        ExprKind::Seq(exprs) => exprs.iter_mut().for_each(|e| vis.visit_expr(e)),
        ExprKind::Yield(operand, _) => operand.iter_mut().for_each(|e| vis.visit_expr(e)),
    }
}

pub fn walk_template(vis: &mut impl MutVisitor, template: &mut Template) {
    vis.visit_span(&mut template.span);
    template.quasis.iter_mut().for_each(|q| vis.visit_name(q));
    template.exprs.iter_mut().for_each(|e| vis.visit_expr(e));
}

pub fn walk_prop(vis: &mut impl MutVisitor, prop: &mut Prop) {
    vis.visit_span(&mut prop.span);
    match &mut prop.kind {
        PropKind::Shorthand(ident, default) => {
            vis.visit_ident(ident);
            default.iter_mut().for_each(|e| vis.visit_expr(e));
        }
        PropKind::KeyValue(key, value) => {
            vis.visit_prop_key(key);
            vis.visit_expr(value);
        }
        PropKind::Method(_, key, func) => {
            vis.visit_prop_key(key);
            vis.visit_func(func);
        }
        PropKind::Spread(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_prop_key(vis: &mut impl MutVisitor, key: &mut PropKey) {
    match key {
        PropKey::Name(name) | PropKey::Str(name) | PropKey::Num(name) | PropKey::Private(name) => {
            vis.visit_name(name);
        }
        PropKey::Computed(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_pat(vis: &mut impl MutVisitor, pat: &mut Pat) {
    vis.visit_span(&mut pat.span);

    match &mut *pat.kind {
        PatKind::Ident(ident) => vis.visit_ident(ident),
        PatKind::Array(elements) => elements
            .iter_mut()
            .flatten()
            .for_each(|p| vis.visit_pat(p)),
        PatKind::Object(props) => props
            .iter_mut()
            .for_each(|p| vis.visit_object_pat_prop(p)),
        PatKind::Assign(pat, default) => {
            vis.visit_pat(pat);
            vis.visit_expr(default);
        }
        PatKind::Rest(pat) => vis.visit_pat(pat),
        PatKind::Err => {}
    }
}

pub fn walk_object_pat_prop(vis: &mut impl MutVisitor, prop: &mut ObjectPatProp) {
    vis.visit_span(&mut prop.span);
    match &mut prop.kind {
        ObjectPatPropKind::Shorthand(ident, default) => {
            vis.visit_ident(ident);
            default.iter_mut().for_each(|e| vis.visit_expr(e));
        }
        ObjectPatPropKind::KeyValue(key, pat) => {
            vis.visit_prop_key(key);
            vis.visit_pat(pat);
        }
        ObjectPatPropKind::Rest(pat) => vis.visit_pat(pat),
    }
}

pub fn walk_import_specifier(vis: &mut impl MutVisitor, specifier: &mut ImportSpecifier) {
    vis.visit_span(&mut specifier.span);
    match &mut specifier.kind {
        ImportSpecifierKind::Named(imported, local) => {
            imported.iter_mut().for_each(|n| vis.visit_name(n));
            vis.visit_ident(local);
        }
        ImportSpecifierKind::Default(local) | ImportSpecifierKind::Namespace(local) => {
            vis.visit_ident(local);
        }
    }
}

pub fn walk_export_specifier(vis: &mut impl MutVisitor, specifier: &mut ExportSpecifier) {
    vis.visit_span(&mut specifier.span);
    vis.visit_ident(&mut specifier.local);
    specifier
        .exported
        .iter_mut()
        .for_each(|n| vis.visit_name(n));
}

pub fn walk_ident(vis: &mut impl MutVisitor, ident: &mut Ident) {
    vis.visit_span(&mut ident.span);
}

pub fn walk_name(vis: &mut impl MutVisitor, name: &mut Name) {
    vis.visit_span(&mut name.span);
}
