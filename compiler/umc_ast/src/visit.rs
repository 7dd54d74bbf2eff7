// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use crate::ast::{
    Arrow, ArrowBody, Block, CatchClause, Class, ClassMember, ClassMemberKind, Expr,
    ExportDefaultKind, ExportSpecifier, ExprKind, ForHead, ForInit, Func, Ident, ImportSpecifier,
    ImportSpecifierKind, MemberProp, Module, Name, ObjectPatProp, ObjectPatPropKind, Pat, PatKind,
    Prop, PropKey, PropKind, Stmt, StmtKind, SwitchCase, Template, VarDecl, VarDeclarator,
};

pub trait Visitor<'a>: Sized {
    fn visit_module(&mut self, module: &'a Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'a Block) {
        walk_block(self, block);
    }

    fn visit_var_decl(&mut self, decl: &'a VarDecl) {
        walk_var_decl(self, decl);
    }

    fn visit_var_declarator(&mut self, decl: &'a VarDeclarator) {
        walk_var_declarator(self, decl);
    }

    fn visit_func(&mut self, func: &'a Func) {
        walk_func(self, func);
    }

    fn visit_arrow(&mut self, arrow: &'a Arrow) {
        walk_arrow(self, arrow);
    }

    fn visit_class(&mut self, class: &'a Class) {
        walk_class(self, class);
    }

    fn visit_class_member(&mut self, member: &'a ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_switch_case(&mut self, case: &'a SwitchCase) {
        walk_switch_case(self, case);
    }

    fn visit_catch_clause(&mut self, catch: &'a CatchClause) {
        walk_catch_clause(self, catch);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_template(&mut self, template: &'a Template) {
        walk_template(self, template);
    }

    fn visit_prop(&mut self, prop: &'a Prop) {
        walk_prop(self, prop);
    }

    fn visit_prop_key(&mut self, key: &'a PropKey) {
        walk_prop_key(self, key);
    }

    fn visit_pat(&mut self, pat: &'a Pat) {
        walk_pat(self, pat);
    }

    fn visit_object_pat_prop(&mut self, prop: &'a ObjectPatProp) {
        walk_object_pat_prop(self, prop);
    }

    fn visit_import_specifier(&mut self, specifier: &'a ImportSpecifier) {
        walk_import_specifier(self, specifier);
    }

    fn visit_export_specifier(&mut self, specifier: &'a ExportSpecifier) {
        walk_export_specifier(self, specifier);
    }

    fn visit_ident(&mut self, _: &'a Ident) {}

    fn visit_name(&mut self, _: &'a Name) {}
}

pub fn walk_module<'a>(vis: &mut impl Visitor<'a>, module: &'a Module) {
    module.stmts.iter().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_stmt<'a>(vis: &mut impl Visitor<'a>, stmt: &'a Stmt) {
    match &*stmt.kind {
        StmtKind::Block(block) => vis.visit_block(block),
        StmtKind::Var(decl) => vis.visit_var_decl(decl),
        StmtKind::Func(decl) => {
            vis.visit_ident(&decl.name);
            vis.visit_func(&decl.func);
        }
        StmtKind::Class(decl) => {
            vis.visit_ident(&decl.name);
            vis.visit_class(&decl.class);
        }
        StmtKind::Expr(expr) | StmtKind::Throw(expr) => vis.visit_expr(expr),
        StmtKind::If(cond, body, otherwise) => {
            vis.visit_expr(cond);
            vis.visit_stmt(body);
            otherwise.iter().for_each(|s| vis.visit_stmt(s));
        }
        StmtKind::For(init, test, update, body) => {
            match init {
                Some(ForInit::Var(decl)) => vis.visit_var_decl(decl),
                Some(ForInit::Expr(expr)) => vis.visit_expr(expr),
                None => {}
            }
            test.iter().for_each(|e| vis.visit_expr(e));
            update.iter().for_each(|e| vis.visit_expr(e));
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
            cases.iter().for_each(|c| vis.visit_switch_case(c));
        }
        StmtKind::Try(block, catch, finally) => {
            vis.visit_block(block);
            catch.iter().for_each(|c| vis.visit_catch_clause(c));
            finally.iter().for_each(|b| vis.visit_block(b));
        }
        StmtKind::Return(expr) => expr.iter().for_each(|e| vis.visit_expr(e)),
        StmtKind::Break(label) | StmtKind::Continue(label) => {
            label.iter().for_each(|l| vis.visit_name(l));
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
                .iter()
                .for_each(|s| vis.visit_import_specifier(s));
            vis.visit_name(&decl.source);
        }
        StmtKind::ExportDecl(decl) => vis.visit_stmt(&decl.decl),
        StmtKind::ExportNamed(export) => {
            export
                .specifiers
                .iter()
                .for_each(|s| vis.visit_export_specifier(s));
            export.source.iter().for_each(|n| vis.visit_name(n));
        }
        StmtKind::ExportDefault(export) => match &export.kind {
            ExportDefaultKind::Func(name, func) => {
                name.iter().for_each(|n| vis.visit_ident(n));
                vis.visit_func(func);
            }
            ExportDefaultKind::Class(name, class) => {
                name.iter().for_each(|n| vis.visit_ident(n));
                vis.visit_class(class);
            }
            ExportDefaultKind::Expr(expr) => vis.visit_expr(expr),
        },
        StmtKind::ExportAll(export) => {
            export.alias.iter().for_each(|n| vis.visit_name(n));
            vis.visit_name(&export.source);
        }
    }
}

fn walk_for_head<'a>(vis: &mut impl Visitor<'a>, head: &'a ForHead) {
    match head {
        ForHead::Var(decl) => vis.visit_var_decl(decl),
        ForHead::Expr(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_block<'a>(vis: &mut impl Visitor<'a>, block: &'a Block) {
    block.stmts.iter().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_var_decl<'a>(vis: &mut impl Visitor<'a>, decl: &'a VarDecl) {
    decl.decls.iter().for_each(|d| vis.visit_var_declarator(d));
}

pub fn walk_var_declarator<'a>(vis: &mut impl Visitor<'a>, decl: &'a VarDeclarator) {
    vis.visit_pat(&decl.pat);
    decl.init.iter().for_each(|e| vis.visit_expr(e));
}

pub fn walk_func<'a>(vis: &mut impl Visitor<'a>, func: &'a Func) {
    func.params.iter().for_each(|p| vis.visit_pat(p));
    vis.visit_block(&func.body);
}

pub fn walk_arrow<'a>(vis: &mut impl Visitor<'a>, arrow: &'a Arrow) {
    arrow.params.iter().for_each(|p| vis.visit_pat(p));
    match &arrow.body {
        ArrowBody::Block(block) => vis.visit_block(block),
        ArrowBody::Expr(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_class<'a>(vis: &mut impl Visitor<'a>, class: &'a Class) {
    class.parent.iter().for_each(|e| vis.visit_expr(e));
    class.members.iter().for_each(|m| vis.visit_class_member(m));
}

pub fn walk_class_member<'a>(vis: &mut impl Visitor<'a>, member: &'a ClassMember) {
    match &member.kind {
        ClassMemberKind::Method(_, key, func) => {
            vis.visit_prop_key(key);
            vis.visit_func(func);
        }
        ClassMemberKind::Field(key, init) => {
            vis.visit_prop_key(key);
            init.iter().for_each(|e| vis.visit_expr(e));
        }
    }
}

pub fn walk_switch_case<'a>(vis: &mut impl Visitor<'a>, case: &'a SwitchCase) {
    case.test.iter().for_each(|e| vis.visit_expr(e));
    case.body.iter().for_each(|s| vis.visit_stmt(s));
}

pub fn walk_catch_clause<'a>(vis: &mut impl Visitor<'a>, catch: &'a CatchClause) {
    catch.param.iter().for_each(|p| vis.visit_pat(p));
    vis.visit_block(&catch.body);
}

pub fn walk_expr<'a>(vis: &mut impl Visitor<'a>, expr: &'a Expr) {
    match &*expr.kind {
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
            .iter()
            .flatten()
            .for_each(|e| vis.visit_expr(e)),
        ExprKind::Object(props) => props.iter().for_each(|p| vis.visit_prop(p)),
        ExprKind::Func(name, func) => {
            name.iter().for_each(|n| vis.visit_ident(n));
            vis.visit_func(func);
        }
        ExprKind::Arrow(arrow) => vis.visit_arrow(arrow),
        ExprKind::Class(name, class) => {
            name.iter().for_each(|n| vis.visit_ident(n));
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
            args.iter().for_each(|a| vis.visit_expr(a));
        }
        ExprKind::New(callee, args) => {
            vis.visit_expr(callee);
            args.iter().flatten().for_each(|a| vis.visit_expr(a));
        }
        ExprKind::Member(object, prop, _) => {
            vis.visit_expr(object);
            match prop {
                MemberProp::Name(name) | MemberProp::Private(name) => vis.visit_name(name),
                MemberProp::Computed(index) => vis.visit_expr(index),
            }
        }
        ExprKind::Seq(exprs) => exprs.iter().for_each(|e| vis.visit_expr(e)),
        ExprKind::Yield(operand, _) => operand.iter().for_each(|e| vis.visit_expr(e)),
    }
}

pub fn walk_template<'a>(vis: &mut impl Visitor<'a>, template: &'a Template) {
    template.quasis.iter().for_each(|q| vis.visit_name(q));
    template.exprs.iter().for_each(|e| vis.visit_expr(e));
}

pub fn walk_prop<'a>(vis: &mut impl Visitor<'a>, prop: &'a Prop) {
    match &prop.kind {
        PropKind::Shorthand(ident, default) => {
            vis.visit_ident(ident);
            default.iter().for_each(|e| vis.visit_expr(e));
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

pub fn walk_prop_key<'a>(vis: &mut impl Visitor<'a>, key: &'a PropKey) {
    match key {
        PropKey::Name(name) | PropKey::Str(name) | PropKey::Num(name) | PropKey::Private(name) => {
            vis.visit_name(name);
        }
        PropKey::Computed(expr) => vis.visit_expr(expr),
    }
}

pub fn walk_pat<'a>(vis: &mut impl Visitor<'a>, pat: &'a Pat) {
    match &*pat.kind {
        PatKind::Ident(ident) => vis.visit_ident(ident),
        PatKind::Array(elements) => elements
            .iter()
            .flatten()
            .for_each(|p| vis.visit_pat(p)),
        PatKind::Object(props) => props.iter().for_each(|p| vis.visit_object_pat_prop(p)),
        PatKind::Assign(pat, default) => {
            vis.visit_pat(pat);
            vis.visit_expr(default);
        }
        PatKind::Rest(pat) => vis.visit_pat(pat),
        PatKind::Err => {}
    }
}

pub fn walk_object_pat_prop<'a>(vis: &mut impl Visitor<'a>, prop: &'a ObjectPatProp) {
    match &prop.kind {
        ObjectPatPropKind::Shorthand(ident, default) => {
            vis.visit_ident(ident);
            default.iter().for_each(|e| vis.visit_expr(e));
        }
        ObjectPatPropKind::KeyValue(key, pat) => {
            vis.visit_prop_key(key);
            vis.visit_pat(pat);
        }
        ObjectPatPropKind::Rest(pat) => vis.visit_pat(pat),
    }
}

pub fn walk_import_specifier<'a>(vis: &mut impl Visitor<'a>, specifier: &'a ImportSpecifier) {
    match &specifier.kind {
        ImportSpecifierKind::Named(imported, local) => {
            imported.iter().for_each(|n| vis.visit_name(n));
            vis.visit_ident(local);
        }
        ImportSpecifierKind::Default(local) | ImportSpecifierKind::Namespace(local) => {
            vis.visit_ident(local);
        }
    }
}

pub fn walk_export_specifier<'a>(vis: &mut impl Visitor<'a>, specifier: &'a ExportSpecifier) {
    vis.visit_ident(&specifier.local);
    specifier.exported.iter().for_each(|n| vis.visit_name(n));
}
