// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use umc_ast::ast::{
    Arrow, ArrowBody, BinOp, Block, Class, ClassMemberKind, Expr, ExportDefaultKind, ExprKind,
    ForHead, ForInit, Func, ImportSpecifierKind, Lit, MemberProp, MethodKind, Module,
    ObjectPatPropKind, Pat, PatKind, Prop, PropKey, PropKind, Stmt, StmtKind, UnOp, VarDecl,
};

// Minimum precedence a child expression must have to appear unparenthesized in its context.
// The levels match the parser's operator table.
const SEQ: u8 = 1;
const ASSIGN: u8 = 2;
const UNARY: u8 = 15;
const POSTFIX: u8 = 16;
const CALL: u8 = 17;
const PRIMARY: u8 = 19;

/// Emits a module as JavaScript source.
#[must_use]
pub fn emit(module: &Module) -> String {
    let mut emitter = Emitter {
        out: String::new(),
        indent: 0,
    };
    for stmt in module.stmts.iter() {
        emitter.stmt_line(stmt);
    }
    emitter.out
}

struct Emitter {
    out: String,
    indent: usize,
}

impl Emitter {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    /// Emits a statement on its own line at the current indentation.
    fn stmt_line(&mut self, stmt: &Stmt) {
        self.write_indent();
        self.stmt(stmt);
        self.newline();
    }

    /// Emits a statement that hangs off a control-flow header: blocks stay on the same line,
    /// anything else moves to the next line, indented.
    fn hanging_stmt(&mut self, stmt: &Stmt) {
        if let StmtKind::Block(block) = &*stmt.kind {
            self.push(" ");
            self.block(block);
        } else {
            self.newline();
            self.indent += 1;
            self.write_indent();
            self.stmt(stmt);
            self.indent -= 1;
        }
    }

    #[allow(clippy::too_many_lines)]
    fn stmt(&mut self, stmt: &Stmt) {
        match &*stmt.kind {
            StmtKind::Block(block) => self.block(block),
            StmtKind::Var(decl) => {
                self.var_decl(decl);
                self.push(";");
            }
            StmtKind::Func(decl) => {
                self.func(Some(&decl.name.name), &decl.func);
            }
            StmtKind::Class(decl) => {
                self.push("class ");
                self.push(&decl.name.name);
                self.class_tail(&decl.class);
            }
            StmtKind::Expr(expr) => {
                if starts_ambiguously(expr) {
                    self.push("(");
                    self.expr(expr, SEQ);
                    self.push(")");
                } else {
                    self.expr(expr, SEQ);
                }
                self.push(";");
            }
            StmtKind::If(cond, body, otherwise) => {
                self.push("if (");
                self.expr(cond, SEQ);
                self.push(")");
                self.hanging_stmt(body);
                if let Some(otherwise) = otherwise {
                    if matches!(&*body.kind, StmtKind::Block(_)) {
                        self.push(" else");
                    } else {
                        self.newline();
                        self.write_indent();
                        self.push("else");
                    }
                    self.hanging_stmt(otherwise);
                }
            }
            StmtKind::For(init, test, update, body) => {
                self.push("for (");
                match init {
                    Some(ForInit::Var(decl)) => self.var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.expr(expr, SEQ),
                    None => {}
                }
                self.push("; ");
                if let Some(test) = test {
                    self.expr(test, SEQ);
                }
                self.push("; ");
                if let Some(update) = update {
                    self.expr(update, SEQ);
                }
                self.push(")");
                self.hanging_stmt(body);
            }
            StmtKind::ForIn(head, object, body) => {
                self.push("for (");
                self.for_head(head);
                self.push(" in ");
                self.expr(object, SEQ);
                self.push(")");
                self.hanging_stmt(body);
            }
            StmtKind::ForOf(is_await, head, iterable, body) => {
                if *is_await {
                    self.push("for await (");
                } else {
                    self.push("for (");
                }
                self.for_head(head);
                self.push(" of ");
                self.expr(iterable, ASSIGN);
                self.push(")");
                self.hanging_stmt(body);
            }
            StmtKind::While(cond, body) => {
                self.push("while (");
                self.expr(cond, SEQ);
                self.push(")");
                self.hanging_stmt(body);
            }
            StmtKind::DoWhile(body, cond) => {
                self.push("do");
                self.hanging_stmt(body);
                if matches!(&*body.kind, StmtKind::Block(_)) {
                    self.push(" while (");
                } else {
                    self.newline();
                    self.write_indent();
                    self.push("while (");
                }
                self.expr(cond, SEQ);
                self.push(");");
            }
            StmtKind::Switch(scrutinee, cases) => {
                self.push("switch (");
                self.expr(scrutinee, SEQ);
                self.push(") {");
                self.newline();
                self.indent += 1;
                for case in cases.iter() {
                    self.write_indent();
                    match &case.test {
                        Some(test) => {
                            self.push("case ");
                            self.expr(test, SEQ);
                            self.push(":");
                        }
                        None => self.push("default:"),
                    }
                    self.newline();
                    self.indent += 1;
                    for stmt in case.body.iter() {
                        self.stmt_line(stmt);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.write_indent();
                self.push("}");
            }
            StmtKind::Try(block, catch, finally) => {
                self.push("try ");
                self.block(block);
                if let Some(catch) = catch {
                    self.push(" catch ");
                    if let Some(param) = &catch.param {
                        self.push("(");
                        self.pat(param);
                        self.push(") ");
                    }
                    self.block(&catch.body);
                }
                if let Some(finally) = finally {
                    self.push(" finally ");
                    self.block(finally);
                }
            }
            StmtKind::Throw(argument) => {
                self.push("throw ");
                self.expr(argument, SEQ);
                self.push(";");
            }
            StmtKind::Return(argument) => {
                match argument {
                    Some(argument) => {
                        self.push("return ");
                        self.expr(argument, SEQ);
                    }
                    None => self.push("return"),
                }
                self.push(";");
            }
            StmtKind::Break(label) => {
                match label {
                    Some(label) => {
                        self.push("break ");
                        self.push(&label.name);
                    }
                    None => self.push("break"),
                }
                self.push(";");
            }
            StmtKind::Continue(label) => {
                match label {
                    Some(label) => {
                        self.push("continue ");
                        self.push(&label.name);
                    }
                    None => self.push("continue"),
                }
                self.push(";");
            }
            StmtKind::Labeled(label, body) => {
                self.push(&label.name);
                self.push(": ");
                self.stmt(body);
            }
            StmtKind::With(object, body) => {
                self.push("with (");
                self.expr(object, SEQ);
                self.push(")");
                self.hanging_stmt(body);
            }
            StmtKind::Debugger => self.push("debugger;"),
            StmtKind::Empty => self.push(";"),
            StmtKind::Import(decl) => {
                self.push("import ");
                if !decl.specifiers.is_empty() {
                    self.import_specifiers(&decl.specifiers);
                    self.push(" from ");
                }
                self.push(&decl.source.name);
                self.push(";");
            }
            StmtKind::ExportDecl(decl) => {
                self.push("export ");
                self.stmt(&decl.decl);
            }
            StmtKind::ExportNamed(export) => {
                self.push("export { ");
                let mut first = true;
                for specifier in export.specifiers.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    self.push(&specifier.local.name);
                    if let Some(exported) = &specifier.exported {
                        self.push(" as ");
                        self.push(&exported.name);
                    }
                }
                self.push(" }");
                if let Some(source) = &export.source {
                    self.push(" from ");
                    self.push(&source.name);
                }
                self.push(";");
            }
            StmtKind::ExportDefault(export) => {
                self.push("export default ");
                match &export.kind {
                    ExportDefaultKind::Func(name, func) => {
                        self.func(name.as_ref().map(|n| n.name.as_ref()), func);
                    }
                    ExportDefaultKind::Class(name, class) => {
                        self.push("class");
                        if let Some(name) = name {
                            self.push(" ");
                            self.push(&name.name);
                        }
                        self.class_tail(class);
                    }
                    ExportDefaultKind::Expr(value) => {
                        self.expr(value, ASSIGN);
                        self.push(";");
                    }
                }
            }
            StmtKind::ExportAll(export) => {
                self.push("export *");
                if let Some(alias) = &export.alias {
                    self.push(" as ");
                    self.push(&alias.name);
                }
                self.push(" from ");
                self.push(&export.source.name);
                self.push(";");
            }
        }
    }

    fn import_specifiers(&mut self, specifiers: &[umc_ast::ast::ImportSpecifier]) {
        let mut named = Vec::new();
        let mut first = true;
        for specifier in specifiers {
            match &specifier.kind {
                ImportSpecifierKind::Default(local) => {
                    debug_assert!(first, "default import should come first");
                    self.push(&local.name);
                    first = false;
                }
                ImportSpecifierKind::Namespace(local) => {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    self.push("* as ");
                    self.push(&local.name);
                }
                ImportSpecifierKind::Named(imported, local) => named.push((imported, local)),
            }
        }

        if !named.is_empty() {
            if !first {
                self.push(", ");
            }
            self.push("{ ");
            let mut first_named = true;
            for (imported, local) in named {
                if !first_named {
                    self.push(", ");
                }
                first_named = false;
                if let Some(imported) = imported {
                    self.push(&imported.name);
                    self.push(" as ");
                }
                self.push(&local.name);
            }
            self.push(" }");
        }
    }

    fn for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(decl) => self.var_decl(decl),
            ForHead::Expr(expr) => self.expr(expr, ASSIGN),
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.push(&decl.kind.to_string());
        self.push(" ");
        let mut first = true;
        for declarator in decl.decls.iter() {
            if !first {
                self.push(", ");
            }
            first = false;
            self.pat(&declarator.pat);
            if let Some(init) = &declarator.init {
                self.push(" = ");
                self.expr(init, ASSIGN);
            }
        }
    }

    fn block(&mut self, block: &Block) {
        if block.stmts.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.newline();
        self.indent += 1;
        for stmt in block.stmts.iter() {
            self.stmt_line(stmt);
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    fn func(&mut self, name: Option<&str>, func: &Func) {
        if func.is_async {
            self.push("async ");
        }
        self.push("function");
        if func.is_generator {
            self.push("*");
        }
        if let Some(name) = name {
            self.push(" ");
            self.push(name);
        }
        self.params(&func.params);
        self.push(" ");
        self.block(&func.body);
    }

    fn params(&mut self, params: &[Box<Pat>]) {
        self.push("(");
        let mut first = true;
        for param in params {
            if !first {
                self.push(", ");
            }
            first = false;
            self.pat(param);
        }
        self.push(")");
    }

    fn class_tail(&mut self, class: &Class) {
        if let Some(parent) = &class.parent {
            self.push(" extends ");
            self.expr(parent, CALL);
        }
        if class.members.is_empty() {
            self.push(" {}");
            return;
        }
        self.push(" {");
        self.newline();
        self.indent += 1;
        for member in class.members.iter() {
            self.write_indent();
            if member.is_static {
                self.push("static ");
            }
            match &member.kind {
                ClassMemberKind::Method(kind, key, func) => self.method(*kind, key, func),
                ClassMemberKind::Field(key, init) => {
                    self.prop_key(key);
                    if let Some(init) = init {
                        self.push(" = ");
                        self.expr(init, ASSIGN);
                    }
                    self.push(";");
                }
            }
            self.newline();
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    fn method(&mut self, kind: MethodKind, key: &PropKey, func: &Func) {
        if func.is_async {
            self.push("async ");
        }
        match kind {
            MethodKind::Get => self.push("get "),
            MethodKind::Set => self.push("set "),
            MethodKind::Method => {}
        }
        if func.is_generator {
            self.push("*");
        }
        self.prop_key(key);
        self.params(&func.params);
        self.push(" ");
        self.block(&func.body);
    }

    fn prop_key(&mut self, key: &PropKey) {
        match key {
            PropKey::Name(name) | PropKey::Str(name) | PropKey::Num(name)
            | PropKey::Private(name) => self.push(&name.name),
            PropKey::Computed(expr) => {
                self.push("[");
                self.expr(expr, ASSIGN);
                self.push("]");
            }
        }
    }

    fn pat(&mut self, pat: &Pat) {
        match &*pat.kind {
            PatKind::Ident(id) => self.push(&id.name),
            PatKind::Array(elements) => {
                self.push("[");
                let mut first = true;
                for element in elements.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    if let Some(element) = element {
                        self.pat(element);
                    }
                }
                self.push("]");
            }
            PatKind::Object(props) => {
                if props.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{ ");
                let mut first = true;
                for prop in props.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    match &prop.kind {
                        ObjectPatPropKind::Shorthand(id, default) => {
                            self.push(&id.name);
                            if let Some(default) = default {
                                self.push(" = ");
                                self.expr(default, ASSIGN);
                            }
                        }
                        ObjectPatPropKind::KeyValue(key, value) => {
                            self.prop_key(key);
                            self.push(": ");
                            self.pat(value);
                        }
                        ObjectPatPropKind::Rest(inner) => {
                            self.push("...");
                            self.pat(inner);
                        }
                    }
                }
                self.push(" }");
            }
            PatKind::Assign(inner, default) => {
                self.pat(inner);
                self.push(" = ");
                self.expr(default, ASSIGN);
            }
            PatKind::Rest(inner) => {
                self.push("...");
                self.pat(inner);
            }
            PatKind::Err => {}
        }
    }

    /// Emits an expression, parenthesizing it when its precedence is below what the context
    /// requires.
    fn expr(&mut self, expr: &Expr, min_precedence: u8) {
        if precedence(&expr.kind) < min_precedence {
            self.push("(");
            self.expr_inner(expr);
            self.push(")");
        } else {
            self.expr_inner(expr);
        }
    }

    #[allow(clippy::too_many_lines)]
    fn expr_inner(&mut self, expr: &Expr) {
        match &*expr.kind {
            ExprKind::Ident(id) => self.push(&id.name),
            ExprKind::Lit(lit) => self.lit(lit),
            ExprKind::Template(template) => self.template(template),
            ExprKind::TaggedTemplate(tag, template) => {
                self.expr(tag, CALL);
                self.template(template);
            }
            ExprKind::Array(elements) => {
                self.push("[");
                let mut first = true;
                for element in elements.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    if let Some(element) = element {
                        self.expr(element, ASSIGN);
                    }
                }
                self.push("]");
            }
            ExprKind::Object(props) => {
                if props.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{ ");
                let mut first = true;
                for prop in props.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    self.prop(prop);
                }
                self.push(" }");
            }
            ExprKind::Func(name, func) => {
                self.func(name.as_ref().map(|n| n.name.as_ref()), func);
            }
            ExprKind::Arrow(arrow) => self.arrow(arrow),
            ExprKind::Class(name, class) => {
                self.push("class");
                if let Some(name) = name {
                    self.push(" ");
                    self.push(&name.name);
                }
                self.class_tail(class);
            }
            ExprKind::Unary(op, operand) => match op {
                UnOp::TypeOf | UnOp::Void | UnOp::Delete => {
                    self.push(&op.to_string());
                    self.push(" ");
                    self.expr(operand, UNARY);
                }
                UnOp::Neg | UnOp::Pos => {
                    self.push(&op.to_string());
                    // A nested sign would pair into `--`/`++`, so force parentheses.
                    self.expr(operand, POSTFIX);
                }
                UnOp::Not | UnOp::BitNot => {
                    self.push(&op.to_string());
                    self.expr(operand, UNARY);
                }
            },
            ExprKind::Update(op, prefix, operand) => {
                if *prefix {
                    self.push(&op.to_string());
                    self.expr(operand, POSTFIX);
                } else {
                    self.expr(operand, POSTFIX);
                    self.push(&op.to_string());
                }
            }
            ExprKind::Bin(op, lhs, rhs) => {
                let prec = bin_precedence(*op);
                let (lhs_min, rhs_min) = if *op == BinOp::Exp {
                    // Right-associative, and a unary base is not allowed unparenthesized.
                    (POSTFIX, prec)
                } else {
                    (prec, prec + 1)
                };
                self.expr(lhs, lhs_min);
                self.push(" ");
                self.push(&op.to_string());
                self.push(" ");
                self.expr(rhs, rhs_min);
            }
            ExprKind::Assign(op, target, value) => {
                self.expr(target, POSTFIX);
                self.push(" ");
                if let Some(op) = op {
                    self.push(&op.to_string());
                }
                self.push("= ");
                self.expr(value, ASSIGN);
            }
            ExprKind::Cond(cond, then, otherwise) => {
                self.expr(cond, ASSIGN + 1);
                self.push(" ? ");
                self.expr(then, ASSIGN);
                self.push(" : ");
                self.expr(otherwise, ASSIGN);
            }
            ExprKind::Call(callee, args, optional) => {
                self.expr(callee, CALL);
                if *optional {
                    self.push("?.");
                }
                self.args(args);
            }
            ExprKind::New(callee, args) => {
                self.push("new ");
                if callee_contains_call(callee) {
                    self.push("(");
                    self.expr_inner(callee);
                    self.push(")");
                } else {
                    self.expr(callee, CALL);
                }
                if let Some(args) = args {
                    self.args(args);
                }
            }
            ExprKind::Member(object, prop, optional) => {
                // A plain number literal followed by a dot would read as a float.
                if matches!(&*object.kind, ExprKind::Lit(Lit::Num(..))) {
                    self.push("(");
                    self.expr_inner(object);
                    self.push(")");
                } else {
                    self.expr(object, CALL);
                }
                match prop {
                    MemberProp::Name(name) => {
                        self.push(if *optional { "?." } else { "." });
                        self.push(&name.name);
                    }
                    MemberProp::Private(name) => {
                        self.push(if *optional { "?." } else { "." });
                        self.push(&name.name);
                    }
                    MemberProp::Computed(index) => {
                        if *optional {
                            self.push("?.");
                        }
                        self.push("[");
                        self.expr(index, SEQ);
                        self.push("]");
                    }
                }
            }
            ExprKind::Seq(exprs) => {
                let mut first = true;
                for expr in exprs.iter() {
                    if !first {
                        self.push(", ");
                    }
                    first = false;
                    self.expr(expr, SEQ + 1);
                }
            }
            ExprKind::Await(operand) => {
                self.push("await ");
                self.expr(operand, UNARY);
            }
            ExprKind::Yield(operand, delegate) => {
                self.push("yield");
                if *delegate {
                    self.push("*");
                }
                if let Some(operand) = operand {
                    self.push(" ");
                    self.expr(operand, ASSIGN);
                }
            }
            ExprKind::Spread(operand) => {
                self.push("...");
                self.expr(operand, ASSIGN);
            }
            ExprKind::Paren(inner) => {
                self.push("(");
                self.expr(inner, SEQ);
                self.push(")");
            }
            ExprKind::This => self.push("this"),
            ExprKind::Super => self.push("super"),
            ExprKind::NewTarget => self.push("new.target"),
            ExprKind::ImportMeta => self.push("import.meta"),
            ExprKind::ImportCall(argument) => {
                self.push("import(");
                self.expr(argument, ASSIGN);
                self.push(")");
            }
            ExprKind::Err => {}
        }
    }

    fn prop(&mut self, prop: &Prop) {
        match &prop.kind {
            PropKind::Shorthand(id, default) => {
                self.push(&id.name);
                if let Some(default) = default {
                    self.push(" = ");
                    self.expr(default, ASSIGN);
                }
            }
            PropKind::KeyValue(key, value) => {
                self.prop_key(key);
                self.push(": ");
                self.expr(value, ASSIGN);
            }
            PropKind::Method(kind, key, func) => self.method(*kind, key, func),
            PropKind::Spread(inner) => {
                self.push("...");
                self.expr(inner, ASSIGN);
            }
        }
    }

    fn arrow(&mut self, arrow: &Arrow) {
        if arrow.is_async {
            self.push("async ");
        }
        self.params(&arrow.params);
        self.push(" => ");
        match &arrow.body {
            ArrowBody::Block(block) => self.block(block),
            ArrowBody::Expr(body) => {
                if starts_ambiguously(body) {
                    self.push("(");
                    self.expr(body, ASSIGN);
                    self.push(")");
                } else {
                    self.expr(body, ASSIGN);
                }
            }
        }
    }

    fn args(&mut self, args: &[Box<Expr>]) {
        self.push("(");
        let mut first = true;
        for arg in args {
            if !first {
                self.push(", ");
            }
            first = false;
            self.expr(arg, ASSIGN);
        }
        self.push(")");
    }

    fn template(&mut self, template: &umc_ast::ast::Template) {
        self.push("`");
        self.push(&template.quasis[0].name);
        for (expr, quasi) in template.exprs.iter().zip(template.quasis.iter().skip(1)) {
            self.push("${");
            self.expr(expr, SEQ);
            self.push("}");
            self.push(&quasi.name);
        }
        self.push("`");
    }

    fn lit(&mut self, lit: &Lit) {
        match lit {
            Lit::Num(_, raw)
            | Lit::BigInt(_, raw)
            | Lit::Str(_, raw)
            | Lit::Regex(raw) => self.push(raw),
            Lit::Bool(true) => self.push("true"),
            Lit::Bool(false) => self.push("false"),
            Lit::Null => self.push("null"),
        }
    }
}

/// The precedence of an expression as it appears in source, matching the parser's table.
fn precedence(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Seq(_) => SEQ,
        ExprKind::Assign(..) | ExprKind::Arrow(_) | ExprKind::Yield(..) | ExprKind::Cond(..) => {
            ASSIGN
        }
        ExprKind::Bin(op, ..) => bin_precedence(*op),
        ExprKind::Unary(..) | ExprKind::Await(_) => UNARY,
        ExprKind::Update(_, prefix, _) => {
            if *prefix {
                UNARY
            } else {
                POSTFIX
            }
        }
        ExprKind::Call(..)
        | ExprKind::New(..)
        | ExprKind::Member(..)
        | ExprKind::TaggedTemplate(..)
        | ExprKind::ImportCall(_) => CALL,
        ExprKind::Spread(_) => ASSIGN,
        _ => PRIMARY,
    }
}

fn bin_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Coalesce => 3,
        BinOp::Or => 4,
        BinOp::And => 5,
        BinOp::BitOr => 6,
        BinOp::BitXor => 7,
        BinOp::BitAnd => 8,
        BinOp::Eq | BinOp::Neq | BinOp::StrictEq | BinOp::StrictNeq => 9,
        BinOp::Lt | BinOp::Lte | BinOp::Gt | BinOp::Gte | BinOp::In | BinOp::InstanceOf => 10,
        BinOp::Shl | BinOp::Shr | BinOp::UShr => 11,
        BinOp::Add | BinOp::Sub => 12,
        BinOp::Mul | BinOp::Div | BinOp::Mod => 13,
        BinOp::Exp => 14,
    }
}

/// True if the expression begins with a token that would be misread at the start of a
/// statement or a concise arrow body: `{`, `function`, or `class`.
fn starts_ambiguously(expr: &Expr) -> bool {
    match &*expr.kind {
        ExprKind::Object(_) | ExprKind::Func(..) | ExprKind::Class(..) => true,
        ExprKind::Bin(_, lhs, ..) | ExprKind::Assign(_, lhs, ..) | ExprKind::Cond(lhs, ..) => {
            starts_ambiguously(lhs)
        }
        ExprKind::Call(callee, ..) | ExprKind::New(callee, _) => starts_ambiguously(callee),
        ExprKind::Member(object, ..) | ExprKind::TaggedTemplate(object, _) => {
            starts_ambiguously(object)
        }
        ExprKind::Seq(exprs) => exprs.first().is_some_and(|e| starts_ambiguously(e)),
        ExprKind::Update(_, false, operand) => starts_ambiguously(operand),
        _ => false,
    }
}

fn callee_contains_call(expr: &Expr) -> bool {
    match &*expr.kind {
        ExprKind::Call(..) | ExprKind::ImportCall(_) => true,
        ExprKind::Member(object, ..) | ExprKind::TaggedTemplate(object, _) => {
            callee_contains_call(object)
        }
        _ => precedence(&expr.kind) < CALL,
    }
}
