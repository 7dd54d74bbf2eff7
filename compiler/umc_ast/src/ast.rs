// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

//! The abstract syntax tree for ECMAScript sources. The tree directly corresponds to the
//! surface syntax; no desugaring happens at this level.
//!
//! Identifiers that participate in scope resolution are [`Ident`] nodes. Names that must never
//! be resolved or renamed — property keys, member-access names, labels, private names, and the
//! external names of import/export specifiers — are [`Name`] nodes. The distinction is
//! structural so that renaming cannot reach them by accident.

use num_bigint::BigInt;
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    rc::Rc,
};
use umc_data_structures::span::Span;

/// The unique identifier for an AST node.
#[derive(Clone, Copy, Debug)]
pub struct NodeId(u32);

impl NodeId {
    const DEFAULT_VALUE: u32 = u32::MAX;

    /// The ID of the first node.
    pub const FIRST: Self = Self(0);

    /// The successor of this ID.
    #[must_use]
    pub fn successor(self) -> Self {
        Self(self.0 + 1)
    }

    /// True if this is the default ID.
    #[must_use]
    pub fn is_default(self) -> bool {
        self.0 == Self::DEFAULT_VALUE
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self(Self::DEFAULT_VALUE)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_default() {
            f.write_str("_id_")
        } else {
            self.0.fmt(f)
        }
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        assert!(!value.is_default(), "default node ID should be replaced");
        value.0 as usize
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        assert!(!self.is_default(), "default node ID should be replaced");
        self.0 == other.0
    }
}

impl Eq for NodeId {}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        assert!(!self.is_default(), "default node ID should be replaced");
        self.0.cmp(&other.0)
    }
}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// The parse goal of a source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SourceType {
    /// A classic script: no import/export syntax, sloppy-mode globals.
    Script,
    /// An ECMAScript module.
    #[default]
    Module,
}

/// The root node of an AST.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The parse goal the source was parsed under.
    pub source_type: SourceType,
    /// The top-level statements.
    pub stmts: Box<[Box<Stmt>]>,
}

/// An identifier that declares or references a binding. These are the only nodes scope
/// resolution looks at and the only nodes renaming may touch.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The identifier text.
    pub name: Rc<str>,
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A name that is never resolved or renamed: a property key, member-access name, label,
/// private name, template chunk, or the external name of an import/export specifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The raw text.
    pub name: Rc<str>,
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stmt {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The statement kind.
    pub kind: Box<StmtKind>,
}

/// A statement kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StmtKind {
    /// A block statement.
    Block(Block),
    /// A `var`, `let`, or `const` declaration.
    Var(Box<VarDecl>),
    /// A function declaration.
    Func(Box<FuncDecl>),
    /// A class declaration.
    Class(Box<ClassDecl>),
    /// An expression statement.
    Expr(Box<Expr>),
    /// An `if` statement: condition, consequent, optional alternate.
    If(Box<Expr>, Box<Stmt>, Option<Box<Stmt>>),
    /// A C-style `for` loop: init, test, update, body.
    For(
        Option<ForInit>,
        Option<Box<Expr>>,
        Option<Box<Expr>>,
        Box<Stmt>,
    ),
    /// A `for…in` loop: target, object, body.
    ForIn(ForHead, Box<Expr>, Box<Stmt>),
    /// A `for…of` loop: whether `for await`, target, iterable, body.
    ForOf(bool, ForHead, Box<Expr>, Box<Stmt>),
    /// A `while` loop.
    While(Box<Expr>, Box<Stmt>),
    /// A `do…while` loop.
    DoWhile(Box<Stmt>, Box<Expr>),
    /// A `switch` statement.
    Switch(Box<Expr>, Box<[SwitchCase]>),
    /// A `try` statement: block, optional catch, optional finally.
    Try(Block, Option<CatchClause>, Option<Block>),
    /// A `throw` statement.
    Throw(Box<Expr>),
    /// A `return` statement.
    Return(Option<Box<Expr>>),
    /// A `break` statement with an optional label.
    Break(Option<Box<Name>>),
    /// A `continue` statement with an optional label.
    Continue(Option<Box<Name>>),
    /// A labeled statement.
    Labeled(Box<Name>, Box<Stmt>),
    /// A `with` statement. Renaming inside one is never sound.
    With(Box<Expr>, Box<Stmt>),
    /// A `debugger` statement.
    Debugger,
    /// An empty statement.
    #[default]
    Empty,
    /// An `import` declaration.
    Import(Box<ImportDecl>),
    /// An `export <declaration>` statement.
    ExportDecl(Box<ExportDecl>),
    /// An `export { … }` statement, optionally re-exporting from another module.
    ExportNamed(Box<ExportNamed>),
    /// An `export default …` statement.
    ExportDefault(Box<ExportDefault>),
    /// An `export * from …` statement.
    ExportAll(Box<ExportAll>),
}

/// A block of statements in its own lexical scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The statements in the block.
    pub stmts: Box<[Box<Stmt>]>,
}

/// The init clause of a C-style `for` loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    /// A declaration init: `for (let i = 0; …)`.
    Var(Box<VarDecl>),
    /// An expression init: `for (i = 0; …)`.
    Expr(Box<Expr>),
}

/// The target of a `for…in` or `for…of` loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ForHead {
    /// A fresh declaration: `for (const x of …)`.
    Var(Box<VarDecl>),
    /// An assignment target: `for (x of …)` or `for ([a, b] of …)`.
    Expr(Box<Expr>),
}

/// One `case` or `default` clause of a `switch` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The test expression, or `None` for `default`.
    pub test: Option<Box<Expr>>,
    /// The clause body.
    pub body: Box<[Box<Stmt>]>,
}

/// A `catch` clause.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The catch parameter, absent for `catch { … }`.
    pub param: Option<Box<Pat>>,
    /// The catch body.
    pub body: Block,
}

/// The keyword of a variable declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeclKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

impl Display for DeclKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        })
    }
}

/// A `var`/`let`/`const` declaration with one or more declarators.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The declaration keyword.
    pub kind: DeclKind,
    /// The declarators.
    pub decls: Box<[VarDeclarator]>,
}

/// One declarator of a variable declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The bound pattern.
    pub pat: Box<Pat>,
    /// The initializer, if any.
    pub init: Option<Box<Expr>>,
}

/// A function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The function name.
    pub name: Box<Ident>,
    /// The function itself.
    pub func: Box<Func>,
}

/// A function: parameters and body, shared by declarations, expressions, and methods.
#[derive(Clone, Debug, PartialEq)]
pub struct Func {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// True for `async` functions.
    pub is_async: bool,
    /// True for generators.
    pub is_generator: bool,
    /// The parameter patterns.
    pub params: Box<[Box<Pat>]>,
    /// The function body.
    pub body: Block,
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The class name.
    pub name: Box<Ident>,
    /// The class itself.
    pub class: Box<Class>,
}

/// A class: heritage clause and members.
#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The `extends` expression, if any.
    pub parent: Option<Box<Expr>>,
    /// The class members.
    pub members: Box<[ClassMember]>,
}

/// One member of a class body.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassMember {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// True for `static` members.
    pub is_static: bool,
    /// The member kind.
    pub kind: ClassMemberKind,
}

/// A class member kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassMemberKind {
    /// A method, getter, or setter.
    Method(MethodKind, PropKey, Box<Func>),
    /// A field with an optional initializer.
    Field(PropKey, Option<Box<Expr>>),
}

/// The flavor of a method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MethodKind {
    /// An ordinary method.
    Method,
    /// A getter.
    Get,
    /// A setter.
    Set,
}

/// A property key. Only [`PropKey::Computed`] keys contain resolvable expressions; all other
/// keys are plain names that renaming never touches.
#[derive(Clone, Debug, PartialEq)]
pub enum PropKey {
    /// An identifier key: `{ a: … }`.
    Name(Box<Name>),
    /// A string-literal key, stored as its raw lexeme: `{ "a b": … }`.
    Str(Box<Name>),
    /// A numeric-literal key, stored as its raw lexeme: `{ 0: … }`.
    Num(Box<Name>),
    /// A computed key: `{ [e]: … }`.
    Computed(Box<Expr>),
    /// A private name: `#x`.
    Private(Box<Name>),
}

/// An expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expr {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The expression kind.
    pub kind: Box<ExprKind>,
}

/// An expression kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExprKind {
    /// An identifier reference.
    Ident(Box<Ident>),
    /// A literal.
    Lit(Lit),
    /// A template literal.
    Template(Template),
    /// A tagged template: tag expression and template.
    TaggedTemplate(Box<Expr>, Template),
    /// An array literal; `None` entries are elisions.
    Array(Box<[Option<Box<Expr>>]>),
    /// An object literal.
    Object(Box<[Prop]>),
    /// A function expression with an optional self-binding name.
    Func(Option<Box<Ident>>, Box<Func>),
    /// An arrow function.
    Arrow(Box<Arrow>),
    /// A class expression with an optional self-binding name.
    Class(Option<Box<Ident>>, Box<Class>),
    /// A unary operator application.
    Unary(UnOp, Box<Expr>),
    /// An increment or decrement; the flag is true for the prefix form.
    Update(UpdateOp, bool, Box<Expr>),
    /// A binary operator application, including logical operators.
    Bin(BinOp, Box<Expr>, Box<Expr>),
    /// An assignment; the operator is `None` for plain `=` and the compound operator
    /// otherwise.
    Assign(Option<BinOp>, Box<Expr>, Box<Expr>),
    /// A conditional expression.
    Cond(Box<Expr>, Box<Expr>, Box<Expr>),
    /// A call; the flag is true for optional calls (`f?.()`).
    Call(Box<Expr>, Box<[Box<Expr>]>, bool),
    /// A `new` expression; arguments are absent for `new F`.
    New(Box<Expr>, Option<Box<[Box<Expr>]>>),
    /// A member access; the flag is true for optional chaining (`a?.b`).
    Member(Box<Expr>, MemberProp, bool),
    /// A comma sequence.
    Seq(Box<[Box<Expr>]>),
    /// An `await` expression.
    Await(Box<Expr>),
    /// A `yield` expression; the flag is true for `yield*`.
    Yield(Option<Box<Expr>>, bool),
    /// A spread element, valid only inside calls, arrays, and objects.
    Spread(Box<Expr>),
    /// A parenthesized expression.
    Paren(Box<Expr>),
    /// `this`
    This,
    /// `super`, valid only as a callee or member object.
    Super,
    /// `new.target`
    NewTarget,
    /// `import.meta`
    ImportMeta,
    /// A dynamic `import(…)` call.
    ImportCall(Box<Expr>),
    /// Default expression when nothing has been parsed.
    #[default]
    Err,
}

/// The property position of a member access.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberProp {
    /// A static name: `a.b`.
    Name(Box<Name>),
    /// A computed property: `a[e]`.
    Computed(Box<Expr>),
    /// A private name: `this.#x`.
    Private(Box<Name>),
}

/// A template literal: `n + 1` raw chunks interleaved with `n` expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The raw text chunks, including the empty ones.
    pub quasis: Box<[Box<Name>]>,
    /// The interpolated expressions.
    pub exprs: Box<[Box<Expr>]>,
}

/// An arrow function.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// True for `async` arrows.
    pub is_async: bool,
    /// The parameter patterns.
    pub params: Box<[Box<Pat>]>,
    /// The body.
    pub body: ArrowBody,
}

/// The body of an arrow function.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    /// A block body.
    Block(Block),
    /// A concise expression body.
    Expr(Box<Expr>),
}

/// A literal, carrying its original lexeme so emission is byte-faithful.
#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    /// A number literal: cooked value and raw lexeme.
    Num(f64, Rc<str>),
    /// A `BigInt` literal: cooked value and raw lexeme (including the `n` suffix).
    BigInt(Box<BigInt>, Rc<str>),
    /// A string literal: cooked value and raw lexeme (including quotes).
    Str(Rc<str>, Rc<str>),
    /// A boolean literal.
    Bool(bool),
    /// `null`
    Null,
    /// A regular-expression literal, stored as its raw lexeme.
    Regex(Rc<str>),
}

/// One property of an object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The property kind.
    pub kind: PropKind,
}

/// An object-literal property kind.
#[derive(Clone, Debug, PartialEq)]
pub enum PropKind {
    /// A shorthand property `{ a }`; the default is only present when the object is an
    /// assignment target (`({ a = 1 } = o)`).
    Shorthand(Box<Ident>, Option<Box<Expr>>),
    /// A `key: value` property.
    KeyValue(PropKey, Box<Expr>),
    /// A method, getter, or setter property.
    Method(MethodKind, PropKey, Box<Func>),
    /// A spread property `{ ...e }`.
    Spread(Box<Expr>),
}

/// A binding pattern, used in declarations, parameters, and catch clauses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pat {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The pattern kind.
    pub kind: Box<PatKind>,
}

/// A pattern kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PatKind {
    /// A plain identifier binding.
    Ident(Box<Ident>),
    /// An array pattern; `None` entries are elisions.
    Array(Box<[Option<Box<Pat>>]>),
    /// An object pattern.
    Object(Box<[ObjectPatProp]>),
    /// A pattern with a default value.
    Assign(Box<Pat>, Box<Expr>),
    /// A rest pattern `...p`.
    Rest(Box<Pat>),
    /// Default pattern when nothing has been parsed.
    #[default]
    Err,
}

/// One property of an object pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPatProp {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The property kind.
    pub kind: ObjectPatPropKind,
}

/// An object-pattern property kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatPropKind {
    /// A shorthand binding `{ a }` with an optional default.
    Shorthand(Box<Ident>, Option<Box<Expr>>),
    /// A `key: pattern` binding.
    KeyValue(PropKey, Box<Pat>),
    /// A rest binding `{ ...p }`.
    Rest(Box<Pat>),
}

/// An `import` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The import specifiers; empty for a bare `import "m"`.
    pub specifiers: Box<[ImportSpecifier]>,
    /// The module source, stored as its raw string lexeme.
    pub source: Box<Name>,
}

/// One specifier of an import declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpecifier {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The specifier kind.
    pub kind: ImportSpecifierKind,
}

/// An import specifier kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportSpecifierKind {
    /// A named import `{ x as y }`; the external name is `None` when it is spelled the same
    /// as the local binding (`{ x }`).
    Named(Option<Box<Name>>, Box<Ident>),
    /// A default import `import x from "m"`.
    Default(Box<Ident>),
    /// A namespace import `import * as ns from "m"`.
    Namespace(Box<Ident>),
}

/// An `export <declaration>` statement. The inner statement is always a variable, function,
/// or class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDecl {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The exported declaration.
    pub decl: Box<Stmt>,
}

/// An `export { … }` statement, optionally re-exporting from another module.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportNamed {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The export specifiers.
    pub specifiers: Box<[ExportSpecifier]>,
    /// The re-export source, if any. When present, specifier locals are external names of the
    /// other module, not references into this one.
    pub source: Option<Box<Name>>,
}

/// One specifier of a named export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSpecifier {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The local side. A reference into this module unless the export has a `from` clause.
    pub local: Box<Ident>,
    /// The external name; `None` when it is spelled the same as the local.
    pub exported: Option<Box<Name>>,
}

/// An `export default …` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDefault {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The exported value.
    pub kind: ExportDefaultKind,
}

/// The payload of a default export.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportDefaultKind {
    /// `export default function [name]() {}`
    Func(Option<Box<Ident>>, Box<Func>),
    /// `export default class [Name] {}`
    Class(Option<Box<Ident>>, Box<Class>),
    /// `export default <expression>;`
    Expr(Box<Expr>),
}

/// An `export * from …` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportAll {
    /// The node ID.
    pub id: NodeId,
    /// The span.
    pub span: Span,
    /// The namespace alias of `export * as ns from "m"`.
    pub alias: Option<Box<Name>>,
    /// The module source, stored as its raw string lexeme.
    pub source: Box<Name>,
}

/// A unary operator.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum UnOp {
    /// `-`
    Neg,
    /// `+`
    Pos,
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `typeof`
    TypeOf,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            UnOp::Neg => "-",
            UnOp::Pos => "+",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
            UnOp::TypeOf => "typeof",
            UnOp::Void => "void",
            UnOp::Delete => "delete",
        })
    }
}

/// An increment or decrement operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpdateOp {
    /// `++`
    Incr,
    /// `--`
    Decr,
}

impl Display for UpdateOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            UpdateOp::Incr => "++",
            UpdateOp::Decr => "--",
        })
    }
}

/// A binary operator, including the logical and nullish-coalescing operators.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Exp,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `in`
    In,
    /// `instanceof`
    InstanceOf,
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNeq,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Coalesce,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Exp => "**",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::UShr => ">>>",
            BinOp::Lt => "<",
            BinOp::Lte => "<=",
            BinOp::Gt => ">",
            BinOp::Gte => ">=",
            BinOp::In => "in",
            BinOp::InstanceOf => "instanceof",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::StrictEq => "===",
            BinOp::StrictNeq => "!==",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::BitOr => "|",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Coalesce => "??",
        })
    }
}
