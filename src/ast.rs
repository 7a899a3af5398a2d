//! Abstract Syntax Tree types for TypeScript/JavaScript source.
//!
//! The tree is produced by the parser and read (never mutated) by the
//! semantic analyzer and the code generator.

use crate::lexer::Span;

/// A complete program (script or module)
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
    /// True when the token stream contains at least one `import` or `export`.
    pub is_module: bool,
    pub span: Span,
}

// ============ STATEMENTS ============

#[derive(Debug, Clone)]
pub enum Statement {
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    FunctionDecl(FunctionDeclStmt),
    ClassDecl(ClassDeclStmt),
    InterfaceDecl(InterfaceDeclStmt),
    Expression(ExpressionStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Import(ImportStmt),
    Export(ExportStmt),
    Empty(Span),
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub name: String,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub is_const: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclStmt {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ClassDeclStmt {
    pub name: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ClassMember {
    Property(PropertyMember),
    Method(MethodMember),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone)]
pub struct PropertyMember {
    pub name: String,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_readonly: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodMember {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStmt,
    pub access: AccessModifier,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclStmt {
    pub name: String,
    pub extends: Vec<String>,
    pub members: Vec<InterfaceMember>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum InterfaceMember {
    Property(InterfacePropertySig),
    Method(InterfaceMethodSig),
}

#[derive(Debug, Clone)]
pub struct InterfacePropertySig {
    pub name: String,
    pub type_annotation: TypeAnnotation,
    pub is_readonly: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InterfaceMethodSig {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: TypeAnnotation,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub initializer: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub increment: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

// Module statements

#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ImportSpecifier {
    /// `import { a }` or `import { a as b }`
    Named { imported: String, local: String },
    /// `import d from "m"`
    Default { local: String },
    /// `import * as ns from "m"`
    Namespace { local: String },
}

#[derive(Debug, Clone)]
pub struct ExportStmt {
    pub kind: ExportKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExportKind {
    /// `export default <expression>;`
    Default { expression: Expression },
    /// `export { a, b as c } [from "m"];`
    Named {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
    },
    /// `export <declaration>`
    Declaration { declaration: Box<Statement> },
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

// ============ EXPRESSIONS ============

#[derive(Debug, Clone)]
pub enum Expression {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Assign(AssignExpr),
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Object(ObjectExpr),
    Array(ArrayExpr),
    New(NewExpr),
    Function(FunctionExpr),
    Conditional(ConditionalExpr),
    This(Span),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Binary(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Index(e) => e.span,
            Expression::Assign(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::Identifier(e) => e.span,
            Expression::Object(e) => e.span,
            Expression::Array(e) => e.span,
            Expression::New(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Conditional(e) => e.span,
            Expression::This(s) => *s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub operator: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %
    Exp, // **

    // Comparison
    Eq,          // ==
    NotEq,       // !=
    StrictEq,    // ===
    StrictNotEq, // !==
    Lt,          // <
    LtEq,        // <=
    Gt,          // >
    GtEq,        // >=

    // Logical
    And, // &&
    Or,  // ||

    // Bitwise
    BitAnd,  // &
    BitOr,   // |
    BitXor,  // ^
    LShift,  // <<
    RShift,  // >>
    URShift, // >>>
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::URShift => ">>>",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expression>,
    pub prefix: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,       // !
    Neg,       // -
    Plus,      // +
    Increment, // ++
    Decrement, // --
    Typeof,    // typeof
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
            UnaryOp::Typeof => "typeof ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: Box<Expression>,
    pub property: String,
    /// True for `?.` access
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub operator: AssignOp,
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectExpr {
    pub properties: Vec<ObjectProperty>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub elements: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub name: Option<String>,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub condition: Box<Expression>,
    pub then_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
    pub span: Span,
}

// ============ TYPE ANNOTATIONS ============

#[derive(Debug, Clone)]
pub enum TypeAnnotation {
    Named(NamedType),
    Array(ArrayType),
    Function(FunctionType),
    Object(ObjectType),
    Union(UnionType),
    Intersection(IntersectionType),
    Generic(GenericType),
}

impl TypeAnnotation {
    pub fn span(&self) -> Span {
        match self {
            TypeAnnotation::Named(t) => t.span,
            TypeAnnotation::Array(t) => t.span,
            TypeAnnotation::Function(t) => t.span,
            TypeAnnotation::Object(t) => t.span,
            TypeAnnotation::Union(t) => t.span,
            TypeAnnotation::Intersection(t) => t.span,
            TypeAnnotation::Generic(t) => t.span,
        }
    }

    /// Shorthand for the named types the analyzer synthesizes constantly.
    pub fn named(name: &str, span: Span) -> TypeAnnotation {
        TypeAnnotation::Named(NamedType {
            name: name.to_string(),
            span,
        })
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(t) => write!(f, "{}", t.name),
            TypeAnnotation::Array(t) => write!(f, "{}[]", t.element),
            TypeAnnotation::Function(t) => {
                write!(f, "(")?;
                for (i, param) in t.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match &param.type_annotation {
                        Some(ty) => write!(f, "{}: {}", param.name, ty)?,
                        None => write!(f, "{}", param.name)?,
                    }
                }
                write!(f, ") => {}", t.return_type)
            }
            TypeAnnotation::Object(t) => {
                write!(f, "{{ ")?;
                for prop in &t.properties {
                    let marker = if prop.optional { "?" } else { "" };
                    write!(f, "{}{}: {}; ", prop.name, marker, prop.type_annotation)?;
                }
                write!(f, "}}")
            }
            TypeAnnotation::Union(t) => {
                for (i, ty) in t.types.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                Ok(())
            }
            TypeAnnotation::Intersection(t) => {
                for (i, ty) in t.types.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                Ok(())
            }
            TypeAnnotation::Generic(t) => {
                write!(f, "{}<", t.base)?;
                for (i, arg) in t.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element: Box<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionType {
    pub params: Vec<Parameter>,
    pub return_type: Box<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub properties: Vec<ObjectTypeProperty>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectTypeProperty {
    pub name: String,
    pub type_annotation: TypeAnnotation,
    /// True iff a `?` immediately followed the property name.
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct UnionType {
    pub types: Vec<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IntersectionType {
    pub types: Vec<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct GenericType {
    pub base: Box<TypeAnnotation>,
    pub arguments: Vec<TypeAnnotation>,
    pub span: Span,
}
