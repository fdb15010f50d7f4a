use crate::token::{LitKind, Pos, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The root of a script: optional leading comments, then declarations, then
/// top-level statements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub doc: Option<CommentGroup>,
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Position of `#`.
    pub hash: Pos,
    /// Full comment text, including the leading `#`.
    pub text: String,
}

/// A contiguous run of comments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

// Declarations

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FuncDecl {
    /// Position of `function`.
    pub function: Pos,
    pub name: Ident,
    pub recv: Vec<Expr>,
    pub body: BlockStmt,
    /// Position of `end`.
    pub end_pos: Pos,
}

// Statements

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Assign(AssignStmt),
    Block(BlockStmt),
    Expr(ExprStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    While(WhileStmt),
    Foreach(ForeachStmt),
    If(IfStmt),
    Switch(SwitchStmt),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    #[serde(default)]
    pub local: bool,
    pub lhs: Expr,
    /// Position of `=`.
    #[serde(default)]
    pub assign: Pos,
    pub rhs: Expr,
}

/// A statement list, optionally delimited by braces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStmt {
    /// `Token::None` or `Token::LBrace`.
    pub tok: Token,
    pub opening: Pos,
    pub list: Vec<Stmt>,
    pub closing: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnStmt {
    /// Position of `return`.
    #[serde(rename = "return")]
    pub ret: Pos,
    pub x: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakStmt {
    /// Position of `break`.
    #[serde(rename = "break")]
    pub brk: Pos,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinueStmt {
    /// Position of `continue`.
    #[serde(rename = "continue")]
    pub cont: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    #[serde(default, rename = "while")]
    pub while_pos: Pos,
    pub cond: Expr,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeachStmt {
    #[serde(default, rename = "for")]
    pub for_pos: Pos,
    pub elem: Expr,
    #[serde(default, rename = "in")]
    pub in_pos: Pos,
    #[serde(default)]
    pub group: Vec<Expr>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_pos: Pos,
}

/// An `if` statement. Each `else if` clause is itself an `IfStmt` that only
/// uses its condition and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default, rename = "if")]
    pub if_pos: Pos,
    pub cond: Expr,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub elifs: Vec<IfStmt>,
    #[serde(default, rename = "else")]
    pub else_block: Option<BlockStmt>,
    #[serde(default)]
    pub end_pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    #[serde(default)]
    pub switch: Pos,
    /// Position of `(`, when the discriminant is parenthesized.
    #[serde(default)]
    pub lparen: Pos,
    pub var: Expr,
    #[serde(default)]
    pub rparen: Pos,
    #[serde(default)]
    pub cases: Vec<CaseClause>,
    #[serde(default, rename = "else")]
    pub else_block: Option<BlockStmt>,
    #[serde(default)]
    pub end_pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseClause {
    pub case: Pos,
    pub conds: Vec<Expr>,
    pub body: BlockStmt,
}

// Expressions

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    Binary(BinaryExpr),
    Call(CallExpr),
    BasicTest(BasicTestExpr),
    ExtendedTest(ExtendedTestExpr),
    ArithEval(ArithEvalExpr),
    CmdGroup(CmdGroup),
    CmdSubst(CmdSubst),
    ProcSubst(ProcSubst),
    ArithExp(ArithExp),
    ParamExp(ParamExp),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ident {
    pub name_pos: Pos,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub value_pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    /// Render without whitespace around the operator.
    #[serde(default)]
    pub compress: bool,
    pub x: Box<Expr>,
    #[serde(default)]
    pub op_pos: Pos,
    #[serde(default)]
    pub op: Token,
    pub y: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallExpr {
    pub func: Ident,
    pub recv: Vec<Expr>,
}

/// `[ X ]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicTestExpr {
    #[serde(default)]
    pub lbrack: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub rbrack: Pos,
}

/// `[[ X ]]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedTestExpr {
    #[serde(default)]
    pub lbrack: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub rbrack: Pos,
}

/// `(( X ))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithEvalExpr {
    #[serde(default)]
    pub lparen: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub rparen: Pos,
}

/// `{ list; }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CmdGroup {
    pub lbrace: Pos,
    pub list: Vec<Stmt>,
    pub rbrace: Pos,
}

/// `$( X )` or `` `X` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmdSubst {
    #[serde(default)]
    pub dollar: Pos,
    /// `Token::LParen` or `Token::BackQuote`.
    #[serde(default = "default_subst_tok")]
    pub tok: Token,
    #[serde(default)]
    pub opening: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub closing: Pos,
}

fn default_subst_tok() -> Token {
    Token::LParen
}

/// `<( X )` or `>( X )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcSubst {
    /// `Token::Lt` or `Token::Gt`.
    pub tok: Token,
    #[serde(default)]
    pub tok_pos: Pos,
    #[serde(default)]
    pub lparen: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub rparen: Pos,
}

/// `$(( X ))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithExp {
    #[serde(default)]
    pub dollar: Pos,
    #[serde(default)]
    pub lparen: Pos,
    pub x: Box<Expr>,
    #[serde(default)]
    pub rparen: Pos,
}

/// `${ ... }` with at most one modifier. No modifier is plain `${var}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamExp {
    #[serde(default)]
    pub dollar: Pos,
    #[serde(default)]
    pub lbrace: Pos,
    pub var: Box<Expr>,
    #[serde(default)]
    pub modifier: Option<ParamModifier>,
    #[serde(default)]
    pub rbrace: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamModifier {
    /// `${var:-val}`
    DefaultVal(DefaultValExp),
    /// `${var:=val}`
    DefaultValAssign(DefaultValAssignExp),
    /// `${var:?val}`
    NonNullCheck(NonNullCheckExp),
    /// `${var:+val}`
    NonNull(NonNullExp),
    /// `${!var*}`
    Prefix(PrefixExp),
    /// `${!var@}`
    PrefixArray(PrefixArrayExp),
    /// `${!var[*]}` or `${!var[@]}`
    ArrayIndex(ArrayIndexExp),
    /// `${#var}`
    Length(LengthExp),
    /// `${var#val}` or `${var##val}`
    DelPrefix(DelPrefix),
    /// `${var%val}` or `${var%%val}`
    DelSuffix(DelSuffix),
    /// `${var:offset}` or `${var:offset:length}`
    Substring(SubstringExp),
    /// `${var/old/new}` or `${var//old/new}`
    Replace(ReplaceExp),
    /// `${var/#old/new}`
    ReplacePrefix(ReplacePrefixExp),
    /// `${var/%old/new}`
    ReplaceSuffix(ReplaceSuffixExp),
    /// `${var^}`, `${var^^}`, `${var,}` or `${var,,}`
    CaseConversion(CaseConversionExp),
    /// `${var@op}`
    Operator(OperatorExp),
}

/// If the parameter is unset or null, the expansion of `val` is substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValExp {
    #[serde(default)]
    pub colon: Pos,
    #[serde(default)]
    pub sub: Pos,
    pub val: Box<Expr>,
}

/// If the parameter is unset or null, `val` is assigned to it first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValAssignExp {
    #[serde(default)]
    pub colon: Pos,
    #[serde(default)]
    pub assign: Pos,
    pub val: Box<Expr>,
}

/// If the parameter is null or unset, `val` is written to stderr and a
/// non-interactive shell exits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonNullCheckExp {
    #[serde(default)]
    pub colon: Pos,
    #[serde(default)]
    pub quest: Pos,
    pub val: Box<Expr>,
}

/// If the parameter is null or unset nothing is substituted, otherwise `val`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonNullExp {
    #[serde(default)]
    pub colon: Pos,
    #[serde(default)]
    pub add: Pos,
    pub val: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixExp {
    /// Position of `!`.
    pub bitnot: Pos,
    /// Position of `*`.
    pub mul: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixArrayExp {
    pub bitnot: Pos,
    /// Position of `@`.
    pub at: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayIndexExp {
    #[serde(default)]
    pub bitnot: Pos,
    #[serde(default)]
    pub lbracket: Pos,
    /// `Token::At` or `Token::Mul`.
    pub tok: Token,
    #[serde(default)]
    pub tok_pos: Pos,
    #[serde(default)]
    pub rbracket: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthExp {
    /// Position of `#`.
    pub hash: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelPrefix {
    /// `##` instead of `#`.
    #[serde(default)]
    pub longest: bool,
    #[serde(default)]
    pub hash: Pos,
    pub val: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelSuffix {
    /// `%%` instead of `%`.
    #[serde(default)]
    pub longest: bool,
    #[serde(default)]
    pub percent: Pos,
    pub val: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstringExp {
    pub colon1: Pos,
    pub offset: i64,
    pub colon2: Pos,
    pub length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceExp {
    /// `//` instead of `/`: replace every match.
    pub all: bool,
    pub div1: Pos,
    pub old: String,
    pub div2: Pos,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacePrefixExp {
    pub div1: Pos,
    pub hash: Pos,
    pub old: String,
    pub div2: Pos,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceSuffixExp {
    pub div1: Pos,
    pub percent: Pos,
    pub old: String,
    pub div2: Pos,
    pub new: String,
}

/// `^` (first, upper), `^^` (all, upper), `,` (first, lower), `,,` (all, lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConversionExp {
    pub first_char: bool,
    pub to_upper: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorExp {
    #[serde(default)]
    pub at: Pos,
    pub op: ExpOperator,
}

/// Transformation operators for `${var@op}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpOperator {
    /// Lowercase alphabetic characters converted to uppercase.
    #[serde(rename = "U")]
    UpperAll,
    /// First character converted to uppercase.
    #[serde(rename = "u")]
    UpperFirst,
    /// Uppercase alphabetic characters converted to lowercase.
    #[serde(rename = "L")]
    LowerAll,
    /// Quoted in a format that can be reused as input.
    #[serde(rename = "Q")]
    Quote,
    /// Backslash escapes expanded as with `$'...'`.
    #[serde(rename = "E")]
    Escape,
    /// Expanded as if it were a prompt string.
    #[serde(rename = "P")]
    Prompt,
    /// An assignment or `declare` command recreating the parameter.
    #[serde(rename = "A")]
    Assignment,
    /// Quoted key-value pairs for arrays.
    #[serde(rename = "K")]
    KeyValue,
    /// Flag values representing the parameter's attributes.
    #[serde(rename = "a")]
    Attributes,
    /// Like `K`, but keys and values expand to separate words.
    #[serde(rename = "k")]
    KeyValueWords,
}

impl ExpOperator {
    pub const ALL: [ExpOperator; 10] = [
        ExpOperator::UpperAll,
        ExpOperator::UpperFirst,
        ExpOperator::LowerAll,
        ExpOperator::Quote,
        ExpOperator::Escape,
        ExpOperator::Prompt,
        ExpOperator::Assignment,
        ExpOperator::KeyValue,
        ExpOperator::Attributes,
        ExpOperator::KeyValueWords,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpOperator::UpperAll => "U",
            ExpOperator::UpperFirst => "u",
            ExpOperator::LowerAll => "L",
            ExpOperator::Quote => "Q",
            ExpOperator::Escape => "E",
            ExpOperator::Prompt => "P",
            ExpOperator::Assignment => "A",
            ExpOperator::KeyValue => "K",
            ExpOperator::Attributes => "a",
            ExpOperator::KeyValueWords => "k",
        }
    }
}

impl fmt::Display for ExpOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Shorthand constructors for builders and tests.

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name_pos: Pos::NONE,
            name: name.into(),
        }
    }

    pub fn at(name: impl Into<String>, pos: Pos) -> Self {
        Ident {
            name_pos: pos,
            name: name.into(),
        }
    }
}

impl BasicLit {
    pub fn new(kind: LitKind, value: impl Into<String>) -> Self {
        BasicLit {
            kind,
            value: value.into(),
            value_pos: Pos::NONE,
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(Ident::new(name))
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::BasicLit(BasicLit::new(LitKind::String, value))
    }

    pub fn lit(kind: LitKind, value: impl Into<String>) -> Expr {
        Expr::BasicLit(BasicLit::new(kind, value))
    }

    pub fn call(func: impl Into<String>, recv: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            func: Ident::new(func),
            recv,
        })
    }

    pub fn binary(x: Expr, op: Token, y: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            compress: false,
            x: Box::new(x),
            op_pos: Pos::NONE,
            op,
            y: Box::new(y),
        })
    }

    /// `${var}` with the given modifier.
    pub fn param(var: impl Into<String>, modifier: Option<ParamModifier>) -> Expr {
        Expr::ParamExp(ParamExp {
            dollar: Pos::NONE,
            lbrace: Pos::NONE,
            var: Box::new(Expr::ident(var)),
            modifier,
            rbrace: Pos::NONE,
        })
    }
}

impl BlockStmt {
    /// An undelimited block.
    pub fn of(list: Vec<Stmt>) -> Self {
        BlockStmt {
            list,
            ..BlockStmt::default()
        }
    }
}

impl Stmt {
    pub fn expr(x: Expr) -> Stmt {
        Stmt::Expr(ExprStmt { x })
    }
}
