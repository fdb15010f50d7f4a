//! Depth-first traversal over a syntax tree.
//!
//! [`walk`] hands each node to a [`Visitor`] in source order. When the visitor
//! answers [`VisitResult::Continue`] the walk descends into the node's
//! children and, for nodes that can own children, calls [`Visitor::leave`]
//! once on the way out. [`VisitResult::SkipChildren`] prunes the subtree and
//! suppresses the matching `leave`.

use super::nodes::*;
use super::span::Spanned;
use crate::token::Pos;
use std::convert::Infallible;

/// A borrowed reference to any node of the tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    File(&'a File),
    CommentGroup(&'a CommentGroup),
    Comment(&'a Comment),
    FuncDecl(&'a FuncDecl),
    AssignStmt(&'a AssignStmt),
    BlockStmt(&'a BlockStmt),
    ExprStmt(&'a ExprStmt),
    ReturnStmt(&'a ReturnStmt),
    BreakStmt(&'a BreakStmt),
    ContinueStmt(&'a ContinueStmt),
    WhileStmt(&'a WhileStmt),
    ForeachStmt(&'a ForeachStmt),
    IfStmt(&'a IfStmt),
    SwitchStmt(&'a SwitchStmt),
    CaseClause(&'a CaseClause),
    Ident(&'a Ident),
    BasicLit(&'a BasicLit),
    BinaryExpr(&'a BinaryExpr),
    CallExpr(&'a CallExpr),
    BasicTestExpr(&'a BasicTestExpr),
    ExtendedTestExpr(&'a ExtendedTestExpr),
    ArithEvalExpr(&'a ArithEvalExpr),
    CmdGroup(&'a CmdGroup),
    CmdSubst(&'a CmdSubst),
    ProcSubst(&'a ProcSubst),
    ArithExp(&'a ArithExp),
    ParamExp(&'a ParamExp),
}

impl<'a> Node<'a> {
    /// Stable name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::File(_) => "File",
            Node::CommentGroup(_) => "CommentGroup",
            Node::Comment(_) => "Comment",
            Node::FuncDecl(_) => "FuncDecl",
            Node::AssignStmt(_) => "AssignStmt",
            Node::BlockStmt(_) => "BlockStmt",
            Node::ExprStmt(_) => "ExprStmt",
            Node::ReturnStmt(_) => "ReturnStmt",
            Node::BreakStmt(_) => "BreakStmt",
            Node::ContinueStmt(_) => "ContinueStmt",
            Node::WhileStmt(_) => "WhileStmt",
            Node::ForeachStmt(_) => "ForeachStmt",
            Node::IfStmt(_) => "IfStmt",
            Node::SwitchStmt(_) => "SwitchStmt",
            Node::CaseClause(_) => "CaseClause",
            Node::Ident(_) => "Ident",
            Node::BasicLit(_) => "BasicLit",
            Node::BinaryExpr(_) => "BinaryExpr",
            Node::CallExpr(_) => "CallExpr",
            Node::BasicTestExpr(_) => "BasicTestExpr",
            Node::ExtendedTestExpr(_) => "ExtendedTestExpr",
            Node::ArithEvalExpr(_) => "ArithEvalExpr",
            Node::CmdGroup(_) => "CmdGroup",
            Node::CmdSubst(_) => "CmdSubst",
            Node::ProcSubst(_) => "ProcSubst",
            Node::ArithExp(_) => "ArithExp",
            Node::ParamExp(_) => "ParamExp",
        }
    }

    /// Leaf kinds never own children and never receive `leave`.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Node::Comment(_)
                | Node::Ident(_)
                | Node::BasicLit(_)
                | Node::BreakStmt(_)
                | Node::ContinueStmt(_)
        )
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Assign(s) => Node::AssignStmt(s),
            Stmt::Block(s) => Node::BlockStmt(s),
            Stmt::Expr(s) => Node::ExprStmt(s),
            Stmt::Return(s) => Node::ReturnStmt(s),
            Stmt::Break(s) => Node::BreakStmt(s),
            Stmt::Continue(s) => Node::ContinueStmt(s),
            Stmt::While(s) => Node::WhileStmt(s),
            Stmt::Foreach(s) => Node::ForeachStmt(s),
            Stmt::If(s) => Node::IfStmt(s),
            Stmt::Switch(s) => Node::SwitchStmt(s),
        }
    }
}

impl<'a> From<&'a Decl> for Node<'a> {
    fn from(decl: &'a Decl) -> Self {
        match decl {
            Decl::Func(d) => Node::FuncDecl(d),
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Ident(x) => Node::Ident(x),
            Expr::BasicLit(x) => Node::BasicLit(x),
            Expr::Binary(x) => Node::BinaryExpr(x),
            Expr::Call(x) => Node::CallExpr(x),
            Expr::BasicTest(x) => Node::BasicTestExpr(x),
            Expr::ExtendedTest(x) => Node::ExtendedTestExpr(x),
            Expr::ArithEval(x) => Node::ArithEvalExpr(x),
            Expr::CmdGroup(x) => Node::CmdGroup(x),
            Expr::CmdSubst(x) => Node::CmdSubst(x),
            Expr::ProcSubst(x) => Node::ProcSubst(x),
            Expr::ArithExp(x) => Node::ArithExp(x),
            Expr::ParamExp(x) => Node::ParamExp(x),
        }
    }
}

impl<'a> From<&'a File> for Node<'a> {
    fn from(file: &'a File) -> Self {
        Node::File(file)
    }
}

impl<'a> From<&'a BlockStmt> for Node<'a> {
    fn from(block: &'a BlockStmt) -> Self {
        Node::BlockStmt(block)
    }
}

impl Spanned for Node<'_> {
    fn pos(&self) -> Pos {
        match self {
            Node::File(n) => n.pos(),
            Node::CommentGroup(n) => n.pos(),
            Node::Comment(n) => n.pos(),
            Node::FuncDecl(n) => n.pos(),
            Node::AssignStmt(n) => n.pos(),
            Node::BlockStmt(n) => n.pos(),
            Node::ExprStmt(n) => n.pos(),
            Node::ReturnStmt(n) => n.pos(),
            Node::BreakStmt(n) => n.pos(),
            Node::ContinueStmt(n) => n.pos(),
            Node::WhileStmt(n) => n.pos(),
            Node::ForeachStmt(n) => n.pos(),
            Node::IfStmt(n) => n.pos(),
            Node::SwitchStmt(n) => n.pos(),
            Node::CaseClause(n) => n.pos(),
            Node::Ident(n) => n.pos(),
            Node::BasicLit(n) => n.pos(),
            Node::BinaryExpr(n) => n.pos(),
            Node::CallExpr(n) => n.pos(),
            Node::BasicTestExpr(n) => n.pos(),
            Node::ExtendedTestExpr(n) => n.pos(),
            Node::ArithEvalExpr(n) => n.pos(),
            Node::CmdGroup(n) => n.pos(),
            Node::CmdSubst(n) => n.pos(),
            Node::ProcSubst(n) => n.pos(),
            Node::ArithExp(n) => n.pos(),
            Node::ParamExp(n) => n.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Node::File(n) => n.end(),
            Node::CommentGroup(n) => n.end(),
            Node::Comment(n) => n.end(),
            Node::FuncDecl(n) => n.end(),
            Node::AssignStmt(n) => n.end(),
            Node::BlockStmt(n) => n.end(),
            Node::ExprStmt(n) => n.end(),
            Node::ReturnStmt(n) => n.end(),
            Node::BreakStmt(n) => n.end(),
            Node::ContinueStmt(n) => n.end(),
            Node::WhileStmt(n) => n.end(),
            Node::ForeachStmt(n) => n.end(),
            Node::IfStmt(n) => n.end(),
            Node::SwitchStmt(n) => n.end(),
            Node::CaseClause(n) => n.end(),
            Node::Ident(n) => n.end(),
            Node::BasicLit(n) => n.end(),
            Node::BinaryExpr(n) => n.end(),
            Node::CallExpr(n) => n.end(),
            Node::BasicTestExpr(n) => n.end(),
            Node::ExtendedTestExpr(n) => n.end(),
            Node::ArithEvalExpr(n) => n.end(),
            Node::CmdGroup(n) => n.end(),
            Node::CmdSubst(n) => n.end(),
            Node::ProcSubst(n) => n.end(),
            Node::ArithExp(n) => n.end(),
            Node::ParamExp(n) => n.end(),
        }
    }
}

/// Result of visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Descend into children, then `leave` the node.
    #[default]
    Continue,
    /// Skip the children and the matching `leave`.
    SkipChildren,
}

pub trait Visitor<'a> {
    type Error;

    /// Called for every node before its children.
    fn visit(&mut self, node: Node<'a>) -> Result<VisitResult, Self::Error>;

    /// Called once after the children of a non-leaf node that was entered with
    /// [`VisitResult::Continue`].
    #[allow(unused_variables)]
    fn leave(&mut self, node: Node<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walks `node` and its descendants with `visitor`. Errors returned by the
/// visitor stop the walk and are returned unchanged.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: Node<'a>) -> Result<(), V::Error> {
    if visitor.visit(node)? == VisitResult::SkipChildren {
        return Ok(());
    }

    match node {
        Node::File(n) => {
            if let Some(doc) = &n.doc {
                walk(visitor, Node::CommentGroup(doc))?;
            }
            walk_list(visitor, &n.decls)?;
            walk_list(visitor, &n.stmts)?;
        }
        Node::CommentGroup(n) => {
            for c in &n.list {
                walk(visitor, Node::Comment(c))?;
            }
        }
        Node::FuncDecl(n) => {
            walk(visitor, Node::Ident(&n.name))?;
            walk_list(visitor, &n.recv)?;
            walk(visitor, Node::BlockStmt(&n.body))?;
        }
        Node::AssignStmt(n) => {
            walk(visitor, Node::from(&n.lhs))?;
            walk(visitor, Node::from(&n.rhs))?;
        }
        Node::BlockStmt(n) => walk_list(visitor, &n.list)?,
        Node::ExprStmt(n) => walk(visitor, Node::from(&n.x))?,
        Node::ReturnStmt(n) => {
            if let Some(x) = &n.x {
                walk(visitor, Node::from(x))?;
            }
        }
        Node::WhileStmt(n) => {
            walk(visitor, Node::from(&n.cond))?;
            walk(visitor, Node::BlockStmt(&n.body))?;
        }
        Node::ForeachStmt(n) => {
            walk(visitor, Node::from(&n.elem))?;
            walk_list(visitor, &n.group)?;
            walk(visitor, Node::BlockStmt(&n.body))?;
        }
        Node::IfStmt(n) => {
            walk(visitor, Node::from(&n.cond))?;
            walk(visitor, Node::BlockStmt(&n.body))?;
            for elif in &n.elifs {
                walk(visitor, Node::IfStmt(elif))?;
            }
            if let Some(block) = &n.else_block {
                walk(visitor, Node::BlockStmt(block))?;
            }
        }
        Node::SwitchStmt(n) => {
            walk(visitor, Node::from(&n.var))?;
            for case in &n.cases {
                walk(visitor, Node::CaseClause(case))?;
            }
            if let Some(block) = &n.else_block {
                walk(visitor, Node::BlockStmt(block))?;
            }
        }
        Node::CaseClause(n) => {
            walk_list(visitor, &n.conds)?;
            walk(visitor, Node::BlockStmt(&n.body))?;
        }
        Node::BinaryExpr(n) => {
            walk(visitor, Node::from(n.x.as_ref()))?;
            walk(visitor, Node::from(n.y.as_ref()))?;
        }
        Node::CallExpr(n) => {
            walk(visitor, Node::Ident(&n.func))?;
            walk_list(visitor, &n.recv)?;
        }
        Node::BasicTestExpr(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::ExtendedTestExpr(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::ArithEvalExpr(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::CmdGroup(n) => walk_list(visitor, &n.list)?,
        Node::CmdSubst(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::ProcSubst(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::ArithExp(n) => walk(visitor, Node::from(n.x.as_ref()))?,
        Node::ParamExp(n) => {
            walk(visitor, Node::from(n.var.as_ref()))?;
            if let Some(val) = n.modifier.as_ref().and_then(ParamModifier::operand) {
                walk(visitor, Node::from(val))?;
            }
        }
        Node::Comment(_)
        | Node::Ident(_)
        | Node::BasicLit(_)
        | Node::BreakStmt(_)
        | Node::ContinueStmt(_) => return Ok(()),
    }

    visitor.leave(node)
}

fn walk_list<'a, V, T>(visitor: &mut V, list: &'a [T]) -> Result<(), V::Error>
where
    V: Visitor<'a> + ?Sized,
    &'a T: Into<Node<'a>>,
{
    for item in list {
        walk(visitor, item.into())?;
    }
    Ok(())
}

impl ParamModifier {
    /// The expression operand carried by the modifier, if any.
    pub fn operand(&self) -> Option<&Expr> {
        match self {
            ParamModifier::DefaultVal(m) => Some(m.val.as_ref()),
            ParamModifier::DefaultValAssign(m) => Some(m.val.as_ref()),
            ParamModifier::NonNullCheck(m) => Some(m.val.as_ref()),
            ParamModifier::NonNull(m) => Some(m.val.as_ref()),
            ParamModifier::DelPrefix(m) => Some(m.val.as_ref()),
            ParamModifier::DelSuffix(m) => Some(m.val.as_ref()),
            ParamModifier::Prefix(_)
            | ParamModifier::PrefixArray(_)
            | ParamModifier::ArrayIndex(_)
            | ParamModifier::Length(_)
            | ParamModifier::Substring(_)
            | ParamModifier::Replace(_)
            | ParamModifier::ReplacePrefix(_)
            | ParamModifier::ReplaceSuffix(_)
            | ParamModifier::CaseConversion(_)
            | ParamModifier::Operator(_) => None,
        }
    }
}

struct Inspector<F>(F);

impl<'a, F> Visitor<'a> for Inspector<F>
where
    F: FnMut(Node<'a>) -> bool,
{
    type Error = Infallible;

    fn visit(&mut self, node: Node<'a>) -> Result<VisitResult, Infallible> {
        Ok(if (self.0)(node) {
            VisitResult::Continue
        } else {
            VisitResult::SkipChildren
        })
    }
}

/// Calls `f` for every node in source order; returning `false` prunes the
/// node's children.
pub fn inspect<'a, F>(node: impl Into<Node<'a>>, f: F)
where
    F: FnMut(Node<'a>) -> bool,
{
    let mut inspector = Inspector(f);
    match walk(&mut inspector, node.into()) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
