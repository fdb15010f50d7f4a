//! Start and end positions for every node.
//!
//! `pos()` is the first offset belonging to a node and `end()` the offset
//! immediately after it. Positions are counted in the same unit as text
//! length, so a leaf ends at `pos + len(text)`. Nodes whose span cannot be
//! computed report [`Pos::NONE`] for both ends.

use super::nodes::*;
use crate::token::{Pos, Token};

pub trait Spanned {
    fn pos(&self) -> Pos;
    fn end(&self) -> Pos;
}

fn first_pos<T: Spanned>(list: &[T]) -> Pos {
    list.first().map(Spanned::pos).unwrap_or(Pos::NONE)
}

fn last_end<T: Spanned>(list: &[T]) -> Pos {
    list.last().map(Spanned::end).unwrap_or(Pos::NONE)
}

impl Spanned for File {
    fn pos(&self) -> Pos {
        self.doc
            .as_ref()
            .map(Spanned::pos)
            .unwrap_or(Pos::NONE)
            .or(first_pos(&self.decls))
            .or(first_pos(&self.stmts))
    }

    fn end(&self) -> Pos {
        last_end(&self.stmts)
            .or(last_end(&self.decls))
            .or(self.doc.as_ref().map(Spanned::end).unwrap_or(Pos::NONE))
    }
}

impl Spanned for Comment {
    fn pos(&self) -> Pos {
        self.hash
    }

    fn end(&self) -> Pos {
        self.hash.offset(self.text.len())
    }
}

impl Spanned for CommentGroup {
    fn pos(&self) -> Pos {
        first_pos(&self.list)
    }

    fn end(&self) -> Pos {
        last_end(&self.list)
    }
}

impl Spanned for Decl {
    fn pos(&self) -> Pos {
        match self {
            Decl::Func(d) => d.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Decl::Func(d) => d.end(),
        }
    }
}

impl Spanned for FuncDecl {
    fn pos(&self) -> Pos {
        self.function.or(self.name.pos())
    }

    fn end(&self) -> Pos {
        self.end_pos
            .after(Token::End)
            .or(self.body.end())
            .or(last_end(&self.recv))
            .or(self.name.end())
            .or(self.function.after(Token::Function))
    }
}

impl Spanned for Stmt {
    fn pos(&self) -> Pos {
        match self {
            Stmt::Assign(s) => s.pos(),
            Stmt::Block(s) => s.pos(),
            Stmt::Expr(s) => s.pos(),
            Stmt::Return(s) => s.pos(),
            Stmt::Break(s) => s.pos(),
            Stmt::Continue(s) => s.pos(),
            Stmt::While(s) => s.pos(),
            Stmt::Foreach(s) => s.pos(),
            Stmt::If(s) => s.pos(),
            Stmt::Switch(s) => s.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Stmt::Assign(s) => s.end(),
            Stmt::Block(s) => s.end(),
            Stmt::Expr(s) => s.end(),
            Stmt::Return(s) => s.end(),
            Stmt::Break(s) => s.end(),
            Stmt::Continue(s) => s.end(),
            Stmt::While(s) => s.end(),
            Stmt::Foreach(s) => s.end(),
            Stmt::If(s) => s.end(),
            Stmt::Switch(s) => s.end(),
        }
    }
}

impl Spanned for AssignStmt {
    fn pos(&self) -> Pos {
        self.lhs.pos()
    }

    fn end(&self) -> Pos {
        self.rhs.end().or(self.assign.after(Token::Assign)).or(self.lhs.end())
    }
}

impl Spanned for BlockStmt {
    fn pos(&self) -> Pos {
        self.opening.or(first_pos(&self.list))
    }

    fn end(&self) -> Pos {
        self.closing
            .after(Token::RBrace)
            .or(last_end(&self.list))
            .or(self.opening.after(Token::LBrace))
    }
}

impl Spanned for ExprStmt {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        self.x.end()
    }
}

impl Spanned for ReturnStmt {
    fn pos(&self) -> Pos {
        self.ret
    }

    fn end(&self) -> Pos {
        match &self.x {
            Some(x) => x.end().or(self.ret.after(Token::Return)),
            None => self.ret.after(Token::Return),
        }
    }
}

impl Spanned for BreakStmt {
    fn pos(&self) -> Pos {
        self.brk
    }

    fn end(&self) -> Pos {
        self.brk.after(Token::Break)
    }
}

impl Spanned for ContinueStmt {
    fn pos(&self) -> Pos {
        self.cont
    }

    fn end(&self) -> Pos {
        self.cont.after(Token::Continue)
    }
}

impl Spanned for WhileStmt {
    fn pos(&self) -> Pos {
        self.while_pos
    }

    fn end(&self) -> Pos {
        self.end_pos
            .after(Token::End)
            .or(self.body.end())
            .or(self.cond.end())
            .or(self.while_pos.after(Token::While))
    }
}

impl Spanned for ForeachStmt {
    fn pos(&self) -> Pos {
        self.for_pos
    }

    fn end(&self) -> Pos {
        self.end_pos
            .after(Token::End)
            .or(self.body.end())
            .or(last_end(&self.group))
            .or(self.in_pos.after(Token::In))
            .or(self.elem.end())
            .or(self.for_pos.after(Token::For))
    }
}

impl Spanned for IfStmt {
    fn pos(&self) -> Pos {
        self.if_pos
    }

    fn end(&self) -> Pos {
        let inner = self
            .else_block
            .as_ref()
            .map(Spanned::end)
            .unwrap_or(Pos::NONE)
            .or(last_end(&self.elifs))
            .or(self.body.end())
            .or(self.cond.end())
            .or(self.if_pos.after(Token::If));
        self.end_pos.after(Token::End).or(inner)
    }
}

impl Spanned for SwitchStmt {
    fn pos(&self) -> Pos {
        self.switch
    }

    fn end(&self) -> Pos {
        let inner = self
            .else_block
            .as_ref()
            .map(Spanned::end)
            .unwrap_or(Pos::NONE)
            .or(last_end(&self.cases))
            .or(self.rparen.after(Token::RParen))
            .or(self.var.end())
            .or(self.switch.after(Token::Switch));
        self.end_pos.after(Token::End).or(inner)
    }
}

impl Spanned for CaseClause {
    fn pos(&self) -> Pos {
        self.case.or(first_pos(&self.conds))
    }

    fn end(&self) -> Pos {
        self.body
            .end()
            .or(last_end(&self.conds))
            .or(self.case.after(Token::Case))
    }
}

impl Spanned for Expr {
    fn pos(&self) -> Pos {
        match self {
            Expr::Ident(x) => x.pos(),
            Expr::BasicLit(x) => x.pos(),
            Expr::Binary(x) => x.pos(),
            Expr::Call(x) => x.pos(),
            Expr::BasicTest(x) => x.pos(),
            Expr::ExtendedTest(x) => x.pos(),
            Expr::ArithEval(x) => x.pos(),
            Expr::CmdGroup(x) => x.pos(),
            Expr::CmdSubst(x) => x.pos(),
            Expr::ProcSubst(x) => x.pos(),
            Expr::ArithExp(x) => x.pos(),
            Expr::ParamExp(x) => x.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Expr::Ident(x) => x.end(),
            Expr::BasicLit(x) => x.end(),
            Expr::Binary(x) => x.end(),
            Expr::Call(x) => x.end(),
            Expr::BasicTest(x) => x.end(),
            Expr::ExtendedTest(x) => x.end(),
            Expr::ArithEval(x) => x.end(),
            Expr::CmdGroup(x) => x.end(),
            Expr::CmdSubst(x) => x.end(),
            Expr::ProcSubst(x) => x.end(),
            Expr::ArithExp(x) => x.end(),
            Expr::ParamExp(x) => x.end(),
        }
    }
}

impl Spanned for Ident {
    fn pos(&self) -> Pos {
        self.name_pos
    }

    fn end(&self) -> Pos {
        self.name_pos.offset(self.name.len())
    }
}

impl Spanned for BasicLit {
    fn pos(&self) -> Pos {
        self.value_pos
    }

    fn end(&self) -> Pos {
        self.value_pos.offset(self.value.len())
    }
}

impl Spanned for BinaryExpr {
    fn pos(&self) -> Pos {
        self.x.pos().or(self.op_pos)
    }

    fn end(&self) -> Pos {
        self.y.end().or(self.op_pos.after(self.op)).or(self.x.end())
    }
}

impl Spanned for CallExpr {
    fn pos(&self) -> Pos {
        self.func.pos()
    }

    fn end(&self) -> Pos {
        last_end(&self.recv).or(self.func.end())
    }
}

impl Spanned for BasicTestExpr {
    fn pos(&self) -> Pos {
        self.lbrack
    }

    fn end(&self) -> Pos {
        self.rbrack
            .after(Token::RBracket)
            .or(self.x.end())
            .or(self.lbrack.after(Token::LBracket))
    }
}

impl Spanned for ExtendedTestExpr {
    fn pos(&self) -> Pos {
        self.lbrack
    }

    fn end(&self) -> Pos {
        self.rbrack
            .after(Token::DoubleRBracket)
            .or(self.x.end())
            .or(self.lbrack.after(Token::DoubleLBracket))
    }
}

impl Spanned for ArithEvalExpr {
    fn pos(&self) -> Pos {
        self.lparen
    }

    fn end(&self) -> Pos {
        self.rparen
            .after(Token::DoubleRParen)
            .or(self.x.end())
            .or(self.lparen.after(Token::DoubleLParen))
    }
}

impl Spanned for CmdGroup {
    fn pos(&self) -> Pos {
        self.lbrace.or(first_pos(&self.list))
    }

    fn end(&self) -> Pos {
        self.rbrace
            .after(Token::RBrace)
            .or(last_end(&self.list))
            .or(self.lbrace.after(Token::LBrace))
    }
}

impl Spanned for CmdSubst {
    fn pos(&self) -> Pos {
        self.dollar.or(self.opening)
    }

    fn end(&self) -> Pos {
        let closer = if self.tok == Token::LParen {
            Token::RParen
        } else {
            Token::BackQuote
        };
        self.closing
            .after(closer)
            .or(self.x.end())
            .or(self.opening.after(self.tok))
            .or(self.dollar.after(Token::Dollar))
    }
}

impl Spanned for ProcSubst {
    fn pos(&self) -> Pos {
        self.tok_pos
    }

    fn end(&self) -> Pos {
        self.rparen
            .after(Token::RParen)
            .or(self.x.end())
            .or(self.lparen.after(Token::LParen))
            .or(self.tok_pos.after(self.tok))
    }
}

impl Spanned for ArithExp {
    fn pos(&self) -> Pos {
        self.dollar
    }

    fn end(&self) -> Pos {
        self.rparen
            .after(Token::DoubleRParen)
            .or(self.x.end())
            .or(self.lparen.after(Token::DoubleLParen))
            .or(self.dollar.after(Token::Dollar))
    }
}

impl Spanned for ParamExp {
    fn pos(&self) -> Pos {
        self.dollar
    }

    fn end(&self) -> Pos {
        let operand = self
            .modifier
            .as_ref()
            .and_then(ParamModifier::operand)
            .map(Spanned::end)
            .unwrap_or(Pos::NONE);
        self.rbrace
            .after(Token::RBrace)
            .or(operand)
            .or(self.var.end())
            .or(self.lbrace.after(Token::LBrace))
            .or(self.dollar.after(Token::Dollar))
    }
}
