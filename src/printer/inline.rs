//! Statement headers and the one-line statement form used inside `{ ...; }`.
//!
//! The line printer and the inline form build every header here, so a
//! statement reads the same whether it gets its own line or shares one.

use super::expr::{expr_list_str, expr_str, ident_str};
use crate::ast::nodes::*;
use crate::config::DEFAULT_CASE;
use crate::error::RenderError;
use crate::token::Token;

type Result<T> = std::result::Result<T, RenderError>;

/// Joins the non-empty `parts` with single spaces.
pub(crate) fn words(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn func_header(d: &FuncDecl) -> Result<String> {
    let name = ident_str(&d.name)?;
    let recv = expr_list_str(&d.recv)?;
    Ok(words(&[Token::Function.as_str(), name.as_str(), recv.as_str()]))
}

pub(crate) fn assign_str(s: &AssignStmt) -> Result<String> {
    let lhs = expr_str(&s.lhs)?;
    let rhs = expr_str(&s.rhs)?;
    let binding = format!("{}{}{}", lhs, Token::Assign, rhs);
    if s.local {
        Ok(words(&[Token::Local.as_str(), binding.as_str()]))
    } else {
        Ok(binding)
    }
}

pub(crate) fn return_str(s: &ReturnStmt) -> Result<String> {
    let value = match &s.x {
        Some(x) => expr_str(x)?,
        None => String::new(),
    };
    Ok(words(&[Token::Return.as_str(), value.as_str()]))
}

pub(crate) fn while_header(s: &WhileStmt) -> Result<String> {
    Ok(words(&[Token::While.as_str(), expr_str(&s.cond)?.as_str()]))
}

pub(crate) fn foreach_header(s: &ForeachStmt) -> Result<String> {
    let elem = expr_str(&s.elem)?;
    let group = expr_list_str(&s.group)?;
    Ok(words(&[Token::For.as_str(), elem.as_str(), Token::In.as_str(), group.as_str()]))
}

pub(crate) fn if_header(s: &IfStmt) -> Result<String> {
    Ok(words(&[Token::If.as_str(), expr_str(&s.cond)?.as_str()]))
}

/// `else if <cond>`. The clause may only carry a condition and a body.
pub(crate) fn else_if_header(elif: &IfStmt) -> Result<String> {
    if !elif.elifs.is_empty() || elif.else_block.is_some() {
        return Err(RenderError::MalformedElseIf { pos: elif.if_pos });
    }
    Ok(words(&[
        Token::Else.as_str(),
        Token::If.as_str(),
        expr_str(&elif.cond)?.as_str(),
    ]))
}

pub(crate) fn switch_header(s: &SwitchStmt) -> Result<String> {
    let var = expr_str(&s.var)?;
    if s.lparen.is_valid() {
        let paren = format!("{}{}{}", Token::LParen, var, Token::RParen);
        Ok(words(&[Token::Switch.as_str(), paren.as_str()]))
    } else {
        Ok(words(&[Token::Switch.as_str(), var.as_str()]))
    }
}

pub(crate) fn case_header(c: &CaseClause) -> Result<String> {
    Ok(words(&[Token::Case.as_str(), expr_list_str(&c.conds)?.as_str()]))
}

pub(crate) fn default_case_header(pattern: &str) -> String {
    words(&[Token::Case.as_str(), pattern])
}

/// `{ s1; s2; }`, or `{ }` when nothing is inside.
pub(crate) fn group_str(list: &[Stmt]) -> Result<String> {
    let mut parts = Vec::new();
    for stmt in list {
        stmt_parts(stmt, &mut parts)?;
    }
    if parts.is_empty() {
        return Ok(format!("{} {}", Token::LBrace, Token::RBrace));
    }
    let sep = format!("{} ", Token::Semi);
    Ok(format!(
        "{} {}{} {}",
        Token::LBrace,
        parts.join(&sep),
        Token::Semi,
        Token::RBrace
    ))
}

fn body_parts(list: &[Stmt], out: &mut Vec<String>) -> Result<()> {
    for stmt in list {
        stmt_parts(stmt, out)?;
    }
    Ok(())
}

/// Appends the `;`-separated pieces of `stmt`. A piece never starts with an
/// opening brace followed by a separator: braced blocks become one nested
/// group piece.
fn stmt_parts(stmt: &Stmt, out: &mut Vec<String>) -> Result<()> {
    match stmt {
        Stmt::Assign(s) => out.push(assign_str(s)?),
        Stmt::Block(b) if b.tok == Token::LBrace => out.push(group_str(&b.list)?),
        Stmt::Block(b) => body_parts(&b.list, out)?,
        Stmt::Expr(s) => out.push(expr_str(&s.x)?),
        Stmt::Return(s) => out.push(return_str(s)?),
        Stmt::Break(_) => out.push(Token::Break.to_string()),
        Stmt::Continue(_) => out.push(Token::Continue.to_string()),
        Stmt::While(s) => {
            out.push(while_header(s)?);
            body_parts(&s.body.list, out)?;
            out.push(Token::End.to_string());
        }
        Stmt::Foreach(s) => {
            out.push(foreach_header(s)?);
            body_parts(&s.body.list, out)?;
            out.push(Token::End.to_string());
        }
        Stmt::If(s) => {
            out.push(if_header(s)?);
            body_parts(&s.body.list, out)?;
            for elif in &s.elifs {
                out.push(else_if_header(elif)?);
                body_parts(&elif.body.list, out)?;
            }
            if let Some(else_block) = &s.else_block {
                out.push(Token::Else.to_string());
                body_parts(&else_block.list, out)?;
            }
            out.push(Token::End.to_string());
        }
        Stmt::Switch(s) => {
            out.push(switch_header(s)?);
            for case in &s.cases {
                out.push(case_header(case)?);
                body_parts(&case.body.list, out)?;
            }
            if let Some(else_block) = &s.else_block {
                out.push(default_case_header(DEFAULT_CASE));
                body_parts(&else_block.list, out)?;
            }
            out.push(Token::End.to_string());
        }
    }
    Ok(())
}
