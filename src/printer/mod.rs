//! Renders a syntax tree back into shell source.
//!
//! Statements are driven through [`walk`]: the printer handles each statement
//! itself and returns [`VisitResult::SkipChildren`], recursing into bodies with
//! its own indentation. Statement headers come from the `inline` module, which
//! also renders whole statements onto one line for `{ ...; }` groups;
//! expressions go through the pure [`expr_str`] renderer.

pub mod expr;
mod inline;

pub use expr::{expr_list_str, expr_str};

use crate::ast::nodes::*;
use crate::ast::walk::{walk, Node, VisitResult, Visitor};
use crate::config::PrintConfig;
use crate::error::RenderError;
use crate::token::Token;
use log::{debug, trace};
use std::io::Write;

type Result<T> = std::result::Result<T, RenderError>;

/// Writes `node` to `output` with the default configuration.
pub fn print<'a, W: Write>(node: impl Into<Node<'a>>, output: &mut W) -> Result<()> {
    print_with(node, output, &PrintConfig::default())
}

pub fn print_with<'a, W: Write>(
    node: impl Into<Node<'a>>,
    output: &mut W,
    config: &PrintConfig,
) -> Result<()> {
    let node = node.into();
    debug!("printing {} node", node.kind());
    let mut printer = Printer::new(output, config);
    walk(&mut printer, node)?;
    printer.output.flush()?;
    Ok(())
}

/// Renders `node` into a string with the default configuration.
pub fn to_string<'a>(node: impl Into<Node<'a>>) -> Result<String> {
    to_string_with(node, &PrintConfig::default())
}

pub fn to_string_with<'a>(node: impl Into<Node<'a>>, config: &PrintConfig) -> Result<String> {
    let mut buf = Vec::new();
    print_with(node, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

/// Statement renderer. One printer serves one traversal; its indentation
/// never outlives the call that created it.
pub struct Printer<'c, W: Write> {
    output: W,
    indent: String,
    config: &'c PrintConfig,
}

impl<'c, W: Write> Printer<'c, W> {
    pub fn new(output: W, config: &'c PrintConfig) -> Self {
        Printer {
            output,
            indent: String::new(),
            config,
        }
    }

    /// Writes one line: the indentation, then the non-empty `parts` separated
    /// by single spaces.
    fn line(&mut self, parts: &[&str]) -> Result<()> {
        self.write_line(&inline::words(parts))
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            writeln!(self.output)?;
        } else {
            writeln!(self.output, "{}{}", self.indent, text)?;
        }
        Ok(())
    }

    /// Runs `f` one indentation level deeper. The previous prefix is restored
    /// whether or not `f` succeeds.
    fn indented<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mark = self.indent.len();
        self.indent.push_str(&self.config.indent);
        let result = f(self);
        self.indent.truncate(mark);
        result
    }

    fn block(&mut self, stmts: &[Stmt]) -> Result<()> {
        for stmt in stmts {
            walk(self, Node::from(stmt))?;
        }
        Ok(())
    }

    fn nested_block(&mut self, stmts: &[Stmt]) -> Result<()> {
        self.indented(|p| p.block(stmts))
    }

    fn comments(&mut self, group: &CommentGroup) -> Result<()> {
        for comment in &group.list {
            self.write_line(&comment.text)?;
        }
        Ok(())
    }

    fn func_decl(&mut self, d: &FuncDecl) -> Result<()> {
        self.write_line(&inline::func_header(d)?)?;
        self.nested_block(&d.body.list)?;
        self.line(&[Token::End.as_str()])
    }

    fn block_stmt(&mut self, b: &BlockStmt) -> Result<()> {
        if b.tok == Token::LBrace {
            self.line(&[Token::LBrace.as_str()])?;
            self.nested_block(&b.list)?;
            self.line(&[Token::RBrace.as_str()])
        } else {
            self.block(&b.list)
        }
    }

    fn while_stmt(&mut self, s: &WhileStmt) -> Result<()> {
        self.write_line(&inline::while_header(s)?)?;
        self.nested_block(&s.body.list)?;
        self.line(&[Token::End.as_str()])
    }

    fn foreach_stmt(&mut self, s: &ForeachStmt) -> Result<()> {
        self.write_line(&inline::foreach_header(s)?)?;
        self.nested_block(&s.body.list)?;
        self.line(&[Token::End.as_str()])
    }

    fn if_stmt(&mut self, s: &IfStmt) -> Result<()> {
        self.write_line(&inline::if_header(s)?)?;
        self.nested_block(&s.body.list)?;

        for elif in &s.elifs {
            self.write_line(&inline::else_if_header(elif)?)?;
            self.nested_block(&elif.body.list)?;
        }

        if let Some(else_block) = &s.else_block {
            self.line(&[Token::Else.as_str()])?;
            self.nested_block(&else_block.list)?;
        }

        self.line(&[Token::End.as_str()])
    }

    fn switch_stmt(&mut self, s: &SwitchStmt) -> Result<()> {
        self.write_line(&inline::switch_header(s)?)?;

        self.indented(|p| {
            for case in &s.cases {
                p.case_clause(case)?;
            }
            if let Some(else_block) = &s.else_block {
                let header = inline::default_case_header(&p.config.default_case);
                p.write_line(&header)?;
                p.nested_block(&else_block.list)?;
            }
            Ok(())
        })?;

        self.line(&[Token::End.as_str()])
    }

    fn case_clause(&mut self, c: &CaseClause) -> Result<()> {
        self.write_line(&inline::case_header(c)?)?;
        self.nested_block(&c.body.list)
    }
}

impl<'a, 'c, W: Write> Visitor<'a> for Printer<'c, W> {
    type Error = RenderError;

    fn visit(&mut self, node: Node<'a>) -> Result<VisitResult> {
        trace!("render {}", node.kind());
        match node {
            Node::File(f) => {
                if let Some(doc) = &f.doc {
                    self.comments(doc)?;
                }
                for decl in &f.decls {
                    walk(self, Node::from(decl))?;
                }
                self.block(&f.stmts)?;
            }
            Node::CommentGroup(g) => self.comments(g)?,
            Node::Comment(c) => self.write_line(&c.text)?,
            Node::FuncDecl(d) => self.func_decl(d)?,
            Node::AssignStmt(s) => self.write_line(&inline::assign_str(s)?)?,
            Node::BlockStmt(b) => self.block_stmt(b)?,
            Node::ExprStmt(s) => {
                let x = expr_str(&s.x)?;
                self.line(&[x.as_str()])?;
            }
            Node::ReturnStmt(s) => self.write_line(&inline::return_str(s)?)?,
            Node::BreakStmt(_) => self.line(&[Token::Break.as_str()])?,
            Node::ContinueStmt(_) => self.line(&[Token::Continue.as_str()])?,
            Node::WhileStmt(s) => self.while_stmt(s)?,
            Node::ForeachStmt(s) => self.foreach_stmt(s)?,
            Node::IfStmt(s) => self.if_stmt(s)?,
            Node::SwitchStmt(s) => self.switch_stmt(s)?,
            Node::CaseClause(c) => self.case_clause(c)?,
            other => {
                if let Some(text) = expr::node_str(other) {
                    let text = text?;
                    self.line(&[text.as_str()])?;
                }
            }
        }
        Ok(VisitResult::SkipChildren)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Pos;
    use std::io;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_indentation_restored_after_error() {
        let config = PrintConfig::default();
        let mut buf = Vec::new();
        let mut printer = Printer::new(&mut buf, &config);
        let bad = vec![Stmt::expr(Expr::Ident(Ident::at("", Pos(1))))];
        assert!(printer.nested_block(&bad).is_err());
        assert!(printer.indent.is_empty());
    }

    #[test]
    fn test_sink_failure_propagates() {
        let stmt = Stmt::expr(Expr::call("echo", vec![]));
        let err = print(&stmt, &mut FailingSink).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_local_assignment_is_compressed() {
        let stmt = Stmt::Assign(AssignStmt {
            local: true,
            lhs: Expr::ident("count"),
            assign: Pos::NONE,
            rhs: Expr::lit(crate::token::LitKind::Integer, "0"),
        });
        assert_eq!(to_string(&stmt).unwrap(), "local count=0\n");
    }
}
