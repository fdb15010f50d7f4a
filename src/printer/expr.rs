//! Pure expression rendering.
//!
//! Every function here maps a node to the same text every time and has no side
//! effects, so statement headers and nested sub-expressions share one
//! implementation.

use super::inline;
use crate::ast::nodes::*;
use crate::ast::walk::Node;
use crate::error::RenderError;
use crate::token::{LitKind, Token};

type Result<T> = std::result::Result<T, RenderError>;

/// Generates [`expr_str`] and `node_str` from one table of per-type
/// renderers, so both entry points always agree.
macro_rules! expr_renderers {
    ($( $variant:ident / $node:ident => $render:path ),* $(,)?) => {
        /// Renders an expression as shell text.
        pub fn expr_str(e: &Expr) -> Result<String> {
            match e {
                $( Expr::$variant(x) => $render(x), )*
            }
        }

        /// Renders an expression node reached through the walker. Returns
        /// `None` for statements, declarations and other non-expression nodes.
        pub(crate) fn node_str(node: Node<'_>) -> Option<Result<String>> {
            match node {
                $( Node::$node(x) => Some($render(x)), )*
                _ => None,
            }
        }
    };
}

expr_renderers! {
    Ident / Ident => ident_str,
    BasicLit / BasicLit => lit_str,
    Binary / BinaryExpr => binary_str,
    Call / CallExpr => call_str,
    BasicTest / BasicTestExpr => basic_test_str,
    ExtendedTest / ExtendedTestExpr => extended_test_str,
    ArithEval / ArithEvalExpr => arith_eval_str,
    CmdGroup / CmdGroup => cmd_group_str,
    CmdSubst / CmdSubst => cmd_subst_str,
    ProcSubst / ProcSubst => proc_subst_str,
    ArithExp / ArithExp => arith_exp_str,
    ParamExp / ParamExp => param_exp_str,
}

/// Renders a list of expressions separated by single spaces.
pub fn expr_list_str(list: &[Expr]) -> Result<String> {
    let parts = list.iter().map(expr_str).collect::<Result<Vec<_>>>()?;
    Ok(parts.join(" "))
}

pub(crate) fn ident_str(x: &Ident) -> Result<String> {
    if x.name.is_empty() {
        return Err(RenderError::EmptyIdent { pos: x.name_pos });
    }
    Ok(x.name.clone())
}

fn lit_str(x: &BasicLit) -> Result<String> {
    if x.kind == LitKind::String {
        Ok(format!("{q}{}{q}", x.value, q = Token::DoubleQuote))
    } else {
        Ok(x.value.clone())
    }
}

fn binary_str(b: &BinaryExpr) -> Result<String> {
    if !b.op.is_binary_op() {
        return Err(RenderError::InvalidOperator { op: b.op });
    }
    let x = expr_str(&b.x)?;
    let y = expr_str(&b.y)?;
    Ok(match (b.op, b.compress) {
        (Token::None, true) => format!("{}{}", x, y),
        (Token::None, false) => format!("{} {}", x, y),
        (op, true) => format!("{}{}{}", x, op, y),
        (op, false) => format!("{} {} {}", x, op, y),
    })
}

fn call_str(c: &CallExpr) -> Result<String> {
    let func = ident_str(&c.func)?;
    if c.recv.is_empty() {
        return Ok(func);
    }
    Ok(format!("{} {}", func, expr_list_str(&c.recv)?))
}

fn delimited(open: Token, x: &Expr, close: Token) -> Result<String> {
    Ok(format!("{} {} {}", open, expr_str(x)?, close))
}

fn basic_test_str(t: &BasicTestExpr) -> Result<String> {
    delimited(Token::LBracket, &t.x, Token::RBracket)
}

fn extended_test_str(t: &ExtendedTestExpr) -> Result<String> {
    delimited(Token::DoubleLBracket, &t.x, Token::DoubleRBracket)
}

fn arith_eval_str(a: &ArithEvalExpr) -> Result<String> {
    delimited(Token::DoubleLParen, &a.x, Token::DoubleRParen)
}

fn cmd_subst_str(c: &CmdSubst) -> Result<String> {
    let x = expr_str(&c.x)?;
    if c.tok == Token::LParen {
        Ok(format!("{}{} {} {}", Token::Dollar, Token::LParen, x, Token::RParen))
    } else {
        Ok(format!("{q} {} {q}", x, q = Token::BackQuote))
    }
}

fn proc_subst_str(p: &ProcSubst) -> Result<String> {
    let dir = if p.tok == Token::Lt { Token::Lt } else { Token::Gt };
    Ok(format!("{}{} {} {}", dir, Token::LParen, expr_str(&p.x)?, Token::RParen))
}

fn arith_exp_str(a: &ArithExp) -> Result<String> {
    Ok(format!(
        "{}{} {} {}",
        Token::Dollar,
        Token::DoubleLParen,
        expr_str(&a.x)?,
        Token::DoubleRParen
    ))
}

/// `{ a; b; }`. Compound statements collapse onto one line with `;`.
fn cmd_group_str(g: &CmdGroup) -> Result<String> {
    inline::group_str(&g.list)
}

/// Operand words inside `${...}` are not field-split, so literals keep their
/// raw value instead of gaining quotes.
fn word_str(e: &Expr) -> Result<String> {
    match e {
        Expr::BasicLit(lit) => Ok(escape_braces(&lit.value)),
        Expr::Ident(id) => Ok(escape_braces(&ident_str(id)?)),
        other => expr_str(other),
    }
}

/// Backslash-escapes every `}` without a matching `{` before it, so raw text
/// cannot close the enclosing `${...}`. Already escaped characters are kept.
fn escape_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '{' => {
                depth += 1;
                out.push(c);
            }
            '}' if depth > 0 => {
                depth -= 1;
                out.push(c);
            }
            '}' => out.push_str("\\}"),
            _ => out.push(c),
        }
    }
    out
}

/// Backslash-escapes a leading `ch` so the word cannot be read as part of the
/// preceding operator.
fn escape_leading(word: String, ch: char) -> String {
    if word.starts_with(ch) {
        format!("\\{}", word)
    } else {
        word
    }
}

/// Escapes `/` and unbalanced `}` in a replacement pattern.
fn escape_pattern(pattern: &str) -> String {
    escape_braces(pattern).replace('/', "\\/")
}

fn spell(toks: &[Token]) -> String {
    toks.iter().map(|t| t.as_str()).collect()
}

fn param_exp_str(p: &ParamExp) -> Result<String> {
    let var = expr_str(&p.var)?;
    let modifier = match &p.modifier {
        Some(m) => m,
        None => return Ok(braced(&var)),
    };

    let body = match modifier {
        ParamModifier::DefaultVal(m) => {
            format!("{}{}{}", var, spell(&[Token::Colon, Token::Sub]), word_str(&m.val)?)
        }
        ParamModifier::DefaultValAssign(m) => {
            format!("{}{}{}", var, spell(&[Token::Colon, Token::Assign]), word_str(&m.val)?)
        }
        ParamModifier::NonNullCheck(m) => {
            format!("{}{}{}", var, spell(&[Token::Colon, Token::Quest]), word_str(&m.val)?)
        }
        ParamModifier::NonNull(m) => {
            format!("{}{}{}", var, spell(&[Token::Colon, Token::Add]), word_str(&m.val)?)
        }
        ParamModifier::Prefix(_) => format!("{}{}{}", Token::BitNot, var, Token::Mul),
        ParamModifier::PrefixArray(_) => format!("{}{}{}", Token::BitNot, var, Token::At),
        ParamModifier::ArrayIndex(m) => {
            let selector = match m.tok {
                Token::At | Token::Mul => m.tok,
                tok => return Err(RenderError::InvalidArraySelector { tok }),
            };
            format!(
                "{}{}{}{}{}",
                Token::BitNot,
                var,
                Token::LBracket,
                selector,
                Token::RBracket
            )
        }
        ParamModifier::Length(_) => format!("{}{}", Token::Hash, var),
        ParamModifier::DelPrefix(m) => {
            let (op, word) = if m.longest {
                (spell(&[Token::Hash, Token::Hash]), word_str(&m.val)?)
            } else {
                (spell(&[Token::Hash]), escape_leading(word_str(&m.val)?, '#'))
            };
            format!("{}{}{}", var, op, word)
        }
        ParamModifier::DelSuffix(m) => {
            let (op, word) = if m.longest {
                (spell(&[Token::Mod, Token::Mod]), word_str(&m.val)?)
            } else {
                (spell(&[Token::Mod]), escape_leading(word_str(&m.val)?, '%'))
            };
            format!("{}{}{}", var, op, word)
        }
        ParamModifier::Substring(m) => {
            // `${v:-1}` would read as a default value
            let offset = if m.offset < 0 {
                format!(" {}", m.offset)
            } else {
                m.offset.to_string()
            };
            match m.length {
                Some(length) => format!("{}{}{}{}{}", var, Token::Colon, offset, Token::Colon, length),
                None => format!("{}{}{}", var, Token::Colon, offset),
            }
        }
        ParamModifier::Replace(m) => {
            let (op, old) = if m.all {
                (spell(&[Token::Div, Token::Div]), escape_pattern(&m.old))
            } else {
                let old = escape_leading(escape_leading(escape_pattern(&m.old), '#'), '%');
                (spell(&[Token::Div]), old)
            };
            format!("{}{}{}{}{}", var, op, old, Token::Div, escape_braces(&m.new))
        }
        ParamModifier::ReplacePrefix(m) => format!(
            "{}{}{}{}{}",
            var,
            spell(&[Token::Div, Token::Hash]),
            escape_pattern(&m.old),
            Token::Div,
            escape_braces(&m.new)
        ),
        ParamModifier::ReplaceSuffix(m) => format!(
            "{}{}{}{}{}",
            var,
            spell(&[Token::Div, Token::Mod]),
            escape_pattern(&m.old),
            Token::Div,
            escape_braces(&m.new)
        ),
        ParamModifier::CaseConversion(m) => {
            let op = match (m.first_char, m.to_upper) {
                (true, true) => spell(&[Token::Xor]),
                (false, true) => spell(&[Token::Xor, Token::Xor]),
                (true, false) => spell(&[Token::Comma]),
                (false, false) => spell(&[Token::Comma, Token::Comma]),
            };
            format!("{}{}", var, op)
        }
        ParamModifier::Operator(m) => format!("{}{}{}", var, Token::At, m.op),
    };
    Ok(braced(&body))
}

fn braced(body: &str) -> String {
    format!("{}{}{}{}", Token::Dollar, Token::LBrace, body, Token::RBrace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Pos;

    fn render(e: &Expr) -> String {
        expr_str(e).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render(&Expr::string("hello world")), "\"hello world\"");
        assert_eq!(render(&Expr::lit(LitKind::Integer, "42")), "42");
        assert_eq!(render(&Expr::lit(LitKind::Boolean, "true")), "true");
    }

    #[test]
    fn test_call_without_args_has_no_trailing_space() {
        assert_eq!(render(&Expr::call("ls", vec![])), "ls");
        assert_eq!(
            render(&Expr::call("echo", vec![Expr::ident("-e"), Expr::string("x")])),
            "echo -e \"x\""
        );
    }

    #[test]
    fn test_binary_with_operator() {
        let e = Expr::binary(Expr::ident("a"), Token::And, Expr::ident("b"));
        assert_eq!(render(&e), "a && b");

        let compressed = Expr::Binary(BinaryExpr {
            compress: true,
            x: Box::new(Expr::ident("x")),
            op_pos: Pos::NONE,
            op: Token::Assign,
            y: Box::new(Expr::lit(LitKind::Integer, "1")),
        });
        assert_eq!(render(&compressed), "x=1");
    }

    #[test]
    fn test_keyword_operator_is_rejected() {
        let e = Expr::binary(Expr::ident("a"), Token::If, Expr::ident("b"));
        assert!(matches!(
            expr_str(&e),
            Err(RenderError::InvalidOperator { op: Token::If })
        ));
    }

    #[test]
    fn test_empty_ident_is_an_error() {
        let e = Expr::Ident(Ident::at("", Pos(3)));
        assert!(matches!(
            expr_str(&e),
            Err(RenderError::EmptyIdent { pos: Pos(3) })
        ));
    }

    #[test]
    fn test_cmd_group_inline() {
        let group = Expr::CmdGroup(CmdGroup {
            lbrace: Pos::NONE,
            list: vec![
                Stmt::expr(Expr::call("cd", vec![Expr::ident("/tmp")])),
                Stmt::expr(Expr::call("ls", vec![])),
            ],
            rbrace: Pos::NONE,
        });
        assert_eq!(render(&group), "{ cd /tmp; ls; }");
        assert_eq!(render(&Expr::CmdGroup(CmdGroup::default())), "{ }");
    }

    #[test]
    fn test_escapes_keep_forms_distinct() {
        let replace = Expr::param(
            "v",
            Some(ParamModifier::Replace(ReplaceExp {
                old: "#a/b".into(),
                new: "c".into(),
                ..ReplaceExp::default()
            })),
        );
        assert_eq!(render(&replace), "${v/\\#a\\/b/c}");

        let short = Expr::param(
            "v",
            Some(ParamModifier::DelPrefix(DelPrefix {
                longest: false,
                hash: Pos::NONE,
                val: Box::new(Expr::ident("#x")),
            })),
        );
        assert_eq!(render(&short), "${v#\\#x}");
    }
}
