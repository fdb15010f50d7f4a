//! Source positions and the static token vocabulary.
//!
//! Every literal spelling the printer emits for a keyword, operator or piece of
//! punctuation lives in [`Token`]. Dialect-specific spellings change here and
//! nowhere else.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A source offset. The zero value is [`Pos::NONE`]: no position, ordered
/// before every valid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pos(pub usize);

impl Pos {
    pub const NONE: Pos = Pos(0);

    /// Reports whether the position refers to real source text.
    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }

    /// The position `len` units after this one, saturating at the largest
    /// offset. Offsetting an invalid position yields an invalid position.
    pub fn offset(self, len: usize) -> Pos {
        if self.is_valid() {
            Pos(self.0.saturating_add(len))
        } else {
            Pos::NONE
        }
    }

    /// The position right after `tok` when `tok` starts here.
    pub fn after(self, tok: Token) -> Pos {
        self.offset(tok.as_str().len())
    }

    /// Returns `self` if valid, otherwise `other`.
    pub fn or(self, other: Pos) -> Pos {
        if self.is_valid() {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("-")
        }
    }
}

/// Broad classification used to decide where a token may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// The empty token and layout.
    Layout,
    Operator,
    Punctuation,
    Keyword,
    /// Token categories (`STRING`, `WORD`, ...) that have no fixed spelling.
    Category,
}

macro_rules! tokens {
    ($( $class:ident { $( $name:ident => $text:expr ),* $(,)? } )*) => {
        /// Logical shell tokens and their surface text.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Token {
            $( $( $name, )* )*
        }

        impl Token {
            /// Every token, in declaration order.
            pub const ALL: &'static [Token] = &[ $( $( Token::$name, )* )* ];

            /// The literal spelling of the token.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $( Token::$name => $text, )* )*
                }
            }

            pub fn class(self) -> TokenClass {
                match self {
                    $( $( Token::$name => TokenClass::$class, )* )*
                }
            }
        }
    };
}

tokens! {
    Layout {
        None => "",
        Space => " ",
    }
    Operator {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Exp => "**",

        Hash => "#",
        Quest => "?",
        At => "@",
        Dollar => "$",

        Inc => "++",
        Dec => "--",
        Eq => "==",
        Neq => "!=",
        Match => "=~",

        GtAnd => ">&",
        AndGt => "&>",

        DollarMul => "$*",
        DollarAt => "$@",
        DollarHash => "$#",
        DollarQuest => "$?",
        DollarSub => "$-",
        DollarDollar => "$$",
        DollarNot => "$!",
        DollarZero => "$0",

        Lt => "<",
        Gt => ">",

        LtAssign => "<=",
        GtAssign => ">=",
        MulAssign => "*=",
        DivAssign => "/=",
        AddAssign => "+=",
        SubAssign => "-=",
        DoubleLtAssign => "<<=",
        DoubleGtAssign => ">>=",
        AndAssign => "&=",
        XorAssign => "^=",
        OrAssign => "|=",

        DoubleLt => "<<",
        TripleLt => "<<<",
        DoubleGt => ">>",

        BitOr => "|",
        BitAnd => "&",
        BitNot => "!",
        BitNeg => "~",

        Assign => "=",

        And => "&&",
        Or => "||",
        Xor => "^",
    }
    Punctuation {
        SingleQuote => "'",
        DoubleQuote => "\"",
        BackQuote => "`",

        LParen => "(",
        RParen => ")",
        LBrace => "{",
        RBrace => "}",
        LBracket => "[",
        RBracket => "]",

        DoubleLParen => "((",
        DoubleRParen => "))",
        DoubleLBracket => "[[",
        DoubleRBracket => "]]",

        Comma => ",",
        Colon => ":",
        Semi => ";",
        DoubleSemi => ";;",
    }
    Keyword {
        If => "if",
        Else => "else",
        For => "for",
        In => "in",
        Until => "until",
        While => "while",
        Switch => "switch",
        Case => "case",
        Select => "select",
        Function => "function",
        Local => "local",
        Return => "return",
        Break => "break",
        Continue => "continue",
        End => "end",
    }
    Category {
        String => "STRING",
        Number => "NUMBER",
        Word => "WORD",
        Eof => "EOF",
    }
}

static LOOKUP: Lazy<HashMap<&'static str, Token>> =
    Lazy::new(|| Token::ALL.iter().map(|tok| (tok.as_str(), *tok)).collect());

impl Token {
    /// Finds the token spelled `text`.
    pub fn lookup(text: &str) -> Option<Token> {
        LOOKUP.get(text).copied()
    }

    pub fn is_keyword(self) -> bool {
        self.class() == TokenClass::Keyword
    }

    /// Whether the token may sit between the operands of a binary expression.
    /// The empty token is allowed and means plain juxtaposition.
    pub fn is_binary_op(self) -> bool {
        matches!(
            self.class(),
            TokenClass::Operator | TokenClass::Punctuation
        ) || self == Token::None
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::None
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Token::lookup(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown token `{}`", text)))
    }
}

/// Kinds of basic literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LitKind {
    #[default]
    Empty,
    Null,
    Boolean,
    Byte,
    Integer,
    Currency,
    Long,
    Single,
    Double,
    Date,
    String,
    Object,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pos_orders_first() {
        assert!(Pos::NONE < Pos(1));
        assert!(!Pos::NONE.is_valid());
        assert_eq!(Pos::NONE.offset(5), Pos::NONE);
        assert_eq!(Pos(3).offset(5), Pos(8));
        assert_eq!(Pos(10).after(Token::DoubleRBracket), Pos(12));
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(Pos(usize::MAX).offset(2), Pos(usize::MAX));
        assert_eq!(Pos(usize::MAX - 1).after(Token::End), Pos(usize::MAX));
    }

    #[test]
    fn test_spellings_are_unique() {
        for tok in Token::ALL {
            assert_eq!(Token::lookup(tok.as_str()), Some(*tok), "{:?}", tok);
        }
    }

    #[test]
    fn test_classification() {
        assert!(Token::End.is_keyword());
        assert!(Token::BitOr.is_binary_op());
        assert!(Token::None.is_binary_op());
        assert!(!Token::If.is_binary_op());
        assert!(!Token::Word.is_binary_op());
        assert!(!Token::Space.is_binary_op());
    }

    #[test]
    fn test_token_serde_uses_spelling() {
        let json = serde_json::to_string(&Token::DoubleLParen).unwrap();
        assert_eq!(json, "\"((\"");
        let tok: Token = serde_json::from_str("\"=~\"").unwrap();
        assert_eq!(tok, Token::Match);
        assert!(serde_json::from_str::<Token>("\"nope\"").is_err());
    }
}
