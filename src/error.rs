use crate::token::{Pos, Token};
use thiserror::Error;

/// Failures while turning a tree back into shell text.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("identifier at {pos} has no name")]
    EmptyIdent { pos: Pos },

    #[error("`{op}` ({op:?}) cannot join the operands of a binary expression")]
    InvalidOperator { op: Token },

    #[error("array index selector must be `@` or `*`, found `{tok}`")]
    InvalidArraySelector { tok: Token },

    #[error("else-if clause at {pos} carries its own else-if or else branch")]
    MalformedElseIf { pos: Pos },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid printer configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("indent unit must be non-empty whitespace, got {0:?}")]
    Indent(String),
}
