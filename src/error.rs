//! 错误处理模块
//!
//! 计算管线各阶段共用的错误类型与位置信息。

use std::fmt;

use thiserror::Error;

/// 表达式中的位置（从 1 开始的字符列号）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Expression is empty!")]
    EmptyExpression,

    #[error("Invalid input! Unexpected character '{character}' at {loc}")]
    InvalidCharacter {
        character: char,
        loc: SourceLocation,
    },

    #[error("Incorrect parenthesis! Unmatched parenthesis at {loc}")]
    UnbalancedParenthesis { loc: SourceLocation },

    #[error("Expression is invalid!")]
    InvalidExpression,

    #[error("Division by zero!")]
    DivisionByZero { loc: SourceLocation },

    #[error("Malformed number '{text}' at {loc}")]
    MalformedNumber { text: String, loc: SourceLocation },
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column)
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

impl CalcError {
    /// 错误对应的位置；整体性错误没有位置
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CalcError::InvalidCharacter { loc, .. }
            | CalcError::UnbalancedParenthesis { loc }
            | CalcError::DivisionByZero { loc }
            | CalcError::MalformedNumber { loc, .. } => Some(*loc),
            CalcError::EmptyExpression | CalcError::InvalidExpression => None,
        }
    }
}

/// 渲染带上下文的错误信息：表达式本身加上指向出错列的插入符
pub fn format_error_with_context(error: &CalcError, source: &str) -> String {
    let mut out = format!("Error: {}", error);
    if let Some(loc) = error.location() {
        out.push_str(&format!("\n  | {}\n  | {}^", source, " ".repeat(loc.column.saturating_sub(1))));
    }
    out
}
