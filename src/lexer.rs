//! 词法分析
//!
//! 把表达式文本切分为数字、运算符和括号。空格被跳过，其余未知字符直接报错。

use std::fmt;

use logos::Logos;

use crate::error::{CalcError, CalcResult, SourceLocation};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r" +")]
pub enum Token {
    /// 数字字面量，保留原始文本，求值时再解析
    #[regex(r"[0-9.]+", |lex| lex.slice().to_string())]
    Number(String),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => write!(f, "{}", text),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithLocation {
    pub token: Token,
    pub loc: SourceLocation,
}

/// 词法分析入口
///
/// 遇到第一个非法字符即失败，不返回任何 token。
pub fn tokenize(expression: &str) -> CalcResult<Vec<TokenWithLocation>> {
    let mut lexer = Token::lexer(expression);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let loc = column_at(expression, span.start);
        match result {
            Ok(token) => tokens.push(TokenWithLocation { token, loc }),
            Err(()) => {
                let character = expression[span.start..].chars().next().unwrap_or('\0');
                return Err(CalcError::InvalidCharacter { character, loc });
            }
        }
    }

    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    log::trace!("tokenized {} tokens from {:?}", tokens.len(), expression);
    Ok(tokens)
}

// 字节偏移 -> 字符列号
fn column_at(source: &str, byte_offset: usize) -> SourceLocation {
    SourceLocation {
        column: source[..byte_offset].chars().count() + 1,
    }
}
