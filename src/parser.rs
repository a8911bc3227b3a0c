//! 中缀转后缀
//!
//! 调度场算法：数字直接输出，运算符按优先级在运算符栈中缓冲，
//! 括号只用于分组，不会出现在后缀结果中。

use std::fmt;

use crate::error::{CalcError, CalcResult, SourceLocation};
use crate::lexer::{Token, TokenWithLocation};
use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// 运算符优先级表
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostfixToken {
    Number { text: String, loc: SourceLocation },
    Operator { op: BinaryOp, loc: SourceLocation },
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Number { text, .. } => write!(f, "{}", text),
            PostfixToken::Operator { op, .. } => write!(f, "{}", op),
        }
    }
}

/// 后缀（逆波兰）表达式
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postfix {
    pub tokens: Vec<PostfixToken>,
}

impl Postfix {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

// 运算符栈中只可能出现左括号和四种运算符
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    LParen(SourceLocation),
    Op(BinaryOp, SourceLocation),
}

/// 将中缀 token 序列转换为后缀形式
///
/// 多余的右括号在遇到时立即报错；扫描结束后残留的左括号同样报错。
pub fn to_postfix(tokens: &[TokenWithLocation]) -> CalcResult<Postfix> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Stack<StackEntry> = Stack::new();

    for TokenWithLocation { token, loc } in tokens {
        let loc = *loc;
        match token {
            Token::Number(text) => output.push(PostfixToken::Number {
                text: text.clone(),
                loc,
            }),
            Token::LParen => stack.push(StackEntry::LParen(loc)),
            Token::RParen => loop {
                match stack.pop() {
                    Some(StackEntry::Op(op, op_loc)) => {
                        output.push(PostfixToken::Operator { op, loc: op_loc })
                    }
                    Some(StackEntry::LParen(_)) => break,
                    None => return Err(CalcError::UnbalancedParenthesis { loc }),
                }
            },
            Token::Plus => push_operator(BinaryOp::Add, loc, &mut stack, &mut output),
            Token::Minus => push_operator(BinaryOp::Sub, loc, &mut stack, &mut output),
            Token::Star => push_operator(BinaryOp::Mul, loc, &mut stack, &mut output),
            Token::Slash => push_operator(BinaryOp::Div, loc, &mut stack, &mut output),
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Op(op, loc) => output.push(PostfixToken::Operator { op, loc }),
            StackEntry::LParen(loc) => return Err(CalcError::UnbalancedParenthesis { loc }),
        }
    }

    let postfix = Postfix { tokens: output };
    log::trace!("postfix: {}", postfix);
    Ok(postfix)
}

/// 压入二元运算符前，先把栈顶优先级不低于它的运算符移到输出（左结合）
fn push_operator(
    op: BinaryOp,
    loc: SourceLocation,
    stack: &mut Stack<StackEntry>,
    output: &mut Vec<PostfixToken>,
) {
    while let Some(StackEntry::Op(top, top_loc)) = stack.pop_if(|entry| {
        matches!(entry, StackEntry::Op(top, _) if top.precedence() >= op.precedence())
    }) {
        output.push(PostfixToken::Operator { op: top, loc: top_loc });
    }
    stack.push(StackEntry::Op(op, loc));
}
