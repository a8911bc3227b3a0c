//! 逆波兰表达式计算器
//!
//! 计算管线：词法分析 -> 中缀转后缀（调度场算法）-> 后缀求值。
//! 每个阶段遇到第一个错误即返回，不产生部分结果。

pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod stack;

pub use error::{CalcError, CalcResult, SourceLocation};

/// 计算表达式的值
pub fn calc(expression: &str) -> CalcResult<f64> {
    let tokens = lexer::tokenize(expression)?;
    let postfix = parser::to_postfix(&tokens)?;
    let value = evaluator::evaluate_postfix(&postfix.tokens)?;
    log::debug!("{:?} = {}", expression, value);
    Ok(value)
}
