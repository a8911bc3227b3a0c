//! 后缀表达式求值

use crate::error::{CalcError, CalcResult, SourceLocation};
use crate::parser::{BinaryOp, PostfixToken};
use crate::stack::Stack;

/// 用操作数栈对后缀序列求值
///
/// 每个运算符前都检查操作数是否足够，结束时栈中必须恰好剩下一个值。
pub fn evaluate_postfix(postfix: &[PostfixToken]) -> CalcResult<f64> {
    let mut operands: Stack<f64> = Stack::new();

    for token in postfix {
        match token {
            PostfixToken::Number { text, loc } => {
                let value = text.parse::<f64>().map_err(|_| CalcError::MalformedNumber {
                    text: text.clone(),
                    loc: *loc,
                })?;
                operands.push(value);
            }
            PostfixToken::Operator { op, loc } => {
                // 先弹出的是右操作数
                let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
                    return Err(CalcError::InvalidExpression);
                };
                operands.push(apply(*op, left, right, *loc)?);
            }
        }
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(result), true) => Ok(result),
        _ => Err(CalcError::InvalidExpression),
    }
}

/// 计算 `left op right`；除数为零时报错（在除法之前检查）
fn apply(op: BinaryOp, left: f64, right: f64, loc: SourceLocation) -> CalcResult<f64> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => {
            if right == 0.0 {
                return Err(CalcError::DivisionByZero { loc });
            }
            Ok(left / right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(column: usize) -> SourceLocation {
        SourceLocation { column }
    }

    fn num(text: &str) -> PostfixToken {
        PostfixToken::Number { text: text.to_string(), loc: loc(1) }
    }

    fn op(op: BinaryOp) -> PostfixToken {
        PostfixToken::Operator { op, loc: loc(1) }
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(evaluate_postfix(&[num("10"), num("4"), op(BinaryOp::Sub)]), Ok(6.0));
        assert_eq!(evaluate_postfix(&[num("10"), num("4"), op(BinaryOp::Div)]), Ok(2.5));
    }

    #[test]
    fn test_all_operators() {
        let postfix = [
            num("2"),
            num("3"),
            num("4"),
            op(BinaryOp::Mul),
            op(BinaryOp::Add),
            num("7"),
            op(BinaryOp::Sub),
        ];
        assert_eq!(evaluate_postfix(&postfix), Ok(7.0));
    }

    #[test]
    fn test_division_by_zero() {
        let postfix = [
            num("1"),
            num("0"),
            PostfixToken::Operator { op: BinaryOp::Div, loc: loc(3) },
        ];
        assert_eq!(evaluate_postfix(&postfix), Err(CalcError::DivisionByZero { loc: loc(3) }));
        assert!(matches!(
            evaluate_postfix(&[num("1"), num("0.0"), op(BinaryOp::Div)]),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_zero_numerator_is_fine() {
        assert_eq!(evaluate_postfix(&[num("0"), num("5"), op(BinaryOp::Div)]), Ok(0.0));
    }

    #[test]
    fn test_overflow_is_not_checked() {
        let huge = "1".repeat(300);
        let result = evaluate_postfix(&[num(&huge), num(&huge), op(BinaryOp::Mul)]).unwrap();
        assert!(result.is_infinite());
    }

    #[test]
    fn test_too_few_operands() {
        assert_eq!(evaluate_postfix(&[num("1"), op(BinaryOp::Add)]), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate_postfix(&[op(BinaryOp::Mul)]), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_leftover_operands() {
        assert_eq!(evaluate_postfix(&[num("1"), num("2")]), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_empty_postfix() {
        assert_eq!(evaluate_postfix(&[]), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            evaluate_postfix(&[num("1.2.3")]),
            Err(CalcError::MalformedNumber { text: "1.2.3".to_string(), loc: loc(1) })
        );
        assert!(matches!(
            evaluate_postfix(&[num(".")]),
            Err(CalcError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_lenient_decimal_forms() {
        assert_eq!(evaluate_postfix(&[num(".5")]), Ok(0.5));
        assert_eq!(evaluate_postfix(&[num("3.")]), Ok(3.0));
    }
}
