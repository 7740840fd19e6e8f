//! Evaluates a token stream with `evalexpr`.

use evalexpr::{ContextWithMutableFunctions, Function as ContextFunction, HashMapContext, Value};

use crate::lexer::{render, Function, Token};
use crate::EvalError;

/// A context exposing only the whitelisted functions, under their bare names.
fn context() -> Result<HashMapContext, EvalError> {
    let mut context = HashMapContext::new();
    for function in Function::ALL {
        context
            .set_function(
                function.name().to_string(),
                ContextFunction::new(move |argument| Ok(Value::Float(function.apply(argument.as_number()?)))),
            )
            .map_err(|e| EvalError::Evaluator(e.to_string()))?;
    }
    Ok(context)
}

/// Evaluates a token stream to a finite number.
pub fn evaluate(tokens: &[Token]) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let expression = render(tokens)?;
    let value = evalexpr::eval_number_with_context(&expression, &context()?)
        .map_err(|e| EvalError::Evaluator(e.to_string()))?;

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn eval(expression: &str) -> Result<f64, EvalError> {
        evaluate(&tokenize(expression)?)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval("24 / 4 / 2").unwrap(), 3.0);
    }

    #[test]
    fn test_division_is_not_integer_division() {
        assert_eq!(eval("10 / 4").unwrap(), 2.5);
        assert_eq!(eval("1 / 3 * 3").unwrap(), 1.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(eval("2 ^ 10").unwrap(), 1024.0);
        assert_eq!(eval("2 ^ -1").unwrap(), 0.5);
        assert_eq!(eval("-2 ^ 2").unwrap(), -4.0);
        assert_eq!(eval("2 ** 3").unwrap(), 8.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-3 + 5").unwrap(), 2.0);
        assert_eq!(eval("4 * -2").unwrap(), -8.0);
        assert_eq!(eval("+3 - 1").unwrap(), 2.0);
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(16) + 1").unwrap(), 5.0);
        assert_eq!(eval("abs(2 - 7)").unwrap(), 5.0);
        assert_eq!(eval("sqrt 81").unwrap(), 9.0);
        assert!(eval("sin(0)").unwrap().abs() < 1e-12);
        assert!((eval("ln(1)").unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_negated_functions() {
        assert_eq!(eval("-sqrt(4)").unwrap(), -2.0);
        assert_eq!(eval("-abs(3)").unwrap(), -3.0);
        assert_eq!(eval("(-sqrt(4))").unwrap(), -2.0);
        assert_eq!(eval("10 - sqrt(4)").unwrap(), 8.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(eval(""), Err(EvalError::Empty));
        assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1 / (2 - 2)"), Err(EvalError::NonFinite));
        assert_eq!(eval("(1 + 2"), Err(EvalError::UnbalancedParens));
        assert_eq!(eval("sqrt(-1)"), Err(EvalError::NonFinite));
        assert!(matches!(eval("1 +"), Err(EvalError::Evaluator(_))));
        assert!(matches!(eval("2 3"), Err(EvalError::Evaluator(_))));
    }
}
