//! In-process arithmetic agent.
//!
//! Answers calculator queries such as `"What is 3 plus 4?"` without any
//! network calls: the query is normalized to an expression, tokenized against
//! a function whitelist and evaluated with `evalexpr`.

mod eval;
mod lexer;
mod normalize;

use async_trait::async_trait;
use calc_core::{AgentError, CalculatorAgent};
use thiserror::Error;
use tracing::debug;

pub use normalize::extract_expression;

/// Longest query accepted, in characters.
pub const MAX_INPUT_LEN: usize = 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("no arithmetic expression found")]
    Empty,

    #[error("input too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("function {0} is missing its argument")]
    MissingArgument(String),

    #[error("invalid expression: {0}")]
    Evaluator(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl From<EvalError> for AgentError {
    fn from(err: EvalError) -> Self {
        AgentError::Evaluation(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Evaluates a natural-language calculator query to a number.
pub fn evaluate(query: &str) -> Result<f64, EvalError> {
    let len = query.chars().count();
    if len > MAX_INPUT_LEN {
        return Err(EvalError::TooLong { len, max: MAX_INPUT_LEN });
    }

    let expression = extract_expression(query);
    debug!(query, expression = %expression, "Extracted expression");

    let tokens = lexer::tokenize(&expression)?;
    eval::evaluate(&tokens)
}

/// Formats a result the way a person would write it: `4`, not `4.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        // `{}` on f64 never uses exponent notation, so this also covers large values
        return format!("{}", value + 0.0);
    }

    let fixed = format!("{:.10}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct ArithmeticAgent;

impl ArithmeticAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CalculatorAgent for ArithmeticAgent {
    fn name(&self) -> &str {
        "arithmetic"
    }

    async fn run(&self, input_text: &str) -> Result<String, AgentError> {
        let value = evaluate(input_text)?;
        Ok(format_number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn test_evaluate_queries() {
        assert_eq!(evaluate("2+2").unwrap(), 4.0);
        assert_eq!(evaluate("What is 3 plus 4?").unwrap(), 7.0);
        assert_eq!(evaluate("what is the square root of 81").unwrap(), 9.0);
        assert_eq!(evaluate("What is 7 squared?").unwrap(), 49.0);
        assert_eq!(evaluate("What is 6 multiplied by 7?").unwrap(), 42.0);
        assert_eq!(evaluate("9 over 3").unwrap(), 3.0);
        assert_eq!(evaluate("2 cubed").unwrap(), 8.0);
        assert_eq!(evaluate("10 − 4").unwrap(), 6.0);
        assert_eq!(evaluate("WHAT IS 3 PLUS 4").unwrap(), 7.0);
    }

    #[test]
    fn test_evaluate_negated_functions() {
        assert_eq!(evaluate("-sqrt(4)").unwrap(), -2.0);
        assert_eq!(evaluate("-abs(3)").unwrap(), -3.0);
        assert_eq!(evaluate("what is minus the square root of 9").unwrap(), -3.0);
        assert_eq!(evaluate("what is - sqrt 16?").unwrap(), -4.0);
    }

    #[test]
    fn test_evaluate_rejects_long_input() {
        let query = "1+".repeat(600);
        assert_eq!(
            evaluate(&query),
            Err(EvalError::TooLong { len: 1200, max: MAX_INPUT_LEN })
        );
    }

    #[test]
    fn test_evaluate_without_arithmetic() {
        assert_eq!(evaluate("tell me a joke"), Err(EvalError::Empty));
    }

    #[tokio::test]
    async fn test_agent_run() {
        let agent = ArithmeticAgent::new();
        assert_eq!(agent.run("2+2").await.unwrap(), "4");
        assert_eq!(agent.run("10 divided by 4").await.unwrap(), "2.5");
    }

    #[tokio::test]
    async fn test_agent_maps_errors() {
        let agent = ArithmeticAgent::new();
        let err = agent.run("1 / 0").await.unwrap_err();
        assert!(matches!(err, AgentError::Evaluation(msg) if msg == "division by zero"));
    }
}
