//! Tokenizer for arithmetic expressions.
//!
//! Tokenizing first keeps `evalexpr` away from anything but numbers, the
//! arithmetic operators and the whitelisted functions.

use crate::EvalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Function(Function),
}

/// Whitelisted single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Abs,
    Sin,
    Cos,
    Tan,
    Ln,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Self::Sqrt,
        Self::Abs,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Ln => x.ln(),
        }
    }
}

pub fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&c) = chars.peek() {
                    if !(c.is_ascii_digit() || c == '.') {
                        break;
                    }
                    literal.push(c);
                    chars.next();
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '*' => {
                chars.next();
                // `**` is accepted as exponentiation
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Caret);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '+' | '-' | '/' | '^' | '(' | ')' => {
                chars.next();
                tokens.push(match ch {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '/' => Token::Slash,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                });
            }
            c if c.is_alphabetic() => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_alphabetic() {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                let function = Function::from_name(&name).ok_or(EvalError::UnknownFunction(name))?;
                tokens.push(Token::Function(function));
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

/// Renders tokens as an `evalexpr` expression.
///
/// Numbers are always written as floats so `10 / 4` is not integer division,
/// function arguments are always parenthesized, and unary plus is dropped.
pub fn render(tokens: &[Token]) -> Result<String, EvalError> {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let prev = i.checked_sub(1).map(|p| tokens[p]);
        match tokens[i] {
            Token::Plus if starts_operand(prev) => {}
            Token::Function(function) => {
                let (call, next) = function_call(tokens, i, function)?;
                push_token(&mut out, &call);
                i = next;
                continue;
            }
            Token::Slash if tokens.get(i + 1) == Some(&Token::Number(0.0)) => {
                return Err(EvalError::DivisionByZero);
            }
            Token::LParen => {
                depth += 1;
                push_token(&mut out, "(");
            }
            Token::RParen => {
                depth = depth.checked_sub(1).ok_or(EvalError::UnbalancedParens)?;
                push_token(&mut out, ")");
            }
            Token::Number(value) => push_token(&mut out, &number_literal(value)),
            Token::Plus => push_token(&mut out, "+"),
            Token::Minus => push_token(&mut out, "-"),
            Token::Star => push_token(&mut out, "*"),
            Token::Slash => push_token(&mut out, "/"),
            Token::Caret => push_token(&mut out, "^"),
        }
        i += 1;
    }

    match depth {
        0 => Ok(out),
        _ => Err(EvalError::UnbalancedParens),
    }
}

fn starts_operand(prev: Option<Token>) -> bool {
    matches!(
        prev,
        None | Some(Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret | Token::LParen)
    )
}

// Spaces between tokens keep `- -3` from reaching evalexpr as one operator.
fn push_token(out: &mut String, token: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(token);
}

fn number_literal(value: f64) -> String {
    let mut literal = value.to_string();
    if !literal.contains('.') {
        literal.push_str(".0");
    }
    literal
}

/// Renders the function at `at` applied to the atom that follows it.
/// Returns the call text and the index after its argument.
fn function_call(tokens: &[Token], at: usize, function: Function) -> Result<(String, usize), EvalError> {
    let start = at + 1;
    let (argument, next) = match tokens.get(start) {
        Some(Token::Number(value)) => (number_literal(*value), start + 1),
        Some(Token::LParen) => {
            let close = matching_paren(tokens, start).ok_or(EvalError::UnbalancedParens)?;
            (render(&tokens[start + 1..close])?, close + 1)
        }
        Some(Token::Function(inner)) => function_call(tokens, start, *inner)?,
        _ => return Err(EvalError::MissingArgument(function.name().to_string())),
    };
    Ok((format!("{}({})", function.name(), argument), next))
}

fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
