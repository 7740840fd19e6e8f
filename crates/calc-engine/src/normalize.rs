//! Turns a natural-language query into a bare arithmetic expression.

use crate::lexer::Function;

/// Word phrases rewritten to operator symbols, longest first.
const PHRASES: &[(&[&str], &str)] = &[
    (&["to", "the", "power", "of"], "^"),
    (&["the", "square", "root", "of"], "sqrt"),
    (&["square", "root", "of"], "sqrt"),
    (&["multiplied", "by"], "*"),
    (&["divided", "by"], "/"),
    (&["plus"], "+"),
    (&["minus"], "-"),
    (&["times"], "*"),
    (&["over"], "/"),
    (&["squared"], "^2"),
    (&["cubed"], "^3"),
];

/// Rewrites word operators and strips surrounding prose.
///
/// `"What is 3 plus 4?"` becomes `"3 + 4"`. Returns an empty string when the
/// query contains nothing that looks like arithmetic.
pub fn extract_expression(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            '?' | '!' | '=' => ' ',
            other => other,
        })
        .collect();

    let rewritten = rewrite_phrases(&cleaned);
    expression_span(&rewritten).to_string()
}

fn rewrite_phrases(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;

    'words: while i < words.len() {
        for (phrase, symbol) in PHRASES {
            let Some(window) = words.get(i..i + phrase.len()) else {
                continue;
            };
            let matches = window
                .iter()
                .zip(phrase.iter())
                .all(|(word, expected)| word.trim_end_matches(&['.', ','][..]) == *expected);
            if matches {
                out.push(*symbol);
                i += phrase.len();
                continue 'words;
            }
        }
        out.push(words[i]);
        i += 1;
    }

    out.join(" ")
}

/// Slice from the first character that can open an expression to the last
/// character that can close one.
fn expression_span(text: &str) -> &str {
    let Some(start) = text
        .char_indices()
        .find(|&(idx, c)| opens_expression(text, idx, c))
        .map(|(idx, _)| idx)
    else {
        return "";
    };

    let end = text[start..]
        .char_indices()
        .filter(|&(_, c)| c.is_ascii_digit() || c == ')')
        .last()
        .map(|(idx, c)| start + idx + c.len_utf8());

    match end {
        Some(end) => &text[start..end],
        None => "",
    }
}

fn opens_expression(text: &str, idx: usize, c: char) -> bool {
    let rest = &text[idx + c.len_utf8()..];
    match c {
        '0'..='9' | '(' => true,
        '.' => rest.starts_with(|n: char| n.is_ascii_digit()),
        '-' => {
            let operand = rest.trim_start();
            operand.starts_with(|n: char| n.is_ascii_digit() || n == '(' || n == '.')
                || starts_function(text, text.len() - operand.len())
        }
        _ => starts_function(text, idx),
    }
}

fn starts_function(text: &str, idx: usize) -> bool {
    let at_word_start = text[..idx]
        .chars()
        .next_back()
        .map_or(true, |prev| !prev.is_alphabetic());

    at_word_start
        && Function::ALL.iter().map(|f| f.name()).any(|name| {
            text[idx..].starts_with(name)
                && text[idx + name.len()..]
                    .chars()
                    .next()
                    .map_or(true, |next| !next.is_alphabetic())
        })
}
