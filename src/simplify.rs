//! Demonstrative Boolean-expression simplifier.
//!
//! An expression is rewritten by an ordered list of rules, each applied exactly
//! once over the whole string (every non-overlapping match, leftmost first).
//! There is no parser and no fixpoint: a result that an earlier rule could
//! simplify further is returned as is. Variables are single letters `A`-`Z`,
//! `+` is OR, `*` is AND and a trailing `'` is NOT.
//!
//! | # | rule | rewrites |
//! |---|------|----------|
//! | 1 | identity (OR) | `X+0`, `0+X` → `X` |
//! | 2 | null (OR) | `X+1`, `1+X` → `1` |
//! | 3 | null (AND) | `X*0`, `0*X` → `0` |
//! | 4 | identity (AND) | `X*1`, `1*X` → `X` |
//! | 5 | idempotent (OR) | `X+X` → `X` |
//! | 6 | idempotent (AND) | `X*X` → `X` |
//! | 7 | complement (OR) | `X+X'`, `X'+X` → `1` |
//! | 8 | complement (AND) | `X*X'`, `X'*X` → `0` |
//! | 9 | double negation | `X''` → `X` |
//! | 10 | De Morgan (OR) | `(X+Y)'` → `X'*Y'` |
//! | 11 | De Morgan (AND) | `(X*Y)'` → `X'+Y'` |
//!
//! Rules 5 to 8 need the same letter on both sides of the operator. The regex
//! crate has no back-references, so those rules use a small token scanner with
//! the same leftmost, non-overlapping semantics.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::error::{DigilogicError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Any variable letter; binds it for `Same`.
    Letter,
    /// The letter bound by the preceding `Letter`.
    Same,
    Literal(char),
    /// Zero-width: fails when the given character comes next exactly once,
    /// so `A'` is refused but `A''` is accepted.
    NotFollowedBySingle(char),
}

#[derive(Debug, Clone, Copy)]
enum Emit {
    Bound,
    Constant(&'static str),
}

#[derive(Debug)]
enum Matcher {
    Pattern { regex: Regex, replacement: &'static str },
    Sequence { tokens: &'static [Token], emit: Emit },
}

impl Matcher {
    fn pattern(pattern: &str, replacement: &'static str) -> Matcher {
        // patterns are literals in this file
        let regex = Regex::new(pattern).expect("simplifier rule pattern");
        Matcher::Pattern { regex, replacement }
    }

    fn apply(&self, text: &str) -> String {
        match self {
            Matcher::Pattern { regex, replacement } => regex.replace_all(text, *replacement).into_owned(),
            Matcher::Sequence { tokens, emit } => scan(text, tokens, *emit),
        }
    }
}

/// One named step of the rewrite pass.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    matchers: Vec<Matcher>,
}

impl Rule {
    fn new(name: &'static str, matchers: Vec<Matcher>) -> Rule {
        Rule { name, matchers }
    }
    pub fn apply(&self, text: &str) -> String {
        self.matchers.iter().fold(text.to_string(), |current, matcher| matcher.apply(&current))
    }
}

use Token::{Letter, Literal, NotFollowedBySingle, Same};

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule::new("identity (OR)", vec![
            Matcher::pattern(r"([A-Z])\+0", "${1}"),
            Matcher::pattern(r"0\+([A-Z])", "${1}"),
        ]),
        Rule::new("null (OR)", vec![
            Matcher::pattern(r"[A-Z]\+1", "1"),
            Matcher::pattern(r"1\+[A-Z]", "1"),
        ]),
        Rule::new("null (AND)", vec![
            Matcher::pattern(r"[A-Z]\*0", "0"),
            Matcher::pattern(r"0\*[A-Z]", "0"),
        ]),
        Rule::new("identity (AND)", vec![
            Matcher::pattern(r"([A-Z])\*1", "${1}"),
            Matcher::pattern(r"1\*([A-Z])", "${1}"),
        ]),
        // X+X' is not X+X, the complement rules handle it; X+X'' still is
        Rule::new("idempotent (OR)", vec![
            Matcher::Sequence { tokens: &[Letter, Literal('+'), Same, NotFollowedBySingle('\'')], emit: Emit::Bound },
        ]),
        Rule::new("idempotent (AND)", vec![
            Matcher::Sequence { tokens: &[Letter, Literal('*'), Same, NotFollowedBySingle('\'')], emit: Emit::Bound },
        ]),
        Rule::new("complement (OR)", vec![
            Matcher::Sequence { tokens: &[Letter, Literal('+'), Same, Literal('\'')], emit: Emit::Constant("1") },
            Matcher::Sequence { tokens: &[Letter, Literal('\''), Literal('+'), Same], emit: Emit::Constant("1") },
        ]),
        Rule::new("complement (AND)", vec![
            Matcher::Sequence { tokens: &[Letter, Literal('*'), Same, Literal('\'')], emit: Emit::Constant("0") },
            Matcher::Sequence { tokens: &[Letter, Literal('\''), Literal('*'), Same], emit: Emit::Constant("0") },
        ]),
        Rule::new("double negation", vec![
            Matcher::pattern(r"([A-Z])''", "${1}"),
        ]),
        Rule::new("De Morgan (OR)", vec![
            Matcher::pattern(r"\(([A-Z])\+([A-Z])\)'", "${1}'*${2}'"),
        ]),
        Rule::new("De Morgan (AND)", vec![
            Matcher::pattern(r"\(([A-Z])\*([A-Z])\)'", "${1}'+${2}'"),
        ]),
    ];
}

/// The rewrite rules in the order they are applied.
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn is_variable(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn scan(text: &str, tokens: &[Token], emit: Emit) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        match match_at(&chars[i..], tokens) {
            Some((consumed, letter)) => {
                match emit {
                    Emit::Bound => out.push(letter),
                    Emit::Constant(constant) => out.push_str(constant),
                }
                i += consumed;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

fn match_at(input: &[char], tokens: &[Token]) -> Option<(usize, char)> {
    let mut bound = None;
    let mut consumed = 0;
    for token in tokens {
        if let NotFollowedBySingle(forbidden) = token {
            let next = input.get(consumed);
            if next == Some(forbidden) && input.get(consumed + 1) != Some(forbidden) {
                return None;
            }
            continue;
        }
        let c = *input.get(consumed)?;
        let accepted = match token {
            Letter => {
                bound = Some(c);
                is_variable(c)
            }
            Same => bound == Some(c),
            Literal(literal) => c == *literal,
            NotFollowedBySingle(_) => true,
        };
        if !accepted {
            return None;
        }
        consumed += 1;
    }
    bound.map(|letter| (consumed, letter))
}

/// Outcome of a rewrite pass, with the names of the rules that changed the expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simplification {
    pub input: String,
    pub output: String,
    pub applied: Vec<&'static str>,
}

pub fn simplify_traced(expression: &str) -> Result<Simplification> {
    let input: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if input.is_empty() {
        return Err(DigilogicError::EmptyInput);
    }
    let mut applied = Vec::new();
    let mut current = input.clone();
    for rule in rules() {
        let next = rule.apply(&current);
        if next != current {
            trace!(rule = rule.name, before = %current, after = %next, "rewrite fired");
            applied.push(rule.name);
            current = next;
        }
    }
    Ok(Simplification { input, output: current, applied })
}

pub fn simplify(expression: &str) -> Result<String> {
    simplify_traced(expression).map(|s| s.output)
}
