// crates/rule-logic/src/dsl.rs
// ============================================================================
// Module: Rule Expressions
// Description: Parser for checker expressions written in catalog data.
// Purpose: Turn text such as `code("CS 4***") && !code("CS 4999")` into a
//          validated `Rule<P>` whose leaves come from a caller resolver.
// Dependencies: crate::rule, crate::validate
// ============================================================================

//! ## Overview
//! Expressions combine leaf calls with `&&`, `||`, `!` and parentheses, or
//! with the calls `all(..)`, `any(..)`, `not(..)` and `at_least(n, ..)`. Every
//! other call is a leaf: its name and literal arguments go to the resolver.
//! `&&` binds tighter than `||`.
//!
//! ```
//! use rule_logic::Literal;
//! use rule_logic::Rule;
//! use rule_logic::parse_rule;
//!
//! let resolve = |name: &str, args: &[Literal<'_>]| match (name, args) {
//!     ("code", [Literal::Str(code)]) => Ok((*code).to_string()),
//!     _ => Err(format!("unknown predicate `{name}`")),
//! };
//! let rule: Rule<String> = parse_rule(r#"code("CS 2110") || code("CS 2112")"#, &resolve)?;
//! assert_eq!(
//!     rule,
//!     Rule::any(vec![Rule::leaf("CS 2110".to_string()), Rule::leaf("CS 2112".to_string())])
//! );
//! # Ok::<(), rule_logic::DslError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::rule::Rule;
use crate::validate::ValidationError;
use crate::validate::validate;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Longest expression accepted, in bytes.
const MAX_INPUT_BYTES: usize = 16 * 1024;
/// Deepest nesting of `!`, parentheses and calls.
const MAX_NESTING: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to parse an expression. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    /// Nothing but whitespace.
    Empty,
    /// Input longer than the accepted maximum.
    TooLarge {
        /// Input length in bytes.
        len: usize,
    },
    /// Nesting deeper than the accepted maximum.
    TooDeep {
        /// Where the limit was crossed.
        position: usize,
    },
    /// Input did not fit the grammar.
    Syntax {
        /// What the parser wanted.
        expected: &'static str,
        /// What it found instead.
        found: String,
        /// Where.
        position: usize,
    },
    /// Number literal out of range.
    Number {
        /// Literal text.
        raw: String,
        /// Where.
        position: usize,
    },
    /// Resolver rejected a leaf call.
    Leaf {
        /// Call name.
        name: String,
        /// Resolver message.
        message: String,
        /// Where the call starts.
        position: usize,
    },
    /// Parsed rule failed validation.
    Invalid(ValidationError),
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("expression is empty"),
            Self::TooLarge {
                len,
            } => write!(f, "expression is {len} bytes (max {MAX_INPUT_BYTES})"),
            Self::TooDeep {
                position,
            } => write!(f, "expression nests deeper than {MAX_NESTING} at {position}"),
            Self::Syntax {
                expected,
                found,
                position,
            } => write!(f, "expected {expected} at {position}, found {found}"),
            Self::Number {
                raw,
                position,
            } => write!(f, "number `{raw}` at {position} is out of range"),
            Self::Leaf {
                name,
                message,
                position,
            } => write!(f, "`{name}` at {position}: {message}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DslError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DslError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Literal argument of a leaf call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal<'a> {
    /// Double-quoted text, quotes removed.
    Str(&'a str),
    /// Unsigned integer.
    Number(u64),
}

/// Parses `input` into a validated rule, resolving leaf calls with `resolve`.
///
/// # Errors
/// Returns [`DslError`] for malformed text, rejected leaves, or a rule that
/// fails [`validate`].
pub fn parse_rule<P, F>(input: &str, resolve: &F) -> Result<Rule<P>, DslError>
where
    F: Fn(&str, &[Literal<'_>]) -> Result<P, String>,
{
    if input.len() > MAX_INPUT_BYTES {
        return Err(DslError::TooLarge {
            len: input.len(),
        });
    }
    if input.trim().is_empty() {
        return Err(DslError::Empty);
    }
    let resolve: &Resolve<'_, P> = resolve;
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
        resolve,
    };
    let rule = parser.disjunction()?;
    if !parser.at_end() {
        return Err(parser.unexpected("`&&`, `||` or end of input"));
    }
    validate(&rule)?;
    Ok(rule)
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Leaf resolver as seen by the parser.
type Resolve<'r, P> = dyn Fn(&str, &[Literal<'_>]) -> Result<P, String> + 'r;

/// Recursive-descent parser reading directly from the input text.
struct Parser<'s, 'r, P> {
    /// Expression text.
    input: &'s str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Current nesting depth.
    depth: usize,
    /// Leaf resolver.
    resolve: &'r Resolve<'r, P>,
}

impl<'s, P> Parser<'s, '_, P> {
    /// `conjunction ("||" conjunction)*`
    fn disjunction(&mut self) -> Result<Rule<P>, DslError> {
        let mut terms = vec![self.conjunction()?];
        while self.eat("||") {
            terms.push(self.conjunction()?);
        }
        Ok(single_or(terms, Rule::any))
    }

    /// `factor ("&&" factor)*`
    fn conjunction(&mut self) -> Result<Rule<P>, DslError> {
        let mut factors = vec![self.factor()?];
        while self.eat("&&") {
            factors.push(self.factor()?);
        }
        Ok(single_or(factors, Rule::all))
    }

    /// `"!" factor | "(" disjunction ")" | name "(" args ")"`
    fn factor(&mut self) -> Result<Rule<P>, DslError> {
        self.skip_whitespace();
        let start = self.pos;
        if self.eat("!") {
            return self.nested(start, |parser| parser.factor().map(Rule::negate));
        }
        if self.eat("(") {
            return self.nested(start, |parser| {
                let inner = parser.disjunction()?;
                parser.expect(")")?;
                Ok(inner)
            });
        }
        let Some(name) = self.name() else {
            return Err(self.unexpected("`!`, `(` or a call"));
        };
        self.expect("(")?;
        self.nested(start, |parser| match name {
            "all" => parser.members().map(Rule::all),
            "any" => parser.members().map(Rule::any),
            "not" => {
                let members = parser.members()?;
                let count = members.len();
                let [inner]: [Rule<P>; 1] = members.try_into().map_err(|_| DslError::Syntax {
                    expected: "one member in `not(..)`",
                    found: format!("{count} members"),
                    position: start,
                })?;
                Ok(Rule::negate(inner))
            }
            "at_least" => {
                let min = parser.count()?;
                parser.expect(",")?;
                Ok(Rule::at_least(min, parser.members()?))
            }
            _ => {
                let args = parser.literals()?;
                (parser.resolve)(name, &args).map(Rule::leaf).map_err(|message| DslError::Leaf {
                    name: name.to_string(),
                    message,
                    position: start,
                })
            }
        })
    }

    /// Comma-separated rules up to and including `)`.
    fn members(&mut self) -> Result<Vec<Rule<P>>, DslError> {
        let mut members = Vec::new();
        if self.eat(")") {
            return Ok(members);
        }
        loop {
            members.push(self.disjunction()?);
            if !self.eat(",") {
                self.expect(")")?;
                return Ok(members);
            }
        }
    }

    /// Comma-separated literals up to and including `)`.
    fn literals(&mut self) -> Result<Vec<Literal<'s>>, DslError> {
        let mut args = Vec::new();
        if self.eat(")") {
            return Ok(args);
        }
        loop {
            args.push(self.literal()?);
            if !self.eat(",") {
                self.expect(")")?;
                return Ok(args);
            }
        }
    }

    /// One string or number literal.
    fn literal(&mut self) -> Result<Literal<'s>, DslError> {
        self.skip_whitespace();
        let start = self.pos;
        if self.eat("\"") {
            let input = self.input;
            let rest = &input[self.pos ..];
            let Some(len) = rest.find('"') else {
                return Err(DslError::Syntax {
                    expected: "closing `\"`",
                    found: "end of input".to_string(),
                    position: start,
                });
            };
            self.pos += len + 1;
            return Ok(Literal::Str(&rest[.. len]));
        }
        let (raw, position) = self.digits().ok_or_else(|| self.unexpected("a string or number"))?;
        raw.parse().map(Literal::Number).map_err(|_| DslError::Number {
            raw: raw.to_string(),
            position,
        })
    }

    /// The `at_least` minimum.
    fn count(&mut self) -> Result<u8, DslError> {
        let (raw, position) = self.digits().ok_or_else(|| self.unexpected("a count"))?;
        raw.parse().map_err(|_| DslError::Number {
            raw: raw.to_string(),
            position,
        })
    }

    /// Runs `step` one nesting level deeper.
    fn nested<T>(
        &mut self,
        position: usize,
        step: impl FnOnce(&mut Self) -> Result<T, DslError>,
    ) -> Result<T, DslError> {
        if self.depth == MAX_NESTING {
            return Err(DslError::TooDeep {
                position,
            });
        }
        self.depth += 1;
        let out = step(self);
        self.depth -= 1;
        out
    }

    // ========================================================================
    // SECTION: Scanning
    // ========================================================================

    /// Skips ASCII whitespace.
    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos ..];
        self.pos += rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
    }

    /// Consumes `token` when it comes next.
    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos ..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Consumes `token` or fails.
    fn expect(&mut self, token: &'static str) -> Result<(), DslError> {
        if self.eat(token) { Ok(()) } else { Err(self.unexpected(token)) }
    }

    /// Consumes an identifier.
    fn name(&mut self) -> Option<&'s str> {
        self.skip_whitespace();
        let input = self.input;
        let rest = &input[self.pos ..];
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return None;
        }
        let len = rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(rest.len());
        self.pos += len;
        Some(&rest[.. len])
    }

    /// Consumes a run of ASCII digits, returning it with its offset.
    fn digits(&mut self) -> Option<(&'s str, usize)> {
        self.skip_whitespace();
        let start = self.pos;
        let input = self.input;
        let rest = &input[start ..];
        let len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some((&rest[.. len], start))
    }

    /// Returns true when only whitespace remains.
    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos == self.input.len()
    }

    /// Builds a syntax error for whatever comes next.
    fn unexpected(&mut self, expected: &'static str) -> DslError {
        self.skip_whitespace();
        let found = self.input[self.pos ..]
            .chars()
            .next()
            .map_or_else(|| "end of input".to_string(), |c| format!("`{c}`"));
        DslError::Syntax {
            expected,
            found,
            position: self.pos,
        }
    }
}

/// Returns the lone rule, or joins several with `join`.
fn single_or<P>(mut rules: Vec<Rule<P>>, join: fn(Vec<Rule<P>>) -> Rule<P>) -> Rule<P> {
    if rules.len() == 1 { rules.remove(0) } else { join(rules) }
}
