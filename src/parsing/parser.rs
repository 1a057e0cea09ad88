//! Grammar engine: a cursor over the input text together with the
//! primitives every plastix rule is composed from.

use std::collections::HashMap;
use std::fmt;

use crate::language::Inline;

/// How deeply styled spans may nest inside one another.
pub const MAX_NESTING: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    Unrecognized(usize),
    Expected(usize, &'static str),
    ExpectedToken(usize, &'static str),
    InvalidCharacter(usize, char),
    InvalidByte(usize),
    TooDeep(usize),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::Unrecognized(offset) => *offset,
            ParsingError::Expected(offset, _) => *offset,
            ParsingError::ExpectedToken(offset, _) => *offset,
            ParsingError::InvalidCharacter(offset, _) => *offset,
            ParsingError::InvalidByte(offset) => *offset,
            ParsingError::TooDeep(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::Unrecognized(_) => "unrecognized input".to_string(),
            ParsingError::Expected(_, value) => format!("expected {}", value),
            ParsingError::ExpectedToken(_, token) => {
                format!("expected '{}'", token.escape_default())
            }
            ParsingError::InvalidCharacter(_, c) => {
                format!("unexpected character '{}'", c.escape_default())
            }
            ParsingError::InvalidByte(_) => "colour component out of range".to_string(),
            ParsingError::TooDeep(_) => "styled spans nested too deeply".to_string(),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// A grammar rule that can be listed as an alternative in a choice.
pub type Rule<'i, A> = fn(&mut Parser<'i>) -> Result<A, ParsingError>;

#[derive(Debug)]
pub struct Parser<'i> {
    source: &'i str,
    offset: usize,
    furthest: Option<ParsingError>,
    spans: HashMap<usize, Result<(Inline<'i>, usize), ParsingError>>,
    depth: usize,
    fatal: Option<ParsingError>,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            source: "",
            offset: 0,
            furthest: None,
            spans: HashMap::new(),
            depth: 0,
            fatal: None,
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
        self.offset = 0;
        self.furthest = None;
        self.spans
            .clear();
        self.depth = 0;
        self.fatal = None;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn entire(&self) -> &'i str {
        self.source
    }

    pub fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    pub fn peek_next_char(&self) -> Option<char> {
        self.source
            .chars()
            .next()
    }

    fn advance(&mut self, width: usize) {
        self.source = &self.source[width..];
        self.offset += width;
    }

    /// Note a failure and hand it back to the caller. The failure furthest
    /// into the input is retained (the most recent one on a tie) as that is
    /// where the grammar got stuck when the document as a whole is rejected.
    pub fn fail(&mut self, error: ParsingError) -> ParsingError {
        let further = match &self.furthest {
            Some(previous) => error.offset() >= previous.offset(),
            None => true,
        };
        if further {
            self.furthest = Some(error.clone());
        }
        error
    }

    pub fn furthest(&self) -> Option<&ParsingError> {
        self.furthest
            .as_ref()
    }

    /// A failure that ends the parse outright rather than letting another
    /// alternative be tried.
    pub fn fatal(&self) -> Option<&ParsingError> {
        self.fatal
            .as_ref()
    }

    /// Apply an inline rule at the current offset, remembering its outcome.
    /// An inline node depends only on the text from where it starts, so a
    /// later attempt at the same offset reuses the first result instead of
    /// parsing nested spans all over again. Each active application counts
    /// as one level of nesting; going past MAX_NESTING is fatal.
    pub fn inline_span<F>(&mut self, rule: F) -> Result<Inline<'i>, ParsingError>
    where
        F: FnOnce(&mut Parser<'i>) -> Result<Inline<'i>, ParsingError>,
    {
        if let Some(error) = &self.fatal {
            return Err(error.clone());
        }

        let start = self.offset;
        if let Some(outcome) = self
            .spans
            .get(&start)
            .cloned()
        {
            return match outcome {
                Ok((inline, end)) => {
                    self.advance(end - start);
                    Ok(inline)
                }
                Err(error) => Err(error),
            };
        }

        if self.depth >= MAX_NESTING {
            let error = ParsingError::TooDeep(start);
            self.fatal = Some(error.clone());
            return Err(self.fail(error));
        }

        self.depth += 1;
        let result = self.sequence(rule);
        self.depth -= 1;

        // outcomes cut short by a fatal failure are not worth keeping
        if self
            .fatal
            .is_none()
        {
            let outcome = match &result {
                Ok(inline) => Ok((inline.clone(), self.offset)),
                Err(error) => Err(error.clone()),
            };
            self.spans
                .insert(start, outcome);
        }
        result
    }

    /// Consume exactly one character if it satisfies the predicate.
    pub fn satisfy<P>(&mut self, predicate: P, expected: &'static str) -> Result<char, ParsingError>
    where
        P: Fn(char) -> bool,
    {
        match self.peek_next_char() {
            Some(c) if predicate(c) => {
                self.advance(c.len_utf8());
                Ok(c)
            }
            _ => Err(self.fail(ParsingError::Expected(self.offset, expected))),
        }
    }

    pub fn literal(&mut self, token: &'static str) -> Result<&'i str, ParsingError> {
        if self
            .source
            .starts_with(token)
        {
            let matched = &self.source[..token.len()];
            self.advance(token.len());
            Ok(matched)
        } else {
            Err(self.fail(ParsingError::ExpectedToken(self.offset, token)))
        }
    }

    /// Zero or more characters satisfying the predicate, returned as the
    /// span of input they occupy.
    pub fn take_while<P>(&mut self, predicate: P) -> &'i str
    where
        P: Fn(char) -> bool,
    {
        let end = self
            .source
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map(|(i, _)| i)
            .unwrap_or(
                self.source
                    .len(),
            );

        let span = &self.source[..end];
        self.advance(end);
        span
    }

    /// As take_while(), but at least one character must match.
    pub fn take_while1<P>(
        &mut self,
        predicate: P,
        expected: &'static str,
    ) -> Result<&'i str, ParsingError>
    where
        P: Fn(char) -> bool,
    {
        let span = self.take_while(predicate);
        if span.is_empty() {
            Err(self.fail(ParsingError::Expected(self.offset, expected)))
        } else {
            Ok(span)
        }
    }

    /// Apply a run of sub-rules as one unit. If any of them fails the
    /// cursor is returned to where it was before the first one started.
    pub fn sequence<A, F>(&mut self, rule: F) -> Result<A, ParsingError>
    where
        F: FnOnce(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let source = self.source;
        let offset = self.offset;

        let result = rule(self);
        if result.is_err() {
            self.source = source;
            self.offset = offset;
        }
        result
    }

    /// Try each alternative in the order given and commit to the first one
    /// that succeeds.
    pub fn choice<A>(&mut self, alternatives: &[Rule<'i, A>]) -> Result<A, ParsingError> {
        let mut error = ParsingError::Unrecognized(self.offset);

        for alternative in alternatives {
            match self.sequence(alternative) {
                Ok(value) => return Ok(value),
                Err(problem) => {
                    if problem.offset() >= error.offset() {
                        error = problem;
                    }
                }
            }
        }

        Err(error)
    }

    /// Greedy zero-or-more repetition.
    pub fn many<A, F>(&mut self, rule: F) -> Vec<A>
    where
        F: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let mut results = Vec::new();

        loop {
            let before = self.offset;
            match self.sequence(&rule) {
                Ok(value) => {
                    results.push(value);
                    // a rule that matched without consuming would match forever
                    if self.offset == before {
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        results
    }

    /// Greedy one-or-more repetition.
    pub fn oneplus<A, F>(&mut self, rule: F) -> Result<Vec<A>, ParsingError>
    where
        F: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let first = self.sequence(&rule)?;

        let mut results = vec![first];
        results.extend(self.many(rule));

        Ok(results)
    }

    pub fn optional<A, F>(&mut self, rule: F) -> Option<A>
    where
        F: FnOnce(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        self.sequence(rule)
            .ok()
    }

    /// Lookahead: report whether the rule would match here, without
    /// consuming anything either way.
    pub fn peek<A, F>(&mut self, rule: F) -> bool
    where
        F: FnOnce(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let source = self.source;
        let offset = self.offset;

        let matched = rule(self).is_ok();

        self.source = source;
        self.offset = offset;
        matched
    }

    pub fn end_of_input(&mut self) -> Result<(), ParsingError> {
        match self.peek_next_char() {
            None => Ok(()),
            Some(c) => Err(self.fail(ParsingError::InvalidCharacter(self.offset, c))),
        }
    }
}

/// Transform the value captured by a successful rule.
pub fn map<'i, A, B, R, F>(rule: R, f: F) -> impl Fn(&mut Parser<'i>) -> Result<B, ParsingError>
where
    R: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    F: Fn(A) -> B,
{
    move |input| rule(input).map(&f)
}
