use std::fmt;

/// Context frame attached to a grammar failure. Frames accumulate as
/// the failure bubbles out, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseContext {
    /// A structural parser rejected the input.
    Invalid(&'static str),
    /// A required token or literal was missing.
    Expected(&'static str),
    /// A required one-or-more repetition matched zero times.
    AtLeastOne(&'static str),
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseContext::Invalid(what) => write!(f, "Not a valid {what}"),
            ParseContext::Expected(what) => write!(f, "expected {what}"),
            ParseContext::AtLeastOne(what) => write!(f, "expected at least one {what}"),
        }
    }
}

/// Error type threaded through the winnow grammar.
pub(crate) type GrammarError = winnow::error::ContextError<ParseContext>;

pub(crate) type PResult<T> = winnow::Result<T, GrammarError>;

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required literal, delimiter or value was missing or malformed.
    Syntax,
    /// A required repetition (node or edge statements) matched zero times.
    Arity,
}

/// A failed parse, with the cause chain from the innermost token
/// failure to the outermost structure that rejected the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    chain: Vec<String>,
}

impl ParseError {
    pub(crate) fn from_grammar(err: GrammarError) -> Self {
        let mut kind = ErrorKind::Syntax;
        let mut chain: Vec<String> = Vec::new();
        for frame in err.context() {
            if matches!(*frame, ParseContext::AtLeastOne(_)) {
                kind = ErrorKind::Arity;
            }
            chain.push(frame.to_string());
        }
        if chain.is_empty() {
            chain.push("unexpected input".to_string());
        }
        ParseError { kind, chain }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        ParseError {
            kind: ErrorKind::Syntax,
            chain: vec![message.into()],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain.join("\n"))
    }
}

impl std::error::Error for ParseError {}
