use thiserror::Error;

/// A malformed pattern. Positions are character offsets into the pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unclosed group: '(' at offset {position} has no matching ')'")]
    UnclosedGroup { position: usize },
    #[error("unmatched ')' at offset {position}")]
    UnmatchedClose { position: usize },
    #[error("nothing to repeat: '*' at offset {position} does not follow an atom")]
    NothingToRepeat { position: usize },
    #[error("empty alternative at offset {position}")]
    EmptyAlternative { position: usize },
    #[error("'\\' at offset {position} ends the pattern")]
    DanglingEscape { position: usize },
    #[error("unknown escape '\\{escaped}' at offset {position}")]
    UnknownEscape { escaped: char, position: usize },
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        use SyntaxError::*;

        match *self {
            UnclosedGroup { position }
            | UnmatchedClose { position }
            | NothingToRepeat { position }
            | EmptyAlternative { position }
            | DanglingEscape { position }
            | UnknownEscape { position, .. } => position,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("input has {len} characters, more than the limit of {limit}")]
    InputTooLong { len: usize, limit: usize },
    #[error("derivative grew past {limit} nodes after {consumed} characters")]
    TreeTooLarge { limit: usize, consumed: usize },
    #[error("regex nested deeper than {limit} levels after {consumed} characters")]
    TooDeep { limit: usize, consumed: usize },
}
