//! Pattern syntax, from loosest to tightest binding:
//!
//! ```text
//! alternation := concat ('|' concat)*
//! concat      := repeat+
//! repeat      := atom '*'?
//! atom        := literal | '.' | '\' reserved | '(' alternation ')'
//! ```
//!
//! `\∅` and `\ε` are accepted too, since that is how those literals are displayed.
//!
//! Alternation and concatenation are both left-associative. The empty pattern is the empty
//! string.

use log::debug;

use crate::arena_regex::{Regex, RegexStorage};
use crate::error::SyntaxError;

const RESERVED: [char; 6] = ['.', '*', '|', '(', ')', '\\'];

pub(crate) fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// Reserved characters, plus the two that `Display` uses for `∅` and `ε`.
pub(crate) fn needs_escape(c: char) -> bool {
    is_reserved(c) || c == '∅' || c == 'ε'
}

/// Parse `pattern`, allocating its nodes in `storage`.
pub fn parse<'a>(storage: &'a RegexStorage<'a>, pattern: &str) -> Result<Regex<'a>, SyntaxError> {
    if pattern.is_empty() {
        return Ok(storage.empty_string());
    }

    let mut parser = Parser {
        storage,
        chars: pattern.chars().collect(),
        pos: 0,
        open_groups: Vec::new(),
    };
    let regex = parser.alternation()?;
    // `alternation` only stops early at a ')' it has no group for.
    if parser.peek().is_some() {
        return Err(SyntaxError::UnmatchedClose {
            position: parser.pos,
        });
    }

    debug!("parsed {:?} as {}", pattern, regex);
    Ok(regex)
}

struct Parser<'a> {
    storage: &'a RegexStorage<'a>,
    chars: Vec<char>,
    pos: usize,
    // Offsets of the '(' of each group we are inside.
    open_groups: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn alternation(&mut self) -> Result<Regex<'a>, SyntaxError> {
        let mut regex = self.concat()?;
        while self.eat('|') {
            let right = self.concat()?;
            regex = self.storage.union(regex, right);
        }
        Ok(regex)
    }

    fn concat(&mut self) -> Result<Regex<'a>, SyntaxError> {
        let mut regex = match self.repeat()? {
            Some(regex) => regex,
            None => return Err(self.missing_atom()),
        };
        while let Some(next) = self.repeat()? {
            regex = self.storage.concat(regex, next);
        }
        Ok(regex)
    }

    fn repeat(&mut self) -> Result<Option<Regex<'a>>, SyntaxError> {
        let atom = match self.atom()? {
            Some(atom) => atom,
            None => return Ok(None),
        };
        if self.eat('*') {
            Ok(Some(self.storage.star(atom)))
        } else {
            Ok(Some(atom))
        }
    }

    /// `None` at the end of a branch: end of input, '|' or ')'.
    fn atom(&mut self) -> Result<Option<Regex<'a>>, SyntaxError> {
        let position = self.pos;
        let c = match self.peek() {
            None | Some('|') | Some(')') => return Ok(None),
            Some(c) => c,
        };
        self.pos += 1;

        let regex = match c {
            '*' => return Err(SyntaxError::NothingToRepeat { position }),
            '.' => self.storage.wildcard(),
            '\\' => self.escape(position)?,
            '(' => self.group(position)?,
            c => self.storage.literal(c),
        };
        Ok(Some(regex))
    }

    fn escape(&mut self, position: usize) -> Result<Regex<'a>, SyntaxError> {
        match self.bump() {
            None => Err(SyntaxError::DanglingEscape { position }),
            Some(c) if needs_escape(c) => Ok(self.storage.literal(c)),
            Some(c) => Err(SyntaxError::UnknownEscape {
                escaped: c,
                position,
            }),
        }
    }

    fn group(&mut self, open: usize) -> Result<Regex<'a>, SyntaxError> {
        self.open_groups.push(open);
        let inner = self.alternation()?;
        self.open_groups.pop();
        if self.eat(')') {
            Ok(inner)
        } else {
            Err(SyntaxError::UnclosedGroup { position: open })
        }
    }

    // A branch ended before it had any atom in it.
    fn missing_atom(&self) -> SyntaxError {
        let position = self.pos;
        match (self.peek(), self.open_groups.last()) {
            (Some(')'), None) => SyntaxError::UnmatchedClose { position },
            (None, Some(&open)) => SyntaxError::UnclosedGroup { position: open },
            _ => SyntaxError::EmptyAlternative { position },
        }
    }
}
