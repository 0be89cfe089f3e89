use log::{debug, trace};

use crate::arena_regex::{Regex, RegexStorage, Rewrite};
use crate::error::MatchError;

/// Depth limit applied to [`Rewrite::Exact`] when no `max_depth` is configured. Exact
/// derivatives of a star nest one level deeper per character, and deriving recurses through
/// every level.
pub const EXACT_MAX_DEPTH: usize = 512;

/// Settings for a [`Matcher`]. The defaults simplify derivatives and impose no limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub rewrite: Rewrite,
    /// Reject inputs with more characters than this before deriving anything.
    pub max_input_len: Option<usize>,
    /// Give up once a derivative has more nodes than this.
    pub max_nodes: Option<usize>,
    /// Give up once a regex is deeper than this. Falls back to [`EXACT_MAX_DEPTH`] under
    /// [`Rewrite::Exact`].
    pub max_depth: Option<usize>,
}

impl MatchConfig {
    pub fn new() -> MatchConfig {
        MatchConfig::default()
    }

    pub fn rewrite(mut self, rewrite: Rewrite) -> MatchConfig {
        self.rewrite = rewrite;
        self
    }

    pub fn max_input_len(mut self, limit: usize) -> MatchConfig {
        self.max_input_len = Some(limit);
        self
    }

    pub fn max_nodes(mut self, limit: usize) -> MatchConfig {
        self.max_nodes = Some(limit);
        self
    }

    pub fn max_depth(mut self, limit: usize) -> MatchConfig {
        self.max_depth = Some(limit);
        self
    }

    fn depth_limit(&self) -> Option<usize> {
        match (self.max_depth, self.rewrite) {
            (Some(limit), _) => Some(limit),
            (None, Rewrite::Exact) => Some(EXACT_MAX_DEPTH),
            (None, Rewrite::Simplify) => None,
        }
    }
}

/// Matches whole inputs against a regex by deriving it one character at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Matcher {
        Matcher { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Does the whole of `input` match `regex`? Only fails if a configured limit is hit.
    pub fn is_match(&self, regex: Regex, input: &str) -> Result<bool, MatchError> {
        let storage = RegexStorage::new();
        let last = self.fold(&storage, regex, input, |_, _| ())?;
        debug!(
            "{:?} {} after {} nodes",
            input,
            if last.is_nullable() { "matched" } else { "did not match" },
            storage.len()
        );
        Ok(last.is_nullable())
    }

    /// Each character consumed, paired with the derivative it produced. Stops early once the
    /// derivative is `∅`, since no further input can match.
    pub fn explain<'a>(
        &self,
        storage: &'a RegexStorage<'a>,
        regex: Regex<'a>,
        input: &str,
    ) -> Result<Vec<(char, Regex<'a>)>, MatchError> {
        let mut steps = Vec::new();
        self.fold(storage, regex, input, |c, derived| steps.push((c, derived)))?;
        Ok(steps)
    }

    fn fold<'a>(
        &self,
        storage: &'a RegexStorage<'a>,
        regex: Regex<'a>,
        input: &str,
        mut visit: impl FnMut(char, Regex<'a>),
    ) -> Result<Regex<'a>, MatchError> {
        if let Some(limit) = self.config.max_input_len {
            let len = input.chars().count();
            if len > limit {
                return Err(MatchError::InputTooLong { len, limit });
            }
        }

        let depth_limit = self.config.depth_limit();
        let too_deep = |regex: &Regex, consumed| match depth_limit {
            Some(limit) if regex.depth() > limit => Some(MatchError::TooDeep { limit, consumed }),
            _ => None,
        };
        if let Some(err) = too_deep(&regex, 0) {
            return Err(err);
        }

        let mut regex = regex;
        for (consumed, c) in input.chars().enumerate() {
            regex = storage.derive_with(self.config.rewrite, c, regex);
            trace!("{:?} => {}", c, regex);
            visit(c, regex);

            if let Some(err) = too_deep(&regex, consumed + 1) {
                return Err(err);
            }
            if let Some(limit) = self.config.max_nodes {
                if regex.exceeds(limit) {
                    return Err(MatchError::TreeTooLarge {
                        limit,
                        consumed: consumed + 1,
                    });
                }
            }
            if regex.is_empty_set() {
                break;
            }
        }
        Ok(regex)
    }
}
