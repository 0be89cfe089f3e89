use std::fmt;

use typed_arena::Arena;

use crate::error::SyntaxError;
use crate::parse;

/// Owns the nodes of every regex built through it. Nodes are never freed individually; they all
/// go away when the storage is dropped.
pub struct RegexStorage<'a>(Arena<Regex<'a>>);

/// A regular expression. This is a small `Copy` handle: the node's children live in a
/// [`RegexStorage`], and nullability and depth are computed once, when the node is built.
///
/// Equality and ordering are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Regex<'a> {
    node: Node<'a>,
    nullable: bool,
    depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Node<'a> {
    /// Matches nothing.
    EmptySet,
    /// Matches only the empty string.
    EmptyString,
    Literal(char),
    /// Matches any single character.
    Wildcard,
    Union(&'a Regex<'a>, &'a Regex<'a>),
    Concat(&'a Regex<'a>, &'a Regex<'a>),
    Star(&'a Regex<'a>),
}

/// How derivatives are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rewrite {
    /// Build exactly the node each derivative rule names, with no simplification.
    Exact,
    /// Fold away `∅` and `ε` operands, and keep every union flattened, sorted and free of
    /// duplicates. Accepts the same strings as `Exact`, and a regex only ever has finitely many
    /// distinct derivatives this way.
    #[default]
    Simplify,
}

impl<'a> Regex<'a> {
    pub fn node(&self) -> Node<'a> {
        self.node
    }

    /// Does this regex accept the empty string?
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_empty_set(&self) -> bool {
        self.node == Node::EmptySet
    }

    /// Length of the longest path from this node to a leaf, counting both ends.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes, counting shared children once per reference. Derived trees share
    /// subtrees heavily, so prefer [`Regex::exceeds`] for bounding them.
    pub fn size(&self) -> usize {
        use Node::*;

        match self.node {
            EmptySet | EmptyString | Literal(_) | Wildcard => 1,
            Union(x, y) | Concat(x, y) => 1 + x.size() + y.size(),
            Star(x) => 1 + x.size(),
        }
    }

    /// Is `self.size() > limit`? Visits at most `limit + 1` nodes.
    pub fn exceeds(&self, limit: usize) -> bool {
        fn spend(regex: &Regex, budget: &mut usize) -> bool {
            use Node::*;

            if *budget == 0 {
                return true;
            }
            *budget -= 1;
            match regex.node {
                EmptySet | EmptyString | Literal(_) | Wildcard => false,
                Union(x, y) | Concat(x, y) => spend(x, budget) || spend(y, budget),
                Star(x) => spend(x, budget),
            }
        }

        let mut budget = limit;
        spend(self, &mut budget)
    }

    fn precedence(&self) -> u8 {
        match self.node {
            Node::Union(_, _) => ALT,
            Node::Concat(_, _) => SEQ,
            Node::Star(_) => REPEAT,
            _ => ATOM,
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        use Node::*;

        if self.precedence() < min {
            write!(f, "(")?;
            self.write(f, ALT)?;
            return write!(f, ")");
        }
        match self.node {
            EmptySet => write!(f, "∅"),
            EmptyString => write!(f, "ε"),
            Literal(c) if parse::needs_escape(c) => write!(f, "\\{}", c),
            Literal(c) => write!(f, "{}", c),
            Wildcard => write!(f, "."),
            // Both operators are left-associative, so a right operand of the same precedence
            // needs parentheses to keep its shape.
            Union(x, y) => {
                x.write(f, ALT)?;
                write!(f, "|")?;
                y.write(f, SEQ)
            }
            Concat(x, y) => {
                x.write(f, SEQ)?;
                y.write(f, REPEAT)
            }
            Star(x) => {
                x.write(f, ATOM)?;
                write!(f, "*")
            }
        }
    }
}

const ALT: u8 = 0;
const SEQ: u8 = 1;
const REPEAT: u8 = 2;
const ATOM: u8 = 3;

/// Renders the regex in pattern syntax, with `∅` and `ε` for the two nodes that have none. Those
/// two characters are escaped when they appear as literals.
impl fmt::Display for Regex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, ALT)
    }
}

impl<'a> RegexStorage<'a> {
    pub fn new() -> RegexStorage<'a> {
        RegexStorage(Arena::new())
    }

    /// Number of nodes allocated in this storage so far.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parse(&'a self, pattern: &str) -> Result<Regex<'a>, SyntaxError> {
        parse::parse(self, pattern)
    }

    /// Does the whole of `input` match `regex`? Derivatives go into a scratch storage, so
    /// matching never grows this one.
    pub fn matches(&self, input: &str, regex: Regex) -> bool {
        let storage = RegexStorage::new();
        let mut regex = regex;
        for c in input.chars() {
            regex = storage.derive_with(Rewrite::Simplify, c, regex);
            if regex.is_empty_set() {
                return false;
            }
        }
        regex.nullable
    }

    /// The derivative of `regex` with respect to `c`: the regex matching every `s` such that
    /// `regex` matches `c` followed by `s`.
    pub fn derive(&'a self, c: char, regex: Regex<'a>) -> Regex<'a> {
        self.derive_with(Rewrite::Exact, c, regex)
    }

    pub fn derive_with(&'a self, rewrite: Rewrite, c: char, regex: Regex<'a>) -> Regex<'a> {
        use Node::*;

        match regex.node {
            EmptySet | EmptyString => self.empty_set(),
            Literal(c2) if c == c2 => self.empty_string(),
            Literal(_) => self.empty_set(),
            Wildcard => self.empty_string(),
            Union(x, y) => self.union_with(
                rewrite,
                self.derive_with(rewrite, c, *x),
                self.derive_with(rewrite, c, *y),
            ),
            Concat(x, y) if x.nullable => self.union_with(
                rewrite,
                self.concat_with(rewrite, self.derive_with(rewrite, c, *x), *y),
                self.derive_with(rewrite, c, *y),
            ),
            Concat(x, y) => self.concat_with(rewrite, self.derive_with(rewrite, c, *x), *y),
            Star(x) => self.concat_with(rewrite, self.derive_with(rewrite, c, *x), regex),
        }
    }

    pub fn empty_set(&self) -> Regex<'a> {
        Regex {
            node: Node::EmptySet,
            nullable: false,
            depth: 1,
        }
    }

    pub fn empty_string(&self) -> Regex<'a> {
        Regex {
            node: Node::EmptyString,
            nullable: true,
            depth: 1,
        }
    }

    pub fn literal(&self, ch: char) -> Regex<'a> {
        Regex {
            node: Node::Literal(ch),
            nullable: false,
            depth: 1,
        }
    }

    pub fn wildcard(&self) -> Regex<'a> {
        Regex {
            node: Node::Wildcard,
            nullable: false,
            depth: 1,
        }
    }

    pub fn union(&'a self, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        let x = self.0.alloc(x);
        let y = self.0.alloc(y);
        Regex {
            node: Node::Union(x, y),
            nullable: x.nullable || y.nullable,
            depth: 1 + x.depth.max(y.depth),
        }
    }

    pub fn concat(&'a self, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        let x = self.0.alloc(x);
        let y = self.0.alloc(y);
        Regex {
            node: Node::Concat(x, y),
            nullable: x.nullable && y.nullable,
            depth: 1 + x.depth.max(y.depth),
        }
    }

    pub fn star(&'a self, x: Regex<'a>) -> Regex<'a> {
        let x = self.0.alloc(x);
        Regex {
            node: Node::Star(x),
            nullable: true,
            depth: 1 + x.depth,
        }
    }

    /// Like [`RegexStorage::union`], but normalized: nested unions are flattened, `∅`
    /// alternatives dropped, the rest sorted and deduplicated, and `ε` dropped when another
    /// alternative is already nullable. The result is rebuilt right-nested, `a|(b|c)`.
    pub fn alt(&'a self, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        fn alternatives<'r>(regex: Regex<'r>, out: &mut Vec<Regex<'r>>) {
            match regex.node {
                Node::Union(x, y) => {
                    alternatives(*x, out);
                    alternatives(*y, out);
                }
                Node::EmptySet => {}
                _ => out.push(regex),
            }
        }

        let mut alts = Vec::new();
        alternatives(x, &mut alts);
        alternatives(y, &mut alts);
        alts.sort();
        alts.dedup();
        if alts
            .iter()
            .any(|alt| alt.nullable && alt.node != Node::EmptyString)
        {
            alts.retain(|alt| alt.node != Node::EmptyString);
        }

        match alts.pop() {
            None => self.empty_set(),
            Some(last) => alts
                .into_iter()
                .rev()
                .fold(last, |rest, alt| self.union(alt, rest)),
        }
    }

    /// Like [`RegexStorage::concat`], but simplifies when it can do so without changing the
    /// language.
    pub fn seq(&'a self, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        use Node::*;

        match (x.node, y.node) {
            (EmptySet, _) | (_, EmptySet) => self.empty_set(),
            (EmptyString, _) => y,
            (_, EmptyString) => x,
            _ => self.concat(x, y),
        }
    }

    fn union_with(&'a self, rewrite: Rewrite, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        match rewrite {
            Rewrite::Exact => self.union(x, y),
            Rewrite::Simplify => self.alt(x, y),
        }
    }

    fn concat_with(&'a self, rewrite: Rewrite, x: Regex<'a>, y: Regex<'a>) -> Regex<'a> {
        match rewrite {
            Rewrite::Exact => self.concat(x, y),
            Rewrite::Simplify => self.seq(x, y),
        }
    }
}

impl Default for RegexStorage<'_> {
    fn default() -> Self {
        RegexStorage::new()
    }
}

impl fmt::Debug for RegexStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexStorage")
            .field("len", &self.len())
            .finish()
    }
}
