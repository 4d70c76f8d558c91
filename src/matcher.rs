use crate::error::{MatcherError, PatternCompileError};
use crate::flags::{Flag, FlagSet};

/// A compiled pattern ready to scan text.
///
/// Never mutated after construction; a pattern or flag change produces a
/// new matcher.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    backend: fancy_regex::Regex,
    flags: FlagSet,
}

impl CompiledMatcher {
    pub fn new(pattern: &str, flags: FlagSet) -> Result<Self, PatternCompileError> {
        MatcherBuilder::new(pattern).flags(flags).build()
    }

    pub fn pattern(&self) -> &str {
        self.backend.as_str()
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    /// Number of capturing groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.backend.captures_len().saturating_sub(1)
    }

    pub fn is_match(&self, input: &str) -> Result<bool, MatcherError> {
        self.backend.is_match(input).map_err(MatcherError::from)
    }

    pub fn captures(&self, input: &str) -> Result<Option<Captures>, MatcherError> {
        let captures = self.backend.captures(input).map_err(MatcherError::from)?;
        Ok(captures.as_ref().map(Captures::from_backend))
    }

    /// Left-to-right scan for every non-overlapping match.
    pub fn captures_iter<'r, 't>(&'r self, input: &'t str) -> Matches<'r, 't> {
        Matches {
            inner: Some(self.backend.captures_iter(input)),
        }
    }

    pub fn captures_all(&self, input: &str) -> Result<Vec<Captures>, MatcherError> {
        self.captures_iter(input).collect()
    }
}

#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    pattern: String,
    flags: FlagSet,
    backtrack_limit: Option<usize>,
}

impl MatcherBuilder {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            flags: FlagSet::empty(),
            backtrack_limit: None,
        }
    }

    pub fn flags(&mut self, flags: FlagSet) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn flag(&mut self, flag: Flag, enabled: bool) -> &mut Self {
        self.flags.set(flag, enabled);
        self
    }

    pub fn backtrack_limit(&mut self, limit: Option<usize>) -> &mut Self {
        self.backtrack_limit = limit;
        self
    }

    pub fn build(&self) -> Result<CompiledMatcher, PatternCompileError> {
        let mut builder = fancy_regex::RegexBuilder::new(&self.pattern);
        builder.case_insensitive(self.flags.contains(Flag::CaseInsensitive));
        builder.multi_line(self.flags.contains(Flag::MultilineAnchors));
        builder.dot_matches_new_line(self.flags.contains(Flag::DotMatchesAll));
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        // The library parser recurses once per nesting level.
        let backend = stacker::maybe_grow(64 * 1024, 2 * 1024 * 1024, || builder.build())
            .map_err(|err| PatternCompileError::new(&self.pattern, err.to_string()))?;
        Ok(CompiledMatcher {
            backend,
            flags: self.flags,
        })
    }
}

/// Iterator over the matches of one scan.
///
/// Yields at most one error, after which the scan is over.
pub struct Matches<'r, 't> {
    inner: Option<fancy_regex::CaptureMatches<'r, 't>>,
}

impl Matches<'_, '_> {
    pub(crate) fn empty() -> Self {
        Self { inner: None }
    }
}

impl Iterator for Matches<'_, '_> {
    type Item = Result<Captures, MatcherError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.as_mut()?.next();
        match next {
            Some(Ok(captures)) => Some(Ok(Captures::from_backend(&captures))),
            Some(Err(err)) => {
                self.inner = None;
                Some(Err(MatcherError::from(err)))
            }
            None => {
                self.inner = None;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Matches<'_, '_> {}

/// One match: the whole-match span at index 0 and groups 1..N after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<GroupMatch>>,
}

impl Captures {
    fn from_backend(captures: &fancy_regex::Captures<'_>) -> Self {
        let mut groups = Vec::with_capacity(captures.len());
        for idx in 0..captures.len() {
            let matched = captures.get(idx).map(GroupMatch::from_backend);
            groups.push(matched);
        }
        Self { groups }
    }

    /// Number of slots including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GroupMatch> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    pub fn whole(&self) -> &GroupMatch {
        match self.groups.first() {
            Some(Some(whole)) => whole,
            _ => unreachable!("a successful match always has group 0"),
        }
    }

    pub fn start(&self) -> usize {
        self.whole().start()
    }

    pub fn end(&self) -> usize {
        self.whole().end()
    }

    /// Capturing groups 1..N in ascending order; `None` for groups that did
    /// not participate.
    pub fn groups(&self) -> impl Iterator<Item = (usize, Option<&GroupMatch>)> {
        self.groups
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, group)| (index, group.as_ref()))
    }
}

/// Absolute byte span of a group within the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    start: usize,
    end: usize,
    text: String,
}

impl GroupMatch {
    fn from_backend(matched: fancy_regex::Match<'_>) -> Self {
        Self {
            start: matched.start(),
            end: matched.end(),
            text: matched.as_str().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
