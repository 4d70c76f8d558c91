use crate::error::PatternCompileError;
use crate::flags::{Flag, FlagSet};
use crate::matcher::{CompiledMatcher, MatcherBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileState {
    /// Nothing has been compiled yet.
    Uncompiled,
    /// Pattern text is empty; there is nothing to match.
    Empty,
    Compiled,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Empty,
    Compiled { group_count: usize },
    Failed(PatternCompileError),
}

/// Owns the pattern text and flag set and the matcher derived from them.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    pattern: String,
    flags: FlagSet,
    backtrack_limit: Option<usize>,
    matcher: Option<CompiledMatcher>,
    error: Option<PatternCompileError>,
    state: CompileState,
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            flags: FlagSet::empty(),
            backtrack_limit: None,
            matcher: None,
            error: None,
            state: CompileState::Uncompiled,
        }
    }

    pub fn with_backtrack_limit(mut self, limit: Option<usize>) -> Self {
        self.backtrack_limit = limit;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn state(&self) -> CompileState {
        self.state
    }

    pub fn matcher(&self) -> Option<&CompiledMatcher> {
        self.matcher.as_ref()
    }

    pub fn error(&self) -> Option<&PatternCompileError> {
        self.error.as_ref()
    }

    pub fn set_pattern(&mut self, pattern: &str) -> CompileOutcome {
        self.pattern = pattern.to_string();
        self.compile()
    }

    /// Toggles one flag. Recompiles only when the set actually changed.
    pub fn set_flag(&mut self, flag: Flag, enabled: bool) -> Option<CompileOutcome> {
        if self.flags.set(flag, enabled) {
            Some(self.compile())
        } else {
            None
        }
    }

    pub fn set_flags(&mut self, flags: FlagSet) -> Option<CompileOutcome> {
        if self.flags == flags {
            return None;
        }
        self.flags = flags;
        Some(self.compile())
    }

    pub fn compile(&mut self) -> CompileOutcome {
        self.matcher = None;
        self.error = None;

        if self.pattern.is_empty() {
            self.state = CompileState::Empty;
            log::debug!("pattern cleared; nothing to compile");
            return CompileOutcome::Empty;
        }

        let mut builder = MatcherBuilder::new(&self.pattern);
        builder
            .flags(self.flags)
            .backtrack_limit(self.backtrack_limit);
        match builder.build() {
            Ok(matcher) => {
                let group_count = matcher.group_count();
                log::debug!(
                    "compiled pattern {:?} flags={:#05b} groups={group_count}",
                    self.pattern,
                    self.flags.bits()
                );
                self.matcher = Some(matcher);
                self.state = CompileState::Compiled;
                CompileOutcome::Compiled { group_count }
            }
            Err(err) => {
                log::debug!("pattern {:?} failed to compile: {err}", self.pattern);
                self.error = Some(err.clone());
                self.state = CompileState::Failed;
                CompileOutcome::Failed(err)
            }
        }
    }
}
