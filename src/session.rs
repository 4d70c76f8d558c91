//! Event-driven facade between a tester UI and the highlight engine.
//!
//! Every input event recompiles (when the pattern or flags changed) and
//! re-runs a full highlighting pass synchronously before returning.
//!
//! Applying spans to a live text widget usually fires that widget's
//! "content changed" notification. Such notifications must not reach the
//! session while spans are being applied, or every pass would trigger the
//! next one. [`Session::apply`] holds a [`SignalBlocker`] for the duration
//! of the apply loop; events delivered while it is held are dropped, and UI
//! code can consult a clone of the blocker in its own callbacks.

use std::cell::Cell;
use std::rc::Rc;

use crate::compiler::{CompileState, PatternCompiler};
use crate::config::{ColorResetPolicy, SessionConfig};
use crate::engine::{HighlightEngine, HighlightSpan, Highlights};
use crate::error::Result;
use crate::flags::{Flag, FlagSet};
use crate::trace::TraceState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PatternTextChanged(String),
    FlagToggled(Flag, bool),
    InputTextChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    HighlightsReady(Vec<HighlightSpan>),
    PatternError(Option<String>),
}

/// Immutable view of everything a highlighting pass depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub pattern: String,
    pub flags: FlagSet,
    pub text: String,
}

/// Outcome of one recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    highlights: Highlights,
    pattern_error: Option<String>,
    compile_state: CompileState,
}

impl Update {
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn spans(&self) -> &[HighlightSpan] {
        self.highlights.spans()
    }

    pub fn pattern_error(&self) -> Option<&str> {
        self.pattern_error.as_deref()
    }

    pub fn compile_state(&self) -> CompileState {
        self.compile_state
    }

    pub fn into_events(self) -> [OutputEvent; 2] {
        [
            OutputEvent::HighlightsReady(self.highlights.into_spans()),
            OutputEvent::PatternError(self.pattern_error),
        ]
    }
}

/// Receives spans in emitted order and paints them onto a display.
pub trait HighlightSink {
    fn apply_span(&mut self, span: &HighlightSpan);
}

impl<F> HighlightSink for F
where
    F: FnMut(&HighlightSpan),
{
    fn apply_span(&mut self, span: &HighlightSpan) {
        self(span)
    }
}

/// Shared flag that is raised while spans are being applied.
#[derive(Debug, Clone, Default)]
pub struct SignalBlocker {
    blocked: Rc<Cell<bool>>,
}

impl SignalBlocker {
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Raises the flag until the returned guard is dropped. Nested guards
    /// restore the state they found.
    pub fn block(&self) -> SignalGuard {
        let previous = self.blocked.replace(true);
        SignalGuard {
            blocked: Rc::clone(&self.blocked),
            previous,
        }
    }
}

#[must_use = "signals are unblocked as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SignalGuard {
    blocked: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.blocked.set(self.previous);
    }
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    compiler: PatternCompiler,
    engine: HighlightEngine,
    last: Highlights,
    blocker: SignalBlocker,
    trace_state: TraceState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let compiler = PatternCompiler::new().with_backtrack_limit(config.backtrack_limit);
        let engine = HighlightEngine::with_config(&config);
        let trace_state = TraceState {
            enabled: config.trace,
            ..TraceState::default()
        };
        log::info!(
            "session started: offsets={:?} color_reset={:?}",
            config.offset_unit,
            config.color_reset
        );
        Self {
            config,
            compiler,
            engine,
            last: Highlights::default(),
            blocker: SignalBlocker::default(),
            trace_state,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(SessionConfig::from_env()?))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    pub fn engine(&self) -> &HighlightEngine {
        &self.engine
    }

    /// Spans produced by the most recent pass.
    pub fn highlights(&self) -> &Highlights {
        &self.last
    }

    pub fn pattern_error(&self) -> Option<&str> {
        self.compiler.error().map(|err| err.message())
    }

    pub fn signal_blocker(&self) -> SignalBlocker {
        self.blocker.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pattern: self.compiler.pattern().to_string(),
            flags: self.compiler.flags(),
            text: self.engine.text().to_string(),
        }
    }

    pub fn pattern_text_changed(&mut self, pattern: &str) -> Option<Update> {
        if self.ignored("pattern_text_changed") {
            return None;
        }
        self.trace_state
            .event_line(format!("[event] pattern_text_changed pattern={pattern:?}"));
        self.replace_pattern(pattern);
        Some(self.recompute())
    }

    pub fn flag_toggled(&mut self, flag: Flag, enabled: bool) -> Option<Update> {
        if self.ignored("flag_toggled") {
            return None;
        }
        self.trace_state.event_line(format!(
            "[event] flag_toggled flag={} enabled={enabled}",
            flag.letter()
        ));
        self.compiler.set_flag(flag, enabled);
        Some(self.recompute())
    }

    pub fn input_text_changed(&mut self, text: &str) -> Option<Update> {
        if self.ignored("input_text_changed") {
            return None;
        }
        self.trace_state.event_line(format!(
            "[event] input_text_changed chars={}",
            text.chars().count()
        ));
        self.engine.set_text(text);
        Some(self.recompute())
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Option<Update> {
        match event {
            InputEvent::PatternTextChanged(pattern) => self.pattern_text_changed(&pattern),
            InputEvent::FlagToggled(flag, enabled) => self.flag_toggled(flag, enabled),
            InputEvent::InputTextChanged(text) => self.input_text_changed(&text),
        }
    }

    /// Brings the session to `snapshot` and runs one pass.
    pub fn evaluate(&mut self, snapshot: &Snapshot) -> Option<Update> {
        if self.ignored("evaluate") {
            return None;
        }
        self.trace_state.event_line(format!(
            "[event] evaluate pattern={:?} flags={}",
            snapshot.pattern, snapshot.flags
        ));
        self.compiler.set_flags(snapshot.flags);
        if snapshot.pattern != self.compiler.pattern()
            || self.compiler.state() == CompileState::Uncompiled
        {
            self.replace_pattern(&snapshot.pattern);
        }
        self.engine.set_text(&snapshot.text);
        Some(self.recompute())
    }

    /// Re-runs the pass without any input change.
    pub fn refresh(&mut self) -> Update {
        self.recompute()
    }

    /// Paints the latest spans onto `sink` in emitted order with signals
    /// blocked. Returns the number of spans applied.
    pub fn apply(&mut self, sink: &mut impl HighlightSink) -> usize {
        let _guard = self.blocker.block();
        for span in self.last.spans() {
            sink.apply_span(span);
        }
        self.last.spans().len()
    }

    pub fn reset_colors(&mut self) {
        self.engine.reset_colors();
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_passes(&mut self, enabled: bool) {
        self.trace_state.passes = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace_state.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.take()
    }

    fn ignored(&mut self, event: &str) -> bool {
        if self.blocker.is_blocked() {
            self.trace_state
                .event_line(format!("[event] {event} ignored while applying highlights"));
            true
        } else {
            false
        }
    }

    fn replace_pattern(&mut self, pattern: &str) {
        let changed = self.compiler.pattern() != pattern;
        if changed && self.config.color_reset == ColorResetPolicy::OnPatternChange {
            self.engine.reset_colors();
        }
        self.compiler.set_pattern(pattern);
    }

    fn recompute(&mut self) -> Update {
        let highlights = self.engine.highlight_matches(self.compiler.matcher());
        let pattern_error = self.compiler.error().map(|err| err.message().to_string());
        self.trace_state.pass_line(format!(
            "[pass] state={:?} matches={} spans={} error={}",
            self.compiler.state(),
            highlights.match_count(),
            highlights.spans().len(),
            pattern_error.as_deref().unwrap_or("none")
        ));
        self.last = highlights.clone();
        Update {
            highlights,
            pattern_error,
            compile_state: self.compiler.state(),
        }
    }
}
