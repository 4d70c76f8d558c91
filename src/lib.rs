//! Live match and capture-group highlighting for an interactive regex tester.
//!
//! A [`Session`] receives the tester's input events (pattern edits, flag
//! toggles, text edits) and answers each with an ordered list of
//! [`HighlightSpan`]s plus the current pattern error, if any. The pieces it
//! is built from are usable on their own:
//!
//! - [`PatternCompiler`] turns pattern text and a [`FlagSet`] into a
//!   [`CompiledMatcher`] or a captured [`PatternCompileError`].
//! - [`HighlightEngine`] scans text with a matcher and maps every match and
//!   participating group onto colored spans, keeping colors stable across
//!   passes.
//!
//! ```
//! use regexmate::{Session, SpanKind};
//!
//! let mut session = Session::new();
//! session.input_text_changed("12-34 and 56-78");
//! let update = session.pattern_text_changed(r"(\d+)-(\d+)").expect("not blocked");
//!
//! assert_eq!(update.highlights().match_count(), 2);
//! assert_eq!(update.spans()[0].kind, SpanKind::Clear);
//! assert_eq!(update.pattern_error(), None);
//! ```

mod color;
mod compiler;
mod config;
mod engine;
mod error;
mod flags;
mod matcher;
mod offsets;
mod session;
mod trace;

pub use color::{Color, ColorPool, Palette};
pub use compiler::{CompileOutcome, CompileState, PatternCompiler};
pub use config::{ColorResetPolicy, SessionConfig};
pub use engine::{HighlightEngine, HighlightSpan, Highlights, SpanKind};
pub use error::{Error, FlagParseError, MatcherError, PatternCompileError, Result};
pub use flags::{Flag, FlagSet};
pub use matcher::{Captures, CompiledMatcher, GroupMatch, MatcherBuilder, Matches};
pub use offsets::{OffsetUnit, text_len};
pub use session::{
    HighlightSink, InputEvent, OutputEvent, Session, SignalBlocker, SignalGuard, Snapshot, Update,
};
