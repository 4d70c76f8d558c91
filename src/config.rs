use crate::color::DEFAULT_COLOR_SEED;
use crate::error::{Error, Result};
use crate::offsets::OffsetUnit;

/// When the match and group color pools are emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorResetPolicy {
    /// Colors live as long as the session.
    #[default]
    Session,
    /// Colors are reassigned whenever the pattern text changes.
    OnPatternChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub offset_unit: OffsetUnit,
    pub color_seed: u64,
    pub color_reset: ColorResetPolicy,
    pub backtrack_limit: Option<usize>,
    pub trace: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            offset_unit: OffsetUnit::default(),
            color_seed: DEFAULT_COLOR_SEED,
            color_reset: ColorResetPolicy::default(),
            backtrack_limit: None,
            trace: false,
        }
    }
}

impl SessionConfig {
    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = unit;
        self
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    pub fn with_color_reset(mut self, policy: ColorResetPolicy) -> Self {
        self.color_reset = policy;
        self
    }

    pub fn with_backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Defaults overlaid with `REGEXMATE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("REGEXMATE_COLOR_SEED") {
            config.color_seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|err| Error::Config(format!("REGEXMATE_COLOR_SEED={raw}: {err}")))?;
        }
        if let Some(raw) = lookup("REGEXMATE_OFFSET_UNIT") {
            config.offset_unit = raw
                .parse::<OffsetUnit>()
                .map_err(|err| Error::Config(format!("REGEXMATE_OFFSET_UNIT={raw}: {err}")))?;
        }
        if let Some(raw) = lookup("REGEXMATE_BACKTRACK_LIMIT") {
            let limit = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "REGEXMATE_BACKTRACK_LIMIT={raw}: expected a positive integer"
                    ))
                })?;
            config.backtrack_limit = Some(limit);
        }
        if let Some(raw) = lookup("REGEXMATE_TRACE") {
            config.trace = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(Error::Config(format!(
                        "REGEXMATE_TRACE={raw}: expected a boolean"
                    )));
                }
            };
        }

        Ok(config)
    }
}
