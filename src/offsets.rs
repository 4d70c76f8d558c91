//! Offset conversion between the pattern library's byte offsets and the
//! unit a text display counts in.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetUnit {
    /// UTF-8 byte offsets, as reported by the pattern library.
    Byte,
    /// Unicode scalar values.
    #[default]
    Char,
    /// UTF-16 code units, as counted by most GUI text widgets.
    Utf16,
}

impl FromStr for OffsetUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "byte" | "bytes" => Ok(Self::Byte),
            "char" | "chars" | "codepoint" => Ok(Self::Char),
            "utf16" | "utf-16" => Ok(Self::Utf16),
            other => Err(format!("unknown offset unit: {other}")),
        }
    }
}

/// Byte offset to display offset table for one text snapshot.
#[derive(Debug, Clone)]
pub(crate) struct OffsetMap {
    unit: OffsetUnit,
    // Indexed by byte offset; only entries at char boundaries are meaningful.
    table: Vec<usize>,
    total: usize,
}

impl OffsetMap {
    pub(crate) fn new(text: &str, unit: OffsetUnit) -> Self {
        if unit == OffsetUnit::Byte {
            return Self {
                unit,
                table: Vec::new(),
                total: text.len(),
            };
        }

        let mut table = vec![0; text.len() + 1];
        let mut position = 0;
        for (byte, ch) in text.char_indices() {
            let width = match unit {
                OffsetUnit::Utf16 => ch.len_utf16(),
                _ => 1,
            };
            for slot in &mut table[byte..byte + ch.len_utf8()] {
                *slot = position;
            }
            position += width;
        }
        table[text.len()] = position;
        Self {
            unit,
            table,
            total: position,
        }
    }

    pub(crate) fn convert(&self, byte_offset: usize) -> usize {
        match self.unit {
            OffsetUnit::Byte => byte_offset,
            _ => self
                .table
                .get(byte_offset)
                .copied()
                .unwrap_or(self.total),
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }
}

/// Length of `text` measured in `unit`.
pub fn text_len(text: &str, unit: OffsetUnit) -> usize {
    match unit {
        OffsetUnit::Byte => text.len(),
        OffsetUnit::Char => text.chars().count(),
        OffsetUnit::Utf16 => text.encode_utf16().count(),
    }
}
