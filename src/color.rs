use std::collections::BTreeMap;
use std::fmt;

pub(crate) const DEFAULT_COLOR_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
const ZERO_SEED_REPLACEMENT: u64 = 0xA5A5_A5A5_A5A5_A5A5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Seeded source of light pastel colors.
#[derive(Debug, Clone)]
pub struct Palette {
    rng_state: u64,
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_seed(DEFAULT_COLOR_SEED)
    }
}

impl Palette {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_state: if seed == 0 {
                ZERO_SEED_REPLACEMENT
            } else {
                seed
            },
        }
    }

    /// Each channel is `(205 + uniform(0..=255)) / 2`, which keeps every
    /// channel within `102..=230`.
    pub fn next_color(&mut self) -> Color {
        let r = self.next_channel();
        let g = self.next_channel();
        let b = self.next_channel();
        Color::new(r, g, b)
    }

    fn next_channel(&mut self) -> u8 {
        let sample = (self.next_u64() >> 56) as u16;
        ((205 + sample) / 2) as u8
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.rng_state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.rng_state = if x == 0 { ZERO_SEED_REPLACEMENT } else { x };
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

/// Ordinal to color map filled lazily on first use.
#[derive(Debug, Clone, Default)]
pub struct ColorPool {
    assigned: BTreeMap<usize, Color>,
}

impl ColorPool {
    pub fn get(&self, ordinal: usize) -> Option<Color> {
        self.assigned.get(&ordinal).copied()
    }

    pub fn resolve(&mut self, ordinal: usize, palette: &mut Palette) -> Color {
        *self
            .assigned
            .entry(ordinal)
            .or_insert_with(|| palette.next_color())
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn clear(&mut self) {
        self.assigned.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_stay_in_pastel_range() {
        let mut palette = Palette::with_seed(7);
        for _ in 0..1_000 {
            let color = palette.next_color();
            for channel in [color.r, color.g, color.b] {
                assert!((102..=230).contains(&channel), "channel {channel}");
            }
        }
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut left = Palette::with_seed(42);
        let mut right = Palette::with_seed(42);
        for _ in 0..16 {
            assert_eq!(left.next_color(), right.next_color());
        }
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut palette = Palette::with_seed(0);
        let first = palette.next_color();
        let second = palette.next_color();
        assert_ne!(first, second);
    }

    #[test]
    fn pool_assigns_once_per_ordinal() {
        let mut palette = Palette::default();
        let mut pool = ColorPool::default();
        let first = pool.resolve(3, &mut palette);
        let other = pool.resolve(0, &mut palette);
        assert_eq!(pool.resolve(3, &mut palette), first);
        assert_eq!(pool.get(0), Some(other));
        assert_eq!(pool.get(1), None);
        assert_eq!(pool.len(), 2);
        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(Color::new(0xcd, 0x66, 0xe6).to_hex(), "#cd66e6");
        assert_eq!(Color::new(1, 2, 3).to_string(), "#010203");
    }
}
