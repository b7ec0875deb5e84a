//! RGB colors, palettes and group color assignment.

use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Largest palette the plots support. Qualitative palettes stop being
/// distinguishable beyond this many colors.
pub const MAX_PALETTE_COLORS: usize = 20;

/// An sRGB color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlotError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PlotError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = PlotError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The 20-color "tab20" qualitative palette.
const TAB20: [Color; MAX_PALETTE_COLORS] = [
    Color::new(0x1f, 0x77, 0xb4),
    Color::new(0xae, 0xc7, 0xe8),
    Color::new(0xff, 0x7f, 0x0e),
    Color::new(0xff, 0xbb, 0x78),
    Color::new(0x2c, 0xa0, 0x2c),
    Color::new(0x98, 0xdf, 0x8a),
    Color::new(0xd6, 0x27, 0x28),
    Color::new(0xff, 0x98, 0x96),
    Color::new(0x94, 0x67, 0xbd),
    Color::new(0xc5, 0xb0, 0xd5),
    Color::new(0x8c, 0x56, 0x4b),
    Color::new(0xc4, 0x9c, 0x94),
    Color::new(0xe3, 0x77, 0xc2),
    Color::new(0xf7, 0xb6, 0xd2),
    Color::new(0x7f, 0x7f, 0x7f),
    Color::new(0xc7, 0xc7, 0xc7),
    Color::new(0xbc, 0xbd, 0x22),
    Color::new(0xdb, 0xdb, 0x8d),
    Color::new(0x17, 0xbe, 0xcf),
    Color::new(0x9e, 0xda, 0xe5),
];

/// Ordered list of colors handed out to groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette from 1 to [`MAX_PALETTE_COLORS`] colors.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PlotError::InvalidParameter(
                "palette must contain at least one color".to_string(),
            ));
        }
        if colors.len() > MAX_PALETTE_COLORS {
            return Err(PlotError::Capacity {
                requested: colors.len(),
                available: MAX_PALETTE_COLORS,
            });
        }
        Ok(Self { colors })
    }

    /// Parse a palette from hex strings.
    pub fn from_hex<I, S>(hex: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = hex
            .into_iter()
            .map(|h| Color::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn tab20() -> Self {
        Self {
            colors: TAB20.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tab20()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PlotError;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// One legend row: a group and its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub group: String,
    pub color: Color,
    /// Whether the color came from the pinned (preferred) map.
    pub pinned: bool,
}

/// Group → color mapping built for one plot request.
///
/// Entries keep the order in which groups were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorAssignment {
    entries: Vec<LegendEntry>,
}

impl ColorAssignment {
    pub fn get(&self, group: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|e| e.group == group)
            .map(|e| e.color)
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign a color to every distinct group.
///
/// Groups are deduplicated in first-seen order. A group present in
/// `preferred` takes its pinned color; the others take palette colors in
/// first-seen order, skipping any color already pinned to a group so no two
/// groups share a color. Fails with [`PlotError::Capacity`] when more
/// unpinned groups remain than the palette has free colors.
pub fn assign_colors<S: AsRef<str>>(
    groups: &[S],
    palette: &Palette,
    preferred: Option<&BTreeMap<String, Color>>,
) -> Result<ColorAssignment> {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = groups
        .iter()
        .map(|name| name.as_ref())
        .filter(|g| seen.insert(*g))
        .collect();

    let pinned = |group: &str| preferred.and_then(|p| p.get(group)).copied();
    let used: HashSet<Color> = unique.iter().filter_map(|&g| pinned(g)).collect();
    let free: Vec<Color> = palette
        .colors()
        .iter()
        .copied()
        .filter(|c| !used.contains(c))
        .collect();

    let needs_generated = unique.iter().filter(|&&g| pinned(g).is_none()).count();
    let capacity = PlotError::Capacity {
        requested: needs_generated,
        available: free.len(),
    };
    if needs_generated > free.len() {
        return Err(capacity);
    }

    let mut generated = free.into_iter();
    let mut entries = Vec::with_capacity(unique.len());
    for group in unique {
        let (color, is_pinned) = match pinned(group) {
            Some(color) => (color, true),
            None => match generated.next() {
                Some(color) => (color, false),
                None => return Err(capacity),
            },
        };
        entries.push(LegendEntry {
            group: group.to_string(),
            color,
            pinned: is_pinned,
        });
    }

    Ok(ColorAssignment { entries })
}
