//! Residue color schemes
//!
//! Static lookup tables from residue symbol to cell background. Lookups are
//! case-insensitive; symbols missing from a table resolve to the neutral
//! background instead of failing.

use serde::{Deserialize, Serialize};

use super::model::ResidueKind;
use crate::theme::Color;

/// Background for gaps, unknown symbols and missing residues
pub const NEUTRAL: Color = Color::rgb(0xFF, 0xFF, 0xFF);

const GREEN_100: Color = Color::rgb(0xDC, 0xFC, 0xE7);
const GREEN_200: Color = Color::rgb(0xBB, 0xF7, 0xD0);
const YELLOW_200: Color = Color::rgb(0xFE, 0xF0, 0x8A);
const RED_100: Color = Color::rgb(0xFE, 0xE2, 0xE2);
const RED_200: Color = Color::rgb(0xFE, 0xCA, 0xCA);
const PURPLE_100: Color = Color::rgb(0xF3, 0xE8, 0xFF);
const PURPLE_200: Color = Color::rgb(0xE9, 0xD5, 0xFF);
const PURPLE_300: Color = Color::rgb(0xD8, 0xB4, 0xFE);
const GRAY_200: Color = Color::rgb(0xE5, 0xE7, 0xEB);
const PINK_200: Color = Color::rgb(0xFB, 0xCF, 0xE8);
const BLUE_100: Color = Color::rgb(0xDB, 0xEA, 0xFE);
const BLUE_200: Color = Color::rgb(0xBF, 0xDB, 0xFE);
const ORANGE_200: Color = Color::rgb(0xFE, 0xD7, 0xAA);
const ORANGE_300: Color = Color::rgb(0xFD, 0xBA, 0x74);
const TEAL_200: Color = Color::rgb(0x99, 0xF6, 0xE4);

/// Available color scheme keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Physico-chemical grouping for proteins, one color per base for nucleotides
    #[default]
    Default,
    /// No residue coloring; every cell uses the neutral background
    Plain,
}

impl ColorScheme {
    pub const ALL: &'static [ColorScheme] = &[ColorScheme::Default, ColorScheme::Plain];

    /// Stable identifier used in config files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Plain => "plain",
        }
    }

    /// Parse a scheme key, falling back to the default scheme for unknown keys
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    /// Next scheme in cycling order
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Resolve the background color of a residue.
    ///
    /// `None` (a missing residue in a ragged row) and symbols absent from
    /// the table both resolve to [`NEUTRAL`].
    pub fn background(self, kind: ResidueKind, residue: Option<char>) -> Color {
        let Some(ch) = residue else {
            return NEUTRAL;
        };
        let ch = ch.to_ascii_uppercase();
        let found = match (self, kind) {
            (ColorScheme::Plain, _) => None,
            (ColorScheme::Default, ResidueKind::Protein) => default_protein(ch),
            (ColorScheme::Default, ResidueKind::Nucleotide) => default_nucleotide(ch),
        };
        found.unwrap_or(NEUTRAL)
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn default_protein(ch: char) -> Option<Color> {
    Some(match ch {
        'A' => GREEN_200,
        'C' => YELLOW_200,
        'D' | 'E' => RED_200,
        'F' => PURPLE_200,
        'G' => GRAY_200,
        'H' => PINK_200,
        'I' | 'L' => BLUE_200,
        'K' => ORANGE_200,
        'M' | 'V' => BLUE_100,
        'N' | 'Q' => RED_100,
        'P' => TEAL_200,
        'R' => ORANGE_300,
        'S' | 'T' => GREEN_100,
        'W' => PURPLE_300,
        'Y' => PURPLE_100,
        '-' => NEUTRAL,
        _ => return None,
    })
}

fn default_nucleotide(ch: char) -> Option<Color> {
    Some(match ch {
        'A' => GREEN_200,
        'C' => BLUE_200,
        'G' => YELLOW_200,
        'T' | 'U' => RED_200,
        'N' => GRAY_200,
        '-' | '.' => NEUTRAL,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let upper = ColorScheme::Default.background(ResidueKind::Nucleotide, Some('A'));
        let lower = ColorScheme::Default.background(ResidueKind::Nucleotide, Some('a'));
        assert_eq!(upper, lower);
        assert_eq!(upper, GREEN_200);
    }

    #[test]
    fn test_table_depends_on_kind() {
        let nuc = ColorScheme::Default.background(ResidueKind::Nucleotide, Some('C'));
        let prot = ColorScheme::Default.background(ResidueKind::Protein, Some('C'));
        assert_eq!(nuc, BLUE_200);
        assert_eq!(prot, YELLOW_200);
    }

    #[test]
    fn test_unknown_and_missing_fall_back_to_neutral() {
        let s = ColorScheme::Default;
        assert_eq!(s.background(ResidueKind::Nucleotide, Some('*')), NEUTRAL);
        assert_eq!(s.background(ResidueKind::Protein, Some('X')), NEUTRAL);
        assert_eq!(s.background(ResidueKind::Protein, None), NEUTRAL);
        assert_eq!(ColorScheme::Plain.background(ResidueKind::Protein, Some('A')), NEUTRAL);
    }

    #[test]
    fn test_from_name_and_cycle() {
        assert_eq!(ColorScheme::from_name("PLAIN"), ColorScheme::Plain);
        assert_eq!(ColorScheme::from_name("nope"), ColorScheme::Default);
        assert_eq!(ColorScheme::Default.next(), ColorScheme::Plain);
        assert_eq!(ColorScheme::Plain.next(), ColorScheme::Default);
    }
}
