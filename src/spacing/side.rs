//! Spacing sides and the group name prefixes that identify them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default prefix of left-side spacing groups (second glyph of a kerning pair)
pub const PREFIX_LEFTSIDE: &str = "public.kern2.";
/// Default prefix of right-side spacing groups (first glyph of a kerning pair)
pub const PREFIX_RIGHTSIDE: &str = "public.kern1.";

/// The side of a glyph a spacing group controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Single letter used in compact log output
    pub fn letter(&self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            other => Err(format!("unknown side '{other}', expected 'left' or 'right'")),
        }
    }
}

/// The pair of group name prefixes that mark spacing groups.
///
/// Passed to every operation that needs to recognize spacing groups, so a
/// font using its own naming convention only has to change this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePrefixes {
    pub left: String,
    pub right: String,
}

impl Default for SidePrefixes {
    fn default() -> Self {
        Self {
            left: PREFIX_LEFTSIDE.to_string(),
            right: PREFIX_RIGHTSIDE.to_string(),
        }
    }
}

impl SidePrefixes {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn prefix(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Which side a group name belongs to, if it carries a recognized prefix
    ///
    /// The left prefix is checked first when one prefix is a prefix of the other.
    pub fn side_of(&self, group_name: &str) -> Option<Side> {
        if group_name.starts_with(&self.left) {
            Some(Side::Left)
        } else if group_name.starts_with(&self.right) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn is_spacing_group(&self, group_name: &str) -> bool {
        self.side_of(group_name).is_some()
    }

    /// The group name `make_group` uses for a glyph
    pub fn group_name(&self, side: Side, glyph: &str) -> String {
        format!("{}{}", self.prefix(side), glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing() {
        assert_eq!("left".parse::<Side>(), Ok(Side::Left));
        assert_eq!("Right".parse::<Side>(), Ok(Side::Right));
        assert_eq!("r".parse::<Side>(), Ok(Side::Right));
        assert!("top".parse::<Side>().is_err());
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn test_default_prefixes() {
        let prefixes = SidePrefixes::default();
        assert_eq!(prefixes.prefix(Side::Left), "public.kern2.");
        assert_eq!(prefixes.prefix(Side::Right), "public.kern1.");
    }

    #[test]
    fn test_side_of_group_name() {
        let prefixes = SidePrefixes::default();
        assert_eq!(prefixes.side_of("public.kern2.o"), Some(Side::Left));
        assert_eq!(prefixes.side_of("public.kern1.n"), Some(Side::Right));
        assert_eq!(prefixes.side_of("uppercase"), None);
        assert!(!prefixes.is_spacing_group("public.kern3.x"));
    }

    #[test]
    fn test_custom_prefixes() {
        let prefixes = SidePrefixes::new("spacing.left.", "spacing.right.");
        assert_eq!(prefixes.group_name(Side::Left, "o"), "spacing.left.o");
        assert_eq!(prefixes.side_of("public.kern1.n"), None);
        assert_eq!(prefixes.side_of("spacing.right.n"), Some(Side::Right));
    }
}
