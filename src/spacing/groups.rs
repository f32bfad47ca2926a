//! Spacing group lookup
//!
//! A glyph should belong to at most one spacing group per side. When it
//! belongs to several, a warning is logged and the first group in the
//! font's group iteration order wins (sorted by name for UFO fonts, insertion
//! order for [`MemoryFont`](crate::font_source::MemoryFont)).

use super::side::{Side, SidePrefixes};
use crate::core::errors::SpacingResult;
use crate::font_source::SpacingFont;
use std::collections::BTreeMap;

/// The left and right spacing groups of a glyph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideGroups {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl SideGroups {
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }
}

/// Find the left and right spacing groups containing `glyph`
pub fn groups_for_glyph<F: SpacingFont + ?Sized>(
    font: &F,
    prefixes: &SidePrefixes,
    glyph: &str,
) -> SideGroups {
    let mut left_groups = Vec::new();
    let mut right_groups = Vec::new();

    for group_name in font.group_names() {
        let is_left = group_name.starts_with(&prefixes.left);
        let is_right = group_name.starts_with(&prefixes.right);
        if !is_left && !is_right {
            continue;
        }
        let contains_glyph = font
            .group(&group_name)
            .is_some_and(|members| members.iter().any(|member| member == glyph));
        if !contains_glyph {
            continue;
        }
        if is_left {
            left_groups.push(group_name.clone());
        }
        if is_right {
            right_groups.push(group_name);
        }
    }

    for (side, groups) in [(Side::Left, &left_groups), (Side::Right, &right_groups)] {
        if groups.len() > 1 {
            tracing::warn!(
                "Glyph '{}' is in more than one {} spacing group: {}; using '{}'",
                glyph,
                side,
                groups.join(" "),
                groups[0]
            );
        }
    }

    SideGroups {
        left: left_groups.into_iter().next(),
        right: right_groups.into_iter().next(),
    }
}

/// All glyphs in the same spacing group as `glyph` on `side`.
///
/// The list is the group's member list in stored order and includes
/// `glyph` itself; it is empty when the glyph has no group on that side.
pub fn siblings<F: SpacingFont + ?Sized>(
    font: &F,
    prefixes: &SidePrefixes,
    glyph: &str,
    side: Side,
) -> Vec<String> {
    groups_for_glyph(font, prefixes, glyph)
        .get(side)
        .and_then(|group_name| font.group(group_name))
        .unwrap_or_default()
}

/// Every group whose name carries a recognized side prefix
pub fn spacing_groups<F: SpacingFont + ?Sized>(
    font: &F,
    prefixes: &SidePrefixes,
) -> BTreeMap<String, Vec<String>> {
    font.group_names()
        .into_iter()
        .filter(|name| prefixes.is_spacing_group(name))
        .filter_map(|name| {
            let members = font.group(&name)?;
            Some((name, members))
        })
        .collect()
}

/// Outcome of [`make_group`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MakeGroup {
    Created(String),
    Exists(String),
}

impl MakeGroup {
    pub fn group_name(&self) -> &str {
        match self {
            MakeGroup::Created(name) | MakeGroup::Exists(name) => name,
        }
    }
}

/// Create a spacing group named after `glyph` on `side`, containing only
/// `glyph`. An existing group of that name is left untouched.
pub fn make_group<F: SpacingFont + ?Sized>(
    font: &mut F,
    prefixes: &SidePrefixes,
    glyph: &str,
    side: Side,
) -> SpacingResult<MakeGroup> {
    let group_name = prefixes.group_name(side, glyph);
    if font.group(&group_name).is_some() {
        tracing::debug!("Spacing group '{}' already exists", group_name);
        return Ok(MakeGroup::Exists(group_name));
    }

    let mut groups = BTreeMap::new();
    groups.insert(group_name.clone(), vec![glyph.to_string()]);
    font.set_groups(groups)?;
    tracing::info!("Created spacing group '{}'", group_name);
    Ok(MakeGroup::Created(group_name))
}
