//! Spacing group import and export
//!
//! Groups are stored as a JSON object mapping group names to arrays of
//! glyph names, indented with two spaces. Only groups with a recognized
//! side prefix are written; every entry in a file is read back.

use super::groups::spacing_groups;
use super::side::SidePrefixes;
use crate::core::errors::StoreError;
use crate::font_source::SpacingFont;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Group name to member list, as stored on disk
pub type GroupMap = BTreeMap<String, Vec<String>>;

/// What an import did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Groups that did not exist before
    pub created: Vec<String>,
    /// Existing groups whose members were overwritten
    pub replaced: Vec<String>,
}

impl ImportSummary {
    pub fn len(&self) -> usize {
        self.created.len() + self.replaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serialize groups as two-space indented JSON
pub fn groups_to_json(groups: &GroupMap) -> Result<String, StoreError> {
    let mut json = serde_json::to_string_pretty(groups)?;
    json.push('\n');
    Ok(json)
}

/// Parse a JSON object of group name to member list
pub fn groups_from_json(json: &str) -> Result<GroupMap, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Write the font's spacing groups to `path`; returns how many were written
pub fn export_groups<F: SpacingFont + ?Sized>(
    font: &F,
    prefixes: &SidePrefixes,
    path: &Path,
) -> Result<usize, StoreError> {
    let groups = spacing_groups(font, prefixes);
    let json = groups_to_json(&groups)?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported {} spacing groups to {:?}", groups.len(), path);
    Ok(groups.len())
}

/// Read groups from `path` and create or replace each of them in the font.
///
/// The whole file is parsed before anything is written, so a malformed file
/// leaves the font untouched. Groups not named in the file are kept. Member
/// names are not checked against the font.
pub fn import_groups<F: SpacingFont + ?Sized>(
    font: &mut F,
    path: &Path,
) -> Result<ImportSummary, StoreError> {
    let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let groups = groups_from_json(&json)?;

    let (replaced, created): (Vec<String>, Vec<String>) = groups
        .keys()
        .cloned()
        .partition(|name| font.group(name).is_some());
    let summary = ImportSummary { created, replaced };

    font.set_groups(groups)?;
    tracing::info!(
        "Imported {} groups from {:?} ({} new)",
        summary.len(),
        path,
        summary.created.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::MemoryFont;

    fn font() -> MemoryFont {
        let mut font = MemoryFont::new();
        font.insert_group("public.kern1.n", &["n", "h", "m"]);
        font.insert_group("public.kern2.o", &["o", "c", "e"]);
        font.insert_group("uppercase", &["A", "B"]);
        font
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let mut groups = GroupMap::new();
        groups.insert("public.kern1.n".to_string(), vec!["n".to_string()]);
        let json = groups_to_json(&groups).unwrap();
        assert_eq!(json, "{\n  \"public.kern1.n\": [\n    \"n\"\n  ]\n}\n");
    }

    #[test]
    fn test_export_only_spacing_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spacingGroups.json");
        let count = export_groups(&font(), &SidePrefixes::default(), &path).unwrap();
        assert_eq!(count, 2);

        let written = groups_from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.contains_key("public.kern1.n"));
        assert!(!written.contains_key("uppercase"));
    }

    #[test]
    fn test_export_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("groups.json");
        let result = export_groups(&font(), &SidePrefixes::default(), &path);
        assert!(matches!(result, Err(StoreError::Io { action: "write", .. })));
    }

    #[test]
    fn test_import_replaces_and_creates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(
            &path,
            r#"{"public.kern1.n": ["n", "m"], "public.kern2.a": ["a"], "uppercase": ["A", "B", "C"]}"#,
        )
        .unwrap();

        let mut font = font();
        let summary = import_groups(&mut font, &path).unwrap();

        assert_eq!(summary.created, vec!["public.kern2.a"]);
        assert_eq!(summary.replaced, vec!["public.kern1.n", "uppercase"]);
        assert_eq!(
            font.group("public.kern1.n"),
            Some(vec!["n".to_string(), "m".to_string()])
        );
        assert_eq!(font.group("public.kern2.a"), Some(vec!["a".to_string()]));
        assert_eq!(font.group("uppercase").map(|m| m.len()), Some(3));
        // Not in the file
        assert_eq!(font.group("public.kern2.o").map(|m| m.len()), Some(3));
    }

    #[test]
    fn test_malformed_json_imports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, r#"{"public.kern2.a": ["a"], "public.kern2.b": "#).unwrap();

        let mut font = font();
        let result = import_groups(&mut font, &path);
        assert!(matches!(result, Err(StoreError::Parse(_))));
        assert_eq!(font.group("public.kern2.a"), None);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut font = font();
        let result = import_groups(&mut font, &dir.path().join("nope.json"));
        assert!(matches!(result, Err(StoreError::Io { action: "read", .. })));
    }

    #[test]
    fn test_import_with_only_one_side() {
        let mut font = MemoryFont::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, r#"{"public.kern2.o": ["o", "c"]}"#).unwrap();
        let summary = import_groups(&mut font, &path).unwrap();
        assert_eq!(summary.created.len(), 1);
        assert_eq!(font.group_names(), vec!["public.kern2.o"]);
    }
}
