//! Hover definition types
//!
//! Definitions are loaded from JSON files that describe which items a hover
//! applies to and what text it shows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Value `is_hover_map` must carry for a file to be treated as hover data
pub const HOVER_MAP_SENTINEL: &str = "absolutely";

/// Marker inserted between the lines of one hover
pub const LINE_BREAK: &str = "</br>";

/// Which items a definition targets. All three selectors are unioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Explicit item ids, used verbatim
    #[serde(default)]
    pub ids: Vec<ItemId>,

    /// Exact item names
    #[serde(default)]
    pub items: Vec<String>,

    /// Item name patterns; a name must match in full
    #[serde(default)]
    pub items_regex: Vec<String>,
}

impl TargetSpec {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.items.is_empty() && self.items_regex.is_empty()
    }
}

/// One hover rule: a target selection plus one or more hover texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverDefinition {
    #[serde(flatten)]
    pub target: TargetSpec,

    /// Authored hovers, one inner list of lines per hover
    #[serde(default, rename = "hovers")]
    pub lines: Vec<Vec<String>>,

    /// `lines` joined with [`LINE_BREAK`], filled once at load time
    #[serde(skip)]
    pub templates: Vec<String>,

    /// Ids the target resolves to; recomputed on every index rebuild
    #[serde(skip)]
    pub resolved_ids: HashSet<ItemId>,
}

impl HoverDefinition {
    /// Join every hover's lines into a single template string
    pub fn prepare_templates(&mut self) {
        self.templates = self.lines.iter().map(|lines| lines.join(LINE_BREAK)).collect();
    }
}

/// Root structure for hover files (JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hover_map: Option<String>,

    #[serde(default)]
    pub hovers: Vec<HoverDefinition>,
}

impl HoverDocument {
    /// Only documents carrying the exact sentinel are authoritative hover data
    pub fn is_valid(&self) -> bool {
        self.is_hover_map.as_deref() == Some(HOVER_MAP_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hover_document() {
        let json = r#"{
            "is_hover_map": "absolutely",
            "hovers": [
                {
                    "ids": [5496],
                    "items": ["Pineapple sapling"],
                    "items_regex": ["Pineapple .*"],
                    "hovers": [["Line A", "Line B"], ["Worth <%VALUE%>"]]
                },
                {
                    "hovers": [["No targets"]]
                }
            ]
        }"#;

        let doc: HoverDocument = serde_json::from_str(json).expect("Failed to parse JSON");
        assert!(doc.is_valid());
        assert_eq!(doc.hovers.len(), 2);

        let def = &doc.hovers[0];
        assert_eq!(def.target.ids, vec![5496]);
        assert_eq!(def.target.items, vec!["Pineapple sapling"]);
        assert_eq!(def.target.items_regex, vec!["Pineapple .*"]);
        assert_eq!(def.lines.len(), 2);
        assert!(def.templates.is_empty());

        assert!(doc.hovers[1].target.is_empty());
    }

    #[test]
    fn prepare_templates_joins_lines() {
        let mut def = HoverDefinition {
            lines: vec![
                vec!["Line A".to_string(), "Line B".to_string()],
                vec!["Single".to_string()],
                vec![],
            ],
            ..Default::default()
        };
        def.prepare_templates();
        assert_eq!(def.templates, vec!["Line A</br>Line B", "Single", ""]);
    }

    #[test]
    fn sentinel_must_match_exactly() {
        let missing: HoverDocument = serde_json::from_str(r#"{"hovers": []}"#).unwrap();
        assert!(!missing.is_valid());

        let wrong: HoverDocument =
            serde_json::from_str(r#"{"is_hover_map": "yes", "hovers": []}"#).unwrap();
        assert!(!wrong.is_valid());

        let shouting: HoverDocument =
            serde_json::from_str(r#"{"is_hover_map": "ABSOLUTELY"}"#).unwrap();
        assert!(!shouting.is_valid());
    }
}
