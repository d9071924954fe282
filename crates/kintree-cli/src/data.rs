//! Loading of family data files.
//!
//! This is the store boundary of the CLI: every loaded snapshot is passed
//! through [`FamilyData::from_parts`], which synthesizes a missing root.

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use kintree::{
    KintreeError,
    family::{FamilyData, Member, StyleConfig},
};

/// On-disk shape of a family data file.
#[derive(Debug, Deserialize)]
struct FamilyDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    styles: Option<StyleConfig>,
}

/// Reads a JSON family data file.
///
/// `default_styles` apply when the file has no `styles` object.
///
/// # Errors
///
/// Returns `KintreeError::Io` if the file cannot be read and
/// `KintreeError::Document` if it is not a valid family document.
pub fn load_family(
    path: impl AsRef<Path>,
    default_styles: Option<&StyleConfig>,
) -> Result<FamilyData, KintreeError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_family(&content, &path.display().to_string(), default_styles)
}

fn parse_family(
    content: &str,
    source_name: &str,
    default_styles: Option<&StyleConfig>,
) -> Result<FamilyData, KintreeError> {
    let document: FamilyDocument = serde_json::from_str(content)
        .map_err(|err| KintreeError::new_document_error("family data", source_name, err))?;

    let styles = match document.styles {
        Some(styles) => styles,
        None => {
            debug!(configured = default_styles.is_some(); "Family data has no styles");
            default_styles.cloned().unwrap_or_default()
        }
    };

    let data = FamilyData::from_parts(document.title, document.members, styles);
    info!(
        title = data.title(),
        members = data.members().len();
        "Family data loaded"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use kintree::{draw::NodeShape, family::ExportFormat};

    use super::*;

    #[test]
    fn test_parse_full_document() {
        let data = parse_family(
            r##"{
                "title": "Lee",
                "members": [
                    {"id": "root", "name": "Grandma", "parentId": null, "isRoot": true},
                    {"id": "a", "name": "Mom", "parentId": "root"},
                    {"id": "b", "name": "Uncle", "parentId": ""}
                ],
                "styles": {"nodeShape": "hexagon", "exportFormat": "png", "titleSize": "24"}
            }"##,
            "test",
            None,
        )
        .unwrap();

        assert_eq!(data.title(), "Lee");
        assert_eq!(data.members().len(), 3);
        assert_eq!(data.member("b").unwrap().parent_id(), None);
        assert_eq!(data.styles().node_shape(), NodeShape::Hexagon);
        assert_eq!(data.styles().export_format(), ExportFormat::Png);
        assert_eq!(data.styles().title_size(), 24);
    }

    #[test]
    fn test_missing_root_is_synthesized() {
        let data = parse_family(
            r#"{"members": [{"id": "a", "name": "A", "parentId": "root"}]}"#,
            "test",
            None,
        )
        .unwrap();

        assert_eq!(data.members()[0].id(), "root");
        assert!(data.members()[0].is_root());
    }

    #[test]
    fn test_default_styles_apply_only_without_styles() {
        let defaults = StyleConfig::default().with_node_shape(NodeShape::Circle);

        let data = parse_family(r#"{"title": "x"}"#, "test", Some(&defaults)).unwrap();
        assert_eq!(data.styles().node_shape(), NodeShape::Circle);

        let data = parse_family(r#"{"styles": {}}"#, "test", Some(&defaults)).unwrap();
        assert_eq!(data.styles().node_shape(), NodeShape::Rectangle);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_family("{ not json", "family.json", None).unwrap_err();
        assert!(matches!(
            err,
            KintreeError::Document {
                kind: "family data",
                ..
            }
        ));
        assert!(err.to_string().contains("family.json"));
    }
}
