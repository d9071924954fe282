//! Member records.

use serde::{Deserialize, Deserializer, Serialize};

/// One person in the genealogy record set.
///
/// A member references its parent by id. Members without a parent are roots;
/// exactly one of them is the designated root (`is_root`), which the data
/// store never lets go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    parent_id: Option<String>,
    #[serde(default)]
    is_root: bool,
}

/// `null`, a missing key and `""` all mean "no parent".
fn deserialize_parent_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let parent_id = Option::<String>::deserialize(deserializer)?;
    Ok(parent_id.filter(|id| !id.is_empty()))
}

impl Member {
    /// Creates a parentless, non-root member.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            is_root: false,
        }
    }

    /// Creates the designated root member.
    pub fn root(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_root: true,
            ..Self::new(id, name)
        }
    }

    /// Sets the parent reference (builder style). An empty id clears it.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.set_parent(Some(parent_id.into()));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_parent(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id.filter(|id| !id.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_builders() {
        let member = Member::new("a", "Ada").with_parent("root");
        assert_eq!(member.id(), "a");
        assert_eq!(member.name(), "Ada");
        assert_eq!(member.parent_id(), Some("root"));
        assert!(!member.is_root());

        assert!(Member::root("root", "Root").is_root());
        assert_eq!(Member::new("b", "B").with_parent("").parent_id(), None);
    }

    #[test]
    fn test_member_deserialize_parent_variants() {
        let members: Vec<Member> = serde_json::from_str(
            r#"[
                {"id": "root", "name": "Root", "parentId": null, "isRoot": true},
                {"id": "a", "name": "A", "parentId": "root"},
                {"id": "b", "name": "B", "parentId": ""},
                {"id": "c", "name": "C"}
            ]"#,
        )
        .unwrap();

        assert!(members[0].is_root());
        assert_eq!(members[1].parent_id(), Some("root"));
        assert_eq!(members[2].parent_id(), None);
        assert_eq!(members[3].parent_id(), None);
        assert!(!members[3].is_root());
    }

    #[test]
    fn test_member_serialize_camel_case() {
        let json = serde_json::to_string(&Member::new("a", "A").with_parent("root")).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a","name":"A","parentId":"root","isRoot":false}"#
        );
    }
}
