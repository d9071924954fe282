//! The family record set and its snapshot type.
//!
//! [`FamilyData`] is the single value owned by the surrounding application.
//! It is never mutated in place by the pipeline: every store-boundary
//! operation consumes a snapshot and returns the next one with its
//! [`version`](FamilyData::version) bumped.
//!
//! # Example
//!
//! ```
//! use kintree_core::family::{FamilyData, Member};
//!
//! let data = FamilyData::new("Smiths");
//! let data = data
//!     .with_member_added(Member::new("a", "Alice").with_parent("root"))
//!     .unwrap();
//!
//! assert_eq!(data.members().len(), 2);
//! assert_eq!(data.version(), 1);
//! assert_eq!(data.export_file_name(), "Smiths.svg");
//! ```

mod member;
mod style;

pub use member::Member;
pub use style::{ExportFormat, Palette, StyleConfig, StyleError};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the designated root member.
pub const ROOT_ID: &str = "root";

/// Name given to a synthesized root member.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// File stem used when the diagram has no title.
pub const DEFAULT_FILE_STEM: &str = "family-tree";

/// Errors raised by store-boundary operations on [`FamilyData`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FamilyError {
    #[error("a member with id `{0}` already exists")]
    DuplicateId(String),

    #[error("no member with id `{0}`")]
    UnknownMember(String),

    #[error("the root member `{0}` cannot be removed or re-parented")]
    RootImmutable(String),

    #[error("member `{0}` cannot be its own parent")]
    SelfParent(String),
}

/// Everything the pipeline needs to draw one diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyData {
    #[serde(default)]
    version: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    styles: StyleConfig,
}

impl Default for FamilyData {
    fn default() -> Self {
        Self::new("")
    }
}

impl FamilyData {
    /// Creates a snapshot holding only the root member and default styles.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            version: 0,
            title: title.into(),
            members: vec![Member::root(ROOT_ID, DEFAULT_ROOT_NAME)],
            styles: StyleConfig::default(),
        }
    }

    /// Creates a snapshot from raw parts, enforcing the root invariant.
    pub fn from_parts(title: impl Into<String>, members: Vec<Member>, styles: StyleConfig) -> Self {
        Self {
            version: 0,
            title: title.into(),
            members,
            styles,
        }
        .ensure_root()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn styles(&self) -> &StyleConfig {
        &self.styles
    }

    /// Returns the first member with the given id.
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id() == id)
    }

    /// Returns the parent of member `id`, if it has one that exists.
    pub fn parent_of(&self, id: &str) -> Option<&Member> {
        self.member(id)
            .and_then(Member::parent_id)
            .and_then(|parent_id| self.member(parent_id))
    }

    /// Guarantees the designated root member exists.
    ///
    /// When no member has the id [`ROOT_ID`], a root is synthesized and
    /// inserted at the front of the list. Applied to every loaded snapshot.
    pub fn ensure_root(mut self) -> Self {
        if self.member(ROOT_ID).is_none() {
            debug!(members = self.members.len(); "Synthesizing missing root member");
            self.members.insert(0, Member::root(ROOT_ID, DEFAULT_ROOT_NAME));
        }
        self
    }

    fn next(mut self) -> Self {
        self.version += 1;
        self
    }

    /// Appends a new member.
    ///
    /// # Errors
    ///
    /// [`FamilyError::DuplicateId`] if the id is taken, [`FamilyError::SelfParent`]
    /// if the member references itself.
    pub fn with_member_added(mut self, member: Member) -> Result<Self, FamilyError> {
        if self.member(member.id()).is_some() {
            return Err(FamilyError::DuplicateId(member.id().to_string()));
        }
        if member.parent_id() == Some(member.id()) {
            return Err(FamilyError::SelfParent(member.id().to_string()));
        }

        self.members.push(member);
        Ok(self.next())
    }

    /// Replaces the member that has the same id.
    ///
    /// # Errors
    ///
    /// [`FamilyError::UnknownMember`] for an unknown id,
    /// [`FamilyError::RootImmutable`] when the root would gain a parent and
    /// [`FamilyError::SelfParent`] when a member would parent itself.
    pub fn with_member_updated(mut self, member: Member) -> Result<Self, FamilyError> {
        let Some(index) = self.members.iter().position(|m| m.id() == member.id()) else {
            return Err(FamilyError::UnknownMember(member.id().to_string()));
        };
        if member.parent_id() == Some(member.id()) {
            return Err(FamilyError::SelfParent(member.id().to_string()));
        }

        let existing = &self.members[index];
        if existing.is_root() {
            if member.parent_id().is_some() {
                return Err(FamilyError::RootImmutable(member.id().to_string()));
            }
            let mut root = existing.clone();
            root.set_name(member.name());
            self.members[index] = root;
        } else {
            self.members[index] = member;
        }

        Ok(self.next())
    }

    /// Removes a member; its children become parentless.
    ///
    /// # Errors
    ///
    /// [`FamilyError::UnknownMember`] for an unknown id and
    /// [`FamilyError::RootImmutable`] for the root.
    pub fn with_member_removed(mut self, id: &str) -> Result<Self, FamilyError> {
        let Some(member) = self.member(id) else {
            return Err(FamilyError::UnknownMember(id.to_string()));
        };
        if member.is_root() {
            return Err(FamilyError::RootImmutable(id.to_string()));
        }

        self.members.retain(|member| member.id() != id);
        for member in &mut self.members {
            if member.parent_id() == Some(id) {
                member.set_parent(None);
            }
        }

        Ok(self.next())
    }

    /// Drops every member except a fresh root; title and styles are kept.
    pub fn with_members_reset(mut self) -> Self {
        self.members = vec![Member::root(ROOT_ID, DEFAULT_ROOT_NAME)];
        self.next()
    }

    /// Replaces the style settings wholesale.
    pub fn with_styles(mut self, styles: StyleConfig) -> Self {
        self.styles = styles;
        self.next()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self.next()
    }

    /// Download name of an export: `{title}.{extension}`, or `family-tree.{extension}`
    /// when the title is blank.
    pub fn export_file_name(&self) -> String {
        self.export_file_name_for(self.styles.export_format())
    }

    /// Same as [`export_file_name`](Self::export_file_name) for an explicit format.
    pub fn export_file_name_for(&self, format: ExportFormat) -> String {
        let stem = match self.title.trim() {
            "" => DEFAULT_FILE_STEM,
            title => title,
        };
        format!("{stem}.{}", format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FamilyData {
        FamilyData::new("Test")
            .with_member_added(Member::new("a", "A").with_parent(ROOT_ID))
            .unwrap()
            .with_member_added(Member::new("b", "B").with_parent("a"))
            .unwrap()
    }

    #[test]
    fn test_new_has_root() {
        let data = FamilyData::new("");
        assert_eq!(data.members().len(), 1);
        assert!(data.members()[0].is_root());
        assert_eq!(data.version(), 0);
    }

    #[test]
    fn test_ensure_root_inserts_at_front() {
        let data = FamilyData::from_parts("", vec![Member::new("a", "A")], StyleConfig::default());

        assert_eq!(data.members().len(), 2);
        assert_eq!(data.members()[0].id(), ROOT_ID);
        assert!(data.members()[0].is_root());
    }

    #[test]
    fn test_ensure_root_keeps_existing_root() {
        let data = FamilyData::from_parts(
            "",
            vec![Member::new("a", "A"), Member::root(ROOT_ID, "Eve")],
            StyleConfig::default(),
        );

        assert_eq!(data.members().len(), 2);
        assert_eq!(data.member(ROOT_ID).unwrap().name(), "Eve");
    }

    #[test]
    fn test_add_rejects_duplicates_and_self_parent() {
        let data = sample();
        assert_eq!(
            data.clone().with_member_added(Member::new("a", "Again")),
            Err(FamilyError::DuplicateId("a".to_string()))
        );
        assert_eq!(
            data.with_member_added(Member::new("c", "C").with_parent("c")),
            Err(FamilyError::SelfParent("c".to_string()))
        );
    }

    #[test]
    fn test_versions_increase() {
        let data = sample();
        assert_eq!(data.version(), 2);
        let data = data.with_styles(StyleConfig::default());
        assert_eq!(data.version(), 3);
    }

    #[test]
    fn test_update_member() {
        let data = sample()
            .with_member_updated(Member::new("b", "Bea").with_parent(ROOT_ID))
            .unwrap();

        let b = data.member("b").unwrap();
        assert_eq!(b.name(), "Bea");
        assert_eq!(b.parent_id(), Some(ROOT_ID));
    }

    #[test]
    fn test_update_root_name_only() {
        let data = sample()
            .with_member_updated(Member::new(ROOT_ID, "Adam"))
            .unwrap();
        let root = data.member(ROOT_ID).unwrap();
        assert_eq!(root.name(), "Adam");
        assert!(root.is_root());

        assert_eq!(
            sample().with_member_updated(Member::new(ROOT_ID, "Adam").with_parent("a")),
            Err(FamilyError::RootImmutable(ROOT_ID.to_string()))
        );
    }

    #[test]
    fn test_update_unknown_member() {
        assert_eq!(
            sample().with_member_updated(Member::new("zz", "Z")),
            Err(FamilyError::UnknownMember("zz".to_string()))
        );
    }

    #[test]
    fn test_remove_orphans_children() {
        let data = sample().with_member_removed("a").unwrap();

        assert!(data.member("a").is_none());
        assert_eq!(data.member("b").unwrap().parent_id(), None);
    }

    #[test]
    fn test_remove_root_is_rejected() {
        assert_eq!(
            sample().with_member_removed(ROOT_ID),
            Err(FamilyError::RootImmutable(ROOT_ID.to_string()))
        );
    }

    #[test]
    fn test_reset_members() {
        let data = sample().with_title("Kept").with_members_reset();
        assert_eq!(data.members().len(), 1);
        assert_eq!(data.title(), "Kept");
    }

    #[test]
    fn test_parent_of() {
        let data = sample();
        assert_eq!(data.parent_of("b").unwrap().id(), "a");
        assert!(data.parent_of(ROOT_ID).is_none());
    }

    #[test]
    fn test_export_file_name() {
        let data = FamilyData::new("  ");
        assert_eq!(data.export_file_name(), "family-tree.svg");

        let data = FamilyData::new("Kim Family")
            .with_styles(StyleConfig::default().with_export_format(ExportFormat::Jpeg));
        assert_eq!(data.export_file_name(), "Kim Family.jpeg");
        assert_eq!(data.export_file_name_for(ExportFormat::Png), "Kim Family.png");
    }

    #[test]
    fn test_deserialize_document() {
        let data: FamilyData = serde_json::from_str(
            r#"{
                "title": "Demo",
                "members": [{"id": "a", "name": "A", "parentId": "root"}],
                "styles": {"nodeShape": "circle"}
            }"#,
        )
        .unwrap();
        let data = data.ensure_root();

        assert_eq!(data.version(), 0);
        assert_eq!(data.members()[0].id(), ROOT_ID);
        assert_eq!(data.styles().node_shape(), crate::draw::NodeShape::Circle);
    }
}
