use serde::Deserialize;

use crate::model::ids::CourseId;

/// The course manifest (`courses.json`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseManifest {
    pub courses: Vec<CatalogEntry>,
}

/// Maps a course id to the data file that describes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: CourseId,
    pub data_file: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseManifest {
    #[must_use]
    pub fn find(&self, id: &CourseId) -> Option<&CatalogEntry> {
        self.courses.iter().find(|c| &c.id == id)
    }
}

impl CatalogEntry {
    /// Label for course pickers; falls back to the id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}
