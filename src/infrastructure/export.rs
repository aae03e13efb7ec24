// SPDX-License-Identifier: MPL-2.0
//! Offline content source backed by a JSON export.
//!
//! The export is the result of the projects query saved to disk: either a
//! bare array of projects or the API envelope `{ "result": [...] }`.

use crate::application::port::ContentSource;
use crate::content::Project;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportFile {
    Envelope { result: Vec<Project> },
    Bare(Vec<Project>),
}

/// Projects loaded once from a JSON file and filtered in memory.
#[derive(Debug, Clone)]
pub struct ExportSource {
    path: PathBuf,
    projects: Vec<Project>,
}

impl ExportSource {
    /// Reads and decodes an export file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Io`] if the file cannot be read and
    /// [`crate::error::Error::Decode`] if it is not a project export.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = tokio::fs::read(&path).await?;
        let mut projects = Self::parse(&bytes)?;
        projects.sort_by(|a, b| compare_numbers(a.number.as_deref(), b.number.as_deref()));
        tracing::debug!(path = %path.display(), count = projects.len(), "loaded content export");
        Ok(Self { path, projects })
    }

    /// Wraps projects that are already in memory.
    #[must_use]
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self {
            path: PathBuf::new(),
            projects,
        }
    }

    fn parse(bytes: &[u8]) -> Result<Vec<Project>> {
        Ok(match serde_json::from_slice::<ExportFile>(bytes)? {
            ExportFile::Envelope { result } | ExportFile::Bare(result) => result,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Orders display numbers numerically when both parse, textually otherwise.
/// Projects without a number sort last.
fn compare_numbers(a: Option<&str>, b: Option<&str>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[async_trait]
impl ContentSource for ExportSource {
    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        Ok(self.projects.iter().find(|p| p.slug() == slug).cloned())
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .map(|p| Project {
                sub_projects: Vec::new(),
                ..p.clone()
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "export"
    }
}
