// SPDX-License-Identifier: MPL-2.0
//! Content access that never fails.
//!
//! Pages treat a failed CMS query exactly like an empty result: they show a
//! "no content" state. [`ContentService`] applies that rule in one place and
//! logs what went wrong.

use super::port::ContentSource;
use crate::content::Project;

/// Wraps a [`ContentSource`], degrading every error to an empty result.
#[derive(Debug, Clone)]
pub struct ContentService<S> {
    source: S,
}

impl<S: ContentSource> ContentService<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// All projects, or an empty list on failure.
    pub async fn projects(&self) -> Vec<Project> {
        self.source.projects().await.unwrap_or_else(|err| {
            tracing::warn!(source = self.source.name(), %err, key = err.message_key(), "projects query failed");
            Vec::new()
        })
    }

    /// One project by slug, or `None` when missing or on failure.
    pub async fn project(&self, slug: &str) -> Option<Project> {
        match self.source.project_by_slug(slug).await {
            Ok(project) => project,
            Err(err) => {
                tracing::warn!(source = self.source.name(), slug, %err, key = err.message_key(), "project query failed");
                None
            }
        }
    }

    /// Projects of one category, or an empty list on failure.
    pub async fn projects_by_category(&self, category: &str) -> Vec<Project> {
        self.source
            .projects_by_category(category)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(source = self.source.name(), category, %err, key = err.message_key(), "category query failed");
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use async_trait::async_trait;

    struct Failing;

    #[async_trait]
    impl ContentSource for Failing {
        async fn projects(&self) -> Result<Vec<Project>> {
            Err(Error::Http("connection refused".into()))
        }

        async fn project_by_slug(&self, _slug: &str) -> Result<Option<Project>> {
            Err(Error::Cms {
                status: 500,
                message: "boom".into(),
            })
        }

        async fn projects_by_category(&self, _category: &str) -> Result<Vec<Project>> {
            Err(Error::Decode("bad json".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct Fixed(Vec<Project>);

    #[async_trait]
    impl ContentSource for Fixed {
        async fn projects(&self) -> Result<Vec<Project>> {
            Ok(self.0.clone())
        }

        async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
            Ok(self.0.iter().find(|p| p.slug() == slug).cloned())
        }

        async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
            Ok(self
                .0
                .iter()
                .filter(|p| p.category.as_deref() == Some(category))
                .cloned()
                .collect())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let service = ContentService::new(Failing);
        assert!(service.projects().await.is_empty());
        assert!(service.project("anything").await.is_none());
        assert!(service.projects_by_category("print").await.is_empty());
    }

    #[tokio::test]
    async fn successes_pass_through() {
        let project = Project {
            id: "1".into(),
            title: "Print Work".into(),
            category: Some("print".into()),
            ..Project::default()
        };
        let service = ContentService::new(Box::new(Fixed(vec![project])) as Box<dyn ContentSource>);
        assert_eq!(service.projects().await.len(), 1);
        assert!(service.project("print-work").await.is_some());
        assert_eq!(service.projects_by_category("print").await.len(), 1);
        assert_eq!(service.source().name(), "fixed");
    }
}
