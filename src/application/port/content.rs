// SPDX-License-Identifier: MPL-2.0
//! Content source port definitions.
//!
//! A content source answers the three queries the portfolio needs. The CMS
//! client and the offline export reader both implement it, so everything
//! above this trait is testable without a network.

use crate::content::Project;
use crate::error::Result;
use async_trait::async_trait;

/// Read access to project documents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All projects with their sub-projects, ordered by display number.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be queried or decoded.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// The project with the given slug, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be queried or decoded.
    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>>;

    /// Projects of one category, ordered by display number.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be queried or decoded.
    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    async fn projects(&self) -> Result<Vec<Project>> {
        (**self).projects().await
    }

    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        (**self).project_by_slug(slug).await
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        (**self).projects_by_category(category).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
