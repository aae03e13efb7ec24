// SPDX-License-Identifier: MPL-2.0
//! GROQ queries issued against the CMS.
//!
//! Parameters are referenced as `$name` and passed separately, never
//! interpolated into the query text.

/// Projection shared by every sub-project: gallery assets are dereferenced so
/// classification has URL, MIME type and dimensions at hand.
macro_rules! sub_projects_projection {
    () => {
        "subProjects[] {
    _key,
    pv,
    title,
    description,
    image,
    gallery[] {
      _type,
      _key,
      asset->{
        _id,
        url,
        originalFilename,
        mimeType,
        metadata {
          dimensions {
            width,
            height
          }
        }
      },
      caption,
      alt
    }
  }"
    };
}

/// All projects with their sub-projects, ordered by display number.
pub const PROJECTS: &str = concat!(
    r#"*[_type == "project"] | order(number asc) {
  _id,
  number,
  title,
  slug,
  year,
  category,
  description,
  mainImage,
  tags,
  themes,
  video,
  videos,
  "#,
    sub_projects_projection!(),
    "\n}"
);

/// One project by slug. Parameter: `$slug`.
pub const PROJECT_BY_SLUG: &str = concat!(
    r#"*[_type == "project" && slug.current == $slug][0] {
  _id,
  number,
  title,
  slug,
  year,
  category,
  description,
  mainImage,
  tags,
  themes,
  video,
  videos,
  "#,
    sub_projects_projection!(),
    "\n}"
);

/// Projects of one category, without sub-projects. Parameter: `$category`.
pub const PROJECTS_BY_CATEGORY: &str = r#"*[_type == "project" && category == $category] | order(number asc) {
  _id,
  number,
  title,
  slug,
  year,
  category,
  description,
  mainImage,
  tags
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_dereference_gallery_assets() {
        for query in [PROJECTS, PROJECT_BY_SLUG] {
            assert!(query.contains("asset->{"));
            assert!(query.contains("originalFilename"));
            assert!(query.trim_end().ends_with('}'));
        }
    }

    #[test]
    fn queries_take_parameters() {
        assert!(PROJECT_BY_SLUG.contains("$slug"));
        assert!(PROJECTS_BY_CATEGORY.contains("$category"));
        assert!(!PROJECTS_BY_CATEGORY.contains("subProjects"));
    }
}
