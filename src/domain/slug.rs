// SPDX-License-Identifier: MPL-2.0
//! URL slugs for projects and sub-projects.

/// Builds a URL slug from a title.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a single
/// `-`, then trims leading and trailing dashes. Titles without any ASCII
/// alphanumerics (e.g. `東京ハーパー`) produce an empty slug; callers match
/// those by exact title instead.
///
/// # Example
///
/// ```
/// use folio_lens::domain::slug::create_slug;
///
/// assert_eq!(create_slug("Les Mots Bleus"), "les-mots-bleus");
/// assert_eq!(create_slug("palette&formes"), "palette-formes");
/// assert_eq!(create_slug("  Cote d'Azur!  "), "cote-d-azur");
/// ```
#[must_use]
pub fn create_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Returns `true` when `candidate` names the same thing as `alias`.
///
/// Both sides are compared as slugs; non-ASCII titles fall back to an exact
/// (whitespace-insensitive) comparison. `contains` additionally accepts a
/// candidate whose slug merely contains the alias slug.
#[must_use]
pub fn slug_matches(alias: &str, candidate: &str, contains: bool) -> bool {
    let alias_slug = create_slug(alias);
    let candidate_slug = create_slug(candidate);

    if alias_slug.is_empty() || candidate_slug.is_empty() {
        let strip = |s: &str| s.split_whitespace().collect::<String>();
        let (alias, candidate) = (strip(alias), strip(candidate));
        if alias.is_empty() {
            return false;
        }
        return if contains {
            candidate.contains(&alias)
        } else {
            candidate == alias
        };
    }

    if contains {
        candidate_slug.contains(&alias_slug)
    } else {
        candidate_slug == alias_slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(create_slug("Out of Sight Solo"), "out-of-sight-solo");
        assert_eq!(create_slug("--0fr--"), "0fr");
        assert_eq!(create_slug("grafik(design)"), "grafik-design");
        assert_eq!(create_slug("a   b"), "a-b");
    }

    #[test]
    fn non_ascii_titles_produce_empty_slug() {
        assert_eq!(create_slug("東京ハーパー"), "");
    }

    #[test]
    fn accented_letters_are_separators() {
        assert_eq!(create_slug("débutantes"), "d-butantes");
    }

    #[test]
    fn matches_by_slug() {
        assert!(slug_matches("les mots bleus", "les-mots-bleus", false));
        assert!(slug_matches("Palette&Formes", "palette formes", false));
        assert!(!slug_matches("paris", "the parisian vintage", false));
        assert!(slug_matches("mots bleus", "les-mots-bleus", true));
    }

    #[test]
    fn matches_non_ascii_exactly() {
        assert!(slug_matches("東京ハーパー", "東京 ハーパー", false));
        assert!(slug_matches("東京ハーパー", "東京ハーパー展", true));
        assert!(!slug_matches("東京ハーパー", "東京", false));
    }

    #[test]
    fn empty_alias_never_matches() {
        assert!(!slug_matches("", "anything", true));
    }
}
