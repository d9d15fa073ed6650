//! Article slug generation.
//!
//! Slugs are derived from the title and made collision-resistant with a
//! short random suffix, so two articles may share a title without fighting
//! over the `uq_articles_slug` constraint.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the random suffix appended to every slug.
const SUFFIX_LEN: usize = 6;

/// Generate a URL-safe slug for an article title.
///
/// The title is lowercased and reduced to hyphen-separated ASCII words;
/// a random alphanumeric suffix keeps repeated titles unique.
///
/// # Examples
///
/// ```
/// use conduit_core::naming::article_slug;
///
/// let slug = article_slug("How to Train Your Dragon");
/// assert!(slug.starts_with("how-to-train-your-dragon-"));
/// ```
pub fn article_slug(title: &str) -> String {
    format!("{}-{}", slug::slugify(title), random_suffix(SUFFIX_LEN))
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}
