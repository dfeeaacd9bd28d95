use std::sync::LazyLock;

use chrono::NaiveDate;
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[nutype(
    sanitize(trim, lowercase),
    validate(regex = POST_SLUG_REGEX, len_char_max = 128),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        TryFrom,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct PostSlug(String);

pub static POST_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub slug: PostSlug,
    pub title: String,
    pub excerpt: String,
    pub author: PostAuthor,
    pub published_at: NaiveDate,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    /// Derived from the body word count, e.g. `"4 min read"`.
    pub read_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub metadata: PostMetadata,
    /// The raw markdown body of the post.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_normalized() {
        let slug = PostSlug::try_new("  Adaptive-Exercise-101 ".to_owned()).unwrap();
        assert_eq!(*slug, "adaptive-exercise-101");
    }

    #[test]
    fn slug_rejects_path_like_input() {
        for invalid in ["../secrets", "a b", "UPPER CASE", "", "-leading"] {
            PostSlug::try_new(invalid.to_owned()).unwrap_err();
        }
    }
}
