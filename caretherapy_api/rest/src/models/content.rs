use caretherapy_models::content::{Post, PostAuthor, PostMetadata, PostSlug};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPostMetadata {
    pub slug: PostSlug,
    pub title: String,
    pub excerpt: String,
    pub author: ApiPostAuthor,
    pub published_at: NaiveDate,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub read_time: String,
}

#[derive(Debug, Serialize)]
pub struct ApiPostAuthor {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct ApiPost {
    #[serde(flatten)]
    pub metadata: ApiPostMetadata,
    pub body: String,
}

impl From<PostMetadata> for ApiPostMetadata {
    fn from(value: PostMetadata) -> Self {
        Self {
            slug: value.slug,
            title: value.title,
            excerpt: value.excerpt,
            author: value.author.into(),
            published_at: value.published_at,
            category: value.category,
            tags: value.tags,
            featured: value.featured,
            read_time: value.read_time,
        }
    }
}

impl From<PostAuthor> for ApiPostAuthor {
    fn from(value: PostAuthor) -> Self {
        Self {
            name: value.name,
            role: value.role,
        }
    }
}

impl From<Post> for ApiPost {
    fn from(value: Post) -> Self {
        Self {
            metadata: value.metadata.into(),
            body: value.body,
        }
    }
}
