use std::{io::ErrorKind, path::PathBuf};

use anyhow::Context;
use caretherapy_core_content_contracts::{ContentReadPostError, ContentService};
use caretherapy_models::content::{Post, PostAuthor, PostMetadata, PostSlug};
use chrono::NaiveDate;
use gray_matter::{engine::YAML, Matter};
use serde::Deserialize;
use tokio::fs;

/// Reads blog posts from a directory of markdown files with YAML front
/// matter. The file stem is the post's slug.
pub struct ContentServiceImpl {
    config: ContentServiceConfig,
    matter: Matter<YAML>,
}

#[derive(Debug, Clone)]
pub struct ContentServiceConfig {
    pub posts_dir: PathBuf,
}

const WORDS_PER_MINUTE: usize = 200;

impl ContentServiceImpl {
    pub fn new(config: ContentServiceConfig) -> Self {
        Self {
            config,
            matter: Matter::<YAML>::new(),
        }
    }

    async fn entries(&self) -> anyhow::Result<Vec<(PostSlug, PathBuf)>> {
        let mut dir = match fs::read_dir(&self.config.posts_dir).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    posts_dir = %self.config.posts_dir.display(),
                    "posts directory does not exist"
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(anyhow::Error::from(err).context(format!(
                    "Failed to read posts directory {}",
                    self.config.posts_dir.display()
                )))
            }
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension() != Some("md".as_ref()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match PostSlug::try_new(stem.to_owned()) {
                Ok(slug) => entries.push((slug, path)),
                Err(err) => {
                    tracing::warn!(%err, path = %path.display(), "skipping file with invalid slug");
                }
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn parse(&self, slug: PostSlug, raw: &str) -> anyhow::Result<(Post, bool)> {
        let parsed = self.matter.parse(raw);
        anyhow::ensure!(!parsed.matter.trim().is_empty(), "Post has no front matter");
        let front_matter =
            serde_yaml::from_str::<FrontMatter>(&parsed.matter).context("Invalid front matter")?;

        let body = parsed.content;
        let metadata = PostMetadata {
            slug,
            title: front_matter.title,
            excerpt: front_matter.excerpt,
            author: front_matter.author,
            published_at: front_matter.published_at,
            category: front_matter.category,
            tags: front_matter.tags,
            featured: front_matter.featured,
            read_time: read_time(&body),
        };

        Ok((Post { metadata, body }, front_matter.draft))
    }
}

impl ContentService for ContentServiceImpl {
    async fn list_posts(&self) -> anyhow::Result<Vec<PostMetadata>> {
        let mut posts = Vec::new();
        for (slug, path) in self.entries().await? {
            let raw = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match self.parse(slug, &raw) {
                Ok((_, true)) => {}
                Ok((post, false)) => posts.push(post.metadata),
                Err(err) => {
                    tracing::warn!(%err, path = %path.display(), "skipping malformed post");
                }
            }
        }

        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(posts)
    }

    async fn read_post(&self, slug: &PostSlug) -> Result<Post, ContentReadPostError> {
        let path = self.config.posts_dir.join(format!("{slug}.md"));
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ContentReadPostError::NotFound)
            }
            Err(err) => {
                return Err(anyhow::Error::from(err)
                    .context(format!("Failed to read {}", path.display()))
                    .into())
            }
        };

        let (post, _) = self.parse(slug.clone(), &raw)?;
        Ok(post)
    }

    async fn list_slugs(&self) -> anyhow::Result<Vec<PostSlug>> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default = "FrontMatter::default_author")]
    author: PostAuthor,
    published_at: NaiveDate,
    #[serde(default = "FrontMatter::default_category")]
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    draft: bool,
}

impl FrontMatter {
    fn default_author() -> PostAuthor {
        PostAuthor {
            name: "Cameron".into(),
            role: "Founder & Adapted Exercise Specialist".into(),
        }
    }

    fn default_category() -> String {
        "General".into()
    }
}

/// Estimated reading time at 200 words per minute, rounded to the nearest
/// minute with a minimum of one.
fn read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = ((words + WORDS_PER_MINUTE / 2) / WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
