use std::future::Future;

use caretherapy_models::content::{Post, PostMetadata, PostSlug};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContentService: Send + Sync + 'static {
    /// Returns the metadata of all published posts, newest first. Drafts
    /// are not included.
    fn list_posts(&self) -> impl Future<Output = anyhow::Result<Vec<PostMetadata>>> + Send;

    /// Returns the full post for the given slug, including its markdown
    /// body.
    fn read_post(
        &self,
        slug: &PostSlug,
    ) -> impl Future<Output = Result<Post, ContentReadPostError>> + Send;

    /// Returns the slugs of all posts, drafts included, in alphabetical
    /// order.
    fn list_slugs(&self) -> impl Future<Output = anyhow::Result<Vec<PostSlug>>> + Send;
}

#[derive(Debug, Error)]
pub enum ContentReadPostError {
    #[error("The post does not exist.")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContentService {
    pub fn with_list_posts(mut self, result: anyhow::Result<Vec<PostMetadata>>) -> Self {
        self.expect_list_posts()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_read_post(
        mut self,
        slug: PostSlug,
        result: Result<Post, ContentReadPostError>,
    ) -> Self {
        self.expect_read_post()
            .once()
            .with(mockall::predicate::eq(slug))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list_slugs(mut self, result: anyhow::Result<Vec<PostSlug>>) -> Self {
        self.expect_list_slugs()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
