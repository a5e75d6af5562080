use crate::core::client::ApiClient;
use crate::domain::model::{
    Campus, Event, HeroSlide, NewsItem, Partner, Service, TeamMember, Video,
};
use crate::domain::ports::ContentSource;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// `ContentSource` backed by the external content API. Each accessor is one
/// GET through the retrying client; no caching, no merging.
pub struct ContentApi {
    client: ApiClient,
}

impl ContentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// By-slug lookup: the API's 404 means "no such entry", which pages
    /// render as their empty state rather than as an error.
    async fn lookup<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>> {
        match self.client.get_json::<T>(endpoint).await {
            Ok(entry) => Ok(Some(entry)),
            Err(SiteError::Api { status: 404, .. }) => {
                tracing::debug!("No content entry at {}", endpoint);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ContentSource for ContentApi {
    async fn campuses(&self) -> Result<Vec<Campus>> {
        self.client.get_json("/campuses").await
    }

    async fn campus(&self, slug: &str) -> Result<Option<Campus>> {
        self.lookup(&format!("/campuses/{}", slug)).await
    }

    async fn news(&self) -> Result<Vec<NewsItem>> {
        self.client.get_json("/news").await
    }

    async fn news_item(&self, slug: &str) -> Result<Option<NewsItem>> {
        self.lookup(&format!("/news/{}", slug)).await
    }

    async fn events(&self) -> Result<Vec<Event>> {
        self.client.get_json("/events").await
    }

    async fn event(&self, slug: &str) -> Result<Option<Event>> {
        self.lookup(&format!("/events/{}", slug)).await
    }

    async fn services(&self) -> Result<Vec<Service>> {
        self.client.get_json("/services").await
    }

    async fn team_members(&self) -> Result<Vec<TeamMember>> {
        self.client.get_json("/team-members").await
    }

    async fn hero_slides(&self) -> Result<Vec<HeroSlide>> {
        self.client.get_json("/home/hero").await
    }

    async fn partners(&self) -> Result<Vec<Partner>> {
        self.client.get_json("/home/partners").await
    }

    async fn videos(&self) -> Result<Vec<Video>> {
        self.client.get_json("/videos").await
    }
}
