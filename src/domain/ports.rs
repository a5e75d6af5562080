use crate::domain::model::{
    Campus, Event, HeroSlide, NewsItem, Partner, Service, TeamMember, Video,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the external content API, one method per section the site
/// renders. By-slug lookups return `None` when the API answers 404 so pages
/// can fall back to their empty state.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn campuses(&self) -> Result<Vec<Campus>>;
    async fn campus(&self, slug: &str) -> Result<Option<Campus>>;
    async fn news(&self) -> Result<Vec<NewsItem>>;
    async fn news_item(&self, slug: &str) -> Result<Option<NewsItem>>;
    async fn events(&self) -> Result<Vec<Event>>;
    async fn event(&self, slug: &str) -> Result<Option<Event>>;
    async fn services(&self) -> Result<Vec<Service>>;
    async fn team_members(&self) -> Result<Vec<TeamMember>>;
    async fn hero_slides(&self) -> Result<Vec<HeroSlide>>;
    async fn partners(&self) -> Result<Vec<Partner>>;
    async fn videos(&self) -> Result<Vec<Video>>;
}
