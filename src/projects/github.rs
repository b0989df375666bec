use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::catalog::ProjectCard;
use crate::app::ProjectsConfig;
use crate::constants::GITHUB_USER_AGENT;

/// Subset of the GitHub repository payload the showcase uses
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fills curated project cards with live repository statistics
pub struct ProjectEnricher {
    client: Client,
    github_api: String,
    max_topics: usize,
}

impl ProjectEnricher {
    pub fn new(config: &ProjectsConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(GITHUB_USER_AGENT)
                .build()?,
            github_api: config.github_api.trim_end_matches('/').to_string(),
            max_topics: config.max_topics,
        })
    }

    /// Fetch metadata for an `owner/repo` slug
    pub async fn fetch(&self, slug: &str) -> Result<RepoMetadata> {
        let url = format!("{}/repos/{}", self.github_api, slug);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Enrich every card that names a repository, concurrently.
    ///
    /// Best effort: a card whose lookup fails is returned unchanged.
    pub async fn enrich(&self, cards: Vec<ProjectCard>) -> Vec<ProjectCard> {
        let lookups = cards.iter().map(|card| async move {
            let slug = card.github.as_deref()?;
            match self.fetch(slug).await {
                Ok(meta) => Some(meta),
                Err(e) => {
                    debug!("Skipping enrichment for {}: {:#}", slug, e);
                    None
                }
            }
        });
        let results = join_all(lookups).await;

        cards
            .into_iter()
            .zip(results)
            .map(|(card, meta)| match meta {
                Some(meta) => self.merge(card, meta),
                None => card,
            })
            .collect()
    }

    fn merge(&self, mut card: ProjectCard, meta: RepoMetadata) -> ProjectCard {
        card.stars = Some(meta.stargazers_count);
        card.forks = Some(meta.forks_count);
        card.topics = meta.topics.into_iter().take(self.max_topics).collect();
        card.html_url = Some(meta.html_url);
        if let Some(homepage) = meta.homepage.filter(|h| !h.is_empty()) {
            card.homepage = Some(homepage);
        }
        card.updated_at = meta.updated_at;
        card
    }
}
