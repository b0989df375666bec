/// Project showcase module - Gateway

mod catalog;
mod github;

pub use catalog::{curated_projects, ProjectCard};
pub use github::{ProjectEnricher, RepoMetadata};
