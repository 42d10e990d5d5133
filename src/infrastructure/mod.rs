// Infrastructure layer - External dependencies and adapters
pub mod chart_mapper;
pub mod config;
pub mod http_json;
pub mod instagram_repository;
pub mod youtube_repository;
