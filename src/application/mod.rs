// Application layer - Use cases and the aggregation pipeline
pub mod analytics_service;
pub mod bucketizer;
pub mod fallback_generator;
pub mod growth_estimator;
pub mod paginator;
pub mod platform_repository;
pub mod series_composer;

#[cfg(test)]
pub mod testing;
