// Domain layer - Pure data shapes for the analytics pipeline
pub mod analytics;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod series;
