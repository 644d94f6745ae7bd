// Application layer - Use cases and trait seams
pub mod auth_service;
pub mod chart_registry;
pub mod content_fetcher;
pub mod dashboard_service;
pub mod data_manager;
pub mod fragment_source;
pub mod navigation;
pub mod resource_tracker;
pub mod royalty_repository;
