// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fragment_sources;
pub mod http_response;
pub mod sqlite_repository;
