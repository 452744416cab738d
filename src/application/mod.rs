// Application layer - Use cases, view models and ports
pub mod admin_service;
pub mod dataset;
pub mod exporter;
pub mod filter_engine;
pub mod monitoring_service;
pub mod poller;
pub mod session;
pub mod surfaces;
pub mod telemetry_repository;
