// Domain layer - Pure models and classification rules
pub mod classification;
pub mod telemetry;
