// Farmwatch telemetry dashboard core
//
// Layered: `domain` holds pure models and classification, `application` the
// view models and ports, `infrastructure` the REST/config adapters, and
// `presentation` the navigation machine plus headless surfaces.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
