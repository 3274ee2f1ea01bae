pub mod aggregate;
pub mod config;
pub mod error;
pub mod form;
pub mod health;
pub mod layers;
pub mod server;
pub mod validation;
pub mod view;

pub use aggregate::{MissingResult, QueryResults, QuerySet};
pub use config::{CatalogConfig, ConfigError, ConfigProperties, ConfigValue, LogConfig, ServerConfig};
pub use error::HttpError;
pub use form::{FieldValue, FormData};
pub use health::{HealthBuilder, HealthIndicator, HealthStatus};
pub use layers::{catch_panic_layer, default_trace, init_tracing};
pub use server::serve;
pub use validation::{FieldError, ValidationErrors};
pub use view::{Outcome, View};
