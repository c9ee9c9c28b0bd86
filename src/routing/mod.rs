//! Content routing module
//!
//! Maps inbound URL paths to files under the asset root with an
//! index-page fallback for extensionless paths.

mod path;
mod resolver;

pub use path::RequestPath;
pub use resolver::{plan, ContentRouter, LoadedFile, Resolution, RoutePlan};
