pub mod catalog;
pub mod config;
pub mod error;
pub mod pairs;
pub mod types;

pub use catalog::{Catalog, CatalogIndex};
pub use config::{SiteConfig, parse_site_toml};
pub use error::{Error, Result};
pub use pairs::{Pair, enumerate_pairs};
pub use types::*;
