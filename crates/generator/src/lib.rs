//! Comparison synthesis, routing and static rendering

pub mod batch;
pub mod render;
pub mod routes;
pub mod sitemap;
pub mod synthesis;

pub use batch::{ArtifactSink, BatchReport, DirectorySink, Manifest, MemorySink, generate};
pub use routes::{list_routes, resolve};
pub use synthesis::{ComparisonDocument, synthesize};
