pub mod build;

pub use build::{fixture_catalog, grant, grants_collection};
