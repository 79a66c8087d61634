pub mod cli;
pub mod error;
pub mod keys;
pub mod loader;
pub mod merge;
pub mod model;
pub mod report;
pub mod resultset;
pub mod store;
