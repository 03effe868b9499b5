pub mod analyzers;
pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod output;
