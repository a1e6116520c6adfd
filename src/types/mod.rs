pub mod config;
pub mod result;
pub mod scoring;
pub mod status;
pub mod taxonomy;
