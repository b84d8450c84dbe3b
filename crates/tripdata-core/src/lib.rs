pub mod config;
pub mod datasets;
pub mod error;
pub mod fetch;
pub mod materialize;
pub mod period;
pub mod pipeline;
pub mod template;
