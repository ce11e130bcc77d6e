pub mod archive;
pub mod config;
pub mod document;
pub mod fetch;
pub mod locale;
pub mod normalize;
pub mod pipeline;
pub mod writer;
