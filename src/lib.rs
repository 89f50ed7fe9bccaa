pub mod app;
pub mod carousel;
pub mod cli;
pub mod context;
pub mod data_source;
pub mod models;
pub mod opt;
pub mod search;
