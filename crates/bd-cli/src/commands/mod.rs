pub mod demo;
pub mod query;
