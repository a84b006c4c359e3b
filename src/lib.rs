pub mod config;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod process;

#[cfg(test)]
pub(crate) mod fixtures;
