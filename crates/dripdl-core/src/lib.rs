pub mod config;
pub mod logging;

pub mod catalog;
pub mod extract;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod prompt;
pub mod retry;
pub mod session;
pub mod storage;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;
