pub mod error;
pub mod opt;
pub mod app;

pub use error::Error;
pub use opt::Opt;

#[cfg(test)]
mod proptests;
