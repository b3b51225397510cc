pub mod error;
pub mod file;
pub mod provider;
pub mod relative;
