pub mod config;
pub mod credentials;
pub mod error;

pub use config::Config;
pub use credentials::KaggleCredentials;
pub use error::*;
