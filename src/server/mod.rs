pub mod error;
pub mod handler;
pub mod listener;
pub mod manager;

pub use manager::ServerManager;

use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
