use crate::resources::StoreError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    StoreError(StoreError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::StoreError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO 오류: {}", e),
            Error::StoreError(e) => write!(f, "스토어 오류: {}", e),
        }
    }
}
