//! Browser backends for the library seams.

pub mod detection;
pub mod extensions;
pub mod http;
pub mod storage;
