pub mod atomic_write;
pub mod encoding;
pub mod logger;
pub mod paths;
