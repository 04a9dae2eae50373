//! Infrastructure layer - browser, file and mail adapters

pub mod browser;
pub mod mail;
pub mod storage;
