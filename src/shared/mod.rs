pub mod config;
pub mod progress;
pub mod storage_header;

#[cfg(test)]
mod progress_test;
