pub mod common;
pub mod completion;
pub mod config;
pub mod ocr;
pub mod prompts;
