//! markscheme: browse the AQA GCSE Business mark scheme booklet.

pub mod browser;
pub mod catalog;
pub mod filter;
pub mod report;
pub mod tui;
pub mod types;
