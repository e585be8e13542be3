//! Content extraction: turning raw Notion JSON into standup records.
//!
//! Everything here is pure: no I/O, no logging, no failure. Malformed
//! input degrades to empty strings rather than errors.

mod blocks;
mod pages;

pub use blocks::{collect_work_items, extract_content, extract_done_list_item, rich_text_plain};
pub use pages::{extract_page_details, extract_properties, page_id, summarize_page};
