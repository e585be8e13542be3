// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the standup
//! collector talks to Notion: which pages it asks for, how deep it walks,
//! and where it leaves its artifacts.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking cursor chains.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum nesting depth when recursively flattening a page's block tree.
///
/// Notion blocks can nest arbitrarily deep (toggles inside lists inside
/// callouts). This ceiling keeps a malformed or adversarial tree from
/// driving unbounded recursion. Configured depths are clamped to it.
pub const NOTION_MAX_FETCH_DEPTH: u8 = 50;

/// Seconds a single Notion request may take before it counts as failed.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Task database vocabulary
// ---------------------------------------------------------------------------

/// The status property that marks a task's progress.
pub const STATUS_PROPERTY: &str = "Status";

/// The status value that marks a task as finished.
pub const DONE_STATUS: &str = "Done";

/// The title property holding a task's name.
pub const TITLE_PROPERTY: &str = "Name";

/// The select property naming the project a task belongs to.
pub const PROJECT_PROPERTY: &str = "Project";

/// The page timestamp used to order results, newest first.
pub const LAST_EDITED_TIMESTAMP: &str = "last_edited_time";

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Default directory for every file the tool writes.
pub const DEFAULT_OUTPUT_DIR: &str = "logs";

/// The standup digest consumed by the prompt composer.
pub const STANDUPS_FILE_NAME: &str = "standups.json";

/// The rendered summarization prompt.
pub const PROMPT_FILE_NAME: &str = "standup-prompt.txt";

/// Prefix of the timestamped raw extraction report.
pub const DETAILS_FILE_PREFIX: &str = "notion_done_pages";

/// Project label used when a saved entry has no project key at all.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
