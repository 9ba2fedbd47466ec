//! Section tree parsing and lookup for integration documentation.
//!
//! Markdown documents are split on `##`-and-deeper headings into a forest of
//! [`Section`] nodes. Each node keeps the text that belongs to its own heading
//! (`own_content`) apart from the text of the whole subtree (`full_content`):
//!
//! ```text
//! ## Overview            <- Section { level: 2, children: [Compatibility] }
//! Intro text.
//!
//! ### Compatibility      <- Section { level: 3, children: [] }
//! Works with 8.x.
//! ```
//!
//! A lone `#` heading is the document title and never becomes a section.
//!
//! # Modules
//!
//! - [`section`]: the [`Section`] type, [`parse_sections`] and [`render_sections`]
//! - [`locate`]: title lookup over a parsed forest
//! - [`extract`]: helpers that pull sections and preserve blocks out of raw text

pub mod extract;
pub mod locate;
pub mod section;

pub use extract::{
    extract_markdown_content, extract_preserve_blocks, extract_section_by_keyword,
    extract_section_from_response, preserved_blocks_kept, section_map,
};
pub use locate::{find_by_title, find_by_title_recursive, find_parent, flatten, titles_match};
pub use section::{
    PRESERVE_END, PRESERVE_START, Section, heading_level, parse_sections, render_sections,
    starts_with_heading,
};
