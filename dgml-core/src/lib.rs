//! Document model and renderers for DGML structural chunking
//!
//! DGML documents are XML trees in which selected elements carry a
//! `structure` attribute marking them as semantic units (headings,
//! paragraphs, list items, tables). This crate provides the pieces the
//! segmentation engine is assembled from:
//!
//! - [`dom`]: an arena XML tree with text/tail mixed content
//! - [`tags`]: tag and structure-attribute helpers
//! - [`text`]: plain-text rendering of a subtree
//! - [`table`]: fixed-width grid rendering of XHTML tables
//! - [`simplify`]: simplified XML with bounded ancestor context
//! - [`chunk`]: the output record and its merge rule
//!
//! # Example
//!
//! ```rust
//! use dgml_core::dom::Document;
//! use dgml_core::text::render_text;
//!
//! let doc = Document::parse("<root> Hello  <child>World!</child></root>").unwrap();
//! assert_eq!(render_text(doc.root(), true), "Hello World!");
//! ```

#![warn(missing_docs)]

pub mod chunk;
pub mod defaults;
pub mod dom;
pub mod error;
pub mod simplify;
pub mod table;
pub mod tags;
pub mod text;

pub use chunk::{Chunk, Metadata};
pub use dom::{Document, ExpandedName, Node, NodeId};
pub use error::{CoreError, Result};
pub use simplify::{nth_ancestor, simplified_xml, SimplifyOptions};
pub use table::{render_table, render_table_with, GridStyle, TableTags};
pub use tags::{clean_tag, has_structural_descendant, is_descendant_of_structural, is_structural};
pub use text::{normalize_whitespace, render_text};
