//! `mdcc_core` turns inline component shortcodes written in markdown into
//! structured elements in the document tree.
//!
//! A shortcode is a self-closing, element-like directive placed anywhere in
//! text content:
//!
//! ```md
//! Click <CustomComponent name="button" {"type": "primary"} /> to continue.
//! ```
//!
//! Each directive becomes an element carrying a `name` and a set of typed
//! `props`, while the surrounding text is preserved byte for byte.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown
//!   → mdast (markdown crate, GFM)
//!   → Transform (visits every text and raw html node once)
//!   → Rewriter (splits the node's text into fragments and components)
//!   → DirectiveMatcher (finds `<Name ... />` spans, validates the payload)
//!   → Attribute lexer (tokenizes `key="value"`, `key=value`, `key`)
//! ```
//!
//! ## Attribute Syntaxes
//!
//! One syntax is active per [`MdccConfig`]:
//!
//! - [`AttributeSyntax::Json`] — `name="button"` plus an optional JSON object:
//!   `<CustomComponent name="button" {"type": "primary"} />`
//! - [`AttributeSyntax::Attributes`] — element attributes:
//!   `<CustomComponent name="button" disabled size=large />`
//!
//! Directive-shaped text that does not fit the active syntax is left alone.
//! Only a JSON object that was matched but cannot be parsed is an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdcc_core::MdccConfig;
//! use mdcc_core::Rewriter;
//! use mdcc_core::Segment;
//!
//! let rewriter = Rewriter::new(MdccConfig::default());
//! let segments = rewriter
//! 	.rewrite(r#"Hi <CustomComponent name="wave" {"size": 2} />!"#)
//! 	.unwrap();
//!
//! assert_eq!(segments.len(), 3);
//! let Segment::Component(component) = &segments[1] else {
//! 	panic!("expected a component");
//! };
//! assert_eq!(component.name, "wave");
//! ```

pub use config::*;
pub use error::*;
pub use lexer::Attribute;
pub use lexer::RawValue;
pub use matcher::*;
pub use props::*;
pub use rewriter::*;
pub use transform::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod matcher;
mod props;
mod rewriter;
pub mod transform;
