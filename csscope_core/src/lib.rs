//! `csscope_core` is the engine behind [csscope](https://github.com/csscope/csscope).
//! It scopes the CSS class names used in markup templates: every class tag in
//! a markup file is replaced by a collision-resistant name, and the matching
//! selector in the paired stylesheet is renamed to match. The results are
//! written as build artifacts next to the sources.
//!
//! ## Template Syntax
//!
//! ```html
//! {include card.css}
//! <div class={card}>
//!   <h2 class={title}>Hello</h2>
//! </div>
//! ```
//!
//! The first tag must be `{include <stylesheet>}`. Every other tag is a class
//! name, rewritten to `{namespace}__{class}__{salt}` where the namespace is
//! the stylesheet's file name up to its first `.` (`card` above).
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markup file
//!   → Scanner (extracts `{...}` tags in document order)
//!   → Include resolver (locates the stylesheet, derives the namespace)
//!   → Class scoper (salts each class, rewrites markup and stylesheet)
//!   → Output namer (`page.html` → `page.build.html`)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `csscope.toml` loading and [`LocalizeOptions`].
//! - [`project`]: Directory walking and whole-tree builds.
//! - [`salt`]: Salt generation and the injectable [`TokenSource`](salt::TokenSource).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csscope_core::CsscopeConfig;
//! use csscope_core::LocalizeOptions;
//! use csscope_core::project::localize_tree;
//! use std::path::Path;
//!
//! let root = Path::new("templates");
//! let config = CsscopeConfig::load(root).unwrap();
//! let options = LocalizeOptions::from_config(config.as_ref());
//!
//! let result = localize_tree(root, &options).unwrap();
//! for warning in result.all_warnings() {
//!     eprintln!("{}: {}", warning.file.display(), warning.message());
//! }
//! ```

pub use config::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use include::*;
pub use output::*;
pub use scanner::*;
pub use scoper::*;

pub mod config;
mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
mod include;
mod output;
pub mod project;
pub mod salt;
mod scanner;
mod scoper;
