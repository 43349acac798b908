//! # EventDoc Extractor
//!
//! Pulls event documentation out of C# `EventSource` classes.
//!
//! ## Philosophy
//!
//! The extractor reads declarations, it does not compile them:
//! - An event source is any namespace-level class deriving from `EventSource`
//! - An event is any of its methods carrying `[Event(...)]`
//! - Attribute arguments are resolved through same-file constants only
//! - Documentation comes from the `///` XML comment above the method
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Tree-sitter Parsing → SourceUnit
//!     │
//!     ├──> Class Locator (base type == marker)
//!     │
//!     ├──> Per [Event] method
//!     │    ├─> Attribute Reader (Id, Level, tags)
//!     │    ├─> Expression Resolver (literal / constant / Nested.Constant)
//!     │    └─> Doc-Comment Parser (summary, resolution)
//!     │
//!     └──> EventSourceDocument { name, records: EventRecord[] }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use eventdoc_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
//!
//! let code = r#"
//! namespace Demo
//! {
//!     [EventSource(Name = "Demo-Log")]
//!     public sealed class DemoLog : EventSource
//!     {
//!         /// <summary>Service started.</summary>
//!         [Event(1, Level = EventLevel.Informational)]
//!         public void Started() { WriteEvent(1); }
//!     }
//! }
//! "#;
//!
//! let document = extractor.extract_str(code).unwrap().expect("event source");
//! for record in &document.records {
//!     println!("{} #{} [{}]: {}", record.name, record.id, record.level, record.description);
//! }
//! ```

mod attributes;
mod config;
mod doc_comment;
mod error;
mod extractor;
mod locator;
mod resolver;
mod source;
mod types;

pub use attributes::{find_attribute, AttributeArgument, AttributeNode};
pub use config::ExtractorConfig;
pub use doc_comment::{leading_doc_comment, parse_sections, DocSections};
pub use error::{ExtractError, Result};
pub use extractor::Extractor;
pub use locator::{locate, ClassNode};
pub use resolver::ExpressionResolver;
pub use source::{is_csharp_path, SourceUnit};
pub use types::{EventRecord, EventSourceDocument, EventTags};
