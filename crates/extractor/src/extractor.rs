use crate::attributes::{find_attribute, AttributeNode};
use crate::config::ExtractorConfig;
use crate::doc_comment::{leading_doc_comment, parse_sections};
use crate::error::{ExtractError, Result};
use crate::locator::{locate, ClassNode};
use crate::resolver::ExpressionResolver;
use crate::source::SourceUnit;
use crate::types::{EventRecord, EventSourceDocument, EventTags};
use std::path::Path;
use tree_sitter::Node;

/// Main extractor interface: one C# file in, one event source document out
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new extractor with configuration
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract from source text.
    ///
    /// `Ok(None)` means the text declares no event source class and should
    /// be skipped.
    pub fn extract_str(&self, content: &str) -> Result<Option<EventSourceDocument>> {
        let unit = SourceUnit::parse(content)?;
        self.extract_unit(&unit)
    }

    /// Extract from a file on disk
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Option<EventSourceDocument>> {
        let unit = SourceUnit::from_file(path)?;
        self.extract_unit(&unit)
    }

    /// Extract from an already parsed unit
    pub fn extract_unit(&self, unit: &SourceUnit) -> Result<Option<EventSourceDocument>> {
        let Some(class) = self.locate(unit) else {
            return Ok(None);
        };

        let name = self.event_source_name(class)?;
        if name.is_empty() {
            log::warn!(
                "Event source name of class '{}' resolved to empty text; using the class name",
                class.name()
            );
        }

        Ok(Some(EventSourceDocument {
            name,
            class_name: class.name().to_string(),
            records: self.assemble(class),
        }))
    }

    /// Find the event source class of a unit
    pub fn locate<'a>(&self, unit: &'a SourceUnit) -> Option<ClassNode<'a>> {
        locate(unit, &self.config.marker_type)
    }

    /// Resolve the display name declared by `[EventSource(Name = ...)]`.
    ///
    /// The class is known to be an event source, so a missing attribute or
    /// `Name` argument is malformed input rather than something to default.
    pub fn event_source_name(&self, class: ClassNode<'_>) -> Result<String> {
        let attribute = find_attribute(class.unit(), class.node(), &self.config.source_attribute)
            .ok_or_else(|| {
                ExtractError::malformed_marker(
                    class.name(),
                    format!("missing [{}] attribute", self.config.source_attribute),
                )
            })?;

        let argument = attribute
            .named_argument(&self.config.name_argument)
            .ok_or_else(|| {
                ExtractError::malformed_marker(
                    class.name(),
                    format!(
                        "[{}] has no {} argument",
                        self.config.source_attribute, self.config.name_argument
                    ),
                )
            })?;

        Ok(ExpressionResolver::new(class.unit()).resolve(class, argument.expression))
    }

    /// One record per event method, in declaration order
    pub fn assemble(&self, class: ClassNode<'_>) -> Vec<EventRecord> {
        let unit = class.unit();
        let resolver = ExpressionResolver::new(unit);

        class
            .methods()
            .into_iter()
            .filter_map(|method| {
                find_attribute(unit, method, &self.config.event_attribute)
                    .map(|attribute| self.record(class, &resolver, method, attribute))
            })
            .collect()
    }

    fn record<'a>(
        &self,
        class: ClassNode<'a>,
        resolver: &ExpressionResolver<'a>,
        method: Node<'a>,
        attribute: AttributeNode<'a>,
    ) -> EventRecord {
        let unit = class.unit();
        let name = method
            .child_by_field_name("name")
            .map(|ident| unit.node_text(ident))
            .unwrap_or_default();

        let id = attribute
            .named_or_positional(&self.config.id_argument)
            .map(|argument| resolver.resolve(class, argument.expression))
            .unwrap_or_default();

        let level = attribute
            .named_argument(&self.config.level_argument)
            .map_or_else(
                || self.config.default_level.clone(),
                |argument| resolver.resolve(class, argument.expression),
            );

        let mut tags = EventTags::default();
        for tag in EventTags::ARGUMENTS {
            if let Some(argument) = attribute.named_argument(tag) {
                tags.set(tag, resolver.resolve(class, argument.expression));
            }
        }

        let doc = leading_doc_comment(unit, method);
        let sections = parse_sections(
            doc.as_deref(),
            &self.config.summary_section,
            &self.config.resolution_section,
            &self.config.line_separator,
        );

        EventRecord::new(name, id, level, sections.description, sections.resolution)
            .with_tags(tags)
    }
}
