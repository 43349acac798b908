use crate::error::{ExtractError, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// One parsed C# file: the source text together with its syntax tree.
///
/// Never mutated after construction; every node handed out by the locator
/// borrows from it.
pub struct SourceUnit {
    text: String,
    tree: Tree,
}

impl SourceUnit {
    /// Parse C# source text
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| ExtractError::tree_sitter(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| ExtractError::parse("Failed to parse source code"))?;

        if tree.root_node().has_error() {
            log::debug!("source contains syntax errors; extracting from the recovered tree");
        }

        Ok(Self { text, tree })
    }

    /// Read and parse a C# file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(text)
    }

    /// Root `compilation_unit` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Raw source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source text covered by a node of this unit
    pub fn node_text<'a>(&'a self, node: Node<'_>) -> &'a str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }
}

/// Returns whether a file path looks like C# source
pub fn is_csharp_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"))
}
