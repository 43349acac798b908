//! XML documentation comments (`/// <summary>...`) attached to declarations.

use crate::source::SourceUnit;
use tree_sitter::Node;

/// Sections pulled out of a documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSections {
    pub description: String,
    pub resolution: String,
}

/// Raw text of the first `///` block in the trivia preceding a declaration.
///
/// Consecutive `///` lines form one block; a blank line or any other comment
/// ends it. Returns `None` when the declaration has no documentation.
pub fn leading_doc_comment(unit: &SourceUnit, declaration: Node<'_>) -> Option<String> {
    let mut comments = Vec::new();
    let mut sibling = declaration.prev_sibling();
    while let Some(prev) = sibling {
        if !prev.is_extra() {
            break;
        }
        comments.push(prev);
        sibling = prev.prev_sibling();
    }
    comments.reverse();

    let mut block: Vec<&str> = Vec::new();
    let mut last_row = None;
    for comment in comments {
        let text = unit.node_text(comment);
        let is_doc =
            comment.kind() == "comment" && text.starts_with("///") && !text.starts_with("////");

        if is_doc {
            let contiguous = last_row.is_some_and(|row: usize| comment.start_position().row == row + 1);
            if !block.is_empty() && !contiguous {
                break;
            }
            block.push(text.trim_end());
            last_row = Some(comment.end_position().row);
        } else if !block.is_empty() {
            break;
        }
    }

    if block.is_empty() {
        None
    } else {
        Some(block.join("\n"))
    }
}

/// Split documentation text into the description and resolution sections.
///
/// The text is wrapped in a synthetic root element and parsed as XML. Each
/// section keeps its line structure: comment markers and surrounding
/// whitespace are stripped per line, blank lines dropped, and the rest joined
/// with `line_separator`. Missing sections, missing documentation and text
/// that is not well-formed all yield empty sections.
pub fn parse_sections(
    raw: Option<&str>,
    summary_section: &str,
    resolution_section: &str,
    line_separator: &str,
) -> DocSections {
    let Some(raw) = raw else {
        return DocSections::default();
    };

    let wrapped = format!("<comments>{raw}</comments>");
    let document = match roxmltree::Document::parse(&wrapped) {
        Ok(document) => document,
        Err(err) => {
            log::debug!("Ignoring malformed documentation comment: {err}");
            return DocSections::default();
        }
    };

    DocSections {
        description: section_text(&document, summary_section, line_separator),
        resolution: section_text(&document, resolution_section, line_separator),
    }
}

fn section_text(document: &roxmltree::Document<'_>, section: &str, line_separator: &str) -> String {
    let Some(element) = document
        .root_element()
        .children()
        .find(|node| node.is_element() && node.has_tag_name(section))
    else {
        return String::new();
    };

    let value: String = element
        .descendants()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect();

    let lines: Vec<&str> = value
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix("///").unwrap_or(line).trim()
        })
        .collect();

    // Blank lines around the content go, blank lines inside it stay
    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    lines[first..=last].join(line_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate;
    use pretty_assertions::assert_eq;

    fn sections(raw: &str) -> DocSections {
        parse_sections(Some(raw), "summary", "resolution", "\n")
    }

    #[test]
    fn test_summary_and_resolution() {
        let raw = "/// <summary>\n/// The request stop.\n/// </summary>\n/// <resolution>\n/// Possible resolutions:\n/// 1> Try fixing the configured url\n/// 2> try something else</resolution>";
        let parsed = sections(raw);
        assert_eq!(parsed.description, "The request stop.");
        assert_eq!(
            parsed.resolution,
            "Possible resolutions:\n1> Try fixing the configured url\n2> try something else"
        );
    }

    #[test]
    fn test_missing_section_is_empty() {
        let parsed = sections("/// <summary>Only a summary</summary>\n/// <param name=\"id\">Id</param>");
        assert_eq!(parsed.description, "Only a summary");
        assert_eq!(parsed.resolution, "");
    }

    #[test]
    fn test_nested_markup_contributes_text() {
        let parsed = sections("/// <summary>Raised by <see cref=\"Start\"/> when <c>id</c> &lt; 0</summary>");
        assert_eq!(parsed.description, "Raised by  when id < 0");
    }

    #[test]
    fn test_malformed_comment_degrades() {
        assert_eq!(sections("/// <summary>unterminated"), DocSections::default());
        assert_eq!(sections("/// <summary>a & b</summary>"), DocSections::default());
        assert_eq!(parse_sections(None, "summary", "resolution", "\n"), DocSections::default());
    }

    #[test]
    fn test_custom_separator() {
        let parsed = parse_sections(
            Some("/// <resolution>\n/// one\n///\n/// two\n/// </resolution>"),
            "summary",
            "resolution",
            "\r\n",
        );
        assert_eq!(parsed.resolution, "one\r\n\r\ntwo");
    }

    #[test]
    fn test_interior_blank_lines_kept() {
        let parsed = sections(
            "/// <summary>\n///\n/// Para one.\n///\n/// Para two.\n///\n/// </summary>\n/// <resolution>\n///   \n/// </resolution>",
        );
        assert_eq!(parsed.description, "Para one.\n\nPara two.");
        assert_eq!(parsed.resolution, "");
    }

    const SOURCE: &str = r#"
namespace Demo
{
    public sealed class DemoLog : EventSource
    {
        // plain comment
        /// <summary>
        /// First.
        /// </summary>
        #region Events
        [Event(1)]
        public void First() { }
        #endregion

        /// <summary>Stale block</summary>

        /// <summary>Second.</summary>
        // trailing note
        [Event(2)]
        public void Second() { }

        [Event(3)]
        public void Third() { }
    }
}
"#;

    #[test]
    fn test_leading_doc_comment() {
        let unit = SourceUnit::parse(SOURCE).unwrap();
        let class = locate(&unit, "EventSource").unwrap();
        let methods = class.methods();

        assert_eq!(
            leading_doc_comment(&unit, methods[0]).as_deref(),
            Some("/// <summary>\n/// First.\n/// </summary>")
        );
        assert_eq!(
            leading_doc_comment(&unit, methods[1]).as_deref(),
            Some("/// <summary>Stale block</summary>")
        );
        assert_eq!(leading_doc_comment(&unit, methods[2]), None);
    }
}
