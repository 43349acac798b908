use crate::source::SourceUnit;
use tree_sitter::Node;

/// A class declaration inside a [`SourceUnit`]
#[derive(Clone, Copy)]
pub struct ClassNode<'a> {
    unit: &'a SourceUnit,
    node: Node<'a>,
}

impl<'a> ClassNode<'a> {
    pub(crate) fn new(unit: &'a SourceUnit, node: Node<'a>) -> Self {
        Self { unit, node }
    }

    /// Underlying `class_declaration` node
    pub fn node(&self) -> Node<'a> {
        self.node
    }

    /// Source unit this class belongs to
    pub fn unit(&self) -> &'a SourceUnit {
        self.unit
    }

    /// Declared class identifier
    pub fn name(&self) -> &'a str {
        self.node
            .child_by_field_name("name")
            .or_else(|| first_child_of_kind(self.node, "identifier"))
            .map(|name| self.unit.node_text(name))
            .unwrap_or_default()
    }

    /// Textual names from the base list, in declaration order
    pub fn base_types(&self) -> Vec<&'a str> {
        let Some(base_list) = first_child_of_kind(self.node, "base_list") else {
            return Vec::new();
        };

        let mut cursor = base_list.walk();
        base_list
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra() && child.kind() != "argument_list")
            .map(|child| {
                // `class Foo(int x) : Base(x)` wraps the type together with its arguments
                if child.kind() == "primary_constructor_base_type" {
                    child
                        .child_by_field_name("type")
                        .or_else(|| child.named_child(0))
                        .unwrap_or(child)
                } else {
                    child
                }
            })
            .map(|ty| self.unit.node_text(ty))
            .collect()
    }

    /// Whether one of the base types is exactly `marker_type`
    pub fn derives_from(&self, marker_type: &str) -> bool {
        self.base_types().iter().any(|ty| *ty == marker_type)
    }

    /// Member declarations (nested classes, fields, methods, ...) in source order
    pub fn members(&self) -> Vec<Node<'a>> {
        let Some(body) = self
            .node
            .child_by_field_name("body")
            .or_else(|| first_child_of_kind(self.node, "declaration_list"))
        else {
            return Vec::new();
        };

        let mut cursor = body.walk();
        body.named_children(&mut cursor)
            .filter(|member| !member.is_extra())
            .collect()
    }

    /// Method declarations in source order
    pub fn methods(&self) -> Vec<Node<'a>> {
        self.members()
            .into_iter()
            .filter(|member| member.kind() == "method_declaration")
            .collect()
    }

    /// Class declared directly inside this one
    pub fn nested_class(&self, name: &str) -> Option<ClassNode<'a>> {
        self.members()
            .into_iter()
            .filter(|member| member.kind() == "class_declaration")
            .map(|member| ClassNode::new(self.unit, member))
            .find(|class| class.name() == name)
    }

    /// Initializer expression of a field declared directly in this class.
    ///
    /// `None` when no declarator carries the name or the declarator has no
    /// initializer.
    pub fn field_initializer(&self, name: &str) -> Option<Node<'a>> {
        for member in self.members() {
            if member.kind() != "field_declaration" {
                continue;
            }
            let Some(declaration) = first_child_of_kind(member, "variable_declaration") else {
                continue;
            };

            let mut cursor = declaration.walk();
            let declarators: Vec<_> = declaration
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "variable_declarator")
                .collect();

            for declarator in declarators {
                let declared = declarator
                    .child_by_field_name("name")
                    .or_else(|| first_child_of_kind(declarator, "identifier"))
                    .map(|ident| self.unit.node_text(ident));
                if declared == Some(name) {
                    return declarator_initializer(declarator);
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for ClassNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassNode")
            .field("name", &self.name())
            .field("line", &(self.node.start_position().row + 1))
            .finish()
    }
}

/// Find the event source class of a file.
///
/// Only classes declared directly in a namespace (block or file scoped) are
/// candidates. The file is expected to hold a single event source; when it
/// holds more, the first one wins.
pub fn locate<'a>(unit: &'a SourceUnit, marker_type: &str) -> Option<ClassNode<'a>> {
    let mut candidates = namespace_members(unit.root())
        .into_iter()
        .filter(|member| member.kind() == "class_declaration")
        .map(|member| ClassNode::new(unit, member))
        .filter(|class| class.derives_from(marker_type));

    let found = candidates.next()?;
    for ignored in candidates {
        log::warn!(
            "Ignoring additional {marker_type} class '{}', already using '{}'",
            ignored.name(),
            found.name()
        );
    }
    Some(found)
}

/// Declarations that belong to top-level namespaces
fn namespace_members(root: Node<'_>) -> Vec<Node<'_>> {
    let mut members = Vec::new();
    let mut in_file_scope = false;

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        match child.kind() {
            "namespace_declaration" => {
                let body = child
                    .child_by_field_name("body")
                    .or_else(|| first_child_of_kind(child, "declaration_list"));
                if let Some(body) = body {
                    let mut body_cursor = body.walk();
                    members.extend(body.named_children(&mut body_cursor));
                }
            }
            "file_scoped_namespace_declaration" => {
                in_file_scope = true;
                // older grammars nest the members inside the declaration itself
                let mut ns_cursor = child.walk();
                members.extend(child.named_children(&mut ns_cursor));
            }
            _ if in_file_scope => members.push(child),
            _ => {}
        }
    }

    members
}

fn declarator_initializer(declarator: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = declarator.walk();
    let mut after_equals = false;
    for child in declarator.children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        if child.kind() == "equals_value_clause" {
            return child.named_child(0);
        }
        if after_equals && child.is_named() {
            return Some(child);
        }
        if child.kind() == "=" {
            after_equals = true;
        }
    }
    None
}

pub(crate) fn first_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
using System.Diagnostics.Tracing;

namespace Demo
{
    public class Helper : IDisposable
    {
    }

    [EventSource(Name = "Demo-Log")]
    public sealed class DemoLog : EventSource, IDisposable
    {
        private const int First = 1, Second = 2;
        public static readonly string Label = "demo";

        public class Tasks
        {
            public const EventTask Request = (EventTask)0x1;
        }

        [Event(1)]
        public void Started() { WriteEvent(1); }

        public void NotAnEvent() { }
    }
}
"#;

    #[test]
    fn test_locates_class_by_base_type() {
        let unit = SourceUnit::parse(SOURCE).unwrap();
        let class = locate(&unit, "EventSource").unwrap();
        assert_eq!(class.name(), "DemoLog");
        assert_eq!(class.base_types(), vec!["EventSource", "IDisposable"]);
    }

    #[test]
    fn test_marker_match_is_exact() {
        let unit = SourceUnit::parse(SOURCE).unwrap();
        assert!(locate(&unit, "Tracing.EventSource").is_none());
        assert!(locate(&unit, "eventsource").is_none());
        assert_eq!(locate(&unit, "IDisposable").unwrap().name(), "Helper");
    }

    #[test]
    fn test_no_namespace_means_no_class() {
        let unit = SourceUnit::parse("public class Log : EventSource { }").unwrap();
        assert!(locate(&unit, "EventSource").is_none());

        let unit = SourceUnit::parse("[assembly: AssemblyTitle(\"x\")]").unwrap();
        assert!(locate(&unit, "EventSource").is_none());
    }

    #[test]
    fn test_file_scoped_namespace() {
        let unit = SourceUnit::parse(
            "namespace Demo;\n\npublic sealed class Log : EventSource\n{\n}\n",
        )
        .unwrap();
        assert_eq!(locate(&unit, "EventSource").unwrap().name(), "Log");
    }

    #[test]
    fn test_first_candidate_wins() {
        let unit = SourceUnit::parse(
            "namespace Demo { class A : EventSource { } class B : EventSource { } }",
        )
        .unwrap();
        assert_eq!(locate(&unit, "EventSource").unwrap().name(), "A");
    }

    #[test]
    fn test_members_and_lookup() {
        let unit = SourceUnit::parse(SOURCE).unwrap();
        let class = locate(&unit, "EventSource").unwrap();

        let methods: Vec<_> = class
            .methods()
            .into_iter()
            .filter_map(|m| m.child_by_field_name("name"))
            .map(|n| unit.node_text(n))
            .collect();
        assert_eq!(methods, vec!["Started", "NotAnEvent"]);

        let second = class.field_initializer("Second").unwrap();
        assert_eq!(unit.node_text(second), "2");
        let label = class.field_initializer("Label").unwrap();
        assert_eq!(unit.node_text(label), "\"demo\"");
        assert!(class.field_initializer("Missing").is_none());

        let tasks = class.nested_class("Tasks").unwrap();
        let request = tasks.field_initializer("Request").unwrap();
        assert_eq!(unit.node_text(request), "(EventTask)0x1");
        assert!(class.nested_class("Keywords").is_none());
    }
}
