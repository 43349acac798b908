use crate::source::SourceUnit;
use tree_sitter::Node;

/// One `[Name(...)]` attribute attached to a declaration
#[derive(Clone, Copy)]
pub struct AttributeNode<'a> {
    unit: &'a SourceUnit,
    node: Node<'a>,
}

/// An attribute argument; `name` is `None` for positional arguments
#[derive(Clone, Copy)]
pub struct AttributeArgument<'a> {
    pub name: Option<&'a str>,
    pub expression: Node<'a>,
}

impl<'a> AttributeNode<'a> {
    /// Attribute name exactly as written (`Event`, `Tracing.Event`, ...)
    pub fn name(&self) -> &'a str {
        self.node
            .child_by_field_name("name")
            .or_else(|| self.node.named_child(0))
            .map(|name| self.unit.node_text(name))
            .unwrap_or_default()
    }

    /// Arguments in source order
    pub fn arguments(&self) -> Vec<AttributeArgument<'a>> {
        let mut cursor = self.node.walk();
        let Some(list) = self
            .node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "attribute_argument_list")
        else {
            return Vec::new();
        };

        let mut list_cursor = list.walk();
        let arguments: Vec<_> = list
            .named_children(&mut list_cursor)
            .filter(|child| child.kind() == "attribute_argument")
            .collect();

        arguments
            .into_iter()
            .filter_map(|argument| parse_argument(self.unit, argument))
            .collect()
    }

    /// Argument given as `name = value`
    pub fn named_argument(&self, name: &str) -> Option<AttributeArgument<'a>> {
        self.arguments()
            .into_iter()
            .find(|argument| argument.name == Some(name))
    }

    /// First positional argument
    pub fn positional_argument(&self) -> Option<AttributeArgument<'a>> {
        self.arguments()
            .into_iter()
            .find(|argument| argument.name.is_none())
    }

    /// Argument named `name`, falling back to the first positional one.
    ///
    /// `[Event(5)]` and `[Event(Id = 5)]` both declare the id.
    pub fn named_or_positional(&self, name: &str) -> Option<AttributeArgument<'a>> {
        self.named_argument(name)
            .or_else(|| self.positional_argument())
    }
}

/// Find the first attribute called `name` across all attribute lists of a
/// declaration
pub fn find_attribute<'a>(
    unit: &'a SourceUnit,
    declaration: Node<'a>,
    name: &str,
) -> Option<AttributeNode<'a>> {
    let mut cursor = declaration.walk();
    let lists: Vec<_> = declaration
        .children(&mut cursor)
        .filter(|child| child.kind() == "attribute_list")
        .collect();

    for list in lists {
        let mut list_cursor = list.walk();
        let attributes: Vec<_> = list
            .named_children(&mut list_cursor)
            .filter(|child| child.kind() == "attribute")
            .collect();

        for node in attributes {
            let attribute = AttributeNode { unit, node };
            if attribute.name() == name {
                return Some(attribute);
            }
        }
    }
    None
}

fn parse_argument<'a>(unit: &'a SourceUnit, argument: Node<'a>) -> Option<AttributeArgument<'a>> {
    let mut cursor = argument.walk();
    let children: Vec<_> = argument
        .children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();

    let mut name = None;
    for (idx, child) in children.iter().enumerate() {
        match child.kind() {
            "name_equals" => {
                name = child.named_child(0).map(|ident| unit.node_text(ident));
            }
            "=" if idx > 0 => {
                name = Some(unit.node_text(children[idx - 1]));
            }
            _ => {}
        }
    }

    // `name: value` binds a constructor parameter, which still counts as positional
    let expression = children
        .iter()
        .rev()
        .find(|child| child.is_named() && !matches!(child.kind(), "name_equals" | "name_colon"))
        .copied()?;

    Some(AttributeArgument { name, expression })
}
