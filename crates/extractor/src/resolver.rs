use crate::locator::ClassNode;
use crate::source::SourceUnit;
use tree_sitter::Node;

/// Resolves attribute argument expressions to their textual value.
///
/// Understands literals, identifiers naming fields of the scope class, and
/// `Outer.Member` where `Outer` is a class nested in the scope. A qualified
/// name whose head is not a nested class is an external constant
/// (`EventLevel.Verbose`) and is returned as written. Every other shape
/// resolves to empty text.
pub struct ExpressionResolver<'a> {
    unit: &'a SourceUnit,
}

/// (scope class node id, identifier) pairs on the current reference chain
type Chain = Vec<(usize, String)>;

impl<'a> ExpressionResolver<'a> {
    pub fn new(unit: &'a SourceUnit) -> Self {
        Self { unit }
    }

    /// Resolve `expression` with `scope` as the class whose fields plain
    /// identifiers refer to
    pub fn resolve(&self, scope: ClassNode<'a>, expression: Node<'a>) -> String {
        let mut chain = Chain::new();
        self.resolve_in(scope, expression, &mut chain)
    }

    fn resolve_in(&self, scope: ClassNode<'a>, expression: Node<'a>, chain: &mut Chain) -> String {
        let text = self.unit.node_text(expression);
        match expression.kind() {
            "integer_literal" => integer_value(text),
            "real_literal" => real_value(text),
            "boolean_literal" | "null_literal" => text.to_string(),
            "character_literal" => unescape(strip_delimiters(text, '\'')),
            "string_literal" | "verbatim_string_literal" | "raw_string_literal" => {
                string_value(text)
            }
            "identifier" => self.resolve_identifier(scope, text, chain),
            "member_access_expression" => self.resolve_member_access(scope, expression, chain),
            "cast_expression" => expression
                .child_by_field_name("value")
                .or_else(|| last_named_child(expression))
                .map(|inner| self.resolve_in(scope, inner, chain))
                .unwrap_or_default(),
            "parenthesized_expression" => last_named_child(expression)
                .map(|inner| self.resolve_in(scope, inner, chain))
                .unwrap_or_default(),
            other => {
                log::debug!("Unsupported expression `{text}` ({other}) in class '{}'", scope.name());
                String::new()
            }
        }
    }

    fn resolve_identifier(&self, scope: ClassNode<'a>, name: &str, chain: &mut Chain) -> String {
        let key = (scope.node().id(), name.to_string());
        if chain.contains(&key) {
            log::warn!(
                "Cyclic constant reference through '{}.{name}'; leaving it unresolved",
                scope.name()
            );
            return String::new();
        }

        let Some(initializer) = scope.field_initializer(name) else {
            log::debug!("No initialized field '{name}' in class '{}'", scope.name());
            return String::new();
        };

        chain.push(key);
        let value = self.resolve_in(scope, initializer, chain);
        chain.pop();
        value
    }

    fn resolve_member_access(
        &self,
        scope: ClassNode<'a>,
        expression: Node<'a>,
        chain: &mut Chain,
    ) -> String {
        let head = expression.child_by_field_name("expression");
        let member = expression.child_by_field_name("name");

        if let (Some(head), Some(member)) = (head, member) {
            if head.kind() == "identifier" {
                if let Some(nested) = scope.nested_class(self.unit.node_text(head)) {
                    return self.resolve_identifier(nested, self.unit.node_text(member), chain);
                }
            }
        }

        // defined outside this file (EventLevel, EventOpcode, EventChannel, ...)
        self.unit
            .node_text(expression)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

fn last_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .last();
    last
}

/// Decimal value of an integer literal; the literal text when it does not fit
fn integer_value(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let digits = cleaned.trim_end_matches(['u', 'U', 'l', 'L']);

    let parsed = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        digits.parse::<u64>()
    };

    parsed.map_or_else(|_| raw.to_string(), |value| value.to_string())
}

/// Value of a real literal without its type suffix; the literal text when it
/// does not parse. Decimals (`m`) keep their written digits.
fn real_value(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    if let Some(decimal) = cleaned.strip_suffix(['m', 'M']) {
        return decimal.to_string();
    }

    let parsed = match cleaned.strip_suffix(['f', 'F']) {
        Some(single) => single.parse::<f32>().map(|value| value.to_string()),
        None => cleaned
            .trim_end_matches(['d', 'D'])
            .parse::<f64>()
            .map(|value| value.to_string()),
    };
    parsed.unwrap_or_else(|_| raw.to_string())
}

/// Content of a string literal without quotes, escapes decoded
fn string_value(raw: &str) -> String {
    // UTF-8 string literals: "abc"u8
    let raw = raw
        .strip_suffix("u8")
        .or_else(|| raw.strip_suffix("U8"))
        .unwrap_or(raw);

    if let Some(verbatim) = raw.strip_prefix('@') {
        return strip_delimiters(verbatim, '"').replace("\"\"", "\"");
    }

    let quotes = raw.chars().take_while(|c| *c == '"').count();
    if quotes >= 3 {
        return raw_string_value(raw, quotes);
    }

    unescape(strip_delimiters(raw, '"'))
}

fn raw_string_value(raw: &str, quotes: usize) -> String {
    let inner = raw
        .get(quotes..raw.len().saturating_sub(quotes))
        .unwrap_or_default();

    if !inner.contains('\n') {
        return inner.to_string();
    }

    // multi-line raw strings: content starts after the opening line and the
    // closing line's indentation is removed from every line
    let mut lines: Vec<&str> = inner.lines().collect();
    if lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    let indent = match lines.last() {
        Some(last) if last.trim().is_empty() => {
            let indent = last.len();
            lines.pop();
            indent
        }
        _ => 0,
    };

    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_delimiters(raw: &str, delimiter: char) -> &str {
    let raw = raw.strip_prefix(delimiter).unwrap_or(raw);
    raw.strip_suffix(delimiter).unwrap_or(raw)
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'e' => out.push('\u{1B}'),
            'u' | 'U' | 'x' => {
                let max = match escaped {
                    'u' => 4,
                    'U' => 8,
                    _ => 4,
                };
                let mut hex = String::new();
                while hex.len() < max {
                    match chars.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            hex.push(*h);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(escaped);
                        out.push_str(&hex);
                    }
                }
            }
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::find_attribute;
    use crate::locator::locate;

    const SOURCE: &str = r#"
namespace Demo
{
    [EventSource(Name = Names.Source)]
    public sealed class DemoLog : EventSource
    {
        private const int Direct = 5;
        private const int Alias = Direct;
        private const int Loop = Loop;
        private const int PingA = PingB;
        private const int PingB = PingA;
        private const string Prefix = "Demo";
        private const string Computed = Prefix + "-Log";
        private static readonly int Late;

        [Event(Direct)] public void A() { }
        [Event(Alias)] public void B() { }
        [Event(Ids.Named)] public void C() { }
        [Event(Tasks.Request)] public void D() { }
        [Event(EventLevel.Verbose)] public void E() { }
        [Event(System.Diagnostics.Tracing.EventLevel.Error)] public void F() { }
        [Event(Missing)] public void G() { }
        [Event(Tasks.Missing)] public void H() { }
        [Event(Loop)] public void I() { }
        [Event(PingA)] public void J() { }
        [Event(Computed)] public void K() { }
        [Event(Late)] public void L() { }
        [Event(GetId())] public void M() { }
        [Event((5))] public void N() { }
        [Event(Ids.Deep)] public void O() { }

        public class Names
        {
            public const string Source = @"Demo-""Quoted""-Log";
        }

        public class Ids
        {
            public const int Named = 0x0A;
            public const int Deep = Named;
        }

        public class Tasks
        {
            public const EventTask Request = (EventTask)0x1;
        }
    }
}
"#;

    fn resolve_all(source: &str) -> Vec<String> {
        let unit = SourceUnit::parse(source).unwrap();
        let class = locate(&unit, "EventSource").unwrap();
        let resolver = ExpressionResolver::new(&unit);

        class
            .methods()
            .into_iter()
            .map(|method| {
                let attribute = find_attribute(&unit, method, "Event").unwrap();
                let argument = attribute.positional_argument().unwrap();
                resolver.resolve(class, argument.expression)
            })
            .collect()
    }

    #[test]
    fn test_expression_shapes() {
        let resolved = resolve_all(SOURCE);
        let expected = vec![
            "5",                                    // literal field
            "5",                                    // identifier chain
            "10",                                   // nested class, hex literal
            "1",                                    // nested class, cast
            "EventLevel.Verbose",                   // external enum member
            "System.Diagnostics.Tracing.EventLevel.Error",
            "",                                     // unknown identifier
            "",                                     // nested class without member
            "",                                     // self reference
            "",                                     // two-field cycle
            "",                                     // arithmetic
            "",                                     // no initializer
            "",                                     // method call
            "5",                                    // parenthesised
            "10",                                   // chain inside nested class
        ];
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_class_attribute_name() {
        let unit = SourceUnit::parse(SOURCE).unwrap();
        let class = locate(&unit, "EventSource").unwrap();
        let attribute = find_attribute(&unit, class.node(), "EventSource").unwrap();
        let name = attribute.named_argument("Name").unwrap();

        let resolver = ExpressionResolver::new(&unit);
        assert_eq!(resolver.resolve(class, name.expression), "Demo-\"Quoted\"-Log");
    }

    #[test]
    fn test_integer_value() {
        assert_eq!(integer_value("5"), "5");
        assert_eq!(integer_value("0x1"), "1");
        assert_eq!(integer_value("0X0001"), "1");
        assert_eq!(integer_value("0b101"), "5");
        assert_eq!(integer_value("1_000"), "1000");
        assert_eq!(integer_value("42UL"), "42");
        assert_eq!(integer_value("0xFFFFFFFFFFFFFFFFFF"), "0xFFFFFFFFFFFFFFFFFF");
    }

    #[test]
    fn test_real_value() {
        assert_eq!(real_value("1.5f"), "1.5");
        assert_eq!(real_value("2.50D"), "2.5");
        assert_eq!(real_value("1_000.25"), "1000.25");
        assert_eq!(real_value("1e3"), "1000");
        assert_eq!(real_value("1.50m"), "1.50");
        assert_eq!(real_value(".5"), "0.5");
    }

    #[test]
    fn test_string_value() {
        assert_eq!(string_value(r#""plain""#), "plain");
        assert_eq!(string_value(r#""tab\there""#), "tab\there");
        assert_eq!(string_value(r#""quote \" and \\""#), "quote \" and \\");
        assert_eq!(string_value(r#""\u0041\x42""#), "AB");
        assert_eq!(string_value(r#"@"C:\logs""#), "C:\\logs");
        assert_eq!(string_value(r#""bytes"u8"#), "bytes");
        assert_eq!(string_value(r#""""raw "quoted" text""""#), "raw \"quoted\" text");
        assert_eq!(
            string_value("\"\"\"\n    first\n      second\n    \"\"\""),
            "first\n  second"
        );
    }
}
