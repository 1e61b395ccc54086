use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

/// A single CSS rule as exposed by the CSSOM
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CssRule {
    /// Selector text; absent for at-rules such as `@media` or `@font-face`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_text: Option<String>,

    /// Full serialized rule
    pub css_text: String,
}

impl CssRule {
    /// A style rule, normalized to `selector { declarations }`
    pub fn style(selector: &str, declarations: &str) -> Self {
        let selector = collapse_whitespace(selector);
        let declarations = declarations.trim();
        let css_text = if declarations.is_empty() {
            format!("{} {{ }}", selector)
        } else {
            format!("{} {{ {} }}", selector, declarations)
        };

        Self { selector_text: Some(selector), css_text }
    }

    /// An at-rule, kept verbatim and never matched
    pub fn at_rule(text: &str) -> Self {
        Self { selector_text: None, css_text: text.trim().to_string() }
    }
}

/// Whether a stylesheet's rules could be read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "rules", rename_all = "snake_case")]
pub enum SheetAccess {
    /// Rules are readable
    Accessible(Vec<CssRule>),
    /// Reading rules threw (cross-origin sheet)
    CrossOrigin,
}

/// A stylesheet attached to a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleSheet {
    /// `href` of linked sheets; `None` for inline `<style>` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    pub access: SheetAccess,
}

impl StyleSheet {
    /// Build a readable sheet from CSS source
    pub fn parse(href: Option<String>, source: &str) -> Self {
        Self { href, access: SheetAccess::Accessible(parse_rules(source)) }
    }

    /// Build a readable sheet from already-split rules
    pub fn with_rules(href: Option<String>, rules: Vec<CssRule>) -> Self {
        Self { href, access: SheetAccess::Accessible(rules) }
    }

    /// A sheet whose rules cannot be read
    pub fn cross_origin(href: impl Into<String>) -> Self {
        Self { href: Some(href.into()), access: SheetAccess::CrossOrigin }
    }

    /// The sheet's rules, if readable
    pub fn rules(&self) -> Option<&[CssRule]> {
        match &self.access {
            SheetAccess::Accessible(rules) => Some(rules),
            SheetAccess::CrossOrigin => None,
        }
    }

    /// Human-readable label for diagnostics
    pub fn label(&self) -> &str {
        self.href.as_deref().unwrap_or("<inline style>")
    }
}

/// Split CSS source into top-level rules.
///
/// Style rules are normalized to `selector { property: value; ... }` with
/// comments dropped; at-rules (block or statement form) are kept as written.
pub fn parse_rules(source: &str) -> Vec<CssRule> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut rules = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let start = parser.position();
        let state = parser.state();
        if matches!(parser.next(), Ok(Token::AtKeyword(_))) {
            skip_at_rule(&mut parser);
            rules.push(CssRule::at_rule(parser.slice_from(start)));
            continue;
        }
        parser.reset(&state);

        let prelude: Result<(), ParseError<()>> =
            parser.parse_until_before(Delimiter::CurlyBracketBlock, |p| {
                while p.next().is_ok() {}
                Ok(())
            });
        if prelude.is_err() {
            break;
        }
        let selector = parser.slice_from(start).trim().to_string();

        if parser.expect_curly_bracket_block().is_err() {
            log::debug!("Dropping CSS rule without a block: {}", selector);
            break;
        }
        let declarations: Result<Vec<_>, ParseError<()>> = parser.parse_nested_block(|p| Ok(declaration_list(p)));

        if !selector.is_empty() {
            rules.push(CssRule::style(&selector, &join_declarations(&declarations.unwrap_or_default())));
        }
    }

    rules
}

/// Consume the rest of an at-rule: up to its `;` or through its block
fn skip_at_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => break,
            Ok(Token::CurlyBracketBlock) => {
                let _: Result<(), ParseError<()>> = parser.parse_nested_block(|p| {
                    while p.next().is_ok() {}
                    Ok(())
                });
                break;
            }
            Ok(_) => {}
        }
    }
}

/// Split an inline `style` attribute into (property, value) pairs
pub(crate) fn parse_declarations(style: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    declaration_list(&mut parser)
}

/// `property: value` pairs up to the end of the parser's input.
/// Malformed declarations are skipped through their `;`.
fn declaration_list<'i>(parser: &mut Parser<'i, '_>) -> Vec<(String, String)> {
    let mut declarations = Vec::new();

    while !parser.is_exhausted() {
        let declaration = parser.parse_until_after(Delimiter::Semicolon, |p| {
            let property = p.expect_ident()?.to_string();
            p.expect_colon()?;
            let value_start = p.position();
            while p.next().is_ok() {}
            Ok::<_, ParseError<'i, ()>>((property, p.slice_from(value_start).trim().to_string()))
        });

        match declaration {
            Ok((property, value)) if !value.is_empty() => declarations.push((property, value)),
            Ok(_) => {}
            Err(e) => log::trace!("Skipping malformed declaration: {:?}", e),
        }
    }

    declarations
}

pub(crate) fn join_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_rule_normalization() {
        let rules = parse_rules(".card {\n  color: red;\n}\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector_text.as_deref(), Some(".card"));
        assert_eq!(rules[0].css_text, ".card { color: red; }");
    }

    #[test]
    fn test_at_rules_have_no_selector() {
        let css = "@import url(\"base.css\");\n@media (max-width: 600px) { .card { color: blue; } }\np { margin: 0; }";
        let rules = parse_rules(css);

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].selector_text, None);
        assert_eq!(rules[0].css_text, "@import url(\"base.css\");");
        assert_eq!(rules[1].selector_text, None);
        assert!(rules[1].css_text.starts_with("@media"));
        assert!(rules[1].css_text.ends_with('}'));
        assert_eq!(rules[2].selector_text.as_deref(), Some("p"));
    }

    #[test]
    fn test_comments_and_strings() {
        let css = "/* header } */ a::after { content: \"}\"; } /* trailing";
        let rules = parse_rules(css);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector_text.as_deref(), Some("a::after"));
        assert_eq!(rules[0].css_text, "a::after { content: \"}\"; }");
    }

    #[test]
    fn test_escaped_quote_does_not_swallow_rules() {
        let rules = parse_rules("a::after { content: \"\\\"\"; }\n.card { color: red; }");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].css_text, "a::after { content: \"\\\"\"; }");
        assert_eq!(rules[1].css_text, ".card { color: red; }");
    }

    #[test]
    fn test_comment_opener_inside_string() {
        let rules = parse_rules("q::before { content: \"/*\"; }\n.card { color: red; }");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].css_text, "q::before { content: \"/*\"; }");
        assert_eq!(rules[1].css_text, ".card { color: red; }");
    }

    #[test]
    fn test_declaration_comments_and_empty_statements() {
        let rules = parse_rules(".a  .b {\n  /* note */ color: red; ;; margin: 0 }");

        assert_eq!(rules[0].selector_text.as_deref(), Some(".a .b"));
        assert_eq!(rules[0].css_text, ".a .b { color: red; margin: 0; }");
    }

    #[test]
    fn test_inline_declarations() {
        let declarations = parse_declarations(
            "background: url(data:image/png;base64,AAA); content: \"a;\\\"b\"; color:RED !important",
        );

        assert_eq!(
            declarations,
            vec![
                ("background".to_string(), "url(data:image/png;base64,AAA)".to_string()),
                ("content".to_string(), "\"a;\\\"b\"".to_string()),
                ("color".to_string(), "RED !important".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_block() {
        let rules = parse_rules("div.empty {}");
        assert_eq!(rules[0].css_text, "div.empty { }");
    }

    #[test]
    fn test_sheet_access() {
        let inline = StyleSheet::parse(None, "p { color: red; }");
        assert_eq!(inline.rules().map(|r| r.len()), Some(1));
        assert_eq!(inline.label(), "<inline style>");

        let remote = StyleSheet::cross_origin("https://cdn.example.net/site.css");
        assert!(remote.rules().is_none());
        assert_eq!(remote.label(), "https://cdn.example.net/site.css");
    }

    #[test]
    fn test_sheet_deserialization() {
        let json = r#"{"href":"https://a.test/x.css","access":{"status":"cross_origin"}}"#;
        let sheet: StyleSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.access, SheetAccess::CrossOrigin);

        let json = r#"{"access":{"status":"accessible","rules":[{"selector_text":"p","css_text":"p { }"}]}}"#;
        let sheet: StyleSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.rules().unwrap()[0].selector_text.as_deref(), Some("p"));
    }
}
