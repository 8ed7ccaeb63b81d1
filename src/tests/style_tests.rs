//! 样式解析单元测试

use crate::parser::style::{strip_comments, StyleParser, StyleProperties, StyleRule};
use crate::registry::StyleRegistry;
use pretty_assertions::assert_eq;

/// 辅助函数：构造属性表
fn props(pairs: &[(&str, &str)]) -> StyleProperties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn selectors(rules: &[StyleRule]) -> Vec<&str> {
    rules.iter().map(|r| r.selector.as_str()).collect()
}

#[test]
fn test_empty_text() {
    assert!(StyleParser::parse("").is_empty());
    assert!(StyleParser::parse("  \n\t ").is_empty());
}

#[test]
fn test_single_rule() {
    let rules = StyleParser::parse(".a{color:red}");
    assert_eq!(
        rules,
        vec![StyleRule {
            selector: ".a".to_string(),
            properties: props(&[("color", "red")]),
        }]
    );
}

#[test]
fn test_unterminated_block_is_discarded() {
    assert!(StyleParser::parse(".a{color:red").is_empty());
}

#[test]
fn test_dangling_selector_keeps_earlier_rules() {
    let rules = StyleParser::parse(".a{color:red} .b");
    assert_eq!(selectors(&rules), vec![".a"]);
}

#[test]
fn test_unterminated_block_keeps_earlier_rules() {
    let rules = StyleParser::parse(".a{color:red} .b{color:blue");
    assert_eq!(selectors(&rules), vec![".a"]);
}

#[test]
fn test_whitespace_malformed_and_camel_case() {
    let rules = StyleParser::parse(".a { display : block ; bad-decl ; margin-top:1 }");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].properties, props(&[("display", "block"), ("marginTop", "1")]));
}

#[test]
fn test_rules_in_source_order() {
    let css = r#"
        view { padding: 4px }
        .title, .subtitle { font-size: 18px; }
        #main > text { color: #333 }
    "#;
    let rules = StyleParser::parse(css);

    assert_eq!(selectors(&rules), vec!["view", ".title, .subtitle", "#main > text"]);
    assert_eq!(rules[1].properties, props(&[("fontSize", "18px")]));
    assert_eq!(rules[2].properties, props(&[("color", "#333")]));
}

#[test]
fn test_comments_are_stripped() {
    let css = "/* header */ .a { color: red; /* inline */ }\n/* multi\n line */ .b { top: 0 }";
    let rules = StyleParser::parse(css);

    assert_eq!(selectors(&rules), vec![".a", ".b"]);
    assert_eq!(rules[0].properties, props(&[("color", "red")]));

    let stripped = strip_comments(css);
    assert!(!stripped.contains("/*"));
    assert!(!stripped.contains("*/"));
}

#[test]
fn test_comment_inside_selector_position() {
    let rules = StyleParser::parse(".a /* note */ { color: red }");
    assert_eq!(selectors(&rules), vec![".a"]);
}

#[test]
fn test_duplicate_selectors_are_kept() {
    let rules = StyleParser::parse(".a{color:red} .a{color:blue}");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].properties, props(&[("color", "red")]));
    assert_eq!(rules[1].properties, props(&[("color", "blue")]));
}

#[test]
fn test_empty_block_yields_empty_rule() {
    let rules = StyleParser::parse(".a {}");
    assert_eq!(rules.len(), 1);
    assert!(rules[0].properties.is_empty());
}

#[test]
fn test_empty_selector_halts_parse() {
    assert!(StyleParser::parse("{color:red} .a{color:blue}").is_empty());
}

#[test]
fn test_empty_key_is_skipped() {
    let rules = StyleParser::parse(".a { :red; color: blue }");
    assert_eq!(rules[0].properties, props(&[("color", "blue")]));
}

#[test]
fn test_later_duplicate_key_wins() {
    let rules = StyleParser::parse(".a { color: red; color: blue }");
    assert_eq!(rules[0].properties, props(&[("color", "blue")]));
}

#[test]
fn test_value_is_kept_raw() {
    let rules = StyleParser::parse(".a { font-family : \"Helvetica Neue\", sans-serif ; width: calc(100% - 2px) }");
    assert_eq!(
        rules[0].properties,
        props(&[
            ("fontFamily", "\"Helvetica Neue\", sans-serif"),
            ("width", "calc(100% - 2px)"),
        ])
    );
}

#[test]
fn test_registry_accumulates_in_order() {
    let mut registry = StyleRegistry::new();
    assert_eq!(registry.add_style_text(".a{color:red}"), 1);
    assert_eq!(registry.add_style_text(".b{color:blue} .a{top:0}"), 2);
    assert_eq!(registry.add_style_text(".broken{"), 0);

    assert_eq!(selectors(registry.all()), vec![".a", ".b", ".a"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_bare_declarations_yield_no_rule() {
    assert!(StyleParser::parse("color:red;").is_empty());
    assert_eq!(StyleParser::parse("text{color:red;}").len(), 1);
}

#[test]
fn test_rule_serializes_with_sorted_keys() {
    let rules = StyleParser::parse(".a { top: 0; color: red; background-color: #fff }");
    let json = serde_json::to_string(&rules[0]).unwrap();
    assert_eq!(
        json,
        r##"{"selector":".a","rule":{"backgroundColor":"#fff","color":"red","top":"0"}}"##
    );
}
