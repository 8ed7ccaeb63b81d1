//! 物化器单元测试

use crate::native::{MemoryToolkit, Toolkit, WidgetKind};
use crate::parser::{MarkupDocument, MarkupParser};
use crate::registry::StyleRegistry;
use crate::renderer::{MaterializeStats, Materializer, TagTable};
use pretty_assertions::assert_eq;

/// 辅助函数：解析标记
fn parse(xml: &str) -> MarkupDocument {
    MarkupParser::parse(xml).unwrap()
}

/// 把文档根元素的子节点物化到新的内存工具包
fn build(xml: &str) -> (MemoryToolkit, StyleRegistry, MaterializeStats) {
    let doc = parse(xml);
    let mut toolkit = MemoryToolkit::new();
    let mut registry = StyleRegistry::new();
    let tags = TagTable::default();
    let root = toolkit.root();

    let stats = {
        let mut m = Materializer::new(&mut toolkit, &mut registry, &tags);
        m.materialize(doc.root_element(), &root);
        m.stats()
    };
    (toolkit, registry, stats)
}

#[test]
fn test_panel_with_text_leaf() {
    let doc = parse(r#"<panel id="x"><text>hi<b>ignored</b></text></panel>"#);
    let mut toolkit = MemoryToolkit::new();
    let mut registry = StyleRegistry::new();
    let tags = TagTable::default();
    let root = toolkit.root();

    Materializer::new(&mut toolkit, &mut registry, &tags).materialize_element(doc.root_element(), &root);

    let top = toolkit.children(MemoryToolkit::ROOT);
    assert_eq!(top.len(), 1);
    let panel = toolkit.widget(top[0]);
    assert_eq!(panel.tag, "panel");
    assert_eq!(panel.attributes, vec![("id".to_string(), "x".to_string())]);

    assert_eq!(panel.children.len(), 1);
    let text = toolkit.widget(panel.children[0]);
    assert_eq!(text.tag, "text");
    assert_eq!(text.kind, WidgetKind::Text);
    assert_eq!(text.value.as_deref(), Some("hi"));
    assert!(text.children.is_empty());
    assert_eq!(toolkit.len(), 2);
}

#[test]
fn test_document_root_is_not_materialized() {
    let (toolkit, _, stats) = build("<app><view/><view/></app>");

    let top = toolkit.children(MemoryToolkit::ROOT);
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|id| toolkit.widget(*id).tag == "view"));
    assert_eq!(stats.widgets, 2);
}

#[test]
fn test_document_order_is_preserved() {
    let (toolkit, _, _) = build(
        r#"<app><view id="a"><view id="a1"/><view id="a2"/></view><view id="b"/></app>"#,
    );

    let ids: Vec<&str> = toolkit
        .descendants(MemoryToolkit::ROOT)
        .into_iter()
        .map(|w| toolkit.widget(w).get_attr("id").unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "a1", "a2", "b"]);
}

#[test]
fn test_attributes_copied_verbatim() {
    let (toolkit, _, _) = build(r#"<app><button data-count="3" disabled="" Class="Big">ok</button></app>"#);

    let button = toolkit.widget(toolkit.children(MemoryToolkit::ROOT)[0]);
    assert_eq!(
        button.attributes,
        vec![
            ("data-count".to_string(), "3".to_string()),
            ("disabled".to_string(), "".to_string()),
            ("Class".to_string(), "Big".to_string()),
        ]
    );
    // button 不是叶子标签，文本子节点被跳过
    assert_eq!(button.value, None);
}

#[test]
fn test_tag_case_is_kept_for_factory() {
    let (toolkit, _, _) = build("<app><TextInput>abc</TextInput></app>");

    let input = toolkit.widget(toolkit.children(MemoryToolkit::ROOT)[0]);
    assert_eq!(input.tag, "TextInput");
    assert_eq!(input.kind, WidgetKind::TextInput);
    assert_eq!(input.value.as_deref(), Some("abc"));
}

#[test]
fn test_empty_leaf_has_no_value() {
    let (toolkit, _, _) = build("<app><text/></app>");
    let text = toolkit.widget(toolkit.children(MemoryToolkit::ROOT)[0]);
    assert_eq!(text.value, None);
}

#[test]
fn test_style_tag_adds_rules_without_widget() {
    let (toolkit, registry, stats) = build(
        "<app><style>.a{color:red}</style><view class=\"a\"/><style>.b{top:0}</style></app>",
    );

    assert_eq!(toolkit.len(), 1);
    assert_eq!(registry.len(), 2);
    assert_eq!(stats.style_rules, 2);
}

#[test]
fn test_single_declaration_style_block() {
    let (toolkit, registry, _) = build("<app><style>text{color:red;}</style></app>");

    assert!(toolkit.is_empty());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.all()[0].properties.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_nested_style_tag_is_handled() {
    let (toolkit, registry, _) = build("<app><view><style>.a{top:0}</style></view></app>");

    let view = toolkit.children(MemoryToolkit::ROOT)[0];
    assert!(toolkit.children(view).is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_empty_style_tag_is_ignored() {
    let (toolkit, registry, _) = build("<app><style/><STYLE></STYLE></app>");
    assert!(toolkit.is_empty());
    assert!(registry.is_empty());
}

#[test]
fn test_flush_signals_once_and_skips_children() {
    let (toolkit, _, stats) = build("<app><flush><view/><flush/></flush><view/></app>");

    assert_eq!(toolkit.flush_count(), 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(toolkit.len(), 1);
}

#[test]
fn test_text_at_container_level_is_skipped() {
    let (toolkit, _, _) = build("<app><view>loose text<text>kept</text> more</view></app>");

    let view = toolkit.children(MemoryToolkit::ROOT)[0];
    let children = toolkit.children(view);
    assert_eq!(children.len(), 1);
    assert_eq!(toolkit.widget(children[0]).value.as_deref(), Some("kept"));
    assert_eq!(toolkit.widget(view).value, None);
}

#[test]
fn test_custom_leaf_tags() {
    let doc = parse("<app><button>Go<text>no</text></button><text>plain</text></app>");
    let mut toolkit = MemoryToolkit::new();
    let mut registry = StyleRegistry::new();
    let tags = TagTable::with_leaf_tags(&["button"]);
    let root = toolkit.root();

    Materializer::new(&mut toolkit, &mut registry, &tags).materialize(doc.root_element(), &root);

    let top = toolkit.children(MemoryToolkit::ROOT).to_vec();
    assert_eq!(toolkit.widget(top[0]).value.as_deref(), Some("Go"));
    assert!(toolkit.children(top[0]).is_empty());
    // text 不再是叶子标签
    assert_eq!(toolkit.widget(top[1]).value, None);
}
