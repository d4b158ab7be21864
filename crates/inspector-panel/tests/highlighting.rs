mod common;

use common::FakeEditor;
use inspector_panel::{
    Diagnostic, DiagnosticCategory, Field, FieldValue, Literal, MemorySettings, Panel,
    PanelConfig, SyntaxKind, SyntaxNode, TextRange,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn test_diagnostic_items_are_styled_by_category() {
    let mut panel = Panel::new(FakeEditor::default());
    let list = panel.list_diagnostics(&[
        Diagnostic::new(DiagnosticCategory::Error, "bad").at(0, 2),
        Diagnostic::new(DiagnosticCategory::Suggestion, "maybe"),
    ]);
    let view = panel.view();
    assert!(view.has_class(list, "compiler-diagnostics"));
    let items = view.children(list);
    assert!(view.has_class(items[0], "error"));
    assert!(view.has_class(items[1], "suggestion"));
    assert_eq!(panel.bridge().hover_count(), 1);
}

#[test]
fn test_custom_pin_duration_and_style() {
    let config = PanelConfig::from_json_str(
        r#"{"pinDurationMs": 50, "pinnedStyleClass": "flash"}"#,
    )
    .unwrap();
    let mut panel =
        Panel::with_config(FakeEditor::default(), config, Box::new(MemorySettings::new()));
    let list = panel.list_diagnostics(&[Diagnostic::new(DiagnosticCategory::Error, "e").at(3, 2)]);
    let item = panel.view().children(list)[0];

    panel.click(item);
    assert_eq!(panel.editor().revealed, vec![1]);
    assert_eq!(panel.editor().installed[0].1.style_class, "flash");
    assert_eq!(panel.next_deadline(), Some(Duration::from_millis(50)));

    panel.advance(Duration::from_millis(50));
    assert!(panel.editor().installed.is_empty());
}

#[test]
fn test_excluded_fields_are_not_rendered() {
    let config = PanelConfig {
        extra_excluded_fields: vec!["symbol".to_string()],
        ..PanelConfig::default()
    };
    let mut panel =
        Panel::with_config(FakeEditor::default(), config, Box::new(MemorySettings::new()));
    let node = SyntaxNode::new(SyntaxKind::SourceFile, TextRange::new(0, 4))
        .with_literal("symbol", Literal::Str("hidden".into()))
        .with_literal("text", Literal::Str("shown".into()))
        .with_field("parent", FieldValue::BackReference);
    let tree = panel.create_ast_tree(&node);

    let text = panel.view().text_content(tree);
    assert!(text.starts_with("SourceFile"));
    assert!(text.contains("text: shown"));
    assert!(!text.contains("hidden"));
    assert!(!text.contains("parent"));
}

#[test]
fn test_nested_children_hover_their_own_ranges() {
    let mut panel = Panel::new(FakeEditor::default());
    let node = SyntaxNode::new(SyntaxKind::SourceFile, TextRange::new(0, 10)).with_children(
        "statements",
        vec![
            SyntaxNode::new(SyntaxKind::VariableStatement, TextRange::new(0, 4)),
            SyntaxNode::new(SyntaxKind::ExpressionStatement, TextRange::new(5, 10)),
        ],
    );
    assert!(matches!(
        node.fields().last(),
        Some(Field { value: FieldValue::Children(children), .. }) if children.len() == 2
    ));
    let tree = panel.create_ast_tree(&node);
    let headings = panel.view().find_by_class(tree, "node-name");
    assert_eq!(headings.len(), 3);

    assert!(panel.pointer_enter(headings[2]));
    let spec = &panel.editor().installed[0].1;
    assert_eq!(spec.range.start_column, 6);
    assert_eq!(spec.range.end_column, 11);
    assert_eq!(spec.style_class, "highlight-info");
}
