use inspector_panel::{
    Diagnostic, DiagnosticCategory, Panel, PanelConfig, PinReleasePolicy, Position, TextRange,
    MemorySettings, SyntaxNode,
};
use inspector_panel_editor::HeadlessEditor;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::time::Duration;

const SOURCE: &str = "const a = 1;\nconst b: string = 2;\nconsole.log(a, b);\n";

fn panel() -> Panel<HeadlessEditor> {
    Panel::new(HeadlessEditor::new(SOURCE))
}

fn panel_with_policy(policy: PinReleasePolicy) -> Panel<HeadlessEditor> {
    let config = PanelConfig {
        pin_release_policy: policy,
        ..PanelConfig::default()
    };
    Panel::with_config(
        HeadlessEditor::new(SOURCE),
        config,
        Box::new(MemorySettings::new()),
    )
}

fn diagnostic_item(panel: &mut Panel<HeadlessEditor>, start: usize, length: usize) -> inspector_panel::NodeId {
    let list = panel.list_diagnostics(&[Diagnostic::new(
        DiagnosticCategory::Error,
        "Type 'number' is not assignable to type 'string'.",
    )
    .at(start, length)]);
    panel.view().children(list)[0]
}

#[test]
fn test_hover_installs_one_inline_overlay_and_leave_clears_it() {
    let mut panel = panel();
    let item = diagnostic_item(&mut panel, 19, 6);

    assert!(panel.pointer_enter(item));
    let specs = panel.editor().active_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].style_class, "highlight-error");
    assert!(!specs[0].whole_line);
    assert_eq!(specs[0].range.start(), Position::new(2, 7));
    assert_eq!(specs[0].range.end(), Position::new(2, 13));

    assert!(panel.pointer_leave(item));
    assert!(panel.editor().decorations().is_empty());
}

#[test]
fn test_click_reveals_line_and_pins_whole_line_overlay() {
    let mut panel = panel();
    let item = diagnostic_item(&mut panel, 10, 5);

    panel.click(item);
    assert_eq!(panel.editor().revealed_lines(), &[1]);
    let specs = panel.editor().active_specs();
    assert_eq!(specs.len(), 1);
    assert!(specs[0].whole_line);
    assert_eq!(specs[0].style_class, "error-highlight");
    assert_eq!(specs[0].range.start(), Position::new(1, 11));
    assert_eq!(specs[0].range.end(), Position::new(2, 3));
    assert!(panel.session().is_pinned());
}

#[test]
fn test_pinned_hover_is_inert_and_clears_once_after_duration() {
    let mut panel = panel();
    let item = diagnostic_item(&mut panel, 10, 5);
    panel.click(item);
    let pinned = panel.session().active_decorations().to_vec();

    assert!(!panel.pointer_enter(item));
    assert!(!panel.pointer_leave(item));
    assert_eq!(panel.session().active_decorations(), pinned.as_slice());
    assert_eq!(panel.next_deadline(), Some(Duration::from_millis(300)));

    panel.advance(Duration::from_millis(299));
    assert_eq!(panel.editor().decorations().len(), 1);

    panel.advance(Duration::from_millis(1));
    assert!(panel.editor().decorations().is_empty());
    assert!(!panel.session().is_pinned());
    assert_eq!(panel.next_deadline(), None);

    assert!(panel.pointer_enter(item));
    assert_eq!(panel.editor().decorations().len(), 1);
}

#[test]
fn test_diagnostic_without_range_is_inert() {
    let mut panel = panel();
    let list = panel.list_diagnostics(&[
        Diagnostic::new(DiagnosticCategory::Warning, "no location"),
        Diagnostic::new(DiagnosticCategory::Error, "empty").at(4, 0),
    ]);
    for item in panel.view().children(list).to_vec() {
        assert!(!panel.pointer_enter(item));
        panel.click(item);
    }
    assert!(panel.editor().decorations().is_empty());
    assert!(panel.editor().revealed_lines().is_empty());
}

#[test]
fn test_double_click_reschedules_release() {
    let mut panel = panel_with_policy(PinReleasePolicy::CancelAndReschedule);
    let item = diagnostic_item(&mut panel, 10, 5);

    panel.click(item);
    panel.advance(Duration::from_millis(200));
    panel.click(item);

    panel.advance(Duration::from_millis(100));
    assert!(panel.session().is_pinned());
    assert_eq!(panel.editor().decorations().len(), 1);

    panel.advance(Duration::from_millis(200));
    assert!(!panel.session().is_pinned());
    assert!(panel.editor().decorations().is_empty());
}

#[test]
fn test_double_click_first_timer_wins() {
    let mut panel = panel_with_policy(PinReleasePolicy::FirstTimerWins);
    let item = diagnostic_item(&mut panel, 10, 5);

    panel.click(item);
    panel.advance(Duration::from_millis(200));
    panel.click(item);

    panel.advance(Duration::from_millis(100));
    assert!(!panel.session().is_pinned());
    assert!(panel.editor().decorations().is_empty());

    // The later timer still fires; it finds nothing to clear.
    panel.advance(Duration::from_millis(200));
    assert!(panel.editor().decorations().is_empty());
    assert_eq!(panel.next_deadline(), None);
}

#[test]
fn test_clear_retires_overlays_and_pending_release() {
    let mut panel = panel();
    let item = diagnostic_item(&mut panel, 10, 5);
    panel.click(item);

    panel.clear();
    assert!(panel.editor().decorations().is_empty());
    assert!(!panel.session().is_pinned());
    assert_eq!(panel.next_deadline(), None);
    assert!(panel.view().children(panel.container()).is_empty());

    // Stale element ids no longer react.
    assert!(!panel.pointer_enter(item));
}

#[test]
fn test_tree_headings_toggle_and_highlight() {
    let mut panel = panel();
    let payload = json!({
        "kind": "K",
        "pos": 0,
        "end": 10,
        "children": [
            {"kind": "K2", "pos": 0, "end": 4},
            {"kind": "K3", "pos": 5, "end": 10}
        ]
    });
    let tree = panel.create_ast_tree_from_json(&payload).unwrap();

    let view = panel.view();
    let headings = view.find_by_class(tree, "node-name");
    let names: Vec<_> = headings.iter().map(|h| view.text_content(*h)).collect();
    assert_eq!(names, vec!["K", "K2", "K3"]);

    let nodes = view.find_by_class(tree, "ast-tree-start");
    assert!(view.has_class(nodes[0], "open"));
    assert!(!view.has_class(nodes[1], "open"));
    assert_eq!(view.attribute(nodes[2], "data-pos"), Some("5"));
    assert_eq!(view.attribute(nodes[2], "data-depth"), Some("1"));
    assert!(view.text_content(tree).contains("children: ["));

    let (root_heading, k2_heading) = (headings[0], headings[1]);
    panel.click(k2_heading);
    assert!(panel.view().has_class(nodes[1], "open"));
    panel.click(root_heading);
    assert!(!panel.view().has_class(nodes[0], "open"));
    // Headings never pin.
    assert!(panel.editor().decorations().is_empty());

    assert!(panel.pointer_enter(k2_heading));
    let specs = panel.editor().active_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].style_class, "highlight-info");
    assert_eq!(specs[0].range.start(), Position::new(1, 1));
    assert_eq!(specs[0].range.end(), Position::new(1, 5));
}

#[test]
fn test_tree_skips_back_references_and_renders_plain_lists() {
    let mut panel = panel();
    let payload = json!({
        "kind": 80,
        "pos": 0,
        "end": 5,
        "parent": {"kind": 1, "pos": 0, "end": 50},
        "flags": 0,
        "modifiers": [1, 2],
        "name": {"kind": 80, "pos": 0, "end": 1, "escapedText": "a"}
    });
    let tree = panel.create_ast_tree_from_json(&payload).unwrap();
    let view = panel.view();

    assert_eq!(view.find_by_class(tree, "node-name").len(), 2);
    let text = view.text_content(tree);
    assert!(!text.contains("parent"));
    assert!(text.contains("modifiers: 1,2"));
    assert!(text.contains("kind: 80 (SyntaxKind.Identifier)"));
    assert!(text.contains("escapedText: a"));
    assert_eq!(view.find_by_class(tree, "ast-node-object").len(), 1);
    assert_eq!(view.find_by_class(tree, "ast-node-string").len(), 1);
}

#[test]
fn test_synthesized_node_heading_is_inert() {
    let mut panel = panel();
    let node = SyntaxNode::from_json(&json!({"kind": "Synthetic", "pos": -1, "end": -1})).unwrap();
    assert_eq!(node.range(), None);

    let tree = panel.create_ast_tree(&node);
    let heading = panel.view().find_by_class(tree, "node-name")[0];
    assert!(!panel.pointer_enter(heading));
    assert!(panel.editor().decorations().is_empty());
}

#[test]
fn test_malformed_node_is_rejected() {
    let mut panel = panel();
    let err = panel
        .create_ast_tree_from_json(&json!({"kind": "K", "pos": 0, "end": 3, "children": [{"pos": 0, "end": 1}]}))
        .unwrap_err();
    assert_eq!(err.to_string(), "node at root.children[0] has no kind tag");
    assert!(panel.view().children(panel.container()).is_empty());
}

proptest! {
    #[test]
    fn prop_hover_then_leave_leaves_no_overlay(
        ranges in prop::collection::vec((0usize..60, 1usize..20), 1..8),
    ) {
        let mut panel = panel();
        let diagnostics: Vec<_> = ranges
            .iter()
            .map(|(start, length)| Diagnostic::new(DiagnosticCategory::Error, "e").at(*start, *length))
            .collect();
        let list = panel.list_diagnostics(&diagnostics);
        let items = panel.view().children(list).to_vec();

        for item in &items {
            prop_assert!(panel.pointer_enter(*item));
            prop_assert_eq!(panel.editor().decorations().len(), 1);
        }
        for item in &items {
            prop_assert!(panel.pointer_leave(*item));
            prop_assert!(panel.editor().decorations().is_empty());
        }
    }

    #[test]
    fn prop_overlay_positions_track_offsets(start in 0usize..SOURCE.len(), length in 1usize..10) {
        let mut panel = panel();
        let item = diagnostic_item(&mut panel, start, length);
        panel.pointer_enter(item);

        let model = panel.editor().text_model();
        let range = TextRange::from_start_length(start, length);
        let spec = panel.editor().active_specs()[0].clone();
        prop_assert_eq!(spec.range.start(), model.position_at(range.start));
        prop_assert_eq!(spec.range.end(), model.position_at(range.end));
    }
}
