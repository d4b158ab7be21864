//! The panel facade: widgets, diagnostics list, syntax tree, and event delivery.
//!
//! A [`Panel`] owns one container and everything rendered into it, plus the highlight session
//! shared by its elements. The host shows [`Panel::view`], forwards user input with the event
//! methods, and drives deferred work with [`Panel::advance`].

use crate::config::PanelConfig;
use crate::diagnostics::Diagnostic;
use crate::editor::EditorSurface;
use crate::error::NodeError;
use crate::highlight::{HighlightBridge, HighlightKind, HighlightSession, TimerTask};
use crate::settings::{
    InputChanged, MemorySettings, OptionListStyle, SettingOption, SettingsStore, TextInputConfig,
};
use crate::syntax::SyntaxNode;
use crate::timers::TimerQueue;
use crate::tree::{OPEN_CLASS, TreeRenderer};
use crate::view::{NodeId, ViewTree};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Keys the panel distinguishes in [`Panel::key_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Return / Enter.
    Enter,
    /// Any other key.
    Other,
}

struct TextInputBinding {
    storage_key: Option<String>,
    on_changed: Option<InputChanged>,
}

/// An inspector panel bound to one editor.
pub struct Panel<E> {
    editor: E,
    config: PanelConfig,
    view: ViewTree,
    bridge: HighlightBridge,
    session: HighlightSession,
    timers: TimerQueue<TimerTask>,
    renderer: TreeRenderer,
    store: Box<dyn SettingsStore>,
    toggles: HashSet<NodeId>,
    buttons: HashMap<NodeId, Box<dyn FnMut()>>,
    options: HashMap<NodeId, SettingOption>,
    inputs: HashMap<NodeId, TextInputBinding>,
}

fn session_for(config: &PanelConfig) -> HighlightSession {
    HighlightSession::new(
        config.pin_duration(),
        config.pin_release_policy,
        config.pinned_style_class.clone(),
    )
}

impl<E: EditorSurface> Panel<E> {
    /// A panel with the default configuration and in-memory settings.
    pub fn new(editor: E) -> Self {
        Self::with_config(editor, PanelConfig::default(), Box::new(MemorySettings::new()))
    }

    /// A panel with an explicit configuration and settings store.
    pub fn with_config(editor: E, config: PanelConfig, store: Box<dyn SettingsStore>) -> Self {
        let renderer = TreeRenderer::with_excluded_fields(config.extra_excluded_fields.clone());
        Self {
            editor,
            session: session_for(&config),
            config,
            view: ViewTree::new("div"),
            bridge: HighlightBridge::new(),
            timers: TimerQueue::new(),
            renderer,
            store,
            toggles: HashSet::new(),
            buttons: HashMap::new(),
            options: HashMap::new(),
            inputs: HashMap::new(),
        }
    }

    /// The editor.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the editor.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The rendered elements.
    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    /// The panel container.
    pub fn container(&self) -> NodeId {
        self.view.root()
    }

    /// The highlight session (pin state and active overlay handles).
    pub fn session(&self) -> &HighlightSession {
        &self.session
    }

    /// Element/range bindings.
    pub fn bridge(&self) -> &HighlightBridge {
        &self.bridge
    }

    /// The configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The settings store.
    pub fn settings(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    /// Serialize the panel contents as HTML.
    pub fn to_html(&self) -> String {
        self.view.to_html(self.view.root())
    }

    /// Remove everything from the panel.
    ///
    /// Overlays installed by the panel are retired, pending timers dropped, every binding
    /// forgotten, and the highlight session starts over.
    pub fn clear(&mut self) {
        self.session.reset(&mut self.editor, &mut self.timers);
        self.timers.clear();
        self.session = session_for(&self.config);
        self.view.reset();
        self.bridge.clear();
        self.toggles.clear();
        self.buttons.clear();
        self.options.clear();
        self.inputs.clear();
        tracing::debug!("cleared panel");
    }

    fn append_text_element(&mut self, tag: &str, text: &str) -> NodeId {
        let container = self.container();
        let element = self.view.append_element(container, tag);
        self.view.append_text(element, text);
        element
    }

    /// Append a `h3` title.
    pub fn title(&mut self, text: &str) -> NodeId {
        self.append_text_element("h3", text)
    }

    /// Append a `h4` subtitle.
    pub fn subtitle(&mut self, text: &str) -> NodeId {
        self.append_text_element("h4", text)
    }

    /// Append a paragraph.
    pub fn p(&mut self, text: &str) -> NodeId {
        self.append_text_element("p", text)
    }

    /// Append a `pre > code` block and return the `code` element.
    pub fn code(&mut self, text: &str) -> NodeId {
        let container = self.container();
        let pre = self.view.append_element(container, "pre");
        let code = self.view.append_element(pre, "code");
        self.view.append_text(code, text);
        code
    }

    /// Clear the panel and show a centered message.
    pub fn show_empty_screen(&mut self, message: &str) -> NodeId {
        self.clear();
        let container = self.container();
        let wrapper = self.view.append_element(container, "div");
        self.view.set_attribute(wrapper, "id", "empty-message-container");
        let message_div = self.view.append_element(wrapper, "div");
        self.view.add_class(message_div, "empty-plugin-message");
        self.view.append_text(message_div, message);
        wrapper
    }

    /// Append an `input[type=button]` that runs `on_click` when clicked.
    pub fn button(&mut self, label: &str, on_click: impl FnMut() + 'static) -> NodeId {
        let container = self.container();
        let input = self.view.append_element(container, "input");
        self.view.set_attribute(input, "type", "button");
        self.view.set_attribute(input, "value", label);
        self.buttons.insert(input, Box::new(on_click));
        input
    }

    /// Append a list of diagnostics.
    ///
    /// Each item is styled by category. Items with a location highlight it on hover and, on
    /// click, reveal it and pin a whole-line overlay.
    pub fn list_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> NodeId {
        let container = self.container();
        let list = self.view.append_element(container, "ul");
        self.view.add_class(list, "compiler-diagnostics");

        for diagnostic in diagnostics {
            let item = self.view.append_element(list, "li");
            self.view.add_class(item, "diagnostic");
            self.view.add_class(item, diagnostic.category.style_class());
            self.view.append_text(item, diagnostic.message_text());

            let range = diagnostic.range();
            self.bridge.attach(item, range, HighlightKind::Error);
            self.bridge.attach_clickable(item, range);
        }
        list
    }

    fn render_setting_option(&mut self, parent: NodeId, option: SettingOption) -> NodeId {
        let item = self.view.append_element(parent, "li");

        let input = self.view.append_element(item, "input");
        self.view.set_attribute(input, "type", "checkbox");
        self.view.set_attribute(input, "id", option.flag.as_str());
        if option.is_checked(self.store.as_ref()) {
            self.view.set_attribute(input, "checked", "");
        }

        let label = self.view.append_element(item, "label");
        self.view.set_attribute(label, "for", option.flag.as_str());
        let name = self.view.append_element(label, "span");
        self.view.append_text(name, option.display.as_str());
        if !option.one_line {
            self.view.append_element(label, "br");
        }
        self.view.append_text(label, option.blurb.as_str());

        self.options.insert(input, option);
        item
    }

    /// Append a checkbox bound to a settings flag. Returns the `li`.
    pub fn setting_option(&mut self, option: SettingOption) -> NodeId {
        let container = self.container();
        self.render_setting_option(container, option)
    }

    /// Append an ordered list of settings checkboxes. Returns the `ol`.
    pub fn show_option_list(&mut self, options: Vec<SettingOption>, style: OptionListStyle) -> NodeId {
        let container = self.container();
        let list = self.view.append_element(container, "ol");
        self.view.add_class(list, "playground-options");
        if style != OptionListStyle::Separated {
            self.view.add_class(list, "tight");
        }
        for mut option in options {
            if style == OptionListStyle::Rows {
                option.one_line = true;
            }
            self.render_setting_option(list, option);
        }
        list
    }

    /// Append a full-width text input. Returns the `form`; the `input` is its only child.
    pub fn create_text_input(&mut self, config: TextInputConfig) -> NodeId {
        let container = self.container();
        let form = self.view.append_element(container, "form");
        let input = self.view.append_element(form, "input");
        self.view.set_attribute(input, "id", config.id.as_str());
        self.view.set_attribute(input, "placeholder", config.placeholder.as_str());
        self.view.set_attribute(input, "autocomplete", "off");
        self.view.set_attribute(input, "autocapitalize", "off");
        self.view.set_attribute(input, "spellcheck", "false");
        self.view.set_attribute(input, "autocorrect", "off");
        self.view.set_attribute(input, "style", "width: 90%; height: 2rem");

        let storage_key = config
            .keep_value_across_reloads
            .then(|| format!("{}{}", self.config.input_storage_prefix, config.id));

        let initial = match (&config.value, &storage_key) {
            (Some(value), _) => Some(value.clone()),
            (None, Some(key)) => self.store.get(key),
            (None, None) => None,
        };
        if let Some(value) = &initial {
            self.view.set_attribute(input, "value", value.as_str());
        }

        let enabled = match &config.is_enabled {
            Some(validator) => validator(initial.as_deref().unwrap_or("")),
            None => true,
        };
        self.view.add_class(input, if enabled { "good" } else { "bad" });

        self.inputs.insert(
            input,
            TextInputBinding {
                storage_key,
                on_changed: config.on_changed,
            },
        );
        form
    }

    /// Append the collapsible tree of `node`. Returns the `div.ast` wrapper.
    pub fn create_ast_tree(&mut self, node: &SyntaxNode) -> NodeId {
        let container = self.container();
        let rendered = self
            .renderer
            .render(&mut self.view, &mut self.bridge, container, node);
        self.toggles.extend(rendered.headings);
        rendered.container
    }

    /// Convert an engine payload and append its tree.
    pub fn create_ast_tree_from_json(&mut self, value: &Value) -> Result<NodeId, NodeError> {
        let node = SyntaxNode::from_json(value)?;
        Ok(self.create_ast_tree(&node))
    }

    /// Pointer entered `target`. Returns whether the editor overlays changed.
    pub fn pointer_enter(&mut self, target: NodeId) -> bool {
        let Some(request) = self.bridge.hover_request(target).copied() else {
            return false;
        };
        self.session
            .hover_enter(&mut self.editor, request.range, request.kind)
    }

    /// Pointer left `target`. Returns whether the editor overlays changed.
    pub fn pointer_leave(&mut self, target: NodeId) -> bool {
        if self.bridge.hover_request(target).is_none() {
            return false;
        }
        self.session.hover_leave(&mut self.editor)
    }

    /// `target` was clicked.
    pub fn click(&mut self, target: NodeId) {
        if self.toggles.contains(&target)
            && let Some(container) = self.view.parent(target)
        {
            let open = self.view.toggle_class(container, OPEN_CLASS);
            tracing::trace!(open, "toggled tree node");
        }

        if let Some(range) = self.bridge.click_range(target) {
            self.session.pin(&mut self.editor, &mut self.timers, range);
        }

        if let Some(on_click) = self.buttons.get_mut(&target) {
            on_click();
        }
    }

    /// A checkbox changed state.
    pub fn set_checked(&mut self, target: NodeId, checked: bool) {
        let Some(option) = self.options.get_mut(&target) else {
            return;
        };
        if checked {
            self.view.set_attribute(target, "checked", "");
        } else {
            self.view.remove_attribute(target, "checked");
        }
        let stored = option.apply(self.store.as_mut(), checked);
        if let Some(on_change) = option.on_change.as_mut() {
            on_change(stored);
        }
    }

    /// The text of an input changed.
    pub fn input_text(&mut self, target: NodeId, value: &str) {
        let Some(binding) = self.inputs.get_mut(&target) else {
            return;
        };
        self.view.set_attribute(target, "value", value);
        if let Some(key) = &binding.storage_key {
            self.store.set(key, value.trim());
        }
        if let Some(on_changed) = binding.on_changed.as_mut() {
            on_changed(value);
        }
    }

    /// A key was pressed in `target`. Returns `false` when the default action is suppressed
    /// (Enter in a text input, which would submit its form).
    pub fn key_down(&mut self, target: NodeId, key: Key) -> bool {
        !(key == Key::Enter && self.inputs.contains_key(&target))
    }

    /// Advance the panel's clock by `elapsed` and run whatever became due.
    pub fn advance(&mut self, elapsed: Duration) {
        for (timer, task) in self.timers.advance(elapsed) {
            match task {
                TimerTask::ReleasePin => {
                    self.session.release(&mut self.editor, timer);
                }
            }
        }
    }

    /// Time until the next deferred callback, if one is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
