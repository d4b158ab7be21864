//! Hover/click synchronization between panel elements and editor ranges.
//!
//! [`HighlightBridge`] records which element maps to which document range.
//! [`HighlightSession`] owns the state shared by every handler of one panel: the handles of the
//! overlay set currently installed in the editor, and the pin that freezes hover updates while a
//! click-triggered highlight is showing.
//!
//! The session is the only owner of the active handle list. Every overlay change goes through
//! [`EditorSurface::apply_decorations`] with the previous handles, so at most one overlay set
//! installed by a panel is ever visible.

use crate::editor::{DecorationHandle, DecorationSpec, EditorSurface};
use crate::range::{LineColumnRange, TextRange};
use crate::timers::{TimerId, TimerQueue};
use crate::view::NodeId;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Delay before a click-triggered highlight is released.
pub const DEFAULT_PIN_DURATION: Duration = Duration::from_millis(300);

/// Style class of the whole-line overlay painted on click.
pub const DEFAULT_PINNED_STYLE_CLASS: &str = "error-highlight";

/// Kind of hover highlight; selects the overlay style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// Diagnostic ranges.
    Error,
    /// Informational ranges (syntax tree nodes).
    Info,
}

impl HighlightKind {
    /// Style class of the overlay painted for this kind.
    pub fn style_class(self) -> &'static str {
        match self {
            HighlightKind::Error => "highlight-error",
            HighlightKind::Info => "highlight-info",
        }
    }
}

/// A request for hover highlighting of `range` while the pointer is over `element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRequest {
    /// The element that reacts to pointer enter/leave.
    pub element: NodeId,
    /// Document range to highlight.
    pub range: TextRange,
    /// Highlight kind.
    pub kind: HighlightKind,
}

/// Registry of elements bound to document ranges.
#[derive(Debug, Default)]
pub struct HighlightBridge {
    hover: HashMap<NodeId, HighlightRequest>,
    clickable: HashMap<NodeId, TextRange>,
}

impl HighlightBridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind hover highlighting of `range` to `element`.
    ///
    /// A missing range leaves the element inert. Returns whether a binding was made.
    pub fn attach(
        &mut self,
        element: NodeId,
        range: Option<TextRange>,
        kind: HighlightKind,
    ) -> bool {
        let Some(range) = range else {
            return false;
        };
        self.hover.insert(
            element,
            HighlightRequest {
                element,
                range,
                kind,
            },
        );
        true
    }

    /// Bind click-to-reveal (with a pinned whole-line overlay) of `range` to `element`.
    ///
    /// A missing range leaves the element inert. Returns whether a binding was made.
    pub fn attach_clickable(&mut self, element: NodeId, range: Option<TextRange>) -> bool {
        let Some(range) = range else {
            return false;
        };
        self.clickable.insert(element, range);
        true
    }

    /// The hover request bound to `element`.
    pub fn hover_request(&self, element: NodeId) -> Option<&HighlightRequest> {
        self.hover.get(&element)
    }

    /// The click range bound to `element`.
    pub fn click_range(&self, element: NodeId) -> Option<TextRange> {
        self.clickable.get(&element).copied()
    }

    /// Number of hover bindings.
    pub fn hover_count(&self) -> usize {
        self.hover.len()
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.hover.clear();
        self.clickable.clear();
    }
}

/// What happens to a pending pin release when the user clicks again before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinReleasePolicy {
    /// Cancel the pending release and schedule a fresh one. The most recent click always owns
    /// the release.
    #[default]
    CancelAndReschedule,
    /// Keep every scheduled release. The earliest one to fire unpins and clears, even when a
    /// later click is still expected to be showing.
    FirstTimerWins,
}

/// Deferred work scheduled by a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Release the pin and clear the click-triggered overlay.
    ReleasePin,
}

/// Per-panel highlight state: active overlay handles and the pin.
#[derive(Debug)]
pub struct HighlightSession {
    active: Vec<DecorationHandle>,
    pinned: bool,
    pending_release: Option<TimerId>,
    pin_duration: Duration,
    policy: PinReleasePolicy,
    pinned_style_class: String,
}

impl HighlightSession {
    /// Create a session with the given pin behaviour.
    pub fn new(
        pin_duration: Duration,
        policy: PinReleasePolicy,
        pinned_style_class: impl Into<String>,
    ) -> Self {
        Self {
            active: Vec::new(),
            pinned: false,
            pending_release: None,
            pin_duration,
            policy,
            pinned_style_class: pinned_style_class.into(),
        }
    }

    /// Whether hover updates are currently suppressed.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Handles of the overlay set this session last installed.
    pub fn active_decorations(&self) -> &[DecorationHandle] {
        &self.active
    }

    /// The release timer the session is waiting for.
    pub fn pending_release(&self) -> Option<TimerId> {
        self.pending_release
    }

    fn replace<E: EditorSurface + ?Sized>(&mut self, editor: &mut E, specs: Vec<DecorationSpec>) {
        tracing::trace!(
            retired = self.active.len(),
            installed = specs.len(),
            "replacing decoration set"
        );
        self.active = editor.apply_decorations(&self.active, specs);
    }

    fn line_columns<E: EditorSurface + ?Sized>(editor: &E, range: TextRange) -> LineColumnRange {
        let model = editor.model();
        LineColumnRange::from_positions(model.position_at(range.start), model.position_at(range.end))
    }

    /// Pointer entered an element bound to `range`.
    ///
    /// Returns `false` (and leaves the editor untouched) while pinned.
    pub fn hover_enter<E: EditorSurface + ?Sized>(
        &mut self,
        editor: &mut E,
        range: TextRange,
        kind: HighlightKind,
    ) -> bool {
        if self.pinned {
            return false;
        }
        let span = Self::line_columns(editor, range);
        self.replace(editor, vec![DecorationSpec::inline(span, kind.style_class())]);
        true
    }

    /// Pointer left a bound element.
    ///
    /// Returns `false` (and leaves the editor untouched) while pinned.
    pub fn hover_leave<E: EditorSurface + ?Sized>(&mut self, editor: &mut E) -> bool {
        if self.pinned {
            return false;
        }
        self.replace(editor, Vec::new());
        true
    }

    /// Reveal `range`, paint a whole-line overlay over it and pin it until the release timer
    /// fires.
    pub fn pin<E: EditorSurface + ?Sized>(
        &mut self,
        editor: &mut E,
        timers: &mut TimerQueue<TimerTask>,
        range: TextRange,
    ) -> TimerId {
        let span = Self::line_columns(editor, range);
        editor.reveal_line(span.start_line);
        let style = self.pinned_style_class.clone();
        self.replace(editor, vec![DecorationSpec::whole_line(span, style)]);

        if self.policy == PinReleasePolicy::CancelAndReschedule
            && let Some(previous) = self.pending_release.take()
        {
            timers.cancel(previous);
            tracing::debug!(?previous, "cancelled pending pin release");
        }

        self.pinned = true;
        let timer = timers.schedule(self.pin_duration, TimerTask::ReleasePin);
        self.pending_release = Some(timer);
        tracing::debug!(
            ?timer,
            line = span.start_line,
            delay_ms = self.pin_duration.as_millis() as u64,
            "pinned highlight"
        );
        timer
    }

    /// A release timer fired. Returns whether the overlay was cleared.
    pub fn release<E: EditorSurface + ?Sized>(&mut self, editor: &mut E, timer: TimerId) -> bool {
        match self.policy {
            PinReleasePolicy::CancelAndReschedule => {
                if self.pending_release != Some(timer) {
                    tracing::trace!(?timer, "ignoring stale pin release");
                    return false;
                }
                self.pending_release = None;
            }
            PinReleasePolicy::FirstTimerWins => {
                if self.pending_release == Some(timer) {
                    self.pending_release = None;
                }
            }
        }
        self.pinned = false;
        self.replace(editor, Vec::new());
        tracing::debug!(?timer, "released pinned highlight");
        true
    }

    /// Retire every overlay, cancel the pending release and unpin.
    pub fn reset<E: EditorSurface + ?Sized>(
        &mut self,
        editor: &mut E,
        timers: &mut TimerQueue<TimerTask>,
    ) {
        if let Some(timer) = self.pending_release.take() {
            timers.cancel(timer);
        }
        if !self.active.is_empty() {
            self.replace(editor, Vec::new());
        }
        self.pinned = false;
    }
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new(
            DEFAULT_PIN_DURATION,
            PinReleasePolicy::default(),
            DEFAULT_PINNED_STYLE_CLASS,
        )
    }
}
