//! Select view - the searchable combobox controller.
//!
//! Owns a `SelectState` and everything asynchronous around it: source
//! resolution, the delayed close and the debounced resize. Hosts feed it
//! `SelectAction`s and layout measurements and draw the `SelectView` it
//! renders.
//!
//! ## Architecture
//!
//! - State lives behind `Arc<Mutex<_>>`; spawned tasks hold a `Weak`, so a
//!   dropped widget is never kept alive by its own timers
//! - Every transition ends in `sync_effects`, which aligns the timers,
//!   placement and scroll position with the new state
//! - The change callback runs after the lock is released
//!
//! ## Runtime
//!
//! Timers and providers run on the tokio runtime current when the widget is
//! created, or the one passed to `with_runtime`. Without a runtime nothing
//! is delayed, and a provider source settles to no options.

use std::sync::{Arc, Weak};

use combobox_core::{Rect, SelectConfig, SelectOption, Viewport};
use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::actions::SelectAction;
use crate::keymap::Keymap;
use crate::model::{Commit, Direction, PopupPhase, SelectState};
use crate::placement::{compute_placement, Placement};
use crate::source::{resolve, OptionSource};
use crate::theme::Theme;
use crate::timer::{Debouncer, ScheduledTask};
use crate::views::option_list::{OptionList, OptionListEvent, OptionListView, ScrollSync};

/// Called with the committed label on every commit.
pub type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

// =============================================================================
// View Description
// =============================================================================

/// Visual state of the input container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStyle {
    Idle,
    Hovered,
    Focused,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectView {
    /// Text in the input.
    pub text: String,
    pub placeholder: String,
    pub input_style: InputStyle,
    /// Whether the clear button is shown and clickable.
    pub clear_enabled: bool,
    /// Drives the toggle button's chevron.
    pub open: bool,
    /// A provider is still resolving.
    pub loading: bool,
    pub list: OptionListView,
    pub placement: Placement,
    /// Scroll offset of the option rows.
    pub scroll_top: f32,
    /// Minimum input width that fits the widest option label.
    pub content_width: f32,
}

impl SelectView {
    /// Plain-text frame: the input line, with the list below or above it
    /// according to the placement.
    pub fn to_text(&self) -> String {
        let shown = if self.text.is_empty() {
            &self.placeholder
        } else {
            &self.text
        };
        let mut input = format!("[{}]", shown);
        if self.clear_enabled {
            input.push_str(" (x)");
        }
        input.push_str(if self.open { " ^" } else { " v" });
        if self.loading {
            input.push_str(" ...");
        }

        let list = self.list.to_text();
        match (list.is_empty(), self.placement.is_above()) {
            (true, _) => input,
            (false, true) => format!("{}\n{}", list, input),
            (false, false) => format!("{}\n{}", input, list),
        }
    }
}

// =============================================================================
// Shared State
// =============================================================================

struct Inner {
    state: SelectState,
    config: SelectConfig,
    theme: Theme,

    /// Current source and its resolution generation.
    source: Option<OptionSource>,
    generation: u64,
    loading: bool,

    runtime: Option<Handle>,
    close_task: ScheduledTask,
    resize: Debouncer,
    /// Host measurements used for placement.
    input: Option<Rect>,
    viewport: Option<Viewport>,
    scroll: ScrollSync,

    on_change: Option<ChangeCallback>,
    mounted: bool,
}

impl Inner {
    /// Apply one action to the state. Returns the commit, if any.
    fn apply(&mut self, action: SelectAction, weak: &Weak<Mutex<Inner>>) -> Option<Commit> {
        match action {
            SelectAction::CursorUp => self.state.navigate(Direction::Up),
            SelectAction::CursorDown => self.state.navigate(Direction::Down),
            SelectAction::Submit => return self.state.submit(),
            SelectAction::Dismiss => {
                self.state.dismiss();
            }
            SelectAction::Toggle => {
                self.state.toggle();
            }
            SelectAction::Clear => {
                self.state.clear();
            }
            SelectAction::Focus => self.state.focus(),
            SelectAction::Blur => {
                self.state.blur();
            }
            SelectAction::Input(text) => self.state.type_text(text),
            SelectAction::MouseEnter => self.state.mouse_enter(),
            SelectAction::MouseLeave => self.state.mouse_leave(),
            SelectAction::ClickOption(index) => return self.state.click_option(index),
            SelectAction::Resize(viewport) => {
                if self.resize.has_runtime() {
                    let weak = weak.clone();
                    self.resize
                        .trigger(move || Inner::on_resize_settled(&weak, viewport));
                } else {
                    self.apply_viewport(viewport);
                }
            }
        }
        None
    }

    /// Align timers, placement and scroll with the current state.
    fn sync_effects(&mut self, was_visible: bool, weak: &Weak<Mutex<Inner>>) {
        if self.state.is_closing() {
            if !self.close_task.has_runtime() {
                // Nothing to wait on
                self.state.finish_close();
            } else if !self.close_task.is_pending() {
                let weak = weak.clone();
                self.close_task
                    .schedule(self.config.close_delay(), move || {
                        Inner::on_close_elapsed(&weak)
                    });
            }
        } else {
            self.close_task.cancel();
        }

        if self.state.is_open() {
            if !was_visible {
                self.update_placement();
            }
            self.sync_scroll();
        } else {
            self.scroll.reset();
        }
    }

    fn sync_scroll(&mut self) {
        let focused = self.state.focused_index();
        let row_height = self.theme.item_height;
        let viewport_height = self.theme.list_viewport_height();
        let rows = self.state.filtered_len();
        if self.scroll.sync(focused, rows, row_height, viewport_height) {
            tracing::debug!("Scrolled option {:?} into view", focused);
        }
    }

    fn update_placement(&mut self) {
        let (Some(input), Some(viewport)) = (self.input, self.viewport) else {
            return;
        };
        let popup_height = self.theme.popup_height(self.state.filtered_len());
        let placement = compute_placement(input, popup_height, viewport, self.config.popup_gap);
        if placement != self.state.placement() {
            tracing::debug!("Popup placement changed to {:?}", placement);
        }
        self.state.set_placement(placement);
    }

    fn render(&self) -> SelectView {
        let state = &self.state;
        let input_style = if state.is_focused() {
            InputStyle::Focused
        } else if state.is_hovered() {
            InputStyle::Hovered
        } else {
            InputStyle::Idle
        };
        let content_width = self.theme.content_width(
            state
                .resolved_options()
                .unwrap_or_default()
                .iter()
                .map(|o| o.label.as_str()),
        );

        SelectView {
            text: state.query().to_string(),
            placeholder: self.config.placeholder.clone(),
            input_style,
            clear_enabled: state.clear_enabled(),
            open: state.is_open(),
            loading: self.loading,
            list: OptionList::render(
                state.filtered_options(),
                state.is_open(),
                state.focused_index(),
                &self.config.no_results_text,
            ),
            placement: state.placement(),
            scroll_top: self.scroll.scroll_top(),
            content_width,
        }
    }

    // -------------------------------------------------------------------------
    // Task Callbacks
    // -------------------------------------------------------------------------

    fn on_close_elapsed(weak: &Weak<Mutex<Inner>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut inner = inner.lock();
        if inner.state.finish_close() {
            tracing::debug!("Delayed close finished");
            inner.scroll.reset();
        }
    }

    fn on_resize_settled(weak: &Weak<Mutex<Inner>>, viewport: Viewport) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.lock().apply_viewport(viewport);
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.update_placement();
    }

    fn on_source_resolved(weak: &Weak<Mutex<Inner>>, generation: u64, options: Vec<SelectOption>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut inner = inner.lock();
        if inner.generation != generation {
            tracing::debug!("Discarding options from superseded source");
            return;
        }
        inner.loading = false;
        let was_visible = inner.state.is_open();
        inner.state.set_resolved(options);
        inner.sync_effects(was_visible, weak);
    }
}

// =============================================================================
// Select
// =============================================================================

/// Searchable select widget.
pub struct Select {
    inner: Arc<Mutex<Inner>>,
}

impl Select {
    /// Create a select with the given behaviour settings.
    ///
    /// Timers and providers use the tokio runtime current at this point, if
    /// any. See `with_runtime`.
    pub fn new(config: SelectConfig) -> Self {
        let runtime = Handle::try_current().ok();
        let resize = Debouncer::on(config.resize_debounce(), runtime.clone());
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: SelectState::default(),
                config,
                theme: Theme::default(),
                source: None,
                generation: 0,
                loading: false,
                close_task: ScheduledTask::on(runtime.clone()),
                resize,
                runtime,
                input: None,
                viewport: None,
                scroll: ScrollSync::new(),
                on_change: None,
                mounted: true,
            })),
        }
    }

    /// Pre-populate the input text.
    pub fn with_initial_value(self, value: impl Into<String>) -> Self {
        self.inner.lock().state = SelectState::new(Some(value.into()));
        self
    }

    /// Run timers and providers on `runtime`.
    ///
    /// For hosts that drive the widget from their own event loop.
    pub fn with_runtime(self, runtime: Handle) -> Self {
        {
            let mut inner = self.inner.lock();
            let delay = inner.config.resize_debounce();
            inner.close_task = ScheduledTask::on(Some(runtime.clone()));
            inner.resize = Debouncer::on(delay, Some(runtime.clone()));
            inner.runtime = Some(runtime);
        }
        self
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        self.inner.lock().theme = theme;
        self
    }

    /// Register the commit callback.
    pub fn on_change(self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.inner.lock().on_change = Some(Arc::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Set the option source.
    ///
    /// Setting the same source again is a no-op, so a provider runs at most
    /// once per distinct source. Results from a superseded source are
    /// discarded. Without a runtime a provider source settles to no
    /// options.
    pub fn set_source(&self, source: OptionSource) {
        let mut inner = self.inner.lock();
        if !inner.mounted {
            return;
        }
        if inner.source.as_ref().is_some_and(|s| s.same_as(&source)) {
            return;
        }

        inner.generation += 1;
        let generation = inner.generation;
        inner.source = Some(source.clone());
        let weak = Arc::downgrade(&self.inner);

        if let Some(options) = source.immediate() {
            tracing::debug!("Static source with {} options", options.len());
            inner.loading = false;
            let was_visible = inner.state.is_open();
            inner.state.set_resolved(options);
            inner.sync_effects(was_visible, &weak);
            return;
        }

        let Some(runtime) = inner.runtime.clone() else {
            tracing::warn!("No tokio runtime for the option source - continuing with no options");
            inner.loading = false;
            let was_visible = inner.state.is_open();
            inner.state.set_resolved(Vec::new());
            inner.sync_effects(was_visible, &weak);
            return;
        };

        tracing::debug!("Resolving option source (generation {})", generation);
        inner.loading = true;
        let timeout = inner.config.source_timeout();
        drop(inner);

        runtime.spawn(async move {
            let options = resolve(source, timeout).await;
            Inner::on_source_resolved(&weak, generation, options);
        });
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Feed one action to the widget.
    pub fn dispatch(&self, action: SelectAction) {
        let weak = Arc::downgrade(&self.inner);
        let notify = {
            let mut inner = self.inner.lock();
            if !inner.mounted {
                return;
            }
            tracing::debug!("Dispatching {:?}", action);

            let was_visible = inner.state.is_open();
            let commit = inner.apply(action, &weak);
            inner.sync_effects(was_visible, &weak);

            commit.and_then(|commit| {
                tracing::debug!("Committed option {} ({})", commit.index, commit.option.value);
                inner
                    .on_change
                    .clone()
                    .map(|callback| (callback, commit.option.label))
            })
        };

        if let Some((callback, label)) = notify {
            callback(&label);
        }
    }

    /// Dispatch the action bound to `key`. Returns false for unbound keys.
    pub fn handle_key(&self, key: &str, keymap: &Keymap) -> bool {
        match keymap.resolve(key) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Route an event from the rendered option list.
    pub fn handle_list_event(&self, event: OptionListEvent) {
        match event {
            OptionListEvent::Selected { index, .. } => {
                self.dispatch(SelectAction::ClickOption(index))
            }
        }
    }

    /// Report where the input sits and how large the viewport is.
    ///
    /// Placement is recomputed right away if the popup is visible.
    pub fn set_layout(&self, input: Rect, viewport: Viewport) {
        let mut inner = self.inner.lock();
        inner.viewport = Some(viewport);
        inner.input = Some(input);
        if inner.state.is_open() {
            inner.update_placement();
        }
    }

    /// Report where the input sits, keeping the last known viewport.
    pub fn set_input_rect(&self, input: Rect) {
        let mut inner = self.inner.lock();
        inner.input = Some(input);
        if inner.state.is_open() {
            inner.update_placement();
        }
    }

    /// Set the current value by label, without invoking the change callback.
    pub fn set_value(&self, label: Option<&str>) {
        let weak = Arc::downgrade(&self.inner);
        let mut inner = self.inner.lock();
        let was_visible = inner.state.is_open();
        inner.state.set_value(label);
        inner.sync_effects(was_visible, &weak);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Stop all timers and discard any in-flight resolution.
    ///
    /// Further actions are ignored.
    pub fn unmount(&self) {
        let mut inner = self.inner.lock();
        if !inner.mounted {
            return;
        }
        inner.mounted = false;
        inner.generation += 1;
        inner.close_task.cancel();
        inner.resize.cancel();
        tracing::debug!("Select unmounted");
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&self) -> SelectView {
        self.inner.lock().render()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn query(&self) -> String {
        self.inner.lock().state.query().to_string()
    }

    pub fn selected(&self) -> Option<SelectOption> {
        self.inner.lock().state.selected().cloned()
    }

    pub fn phase(&self) -> PopupPhase {
        self.inner.lock().state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().state.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().loading
    }

    pub fn placement(&self) -> Placement {
        self.inner.lock().state.placement()
    }
}

impl Drop for Select {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::MockProvider;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn test_options() -> Vec<SelectOption> {
        ["foo", "bar", "baz", "qux"]
            .into_iter()
            .map(SelectOption::from)
            .collect()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn static_select() -> Select {
        let select = Select::new(SelectConfig::default());
        select.set_source(OptionSource::from(test_options()));
        select
    }

    fn row_labels(view: &SelectView) -> Vec<String> {
        view.list.rows().iter().map(|r| r.label.clone()).collect()
    }

    fn recorder(select: Select) -> (Select, Arc<Mutex<Vec<String>>>) {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let select = select.on_change(move |label| sink.lock().push(label.to_string()));
        (select, changes)
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_closes_after_delay() {
        let (select, changes) = recorder(static_select());

        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::CursorDown);
        select.dispatch(SelectAction::Submit);

        assert_eq!(select.query(), "foo");
        assert_eq!(*changes.lock(), vec!["foo".to_string()]);
        assert!(select.is_open());

        tokio::time::sleep(ms(100)).await;
        assert!(select.is_open());

        tokio::time::sleep(ms(60)).await;
        assert!(!select.is_open());
        assert_eq!(select.selected().map(|o| o.label), Some("foo".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_lands_during_close_delay() {
        let (select, changes) = recorder(static_select());

        select.dispatch(SelectAction::Input("ba".to_string()));
        select.dispatch(SelectAction::Blur);
        assert!(select.is_open());

        // The row the user clicked is still on screen
        tokio::time::sleep(ms(50)).await;
        select.dispatch(SelectAction::ClickOption(1));
        assert_eq!(*changes.lock(), vec!["baz".to_string()]);

        tokio::time::sleep(ms(200)).await;
        assert!(!select.is_open());
        assert_eq!(select.query(), "baz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_row_click_commits() {
        let (select, changes) = recorder(static_select());
        select.dispatch(SelectAction::Input("a".to_string()));

        let view = select.render();
        let event = view.list.click(1).unwrap();
        select.handle_list_event(event);

        assert_eq!(*changes.lock(), vec!["baz".to_string()]);
        assert_eq!(select.query(), "baz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refocus_cancels_pending_close() {
        let select = static_select();
        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::Blur);
        assert!(matches!(select.phase(), PopupPhase::Closing { .. }));

        select.dispatch(SelectAction::Focus);
        tokio::time::sleep(ms(300)).await;
        assert!(matches!(select.phase(), PopupPhase::Open { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_closes_immediately() {
        let select = static_select();
        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::Dismiss);
        assert!(!select.is_open());
        assert_eq!(select.render().list, OptionListView::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_source_populates_once_settled() {
        let select = Select::new(SelectConfig::default());
        let provider = MockProvider::new()
            .with_options(test_options())
            .with_delay(ms(100));
        select.set_source(OptionSource::provider(provider));

        select.dispatch(SelectAction::Focus);
        let view = select.render();
        assert!(view.loading);
        assert!(view.open);
        assert!(view.list.rows().is_empty());

        tokio::time::sleep(ms(150)).await;
        let view = select.render();
        assert!(!view.loading);
        assert_eq!(row_labels(&view), vec!["foo", "bar", "baz", "qux"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_source_resolves_empty() {
        let select = Select::new(SelectConfig::default());
        select.set_source(OptionSource::provider(MockProvider::new().failing()));
        select.dispatch(SelectAction::Focus);

        tokio::time::sleep(ms(10)).await;
        let view = select.render();
        assert!(!view.loading);
        assert_eq!(view.list, OptionListView::NoResults("No results".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_resolved_once_per_reference() {
        let select = Select::new(SelectConfig::default());
        let provider = MockProvider::new().with_options(test_options());
        let calls = provider.calls.clone();
        let source = OptionSource::provider(provider);

        select.set_source(source.clone());
        select.set_source(source.clone());
        tokio::time::sleep(ms(10)).await;
        select.set_source(source);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let other = MockProvider::new().with_options(test_options());
        let other_calls = other.calls.clone();
        select.set_source(OptionSource::provider(other));
        tokio::time::sleep(ms(10)).await;
        assert_eq!(other_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_source_is_discarded() {
        let select = Select::new(SelectConfig::default());
        let slow = MockProvider::new()
            .with_options(vec![SelectOption::from("slow")])
            .with_delay(ms(300));
        let fast = MockProvider::new()
            .with_options(vec![SelectOption::from("fast")])
            .with_delay(ms(10));

        select.set_source(OptionSource::provider(slow));
        select.set_source(OptionSource::provider(fast));
        select.dispatch(SelectAction::Focus);

        tokio::time::sleep(ms(400)).await;
        assert_eq!(row_labels(&select.render()), vec!["fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_value_adopted() {
        let select = Select::new(SelectConfig::default()).with_initial_value("baz");
        select.set_source(OptionSource::from(test_options()));
        assert_eq!(select.selected().map(|o| o.value), Some("baz".to_string()));

        // Reopening highlights the selection among all options
        select.dispatch(SelectAction::Focus);
        let view = select.render();
        assert_eq!(view.list.rows().len(), 4);
        assert_eq!(view.list.focused_row().map(|r| r.index), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflow_places_above() {
        let select = static_select();
        select.set_layout(
            Rect::new(0.0, 500.0, 200.0, 40.0),
            Viewport::new(800.0, 600.0),
        );
        select.dispatch(SelectAction::Focus);

        let placement = select.placement();
        assert!(placement.is_above());
        assert_eq!(placement.top(), None);
        assert_eq!(placement.bottom(), Some(44.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_is_debounced() {
        let select = static_select();
        select.set_layout(
            Rect::new(0.0, 100.0, 200.0, 40.0),
            Viewport::new(800.0, 600.0),
        );
        select.dispatch(SelectAction::Focus);
        assert_eq!(select.placement(), Placement::Below { top: 44.0 });

        // 4 rows: 100 + 44 + 152 > 200
        for _ in 0..5 {
            select.dispatch(SelectAction::Resize(Viewport::new(800.0, 200.0)));
            tokio::time::sleep(ms(50)).await;
        }
        assert_eq!(select.placement(), Placement::Below { top: 44.0 });

        tokio::time::sleep(ms(200)).await;
        assert_eq!(select.placement(), Placement::Above { bottom: 44.0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_focused_row_scrolls_into_view() {
        // Two rows visible
        let theme = Theme {
            list_max_height: 80.0,
            ..Theme::default()
        };
        let select = static_select().with_theme(theme);
        select.dispatch(SelectAction::Focus);
        for _ in 0..4 {
            select.dispatch(SelectAction::CursorDown);
        }

        let view = select.render();
        assert_eq!(view.list.focused_row().map(|r| r.label.as_str()), Some("qux"));
        assert_eq!(view.scroll_top, 4.0 * 36.0 - 72.0);

        // Wrapping back to the top scrolls up
        select.dispatch(SelectAction::CursorDown);
        assert_eq!(select.render().scroll_top, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_key() {
        let select = static_select();
        let keymap = Keymap::with_defaults();

        assert!(select.handle_key("ArrowUp", &keymap));
        let view = select.render();
        assert_eq!(view.list.focused_row().map(|r| r.label.as_str()), Some("qux"));

        assert!(select.handle_key("Enter", &keymap));
        assert_eq!(select.query(), "qux");
        assert!(!select.handle_key("a", &keymap));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_style_and_clear() {
        let select = static_select();
        assert_eq!(select.render().input_style, InputStyle::Idle);

        select.dispatch(SelectAction::MouseEnter);
        assert_eq!(select.render().input_style, InputStyle::Hovered);

        select.dispatch(SelectAction::Input("ba".to_string()));
        let view = select.render();
        assert_eq!(view.input_style, InputStyle::Focused);
        assert!(view.clear_enabled);

        select.dispatch(SelectAction::Clear);
        let view = select.render();
        assert_eq!(view.text, "");
        assert!(!view.clear_enabled);
        assert_eq!(view.list.rows().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_timers_and_resolution() {
        let select = static_select();
        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::Blur);
        select.unmount();

        tokio::time::sleep(ms(300)).await;
        assert!(matches!(select.phase(), PopupPhase::Closing { .. }));

        select.dispatch(SelectAction::Focus);
        assert!(matches!(select.phase(), PopupPhase::Closing { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_value_skips_callback() {
        let (select, changes) = recorder(static_select());
        select.set_value(Some("bar"));
        assert_eq!(select.query(), "bar");
        assert!(changes.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_content_width_fits_widest_label() {
        let select = Select::new(SelectConfig::default());
        select.set_source(OptionSource::from(vec![
            SelectOption::from("a"),
            SelectOption::from("abcdef"),
        ]));
        let theme = Theme::default();
        assert_eq!(
            select.render().content_width,
            6.0 * theme.glyph_width + theme.input_padding_x + theme.indicator_width
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_before_layout_is_kept() {
        let select = static_select();
        select.dispatch(SelectAction::Resize(Viewport::new(800.0, 200.0)));
        tokio::time::sleep(ms(250)).await;

        select.set_input_rect(Rect::new(0.0, 100.0, 200.0, 40.0));
        select.dispatch(SelectAction::Focus);
        assert_eq!(select.placement(), Placement::Above { bottom: 44.0 });
    }

    #[test]
    fn test_without_runtime_closes_immediately() {
        let (select, changes) = recorder(static_select());
        select.set_layout(
            Rect::new(0.0, 100.0, 200.0, 40.0),
            Viewport::new(800.0, 600.0),
        );

        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::CursorDown);
        select.dispatch(SelectAction::Submit);
        assert_eq!(*changes.lock(), vec!["foo".to_string()]);
        assert!(!select.is_open());
        assert_eq!(select.phase(), PopupPhase::Closed);

        // Resizes apply without debouncing
        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::Resize(Viewport::new(800.0, 200.0)));
        assert_eq!(select.placement(), Placement::Above { bottom: 44.0 });
    }

    #[test]
    fn test_without_runtime_provider_settles_empty() {
        let select = Select::new(SelectConfig::default());
        let provider = MockProvider::new().with_options(test_options());
        let calls = provider.calls.clone();
        select.set_source(OptionSource::provider(provider));
        select.dispatch(SelectAction::Focus);

        let view = select.render();
        assert!(!view.loading);
        assert_eq!(view.list, OptionListView::NoResults("No results".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_explicit_runtime_runs_close_timer() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let select = static_select().with_runtime(rt.handle().clone());

        select.dispatch(SelectAction::Focus);
        select.dispatch(SelectAction::Blur);
        assert!(select.is_open());

        rt.block_on(async { tokio::time::sleep(ms(200)).await });
        assert!(!select.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_text() {
        let select = static_select();
        select.dispatch(SelectAction::Input("ba".to_string()));
        select.dispatch(SelectAction::CursorDown);
        insta::assert_snapshot!(select.render().to_text(), @r"
        [ba] (x) ^
        > bar
          baz
        ");
    }
}
