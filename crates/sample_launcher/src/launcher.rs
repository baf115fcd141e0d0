//! Launcher controller
//!
//! Ties the sample index, the filter dialog, the permission chain and the
//! native bridge together behind the callbacks a host UI invokes from its
//! lifecycle hooks. Everything the UI must react to is published on the
//! UI event bus.

use std::path::Path;

use thiserror::Error;

use crate::core::config::LauncherConfig;
use crate::events::{UiEvent, UiEventArg, UiEventSystem, UiEventType};
use crate::launch::{BridgeError, LaunchFlags, LaunchRequest, NativeBridge};
use crate::platform::{Permission, PermissionFlow, PermissionStatus, PermissionStep};
use crate::samples::{FilterDialog, Sample, SampleIndex, ALL_CATEGORIES};

/// Transient message shown when the native library cannot be loaded
pub const NATIVE_LOAD_FAILED: &str = "Native code library failed to load.";

/// Which top-level view the host should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherView {
    /// Tabs and sample rows
    Samples,
    /// Permission explanation and retry button
    PermissionMessage,
}

/// Launcher-level errors
#[derive(Error, Debug)]
pub enum LauncherError {
    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Native bridge failure
    #[error("Native bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Launch requested for an id the index does not know
    #[error("Unknown sample: {0}")]
    UnknownSample(String),

    /// Tab position out of range
    #[error("No tab at position {0}")]
    NoSuchTab(usize),

    /// A batch run that would select no sample
    #[error("Couldn't find any samples by the given batch mode category and tags")]
    EmptyBatch,
}

/// Launch parameters passed to the launcher on startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentExtras {
    /// Sample to launch immediately
    pub sample: Option<String>,
    /// Test to launch immediately
    pub test: Option<String>,
}

/// Launcher state and actions
pub struct Launcher<B> {
    bridge: B,
    native_loaded: bool,
    index: SampleIndex,
    dialog: FilterDialog,
    permissions: PermissionFlow,
    flags: LaunchFlags,
    current_tab: usize,
    view: LauncherView,
    events: UiEventSystem,
}

impl<B: NativeBridge> Launcher<B> {
    /// Create the launcher, loading samples from the native bridge
    ///
    /// A bridge that fails to load degrades to an empty sample list and a
    /// transient message; it is not an error.
    pub fn new(config: &LauncherConfig, mut bridge: B) -> Result<Self, LauncherError> {
        config.validate().map_err(LauncherError::Config)?;
        log::info!("Initializing launcher for {}", config.native.library_name);

        let mut events = UiEventSystem::new();
        let (native_loaded, samples) = match bridge.load() {
            Ok(()) => (true, bridge.samples()),
            Err(e) => {
                log::warn!("{e}");
                events.send(toast_event(NATIVE_LOAD_FAILED));
                (false, Vec::new())
            }
        };

        let mut index = SampleIndex::build(
            samples,
            &config.ordering.category_order(),
            &config.ordering.tag_order(),
        );
        // The UI seeds the filter with every tag
        index.apply_filter(index.all_tags_filter());
        let dialog = FilterDialog::for_index(&index);

        let mut flags = LaunchFlags::empty();
        flags.set(LaunchFlags::BENCHMARK, config.native.benchmark);
        flags.set(LaunchFlags::HEADLESS, config.native.headless);

        log::info!(
            "Launcher ready with {} samples in {} tabs",
            index.len(),
            index.categories().len()
        );

        Ok(Self {
            bridge,
            native_loaded,
            index,
            dialog,
            permissions: PermissionFlow::new(),
            flags,
            current_tab: 0,
            view: LauncherView::Samples,
            events,
        })
    }

    /// One-shot native filesystem setup; skipped when the library did not load
    pub fn init_file_path(&mut self, external_dir: &Path, temp_dir: &Path) -> Result<(), LauncherError> {
        if self.native_loaded {
            self.bridge.init_file_path(external_dir, temp_dir)?;
        }
        Ok(())
    }

    /// Whether the native library loaded
    pub fn is_native_loaded(&self) -> bool {
        self.native_loaded
    }

    /// The sample index
    pub fn index(&self) -> &SampleIndex {
        &self.index
    }

    /// The native bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// The filter dialog
    pub fn dialog(&self) -> &FilterDialog {
        &self.dialog
    }

    /// Current launch flags
    pub fn flags(&self) -> LaunchFlags {
        self.flags
    }

    /// Visible top-level view
    pub fn view(&self) -> LauncherView {
        self.view
    }

    /// UI event bus
    pub fn events_mut(&mut self) -> &mut UiEventSystem {
        &mut self.events
    }

    /// Remove and return all queued UI events
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        self.events.drain()
    }

    // --- Tabs and rows ---

    /// Tab titles
    pub fn tabs(&self) -> &[String] {
        self.index.categories()
    }

    /// Rows of the tab at `tab`: its samples that pass the active filter
    pub fn rows(&self, tab: usize) -> Vec<&Sample> {
        self.tabs()
            .get(tab)
            .map(|category| self.index.viewable(category))
            .unwrap_or_default()
    }

    /// Position of the selected tab
    pub fn current_tab(&self) -> usize {
        self.current_tab
    }

    /// Category of the selected tab, if there are any tabs
    pub fn current_category(&self) -> Option<&str> {
        self.tabs().get(self.current_tab).map(String::as_str)
    }

    /// Select the tab at `tab`
    pub fn select_tab(&mut self, tab: usize) -> Result<(), LauncherError> {
        if tab >= self.tabs().len() {
            return Err(LauncherError::NoSuchTab(tab));
        }
        self.current_tab = tab;
        Ok(())
    }

    // --- Filter dialog ---

    /// Show the filter dialog
    pub fn open_filter(&mut self) {
        self.dialog.open(&self.index);
    }

    /// Check or uncheck a tag in the open dialog
    pub fn toggle_filter(&mut self, tag: &str, checked: bool) -> bool {
        self.dialog.toggle(tag, checked)
    }

    /// Check or uncheck a dialog row by position
    pub fn toggle_filter_at(&mut self, row: usize, checked: bool) -> bool {
        self.dialog.toggle_at(row, checked)
    }

    /// Dismiss the dialog without applying
    pub fn cancel_filter(&mut self) {
        self.dialog.cancel();
    }

    /// Apply the dialog selection and ask the UI to refresh its rows
    ///
    /// Returns `false` when the dialog was not open.
    pub fn apply_filter(&mut self) -> bool {
        let Some(applied) = self.dialog.apply(&mut self.index) else {
            return false;
        };
        self.events.send(
            UiEvent::new(UiEventType::FilterApplied)
                .with_arg("tags", UiEventArg::Tags(applied.into_iter().collect())),
        );
        true
    }

    // --- Launching ---

    /// Flip benchmark mode, returning the new state
    pub fn toggle_benchmark(&mut self) -> bool {
        self.flags.toggle(LaunchFlags::BENCHMARK);
        self.flags.contains(LaunchFlags::BENCHMARK)
    }

    /// Flip headless mode, returning the new state
    pub fn toggle_headless(&mut self) -> bool {
        self.flags.toggle(LaunchFlags::HEADLESS);
        self.flags.contains(LaunchFlags::HEADLESS)
    }

    /// Launch a sample by id
    ///
    /// Unknown ids are reported as a transient message and nothing is sent.
    pub fn launch_sample(&mut self, id: &str) -> Result<Vec<String>, LauncherError> {
        if self.index.find_by_id(id).is_none() {
            let err = LauncherError::UnknownSample(id.to_string());
            self.toast(err.to_string());
            return Err(err);
        }
        self.launch(&LaunchRequest::Sample(id.to_string()), false)
    }

    /// Launch a test by id; tests run in landscape
    pub fn launch_test(&mut self, id: &str) -> Result<Vec<String>, LauncherError> {
        self.launch(&LaunchRequest::Test(id.to_string()), true)
    }

    /// Batch-run the selected tab's category with the active filter
    pub fn run_batch(&mut self) -> Result<Vec<String>, LauncherError> {
        let category = self.current_category().unwrap_or(ALL_CATEGORIES).to_string();
        self.run_batch_in(&category)
    }

    /// Batch-run `category`, a tab name or [`ALL_CATEGORIES`], with the active filter
    ///
    /// A batch that selects no sample posts a transient message and sends nothing.
    pub fn run_batch_in(&mut self, category: &str) -> Result<Vec<String>, LauncherError> {
        let tags: Vec<String> = self.index.active_filter().iter().cloned().collect();
        let selected = self.index.batch_selection(category, &tags).len();
        if selected == 0 {
            let err = LauncherError::EmptyBatch;
            log::warn!("{err} (category '{category}', tags {tags:?})");
            self.toast(err.to_string());
            return Err(err);
        }
        log::info!("Batch run of {selected} samples in '{category}'");
        self.launch(&LaunchRequest::batch(category, &tags), false)
    }

    /// Act on startup extras: a sample wins over a test
    pub fn handle_extras(&mut self, extras: &IntentExtras) -> Result<Option<Vec<String>>, LauncherError> {
        if let Some(sample) = &extras.sample {
            return self.launch_sample(sample).map(Some);
        }
        if let Some(test) = &extras.test {
            return self.launch_test(test).map(Some);
        }
        Ok(None)
    }

    fn launch(&mut self, request: &LaunchRequest, landscape: bool) -> Result<Vec<String>, LauncherError> {
        let args = request.to_args(self.flags);
        if let Err(e) = self.bridge.send_arguments(&args) {
            log::warn!("Launch failed: {e}");
            self.toast(e.to_string());
            return Err(e.into());
        }
        log::info!("Launching: {}", args.join(" "));
        self.events.send(
            UiEvent::new(UiEventType::LaunchRequested)
                .with_arg("arguments", UiEventArg::Arguments(args.clone()))
                .with_arg("landscape", UiEventArg::Landscape(landscape)),
        );
        Ok(args)
    }

    // --- Permissions ---

    /// Start or continue the permission chain
    pub fn check_permissions(&mut self, status: &impl PermissionStatus) -> PermissionStep {
        let step = self.permissions.check(status);
        self.follow(step)
    }

    /// Report the user's answer to a permission request
    pub fn on_permission_result(
        &mut self,
        permission: Permission,
        granted: bool,
        status: &impl PermissionStatus,
    ) -> PermissionStep {
        let step = self.permissions.on_result(permission, granted, status);
        self.follow(step)
    }

    /// Retry button on the permission view
    pub fn retry_permissions(&mut self, status: &impl PermissionStatus) -> PermissionStep {
        let step = self.permissions.retry(status);
        self.follow(step)
    }

    fn follow(&mut self, step: PermissionStep) -> PermissionStep {
        match step {
            PermissionStep::ShowSamples => self.set_view(LauncherView::Samples),
            PermissionStep::ShowPermissionMessage => self.set_view(LauncherView::PermissionMessage),
            PermissionStep::Request(_) => {}
        }
        step
    }

    fn set_view(&mut self, view: LauncherView) {
        if self.view != view {
            log::debug!("View changed to {view:?}");
            self.view = view;
            self.events.send(UiEvent::new(UiEventType::ViewChanged).with_arg("view", UiEventArg::View(view)));
        }
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.events.send(toast_event(message));
    }
}

fn toast_event(message: impl Into<String>) -> UiEvent {
    UiEvent::new(UiEventType::ToastPosted).with_arg("message", UiEventArg::Message(message.into()))
}
