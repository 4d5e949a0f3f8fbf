use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use super::models::{FileHandle, SelectionConfig};

pub const DEFAULT_CONTROL_ID: &str = "select-files-temp";

/// Attributes the host applies to the hidden picker control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerOptions {
    pub multiple: bool,
    /// Passed through to the platform verbatim.
    pub accept: Option<String>,
}

impl From<&SelectionConfig> for PickerOptions {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            multiple: config.multiple,
            accept: config.accept().map(str::to_string),
        }
    }
}

/// Platform side of the picker: the surface that owns native controls.
///
/// `mount` returns the channel the selection will arrive on. Unmounting a
/// control must drop its sender so a pending selection resolves instead of
/// hanging.
pub trait PickerHost: Send + Sync {
    type File: FileHandle;

    fn mount(&self, id: &str, options: &PickerOptions) -> oneshot::Receiver<Vec<Self::File>>;

    /// Opens the native dialog, delivered as a user-activation equivalent.
    fn activate(&self, id: &str);

    fn unmount(&self, id: &str);

    fn is_mounted(&self, id: &str) -> bool;
}

/// Opens a single hidden picker control at a time and resolves with what
/// the user chose.
#[derive(Debug)]
pub struct FilePicker<H> {
    host: H,
    control_id: String,
    current: Mutex<Option<Uuid>>,
}

impl<H: PickerHost> FilePicker<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            control_id: DEFAULT_CONTROL_ID.to_string(),
            current: Mutex::new(None),
        }
    }

    pub fn with_control_id(mut self, control_id: impl Into<String>) -> Self {
        self.control_id = control_id.into();
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    /// Resolves with the picked files. Cancelling, or being superseded by a
    /// newer selection, resolves with an empty list.
    pub async fn select_files(&self, config: &SelectionConfig) -> Vec<H::File> {
        let options = PickerOptions::from(config);
        let (control, receiver) = self.mount(&options);

        self.host.activate(&self.control_id);

        let files = match receiver.await {
            Ok(files) => files,
            Err(_) => {
                debug!("Picker control {} released without a selection", control.ticket);
                Vec::new()
            }
        };

        debug!(count = files.len(), "Picker {} resolved", control.ticket);
        files
    }

    fn mount(&self, options: &PickerOptions) -> (MountedControl<'_, H>, oneshot::Receiver<Vec<H::File>>) {
        let mut current = self.current.lock();

        if self.host.is_mounted(&self.control_id) {
            debug!("Removing stale picker control {}", self.control_id);
            self.host.unmount(&self.control_id);
        }

        let ticket = Uuid::new_v4();
        *current = Some(ticket);
        let receiver = self.host.mount(&self.control_id, options);
        debug!(multiple = options.multiple, accept = ?options.accept, "Mounted picker {}", ticket);

        (MountedControl { picker: self, ticket }, receiver)
    }
}

/// Keeps the control mounted while a selection is pending.
struct MountedControl<'a, H: PickerHost> {
    picker: &'a FilePicker<H>,
    ticket: Uuid,
}

impl<H: PickerHost> Drop for MountedControl<'_, H> {
    fn drop(&mut self) {
        let mut current = self.picker.current.lock();

        // a newer selection owns the control now
        if *current != Some(self.ticket) {
            return;
        }

        *current = None;
        self.picker.host.unmount(&self.picker.control_id);
    }
}

#[derive(Debug)]
struct MountedEntry<F> {
    id: String,
    options: PickerOptions,
    sender: Option<oneshot::Sender<Vec<F>>>,
}

#[derive(Debug)]
struct StaticHostState<F> {
    selection: Vec<F>,
    responsive: bool,
    controls: Vec<MountedEntry<F>>,
    mount_count: usize,
    peak_mounted: usize,
    last_options: Option<PickerOptions>,
}

/// Picker host that answers every activation with a preset selection.
///
/// Clones share state, so a caller can keep a handle to inspect the
/// controls after handing the host to a [`FilePicker`].
#[derive(Debug, Clone)]
pub struct StaticPickerHost<F> {
    state: Arc<Mutex<StaticHostState<F>>>,
}

impl<F: FileHandle + Clone> StaticPickerHost<F> {
    pub fn new(selection: Vec<F>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StaticHostState {
                selection,
                responsive: true,
                controls: Vec::new(),
                mount_count: 0,
                peak_mounted: 0,
                last_options: None,
            })),
        }
    }

    /// A host whose dialogs never answer, as if the user walked away.
    pub fn unresponsive() -> Self {
        let host = Self::new(Vec::new());
        host.state.lock().responsive = false;
        host
    }

    pub fn set_selection(&self, selection: Vec<F>) {
        self.state.lock().selection = selection;
    }

    pub fn mounted_controls(&self) -> usize {
        self.state.lock().controls.len()
    }

    pub fn peak_mounted(&self) -> usize {
        self.state.lock().peak_mounted
    }

    pub fn mount_count(&self) -> usize {
        self.state.lock().mount_count
    }

    pub fn last_options(&self) -> Option<PickerOptions> {
        self.state.lock().last_options.clone()
    }
}

impl<F: FileHandle + Clone> PickerHost for StaticPickerHost<F> {
    type File = F;

    fn mount(&self, id: &str, options: &PickerOptions) -> oneshot::Receiver<Vec<F>> {
        let (sender, receiver) = oneshot::channel();
        let mut state = self.state.lock();

        state.controls.push(MountedEntry {
            id: id.to_string(),
            options: options.clone(),
            sender: Some(sender),
        });
        state.mount_count += 1;
        state.peak_mounted = state.peak_mounted.max(state.controls.len());
        state.last_options = Some(options.clone());

        receiver
    }

    fn activate(&self, id: &str) {
        let mut state = self.state.lock();
        if !state.responsive {
            return;
        }

        let mut selection = state.selection.clone();
        let Some(entry) = state.controls.iter_mut().find(|entry| entry.id == id) else {
            return;
        };

        if !entry.options.multiple {
            selection.truncate(1);
        }

        if let Some(sender) = entry.sender.take() {
            let _ = sender.send(selection);
        }
    }

    fn unmount(&self, id: &str) {
        let mut state = self.state.lock();
        if let Some(index) = state.controls.iter().position(|entry| entry.id == id) {
            state.controls.remove(index);
        }
    }

    fn is_mounted(&self, id: &str) -> bool {
        self.state.lock().controls.iter().any(|entry| entry.id == id)
    }
}
