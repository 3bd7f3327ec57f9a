//! Preview controller.
//!
//! Platform-independent core of the preview: it turns file selections into
//! read requests and applies read completions to a [`PreviewSink`]. The
//! actual reading happens outside, in the browser or native driver, which
//! hands the result back through [`PreviewController::complete_read`].
//!
//! Every accepted selection gets a fresh [`ReadToken`]. Only the completion
//! carrying the most recently issued token may touch the preview; anything
//! older is discarded, so a slow read of an earlier file can never overwrite
//! a newer one.


use crate::config::PreviewConfig;
use crate::data_uri::is_image_file;
use crate::error::PreviewError;

/// A user-chosen file that can be previewed.
pub trait SelectedFile {
    /// File name as shown to the user (no directory part).
    fn name(&self) -> String;
}

/// Output surface the controller mirrors its state into.
pub trait PreviewSink {
    /// Replace the text of the name label.
    fn set_label(&mut self, text: &str);
    /// Replace the preview image source with a data URI.
    fn set_preview_source(&mut self, data_uri: &str);
    /// Toggle the drop zone's "active" affordance.
    fn set_drop_zone_active(&mut self, active: bool);
}

/// Sequence number correlating a read completion with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadToken(u64);

impl ReadToken {
    /// Raw sequence number.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// A read the platform driver must perform.
#[derive(Debug)]
pub struct ReadRequest<F> {
    /// Token to pass back to [`PreviewController::complete_read`]
    pub token: ReadToken,
    /// The file to read as a data URI
    pub file: F,
}

/// Whether a read is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadState {
    /// No read in flight
    #[default]
    Idle,
    /// Waiting for the read with this token
    Reading(ReadToken),
}

/// What happened to a read completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The preview was updated
    Applied,
    /// The latest read failed; the previous preview is kept
    Failed,
    /// A newer selection exists; the result was dropped
    Superseded,
}

/// Owns the preview state and decides what reaches the sink.
pub struct PreviewController<S> {
    config: PreviewConfig,
    sink: S,
    next_sequence: u64,
    latest: Option<ReadToken>,
    state: ReadState,
    label_text: Option<String>,
    preview_source: Option<String>,
    drop_zone_active: bool,
}

impl<S: PreviewSink> PreviewController<S> {
    /// Create a controller writing into `sink`.
    pub fn new(config: PreviewConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            next_sequence: 0,
            latest: None,
            state: ReadState::Idle,
            label_text: None,
            preview_source: None,
            drop_zone_active: false,
        }
    }

    /// A file input's selection changed.
    ///
    /// `None` means the dialog was cancelled and nothing changes. Otherwise
    /// the label is updated right away and a read request is returned.
    pub fn on_file_input_changed<F: SelectedFile>(
        &mut self,
        file: Option<F>,
    ) -> Option<ReadRequest<F>> {
        let Some(file) = file else {
            log::debug!("📂 File selection cancelled");
            return None;
        };
        Some(self.select(file))
    }

    /// A drag is hovering the drop zone.
    ///
    /// `dragover` fires continuously, so the sink only hears about the
    /// transition into the active state.
    pub fn on_drag_over(&mut self) {
        if !self.drop_zone_active {
            self.set_drop_zone_active(true);
        }
    }

    /// The drag left the drop zone.
    pub fn on_drag_leave(&mut self) {
        if self.drop_zone_active {
            self.set_drop_zone_active(false);
        }
    }

    /// Files were dropped on the drop zone. Only the first one is previewed.
    pub fn on_drop<F, I>(&mut self, files: I) -> Option<ReadRequest<F>>
    where
        F: SelectedFile,
        I: IntoIterator<Item = F>,
    {
        self.on_drag_leave();

        let Some(file) = files.into_iter().next() else {
            log::debug!("📂 Drop contained no files");
            return None;
        };
        Some(self.select(file))
    }

    /// Apply the result of the read issued with `token`.
    pub fn complete_read(
        &mut self,
        token: ReadToken,
        result: Result<String, PreviewError>,
    ) -> ReadOutcome {
        if self.latest != Some(token) {
            log::debug!(
                "Discarding read #{} (latest is #{})",
                token.0,
                self.latest.map_or(0, |t| t.0)
            );
            return ReadOutcome::Superseded;
        }

        self.state = ReadState::Idle;
        match result {
            Ok(data_uri) => {
                log::info!("🖼️ Preview updated ({} chars)", data_uri.len());
                self.sink.set_preview_source(&data_uri);
                self.preview_source = Some(data_uri);
                ReadOutcome::Applied
            }
            Err(e) => {
                log::warn!("Preview not updated: {}", e);
                ReadOutcome::Failed
            }
        }
    }

    fn select<F: SelectedFile>(&mut self, file: F) -> ReadRequest<F> {
        let name = file.name();
        if !is_image_file(&name) {
            log::debug!("📂 '{}' has no image extension, previewing anyway", name);
        }

        let label = self.config.label_for(&name);
        self.sink.set_label(&label);
        self.label_text = Some(label);

        self.next_sequence += 1;
        let token = ReadToken(self.next_sequence);
        self.latest = Some(token);
        self.state = ReadState::Reading(token);
        log::info!("📂 Reading '{}' (read #{})", name, token.0);

        ReadRequest { token, file }
    }

    fn set_drop_zone_active(&mut self, active: bool) {
        self.drop_zone_active = active;
        self.sink.set_drop_zone_active(active);
    }

    /// Current label text, if a file has been selected.
    pub fn label_text(&self) -> Option<&str> {
        self.label_text.as_deref()
    }

    /// Current preview data URI, if a read has completed.
    pub fn preview_source(&self) -> Option<&str> {
        self.preview_source.as_deref()
    }

    pub fn is_drop_zone_active(&self) -> bool {
        self.drop_zone_active
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.state, ReadState::Reading(_))
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
