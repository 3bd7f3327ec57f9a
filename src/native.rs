//! Native front end.
//!
//! Stands in for the browser on the desktop: a native file dialog plays the
//! part of the file input, paths on the command line play the part of a drop
//! payload, and the "DOM" is the terminal.

use std::path::{Path, PathBuf};

use web_time::Instant;

use crate::config::{CONFIG_ENV_VAR, LogLevel, PreviewConfig};
use crate::controller::{PreviewController, PreviewSink, ReadOutcome, ReadRequest, SelectedFile};
use crate::data_uri::{self, IMAGE_EXTENSIONS};
use crate::error::Result;

/// A file on the local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectedFile for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Read a local file and encode it as a data URI.
pub fn read_as_data_url(file: &LocalFile) -> Result<String> {
    let bytes = std::fs::read(&file.path)?;
    let mime = data_uri::sniff_mime(&file.name, &bytes);
    log::debug!("📂 {} read: {} bytes ({})", file.name, bytes.len(), mime);
    Ok(data_uri::encode(mime, &bytes))
}

/// Sink that prints the preview state to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl PreviewSink for TerminalSink {
    fn set_label(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_preview_source(&mut self, data_uri: &str) {
        // The full URI is unreadable in a terminal; show what it holds instead
        match data_uri::decode(data_uri) {
            Ok(uri) => println!("Preview: {} ({} bytes)", uri.mime, uri.bytes.len()),
            Err(e) => println!("Preview: <{}>", e),
        }
    }

    fn set_drop_zone_active(&mut self, active: bool) {
        log::trace!("Drop zone active: {}", active);
    }
}

/// Load the config named by `IMAGE_PREVIEW_CONFIG`, or the defaults.
pub fn load_config() -> Result<PreviewConfig> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            PreviewConfig::from_json(&json)
        }
        None => Ok(PreviewConfig::default()),
    }
}

/// Initialize env_logger. `RUST_LOG` overrides the configured level.
pub fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

/// Show the native file dialog. Returns `None` if the user cancels.
pub fn pick_file() -> Option<LocalFile> {
    rfd::FileDialog::new()
        .set_title("Choose an image to preview")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .map(LocalFile::new)
}

/// Preview one file: dropped `paths` if any were given, otherwise ask with a
/// file dialog.
pub fn run(config: PreviewConfig, paths: Vec<PathBuf>) -> PreviewController<TerminalSink> {
    let mut controller = PreviewController::new(config, TerminalSink);

    let request = if paths.is_empty() {
        controller.on_file_input_changed(pick_file())
    } else {
        controller.on_drag_over();
        controller.on_drop(paths.into_iter().map(LocalFile::new))
    };

    if let Some(request) = request {
        render_preview(&mut controller, request);
    }
    controller
}

/// Read the requested file and hand the result to the controller.
pub fn render_preview<S: PreviewSink>(
    controller: &mut PreviewController<S>,
    request: ReadRequest<LocalFile>,
) -> ReadOutcome {
    let start = Instant::now();
    let result = read_as_data_url(&request.file);
    log::debug!(
        "Read of {} took {:.1}ms",
        request.file.path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    controller.complete_read(request.token, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ReadState;

    /// Write `bytes` to a fresh file under the system temp dir.
    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("image-preview-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_local_file_name() {
        let file = LocalFile::new("/tmp/uploads/cat.png");
        assert_eq!(SelectedFile::name(&file), "cat.png");
        assert_eq!(file.path(), Path::new("/tmp/uploads/cat.png"));
    }

    #[test]
    fn test_read_as_data_url() {
        let bytes = b"\x89PNG\r\n\x1a\nnative";
        let path = temp_file("read.png", bytes);

        let uri = read_as_data_url(&LocalFile::new(&path)).unwrap();
        let decoded = data_uri::decode(&uri).unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn test_run_previews_first_dropped_path() {
        let first = temp_file("first.gif", b"GIF89a first");
        let second = temp_file("second.gif", b"GIF89a second");

        let controller = run(PreviewConfig::default(), vec![first, second]);

        assert_eq!(controller.label_text(), Some("File name: first.gif"));
        let preview = data_uri::decode(controller.preview_source().unwrap()).unwrap();
        assert_eq!(preview.bytes, b"GIF89a first");
        assert!(!controller.is_drop_zone_active());
        assert_eq!(controller.state(), ReadState::Idle);
    }

    #[test]
    fn test_run_missing_file_leaves_preview_empty() {
        let missing = std::env::temp_dir().join("image-preview-does-not-exist.png");

        let controller = run(PreviewConfig::default(), vec![missing]);

        assert_eq!(
            controller.label_text(),
            Some("File name: image-preview-does-not-exist.png")
        );
        assert_eq!(controller.preview_source(), None);
        assert_eq!(controller.state(), ReadState::Idle);
    }
}
