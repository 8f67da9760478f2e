//! Export channels for a finished notice.
//!
//! Two channels share one pipeline (validate, compose, parse, lay out, render
//! the sheet) and differ only in where the sheet goes:
//!
//! - [`PrintChannel`] opens the sheet on a [`PrintSurface`] for the host's
//!   print dialog and falls back to a plain download when the surface refuses.
//! - [`PdfChannel`] rasterises the sheet through a [`Rasterizer`] and saves
//!   the PDF through a [`DownloadSink`].
//!
//! Both report progress through a [`GenerationTracker`].

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::compose::compose_notice_text;
use crate::config::NoticeConfig;
use crate::error::{NoticeError, Result};
use crate::layout::render_layout;
use crate::parse::parse_notice_content;
use crate::render_html::{MALAYALAM_FONT_IMPORT, PageConfig, to_html_page};
use crate::render_pdf::{Rasterizer, inject_print_css};
use crate::types::FormData;
use crate::validate::ensure_complete;

/// Output file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

/// Download name for a notice, e.g. `notice-2024-01-15-Kozhikode.pdf`.
pub fn file_name(form: &FormData, format: ExportFormat) -> String {
    let mut name = match form.date {
        Some(date) => format!("notice-{}", date.format("%Y-%m-%d")),
        None => "notice".to_string(),
    };
    let place = sanitize_place(&form.place);
    if !place.is_empty() {
        name.push('-');
        name.push_str(&place);
    }
    name.push('.');
    name.push_str(format.extension());
    name
}

/// Title of the exported document.
pub fn document_title(form: &FormData) -> String {
    match form.date {
        Some(date) => format!("Notice - {}", date.format("%Y-%m-%d")),
        None => "Notice - draft".to_string(),
    }
}

fn sanitize_place(place: &str) -> String {
    place
        .split(|c: char| c.is_whitespace() || matches!(c, '/' | '\\' | ':'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Render the full print sheet for `form`.
///
/// Goes through the notice text and parser, so the exported sheet is exactly
/// what the live preview shows.
pub fn render_notice_page(form: &FormData, config: &NoticeConfig, print_controls: bool) -> Result<String> {
    ensure_complete(form)?;
    let text = compose_notice_text(form);
    let content = parse_notice_content(&text).ok_or(NoticeError::MalformedComposedText)?;
    let layout = render_layout(&content, &config.layout, config.fonts);
    let page = PageConfig {
        title: document_title(form),
        print_controls,
        font_import: config.web_font.then(|| MALAYALAM_FONT_IMPORT.to_string()),
        ..PageConfig::default()
    };
    Ok(to_html_page(&layout, &page))
}

// ---------------------------------------------------------------------------
// Generation state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    /// Last job failed with this message.
    Errored(String),
}

/// Shared, cloneable view of a channel's generation state.
#[derive(Debug, Clone, Default)]
pub struct GenerationTracker {
    state: Arc<Mutex<GenerationState>>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GenerationState {
        self.lock().clone()
    }

    pub fn is_generating(&self) -> bool {
        *self.lock() == GenerationState::Generating
    }

    /// Enter `Generating`. Fails with [`NoticeError::Busy`] when a job is
    /// already running. The returned guard leaves `Generating` when settled
    /// or dropped.
    pub fn begin(&self) -> Result<GenerationGuard> {
        let mut state = self.lock();
        if *state == GenerationState::Generating {
            return Err(NoticeError::Busy);
        }
        *state = GenerationState::Generating;
        Ok(GenerationGuard {
            tracker: self.clone(),
            settled: false,
        })
    }

    fn set(&self, next: GenerationState) {
        *self.lock() = next;
    }

    fn lock(&self) -> MutexGuard<'_, GenerationState> {
        // A panic while holding the lock leaves a plain enum behind.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds a tracker in `Generating` until finished, failed or dropped.
#[derive(Debug)]
pub struct GenerationGuard {
    tracker: GenerationTracker,
    settled: bool,
}

impl GenerationGuard {
    pub fn finish(mut self) {
        self.settled = true;
        self.tracker.set(GenerationState::Idle);
    }

    pub fn fail(mut self, err: &NoticeError) {
        self.settled = true;
        self.tracker.set(GenerationState::Errored(err.to_string()));
    }
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.tracker.set(GenerationState::Idle);
        }
    }
}

// ---------------------------------------------------------------------------
// Surfaces and sinks
// ---------------------------------------------------------------------------

/// Something that can show a sheet to the user for printing.
pub trait PrintSurface {
    /// Open `html` for printing. Returns
    /// [`NoticeError::ExternalSurfaceUnavailable`] when the host refuses.
    fn open(&self, html: &str, file_name: &str) -> Result<()>;
}

/// Destination for downloaded files.
pub trait DownloadSink {
    /// Save `bytes` under `file_name` and return where they went.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Hooks around a print job, used by a UI to lock and unlock its controls.
pub trait PrintLifecycle {
    fn before_print(&self) {}
    fn after_print(&self) {}
    fn on_error(&self, _err: &NoticeError) {}
}

/// Lifecycle that ignores every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLifecycle;

impl PrintLifecycle for NoLifecycle {}

/// Name of the sheet [`BrowserSurface`] hands to the browser.
pub const PREVIEW_FILE_NAME: &str = "print-preview.html";

/// Opens sheets in the system browser.
///
/// Every print overwrites the same [`PREVIEW_FILE_NAME`] in the preview
/// directory, so repeated prints leave one file behind.
#[derive(Debug, Clone, Default)]
pub struct BrowserSurface {
    /// Opener command; the platform default when `None`.
    pub opener: Option<String>,
    /// Where the preview file is written; `<temp>/notice-maker` when `None`.
    pub preview_dir: Option<PathBuf>,
}

impl BrowserSurface {
    fn preview_dir(&self) -> PathBuf {
        match &self.preview_dir {
            Some(dir) => dir.clone(),
            None => std::env::temp_dir().join("notice-maker"),
        }
    }

    fn command(&self, path: &Path) -> Command {
        if let Some(opener) = &self.opener {
            let mut cmd = Command::new(opener);
            cmd.arg(path);
            return cmd;
        }
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl PrintSurface for BrowserSurface {
    fn open(&self, html: &str, file_name: &str) -> Result<()> {
        let dir = self.preview_dir();
        fs::create_dir_all(&dir).map_err(|e| NoticeError::io(&dir, e))?;
        let path = dir.join(PREVIEW_FILE_NAME);
        fs::write(&path, html).map_err(|e| NoticeError::io(&path, e))?;

        let status = self
            .command(&path)
            .status()
            .map_err(|e| NoticeError::ExternalSurfaceUnavailable(e.to_string()))?;
        if !status.success() {
            return Err(NoticeError::ExternalSurfaceUnavailable(format!(
                "opener exited with {status}"
            )));
        }
        log::info!("opened print preview for {file_name} at {}", path.display());
        Ok(())
    }
}

/// Writes downloads into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| NoticeError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|e| NoticeError::io(&path, e))?;
        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Where a print request ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    Opened,
    /// The surface refused; the sheet was downloaded instead.
    Downloaded(PathBuf),
}

/// Print-surface export with download fallback.
#[derive(Debug)]
pub struct PrintChannel<S, D> {
    surface: S,
    sink: D,
    config: NoticeConfig,
    tracker: GenerationTracker,
}

impl<S: PrintSurface, D: DownloadSink> PrintChannel<S, D> {
    pub fn new(surface: S, sink: D, config: NoticeConfig) -> Self {
        Self {
            surface,
            sink,
            config,
            tracker: GenerationTracker::new(),
        }
    }

    /// Share state with another channel.
    pub fn with_tracker(mut self, tracker: GenerationTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &GenerationTracker {
        &self.tracker
    }

    /// Render the sheet and open it for printing.
    ///
    /// Incomplete input is rejected before any hook runs.
    pub fn open_print_preview(&self, form: &FormData, lifecycle: &dyn PrintLifecycle) -> Result<PrintOutcome> {
        ensure_complete(form)?;
        let guard = self.tracker.begin()?;
        lifecycle.before_print();

        match self.print(form) {
            Ok(outcome) => {
                guard.finish();
                lifecycle.after_print();
                Ok(outcome)
            }
            Err(err) => {
                log::error!("print failed: {err}");
                guard.fail(&err);
                lifecycle.on_error(&err);
                Err(err)
            }
        }
    }

    fn print(&self, form: &FormData) -> Result<PrintOutcome> {
        let html = render_notice_page(form, &self.config, true)?;
        let name = file_name(form, ExportFormat::Html);
        match self.surface.open(&html, &name) {
            Ok(()) => Ok(PrintOutcome::Opened),
            Err(NoticeError::ExternalSurfaceUnavailable(reason)) => {
                log::warn!("print surface unavailable ({reason}), downloading {name} instead");
                let path = self.sink.save(&name, html.as_bytes())?;
                Ok(PrintOutcome::Downloaded(path))
            }
            Err(err) => Err(err),
        }
    }

    /// Save the printable sheet without opening it.
    pub fn download_html(&self, form: &FormData) -> Result<PathBuf> {
        let html = render_notice_page(form, &self.config, true)?;
        self.sink.save(&file_name(form, ExportFormat::Html), html.as_bytes())
    }
}

/// PDF export.
#[derive(Debug)]
pub struct PdfChannel<R, D> {
    rasterizer: R,
    sink: D,
    config: NoticeConfig,
    tracker: GenerationTracker,
}

impl<R: Rasterizer, D: DownloadSink> PdfChannel<R, D> {
    pub fn new(rasterizer: R, sink: D, config: NoticeConfig) -> Self {
        Self {
            rasterizer,
            sink,
            config,
            tracker: GenerationTracker::new(),
        }
    }

    pub fn with_tracker(mut self, tracker: GenerationTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &GenerationTracker {
        &self.tracker
    }

    /// Rasterise the sheet and save it as `notice-{date}-{place}.pdf`.
    pub async fn download_pdf(&self, form: &FormData) -> Result<PathBuf> {
        ensure_complete(form)?;
        let guard = self.tracker.begin()?;

        match self.generate(form).await {
            Ok(path) => {
                guard.finish();
                Ok(path)
            }
            Err(err) => {
                log::error!("PDF generation failed: {err}");
                guard.fail(&err);
                Err(err)
            }
        }
    }

    async fn generate(&self, form: &FormData) -> Result<PathBuf> {
        let html = render_notice_page(form, &self.config, false)?;
        let html = inject_print_css(&html, &self.config.pdf);
        log::debug!("rasterising {} bytes of HTML", html.len());
        let bytes = self.rasterizer.rasterize(&html, &self.config.pdf).await?;
        self.sink.save(&file_name(form, ExportFormat::Pdf), &bytes)
    }
}
