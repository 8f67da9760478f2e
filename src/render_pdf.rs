//! PDF rasterisation of the print sheet.
//!
//! The sheet HTML from [`crate::render_html`] is handed to a [`Rasterizer`].
//! With the `pdf` feature, [`ChromiumRasterizer`] pipes it through headless
//! Chromium's built-in PDF printer over the DevTools protocol.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// A4 short edge in inches (210 mm).
pub const A4_SHORT_EDGE_IN: f64 = 8.27;
/// A4 long edge in inches (297 mm).
pub const A4_LONG_EDGE_IN: f64 = 11.69;

/// Margins for PDF output, all values in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Configuration for PDF rendering.
///
/// The sheet is always A4 landscape; only printer-side settings are exposed.
/// Unknown keys (e.g. a `paper_size`) are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    /// Page margins in inches (default: none, the sheet carries its own).
    pub margins: Margins,
    /// Print background graphics (default: true).
    pub print_background: bool,
    /// Rendering scale passed to the printer, 0.1..=2.0 (default: 1.0).
    pub scale: f64,
    /// Let the document's `@page` rule set the page size (default: true).
    pub prefer_css_page_size: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            print_background: true,
            scale: 1.0,
            prefer_css_page_size: true,
        }
    }
}

impl PdfConfig {
    /// Sheet width and height in inches (A4 landscape).
    pub fn page_dimensions(&self) -> (f64, f64) {
        (A4_LONG_EDGE_IN, A4_SHORT_EDGE_IN)
    }
}

/// Errors that can occur during PDF generation.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The rasteriser could not be started (e.g. no browser available).
    #[error("PDF renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// Failed to load the sheet into the renderer.
    #[error("Page load failed: {0}")]
    PageLoad(String),

    /// Failed to produce PDF bytes.
    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),
}

/// Turns a self-contained HTML sheet into PDF bytes.
pub trait Rasterizer {
    fn rasterize(
        &self,
        html: &str,
        config: &PdfConfig,
    ) -> impl Future<Output = Result<Vec<u8>, PdfError>> + Send;
}

/// Inject `@page` rules matching `config` before the closing `</head>` tag so
/// the document's page size agrees with the printer settings.
pub fn inject_print_css(html: &str, config: &PdfConfig) -> String {
    let (width, height) = config.page_dimensions();
    let Margins {
        top,
        right,
        bottom,
        left,
    } = config.margins;

    let print_css = format!(
        r#"<style>
    @page {{
        size: {width}in {height}in;
        margin: {top}in {right}in {bottom}in {left}in;
    }}
    @media print {{
        body {{
            -webkit-print-color-adjust: exact;
            print-color-adjust: exact;
        }}
    }}
    </style>"#
    );

    if let Some(pos) = html.find("</head>") {
        let mut result = String::with_capacity(html.len() + print_css.len() + 1);
        result.push_str(&html[..pos]);
        result.push_str(&print_css);
        result.push('\n');
        result.push_str(&html[pos..]);
        result
    } else {
        format!("{print_css}\n{html}")
    }
}

#[cfg(feature = "pdf")]
pub use chromium::ChromiumRasterizer;

#[cfg(feature = "pdf")]
mod chromium {
    use std::path::PathBuf;

    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
    use futures::StreamExt;

    use super::{A4_LONG_EDGE_IN, A4_SHORT_EDGE_IN, PdfConfig, PdfError, Rasterizer};

    /// Headless Chromium rasteriser. A browser is launched per job.
    #[derive(Debug, Clone, Default)]
    pub struct ChromiumRasterizer {
        /// Explicit Chrome/Chromium binary; autodetected when `None`.
        pub executable: Option<PathBuf>,
    }

    impl Rasterizer for ChromiumRasterizer {
        async fn rasterize(&self, html: &str, config: &PdfConfig) -> Result<Vec<u8>, PdfError> {
            let mut builder = BrowserConfig::builder().no_sandbox();
            if let Some(path) = &self.executable {
                builder = builder.chrome_executable(path);
            }
            let browser_config = builder.build().map_err(PdfError::RendererUnavailable)?;

            let (mut browser, mut handler) = Browser::launch(browser_config)
                .await
                .map_err(|e| PdfError::RendererUnavailable(e.to_string()))?;

            let handler_task = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let result = print_page(&browser, html, config).await;

            let _ = browser.close().await;
            let _ = handler_task.await;

            result
        }
    }

    async fn print_page(browser: &Browser, html: &str, config: &PdfConfig) -> Result<Vec<u8>, PdfError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PdfError::PageLoad(e.to_string()))?;

        page.set_content(html)
            .await
            .map_err(|e| PdfError::PageLoad(e.to_string()))?;

        let params = PrintToPdfParams::builder()
            .paper_width(A4_SHORT_EDGE_IN)
            .paper_height(A4_LONG_EDGE_IN)
            .margin_top(config.margins.top)
            .margin_right(config.margins.right)
            .margin_bottom(config.margins.bottom)
            .margin_left(config.margins.left)
            .landscape(true)
            .print_background(config.print_background)
            .scale(config.scale.clamp(0.1, 2.0))
            .prefer_css_page_size(config.prefer_css_page_size)
            .build();

        page.pdf(params)
            .await
            .map_err(|e| PdfError::PdfGeneration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_config_defaults_to_borderless_a4_landscape() {
        let config = PdfConfig::default();
        assert_eq!(config.margins, Margins::default());
        assert!(config.print_background);
        assert!(config.prefer_css_page_size);
        assert!((config.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.page_dimensions(), (11.69, 8.27));
    }

    #[test]
    fn other_paper_sizes_are_rejected() {
        let err = serde_yaml::from_str::<PdfConfig>("paper_size: letter\n").unwrap_err();
        assert!(err.to_string().contains("paper_size"), "{err}");
    }

    #[test]
    fn inject_print_css_inserts_before_head_close() {
        let html = "<html>\n<head>\n<title>Notice</title>\n</head>\n<body></body>\n</html>";
        let result = inject_print_css(html, &PdfConfig::default());

        let head_close = result.find("</head>").unwrap();
        let page_rule = result.find("@page").unwrap();
        assert!(page_rule < head_close);
        assert!(result.contains("size: 11.69in 8.27in;"));
        assert!(result.contains("margin: 0in 0in 0in 0in;"));
        assert!(result.contains("<title>Notice</title>"));
    }

    #[test]
    fn inject_print_css_without_head_prepends() {
        let result = inject_print_css("<p>x</p>", &PdfConfig::default());
        assert!(result.starts_with("<style>"));
        assert!(result.ends_with("<p>x</p>"));
    }

    #[test]
    fn config_deserializes_partial_yaml() {
        let config: PdfConfig = serde_yaml::from_str("scale: 0.9\nmargins: { top: 0.1, right: 0, bottom: 0.1, left: 0 }\n").unwrap();
        assert!((config.scale - 0.9).abs() < f64::EPSILON);
        assert!((config.margins.top - 0.1).abs() < f64::EPSILON);
        assert!(config.print_background);
    }

    #[test]
    fn pdf_error_display() {
        let err = PdfError::RendererUnavailable("no chrome found".to_string());
        assert_eq!(err.to_string(), "PDF renderer unavailable: no chrome found");
        let err = PdfError::PageLoad("timeout".to_string());
        assert_eq!(err.to_string(), "Page load failed: timeout");
    }

    /// Requires a working Chrome installation.
    /// Run with: cargo test --features pdf -- --ignored
    #[cfg(feature = "pdf")]
    #[tokio::test]
    #[ignore]
    async fn chromium_produces_pdf_bytes() {
        let html = "<!DOCTYPE html><html><head></head><body><p>അസ്സലാമു അലൈകും</p></body></html>";
        let bytes = ChromiumRasterizer::default()
            .rasterize(html, &PdfConfig::default())
            .await
            .expect("PDF generation should succeed");
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
