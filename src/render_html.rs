//! HTML renderer for the print sheet and the live preview.
//!
//! The page document is self-contained: every layout rule is inlined so the
//! file renders the same when opened on its own, printed, or rasterised.
//! Notice lines are inserted verbatim (they already carry the composer's
//! emphasis markup and escaped field values); everything else is escaped.

use crate::layout::{
    CellStyle, CutGuide, FontSizes, LayoutConfig, NoticeCell, Orientation, PageLayout, StyleVariant,
    render_layout, COPIES_PER_PAGE,
};
use crate::parse::parse_notice_content;
use crate::template::escape_html;

/// Web font used for Malayalam text.
pub const MALAYALAM_FONT_IMPORT: &str =
    "https://fonts.googleapis.com/css2?family=Noto+Sans+Malayalam:wght@400;500;600&display=swap";

const FONT_STACK: &str = "'Noto Sans Malayalam', 'Arial', sans-serif";
const CHROME_FONT_STACK: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Options for the full page document.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Document title, e.g. `Notice - 2024-01-15`.
    pub title: String,
    /// Language code (default: "ml").
    pub lang: String,
    /// Include the screen-only print button and instructions.
    pub print_controls: bool,
    /// Stylesheet `@import` for the Malayalam web font. `None` relies on
    /// locally installed fonts.
    pub font_import: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Notice - draft".to_string(),
            lang: "ml".to_string(),
            print_controls: true,
            font_import: Some(MALAYALAM_FONT_IMPORT.to_string()),
        }
    }
}

/// Render the complete print document for a laid-out sheet.
pub fn to_html_page(layout: &PageLayout, config: &PageConfig) -> String {
    let mut cells = String::new();
    for cell in &layout.cells {
        cells.push_str("        <div class=\"notice-box\">");
        cells.push_str(&to_notice_html(cell));
        cells.push_str("</div>\n");
    }

    let guides: String = layout
        .cut_guides
        .iter()
        .map(|guide| format!("        {}\n", cut_guide_html(guide)))
        .collect();

    let controls = if config.print_controls {
        print_controls_html()
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="notice-maker {version}">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{controls}    <div class="page">
{cells}{guides}    </div>
</body>
</html>
"#,
        lang = escape_html(&config.lang),
        version = env!("CARGO_PKG_VERSION"),
        title = escape_html(&config.title),
        css = page_css(layout, config),
        controls = controls,
        cells = cells,
        guides = guides,
    )
}

/// Render one notice copy: greeting, centred body, two-column footer.
pub fn to_notice_html(cell: &NoticeCell) -> String {
    let class = match cell.style.variant {
        StyleVariant::Standard => "notice-content-wrapper",
        StyleVariant::Compact => "notice-content-wrapper long-text",
    };
    let [first, second] = &cell.footers;

    format!(
        concat!(
            "<div class=\"{class}\" style=\"{vars}\">",
            "<div class=\"greeting\">{greeting}</div>",
            "<div class=\"main-text\"><div class=\"main-text-content\">{main}</div></div>",
            "<div class=\"footer\">",
            "<div class=\"footer-left\"><div>{l1}</div><div>{l2}</div></div>",
            "<div class=\"footer-right\"><div>{r1}</div><div>{r2}</div></div>",
            "</div>",
            "</div>",
        ),
        class = class,
        vars = style_vars(&cell.style),
        greeting = cell.greeting,
        main = cell.main_text,
        l1 = first.left,
        l2 = second.left,
        r1 = first.right,
        r2 = second.right,
    )
}

/// Render the on-screen preview for the current notice text.
///
/// Uses the same cell markup and rules as the print sheet. Text that does
/// not parse renders the empty state.
pub fn to_preview_html(notice_text: &str, config: &LayoutConfig, fonts: FontSizes) -> String {
    let Some(content) = parse_notice_content(notice_text) else {
        return concat!(
            "<div class=\"notice-preview notice-preview-empty\">",
            "<p>Fill the form to see preview</p>",
            "<p>Your notice will appear here as you type</p>",
            "</div>"
        )
        .to_string();
    };

    let layout = render_layout(&content, config, fonts);
    let (width, height) = config.cell_size();
    format!(
        concat!(
            "<style>{css}\n.notice-preview .notice-box {{ width: {w}mm; height: {h}mm; }}</style>",
            "<div class=\"notice-preview\">",
            "<div class=\"notice-box\">{cell}</div>",
            "<p class=\"notice-preview-note\">Preview - PDF will contain {copies} copies arranged in 2×2 grid</p>",
            "</div>"
        ),
        css = cell_css(config),
        w = width,
        h = height,
        cell = to_notice_html(&layout.cells[0]),
        copies = COPIES_PER_PAGE,
    )
}

fn style_vars(style: &CellStyle) -> String {
    format!(
        "--base-font-size: {}pt; --greeting-font-size: {}pt; --footer-font-size: {}pt; \
         --line-height: {}; --greeting-line-height: {}; --main-text-line-height: {};",
        style.base_pt,
        style.greeting_pt,
        style.footer_pt,
        style.line_height,
        style.greeting_line_height,
        style.main_line_height,
    )
}

fn cut_guide_html(guide: &CutGuide) -> String {
    let length = guide.end - guide.start;
    match guide.orientation {
        Orientation::Horizontal => format!(
            "<div class=\"cut-guide cut-guide-horizontal\" aria-hidden=\"true\" \
             style=\"top: {}mm; left: {}mm; width: {}mm;\"></div>",
            guide.position, guide.start, length
        ),
        Orientation::Vertical => format!(
            "<div class=\"cut-guide cut-guide-vertical\" aria-hidden=\"true\" \
             style=\"left: {}mm; top: {}mm; height: {}mm;\"></div>",
            guide.position, guide.start, length
        ),
    }
}

fn print_controls_html() -> String {
    format!(
        r#"    <div class="no-print header-note">
        <strong>A4 LANDSCAPE Notice Layout</strong><br>
        Dimensions: 297mm &times; 210mm | Set printer to A4 landscape mode<br>
        Cut along the borders after printing for individual notices
    </div>
    <button class="print-button no-print" onclick="window.print()">Print A4 LANDSCAPE</button>
    <div class="dimensions-info no-print">A4 LANDSCAPE: 297mm &times; 210mm | {copies} notices</div>
"#,
        copies = COPIES_PER_PAGE
    )
}

/// Rules shared by the print sheet and the preview: cell box, typography,
/// footer columns, compact variant.
fn cell_css(config: &LayoutConfig) -> String {
    format!(
        r#"
        .notice-box {{
            border: {border}px solid #000;
            padding: {padding}mm;
            display: flex;
            align-items: center;
            justify-content: center;
            text-align: center;
            background: white;
            position: relative;
            overflow: hidden;
            box-sizing: border-box;
            font-family: {font};
        }}
        .notice-content-wrapper {{
            display: flex;
            flex-direction: column;
            height: 100%;
            width: 100%;
            padding: 1mm;
            font-size: var(--base-font-size);
            line-height: var(--line-height);
            color: #000;
            font-weight: 400;
            overflow: hidden;
        }}
        .greeting {{
            font-size: var(--greeting-font-size);
            line-height: var(--greeting-line-height);
            margin-bottom: 8mm;
            font-weight: 500;
            text-align: center;
        }}
        .main-text {{
            flex: 1;
            display: flex;
            align-items: center;
            justify-content: center;
            margin-bottom: 8mm;
            text-align: justify;
        }}
        .main-text-content {{
            font-size: var(--base-font-size);
            line-height: var(--main-text-line-height);
            text-align: justify;
            text-align-last: left;
            text-indent: 2em;
            word-wrap: break-word;
            overflow-wrap: break-word;
            width: 100%;
        }}
        .footer {{
            display: flex;
            justify-content: space-between;
            align-items: flex-end;
            font-size: var(--footer-font-size);
            line-height: 1.4;
            margin-top: auto;
        }}
        .footer-left, .footer-right {{
            display: flex;
            flex-direction: column;
        }}
        .footer-left {{ text-align: left; }}
        .footer-right {{ text-align: right; }}"#,
        border = config.border_px,
        padding = config.cell_padding_mm,
        font = FONT_STACK,
    )
}

fn page_css(layout: &PageLayout, config: &PageConfig) -> String {
    let import = match &config.font_import {
        Some(url) => format!("\n        @import url('{}');", escape_css_url(url)),
        None => String::new(),
    };
    let hide_guides = if layout.config.cut_guides_in_print {
        ""
    } else {
        "\n            .cut-guide { display: none !important; }"
    };

    format!(
        r#"{import}
        @page {{
            size: A4 landscape;
            margin: 0;
        }}
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: {font};
            background: white;
        }}
        .page {{
            width: {width}mm;
            height: {height}mm;
            background: white;
            margin: 0 auto;
            padding: {margin}mm;
            display: grid;
            grid-template-columns: 1fr 1fr;
            grid-template-rows: 1fr 1fr;
            gap: {gap}mm;
            overflow: hidden;
            position: relative;
        }}
        .cut-guide {{
            position: absolute;
            opacity: 0.3;
            z-index: 10;
            -webkit-print-color-adjust: exact;
            print-color-adjust: exact;
        }}
        .cut-guide-horizontal {{ height: 0; border-top: 1px solid #000; }}
        .cut-guide-vertical {{ width: 0; border-left: 1px solid #000; }}
        .notice-box {{
            break-inside: avoid;
            page-break-inside: avoid;
        }}{cell_css}
        @media print {{
            html, body {{
                width: {width}mm;
                height: {height}mm;
                overflow: hidden;
            }}
            .page {{
                margin: 0 !important;
                page-break-after: avoid;
            }}
            .no-print {{ display: none !important; }}
            * {{
                -webkit-print-color-adjust: exact !important;
                print-color-adjust: exact !important;
            }}{hide_guides}
        }}
        @media screen {{
            body {{ background: #f5f5f5; padding: 20px; }}
            .page {{ box-shadow: 0 4px 8px rgba(0,0,0,0.1); border: 1px solid #ddd; }}
        }}
        .header-note {{
            text-align: center;
            margin: 0 auto 20px;
            padding: 10px;
            background: #f8f9fa;
            border-radius: 6px;
            font-size: 14px;
            color: #666;
            max-width: {width}mm;
            font-family: {chrome_font};
        }}
        .print-button {{
            position: fixed;
            top: 20px;
            right: 20px;
            background: #007bff;
            color: white;
            border: none;
            padding: 12px 24px;
            border-radius: 6px;
            font-size: 16px;
            cursor: pointer;
            z-index: 1000;
            font-family: {chrome_font};
        }}
        .print-button:hover {{ background: #0056b3; }}
        .dimensions-info {{
            position: fixed;
            bottom: 20px;
            left: 20px;
            background: rgba(0,0,0,0.8);
            color: white;
            padding: 8px 12px;
            border-radius: 4px;
            font-size: 12px;
            font-family: monospace;
            z-index: 1000;
        }}
"#,
        import = import,
        font = FONT_STACK,
        chrome_font = CHROME_FONT_STACK,
        width = layout.width,
        height = layout.height,
        margin = layout.config.margin_mm,
        gap = layout.config.gap_mm,
        cell_css = cell_css(&layout.config),
        hide_guides = hide_guides,
    )
}

/// Keep a URL from breaking out of `url('...')`.
fn escape_css_url(url: &str) -> String {
    url.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '(' | ')' | '\\' | '<' | '>' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose_notice, compose_notice_text};
    use crate::types::{FormData, GuardianStatus, NoticeContent, Relation};
    use chrono::NaiveDate;

    fn form() -> FormData {
        FormData {
            place: "Kozhikode".into(),
            guardian_name: "Ahmed".into(),
            guardian_status: GuardianStatus::Alive,
            relation: Relation::Son,
            deceased_name: "Mohammed".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
        }
    }

    fn page(config: &PageConfig) -> String {
        let content = compose_notice(&form()).unwrap();
        let layout = render_layout(&content, &LayoutConfig::default(), FontSizes::default());
        to_html_page(&layout, config)
    }

    #[test]
    fn page_has_four_notice_boxes_and_two_guides() {
        let html = page(&PageConfig::default());
        assert_eq!(html.matches("<div class=\"notice-box\">").count(), 4);
        assert_eq!(html.matches("class=\"cut-guide ").count(), 2);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"ml\">"));
    }

    #[test]
    fn page_inlines_geometry() {
        let html = page(&PageConfig::default());
        assert!(html.contains("size: A4 landscape;"));
        assert!(html.contains("width: 297mm;"));
        assert!(html.contains("height: 210mm;"));
        assert!(html.contains("padding: 10mm;"));
        assert!(html.contains("gap: 20mm;"));
        assert!(html.contains("border: 2px solid #000;"));
        assert!(!html.contains("<link"));
    }

    #[test]
    fn footer_halves_land_in_columns() {
        let html = page(&PageConfig::default());
        assert!(html.contains(
            "<div class=\"footer-left\"><div><span style=\"font-weight: 800;\">Kozhikode-Ahmed</span></div>"
        ));
        assert!(html.contains(
            "<div class=\"footer-right\"><div><span style=\"font-weight: 800;\">എന്ന്</span></div>"
        ));
    }

    #[test]
    fn print_controls_are_optional() {
        let with = page(&PageConfig::default());
        assert!(with.contains("onclick=\"window.print()\""));
        assert!(with.contains("4 notices"));

        let without = page(&PageConfig {
            print_controls: false,
            font_import: None,
            ..PageConfig::default()
        });
        assert!(!without.contains("window.print()"));
        assert!(!without.contains("@import"));
    }

    #[test]
    fn title_is_escaped() {
        let html = page(&PageConfig {
            title: "Notice <draft>".into(),
            ..PageConfig::default()
        });
        assert!(html.contains("<title>Notice &lt;draft&gt;</title>"));
    }

    #[test]
    fn cut_guides_can_be_hidden_in_print() {
        let content = compose_notice(&form()).unwrap();
        let config = LayoutConfig {
            cut_guides_in_print: false,
            ..LayoutConfig::default()
        };
        let html = to_html_page(
            &render_layout(&content, &config, FontSizes::default()),
            &PageConfig::default(),
        );
        assert!(html.contains(".cut-guide { display: none !important; }"));
    }

    #[test]
    fn compact_cells_carry_smaller_sizes() {
        let content = NoticeContent {
            greeting: "g".into(),
            main_text: "മ".repeat(201),
            footer_line1: "a".into(),
            footer_line2: "b".into(),
        };
        let layout = render_layout(&content, &LayoutConfig::default(), FontSizes::default());
        let cell = to_notice_html(&layout.cells[0]);
        assert!(cell.contains("notice-content-wrapper long-text"));
        assert!(cell.contains("--base-font-size: 11pt;"));
        assert!(cell.contains("--main-text-line-height: 1.6;"));
    }

    #[test]
    fn standard_cells_use_default_sizes() {
        let layout = render_layout(
            &compose_notice(&form()).unwrap(),
            &LayoutConfig::default(),
            FontSizes::default(),
        );
        let cell = to_notice_html(&layout.cells[0]);
        assert!(cell.starts_with("<div class=\"notice-content-wrapper\" "));
        assert!(cell.contains("--base-font-size: 13pt;"));
        assert!(cell.contains("--greeting-font-size: 14pt;"));
        assert!(cell.contains("--footer-font-size: 12pt;"));
        assert!(cell.contains("--main-text-line-height: 1.8;"));
    }

    #[test]
    fn preview_matches_a_print_cell() {
        let text = compose_notice_text(&form());
        let preview = to_preview_html(&text, &LayoutConfig::default(), FontSizes::default());
        let layout = render_layout(
            &compose_notice(&form()).unwrap(),
            &LayoutConfig::default(),
            FontSizes::default(),
        );
        assert!(preview.contains(&to_notice_html(&layout.cells[0])));
        assert!(preview.contains("width: 128.5mm; height: 85mm;"));
    }

    #[test]
    fn preview_of_unready_text_is_empty_state() {
        let preview = to_preview_html("", &LayoutConfig::default(), FontSizes::default());
        assert!(preview.contains("notice-preview-empty"));
        assert!(!preview.contains("notice-box"));
    }
}
