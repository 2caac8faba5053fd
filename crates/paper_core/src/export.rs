//! crates/paper_core/src/export.rs
//!
//! Assembles standalone HTML documents from editor content: the downloadable /
//! publishable export, and the variant handed to the rasterizer for PNG output.

use crate::fonts::font_family;
use crate::themes::{theme_styles, Theme};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const FALLBACK_TITLE: &str = "Paper Export";
pub const FALLBACK_DESCRIPTION: &str = "Document created with paper";
pub const DESCRIPTION_LIMIT: usize = 160;

/// Id of the element the rasterizer captures.
pub const RASTER_ROOT_ID: &str = "paper-raster";

const HIGHLIGHT_STYLESHEET: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css";

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<h1[^>]*>([^<]+)</h1>").expect("valid heading regex"))
}

fn paragraph_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<p[^>]*>([^<]+)</p>").expect("valid paragraph regex"))
}

/// Title and description used for the document head and social cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
}

impl DocumentMeta {
    /// Takes the first plain-text `<h1>` as title and the first plain-text `<p>` as description.
    /// The description keeps at most [`DESCRIPTION_LIMIT`] characters (Unicode scalar values).
    pub fn from_content(content: &str) -> Self {
        let title = heading_pattern()
            .captures(content)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let description = paragraph_pattern()
            .captures(content)
            .map(|caps| caps[1].chars().take(DESCRIPTION_LIMIT).collect())
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());
        Self { title, description }
    }
}

fn attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn render_document(content: &str, font_id: &str, theme: &Theme, extra_styles: &str, body: &str) -> String {
    let meta = DocumentMeta::from_content(content);
    let title = attr(&meta.title);
    let description = attr(&meta.description);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<meta name="generator" content="paper.tsbin.tech">
	<meta name="description" content="{description}">

	<!-- Favicon -->
	<link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='0.9em' font-size='90'>📄</text></svg>">

	<!-- Open Graph -->
	<meta property="og:type" content="article">
	<meta property="og:title" content="{title}">
	<meta property="og:description" content="{description}">
	<meta property="og:site_name" content="paper">

	<!-- Twitter Card -->
	<meta name="twitter:card" content="summary">
	<meta name="twitter:title" content="{title}">
	<meta name="twitter:description" content="{description}">

	<title>{raw_title}</title>
	<link rel="stylesheet" href="{highlight}" />
	<style>
		body {{
			font-family: {family};
		}}
		{styles}{extra_styles}
	</style>
</head>
<body>
{body}
</body>
</html>"#,
        raw_title = meta.title,
        highlight = HIGHLIGHT_STYLESHEET,
        family = font_family(font_id),
        styles = theme_styles(theme),
    )
}

/// A fully self-contained HTML document for download or publishing.
pub fn export_html(content: &str, font_id: &str, theme: &Theme) -> String {
    render_document(content, font_id, theme, "", content)
}

/// The export document prepared for screenshotting: the content sits in a
/// `#paper-raster` box painted with the theme background, and code blocks wrap
/// instead of scrolling so nothing is clipped.
pub fn raster_html(content: &str, font_id: &str, theme: &Theme) -> String {
    let patch = format!(
        r#"
		#{root} {{
			background: {background};
		}}
		#{root} pre {{
			overflow: visible !important;
			white-space: pre-wrap !important;
			word-break: break-word !important;
		}}"#,
        root = RASTER_ROOT_ID,
        background = theme.background_color,
    );
    let body = format!(r#"<article id="{}">{}</article>"#, RASTER_ROOT_ID, content);
    render_document(content, font_id, theme, &patch, &body)
}

pub fn png_file_name(at: DateTime<Utc>) -> String {
    format!("paper-{}.png", at.timestamp_millis())
}

pub fn html_file_name(title: &str) -> String {
    format!("{}.html", title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::theme_by_id;
    use chrono::TimeZone;

    #[test]
    fn meta_comes_from_first_heading_and_paragraph() {
        let content = r#"<h1 class="t">Field notes</h1><p>First.</p><p>Second.</p><h1>Other</h1>"#;
        let meta = DocumentMeta::from_content(content);
        assert_eq!(meta.title, "Field notes");
        assert_eq!(meta.description, "First.");
    }

    #[test]
    fn meta_falls_back_without_plain_text_heading() {
        let meta = DocumentMeta::from_content("<h1><em>styled</em></h1><div>no paragraph</div>");
        assert_eq!(meta.title, FALLBACK_TITLE);
        assert_eq!(meta.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn description_is_truncated_to_160_chars() {
        let long = "é".repeat(200);
        let meta = DocumentMeta::from_content(&format!("<p>{}</p>", long));
        assert_eq!(meta.description.chars().count(), 160);
    }

    #[test]
    fn description_limit_counts_characters_not_utf16_units() {
        let long = "📄".repeat(200);
        let meta = DocumentMeta::from_content(&format!("<p>{}</p>", long));
        assert_eq!(meta.description.chars().count(), DESCRIPTION_LIMIT);
        assert_eq!(meta.description.encode_utf16().count(), 2 * DESCRIPTION_LIMIT);
    }

    #[test]
    fn export_is_a_standalone_document() {
        let theme = theme_by_id("dark").unwrap();
        let content = r#"<h1>Say "hi"</h1><p>Body text</p>"#;
        let html = export_html(content, "inter", theme);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<meta property="og:title" content="Say &quot;hi&quot;">"#));
        assert!(html.contains(r#"<meta name="twitter:description" content="Body text">"#));
        assert!(html.contains("<title>Say \"hi\"</title>"));
        assert!(html.contains("font-family: Inter, sans-serif;"));
        assert!(html.contains("background: #18181b;"));
        assert!(html.contains(&format!("<body>\n{}\n</body>", content)));
        assert!(!html.contains(RASTER_ROOT_ID));
    }

    #[test]
    fn raster_document_unclips_code_blocks() {
        let theme = theme_by_id("terminal").unwrap();
        let content = "<pre><code>let x = 1;</code></pre>";
        let html = raster_html(content, "mono", theme);

        assert!(html.contains(r#"<article id="paper-raster"><pre><code>let x = 1;</code></pre></article>"#));
        assert!(html.contains("white-space: pre-wrap !important;"));
        assert!(html.contains("#paper-raster {\n\t\t\tbackground: #000000;"));
    }

    #[test]
    fn file_names() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(png_file_name(at), "paper-1700000000123.png");
        assert_eq!(html_file_name("Notes"), "Notes.html");
    }
}
