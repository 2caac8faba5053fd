//! crates/paper_core/src/themes.rs
//!
//! The static theme catalogue and the stylesheet generated from a theme.

/// Colour parameters of one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub label: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub code_background: &'static str,
    pub code_color: Option<&'static str>,
    pub pre_background: &'static str,
    /// Background of fenced code blocks, which stay dark on light themes.
    pub code_block_background: &'static str,
    pub code_block_color: &'static str,
    pub blockquote_border: &'static str,
    pub blockquote_color: &'static str,
    pub link_color: Option<&'static str>,
    /// CSS `filter` applied to highlighted code.
    pub highlight_filter: Option<&'static str>,
}

pub const DEFAULT_BACKGROUND: &str = "#ffffff";

static THEMES: [Theme; 5] = [
    Theme {
        id: "paper",
        label: "Paper",
        background_color: "#ffffff",
        text_color: "#18181b",
        code_background: "rgba(0, 0, 0, 0.05)",
        code_color: None,
        pre_background: "rgba(0, 0, 0, 0.05)",
        code_block_background: "#1e1e1e",
        code_block_color: "#d4d4d4",
        blockquote_border: "rgba(0, 0, 0, 0.1)",
        blockquote_color: "rgba(0, 0, 0, 0.7)",
        link_color: None,
        highlight_filter: None,
    },
    Theme {
        id: "dark",
        label: "Dark",
        background_color: "#18181b",
        text_color: "#fafafa",
        code_background: "rgba(255, 255, 255, 0.1)",
        code_color: None,
        pre_background: "rgba(255, 255, 255, 0.05)",
        code_block_background: "#0d1117",
        code_block_color: "#c9d1d9",
        blockquote_border: "rgba(255, 255, 255, 0.2)",
        blockquote_color: "rgba(255, 255, 255, 0.7)",
        link_color: None,
        highlight_filter: None,
    },
    Theme {
        id: "terminal",
        label: "Terminal",
        background_color: "#000000",
        text_color: "#22c55e",
        code_background: "rgba(34, 197, 94, 0.1)",
        code_color: Some("#22c55e"),
        pre_background: "rgba(34, 197, 94, 0.05)",
        code_block_background: "#0a0a0a",
        code_block_color: "#22c55e",
        blockquote_border: "rgba(34, 197, 94, 0.5)",
        blockquote_color: "rgba(34, 197, 94, 0.8)",
        link_color: Some("#22c55e"),
        highlight_filter: Some("hue-rotate(90deg) saturate(0.8)"),
    },
    Theme {
        id: "sepia",
        label: "Sepia",
        background_color: "#f4ecd8",
        text_color: "#5c4a3a",
        code_background: "rgba(92, 74, 58, 0.1)",
        code_color: None,
        pre_background: "rgba(92, 74, 58, 0.08)",
        code_block_background: "#2b2416",
        code_block_color: "#f4ecd8",
        blockquote_border: "rgba(92, 74, 58, 0.3)",
        blockquote_color: "rgba(92, 74, 58, 0.8)",
        link_color: None,
        highlight_filter: None,
    },
    Theme {
        id: "nord",
        label: "Nord",
        background_color: "#2e3440",
        text_color: "#eceff4",
        code_background: "rgba(136, 192, 208, 0.15)",
        code_color: Some("#88c0d0"),
        pre_background: "rgba(136, 192, 208, 0.1)",
        code_block_background: "#2e3440",
        code_block_color: "#d8dee9",
        blockquote_border: "#88c0d0",
        blockquote_color: "#d8dee9",
        link_color: Some("#88c0d0"),
        highlight_filter: None,
    },
];

pub fn all_themes() -> &'static [Theme] {
    &THEMES
}

pub fn theme_by_id(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.id == id)
}

/// Resolves an id, falling back to the first (`paper`) theme.
pub fn theme_or_default(id: &str) -> &'static Theme {
    theme_by_id(id).unwrap_or(&THEMES[0])
}

pub fn theme_background(id: &str) -> &'static str {
    theme_by_id(id)
        .map(|theme| theme.background_color)
        .unwrap_or(DEFAULT_BACKGROUND)
}

// Placeholders: @bg@ @text@ @border@ @code-bg@ @pre-bg@
const BASE_STYLES: &str = r#"
    * {
      box-sizing: border-box;
      margin: 0;
      padding: 0;
    }

    body {
      background: @bg@;
      color: @text@;
      max-width: 800px;
      margin: 40px auto;
      padding: 20px;
      line-height: 1.6;
    }

    /* Typography */
    h1, h2, h3, h4, h5, h6 {
      margin-top: 2rem;
      margin-bottom: 1rem;
      font-weight: 600;
      line-height: 1.3;
      color: @text@;
    }

    h1 { font-size: 2.5rem; font-weight: 700; margin-bottom: 1rem; line-height: 1.2; }
    h2 { font-size: 2rem; font-weight: 600; margin-top: 2rem; margin-bottom: 0.75rem; }
    h3 { font-size: 1.5rem; font-weight: 600; margin-top: 1.5rem; margin-bottom: 0.5rem; }
    h4 { font-size: 1.5rem; }
    h5 { font-size: 1.25rem; }
    h6 { font-size: 1rem; }

    h1:first-child,
    h2:first-child,
    h3:first-child,
    h4:first-child,
    h5:first-child,
    h6:first-child {
      margin-top: 0;
    }

    p {
      margin-bottom: 1rem;
      color: @text@;
      line-height: 1.7;
    }

    /* Lists */
    ul, ol {
      margin-bottom: 1rem;
      padding-left: 1.5rem;
      color: @text@;
    }

    li {
      margin-bottom: 0.5rem;
    }

    li > ul,
    li > ol {
      margin-top: 0.5rem;
      margin-bottom: 0.5rem;
    }

    /* Links */
    a {
      text-decoration: underline;
    }

    a:hover {
      opacity: 0.8;
    }

    /* Code */
    code {
      padding: 0.2rem 0.4rem;
      border-radius: 0.25rem;
      font-size: 0.875em;
      font-family: 'Courier New', monospace;
    }

    pre {
      padding: 1rem;
      border-radius: 0.5rem;
      overflow-x: auto;
      margin-bottom: 1rem;
      line-height: 1.5;
    }

    pre code {
      background-color: transparent !important;
      padding: 0;
      font-family: 'JetBrains Mono', 'Fira Code', 'Courier New', monospace;
      font-size: 0.875em;
    }

    pre code.hljs {
      background: transparent !important;
      padding: 0;
    }

    /* Blockquotes */
    blockquote {
      padding-left: 1rem;
      margin: 1rem 0;
      font-style: italic;
    }

    blockquote > p {
      margin-bottom: 0.5rem;
    }

    blockquote > p:last-child {
      margin-bottom: 0;
    }

    /* Tables */
    table {
      width: 100%;
      border-collapse: collapse;
      margin-bottom: 1rem;
    }

    th, td {
      border: 1px solid @border@;
      padding: 0.75rem;
      text-align: left;
      color: @text@;
    }

    th {
      background: @code-bg@;
      font-weight: 600;
    }

    tr:nth-child(even) {
      background: @pre-bg@;
    }

    /* Horizontal Rule */
    hr {
      border: none;
      border-top: 2px solid @border@;
      margin: 2rem 0;
    }

    /* Images */
    img {
      max-width: 100%;
      height: auto;
      display: block;
      margin: 1rem 0;
      border-radius: 8px;
    }

    /* Strong and Emphasis */
    strong, b {
      font-weight: 600;
      color: @text@;
    }

    em, i {
      font-style: italic;
    }

    /* Strikethrough */
    del, s {
      text-decoration: line-through;
      opacity: 0.7;
    }

    /* Print styles */
    @media print {
      body {
        margin: 0;
        padding: 20px;
      }

      pre {
        page-break-inside: avoid;
      }

      h1, h2, h3, h4, h5, h6 {
        page-break-after: avoid;
      }
    }
"#;

/// Rules appended after the shared stylesheet. Optional colours only emit a
/// declaration when the theme sets them.
fn theme_overrides(theme: &Theme) -> String {
    let mut css = format!("\n    code {{\n      background-color: {};\n", theme.code_background);
    if let Some(color) = theme.code_color {
        css.push_str(&format!("      color: {};\n", color));
    }
    css.push_str("    }\n");
    css.push_str(&format!(
        "    pre {{\n      background-color: {};\n    }}\n",
        theme.code_block_background
    ));
    css.push_str(&format!("    pre code {{\n      color: {};\n    }}\n", theme.code_block_color));
    if let Some(filter) = theme.highlight_filter {
        css.push_str(&format!("    pre .hljs {{\n      filter: {};\n    }}\n", filter));
    }
    css.push_str(&format!(
        "    blockquote {{\n      border-left: 4px solid {};\n      color: {};\n    }}\n",
        theme.blockquote_border, theme.blockquote_color
    ));
    if let Some(color) = theme.link_color {
        css.push_str(&format!("    a {{\n      color: {};\n    }}\n", color));
    }
    css
}

/// The full stylesheet for a theme: shared rules coloured by the theme, then its overrides.
pub fn theme_styles(theme: &Theme) -> String {
    let mut css = BASE_STYLES
        .replace("@bg@", theme.background_color)
        .replace("@text@", theme.text_color)
        .replace("@border@", theme.blockquote_border)
        .replace("@code-bg@", theme.code_background)
        .replace("@pre-bg@", theme.pre_background);
    css.push_str(&theme_overrides(theme));
    css
}
