//! crates/paper_core/src/fonts.rs
//!
//! The static font catalogue.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub id: &'static str,
    pub label: &'static str,
    pub family: &'static str,
    /// `family=` value for the Google Fonts css2 API, for web fonts only.
    pub google_font: Option<&'static str>,
    pub fallback: &'static str,
}

pub const DEFAULT_FONT_FAMILY: &str = "Georgia, serif";

static FONTS: [Font; 12] = [
    Font { id: "serif", label: "Serif", family: "Georgia", google_font: None, fallback: "serif" },
    Font {
        id: "sans",
        label: "Sans Serif",
        family: "-apple-system, BlinkMacSystemFont",
        google_font: None,
        fallback: "sans-serif",
    },
    Font { id: "mono", label: "Monospace", family: "Courier New", google_font: None, fallback: "monospace" },
    Font {
        id: "outfit",
        label: "Outfit",
        family: "Outfit",
        google_font: Some("Outfit:300,400,500,600,700"),
        fallback: "sans-serif",
    },
    Font {
        id: "merriweather",
        label: "Merriweather",
        family: "Merriweather",
        google_font: Some("Merriweather:300,400,700"),
        fallback: "serif",
    },
    Font {
        id: "lora",
        label: "Lora",
        family: "Lora",
        google_font: Some("Lora:400,500,600,700"),
        fallback: "serif",
    },
    Font {
        id: "playfair",
        label: "Playfair Display",
        family: "Playfair Display",
        google_font: Some("Playfair+Display:400,500,600,700"),
        fallback: "serif",
    },
    Font {
        id: "inter",
        label: "Inter",
        family: "Inter",
        google_font: Some("Inter:300,400,500,600,700"),
        fallback: "sans-serif",
    },
    Font {
        id: "roboto",
        label: "Roboto",
        family: "Roboto",
        google_font: Some("Roboto:300,400,500,700"),
        fallback: "sans-serif",
    },
    Font {
        id: "open-sans",
        label: "Open Sans",
        family: "Open Sans",
        google_font: Some("Open+Sans:300,400,500,600,700"),
        fallback: "sans-serif",
    },
    Font {
        id: "jetbrains",
        label: "JetBrains Mono",
        family: "JetBrains Mono",
        google_font: Some("JetBrains+Mono:400,500,600,700"),
        fallback: "monospace",
    },
    Font {
        id: "fira-code",
        label: "Fira Code",
        family: "Fira Code",
        google_font: Some("Fira+Code:400,500,600,700"),
        fallback: "monospace",
    },
];

pub fn all_fonts() -> &'static [Font] {
    &FONTS
}

pub fn font_by_id(id: &str) -> Option<&'static Font> {
    FONTS.iter().find(|font| font.id == id)
}

/// CSS `font-family` value for a font id.
pub fn font_family(id: &str) -> String {
    match font_by_id(id) {
        Some(font) => format!("{}, {}", font.family, font.fallback),
        None => DEFAULT_FONT_FAMILY.to_string(),
    }
}

/// A single Google Fonts stylesheet URL covering every web font in the catalogue.
pub fn google_fonts_url() -> String {
    let families: Vec<&str> = FONTS.iter().filter_map(|font| font.google_font).collect();
    if families.is_empty() {
        return String::new();
    }
    format!(
        "https://fonts.googleapis.com/css2?family={}&display=swap",
        families.join("&family=")
    )
}
