//! Static font-metric tables for the two preview font families.
//!
//! Widths come from the Adobe Core 14 AFM files (Helvetica, Times-Roman) in
//! 1/1000 em. Kerning and ligatures are ignored; the estimate is for page-fit
//! warnings, not typesetting.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Points per millimetre (72pt per inch).
const PT_PER_MM: f32 = 72.0 / 25.4;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
pub const DEFAULT_MARGIN_MM: f32 = 15.0;
const DEFAULT_FONT_SIZE_PT: f32 = 11.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.25;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Font families offered by the preview templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Helvetica / Arial metrics.
    #[default]
    Sans,
    /// Times New Roman metrics.
    Serif,
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sans" | "helvetica" | "arial" => Ok(FontFamily::Sans),
            "serif" | "times" => Ok(FontFamily::Serif),
            other => Err(format!("unknown font family '{other}' (expected sans or serif)")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for a single A4 resume page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Applied on all four sides.
    pub margin_mm: f32,
}

impl PageConfig {
    /// A4 portrait at 11pt with uniform margins.
    pub fn a4(font: FontFamily, margin_mm: f32) -> Self {
        Self {
            font,
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            line_height: DEFAULT_LINE_HEIGHT,
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm,
        }
    }

    pub fn with_font(self, font: FontFamily) -> Self {
        Self { font, ..self }
    }

    /// Usable text width in em units at the configured font size.
    ///
    /// A4, 15mm margins, 11pt → 180mm × 2.835pt/mm ÷ 11pt ≈ 46.4em.
    pub fn text_width_em(&self) -> f32 {
        let width_mm = (self.page_width_mm - 2.0 * self.margin_mm).max(0.0);
        width_mm * PT_PER_MM / self.font_size_pt
    }

    /// Total line slots on one page (section headers and gaps included).
    pub fn usable_height_lines(&self) -> u16 {
        let height_pt = (self.page_height_mm - 2.0 * self.margin_mm).max(0.0) * PT_PER_MM;
        let line_pt = self.font_size_pt * self.line_height;
        (height_pt / line_pt).floor() as u16
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4(FontFamily::Sans, DEFAULT_MARGIN_MM)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [u16; 95],
    /// Fallback for non-ASCII characters, in 1/1000 em.
    average_char_width: u16,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to the average character width.
    pub fn measure_str(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_char_width)
                }
            })
            .sum();
        units as f32 / 1000.0
    }

    pub fn space_width(&self) -> f32 {
        f32::from(self.widths[0]) / 1000.0
    }

    /// Estimates how many printed lines this string occupies when word-wrapped at
    /// `max_width_em`. Greedy wrap; a word wider than the line takes as many lines as
    /// its width needs. Blank input takes no lines.
    pub fn estimated_lines(&self, s: &str, max_width_em: f32) -> u16 {
        let mut line_count = 0u16;
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word);
            if line_count == 0 {
                line_count = 1;
            } else if current_width + self.space_width() + word_w <= max_width_em {
                current_width += self.space_width() + word_w;
                continue;
            } else {
                line_count = line_count.saturating_add(1);
            }

            if word_w > max_width_em && max_width_em > 0.0 {
                let extra = (word_w / max_width_em).ceil() as u16 - 1;
                line_count = line_count.saturating_add(extra);
                current_width = word_w % max_width_em;
            } else {
                current_width = word_w;
            }
        }
        line_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Sans,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 540,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Serif,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 480,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Sans => &HELVETICA_TABLE,
        FontFamily::Serif => &TIMES_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Sans).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Sans);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Serif);
        assert!((metrics.measure_str("é") - 0.480).abs() < 1e-4);
    }

    #[test]
    fn test_serif_narrower_than_sans() {
        let text = "Architected distributed caching layer";
        assert!(
            get_metrics(FontFamily::Serif).measure_str(text)
                < get_metrics(FontFamily::Sans).measure_str(text)
        );
    }

    #[test]
    fn test_estimated_lines_blank_is_zero() {
        assert_eq!(get_metrics(FontFamily::Sans).estimated_lines("   ", 40.0), 0);
    }

    #[test]
    fn test_estimated_lines_wraps() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.estimated_lines("Rust", 40.0), 1);
        // "word" is 2.167em; 18 words fit on a 46em line, so 30 words take two lines
        let long = "word ".repeat(30);
        assert_eq!(metrics.estimated_lines(&long, 46.0), 2);
    }

    #[test]
    fn test_estimated_lines_overlong_word() {
        let metrics = get_metrics(FontFamily::Sans);
        // 10 × 'm' = 8.33em on a 4em line → 3 lines
        assert_eq!(metrics.estimated_lines(&"m".repeat(10), 4.0), 3);
    }

    #[test]
    fn test_a4_page_config() {
        let config = PageConfig::default();
        assert_eq!(config.font, FontFamily::Sans);
        let width = config.text_width_em();
        assert!(width > 46.0 && width < 47.0, "got {width}");
        assert_eq!(config.usable_height_lines(), 55);
    }

    #[test]
    fn test_wider_margins_reduce_capacity() {
        let narrow = PageConfig::a4(FontFamily::Sans, 10.0);
        let wide = PageConfig::a4(FontFamily::Sans, 25.0);
        assert!(wide.text_width_em() < narrow.text_width_em());
        assert!(wide.usable_height_lines() < narrow.usable_height_lines());
    }

    #[test]
    fn test_font_family_from_str() {
        assert_eq!("Serif".parse::<FontFamily>().unwrap(), FontFamily::Serif);
        assert_eq!("helvetica".parse::<FontFamily>().unwrap(), FontFamily::Sans);
        assert!("comic".parse::<FontFamily>().is_err());
    }
}
