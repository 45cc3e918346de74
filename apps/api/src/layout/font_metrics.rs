//! Static font-metric tables for the two report faces, plus page geometry.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM widths divided by 1000. The report only uses the PDF
//! base-14 faces, so these tables match what a viewer draws without embedding.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Points per millimetre. Font sizes are in points, page geometry in millimetres.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// U+2022, drawn in front of topic outline entries.
pub const BULLET: char = '\u{2022}';
/// U+2713, appended to the correct quiz option.
pub const CHECK_MARK: char = '\u{2713}';

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// A face weight at a point size. Everything the layout engine draws is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    pub const fn normal(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Text-width measurement supplied by the rendering backend.
///
/// Widths are returned in the same units as the page geometry (millimetres).
pub trait TextMeasure: Send + Sync {
    fn measure(&self, text: &str, font: Font) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Fixed per-document page dimensions, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// Width available to a line starting at the left margin.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

/// Returns the geometry for a page size with the report's 20 mm margin.
pub fn page_geometry(size: PageSize) -> PageGeometry {
    let (width, height) = match size {
        PageSize::A4 => (210.0, 297.0),
        PageSize::Letter => (215.9, 279.4),
    };
    PageGeometry {
        width,
        height,
        margin: 20.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters without an explicit entry.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            BULLET => 0.35,
            // ZapfDingbats a19, the glyph the encoder draws for the mark.
            CHECK_MARK => 0.755,
            '\u{00A0}' => self.space_width,
            _ => self.average_char_width,
        }
    }
}

/// Helvetica (regular).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica-Bold.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.584,
    space_width: 0.278,
};

/// Returns the static metric table for a weight.
pub fn get_metrics(weight: FontWeight) -> &'static FontMetricTable {
    match weight {
        FontWeight::Normal => &HELVETICA_TABLE,
        FontWeight::Bold => &HELVETICA_BOLD_TABLE,
    }
}

/// `TextMeasure` backed by the static Helvetica tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFonts;

impl TextMeasure for StandardFonts {
    fn measure(&self, text: &str, font: Font) -> f32 {
        get_metrics(font.weight).measure_em(text) * font.size / PT_PER_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_em_empty_returns_zero() {
        assert_eq!(get_metrics(FontWeight::Normal).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_em_ascii_characters() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = get_metrics(FontWeight::Normal).measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontWeight::Normal);
        let width = metrics.measure_em("é");
        assert!((width - metrics.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_and_check_mark_have_explicit_widths() {
        let metrics = get_metrics(FontWeight::Normal);
        assert!((metrics.measure_em("\u{2022}") - 0.35).abs() < 1e-6);
        assert!((metrics.measure_em("\u{2713}") - 0.755).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_at_least_as_wide_as_regular() {
        let text = "Bloom's Taxonomy Level: Analyze";
        let regular = get_metrics(FontWeight::Normal).measure_em(text);
        let bold = get_metrics(FontWeight::Bold).measure_em(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_standard_fonts_scales_linearly_with_size() {
        let fonts = StandardFonts;
        let small = fonts.measure("Summary", Font::normal(10.0));
        let large = fonts.measure("Summary", Font::normal(20.0));
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_standard_fonts_converts_points_to_millimetres() {
        // 10 spaces at 12pt: 2.78em * 12pt = 33.36pt = 11.769mm
        let width = StandardFonts.measure("          ", Font::normal(12.0));
        assert!((width - 33.36 / PT_PER_MM).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_a4_geometry() {
        let geometry = page_geometry(PageSize::A4);
        assert_eq!(geometry.width, 210.0);
        assert_eq!(geometry.height, 297.0);
        assert_eq!(geometry.margin, 20.0);
        assert_eq!(geometry.content_width(), 170.0);
    }

    #[test]
    fn test_page_size_from_str() {
        assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
        assert_eq!(" letter ".parse::<PageSize>(), Ok(PageSize::Letter));
        assert!("tabloid".parse::<PageSize>().is_err());
    }
}
