//! The paginated output of a composition: pages of positioned text runs.

use serde::Serialize;

use crate::layout::cursor::Allocation;
use crate::layout::font_metrics::{Font, FontWeight, PageGeometry};

/// Which report block a run belongs to. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Title,
    Metadata,
    Tags,
    Summary,
    KeyPoints,
    Quiz,
    TopicOutline,
    Similarity,
    ComparedNotes,
}

/// One line of text at a fixed position. `y` is the baseline, measured down from the page top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub section: SectionKind,
}

impl TextRun {
    pub fn font(&self) -> Font {
        Font {
            size: self.font_size,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub geometry: PageGeometry,
    /// Suggested download name.
    pub filename: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// A document with a single empty page.
    pub fn new(geometry: PageGeometry, filename: impl Into<String>) -> Self {
        Self {
            geometry,
            filename: filename.into(),
            pages: vec![Page::default()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends a run to the page named by `allocation`, opening pages as needed.
    pub(crate) fn push_run(&mut self, allocation: Allocation, run: TextRun) {
        while self.pages.len() <= allocation.page_index {
            self.pages.push(Page::default());
        }
        self.pages[allocation.page_index].runs.push(run);
    }

    /// Makes sure trailing pages opened by the cursor exist, even if empty.
    pub(crate) fn ensure_pages(&mut self, page_count: usize) {
        while self.pages.len() < page_count {
            self.pages.push(Page::default());
        }
    }

    /// All runs in reading order: by page, then by emission order.
    #[cfg(test)]
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| page.runs.iter())
    }

    /// Run texts in reading order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.runs().map(|run| run.text.as_str()).collect()
    }
}
