//! Report composer — lays out an export record as fixed-size pages.
//!
//! # Section order (analysis)
//! title, metadata, tags, summary, key points, quiz, topic outline.
//!
//! # Page-break policy
//! - Every write checks before it is placed (`PageCursor::write`).
//! - Quiz and topic outline headers are preceded by a 100-unit lookahead; if it
//!   fails the header starts a fresh page. Only the header is protected, not the
//!   block that follows it.
//! - After each key point and after each quiz question's options, the post-unit
//!   check runs. Topics get no extra check between a topic and its children.
//!
//! Missing fields never fail a composition: absent values render as placeholders
//! and empty collections skip their section entirely.

use chrono::NaiveDate;
use tracing::debug;

use crate::layout::cursor::PageCursor;
use crate::layout::document::{Document, SectionKind, TextRun};
use crate::layout::font_metrics::{Font, PageGeometry, TextMeasure, BULLET, CHECK_MARK};
use crate::layout::text_flow::TextFlow;
use crate::models::{ComparisonData, ExportRecord, QuizQuestion, ReportData};

// ────────────────────────────────────────────────────────────────────────────
// Layout constants (millimetres, font sizes in points)
// ────────────────────────────────────────────────────────────────────────────

pub const REPORT_FILENAME: &str = "note-analysis-report.pdf";
pub const COMPARISON_FILENAME: &str = "note-comparison-report.pdf";

const REPORT_TITLE: &str = "Smart Note Analysis Report";
const COMPARISON_TITLE: &str = "Smart Note Comparison Report";
const NOT_AVAILABLE: &str = "N/A";
const NO_SUMMARY: &str = "No summary available";
const NO_COMPARISON_SUMMARY: &str = "No comparison summary available";

const TITLE_FONT: Font = Font::bold(20.0);
const DATE_FONT: Font = Font::normal(10.0);
const HEADING_FONT: Font = Font::bold(14.0);
const BODY_FONT: Font = Font::normal(12.0);
const QUESTION_FONT: Font = Font::bold(12.0);
const CHILD_FONT: Font = Font::normal(10.0);

const TITLE_STEP: f32 = 15.0;
const DATE_STEP: f32 = 20.0;
const HEADING_STEP: f32 = 10.0;
const DIFFICULTY_STEP: f32 = 8.0;
const BLOOM_STEP: f32 = 15.0;
const TAGS_STEP: f32 = 15.0;
const SIMILARITY_STEP: f32 = 15.0;
const NOTE_LABEL_STEP: f32 = 7.0;

const SECTION_GAP: f32 = 10.0;
const KEY_POINT_GAP: f32 = 5.0;
const PROMPT_GAP: f32 = 5.0;
const OPTION_GAP: f32 = 3.0;
const QUESTION_GAP: f32 = 8.0;
const TOPIC_GAP: f32 = 5.0;
const NOTE_GAP: f32 = 5.0;

/// Horizontal offset for quiz options and topic children.
const INDENT: f32 = 10.0;
/// Room required below the cursor before a quiz or outline header.
const HEADER_LOOKAHEAD: f32 = 100.0;
/// Characters of each note shown in a comparison export.
const NOTE_EXCERPT_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Quiz labeling
// ────────────────────────────────────────────────────────────────────────────

/// Letter label for an option by position: 0 → "A", 1 → "B", …
///
/// Positions past 25 keep counting up the code points after `Z`; callers are
/// expected to have capped options at 26.
pub fn option_label(index: usize) -> String {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(u32::from(b'A')))
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_else(|| "?".to_string())
}

/// Plain string equality between a derived label and the recorded answer.
pub fn is_correct(label: &str, correct_answer: Option<&str>) -> bool {
    correct_answer == Some(label)
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

/// Composes export records into paginated documents.
///
/// Holds no per-export state; each `compose*` call builds its own cursor and
/// document, so one composer can serve any number of exports.
pub struct ReportComposer<'m> {
    flow: TextFlow<'m>,
    geometry: PageGeometry,
    generated_on: NaiveDate,
}

impl<'m> ReportComposer<'m> {
    pub fn new(measure: &'m dyn TextMeasure, geometry: PageGeometry, generated_on: NaiveDate) -> Self {
        Self {
            flow: TextFlow::new(measure),
            geometry,
            generated_on,
        }
    }

    pub fn compose(&self, record: &ExportRecord) -> Document {
        match record {
            ExportRecord::Analysis(data) => self.compose_report(data),
            ExportRecord::Comparison(data) => self.compose_comparison(data),
        }
    }

    /// Lays out an analysis report.
    pub fn compose_report(&self, data: &ReportData) -> Document {
        let mut c = Composition::new(self, REPORT_FILENAME);

        c.title(REPORT_TITLE, self.generated_on);
        c.metadata(data);
        c.tags(&data.tags);
        c.summary(data.summary.as_deref(), "Summary", NO_SUMMARY);
        c.key_points(&data.key_points);
        c.quiz(&data.quiz_questions);
        c.topic_outline(data);

        c.finish()
    }

    /// Lays out a note comparison.
    pub fn compose_comparison(&self, data: &ComparisonData) -> Document {
        let mut c = Composition::new(self, COMPARISON_FILENAME);

        c.title(COMPARISON_TITLE, self.generated_on);
        c.similarity(data);
        c.summary(
            data.comparison_summary.as_deref(),
            "Comparison Summary",
            NO_COMPARISON_SUMMARY,
        );
        c.compared_notes(data);

        c.finish()
    }
}

/// Per-export state: the cursor and the document under construction.
struct Composition<'c, 'm> {
    composer: &'c ReportComposer<'m>,
    cursor: PageCursor,
    document: Document,
}

impl<'c, 'm> Composition<'c, 'm> {
    fn new(composer: &'c ReportComposer<'m>, filename: &str) -> Self {
        Self {
            composer,
            cursor: PageCursor::new(&composer.geometry),
            document: Document::new(composer.geometry, filename),
        }
    }

    fn finish(mut self) -> Document {
        self.document.ensure_pages(self.cursor.page_index() + 1);
        self.document
    }

    fn left(&self) -> f32 {
        self.composer.geometry.margin
    }

    fn content_width(&self) -> f32 {
        self.composer.geometry.content_width()
    }

    // ── primitive writes ────────────────────────────────────────────────────

    /// One unwrapped line that consumes a fixed `step`.
    fn line(&mut self, text: String, x: f32, font: Font, step: f32, section: SectionKind) {
        let allocation = self.cursor.write(step);
        self.document.push_run(
            allocation,
            TextRun {
                text,
                x,
                y: allocation.y,
                font_size: font.size,
                weight: font.weight,
                section,
            },
        );
    }

    /// Wraps `text` to `max_width` and writes all lines as one block.
    fn block(&mut self, text: &str, x: f32, max_width: f32, font: Font, section: SectionKind) {
        let lines = self.composer.flow.wrap(text, max_width, font);
        let height = TextFlow::block_height(lines.len(), font.size);
        let allocation = self.cursor.write(height);

        for (i, line) in lines.into_iter().enumerate() {
            self.document.push_run(
                allocation,
                TextRun {
                    text: line,
                    x,
                    y: TextFlow::advance(allocation.y, i, font.size),
                    font_size: font.size,
                    weight: font.weight,
                    section,
                },
            );
        }
    }

    fn heading(&mut self, text: &str, section: SectionKind) {
        let x = self.left();
        self.line(text.to_string(), x, HEADING_FONT, HEADING_STEP, section);
    }

    /// Starts a fresh page unless `HEADER_LOOKAHEAD` units remain.
    fn protect_header(&mut self, section: SectionKind) {
        if !self.cursor.reserve(HEADER_LOOKAHEAD) {
            debug!(
                page = self.cursor.page_index(),
                y = self.cursor.y(),
                ?section,
                "Not enough room for section header, starting new page"
            );
            self.cursor.new_page();
        }
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn title(&mut self, title: &str, generated_on: NaiveDate) {
        let x = self.left();
        self.line(title.to_string(), x, TITLE_FONT, TITLE_STEP, SectionKind::Title);
        self.line(
            format!("Generated on: {}", generated_on.format("%-m/%-d/%Y")),
            x,
            DATE_FONT,
            DATE_STEP,
            SectionKind::Title,
        );
    }

    fn metadata(&mut self, data: &ReportData) {
        let x = self.left();
        let difficulty = data.difficulty.map(|d| d.label()).unwrap_or(NOT_AVAILABLE);
        let bloom = match data.bloom_level.as_deref() {
            Some(level) if !level.is_empty() => level,
            _ => NOT_AVAILABLE,
        };

        self.line(
            format!("Difficulty Level: {difficulty}"),
            x,
            BODY_FONT,
            DIFFICULTY_STEP,
            SectionKind::Metadata,
        );
        self.line(
            format!("Bloom's Taxonomy Level: {bloom}"),
            x,
            BODY_FONT,
            BLOOM_STEP,
            SectionKind::Metadata,
        );
    }

    fn tags(&mut self, tags: &[String]) {
        if tags.is_empty() {
            return;
        }
        let x = self.left();
        self.line(
            format!("Tags: {}", tags.join(", ")),
            x,
            BODY_FONT,
            TAGS_STEP,
            SectionKind::Tags,
        );
    }

    fn summary(&mut self, summary: Option<&str>, heading: &str, placeholder: &str) {
        let text = match summary {
            Some(s) if !s.is_empty() => s,
            _ => placeholder,
        };
        self.heading(heading, SectionKind::Summary);
        let (x, width) = (self.left(), self.content_width());
        self.block(text, x, width, BODY_FONT, SectionKind::Summary);
        self.cursor.gap(SECTION_GAP);
    }

    fn key_points(&mut self, points: &[String]) {
        if points.is_empty() {
            return;
        }
        self.heading("Key Points", SectionKind::KeyPoints);
        let (x, width) = (self.left(), self.content_width());

        for (i, point) in points.iter().enumerate() {
            let text = format!("{}. {point}", i + 1);
            self.block(&text, x, width, BODY_FONT, SectionKind::KeyPoints);
            self.cursor.gap(KEY_POINT_GAP);
            self.cursor.settle();
        }
        self.cursor.gap(SECTION_GAP);
    }

    fn quiz(&mut self, questions: &[QuizQuestion]) {
        if questions.is_empty() {
            return;
        }
        self.protect_header(SectionKind::Quiz);
        self.heading("Quiz Questions", SectionKind::Quiz);
        let (x, width) = (self.left(), self.content_width());

        for (i, question) in questions.iter().enumerate() {
            let prompt = format!("Q{}: {}", i + 1, question.question);
            self.block(&prompt, x, width, QUESTION_FONT, SectionKind::Quiz);
            self.cursor.gap(PROMPT_GAP);

            for (j, option) in question.options.iter().enumerate() {
                let label = option_label(j);
                let mark = if is_correct(&label, question.correct_answer.as_deref()) {
                    format!(" {CHECK_MARK}")
                } else {
                    String::new()
                };
                let text = format!("{label}) {option}{mark}");
                self.block(&text, x + INDENT, width - INDENT, BODY_FONT, SectionKind::Quiz);
                self.cursor.gap(OPTION_GAP);
            }

            self.cursor.gap(QUESTION_GAP);
            self.cursor.settle();
        }
    }

    fn topic_outline(&mut self, data: &ReportData) {
        if data.topic_graph.is_empty() {
            return;
        }
        self.protect_header(SectionKind::TopicOutline);
        self.heading("Topic Structure", SectionKind::TopicOutline);
        let (x, width) = (self.left(), self.content_width());

        for topic in &data.topic_graph {
            let text = format!("{BULLET} {}", topic.display_name());
            self.block(&text, x, width, BODY_FONT, SectionKind::TopicOutline);

            for child in &topic.children {
                let text = format!("  - {child}");
                self.block(&text, x + INDENT, width - INDENT, CHILD_FONT, SectionKind::TopicOutline);
            }
            self.cursor.gap(TOPIC_GAP);
        }
    }

    fn similarity(&mut self, data: &ComparisonData) {
        let x = self.left();
        let score = data.similarity_score;
        let score = if score.fract() == 0.0 {
            format!("{score:.0}")
        } else {
            format!("{score:.1}")
        };
        self.line(
            format!("Similarity Score: {score}% ({})", data.band().label()),
            x,
            BODY_FONT,
            SIMILARITY_STEP,
            SectionKind::Similarity,
        );
    }

    fn compared_notes(&mut self, data: &ComparisonData) {
        let notes: Vec<(&str, &str)> = [("Note 1", &data.note1), ("Note 2", &data.note2)]
            .into_iter()
            .filter_map(|(label, note)| note.as_deref().map(|n| (label, n)))
            .filter(|(_, note)| !note.trim().is_empty())
            .collect();
        if notes.is_empty() {
            return;
        }
        self.protect_header(SectionKind::ComparedNotes);
        self.heading("Compared Notes", SectionKind::ComparedNotes);
        let (x, width) = (self.left(), self.content_width());

        for (label, note) in notes {
            self.line(
                label.to_string(),
                x,
                QUESTION_FONT,
                NOTE_LABEL_STEP,
                SectionKind::ComparedNotes,
            );
            self.block(&excerpt(note), x + INDENT, width - INDENT, BODY_FONT, SectionKind::ComparedNotes);
            self.cursor.gap(NOTE_GAP);
        }
    }
}

/// First `NOTE_EXCERPT_CHARS` characters, with an ellipsis when cut.
fn excerpt(note: &str) -> String {
    let note = note.trim();
    match note.char_indices().nth(NOTE_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &note[..cut]),
        None => note.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
