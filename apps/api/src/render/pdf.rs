//! PDF encoding with `lopdf`.
//!
//! Every page shares one resources dictionary with three base-14 fonts:
//! F1 Helvetica, F2 Helvetica-Bold, F3 ZapfDingbats (for the check mark).
//! Layout coordinates are millimetres measured down from the top edge; PDF user
//! space is points measured up from the bottom edge.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream};

use crate::layout::document::{Document, Page, TextRun};
use crate::layout::font_metrics::{FontWeight, TextMeasure, CHECK_MARK, PT_PER_MM};
use crate::render::RenderError;

const PRODUCER: &str = concat!("note-report ", env!("CARGO_PKG_VERSION"));

/// ZapfDingbats code for glyph a19 (check mark).
const DINGBAT_CHECK: u8 = 0x33;

/// Serializes a composed document to PDF 1.7 bytes.
pub fn encode(document: &Document, measure: &dyn TextMeasure) -> Result<Vec<u8>, RenderError> {
    let mut pdf = PdfDocument::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let dingbats_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ZapfDingbats",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
            "F3" => dingbats_id,
        },
    });

    let width_pt = document.geometry.width * PT_PER_MM;
    let height_pt = document.geometry.height * PT_PER_MM;

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = page_content(page, height_pt, measure);
        let content_id = pdf.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        ));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0_f32.into(), 0.0_f32.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::string_literal(to_win_ansi(&document.filename)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;
    Ok(buffer)
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Builds the content stream operations for one page.
pub(crate) fn page_content(page: &Page, page_height_pt: f32, measure: &dyn TextMeasure) -> Content {
    let mut operations = Vec::new();
    for run in &page.runs {
        draw_run(&mut operations, run, page_height_pt, measure);
    }
    Content { operations }
}

fn draw_run(ops: &mut Vec<Operation>, run: &TextRun, page_height_pt: f32, measure: &dyn TextMeasure) {
    if run.text.trim().is_empty() {
        return;
    }
    let font_name = match run.weight {
        FontWeight::Normal => "F1",
        FontWeight::Bold => "F2",
    };
    let baseline_pt = page_height_pt - run.y * PT_PER_MM;
    let mut x = run.x;

    for (i, segment) in run.text.split(CHECK_MARK).enumerate() {
        if i > 0 {
            show_text(ops, "F3", run.font_size, x, baseline_pt, vec![DINGBAT_CHECK]);
            x += measure.measure(&CHECK_MARK.to_string(), run.font());
        }
        if !segment.is_empty() {
            show_text(ops, font_name, run.font_size, x, baseline_pt, to_win_ansi(segment));
            x += measure.measure(segment, run.font());
        }
    }
}

fn show_text(ops: &mut Vec<Operation>, font: &str, size: f32, x_mm: f32, baseline_pt: f32, bytes: Vec<u8>) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![(x_mm * PT_PER_MM).into(), baseline_pt.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(bytes)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Encodes text for a WinAnsiEncoding font. Unmappable characters become `?`.
pub(crate) fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
