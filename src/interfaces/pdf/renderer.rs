use crate::domain::ports::DocumentRenderer;
use crate::error::{Result, RpaError};
use crate::layout::metrics::PT_PER_MM;
use crate::layout::{Document, DrawOp, Font, LineOp, TextOp};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const CREATOR: &str = "rpa-receipt";

/// Writes documents as PDF using the standard Helvetica faces, so no font
/// files are embedded.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>> {
        if document.pages.is_empty() {
            return Err(RpaError::RenderError("document has no pages".to_string()));
        }
        check_geometry(document)?;

        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let page_tree_id = alloc();
        let info_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let page_ids: Vec<Ref> = document.pages.iter().map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = document.pages.iter().map(|_| alloc()).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        pdf.document_info(info_id)
            .title(TextStr(&document.title))
            .creator(TextStr(CREATOR));

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let media_box = Rect::new(
            0.0,
            0.0,
            document.width * PT_PER_MM,
            document.height * PT_PER_MM,
        );

        for ((page, page_id), content_id) in document.pages.iter().zip(&page_ids).zip(&content_ids) {
            let mut content = Content::new();
            for op in &page.ops {
                match op {
                    DrawOp::Text(text) => draw_text(&mut content, text, document.height),
                    DrawOp::Line(line) => draw_line(&mut content, line, document.height),
                }
            }
            pdf.stream(*content_id, &content.finish());

            let mut pdf_page = pdf.page(*page_id);
            pdf_page
                .media_box(media_box)
                .parent(page_tree_id)
                .contents(*content_id);
            pdf_page
                .resources()
                .fonts()
                .pair(REGULAR_FONT, regular_id)
                .pair(BOLD_FONT, bold_id);
            pdf_page.finish();
        }

        let bytes = pdf.finish();
        debug!(
            pages = document.pages.len(),
            bytes = bytes.len(),
            "pdf rendered"
        );
        Ok(bytes)
    }
}

fn check_geometry(document: &Document) -> Result<()> {
    let finite = |value: f32| value.is_finite();
    if !finite(document.width) || !finite(document.height) || document.width <= 0.0 || document.height <= 0.0 {
        return Err(RpaError::RenderError(format!(
            "invalid page size {}x{}",
            document.width, document.height
        )));
    }
    for (index, page) in document.pages.iter().enumerate() {
        let valid = page.ops.iter().all(|op| match op {
            DrawOp::Text(text) => finite(text.x) && finite(text.y) && finite(text.size),
            DrawOp::Line(line) => {
                finite(line.from.x) && finite(line.from.y) && finite(line.to.x) && finite(line.to.y)
            }
        });
        if !valid {
            return Err(RpaError::RenderError(format!(
                "non-finite coordinate on page {}",
                index + 1
            )));
        }
    }
    Ok(())
}

fn draw_text(content: &mut Content, text: &TextOp, page_height: f32) {
    let font = match text.font {
        Font::Helvetica => REGULAR_FONT,
        Font::HelveticaBold => BOLD_FONT,
    };
    let encoded = encode_win_ansi(&text.text);
    content.begin_text();
    content.set_font(font, text.size);
    content.next_line(text.x * PT_PER_MM, (page_height - text.y) * PT_PER_MM);
    content.show(Str(&encoded));
    content.end_text();
}

fn draw_line(content: &mut Content, line: &LineOp, page_height: f32) {
    content.set_line_width(line.width * PT_PER_MM);
    content.move_to(line.from.x * PT_PER_MM, (page_height - line.from.y) * PT_PER_MM);
    content.line_to(line.to.x * PT_PER_MM, (page_height - line.to.y) * PT_PER_MM);
    content.stroke();
}

/// Encodes `text` for a font using WinAnsiEncoding. Characters outside the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}
