//! Single-pass, top-to-bottom receipt layout.
//!
//! A cursor walks down the page while sections are emitted in a fixed order.
//! Wrapped blocks advance it by one line height per line, so the final height
//! depends on the content.

use super::dashed::{DashPattern, dashed_rect};
use super::document::{Document, DrawOp, Font, LineOp, Page, Point, TextOp};
use super::metrics::text_width;
use super::wrap::wrap_text;
use crate::domain::format::{format_currency, format_date, format_naive_date};
use crate::domain::money::Money;
use crate::domain::record::{Contractor, Payment, Provider, ServiceRecord, present};
use crate::domain::tax::TaxBreakdown;
use chrono::NaiveDate;
use tracing::debug;

// A4, millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN_LEFT: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = 170.0;
pub const RIGHT_EDGE: f32 = MARGIN_LEFT + CONTENT_WIDTH;
/// Monetary values end here.
pub const AMOUNT_X: f32 = 180.0;
pub const CENTER_X: f32 = PAGE_WIDTH / 2.0;
pub const LINE_HEIGHT: f32 = 6.0;
pub const FIRST_BASELINE: f32 = 20.0;
pub const CONTINUATION_TOP: f32 = 30.0;

/// The signature block moves to a new page once the cursor passes this.
pub const SIGNATURE_BREAK_Y: f32 = 250.0;
/// No flowed line is drawn below this.
pub const BOTTOM_LIMIT: f32 = 280.0;
/// The seal box must end above this.
pub const SEAL_BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 10.0;

pub const PROVIDER_SIGNATURE: (f32, f32) = (20.0, 90.0);
pub const CONTRACTOR_SIGNATURE: (f32, f32) = (110.0, 180.0);

pub const SEAL_GAP: f32 = 6.0;
pub const SEAL_HEIGHT: f32 = 20.0;
pub const SEAL_PATTERN: DashPattern = DashPattern { dash: 2.0, gap: 1.5 };

const STROKE_WIDTH: f32 = 0.2;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const LABEL_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

const SECTION_GAP: f32 = 12.0;
const HEADING_ADVANCE: f32 = 8.0;

pub const TITLE: &str = "RECIBO DE PAGAMENTO AUTÔNOMO (RPA)";
pub const SEAL_PLACEHOLDER: &str =
    "Espaço reservado para selo ou carimbo de autenticação (Gov.br)";

/// Where the next line goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f32,
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

struct Composer {
    pages: Vec<Page>,
    cursor: LayoutCursor,
    font: Font,
    size: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: LayoutCursor {
                page: 0,
                y: FIRST_BASELINE,
            },
            font: Font::Helvetica,
            size: BODY_SIZE,
        }
    }

    fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    fn new_page(&mut self) {
        debug!(
            page = self.pages.len() + 1,
            from_y = self.cursor.y,
            "starting new page"
        );
        self.pages.push(Page::default());
        self.cursor = LayoutCursor {
            page: self.pages.len() - 1,
            y: CONTINUATION_TOP,
        };
    }

    fn break_if_past(&mut self, limit: f32) {
        if self.cursor.y > limit {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.cursor.page].ops.push(op);
    }

    fn text_at(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let width = text_width(text, self.font, self.size);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push(DrawOp::Text(TextOp {
            x,
            y,
            text: text.to_string(),
            font: self.font,
            size: self.size,
        }));
    }

    /// Draws one flowed line at the cursor.
    fn text(&mut self, text: &str, x: f32, align: Align) {
        self.break_if_past(BOTTOM_LIMIT);
        let y = self.cursor.y;
        self.text_at(text, x, y, align);
    }

    fn next_line(&mut self, text: &str) {
        self.advance(LINE_HEIGHT);
        self.text(text, MARGIN_LEFT, Align::Left);
    }

    /// Wrapped text starting at the cursor; leaves the cursor one line below
    /// the last line.
    fn paragraph(&mut self, text: &str) {
        let lines = wrap_text(text, CONTENT_WIDTH, self.font, self.size);
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                self.advance(LINE_HEIGHT);
            }
            self.text(line, MARGIN_LEFT, Align::Left);
        }
        self.advance(LINE_HEIGHT);
    }

    fn horizontal_line(&mut self, (from_x, to_x): (f32, f32)) {
        let y = self.cursor.y;
        self.push(DrawOp::Line(LineOp {
            from: Point::new(from_x, y),
            to: Point::new(to_x, y),
            width: STROKE_WIDTH,
        }));
    }

    fn section(&mut self, title: &str, gap: f32) {
        self.advance(gap);
        // A heading never ends a page; its first line must fit below it.
        if self.cursor.y + HEADING_ADVANCE > BOTTOM_LIMIT {
            self.new_page();
        }
        self.set_font(Font::HelveticaBold, HEADING_SIZE);
        self.text(title, MARGIN_LEFT, Align::Left);
        self.advance(HEADING_ADVANCE);
        self.set_font(Font::Helvetica, BODY_SIZE);
    }

    fn amount_row(&mut self, label: &str, value: Money) {
        self.text(label, MARGIN_LEFT, Align::Left);
        self.text(&format_currency(value), AMOUNT_X, Align::Right);
    }

    fn finish(self, title: String) -> Document {
        Document {
            title,
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            pages: self.pages,
        }
    }
}

/// Lays out the full receipt for `record`.
///
/// Never fails: blank required fields print as blank values and absent
/// optional fields are skipped.
pub fn layout_receipt(
    record: &ServiceRecord,
    breakdown: &TaxBreakdown,
    issued_on: NaiveDate,
) -> Document {
    let mut composer = Composer::new();

    header(&mut composer, issued_on);
    provider_block(&mut composer, &record.provider);
    contractor_block(&mut composer, &record.contractor);
    service_block(&mut composer, record);
    values_block(&mut composer, record, breakdown);
    payment_block(&mut composer, &record.payment);
    if let Some(observations) = present(&record.observations) {
        composer.section("OBSERVAÇÕES", SECTION_GAP);
        composer.paragraph(observations);
    }
    signature_block(&mut composer);
    footer(&mut composer, record);
    seal_box(&mut composer);

    debug!(
        pages = composer.pages.len(),
        final_y = composer.cursor.y,
        "receipt laid out"
    );
    composer.finish(format!("RPA - {}", record.provider.name.trim()))
}

fn header(composer: &mut Composer, issued_on: NaiveDate) {
    composer.set_font(Font::HelveticaBold, TITLE_SIZE);
    composer.text(TITLE, CENTER_X, Align::Center);
    composer.advance(15.0);
    composer.set_font(Font::Helvetica, BODY_SIZE);
    composer.text(
        &format!("Emitido em: {}", format_naive_date(issued_on)),
        CENTER_X,
        Align::Center,
    );
}

fn provider_block(composer: &mut Composer, provider: &Provider) {
    composer.section("DADOS DO PRESTADOR DE SERVIÇO", 15.0);
    composer.text(
        &format!("Nome: {}", provider.name),
        MARGIN_LEFT,
        Align::Left,
    );
    composer.next_line(&format!("CPF: {}", provider.document));
    composer.next_line(&format!("Endereço: {}", provider.address));

    if let Some(email) = present(&provider.email) {
        composer.next_line(&format!("E-mail: {email}"));
    }
    if let Some(phone) = present(&provider.phone) {
        composer.next_line(&format!("Telefone: {phone}"));
    }
    if let Some(line) = bank_line(provider) {
        composer.next_line(&line);
    }
    if let Some(pix_key) = present(&provider.pix_key) {
        composer.next_line(&format!("Chave Pix: {pix_key}"));
    }
}

/// `Banco: X | Ag: Y | Conta: Z (Tipo)`, only when a bank is given.
pub fn bank_line(provider: &Provider) -> Option<String> {
    let bank = present(&provider.bank)?;
    let mut line = format!("Banco: {bank}");
    if let Some(branch) = present(&provider.branch) {
        line.push_str(&format!(" | Ag: {branch}"));
    }
    if let Some(account) = present(&provider.account) {
        line.push_str(&format!(" | Conta: {account}"));
    }
    if let Some(account_type) = provider.account_type {
        line.push_str(&format!(" ({})", account_type.label()));
    }
    Some(line)
}

fn contractor_block(composer: &mut Composer, contractor: &Contractor) {
    composer.section("DADOS DO TOMADOR DE SERVIÇO", SECTION_GAP);
    composer.text(
        &format!("Nome/Razão Social: {}", contractor.name),
        MARGIN_LEFT,
        Align::Left,
    );
    composer.next_line(&format!("CNPJ/CPF: {}", contractor.document));
    composer.next_line(&format!("Endereço: {}", contractor.address));
    if let Some(email) = present(&contractor.email) {
        composer.next_line(&format!("E-mail: {email}"));
    }
}

fn service_block(composer: &mut Composer, record: &ServiceRecord) {
    let service = &record.service;
    composer.section("DESCRIÇÃO DO SERVIÇO", SECTION_GAP);
    composer.paragraph(&service.description);
    composer.next_line(&format!("Data da Prestação: {}", format_date(&service.date)));
    composer.next_line(&format!("Local: {}", service.location));
}

fn values_block(composer: &mut Composer, record: &ServiceRecord, breakdown: &TaxBreakdown) {
    composer.section("DETALHAMENTO DOS VALORES", SECTION_GAP);
    composer.amount_row("Valor Bruto:", breakdown.gross_value);
    composer.advance(LINE_HEIGHT);
    composer.amount_row("(-) INSS (11%):", breakdown.inss);
    composer.advance(LINE_HEIGHT);
    composer.amount_row(
        &format!("(-) ISS ({}%):", record.service.iss_percent.normalize()),
        breakdown.iss,
    );
    composer.advance(LINE_HEIGHT);
    composer.amount_row("(-) IRRF:", breakdown.irrf);

    composer.advance(8.0);
    composer.set_font(Font::HelveticaBold, BODY_SIZE);
    composer.amount_row("Valor Líquido:", breakdown.net_value);
}

fn payment_block(composer: &mut Composer, payment: &Payment) {
    composer.section("FORMA DE PAGAMENTO", SECTION_GAP);
    composer.text(
        &format!("Valor Pago: {}", format_currency(payment.amount)),
        MARGIN_LEFT,
        Align::Left,
    );
    composer.next_line(&format!("Data: {}", format_date(&payment.date)));
    composer.next_line(&format!("Método: {}", payment.method));
    if let Some(note) = present(&payment.note) {
        composer.advance(LINE_HEIGHT);
        composer.paragraph(&format!("Obs: {note}"));
    }
}

fn signature_block(composer: &mut Composer) {
    composer.advance(20.0);
    composer.break_if_past(SIGNATURE_BREAK_Y);

    composer.horizontal_line(PROVIDER_SIGNATURE);
    composer.horizontal_line(CONTRACTOR_SIGNATURE);

    composer.advance(5.0);
    composer.set_font(Font::Helvetica, LABEL_SIZE);
    let centre = |(from, to): (f32, f32)| (from + to) / 2.0;
    composer.text("Assinatura do Prestador", centre(PROVIDER_SIGNATURE), Align::Center);
    composer.text("Assinatura do Tomador", centre(CONTRACTOR_SIGNATURE), Align::Center);
}

fn footer(composer: &mut Composer, record: &ServiceRecord) {
    composer.advance(15.0);
    composer.set_font(Font::Helvetica, FOOTER_SIZE);
    composer.text(
        &format!(
            "Local e data: {}, {}",
            record.service.location,
            format_date(&record.payment.date)
        ),
        CENTER_X,
        Align::Center,
    );
}

fn seal_box(composer: &mut Composer) {
    composer.advance(SEAL_GAP);
    if composer.cursor.y + SEAL_HEIGHT > SEAL_BOTTOM_LIMIT {
        composer.new_page();
    }

    let top = composer.cursor.y;
    for dash in dashed_rect(
        Point::new(MARGIN_LEFT, top),
        CONTENT_WIDTH,
        SEAL_HEIGHT,
        SEAL_PATTERN,
        STROKE_WIDTH,
    ) {
        composer.push(DrawOp::Line(dash));
    }

    composer.set_font(Font::Helvetica, LABEL_SIZE);
    // Half the cap height of Helvetica, so the text sits on the box's centre line.
    let half_cap = 0.718 * LABEL_SIZE / super::metrics::PT_PER_MM / 2.0;
    composer.text_at(
        SEAL_PLACEHOLDER,
        CENTER_X,
        top + SEAL_HEIGHT / 2.0 + half_cap,
        Align::Center,
    );
    composer.advance(SEAL_HEIGHT);
}
