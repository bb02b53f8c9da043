//! Paginated setup report.
//!
//! The report is a page model: headings, text lines, legend entries and
//! floor plans, already split into pages. Rendering to a concrete document
//! format is left to the caller; [`Report::to_text`] gives a plain-text
//! rendition.

use super::vector::{vector_drawing, VectorDrawing};
use crate::conflicts::{Conflict, ConflictKind, ConflictSubject};
use crate::model::{Assignment, Guest, LayoutSnapshot};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use venuekit_core::{format_length, AreaKind, ExportError, MeasurementSystem, Scope, TableType};
use venuekit_settings::{ExportSettings, Language, Orientation};

/// Smallest page that still fits a heading and a line.
const MIN_LINES_PER_PAGE: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub language: Language,
    pub orientation: Orientation,
    pub units: MeasurementSystem,
    pub title: Option<String>,
    /// Overrides the orientation's page height, in lines.
    pub lines_per_page: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ExportSettings::default())
    }
}

impl From<&ExportSettings> for ReportOptions {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            language: settings.language,
            orientation: settings.orientation,
            units: settings.units,
            title: None,
            lines_per_page: None,
        }
    }
}

impl ReportOptions {
    fn page_lines(&self) -> Result<usize, ExportError> {
        let lines = self
            .lines_per_page
            .unwrap_or_else(|| self.orientation.lines_per_page());
        if lines < MIN_LINES_PER_PAGE {
            return Err(ExportError::InvalidPageLayout {
                reason: format!("{} lines per page, need at least {}", lines, MIN_LINES_PER_PAGE),
            });
        }
        Ok(lines)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBlock {
    Heading(String),
    Line(String),
    Bullet(String),
    Legend { color: &'static str, label: String },
    /// A floor plan; always fills a page on its own.
    Plan { caption: String, drawing: VectorDrawing },
}

impl ReportBlock {
    fn lines(&self, page_lines: usize) -> usize {
        match self {
            Self::Heading(_) => 2,
            Self::Line(_) | Self::Bullet(_) | Self::Legend { .. } => 1,
            Self::Plan { .. } => page_lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    pub number: usize,
    pub blocks: Vec<ReportBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub language: Language,
    pub orientation: Orientation,
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<ReportPage>,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &ReportBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Plain-text rendition, pages separated by form feeds.
    pub fn to_text(&self) -> String {
        let page_word = tr(self.language, Key::Page);
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
            }
            for block in &page.blocks {
                match block {
                    ReportBlock::Heading(text) => {
                        out.push_str(text);
                        out.push('\n');
                        out.push_str(&"=".repeat(text.chars().count()));
                        out.push('\n');
                    }
                    ReportBlock::Line(text) => {
                        out.push_str(text);
                        out.push('\n');
                    }
                    ReportBlock::Bullet(text) => {
                        out.push_str("  - ");
                        out.push_str(text);
                        out.push('\n');
                    }
                    ReportBlock::Legend { color, label } => {
                        out.push_str(&format!("  [{}] {}\n", color, label));
                    }
                    ReportBlock::Plan { caption, drawing } => {
                        out.push_str(&format!("[{}: {} shapes]\n", caption, drawing.shapes.len()));
                    }
                }
            }
            out.push_str(&format!("\n{} {}/{}\n", page_word, page.number, self.pages.len()));
        }
        out
    }
}

/// Layout data the report reads.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub ceremony: &'a LayoutSnapshot,
    pub banquet: &'a LayoutSnapshot,
    pub guests: &'a [Guest],
    pub ceremony_conflicts: &'a [Conflict],
    pub banquet_conflicts: &'a [Conflict],
}

pub fn build_report(input: &ReportInput<'_>, options: &ReportOptions) -> Result<Report, ExportError> {
    let page_lines = options.page_lines()?;
    let lang = options.language;
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| tr(lang, Key::Title).to_string());
    let generated_at = Utc::now();

    let mut blocks = vec![
        ReportBlock::Heading(title.clone()),
        ReportBlock::Line(format!(
            "{}: {}",
            tr(lang, Key::Generated),
            generated_at.format("%Y-%m-%d %H:%M UTC")
        )),
    ];
    ceremony_section(input, lang, &mut blocks);
    banquet_section(input, lang, &mut blocks);
    zones_section(input, lang, &mut blocks);
    legend_section(input, lang, &mut blocks);
    conflicts_section(input, lang, &mut blocks);
    setup_section(input, options, &mut blocks);

    let pages = paginate(blocks, page_lines);
    tracing::debug!("Report '{}' laid out on {} pages", title, pages.len());
    Ok(Report {
        title,
        language: lang,
        orientation: options.orientation,
        generated_at,
        pages,
    })
}

fn ceremony_section(input: &ReportInput<'_>, lang: Language, blocks: &mut Vec<ReportBlock>) {
    blocks.push(ReportBlock::Heading(tr(lang, Key::Ceremony).to_string()));
    let seats = &input.ceremony.seats;
    if seats.is_empty() {
        blocks.push(ReportBlock::Line(tr(lang, Key::NoSeats).to_string()));
    }

    let mut rows: BTreeMap<u32, Vec<&crate::model::Seat>> = BTreeMap::new();
    for seat in seats.iter().filter(|s| s.enabled) {
        rows.entry(seat.row).or_default().push(seat);
    }
    for (row, row_seats) in rows {
        let occupied = row_seats
            .iter()
            .filter(|s| {
                input.guests.iter().any(|g| {
                    g.assignment(Scope::Ceremony) == Some(Assignment::Seat { seat_id: s.id })
                })
            })
            .count();
        let reserved = row_seats.iter().find_map(|s| s.reservation.as_deref());
        let label = match reserved {
            Some(tag) => format!("{} {} ({})", tr(lang, Key::Row), row + 1, tag),
            None => format!("{} {}", tr(lang, Key::Row), row + 1),
        };
        blocks.push(ReportBlock::Line(format!(
            "{}: {}/{} {}",
            label,
            occupied,
            row_seats.len(),
            tr(lang, Key::Occupied)
        )));
    }

    if !input.ceremony.areas.is_empty() || !input.ceremony.tables.is_empty() {
        blocks.push(ReportBlock::Plan {
            caption: tr(lang, Key::Ceremony).to_string(),
            drawing: vector_drawing(input.ceremony),
        });
    }
}

fn banquet_section(input: &ReportInput<'_>, lang: Language, blocks: &mut Vec<ReportBlock>) {
    blocks.push(ReportBlock::Heading(tr(lang, Key::Banquet).to_string()));
    if input.banquet.tables.is_empty() {
        blocks.push(ReportBlock::Line(tr(lang, Key::NoTables).to_string()));
    }
    for table in input.banquet.tables.iter().filter(|t| t.enabled) {
        let seated: Vec<&Guest> = input
            .guests
            .iter()
            .filter(|g| g.table_in(Scope::Banquet) == Some(table.id))
            .collect();
        let used: u32 = seated.iter().map(|g| g.party_size()).sum();
        blocks.push(ReportBlock::Line(format!(
            "{} ({}, {} {}): {}/{}{}",
            table.name,
            type_label(lang, table.effective_type()),
            table.seats,
            tr(lang, Key::Seats),
            used,
            table.seats,
            if table.vip { " VIP" } else { "" }
        )));
        for guest in seated {
            if guest.companions > 0 {
                blocks.push(ReportBlock::Bullet(format!("{} +{}", guest.name, guest.companions)));
            } else {
                blocks.push(ReportBlock::Bullet(guest.name.clone()));
            }
        }
    }

    if !input.banquet.areas.is_empty() || !input.banquet.tables.is_empty() {
        blocks.push(ReportBlock::Plan {
            caption: tr(lang, Key::Banquet).to_string(),
            drawing: vector_drawing(input.banquet),
        });
    }
}

fn zones_section(input: &ReportInput<'_>, lang: Language, blocks: &mut Vec<ReportBlock>) {
    blocks.push(ReportBlock::Heading(tr(lang, Key::Zones).to_string()));
    for (scope, snapshot) in [
        (Scope::Ceremony, input.ceremony),
        (Scope::Banquet, input.banquet),
    ] {
        let counts: Vec<String> = [
            AreaKind::Freeform,
            AreaKind::Aisle,
            AreaKind::Obstacle,
            AreaKind::Door,
        ]
        .into_iter()
        .filter_map(|kind| {
            let n = snapshot
                .areas
                .iter()
                .filter(|a| a.enabled && a.kind == kind)
                .count();
            (n > 0).then(|| format!("{} {}", n, area_label(lang, kind)))
        })
        .collect();
        let summary = if counts.is_empty() {
            tr(lang, Key::None).to_string()
        } else {
            counts.join(", ")
        };
        blocks.push(ReportBlock::Line(format!("{}: {}", scope_label(lang, scope), summary)));
    }
}

fn legend_section(input: &ReportInput<'_>, lang: Language, blocks: &mut Vec<ReportBlock>) {
    blocks.push(ReportBlock::Heading(tr(lang, Key::Legend).to_string()));
    let all_tables = input.ceremony.tables.iter().chain(input.banquet.tables.iter());
    let mut types: Vec<TableType> = Vec::new();
    for table in all_tables {
        let t = table.effective_type();
        if !types.contains(&t) {
            types.push(t);
        }
    }
    for t in TableType::ALL.into_iter().filter(|t| types.contains(t)) {
        blocks.push(ReportBlock::Legend {
            color: "#ffffff",
            label: type_label(lang, t).to_string(),
        });
    }
    for (color, kind) in [
        ("#000000", AreaKind::Boundary),
        ("#e0b0b0", AreaKind::Obstacle),
        ("#b0c4e0", AreaKind::Door),
        ("#808080", AreaKind::Aisle),
        ("#40a040", AreaKind::Freeform),
    ] {
        blocks.push(ReportBlock::Legend {
            color,
            label: area_label(lang, kind).to_string(),
        });
    }
    blocks.push(ReportBlock::Legend {
        color: "#d4af37",
        label: "VIP".to_string(),
    });
}

fn conflicts_section(input: &ReportInput<'_>, lang: Language, blocks: &mut Vec<ReportBlock>) {
    blocks.push(ReportBlock::Heading(tr(lang, Key::Conflicts).to_string()));
    if input.ceremony_conflicts.is_empty() && input.banquet_conflicts.is_empty() {
        blocks.push(ReportBlock::Line(tr(lang, Key::NoConflicts).to_string()));
        return;
    }
    for (scope, conflicts) in [
        (Scope::Ceremony, input.ceremony_conflicts),
        (Scope::Banquet, input.banquet_conflicts),
    ] {
        for conflict in conflicts {
            let subject = match conflict.subject {
                ConflictSubject::Table(id) => format!("{} {}", tr(lang, Key::Table), id),
                ConflictSubject::Seat(id) => format!("{} {}", tr(lang, Key::Seat), id),
            };
            blocks.push(ReportBlock::Bullet(format!(
                "{} / {} / {}: {}",
                scope_label(lang, scope),
                conflict_label(lang, conflict.kind),
                subject,
                conflict.message
            )));
        }
    }
}

fn setup_section(input: &ReportInput<'_>, options: &ReportOptions, blocks: &mut Vec<ReportBlock>) {
    let lang = options.language;
    let units = options.units;
    let venue = &input.banquet.settings.venue;
    blocks.push(ReportBlock::Heading(tr(lang, Key::Setup).to_string()));
    blocks.push(ReportBlock::Bullet(format!(
        "{}: {} x {}",
        tr(lang, Key::SetupFloor),
        format_length(venue.width, units),
        format_length(venue.height, units)
    )));
    blocks.push(ReportBlock::Bullet(format!(
        "{}: {}",
        tr(lang, Key::SetupAisle),
        format_length(venue.min_aisle, units)
    )));

    let seats = input.ceremony.seats.iter().filter(|s| s.enabled).count();
    if seats > 0 {
        let rows = input
            .ceremony
            .seats
            .iter()
            .map(|s| s.row)
            .max()
            .map_or(0, |r| r + 1);
        let vip = input
            .ceremony
            .seats
            .iter()
            .filter(|s| s.enabled && s.is_reserved())
            .count();
        blocks.push(ReportBlock::Bullet(format!(
            "{}: {} / {} {}",
            tr(lang, Key::SetupChairs),
            seats,
            rows,
            tr(lang, Key::Rows)
        )));
        if vip > 0 {
            blocks.push(ReportBlock::Bullet(format!("{}: {}", tr(lang, Key::SetupReserved), vip)));
        }
    }

    let tables = input.banquet.tables.iter().filter(|t| t.enabled).count();
    if tables > 0 {
        blocks.push(ReportBlock::Bullet(format!("{}: {}", tr(lang, Key::SetupTables), tables)));
    }
}

/// Splits blocks into pages. Headings never end a page and plans take a
/// page of their own.
fn paginate(blocks: Vec<ReportBlock>, page_lines: usize) -> Vec<ReportPage> {
    let mut pages: Vec<ReportPage> = Vec::new();
    let mut current: Vec<ReportBlock> = Vec::new();
    let mut used = 0;

    for block in blocks {
        let cost = block.lines(page_lines);
        let keep_with_next = matches!(block, ReportBlock::Heading(_));
        let needed = if keep_with_next { cost + 1 } else { cost };
        if !current.is_empty() && used + needed > page_lines {
            pages.push(ReportPage {
                number: pages.len() + 1,
                blocks: std::mem::take(&mut current),
            });
            used = 0;
        }
        used += cost;
        current.push(block);
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(ReportPage {
            number: pages.len() + 1,
            blocks: current,
        });
    }
    pages
}

#[derive(Debug, Clone, Copy)]
enum Key {
    Title,
    Generated,
    Ceremony,
    Banquet,
    Row,
    Rows,
    Seat,
    Seats,
    Table,
    Occupied,
    NoSeats,
    NoTables,
    Zones,
    None,
    Legend,
    Conflicts,
    NoConflicts,
    Setup,
    SetupFloor,
    SetupAisle,
    SetupChairs,
    SetupReserved,
    SetupTables,
    Page,
}

fn tr(lang: Language, key: Key) -> &'static str {
    match lang {
        Language::En => match key {
            Key::Title => "Venue Setup Report",
            Key::Generated => "Generated",
            Key::Ceremony => "Ceremony",
            Key::Banquet => "Banquet",
            Key::Row => "Row",
            Key::Rows => "rows",
            Key::Seat => "Seat",
            Key::Seats => "seats",
            Key::Table => "Table",
            Key::Occupied => "occupied",
            Key::NoSeats => "No seats placed",
            Key::NoTables => "No tables placed",
            Key::Zones => "Drawn Zones",
            Key::None => "none",
            Key::Legend => "Legend",
            Key::Conflicts => "Conflicts",
            Key::NoConflicts => "No conflicts",
            Key::Setup => "Setup Instructions",
            Key::SetupFloor => "Mark out the floor",
            Key::SetupAisle => "Keep aisles at least",
            Key::SetupChairs => "Set out ceremony chairs",
            Key::SetupReserved => "Reserved chairs to label",
            Key::SetupTables => "Banquet tables to place",
            Key::Page => "Page",
        },
        Language::Es => match key {
            Key::Title => "Informe de montaje del salón",
            Key::Generated => "Generado",
            Key::Ceremony => "Ceremonia",
            Key::Banquet => "Banquete",
            Key::Row => "Fila",
            Key::Rows => "filas",
            Key::Seat => "Silla",
            Key::Seats => "plazas",
            Key::Table => "Mesa",
            Key::Occupied => "ocupadas",
            Key::NoSeats => "Sin sillas colocadas",
            Key::NoTables => "Sin mesas colocadas",
            Key::Zones => "Zonas dibujadas",
            Key::None => "ninguna",
            Key::Legend => "Leyenda",
            Key::Conflicts => "Conflictos",
            Key::NoConflicts => "Sin conflictos",
            Key::Setup => "Instrucciones de montaje",
            Key::SetupFloor => "Marcar el suelo",
            Key::SetupAisle => "Pasillos de al menos",
            Key::SetupChairs => "Colocar sillas de ceremonia",
            Key::SetupReserved => "Sillas reservadas a señalar",
            Key::SetupTables => "Mesas de banquete a colocar",
            Key::Page => "Página",
        },
    }
}

fn scope_label(lang: Language, scope: Scope) -> &'static str {
    match scope {
        Scope::Ceremony => tr(lang, Key::Ceremony),
        Scope::Banquet => tr(lang, Key::Banquet),
    }
}

fn type_label(lang: Language, table_type: TableType) -> &'static str {
    match (lang, table_type) {
        (Language::En, TableType::Round) => "round",
        (Language::En, TableType::Square) => "square",
        (Language::En, TableType::Imperial) => "imperial",
        (Language::En, TableType::Cocktail) => "cocktail",
        (Language::En, TableType::Auxiliary) => "auxiliary",
        (Language::Es, TableType::Round) => "redonda",
        (Language::Es, TableType::Square) => "cuadrada",
        (Language::Es, TableType::Imperial) => "imperial",
        (Language::Es, TableType::Cocktail) => "cóctel",
        (Language::Es, TableType::Auxiliary) => "auxiliar",
    }
}

fn area_label(lang: Language, kind: AreaKind) -> &'static str {
    match (lang, kind) {
        (Language::En, AreaKind::Boundary) => "boundary",
        (Language::En, AreaKind::Obstacle) => "obstacle",
        (Language::En, AreaKind::Door) => "door",
        (Language::En, AreaKind::Aisle) => "aisle",
        (Language::En, AreaKind::Freeform) => "freeform",
        (Language::Es, AreaKind::Boundary) => "perímetro",
        (Language::Es, AreaKind::Obstacle) => "obstáculo",
        (Language::Es, AreaKind::Door) => "puerta",
        (Language::Es, AreaKind::Aisle) => "pasillo",
        (Language::Es, AreaKind::Freeform) => "zona libre",
    }
}

fn conflict_label(lang: Language, kind: ConflictKind) -> &'static str {
    match (lang, kind) {
        (Language::En, ConflictKind::Perimeter) => "outside boundary",
        (Language::En, ConflictKind::Obstacle) => "obstacle",
        (Language::En, ConflictKind::Spacing) => "spacing",
        (Language::En, ConflictKind::Overbooking) => "overbooked",
        (Language::Es, ConflictKind::Perimeter) => "fuera del perímetro",
        (Language::Es, ConflictKind::Obstacle) => "obstáculo",
        (Language::Es, ConflictKind::Spacing) => "separación",
        (Language::Es, ConflictKind::Overbooking) => "sobreocupada",
    }
}
