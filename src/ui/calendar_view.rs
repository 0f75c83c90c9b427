use crate::calc::{ViewMode, ViewSelection};
use crate::data::{FetchOutcome, HolidayCache, HolidayFetcher, HolidayTransport};
use crate::render::view_model::{CellStyle, MonthBlock, Notice, PageModel, LEGEND, SUBTITLE, TITLE};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::time::{Duration as StdDuration, Instant};

use super::Tui;

// Each day column is 4 chars wide, so a month block is 28.
const MONTH_WIDTH: u16 = 28;
const GAP_WIDTH: u16 = 4;
// header + day names, before the week rows
const MONTH_HEADER_ROWS: u16 = 2;

const TODAY_BG: Color = Color::Rgb(118, 75, 162);
const HOLIDAY_BG: Color = Color::Rgb(255, 107, 107);
const WEEKEND_BG: Color = Color::Rgb(255, 234, 167);
const HEADER_BG: Color = Color::Rgb(102, 126, 234);

pub struct App<T: HolidayTransport> {
    pub selection: ViewSelection,
    fetcher: HolidayFetcher<T>,
    cache: HolidayCache,
    outcome: FetchOutcome,
    page: Option<PageModel>,
    status: Option<String>,
}

impl<T: HolidayTransport> App<T> {
    pub fn new(fetcher: HolidayFetcher<T>, cache: HolidayCache, today: NaiveDate) -> Self {
        let mut app = App {
            selection: ViewSelection::new(today),
            fetcher,
            cache,
            outcome: FetchOutcome::default(),
            page: None,
            status: None,
        };
        app.refresh();
        app
    }

    /// Re-runs fetch (through the cache) and rebuilds the page model.
    fn refresh(&mut self) {
        self.outcome = self
            .cache
            .get_or_fetch(self.selection.year, Instant::now(), &self.fetcher);
        match PageModel::build(&self.selection, &self.outcome) {
            Ok(page) => {
                self.page = Some(page);
                self.status = None;
            }
            Err(e) => {
                log::error!("failed to build calendar: {e}");
                self.page = None;
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn page(&self) -> Option<&PageModel> {
        self.page.as_ref()
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Left => self.selection.shift_year(-1),
            KeyCode::Right => self.selection.shift_year(1),
            KeyCode::Up | KeyCode::Down => {
                self.selection.mode = ViewMode::SpecificMonth;
                let delta = if code == KeyCode::Up { -1 } else { 1 };
                self.selection.shift_month(delta);
            }
            KeyCode::Tab => self.selection.mode = self.selection.mode.next(),
            KeyCode::Char('1') => self.selection.mode = ViewMode::CurrentMonth,
            KeyCode::Char('2') => self.selection.mode = ViewMode::SpecificMonth,
            KeyCode::Char('3') => self.selection.mode = ViewMode::FullYear,
            KeyCode::Char('r') => {
                log::info!("reloading holidays for {}", self.selection.year);
                self.cache.invalidate(self.selection.year);
            }
            _ => return false,
        }
        self.refresh();
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let page = match &self.page {
            Some(p) => p,
            None => {
                let msg = self.status.as_deref().unwrap_or("Memuat...");
                f.render_widget(Paragraph::new(msg), f.area());
                return;
            }
        };

        let rows = page.month_rows();
        let grid_height: u16 = rows.iter().map(|row| row_height(row)).sum();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),           // title + selectors
                Constraint::Length(grid_height), // month grids
                Constraint::Min(5),              // holiday list
                Constraint::Length(1),           // key hints
            ])
            .split(f.area());

        self.render_selectors(f, chunks[0]);
        render_month_rows(f, chunks[1], &rows);
        render_holiday_list(f, chunks[2], page);

        let hints = Paragraph::new(Line::from(Span::styled(
            "←→=tahun  ↑↓=bulan  Tab/1/2/3=tampilan  r=muat ulang  q=keluar",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(hints, chunks[3]);
    }

    fn render_selectors(&self, f: &mut Frame, area: Rect) {
        let sel = &self.selection;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let modes: Vec<Span> = ViewMode::ALL
            .iter()
            .flat_map(|m| {
                let style = if *m == sel.mode {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else {
                    Style::default()
                };
                [Span::styled(format!(" {} ", m.label()), style), Span::raw(" ")]
            })
            .collect();

        let mut selectors = vec![
            Span::styled("Tahun: ", bold),
            Span::raw(format!("◀ {} ▶   ", sel.year)),
            Span::styled("Tampilan: ", bold),
        ];
        selectors.extend(modes);
        if sel.mode == ViewMode::SpecificMonth {
            selectors.push(Span::styled("  Bulan: ", bold));
            selectors.push(Span::raw(crate::calc::grid::month_name(sel.month)));
        }

        let mut legend = vec![Span::styled("Keterangan: ", bold)];
        for (colour, meaning, style) in LEGEND {
            legend.push(Span::styled(format!(" {colour} "), calendar_day_style(style)));
            legend.push(Span::raw(format!(" {meaning}  ")));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(TITLE, bold.add_modifier(Modifier::UNDERLINED)),
                Span::raw("  "),
                Span::styled(SUBTITLE, Style::default().add_modifier(Modifier::ITALIC)),
            ]),
            Line::from(selectors),
            Line::from(legend),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }
}

fn render_month_rows(f: &mut Frame, area: Rect, rows: &[&[MonthBlock]]) {
    let row_rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|row| Constraint::Length(row_height(row))))
        .split(area);

    for (row, rect) in rows.iter().zip(row_rects.iter()) {
        let mut constraints = Vec::new();
        for _ in 0..row.len() {
            constraints.push(Constraint::Length(MONTH_WIDTH));
            constraints.push(Constraint::Length(GAP_WIDTH));
        }
        constraints.push(Constraint::Min(0));
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(*rect);
        for (i, block) in row.iter().enumerate() {
            f.render_widget(Paragraph::new(month_lines(block)), cols[i * 2]);
        }
    }
}

/// Lines one month block occupies: header rows, weeks, and a label line per holiday.
fn block_height(block: &MonthBlock) -> u16 {
    let labels = block
        .weeks
        .iter()
        .flat_map(|w| w.iter())
        .filter(|c| c.label.is_some())
        .count();
    MONTH_HEADER_ROWS + (block.weeks.len() + labels) as u16
}

fn row_height(row: &[MonthBlock]) -> u16 {
    row.iter().map(block_height).max().unwrap_or(0)
}

/// Text lines of one month block: header, day names, then each week followed
/// by the shortened names of its holidays.
pub(crate) fn month_lines(block: &MonthBlock) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:^width$}", block.header, width = MONTH_WIDTH as usize),
            Style::default()
                .fg(Color::White)
                .bg(HEADER_BG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(
            block
                .day_names
                .iter()
                .map(|n| Span::styled(format!("{n:>3} "), Style::default().add_modifier(Modifier::BOLD)))
                .collect::<Vec<_>>(),
        ),
    ];
    for week in &block.weeks {
        let spans: Vec<Span> = week
            .iter()
            .flat_map(|cell| match cell.day {
                Some(day) => [
                    Span::styled(format!("{day:>3}"), calendar_day_style(cell.style)),
                    Span::raw(" "),
                ],
                None => [Span::raw("   "), Span::raw(" ")],
            })
            .collect();
        lines.push(Line::from(spans));

        for cell in week {
            if let (Some(day), Some(label)) = (cell.day, &cell.label) {
                lines.push(Line::from(Span::styled(
                    format!("{day:>3} {label}"),
                    Style::default().fg(HOLIDAY_BG),
                )));
            }
        }
    }
    lines
}

fn render_holiday_list(f: &mut Frame, area: Rect, page: &PageModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", page.list_title));

    if let Some(notice) = &page.notice {
        let (text, color) = match notice {
            Notice::Warning(t) => (t.as_str(), Color::Yellow),
            Notice::Info(t) => (t.as_str(), Color::Cyan),
        };
        let p = Paragraph::new(Line::from(Span::styled(text.to_string(), Style::default().fg(color))))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Tanggal").style(bold),
        Cell::from("Hari").style(bold),
        Cell::from("Nama").style(bold),
    ]);
    let rows: Vec<Row> = page
        .holidays
        .iter()
        .map(|h| {
            Row::new(vec![
                Cell::from(h.date_text.clone()),
                Cell::from(h.weekday),
                Cell::from(h.name.clone()).style(Style::default().fg(HOLIDAY_BG)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

/// Terminal style for a calendar cell.
pub(crate) fn calendar_day_style(style: CellStyle) -> Style {
    match style {
        CellStyle::Today => Style::default()
            .fg(Color::White)
            .bg(TODAY_BG)
            .add_modifier(Modifier::BOLD),
        CellStyle::Holiday => Style::default().fg(Color::White).bg(HOLIDAY_BG),
        CellStyle::Weekend => Style::default().fg(Color::Black).bg(WEEKEND_BG),
        CellStyle::Normal | CellStyle::Empty => Style::default(),
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app<T: HolidayTransport>(terminal: &mut Tui, app: &mut App<T>) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fetcher::tests::{StubTransport, AUGUST_2025};
    use crate::render::view_model::format_date;
    use ratatui::{backend::TestBackend, Terminal};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_app(transport: &StubTransport, today: NaiveDate) -> App<&StubTransport> {
        let fetcher = HolidayFetcher::new("https://example.test/api", transport);
        App::new(fetcher, HolidayCache::default(), today)
    }

    fn press(app: &mut App<&StubTransport>, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_fetches_once_and_shows_current_month() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let app = make_app(&transport, d(2025, 8, 5));
        assert_eq!(transport.calls.get(), 1);
        let page = app.page().unwrap();
        assert_eq!(page.months.len(), 1);
        assert_eq!(page.months[0].header, "Agustus 2025");
        assert_eq!(page.holidays.len(), 1);
    }

    #[test]
    fn test_mode_switches_reuse_cache() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page().unwrap().months.len(), 12);
        assert_eq!(app.page().unwrap().holidays.len(), 3);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selection.mode, ViewMode::CurrentMonth);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_year_change_fetches_new_year() {
        let transport = StubTransport::status(200, "[]");
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection.year, 2026);
        assert_eq!(transport.calls.get(), 2);
        assert_eq!(
            transport.last_url.borrow().as_deref(),
            Some("https://example.test/api?year=2026")
        );
        press(&mut app, KeyCode::Left);
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_year_is_clamped_to_window() {
        let transport = StubTransport::status(200, "[]");
        let mut app = make_app(&transport, d(2025, 8, 5));
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selection.year, 2023);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selection.year, 2029);
    }

    #[test]
    fn test_arrow_month_switches_to_specific_month() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selection.mode, ViewMode::SpecificMonth);
        assert_eq!(app.selection.month, 9);
        assert_eq!(app.page().unwrap().months[0].header, "September 2025");
    }

    #[test]
    fn test_reload_bypasses_cache() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let transport = StubTransport::status(200, "[]");
        let mut app = make_app(&transport, d(2025, 8, 5));
        assert!(!press(&mut app, KeyCode::Char('x')));
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_failed_fetch_still_renders_calendar() {
        let transport = StubTransport::status(503, "");
        let app = make_app(&transport, d(2025, 8, 5));
        let page = app.page().unwrap();
        assert_eq!(page.months.len(), 1);
        assert!(matches!(page.notice, Some(Notice::Warning(_))));
    }

    #[test]
    fn test_month_lines_layout() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let app = make_app(&transport, d(2025, 8, 5));
        let lines = month_lines(&app.page().unwrap().months[0]);
        // 6 weeks plus one label line for the 17th
        assert_eq!(lines.len(), 9);
        let first_week: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first_week, format!("{}  1   2 ", " ".repeat(20)));
        let texts: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        // the label sits right under the week holding the 17th (4th week)
        assert_eq!(texts[6], " 17 Hari Kemerdekaan ...");
    }

    #[test]
    fn test_day_styles() {
        assert_eq!(
            calendar_day_style(CellStyle::Holiday),
            Style::default().fg(Color::White).bg(HOLIDAY_BG)
        );
        assert_eq!(calendar_day_style(CellStyle::Normal), Style::default());
        assert_eq!(calendar_day_style(CellStyle::Empty), Style::default());
    }

    #[test]
    fn test_render_draws_into_test_backend() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Char('3'));
        let mut terminal = Terminal::new(TestBackend::new(140, 120)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Januari 2025"));
        assert!(text.contains("Desember 2025"));
        assert!(text.contains(&format_date(d(2025, 8, 17))));
    }

    #[test]
    fn test_grid_shows_shortened_holiday_name() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 1, 2));
        press(&mut app, KeyCode::Char('2'));
        for _ in 0..7 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selection.month, 8);
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("17 Hari Kemerdekaan ..."));
    }

    #[test]
    fn test_row_height_follows_tallest_block() {
        let transport = StubTransport::status(200, AUGUST_2025);
        let mut app = make_app(&transport, d(2025, 8, 5));
        press(&mut app, KeyCode::Char('3'));
        let page = app.page().unwrap();
        let rows = page.month_rows();
        // Jan-Mar: January has 5 weeks and one holiday, March has 6 weeks
        assert_eq!(row_height(rows[0]), 2 + 6);
        // Jul-Sep: August has 6 weeks plus one label
        assert_eq!(row_height(rows[2]), 2 + 6 + 1);
    }
}
