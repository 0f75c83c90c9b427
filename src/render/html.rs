use crate::render::view_model::{
    DayCell, MonthBlock, Notice, PageModel, LEGEND, SOURCE_URL, SUBTITLE, TITLE,
};
use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

pub fn write_page(page: &PageModel, path: &Path) -> Result<()> {
    fs::write(path, render_page(page).into_string())
        .with_context(|| format!("failed to write {}", path.display()))
}

pub fn render_page(page: &PageModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="id" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (TITLE) }
                style { (PreEscaped(CSS)) }
            }
            body.main {
                div.page {
                    aside.sidebar {
                        h3 { "Keterangan" }
                        @for (colour, meaning, style) in LEGEND {
                            div.legend-item {
                                span class={ "legend-swatch " (style.css_class().unwrap_or_default()) } {}
                                strong { (colour) } ": " (meaning)
                            }
                        }
                    }
                    main.content {
                        h1 { (TITLE) }
                        p { em { (SUBTITLE) } }
                        @if let Some(title) = &page.section_title {
                            h2 { (title) }
                        }
                        @for row in page.month_rows() {
                            div.month-row {
                                @for block in row {
                                    (render_month(block))
                                }
                            }
                        }
                        hr;
                        h2 { (page.list_title) }
                        @match &page.notice {
                            Some(Notice::Warning(text)) => {
                                div.notice.warning { (text) }
                            }
                            Some(Notice::Info(text)) => {
                                div.notice.info { (text) }
                            }
                            None => {}
                        }
                        @for entry in &page.holidays {
                            div.holiday-list-item {
                                strong { (entry.name) }
                                br;
                                (entry.weekday) ", " (entry.date_text)
                            }
                        }
                        hr;
                        footer.footer {
                            p {
                                "Data hari libur nasional Indonesia dari "
                                a href=(SOURCE_URL) target="_blank" { "API Hari Libur" }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_month(block: &MonthBlock) -> Markup {
    html! {
        div.calendar-container {
            div.month-header { (block.header) }
            div.day-header {
                @for name in block.day_names {
                    div.day-name { (name) }
                }
            }
            div.calendar-grid {
                @for week in &block.weeks {
                    @for cell in week {
                        (render_cell(cell))
                    }
                }
            }
        }
    }
}

fn render_cell(cell: &DayCell) -> Markup {
    let class = match cell.style.css_class() {
        Some(extra) => format!("day-cell {extra}"),
        None => "day-cell".to_string(),
    };
    html! {
        div class=(class) {
            @if let Some(day) = cell.day {
                div.day-number { (day) }
                @if let Some(label) = &cell.label {
                    div.holiday-name { (label) }
                }
            }
        }
    }
}

const CSS: &str = r#"
.main { background-color: #f5f5f5; font-family: sans-serif; margin: 0; }
.page { display: flex; gap: 20px; padding: 20px; }
.sidebar { width: 220px; flex-shrink: 0; }
.content { flex: 1; }
.month-row { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 20px; }
.calendar-container {
    background: white;
    border-radius: 10px;
    padding: 20px;
    box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    margin-bottom: 20px;
}
.month-header {
    text-align: center;
    font-size: 24px;
    font-weight: bold;
    margin-bottom: 20px;
    padding: 15px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    border-radius: 8px;
}
.day-header {
    display: grid;
    grid-template-columns: repeat(7, 1fr);
    gap: 5px;
    margin-bottom: 10px;
    font-weight: bold;
    color: #34495e;
}
.day-name { text-align: center; padding: 10px; background-color: #ecf0f1; border-radius: 5px; }
.calendar-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 5px; }
.day-cell {
    aspect-ratio: 1;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    border: 1px solid #e0e0e0;
    border-radius: 8px;
    padding: 10px;
    background-color: white;
    transition: all 0.3s;
    min-height: 80px;
}
.day-cell:hover { transform: translateY(-2px); box-shadow: 0 4px 8px rgba(0,0,0,0.15); }
.day-number { font-size: 18px; font-weight: bold; margin-bottom: 5px; }
.today { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white !important; font-weight: bold; }
.holiday { background: #ff6b6b; color: white !important; }
.weekend { background-color: #ffeaa7; }
.empty-day { border: none; background-color: transparent; }
.holiday-name { font-size: 10px; text-align: center; margin-top: 5px; line-height: 1.2; }
.holiday-list-item {
    padding: 15px;
    margin: 10px 0;
    background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%);
    color: white;
    border-radius: 8px;
    box-shadow: 0 2px 5px rgba(0,0,0,0.1);
}
.legend-item { margin: 8px 0; }
.legend-swatch { display: inline-block; width: 14px; height: 14px; border-radius: 3px; margin-right: 6px; vertical-align: middle; }
.notice { padding: 12px 16px; border-radius: 8px; margin: 10px 0; }
.notice.warning { background: #fff3cd; color: #856404; }
.notice.info { background: #d1ecf1; color: #0c5460; }
.footer { text-align: center; color: #7f8c8d; padding: 20px; }
"#;
