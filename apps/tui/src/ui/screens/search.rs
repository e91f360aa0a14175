use crate::app::state::ViewMode;
use crate::app::App;
use crate::ui::typeset::typeset;
use crate::ui::widgets::chrome::{page_layout, render_header, render_shortcuts, render_status};
use crate::ui::widgets::hero::render_hero;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

/// Search mode: the grid lists every match regardless of season, or the
/// no-results message.
pub fn render_search(app: &App, f: &mut Frame<'_>) {
    let chunks = page_layout(f);

    render_header(app, f, chunks[0]);
    render_hero(app, f, chunks[1]);
    render_result_grid(app, f, chunks[2]);
    render_status(app, f, chunks[3]);
    render_shortcuts(
        f,
        chunks[4],
        &[
            ("/", "Edit search"),
            ("↑/↓", "Navigate"),
            ("Enter", "Details"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
    );
}

fn render_result_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    let ViewMode::SearchResults { term, .. } = &app.view else {
        return;
    };

    let block = Block::default()
        .title("Search Results")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let matches = app
        .catalog
        .as_ref()
        .map(|catalog| catalog.search(term))
        .unwrap_or_default();

    if matches.is_empty() {
        let paragraph = Paragraph::new("No programs found.")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Title"),
        Cell::from("Season"),
        Cell::from("Date"),
        Cell::from("Summary"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = matches.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = matches
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, entry)| {
            let style = if index == app.selected_index {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Row::new(vec![
                Cell::from(entry.episode.id.to_string()),
                Cell::from(entry.episode.title.clone()),
                Cell::from(entry.episode.season.clone()),
                Cell::from(entry.episode.date.clone()),
                Cell::from(typeset(&entry.episode.summary).replace('\n', " ")),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(28),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Search Results ({} of {})",
                    (app.selected_index + 1).min(total_rows),
                    total_rows
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
