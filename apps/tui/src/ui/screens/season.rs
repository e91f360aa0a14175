use crate::app::state::ViewMode;
use crate::app::App;
use crate::ui::typeset::typeset;
use crate::ui::widgets::chrome::{page_layout, render_header, render_shortcuts, render_status};
use crate::ui::widgets::hero::render_hero;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

/// Selected-season mode: the grid lists that season's episodes, ascending
/// by id.
pub fn render_season(app: &App, f: &mut Frame<'_>) {
    let chunks = page_layout(f);

    render_header(app, f, chunks[0]);
    render_hero(app, f, chunks[1]);
    render_episode_grid(app, f, chunks[2]);
    render_status(app, f, chunks[3]);
    render_shortcuts(
        f,
        chunks[4],
        &[
            ("/", "Search"),
            ("↑/↓", "Navigate"),
            ("Enter", "Details"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
    );
}

fn render_episode_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    let ViewMode::SeasonView(season) = &app.view else {
        return;
    };
    let Some(catalog) = &app.catalog else {
        return;
    };

    let episodes = catalog.season_episodes(season);

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Title"),
        Cell::from("Date"),
        Cell::from("Summary"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = episodes.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = episodes
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
                Cell::from(entry.episode.date.clone()),
                Cell::from(typeset(&entry.episode.summary).replace('\n', " ")),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(30),
        Constraint::Length(12),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "{season} ({} of {})",
                    (app.selected_index + 1).min(total_rows),
                    total_rows
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
