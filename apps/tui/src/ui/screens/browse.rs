use crate::app::App;
use crate::ui::widgets::chrome::{page_layout, render_header, render_shortcuts, render_status};
use crate::ui::widgets::hero::render_hero;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

/// Season-browsing mode: the grid lists each season once with its episode
/// count.
pub fn render_browse(app: &App, f: &mut Frame<'_>) {
    let chunks = page_layout(f);

    render_header(app, f, chunks[0]);
    render_hero(app, f, chunks[1]);
    render_season_grid(app, f, chunks[2]);
    render_status(app, f, chunks[3]);
    render_shortcuts(
        f,
        chunks[4],
        &[
            ("/", "Search"),
            ("↑/↓", "Navigate"),
            ("Enter", "Open season"),
            ("F1", "Help"),
            ("q", "Quit"),
        ],
    );
}

fn render_season_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Seasons")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let seasons = app
        .catalog
        .as_ref()
        .map(crate::catalog::Catalog::seasons)
        .unwrap_or_default();

    if seasons.is_empty() {
        let paragraph = Paragraph::new("")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![Cell::from("Season"), Cell::from("Episodes")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = seasons.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = seasons
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, summary)| {
            let style = if index == app.selected_index {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };

            Row::new(vec![
                Cell::from(summary.label.clone()),
                Cell::from(format!("{} episodes", summary.count)),
            ])
            .style(style)
        });

    let widths = [Constraint::Length(28), Constraint::Length(14)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!("Seasons ({} of {})", app.selected_index + 1, total_rows))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
