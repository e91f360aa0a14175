use crate::app::App;
use crate::ui::typeset::typeset_lines;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// The episode detail popup, drawn over whichever grid is behind it.
pub fn render_details(app: &App, f: &mut Frame<'_>) {
    let Some(entry) = app.selected_entry() else {
        return;
    };
    let episode = &entry.episode;

    let area = centered_rect(74, 80, f.area());
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(format!(" {} ", episode.title))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let label_style = Style::default().fg(Color::Gray);
    let date = if episode.date.is_empty() {
        "Unknown date"
    } else {
        episode.date.as_str()
    };

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled("Aired: ", label_style),
            Span::styled(date, Style::default().fg(Color::White)),
            Span::styled("   Season: ", label_style),
            Span::styled(episode.season.clone(), Style::default().fg(Color::Cyan)),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Summary",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let summary = if episode.summary.is_empty() {
        "No summary available.".to_string()
    } else {
        episode.summary.clone()
    };
    lines.extend(typeset_lines(&summary).into_iter().map(TextLine::from));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Challenge",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let challenge = episode
        .challenge
        .clone()
        .unwrap_or_else(|| "No challenge recorded.".to_string());
    lines.extend(typeset_lines(&challenge).into_iter().map(TextLine::from));

    if let Some(link) = &episode.link {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("Listen: ", label_style),
            Span::styled(
                link.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Esc: Close",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
