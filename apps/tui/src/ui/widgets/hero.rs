use crate::app::App;
use crate::ui::typeset::typeset;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// The featured latest-episode card. While the fetch is in flight it shows
/// a spinner; on load failure it carries the error message instead, and the
/// rest of the page stays empty.
pub fn render_hero(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Latest Episode ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.loading {
        let paragraph = Paragraph::new(format!(
            "{} Loading catalog...",
            spinner_frame(app.animation_counter)
        ))
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    if let Some(message) = &app.load_error {
        let paragraph = Paragraph::new(message.as_str())
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        f.render_widget(paragraph, area);
        return;
    }

    let Some(latest) = app.catalog.as_ref().and_then(|catalog| catalog.latest()) else {
        // An empty visible set leaves the card blank.
        f.render_widget(block, area);
        return;
    };

    let episode = &latest.episode;
    let date = if episode.date.is_empty() {
        "Unknown date".to_string()
    } else {
        episode.date.clone()
    };
    let summary = if episode.summary.is_empty() {
        "No summary available.".to_string()
    } else {
        typeset(&episode.summary)
    };

    let mut lines = vec![
        TextLine::from(Span::styled(
            episode.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled(date, Style::default().fg(Color::Yellow)),
            Span::styled("  ·  ", Style::default().fg(Color::Gray)),
            Span::styled(episode.season.clone(), Style::default().fg(Color::Cyan)),
        ]),
        TextLine::from(""),
    ];
    lines.extend(
        summary
            .split('\n')
            .take(2)
            .map(|line| TextLine::from(line.to_string())),
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn spinner_frame(animation_counter: f64) -> char {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (animation_counter * 2.0) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[index]
}
