use ratatui::layout::Margin;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help(f: &mut Frame<'_>) {
    let area = f.area().inner(Margin::new(2, 1));

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = |name: &'static str, action: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {name}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {action}"), Style::default()),
        ])
    };

    let help_text = vec![
        TextLine::from(Span::styled(
            "Podcast Catalog Browser",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Browse a podcast catalog by season, search across every episode and"),
        TextLine::from("open the full detail of any entry."),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("F1", "Toggle this help screen"),
        key("/", "Search (type to filter live, Esc clears)"),
        key("↑/↓", "Move the selection"),
        key("PgUp/PgDn", "Jump 5 rows"),
        key("Home/End", "First / last row"),
        key("Enter", "Open the selected season or episode"),
        key("Esc", "Back to the seasons overview / close the popup"),
        key("q", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Views:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from("  Seasons   - every season once, with its episode count"),
        TextLine::from("  Season    - that season's episodes, oldest id first"),
        TextLine::from("  Search    - matches across title, summary, challenge and date;"),
        TextLine::from("              season selection is ignored while a search is active"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press Esc to close this help screen",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
