use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

mod filter;

use filter::{
    matches_search, plain_math, season_episodes, season_summaries, visible_episodes,
};

/// One catalog record as served next to the page.
#[derive(serde::Deserialize, Clone)]
pub struct Episode {
    pub id: serde_json::Value,
    pub title: String,
    pub season: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl Episode {
    /// Integer key for the within-season ordering.
    pub fn id_key(&self) -> i64 {
        match &self.id {
            serde_json::Value::Number(number) => number.as_i64().unwrap_or(0),
            serde_json::Value::String(text) => {
                let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn id_label(&self) -> String {
        match &self.id {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// The one-shot catalog fetch, as the page sees it.
enum LoadState {
    Loading,
    Failed,
    Ready(Vec<Episode>),
}

/// What the visitor is looking at. Search always wins over the season
/// selection; clearing the search falls back to whatever season is here.
struct ViewState {
    selected_season: Option<String>,
    search: String,
    search_editing: bool,
    selected: usize,
    details_open: bool,
}

impl ViewState {
    const fn new() -> Self {
        Self {
            selected_season: None,
            search: String::new(),
            search_editing: false,
            selected: 0,
            details_open: false,
        }
    }

    fn back(&mut self) {
        self.search.clear();
        self.search_editing = false;
        self.selected_season = None;
        self.selected = 0;
        self.details_open = false;
    }
}

fn main() -> io::Result<()> {
    let catalog = Rc::new(RefCell::new(LoadState::Loading));
    let view = Rc::new(RefCell::new(ViewState::new()));

    spawn_local(fetch_catalog(catalog.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let catalog = catalog.clone();
        let view = view.clone();
        move |event| {
            let catalog = catalog.borrow();
            let mut view = view.borrow_mut();
            handle_key(event.code, &catalog, &mut view);
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Podcast Catalog")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let catalog = catalog.borrow();
        let view = view.borrow();
        match &*catalog {
            LoadState::Loading => {
                let paragraph =
                    Paragraph::new(Text::from(TextLine::from("Loading catalog.json...")))
                        .alignment(Alignment::Center);
                f.render_widget(paragraph, inner);
            }
            LoadState::Failed => render_load_error(f, inner),
            LoadState::Ready(episodes) => render_page(episodes, &view, f, inner),
        }
    });

    Ok(())
}

fn handle_key(
    code: ratzilla::event::KeyCode,
    catalog: &LoadState,
    view: &mut ViewState,
) {
    use ratzilla::event::KeyCode;

    let LoadState::Ready(episodes) = catalog else {
        return;
    };

    if view.details_open {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            view.details_open = false;
        }
        return;
    }

    if view.search_editing {
        match code {
            KeyCode::Esc => {
                view.search.clear();
                view.search_editing = false;
                view.selected = 0;
            }
            KeyCode::Enter => view.search_editing = false,
            KeyCode::Backspace => {
                view.search.pop();
                view.selected = 0;
            }
            KeyCode::Char(ch) => {
                view.search.push(ch);
                view.selected = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('/') => view.search_editing = true,
        KeyCode::Up => view.selected = view.selected.saturating_sub(1),
        KeyCode::Down => {
            let rows = grid_len(episodes, view);
            if rows > 0 && view.selected + 1 < rows {
                view.selected += 1;
            }
        }
        KeyCode::Enter => {
            if view.search.is_empty() && view.selected_season.is_none() {
                let seasons = season_summaries(episodes);
                if let Some((label, _)) = seasons.get(view.selected) {
                    view.selected_season = Some(label.clone());
                    view.selected = 0;
                }
            } else if view.selected < grid_len(episodes, view) {
                view.details_open = true;
            }
        }
        KeyCode::Esc | KeyCode::Backspace => view.back(),
        _ => {}
    }
}

/// The episode rows the grid currently shows; empty while browsing seasons.
fn grid_episodes(episodes: &[Episode], view: &ViewState) -> Vec<Episode> {
    if !view.search.is_empty() {
        episodes
            .iter()
            .filter(|episode| matches_search(episode, &view.search))
            .cloned()
            .collect()
    } else if let Some(season) = &view.selected_season {
        season_episodes(episodes, season)
    } else {
        Vec::new()
    }
}

fn grid_len(episodes: &[Episode], view: &ViewState) -> usize {
    if view.search.is_empty() && view.selected_season.is_none() {
        season_summaries(episodes).len()
    } else {
        grid_episodes(episodes, view).len()
    }
}

fn render_load_error(f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let block = Block::default()
        .title("Latest Episode")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    // The rest of the page stays in its empty initial state.
    let paragraph = Paragraph::new("Error loading programs.")
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    f.render_widget(paragraph, layout[0]);
}

fn render_page(
    episodes: &[Episode],
    view: &ViewState,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(area);

    render_hero(episodes, f, layout[0]);

    if view.search.is_empty() {
        if let Some(season) = &view.selected_season {
            render_episode_table(
                &grid_episodes(episodes, view),
                season,
                view.selected,
                f,
                layout[2],
            );
        } else {
            render_season_table(episodes, view.selected, f, layout[2]);
        }
    } else {
        let matches = grid_episodes(episodes, view);
        if matches.is_empty() {
            render_no_results(f, layout[2]);
        } else {
            render_episode_table(&matches, "Search Results", view.selected, f, layout[2]);
        }
    }

    render_footer(view, f, layout[3]);

    if view.details_open {
        if let Some(episode) = grid_episodes(episodes, view).get(view.selected) {
            render_details(episode, f, area);
        }
    }
}

fn render_hero(episodes: &[Episode], f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Latest Episode")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(latest) = episodes.first() else {
        f.render_widget(block, area);
        return;
    };

    let date = if latest.date.is_empty() {
        "Unknown date".to_string()
    } else {
        latest.date.clone()
    };

    let lines = vec![
        TextLine::from(Span::styled(
            latest.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled(date, Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(latest.season.clone(), Style::default().fg(Color::Cyan)),
        ]),
        TextLine::from(plain_math(&latest.summary)),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_season_table(
    episodes: &[Episode],
    selected: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let seasons = season_summaries(episodes);

    let header = Row::new(vec![Cell::from("Season"), Cell::from("Episodes")]).style(
        Style::default()
            .fg(Color::Rgb(0, 0, 238))
            .bg(Color::Rgb(200, 200, 200))
            .add_modifier(Modifier::BOLD),
    );

    let max_rows = area.height.saturating_sub(2) as usize;
    let offset = table_offset(seasons.len(), max_rows, selected);

    let rows = seasons
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .map(|(index, (label, count))| {
            let style = if index == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(label.clone()),
                Cell::from(format!("{count} episodes")),
            ])
            .style(style)
        });

    let table = Table::new(rows, [Constraint::Length(26), Constraint::Length(14)])
        .header(header)
        .block(Block::default().title("Seasons").borders(Borders::ALL))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_episode_table(
    episodes: &[Episode],
    title: &str,
    selected: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Title"),
        Cell::from("Season"),
        Cell::from("Date"),
        Cell::from("Summary"),
    ])
    .style(
        Style::default()
            .fg(Color::Rgb(0, 0, 238))
            .bg(Color::Rgb(200, 200, 200))
            .add_modifier(Modifier::BOLD),
    );

    let max_rows = area.height.saturating_sub(2) as usize;
    let offset = table_offset(episodes.len(), max_rows, selected);

    let rows = episodes
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .map(|(index, episode)| {
            let style = if index == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(episode.id_label()),
                Cell::from(episode.title.clone()),
                Cell::from(episode.season.clone()),
                Cell::from(episode.date.clone()),
                Cell::from(plain_math(&episode.summary).replace('\n', " ")),
            ])
            .style(style)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(26),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Min(18),
        ],
    )
    .header(header)
    .block(Block::default().title(title.to_string()).borders(Borders::ALL))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn render_no_results(f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new("No programs found.")
        .block(Block::default().title("Search Results").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn render_footer(view: &ViewState, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let search_line = if view.search_editing {
        TextLine::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}█", view.search),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else if view.search.is_empty() {
        TextLine::from(Span::styled(
            "Press / to search",
            Style::default().fg(Color::Gray),
        ))
    } else {
        TextLine::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Gray)),
            Span::styled(view.search.clone(), Style::default().fg(Color::Yellow)),
        ])
    };

    let hints = TextLine::from(vec![
        Span::styled("Arrows", Style::default().fg(Color::Gray)),
        Span::raw(" move  "),
        Span::styled("Enter", Style::default().fg(Color::Gray)),
        Span::raw(" open  "),
        Span::styled("Esc", Style::default().fg(Color::Gray)),
        Span::raw(" back"),
    ]);

    f.render_widget(
        Paragraph::new(search_line).alignment(Alignment::Center),
        layout[0],
    );
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), layout[1]);
}

fn render_details(episode: &Episode, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let popup = centered_rect(72, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", episode.title))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled("Aired: ", Style::default().fg(Color::Gray)),
            Span::raw(episode.date.clone()),
            Span::styled("   Season: ", Style::default().fg(Color::Gray)),
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

    // Newlines in the source text become separate display lines.
    for line in plain_math(&episode.summary).split('\n') {
        lines.push(TextLine::from(line.to_string()));
    }

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
    for line in plain_math(&challenge).split('\n') {
        lines.push(TextLine::from(line.to_string()));
    }

    if let Some(link) = &episode.link {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("Listen: ", Style::default().fg(Color::Gray)),
            Span::styled(link.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

const fn table_offset(total: usize, max_rows: usize, selected: usize) -> usize {
    if total <= max_rows {
        return 0;
    }
    if selected >= max_rows {
        return selected - max_rows + 1;
    }
    selected
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// The single catalog read, with the cache-defeating query parameter the
/// page always appends.
async fn fetch_catalog(store: Rc<RefCell<LoadState>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let url = format!("catalog.json?v={}", js_sys::Date::now() as u64);

    let Ok(request) = Request::new_with_str_and_init(&url, &opts) else {
        *store.borrow_mut() = LoadState::Failed;
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        web_sys::console::error_1(&"Failed to fetch catalog.json".into());
        *store.borrow_mut() = LoadState::Failed;
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        *store.borrow_mut() = LoadState::Failed;
        return;
    };

    if !response.ok() {
        web_sys::console::error_1(
            &format!("catalog.json returned status {}", response.status()).into(),
        );
        *store.borrow_mut() = LoadState::Failed;
        return;
    }

    let Ok(json_promise) = response.json() else {
        *store.borrow_mut() = LoadState::Failed;
        return;
    };
    let Ok(json) = wasm_bindgen_futures::JsFuture::from(json_promise).await else {
        web_sys::console::error_1(&"Failed to read catalog.json body".into());
        *store.borrow_mut() = LoadState::Failed;
        return;
    };

    let episodes = match serde_wasm_bindgen::from_value::<Vec<Episode>>(json) {
        Ok(episodes) => episodes,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse catalog.json: {error}").into());
            *store.borrow_mut() = LoadState::Failed;
            return;
        }
    };

    // Hidden records are dropped here, once; the page never sees them.
    *store.borrow_mut() = LoadState::Ready(visible_episodes(&episodes));
}
