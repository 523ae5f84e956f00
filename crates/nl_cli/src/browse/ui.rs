use nl_core::SourceMode;
use nl_view::{CardView, DetailActivation, DetailView, EmptyState, Pagination, Renderer};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use tui::Frame;

use super::app::{App, InputMode};

const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_DISABLED: Color = Color::DarkGray;
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

/// Collects one frame's worth of widgets from the controller.
#[derive(Default)]
struct TerminalRenderer {
    stats: String,
    page_info: String,
    empty: Option<EmptyState>,
    pagination: Option<Pagination>,
    detail: Option<Vec<Spans<'static>>>,
    mode: Option<SourceMode>,
}

impl Renderer for TerminalRenderer {
    type Card = ListItem<'static>;

    fn card(&mut self, card: CardView<'_>, _activate: DetailActivation) -> ListItem<'static> {
        ListItem::new(vec![
            Spans::from(Span::styled(
                card.title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(vec![
                Span::styled(card.source.to_string(), Style::default().fg(COLOR_ACCENT)),
                Span::raw("  "),
                Span::styled(card.date, Style::default().fg(COLOR_TEXT_SECONDARY)),
            ]),
            Spans::from(Span::raw(card.summary)),
            Spans::from(""),
        ])
    }

    fn empty_state(&mut self, state: EmptyState) {
        self.empty = Some(state);
    }

    fn stats(&mut self, stats: &str, page_info: &str) {
        self.stats = stats.to_string();
        self.page_info = page_info.to_string();
    }

    fn pagination(&mut self, pagination: &Pagination) {
        self.pagination = Some(pagination.clone());
    }

    fn detail(&mut self, detail: DetailView<'_>) {
        let secondary = Style::default().fg(COLOR_TEXT_SECONDARY);
        self.detail = Some(vec![
            Spans::from(Span::styled(
                detail.title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(vec![
                Span::styled(detail.source.to_string(), Style::default().fg(COLOR_ACCENT)),
                Span::raw("  "),
                Span::styled(detail.date, secondary),
            ]),
            Spans::from(""),
            Spans::from(detail.content.to_string()),
            Spans::from(""),
            Spans::from(vec![Span::styled("Image: ", secondary), Span::raw(detail.image_url.to_string())]),
            Spans::from(vec![Span::styled("Read more: ", secondary), Span::raw(detail.url.to_string())]),
            Spans::from(""),
            Spans::from(Span::styled("[Esc] close", secondary)),
        ]);
    }

    fn source_mode(&mut self, mode: SourceMode) {
        self.mode = Some(mode);
    }
}

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let mut renderer = TerminalRenderer::default();
    let cards = app.view.render(&mut renderer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_controls(f, app, &renderer, chunks[0]);
    draw_listing(f, app, &renderer, cards, chunks[1]);
    draw_pagination(f, &renderer, chunks[2]);
    draw_status(f, app, &renderer, chunks[3]);

    app.modal_area = None;
    if let Some(lines) = renderer.detail.take() {
        let area = centered_rect(70, 70, f.size());
        let modal = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Article"))
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(modal, area);
        app.modal_area = Some(area);
    }
}

fn draw_controls<B: Backend>(f: &mut Frame<B>, app: &App, renderer: &TerminalRenderer, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ]
            .as_ref(),
        )
        .split(area);

    let query = app.view.query();
    let searching = app.input_mode == InputMode::Search;
    let search_text = if searching {
        format!("{}_", query.search)
    } else {
        query.search.clone()
    };
    let search_style = if searching {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default()
    };
    let source = if query.source.is_empty() { "All sources" } else { query.source.as_str() };
    let mode = renderer.mode.map(|m| m.label()).unwrap_or_default();
    let toggle = if app.loading {
        format!("Source: {} (loading)", mode)
    } else {
        format!("Source: {}", mode)
    };

    let boxes = [
        (search_text, "Search [/]", search_style),
        (query.sort.label().to_string(), "Sort [s]", Style::default()),
        (source.to_string(), "Filter [f]", Style::default()),
        (toggle, "Data [t]", Style::default()),
    ];
    for ((text, title, style), column) in boxes.into_iter().zip(columns) {
        let widget = Paragraph::new(Spans::from(Span::styled(text, style)))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(widget, column);
    }
}

fn draw_listing<B: Backend>(
    f: &mut Frame<B>,
    app: &App,
    renderer: &TerminalRenderer,
    cards: Vec<ListItem<'static>>,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title("News");

    if let Some(state) = renderer.empty {
        let style = match state {
            EmptyState::LoadFailed => Style::default().fg(COLOR_ERROR),
            _ => Style::default().fg(COLOR_TEXT_SECONDARY),
        };
        let message = Paragraph::new(Spans::from(Span::styled(state.message(), style)))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(message, area);
        return;
    }

    let list = List::new(cards)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_pagination<B: Backend>(f: &mut Frame<B>, renderer: &TerminalRenderer, area: Rect) {
    let pagination = match &renderer.pagination {
        Some(p) if p.visible => p,
        _ => return,
    };

    let enabled = |on: bool| {
        if on {
            Style::default()
        } else {
            Style::default().fg(COLOR_DISABLED)
        }
    };
    let mut spans = vec![Span::styled("← Prev ", enabled(pagination.prev_enabled))];
    for button in &pagination.buttons {
        let style = if button.active {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", button.number), style));
    }
    spans.push(Span::styled(" Next →", enabled(pagination.next_enabled)));

    f.render_widget(Paragraph::new(Spans::from(spans)).alignment(Alignment::Center), area);
}

fn draw_status<B: Backend>(f: &mut Frame<B>, app: &App, renderer: &TerminalRenderer, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Search => "type to search · Enter/Esc done",
        InputMode::Normal => "↑↓ select · Enter open · ←→ page · q quit",
    };
    let line = Spans::from(vec![
        Span::raw(format!("{} {}", renderer.stats, renderer.page_info)),
        Span::styled(format!("  |  {}", hints), Style::default().fg(COLOR_TEXT_SECONDARY)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Rect of `percent_x` by `percent_y` centered in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
