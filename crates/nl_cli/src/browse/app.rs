use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use futures::StreamExt;
use nl_feed::CompletedLoad;
use nl_view::ViewController;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use tui::backend::Backend;
use tui::layout::Rect;
use tui::Terminal;

use super::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub(super) view: ViewController,
    pub(super) input_mode: InputMode,
    pub(super) selected: usize,
    pub(super) loading: bool,
    /// Where the detail overlay was last drawn, for click-outside handling.
    pub(super) modal_area: Option<Rect>,
    should_quit: bool,
    tx: UnboundedSender<CompletedLoad>,
    rx: UnboundedReceiver<CompletedLoad>,
}

impl App {
    pub fn new(view: ViewController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            view,
            input_mode: InputMode::Normal,
            selected: 0,
            loading: false,
            modal_area: None,
            should_quit: false,
            tx,
            rx,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.reload();
        let mut events = EventStream::new();

        while !self.should_quit() {
            terminal.draw(|f| ui::draw(f, self))?;

            tokio::select! {
                Some(done) = self.rx.recv() => self.finish_load(done),
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
            }
        }
        Ok(())
    }

    pub(super) fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Starts a load on a task; its result comes back through the channel.
    fn reload(&mut self) {
        let pending = self.view.begin_reload();
        info!("🔄 Loading from {} (ticket {})", pending.mode().label(), pending.ticket());
        self.loading = true;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(pending.run().await);
        });
    }

    pub(super) fn finish_load(&mut self, done: CompletedLoad) {
        let ticket = done.ticket;
        if self.view.finish_reload(done) {
            self.loading = false;
            self.selected = 0;
        } else {
            debug!("ignored stale load {}", ticket);
        }
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal if self.view.detail().is_some() => self.handle_detail_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                let mut search = self.view.query().search.clone();
                search.push(c);
                self.view.set_search(search);
                self.selected = 0;
            }
            KeyCode::Backspace => {
                let mut search = self.view.query().search.clone();
                search.pop();
                self.view.set_search(search);
                self.selected = 0;
            }
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }
    }

    fn handle_detail_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => self.view.close_detail(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('s') => {
                self.view.set_sort(self.view.query().sort.next());
                self.selected = 0;
            }
            KeyCode::Char('f') => {
                self.cycle_source();
                self.selected = 0;
            }
            KeyCode::Char('t') => {
                let mode = self.view.toggle_source();
                info!("Data source switched to {}", mode.label());
                self.reload();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.view.prev_page();
                self.selected = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.view.next_page();
                self.selected = 0;
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(page) = c.to_digit(10) {
                    self.view.go_to_page(page as usize);
                    self.selected = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.view.page_items().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                let activation = self.view.cards().get(self.selected).map(|(_, a)| *a);
                if let Some(activation) = activation {
                    self.view.activate(activation);
                }
            }
            _ => {}
        }
    }

    /// All sources, then each source in first-seen order, then back to all.
    fn cycle_source(&mut self) {
        let sources = self.view.sources();
        let current = self.view.query().source.clone();
        let next = if current.is_empty() {
            sources.first().cloned().unwrap_or_default()
        } else {
            match sources.iter().position(|s| *s == current) {
                Some(i) if i + 1 < sources.len() => sources[i + 1].clone(),
                _ => String::new(),
            }
        };
        self.view.set_source(next);
    }

    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.view.detail().is_none() {
            return;
        }
        if let Some(area) = self.modal_area {
            if !contains(area, mouse.column, mouse.row) {
                self.view.close_detail();
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use nl_core::{LoadError, SortOrder, SourceMode};
    use nl_feed::{ArticleStore, FeedConfig, LocalSample, RemoteFeed};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    async fn loaded_app() -> App {
        let remote = RemoteFeed::new(FeedConfig::new("http://127.0.0.1:1/", 100).unwrap());
        let mut view = ViewController::new(ArticleStore::new(Arc::new(LocalSample::new()), Arc::new(remote)));
        view.load().await;
        App::new(view)
    }

    #[tokio::test]
    async fn test_typing_search() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Char('/')));
        for c in "MARS".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.view.query().search, "MARS");
        assert_eq!(app.view.result_count(), 3);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.view.query().search, "MAR");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_sort_source_and_pages() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.view.query().sort, SortOrder::DateAsc);

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.view.query().source, "NASA");
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.view.query().source, "SpaceNews");
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.view.query().source, "");

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view.current_page(), 2);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.view.current_page(), 1);
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.view.current_page(), 2);
    }

    #[tokio::test]
    async fn test_detail_open_and_close() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        let expected = app.view.page_items()[2].title.clone();
        assert_eq!(app.view.detail().map(|d| d.title.to_string()), Some(expected));

        // Esc closes the detail instead of quitting
        app.handle_key(key(KeyCode::Esc));
        assert!(app.view.detail().is_none());
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Enter));
        app.modal_area = Some(Rect::new(10, 5, 40, 10));
        app.handle_mouse(click(20, 8));
        assert!(app.view.detail().is_some());
        app.handle_mouse(click(2, 2));
        assert!(app.view.detail().is_none());
    }

    #[tokio::test]
    async fn test_reload_result_comes_back_over_channel() {
        let mut app = loaded_app().await;
        app.view.toggle_source();
        app.reload();
        assert!(app.loading);

        let done = app.rx.recv().await.unwrap();
        app.finish_load(done);
        assert!(!app.loading);
        assert_eq!(app.view.store().mode(), SourceMode::Remote);
        assert!(matches!(app.view.store().last_error(), Some(LoadError::Network(_))));
    }

    #[tokio::test]
    async fn test_only_key_presses_are_handled() {
        let mut app = loaded_app().await;
        let release = KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        app.handle_event(Event::Key(release));
        assert!(!app.should_quit());

        app.handle_event(Event::Resize(80, 24));
        assert!(!app.should_quit());

        app.handle_event(Event::Key(key(KeyCode::Char('q'))));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_stale_load_keeps_loading_flag() {
        let mut app = loaded_app().await;
        let stale = app.view.begin_reload();
        app.view.toggle_source();
        let fresh = app.view.begin_reload();
        app.loading = true;

        app.finish_load(stale.run().await);
        assert!(app.loading);
        assert_eq!(app.view.store().mode(), SourceMode::Remote);
        assert_eq!(app.view.result_count(), 14);

        app.finish_load(fresh.run().await);
        assert!(!app.loading);
        assert!(matches!(app.view.store().last_error(), Some(LoadError::Network(_))));
    }
}
