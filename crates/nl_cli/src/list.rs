use nl_core::SourceMode;
use nl_view::{CardView, DetailActivation, EmptyState, Pagination, Renderer, ViewController};

/// Renders into plain lines for stdout.
#[derive(Debug, Default)]
struct TextRenderer {
    header: Vec<String>,
    body: Vec<String>,
    footer: Vec<String>,
}

impl Renderer for TextRenderer {
    type Card = String;

    fn card(&mut self, card: CardView<'_>, activate: DetailActivation) -> String {
        format!(
            "{:>2}. {}\n    {} | {}\n    {}\n",
            activate.index() + 1,
            card.title,
            card.source,
            card.date,
            card.summary
        )
    }

    fn empty_state(&mut self, state: EmptyState) {
        self.body.push(state.message().to_string());
    }

    fn stats(&mut self, stats: &str, page_info: &str) {
        self.header.push(stats.to_string());
        self.footer.push(page_info.to_string());
    }

    fn pagination(&mut self, pagination: &Pagination) {
        if !pagination.visible {
            return;
        }
        let buttons: Vec<String> = pagination
            .buttons
            .iter()
            .map(|b| if b.active { format!("[{}]", b.number) } else { b.number.to_string() })
            .collect();
        let prev = if pagination.prev_enabled { "<- Prev" } else { "      " };
        let next = if pagination.next_enabled { "Next ->" } else { "" };
        self.footer.push(format!("{} {} {}", prev, buttons.join(" "), next).trim_end().to_string());
    }

    fn source_mode(&mut self, mode: SourceMode) {
        self.header.push(format!("Source: {}", mode.label()));
    }
}

pub fn render_page(view: &ViewController) -> String {
    let mut renderer = TextRenderer::default();
    let cards = view.render(&mut renderer);

    let mut out = String::new();
    for line in renderer.header.iter().chain(renderer.body.iter()) {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    for card in cards {
        out.push_str(&card);
        out.push('\n');
    }
    for line in &renderer.footer {
        out.push_str(line);
        out.push('\n');
    }
    out
}
