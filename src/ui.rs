use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pocket_pet::{
    Action, Clock, Mood, Pet, PetType, SaveFile, Session, SystemClock, Tone, TICK,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::time::Instant;

/// Mini-activities that earn money. These stay outside the core: the UI
/// owns the list and emits (amount, description) intents into the session.
const CHORES: [(f64, &str); 3] = [
    (10.0, "Walked the neighbor's dog"),
    (15.0, "Washed the car"),
    (20.0, "Mowed the lawn"),
];

const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Setup,
    Care,
    Ledger,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Setup => Page::Setup,
            Page::Care => Page::Ledger,
            Page::Ledger => Page::Care,
        }
    }

    pub fn previous(&self) -> Self {
        // Two cycling pages, so previous mirrors next
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Setup => "New Pet",
            Page::Care => "Care",
            Page::Ledger => "Money",
        }
    }
}

pub struct App {
    pub session: Option<Session>,
    pub store: SaveFile,
    pub clock: SystemClock,
    pub current_page: Page,
    pub ledger_state: TableState,
    pub status: Option<String>,
    pub name_input: String,
    pub species_index: usize,
}

impl App {
    pub fn new(store: SaveFile, session: Option<Session>) -> Self {
        let current_page = if session.is_some() {
            Page::Care
        } else {
            Page::Setup
        };

        let mut ledger_state = TableState::default();
        ledger_state.select(Some(0));

        Self {
            session,
            store,
            clock: SystemClock,
            current_page,
            ledger_state,
            status: None,
            name_input: String::new(),
            species_index: 0,
        }
    }

    pub fn selected_species(&self) -> PetType {
        PetType::ALL[self.species_index % PetType::ALL.len()]
    }

    pub fn next_species(&mut self) {
        self.species_index = (self.species_index + 1) % PetType::ALL.len();
    }

    pub fn previous_species(&mut self) {
        self.species_index = (self.species_index + PetType::ALL.len() - 1) % PetType::ALL.len();
    }

    pub fn create_pet(&mut self) {
        let name = self.name_input.trim();
        if name.is_empty() {
            self.status = Some("Give your pet a name first!".to_string());
            return;
        }

        let session = Session::new(name, self.selected_species(), self.clock.now());
        self.session = Some(session);
        self.current_page = Page::Care;
        self.status = Some(format!("🎉 Welcome home, {}!", name));
        self.persist();
    }

    pub fn perform(&mut self, action: Action) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.perform(action, now) {
            Ok(()) => {
                self.status = Some(format!("{} {}!", action.icon(), action.label()));
                self.persist();
            }
            Err(err) => self.status = Some(format!("❌ {}", err)),
        }
    }

    pub fn earn(&mut self, chore_index: usize) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some((amount, description)) = CHORES.get(chore_index).copied() else {
            return;
        };

        session.earn(amount, description, now);
        self.status = Some(format!("💵 +${:.2} for \"{}\"", amount, description));
        self.persist();
    }

    /// Timer-tick entry point: apply decay for whole elapsed minutes and
    /// persist when anything changed.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.tick(now) {
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Some(session) = &self.session {
            if let Err(err) = self.store.save(session) {
                self.status = Some(format!("❌ Save failed: {}", err));
            }
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn ledger_next(&mut self) {
        let len = self
            .session
            .as_ref()
            .map(|s| s.ledger().len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        let i = match self.ledger_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.ledger_state.select(Some(i));
    }

    pub fn ledger_previous(&mut self) {
        let len = self
            .session
            .as_ref()
            .map(|s| s.ledger().len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        let i = match self.ledger_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.ledger_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        // Short poll so the decay timer keeps firing between key events
        if event::poll(std::time::Duration::from_millis(500))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.current_page {
                    Page::Setup => match key.code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Enter => app.create_pet(),
                        KeyCode::Backspace => {
                            app.name_input.pop();
                        }
                        KeyCode::Left | KeyCode::Up => app.previous_species(),
                        KeyCode::Right | KeyCode::Down | KeyCode::Tab => app.next_species(),
                        KeyCode::Char(c) => {
                            if !c.is_control() && app.name_input.len() < MAX_NAME_LEN {
                                app.name_input.push(c);
                            }
                        }
                        _ => {}
                    },
                    Page::Care => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Tab => {
                            if key.modifiers.contains(KeyModifiers::SHIFT) {
                                app.previous_page();
                            } else {
                                app.next_page();
                            }
                        }
                        KeyCode::Char(c @ '1'..='7') => {
                            let index = c as usize - '1' as usize;
                            app.perform(Action::ALL[index]);
                        }
                        KeyCode::Char('8') => app.earn(0),
                        KeyCode::Char('9') => app.earn(1),
                        KeyCode::Char('0') => app.earn(2),
                        _ => {}
                    },
                    Page::Ledger => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Tab => {
                            if key.modifiers.contains(KeyModifiers::SHIFT) {
                                app.previous_page();
                            } else {
                                app.next_page();
                            }
                        }
                        KeyCode::Down | KeyCode::Char('j') => app.ledger_next(),
                        KeyCode::Up | KeyCode::Char('k') => app.ledger_previous(),
                        KeyCode::Home => app.ledger_state.select(Some(0)),
                        KeyCode::End => {
                            if let Some(session) = &app.session {
                                if !session.ledger().is_empty() {
                                    app.ledger_state.select(Some(session.ledger().len() - 1));
                                }
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if last_tick.elapsed() >= TICK {
            app.tick();
            last_tick = Instant::now();
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    if app.current_page == Page::Setup {
        render_setup(f, f.size(), app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Care => render_care(f, chunks[1], app),
        Page::Ledger => render_ledger(f, chunks[1], app),
        Page::Setup => unreachable!(),
    }

    render_status_bar(f, chunks[2], app);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Critical => Color::Red,
        Tone::Warning => Color::Yellow,
        Tone::Muted => Color::DarkGray,
        Tone::Info => Color::Cyan,
        Tone::Positive => Color::Green,
    }
}

fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Sick => Color::Red,
        Mood::Hungry => Color::Yellow,
        Mood::Dirty | Mood::Tired => Color::DarkGray,
        Mood::Sad => Color::Cyan,
        Mood::Energetic | Mood::Happy => Color::Green,
    }
}

fn render_setup(f: &mut Frame, area: Rect, app: &App) {
    let species = app.selected_species();
    let mut picker_spans = vec![Span::raw("  Species:  ")];
    for (i, candidate) in PetType::ALL.iter().enumerate() {
        if i > 0 {
            picker_spans.push(Span::raw("   "));
        }
        let style = if *candidate == species {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        picker_spans.push(Span::styled(candidate.as_str(), style));
    }

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🐾 Pocket Pet - New Pet Setup",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Name:     "),
            Span::styled(
                format!("{}_", app.name_input),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(picker_spans),
        Line::from(""),
        Line::from(Span::styled(
            "  Type a name, ←/→ to pick a species, Enter to adopt, Esc to quit",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        match &app.status {
            Some(status) => Line::from(Span::styled(
                format!("  {}", status),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(""),
        },
    ];

    let setup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Adopt a Pet "),
    );

    f.render_widget(setup, area);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Care, Page::Ledger];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    if let Some(session) = &app.session {
        let pet = session.pet();
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("{} {}", pet.emoji(), pet.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Lv {} ({})", pet.level, pet.stage.as_str()),
            Style::default().fg(Color::Cyan),
        ));
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("${:.2}", session.balance()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_care(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(11)])
        .split(columns[0]);

    render_pet_panel(f, left[0], session);
    render_actions(f, left[1], session);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(17), Constraint::Min(5)])
        .split(columns[1]);

    render_stats(f, right[0], session.pet());
    render_chores(f, right[1]);
}

fn render_pet_panel(f: &mut Frame, area: Rect, session: &Session) {
    let pet = session.pet();
    let state = session.state();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}", pet.emoji(), pet.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", state.emoji, state.message),
            Style::default().fg(tone_color(state.tone)),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Level {}  ·  {} XP  ·  {}",
                pet.level,
                pet.experience,
                pet.stage.as_str()
            ),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(mood_color(state.mood)))
            .title(format!(" {} ", state.mood.as_str())),
    );

    f.render_widget(panel, area);
}

fn render_actions(f: &mut Frame, area: Rect, session: &Session) {
    let balance = session.balance();

    let mut lines = vec![Line::from("")];
    for (i, action) in Action::ALL.iter().enumerate() {
        let cost = action.cost();
        let affordable = action.is_free() || balance >= cost;

        let key_style = if affordable {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let price = if action.is_free() {
            Span::styled("Free ", Style::default().fg(Color::Green))
        } else if affordable {
            Span::styled(format!("${:<4.0}", cost), Style::default().fg(Color::Green))
        } else {
            Span::styled(format!("${:<4.0}", cost), Style::default().fg(Color::Red))
        };

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}", i + 1), key_style),
            Span::raw(" "),
            Span::styled(format!("{} {:<10}", action.icon(), action.label()), text_style),
            price,
            Span::styled(
                format!("  {}", action.blurb()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let actions = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" 🎮 Pet Care Actions "),
    );

    f.render_widget(actions, area);
}

fn render_stats(f: &mut Frame, area: Rect, pet: &Pet) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let stats: [(&str, f64, Color); 5] = [
        ("🍖 Hunger", pet.hunger, Color::Yellow),
        ("😊 Happiness", pet.happiness, Color::Magenta),
        ("❤️ Health", pet.health, Color::Red),
        ("⚡ Energy", pet.energy, Color::Cyan),
        ("🫧 Hygiene", pet.hygiene, Color::Blue),
    ];

    for (i, (label, value, color)) in stats.iter().enumerate() {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", label)))
            .gauge_style(Style::default().fg(*color))
            .ratio((value / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}/100", value));

        f.render_widget(gauge, rows[i]);
    }
}

fn render_chores(f: &mut Frame, area: Rect) {
    let keys = ["8", "9", "0"];

    let mut lines = vec![Line::from("")];
    for (i, (amount, description)) in CHORES.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(keys[i], Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(format!("{:<26}", description), Style::default().fg(Color::White)),
            Span::styled(format!("+${:.0}", amount), Style::default().fg(Color::Green)),
        ]));
    }

    let chores = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" 💵 Earn Money "),
    );

    f.render_widget(chores, area);
}

fn render_ledger(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(session) = &app.session else {
        return;
    };

    let header_cells = ["Time", "Description", "Amount"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = session.ledger().entries().iter().map(|tx| {
        let color = if tx.amount < 0.0 {
            Color::Red
        } else {
            Color::Green
        };

        let cells = vec![
            Cell::from(tx.timestamp.format("%Y-%m-%d %H:%M").to_string()),
            Cell::from(tx.description.clone()),
            Cell::from(format!("{:+.2}", tx.amount)).style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(32),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(
                " Transactions (last {}) - Balance ${:.2} ",
                session.ledger().len(),
                session.balance()
            )),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.ledger_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        status_spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Cyan),
        ));
        status_spans.push(Span::raw("| "));
    }

    match app.current_page {
        Page::Care => {
            status_spans.push(Span::styled("1-7", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Care | "));
            status_spans.push(Span::styled("8-0", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Earn | "));
        }
        Page::Ledger => {
            status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Nav | "));
        }
        Page::Setup => {}
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
