pub mod config;
pub mod drill;
pub mod layout;
pub mod runtime;
pub mod ui;
pub mod words;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    drill::{Drill, Stats, TickRequest},
    runtime::{Event, EventQueue},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// How many words a timed drill queues up; more than fit in any sane run.
const TIMED_WORD_COUNT: usize = 120;

const MENU_ITEMS: usize = 2;

/// minimal typing trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing trainer for the terminal. Pick a mode from the menu, or pass a flag to jump straight into a drill."
)]
pub struct Cli {
    /// number of seconds for a timed drill
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// number of words for an untimed drill
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// custom text to type
    #[clap(short = 'p', long)]
    prompt: Option<String>,
}

impl Cli {
    /// Drill mode requested on the command line, if any. Any flag at all
    /// skips the menu.
    fn initial_mode(&self) -> Option<Mode> {
        if let Some(text) = &self.prompt {
            return Some(Mode::Custom {
                text: text.clone(),
                secs: self.seconds.unwrap_or(0),
            });
        }
        match (self.seconds, self.words) {
            (Some(secs), words) => Some(Mode::Timed {
                secs,
                count: words.unwrap_or(TIMED_WORD_COUNT),
            }),
            (None, Some(count)) => Some(Mode::Words { count }),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    WordCount,
    Typing,
    Results,
}

/// What kind of drill is (or was last) running; kept around so the results
/// screen can restart the same mode with fresh words.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Timed { secs: u64, count: usize },
    Words { count: usize },
    Custom { text: String, secs: u64 },
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub selected: usize,
    pub count_input: String,
    pub drill: Option<Drill>,
    pub stats: Option<Stats>,
    pub mode: Option<Mode>,
    pub generation: u64,
    pub config: Config,
    pub store: FileConfigStore,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: FileConfigStore) -> Self {
        Self {
            screen: Screen::Menu,
            selected: 0,
            count_input: String::new(),
            drill: None,
            stats: None,
            mode: None,
            generation: 0,
            config,
            store,
            should_quit: false,
        }
    }

    /// Builds a fresh drill for `mode` and switches to the typing screen.
    /// Any tick still in flight for an earlier drill goes stale.
    pub fn start_mode(&mut self, mode: Mode) {
        let (target, duration) = match &mode {
            Mode::Timed { secs, count } => (drill_text(*count), Duration::from_secs(*secs)),
            Mode::Words { count } => (drill_text(*count), Duration::ZERO),
            Mode::Custom { text, secs } => (text.clone(), Duration::from_secs(*secs)),
        };
        self.generation += 1;
        self.drill = Some(Drill::new(&target, duration));
        self.stats = None;
        self.mode = Some(mode);
        self.screen = Screen::Typing;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> TickRequest {
        // ctrl+c quits from any screen
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return TickRequest::Idle;
        }

        match self.screen {
            Screen::Menu => {
                self.on_menu_key(key.code);
                TickRequest::Idle
            }
            Screen::WordCount => {
                self.on_word_count_key(key.code);
                TickRequest::Idle
            }
            Screen::Typing => self.on_typing_key(key.code),
            Screen::Results => {
                self.on_results_key(key.code);
                TickRequest::Idle
            }
        }
    }

    pub fn on_tick(&mut self, generation: u64) -> TickRequest {
        // a tick armed for a drill that is no longer current must not re-arm
        if generation != self.generation {
            return TickRequest::Idle;
        }
        if self.screen != Screen::Typing {
            return TickRequest::Idle;
        }
        let Some(drill) = self.drill.as_mut() else {
            return TickRequest::Idle;
        };
        let request = drill.on_tick();
        self.finish_if_done();
        request
    }

    fn on_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(MENU_ITEMS - 1);
            }
            KeyCode::Enter => {
                if self.selected == 0 {
                    self.start_mode(Mode::Timed {
                        secs: self.config.seconds,
                        count: TIMED_WORD_COUNT,
                    });
                } else {
                    self.count_input.clear();
                    self.screen = Screen::WordCount;
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn on_word_count_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let count = match self.count_input.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => self.config.words,
                };
                // remember the choice; saving is best effort
                self.config.words = count;
                let _ = self.store.save(&self.config);
                self.start_mode(Mode::Words { count });
            }
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => {
                self.count_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.count_input.len() < 4 {
                    self.count_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn on_typing_key(&mut self, code: KeyCode) -> TickRequest {
        if code == KeyCode::Esc {
            // abandon the run without recording anything
            self.drill = None;
            self.screen = Screen::Menu;
            return TickRequest::Idle;
        }
        let Some(drill) = self.drill.as_mut() else {
            return TickRequest::Idle;
        };
        let request = match code {
            KeyCode::Backspace => drill.backspace(),
            KeyCode::Char(c) => drill.write(c),
            _ => TickRequest::Idle,
        };
        self.finish_if_done();
        request
    }

    fn on_results_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('1') | KeyCode::Char('r') => {
                if let Some(mode) = self.mode.clone() {
                    self.start_mode(mode);
                }
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn finish_if_done(&mut self) {
        if let Some(drill) = &self.drill {
            if drill.has_finished() {
                self.stats = Some(drill.stats());
                self.screen = Screen::Results;
            }
        }
    }
}

/// Drill text for a word-count mode. Falls back to a fixed phrase if the
/// bundled word bank cannot be loaded.
fn drill_text(count: usize) -> String {
    words::generate(count).unwrap_or_else(|_| words::FALLBACK_PHRASE.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store.load();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store);
    if let Some(mode) = cli.initial_mode() {
        app.start_mode(mode);
    }

    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = EventQueue::new();
    events.spawn_input_reader();
    let timer = events.timer();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let request = match events.recv()? {
            Event::Key(key) => app.on_key(key),
            Event::Tick(generation) => app.on_tick(generation),
            Event::Resize => TickRequest::Idle,
        };
        if let TickRequest::Arm = request {
            timer.arm(app.generation);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
