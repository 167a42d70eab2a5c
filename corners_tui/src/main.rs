use std::io::{self, stdout};
use std::path::PathBuf;

use clap::Parser;
use corners::{render_all, render_dirty, Cell, CellRenderer, Click, Game, MoveError, Player};
use corners_cli::GameConfig;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of cells in each row and column (overrides the config file)
    #[arg(long)]
    cell_count: Option<usize>,

    /// Don't place the starting anchors
    #[arg(long, default_value_t = false)]
    no_seed: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace".
    /// Logs go to stderr, so redirect it when turning this on.
    #[arg(short, long, default_value = "off")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(cell_count) = args.cell_count {
        config.cell_count = cell_count;
    }
    if args.no_seed {
        config.seed_edges = false;
    }
    config.validate()?;

    let (game, _) = Game::new(config.cell_count, config.seed_edges)?;
    let mut app = App::new(game);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        app.handle_events()?;
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Width of a cell on screen: left corner, link, right corner.
const CELL_WIDTH: u16 = 3;

/// The terminal drawing of every cell, updated through [`CellRenderer`].
struct CellGrid {
    cell_count: usize,
    glyphs: Vec<[(char, Style); 3]>,
}

impl CellGrid {
    fn new(cell_count: usize) -> Self {
        Self {
            cell_count,
            glyphs: vec![[(' ', Style::new()); 3]; cell_count * cell_count],
        }
    }
}

fn corner_style(color: corners::Color) -> Style {
    match color {
        corners::Color::Neutral => Style::new().fg(Color::DarkGray),
        corners::Color::Red => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        corners::Color::Green => Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

impl CellRenderer for CellGrid {
    fn render_cell(&mut self, cell: &Cell) {
        // Neutral corners are a small dot, claimed ones a filled circle
        let corner = |color| {
            let ch = if color == corners::Color::Neutral { '·' } else { '●' };
            (ch, corner_style(color))
        };
        let [_, link, _] = corners::cell_glyph(cell);
        let idx = cell.y() as usize * self.cell_count + cell.x() as usize;
        self.glyphs[idx] = [
            corner(cell.left_color()),
            (link, corner_style(cell.left_color())),
            corner(cell.right_color()),
        ];
    }
}

struct BoardWidget<'a> {
    grid: &'a CellGrid,
    cursor: (i32, i32),
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.grid.cell_count;
        for (idx, glyph) in self.grid.glyphs.iter().enumerate() {
            let (x, y) = ((idx % n) as u16, (idx / n) as u16);
            let (screen_x, screen_y) = (area.x + x * CELL_WIDTH, area.y + y);
            if screen_x + CELL_WIDTH > area.right() || screen_y >= area.bottom() {
                continue;
            }
            let is_cursor = (x as i32, y as i32) == self.cursor;
            for (offset, &(ch, style)) in glyph.iter().enumerate() {
                let style = if is_cursor {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                buf.set_string(screen_x + offset as u16, screen_y, ch.to_string(), style);
            }
        }
    }
}

struct App {
    game: Game,
    grid: CellGrid,
    cursor: (i32, i32),
    status: String,
    should_quit: bool,
}

impl App {
    fn new(game: Game) -> Self {
        let mut grid = CellGrid::new(game.board().cell_count());
        render_all(game.board(), &mut grid);
        let status = format!("{} to move", game.turn());
        Self {
            game,
            grid,
            cursor: (0, 0),
            status,
            should_quit: false,
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let max = self.game.board().cell_count() as i32 - 1;
        self.cursor = (
            (self.cursor.0 + dx).clamp(0, max),
            (self.cursor.1 + dy).clamp(0, max),
        );
    }

    fn click(&mut self) -> anyhow::Result<()> {
        let click = Click::new(self.cursor.0, self.cursor.1);
        let player = self.game.turn();
        match self.game.play(click) {
            Ok(outcome) => {
                render_dirty(self.game.board(), &outcome.dirty, &mut self.grid);
                info!(move_number = outcome.move_number, %player, %click, "Accepted");
                self.status =
                    format!("Move {}: {} to move", outcome.move_number, self.game.turn());
            }
            Err(MoveError::Illegal(err)) => {
                warn!(%player, %click, %err, "Illegal move");
                self.status = format!("{}. {} to move", err, player);
            }
            Err(err @ MoveError::Defect(_)) => {
                return Err(anyhow::Error::new(err));
            }
        }
        Ok(())
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    return Ok(());
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                    KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
                    KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
                    KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
                    KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
                    KeyCode::Enter | KeyCode::Char(' ') => self.click()?,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        let board_width = u16::try_from(self.grid.cell_count)
            .unwrap_or(u16::MAX)
            .saturating_mul(CELL_WIDTH)
            .saturating_add(2);
        let main_layout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(0), Constraint::Length(3)],
        )
        .split(frame.size());

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(board_width),
                Constraint::Min(0),
            ])
            .split(main_layout[0])[1];
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all())
            .title(" corners ");
        let inner = block.inner(board_area);
        frame.render_widget(block, board_area);
        frame.render_widget(
            BoardWidget {
                grid: &self.grid,
                cursor: self.cursor,
            },
            inner,
        );

        let turn_color = match self.game.turn() {
            Player::Red => Color::Red,
            Player::Green => Color::Green,
        };
        let status = Paragraph::new(Line::from(vec![
            Span::styled(self.status.clone(), Style::new().fg(turn_color)),
            Span::raw("   arrows: move, enter: connect, q: quit"),
        ]))
        .block(Block::new().borders(Borders::all()));
        frame.render_widget(status, main_layout[1]);
    }
}
