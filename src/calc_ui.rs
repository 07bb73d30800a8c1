use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{read, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use tracing::debug;

use crate::calc_conversions::{convert, round_for_display};
use crate::calc_evaluator::{evaluate, format_result};
use crate::calc_history::History;
use crate::calc_modes::{button_kind, button_layout, command_for_label, tooltip, ButtonKind};
use crate::calc_theme::Theme;
use crate::calc_types::{ButtonCommand, Mode};

pub type RatatuiTerminal = Terminal<CrosstermBackend<Stdout>>;

const BUTTON_WIDTH: usize = 7;

/// What the window is currently showing.
#[derive(Debug, Clone, PartialEq)]
enum View {
    Calculator,
    History,
    Error(String),
}

/// All mutable application state: the display buffer, the active mode,
/// the theme flag, and the persisted history.
pub struct App {
    pub mode: Mode,
    pub theme: Theme,
    pub expression: String,
    pub history: History,
    cursor: (usize, usize),
    view: View,
    status: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(mode: Mode, theme: Theme, history: History) -> Self {
        App {
            mode,
            theme,
            expression: String::new(),
            history,
            cursor: (0, 0),
            view: View::Calculator,
            status: None,
            quit: false,
        }
    }

    /// Single dispatch point for button activation.
    pub fn activate(&mut self, command: ButtonCommand) {
        debug!(?command, "dispatch");
        match command {
            ButtonCommand::Insert(token) => self.expression.push_str(&token),
            ButtonCommand::Clear => self.expression.clear(),
            ButtonCommand::Equals => self.calculate(),
            ButtonCommand::ShowHistory => self.view = View::History,
            ButtonCommand::Convert(key) => self.convert(key),
        }
    }

    /// Evaluate the display buffer. Empty input is a no-op. On success
    /// the display shows the result and the entry is appended to history;
    /// on failure the buffer is left untouched and a blocking error
    /// dialog opens.
    fn calculate(&mut self) {
        if self.expression.is_empty() {
            return;
        }
        match evaluate(&self.expression, self.mode) {
            Ok(value) => {
                let result = format_result(value);
                self.history
                    .record(format!("{} = {}", self.expression, result));
                self.expression = result;
            }
            Err(e) => {
                self.view = View::Error(format!("Invalid Expression: {}", e));
            }
        }
    }

    /// Convert the displayed amount with the given rule key. The result
    /// is rounded to 4 decimal places for display; history records full
    /// precision.
    fn convert(&mut self, key: String) {
        match self.expression.trim().parse::<f64>() {
            Ok(amount) => {
                let result = convert(amount, &key);
                self.history
                    .record(format!("{} {} = {}", amount, key, result));
                self.expression = format_result(round_for_display(result));
            }
            Err(_) => {
                self.view = View::Error("Enter a valid number first".to_string());
            }
        }
    }

    /// Mode switch clears the buffer and resets grid focus.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.expression.clear();
        self.cursor = (0, 0);
    }

    pub fn next_mode(&mut self) {
        let current = Mode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0);
        self.set_mode(Mode::ALL[(current + 1) % Mode::ALL.len()]);
    }

    pub fn backspace(&mut self) {
        self.expression.pop();
    }

    fn selected_label(&self) -> &'static str {
        let layout = button_layout(self.mode);
        let (row, col) = self.cursor;
        layout
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or("")
    }

    fn move_cursor(&mut self, delta: (isize, isize)) {
        let layout = button_layout(self.mode);
        let rows = layout.len() as isize;
        let cols = layout[0].len() as isize;
        let row = (self.cursor.0 as isize + delta.0).clamp(0, rows - 1);
        let col = (self.cursor.1 as isize + delta.1).clamp(0, cols - 1);
        self.cursor = (row as usize, col as usize);
    }

    fn export_history(&mut self) {
        match self.history.export("calculator_export.txt") {
            Ok(()) => {
                self.status = Some("History exported to calculator_export.txt".to_string());
            }
            Err(_) => {
                self.status = Some("Could not export history".to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        match &self.view {
            View::Error(_) => {
                // Blocking dialog: any key dismisses it
                self.view = View::Calculator;
            }
            View::History => match key.code {
                KeyCode::Char('c') => {
                    self.history.clear();
                    self.status = Some("History cleared".to_string());
                    self.view = View::Calculator;
                }
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                    self.view = View::Calculator;
                }
                _ => {}
            },
            View::Calculator => match key.code {
                KeyCode::Char('q') => self.quit = true,
                KeyCode::Char('t') => self.theme.toggle(),
                KeyCode::Char('x') => self.export_history(),
                KeyCode::Char('h') => self.view = View::History,
                KeyCode::Tab => self.next_mode(),
                KeyCode::Esc => self.expression.clear(),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Up => self.move_cursor((-1, 0)),
                KeyCode::Down => self.move_cursor((1, 0)),
                KeyCode::Left => self.move_cursor((0, -1)),
                KeyCode::Right => self.move_cursor((0, 1)),
                KeyCode::Enter => {
                    let label = self.selected_label();
                    if let Some(command) = command_for_label(label, self.mode) {
                        self.activate(command);
                    }
                }
                KeyCode::Char('=') => self.calculate(),
                KeyCode::Char('^') => self.activate(ButtonCommand::Insert("^".to_string())),
                KeyCode::Char(c) if "0123456789.+-*/()".contains(c) => {
                    if let Some(command) = command_for_label(&c.to_string(), self.mode) {
                        self.activate(command);
                    }
                }
                _ => {}
            },
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame) {
        let palette = self.theme.palette();
        let area = f.area();

        f.render_widget(
            Block::default().style(Style::default().bg(palette.bg)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // top bar
                Constraint::Length(1), // mode selector
                Constraint::Length(3), // display
                Constraint::Min(6),    // button grid
                Constraint::Length(1), // status / tooltip
            ])
            .split(area);

        self.draw_top_bar(f, chunks[0]);
        self.draw_mode_selector(f, chunks[1]);
        self.draw_display(f, chunks[2]);
        self.draw_button_grid(f, chunks[3]);
        self.draw_status(f, chunks[4]);

        match self.view.clone() {
            View::History => self.draw_history_popup(f, area),
            View::Error(message) => self.draw_error_dialog(f, area, &message),
            View::Calculator => {}
        }

        // One-shot status messages clear after a single frame
        self.status = None;
    }

    fn draw_top_bar(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let line = Line::from(vec![
            Span::styled(
                format!(" {} [t] ", self.theme.label()),
                Style::default().bg(palette.button_special).fg(palette.text),
            ),
            Span::raw(" "),
            Span::styled(
                " Export [x] ",
                Style::default().bg(palette.button_special).fg(palette.text),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_mode_selector(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let mut spans = vec![Span::raw(" ")];
        for mode in Mode::ALL {
            let style = if mode == self.mode {
                Style::default().bg(palette.mode_selected).fg(palette.display_fg)
            } else {
                Style::default().bg(palette.mode_bg).fg(palette.text)
            };
            spans.push(Span::styled(format!(" {} ", mode), style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_display(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(palette.display_bg).fg(palette.display_fg));
        let display = Paragraph::new(self.expression.clone())
            .right_aligned()
            .block(block);
        f.render_widget(display, area);
    }

    fn draw_button_grid(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let layout = button_layout(self.mode);

        let mut lines = Vec::new();
        for (r, row) in layout.iter().enumerate() {
            let mut spans = vec![Span::raw(" ")];
            for (c, label) in row.iter().enumerate() {
                if label.is_empty() {
                    spans.push(Span::raw(" ".repeat(BUTTON_WIDTH)));
                    spans.push(Span::raw(" "));
                    continue;
                }
                let bg = match button_kind(label) {
                    ButtonKind::Equals => palette.button_equals,
                    ButtonKind::Special => palette.button_special,
                    ButtonKind::Regular => palette.button_regular,
                };
                let fg = if button_kind(label) == ButtonKind::Special {
                    palette.text
                } else {
                    palette.display_fg
                };
                let mut style = Style::default().bg(bg).fg(fg);
                if self.cursor == (r, c) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(center_label(label), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::default());
        }

        f.render_widget(Paragraph::new(lines), area);
    }

    fn draw_status(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let text = if let Some(ref message) = self.status {
            message.clone()
        } else if let Some(tip) = tooltip(self.selected_label()) {
            format!("{}: {}", self.selected_label(), tip)
        } else {
            "Arrows:move  Enter:press  =:calculate  Tab:mode  t:theme  h:history  x:export  q:quit"
                .to_string()
        };
        let line = Line::from(Span::styled(
            format!(" {} ", text),
            Style::default().fg(palette.text),
        ));
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_history_popup(&self, f: &mut ratatui::Frame, area: Rect) {
        let palette = self.theme.palette();
        let popup = centered_rect(area, 60, 70);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Calculation History ")
            .style(Style::default().bg(palette.display_bg).fg(palette.display_fg));

        let mut lines: Vec<Line> = self
            .history
            .recent()
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect();
        if lines.is_empty() {
            lines.push(Line::from("(empty)"));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "c:clear history  Esc:close",
            Style::default().add_modifier(Modifier::DIM),
        )));

        f.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn draw_error_dialog(&self, f: &mut ratatui::Frame, area: Rect, message: &str) {
        let popup = centered_rect(area, 50, 20);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .style(Style::default().bg(Color::Red).fg(Color::White));

        let lines = vec![
            Line::from(message.to_string()),
            Line::default(),
            Line::from(Span::styled(
                "press any key",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        f.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn center_label(label: &str) -> String {
    let len = label.chars().count();
    if len >= BUTTON_WIDTH {
        return label.to_string();
    }
    let pad = BUTTON_WIDTH - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(pad - left))
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
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

/// Run the window until the user quits. History is saved on the way out.
pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(app, &mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.history.save();
    result
}

fn event_loop(app: &mut App, terminal: &mut RatatuiTerminal) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if let Event::Key(key) = read()? {
            app.handle_key(key);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
