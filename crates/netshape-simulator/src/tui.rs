use std::{
    io,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::trace::RunSummary;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use netshape_abstract::{Algorithm, ShapingConfig, SimulationStep};
use ratatui::{
    prelude::*,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
};

/// A tracing subscriber writer that collects log lines in memory so they do
/// not corrupt the alternate screen while the TUI is up.
#[derive(Clone)]
pub struct MemoryLogBuffer {
    logs: Arc<Mutex<Vec<String>>>,
}

impl Default for MemoryLogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLogBuffer {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, msg: String) {
        let mut logs = self.logs.lock().unwrap();
        logs.push(msg);
        // Keep last 1000 logs
        if logs.len() > 1000 {
            logs.remove(0);
        }
    }
}

impl io::Write for MemoryLogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.push(s.trim().to_string());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Interactive stepper over a precomputed simulation trace.
///
/// The whole trace is computed up front (the engines are single-pass and
/// cheap); the TUI only moves a cursor through it, one time unit per tick
/// while running, or one per `s` keypress while paused.
pub struct TuiApp {
    algorithm: Algorithm,
    config: ShapingConfig,
    steps: Vec<SimulationStep>,
    cursor: usize,
    paused: bool,
    scenario_name: Option<String>,
    /// Vertical scroll offset for the step log list
    log_scroll: usize,
}

impl TuiApp {
    pub fn new(
        algorithm: Algorithm,
        config: ShapingConfig,
        steps: Vec<SimulationStep>,
        scenario_name: Option<String>,
    ) -> Self {
        Self {
            algorithm,
            config,
            steps,
            cursor: 0,
            paused: true, // Start paused
            scenario_name,
            log_scroll: 0,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(400);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.ui(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if crossterm::event::poll(timeout)?
                && let Event::Key(key) = event::read()?
            {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => self.paused = !self.paused,
                    KeyCode::Char('s') => self.advance(),
                    KeyCode::Char('r') => {
                        self.cursor = 0;
                        self.paused = true;
                    }
                    KeyCode::Up => {
                        self.log_scroll = self.log_scroll.saturating_add(1);
                    }
                    KeyCode::Down => {
                        if self.log_scroll > 0 {
                            self.log_scroll -= 1;
                        }
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if !self.paused {
                    if self.cursor < self.steps.len() {
                        self.advance();
                    } else {
                        self.paused = true;
                    }
                }
                last_tick = Instant::now();
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn advance(&mut self) {
        if self.cursor < self.steps.len() {
            self.cursor += 1;
        }
    }

    fn visible(&self) -> &[SimulationStep] {
        &self.steps[..self.cursor]
    }

    fn ui(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Control bar
                Constraint::Min(0),     // Chart + dashboard
                Constraint::Length(10), // Step log
            ])
            .split(f.area());

        self.render_control(f, rows[0]);

        let mid_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        self.render_chart(f, mid_chunks[0]);
        self.render_dashboard(f, mid_chunks[1]);

        self.render_step_log(f, rows[2]);
    }

    fn render_control(&self, f: &mut Frame, area: Rect) {
        let scenario = self.scenario_name.as_deref().unwrap_or("Ad-hoc Simulation");
        let status_text = format!(
            "Scenario: {} | Algorithm: {} | Time: {}/{} | Status: {} | (q)uit (space)pause/resume (s)tep (r)ewind",
            scenario,
            self.algorithm.title(),
            self.cursor,
            self.steps.len(),
            if self.paused { "PAUSED" } else { "RUNNING" },
        );
        let status_block = Paragraph::new(status_text)
            .block(Block::default().borders(Borders::ALL).title("Control"));
        f.render_widget(status_block, area);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let visible = self.visible();
        if visible.is_empty() {
            let block = Paragraph::new("No steps yet (press space to run)")
                .block(Block::default().borders(Borders::ALL).title("Buffer"));
            f.render_widget(block, area);
            return;
        }

        let buffer_points: Vec<(f64, f64)> = visible
            .iter()
            .map(|s| (s.time as f64, s.buffer_after as f64))
            .collect();

        let token_points: Vec<(f64, f64)> = visible
            .iter()
            .filter_map(|s| s.tokens_available.map(|t| (s.time as f64, t as f64)))
            .collect();

        let mut y_max = self.config.capacity.max(1) as f64;
        for (_, y) in buffer_points.iter().chain(token_points.iter()) {
            if *y > y_max {
                y_max = *y;
            }
        }

        let mut datasets = vec![
            Dataset::default()
                .name("buffer")
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(Color::Cyan))
                .graph_type(GraphType::Line)
                .data(&buffer_points),
        ];

        if !token_points.is_empty() {
            datasets.push(
                Dataset::default()
                    .name("tokens")
                    .marker(symbols::Marker::Braille)
                    .style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::DIM),
                    )
                    .graph_type(GraphType::Line)
                    .data(&token_points),
            );
        }

        // Keep a non-degenerate x span even for single-step traces
        let x_max = (self.steps.len() as f64).max(2.0);
        let x_labels = vec![Span::raw("1"), Span::raw(""), Span::raw(format!("{}", x_max))];
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(""),
            Span::raw(format!("{:.0}", y_max)),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Buffer Usage Over Time"),
            )
            .x_axis(
                Axis::default()
                    .title("time")
                    .bounds([1.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("level")
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        f.render_widget(chart, area);
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let summary = RunSummary::from_steps(self.visible());
        let current = self.cursor.checked_sub(1).and_then(|i| self.steps.get(i));

        let mut lines = vec![
            Line::from("Totals so far:"),
            Line::from(format!("  Incoming: {}", summary.total_incoming)),
            Line::from(format!("  Sent:     {}", summary.total_sent)),
            Line::from(format!("  Dropped:  {}", summary.total_dropped)),
            Line::from(format!("  Loss:     {:.2}%", summary.loss_percent())),
            Line::from(""),
            Line::from(format!(
                "Config: capacity={} rate={}",
                self.config.capacity, self.config.rate
            )),
        ];

        if let Some(step) = current {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Current step (t={}):", step.time)));
            lines.push(Line::from(format!(
                "  buffer {} -> {}",
                step.buffer_before, step.buffer_after
            )));
            if let (Some(available), Some(left)) = (step.tokens_available, step.tokens_after) {
                lines.push(Line::from(format!("  tokens {} -> {}", available, left)));
            }
        }

        let block = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Dashboard"));
        f.render_widget(block, area);
    }

    fn render_step_log(&self, f: &mut Frame, area: Rect) {
        let visible = self.visible();
        if visible.is_empty() {
            let block = Paragraph::new("No steps yet")
                .block(Block::default().borders(Borders::ALL).title("Step Log"));
            f.render_widget(block, area);
            return;
        }

        let height = area.height.max(3) as usize;
        let rows = height - 2; // account for borders
        let total = visible.len();
        let max_scroll = total.saturating_sub(rows);
        let scroll = self.log_scroll.min(max_scroll);
        let start = total.saturating_sub(rows + scroll);
        let end = total.saturating_sub(scroll);
        let slice = &visible[start..end];

        let items: Vec<ListItem> = slice
            .iter()
            .map(|s| {
                let text = match (s.tokens_available, s.tokens_after) {
                    (Some(available), Some(left)) => format!(
                        "[t={:>3}] in={:<3} buf={:<3} tokens={:<3} sent={:<3} dropped={:<3} buf'={:<3} tokens'={}",
                        s.time, s.incoming, s.buffer_before, available, s.sent, s.dropped,
                        s.buffer_after, left
                    ),
                    _ => format!(
                        "[t={:>3}] in={:<3} buf={:<3} sent={:<3} dropped={:<3} buf'={}",
                        s.time, s.incoming, s.buffer_before, s.sent, s.dropped, s.buffer_after
                    ),
                };
                let style = if s.dropped > 0 {
                    Style::default().fg(Color::Red)
                } else if s.sent > 0 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(text, style)))
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Step Log"));
        f.render_widget(list, area);
    }
}
