use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::audio::AudioSink;
use crate::game::{Game, GameOverReason, Phase, Position};
use crate::metrics::GameMetrics;

const SNAKE_GREEN: Color = Color::Rgb(43, 51, 24);
const BOARD_GREEN: Color = Color::Rgb(173, 204, 96);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<A: AudioSink>(&self, frame: &mut Frame, game: &Game<A>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_title_and_scores(game), chunks[0]);

        let board_area = board_rect(chunks[1], game.config().grid_size);
        frame.render_widget(self.render_grid(game), board_area);

        match game.phase() {
            Phase::NotStarted => {
                let popup = popup_rect(board_area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_start_message(metrics), popup);
            }
            Phase::Paused => {
                let popup = popup_rect(board_area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_pause_message(), popup);
            }
            Phase::Running => {}
        }

        frame.render_widget(self.render_controls(metrics), chunks[2]);
    }

    fn render_grid<A: AudioSink>(&self, game: &Game<A>) -> Paragraph<'_> {
        let snake = game.snake();
        let size = game.config().grid_size;
        let row_len = usize::try_from(size).unwrap_or_default();
        let mut lines = Vec::with_capacity(row_len);

        for y in 0..size {
            let mut spans = Vec::with_capacity(row_len);

            for x in 0..size {
                let pos = Position::new(x, y);

                let cell = if pos == snake.head() {
                    Span::styled(
                        "██",
                        Style::default().fg(SNAKE_GREEN).add_modifier(Modifier::BOLD),
                    )
                } else if snake.body().contains(&pos) {
                    Span::styled("▓▓", Style::default().fg(SNAKE_GREEN))
                } else if pos == game.food() {
                    Span::styled(
                        "()",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .style(Style::default().bg(BOARD_GREEN))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(SNAKE_GREEN).bg(BOARD_GREEN)),
            )
    }

    fn render_title_and_scores<A: AudioSink>(&self, game: &Game<A>) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                "Retro Snake",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(game.best_score().to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_message(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![Line::from("")];

        if let (Some(score), Some(reason)) = (metrics.last_score, metrics.last_reason) {
            let headline = match reason {
                GameOverReason::BoardFilled => "BOARD CLEARED",
                GameOverReason::Wall | GameOverReason::SelfCollision => "GAME OVER",
            };
            text.push(Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            text.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        text.push(Line::from(Span::styled(
            "Press any arrow key to start",
            Style::default().fg(Color::White),
        )));

        overlay(text)
    }

    fn render_pause_message(&self) -> Paragraph<'_> {
        overlay(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game Paused",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press any arrow key to resume",
                Style::default().fg(Color::Gray),
            )),
        ])
    }

    fn render_controls(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::raw(metrics.format_time()),
            Span::raw("  "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::raw(metrics.games_played.to_string()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn overlay(text: Vec<Line<'_>>) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
}

/// Board rectangle centred in `area`; each cell is two columns wide
fn board_rect(area: Rect, grid_size: i32) -> Rect {
    let cells = u16::try_from(grid_size.max(0)).unwrap_or(u16::MAX);
    let width = cells.saturating_mul(2).saturating_add(2);
    let height = cells.saturating_add(2);
    centered(area, width, height)
}

fn popup_rect(board: Rect) -> Rect {
    let width = board.width.saturating_sub(4).min(40);
    centered(board, width, 6)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
