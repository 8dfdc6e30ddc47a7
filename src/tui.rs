//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, implements `GameInterface`
//! - `render`: draws a `GameState`; pure, so it can be exercised on a test backend
//! - `key_to_action`: maps key presses to game actions
//!
//! Typed letters are submitted straight away; the game state decides whether
//! they count. No input buffer is kept here.

use crate::game_state::{GameInterface, GameState, RoundStatus, Tally, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const LOW_GUESSES_WARNING: usize = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const MASK_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Main TUI interface component.
///
/// Manages terminal setup and teardown, rendering, and key input.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round_over: bool,
    farewell: Option<String>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            round_over: false,
            farewell: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        // Printed after leaving the alternate screen so it stays visible.
        if let Some(farewell) = self.farewell.take() {
            println!("{farewell}");
        }
        Ok(())
    }

    fn draw(&mut self, game: &GameState) -> Result<(), io::Error> {
        self.terminal.draw(|f| render(f, game))?;
        Ok(())
    }
}

impl GameInterface for TuiInterface {
    fn display_state(&mut self, game: &GameState) {
        self.round_over = game.status().is_over();
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match event::read() {
            Ok(Event::Key(key)) => {
                let action = key_to_action(key, self.round_over);
                debug_log!("read_action() - {:?} -> {:?}", key.code, action);
                action
            }
            // Resizes and other events just trigger a redraw.
            Ok(_) => None,
            Err(e) => {
                log::error!("Failed to read terminal event: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_exit_message(&mut self, tally: &Tally) {
        self.farewell = Some(format!(
            "Thanks for playing! You won {} of {} rounds.",
            tally.rounds_won(),
            tally.rounds_played()
        ));
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Maps a key event to a game action.
///
/// Letters become guesses, Tab asks for a new word at any time and Enter does so
/// once the round is over. Esc and Ctrl-C quit. Key releases and repeats
/// (reported on some platforms) are ignored.
pub fn key_to_action(key: KeyEvent, round_over: bool) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserAction::Exit)
        }
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Tab => Some(UserAction::NewRound),
        KeyCode::Enter if round_over => Some(UserAction::NewRound),
        KeyCode::Char(c) if !has_modifier_keys(&key) => Some(UserAction::Guess(c.to_string())),
        _ => None,
    }
}

/// Render the complete UI for `game`.
pub fn render(f: &mut Frame, game: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Tally
            Constraint::Length(3), // Word
            Constraint::Length(3), // Guessed letters
            Constraint::Length(3), // Remaining guesses
            Constraint::Min(3),    // Message
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_tally(f, chunks[1], &game.tally());
    render_mask(f, chunks[2], game);
    render_guessed(f, chunks[3], game);
    render_remaining(f, chunks[4], game);
    render_message(f, chunks[5], game.message());
    render_instructions(f, chunks[6], game.status());
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("GUESS THE WORD")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_tally(f: &mut Frame, area: Rect, tally: &Tally) {
    let mut text = format!(
        "Wins: {} of {} rounds",
        tally.rounds_won(),
        tally.rounds_played()
    );
    if let Some(rate) = tally.win_rate() {
        text.push_str(&format!(" ({:.0}%)", rate * 100.0));
    }
    let paragraph = Paragraph::new(text)
        .style(INFO_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_mask(f: &mut Frame, area: Rect, game: &GameState) {
    let style = match game.status() {
        RoundStatus::InProgress => MASK_STYLE,
        RoundStatus::Won => SUCCESS_STYLE,
        RoundStatus::Lost => ERROR_STYLE,
    };
    let paragraph = Paragraph::new(game.mask_string())
        .style(style)
        .block(Block::default().title("Word").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_guessed(f: &mut Frame, area: Rect, game: &GameState) {
    let guessed = game.guessed_letters();
    let line = if guessed.is_empty() {
        Line::from("-")
    } else {
        let spans: Vec<Span> = guessed
            .iter()
            .map(|&c| {
                let style = if game.word().contains(c) {
                    SUCCESS_STYLE
                } else {
                    ERROR_STYLE
                };
                Span::styled(format!("{c} "), style)
            })
            .collect();
        Line::from(spans)
    };
    let paragraph = Paragraph::new(line)
        .block(Block::default().title("Guessed Letters").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_remaining(f: &mut Frame, area: Rect, game: &GameState) {
    let remaining = game.remaining_guesses();
    let style = if remaining <= LOW_GUESSES_WARNING {
        ERROR_STYLE
    } else {
        Style::default()
    };
    let text = format!(
        "Guesses left: {remaining} of {} ({} wrong)",
        game.max_guesses(),
        game.wrong_guesses()
    );
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_message(f: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(Span::styled(message, MESSAGE_STYLE))
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, status: RoundStatus) {
    let text = if status.is_over() {
        "ENTER/TAB: New word | ESC: Quit"
    } else {
        "Type a letter to guess | TAB: New word | ESC: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::Word;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(game: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|f| render(f, game)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_letters_become_guesses() {
        assert_eq!(
            key_to_action(press(KeyCode::Char('a')), false),
            Some(UserAction::Guess("a".to_string()))
        );
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            key_to_action(shifted, false),
            Some(UserAction::Guess("A".to_string()))
        );
    }

    #[test]
    fn test_modified_letters_are_ignored() {
        let alt = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(key_to_action(alt, false), None);
    }

    #[test]
    fn test_exit_keys() {
        assert_eq!(key_to_action(press(KeyCode::Esc), false), Some(UserAction::Exit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c, false), Some(UserAction::Exit));
    }

    #[test]
    fn test_new_round_keys() {
        assert_eq!(key_to_action(press(KeyCode::Tab), false), Some(UserAction::NewRound));
        assert_eq!(key_to_action(press(KeyCode::Enter), false), None);
        assert_eq!(key_to_action(press(KeyCode::Enter), true), Some(UserAction::NewRound));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(key, false), None);
    }

    #[test]
    fn test_render_fresh_round() {
        let game = GameState::new(Word::parse("cat").unwrap(), 4);
        let text = screen_text(&game);
        assert!(text.contains("GUESS THE WORD"));
        assert!(text.contains("Wins: 0 of 0 rounds"));
        assert!(text.contains("_ _ _"));
        assert!(text.contains("Guesses left: 4 of 4 (0 wrong)"));
    }

    #[test]
    fn test_render_finished_round() {
        let mut game = GameState::new(Word::parse("ox").unwrap(), 2);
        game.submit_guess("o");
        game.submit_guess("x");
        let text = screen_text(&game);
        assert!(text.contains("o x"));
        assert!(text.contains("Wins: 1 of 1 rounds (100%)"));
        assert!(text.contains("You won!"));
        assert!(text.contains("ENTER/TAB: New word"));
    }
}
