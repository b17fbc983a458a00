//! Main application state and rendering

use crate::game::investigation::{Judgment, Outcome};
use crate::game::narrative::{GameEvent, Narrator};
use crate::game::scenario::Chapter;
use crate::game::{GameMessage, Investigation, MessageLog, Navigation, Step};
use crate::data::Severity;
use crate::tui::widgets::{DramaticBox, ExplorationBar};
use crate::tui::{centered_rect, severity_color, styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crate::GameError;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Messages kept in the narration scrollback
const SCROLLBACK: usize = 200;

/// Application state
pub struct App {
    pub investigation: Option<Investigation>,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub menu_state: ListState,
    pub log: MessageLog,
    pub input_buffer: String,
    pub judgment: Option<Judgment>,
}

/// Current screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Exploring,
    Accusation,
    Verdict,
}

impl App {
    /// New app with `chapter` highlighted in the menu
    pub fn new(chapter: Chapter) -> Self {
        let mut menu_state = ListState::default();
        let selected = Chapter::all().iter().position(|c| *c == chapter);
        menu_state.select(Some(selected.unwrap_or(0)));

        Self {
            investigation: None,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            menu_state,
            log: MessageLog::with_limit(SCROLLBACK),
            input_buffer: String::new(),
            judgment: None,
        }
    }

    /// Poll the keyboard once. Returns whether the app is still running.
    pub fn handle_input(&mut self) -> Result<bool, GameError> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code)?;
                }
            }
        }
        Ok(self.running)
    }

    /// Apply a single key press
    pub fn handle_key(&mut self, code: KeyCode) -> Result<(), GameError> {
        if self.show_help {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.show_help = false;
            }
            return Ok(());
        }

        match self.current_screen {
            Screen::Title => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('?') => self.show_help = true,
                KeyCode::Up => self.navigate_menu(-1),
                KeyCode::Down => self.navigate_menu(1),
                KeyCode::Enter => self.start_chapter(self.selected_chapter())?,
                _ => {}
            },
            Screen::Exploring => match code {
                KeyCode::Char('q') => self.running = false,
                KeyCode::Char('?') => self.show_help = true,
                KeyCode::Left => self.navigate(Navigation::Left)?,
                KeyCode::Right => self.navigate(Navigation::Right)?,
                KeyCode::Esc => self.navigate(Navigation::Exit)?,
                KeyCode::Char(c) => self.navigate(Navigation::parse(&c.to_string()))?,
                _ => {}
            },
            // Typing a name, so no single-letter shortcuts here
            Screen::Accusation => match code {
                KeyCode::Enter => self.submit_accusation()?,
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.submit_accusation()?;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            },
            Screen::Verdict => match code {
                KeyCode::Char('q') => self.running = false,
                KeyCode::Char('?') => self.show_help = true,
                KeyCode::Enter | KeyCode::Esc => self.back_to_title(),
                _ => {}
            },
        }
        Ok(())
    }

    pub fn selected_chapter(&self) -> Chapter {
        let chapters = Chapter::all();
        let index = self.menu_state.selected().unwrap_or(0).min(chapters.len() - 1);
        chapters[index]
    }

    fn navigate_menu(&mut self, delta: isize) {
        let len = Chapter::all().len() as isize;
        let current = self.menu_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.menu_state.select(Some(next as usize));
    }

    fn start_chapter(&mut self, chapter: Chapter) -> Result<(), GameError> {
        tracing::info!(%chapter, "starting chapter");
        self.log.clear();
        self.input_buffer.clear();
        self.judgment = None;
        self.log.push(GameMessage::new(Severity::Info, chapter.title()));
        self.log.push(GameMessage::new(Severity::Info, chapter.synopsis()));

        let mut investigation = Investigation::new(chapter.scenario());
        investigation.start(&mut self.log)?;
        self.investigation = Some(investigation);
        self.current_screen = Screen::Exploring;
        Ok(())
    }

    fn navigate(&mut self, choice: Navigation) -> Result<(), GameError> {
        let Some(investigation) = self.investigation.as_mut() else {
            return Ok(());
        };
        if investigation.step(choice, &mut self.log)? == Step::Exited {
            self.finish_exploration()?;
        }
        Ok(())
    }

    fn finish_exploration(&mut self) -> Result<(), GameError> {
        let Some(investigation) = self.investigation.as_ref() else {
            return Ok(());
        };
        investigation.report(&mut self.log)?;

        if investigation.chapter().has_accusation() {
            let suspects = investigation
                .suspects()
                .suspects()
                .into_iter()
                .map(str::to_string)
                .collect();
            self.log.narrate(&GameEvent::AskAccusation { suspects });
            self.input_buffer.clear();
            self.current_screen = Screen::Accusation;
        } else {
            self.current_screen = Screen::Verdict;
        }
        Ok(())
    }

    fn submit_accusation(&mut self) -> Result<(), GameError> {
        let Some(investigation) = self.investigation.as_ref() else {
            return Ok(());
        };
        let name = self.input_buffer.trim();
        let accused = (!name.is_empty()).then_some(name);
        let judgment = investigation.accuse(accused, &mut self.log)?;
        self.judgment = Some(judgment);
        self.current_screen = Screen::Verdict;
        Ok(())
    }

    fn back_to_title(&mut self) {
        self.investigation = None;
        self.judgment = None;
        self.input_buffer.clear();
        self.current_screen = Screen::Title;
    }

    /// Render the current screen
    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::Title => self.render_title(frame),
            Screen::Exploring | Screen::Accusation => self.render_game(frame),
            Screen::Verdict => self.render_verdict(frame),
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let menu_height: u16 = Chapter::all().len() as u16 + 2;
        let logo_height = LOGO.lines().count() as u16;
        let show_logo = area.height >= logo_height + menu_height + 6;

        let menu_y = if show_logo {
            let start_y = area.height.saturating_sub(logo_height + menu_height + 5) / 2;
            let logo = Paragraph::new(LOGO)
                .style(Style::default().fg(self.theme.accent))
                .alignment(Alignment::Center);
            frame.render_widget(logo, Rect::new(area.x, start_y, area.width, logo_height));
            start_y + logo_height + 1
        } else {
            // Compact mode for small terminals
            let title = Paragraph::new("═══ DETECTIVE QUEST ═══")
                .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            frame.render_widget(title, Rect::new(0, 1, area.width, 1));
            3
        };

        let menu_area = Rect::new(
            area.width / 4,
            menu_y.min(area.height.saturating_sub(menu_height)),
            area.width / 2,
            menu_height.min(area.height),
        );
        let items: Vec<ListItem> = Chapter::all()
            .iter()
            .map(|chapter| ListItem::new(format!("  ▶ {}", chapter.title())))
            .collect();
        let menu = List::new(items)
            .block(styled_block("Capítulos", &self.theme))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("→ ");
        frame.render_stateful_widget(menu, menu_area, &mut self.menu_state);

        let synopsis_y = menu_area.y + menu_area.height;
        if synopsis_y + 1 < area.height {
            let synopsis = Paragraph::new(self.selected_chapter().synopsis())
                .style(Style::default().fg(self.theme.hint))
                .alignment(Alignment::Center);
            frame.render_widget(synopsis, Rect::new(0, synopsis_y, area.width, 1));
        }

        if area.height > 1 {
            let footer = Paragraph::new("Enter para começar | ? ajuda | q sair")
                .style(Style::default().fg(self.theme.frame))
                .alignment(Alignment::Center);
            frame.render_widget(footer, Rect::new(0, area.height - 1, area.width, 1));
        }
    }

    fn render_game(&mut self, frame: &mut Frame) {
        let Some(investigation) = self.investigation.as_ref() else {
            return;
        };
        let layout = create_main_layout(frame.area());

        self.render_header(frame, layout[0], investigation);

        let content_layout = create_content_layout(layout[1]);
        self.render_side_panel(frame, content_layout[0], investigation);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);
        self.render_clue_panel(frame, main_layout[1], investigation);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, investigation: &Investigation) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(19),
                Constraint::Min(20),
                Constraint::Length(24),
            ])
            .split(area);

        let bordered = || {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.frame))
        };

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(bordered());
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(investigation.chapter().title())
            .style(Style::default().fg(self.theme.caution))
            .alignment(Alignment::Center)
            .block(bordered());
        frame.render_widget(title, header_layout[1]);

        let counts = format!(
            " Pistas: {} | Passos: {} ",
            investigation.clues().total_occurrences(),
            investigation.path().len()
        );
        let counts = Paragraph::new(counts)
            .style(Style::default().fg(self.theme.text))
            .alignment(Alignment::Right)
            .block(bordered());
        frame.render_widget(counts, header_layout[2]);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect, investigation: &Investigation) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),   // Exploration progress
                Constraint::Min(6),      // Room or suspects
            ])
            .split(area);

        let progress_block = styled_block("Mansão", &self.theme);
        let progress_area = progress_block.inner(chunks[0]);
        frame.render_widget(progress_block, chunks[0]);
        frame.render_widget(
            ExplorationBar::new(
                "Cômodos",
                investigation.visited().len(),
                investigation.mansion().room_count(),
            )
            .color(self.theme.accent),
            progress_area,
        );

        if self.current_screen == Screen::Accusation {
            let items: Vec<ListItem> = investigation
                .suspects()
                .suspects()
                .into_iter()
                .map(|name| ListItem::new(format!("  • {}", name)))
                .collect();
            let list = List::new(items).block(styled_block("Suspeitos", &self.theme));
            frame.render_widget(list, chunks[1]);
            return;
        }

        let room = investigation.current_room();
        let mut lines = vec![
            Line::from(Span::styled(
                room.name().to_string(),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        let directions = room.directions();
        if directions.is_empty() {
            lines.push(Line::from(Span::styled(
                "Sem saídas. Pressione s para encerrar.",
                Style::default().fg(self.theme.caution),
            )));
        }
        for (side, name) in directions {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", side.key()), Style::default().fg(self.theme.found)),
                Span::raw(name.to_string()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("[s] ", Style::default().fg(self.theme.danger)),
            Span::raw("Sair"),
        ]));

        let panel = Paragraph::new(lines)
            .block(styled_block("Cômodo atual", &self.theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(panel, chunks[1]);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let (output_area, input_area) = if self.current_screen == Screen::Accusation {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(3)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let visible_lines = output_area.height.saturating_sub(2) as usize;
        let messages = self.log.messages();
        let start = messages.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = messages[start..]
            .iter()
            .map(|message| {
                let mut style = Style::default().fg(severity_color(&message.severity));
                if message.severity == Severity::Verdict {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::from(vec![
                    Span::styled(
                        format!("{} {} ", message.timestamp.format("%H:%M:%S"), message.severity.symbol()),
                        Style::default().fg(self.theme.frame),
                    ),
                    Span::styled(message.message.as_str(), style),
                ])
            })
            .collect();

        let narration = Paragraph::new(lines)
            .block(styled_block("Diário do detetive", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(narration, output_area);

        if let Some(input_area) = input_area {
            let input = Paragraph::new(format!("> {}_", self.input_buffer))
                .style(Style::default().fg(Color::Green))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Green))
                        .title(" Acusado "),
                );
            frame.render_widget(input, input_area);
        }
    }

    fn render_clue_panel(&self, frame: &mut Frame, area: Rect, investigation: &Investigation) {
        let clues = investigation.clues();
        let items: Vec<ListItem> = if clues.is_empty() {
            vec![ListItem::new(Span::styled(
                "Nenhuma pista coletada.",
                Style::default().fg(self.theme.frame),
            ))]
        } else {
            clues
                .entries()
                .iter()
                .map(|entry| ListItem::new(format!(" - {}", entry)))
                .collect()
        };
        let list = List::new(items).block(styled_block("Pistas", &self.theme));
        frame.render_widget(list, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = match self.current_screen {
            Screen::Accusation => " Digite o nome e Enter | Esc encerra sem julgamento ",
            _ => " e/← esquerda | d/→ direita | s sair | ? ajuda | q fechar ",
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.text).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_verdict(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        let Some(investigation) = self.investigation.as_ref() else {
            return;
        };

        let chapter = investigation.chapter();
        let mut verdict = DramaticBox::new(if chapter.has_accusation() { "VEREDITO" } else { "FIM DA EXPLORAÇÃO" })
            .border_color(self.theme.hint)
            .line(chapter.title(), self.theme.accent)
            .line(
                &format!("Cômodos visitados: {}", investigation.visited().join(" → ")),
                self.theme.text,
            )
            .line("", self.theme.text);

        if chapter.reports_clues() {
            let report = GameEvent::Report { entries: investigation.clues().entries() };
            for line in report.lines() {
                verdict = verdict.line(&line, self.theme.found);
            }
            verdict = verdict.line("", self.theme.text);
        }

        if let Some(judgment) = &self.judgment {
            let color = match judgment {
                Judgment::Verdict(v) => match v.outcome {
                    Outcome::Sustained => self.theme.found,
                    Outcome::Insufficient => self.theme.caution,
                    Outcome::Unfounded => self.theme.danger,
                },
                Judgment::NoJudgment => self.theme.frame,
            };
            for line in GameEvent::Judged(judgment.clone()).lines() {
                verdict = verdict.line(&line, color);
            }
            verdict = verdict.line("", self.theme.text);
        }
        verdict = verdict.line("Enter volta ao menu | q sai", self.theme.frame);

        frame.render_widget(verdict, centered_rect(area, 76, 24));
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 53, 24);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.text))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Chapter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::investigation::Verdict;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyCode::Char(c)).unwrap();
        }
    }

    #[test]
    fn menu_wraps_around() {
        let mut app = App::new(Chapter::Mansion);
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.selected_chapter(), Chapter::Accusation);
        app.handle_key(KeyCode::Down).unwrap();
        assert_eq!(app.selected_chapter(), Chapter::Mansion);
    }

    #[test]
    fn enter_starts_the_selected_chapter() {
        let mut app = App::new(Chapter::Clues);
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.current_screen, Screen::Exploring);
        assert!(app
            .log
            .messages()
            .iter()
            .any(|m| m.message == "Você está em: Hall de Entrada"));
    }

    #[test]
    fn arrows_move_like_letters() {
        let mut app = App::new(Chapter::Clues);
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Left).unwrap();
        app.handle_key(KeyCode::Right).unwrap();
        let investigation = app.investigation.as_ref().unwrap();
        assert_eq!(investigation.current_room().name(), "Jardim");
    }

    #[test]
    fn full_case_ends_in_verdict() {
        let mut app = App::new(Chapter::Accusation);
        app.handle_key(KeyCode::Enter).unwrap();
        press(&mut app, "eds");
        assert_eq!(app.current_screen, Screen::Accusation);

        press(&mut app, "Sr. Verdes");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.current_screen, Screen::Verdict);
        assert_eq!(
            app.judgment,
            Some(Judgment::Verdict(Verdict::new("Sr. Verdes", 2)))
        );

        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.current_screen, Screen::Title);
        assert!(app.investigation.is_none());
    }

    #[test]
    fn escape_at_accusation_gives_no_judgment() {
        let mut app = App::new(Chapter::Accusation);
        app.handle_key(KeyCode::Enter).unwrap();
        press(&mut app, "s");
        press(&mut app, "Pin");
        app.handle_key(KeyCode::Esc).unwrap();
        assert_eq!(app.judgment, Some(Judgment::NoJudgment));
    }

    #[test]
    fn chapters_without_accusation_skip_the_prompt() {
        let mut app = App::new(Chapter::Mansion);
        app.handle_key(KeyCode::Enter).unwrap();
        press(&mut app, "s");
        assert_eq!(app.current_screen, Screen::Verdict);
        assert_eq!(app.judgment, None);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = App::new(Chapter::Clues);
        app.handle_key(KeyCode::Enter).unwrap();
        press(&mut app, "?");
        press(&mut app, "e");
        assert_eq!(app.investigation.as_ref().unwrap().path().len(), 0);
        app.handle_key(KeyCode::Esc).unwrap();
        press(&mut app, "e");
        assert_eq!(app.investigation.as_ref().unwrap().path().len(), 1);
    }

    #[test]
    fn q_quits_from_title() {
        let mut app = App::default();
        press(&mut app, "q");
        assert!(!app.running);
    }

    #[test]
    fn every_screen_renders() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = App::new(Chapter::Accusation);
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        press(&mut app, "?");
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Esc).unwrap();
        press(&mut app, "s");
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert_eq!(app.current_screen, Screen::Verdict);
    }
}
