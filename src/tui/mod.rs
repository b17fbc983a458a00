//! Full-screen front-end
//!
//! The mansion, the clue notebook and the courtroom, drawn with ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType},
};
use crate::data::Severity;

/// Colors of the mansion at night
pub struct Theme {
    pub text: Color,
    pub accent: Color,
    /// Failed accusations, the exit key
    pub danger: Color,
    /// Clues and sustained verdicts
    pub found: Color,
    pub caution: Color,
    pub frame: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Gray,
            accent: Color::Yellow,
            danger: Color::LightRed,
            found: Color::LightGreen,
            caution: Color::Yellow,
            frame: Color::DarkGray,
            hint: Color::LightBlue,
        }
    }
}

/// Narration color for each kind of message
pub fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Info => Color::White,
        Severity::Discovery => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Verdict => Color::Magenta,
    }
}

/// Rounded panel with a bold title
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.frame))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔════════════════════════════════════════════════════════════╗
║                                                            ║
║   ██████╗ ███████╗████████╗███████╗ ██████╗████████╗       ║
║   ██╔══██╗██╔════╝╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝       ║
║   ██║  ██║█████╗     ██║   █████╗  ██║        ██║          ║
║   ██║  ██║██╔══╝     ██║   ██╔══╝  ██║        ██║          ║
║   ██████╔╝███████╗   ██║   ███████╗╚██████╗   ██║          ║
║   ╚═════╝ ╚══════╝   ╚═╝   ╚══════╝ ╚═════╝   ╚═╝          ║
║                                                            ║
║                     Q  U  E  S  T                          ║
║                                                            ║
║          Investigue a mansão e colete pistas!              ║
╚════════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════╗
║                  CONTROLES                    ║
╠═══════════════════════════════════════════════╣
║  ↑/↓    Escolher capítulo                     ║
║  Enter  Confirmar                             ║
║  ?      Mostrar/ocultar esta ajuda            ║
║  q      Sair do jogo                          ║
╠═══════════════════════════════════════════════╣
║                 NA MANSÃO                     ║
╠═══════════════════════════════════════════════╣
║  e / ←  Seguir pela esquerda                  ║
║  d / →  Seguir pela direita                   ║
║  s      Encerrar a exploração                 ║
╠═══════════════════════════════════════════════╣
║                 ACUSAÇÃO                      ║
╠═══════════════════════════════════════════════╣
║  Digite o nome exato do suspeito e Enter      ║
║  Esc    Encerrar sem julgamento               ║
╚═══════════════════════════════════════════════╝
"#;

/// Header, body and key hints, top to bottom
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::vertical([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
        .split(area)
        .to_vec()
}

/// Room panel on the left, notebook on the right
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area)
        .to_vec()
}

/// Narration above, collected clues below
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area)
        .to_vec()
}

/// Center a `width` x `height` box inside `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(area, 200, 50), area);
    }

    #[test]
    fn layouts_cover_the_screen() {
        let area = Rect::new(0, 0, 100, 30);
        let main = create_main_layout(area);
        assert_eq!(main.len(), 3);
        assert_eq!(main.iter().map(|r| r.height).sum::<u16>(), 30);
    }
}
