//! What the investigation tells the player, and how it hears back
//!
//! The core never touches a terminal. It emits [`GameEvent`]s to a
//! [`Narrator`] and pulls navigation tokens from a [`ChoiceSource`]; the TUI,
//! the line console and the tests each plug in their own implementations.

use crate::data::{ClueReport, Severity, Side};
use crate::game::investigation::{Judgment, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Everything the investigation can announce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Entered { room: String },
    ClueFound { clue: String },
    NoClue,
    Directions { options: Vec<(Side, String)> },
    InvalidChoice { token: String },
    UnavailablePath { side: Side },
    Exited,
    Report { entries: Vec<ClueReport> },
    AskAccusation { suspects: Vec<String> },
    Judged(Judgment),
}

impl GameEvent {
    pub fn severity(&self) -> Severity {
        match self {
            GameEvent::ClueFound { .. } => Severity::Discovery,
            GameEvent::InvalidChoice { .. } | GameEvent::UnavailablePath { .. } => Severity::Warning,
            GameEvent::Judged(_) => Severity::Verdict,
            _ => Severity::Info,
        }
    }

    /// Player-facing text, one entry per line
    pub fn lines(&self) -> Vec<String> {
        match self {
            GameEvent::Entered { room } => vec![format!("Você está em: {}", room)],
            GameEvent::ClueFound { clue } => vec![format!("Pista encontrada: \"{}\"", clue)],
            GameEvent::NoClue => vec!["Nenhuma pista neste cômodo.".to_string()],
            GameEvent::Directions { options } => {
                let mut lines = vec!["Escolha o caminho:".to_string()];
                for (side, room) in options {
                    let label = match side {
                        Side::Left => "Esquerda",
                        Side::Right => "Direita ",
                    };
                    lines.push(format!("({}) {} -> {}", side.key(), label, room));
                }
                lines.push("(s) Sair e encerrar a exploração".to_string());
                lines
            }
            GameEvent::InvalidChoice { .. } => {
                vec!["Opção inválida. Use 'e', 'd' ou 's'.".to_string()]
            }
            GameEvent::UnavailablePath { side } => vec![format!("Caminho inexistente à {}!", side)],
            GameEvent::Exited => vec!["Você decidiu encerrar a exploração.".to_string()],
            GameEvent::Report { entries } => {
                let mut lines = vec!["Pistas coletadas (ordenadas):".to_string()];
                if entries.is_empty() {
                    lines.push("Nenhuma pista coletada.".to_string());
                }
                lines.extend(entries.iter().map(|e| format!(" - {}", e)));
                lines
            }
            GameEvent::AskAccusation { suspects } => {
                let mut lines =
                    vec!["Quem você acusa? (digite o nome exato do suspeito)".to_string()];
                if !suspects.is_empty() {
                    lines.push(format!("Suspeitos: {}", suspects.join(", ")));
                }
                lines
            }
            GameEvent::Judged(Judgment::NoJudgment) => {
                vec!["Nenhum acusado informado. Encerrando sem julgamento.".to_string()]
            }
            GameEvent::Judged(Judgment::Verdict(v)) => {
                let detail = match v.outcome {
                    Outcome::Sustained => format!(
                        "Há {} pistas que apontam para {}. Acusação sustentada!",
                        v.total, v.accused
                    ),
                    Outcome::Insufficient => format!(
                        "Apenas 1 pista aponta para {}. Provas insuficientes para condenar.",
                        v.accused
                    ),
                    Outcome::Unfounded => format!(
                        "Nenhuma pista coletada aponta para {}. Acusação infundada.",
                        v.accused
                    ),
                };
                vec![format!("Resultado da acusação contra \"{}\":", v.accused), detail]
            }
        }
    }
}

/// Output sink for game events
pub trait Narrator {
    fn narrate(&mut self, event: &GameEvent);
}

impl Narrator for Vec<GameEvent> {
    fn narrate(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Input provider for a pull-driven run
pub trait ChoiceSource {
    /// Next navigation token, or `None` once input is exhausted
    fn next_choice(&mut self) -> Option<String>;

    /// Name of the accused. `None` means the player gave no name.
    fn accusation(&mut self, suspects: &[&str]) -> Option<String>;
}

/// Pre-recorded answers, handy for demos and tests
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    choices: VecDeque<String>,
    accused: Option<String>,
}

impl Scripted {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            accused: None,
        }
    }

    pub fn accusing(mut self, name: &str) -> Self {
        self.accused = Some(name.to_string());
        self
    }
}

impl ChoiceSource for Scripted {
    fn next_choice(&mut self) -> Option<String> {
        self.choices.pop_front()
    }

    fn accusation(&mut self, _suspects: &[&str]) -> Option<String> {
        self.accused.take()
    }
}

/// Reads one token per line from a buffered reader
pub struct LineChoices<R> {
    reader: R,
}

impl<R: BufRead> LineChoices<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Bytes that are not UTF-8 are replaced rather than ending input, so a
    /// badly encoded line still reaches the game as an (invalid) token.
    fn read_line(&mut self) -> Option<String> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(&line).trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input, treating as end of input");
                None
            }
        }
    }
}

impl<R: BufRead> ChoiceSource for LineChoices<R> {
    fn next_choice(&mut self) -> Option<String> {
        self.read_line()
    }

    fn accusation(&mut self, _suspects: &[&str]) -> Option<String> {
        self.read_line().filter(|name| !name.is_empty())
    }
}

/// Writes event text to any writer, keeping the first write error
pub struct ConsoleNarrator<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Print something that is not a game event (banners, prompts)
    pub fn say(&mut self, text: &str) {
        let result = writeln!(self.out, "{}", text);
        self.keep(result);
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

impl<W: Write> Narrator for ConsoleNarrator<W> {
    fn narrate(&mut self, event: &GameEvent) {
        if self.error.is_some() {
            return;
        }
        let spacer = matches!(
            event,
            GameEvent::Entered { .. }
                | GameEvent::Directions { .. }
                | GameEvent::Report { .. }
                | GameEvent::AskAccusation { .. }
                | GameEvent::Judged(_)
        );
        if spacer {
            let result = writeln!(self.out);
            self.keep(result);
        }
        for line in event.lines() {
            let result = writeln!(self.out, "{}", line);
            self.keep(result);
        }
        if let GameEvent::Directions { .. } | GameEvent::AskAccusation { .. } = event {
            let result = write!(self.out, "> ").and_then(|()| self.out.flush());
            self.keep(result);
        }
    }
}
