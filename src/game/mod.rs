//! Core game logic and state management

pub mod investigation;
pub mod narrative;
pub mod scenario;

use crate::data::*;
use crate::GameError;
use chrono::{DateTime, Utc};
use investigation::Judgment;
use narrative::{ChoiceSource, GameEvent, Narrator};
use scenario::{Chapter, Scenario};
use serde::{Deserialize, Serialize};

/// A navigation command from the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    Left,
    Right,
    Exit,
    Invalid(String),
}

impl Navigation {
    /// Map an already trimmed single-character token, case-insensitively:
    /// `e` left, `d` right, `s` exit. Anything else is invalid, longer
    /// tokens included.
    pub fn parse(token: &str) -> Self {
        let mut chars = token.chars();
        match (chars.next().map(|c| c.to_ascii_lowercase()), chars.next()) {
            (Some('e'), None) => Navigation::Left,
            (Some('d'), None) => Navigation::Right,
            (Some('s'), None) => Navigation::Exit,
            _ => Navigation::Invalid(token.to_string()),
        }
    }
}

/// Recoverable navigation problems; the player stays where they are
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("invalid choice: {token:?}")]
    InvalidChoice { token: String },

    #[error("no path to the {side}")]
    UnavailablePath { side: Side },
}

/// Where the investigation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestigationState {
    NotStarted,
    InRoom,
    Exited,
}

/// What a single step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved,
    Stayed(NavigationError),
    Exited,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub chapter: Chapter,
    pub rooms_visited: Vec<String>,
    pub clues: Vec<ClueReport>,
    pub judgment: Option<Judgment>,
}

/// One investigation run. Owns the map, the collected clues and the
/// suspect index for as long as the run lasts.
#[derive(Debug)]
pub struct Investigation {
    chapter: Chapter,
    mansion: RoomTree,
    clues: ClueStore,
    suspects: SuspectIndex,
    /// Turns taken from the entrance to the current room
    path: Vec<Side>,
    visited: Vec<String>,
    state: InvestigationState,
}

impl Investigation {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            chapter: scenario.chapter,
            mansion: scenario.mansion,
            clues: ClueStore::new(),
            suspects: scenario.suspects,
            path: Vec::new(),
            visited: Vec::new(),
            state: InvestigationState::NotStarted,
        }
    }

    pub fn chapter(&self) -> Chapter {
        self.chapter
    }

    pub fn state(&self) -> InvestigationState {
        self.state
    }

    pub fn mansion(&self) -> &RoomTree {
        &self.mansion
    }

    pub fn clues(&self) -> &ClueStore {
        &self.clues
    }

    pub fn suspects(&self) -> &SuspectIndex {
        &self.suspects
    }

    pub fn path(&self) -> &[Side] {
        &self.path
    }

    /// Rooms entered so far, in order
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn current_room(&self) -> &Room {
        locate(&self.mansion, &self.path)
    }

    /// Enter the mansion through its root room
    pub fn start(&mut self, narrator: &mut dyn Narrator) -> Result<(), GameError> {
        if self.state != InvestigationState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        tracing::info!(chapter = ?self.chapter, rooms = self.mansion.room_count(), "investigation started");
        self.state = InvestigationState::InRoom;
        self.enter(narrator);
        Ok(())
    }

    /// Consume one navigation choice
    pub fn step(&mut self, choice: Navigation, narrator: &mut dyn Narrator) -> Result<Step, GameError> {
        match self.state {
            InvestigationState::NotStarted => return Err(GameError::NotStarted),
            InvestigationState::Exited => return Err(GameError::InvestigationClosed),
            InvestigationState::InRoom => {}
        }

        let side = match choice {
            Navigation::Left => Side::Left,
            Navigation::Right => Side::Right,
            Navigation::Exit => {
                tracing::info!(room = self.current_room().name(), "player left the mansion");
                self.state = InvestigationState::Exited;
                narrator.narrate(&GameEvent::Exited);
                return Ok(Step::Exited);
            }
            Navigation::Invalid(token) => {
                tracing::debug!(token = %token, "invalid navigation choice");
                narrator.narrate(&GameEvent::InvalidChoice { token: token.clone() });
                return Ok(Step::Stayed(NavigationError::InvalidChoice { token }));
            }
        };

        match self.try_move(side) {
            Ok(()) => {
                self.enter(narrator);
                Ok(Step::Moved)
            }
            Err(e) => {
                tracing::debug!(room = self.current_room().name(), %side, "path unavailable");
                narrator.narrate(&GameEvent::UnavailablePath { side });
                Ok(Step::Stayed(e))
            }
        }
    }

    /// Move without announcing anything
    pub fn try_move(&mut self, side: Side) -> Result<(), NavigationError> {
        if self.current_room().child(side).is_none() {
            return Err(NavigationError::UnavailablePath { side });
        }
        self.path.push(side);
        Ok(())
    }

    /// Drive a whole exploration from `source`. End of input counts as exit.
    /// Returns the case report once the final phase is over.
    pub fn run(
        &mut self,
        source: &mut dyn ChoiceSource,
        narrator: &mut dyn Narrator,
    ) -> Result<CaseReport, GameError> {
        if self.state == InvestigationState::NotStarted {
            self.start(narrator)?;
        }
        while self.state == InvestigationState::InRoom {
            let choice = match source.next_choice() {
                Some(token) => Navigation::parse(&token),
                None => {
                    tracing::debug!("input exhausted, leaving");
                    Navigation::Exit
                }
            };
            self.step(choice, narrator)?;
        }

        self.report(narrator)?;
        let judgment = if self.chapter.has_accusation() {
            let suspects: Vec<String> = self
                .suspects
                .suspects()
                .into_iter()
                .map(str::to_string)
                .collect();
            narrator.narrate(&GameEvent::AskAccusation {
                suspects: suspects.clone(),
            });
            let names: Vec<&str> = suspects.iter().map(String::as_str).collect();
            let accused = source.accusation(&names);
            Some(self.accuse(accused.as_deref(), narrator)?)
        } else {
            None
        };
        Ok(self.case_report(judgment))
    }

    /// Show the ordered clue report, if this chapter has one
    pub fn report(&self, narrator: &mut dyn Narrator) -> Result<(), GameError> {
        if self.state != InvestigationState::Exited {
            return Err(GameError::StillExploring);
        }
        if self.chapter.reports_clues() {
            narrator.narrate(&GameEvent::Report {
                entries: self.clues.entries(),
            });
        }
        Ok(())
    }

    /// Judge `accused` and announce the verdict
    pub fn accuse(
        &self,
        accused: Option<&str>,
        narrator: &mut dyn Narrator,
    ) -> Result<Judgment, GameError> {
        if self.state != InvestigationState::Exited {
            return Err(GameError::StillExploring);
        }
        let judgment = self.judge(accused);
        narrator.narrate(&GameEvent::Judged(judgment.clone()));
        Ok(judgment)
    }

    pub fn judge(&self, accused: Option<&str>) -> Judgment {
        investigation::judge(&self.clues, &self.suspects, accused)
    }

    pub fn case_report(&self, judgment: Option<Judgment>) -> CaseReport {
        CaseReport {
            chapter: self.chapter,
            rooms_visited: self.visited.clone(),
            clues: self.clues.entries(),
            judgment,
        }
    }

    fn enter(&mut self, narrator: &mut dyn Narrator) {
        let room = locate(&self.mansion, &self.path);
        tracing::debug!(room = room.name(), depth = self.path.len(), "entered room");
        self.visited.push(room.name().to_string());
        narrator.narrate(&GameEvent::Entered {
            room: room.name().to_string(),
        });

        match room.clue() {
            Some(clue) => {
                let first = self.clues.insert(clue);
                tracing::info!(clue, first, "clue collected");
                narrator.narrate(&GameEvent::ClueFound {
                    clue: clue.to_string(),
                });
            }
            None => narrator.narrate(&GameEvent::NoClue),
        }

        let options = room
            .directions()
            .into_iter()
            .map(|(side, name)| (side, name.to_string()))
            .collect();
        narrator.narrate(&GameEvent::Directions { options });
    }
}

fn locate<'a>(mansion: &'a RoomTree, path: &[Side]) -> &'a Room {
    // Paths only ever grow through `try_move`, which checks each step.
    mansion.walk(path).unwrap_or_else(|| mansion.root())
}

/// A message to display to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMessage {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl GameMessage {
    pub fn new(severity: Severity, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.to_string(),
        }
    }
}

/// Narrator that keeps a scrollback of messages for the UI
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<GameMessage>,
    limit: Option<usize>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` messages, dropping the oldest
    pub fn with_limit(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn push(&mut self, message: GameMessage) {
        self.messages.push(message);
        if let Some(limit) = self.limit {
            let excess = self.messages.len().saturating_sub(limit);
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Narrator for MessageLog {
    fn narrate(&mut self, event: &GameEvent) {
        let severity = event.severity();
        for line in event.lines() {
            self.push(GameMessage::new(severity, &line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative::Scripted;
    use test_case::test_case;

    #[test_case("e" => Navigation::Left)]
    #[test_case("E" => Navigation::Left)]
    #[test_case("d" => Navigation::Right)]
    #[test_case("D" => Navigation::Right)]
    #[test_case("s" => Navigation::Exit)]
    #[test_case("S" => Navigation::Exit)]
    #[test_case("x" => Navigation::Invalid("x".to_string()))]
    #[test_case("" => Navigation::Invalid(String::new()))]
    #[test_case("dx" => Navigation::Invalid("dx".to_string()))]
    #[test_case("sim" => Navigation::Invalid("sim".to_string()))]
    #[test_case("exit" => Navigation::Invalid("exit".to_string()))]
    fn parse_navigation(token: &str) -> Navigation {
        Navigation::parse(token)
    }

    fn started(chapter: Chapter) -> (Investigation, Vec<GameEvent>) {
        let mut investigation = Investigation::new(chapter.scenario());
        let mut events = Vec::new();
        investigation.start(&mut events).unwrap();
        (investigation, events)
    }

    #[test]
    fn start_collects_the_entrance_clue() {
        let (investigation, events) = started(Chapter::Accusation);
        assert_eq!(events[0], GameEvent::Entered { room: "Hall de Entrada".to_string() });
        assert_eq!(events[1], GameEvent::ClueFound { clue: "Pegada de lama".to_string() });
        assert!(investigation.clues().contains("Pegada de lama"));
    }

    #[test]
    fn rooms_without_clues_say_so() {
        let (investigation, events) = started(Chapter::Mansion);
        assert_eq!(events[1], GameEvent::NoClue);
        assert!(investigation.clues().is_empty());
    }

    #[test]
    fn cannot_start_twice() {
        let (mut investigation, mut events) = started(Chapter::Clues);
        assert!(matches!(investigation.start(&mut events), Err(GameError::AlreadyStarted)));
    }

    #[test]
    fn step_before_start_is_refused() {
        let mut investigation = Investigation::new(Chapter::Clues.scenario());
        let result = investigation.step(Navigation::Left, &mut Vec::new());
        assert!(matches!(result, Err(GameError::NotStarted)));
    }

    #[test]
    fn invalid_choice_keeps_the_room() {
        let (mut investigation, mut events) = started(Chapter::Clues);
        let step = investigation.step(Navigation::parse("x"), &mut events).unwrap();
        assert_eq!(step, Step::Stayed(NavigationError::InvalidChoice { token: "x".to_string() }));
        assert_eq!(investigation.current_room().name(), "Hall de Entrada");
    }

    #[test]
    fn leaves_need_explicit_exit() {
        let (mut investigation, mut events) = started(Chapter::Mansion);
        investigation.step(Navigation::Right, &mut events).unwrap();
        investigation.step(Navigation::Right, &mut events).unwrap();
        assert!(investigation.current_room().is_leaf());
        assert_eq!(investigation.state(), InvestigationState::InRoom);

        let step = investigation.step(Navigation::Left, &mut events).unwrap();
        assert_eq!(step, Step::Stayed(NavigationError::UnavailablePath { side: Side::Left }));
        assert_eq!(investigation.state(), InvestigationState::InRoom);
    }

    #[test]
    fn exit_closes_the_investigation() {
        let (mut investigation, mut events) = started(Chapter::Clues);
        assert_eq!(investigation.step(Navigation::Exit, &mut events).unwrap(), Step::Exited);
        assert!(matches!(
            investigation.step(Navigation::Left, &mut events),
            Err(GameError::InvestigationClosed)
        ));
    }

    #[test]
    fn final_phase_requires_exit() {
        let (investigation, mut events) = started(Chapter::Accusation);
        assert!(matches!(
            investigation.report(&mut events),
            Err(GameError::StillExploring)
        ));
        assert!(matches!(
            investigation.accuse(Some("Pintor"), &mut events),
            Err(GameError::StillExploring)
        ));
    }

    #[test]
    fn run_without_accusation_chapter_skips_judgment() {
        let mut investigation = Investigation::new(Chapter::Clues.scenario());
        let mut source = Scripted::new(["e", "s"]).accusing("Sr. Verdes");
        let mut events = Vec::new();
        let report = investigation.run(&mut source, &mut events).unwrap();
        assert_eq!(report.judgment, None);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Judged(_))));
        assert_eq!(report.rooms_visited, vec!["Hall de Entrada", "Sala de Estar"]);
    }

    #[test]
    fn mansion_chapter_shows_no_report() {
        let mut investigation = Investigation::new(Chapter::Mansion.scenario());
        let mut events = Vec::new();
        investigation.run(&mut Scripted::new(["d"]), &mut events).unwrap();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Report { .. })));
        assert_eq!(events.last(), Some(&GameEvent::Exited));
    }

    #[test]
    fn message_log_respects_limit() {
        let mut log = MessageLog::with_limit(2);
        log.narrate(&GameEvent::NoClue);
        log.narrate(&GameEvent::Exited);
        log.narrate(&GameEvent::Entered { room: "Jardim".to_string() });
        let texts: Vec<&str> = log.messages().iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["Você decidiu encerrar a exploração.", "Você está em: Jardim"]);
    }
}
