//! The fixed mansion and its suspects
//!
//! Each chapter is a complete case: a map, the clues hidden in it and, for the
//! final chapter, who each clue incriminates.

use crate::data::*;
use serde::{Deserialize, Serialize};

/// Which case to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Chapter {
    /// Explore the mansion; no clues
    Mansion,
    /// Collect clues and review them in order
    Clues,
    /// Collect clues, then accuse a suspect
    #[default]
    Accusation,
}

impl Chapter {
    pub fn all() -> [Chapter; 3] {
        [Chapter::Mansion, Chapter::Clues, Chapter::Accusation]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Chapter::Mansion => "A Mansão Enigma",
            Chapter::Clues => "Coleta de Pistas",
            Chapter::Accusation => "Capítulo Final: Acusação",
        }
    }

    pub fn synopsis(&self) -> &'static str {
        match self {
            Chapter::Mansion => "Explore os cômodos da mansão e encontre o caminho até o fim.",
            Chapter::Clues => "Percorra a mansão e reúna as pistas deixadas pelo culpado.",
            Chapter::Accusation => {
                "Reúna as pistas, confronte os suspeitos e aponte o culpado."
            }
        }
    }

    /// Whether the final report of collected clues is shown
    pub fn reports_clues(&self) -> bool {
        !matches!(self, Chapter::Mansion)
    }

    pub fn has_accusation(&self) -> bool {
        matches!(self, Chapter::Accusation)
    }

    /// Assemble this chapter's case
    pub fn scenario(self) -> Scenario {
        let (mansion, suspects) = match self {
            Chapter::Mansion => (build_mansion(false, false), SuspectIndex::new()),
            Chapter::Clues => (build_mansion(true, false), SuspectIndex::new()),
            Chapter::Accusation => (
                build_mansion(true, true),
                SuspectIndex::from_pairs(ASSOCIATIONS),
            ),
        };
        Scenario {
            chapter: self,
            mansion,
            suspects,
        }
    }
}

impl std::fmt::Display for Chapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A ready-to-play case
#[derive(Debug)]
pub struct Scenario {
    pub chapter: Chapter,
    pub mansion: RoomTree,
    pub suspects: SuspectIndex,
}

/// Which suspect each clue points to
pub const ASSOCIATIONS: [(&str, &str); 8] = [
    ("Pegada de lama", "Sr. Verdes"),
    ("Lenço rasgado", "Sra. Marinho"),
    ("Copo quebrado", "Sra. Marinho"),
    ("Diário antigo", "Sr. Rocha"),
    ("Chave enferrujada", "Sr. Verdes"),
    ("Luvas sujas", "Sr. Rocha"),
    ("Pneu com marca estranha", "Motorista"),
    ("Marca de tinta vermelha", "Pintor"),
];

fn build_mansion(with_clues: bool, with_basement: bool) -> RoomTree {
    let room = |name: &str, clue: &str| {
        if with_clues {
            Room::new(name, clue)
        } else {
            Room::empty(name)
        }
    };

    let mut biblioteca = room("Biblioteca", "Diário antigo");
    if with_basement {
        biblioteca.link(Side::Left, room("Porão", "Marca de tinta vermelha"));
    }

    let sala_estar = room("Sala de Estar", "Lenço rasgado")
        .with_left(biblioteca)
        .with_right(room("Jardim", "Chave enferrujada"));
    let cozinha = room("Cozinha", "Copo quebrado")
        .with_left(room("Despensa", "Luvas sujas"))
        .with_right(room("Garagem", "Pneu com marca estranha"));

    RoomTree::new(
        room("Hall de Entrada", "Pegada de lama")
            .with_left(sala_estar)
            .with_right(cozinha),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mansion_chapter_has_no_clues() {
        let scenario = Chapter::Mansion.scenario();
        assert_eq!(scenario.mansion.room_count(), 7);
        assert_eq!(scenario.mansion.root().clue(), None);
        assert!(scenario.suspects.is_empty());
    }

    #[test]
    fn clue_chapter_hides_one_clue_per_room() {
        let scenario = Chapter::Clues.scenario();
        assert_eq!(scenario.mansion.room_count(), 7);
        assert_eq!(
            scenario.mansion.walk(&[Side::Right, Side::Right]).and_then(Room::clue),
            Some("Pneu com marca estranha")
        );
    }

    #[test]
    fn accusation_chapter_adds_the_basement() {
        let scenario = Chapter::Accusation.scenario();
        assert_eq!(scenario.mansion.room_count(), 8);
        assert_eq!(scenario.mansion.depth(), 4);
        let porao = scenario
            .mansion
            .walk(&[Side::Left, Side::Left, Side::Left])
            .map(Room::name);
        assert_eq!(porao, Some("Porão"));
        assert_eq!(scenario.suspects.len(), 8);
    }

    #[test]
    fn every_clue_has_a_suspect() {
        let scenario = Chapter::Accusation.scenario();
        for (clue, suspect) in ASSOCIATIONS {
            assert_eq!(scenario.suspects.lookup(clue), Some(suspect));
        }
        assert_eq!(
            scenario.suspects.suspects(),
            vec!["Motorista", "Pintor", "Sr. Rocha", "Sr. Verdes", "Sra. Marinho"]
        );
    }
}
