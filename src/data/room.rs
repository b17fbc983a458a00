//! The mansion map
//!
//! A fixed binary tree of rooms. Each room owns its two optional children, so
//! the map is acyclic by construction and is released when the tree is dropped.

use serde::{Deserialize, Serialize};

/// Which way the player can turn from a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The key the player presses to take this side
    pub fn key(&self) -> char {
        match self {
            Side::Left => 'e',
            Side::Right => 'd',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "esquerda"),
            Side::Right => write!(f, "direita"),
        }
    }
}

/// A single room of the mansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    /// Empty when the room holds no clue
    clue: String,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    /// Create a room. An empty `clue` means the room has nothing to find.
    pub fn new(name: &str, clue: &str) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.to_string(),
            left: None,
            right: None,
        }
    }

    /// Create a room without a clue
    pub fn empty(name: &str) -> Self {
        Self::new(name, "")
    }

    pub fn with_left(mut self, child: Room) -> Self {
        self.link(Side::Left, child);
        self
    }

    pub fn with_right(mut self, child: Room) -> Self {
        self.link(Side::Right, child);
        self
    }

    /// Attach `child` on the given side, replacing whatever was there.
    ///
    /// Only used while the map is being assembled; a built [`RoomTree`] hands
    /// out shared references only.
    pub fn link(&mut self, side: Side, child: Room) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot = Some(Box::new(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue in this room, if any
    pub fn clue(&self) -> Option<&str> {
        if self.clue.is_empty() {
            None
        } else {
            Some(&self.clue)
        }
    }

    pub fn left(&self) -> Option<&Room> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Room> {
        self.right.as_deref()
    }

    pub fn child(&self, side: Side) -> Option<&Room> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Available exits, left first
    pub fn directions(&self) -> Vec<(Side, &str)> {
        [Side::Left, Side::Right]
            .into_iter()
            .filter_map(|side| self.child(side).map(|room| (side, room.name())))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn count(&self) -> usize {
        1 + self.left().map_or(0, Room::count) + self.right().map_or(0, Room::count)
    }

    fn height(&self) -> usize {
        1 + self
            .left()
            .map_or(0, Room::height)
            .max(self.right().map_or(0, Room::height))
    }
}

/// The whole mansion, rooted at the entrance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTree {
    root: Room,
}

impl RoomTree {
    pub fn new(root: Room) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Room {
        &self.root
    }

    pub fn room_count(&self) -> usize {
        self.root.count()
    }

    /// Number of rooms on the longest path from the entrance
    pub fn depth(&self) -> usize {
        self.root.height()
    }

    /// Follow `path` from the entrance. `None` if any step has no room.
    pub fn walk(&self, path: &[Side]) -> Option<&Room> {
        path.iter()
            .try_fold(&self.root, |room, side| room.child(*side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> RoomTree {
        RoomTree::new(
            Room::new("Hall", "Pegada")
                .with_left(Room::new("Sala", "").with_right(Room::new("Jardim", "Chave")))
                .with_right(Room::empty("Cozinha")),
        )
    }

    #[test]
    fn empty_clue_reads_as_none() {
        assert_eq!(Room::new("Hall", "").clue(), None);
        assert_eq!(Room::new("Hall", "Pegada").clue(), Some("Pegada"));
    }

    #[test]
    fn walk_follows_links() {
        let tree = small_tree();
        assert_eq!(tree.walk(&[]).map(Room::name), Some("Hall"));
        assert_eq!(
            tree.walk(&[Side::Left, Side::Right]).map(Room::name),
            Some("Jardim")
        );
        assert!(tree.walk(&[Side::Right, Side::Left]).is_none());
    }

    #[test]
    fn counts_rooms_and_depth() {
        let tree = small_tree();
        assert_eq!(tree.room_count(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn directions_list_present_children_only() {
        let tree = small_tree();
        assert_eq!(
            tree.root().directions(),
            vec![(Side::Left, "Sala"), (Side::Right, "Cozinha")]
        );
        let sala = tree.root().left().unwrap();
        assert_eq!(sala.directions(), vec![(Side::Right, "Jardim")]);
        assert!(tree.root().right().unwrap().is_leaf());
    }

    #[test]
    fn link_replaces_existing_child() {
        let mut hall = Room::empty("Hall").with_left(Room::empty("Antiga"));
        hall.link(Side::Left, Room::empty("Nova"));
        assert_eq!(hall.left().map(Room::name), Some("Nova"));
    }
}
