//! Rooms and room kinds.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitOr, BitOrAssign};

/// Set of room kinds, stored as bit flags.
///
/// A room may satisfy several kinds at once, and a class type may accept
/// several preferred kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomKinds(u8);

impl RoomKinds {
    pub const NONE: RoomKinds = RoomKinds(0);
    pub const AUDITORIUM: RoomKinds = RoomKinds(1 << 0);
    pub const REGULAR: RoomKinds = RoomKinds(1 << 1);
    pub const LAB: RoomKinds = RoomKinds(1 << 2);
    pub const ONLINE: RoomKinds = RoomKinds(1 << 3);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether the two sets share at least one kind.
    pub fn intersects(self, other: RoomKinds) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether every kind in `other` is also in `self`.
    pub fn contains(self, other: RoomKinds) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RoomKinds {
    type Output = RoomKinds;

    fn bitor(self, rhs: RoomKinds) -> RoomKinds {
        RoomKinds(self.0 | rhs.0)
    }
}

impl BitOrAssign for RoomKinds {
    fn bitor_assign(&mut self, rhs: RoomKinds) {
        self.0 |= rhs.0;
    }
}

/// A bookable room.
///
/// Two rooms are equal when their name and department match; kind and
/// capacity are attributes of that identity.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Room name (e.g. "203").
    pub name: String,
    /// Kinds of teaching this room supports.
    pub kinds: RoomKinds,
    /// Seats available.
    pub capacity: u32,
    /// Owning department.
    pub department: String,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        kinds: RoomKinds,
        capacity: u32,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kinds,
            capacity,
            department: department.into(),
        }
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.department == other.department
    }
}

impl Eq for Room {}

impl Hash for Room {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.department.hash(state);
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} seats)", self.name, self.department, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_flags() {
        let kinds = RoomKinds::REGULAR | RoomKinds::LAB;
        assert!(kinds.intersects(RoomKinds::LAB));
        assert!(!kinds.intersects(RoomKinds::AUDITORIUM));
        assert!(kinds.contains(RoomKinds::REGULAR));
        assert!(!kinds.contains(RoomKinds::REGULAR | RoomKinds::ONLINE));
        assert!(RoomKinds::NONE.is_empty());
    }

    #[test]
    fn test_equality_by_name_and_department() {
        let a = Room::new("203", RoomKinds::AUDITORIUM, 200, "INF");
        let b = Room::new("203", RoomKinds::LAB, 30, "INF");
        let c = Room::new("203", RoomKinds::AUDITORIUM, 200, "MATH");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
