use core::fmt;
use serde::{Deserialize, Serialize};

/// Table positions in clockwise turn order. Partners sit opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    South = 0,
    West = 1,
    North = 2,
    East = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::South, Seat::West, Seat::North, Seat::East];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::South),
            1 => Some(Seat::West),
            2 => Some(Seat::North),
            3 => Some(Seat::East),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::South => Seat::West,
            Seat::West => Seat::North,
            Seat::North => Seat::East,
            Seat::East => Seat::South,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::South => Seat::North,
            Seat::West => Seat::East,
            Seat::North => Seat::South,
            Seat::East => Seat::West,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::South | Seat::North => Team::NorthSouth,
            Seat::West | Seat::East => Team::EastWest,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::South => "South",
            Seat::West => "West",
            Seat::North => "North",
            Seat::East => "East",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }

    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::NorthSouth => [Seat::North, Seat::South],
            Team::EastWest => [Seat::East, Seat::West],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::NorthSouth => "North-South",
            Team::EastWest => "East-West",
        };
        f.write_str(label)
    }
}
