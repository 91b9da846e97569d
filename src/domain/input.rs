/// Canonical input vocabulary shared by the router and the session.

/// Where a request came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Origin {
    /// Key pressed while no grid cell had focus.
    Document,
    /// Key pressed while a grid cell had focus; the cell handles it directly.
    Grid,
    /// Click on the on-screen keyboard.
    OnScreen,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogicalKey {
    Enter,
    Backspace,
    /// A playable letter, already upper-cased.
    Letter(char),
    Left,
    Right,
    /// Printable character outside the letter class (grid origin only).
    Other(char),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyRequest {
    pub key: LogicalKey,
    pub origin: Origin,
}

impl KeyRequest {
    pub fn new(key: LogicalKey, origin: Origin) -> Self {
        KeyRequest { key, origin }
    }

    pub fn from_grid(&self) -> bool {
        self.origin == Origin::Grid
    }
}
