//! Discrete action set for a fighter.

use std::fmt;

/// One decision per tick. The discriminant order is the index used by the
/// action-value tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Advance,
    Retreat,
    StrafeLeft,
    StrafeRight,
    StrikeShort,
    StrikeLong,
    Guard,
    Idle,
}

impl Action {
    /// Number of actions.
    pub const COUNT: usize = 8;

    /// All actions in index order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Advance,
        Action::Retreat,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::StrikeShort,
        Action::StrikeLong,
        Action::Guard,
        Action::Idle,
    ];

    /// Returns the action at `index`, or `None` past the end of the set.
    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    /// Returns the action at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Action::COUNT`.
    pub fn nth(index: usize) -> Action {
        match Self::from_index(index) {
            Some(action) => action,
            None => panic!("unknown action index {index}"),
        }
    }

    /// Position of this action in [`Action::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Energy spent when the action is taken.
    pub fn energy_cost(self) -> f64 {
        match self {
            Action::Advance | Action::Retreat | Action::StrafeLeft | Action::StrafeRight => 1.0,
            Action::StrikeShort => 5.0,
            Action::StrikeLong => 10.0,
            Action::Guard => 2.0,
            Action::Idle => 0.0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Advance => "advance",
            Action::Retreat => "retreat",
            Action::StrafeLeft => "strafe_left",
            Action::StrafeRight => "strafe_right",
            Action::StrikeShort => "strike_short",
            Action::StrikeLong => "strike_long",
            Action::Guard => "guard",
            Action::Idle => "idle",
        };
        f.write_str(name)
    }
}
