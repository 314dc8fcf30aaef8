use std::fmt;

/// The kind of navigation that produced the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Moved to an entry that already exists. Also the action of a fresh history.
    #[default]
    Pop,
    /// Added a new entry after the current one.
    Push,
    /// Overwrote the current entry.
    Replace,
}

impl Action {
    /// Upper-case name, as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pop => "POP",
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pop() {
        assert_eq!(Action::default(), Action::Pop);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Push.to_string(), "PUSH");
        assert_eq!(Action::Replace.to_string(), "REPLACE");
        assert_eq!(Action::Pop.to_string(), "POP");
    }
}
