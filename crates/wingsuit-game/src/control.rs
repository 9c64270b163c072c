use serde::{Deserialize, Serialize};

/// Player inputs. Steering controls act while held; `Pause`, `Reset` and
/// `ToggleCamera` act once per press.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Flatten,
    Dive,
    BankLeft,
    BankRight,
    LateralLeft,
    LateralRight,
    Pause,
    Reset,
    ToggleCamera,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Flatten,
        Control::Dive,
        Control::BankLeft,
        Control::BankRight,
        Control::LateralLeft,
        Control::LateralRight,
        Control::Pause,
        Control::Reset,
        Control::ToggleCamera,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::Flatten => "flatten",
            Control::Dive => "dive",
            Control::BankLeft => "bank_left",
            Control::BankRight => "bank_right",
            Control::LateralLeft => "lateral_left",
            Control::LateralRight => "lateral_right",
            Control::Pause => "pause",
            Control::Reset => "reset",
            Control::ToggleCamera => "toggle_camera",
        }
    }

    /// Case-insensitive; `-` and `_` are interchangeable.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.name() == norm)
    }

    #[inline]
    pub fn is_held(self) -> bool {
        !matches!(self, Control::Pause | Control::Reset | Control::ToggleCamera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for c in Control::ALL {
            assert_eq!(Control::from_name(c.name()), Some(c));
        }
    }

    #[test]
    fn lenient_spelling() {
        assert_eq!(Control::from_name("Bank-Left"), Some(Control::BankLeft));
        assert_eq!(Control::from_name(" TOGGLE_CAMERA "), Some(Control::ToggleCamera));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Control::from_name("barrel_roll"), None);
        assert_eq!(Control::from_name(""), None);
    }

    #[test]
    fn held_vs_edge() {
        let held: Vec<Control> = Control::ALL.into_iter().filter(|c| c.is_held()).collect();
        assert_eq!(held.len(), 6);
        assert!(!Control::Pause.is_held());
    }
}
