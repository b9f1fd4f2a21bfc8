use core::fmt;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::str::FromStr;

/// Descriptor of the network parameter carried by a Touchstone file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Eq, Hash)]
pub enum RFParameter {
    G,
    H,
    #[default]
    S,
    Y,
    Z,
}

impl RFParameter {
    // Convert RFParameter to a touchstone option line string
    pub fn to_str(&self) -> &str {
        match self {
            RFParameter::G => "G",
            RFParameter::H => "H",
            RFParameter::S => "S",
            RFParameter::Y => "Y",
            RFParameter::Z => "Z",
        }
    }
}

impl FromStr for RFParameter {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "g" => Ok(RFParameter::G),
            "h" => Ok(RFParameter::H),
            "s" => Ok(RFParameter::S),
            "y" => Ok(RFParameter::Y),
            "z" => Ok(RFParameter::Z),
            _ => bail!("string not a valid option line type"),
        }
    }
}

impl fmt::Display for RFParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
