use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Discrete trading signal emitted by the classifier.
///
/// Wire labels are fixed by the model artifact: BUY=1, SELL=-1, HOLD=0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Signal {
    #[strum(serialize = "BUY")]
    Buy,
    #[strum(serialize = "SELL")]
    Sell,
    #[strum(serialize = "HOLD")]
    Hold,
}

impl Signal {
    pub fn from_label(label: i8) -> Option<Self> {
        match label {
            1 => Some(Signal::Buy),
            -1 => Some(Signal::Sell),
            0 => Some(Signal::Hold),
            _ => None,
        }
    }

    pub fn label(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}
