use pie_core::{ItemId, Point};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Focus-pipeline signals, spelled the way the control socket receives them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FocusSignal {
    FocusStart,
    /// Focus locked; the ring hides on its own shortly after.
    FocusSuccess,
    /// Focus locked; the ring stays until cleared.
    FocusSuccessHold,
    FocusFail,
    FocusFailHold,
    FocusClear,
    Block,
    Unblock,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Focus(FocusSignal),
    TogglePie,
    MenuOpened(Point),
    MenuClosed,
    ItemCommitted(ItemId),
    ConfigReload,
}
