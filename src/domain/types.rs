// ==========================================
// SubOuts Tracker - domain type definitions
// ==========================================
// Status enums, send/source types and the display categories
// derived by the rule engines.
// Serialization: SCREAMING_SNAKE_CASE (matches the data layer)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalizes free status text: lower-case, drops spaces, dashes,
/// underscores and apostrophes ("QC'd" -> "qcd", "In Process" -> "inprocess").
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '\'' | '\u{2019}'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ==========================================
// SubOut status
// ==========================================
// Nominal order: Submitted -> InProcess -> Ready -> Sent -> Shipped
//                -> Received -> QCd -> Complete, plus terminal OnSite.
// Any status may be set directly (jump ahead is allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubOutStatus {
    Submitted,
    InProcess,
    Ready,
    Sent,
    Shipped,
    Received,
    #[serde(rename = "QCD")]
    QCd,
    Complete,
    OnSite,
}

impl SubOutStatus {
    /// Stepper order. OnSite is a terminal variant outside the stepper.
    pub const STEPPER: [SubOutStatus; 8] = [
        SubOutStatus::Submitted,
        SubOutStatus::InProcess,
        SubOutStatus::Ready,
        SubOutStatus::Sent,
        SubOutStatus::Shipped,
        SubOutStatus::Received,
        SubOutStatus::QCd,
        SubOutStatus::Complete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubOutStatus::Submitted => "Submitted",
            SubOutStatus::InProcess => "In Process",
            SubOutStatus::Ready => "Ready",
            SubOutStatus::Sent => "Sent",
            SubOutStatus::Shipped => "Shipped",
            SubOutStatus::Received => "Received",
            SubOutStatus::QCd => "QC'd",
            SubOutStatus::Complete => "Complete",
            SubOutStatus::OnSite => "On Site",
        }
    }

    /// Parses status text as typed by a user or stored by the data layer.
    pub fn from_label(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "submitted" => Some(SubOutStatus::Submitted),
            "inprocess" => Some(SubOutStatus::InProcess),
            "ready" => Some(SubOutStatus::Ready),
            "sent" => Some(SubOutStatus::Sent),
            "shipped" => Some(SubOutStatus::Shipped),
            "received" => Some(SubOutStatus::Received),
            "qcd" => Some(SubOutStatus::QCd),
            "complete" => Some(SubOutStatus::Complete),
            "onsite" => Some(SubOutStatus::OnSite),
            _ => None,
        }
    }

    /// Position on the stepper; None for OnSite.
    pub fn step_index(&self) -> Option<usize> {
        Self::STEPPER.iter().position(|s| s == self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubOutStatus::Complete | SubOutStatus::OnSite)
    }
}

impl fmt::Display for SubOutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// Load status
// ==========================================
// Advisory order: Planned -> Loading -> Loaded -> InTransit -> Delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    Planned,
    Loading,
    Loaded,
    InTransit,
    Delivered,
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Planned => "Planned",
            LoadStatus::Loading => "Loading",
            LoadStatus::Loaded => "Loaded",
            LoadStatus::InTransit => "In Transit",
            LoadStatus::Delivered => "Delivered",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "planned" => Some(LoadStatus::Planned),
            "loading" => Some(LoadStatus::Loading),
            "loaded" => Some(LoadStatus::Loaded),
            "intransit" => Some(LoadStatus::InTransit),
            "delivered" => Some(LoadStatus::Delivered),
            _ => None,
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// Pallet status
// ==========================================
// Advisory order: Open -> Closed -> Loaded -> Shipped -> Received
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PalletStatus {
    Open,
    Closed,
    Loaded,
    Shipped,
    Received,
}

impl PalletStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PalletStatus::Open => "Open",
            PalletStatus::Closed => "Closed",
            PalletStatus::Loaded => "Loaded",
            PalletStatus::Shipped => "Shipped",
            PalletStatus::Received => "Received",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "open" => Some(PalletStatus::Open),
            "closed" => Some(PalletStatus::Closed),
            "loaded" => Some(PalletStatus::Loaded),
            "shipped" => Some(PalletStatus::Shipped),
            "received" => Some(PalletStatus::Received),
            _ => None,
        }
    }
}

impl fmt::Display for PalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// Load direction
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadDirection {
    Outbound, // shop -> vendor
    Inbound,  // vendor -> site
}

impl LoadDirection {
    /// Load number prefix (OUT-### / IN-###).
    pub fn prefix(&self) -> &'static str {
        match self {
            LoadDirection::Outbound => "OUT",
            LoadDirection::Inbound => "IN",
        }
    }
}

impl fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDirection::Outbound => write!(f, "Outbound"),
            LoadDirection::Inbound => write!(f, "Inbound"),
        }
    }
}

// ==========================================
// Item source / send type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    LongShapes,
    Parts,
    PullList, // raw inventory pull
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendType {
    Raw,            // shipped as-is
    CutToLength,    // pre-cut at the home facility
    PartsOnPallets, // cut parts grouped on pallets
}

impl SendType {
    /// The opposite side of a barcode link, if this type has one.
    pub fn barcode_counterpart(&self) -> Option<SendType> {
        match self {
            SendType::Raw => Some(SendType::CutToLength),
            SendType::CutToLength => Some(SendType::Raw),
            SendType::PartsOnPallets => None,
        }
    }
}

impl fmt::Display for SendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendType::Raw => write!(f, "Raw"),
            SendType::CutToLength => write!(f, "Cut to Length"),
            SendType::PartsOnPallets => write!(f, "Parts on Pallets"),
        }
    }
}

// ==========================================
// Item assignment state (derived from pallet/load links)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentState {
    Unassigned,
    OnPallet,
    OnLoad,
}

// ==========================================
// Card top-bar category
// ==========================================
// Evaluated in declaration order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopBarCategory {
    OverdueSend,
    OverdueReturn,
    MissingSteel,
    Ready,
    InProgress,
    Complete,
    Submitted,
}

impl fmt::Display for TopBarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopBarCategory::OverdueSend => write!(f, "OVERDUE_SEND"),
            TopBarCategory::OverdueReturn => write!(f, "OVERDUE_RETURN"),
            TopBarCategory::MissingSteel => write!(f, "MISSING_STEEL"),
            TopBarCategory::Ready => write!(f, "READY"),
            TopBarCategory::InProgress => write!(f, "IN_PROGRESS"),
            TopBarCategory::Complete => write!(f, "COMPLETE"),
            TopBarCategory::Submitted => write!(f, "SUBMITTED"),
        }
    }
}

// ==========================================
// Load capacity band (advisory only)
// ==========================================
// Order: Green < Orange < Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityBand {
    Green,
    Orange,
    Red,
}

impl fmt::Display for CapacityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityBand::Green => write!(f, "GREEN"),
            CapacityBand::Orange => write!(f, "ORANGE"),
            CapacityBand::Red => write!(f, "RED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subout_status_from_label_variants() {
        assert_eq!(SubOutStatus::from_label("In Process"), Some(SubOutStatus::InProcess));
        assert_eq!(SubOutStatus::from_label("IN_PROCESS"), Some(SubOutStatus::InProcess));
        assert_eq!(SubOutStatus::from_label("QC'd"), Some(SubOutStatus::QCd));
        assert_eq!(SubOutStatus::from_label("on-site"), Some(SubOutStatus::OnSite));
        assert_eq!(SubOutStatus::from_label("Galvanized"), None);
    }

    #[test]
    fn test_subout_status_step_index() {
        assert_eq!(SubOutStatus::Submitted.step_index(), Some(0));
        assert_eq!(SubOutStatus::Complete.step_index(), Some(7));
        assert_eq!(SubOutStatus::OnSite.step_index(), None);
    }

    #[test]
    fn test_subout_status_serde_names() {
        let json = serde_json::to_string(&SubOutStatus::QCd).unwrap();
        assert_eq!(json, "\"QCD\"");
        let back: SubOutStatus = serde_json::from_str("\"IN_PROCESS\"").unwrap();
        assert_eq!(back, SubOutStatus::InProcess);
    }

    #[test]
    fn test_load_status_label_roundtrip() {
        assert_eq!(LoadStatus::from_label("In Transit"), Some(LoadStatus::InTransit));
        assert!(LoadStatus::Planned < LoadStatus::Delivered);
    }

    #[test]
    fn test_send_type_counterpart() {
        assert_eq!(SendType::Raw.barcode_counterpart(), Some(SendType::CutToLength));
        assert_eq!(SendType::CutToLength.barcode_counterpart(), Some(SendType::Raw));
        assert_eq!(SendType::PartsOnPallets.barcode_counterpart(), None);
    }
}
