// ==========================================
// SubOuts Tracker - UrgencyScorer
// ==========================================
// Card top-bar category (priority ordered, first match wins) and
// heat-map tint from days-until-leave and percent loaded.
// Input: SubOut + its loads + today + percent loaded
// Every category decision carries a reason string.
// ==========================================

use crate::domain::load::Load;
use crate::domain::subout::SubOut;
use crate::domain::types::{LoadDirection, SubOutStatus, TopBarCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days-until-leave at or above which no tint is applied.
pub const DEFAULT_HEAT_WINDOW_DAYS: i64 = 14;

// ==========================================
// Heat map output
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatTint {
    /// Complete, no leave date, or leave date outside the window.
    NoTint,
    /// 100% loaded; overrides date urgency.
    Green { color: TintColor },
    /// Yellow (0.0) to red (1.0).
    Heat { intensity: f64, color: TintColor },
}

impl HeatTint {
    pub fn intensity(&self) -> f64 {
        match self {
            HeatTint::Heat { intensity, .. } => *intensity,
            _ => 0.0,
        }
    }

    pub fn color(&self) -> Option<TintColor> {
        match self {
            HeatTint::NoTint => None,
            HeatTint::Green { color } | HeatTint::Heat { color, .. } => Some(*color),
        }
    }

    /// Heat past the yellow/red midpoint.
    pub fn is_red_leaning(&self) -> bool {
        matches!(self, HeatTint::Heat { intensity, .. } if *intensity >= 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatMapSettings {
    pub window_days: i64,
    pub green_alpha: f64,
    pub max_alpha: f64,
}

impl Default for HeatMapSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_HEAT_WINDOW_DAYS,
            green_alpha: 0.18,
            max_alpha: 0.60,
        }
    }
}

const YELLOW: (u8, u8, u8) = (250, 204, 21);
const RED: (u8, u8, u8) = (220, 38, 38);
const GREEN: (u8, u8, u8) = (34, 197, 94);

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}

// ==========================================
// UrgencyScorer
// ==========================================
pub struct UrgencyScorer;

impl UrgencyScorer {
    /// Days from today to the leave-MFC date; negative once past.
    pub fn days_until_leave(subout: &SubOut, today: NaiveDate) -> Option<i64> {
        subout
            .leave_mfc_date
            .map(|leave| leave.signed_duration_since(today).num_days())
    }

    /// True when the direction has loads, enough of them to cover the
    /// planned count, and every one is delivered.
    pub fn all_loads_delivered(loads: &[Load], direction: LoadDirection, planned: u32) -> bool {
        let in_direction: Vec<&Load> = loads.iter().filter(|l| l.direction == direction).collect();
        !in_direction.is_empty()
            && in_direction.len() >= planned as usize
            && in_direction.iter().all(|l| l.is_delivered())
    }

    /// Top-bar category with the rule that matched.
    ///
    /// # Rules (first match wins)
    /// 1. today > leave date and outbound loads not all delivered -> OverdueSend
    /// 2. today > due-to-site date and inbound loads not all delivered -> OverdueReturn
    /// 3. missing steel -> MissingSteel
    /// 4. status Ready -> Ready
    /// 5. status Sent / InProcess / Shipped -> InProgress
    /// 6. status Complete -> Complete
    /// 7. default -> Submitted
    pub fn evaluate_top_bar(
        subout: &SubOut,
        loads: &[Load],
        today: NaiveDate,
    ) -> (TopBarCategory, String) {
        if let Some(leave) = subout.leave_mfc_date {
            if today > leave
                && !Self::all_loads_delivered(
                    loads,
                    LoadDirection::Outbound,
                    subout.planned_outbound_loads,
                )
            {
                return (
                    TopBarCategory::OverdueSend,
                    format!("OVERDUE_SEND: leave_mfc_date={} < today={}", leave, today),
                );
            }
        }

        if let Some(due) = subout.due_to_site_date {
            if today > due
                && !Self::all_loads_delivered(
                    loads,
                    LoadDirection::Inbound,
                    subout.planned_inbound_loads,
                )
            {
                return (
                    TopBarCategory::OverdueReturn,
                    format!("OVERDUE_RETURN: due_to_site_date={} < today={}", due, today),
                );
            }
        }

        if subout.missing_steel {
            return (
                TopBarCategory::MissingSteel,
                "MISSING_STEEL: missing_steel=true".to_string(),
            );
        }

        let category = match subout.status {
            SubOutStatus::Ready => TopBarCategory::Ready,
            SubOutStatus::Sent | SubOutStatus::InProcess | SubOutStatus::Shipped => {
                TopBarCategory::InProgress
            }
            SubOutStatus::Complete => TopBarCategory::Complete,
            _ => TopBarCategory::Submitted,
        };
        (category, format!("{}: status={}", category, subout.status))
    }

    pub fn top_bar_category(subout: &SubOut, loads: &[Load], today: NaiveDate) -> TopBarCategory {
        Self::evaluate_top_bar(subout, loads, today).0
    }

    /// Heat-map tint.
    ///
    /// # Rules
    /// 1. Complete, no leave date, or D >= window -> NoTint
    /// 2. percent loaded >= 100 -> Green
    /// 3. otherwise Heat with
    ///    intensity = date_urgency * (0.5 + 0.5 * load_urgency)
    ///    date_urgency = (window - clamp(D, 0, window)) / window
    ///    load_urgency = (100 - percent) / 100
    ///
    /// Intensity rises as D shrinks and as percent loaded falls, and is
    /// 0 at D = window.
    pub fn heat_map_intensity(
        subout: &SubOut,
        today: NaiveDate,
        percent_loaded: f64,
        settings: &HeatMapSettings,
    ) -> HeatTint {
        if subout.status == SubOutStatus::Complete {
            return HeatTint::NoTint;
        }
        let Some(days) = Self::days_until_leave(subout, today) else {
            return HeatTint::NoTint;
        };
        let window = settings.window_days.max(1);
        if days >= window {
            return HeatTint::NoTint;
        }

        if percent_loaded >= 100.0 {
            return HeatTint::Green {
                color: TintColor {
                    r: GREEN.0,
                    g: GREEN.1,
                    b: GREEN.2,
                    alpha: settings.green_alpha,
                },
            };
        }

        let date_urgency = (window - days.clamp(0, window)) as f64 / window as f64;
        let load_urgency = ((100.0 - percent_loaded) / 100.0).clamp(0.0, 1.0);
        let intensity = (date_urgency * (0.5 + 0.5 * load_urgency)).clamp(0.0, 1.0);

        HeatTint::Heat {
            intensity,
            color: TintColor {
                r: lerp_channel(YELLOW.0, RED.0, intensity),
                g: lerp_channel(YELLOW.1, RED.1, intensity),
                b: lerp_channel(YELLOW.2, RED.2, intensity),
                alpha: settings.max_alpha * intensity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LoadStatus;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()
    }

    fn subout(status: SubOutStatus) -> SubOut {
        let ts = today().and_hms_opt(9, 0, 0).unwrap();
        SubOut {
            subout_id: "S1".to_string(),
            job: "J-200".to_string(),
            lot_number: "LOT-7".to_string(),
            vendor_name: "Northside Coatings".to_string(),
            status,
            leave_mfc_date: None,
            due_to_site_date: None,
            planned_outbound_loads: 0,
            planned_inbound_loads: 0,
            weight_lbs: None,
            missing_steel: false,
            vendor_cost: None,
            freight_cost: None,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn load(direction: LoadDirection, status: LoadStatus) -> Load {
        Load {
            load_id: format!("{}-{:?}", direction.prefix(), status),
            subout_id: "S1".to_string(),
            load_number: format!("{}-001", direction.prefix()),
            direction,
            status,
            capacity_lbs: 48_000.0,
            scheduled_date: None,
            actual_date: None,
            carrier: None,
        }
    }

    // ==========================================
    // Top bar
    // ==========================================

    #[test]
    fn test_overdue_send_beats_missing_steel() {
        let mut s = subout(SubOutStatus::InProcess);
        s.leave_mfc_date = Some(today() - Duration::days(1));
        s.missing_steel = true;
        let loads = vec![load(LoadDirection::Outbound, LoadStatus::Loading)];
        let (category, reason) = UrgencyScorer::evaluate_top_bar(&s, &loads, today());
        assert_eq!(category, TopBarCategory::OverdueSend);
        assert!(reason.starts_with("OVERDUE_SEND"));
    }

    #[test]
    fn test_delivered_outbound_is_not_overdue() {
        let mut s = subout(SubOutStatus::Sent);
        s.leave_mfc_date = Some(today() - Duration::days(3));
        let loads = vec![load(LoadDirection::Outbound, LoadStatus::Delivered)];
        assert_eq!(
            UrgencyScorer::top_bar_category(&s, &loads, today()),
            TopBarCategory::InProgress
        );
    }

    #[test]
    fn test_leave_date_today_is_not_overdue() {
        let mut s = subout(SubOutStatus::Ready);
        s.leave_mfc_date = Some(today());
        assert_eq!(
            UrgencyScorer::top_bar_category(&s, &[], today()),
            TopBarCategory::Ready
        );
    }

    #[test]
    fn test_overdue_return() {
        let mut s = subout(SubOutStatus::Shipped);
        s.due_to_site_date = Some(today() - Duration::days(2));
        let loads = vec![
            load(LoadDirection::Outbound, LoadStatus::Delivered),
            load(LoadDirection::Inbound, LoadStatus::InTransit),
        ];
        assert_eq!(
            UrgencyScorer::top_bar_category(&s, &loads, today()),
            TopBarCategory::OverdueReturn
        );
    }

    #[test]
    fn test_no_loads_counts_as_not_delivered() {
        let mut s = subout(SubOutStatus::Submitted);
        s.leave_mfc_date = Some(today() - Duration::days(1));
        assert_eq!(
            UrgencyScorer::top_bar_category(&s, &[], today()),
            TopBarCategory::OverdueSend
        );
    }

    #[test]
    fn test_planned_count_must_be_covered() {
        let loads = vec![load(LoadDirection::Outbound, LoadStatus::Delivered)];
        assert!(UrgencyScorer::all_loads_delivered(&loads, LoadDirection::Outbound, 1));
        assert!(!UrgencyScorer::all_loads_delivered(&loads, LoadDirection::Outbound, 2));
    }

    #[test]
    fn test_status_categories() {
        let cases = [
            (SubOutStatus::Ready, TopBarCategory::Ready),
            (SubOutStatus::Sent, TopBarCategory::InProgress),
            (SubOutStatus::InProcess, TopBarCategory::InProgress),
            (SubOutStatus::Shipped, TopBarCategory::InProgress),
            (SubOutStatus::Complete, TopBarCategory::Complete),
            (SubOutStatus::Submitted, TopBarCategory::Submitted),
            (SubOutStatus::Received, TopBarCategory::Submitted),
            (SubOutStatus::OnSite, TopBarCategory::Submitted),
        ];
        for (status, expected) in cases {
            assert_eq!(
                UrgencyScorer::top_bar_category(&subout(status), &[], today()),
                expected,
                "status={:?}",
                status
            );
        }
    }

    // ==========================================
    // Heat map
    // ==========================================

    #[test]
    fn test_no_tint_outside_window() {
        let settings = HeatMapSettings::default();
        let mut s = subout(SubOutStatus::InProcess);
        s.leave_mfc_date = Some(today() + Duration::days(14));
        for p in [0.0, 40.0, 100.0] {
            assert_eq!(
                UrgencyScorer::heat_map_intensity(&s, today(), p, &settings),
                HeatTint::NoTint
            );
        }
    }

    #[test]
    fn test_no_tint_without_leave_date_or_when_complete() {
        let settings = HeatMapSettings::default();
        let s = subout(SubOutStatus::InProcess);
        assert_eq!(
            UrgencyScorer::heat_map_intensity(&s, today(), 10.0, &settings),
            HeatTint::NoTint
        );

        let mut done = subout(SubOutStatus::Complete);
        done.leave_mfc_date = Some(today() - Duration::days(5));
        assert_eq!(
            UrgencyScorer::heat_map_intensity(&done, today(), 10.0, &settings),
            HeatTint::NoTint
        );
    }

    #[test]
    fn test_full_load_is_green() {
        let settings = HeatMapSettings::default();
        let mut s = subout(SubOutStatus::Ready);
        s.leave_mfc_date = Some(today() + Duration::days(3));
        let tint = UrgencyScorer::heat_map_intensity(&s, today(), 100.0, &settings);
        assert!(matches!(tint, HeatTint::Green { .. }));
    }

    #[test]
    fn test_heat_monotonic_in_days_and_percent() {
        let settings = HeatMapSettings::default();
        let mut s = subout(SubOutStatus::InProcess);

        let mut previous = -1.0;
        for days in (-3..14).rev() {
            s.leave_mfc_date = Some(today() + Duration::days(days));
            let i = UrgencyScorer::heat_map_intensity(&s, today(), 40.0, &settings).intensity();
            assert!(i >= previous, "days={} intensity={} previous={}", days, i, previous);
            previous = i;
        }

        s.leave_mfc_date = Some(today() + Duration::days(5));
        let mut previous = 2.0;
        for p in [0.0, 20.0, 50.0, 80.0, 99.9] {
            let i = UrgencyScorer::heat_map_intensity(&s, today(), p, &settings).intensity();
            assert!(i <= previous, "percent={} intensity={}", p, i);
            previous = i;
        }
    }

    #[test]
    fn test_overdue_empty_load_is_full_red() {
        let settings = HeatMapSettings::default();
        let mut s = subout(SubOutStatus::InProcess);
        s.leave_mfc_date = Some(today() - Duration::days(1));
        let tint = UrgencyScorer::heat_map_intensity(&s, today(), 0.0, &settings);
        assert_eq!(tint.intensity(), 1.0);
        let color = tint.color().unwrap();
        assert_eq!((color.r, color.g, color.b), RED);
        assert!(tint.is_red_leaning());
    }
}
