//! Pure projection of [`DashboardState`] into what the panels display.
//!
//! Nothing here touches the DOM; `app` only maps these values onto markup.

use crate::dto::{PriorityTier, Snapshot, SopCitation};
use crate::state::{ConnectionStatus, DashboardState};

pub const TITLE: &str = "First Responder Live Summary";
pub const SUMMARY_PLACEHOLDER: &str = "Waiting for incoming summary...";
pub const CITATIONS_PLACEHOLDER: &str = "No SOP citations yet.";
pub const TRANSCRIPT_PLACEHOLDER: &str = "(no transcript yet)";
pub const DETAIL_DASH: &str = "—";
pub const PRIORITY_DASH: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl Swatch {
    pub fn style(self) -> String {
        format!("background:{};color:{}", self.background, self.foreground)
    }
}

impl PriorityTier {
    pub fn swatch(self) -> Swatch {
        match self {
            Self::P1 => Swatch {
                background: "#dc2626",
                foreground: "white",
            },
            Self::P2 => Swatch {
                background: "#f59e0b",
                foreground: "black",
            },
            Self::P3 => Swatch {
                background: "#059669",
                foreground: "white",
            },
            Self::Unknown => Swatch {
                background: "#e5e7eb",
                foreground: "black",
            },
        }
    }
}

impl ConnectionStatus {
    pub fn dot_color(self) -> &'static str {
        match self {
            Self::Connected => "#10b981",
            Self::Connecting => "#f59e0b",
            Self::Error => "#dc2626",
            Self::Disconnected => "#9ca3af",
        }
    }

    pub fn label(self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Rounds half up, matching how browsers round percentages.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfidenceMeter {
    /// Bar width in percent, always within 0..=100.
    pub width_pct: u32,
    pub label: String,
}

impl ConfidenceMeter {
    pub fn new(confidence: f64) -> Self {
        let scaled = confidence * 100.0;
        let width = round_half_up(scaled.clamp(0.0, 100.0));
        Self {
            width_pct: width as u32,
            label: format!("{:.0}%", round_half_up(scaled)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailValue {
    Text(String),
    Pills(Vec<String>),
    Dash,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: DetailValue,
}

impl DetailRow {
    fn text(label: &'static str, value: Option<&String>) -> Self {
        let value = match value {
            Some(v) => DetailValue::Text(v.clone()),
            None => DetailValue::Dash,
        };
        Self { label, value }
    }

    fn pills(label: &'static str, tags: &[String]) -> Self {
        let value = if tags.is_empty() {
            DetailValue::Dash
        } else {
            DetailValue::Pills(tags.to_vec())
        };
        Self { label, value }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CitationCard {
    pub heading: String,
    pub excerpt: String,
}

impl From<&SopCitation> for CitationCard {
    fn from(citation: &SopCitation) -> Self {
        let heading = match citation.section.as_deref() {
            Some(section) if !section.is_empty() => format!("{} — {}", citation.title, section),
            _ => citation.title.clone(),
        };
        Self {
            heading,
            excerpt: citation.excerpt.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub status_label: String,
    pub status_color: &'static str,
    pub summary: String,
    pub priority_label: String,
    pub priority_swatch: Swatch,
    pub confidence: Option<ConfidenceMeter>,
    pub details: Vec<DetailRow>,
    /// Empty means the evidence panel shows [`CITATIONS_PLACEHOLDER`].
    pub citations: Vec<CitationCard>,
    pub transcript: String,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        let empty = Snapshot::default();
        let snap = state.snapshot.as_deref().unwrap_or(&empty);

        let (priority_label, tier) = match &snap.priority {
            Some(p) => (p.label.clone(), p.tier),
            None => (PRIORITY_DASH.to_string(), PriorityTier::Unknown),
        };

        Self {
            status_label: state.status.label(),
            status_color: state.status.dot_color(),
            summary: snap
                .summary
                .clone()
                .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string()),
            priority_label: format!("Priority {priority_label}"),
            priority_swatch: tier.swatch(),
            confidence: snap.confidence.map(ConfidenceMeter::new),
            details: vec![
                DetailRow::text("Location", snap.location_guess.as_ref()),
                DetailRow::pills("Units", &snap.units_recommended),
                DetailRow::pills("Hazards", &snap.hazards),
                DetailRow::pills("Medical", &snap.medical_flags),
            ],
            citations: snap.sop_citations.iter().map(CitationCard::from).collect(),
            transcript: snap
                .transcript_window
                .clone()
                .unwrap_or_else(|| TRANSCRIPT_PLACEHOLDER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedEvent;

    fn view_of(payload: &str) -> DashboardView {
        let state = DashboardState::default()
            .apply(FeedEvent::Opened)
            .apply(FeedEvent::Message(payload.to_string()));
        DashboardView::from_state(&state)
    }

    #[test]
    fn priority_swatches_are_exact_for_known_tiers() {
        assert_eq!(PriorityTier::P1.swatch().style(), "background:#dc2626;color:white");
        assert_eq!(PriorityTier::P2.swatch().style(), "background:#f59e0b;color:black");
        assert_eq!(PriorityTier::P3.swatch().style(), "background:#059669;color:white");
        assert_eq!(PriorityTier::Unknown.swatch().style(), "background:#e5e7eb;color:black");
    }

    #[test]
    fn unknown_priorities_use_default_swatch() {
        for raw in ["0", "4", "-1", "1.5", r#""1""#, "true", "[]"] {
            let view = view_of(&format!(r#"{{"priority": {raw}}}"#));
            assert_eq!(view.priority_swatch, PriorityTier::Unknown.swatch(), "priority {raw}");
        }
        assert_eq!(view_of(r#"{"priority": 3}"#).priority_swatch, PriorityTier::P3.swatch());
    }

    #[test]
    fn priority_label_uses_value_or_dash() {
        assert_eq!(view_of(r#"{"priority": 2}"#).priority_label, "Priority 2");
        assert_eq!(view_of(r#"{"priority": "high"}"#).priority_label, "Priority high");
        assert_eq!(view_of("{}").priority_label, "Priority -");
        assert_eq!(view_of(r#"{"priority": null}"#).priority_label, "Priority -");
    }

    #[test]
    fn status_dot_colors() {
        assert_eq!(ConnectionStatus::Connected.dot_color(), "#10b981");
        assert_eq!(ConnectionStatus::Connecting.dot_color(), "#f59e0b");
        assert_eq!(ConnectionStatus::Error.dot_color(), "#dc2626");
        assert_eq!(ConnectionStatus::Disconnected.dot_color(), "#9ca3af");
        assert_eq!(ConnectionStatus::Connecting.label(), "Connecting");
    }

    #[test]
    fn confidence_meter_clamps_bar_but_not_label() {
        let m = ConfidenceMeter::new(0.824);
        assert_eq!((m.width_pct, m.label.as_str()), (82, "82%"));
        let m = ConfidenceMeter::new(0.826);
        assert_eq!((m.width_pct, m.label.as_str()), (83, "83%"));
        let m = ConfidenceMeter::new(1.5);
        assert_eq!((m.width_pct, m.label.as_str()), (100, "150%"));
        let m = ConfidenceMeter::new(-0.2);
        assert_eq!((m.width_pct, m.label.as_str()), (0, "-20%"));
        let m = ConfidenceMeter::new(0.0);
        assert_eq!((m.width_pct, m.label.as_str()), (0, "0%"));
        let m = ConfidenceMeter::new(1.0);
        assert_eq!((m.width_pct, m.label.as_str()), (100, "100%"));
    }

    #[test]
    fn huge_confidence_label_does_not_saturate() {
        let meter = view_of(r#"{"confidence": 1e300}"#).confidence.expect("meter");
        assert_eq!(meter.width_pct, 100);
        assert!(!meter.label.contains("9223372036854775807"), "{}", meter.label);
        assert!(meter.label.len() > 300);
        assert!(meter.label.ends_with('%'));
    }

    #[test]
    fn confidence_hidden_unless_numeric() {
        assert!(view_of("{}").confidence.is_none());
        assert!(view_of(r#"{"confidence": "0.5"}"#).confidence.is_none());
        assert!(view_of(r#"{"confidence": 0}"#).confidence.is_some());
    }

    #[test]
    fn empty_hazards_render_dash() {
        let view = view_of(r#"{"hazards": [], "units_recommended": ["Engine 7"]}"#);
        let hazards = view.details.iter().find(|r| r.label == "Hazards").expect("row");
        assert_eq!(hazards.value, DetailValue::Dash);
        let units = view.details.iter().find(|r| r.label == "Units").expect("row");
        assert_eq!(units.value, DetailValue::Pills(vec!["Engine 7".into()]));
    }

    #[test]
    fn detail_rows_in_order() {
        let view = view_of(r#"{"location_guess": "Pier 4"}"#);
        let labels: Vec<_> = view.details.iter().map(|r| r.label).collect();
        assert_eq!(labels, ["Location", "Units", "Hazards", "Medical"]);
        assert_eq!(view.details[0].value, DetailValue::Text("Pier 4".into()));
        assert_eq!(view.details[3].value, DetailValue::Dash);
    }

    #[test]
    fn citation_heading_appends_section() {
        let view = view_of(
            r#"{"sop_citations": [
                {"title": "Evac Protocol", "section": "3.2", "excerpt": "..."},
                {"title": "Hazmat Staging", "excerpt": "Stage uphill."}
            ]}"#,
        );
        assert_eq!(view.citations[0].heading, "Evac Protocol — 3.2");
        assert_eq!(view.citations[0].excerpt, "...");
        assert_eq!(view.citations[1].heading, "Hazmat Staging");
    }

    #[test]
    fn non_object_citation_renders_blank_card() {
        let view = view_of(r#"{"sop_citations": ["x"]}"#);
        assert_eq!(
            view.citations,
            vec![CitationCard {
                heading: String::new(),
                excerpt: String::new(),
            }]
        );
    }

    #[test]
    fn placeholders_before_any_data() {
        let view = DashboardView::from_state(&DashboardState::default());
        assert_eq!(view.status_label, "Disconnected");
        assert_eq!(view.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(view.transcript, TRANSCRIPT_PLACEHOLDER);
        assert!(view.citations.is_empty());
        assert!(view.confidence.is_none());
        assert!(view.details.iter().all(|r| r.value == DetailValue::Dash));
    }
}
