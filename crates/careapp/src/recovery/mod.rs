//! Recovery model: the procedure catalog and milestone status computation.
//!
//! A milestone's status is never stored. It is derived from the milestone's
//! day offset and the current days-post-op counter every time it is asked for:
//!
//! | milestone day vs. days post-op | status     |
//! |--------------------------------|------------|
//! | less than                      | `complete` |
//! | equal                          | `current`  |
//! | greater than                   | `upcoming` |
//!
//! # Example
//!
//! ```
//! use careapp::recovery::{timeline, ProcedureId, Status};
//!
//! let entries = timeline(ProcedureId::Rhinoplasty, 5);
//! assert_eq!(entries[2].milestone.title, "Cast Removal");
//! assert_eq!(entries[2].status, Status::Upcoming);
//! ```

mod catalog;

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use catalog::PROCEDURES;

/// Progress of a single milestone relative to the days-post-op counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The milestone day has passed.
    Complete,
    /// The milestone falls on the current day.
    Current,
    /// The milestone is still ahead.
    Upcoming,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Current => write!(f, "current"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Identifier of a procedure in the built-in catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcedureId {
    /// Nose reshaping.
    #[default]
    Rhinoplasty,
    /// Breast augmentation.
    BreastAugmentation,
    /// Liposuction.
    Liposuction,
}

impl ProcedureId {
    /// Every procedure identifier, in catalog order.
    pub const ALL: &'static [ProcedureId] = &[
        Self::Rhinoplasty,
        Self::BreastAugmentation,
        Self::Liposuction,
    ];

    /// The stable key used in configuration and event payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rhinoplasty => "rhinoplasty",
            Self::BreastAugmentation => "breastAugmentation",
            Self::Liposuction => "liposuction",
        }
    }
}

impl std::fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcedureId {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| Error::unknown_procedure(key))
    }
}

/// A scheduled recovery checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Day offset from surgery.
    pub day: u32,
    /// Short title.
    pub title: &'static str,
    /// What to expect on that day.
    pub description: &'static str,
}

impl Milestone {
    /// Create a milestone.
    #[must_use]
    pub const fn new(day: u32, title: &'static str, description: &'static str) -> Self {
        Self {
            day,
            title,
            description,
        }
    }

    /// Status of this milestone on the given day.
    #[must_use]
    pub fn status(&self, days_post_op: u32) -> Status {
        status_of(self, days_post_op)
    }
}

/// A procedure and its ordered milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Procedure {
    /// Catalog key.
    pub id: ProcedureId,
    /// Display name.
    pub name: &'static str,
    /// Milestones in chronological order.
    pub milestones: &'static [Milestone],
}

/// A milestone paired with its status for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// The catalog milestone.
    #[serde(flatten)]
    pub milestone: &'static Milestone,
    /// Derived status.
    pub status: Status,
}

/// Compute a milestone's status for the given days-post-op counter.
#[must_use]
pub fn status_of(milestone: &Milestone, days_post_op: u32) -> Status {
    match milestone.day.cmp(&days_post_op) {
        Ordering::Less => Status::Complete,
        Ordering::Equal => Status::Current,
        Ordering::Greater => Status::Upcoming,
    }
}

/// All procedures in the catalog.
#[must_use]
pub fn procedures() -> &'static [Procedure] {
    PROCEDURES
}

/// Look up a procedure by identifier.
#[must_use]
pub fn procedure(id: ProcedureId) -> &'static Procedure {
    catalog::lookup(id)
}

/// Look up a procedure by its string key.
///
/// # Errors
///
/// Returns [`Error::UnknownProcedure`] if the key is not in the catalog.
pub fn procedure_by_key(key: &str) -> Result<&'static Procedure> {
    key.parse().map(procedure)
}

/// Ordered milestones for a procedure.
#[must_use]
pub fn milestones_for(id: ProcedureId) -> &'static [Milestone] {
    procedure(id).milestones
}

/// Every milestone of a procedure with its status on the given day.
#[must_use]
pub fn timeline(id: ProcedureId, days_post_op: u32) -> Vec<TimelineEntry> {
    milestones_for(id)
        .iter()
        .map(|milestone| TimelineEntry {
            milestone,
            status: status_of(milestone, days_post_op),
        })
        .collect()
}

/// Milestones that fall on the given day.
///
/// Milestones sharing a day are all returned.
#[must_use]
pub fn current_milestones(id: ProcedureId, days_post_op: u32) -> Vec<&'static Milestone> {
    milestones_for(id)
        .iter()
        .filter(|m| status_of(m, days_post_op) == Status::Current)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_of_ordering() {
        let m = Milestone::new(3, "Peak Swelling", "");
        assert_eq!(status_of(&m, 0), Status::Upcoming);
        assert_eq!(status_of(&m, 2), Status::Upcoming);
        assert_eq!(status_of(&m, 3), Status::Current);
        assert_eq!(status_of(&m, 4), Status::Complete);
        assert_eq!(status_of(&m, u32::MAX), Status::Complete);
    }

    #[test]
    fn test_status_of_day_zero() {
        let m = Milestone::new(0, "Surgery", "");
        assert_eq!(status_of(&m, 0), Status::Current);
        assert_eq!(status_of(&m, 1), Status::Complete);
    }

    #[test]
    fn test_status_of_is_pure_over_grid() {
        for day in 0..15 {
            for days_post_op in 0..15 {
                let m = Milestone::new(day, "t", "d");
                let first = status_of(&m, days_post_op);
                assert_eq!(first, status_of(&m, days_post_op));
                let expected = if day < days_post_op {
                    Status::Complete
                } else if day == days_post_op {
                    Status::Current
                } else {
                    Status::Upcoming
                };
                assert_eq!(first, expected);
            }
        }
    }

    #[test]
    fn test_milestone_status_method_matches_free_fn() {
        let m = Milestone::new(7, "Cast Removal", "First follow-up.");
        assert_eq!(m.status(7), status_of(&m, 7));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Complete.to_string(), "complete");
        assert_eq!(Status::Current.to_string(), "current");
        assert_eq!(Status::Upcoming.to_string(), "upcoming");
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_string(&Status::Current).unwrap();
        assert_eq!(json, "\"current\"");
    }

    #[test]
    fn test_procedure_id_parse() {
        assert_eq!(
            "rhinoplasty".parse::<ProcedureId>().unwrap(),
            ProcedureId::Rhinoplasty
        );
        assert_eq!(
            "breastAugmentation".parse::<ProcedureId>().unwrap(),
            ProcedureId::BreastAugmentation
        );
        assert_eq!(
            "liposuction".parse::<ProcedureId>().unwrap(),
            ProcedureId::Liposuction
        );
    }

    #[test]
    fn test_procedure_id_parse_unknown() {
        let err = "facelift".parse::<ProcedureId>().unwrap_err();
        assert!(matches!(err, Error::UnknownProcedure { ref key } if key == "facelift"));
        assert!(err.to_string().contains("facelift"));
        assert!("Rhinoplasty".parse::<ProcedureId>().is_err());
    }

    #[test]
    fn test_procedure_id_serde_uses_catalog_keys() {
        for id in ProcedureId::ALL {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            let back: ProcedureId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *id);
        }
    }

    #[test]
    fn test_procedure_id_default() {
        assert_eq!(ProcedureId::default(), ProcedureId::Rhinoplasty);
    }

    #[test]
    fn test_procedure_lookup() {
        let p = procedure(ProcedureId::BreastAugmentation);
        assert_eq!(p.name, "Breast Augmentation");
        assert_eq!(p.milestones.len(), 2);
        assert_eq!(p.milestones[1].title, "First Follow-up");
    }

    #[test]
    fn test_procedure_by_key() {
        assert_eq!(procedure_by_key("liposuction").unwrap().name, "Liposuction");
        assert!(procedure_by_key("unknown").is_err());
    }

    #[test]
    fn test_milestones_for_rhinoplasty() {
        let milestones = milestones_for(ProcedureId::Rhinoplasty);
        let days: Vec<u32> = milestones.iter().map(|m| m.day).collect();
        assert_eq!(days, vec![1, 3, 7]);
    }

    #[test]
    fn test_rhinoplasty_day_five() {
        let entries = timeline(ProcedureId::Rhinoplasty, 5);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].milestone.day, 1);
        assert_eq!(entries[0].status, Status::Complete);
        assert_eq!(entries[1].milestone.day, 3);
        assert_eq!(entries[1].status, Status::Complete);
        assert_eq!(entries[2].milestone.title, "Cast Removal");
        assert_eq!(entries[2].status, Status::Upcoming);

        assert!(entries.iter().all(|e| e.status != Status::Current));
        assert!(current_milestones(ProcedureId::Rhinoplasty, 5).is_empty());
    }

    #[test]
    fn test_current_milestones_on_matching_day() {
        let current = current_milestones(ProcedureId::Liposuction, 7);
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].title, "Bruising Peak");
    }

    #[test]
    fn test_current_ties_are_not_deduplicated() {
        let shared = [
            Milestone::new(2, "A", ""),
            Milestone::new(2, "B", ""),
            Milestone::new(4, "C", ""),
        ];
        let current: Vec<_> = shared
            .iter()
            .filter(|m| status_of(m, 2) == Status::Current)
            .collect();
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn test_timeline_entry_serialize_flattens_milestone() {
        let entries = timeline(ProcedureId::Liposuction, 1);
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["day"], 1);
        assert_eq!(json["title"], "Surgery Day");
        assert_eq!(json["status"], "current");
    }

    #[test]
    fn test_procedures_lists_catalog() {
        let names: Vec<&str> = procedures().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["Rhinoplasty", "Breast Augmentation", "Liposuction"]
        );
    }
}
