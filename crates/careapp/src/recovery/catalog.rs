//! Built-in procedure catalog.

use super::{Milestone, Procedure, ProcedureId};

const RHINOPLASTY: &[Milestone] = &[
    Milestone::new(1, "Surgery Day", "Rest, ice, elevation."),
    Milestone::new(3, "Peak Swelling", "Swelling and bruising peak."),
    Milestone::new(7, "Cast Removal", "First follow-up."),
];

const BREAST_AUGMENTATION: &[Milestone] = &[
    Milestone::new(1, "Surgery Day", "Surgical bra worn."),
    Milestone::new(7, "First Follow-up", "Sutures may be removed."),
];

const LIPOSUCTION: &[Milestone] = &[
    Milestone::new(1, "Surgery Day", "Compression garment."),
    Milestone::new(7, "Bruising Peak", "Bruising most visible."),
];

/// Every known procedure, in selector order.
pub const PROCEDURES: &[Procedure] = &[
    Procedure {
        id: ProcedureId::Rhinoplasty,
        name: "Rhinoplasty",
        milestones: RHINOPLASTY,
    },
    Procedure {
        id: ProcedureId::BreastAugmentation,
        name: "Breast Augmentation",
        milestones: BREAST_AUGMENTATION,
    },
    Procedure {
        id: ProcedureId::Liposuction,
        name: "Liposuction",
        milestones: LIPOSUCTION,
    },
];

/// Catalog entry for an identifier.
pub(super) fn lookup(id: ProcedureId) -> &'static Procedure {
    match id {
        ProcedureId::Rhinoplasty => &PROCEDURES[0],
        ProcedureId::BreastAugmentation => &PROCEDURES[1],
        ProcedureId::Liposuction => &PROCEDURES[2],
    }
}
