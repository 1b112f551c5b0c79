//! Resource kinds that can be attached to a shoot.

use std::fmt;

pub const PROGRESS_PLANNED: &str = "planned";
pub const PROGRESS_IN_PROGRESS: &str = "in-progress";
pub const PROGRESS_COMPLETE: &str = "complete";

/// Build progress for costumes and props.
pub const VALID_PROGRESS: &[&str] = &[PROGRESS_PLANNED, PROGRESS_IN_PROGRESS, PROGRESS_COMPLETE];

/// Returns `true` if `status` is a valid costume/prop progress value.
pub fn is_valid_progress(status: &str) -> bool {
    VALID_PROGRESS.contains(&status)
}

/// The kinds of team resources a shoot can reference.
///
/// The string form is the URL segment used by both the resource routes
/// (`/api/{kind}`) and the association routes
/// (`/api/shoots/{id}/resources/{kind}/{resource_id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Personnel,
    Equipment,
    Costumes,
    Props,
    Locations,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Personnel,
        ResourceKind::Equipment,
        ResourceKind::Costumes,
        ResourceKind::Props,
        ResourceKind::Locations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Personnel => "personnel",
            ResourceKind::Equipment => "equipment",
            ResourceKind::Costumes => "costumes",
            ResourceKind::Props => "props",
            ResourceKind::Locations => "locations",
        }
    }

    /// Parse a URL segment. Singular forms are accepted for convenience.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personnel" => Some(ResourceKind::Personnel),
            "equipment" => Some(ResourceKind::Equipment),
            "costumes" | "costume" => Some(ResourceKind::Costumes),
            "props" | "prop" => Some(ResourceKind::Props),
            "locations" | "location" => Some(ResourceKind::Locations),
            _ => None,
        }
    }

    /// Entity name used in not-found messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            ResourceKind::Personnel => "Personnel",
            ResourceKind::Equipment => "Equipment",
            ResourceKind::Costumes => "Costume",
            ResourceKind::Props => "Prop",
            ResourceKind::Locations => "Location",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
