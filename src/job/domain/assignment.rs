//! Links between jobs and the cleaners working them.

use super::{CleanerId, JobId, ParseAssignmentRoleError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role a cleaner plays on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentRole {
    /// Lead cleaner.
    #[serde(rename = "primary")]
    Primary,
    /// Standby cleaner.
    #[serde(rename = "backup")]
    Backup,
    /// Cleaner reachable for urgent cover.
    #[serde(rename = "on-call")]
    OnCall,
    /// Cleaner responsible for off-site laundry.
    #[serde(rename = "laundry_lead")]
    LaundryLead,
}

impl AssignmentRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Backup => "backup",
            Self::OnCall => "on-call",
            Self::LaundryLead => "laundry_lead",
        }
    }
}

impl TryFrom<&str> for AssignmentRole {
    type Error = ParseAssignmentRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "backup" => Ok(Self::Backup),
            "on-call" => Ok(Self::OnCall),
            "laundry_lead" => Ok(Self::LaundryLead),
            _ => Err(ParseAssignmentRoleError(value.to_owned())),
        }
    }
}

/// A cleaner's assignment to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignment {
    job_id: JobId,
    cleaner_id: CleanerId,
    role: AssignmentRole,
    urgent_bonus: bool,
    created_at: DateTime<Utc>,
}

impl JobAssignment {
    /// Creates an assignment without an urgency bonus.
    #[must_use]
    pub fn new(
        job_id: JobId,
        cleaner_id: CleanerId,
        role: AssignmentRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            job_id,
            cleaner_id,
            role,
            urgent_bonus: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        job_id: JobId,
        cleaner_id: CleanerId,
        role: AssignmentRole,
        urgent_bonus: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            job_id,
            cleaner_id,
            role,
            urgent_bonus,
            created_at,
        }
    }

    /// Marks the assignment as earning the urgent pickup bonus.
    #[must_use]
    pub const fn with_urgent_bonus(mut self) -> Self {
        self.urgent_bonus = true;
        self
    }

    /// Returns the job.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the cleaner.
    #[must_use]
    pub const fn cleaner_id(&self) -> CleanerId {
        self.cleaner_id
    }

    /// Returns the cleaner's role.
    #[must_use]
    pub const fn role(&self) -> AssignmentRole {
        self.role
    }

    /// Returns `true` when the assignment earns the urgent pickup bonus.
    #[must_use]
    pub const fn urgent_bonus(&self) -> bool {
        self.urgent_bonus
    }

    /// Returns when the assignment was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
