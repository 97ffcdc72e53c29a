use serde::Serialize;

use crate::db::enums::{ComplaintStatus, UserStatus};

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct ResidentCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

impl ResidentCounts {
    pub fn from_rows(rows: &[(UserStatus, i64)]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, (status, count)| {
            match status {
                UserStatus::Pending => acc.pending += count,
                UserStatus::Approved => acc.approved += count,
                UserStatus::Rejected => acc.rejected += count,
            }
            acc.total += count;
            acc
        })
    }
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct ComplaintCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    pub total: i64,
}

impl ComplaintCounts {
    pub fn from_rows(rows: &[(ComplaintStatus, i64)]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, (status, count)| {
            match status {
                ComplaintStatus::Pending => acc.pending += count,
                ComplaintStatus::InProgress => acc.in_progress += count,
                ComplaintStatus::Resolved => acc.resolved += count,
                ComplaintStatus::Closed => acc.closed += count,
            }
            acc.total += count;
            acc
        })
    }
}

#[derive(Serialize, Debug)]
pub struct DashboardStats {
    pub residents: ResidentCounts,
    pub complaints: ComplaintCounts,
    pub pending_vehicles: i64,
    pub active_notices: i64,
}
