use serde::{Deserialize, Serialize};

/// Report 1 body as served by the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPayload {
    #[serde(default)]
    pub title: Option<String>,
    pub x: Vec<Option<String>>,
    pub y: Vec<Option<u64>>,
}

/// Report 2 and 3 body as served by the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerPayload {
    #[serde(default)]
    pub title: Option<String>,
    pub x: Vec<Option<String>>,
    pub y1: Vec<Option<u64>>,
    pub y2: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberRow {
    pub label: String,
    pub count: u64,
    pub percentage: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberReportResponse {
    pub title: String,
    pub date: String,
    pub date_display: String,
    pub rows: Vec<MemberRow>,
    pub total: u64,
    pub total_percentage: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerRow {
    pub label: String,
    pub active: u64,
    pub completed: u64,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerReportResponse {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub range_display: String,
    pub rows: Vec<LearnerRow>,
    pub total_active: u64,
    pub total_completed: u64,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
