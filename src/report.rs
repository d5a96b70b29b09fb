use crate::calendar::{format_buddhist_date, iso_compact};
use crate::models::{
    LearnerPayload, LearnerReportResponse, LearnerRow, MemberPayload, MemberReportResponse,
    MemberRow,
};
use crate::percent::{format_percent, normalize_with, total, ZeroTotal};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

const TOTAL_LABEL: &str = "รวมทั้งหมด";
const MEMBER_PLACEHOLDER: &str = "ไม่มีชื่อประเภท";
const MEMBER_TITLE: &str = "รายงานจำนวนสมาชิก";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("รูปแบบข้อมูลจาก API ไม่ถูกต้อง: {labels} categories but {counts} counts")]
    LengthMismatch { labels: usize, counts: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(u64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// One worksheet worth of report content, shared by the HTML table and the xlsx export.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub file_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub total: Vec<Cell>,
    pub footer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnerKind {
    Courses,
    Subjects,
}

impl LearnerKind {
    pub fn report_id(self) -> u8 {
        match self {
            Self::Courses => 2,
            Self::Subjects => 3,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Subjects => "subjects",
        }
    }

    fn column_label(self) -> &'static str {
        match self {
            Self::Courses => "หลักสูตร",
            Self::Subjects => "รายวิชา",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Courses => "ไม่มีชื่อหลักสูตร",
            Self::Subjects => "ไม่มีชื่อรายวิชา",
        }
    }

    pub fn default_title(self) -> String {
        format!("รายงานจำนวนผู้เรียนในแต่ละ{}", self.column_label())
    }

    fn sheet_name(self) -> String {
        format!("รายงาน{}", self.column_label())
    }
}

#[derive(Debug)]
pub struct MemberReport {
    pub title: String,
    pub date: NaiveDate,
    pub rows: Vec<MemberRow>,
    pub total: u64,
    pub total_percentage: String,
}

impl MemberReport {
    pub fn build(
        payload: MemberPayload,
        date: NaiveDate,
        zero_total: ZeroTotal,
    ) -> Result<Self, ReportError> {
        if payload.x.len() != payload.y.len() {
            return Err(ReportError::LengthMismatch {
                labels: payload.x.len(),
                counts: payload.y.len(),
            });
        }

        let counts: Vec<u64> = payload.y.iter().map(|count| count.unwrap_or(0)).collect();
        let total = total(&counts);
        let percentages = normalize_with(&counts, zero_total);
        let percentage_sum: Decimal = percentages.iter().copied().sum();

        let rows = payload
            .x
            .into_iter()
            .zip(counts)
            .zip(percentages)
            .map(|((label, count), percentage)| MemberRow {
                label: label_or(label, MEMBER_PLACEHOLDER),
                count,
                percentage: format_percent(percentage),
            })
            .collect();

        Ok(Self {
            title: non_empty(payload.title).unwrap_or_else(|| MEMBER_TITLE.to_string()),
            date,
            rows,
            total,
            total_percentage: format_percent(percentage_sum),
        })
    }

    pub fn date_display(&self) -> String {
        format!("ข้อมูล ณ วันที่ {}", format_buddhist_date(self.date))
    }

    pub fn response(&self) -> MemberReportResponse {
        MemberReportResponse {
            title: self.title.clone(),
            date: self.date.to_string(),
            date_display: self.date_display(),
            rows: self
                .rows
                .iter()
                .map(|row| MemberRow {
                    label: row.label.clone(),
                    count: row.count,
                    percentage: row.percentage.clone(),
                })
                .collect(),
            total: self.total,
            total_percentage: self.total_percentage.clone(),
        }
    }

    pub fn sheet(&self) -> Sheet {
        Sheet {
            name: "รายงานสมาชิก".to_string(),
            file_name: format!("member_report_{}.xlsx", iso_compact(self.date)),
            header: vec![
                "ประเภทสมาชิก".to_string(),
                "จำนวน (คน)".to_string(),
                "เปอร์เซ็นต์ (%)".to_string(),
            ],
            rows: self
                .rows
                .iter()
                .map(|row| {
                    vec![
                        Cell::text(&row.label),
                        Cell::Number(row.count),
                        Cell::Text(format!("{}%", row.percentage)),
                    ]
                })
                .collect(),
            total: vec![
                Cell::text(TOTAL_LABEL),
                Cell::Number(self.total),
                Cell::Text(format!("{}%", self.total_percentage)),
            ],
            footer: self.date_display(),
        }
    }
}

#[derive(Debug)]
pub struct LearnerReport {
    pub kind: LearnerKind,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<LearnerRow>,
    pub total_active: u64,
    pub total_completed: u64,
}

impl LearnerReport {
    /// Missing active/completed entries count as zero.
    pub fn build(
        kind: LearnerKind,
        payload: LearnerPayload,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        let mut total_active = 0u64;
        let mut total_completed = 0u64;

        let rows = payload
            .x
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let active = payload.y1.get(index).copied().flatten().unwrap_or(0);
                let completed = payload.y2.get(index).copied().flatten().unwrap_or(0);
                total_active = total_active.saturating_add(active);
                total_completed = total_completed.saturating_add(completed);
                LearnerRow {
                    label: label_or(label, kind.placeholder()),
                    active,
                    completed,
                    total: active.saturating_add(completed),
                }
            })
            .collect();

        Self {
            kind,
            title: non_empty(payload.title).unwrap_or_else(|| kind.default_title()),
            start,
            end,
            rows,
            total_active,
            total_completed,
        }
    }

    pub fn total(&self) -> u64 {
        self.total_active.saturating_add(self.total_completed)
    }

    pub fn range_display(&self) -> String {
        format!(
            "ข้อมูลระหว่างวันที่ {} ถึง {}",
            format_buddhist_date(self.start),
            format_buddhist_date(self.end)
        )
    }

    pub fn response(&self) -> LearnerReportResponse {
        LearnerReportResponse {
            title: self.title.clone(),
            start_date: self.start.to_string(),
            end_date: self.end.to_string(),
            range_display: self.range_display(),
            rows: self
                .rows
                .iter()
                .map(|row| LearnerRow {
                    label: row.label.clone(),
                    active: row.active,
                    completed: row.completed,
                    total: row.total,
                })
                .collect(),
            total_active: self.total_active,
            total_completed: self.total_completed,
            total: self.total(),
        }
    }

    pub fn sheet(&self) -> Sheet {
        Sheet {
            name: self.kind.sheet_name(),
            file_name: format!(
                "course_report_{}_{}.xlsx",
                iso_compact(self.start),
                iso_compact(self.end)
            ),
            header: vec![
                self.kind.column_label().to_string(),
                "กำลังเรียน (คน)".to_string(),
                "เรียนจบ (คน)".to_string(),
                "รวมทั้งหมด (คน)".to_string(),
            ],
            rows: self
                .rows
                .iter()
                .map(|row| {
                    vec![
                        Cell::text(&row.label),
                        Cell::Number(row.active),
                        Cell::Number(row.completed),
                        Cell::Number(row.total),
                    ]
                })
                .collect(),
            total: vec![
                Cell::text(TOTAL_LABEL),
                Cell::Number(self.total_active),
                Cell::Number(self.total_completed),
                Cell::Number(self.total()),
            ],
            footer: self.range_display(),
        }
    }
}

fn label_or(label: Option<String>, placeholder: &str) -> String {
    non_empty(label).unwrap_or_else(|| placeholder.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
