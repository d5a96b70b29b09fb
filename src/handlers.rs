use crate::calendar::{check_range, parse_or_today, DateError};
use crate::errors::AppError;
use crate::export::{render_xlsx, XLSX_CONTENT_TYPE};
use crate::models::{DateQuery, LearnerReportResponse, MemberReportResponse, RangeQuery};
use crate::report::{LearnerKind, LearnerReport, MemberReport, Sheet};
use crate::state::AppState;
use crate::ui::{render_index, render_learner_page, render_member_page};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use tracing::{error, info};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn member_page(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, AppError> {
    let date = parse_or_today(query.date.as_deref())?;
    match member_report(&state, date).await {
        Ok(report) => Ok(Html(render_member_page(date, Ok(&report))).into_response()),
        Err(err) => {
            let html = render_member_page(date, Err(&err));
            Ok((err.status, Html(html)).into_response())
        }
    }
}

pub async fn member_json(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<MemberReportResponse>, AppError> {
    let date = parse_or_today(query.date.as_deref())?;
    let report = member_report(&state, date).await?;
    Ok(Json(report.response()))
}

pub async fn member_export(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, AppError> {
    let date = parse_or_today(query.date.as_deref())?;
    let report = member_report(&state, date).await?;
    xlsx_response(&report.sheet())
}

pub async fn course_page(state: State<AppState>, query: Query<RangeQuery>) -> Result<Response, AppError> {
    learner_page(LearnerKind::Courses, state, query).await
}

pub async fn course_json(
    state: State<AppState>,
    query: Query<RangeQuery>,
) -> Result<Json<LearnerReportResponse>, AppError> {
    learner_json(LearnerKind::Courses, state, query).await
}

pub async fn course_export(state: State<AppState>, query: Query<RangeQuery>) -> Result<Response, AppError> {
    learner_export(LearnerKind::Courses, state, query).await
}

pub async fn subject_page(state: State<AppState>, query: Query<RangeQuery>) -> Result<Response, AppError> {
    learner_page(LearnerKind::Subjects, state, query).await
}

pub async fn subject_json(
    state: State<AppState>,
    query: Query<RangeQuery>,
) -> Result<Json<LearnerReportResponse>, AppError> {
    learner_json(LearnerKind::Subjects, state, query).await
}

pub async fn subject_export(state: State<AppState>, query: Query<RangeQuery>) -> Result<Response, AppError> {
    learner_export(LearnerKind::Subjects, state, query).await
}

async fn learner_page(
    kind: LearnerKind,
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, AppError> {
    let (start, end) = parse_range(&query)?;
    match learner_report(&state, kind, start, end).await {
        Ok(report) => Ok(Html(render_learner_page(kind, start, end, Ok(&report))).into_response()),
        Err(err) => {
            let html = render_learner_page(kind, start, end, Err(&err));
            Ok((err.status, Html(html)).into_response())
        }
    }
}

async fn learner_json(
    kind: LearnerKind,
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<LearnerReportResponse>, AppError> {
    let (start, end) = parse_range(&query)?;
    let report = learner_report(&state, kind, start, end).await?;
    Ok(Json(report.response()))
}

async fn learner_export(
    kind: LearnerKind,
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, AppError> {
    let (start, end) = parse_range(&query)?;
    let report = learner_report(&state, kind, start, end).await?;
    xlsx_response(&report.sheet())
}

async fn member_report(state: &AppState, date: NaiveDate) -> Result<MemberReport, AppError> {
    let payload = state.portal.fetch_members(date).await.inspect_err(|err| {
        error!("member report for {date} failed: {err}");
    })?;
    let report = MemberReport::build(payload, date, state.config.zero_total)?;
    info!("member report for {date}: {} categories, total {}", report.rows.len(), report.total);
    Ok(report)
}

async fn learner_report(
    state: &AppState,
    kind: LearnerKind,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<LearnerReport, AppError> {
    let payload = state
        .portal
        .fetch_learners(kind, start, end)
        .await
        .map_err(|err| {
            error!("{} report for {start}..{end} failed: {err}", kind.slug());
            AppError::range_portal(err)
        })?;
    let report = LearnerReport::build(kind, payload, start, end);
    info!(
        "{} report for {start}..{end}: {} rows, total {}",
        kind.slug(),
        report.rows.len(),
        report.total()
    );
    Ok(report)
}

fn parse_range(query: &RangeQuery) -> Result<(NaiveDate, NaiveDate), DateError> {
    let start = parse_or_today(query.start.as_deref())?;
    let end = parse_or_today(query.end.as_deref())?;
    check_range(start, end)?;
    Ok((start, end))
}

fn xlsx_response(sheet: &Sheet) -> Result<Response, AppError> {
    let bytes = render_xlsx(sheet)?;
    let disposition = format!("attachment; filename=\"{}\"", sheet.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
