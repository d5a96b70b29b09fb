use crate::calendar::DateError;
use crate::export::ExportError;
use crate::models::ErrorResponse;
use crate::portal::PortalError;
use crate::report::ReportError;
use axum::http::StatusCode;
use axum::Json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_gateway(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Upstream failure on a start/end report.
    pub fn range_portal(err: PortalError) -> Self {
        Self::bad_gateway(format!("เกิดข้อผิดพลาด: {err}"), err.range_details())
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<DateError> for AppError {
    fn from(err: DateError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        Self::bad_gateway(format!("เกิดข้อผิดพลาด: {err}"), err.details())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::bad_gateway(
            format!("เกิดข้อผิดพลาด: {err}"),
            "ไม่สามารถดึงข้อมูลได้ กรุณาตรวจสอบวันที่หรือลองใหม่ภายหลัง",
        )
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_failures_become_bad_gateway() {
        let err = AppError::from(PortalError::ServerError);
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.message.contains("500"));
        assert!(err.details.is_some());
    }

    #[test]
    fn range_portal_failures_point_at_the_range() {
        let err = AppError::range_portal(PortalError::NotFound);
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.message.contains("404"));
        assert!(err.details.unwrap().contains("ตรวจสอบช่วงวันที่"));
    }

    #[test]
    fn date_errors_become_bad_request() {
        let err = AppError::from(DateError::RangeReversed);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
