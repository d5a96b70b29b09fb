use crate::models::{LearnerPayload, MemberPayload};
use crate::report::LearnerKind;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_BASE_URL: &str = "https://learningportal.ocsc.go.th/learningspaceapi";

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("404 Not Found - ไม่พบข้อมูล")]
    NotFound,
    #[error("500 Internal Server Error - ข้อผิดพลาดเซิร์ฟเวอร์")]
    ServerError,
    #[error("408 Request Timeout - การร้องขอหมดเวลา")]
    Timeout,
    #[error("HTTP Error {0}: {1}")]
    Status(u16, String),
    #[error("รูปแบบข้อมูลจาก API ไม่ถูกต้อง")]
    InvalidPayload(#[source] serde_json::Error),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PortalError {
    /// Follow-up hint shown under the error banner.
    pub fn details(&self) -> &'static str {
        match self {
            Self::ServerError => "เซิร์ฟเวอร์ประสบปัญหาภายใน กรุณาลองใหม่ในภายหลัง",
            Self::Timeout => "การเชื่อมต่อใช้เวลานานเกินไป กรุณาลองใหม่หรือตรวจสอบเครือข่ายของคุณ",
            Self::Transport(err) if err.is_timeout() => {
                "การเชื่อมต่อใช้เวลานานเกินไป กรุณาลองใหม่หรือตรวจสอบเครือข่ายของคุณ"
            }
            _ => "ไม่สามารถดึงข้อมูลได้ กรุณาตรวจสอบวันที่หรือลองใหม่ภายหลัง",
        }
    }

    /// Hint for the date-range reports, which point at the range for every failure.
    pub fn range_details(&self) -> &'static str {
        "ไม่สามารถดึงข้อมูลได้ กรุณาตรวจสอบช่วงวันที่หรือลองใหม่ภายหลัง"
    }
}

#[derive(Clone)]
pub struct PortalClient {
    http: Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_members(&self, date: NaiveDate) -> Result<MemberPayload, PortalError> {
        let url = format!("{}/reports/1?lastdate={}", self.base_url, date);
        self.get_json(&url).await
    }

    pub async fn fetch_learners(
        &self,
        kind: LearnerKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<LearnerPayload, PortalError> {
        let url = format!(
            "{}/reports/{}?startDate={}&endDate={}",
            self.base_url,
            kind.report_id(),
            start,
            end
        );
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PortalError> {
        debug!("fetching data from: {url}");
        let response = self.http.get(url).send().await?;
        check_status(response.status())?;

        let body = response.bytes().await?;
        parse_payload(&body).inspect_err(|err| error!("unexpected payload from {url}: {err}"))
    }
}

fn check_status(status: StatusCode) -> Result<(), PortalError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(PortalError::NotFound),
        StatusCode::INTERNAL_SERVER_ERROR => Err(PortalError::ServerError),
        StatusCode::REQUEST_TIMEOUT => Err(PortalError::Timeout),
        other => Err(PortalError::Status(
            other.as_u16(),
            other.canonical_reason().unwrap_or_default().to_string(),
        )),
    }
}

fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, PortalError> {
    serde_json::from_slice(body).map_err(PortalError::InvalidPayload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_errors() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(check_status(StatusCode::NOT_FOUND), Err(PortalError::NotFound)));
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(PortalError::ServerError)
        ));
        assert!(matches!(check_status(StatusCode::REQUEST_TIMEOUT), Err(PortalError::Timeout)));

        let err = check_status(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert_eq!(err.to_string(), "HTTP Error 503: Service Unavailable");
    }

    #[test]
    fn details_follow_error_kind() {
        assert!(PortalError::ServerError.details().contains("ภายใน"));
        assert!(PortalError::Timeout.details().contains("นานเกินไป"));
        assert!(PortalError::NotFound.details().contains("ตรวจสอบวันที่"));
    }

    #[test]
    fn range_details_mention_the_range() {
        assert!(PortalError::NotFound.range_details().contains("ตรวจสอบช่วงวันที่"));
        assert!(PortalError::ServerError.range_details().contains("ตรวจสอบช่วงวันที่"));
    }

    #[test]
    fn parses_member_payload() {
        let body = br#"{"title":"t","x":["a",null],"y":[4,null]}"#;
        let payload: MemberPayload = parse_payload(body).unwrap();
        assert_eq!(payload.x, vec![Some("a".to_string()), None]);
        assert_eq!(payload.y, vec![Some(4), None]);
    }

    #[test]
    fn rejects_malformed_payloads() {
        let missing_y = br#"{"title":"t","x":["a"]}"#;
        assert!(matches!(
            parse_payload::<MemberPayload>(missing_y),
            Err(PortalError::InvalidPayload(_))
        ));

        let negative = br#"{"x":["a"],"y":[-1]}"#;
        assert!(parse_payload::<MemberPayload>(negative).is_err());

        let learners = br#"{"x":["a"],"y1":[1]}"#;
        assert!(parse_payload::<LearnerPayload>(learners).is_err());
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = PortalClient::new("http://localhost:9/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/api");
    }
}
