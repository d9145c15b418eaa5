//! Blocking HTTP transport for the conversion backend.

use crate::remote::convert::{ConvertError, ConvertRequest, ConvertResponse, ConvertService};
use log::{error, info};
use std::time::Instant;

/// Blocking client for `POST {base}/api/convert-feishu-data`.
pub struct HttpConvertService {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpConvertService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: format!(
                "{}/api/convert-feishu-data",
                base_url.trim_end_matches('/')
            ),
        }
    }
}

impl ConvertService for HttpConvertService {
    fn convert(&self, request: &ConvertRequest) -> Result<ConvertResponse, ConvertError> {
        let started_at = Instant::now();
        info!("event=convert_call module=remote status=start");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|err| {
                error!(
                    "event=convert_call module=remote status=error duration_ms={} error_code=transport error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                ConvertError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "event=convert_call module=remote status=error duration_ms={} error_code=http_status status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(ConvertError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| ConvertError::Transport(err.to_string()))?;
        let parsed: ConvertResponse = serde_json::from_str(&body).map_err(|err| {
            error!(
                "event=convert_call module=remote status=error duration_ms={} error_code=decode error={}",
                started_at.elapsed().as_millis(),
                err
            );
            ConvertError::Decode(format!("conversion response is not valid JSON: {err}"))
        })?;

        info!(
            "event=convert_call module=remote status=ok duration_ms={} success={}",
            started_at.elapsed().as_millis(),
            parsed.success
        );
        Ok(parsed)
    }
}
