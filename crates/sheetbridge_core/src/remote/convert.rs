//! Conversion request/response wire types and payload codec.

use crate::model::matrix::TableMatrix;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sheet title used for every converted workbook.
const OUTPUT_SHEET_NAME: &str = "转换结果";

/// Conversion failure taxonomy; none of these are retried automatically.
#[derive(Debug)]
pub enum ConvertError {
    /// Remote endpoint unreachable or the body could not be read.
    Transport(String),
    /// Non-2xx HTTP status.
    Status(u16),
    /// Response body not parseable as JSON, or workbook payload not valid
    /// hex.
    Decode(String),
    /// Backend answered `success: false`; carries its error string verbatim
    /// (or a generic fallback when the backend omitted one).
    Rejected(String),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "conversion transport failure: {detail}"),
            Self::Status(code) => write!(f, "conversion service returned HTTP {code}"),
            Self::Decode(detail) => write!(f, "conversion response decode failure: {detail}"),
            Self::Rejected(detail) => write!(f, "conversion rejected: {detail}"),
        }
    }
}

impl Error for ConvertError {}

/// Fixed mapping from required table headers (plus the sheet title and the
/// caller-selected value column) to canonical output-column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProject {
    pub sheet_name: String,
    pub value_column: String,
    pub did: String,
    pub did_name: String,
    pub signal_chinese: String,
    pub signal_english: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub length: String,
    pub read_sid: String,
    pub read_session: String,
    pub write_sid: String,
    pub write_session: String,
    pub data_format: String,
}

impl ConfigProject {
    /// Canonical mapping with the caller-selected value-column name.
    pub fn for_value_column(value_column: impl Into<String>) -> Self {
        Self {
            sheet_name: OUTPUT_SHEET_NAME.to_string(),
            value_column: value_column.into(),
            did: "DID".to_string(),
            did_name: "名称".to_string(),
            signal_chinese: "信号中文名".to_string(),
            signal_english: "信号英文名".to_string(),
            kind: "类型".to_string(),
            length: "长度".to_string(),
            read_sid: "读SID".to_string(),
            read_session: "读Session".to_string(),
            write_sid: "写SID".to_string(),
            write_session: "写Session".to_string(),
            data_format: "数据格式".to_string(),
        }
    }
}

/// POST body for `/api/convert-feishu-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// JSON-encoded `TableMatrix` rows (string-in-string on the wire).
    pub feishu_data: String,
    pub config_project: ConfigProject,
    pub project_name: String,
    pub view_name: String,
    pub table_name: String,
}

impl ConvertRequest {
    pub fn new(
        matrix: &TableMatrix,
        config_project: ConfigProject,
        project_name: impl Into<String>,
        view_name: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            feishu_data: matrix.to_json(),
            config_project,
            project_name: project_name.into(),
            view_name: view_name.into(),
            table_name: table_name.into(),
        }
    }
}

/// Conversion service response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Transport seam for the conversion backend.
pub trait ConvertService {
    fn convert(&self, request: &ConvertRequest) -> Result<ConvertResponse, ConvertError>;
}

/// Extracts the workbook bytes from a conversion response.
pub fn decode_excel_payload(response: &ConvertResponse) -> Result<Vec<u8>, ConvertError> {
    if !response.success {
        let detail = response
            .error
            .clone()
            .unwrap_or_else(|| "conversion failed without detail".to_string());
        return Err(ConvertError::Rejected(detail));
    }

    let payload = response
        .excel_data
        .as_deref()
        .ok_or_else(|| ConvertError::Decode("response carries no excel payload".to_string()))?;
    decode_hex_payload(payload)
}

/// Decodes a hex workbook payload: two hex digits per byte, either case.
pub fn decode_hex_payload(payload: &str) -> Result<Vec<u8>, ConvertError> {
    hex::decode(payload.trim())
        .map_err(|err| ConvertError::Decode(format!("excel payload is not valid hex: {err}")))
}

/// Encodes workbook bytes the way the backend does (lowercase hex).
pub fn encode_hex_payload(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
