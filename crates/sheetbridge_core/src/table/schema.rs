//! Required-header contract for exportable tables.

use std::collections::HashSet;

/// Header names every exportable diagnostic table must carry.
pub const DEFAULT_REQUIRED_HEADERS: [&str; 11] = [
    "DID",
    "名称",
    "二级名称",
    "英文名称",
    "类型",
    "长度",
    "读SID",
    "读Session",
    "写SID",
    "写Session",
    "数据格式",
];

/// Ordered set of header names that must all be present in the table's
/// header row. Presence is required; header order is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSchema {
    headers: Vec<String>,
}

impl RequiredSchema {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns every required header absent from `present`, in schema order.
    pub fn missing_from<'a>(&self, present: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let present: HashSet<&str> = present.into_iter().collect();
        self.headers
            .iter()
            .filter(|header| !present.contains(header.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for RequiredSchema {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_HEADERS)
    }
}
