//! 时间类型模块
//!
//! 后端返回的时间字段有两种编码：
//! - ISO 8601 / RFC 3339 字符串，如 `"2024-06-10T09:00:00Z"`
//! - 数字数组 `[year, month, day, hour, minute, second, nanos?]`（月份从 1 开始）
//!
//! `Timestamp` 在反序列化边界统一为 UTC 时间，序列化时只输出 RFC 3339 字符串。

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// =========================================================
// Timestamp - 规范化的传输时间类型
// =========================================================

/// UTC 时间戳，传输格式固定为 RFC 3339
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    /// 当前时间
    #[inline]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    #[inline]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// 规范化的字符串表示
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// 解析字符串形式
    ///
    /// 带时区的按 RFC 3339 解析；不带时区的 ISO 字符串视为 UTC。
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(t.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(Utc.from_utc_datetime(&naive)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
    }

    /// 解析数组形式
    ///
    /// 至少需要年月日三个分量，缺失的时分秒按 0 处理。
    pub fn from_parts(parts: &[i64]) -> Option<Self> {
        if parts.len() < 3 || parts.len() > 7 {
            return None;
        }
        let part = |i: usize| parts.get(i).copied().unwrap_or(0);
        let date = NaiveDate::from_ymd_opt(
            i32::try_from(part(0)).ok()?,
            u32::try_from(part(1)).ok()?,
            u32::try_from(part(2)).ok()?,
        )?;
        let naive = date.and_hms_nano_opt(
            u32::try_from(part(3)).ok()?,
            u32::try_from(part(4)).ok()?,
            u32::try_from(part(5)).ok()?,
            u32::try_from(part(6)).ok()?,
        )?;
        Some(Self(Utc.from_utc_datetime(&naive)))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

// =========================================================
// Serde
// =========================================================

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Text(String),
    Parts(Vec<i64>),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireTimestamp::deserialize(deserializer)? {
            WireTimestamp::Text(s) => Timestamp::parse(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp string: {s}"))),
            WireTimestamp::Parts(parts) => Timestamp::from_parts(&parts)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp array: {parts:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_array_forms_agree() {
        let from_str: Timestamp = serde_json::from_value(json!("2024-06-10T09:00:00Z")).unwrap();
        let from_arr: Timestamp = serde_json::from_value(json!([2024, 6, 10, 9, 0, 0])).unwrap();
        assert_eq!(from_str, from_arr);
    }

    #[test]
    fn zoneless_string_is_utc() {
        let ts = Timestamp::parse("2024-06-10T09:00:00.250").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-10T09:00:00.250Z");
    }

    #[test]
    fn offset_is_normalized() {
        let ts = Timestamp::parse("2024-06-10T11:00:00+02:00").unwrap();
        assert_eq!(serde_json::to_value(ts).unwrap(), json!("2024-06-10T09:00:00Z"));
    }

    #[test]
    fn short_array_defaults_time_to_midnight() {
        let ts: Timestamp = serde_json::from_value(json!([2024, 1, 15])).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_value::<Timestamp>(json!([2024, 13, 1, 0, 0, 0])).is_err());
        assert!(serde_json::from_value::<Timestamp>(json!([2024])).is_err());
        assert!(serde_json::from_value::<Timestamp>(json!("yesterday")).is_err());
    }
}
