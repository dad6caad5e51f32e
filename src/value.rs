use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::CompareError;

/// Dynamically typed value, encoded into a `ValueBuffer` before comparing.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Val {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(Timestamp),
    Str(String),
    Symbol(String),
    List(Vec<Val>),
}

impl Val {
    /// Reads the JSON form accepted by the command line tool: plain JSON
    /// scalars and arrays, `{"sym": "name"}` for symbols and
    /// `{"ts": "2024-01-31T12:00:00Z"}` for timestamps.
    pub fn from_json(json: &serde_json::Value) -> Result<Val, CompareError> {
        use serde_json::Value as Json;
        Ok(match json {
            Json::Null => Val::Null,
            Json::Bool(b) => Val::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Val::Int(i),
                None => Val::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Val::Str(s.clone()),
            Json::Array(values) => Val::List(values.iter().map(Val::from_json).collect::<Result<_, _>>()?),
            Json::Object(fields) => match (fields.len(), fields.get("sym"), fields.get("ts")) {
                (1, Some(Json::String(name)), _) => Val::Symbol(name.clone()),
                (1, _, Some(Json::String(ts))) => Val::Timestamp(ts.parse()?),
                _ => return Err(CompareError::InvalidArgument(format!("unsupported object {}", json))),
            },
        })
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Val::Null => write!(f, "null"),
            Val::Bool(b) => write!(f, "{}", b),
            Val::Int(i) => write!(f, "{}", i),
            Val::Float(x) => write!(f, "{:e}", x),
            Val::Timestamp(ts) => write!(f, "{}", ts),
            Val::Str(s) => write!(f, "\"{}\"", s),
            Val::Symbol(s) => write!(f, "'{}'", s),
            Val::List(values) => write!(f, "[{}]", values.iter().join(", ")),
        }
    }
}

impl From<()> for Val {
    fn from(_: ()) -> Self {
        Val::Null
    }
}

impl From<bool> for Val {
    fn from(val: bool) -> Self {
        Val::Bool(val)
    }
}

impl From<i64> for Val {
    fn from(val: i64) -> Self {
        Val::Int(val)
    }
}

impl From<f64> for Val {
    fn from(val: f64) -> Self {
        Val::Float(val)
    }
}

impl<'a> From<&'a str> for Val {
    fn from(val: &str) -> Self {
        Val::Str(val.to_string())
    }
}

impl From<String> for Val {
    fn from(val: String) -> Self {
        Val::Str(val)
    }
}

impl From<Timestamp> for Val {
    fn from(val: Timestamp) -> Self {
        Val::Timestamp(val)
    }
}

impl<T: Into<Val>> From<Option<T>> for Val {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => val.into(),
            None => Val::Null,
        }
    }
}

impl<T: Into<Val>> From<Vec<T>> for Val {
    fn from(values: Vec<T>) -> Self {
        Val::List(values.into_iter().map(Into::into).collect())
    }
}

/// UTC timestamp with second precision.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Timestamp, CompareError> {
        ensure!(
            (1..=9999).contains(&year)
                && (1..=12).contains(&month)
                && (1..=31).contains(&day)
                && hour < 24
                && minute < 60
                && second < 60,
            CompareError::InvalidArgument,
            "invalid timestamp {:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            year,
            month,
            day,
            hour,
            minute,
            second
        );
        Ok(Timestamp { year, month, day, hour, minute, second })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for Timestamp {
    type Err = CompareError;

    /// Parses `YYYY-MM-DDTHH:MM:SSZ`.
    fn from_str(s: &str) -> Result<Timestamp, CompareError> {
        let invalid = || CompareError::InvalidArgument(format!("expected YYYY-MM-DDTHH:MM:SSZ, got `{}`", s));
        let body = s.strip_suffix('Z').ok_or_else(invalid)?;
        let (date, time) = body.split_once('T').ok_or_else(invalid)?;
        let date: Vec<&str> = date.split('-').collect();
        let time: Vec<&str> = time.split(':').collect();
        if date.len() != 3 || time.len() != 3 {
            return Err(invalid());
        }
        let field = |part: &str| part.parse::<u8>().map_err(|_| invalid());
        Timestamp::new(
            date[0].parse::<u16>().map_err(|_| invalid())?,
            field(date[1])?,
            field(date[2])?,
            field(time[0])?,
            field(time[1])?,
            field(time[2])?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp() {
        let ts: Timestamp = "2024-02-29T23:59:07Z".parse().unwrap();
        assert_eq!(ts, Timestamp::new(2024, 2, 29, 23, 59, 7).unwrap());
        assert_eq!(ts.to_string(), "2024-02-29T23:59:07Z");
        assert!("2024-02-29 23:59:07".parse::<Timestamp>().is_err());
        assert!("2024-13-01T00:00:00Z".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_from_json() {
        let json = json!([null, true, 3, -2.5, "abc", {"sym": "abc"}, {"ts": "1999-12-31T00:00:00Z"}, [1]]);
        let val = Val::from_json(&json).unwrap();
        assert_eq!(
            val,
            Val::List(vec![
                Val::Null,
                Val::Bool(true),
                Val::Int(3),
                Val::Float(-2.5),
                Val::Str("abc".to_string()),
                Val::Symbol("abc".to_string()),
                Val::Timestamp(Timestamp::new(1999, 12, 31, 0, 0, 0).unwrap()),
                Val::List(vec![Val::Int(1)]),
            ])
        );
        assert_eq!(val.to_string(), "[null, true, 3, -2.5e0, \"abc\", 'abc', 1999-12-31T00:00:00Z, [1]]");
        assert!(Val::from_json(&json!({"foo": 1})).is_err());
    }
}
