use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

// 可选数组用 `Option`，键缺失或显式 `null` 都能解析；访问方法统一返回空切片

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRecord {
    pub business_id: String,
    pub name: String,
    pub full_address: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stars: f64,
    pub review_count: i64,
    pub open: bool,
    #[serde(default)]
    pub neighborhoods: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl BusinessRecord {
    pub fn neighborhoods(&self) -> &[String] {
        self.neighborhoods.as_deref().unwrap_or_default()
    }

    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    pub business_id: String,
    pub user_id: String,
    pub stars: f64,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub name: String,
    pub review_count: i64,
    pub average_stars: f64,
    pub yelping_since: String,
    pub fans: i64,
    #[serde(default)]
    pub friends: Option<Vec<String>>,
}

impl UserRecord {
    pub fn friends(&self) -> &[String] {
        self.friends.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRecord {
    pub business_id: String,
    /// Label ("hour-day") to number of check-ins in that bucket.
    #[serde(default)]
    pub checkin_info: Option<CheckinCounts>,
}

impl CheckinRecord {
    pub fn buckets(&self) -> impl Iterator<Item = (&str, i64)> {
        self.checkin_info
            .iter()
            .flat_map(|counts| counts.0.iter())
            .map(|(label, count)| (label.as_str(), *count))
    }
}

/// `checkin_info` entries in the order they appear in the line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckinCounts(pub Vec<(String, i64)>);

impl<'de> Deserialize<'de> for CheckinCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = CheckinCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of check-in labels to counts")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, count)) = map.next_entry::<String, i64>()? {
                    entries.push((label, count));
                }
                Ok(CheckinCounts(entries))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_collections_are_empty() {
        let absent: BusinessRecord = serde_json::from_str(
            r#"{"business_id":"b1","name":"Cafe","full_address":"1 Main St","city":"Phoenix",
                "state":"AZ","latitude":33.4,"longitude":-112.0,"stars":4.5,"review_count":12,"open":true}"#,
        )
        .unwrap();
        assert!(absent.neighborhoods().is_empty());
        assert!(absent.categories().is_empty());

        let null: UserRecord = serde_json::from_str(
            r#"{"user_id":"u1","name":"Ann","review_count":3,"average_stars":3.7,
                "yelping_since":"2010-04","fans":0,"friends":null}"#,
        )
        .unwrap();
        assert!(null.friends().is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let review: ReviewRecord = serde_json::from_str(
            r#"{"business_id":"b1","user_id":"u1","stars":5,"date":"2012-05-01",
                "text":"great","votes":{"useful":1},"type":"review"}"#,
        )
        .unwrap();
        assert_eq!(review.stars, 5.0);
        assert_eq!(review.date, "2012-05-01");
    }

    #[test]
    fn checkin_without_info_has_no_buckets() {
        let rec: CheckinRecord = serde_json::from_str(r#"{"business_id":"b1"}"#).unwrap();
        assert_eq!(rec.buckets().count(), 0);

        let rec: CheckinRecord =
            serde_json::from_str(r#"{"business_id":"b1","checkin_info":{"9-3":1}}"#).unwrap();
        assert_eq!(rec.buckets().collect::<Vec<_>>(), vec![("9-3", 1)]);
    }

    #[test]
    fn checkin_buckets_keep_line_order() {
        let rec: CheckinRecord = serde_json::from_str(
            r#"{"business_id":"b1","checkin_info":{"9-3":1,"8-0":3,"12-0":2}}"#,
        )
        .unwrap();
        assert_eq!(
            rec.buckets().collect::<Vec<_>>(),
            vec![("9-3", 1), ("8-0", 3), ("12-0", 2)]
        );

        let bad = serde_json::from_str::<CheckinRecord>(
            r#"{"business_id":"b1","checkin_info":{"9-3":"many"}}"#,
        );
        assert!(bad.is_err());
    }
}
