use serde::{Deserialize, Serialize};

/// Identity of the user whose transactions are listed.
pub type UserId = u64;

pub mod transaction {
    use chrono::{DateTime, FixedOffset};

    use super::*;

    /// Identity of a single ledger entry, stable across fetches.
    pub type TransactionId = i64;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: TransactionId,
        /// ISO date or date-time at the boundary, compared by instant.
        #[serde(rename = "date", with = "iso_date")]
        pub occurred_at: DateTime<FixedOffset>,
        /// Merchant or counterpart name.
        #[serde(rename = "name")]
        pub description: String,
        #[serde(deserialize_with = "account_ref::deserialize")]
        pub account_id: String,
        /// Signed amount, sign convention is the service's.
        pub amount: f64,
        #[serde(default)]
        pub label: Option<String>,
    }

    impl Transaction {
        /// Calendar date as written by the service (`YYYY-MM-DD`), in the
        /// timestamp's own offset.
        pub fn date_label(&self) -> String {
            self.occurred_at.format("%Y-%m-%d").to_string()
        }
    }

    /// Request body for the label update endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LabelUpdate {
        pub label: String,
    }

    pub mod iso_date {
        use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        /// Parses the date shapes the service is known to emit.
        ///
        /// RFC 3339 values keep their offset, so the calendar day shown is the
        /// one the service wrote. Values without an offset are read as UTC and
        /// plain dates map to midnight.
        pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
            let raw = raw.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                return Some(dt);
            }
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })?;
            Some(naive.and_utc().fixed_offset())
        }

        pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
        }
    }

    mod account_ref {
        use serde::{Deserialize, Deserializer};

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(match Raw::deserialize(deserializer)? {
                Raw::Text(text) => text,
                Raw::Number(number) => number.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{Transaction, iso_date};

    #[test]
    fn parses_plain_dates_as_midnight() {
        let parsed = iso_date::parse("2024-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn rfc3339_keeps_its_offset() {
        let parsed = iso_date::parse("2024-03-01T01:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T01:30:00+02:00");
        assert_eq!(
            parsed,
            iso_date::parse("2024-02-29T23:30:00Z").unwrap(),
            "same instant"
        );
    }

    #[test]
    fn date_column_uses_the_written_day() {
        let payload = r#"{
            "id": 1,
            "date": "2024-03-01T01:30:00+02:00",
            "name": "Bakery",
            "account_id": "acc",
            "amount": 3.2
        }"#;
        let tx: Transaction = serde_json::from_str(payload).unwrap();
        assert_eq!(tx.date_label(), "2024-03-01");
    }

    #[test]
    fn rejects_garbage() {
        assert!(iso_date::parse("yesterday").is_none());
    }

    #[test]
    fn transaction_reads_service_payload() {
        let payload = r#"{
            "id": 7,
            "date": "2024-01-15T10:00:00.000Z",
            "name": "Corner Shop",
            "account_id": 3,
            "amount": -12.5
        }"#;
        let tx: Transaction = serde_json::from_str(payload).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.description, "Corner Shop");
        assert_eq!(tx.account_id, "3");
        assert_eq!(tx.label, None);
        assert_eq!(tx.date_label(), "2024-01-15");
    }
}
