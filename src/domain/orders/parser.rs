//! Order log parsing.
//!
//! Turns raw comma-separated lines into [`OrderRecord`]s. Malformed content never
//! aborts a run: bad lines are reported through `tracing` and dropped.

use crate::domain::errors::RecordError;
use crate::domain::orders::types::{OrderRecord, OrderType, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use tracing::debug;

/// Result of parsing a whole order log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub records: Vec<OrderRecord>,
    /// Non-blank lines that were rejected
    pub skipped: usize,
}

/// Parses one `time,company,orderType,quantity` line.
///
/// Fields are trimmed; anything after the fourth field is ignored.
pub fn parse_line(line: &str) -> Result<OrderRecord, RecordError> {
    let mut fields = line.split(',').map(str::trim);

    let time = required(fields.next(), "time")?;
    let company = required(fields.next(), "company")?;
    let order_type = required(fields.next(), "orderType")?;
    let quantity = required(fields.next(), "quantity")?;

    let time = NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT).map_err(|_| {
        RecordError::InvalidTimestamp {
            value: time.to_string(),
        }
    })?;

    // u64::from_str accepts a leading '+', which is not a base-10 integer as logged
    if !quantity.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::InvalidQuantity {
            value: quantity.to_string(),
        });
    }
    let quantity = quantity
        .parse::<u64>()
        .map_err(|_| RecordError::InvalidQuantity {
            value: quantity.to_string(),
        })?;

    Ok(OrderRecord::new(
        time,
        company,
        OrderType::from_tag(order_type),
        quantity,
    ))
}

fn required<'a>(field: Option<&'a str>, name: &'static str) -> Result<&'a str, RecordError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::MissingField { field: name }),
    }
}

/// Parses every line of `raw`, keeping valid records in input order.
pub fn parse_all(raw: &str) -> Vec<OrderRecord> {
    parse_all_with_summary(raw).records
}

/// Like [`parse_all`], but also counts the rejected lines.
pub fn parse_all_with_summary(raw: &str) -> ParseSummary {
    let mut summary = ParseSummary::default();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(record) => summary.records.push(record),
            Err(e) => {
                debug!(line = index + 1, reason = %e, "Invalid line, skipping: {}", line);
                summary.skipped += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_valid_line() {
        let record = parse_line("2015-05-21 16:58:23,Ape accountants,F,10000").unwrap();

        let expected_time = NaiveDate::from_ymd_opt(2015, 5, 21)
            .unwrap()
            .and_hms_opt(16, 58, 23)
            .unwrap();
        assert_eq!(record.time, expected_time);
        assert_eq!(record.company, "Ape accountants");
        assert_eq!(record.order_type, OrderType::Cancel);
        assert_eq!(record.quantity, 10000);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = parse_line("  2015-05-21 16:58:23 ,  Bank of History , D ,  100 ").unwrap();
        assert_eq!(record.company, "Bank of History");
        assert_eq!(record.order_type, OrderType::NewOrder);
        assert_eq!(record.quantity, 100);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = parse_line("2015-05-21 16:58:23,Acme,D,5,extra,columns").unwrap();
        assert_eq!(record.quantity, 5);
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert_eq!(
            parse_line("2015-05-21 16:58:23,Acme,D"),
            Err(RecordError::MissingField { field: "quantity" })
        );
        assert_eq!(
            parse_line("2015-05-21 16:58:23,,D,5"),
            Err(RecordError::MissingField { field: "company" })
        );
        assert_eq!(
            parse_line(""),
            Err(RecordError::MissingField { field: "time" })
        );
    }

    #[test]
    fn test_unknown_order_type_passes_validation() {
        let record = parse_line("2015-05-21 16:58:23,Acme,Z,5").unwrap();
        assert_eq!(record.order_type, OrderType::Other("Z".to_string()));
    }

    #[test]
    fn test_bad_quantity_rejected() {
        assert!(matches!(
            parse_line("2015-05-21 16:58:23,Acme,D,ten"),
            Err(RecordError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_line("2015-05-21 16:58:23,Acme,D,-5"),
            Err(RecordError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_line("2015-05-21 16:58:23,Acme,D,+5"),
            Err(RecordError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        assert!(matches!(
            parse_line("21/05/2015 16:58,Acme,D,5"),
            Err(RecordError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_parse_all_preserves_order_and_drops_invalid() {
        let raw = "2015-05-21 16:58:23,B,D,1\n\
                   garbage\n\
                   2015-05-21 16:58:24,A,F,2\r\n\
                   \n\
                   2015-05-21 16:58:25,B,F,3\n";

        let summary = parse_all_with_summary(raw);
        let companies: Vec<&str> = summary
            .records
            .iter()
            .map(|r| r.company.as_str())
            .collect();

        assert_eq!(companies, vec!["B", "A", "B"]);
        assert_eq!(summary.records[1].quantity, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(parse_all(raw).len(), 3);
    }
}
