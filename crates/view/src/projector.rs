use api_types::transaction::Transaction;

/// Shown when the service resolved the user to zero transactions.
pub const EMPTY_MESSAGE: &str = "No transactions found.";

/// Outcome of looking at the source's entry for the current user.
#[derive(Debug, PartialEq)]
pub enum Projection {
    /// Nothing delivered yet.
    Pending,
    /// Delivered, but the user has no transactions.
    Empty,
    /// Newest first.
    Sorted(Vec<Transaction>),
}

/// Derives the presentation rows from the raw collection.
///
/// `None` and an empty slice are different states: the first means the fetch
/// has not resolved, the second is a terminal "no data" answer.
pub fn project(candidate: Option<&[Transaction]>) -> Projection {
    match candidate {
        None => Projection::Pending,
        Some([]) => Projection::Empty,
        Some(raw) => Projection::Sorted(sort_newest_first(raw)),
    }
}

/// Stable sort of a copy by `occurred_at` descending; ties keep input order.
pub fn sort_newest_first(raw: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = raw.to_vec();
    sorted.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    sorted
}

#[cfg(test)]
mod tests {
    use api_types::transaction::iso_date;

    use super::*;

    fn tx(id: i64, date: &str) -> Transaction {
        Transaction {
            id,
            occurred_at: iso_date::parse(date).unwrap(),
            description: format!("tx {id}"),
            account_id: "acc".to_string(),
            amount: 1.0,
            label: None,
        }
    }

    fn ids(projection: &Projection) -> Vec<i64> {
        match projection {
            Projection::Sorted(rows) => rows.iter().map(|tx| tx.id).collect(),
            other => panic!("expected sorted rows, got {other:?}"),
        }
    }

    #[test]
    fn absent_is_pending() {
        assert_eq!(project(None), Projection::Pending);
    }

    #[test]
    fn empty_is_terminal() {
        assert_eq!(project(Some(&[])), Projection::Empty);
    }

    #[test]
    fn newest_first() {
        let raw = vec![
            tx(1, "2024-01-01"),
            tx(2, "2024-03-01"),
            tx(3, "2024-02-01"),
        ];
        assert_eq!(ids(&project(Some(&raw))), vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let raw = vec![
            tx(10, "2024-02-01"),
            tx(11, "2024-05-01"),
            tx(12, "2024-02-01"),
            tx(13, "2024-02-01T00:00:00Z"),
        ];
        assert_eq!(ids(&project(Some(&raw))), vec![11, 10, 12, 13]);
    }

    #[test]
    fn time_of_day_matters() {
        let raw = vec![tx(1, "2024-02-01T08:00:00"), tx(2, "2024-02-01T18:30:00")];
        assert_eq!(ids(&project(Some(&raw))), vec![2, 1]);
    }

    #[test]
    fn offsets_compare_by_instant() {
        // 01:30 at +02:00 is earlier than 00:30 UTC on the same day
        let raw = vec![
            tx(1, "2024-03-01T01:30:00+02:00"),
            tx(2, "2024-03-01T00:30:00Z"),
            tx(3, "2024-02-29T23:45:00-01:00"),
        ];
        assert_eq!(ids(&project(Some(&raw))), vec![3, 2, 1]);
    }

    #[test]
    fn input_is_not_reordered() {
        let raw = vec![tx(1, "2024-01-01"), tx(2, "2024-03-01")];
        let _ = project(Some(&raw));
        assert_eq!(raw[0].id, 1);
    }
}
