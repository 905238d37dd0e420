use api_types::transaction::{Transaction, TransactionId};

/// A label update the service refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditFailure {
    pub transaction_id: TransactionId,
    pub message: String,
}

/// Replaces the label of the row with `transaction_id`.
///
/// Only called once the service confirmed the update. Returns `false` when no
/// row matches, in which case nothing changes.
pub fn apply_label(rows: &mut [Transaction], transaction_id: TransactionId, label: &str) -> bool {
    let Some(row) = rows.iter_mut().find(|tx| tx.id == transaction_id) else {
        return false;
    };
    row.label = Some(label.to_string());
    true
}

#[cfg(test)]
mod tests {
    use api_types::transaction::iso_date;

    use super::*;

    fn rows() -> Vec<Transaction> {
        (1..=3)
            .map(|id| Transaction {
                id,
                occurred_at: iso_date::parse(&format!("2024-01-{id:02}")).unwrap(),
                description: format!("shop {id}"),
                account_id: "a1".to_string(),
                amount: -(id as f64),
                label: None,
            })
            .collect()
    }

    #[test]
    fn updates_only_the_matching_row() {
        let mut rows = rows();
        assert!(apply_label(&mut rows, 2, "coffee"));
        assert_eq!(rows[1].label.as_deref(), Some("coffee"));
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[2].label, None);
        assert_eq!(rows.iter().map(|tx| tx.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut rows = rows();
        let before = rows.clone();
        assert!(!apply_label(&mut rows, 42, "rent"));
        assert_eq!(rows, before);
    }

    #[test]
    fn empty_label_is_kept_as_text() {
        let mut rows = rows();
        apply_label(&mut rows, 1, "");
        assert_eq!(rows[0].label.as_deref(), Some(""));
    }
}
