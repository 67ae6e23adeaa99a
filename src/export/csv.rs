//! CSV export of the ledger
//!
//! One row per expense and per savings event, newest first within each kind.

use std::io::Write;

use serde::Serialize;

use crate::error::KakeboResult;
use crate::services::Ledger;

#[derive(Serialize)]
struct LedgerRow<'a> {
    id: String,
    kind: &'static str,
    date: String,
    description: &'a str,
    category: &'static str,
    amount: String,
}

/// Export all expenses and savings to CSV
pub fn export_ledger_csv<W: Write>(ledger: &Ledger, writer: W) -> KakeboResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    for txn in ledger.transactions() {
        out.serialize(LedgerRow {
            id: txn.id.to_string(),
            kind: "expense",
            date: txn.created_at.to_rfc3339(),
            description: &txn.description,
            category: txn.category.label(),
            amount: txn.amount.to_string(),
        })?;
    }

    for entry in ledger.savings() {
        out.serialize(LedgerRow {
            id: entry.id.to_string(),
            kind: "savings",
            date: entry.created_at.to_rfc3339(),
            description: &entry.description,
            category: "",
            amount: entry.amount.to_string(),
        })?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    #[test]
    fn test_csv_rows() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("Rent, flat 2", Money::from_cents(320_000), Category::Survival);
        ledger.add_savings("Gym", Money::from_cents(2_000));

        let mut output = Vec::new();
        export_ledger_csv(&ledger, &mut output).unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "kind", "date", "description", "category", "amount"]
        );

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "expense");
        assert_eq!(&rows[0][3], "Rent, flat 2");
        assert_eq!(&rows[0][4], "SURVIVAL");
        assert_eq!(&rows[0][5], "3200.00");
        assert_eq!(&rows[1][3], "Savings: Gym");
    }

    #[test]
    fn test_empty_ledger_writes_nothing() {
        let mut output = Vec::new();
        export_ledger_csv(&Ledger::new(), &mut output).unwrap();
        assert!(output.is_empty());
    }
}
