//! Ledger filtering and aggregation engine
//!
//! Pure functions from (records, criteria) to a sorted, capped view plus
//! running totals. Nothing here touches the backend.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use loomledger_backend::{Transaction, TxnType};

/// Type filter for the ledger view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// No type restriction
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(&self, txn_type: TxnType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => txn_type == TxnType::Income,
            TypeFilter::Expense => txn_type == TxnType::Expense,
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            _ => Err(format!("Invalid type filter: {}", s)),
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Income => write!(f, "income"),
            TypeFilter::Expense => write!(f, "expense"),
        }
    }
}

/// Display cap on the number of returned rows
///
/// The cap applies after sorting, so `Last(10)` means the 10 most recent
/// rows. It never affects totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLimit {
    /// Keep every filtered row
    #[default]
    All,
    /// Keep the N most recent rows
    Last(usize),
}

impl std::str::FromStr for DisplayLimit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(DisplayLimit::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(DisplayLimit::Last(n)),
            _ => Err(format!("Invalid display limit: {}", s)),
        }
    }
}

impl std::fmt::Display for DisplayLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayLimit::All => write!(f, "all"),
            DisplayLimit::Last(n) => write!(f, "{}", n),
        }
    }
}

/// Filter criteria for the ledger view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
    pub type_filter: TypeFilter,
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring match against the description
    pub keyword: Option<String>,
    pub limit: DisplayLimit,
}

/// Aggregate totals over the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Filtered, sorted, capped rows plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerView {
    pub rows: Vec<Transaction>,
    pub totals: Totals,
}

fn passes(txn: &Transaction, criteria: &FilterCriteria) -> bool {
    // Date bounds. A record with an unparseable date is kept; the bounds
    // cannot be applied to it.
    if criteria.start_date.is_some() || criteria.end_date.is_some() {
        if let Some(date) = txn.date_naive() {
            if let Some(start) = criteria.start_date {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = criteria.end_date {
                if date > end {
                    return false;
                }
            }
        }
    }
    if !criteria.type_filter.matches(txn.txn_type) {
        return false;
    }
    if let Some(category) = &criteria.category {
        if &txn.category != category {
            return false;
        }
    }
    if let Some(keyword) = &criteria.keyword {
        if !keyword.is_empty() {
            let needle = keyword.to_lowercase();
            let haystack = txn
                .description
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
    }
    true
}

/// Sum income and expense over a filtered set
///
/// A malformed amount contributes zero rather than aborting the summation.
pub fn totals(rows: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for txn in rows {
        let amount = txn.amount_value().unwrap_or(Decimal::ZERO);
        match txn.txn_type {
            TxnType::Income => income += amount,
            TxnType::Expense => expense += amount,
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Apply filter criteria to a raw record collection
///
/// Predicates are conjunctive and applied in a fixed order: date bounds, type,
/// category, keyword. Survivors are sorted by date descending with a stable
/// tie-break (insertion order), then capped to the display limit. Totals are
/// computed on the post-filter, pre-cap set, so capping to the 10 most
/// recent rows does not change them.
pub fn filter(records: &[Transaction], criteria: &FilterCriteria) -> LedgerView {
    let mut rows: Vec<Transaction> = records
        .iter()
        .filter(|txn| passes(txn, criteria))
        .cloned()
        .collect();

    // Stable sort: ties keep insertion order. Unparseable dates sort last.
    rows.sort_by(|a, b| match (a.date_naive(), b.date_naive()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let totals = totals(&rows);

    if let DisplayLimit::Last(n) = criteria.limit {
        rows.truncate(n);
    }

    LedgerView { rows, totals }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, date: &str, txn_type: TxnType, amount: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            txn_type,
            amount: amount.to_string(),
            category: "general".to_string(),
            sub_category: None,
            description: None,
            attachments: vec![],
            location: "office".to_string(),
        }
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_range_subset_and_totals() {
        let records = vec![
            txn("t1", "2024-01-05", TxnType::Income, "1000"),
            txn("t2", "2024-02-10", TxnType::Expense, "400"),
            txn("t3", "2024-03-15", TxnType::Income, "300"),
        ];
        let criteria = FilterCriteria {
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-02-28")),
            ..Default::default()
        };
        let view = filter(&records, &criteria);

        assert_eq!(view.rows.len(), 2);
        assert!(view.rows.iter().all(|t| {
            let d = t.date_naive().unwrap();
            d >= date("2024-01-01") && d <= date("2024-02-28")
        }));
        assert_eq!(view.totals.income, dec(1000));
        assert_eq!(view.totals.expense, dec(400));
        assert_eq!(view.totals.balance, dec(600));
    }

    #[test]
    fn test_filter_idempotent() {
        let records = vec![
            txn("t1", "2024-01-05", TxnType::Income, "1000"),
            txn("t2", "2024-01-10", TxnType::Expense, "400"),
            txn("t3", "2024-01-12", TxnType::Income, "50"),
        ];
        let criteria = FilterCriteria {
            type_filter: TypeFilter::Income,
            limit: DisplayLimit::Last(5),
            ..Default::default()
        };
        let once = filter(&records, &criteria);
        let twice = filter(&once.rows, &criteria);

        let ids = |view: &LedgerView| view.rows.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(once.totals, twice.totals);
    }

    #[test]
    fn test_truncation_happens_after_sort() {
        // 15 records inserted oldest-last; limit 10 must keep the 10 largest
        // dates, not the first 10 inserted.
        let records: Vec<Transaction> = (1..=15)
            .map(|day| {
                txn(
                    &format!("t{}", day),
                    &format!("2024-01-{:02}", day),
                    TxnType::Income,
                    "10",
                )
            })
            .collect();
        let criteria = FilterCriteria {
            limit: DisplayLimit::Last(10),
            ..Default::default()
        };
        let view = filter(&records, &criteria);

        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows.first().unwrap().date, "2024-01-15");
        assert_eq!(view.rows.last().unwrap().date, "2024-01-06");
    }

    #[test]
    fn test_sort_descending_with_stable_ties() {
        let records = vec![
            txn("first", "2024-01-10", TxnType::Income, "1"),
            txn("older", "2024-01-05", TxnType::Income, "1"),
            txn("second", "2024-01-10", TxnType::Income, "1"),
        ];
        let view = filter(&records, &FilterCriteria::default());
        let ids: Vec<&str> = view.rows.iter().map(|t| t.id.as_str()).collect();
        // Equal dates keep insertion order.
        assert_eq!(ids, vec!["first", "second", "older"]);
    }

    #[test]
    fn test_totals_independent_of_display_cap() {
        let records: Vec<Transaction> = (1..=50)
            .map(|day| {
                txn(
                    &format!("t{}", day),
                    &format!("2024-03-{:02}", (day % 28) + 1),
                    TxnType::Income,
                    "20",
                )
            })
            .collect();
        let capped = filter(
            &records,
            &FilterCriteria {
                type_filter: TypeFilter::Income,
                limit: DisplayLimit::Last(10),
                ..Default::default()
            },
        );
        let uncapped = filter(
            &records,
            &FilterCriteria {
                type_filter: TypeFilter::Income,
                limit: DisplayLimit::All,
                ..Default::default()
            },
        );

        assert_eq!(capped.rows.len(), 10);
        assert_eq!(capped.totals, uncapped.totals);
        assert_eq!(capped.totals.income, dec(1000));
    }

    #[test]
    fn test_concrete_two_record_scenario() {
        let records = vec![
            txn("t1", "2024-01-05", TxnType::Income, "1000"),
            txn("t2", "2024-01-10", TxnType::Expense, "400"),
        ];
        let view = filter(&records, &FilterCriteria::default());

        assert_eq!(view.rows[0].date, "2024-01-10");
        assert_eq!(view.rows[0].txn_type, TxnType::Expense);
        assert_eq!(view.rows[1].date, "2024-01-05");
        assert_eq!(view.totals.income, dec(1000));
        assert_eq!(view.totals.expense, dec(400));
        assert_eq!(view.totals.balance, dec(600));
    }

    #[test]
    fn test_malformed_amount_contributes_zero() {
        let records = vec![
            txn("t1", "2024-01-05", TxnType::Income, "1000"),
            txn("t2", "2024-01-06", TxnType::Income, "not-a-number"),
            txn("t3", "2024-01-07", TxnType::Expense, "400"),
        ];
        let view = filter(&records, &FilterCriteria::default());

        // The malformed row is still listed; it just sums as zero.
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.totals.income, dec(1000));
        assert_eq!(view.totals.expense, dec(400));
    }

    #[test]
    fn test_category_and_keyword_filters() {
        let mut weaving = txn("t1", "2024-01-05", TxnType::Expense, "100");
        weaving.category = "yarn".to_string();
        weaving.description = Some("Silk Yarn restock".to_string());
        let mut wages = txn("t2", "2024-01-06", TxnType::Expense, "200");
        wages.category = "wages".to_string();
        wages.description = Some("weekly wages".to_string());
        let records = vec![weaving, wages];

        let by_category = filter(
            &records,
            &FilterCriteria {
                category: Some("yarn".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_category.rows.len(), 1);
        assert_eq!(by_category.rows[0].id, "t1");

        // Keyword match is a case-insensitive substring on the description.
        let by_keyword = filter(
            &records,
            &FilterCriteria {
                keyword: Some("silk yarn".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_keyword.rows.len(), 1);
        assert_eq!(by_keyword.rows[0].id, "t1");
    }

    #[test]
    fn test_unparseable_date_kept_and_sorted_last() {
        let records = vec![
            txn("bad", "not-a-date", TxnType::Income, "5"),
            txn("good", "2024-01-05", TxnType::Income, "10"),
        ];
        let view = filter(
            &records,
            &FilterCriteria {
                start_date: Some(date("2024-01-01")),
                ..Default::default()
            },
        );
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows.last().unwrap().id, "bad");
    }

    #[test]
    fn test_display_limit_parsing() {
        assert_eq!("all".parse::<DisplayLimit>().unwrap(), DisplayLimit::All);
        assert_eq!("10".parse::<DisplayLimit>().unwrap(), DisplayLimit::Last(10));
        assert!("0".parse::<DisplayLimit>().is_err());
        assert!("ten".parse::<DisplayLimit>().is_err());
    }
}
