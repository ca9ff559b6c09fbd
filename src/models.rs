use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or draws from the balance. The wire
/// format uses the literal strings "Credit" / "Debit".
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TxnKind {
    Credit,
    Debit,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    pub merchant: String,
    pub amount: f64,
    pub category: String,
    #[serde(default = "default_payment_mode")]
    pub payment_mode: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_flagged: Option<i64>,
}

fn default_payment_mode() -> String {
    "Cash".to_string()
}

fn default_source() -> String {
    "manual".to_string()
}

/// Body of `PUT /api/expenses/{id}` — only the editable fields.
#[derive(Clone, PartialEq, Serialize)]
pub struct TransactionPatch {
    pub date: String,
    pub merchant: String,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
}

/// A budget as the backend reports it: the limit plus the spent amount
/// and percentage it computed for the budget's date range.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub percentage: f64,
    pub start_date: String,
    pub end_date: String,
}

/// Body of budget create/update calls. The backend derives spent and
/// percentage itself, so only the cap and range go out.
#[derive(Clone, PartialEq, Serialize)]
pub struct BudgetPayload {
    pub category: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
}

/// Client-side completeness check before a budget save. `None` means
/// the form is incomplete and no request may be issued.
pub fn budget_payload(category: &str, amount: &str, start: &str, end: &str) -> Option<BudgetPayload> {
    let amount = amount.trim().parse::<f64>().ok().filter(|a| *a != 0.0)?;
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some(BudgetPayload {
        category: category.to_string(),
        amount,
        start_date: start.to_string(),
        end_date: end.to_string(),
    })
}

/// Server-extracted fields returned by `POST /api/upload`, shown in the
/// verification modal before the transaction is actually created.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct ScannedReceipt {
    #[serde(default)]
    pub image_url: String,
    pub merchant: String,
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub image_hash: String,
    #[serde(default)]
    pub is_flagged: i64,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub age: String,
    pub occupation: String,
    pub role: String,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// KPI sums over the currently loaded transaction list. Always derived
/// in the render pass, never stored.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut totals = Totals::default();
        for tx in transactions {
            match tx.kind {
                TxnKind::Credit => totals.income += tx.amount,
                TxnKind::Debit => totals.expense += tx.amount,
            }
        }
        totals
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn format_amount(value: f64) -> String {
    format!("₹{:.2}", value)
}

/// Progress-bar tier for a budget's spent percentage.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BudgetLevel {
    Ok,
    Warning,
    Danger,
}

impl BudgetLevel {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > 90.0 {
            BudgetLevel::Danger
        } else if percentage > 75.0 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Ok
        }
    }

    pub fn bar_class(&self) -> &'static str {
        match self {
            BudgetLevel::Ok => "bg-emerald-500",
            BudgetLevel::Warning => "bg-amber-500",
            BudgetLevel::Danger => "bg-rose-500",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TxnKind, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: "2024-01-05".into(),
            merchant: "Shop".into(),
            amount,
            category: "Food".into(),
            payment_mode: "Cash".into(),
            kind,
            source: "manual".into(),
            image_hash: None,
            is_flagged: None,
        }
    }

    #[test]
    fn totals_split_by_kind() {
        let list = vec![tx(TxnKind::Credit, 100.0), tx(TxnKind::Debit, 40.0)];
        let totals = Totals::of(&list);
        assert_eq!(format_amount(totals.income), "₹100.00");
        assert_eq!(format_amount(totals.expense), "₹40.00");
        assert_eq!(format_amount(totals.balance()), "₹60.00");
    }

    #[test]
    fn totals_of_empty_list_are_zero() {
        let totals = Totals::of(&[]);
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(format_amount(totals.balance()), "₹0.00");
    }

    #[test]
    fn budget_level_thresholds() {
        assert_eq!(BudgetLevel::for_percentage(0.0), BudgetLevel::Ok);
        assert_eq!(BudgetLevel::for_percentage(75.0), BudgetLevel::Ok);
        assert_eq!(BudgetLevel::for_percentage(75.1), BudgetLevel::Warning);
        assert_eq!(BudgetLevel::for_percentage(90.0), BudgetLevel::Warning);
        assert_eq!(BudgetLevel::for_percentage(95.0), BudgetLevel::Danger);
    }

    #[test]
    fn budget_save_blocked_without_amount() {
        assert!(budget_payload("Food", "", "2024-01-01", "2024-01-31").is_none());
        assert!(budget_payload("Food", "abc", "2024-01-01", "2024-01-31").is_none());
        assert!(budget_payload("Food", "0", "2024-01-01", "2024-01-31").is_none());
    }

    #[test]
    fn budget_save_blocked_without_dates() {
        assert!(budget_payload("Food", "500", "", "2024-01-31").is_none());
        assert!(budget_payload("Food", "500", "2024-01-01", "").is_none());
    }

    #[test]
    fn budget_save_passes_when_complete() {
        let payload = budget_payload("Travel", "2500.50", "2024-03-01", "2024-03-31").unwrap();
        assert_eq!(payload.category, "Travel");
        assert_eq!(payload.amount, 2500.50);
    }

    #[test]
    fn transaction_wire_type_field() {
        let json = r#"{"id":7,"date":"2024-02-01","merchant":"Cafe","amount":120.5,
                       "category":"Food","payment_mode":"UPI","type":"Debit","source":"manual"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TxnKind::Debit);
        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["type"], "Debit");
    }

    #[test]
    fn transaction_tolerates_extra_backend_columns() {
        let json = r#"{"id":1,"user_id":3,"date":"2024-02-01","merchant":"Cafe","amount":10,
                       "currency":"INR","category":"Food","type":"Credit","notes":"",
                       "flag_reason":null}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.payment_mode, "Cash");
        assert_eq!(tx.source, "manual");
    }
}
