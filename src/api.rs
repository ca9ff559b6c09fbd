use gloo_net::http::Request;
use gloo_net::Error;
use web_sys::FormData;

use crate::models::{
    Budget, BudgetPayload, ChatReply, Profile, ScannedReceipt, Transaction, TransactionPatch,
};

pub const API_BASE_URL: &str = "";

fn url(path: &str) -> String {
    format!("{}{}", API_BASE_URL, path)
}

/// `query` is the full filtered path produced by `FilterState::query`.
pub async fn fetch_expenses(query: &str) -> Result<Vec<Transaction>, Error> {
    Request::get(&url(query)).send().await?.json().await
}

pub async fn create_expense(tx: &Transaction) -> Result<(), Error> {
    Request::post(&url("/api/expenses")).json(tx)?.send().await?;
    Ok(())
}

pub async fn update_expense(id: i64, patch: &TransactionPatch) -> Result<(), Error> {
    Request::put(&url(&format!("/api/expenses/{}", id)))
        .json(patch)?
        .send()
        .await?;
    Ok(())
}

pub async fn delete_expense(id: i64) -> Result<(), Error> {
    Request::delete(&url(&format!("/api/expenses/{}", id)))
        .send()
        .await?;
    Ok(())
}

pub async fn upload_receipt(form: FormData) -> Result<ScannedReceipt, Error> {
    Request::post(&url("/api/upload"))
        .body(form)?
        .send()
        .await?
        .json()
        .await
}

pub async fn fetch_budgets() -> Result<Vec<Budget>, Error> {
    Request::get(&url("/api/budgets")).send().await?.json().await
}

pub async fn create_budget(payload: &BudgetPayload) -> Result<(), Error> {
    Request::post(&url("/api/budgets"))
        .json(payload)?
        .send()
        .await?;
    Ok(())
}

pub async fn update_budget(id: i64, payload: &BudgetPayload) -> Result<(), Error> {
    Request::put(&url(&format!("/api/budgets/{}", id)))
        .json(payload)?
        .send()
        .await?;
    Ok(())
}

pub async fn delete_budget(id: i64) -> Result<(), Error> {
    Request::delete(&url(&format!("/api/budgets/{}", id)))
        .send()
        .await?;
    Ok(())
}

/// Returns whether the backend accepted the update; the caller reloads
/// the page on success.
pub async fn update_profile(profile: &Profile) -> Result<bool, Error> {
    let resp = Request::put(&url("/api/profile"))
        .json(profile)?
        .send()
        .await?;
    Ok(resp.ok())
}

pub async fn send_chat(message: &str) -> Result<ChatReply, Error> {
    Request::post(&url("/api/chat"))
        .json(&serde_json::json!({ "message": message }))?
        .send()
        .await?
        .json()
        .await
}
