//! Result list → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): numbered list with score, date and engagement
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the result list

use tweetrank_core::ResultItem;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format the results of one search.
pub fn format_results(search_id: &str, results: &[ResultItem], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "searchId": search_id,
            "results": results,
        }))
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => format_human(search_id, results),
    }
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{:#}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

fn format_human(search_id: &str, results: &[ResultItem]) -> String {
    if results.is_empty() {
        return format!("(empty list) search id {}", search_id);
    }

    let mut out = String::new();
    for (i, item) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}) [{:.4}] {}  {}\n",
            i + 1,
            item.ranking,
            item.id,
            single_line(&item.content)
        ));
        out.push_str(&format!(
            "     {} | {} likes, {} retweets | {}\n",
            item.date, item.likes, item.retweets, item.language
        ));
        if let Some(user) = &item.user_name {
            out.push_str(&format!("     by {}\n", user));
        }
    }
    out.push_str(&format!("search id {}", search_id));
    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
