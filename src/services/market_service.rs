use serde_json::json;

use crate::{
    format::{change_class, format_compact, format_currency, format_percent},
    models::{CryptoSnapshot, NewsItem},
};

/// Build the context used by the `partials/market_table` template.
///
/// - ranked snapshots first, by rank; unranked keep their incoming order
/// - prices in `currency`, volume and market cap abbreviated
pub fn market_table_ctx(mut snapshots: Vec<CryptoSnapshot>, currency: &str) -> serde_json::Value {
    if snapshots.is_empty() {
        return json!({ "rows": serde_json::Value::Null });
    }

    // stable sort keeps producer order among equal keys
    snapshots.sort_by_key(|s| s.rank.unwrap_or(u32::MAX));

    let rows: Vec<_> = snapshots
        .iter()
        .map(|s| {
            json!({
                "rank": s.rank,
                "symbol": s.symbol,
                "name": s.name,
                "sector": s.sector,
                "price": format_currency(s.price, currency),
                "change": format_currency(s.change, currency),
                "change_percent": format_percent(s.change_percent),
                "change_class": change_class(s.change_percent),
                "high": format_currency(s.high, currency),
                "low": format_currency(s.low, currency),
                "volume": format_compact(s.volume),
                "market_cap": format_compact(s.market_cap),
                "dominance": s.dominance.map(|d| format!("{:.2}%", d)),
            })
        })
        .collect();

    json!({ "rows": rows })
}

/// Build the context used by the `partials/news_list` template.
pub fn news_list_ctx(items: Vec<NewsItem>) -> serde_json::Value {
    if items.is_empty() {
        return json!({ "items": serde_json::Value::Null });
    }

    let items: Vec<_> = items
        .into_iter()
        .map(|n| {
            json!({
                "id": n.id,
                "title": n.title,
                "summary": n.summary,
                "source": n.source,
                "published_at": n.published_at,
                "url": n.url,
                "sentiment": n.sentiment.as_str(),
                "sentiment_class": n.sentiment.css_class(),
                "symbols": n.related_symbols.into_iter().collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({ "items": items })
}
