//! Market data refresh cycle.
//!
//! One refresh fans out a quote request per held ticker plus one news
//! request, all awaited concurrently. Any single failure aborts the
//! whole cycle: no partial quote map ever reaches the valuation engine.
//! Retry is a user action; there is no built-in backoff.

use std::collections::HashMap;

use futures::future::try_join_all;
use log::debug;

use crate::domain::error::StockfolioError;
use crate::domain::holding::Holding;
use crate::domain::quote::{NewsArticle, Quote};
use crate::ports::quote_port::QuotePort;

/// Number of news articles kept for display.
pub const NEWS_DISPLAY_LIMIT: usize = 5;

/// Session-scoped result of one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub quotes: HashMap<String, Quote>,
    pub news: Vec<NewsArticle>,
}

/// Fetch quotes for every held ticker and the market news feed,
/// concurrently and fail-fast.
pub async fn refresh_market_data(
    holdings: &[Holding],
    port: &dyn QuotePort,
) -> Result<MarketSnapshot, StockfolioError> {
    debug!("refreshing market data for {} holdings", holdings.len());

    let quote_futures = holdings.iter().map(|holding| {
        let ticker = holding.ticker.clone();
        async move {
            let quote = port.fetch_quote(&ticker).await?;
            Ok::<(String, Quote), StockfolioError>((ticker, quote))
        }
    });

    let (fetched, news) =
        tokio::try_join!(try_join_all(quote_futures), port.fetch_market_news())?;

    if news.is_empty() {
        return Err(StockfolioError::Fetch {
            reason: "no market news data available".to_string(),
        });
    }

    let mut quotes = HashMap::new();
    for (ticker, quote) in fetched {
        quotes.insert(ticker, quote);
    }

    let mut news = news;
    news.truncate(NEWS_DISPLAY_LIMIT);

    Ok(MarketSnapshot { quotes, news })
}
