//! Finnhub market data adapter.
//!
//! Wraps the Finnhub HTTP API behind [`QuotePort`]: `/quote` for the
//! live snapshot, `/stock/candle` for the historical closes behind the
//! monthly and yearly change figures, `/news` for the market feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::error::StockfolioError;
use crate::domain::quote::{percentage_change, NewsArticle, Quote};
use crate::ports::quote_port::QuotePort;

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const NEWS_FETCH_LIMIT: usize = 10;

pub struct FinnhubAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Finnhub's compact quote payload.
#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    c: f64,
    d: f64,
    dp: f64,
    h: f64,
    l: f64,
    o: f64,
    pc: f64,
    t: i64,
}

#[derive(Debug, Deserialize)]
struct FinnhubCandle {
    s: String,
    #[serde(default)]
    c: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct FinnhubArticle {
    id: i64,
    headline: String,
    source: String,
    datetime: i64,
    url: String,
    #[serde(default)]
    summary: String,
}

impl FinnhubAdapter {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, StockfolioError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockfolioError::Fetch {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StockfolioError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| StockfolioError::Fetch {
                reason: format!("request to {path} failed: {e}"),
            })?
            .error_for_status()
            .map_err(|e| StockfolioError::Fetch {
                reason: format!("request to {path} failed: {e}"),
            })?;

        response.json::<T>().await.map_err(|e| StockfolioError::Fetch {
            reason: format!("invalid response from {path}: {e}"),
        })
    }

    /// Daily close nearest to `timestamp`, or `None` when the provider
    /// has no data for that window. Missing history degrades the
    /// monthly/yearly change to zero rather than failing the quote.
    async fn historical_close(&self, ticker: &str, timestamp: i64) -> Option<f64> {
        let from = (timestamp - SECONDS_PER_DAY).to_string();
        let to = (timestamp + SECONDS_PER_DAY).to_string();
        let result: Result<FinnhubCandle, _> = self
            .get_json(
                "/stock/candle",
                &[
                    ("symbol", ticker),
                    ("resolution", "D"),
                    ("from", &from),
                    ("to", &to),
                ],
            )
            .await;

        match result {
            Ok(candle) if candle.s == "ok" => candle.c.first().copied(),
            Ok(_) => None,
            Err(e) => {
                debug!("no historical close for {ticker} at {timestamp}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl QuotePort for FinnhubAdapter {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, StockfolioError> {
        let raw: FinnhubQuote = self.get_json("/quote", &[("symbol", ticker)]).await?;

        let now = Utc::now().timestamp();
        let (month_close, year_close) = tokio::join!(
            self.historical_close(ticker, now - 30 * SECONDS_PER_DAY),
            self.historical_close(ticker, now - 365 * SECONDS_PER_DAY),
        );

        Ok(build_quote(raw, month_close, year_close))
    }

    async fn fetch_market_news(&self) -> Result<Vec<NewsArticle>, StockfolioError> {
        let articles: Vec<FinnhubArticle> =
            self.get_json("/news", &[("category", "general")]).await?;

        Ok(articles
            .into_iter()
            .take(NEWS_FETCH_LIMIT)
            .map(build_article)
            .collect())
    }
}

fn build_quote(raw: FinnhubQuote, month_close: Option<f64>, year_close: Option<f64>) -> Quote {
    Quote {
        current_price: raw.c,
        change: raw.d,
        change_percent: raw.dp,
        high: raw.h,
        low: raw.l,
        open: raw.o,
        previous_close: raw.pc,
        timestamp: raw.t,
        monthly_change_percent: percentage_change(raw.c, month_close.unwrap_or(0.0)),
        yearly_change_percent: percentage_change(raw.c, year_close.unwrap_or(0.0)),
    }
}

fn build_article(raw: FinnhubArticle) -> NewsArticle {
    let date = DateTime::<Utc>::from_timestamp(raw.datetime, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();
    NewsArticle {
        id: raw.id,
        title: raw.headline,
        source: raw.source,
        date,
        url: raw.url,
        summary: raw.summary,
    }
}
