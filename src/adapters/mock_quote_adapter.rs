//! Canned market data adapter, used when no API key is configured.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::error::StockfolioError;
use crate::domain::quote::{NewsArticle, Quote};
use crate::ports::quote_port::QuotePort;

pub struct MockQuoteAdapter;

fn canned_quote(
    current: f64,
    change: f64,
    change_percent: f64,
    high: f64,
    low: f64,
    open: f64,
    previous_close: f64,
) -> Quote {
    Quote {
        current_price: current,
        change,
        change_percent,
        high,
        low,
        open,
        previous_close,
        timestamp: 1234567890,
        monthly_change_percent: 0.0,
        yearly_change_percent: 0.0,
    }
}

#[async_trait]
impl QuotePort for MockQuoteAdapter {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, StockfolioError> {
        let quote = match ticker {
            "AAPL" => canned_quote(175.50, 2.5, 1.45, 176.20, 174.30, 174.50, 173.00),
            "GOOGL" => canned_quote(2800.75, -15.25, -0.54, 2815.00, 2795.50, 2800.00, 2816.00),
            "MSFT" => canned_quote(310.25, 5.75, 1.89, 311.00, 308.50, 309.00, 304.50),
            _ => canned_quote(100.00, 0.0, 0.0, 101.00, 99.00, 100.00, 100.00),
        };
        Ok(quote)
    }

    async fn fetch_market_news(&self) -> Result<Vec<NewsArticle>, StockfolioError> {
        let today = Utc::now().to_rfc3339();
        Ok(vec![
            NewsArticle {
                id: 1,
                title: "Tech stocks rally as market optimism grows".to_string(),
                source: "Financial Times".to_string(),
                date: today.clone(),
                url: "https://example.com/news/1".to_string(),
                summary: String::new(),
            },
            NewsArticle {
                id: 2,
                title: "Market analysis: What's driving the current rally?".to_string(),
                source: "Bloomberg".to_string(),
                date: today.clone(),
                url: "https://example.com/news/2".to_string(),
                summary: String::new(),
            },
            NewsArticle {
                id: 3,
                title: "Investment strategies for volatile markets".to_string(),
                source: "Reuters".to_string(),
                date: today,
                url: "https://example.com/news/3".to_string(),
                summary: String::new(),
            },
        ])
    }
}
