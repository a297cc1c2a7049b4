#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use stockfolio::domain::error::StockfolioError;
use stockfolio::domain::holding::Holding;
use stockfolio::domain::quote::{NewsArticle, Quote};
use stockfolio::ports::quote_port::QuotePort;
use stockfolio::ports::storage_port::StoragePort;

pub struct MockStoragePort {
    pub entries: RefCell<HashMap<String, String>>,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl MockStoragePort {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            fail_writes: false,
            fail_reads: false,
        }
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl StoragePort for MockStoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, StockfolioError> {
        if self.fail_reads {
            return Err(StockfolioError::Persistence {
                reason: "storage unavailable".to_string(),
            });
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StockfolioError> {
        if self.fail_writes {
            return Err(StockfolioError::Persistence {
                reason: "storage unavailable".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct MockQuotePort {
    pub quotes: HashMap<String, Quote>,
    pub failing_tickers: HashSet<String>,
    pub news: Vec<NewsArticle>,
    pub requested: Mutex<Vec<String>>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            failing_tickers: HashSet::new(),
            news: vec![make_article(1)],
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_quote(mut self, ticker: &str, price: f64) -> Self {
        self.quotes.insert(ticker.to_string(), make_quote(price));
        self
    }

    pub fn with_failing_ticker(mut self, ticker: &str) -> Self {
        self.failing_tickers.insert(ticker.to_string());
        self
    }
}

#[async_trait]
impl QuotePort for MockQuotePort {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, StockfolioError> {
        self.requested.lock().unwrap().push(ticker.to_string());
        if self.failing_tickers.contains(ticker) {
            return Err(StockfolioError::Fetch {
                reason: format!("failed to fetch quote for {ticker}"),
            });
        }
        self.quotes
            .get(ticker)
            .cloned()
            .ok_or_else(|| StockfolioError::Fetch {
                reason: format!("no quote for {ticker}"),
            })
    }

    async fn fetch_market_news(&self) -> Result<Vec<NewsArticle>, StockfolioError> {
        Ok(self.news.clone())
    }
}

pub fn make_quote(price: f64) -> Quote {
    Quote {
        current_price: price,
        change: 0.0,
        change_percent: 0.0,
        high: price,
        low: price,
        open: price,
        previous_close: price,
        timestamp: 1234567890,
        monthly_change_percent: 0.0,
        yearly_change_percent: 0.0,
    }
}

pub fn make_article(id: i64) -> NewsArticle {
    NewsArticle {
        id,
        title: format!("Article {id}"),
        source: "Wire".to_string(),
        date: "2024-01-01".to_string(),
        url: format!("https://example.com/{id}"),
        summary: String::new(),
    }
}

pub fn make_holding(ticker: &str, quantity: f64, price: f64) -> Holding {
    Holding::new(ticker, quantity, price, "2024-01-01")
}
