//! Market data access port trait.

use crate::domain::error::StockfolioError;
use crate::domain::quote::{NewsArticle, Quote};
use async_trait::async_trait;

#[async_trait]
pub trait QuotePort: Send + Sync {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, StockfolioError>;
    async fn fetch_market_news(&self) -> Result<Vec<NewsArticle>, StockfolioError>;
}
