//! Stock market-data and news service adapter.
//!
//! Quote details and price history come from the Yahoo Finance public
//! endpoints; news comes from NewsAPI (the only operation that needs the
//! credential secret). Peer lookup and the moving-average analysis are kept
//! as pure functions so they can be tested without network access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::UpstreamError;
use crate::domains::tools::ResolvedCredentials;

/// Default Yahoo Finance base URL (quote summary and chart endpoints).
pub const DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com";

/// Default NewsAPI "everything" endpoint.
pub const DEFAULT_NEWS_URL: &str = "https://newsapi.org/v2/everything";

const SMA_SHORT_WINDOW: usize = 20;
const SMA_LONG_WINDOW: usize = 50;

/// Quote details for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct StockDetails {
    pub symbol: String,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// One news article about a symbol.
#[derive(Debug, Clone, Serialize)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
}

/// Sector/industry peers for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarStocks {
    pub symbol: String,
    pub sector: String,
    pub industry: String,
    pub peers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Moving-average trend analysis with a BUY/SELL/HOLD call.
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub current_price: f64,
    #[serde(rename = "SMA20")]
    pub sma20: Option<f64>,
    #[serde(rename = "SMA50")]
    pub sma50: Option<f64>,
    pub recommendation: String,
    pub rationale: String,
}

/// Stock operations consumed by the stock tools.
///
/// One method per domain action. The credential pair carries the NewsAPI
/// key as the secret; market-data operations that need no key ignore it.
#[async_trait]
pub trait StockApi: Send + Sync {
    /// Quote details: price, market cap, PE ratio, sector, industry.
    async fn stock_details(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<StockDetails, UpstreamError>;

    /// Recent news articles for a symbol.
    async fn stock_news(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
        months: u32,
        max_articles: u32,
    ) -> Result<Vec<NewsArticle>, UpstreamError>;

    /// Sector/industry peers for a symbol.
    async fn similar_stocks(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<SimilarStocks, UpstreamError>;

    /// Six-month trend analysis with a recommendation.
    async fn stock_analysis(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<StockAnalysis, UpstreamError>;
}

/// Production stock client.
pub struct StockClient {
    http: reqwest::Client,
    market_data_url: String,
    news_url: String,
}

impl StockClient {
    /// Create a client against the given market-data and news endpoints.
    pub fn new(market_data_url: impl Into<String>, news_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            market_data_url: market_data_url.into(),
            news_url: news_url.into(),
        }
    }

    async fn quote_summary(&self, symbol: &str) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}",
            self.market_data_url, symbol
        );
        debug!(%symbol, "fetching quote summary");

        let response = self
            .http
            .get(&url)
            .query(&[("modules", "price,summaryDetail,summaryProfile")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), body));
        }

        let body: Value = response.json().await?;
        body.pointer("/quoteSummary/result/0")
            .cloned()
            .ok_or_else(|| UpstreamError::new(format!("No quote data available for {symbol}")))
    }

    async fn daily_closes(&self, symbol: &str) -> Result<Vec<f64>, UpstreamError> {
        let url = format!("{}/v8/finance/chart/{}", self.market_data_url, symbol);
        debug!(%symbol, "fetching price history");

        let response = self
            .http
            .get(&url)
            .query(&[("range", "6mo"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), body));
        }

        let body: Value = response.json().await?;
        let closes = body
            .pointer("/chart/result/0/indicators/quote/0/close")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_f64).collect::<Vec<_>>())
            .unwrap_or_default();

        Ok(closes)
    }
}

#[async_trait]
impl StockApi for StockClient {
    async fn stock_details(
        &self,
        _creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<StockDetails, UpstreamError> {
        let symbol = symbol.to_uppercase();
        let summary = self.quote_summary(&symbol).await?;
        Ok(details_from_summary(&symbol, &summary))
    }

    async fn stock_news(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
        months: u32,
        max_articles: u32,
    ) -> Result<Vec<NewsArticle>, UpstreamError> {
        let symbol = symbol.to_uppercase();
        let (from, to) = news_window(Utc::now(), months);
        let page_size = max_articles.to_string();
        debug!(%symbol, %from, %to, "fetching news");

        let response = self
            .http
            .get(&self.news_url)
            .header("X-Api-Key", creds.secret.as_str())
            .query(&[
                ("q", symbol.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), body));
        }

        let body: Value = response.json().await?;
        let articles = body
            .get("articles")
            .and_then(Value::as_array)
            .map(|articles| articles.iter().map(article_from_value).collect())
            .unwrap_or_default();

        Ok(articles)
    }

    async fn similar_stocks(
        &self,
        creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<SimilarStocks, UpstreamError> {
        let details = self.stock_details(creds, symbol).await?;
        let (Some(sector), Some(industry)) = (details.sector, details.industry) else {
            return Err(UpstreamError::new(format!(
                "No sector/industry info available for {}",
                details.symbol
            )));
        };

        let peers = sector_peers(&sector, &industry);
        let note = peers
            .is_empty()
            .then(|| "No predefined peers found for this industry".to_string());

        Ok(SimilarStocks {
            symbol: details.symbol,
            sector,
            industry,
            peers,
            note,
        })
    }

    async fn stock_analysis(
        &self,
        _creds: &ResolvedCredentials,
        symbol: &str,
    ) -> Result<StockAnalysis, UpstreamError> {
        let symbol = symbol.to_uppercase();
        let closes = self.daily_closes(&symbol).await?;
        analyze_closes(&closes)
            .ok_or_else(|| UpstreamError::new(format!("No historical data available for {symbol}")))
    }
}

fn details_from_summary(symbol: &str, summary: &Value) -> StockDetails {
    StockDetails {
        symbol: symbol.to_string(),
        name: plain_str(summary, "price", "longName"),
        current_price: raw_f64(summary, "price", "regularMarketPrice"),
        market_cap: raw_f64(summary, "price", "marketCap"),
        pe_ratio: raw_f64(summary, "summaryDetail", "trailingPE"),
        sector: plain_str(summary, "summaryProfile", "sector"),
        industry: plain_str(summary, "summaryProfile", "industry"),
        website: plain_str(summary, "summaryProfile", "website"),
        description: plain_str(summary, "summaryProfile", "longBusinessSummary"),
    }
}

fn article_from_value(article: &Value) -> NewsArticle {
    let field = |key: &str| {
        article
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    NewsArticle {
        title: field("title"),
        description: field("description"),
        url: field("url"),
        published_at: field("publishedAt"),
    }
}

/// Numeric fields in a quote summary arrive as `{"raw": ..., "fmt": ...}`.
fn raw_f64(summary: &Value, module: &str, field: &str) -> Option<f64> {
    summary.get(module)?.get(field)?.get("raw")?.as_f64()
}

fn plain_str(summary: &Value, module: &str, field: &str) -> Option<String> {
    summary
        .get(module)?
        .get(field)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Inclusive date window for a news search, `months` counted as 30 days.
fn news_window(now: DateTime<Utc>, months: u32) -> (String, String) {
    let from = now - chrono::Duration::days(30 * i64::from(months));
    (
        from.format("%Y-%m-%d").to_string(),
        now.format("%Y-%m-%d").to_string(),
    )
}

/// Curated sector/industry peer suggestions.
fn sector_peers(sector: &str, industry: &str) -> Vec<String> {
    let peers: &[&str] = match (sector, industry) {
        ("Technology", "Consumer Electronics") => &["MSFT", "GOOGL", "AMZN"],
        ("Healthcare", "Biotechnology") => &["MRNA", "BNTX", "REGN"],
        ("Financial Services", "Banks—Diversified") => &["JPM", "BAC", "C"],
        _ => &[],
    };
    peers.iter().map(|p| p.to_string()).collect()
}

/// Trailing simple moving average over the last `window` values.
fn sma(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    Some(values[values.len() - window..].iter().sum::<f64>() / window as f64)
}

/// Classify the latest close against its short and long moving averages.
fn analyze_closes(closes: &[f64]) -> Option<StockAnalysis> {
    let price = *closes.last()?;
    let sma20 = sma(closes, SMA_SHORT_WINDOW);
    let sma50 = sma(closes, SMA_LONG_WINDOW);

    let (recommendation, rationale) = match (sma20, sma50) {
        (Some(short), Some(long)) if price > short && short > long => (
            "BUY",
            "Price is above short and medium-term averages. Uptrend.",
        ),
        (Some(short), Some(long)) if price < short && short < long => (
            "SELL",
            "Price is below short and medium-term averages. Downtrend.",
        ),
        _ => ("HOLD", "No clear trend."),
    };

    Some(StockAnalysis {
        current_price: price,
        sma20,
        sma50,
        recommendation: recommendation.to_string(),
        rationale: rationale.to_string(),
    })
}
