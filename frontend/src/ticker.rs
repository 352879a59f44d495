//! Static quotes for the FinTech section's ticker. Not wired into startup.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: &'static str,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl StockQuote {
    const fn new(symbol: &'static str, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            symbol,
            price,
            change,
            change_percent,
        }
    }

    /// Flat quotes count as positive.
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    pub fn to_markup(&self) -> String {
        let (class, sign) = if self.is_positive() {
            ("positive", "+")
        } else {
            ("negative", "")
        };
        format!(
            "<div class=\"stock-item {}\"><span class=\"stock-symbol\">{}</span><span class=\"stock-price\">${:.2}</span><span class=\"stock-change\">{}{:.2}%</span></div>",
            class, self.symbol, self.price, sign, self.change_percent
        )
    }
}

pub const STOCK_DATA: [StockQuote; 8] = [
    StockQuote::new("META", 589.42, 2.34, 0.40),
    StockQuote::new("NVDA", 875.28, 15.67, 1.82),
    StockQuote::new("MSFT", 421.55, -3.21, -0.76),
    StockQuote::new("GOOGL", 178.92, 1.45, 0.82),
    StockQuote::new("RR", 5.87, 0.12, 2.09),
    StockQuote::new("AAPL", 227.63, 4.28, 1.92),
    StockQuote::new("AMZN", 198.45, -1.23, -0.62),
    StockQuote::new("TSLA", 412.89, 8.56, 2.12),
];

pub fn create_stock_ticker(quotes: &[StockQuote]) -> String {
    quotes.iter().map(StockQuote::to_markup).collect()
}
