// crates/common/src/lib.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;

pub use error::{ensure_finite, Error, Result};

/// Scoring axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Stability,
    Value,
    Momentum,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Stability,
        Category::Value,
        Category::Momentum,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Performance => "Performance",
            Category::Stability => "Stability",
            Category::Value => "Value",
            Category::Momentum => "Momentum",
        };
        f.write_str(name)
    }
}

/// How reliably a company has paid dividends over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DividendConsistency {
    High,
    Good,
    Medium,
    Low,
    Poor,
    NotApplicable,
}

impl DividendConsistency {
    /// Fixed 0-100 mapping used by both the scorer and the rating rules
    pub fn score(&self) -> f64 {
        match self {
            DividendConsistency::High => 100.0,
            DividendConsistency::Good => 75.0,
            DividendConsistency::Medium => 50.0,
            DividendConsistency::Low | DividendConsistency::Poor => 25.0,
            DividendConsistency::NotApplicable => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DividendConsistency::High => "High",
            DividendConsistency::Good => "Good",
            DividendConsistency::Medium => "Medium",
            DividendConsistency::Low => "Low",
            DividendConsistency::Poor => "Poor",
            DividendConsistency::NotApplicable => "N/A",
        }
    }
}

impl From<&str> for DividendConsistency {
    fn from(label: &str) -> Self {
        match label {
            "High" => DividendConsistency::High,
            "Good" => DividendConsistency::Good,
            "Medium" => DividendConsistency::Medium,
            "Low" => DividendConsistency::Low,
            "Poor" => DividendConsistency::Poor,
            _ => DividendConsistency::NotApplicable,
        }
    }
}

impl From<String> for DividendConsistency {
    fn from(label: String) -> Self {
        DividendConsistency::from(label.as_str())
    }
}

impl From<DividendConsistency> for String {
    fn from(consistency: DividendConsistency) -> Self {
        consistency.as_str().to_string()
    }
}

impl fmt::Display for DividendConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dividend yield in percent, or "N/A" for companies that pay none
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DividendYieldRepr", into = "DividendYieldRepr")]
pub enum DividendYield {
    Percent(f64),
    NotAvailable,
}

impl DividendYield {
    /// Numeric yield, with "N/A" counted as zero
    pub fn as_percent(&self) -> f64 {
        match self {
            DividendYield::Percent(pct) => *pct,
            DividendYield::NotAvailable => 0.0,
        }
    }
}

impl fmt::Display for DividendYield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DividendYield::Percent(pct) => write!(f, "{}%", pct),
            DividendYield::NotAvailable => f.write_str("N/A"),
        }
    }
}

// Data files carry either a bare number or a string such as "1.4%" or "N/A".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DividendYieldRepr {
    Number(f64),
    Text(String),
}

impl From<DividendYieldRepr> for DividendYield {
    fn from(repr: DividendYieldRepr) -> Self {
        match repr {
            DividendYieldRepr::Number(pct) => DividendYield::Percent(pct),
            DividendYieldRepr::Text(text) => text
                .trim()
                .trim_end_matches('%')
                .parse::<f64>()
                .map(DividendYield::Percent)
                .unwrap_or(DividendYield::NotAvailable),
        }
    }
}

impl From<DividendYield> for DividendYieldRepr {
    fn from(dividend_yield: DividendYield) -> Self {
        match dividend_yield {
            DividendYield::Percent(pct) => DividendYieldRepr::Number(pct),
            DividendYield::NotAvailable => DividendYieldRepr::Text("N/A".to_string()),
        }
    }
}

/// Growth and profitability fundamentals, all in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRaw {
    pub revenue_growth: f64,
    pub profit_margin: f64,
    pub return_on_capital: f64,
}

impl PerformanceRaw {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("revenue_growth", self.revenue_growth)?;
        ensure_finite("profit_margin", self.profit_margin)?;
        ensure_finite("return_on_capital", self.return_on_capital)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityRaw {
    pub volatility: f64,
    pub beta: f64,
    pub dividend_consistency: DividendConsistency,
}

impl StabilityRaw {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("volatility", self.volatility)?;
        ensure_finite("beta", self.beta)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRaw {
    pub pe_ratio: f64,
    pub pb_ratio: f64,
    pub dividend_yield: DividendYield,
}

impl ValueRaw {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("pe_ratio", self.pe_ratio)?;
        ensure_finite("pb_ratio", self.pb_ratio)?;
        ensure_finite("dividend_yield", self.dividend_yield.as_percent())?;
        Ok(())
    }
}

/// Price momentum; returns are signed percentages, RSI is 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumRaw {
    pub three_month_return: f64,
    pub relative_performance: f64,
    pub rsi: f64,
}

impl MomentumRaw {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("three_month_return", self.three_month_return)?;
        ensure_finite("relative_performance", self.relative_performance)?;
        ensure_finite("rsi", self.rsi)?;
        Ok(())
    }
}

/// Averaged fundamentals for an industry or for the whole market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub performance: PerformanceRaw,
    pub stability: StabilityRaw,
    pub value: ValueRaw,
    pub momentum: MomentumRaw,
}

impl Benchmark {
    pub fn validate(&self) -> Result<()> {
        self.performance.validate()?;
        self.stability.validate()?;
        self.value.validate()?;
        self.momentum.validate()
    }
}

pub type IndustryBenchmark = Benchmark;
pub type MarketBenchmark = Benchmark;

/// A single stock and its raw fundamentals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMetrics {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub industry: String,
    pub performance: PerformanceRaw,
    pub stability: StabilityRaw,
    pub value: ValueRaw,
    pub momentum: MomentumRaw,
}

/// Integer score in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryScore(u8);

impl CategoryScore {
    pub const ZERO: CategoryScore = CategoryScore(0);
    pub const MAX: CategoryScore = CategoryScore(100);

    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Convert a weighted fraction in [0, 1] to a 0-100 score.
    /// Callers must reject non-finite fractions beforehand.
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_percent(fraction * 100.0)
    }

    pub fn from_percent(percent: f64) -> Self {
        debug_assert!(percent.is_finite(), "non-finite score percent {}", percent);
        Self(percent.clamp(0.0, 100.0).round() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CategoryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position in a portfolio, weighted by its monetary value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub stock: StockMetrics,
    pub value: f64,
}

/// Qualitative bucket produced by the rating rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingLabel {
    High,
    Fair,
    Low,
    Unstable,
    Undervalued,
    Overvalued,
    Strong,
    Weak,
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatingLabel::High => "High",
            RatingLabel::Fair => "Fair",
            RatingLabel::Low => "Low",
            RatingLabel::Unstable => "Unstable",
            RatingLabel::Undervalued => "Undervalued",
            RatingLabel::Overvalued => "Overvalued",
            RatingLabel::Strong => "Strong",
            RatingLabel::Weak => "Weak",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingColor {
    Green,
    Yellow,
    Red,
}

/// Rating for one category of one stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub category: Category,
    pub label: RatingLabel,
    pub color: RatingColor,
    pub explanation: String,
}
