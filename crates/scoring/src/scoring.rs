// crates/scoring/src/scoring.rs
use crate::benchmarks::BenchmarkTable;
use crate::normalize::{normalize, normalized_ratio, Polarity};
use common::*;
use serde::Serialize;

// Performance
pub const REVENUE_GROWTH_WEIGHT: f64 = 0.4;
pub const PROFIT_MARGIN_WEIGHT: f64 = 0.3;
pub const RETURN_ON_CAPITAL_WEIGHT: f64 = 0.3;

// Stability
pub const VOLATILITY_WEIGHT: f64 = 0.55;
pub const BETA_WEIGHT: f64 = 0.25;
pub const DIVIDEND_CONSISTENCY_WEIGHT: f64 = 0.20;

// Value
pub const PE_RATIO_WEIGHT: f64 = 0.5;
pub const PB_RATIO_WEIGHT: f64 = 0.3;
pub const DIVIDEND_YIELD_WEIGHT: f64 = 0.2;

// Momentum
pub const THREE_MONTH_RETURN_WEIGHT: f64 = 0.5;
pub const RSI_WEIGHT: f64 = 0.5;

/// One weighted term of a category score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndicator {
    pub name: &'static str,
    pub weight: f64,
    /// Stock/industry ratio, normalized
    pub stock_vs_industry: f64,
    /// Industry/market ratio, normalized
    pub industry_vs_market: f64,
}

impl SubIndicator {
    fn new(name: &'static str, weight: f64, stock_vs_industry: f64, industry_vs_market: f64) -> Self {
        Self {
            name,
            weight,
            stock_vs_industry,
            industry_vs_market,
        }
    }

    pub fn contribution(&self) -> f64 {
        self.weight * self.stock_vs_industry * self.industry_vs_market
    }
}

/// Intermediate ratios behind a category score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub category: Category,
    pub indicators: Vec<SubIndicator>,
}

impl ScoreBreakdown {
    /// Weighted sum in [0, 1]
    pub fn fraction(&self) -> f64 {
        self.indicators.iter().map(SubIndicator::contribution).sum()
    }

    pub fn score(&self) -> CategoryScore {
        CategoryScore::from_fraction(self.fraction())
    }
}

pub fn performance_breakdown(
    raw: &PerformanceRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<ScoreBreakdown> {
    raw.validate()?;
    let ind = &industry.performance;
    let mkt = &market.performance;
    ind.validate()?;
    mkt.validate()?;

    let higher = Polarity::HigherIsBetter;
    let indicators = vec![
        SubIndicator::new(
            "revenue_growth",
            REVENUE_GROWTH_WEIGHT,
            normalized_ratio(raw.revenue_growth, ind.revenue_growth, higher),
            normalized_ratio(ind.revenue_growth, mkt.revenue_growth, higher),
        ),
        SubIndicator::new(
            "profit_margin",
            PROFIT_MARGIN_WEIGHT,
            normalized_ratio(raw.profit_margin, ind.profit_margin, higher),
            normalized_ratio(ind.profit_margin, mkt.profit_margin, higher),
        ),
        SubIndicator::new(
            "return_on_capital",
            RETURN_ON_CAPITAL_WEIGHT,
            normalized_ratio(raw.return_on_capital, ind.return_on_capital, higher),
            normalized_ratio(ind.return_on_capital, mkt.return_on_capital, higher),
        ),
    ];

    Ok(ScoreBreakdown {
        category: Category::Performance,
        indicators,
    })
}

/// Closeness of beta to the market's 1.0, scaled to [0, 1]
pub fn beta_score(beta: f64) -> f64 {
    normalize((100.0 - (1.0 - beta).abs() * 50.0) / 100.0)
}

pub fn stability_breakdown(
    raw: &StabilityRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<ScoreBreakdown> {
    raw.validate()?;
    let ind = &industry.stability;
    let mkt = &market.stability;
    ind.validate()?;
    mkt.validate()?;

    let lower = Polarity::LowerIsBetter;
    let stock_dividend = raw.dividend_consistency.score();
    let industry_dividend = ind.dividend_consistency.score();
    let market_dividend = mkt.dividend_consistency.score();

    let indicators = vec![
        SubIndicator::new(
            "volatility",
            VOLATILITY_WEIGHT,
            normalized_ratio(raw.volatility, ind.volatility, lower),
            normalized_ratio(ind.volatility, mkt.volatility, lower),
        ),
        // No industry comparison on the stock side: distance from 1.0 only.
        SubIndicator::new(
            "beta",
            BETA_WEIGHT,
            beta_score(raw.beta),
            normalized_ratio(ind.beta, mkt.beta, lower),
        ),
        SubIndicator::new(
            "dividend_consistency",
            DIVIDEND_CONSISTENCY_WEIGHT,
            normalized_ratio(stock_dividend, industry_dividend, Polarity::HigherIsBetter),
            normalized_ratio(industry_dividend, market_dividend, Polarity::HigherIsBetter),
        ),
    ];

    Ok(ScoreBreakdown {
        category: Category::Stability,
        indicators,
    })
}

pub fn value_breakdown(
    raw: &ValueRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<ScoreBreakdown> {
    raw.validate()?;
    let ind = &industry.value;
    let mkt = &market.value;
    ind.validate()?;
    mkt.validate()?;

    let lower = Polarity::LowerIsBetter;
    let higher = Polarity::HigherIsBetter;
    let indicators = vec![
        SubIndicator::new(
            "pe_ratio",
            PE_RATIO_WEIGHT,
            normalized_ratio(raw.pe_ratio, ind.pe_ratio, lower),
            normalized_ratio(ind.pe_ratio, mkt.pe_ratio, lower),
        ),
        SubIndicator::new(
            "pb_ratio",
            PB_RATIO_WEIGHT,
            normalized_ratio(raw.pb_ratio, ind.pb_ratio, lower),
            normalized_ratio(ind.pb_ratio, mkt.pb_ratio, lower),
        ),
        // "N/A" counts as a zero yield, so it contributes nothing.
        SubIndicator::new(
            "dividend_yield",
            DIVIDEND_YIELD_WEIGHT,
            normalized_ratio(raw.dividend_yield.as_percent(), ind.dividend_yield.as_percent(), higher),
            normalized_ratio(ind.dividend_yield.as_percent(), mkt.dividend_yield.as_percent(), higher),
        ),
    ];

    Ok(ScoreBreakdown {
        category: Category::Value,
        indicators,
    })
}

/// Closeness of a stock's RSI to its industry's, scaled to [0, 1]
pub fn rsi_score(stock_rsi: f64, industry_rsi: f64) -> f64 {
    normalize((100.0 - (industry_rsi - stock_rsi).abs() * 2.0) / 100.0)
}

pub fn momentum_breakdown(
    raw: &MomentumRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<ScoreBreakdown> {
    raw.validate()?;
    let ind = &industry.momentum;
    let mkt = &market.momentum;
    ind.validate()?;
    mkt.validate()?;

    let higher = Polarity::HigherIsBetter;
    let indicators = vec![
        SubIndicator::new(
            "three_month_return",
            THREE_MONTH_RETURN_WEIGHT,
            normalized_ratio(raw.three_month_return, ind.three_month_return, higher),
            normalized_ratio(ind.three_month_return, mkt.three_month_return, higher),
        ),
        SubIndicator::new(
            "rsi",
            RSI_WEIGHT,
            rsi_score(raw.rsi, ind.rsi),
            normalized_ratio(ind.rsi, mkt.rsi, higher),
        ),
    ];

    Ok(ScoreBreakdown {
        category: Category::Momentum,
        indicators,
    })
}

pub fn score_performance(
    raw: &PerformanceRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<CategoryScore> {
    performance_breakdown(raw, industry, market).map(|b| b.score())
}

pub fn score_stability(
    raw: &StabilityRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<CategoryScore> {
    stability_breakdown(raw, industry, market).map(|b| b.score())
}

pub fn score_value(
    raw: &ValueRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<CategoryScore> {
    value_breakdown(raw, industry, market).map(|b| b.score())
}

pub fn score_momentum(
    raw: &MomentumRaw,
    industry: &IndustryBenchmark,
    market: &MarketBenchmark,
) -> Result<CategoryScore> {
    momentum_breakdown(raw, industry, market).map(|b| b.score())
}

/// Breakdown for one category of a stock, resolving its industry in `table`
pub fn breakdown(category: Category, stock: &StockMetrics, table: &BenchmarkTable) -> Result<ScoreBreakdown> {
    let industry = table.resolve(&stock.industry);
    let market = table.market();

    let result = match category {
        Category::Performance => performance_breakdown(&stock.performance, industry, market),
        Category::Stability => stability_breakdown(&stock.stability, industry, market),
        Category::Value => value_breakdown(&stock.value, industry, market),
        Category::Momentum => momentum_breakdown(&stock.momentum, industry, market),
    };

    result.map_err(|e| match e {
        Error::InvalidData(msg) => Error::InvalidData(format!("{}: {}", stock.symbol, msg)),
        other => other,
    })
}

pub fn score_category(category: Category, stock: &StockMetrics, table: &BenchmarkTable) -> Result<CategoryScore> {
    breakdown(category, stock, table).map(|b| b.score())
}
