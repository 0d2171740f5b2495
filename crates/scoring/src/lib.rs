// crates/scoring/src/lib.rs
use common::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod benchmarks;
pub mod leaderboard;
pub mod normalize;
pub mod portfolio;
pub mod rating;
pub mod scoring;

pub use benchmarks::{market_benchmark, resolve_industry, BenchmarkTable, DEFAULT_INDUSTRY};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use normalize::normalize;
pub use portfolio::{aggregate_portfolio, portfolio_scorecard, PortfolioScorecard};
pub use rating::classify_rating;
pub use scoring::{
    breakdown, score_category, score_momentum, score_performance, score_stability, score_value,
    ScoreBreakdown, SubIndicator,
};

/// All category scores and ratings for one stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockScorecard {
    pub symbol: String,
    pub name: String,
    pub industry: String,
    pub performance: CategoryScore,
    pub stability: CategoryScore,
    pub value: CategoryScore,
    pub momentum: CategoryScore,
    /// Rounded mean of the four category scores
    pub overall: CategoryScore,
    pub ratings: Vec<Rating>,
}

impl StockScorecard {
    pub fn compute(stock: &StockMetrics, table: &BenchmarkTable) -> Result<Self> {
        let performance = score_category(Category::Performance, stock, table)?;
        let stability = score_category(Category::Stability, stock, table)?;
        let value = score_category(Category::Value, stock, table)?;
        let momentum = score_category(Category::Momentum, stock, table)?;

        let total: u32 = [performance, stability, value, momentum]
            .iter()
            .map(|s| s.value() as u32)
            .sum();
        let overall = CategoryScore::from_percent(total as f64 / Category::ALL.len() as f64);

        let industry = table.resolve(&stock.industry);
        let ratings = Category::ALL
            .iter()
            .map(|category| classify_rating(*category, stock, industry))
            .collect();

        Ok(Self {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            industry: stock.industry.clone(),
            performance,
            stability,
            value,
            momentum,
            overall,
            ratings,
        })
    }

    pub fn score(&self, category: Category) -> CategoryScore {
        match category {
            Category::Performance => self.performance,
            Category::Stability => self.stability,
            Category::Value => self.value,
            Category::Momentum => self.momentum,
        }
    }

    pub fn rating(&self, category: Category) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.category == category)
    }
}

/// Read a JSON array of stocks
pub fn load_stocks(path: impl AsRef<Path>) -> Result<Vec<StockMetrics>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let stocks: Vec<StockMetrics> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} stocks from {}", stocks.len(), path.display());
    Ok(stocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stryker() -> StockMetrics {
        StockMetrics {
            symbol: "SYK".to_string(),
            name: "Stryker".to_string(),
            industry: "Healthcare".to_string(),
            performance: PerformanceRaw {
                revenue_growth: 12.0,
                profit_margin: 22.0,
                return_on_capital: 14.8,
            },
            stability: StabilityRaw {
                volatility: 0.95,
                beta: 1.0,
                dividend_consistency: DividendConsistency::High,
            },
            value: ValueRaw {
                pe_ratio: 28.0,
                pb_ratio: 6.1,
                dividend_yield: DividendYield::NotAvailable,
            },
            momentum: MomentumRaw {
                three_month_return: 4.2,
                relative_performance: 1.1,
                rsi: 58.0,
            },
        }
    }

    #[test]
    fn test_scorecard() {
        let card = StockScorecard::compute(&stryker(), BenchmarkTable::builtin()).unwrap();

        assert_eq!(card.performance.value(), 92);
        assert_eq!(card.stability.value(), 81);
        assert_eq!(card.value.value(), 50);
        assert_eq!(card.momentum.value(), 96);
        // (92 + 81 + 50 + 96) / 4 = 79.75
        assert_eq!(card.overall.value(), 80);

        assert_eq!(card.ratings.len(), 4);
        let stability = card.rating(Category::Stability).unwrap();
        assert_eq!(stability.label, RatingLabel::High);
        assert_eq!(card.score(Category::Value), card.value);
    }

    #[test]
    fn test_load_stocks_missing_file() {
        let err = load_stocks("/nonexistent/stocks.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
