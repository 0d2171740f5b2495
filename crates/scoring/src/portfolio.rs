// crates/scoring/src/portfolio.rs
use crate::benchmarks::BenchmarkTable;
use crate::scoring::score_category;
use common::*;
use serde::{Deserialize, Serialize};

/// Value-weighted category score of a set of holdings.
///
/// Empty portfolios and portfolios with no positive total value score 0.
/// Values are scaled by the largest holding before summing.
pub fn aggregate_portfolio(
    holdings: &[PortfolioHolding],
    category: Category,
    table: &BenchmarkTable,
) -> Result<CategoryScore> {
    if holdings.is_empty() {
        return Ok(CategoryScore::ZERO);
    }

    let mut scored = Vec::with_capacity(holdings.len());
    let mut largest: f64 = 0.0;

    for holding in holdings {
        let value = holding_value(holding)?;
        let score = score_category(category, &holding.stock, table)?;
        largest = largest.max(value);
        scored.push((score, value));
    }

    if largest <= 0.0 {
        tracing::debug!("Portfolio of {} holdings has no positive value", holdings.len());
        return Ok(CategoryScore::ZERO);
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (score, value) in scored {
        let weight = value / largest;
        weighted_sum += score.value() as f64 * weight;
        total_weight += weight;
    }

    Ok(CategoryScore::from_percent(weighted_sum / total_weight))
}

fn holding_value(holding: &PortfolioHolding) -> Result<f64> {
    let field = format!("{} holding value", holding.stock.symbol);
    let value = ensure_finite(&field, holding.value)?;
    if value < 0.0 {
        return Err(Error::InvalidData(format!("{} is negative ({})", field, value)));
    }
    Ok(value)
}

/// Aggregated scores for every category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioScorecard {
    pub performance: CategoryScore,
    pub stability: CategoryScore,
    pub value: CategoryScore,
    pub momentum: CategoryScore,
    pub total_value: f64,
}

impl PortfolioScorecard {
    pub fn get(&self, category: Category) -> CategoryScore {
        match category {
            Category::Performance => self.performance,
            Category::Stability => self.stability,
            Category::Value => self.value,
            Category::Momentum => self.momentum,
        }
    }
}

pub fn portfolio_scorecard(holdings: &[PortfolioHolding], table: &BenchmarkTable) -> Result<PortfolioScorecard> {
    Ok(PortfolioScorecard {
        performance: aggregate_portfolio(holdings, Category::Performance, table)?,
        stability: aggregate_portfolio(holdings, Category::Stability, table)?,
        value: aggregate_portfolio(holdings, Category::Value, table)?,
        momentum: aggregate_portfolio(holdings, Category::Momentum, table)?,
        total_value: holdings.iter().map(|h| h.value).sum(),
    })
}
