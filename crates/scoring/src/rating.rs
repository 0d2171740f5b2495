// crates/scoring/src/rating.rs
//
// Threshold rules over raw values, independent of the weighted-ratio scorers.
use common::*;

pub const PERFORMANCE_GROWTH_MARGIN: f64 = 5.0;
pub const PERFORMANCE_PROFIT_MARGIN: f64 = 5.0;
pub const PERFORMANCE_ROC_MARGIN: f64 = 3.0;

pub const VOLATILITY_MARGIN: f64 = 0.1;
pub const STABLE_BETA_RANGE: (f64, f64) = (0.8, 1.1);
pub const UNSTABLE_BETA_DISTANCE: f64 = 0.3;

pub const PE_MARGIN: f64 = 2.0;
pub const PB_MARGIN: f64 = 0.5;
pub const DIVIDEND_YIELD_MARGIN: f64 = 0.5;

pub const RETURN_MARGIN: f64 = 2.0;
pub const RELATIVE_PERFORMANCE_MARGIN: f64 = 1.0;
pub const STRONG_RSI_RANGE: (f64, f64) = (55.0, 70.0);
pub const OVERSOLD_RSI: f64 = 45.0;
pub const OVERBOUGHT_RSI: f64 = 70.0;

fn color_for(label: RatingLabel) -> RatingColor {
    match label {
        RatingLabel::High | RatingLabel::Undervalued | RatingLabel::Strong => RatingColor::Green,
        RatingLabel::Fair => RatingColor::Yellow,
        RatingLabel::Low | RatingLabel::Unstable | RatingLabel::Overvalued | RatingLabel::Weak => {
            RatingColor::Red
        }
    }
}

fn rating(category: Category, label: RatingLabel, explanation: String) -> Rating {
    Rating {
        category,
        label,
        color: color_for(label),
        explanation,
    }
}

pub fn classify_performance(raw: &PerformanceRaw, industry: &PerformanceRaw) -> Rating {
    let beats = raw.revenue_growth > industry.revenue_growth + PERFORMANCE_GROWTH_MARGIN
        && raw.profit_margin > industry.profit_margin + PERFORMANCE_PROFIT_MARGIN
        && raw.return_on_capital > industry.return_on_capital + PERFORMANCE_ROC_MARGIN;

    let trails = raw.revenue_growth < industry.revenue_growth - PERFORMANCE_GROWTH_MARGIN
        || raw.profit_margin < industry.profit_margin - PERFORMANCE_PROFIT_MARGIN
        || raw.return_on_capital < industry.return_on_capital - PERFORMANCE_ROC_MARGIN;

    let label = if beats {
        RatingLabel::High
    } else if trails {
        RatingLabel::Low
    } else {
        RatingLabel::Fair
    };

    let summary = match label {
        RatingLabel::High => "outperforms its industry on growth, margins and returns",
        RatingLabel::Low => "lags its industry on at least one of growth, margins or returns",
        _ => "performs roughly in line with its industry",
    };

    let explanation = format!(
        "Revenue growth {}% vs industry {}%, profit margin {}% vs {}%, return on capital {}% vs {}%: {}.",
        raw.revenue_growth,
        industry.revenue_growth,
        raw.profit_margin,
        industry.profit_margin,
        raw.return_on_capital,
        industry.return_on_capital,
        summary,
    );

    rating(Category::Performance, label, explanation)
}

pub fn classify_stability(raw: &StabilityRaw, industry: &StabilityRaw) -> Rating {
    let stock_dividend = raw.dividend_consistency.score();
    let industry_dividend = industry.dividend_consistency.score();

    let calm = raw.volatility < industry.volatility - VOLATILITY_MARGIN
        && (STABLE_BETA_RANGE.0..=STABLE_BETA_RANGE.1).contains(&raw.beta)
        && stock_dividend >= industry_dividend;

    let unstable = raw.volatility > industry.volatility + VOLATILITY_MARGIN
        || (1.0 - raw.beta).abs() > UNSTABLE_BETA_DISTANCE
        || stock_dividend < industry_dividend;

    let label = if calm {
        RatingLabel::High
    } else if unstable {
        RatingLabel::Unstable
    } else {
        RatingLabel::Fair
    };

    let summary = match label {
        RatingLabel::High => "steadier than its industry with market-like beta",
        RatingLabel::Unstable => "swings harder than its industry or pays dividends less reliably",
        _ => "about as steady as its industry",
    };

    let explanation = format!(
        "Volatility {} vs industry {}, beta {}, dividend consistency {} vs {}: {}.",
        raw.volatility,
        industry.volatility,
        raw.beta,
        raw.dividend_consistency,
        industry.dividend_consistency,
        summary,
    );

    rating(Category::Stability, label, explanation)
}

pub fn classify_value(raw: &ValueRaw, industry: &ValueRaw) -> Rating {
    let stock_yield = raw.dividend_yield.as_percent();
    let industry_yield = industry.dividend_yield.as_percent();

    let cheap = raw.pe_ratio < industry.pe_ratio - PE_MARGIN
        && raw.pb_ratio < industry.pb_ratio - PB_MARGIN
        && stock_yield > industry_yield + DIVIDEND_YIELD_MARGIN;

    let expensive = raw.pe_ratio > industry.pe_ratio + PE_MARGIN
        || raw.pb_ratio > industry.pb_ratio + PB_MARGIN
        || stock_yield < industry_yield - DIVIDEND_YIELD_MARGIN;

    let label = if cheap {
        RatingLabel::Undervalued
    } else if expensive {
        RatingLabel::Overvalued
    } else {
        RatingLabel::Fair
    };

    let summary = match label {
        RatingLabel::Undervalued => "cheaper than its industry with a higher yield",
        RatingLabel::Overvalued => "priced above its industry on earnings, book value or yield",
        _ => "priced roughly in line with its industry",
    };

    let explanation = format!(
        "P/E {} vs industry {}, P/B {} vs {}, dividend yield {} vs {}: {}.",
        raw.pe_ratio,
        industry.pe_ratio,
        raw.pb_ratio,
        industry.pb_ratio,
        raw.dividend_yield,
        industry.dividend_yield,
        summary,
    );

    rating(Category::Value, label, explanation)
}

pub fn classify_momentum(raw: &MomentumRaw, industry: &MomentumRaw) -> Rating {
    let strong = raw.three_month_return > industry.three_month_return + RETURN_MARGIN
        && raw.relative_performance > industry.relative_performance + RELATIVE_PERFORMANCE_MARGIN
        && (STRONG_RSI_RANGE.0..=STRONG_RSI_RANGE.1).contains(&raw.rsi);

    let weak = raw.three_month_return < industry.three_month_return - RETURN_MARGIN
        || raw.relative_performance < industry.relative_performance - RELATIVE_PERFORMANCE_MARGIN
        || raw.rsi < OVERSOLD_RSI
        || raw.rsi > OVERBOUGHT_RSI;

    let label = if strong {
        RatingLabel::Strong
    } else if weak {
        RatingLabel::Weak
    } else {
        RatingLabel::Fair
    };

    let summary = match label {
        RatingLabel::Strong => "trending ahead of its industry without being overbought",
        RatingLabel::Weak => "trailing its industry or trading at an RSI extreme",
        _ => "moving with its industry",
    };

    let explanation = format!(
        "3-month return {}% vs industry {}%, relative performance {}% vs {}%, RSI {}: {}.",
        raw.three_month_return,
        industry.three_month_return,
        raw.relative_performance,
        industry.relative_performance,
        raw.rsi,
        summary,
    );

    rating(Category::Momentum, label, explanation)
}

/// Rate one category of a stock against its industry benchmark
pub fn classify_rating(category: Category, stock: &StockMetrics, industry: &IndustryBenchmark) -> Rating {
    match category {
        Category::Performance => classify_performance(&stock.performance, &industry.performance),
        Category::Stability => classify_stability(&stock.stability, &industry.stability),
        Category::Value => classify_value(&stock.value, &industry.value),
        Category::Momentum => classify_momentum(&stock.momentum, &industry.momentum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::resolve_industry;

    fn healthcare() -> &'static IndustryBenchmark {
        resolve_industry("Healthcare")
    }

    #[test]
    fn test_performance_buckets() {
        let industry = &healthcare().performance;

        let high = PerformanceRaw {
            revenue_growth: 21.0,
            profit_margin: 26.0,
            return_on_capital: 17.0,
        };
        assert_eq!(classify_performance(&high, industry).label, RatingLabel::High);

        // Exactly at the margin is not enough
        let edge = PerformanceRaw {
            revenue_growth: 20.0,
            ..high
        };
        assert_eq!(classify_performance(&edge, industry).label, RatingLabel::Fair);

        let low = PerformanceRaw {
            return_on_capital: 9.0,
            ..high
        };
        let rating = classify_performance(&low, industry);
        assert_eq!(rating.label, RatingLabel::Low);
        assert_eq!(rating.color, RatingColor::Red);
    }

    #[test]
    fn test_stability_stryker_is_high() {
        let stryker = StabilityRaw {
            volatility: 0.95,
            beta: 1.0,
            dividend_consistency: DividendConsistency::High,
        };

        let rating = classify_stability(&stryker, &healthcare().stability);
        assert_eq!(rating.label, RatingLabel::High);
        assert_eq!(rating.color, RatingColor::Green);
        assert!(rating.explanation.contains("0.95"));
    }

    #[test]
    fn test_stability_beta_band_is_inclusive() {
        let industry = &healthcare().stability;
        let base = StabilityRaw {
            volatility: 0.95,
            beta: 1.0,
            dividend_consistency: DividendConsistency::High,
        };

        for beta in [0.8, 1.1] {
            let rating = classify_stability(&StabilityRaw { beta, ..base }, industry);
            assert_eq!(rating.label, RatingLabel::High, "beta {}", beta);
        }

        for beta in [0.79, 1.11] {
            let rating = classify_stability(&StabilityRaw { beta, ..base }, industry);
            assert_eq!(rating.label, RatingLabel::Fair, "beta {}", beta);
        }
    }

    #[test]
    fn test_stability_unstable_triggers() {
        let industry = &healthcare().stability;
        let base = StabilityRaw {
            volatility: 1.15,
            beta: 1.0,
            dividend_consistency: DividendConsistency::Low,
        };
        assert_eq!(classify_stability(&base, industry).label, RatingLabel::Fair);

        let jumpy = StabilityRaw { volatility: 1.4, ..base };
        assert_eq!(classify_stability(&jumpy, industry).label, RatingLabel::Unstable);

        let high_beta = StabilityRaw { beta: 1.45, ..base };
        assert_eq!(classify_stability(&high_beta, industry).label, RatingLabel::Unstable);

        let no_dividend = StabilityRaw {
            dividend_consistency: DividendConsistency::NotApplicable,
            ..base
        };
        let rating = classify_stability(&no_dividend, industry);
        assert_eq!(rating.label, RatingLabel::Unstable);
        assert_eq!(rating.color, RatingColor::Red);
    }

    #[test]
    fn test_value_buckets() {
        let industry = &healthcare().value;

        let cheap = ValueRaw {
            pe_ratio: 18.0,
            pb_ratio: 3.0,
            dividend_yield: DividendYield::Percent(2.5),
        };
        assert_eq!(classify_value(&cheap, industry).label, RatingLabel::Undervalued);

        let pricey = ValueRaw {
            pe_ratio: 27.0,
            ..cheap
        };
        assert_eq!(classify_value(&pricey, industry).label, RatingLabel::Overvalued);

        let fair = ValueRaw {
            pe_ratio: 23.0,
            pb_ratio: 4.6,
            dividend_yield: DividendYield::Percent(1.4),
        };
        let rating = classify_value(&fair, industry);
        assert_eq!(rating.label, RatingLabel::Fair);
        assert_eq!(rating.color, RatingColor::Yellow);
    }

    #[test]
    fn test_value_pb_alone_is_overvalued() {
        let industry = &healthcare().value;
        let base = ValueRaw {
            pe_ratio: 23.0,
            pb_ratio: 5.0,
            dividend_yield: DividendYield::Percent(1.4),
        };
        // P/B exactly at the margin stays Fair
        assert_eq!(classify_value(&base, industry).label, RatingLabel::Fair);

        let rich_book = ValueRaw { pb_ratio: 5.1, ..base };
        let rating = classify_value(&rich_book, industry);
        assert_eq!(rating.label, RatingLabel::Overvalued);
        assert_eq!(rating.color, RatingColor::Red);
    }

    #[test]
    fn test_value_missing_yield_counts_as_zero() {
        let industry = &healthcare().value;
        let no_yield = ValueRaw {
            pe_ratio: 23.0,
            pb_ratio: 4.6,
            dividend_yield: DividendYield::NotAvailable,
        };

        let rating = classify_value(&no_yield, industry);
        assert_eq!(rating.label, RatingLabel::Overvalued);
        assert!(rating.explanation.contains("N/A"));
    }

    #[test]
    fn test_momentum_buckets() {
        let industry = &healthcare().momentum;

        let strong = MomentumRaw {
            three_month_return: 7.5,
            relative_performance: 2.5,
            rsi: 62.0,
        };
        assert_eq!(classify_momentum(&strong, industry).label, RatingLabel::Strong);

        let overbought = MomentumRaw { rsi: 74.0, ..strong };
        assert_eq!(classify_momentum(&overbought, industry).label, RatingLabel::Weak);

        let oversold = MomentumRaw {
            three_month_return: 4.0,
            relative_performance: 1.0,
            rsi: 40.0,
        };
        assert_eq!(classify_momentum(&oversold, industry).label, RatingLabel::Weak);

        let flat = MomentumRaw {
            three_month_return: 4.0,
            relative_performance: 1.0,
            rsi: 52.0,
        };
        assert_eq!(classify_momentum(&flat, industry).label, RatingLabel::Fair);
    }

    #[test]
    fn test_momentum_rsi_band_is_inclusive() {
        let industry = &healthcare().momentum;
        let base = MomentumRaw {
            three_month_return: 7.5,
            relative_performance: 2.5,
            rsi: 62.0,
        };

        for rsi in [55.0, 70.0] {
            let rating = classify_momentum(&MomentumRaw { rsi, ..base }, industry);
            assert_eq!(rating.label, RatingLabel::Strong, "rsi {}", rsi);
        }

        assert_eq!(
            classify_momentum(&MomentumRaw { rsi: 54.9, ..base }, industry).label,
            RatingLabel::Fair
        );
        assert_eq!(
            classify_momentum(&MomentumRaw { rsi: 70.1, ..base }, industry).label,
            RatingLabel::Weak
        );
    }

    #[test]
    fn test_classify_rating_dispatch() {
        let stock = StockMetrics {
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
                dividend_yield: DividendYield::Percent(0.9),
            },
            momentum: MomentumRaw {
                three_month_return: 4.2,
                relative_performance: 1.1,
                rsi: 58.0,
            },
        };

        let ratings: Vec<Rating> = Category::ALL
            .iter()
            .map(|c| classify_rating(*c, &stock, healthcare()))
            .collect();

        assert_eq!(ratings[0].category, Category::Performance);
        assert_eq!(ratings[0].label, RatingLabel::Fair);
        assert_eq!(ratings[1].label, RatingLabel::High);
        assert_eq!(ratings[2].label, RatingLabel::Overvalued);
        assert_eq!(ratings[3].label, RatingLabel::Fair);
    }
}
