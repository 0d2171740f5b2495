// apps/scorecard/src/report.rs
use common::*;
use scoring::{breakdown, BenchmarkTable, Leaderboard, PortfolioScorecard};
use serde::Serialize;
use std::fmt::Write;

/// Everything the scorecard prints, in one serializable value
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub leaderboard: &'a Leaderboard,
    pub category_leaders: Vec<CategoryLeader>,
    pub portfolio: Option<PortfolioScorecard>,
}

#[derive(Debug, Serialize)]
pub struct CategoryLeader {
    pub category: Category,
    pub symbol: String,
    pub score: CategoryScore,
}

pub fn category_leaders(board: &Leaderboard) -> Vec<CategoryLeader> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            board.top_by(*category, 1).into_iter().next().map(|entry| CategoryLeader {
                category: *category,
                score: entry.scorecard.score(*category),
                symbol: entry.scorecard.symbol,
            })
        })
        .collect()
}

fn color_tag(color: RatingColor) -> &'static str {
    match color {
        RatingColor::Green => "+",
        RatingColor::Yellow => "~",
        RatingColor::Red => "-",
    }
}

pub fn render_text(
    report: &Report<'_>,
    stocks: &[StockMetrics],
    table: &BenchmarkTable,
    top_n: usize,
    show_breakdown: bool,
) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, report, stocks, table, top_n, show_breakdown)
        .map_err(|e| Error::InvalidData(format!("Failed to render report: {}", e)))?;
    Ok(out)
}

fn write_text(
    out: &mut String,
    report: &Report<'_>,
    stocks: &[StockMetrics],
    table: &BenchmarkTable,
    top_n: usize,
    show_breakdown: bool,
) -> std::fmt::Result {
    writeln!(
        out,
        "{:>4}  {:<6} {:<24} {:>5} {:>5} {:>5} {:>5} {:>7}",
        "Rank", "Symbol", "Industry", "Perf", "Stab", "Value", "Mom", "Overall"
    )?;

    for entry in report.leaderboard.top(top_n) {
        let card = &entry.scorecard;
        writeln!(
            out,
            "{:>4}  {:<6} {:<24} {:>5} {:>5} {:>5} {:>5} {:>7}",
            entry.rank,
            card.symbol,
            card.industry,
            card.performance,
            card.stability,
            card.value,
            card.momentum,
            card.overall,
        )?;

        for rating in &card.ratings {
            writeln!(
                out,
                "        [{}] {:<11} {:<11} {}",
                color_tag(rating.color),
                rating.category,
                rating.label,
                rating.explanation,
            )?;
        }

        if show_breakdown {
            if let Some(stock) = stocks.iter().find(|s| s.symbol == card.symbol) {
                for category in Category::ALL {
                    let detail = match breakdown(category, stock, table) {
                        Ok(detail) => detail,
                        Err(e) => {
                            tracing::warn!("No {} breakdown for {}: {}", category, card.symbol, e);
                            continue;
                        }
                    };
                    for indicator in &detail.indicators {
                        writeln!(
                            out,
                            "          {:<11} {:<22} w={:.2} SI={:.3} IM={:.3} -> {:.3}",
                            category,
                            indicator.name,
                            indicator.weight,
                            indicator.stock_vs_industry,
                            indicator.industry_vs_market,
                            indicator.contribution(),
                        )?;
                    }
                }
            }
        }
    }

    writeln!(out)?;
    for leader in &report.category_leaders {
        writeln!(out, "Best {:<11} {:<6} {}", leader.category, leader.symbol, leader.score)?;
    }

    if let Some(portfolio) = &report.portfolio {
        writeln!(out)?;
        writeln!(out, "Portfolio (total value {:.2})", portfolio.total_value)?;
        for category in Category::ALL {
            writeln!(out, "  {:<11} {}", category, portfolio.get(category))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(symbol: &str, revenue_growth: f64) -> StockMetrics {
        StockMetrics {
            symbol: symbol.to_string(),
            name: String::new(),
            industry: "Energy".to_string(),
            performance: PerformanceRaw {
                revenue_growth,
                profit_margin: 12.0,
                return_on_capital: 10.0,
            },
            stability: StabilityRaw {
                volatility: 1.4,
                beta: 1.2,
                dividend_consistency: DividendConsistency::Good,
            },
            value: ValueRaw {
                pe_ratio: 10.0,
                pb_ratio: 1.7,
                dividend_yield: DividendYield::Percent(4.2),
            },
            momentum: MomentumRaw {
                three_month_return: 2.0,
                relative_performance: -0.5,
                rsi: 48.0,
            },
        }
    }

    #[test]
    fn test_render_text() {
        let table = BenchmarkTable::builtin();
        let stocks = vec![stock("XOM", 7.0), stock("CVX", 3.0)];
        let board = Leaderboard::build(&stocks, table).unwrap();
        let report = Report {
            category_leaders: category_leaders(&board),
            leaderboard: &board,
            portfolio: Some(PortfolioScorecard::default()),
        };

        let text = render_text(&report, &stocks, table, 1, true).unwrap();
        assert!(text.contains("XOM"));
        assert!(text.contains("revenue_growth"));
        assert!(text.contains("Portfolio"));
        assert!(text.contains("Best Performance XOM"));

        let rows: Vec<&str> = text.lines().filter(|l| l.trim_start().starts_with("1 ")).collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_breakdown_failure_skips_only_that_category() {
        let table = BenchmarkTable::builtin();
        let scored = vec![stock("XOM", 7.0)];
        let board = Leaderboard::build(&scored, table).unwrap();
        let report = Report {
            category_leaders: category_leaders(&board),
            leaderboard: &board,
            portfolio: None,
        };

        let mut changed = stock("XOM", 7.0);
        changed.stability.volatility = f64::NAN;

        let text = render_text(&report, &[changed], table, 5, true).unwrap();
        assert!(text.contains("revenue_growth"));
        assert!(text.contains("pe_ratio"));
        assert!(!text.contains("volatility"));
    }

    #[test]
    fn test_category_leaders_cover_all_categories() {
        let board = Leaderboard::build(&[stock("XOM", 7.0)], BenchmarkTable::builtin()).unwrap();
        let leaders = category_leaders(&board);
        assert_eq!(leaders.len(), 4);
        assert!(leaders.iter().all(|l| l.symbol == "XOM"));

        let json = serde_json::to_string(&leaders).unwrap();
        assert!(json.contains("\"performance\""));
    }
}
