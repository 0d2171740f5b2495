// apps/scorecard/src/main.rs
mod config;
mod report;

use common::*;
use config::{config_path, load_config, HoldingEntry};
use report::{category_leaders, render_text, Report};
use scoring::{load_stocks, portfolio_scorecard, BenchmarkTable, Leaderboard};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Report goes to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let path = config_path();
    tracing::info!("Stock scorecard starting with {}", path.display());

    let config = load_config(&path)?;

    let loaded;
    let table = match &config.data.benchmarks_path {
        Some(benchmarks_path) => {
            loaded = BenchmarkTable::load(benchmarks_path)?;
            &loaded
        }
        None => {
            tracing::info!("Using built-in benchmark tables");
            BenchmarkTable::builtin()
        }
    };

    let stocks = load_stocks(&config.data.stocks_path)?;
    for stock in &stocks {
        if !table.contains(&stock.industry) {
            tracing::warn!(
                "{} has unknown industry '{}', scoring against Default",
                stock.symbol,
                stock.industry
            );
        }
    }

    let board = Leaderboard::build(&stocks, table)?;
    tracing::info!("Scored {} stocks", board.len());

    let portfolio = if config.portfolio.is_empty() {
        None
    } else {
        let holdings = resolve_holdings(&config.portfolio, &stocks)?;
        Some(portfolio_scorecard(&holdings, table)?)
    };

    let report = Report {
        category_leaders: category_leaders(&board),
        leaderboard: &board,
        portfolio,
    };

    if config.report.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let text = render_text(
            &report,
            &stocks,
            table,
            config.report.top_n,
            config.report.show_breakdown,
        )?;
        print!("{}", text);
    }

    Ok(())
}

fn resolve_holdings(entries: &[HoldingEntry], stocks: &[StockMetrics]) -> Result<Vec<PortfolioHolding>> {
    entries
        .iter()
        .map(|entry| {
            let stock = stocks
                .iter()
                .find(|s| s.symbol == entry.symbol)
                .ok_or_else(|| Error::NotFound(format!("portfolio symbol {}", entry.symbol)))?;
            Ok(PortfolioHolding {
                stock: stock.clone(),
                value: entry.value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_holdings() {
        let stocks: Vec<StockMetrics> = serde_json::from_str(include_str!("../../../data/stocks.json")).unwrap();
        let entries = vec![
            HoldingEntry {
                symbol: "SYK".to_string(),
                value: 2_500.0,
            },
            HoldingEntry {
                symbol: "MSFT".to_string(),
                value: 4_000.0,
            },
        ];

        let holdings = resolve_holdings(&entries, &stocks).unwrap();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].stock.name, "Stryker");

        let missing = vec![HoldingEntry {
            symbol: "NOPE".to_string(),
            value: 1.0,
        }];
        let err = resolve_holdings(&missing, &stocks).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_bundled_data_scores() {
        let stocks: Vec<StockMetrics> = serde_json::from_str(include_str!("../../../data/stocks.json")).unwrap();
        let table = BenchmarkTable::from_toml_str(include_str!("../../../data/benchmarks.toml")).unwrap();

        let board = Leaderboard::build(&stocks, &table).unwrap();
        assert_eq!(board.len(), stocks.len());

        let syk = board.get("SYK").unwrap();
        assert_eq!(syk.scorecard.performance.value(), 92);
    }
}
