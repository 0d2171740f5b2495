// crates/scoring/src/leaderboard.rs
use crate::StockScorecard;
use crate::benchmarks::BenchmarkTable;
use common::*;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// Ranked position of one stock
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub scorecard: StockScorecard,
}

/// Stocks ranked by overall score
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

// Higher score first, then symbol ascending
fn by_score_then_symbol(a: (CategoryScore, &str), b: (CategoryScore, &str)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

impl Leaderboard {
    /// Score every stock in parallel and rank them
    pub fn build(stocks: &[StockMetrics], table: &BenchmarkTable) -> Result<Self> {
        let start = std::time::Instant::now();

        let mut scorecards = stocks
            .par_iter()
            .map(|stock| StockScorecard::compute(stock, table))
            .collect::<Result<Vec<_>>>()?;

        scorecards.sort_by(|a, b| {
            by_score_then_symbol((a.overall, a.symbol.as_str()), (b.overall, b.symbol.as_str()))
        });

        let entries = scorecards
            .into_iter()
            .enumerate()
            .map(|(i, scorecard)| LeaderboardEntry { rank: i + 1, scorecard })
            .collect();

        tracing::debug!("Leaderboard of {} stocks built in {:?}", stocks.len(), start.elapsed());

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.scorecard.symbol == symbol)
    }

    /// Top `n` by overall score
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Top `n` re-ranked by a single category
    pub fn top_by(&self, category: Category, n: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&StockScorecard> = self.entries.iter().map(|e| &e.scorecard).collect();
        ranked.sort_by(|a, b| {
            by_score_then_symbol((a.score(category), a.symbol.as_str()), (b.score(category), b.symbol.as_str()))
        });

        ranked
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, scorecard)| LeaderboardEntry {
                rank: i + 1,
                scorecard: scorecard.clone(),
            })
            .collect()
    }
}
