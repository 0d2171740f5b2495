// crates/scoring/src/benchmarks.rs
use common::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Industry name of the fallback benchmark
pub const DEFAULT_INDUSTRY: &str = "Default";

/// Industry averages plus the market-wide record.
///
/// Tables are immutable once built; every lookup falls back to the
/// `Default` industry.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    market: MarketBenchmark,
    default: IndustryBenchmark,
    industries: HashMap<String, IndustryBenchmark>,
}

/// On-disk layout of a benchmark override file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkFile {
    pub market: MarketBenchmark,
    pub industries: HashMap<String, IndustryBenchmark>,
}

static BUILTIN: Lazy<BenchmarkTable> = Lazy::new(builtin_table);

/// Look up an industry in the built-in table, falling back to `Default`.
/// Matching is exact and case-sensitive.
pub fn resolve_industry(name: &str) -> &'static IndustryBenchmark {
    BUILTIN.resolve(name)
}

/// Market-wide averages from the built-in table
pub fn market_benchmark() -> &'static MarketBenchmark {
    BUILTIN.market()
}

impl BenchmarkTable {
    /// Process-wide built-in table
    pub fn builtin() -> &'static BenchmarkTable {
        &BUILTIN
    }

    pub fn new(
        market: MarketBenchmark,
        mut industries: HashMap<String, IndustryBenchmark>,
    ) -> Result<Self> {
        let default = industries
            .remove(DEFAULT_INDUSTRY)
            .ok_or_else(|| Error::Config(format!("benchmark table has no '{}' industry", DEFAULT_INDUSTRY)))?;

        market
            .validate()
            .map_err(|e| Error::Config(format!("market benchmark: {}", e)))?;
        warn_non_positive("market", &market);

        default
            .validate()
            .map_err(|e| Error::Config(format!("industry '{}': {}", DEFAULT_INDUSTRY, e)))?;
        warn_non_positive(DEFAULT_INDUSTRY, &default);

        for (name, benchmark) in &industries {
            benchmark
                .validate()
                .map_err(|e| Error::Config(format!("industry '{}': {}", name, e)))?;
            warn_non_positive(name, benchmark);
        }

        Ok(Self { market, default, industries })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: BenchmarkFile = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse benchmarks: {}", e)))?;
        Self::new(file.market, file.industries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let table = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded {} industry benchmarks from {}",
            table.industries.len() + 1,
            path.display()
        );

        Ok(table)
    }

    /// Benchmark for `industry`, or the `Default` entry if unknown
    pub fn resolve(&self, industry: &str) -> &IndustryBenchmark {
        match self.industries.get(industry) {
            Some(benchmark) => benchmark,
            None => {
                if industry != DEFAULT_INDUSTRY {
                    tracing::debug!("Unknown industry '{}', using {}", industry, DEFAULT_INDUSTRY);
                }
                &self.default
            }
        }
    }

    pub fn market(&self) -> &MarketBenchmark {
        &self.market
    }

    pub fn contains(&self, industry: &str) -> bool {
        industry == DEFAULT_INDUSTRY || self.industries.contains_key(industry)
    }

    /// Known industry names, sorted, including `Default`
    pub fn industry_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.industries.keys().map(String::as_str).collect();
        names.push(DEFAULT_INDUSTRY);
        names.sort_unstable();
        names
    }

    pub fn to_file(&self) -> BenchmarkFile {
        let mut industries = self.industries.clone();
        industries.insert(DEFAULT_INDUSTRY.to_string(), self.default.clone());
        BenchmarkFile {
            market: self.market.clone(),
            industries,
        }
    }
}

// Ratio denominators that would fall back to the neutral value
fn non_positive_fields(benchmark: &Benchmark) -> Vec<(&'static str, f64)> {
    let fields = [
        ("revenue_growth", benchmark.performance.revenue_growth),
        ("profit_margin", benchmark.performance.profit_margin),
        ("return_on_capital", benchmark.performance.return_on_capital),
        ("volatility", benchmark.stability.volatility),
        ("beta", benchmark.stability.beta),
        ("pe_ratio", benchmark.value.pe_ratio),
        ("pb_ratio", benchmark.value.pb_ratio),
        ("dividend_yield", benchmark.value.dividend_yield.as_percent()),
        ("three_month_return", benchmark.momentum.three_month_return),
        ("rsi", benchmark.momentum.rsi),
    ];

    fields.into_iter().filter(|(_, value)| *value <= 0.0).collect()
}

fn warn_non_positive(name: &str, benchmark: &Benchmark) {
    for (field, value) in non_positive_fields(benchmark) {
        tracing::warn!("Benchmark '{}' has non-positive {} ({})", name, field, value);
    }
}

fn benchmark(
    performance: [f64; 3],
    stability: (f64, f64, DividendConsistency),
    value: [f64; 3],
    momentum: [f64; 3],
) -> Benchmark {
    Benchmark {
        performance: PerformanceRaw {
            revenue_growth: performance[0],
            profit_margin: performance[1],
            return_on_capital: performance[2],
        },
        stability: StabilityRaw {
            volatility: stability.0,
            beta: stability.1,
            dividend_consistency: stability.2,
        },
        value: ValueRaw {
            pe_ratio: value[0],
            pb_ratio: value[1],
            dividend_yield: DividendYield::Percent(value[2]),
        },
        momentum: MomentumRaw {
            three_month_return: momentum[0],
            relative_performance: momentum[1],
            rsi: momentum[2],
        },
    }
}

fn builtin_table() -> BenchmarkTable {
    use DividendConsistency::*;

    let market = benchmark([7.0, 12.0, 12.0], (1.0, 1.0, Medium), [20.0, 3.0, 1.8], [3.0, 0.0, 50.0]);

    let rows = [
        ("Technology", benchmark([18.0, 22.0, 16.0], (1.35, 1.2, Low), [28.0, 7.5, 0.9], [6.5, 3.0, 58.0])),
        ("Healthcare", benchmark([15.0, 20.0, 13.0], (1.2, 0.9, Low), [24.0, 4.5, 1.5], [4.0, 1.0, 54.0])),
        ("Financial Services", benchmark([8.0, 25.0, 10.0], (1.1, 1.1, High), [13.0, 1.4, 3.2], [3.5, 0.5, 52.0])),
        ("Consumer Cyclical", benchmark([10.0, 9.0, 12.0], (1.3, 1.25, Medium), [22.0, 4.0, 1.2], [4.5, 1.5, 55.0])),
        ("Consumer Defensive", benchmark([5.0, 8.0, 14.0], (0.7, 0.65, High), [21.0, 5.0, 2.8], [1.5, -1.0, 48.0])),
        ("Energy", benchmark([6.0, 11.0, 9.0], (1.5, 1.3, Good), [11.0, 1.8, 4.0], [2.0, -0.5, 47.0])),
        ("Industrials", benchmark([7.0, 10.0, 11.0], (1.05, 1.05, Good), [19.0, 3.8, 1.8], [3.0, 0.2, 51.0])),
        ("Utilities", benchmark([4.0, 13.0, 6.0], (0.6, 0.5, High), [17.0, 1.9, 3.6], [1.0, -1.5, 46.0])),
        ("Real Estate", benchmark([5.0, 18.0, 5.0], (1.0, 0.95, High), [30.0, 2.1, 3.9], [0.8, -2.0, 45.0])),
        ("Communication Services", benchmark([9.0, 15.0, 10.0], (1.25, 1.0, Low), [18.0, 2.9, 1.1], [4.8, 1.8, 56.0])),
        (DEFAULT_INDUSTRY, benchmark([8.0, 12.0, 11.0], (1.0, 1.0, Medium), [20.0, 3.0, 2.0], [3.0, 0.0, 50.0])),
    ];

    let default = rows
        .iter()
        .find(|(name, _)| *name == DEFAULT_INDUSTRY)
        .map(|(_, benchmark)| benchmark.clone())
        .unwrap_or_else(|| market.clone());

    let industries = rows
        .into_iter()
        .filter(|(name, _)| *name != DEFAULT_INDUSTRY)
        .map(|(name, benchmark)| (name.to_string(), benchmark))
        .collect();

    BenchmarkTable { market, default, industries }
}
