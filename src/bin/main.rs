use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use market_pulse::analysis::{
    chart_series, AssetStrength, MarketAnalyzer, MarketResults, RegimeAggregator, RegimeSummary,
    StrengthScorer,
};
use market_pulse::config::{self, ApplicationConfig, LogConfig};
use market_pulse::data_provider::{CachedMarketDataProvider, CsvDirectorySource};
use market_pulse::domain_types::Period;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// 日線趨勢與市場狀態分析
#[derive(Debug, Parser)]
#[command(name = "market_pulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 分析多個商品並彙總市場狀態
    Analyze {
        /// 以逗號分隔的商品代碼，預設取配置中的清單
        #[arg(long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,
        /// 分析期間，例如 5d、1mo、3mo、1y
        #[arg(long)]
        period: Option<Period>,
        /// 輸出格式
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// 輸出單一商品的收盤價與均線序列
    Series {
        /// 商品代碼
        symbol: String,
        /// 分析期間
        #[arg(long)]
        period: Option<Period>,
        /// 保留的最近資料點數
        #[arg(long)]
        points: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Serialize)]
struct MarketReport<'a> {
    period: Period,
    results: &'a MarketResults,
    strength: BTreeMap<&'a str, AssetStrength>,
    regime: RegimeSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config().context("無法加載應用程序配置")?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let capacity = NonZeroUsize::new(app_config.data.cache_capacity)
        .ok_or_else(|| anyhow!("data.cache_capacity 必須大於 0"))?;
    let provider = CachedMarketDataProvider::new(
        CsvDirectorySource::new(&app_config.data.directory),
        capacity,
        app_config.data.min_bars,
    );
    info!("資料目錄: {}", provider.source().directory().display());

    match cli.command {
        Command::Analyze {
            symbols,
            period,
            format,
        } => {
            let symbols = symbols.unwrap_or_else(|| app_config.analysis.default_symbols.clone());
            let period = resolve_period(period, app_config)?;
            run_analyze(&provider, &symbols, period, format).await
        }
        Command::Series {
            symbol,
            period,
            points,
        } => {
            let period = resolve_period(period, app_config)?;
            let points = points.unwrap_or(app_config.analysis.chart_points);
            run_series(&provider, &symbol, period, points).await
        }
    }
}

fn resolve_period(period: Option<Period>, app_config: &ApplicationConfig) -> Result<Period> {
    match period {
        Some(period) => Ok(period),
        None => Ok(app_config.analysis.period()?),
    }
}

async fn run_analyze(
    provider: &CachedMarketDataProvider<CsvDirectorySource>,
    symbols: &[String],
    period: Period,
    format: OutputFormat,
) -> Result<()> {
    info!("分析 {} 個商品，期間 {}", symbols.len(), period);

    let market_data = provider.fetch_market_data(symbols, period).await;
    let results = MarketAnalyzer::analyze_market(&market_data, period);
    let regime = RegimeAggregator::summarize(results.values());
    let strength: BTreeMap<&str, AssetStrength> = results
        .iter()
        .map(|(symbol, r)| (symbol.as_str(), StrengthScorer::assess(r)))
        .collect();

    let skipped = symbols.len().saturating_sub(results.len());
    if skipped > 0 {
        warn!("{} 個商品因資料不足被略過", skipped);
    }
    debug!("快取統計: {:?}", provider.stats());

    match format {
        OutputFormat::Json => {
            let report = MarketReport {
                period,
                results: &results,
                strength,
                regime,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => print_table(&results, &strength, regime),
    }

    Ok(())
}

async fn run_series(
    provider: &CachedMarketDataProvider<CsvDirectorySource>,
    symbol: &str,
    period: Period,
    points: usize,
) -> Result<()> {
    let chart = provider
        .fetch(symbol, period)
        .await
        .and_then(|table| chart_series(&table, points))
        .ok_or_else(|| anyhow!("No data: {}", symbol))?;

    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

fn print_table(
    results: &MarketResults,
    strength: &BTreeMap<&str, AssetStrength>,
    regime: RegimeSummary,
) {
    println!(
        "{:<8} {:>10} {:>9} {:<9} {:>9} {:<20} {:>9} {:>8} {:>6} {:<13}",
        "SYMBOL", "PRICE", "RETURN%", "TREND", "STRENGTH", "SIGNAL", "MOMENTUM", "VOL", "SCORE",
        "REGIME"
    );
    for (symbol, r) in results {
        let (score, asset_regime) = strength
            .get(symbol.as_str())
            .map(|s| (s.score.to_string(), s.regime.to_string()))
            .unwrap_or_default();
        println!(
            "{:<8} {:>10.2} {:>9.2} {:<9} {:>9.2} {:<20} {:>9.2} {:>8.2} {:>6} {:<13}",
            symbol,
            r.price,
            r.total_return,
            r.trend.to_string(),
            r.trend_strength,
            r.signal.to_string(),
            r.momentum,
            r.volatility,
            score,
            asset_regime
        );
    }
    println!();
    println!("Market regime: {} (score {})", regime.label, regime.score);
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_config.level.to_lowercase()))
        .map_err(|e| anyhow!("無效的日誌級別: {}", e))?;

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    debug!("日誌系統初始化完成");
    Ok(())
}
