use chrono::NaiveDate;
use consensus_core::{Asset, AssetCategory, SourceGrade};
use source_validator::SourceInput;

/// Supplies the investable universe: categories, their assets and the
/// reference material backing the report.
pub trait UniverseProvider: Send + Sync {
    fn categories(&self) -> Vec<AssetCategory>;

    /// Assets of one category; empty for an unknown name
    fn assets(&self, category: &str) -> Vec<Asset>;

    fn reference_sources(&self) -> Vec<SourceInput>;
}

pub const AI_ML: &str = "AI & Machine Learning";
pub const SEMICONDUCTORS: &str = "Semiconductors & Hardware";
pub const CLEAN_ENERGY: &str = "Renewable Energy & Climate Tech";
pub const BLOCKCHAIN: &str = "Blockchain & Digital Assets";

/// Static four-category, seven-asset universe
#[derive(Debug, Clone, Copy, Default)]
pub struct MockUniverse;

#[allow(clippy::too_many_arguments)]
fn category(
    name: &str,
    growth: f64,
    innovation: f64,
    sustainability: f64,
    trust: f64,
    compound: f64,
    average: f64,
    consensus: f64,
    cagr: f64,
    sharpe: f64,
    drawdown: f64,
    selected: bool,
) -> AssetCategory {
    AssetCategory {
        name: name.to_string(),
        growth_score: growth,
        innovation_score: innovation,
        sustainability_score: sustainability,
        trust_score: trust,
        compound_potential: compound,
        average_score: average,
        consensus_score: consensus,
        cagr,
        sharpe_ratio: sharpe,
        max_drawdown: drawdown,
        selected,
    }
}

/// (current, buy, sell)
type PriceBand = (f64, f64, f64);

#[allow(clippy::too_many_arguments)]
fn asset(
    category: &str,
    ticker: &str,
    name: &str,
    industry: &str,
    growth_points: &[&str],
    expected_cagr: f64,
    trust_grade: SourceGrade,
    (current, buy, sell): PriceBand,
) -> Asset {
    Asset {
        category: category.to_string(),
        ticker: ticker.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        key_growth_points: growth_points.iter().map(|p| p.to_string()).collect(),
        expected_cagr,
        trust_grade,
        sources: Vec::new(),
        current_price: Some(current),
        buy_price: Some(buy),
        sell_price: Some(sell),
        holding_period: 5,
        expected_return: 0.0,
    }
}

impl UniverseProvider for MockUniverse {
    fn categories(&self) -> Vec<AssetCategory> {
        vec![
            category(AI_ML, 9.5, 9.8, 8.5, 9.0, 9.2, 9.2, 9.1, 35.0, 1.2, 22.0, true),
            category(SEMICONDUCTORS, 8.8, 9.0, 7.5, 8.8, 8.7, 8.6, 8.7, 32.0, 1.1, 23.0, true),
            category(CLEAN_ENERGY, 8.5, 8.8, 9.8, 8.2, 8.6, 8.8, 9.0, 28.0, 0.9, 20.0, true),
            // Drawdown too deep for the screen
            category(BLOCKCHAIN, 7.8, 9.2, 6.5, 7.0, 7.8, 7.7, 7.6, 40.0, 0.7, 45.0, false),
        ]
    }

    fn assets(&self, category: &str) -> Vec<Asset> {
        match category {
            AI_ML => vec![
                asset(
                    AI_ML,
                    "NVDA",
                    "NVIDIA",
                    "Semiconductors",
                    &["GPU market dominance", "AI datacenter demand", "Blackwell architecture"],
                    28.0,
                    SourceGrade::APlus,
                    (500.0, 480.0, 700.0),
                ),
                asset(
                    AI_ML,
                    "PLTR",
                    "Palantir",
                    "AI data analytics",
                    &["Defense and government contracts", "AIP platform growth", "Enterprise AI demand"],
                    33.0,
                    SourceGrade::A,
                    (25.0, 24.0, 45.0),
                ),
                asset(
                    AI_ML,
                    "MSFT",
                    "Microsoft",
                    "Cloud & AI",
                    &["Azure AI growth", "OpenAI partnership", "Copilot ecosystem"],
                    25.0,
                    SourceGrade::APlus,
                    (380.0, 375.0, 550.0),
                ),
            ],
            SEMICONDUCTORS => vec![
                asset(
                    SEMICONDUCTORS,
                    "ASML",
                    "ASML Holding",
                    "Semiconductor equipment",
                    &["EUV lithography monopoly", "Required for leading-edge nodes", "China demand recovery"],
                    30.0,
                    SourceGrade::A,
                    (800.0, 790.0, 1200.0),
                ),
                asset(
                    SEMICONDUCTORS,
                    "AMD",
                    "AMD",
                    "Semiconductors",
                    &["Competitive AI GPUs", "Datacenter share gains", "Xilinx synergies"],
                    32.0,
                    SourceGrade::A,
                    (140.0, 135.0, 250.0),
                ),
            ],
            CLEAN_ENERGY => vec![
                asset(
                    CLEAN_ENERGY,
                    "ENPH",
                    "Enphase Energy",
                    "Solar",
                    &["Microinverter leader", "Home energy storage", "IRA tailwinds"],
                    26.0,
                    SourceGrade::B,
                    (95.0, 90.0, 160.0),
                ),
                asset(
                    CLEAN_ENERGY,
                    "TSLA",
                    "Tesla",
                    "EVs & energy",
                    &["EV leadership", "Energy storage", "FSD and robotaxi"],
                    29.0,
                    SourceGrade::A,
                    (250.0, 245.0, 450.0),
                ),
            ],
            _ => Vec::new(),
        }
    }

    fn reference_sources(&self) -> Vec<SourceInput> {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        vec![
            SourceInput::new(
                "https://bloomberg.com/nvidia-ai-growth",
                "NVIDIA AI Revenue Surges 200%",
                "Bloomberg",
                date(2025, 10, 15),
            )
            .with_cross_validations(3),
            SourceInput::new(
                "https://reuters.com/semiconductor-outlook",
                "Semiconductor Industry Outlook 2025",
                "Reuters",
                date(2025, 10, 10),
            )
            .with_cross_validations(2),
        ]
    }
}
