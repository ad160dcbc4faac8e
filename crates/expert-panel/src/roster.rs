use consensus_core::ExpertType;

/// Role label and evaluation criteria of one archetype
#[derive(Debug, Clone, Copy)]
pub struct ExpertProfile {
    pub expert_type: ExpertType,
    pub role: &'static str,
    pub criteria: &'static [&'static str],
}

const PROFILES: [ExpertProfile; 8] = [
    ExpertProfile {
        expert_type: ExpertType::Economist,
        role: "Macroeconomics, rates and business cycles",
        criteria: &["cyclical sensitivity", "inflation", "rate outlook"],
    },
    ExpertProfile {
        expert_type: ExpertType::TechSpecialist,
        role: "AI, quantum computing, semiconductors and renewables",
        criteria: &["technical edge", "innovation", "industry spillover"],
    },
    ExpertProfile {
        expert_type: ExpertType::Futurist,
        role: "Social, environmental and policy trends",
        criteria: &["sustainability", "ESG", "demographics"],
    },
    ExpertProfile {
        expert_type: ExpertType::InvestmentStrategist,
        role: "Portfolio construction and risk management",
        criteria: &["optimal weighting", "diversification"],
    },
    ExpertProfile {
        expert_type: ExpertType::BlockchainSpecialist,
        role: "Digital assets, audit and governance",
        criteria: &["trust", "liquidity", "transparency"],
    },
    ExpertProfile {
        expert_type: ExpertType::DataAnalyst,
        role: "Quantitative models and market forecasting",
        criteria: &["growth rate", "PER", "Sharpe", "volatility"],
    },
    ExpertProfile {
        expert_type: ExpertType::BehavioralEconomist,
        role: "Investor behavior and discipline",
        criteria: &["emotional control", "consistent investing routine"],
    },
    ExpertProfile {
        expert_type: ExpertType::PoliticalEconomist,
        role: "Policy, geopolitics, currency and trade",
        criteria: &["geopolitics", "currency", "policy risk"],
    },
];

/// Indexed by declaration order, which is the roster order
pub fn profile(expert: ExpertType) -> &'static ExpertProfile {
    &PROFILES[expert as usize]
}
