use consensus_core::{CompoundCalculation, YearlyBreakdown};

/// Future value of `months` contributions of `monthly` paid at the start of
/// each period: `P × [((1+i)^n − 1)/i] × (1+i)`.
///
/// A zero (or numerically degenerate) monthly rate falls back to plain
/// accumulation, so value equals the amount invested.
pub fn future_value_annuity_due(monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    let linear = monthly * months as f64;
    if monthly_rate.abs() < f64::EPSILON {
        return linear;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    let value = monthly * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate);
    if value.is_finite() {
        value
    } else {
        linear
    }
}

/// Project a monthly investment plan at an annual rate of `cagr` percent.
///
/// The breakdown holds one entry per started year (`ceil(n / 12)` entries);
/// the last entry covers the remaining months when `n` is not a multiple
/// of 12. Currency amounts are rounded to whole units.
pub fn calculate_compound_return(
    monthly_investment: f64,
    cagr: f64,
    investment_period: u32,
) -> CompoundCalculation {
    let monthly_rate = cagr / 100.0 / 12.0;

    let future_value = future_value_annuity_due(monthly_investment, monthly_rate, investment_period);
    let total_invested = monthly_investment * investment_period as f64;
    let total_return = future_value - total_invested;

    let years = investment_period.div_ceil(12);
    let yearly_breakdown = (1..=years)
        .map(|year| {
            let months_elapsed = (year * 12).min(investment_period);
            let invested = monthly_investment * months_elapsed as f64;
            let value = future_value_annuity_due(monthly_investment, monthly_rate, months_elapsed);
            YearlyBreakdown {
                year,
                invested: invested.round(),
                value: value.round(),
                gain: (value - invested).round(),
            }
        })
        .collect();

    CompoundCalculation {
        monthly_investment,
        investment_period,
        cagr,
        total_invested: total_invested.round(),
        final_value: future_value.round(),
        total_return: total_return.round(),
        yearly_breakdown,
    }
}
