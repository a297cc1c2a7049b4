//! Placeholder personalized insight text.
//!
//! Deterministic copy derived from computed analytics. The live AI
//! advisory API is an external collaborator and is not called here.

use crate::domain::valuation::AllocationSlice;

/// Insight copy for the whole portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioInsights {
    pub risk: String,
    pub diversification: String,
    pub performance: String,
    pub recommendations: Vec<String>,
}

/// Build placeholder insight text from the current analytics.
pub fn portfolio_insights(total_return: f64, allocation: &[AllocationSlice]) -> PortfolioInsights {
    let risk = match allocation.len() {
        0 => "Your portfolio is empty; add holdings to assess risk.".to_string(),
        1 => "Your portfolio is concentrated in a single position, which carries elevated risk."
            .to_string(),
        2..=4 => {
            "Your portfolio shows moderate risk with a small number of positions.".to_string()
        }
        _ => "Your portfolio shows moderate risk with a good mix of positions.".to_string(),
    };

    let diversification = match allocation.iter().map(|s| s.percentage).fold(0.0, f64::max) {
        p if p > 50.0 => format!(
            "Over half of your portfolio sits in one position ({:.1}%); consider spreading it out.",
            p
        ),
        p if p > 0.0 => {
            "Allocation is reasonably spread; consider adding more international exposure."
                .to_string()
        }
        _ => "No allocation data available yet.".to_string(),
    };

    let performance = if total_return > 0.0 {
        format!("Overall portfolio return is positive at {total_return:.2}%.")
    } else if total_return < 0.0 {
        format!("Overall portfolio return is negative at {total_return:.2}%.")
    } else {
        "Overall portfolio performance is flat.".to_string()
    };

    let mut recommendations = vec![
        "Review your allocation against your target weights".to_string(),
        "Consider adding defensive stocks for better risk management".to_string(),
    ];
    if allocation.len() < 5 {
        recommendations.push("Look into broadening the number of positions you hold".to_string());
    }

    PortfolioInsights {
        risk,
        diversification,
        performance,
        recommendations,
    }
}
