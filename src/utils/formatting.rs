use crate::wallet::PortfolioSummary;

/// Render the fixed-format summary line. Returns `None` when the summary has
/// no extremes to report (empty portfolio); emission is the caller's concern.
pub fn format_summary(summary: &PortfolioSummary) -> Option<String> {
    let best = summary.best.as_ref()?;
    let worst = summary.worst.as_ref()?;

    Some(format!(
        "total={:.2},best_asset={},best_performance={:.2},worst_asset={},worst_performance={:.2}",
        summary.total_value,
        best.holding.symbol,
        best.performance_ratio,
        worst.holding.symbol,
        worst.performance_ratio,
    ))
}
