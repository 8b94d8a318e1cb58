use serde::{Deserialize, Serialize};

/// One line-item in the wallet: ticker symbol, quantity held and the
/// original cost basis per unit. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub cost_basis: f64,
}

/// Whether a holding's fetch produced a usable quote. An `Unresolved`
/// holding carries a zero price and ratio but stays distinguishable from a
/// genuine 100% loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceStatus {
    Priced,
    Unresolved,
}

/// A holding plus the price fetched for it. Built exactly once per holding
/// by the aggregation step and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedHolding {
    pub holding: Holding,
    pub latest_price: f64,
    /// latest_price / cost_basis; >1 means gain, <1 means loss.
    pub performance_ratio: f64,
    pub status: PriceStatus,
}

impl PricedHolding {
    pub fn priced(holding: Holding, latest_price: f64) -> Self {
        let performance_ratio = latest_price / holding.cost_basis;
        Self {
            holding,
            latest_price,
            performance_ratio,
            status: PriceStatus::Priced,
        }
    }

    pub fn unresolved(holding: Holding) -> Self {
        Self {
            holding,
            latest_price: 0.0,
            performance_ratio: 0.0,
            status: PriceStatus::Unresolved,
        }
    }

    /// Current value of the position at the fetched price.
    pub fn value(&self) -> f64 {
        self.holding.quantity * self.latest_price
    }
}

/// Final reduction over all priced holdings. `best`/`worst` are `None` only
/// for an empty portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub best: Option<PricedHolding>,
    pub worst: Option<PricedHolding>,
    /// Holdings that could not be priced and contribute zero.
    pub unresolved: usize,
}
