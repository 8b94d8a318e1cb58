mod reader;
mod types;

pub use reader::read_holdings;
pub use types::{Holding, PortfolioSummary, PriceStatus, PricedHolding};
