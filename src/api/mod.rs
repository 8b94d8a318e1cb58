mod coincap;
mod price_source;

pub use coincap::CoinCapClient;
pub use price_source::PriceSource;
