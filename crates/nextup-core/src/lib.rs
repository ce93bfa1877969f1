pub mod order;
pub mod storage;
pub mod store;

pub use storage::WatchlistStorage;
pub use store::WatchlistStore;
