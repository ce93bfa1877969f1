pub mod episode;
pub mod network;
pub mod show;

pub use episode::Episode;
pub use network::Network;
pub use show::{ShowDetail, ShowRecord};
