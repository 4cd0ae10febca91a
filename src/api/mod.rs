pub mod http;
pub mod memory;
pub mod traits;
pub mod types;

pub use http::HttpRentalApi;
pub use memory::InMemoryRentalApi;
pub use traits::RentalApi;
