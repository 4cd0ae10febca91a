pub mod paginator;

pub use paginator::Paginator;
