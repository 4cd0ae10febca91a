pub mod controller;
pub mod draft;
pub mod signal;

pub use controller::BookingController;
pub use draft::DateField;
pub use signal::SuccessSignal;
