/// Endpoints exposed by the rental service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Properties,
    CreateBooking,
    Bookings,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Properties => "/get_all_properties",
            Endpoint::CreateBooking => "/create_booking",
            Endpoint::Bookings => "/get_all_bookings",
        }
    }

    /// Join the endpoint path onto a base URL, tolerating a trailing slash
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            Endpoint::Properties.url("http://localhost:4000/"),
            "http://localhost:4000/get_all_properties"
        );
        assert_eq!(
            Endpoint::CreateBooking.url("http://localhost:4000"),
            "http://localhost:4000/create_booking"
        );
    }
}
