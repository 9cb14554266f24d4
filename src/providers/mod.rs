pub mod currency_api;
pub mod geo_api;
