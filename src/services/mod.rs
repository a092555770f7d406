pub mod form_service;
pub mod pricing_service;
pub mod ticker_service;
