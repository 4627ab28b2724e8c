pub mod payment_gateway;
pub mod db_init;

pub mod auth_service;
pub mod beneficiary_service;
pub mod market_service;
