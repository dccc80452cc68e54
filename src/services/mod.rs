pub mod asset_service;
pub mod payment_service;
pub mod team_service;
pub mod token_service;
pub mod user_service;
