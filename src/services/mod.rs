pub mod campus_service;
pub mod chain_service;
pub mod crowdfund_service;
pub mod history_service;
pub mod session_service;
pub mod split_service;
pub mod stats_service;
pub mod subscription_service;
pub mod tip_service;
pub mod transfer_service;
