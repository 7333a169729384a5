//! Integration test modules, one per feature area.

pub mod auth_tests;
pub mod general_tests;
pub mod routing_tests;
pub mod static_assets_tests;
