pub mod config;
pub mod db;
pub mod http;
pub mod metrics;
pub mod notify;
pub mod pricing;
pub mod resolver;
pub mod signup;
pub mod validation;
