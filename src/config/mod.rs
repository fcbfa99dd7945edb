mod app_config;
mod rules;

pub use app_config::{AppConfig, ResponderConfig};
pub use rules::RulesConfig;
