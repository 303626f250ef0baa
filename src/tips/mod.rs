//! @acp:module "Tips"
//! @acp:summary "Rule tables, contextual matchers and welcome selection"
//! @acp:domain widget
//! @acp:layer feature

pub mod loader;
pub mod pool;
pub mod referrer;
pub mod season;
mod table;
pub mod time;
pub mod types;
pub mod welcome;

pub use loader::load_tips;
pub use pool::{render_template, MessagePool, TemplateArgs};
pub use referrer::{match_referrer, second_level_domain, ReferrerMatch, ReferrerRules};
pub use season::{match_season, normalize_seasons, parse_date_spec, DateBoundary, DateRule, MonthDay};
pub use time::{match_hour, normalize_times, parse_hour_spec, HourSpan, TimeRule};
pub use types::{EventPools, WaifuTips};
pub use welcome::{page_title, select_welcome, PageContext, Welcome, WelcomeSource};
