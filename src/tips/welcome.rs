//! @acp:module "Welcome Selector"
//! @acp:summary "Choose the greeting for a page from season, time and referrer rules"
//! @acp:domain widget
//! @acp:layer logic

use chrono::{NaiveDateTime, Timelike};

use super::pool::{MessagePool, TemplateArgs};
use super::referrer::{match_referrer, ReferrerMatch};
use super::season::{match_season, MonthDay};
use super::time::match_hour;
use super::types::WaifuTips;

/// Everything the welcome selector needs to know about the page
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Path of the current page; `/` is the home page
    pub path: String,
    /// Host of the current page
    pub host: String,
    /// Full document title
    pub title: String,
    /// Referring document URL, if any
    pub referrer: Option<String>,
    /// Local wall-clock time used for season and hour rules
    pub now: NaiveDateTime,
}

impl PageContext {
    pub fn is_home(&self) -> bool {
        self.path == "/"
    }

    /// Hostname of the referring document, when the referrer is a URL
    /// with a host
    pub fn referrer_host(&self) -> Option<String> {
        let referrer = self.referrer.as_deref()?.trim();
        if referrer.is_empty() {
            return None;
        }
        match url::Url::parse(referrer) {
            Ok(url) => url.host_str().map(str::to_string),
            Err(e) => {
                tracing::debug!("Ignoring unparsable referrer '{}': {}", referrer, e);
                None
            }
        }
    }
}

/// Which rule produced the welcome text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeSource {
    Season,
    Time,
    Referrer,
    ReferrerDefault,
    Generic,
}

/// Chosen welcome pool and the values for its placeholders
#[derive(Debug, Clone)]
pub struct Welcome<'a> {
    pub pool: &'a MessagePool,
    pub args: TemplateArgs,
    pub source: WelcomeSource,
}

/// Title up to the first occurrence of `separator`
pub fn page_title<'a>(title: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return title;
    }
    title.split(separator).next().unwrap_or(title)
}

/// Select the welcome message for a page.
///
/// Home page: season rule, else time rule, else nothing. Referred
/// navigation: referrer rules. Anything else: the generic welcome.
pub fn select_welcome<'a>(
    tips: &'a WaifuTips,
    page: &PageContext,
    title_separator: &str,
) -> Option<Welcome<'a>> {
    let referrer_host = page.referrer_host();

    let (pool, source) = if page.is_home() {
        let today = MonthDay::of(&page.now);
        if let Some(rule) = match_season(&tips.seasons, today) {
            (&rule.text, WelcomeSource::Season)
        } else if let Some(rule) = match_hour(&tips.times, page.now.hour()) {
            (&rule.text, WelcomeSource::Time)
        } else {
            return None;
        }
    } else if let Some(host) = referrer_host.as_deref().filter(|_| !tips.referrer.is_empty()) {
        match match_referrer(&tips.referrer, host, &page.host)? {
            ReferrerMatch::SameHost => (&tips.welcome, WelcomeSource::Generic),
            ReferrerMatch::Domain(pool) => (pool, WelcomeSource::Referrer),
            ReferrerMatch::Default(pool) => (pool, WelcomeSource::ReferrerDefault),
        }
    } else {
        (&tips.welcome, WelcomeSource::Generic)
    };

    if pool.is_empty() {
        return None;
    }

    let mut args = TemplateArgs::new().with("title", page_title(&page.title, title_separator));
    if let Some(host) = referrer_host {
        args = args.with("referrer", host);
    }

    Some(Welcome { pool, args, source })
}
