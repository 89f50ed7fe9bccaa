use std::collections::HashMap;
use std::fmt::Display;
use std::{env, result};

use lazy_static::lazy_static;

pub type Res<T> = Result<T, String>;

pub trait ErrToStr<T, E: Display> {
    fn err_to_str(self) -> Res<T>;
}

impl<T, E: Display> ErrToStr<T, E> for result::Result<T, E> {
    fn err_to_str(self) -> Res<T> {
        self.map_err(|err| err.to_string())
    }
}

#[derive(strum_macros::Display, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub enum DbgFlg {
    #[strum(serialize = "DBG_FLG_SEARCH")]
    Search,
    #[strum(serialize = "DBG_FLG_CAROUSEL")]
    Carousel,
    #[strum(serialize = "DBG_FLG_DATA")]
    Data,
    #[strum(serialize = "DBG_FLG_REPL")]
    Repl,
}

lazy_static! {
    pub static ref DBG_FLG_DEFAULTS: HashMap<DbgFlg, bool> = HashMap::from([
        (DbgFlg::Search, false),
        (DbgFlg::Carousel, false),
        (DbgFlg::Data, false),
        (DbgFlg::Repl, false),
    ]);
}

/// Diagnostics go to stderr so stdout stays clean for command output.
pub fn log_if(s: &str, flg: DbgFlg) {
    if checkflag(&flg) {
        eprintln!("{}", log_line(s));
    }
}

fn log_line(s: &str) -> String {
    format!("{} {}", utc_now(), s)
}

fn utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn checkflag(flag: &DbgFlg) -> bool {
    flag_enabled(flag, env::var(flag.to_string()).ok().as_deref())
}

fn flag_enabled(flag: &DbgFlg, env_value: Option<&str>) -> bool {
    env_value.map_or_else(
        || DBG_FLG_DEFAULTS.get(flag).copied().unwrap_or(false),
        |s| s == "1" || s == "true",
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flag_env_names() {
        assert_eq!(DbgFlg::Search.to_string(), "DBG_FLG_SEARCH");
        assert_eq!(DbgFlg::Carousel.to_string(), "DBG_FLG_CAROUSEL");
    }

    #[test]
    fn test_flag_enabled() {
        assert!(flag_enabled(&DbgFlg::Search, Some("1")));
        assert!(flag_enabled(&DbgFlg::Search, Some("true")));
        assert!(!flag_enabled(&DbgFlg::Data, Some("0")));
        assert!(flag_enabled(&DbgFlg::Data, Some("1")));
        assert!(!flag_enabled(&DbgFlg::Repl, None));
    }

    #[test]
    fn test_log_line_has_timestamp() {
        let line = log_line("hello");
        let (timestamp, message) = line.split_once(' ').unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(message, "hello");
    }

    #[test]
    fn test_err_to_str() {
        let res: Result<u8, _> = "x".parse::<u8>();
        assert!(res.err_to_str().is_err());
    }
}
