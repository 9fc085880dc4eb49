//! Which view is on screen.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// Filter panel plus the derived list.
    #[default]
    List,
    /// Detail view for a cca3 code. The code may not resolve to a record.
    Details(String),
}

impl Route {
    pub fn details_code(&self) -> Option<&str> {
        match self {
            Route::Details(code) => Some(code),
            Route::List => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/country"),
            Route::Details(code) => write!(f, "/details/{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::default().to_string(), "/country");
        assert_eq!(Route::Details("FRA".into()).to_string(), "/details/FRA");
        assert_eq!(Route::Details("FRA".into()).details_code(), Some("FRA"));
        assert_eq!(Route::List.details_code(), None);
    }
}
