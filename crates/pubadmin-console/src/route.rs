use std::{fmt::Display, str::FromStr};

const LIST_PATH: &str = "/publications";
const ADD_PATH: &str = "/publications/add";
const EDIT_PATH_PREFIX: &str = "/publications/edit/";

/// Navigation intents of the console, router decides how to display them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Edit(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Add => ADD_PATH.to_string(),
            Route::Edit(id) => format!("{EDIT_PATH_PREFIX}{id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim_end_matches('/');
        match path {
            "" | LIST_PATH => Ok(Route::List),
            ADD_PATH => Ok(Route::Add),
            _ => path
                .strip_prefix(EDIT_PATH_PREFIX)
                .and_then(|id| id.parse().ok())
                .map(Route::Edit)
                .ok_or_else(|| UnknownRoute(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::List.path(), "/publications");
        assert_eq!(Route::Edit(3).to_string(), "/publications/edit/3");

        for route in [Route::List, Route::Add, Route::Edit(42)] {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
        assert_eq!("/".parse::<Route>().unwrap(), Route::List);
        assert!("/publications/edit/abc".parse::<Route>().is_err());
        assert!("/settings".parse::<Route>().is_err());
    }
}
