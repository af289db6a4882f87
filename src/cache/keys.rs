//! Cache key construction.
//!
//! Keys are plain strings; callers namespace them as
//! `<queryName>:<arg>:<arg>` so distinct queries never collide.

use std::fmt::Display;

/// Separator between the query name and each argument.
pub const KEY_SEPARATOR: char = ':';

/// Build a composite key such as `latestContent:10`.
pub fn query_key<I, A>(name: &str, args: I) -> String
where
    I: IntoIterator<Item = A>,
    A: Display,
{
    let mut key = String::from(name);
    for arg in args {
        key.push(KEY_SEPARATOR);
        key.push_str(&arg.to_string());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_name_and_args() {
        assert_eq!(query_key("latestContent", [10]), "latestContent:10");
        assert_eq!(
            query_key("contentByNiche", ["security", "10"]),
            "contentByNiche:security:10"
        );
    }

    #[test]
    fn bare_name_without_args() {
        assert_eq!(query_key::<_, u32>("trending", []), "trending");
    }
}
