use std::{fmt, str::FromStr};

use crate::error::UnknownCategoryError;

/// Kind of number sequence served by the upstream classification API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Primes,
        Category::Fibonacci,
        Category::Even,
        Category::Random,
    ];

    /// Identifier used in request paths.
    pub fn id(self) -> &'static str {
        match self {
            Category::Primes => "p",
            Category::Fibonacci => "f",
            Category::Even => "e",
            Category::Random => "r",
        }
    }

    /// Identifier accepted as an alias of [`Category::id`].
    pub fn long_id(self) -> &'static str {
        match self {
            Category::Primes => "primes",
            Category::Fibonacci => "fibo",
            Category::Even => "even",
            Category::Random => "rand",
        }
    }

    /// Default path suffix of the upstream endpoint.
    pub fn default_endpoint(self) -> &'static str {
        self.long_id()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::Primes => 0,
            Category::Fibonacci => 1,
            Category::Even => 2,
            Category::Random => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Primes => "prime",
            Category::Fibonacci => "Fibonacci",
            Category::Even => "even",
            Category::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == s || category.long_id() == s)
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}

/// Upstream path suffix for every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMap {
    endpoints: [String; 4],
}

impl EndpointMap {
    pub fn new(
        primes: impl Into<String>,
        fibonacci: impl Into<String>,
        even: impl Into<String>,
        random: impl Into<String>,
    ) -> Self {
        Self {
            endpoints: [
                primes.into(),
                fibonacci.into(),
                even.into(),
                random.into(),
            ],
        }
    }

    pub fn get(&self, category: Category) -> &str {
        &self.endpoints[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self::new(
            Category::Primes.default_endpoint(),
            Category::Fibonacci.default_endpoint(),
            Category::Even.default_endpoint(),
            Category::Random.default_endpoint(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_ids() {
        assert_eq!("p".parse::<Category>().unwrap(), Category::Primes);
        assert_eq!("f".parse::<Category>().unwrap(), Category::Fibonacci);
        assert_eq!("e".parse::<Category>().unwrap(), Category::Even);
        assert_eq!("r".parse::<Category>().unwrap(), Category::Random);
    }

    #[test]
    fn parses_long_ids() {
        assert_eq!("primes".parse::<Category>().unwrap(), Category::Primes);
        assert_eq!("fibo".parse::<Category>().unwrap(), Category::Fibonacci);
        assert_eq!("even".parse::<Category>().unwrap(), Category::Even);
        assert_eq!("rand".parse::<Category>().unwrap(), Category::Random);
    }

    #[test]
    fn rejects_unknown_ids() {
        for id in ["x", "", "P", "prime", "fibonacci", " e"] {
            let err = id.parse::<Category>().unwrap_err();
            assert_eq!(err.0, id);
        }
    }

    #[test]
    fn default_endpoints() {
        let endpoints = EndpointMap::default();
        let suffixes: Vec<_> = endpoints.iter().map(|(_, suffix)| suffix).collect();
        assert_eq!(suffixes, ["primes", "fibo", "even", "rand"]);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
