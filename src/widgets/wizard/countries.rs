use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2.
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("AU", "Australia"),
    ("AT", "Austria"),
    ("BE", "Belgium"),
    ("BW", "Botswana"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("DK", "Denmark"),
    ("EG", "Egypt"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("DE", "Germany"),
    ("GR", "Greece"),
    ("IN", "India"),
    ("IE", "Ireland"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("MX", "Mexico"),
    ("MA", "Morocco"),
    ("NA", "Namibia"),
    ("NL", "Netherlands"),
    ("NZ", "New Zealand"),
    ("NO", "Norway"),
    ("PT", "Portugal"),
    ("RW", "Rwanda"),
    ("SG", "Singapore"),
    ("ZA", "South Africa"),
    ("ES", "Spain"),
    ("SE", "Sweden"),
    ("CH", "Switzerland"),
    ("TZ", "Tanzania"),
    ("UG", "Uganda"),
    ("AE", "United Arab Emirates"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("ZM", "Zambia"),
    ("ZW", "Zimbabwe"),
];

/// Searchable country list backing the wizard's country field.
#[derive(Debug, Clone)]
pub struct CountryDirectory {
    countries: Vec<Country>,
}

impl Default for CountryDirectory {
    fn default() -> Self {
        Self::new(
            DEFAULT_COUNTRIES
                .iter()
                .map(|(code, name)| Country::new(code, name))
                .collect(),
        )
    }
}

impl CountryDirectory {
    pub const SUGGESTION_LIMIT: usize = 8;

    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Case-insensitive substring match on the name, or an exact code match.
    /// A blank query suggests nothing.
    pub fn search(&self, query: &str) -> Vec<Country> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.countries
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query) || c.code.eq_ignore_ascii_case(&query))
            .take(Self::SUGGESTION_LIMIT)
            .cloned()
            .collect()
    }

    pub fn find(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
