use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of companies the analysis service knows about.
/// The ticker string is sent verbatim in the `ticker` multipart field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Company {
    #[default]
    A,
    B,
}

impl Company {
    pub const ALL: [Company; 2] = [Company::A, Company::B];

    pub fn ticker(self) -> &'static str {
        match self {
            Company::A => "A",
            Company::B => "B",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Company::A => "Company A",
            Company::B => "Company B",
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown company '{0}'")]
pub struct UnknownCompany(pub String);

impl FromStr for Company {
    type Err = UnknownCompany;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Company::ALL
            .into_iter()
            .find(|c| c.ticker() == s.trim())
            .ok_or_else(|| UnknownCompany(s.to_string()))
    }
}
