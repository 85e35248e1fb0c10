use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanCalcError;

/// Top-level pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Loan,
    ExchangeRates,
    About,
    Error,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Loan, Page::ExchangeRates, Page::About, Page::Error];

    /// Navigation button label
    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::Loan => "HOME",
            Page::ExchangeRates => "EXCHANGE RATES (LIVE)",
            Page::About => "ABOUT",
            Page::Error => "ERROR PAGE",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Loan => "loan",
            Page::ExchangeRates => "exchange",
            Page::About => "about",
            Page::Error => "error",
        }
    }

    /// Fixed body text for pages that are not built yet.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Page::ExchangeRates => Some("Exchange Rates Page (to be implemented)"),
            Page::Error => Some("Error Page (to be implemented)"),
            Page::Loan | Page::About => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loan" | "home" => Ok(Page::Loan),
            "exchange" | "exchange-rates" | "exchange_rates" => Ok(Page::ExchangeRates),
            "about" => Ok(Page::About),
            "error" => Ok(Page::Error),
            other => Err(LoanCalcError::InvalidInput {
                field: "page".into(),
                reason: format!("Unknown page '{other}'. Use: home, exchange, about, error"),
            }),
        }
    }
}

/// Static content of the About page
#[derive(Debug, Clone, Serialize)]
pub struct AboutContent {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

pub const ABOUT: AboutContent = AboutContent {
    title: "About This App",
    description: "This Loan Calculator computes loan EMIs (Equated Monthly Installments) \
                  and a detailed month-by-month amortization schedule from a loan amount, \
                  an annual interest rate and a term in years.",
    features: &[
        "Calculate EMI and amortization schedule for any loan amount, interest rate, and term.",
        "Switch between light and dark mode for comfortable viewing.",
        "Label amounts in USD, EUR or INR.",
        "Export the schedule as JSON, CSV or a table.",
    ],
};
