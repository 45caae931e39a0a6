use std::fmt;

use rust_decimal::Decimal;

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    pub number: Decimal,
    pub currency: String,
}

impl Amount {
    pub fn new(number: Decimal, currency: &str) -> Amount {
        Amount {
            number,
            currency: currency.to_string(),
        }
    }

    /// `0.00` in the given currency.
    pub fn zero(currency: &str) -> Amount {
        Amount::new(Decimal::new(0, 2), currency)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

/// Cost annotation on a posting, in a secondary currency.
///
/// At least one of the per-unit and total amounts is always present;
/// [`CostSpec::new`] rejects the empty combination, so a stored cost can
/// always be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct CostSpec {
    per: Option<Decimal>,
    total: Option<Decimal>,
    currency: Option<String>,
}

impl CostSpec {
    pub fn new(
        per: Option<Decimal>,
        total: Option<Decimal>,
        currency: Option<String>,
    ) -> Result<CostSpec> {
        if per.is_none() && total.is_none() {
            return Err(Error::CostSpec);
        }

        Ok(CostSpec {
            per,
            total,
            currency,
        })
    }

    pub fn per(&self) -> Option<Decimal> {
        self.per
    }

    pub fn total(&self) -> Option<Decimal> {
        self.total
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

impl fmt::Display for CostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let braces = match (self.per, self.total) {
            (Some(per), Some(total)) => {
                parts.push(per.to_string());
                parts.push("#".to_string());
                parts.push(total.to_string());
                ("{", "}")
            }
            (Some(per), None) => {
                parts.push(per.to_string());
                ("{", "}")
            }
            (None, Some(total)) => {
                parts.push(total.to_string());
                ("{{", "}}")
            }
            (None, None) => unreachable!("cost spec with no amounts"),
        };

        if let Some(currency) = &self.currency {
            parts.push(currency.clone());
        }

        write!(f, "{}{}{}", braces.0, parts.join(" "), braces.1)
    }
}
