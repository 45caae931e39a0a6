use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::amount::{Amount, CostSpec};
use crate::directive::{DirectiveStore, PostingSpec};
use crate::document::Document;
use crate::resolver;
use crate::{Error, Result};

/// One account-and-amount line within a transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct Posting {
    pub account: String,
    pub amount: Amount,
    pub cost: Option<CostSpec>,
    pub hide_amount: bool,
}

impl Posting {
    /// Default posting for a bare account name.
    pub fn from_account(account: &str) -> Posting {
        Posting {
            account: account.to_string(),
            amount: Amount::zero("USD"),
            cost: None,
            hide_amount: false,
        }
    }

    pub(crate) fn from_spec(spec: PostingSpec) -> Result<Posting> {
        match spec {
            PostingSpec::Account(account) => Ok(Posting::from_account(&account)),
            PostingSpec::Detailed {
                account,
                amount,
                currency,
                cost_per,
                cost_total,
                cost_currency,
                hide_amount,
            } => {
                let number = match amount {
                    Some(raw) => decimal("amount", &raw)?,
                    None => Decimal::new(0, 2),
                };
                let cost_per = cost_per.map(|raw| decimal("cost_per", &raw)).transpose()?;
                let cost_total = cost_total
                    .map(|raw| decimal("cost_total", &raw))
                    .transpose()?;

                // a cost currency alone does not make a cost
                let cost = if cost_per.is_none() && cost_total.is_none() {
                    None
                } else {
                    Some(CostSpec::new(
                        cost_per,
                        cost_total,
                        Some(cost_currency.unwrap_or_else(|| "USD".to_string())),
                    )?)
                };

                Ok(Posting {
                    account,
                    amount: Amount {
                        number,
                        currency: currency.unwrap_or_else(|| "USD".to_string()),
                    },
                    cost,
                    hide_amount: hide_amount.unwrap_or(false),
                })
            }
        }
    }
}

fn decimal(field: &str, raw: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|_| Error::Config(format!("invalid {} `{}'", field, raw)))
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hide_amount {
            return write!(f, "{}", self.account);
        }

        write!(f, "{}    {}", self.account, self.amount)?;
        if let Some(cost) = &self.cost {
            write!(f, " {}", cost)?;
        }

        Ok(())
    }
}

/// A fully merged ledger transaction.
#[derive(Debug, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub flag: String,
    pub payee: Option<String>,
    pub narration: Option<String>,
    pub tags: Vec<String>,
    pub links: Vec<String>,
    pub metadata: IndexMap<String, String>,
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Merge every directive matched by `document` into one transaction.
    ///
    /// Scalar attributes keep the first value encountered and fall back to
    /// the defaults, sequences keep every element once, and metadata keys
    /// keep their latest value. The payee is the document identifier unless
    /// a matched directive hides it.
    pub fn create(document: &Document, store: &DirectiveStore, default_flag: &str) -> Transaction {
        let flag = resolver::scalar(document, store, |d| d.flag.as_ref())
            .into_iter()
            .next()
            .unwrap_or_else(|| default_flag.to_string());
        let hide_payee = resolver::scalar(document, store, |d| d.hide_payee.as_ref())
            .first()
            .copied()
            .unwrap_or(false);
        let narration = resolver::scalar(document, store, |d| d.narration.as_ref())
            .into_iter()
            .next();

        Transaction {
            date: document.date(),
            flag,
            payee: (!hide_payee).then(|| document.identifier().to_string()),
            narration,
            tags: resolver::list(document, store, |d| d.tags.as_ref()),
            links: resolver::list(document, store, |d| d.links.as_ref()),
            metadata: resolver::map(document, store, |d| d.metadata.as_ref()),
            postings: resolver::list(document, store, |d| d.postings.as_ref()),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.flag)?;
        if let Some(payee) = &self.payee {
            write!(f, " \"{}\"", payee)?;
        }
        if let Some(narration) = &self.narration {
            write!(f, " \"{}\"", narration)?;
        }
        for tag in &self.tags {
            write!(f, " #{}", tag)?;
        }
        for link in &self.links {
            write!(f, " ^{}", link)?;
        }
        for (name, value) in &self.metadata {
            write!(f, "\n  {}: \"{}\"", name, value)?;
        }
        for posting in &self.postings {
            write!(f, "\n  {}", posting)?;
        }

        write!(f, "\n\n")
    }
}
