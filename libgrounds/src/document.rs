use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{Error, Result};

/// Everything captured out of one document filename.
///
/// The mandatory `date` group is parsed and consumed here; every other
/// captured value is kept, whitespace-trimmed, for directive lookup. A
/// document is immutable once constructed and lives for the duration of one
/// generation request.
#[derive(Debug, PartialEq)]
pub struct Document {
    date: NaiveDate,
    identifier: String,
    groups: IndexMap<String, Vec<String>>,
}

impl Document {
    /// Normalize raw capture output into a document descriptor.
    pub fn from_captures(mut captures: IndexMap<String, Vec<String>>) -> Result<Document> {
        let date_values = captures.shift_remove("date").unwrap_or_default();
        let date_str = date_values
            .first()
            .ok_or_else(|| Error::Validation("unable to find date in filename".to_string()))?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|err| Error::Parse(format!("invalid date `{}': {}", date_str, err)))?;

        // group patterns may capture surrounding separators on purpose
        let groups: IndexMap<String, Vec<String>> = captures
            .into_iter()
            .map(|(name, values)| {
                let trimmed = values
                    .into_iter()
                    .map(|value| value.trim().to_string())
                    .collect();
                (name, trimmed)
            })
            .collect();

        let identifier = groups
            .get("identifier")
            .and_then(|values| values.first())
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| Error::Validation("unable to find identifier in filename".to_string()))?;

        Ok(Document {
            date,
            identifier,
            groups,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Captured values by group, in pattern-declaration order. The `date`
    /// group is not part of this mapping.
    pub fn groups(&self) -> &IndexMap<String, Vec<String>> {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use chrono::NaiveDate;
    use indexmap::IndexMap;

    use anyhow::{anyhow, Result};

    fn captures(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, values)| {
                let values = values.iter().map(|value| value.to_string()).collect();
                (name.to_string(), values)
            })
            .collect()
    }

    #[test]
    fn builds_descriptor() -> Result<()> {
        let document = Document::from_captures(captures(&[
            ("date", &["2021-01-01"]),
            ("identifier", &[" vendorA "]),
            ("kind", &["invoice", "receipt"]),
        ]))?;

        assert_eq!(
            document.date(),
            NaiveDate::from_ymd_opt(2021, 1, 1).ok_or(anyhow!("invalid date"))?
        );
        assert_eq!(document.identifier(), "vendorA");
        assert_eq!(
            document.groups().get("kind"),
            Some(&vec!["invoice".to_string(), "receipt".to_string()])
        );
        Ok(())
    }

    #[test]
    fn date_group_is_consumed() -> Result<()> {
        let document = Document::from_captures(captures(&[
            ("date", &["2021-01-01"]),
            ("identifier", &["vendorA"]),
        ]))?;

        assert!(document.groups().get("date").is_none());
        Ok(())
    }

    #[test]
    fn missing_date() {
        let err = Document::from_captures(captures(&[("identifier", &["vendorA"])])).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "validation error: unable to find date in filename"
        );
    }

    #[test]
    fn empty_date_group() {
        let err = Document::from_captures(captures(&[
            ("date", &[]),
            ("identifier", &["vendorA"]),
        ]))
        .unwrap_err();
        assert_eq!(
            format!("{}", err),
            "validation error: unable to find date in filename"
        );
    }

    #[test]
    fn malformed_date() {
        let err = Document::from_captures(captures(&[
            ("date", &["2021-13-77"]),
            ("identifier", &["vendorA"]),
        ]))
        .unwrap_err();
        assert!(format!("{}", err).starts_with("parse error: invalid date `2021-13-77'"));
    }

    #[test]
    fn missing_identifier() {
        let err = Document::from_captures(captures(&[("date", &["2021-01-01"])])).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "validation error: unable to find identifier in filename"
        );
    }

    #[test]
    fn blank_identifier() {
        let err = Document::from_captures(captures(&[
            ("date", &["2021-01-01"]),
            ("identifier", &["   "]),
        ]))
        .unwrap_err();
        assert_eq!(
            format!("{}", err),
            "validation error: unable to find identifier in filename"
        );
    }
}
