//! Merges the partial directives matched by a document's captured values.
//!
//! Every captured value in every group may name a directive in the store.
//! Contributions combine per attribute with one of three strategies: scalars
//! collect into a first-occurrence-ordered candidate list, sequences
//! concatenate with order-preserving de-duplication, and key-maps union with
//! later entries overwriting earlier ones. Groups are walked in
//! pattern-declaration order and values within a group in match order, so
//! "first" and "later" are deterministic for a given configuration. Note the
//! asymmetry: scalar callers keep the head of the candidate list, while a
//! colliding metadata key keeps its latest value.

use indexmap::IndexMap;

use crate::directive::{Directive, DirectiveStore};
use crate::document::Document;

/// Every matched directive, in group order then match order. Captured values
/// with no directive attached are skipped; a value captured twice yields its
/// directive twice.
fn matched<'a>(
    document: &'a Document,
    store: &'a DirectiveStore,
) -> impl Iterator<Item = &'a Directive> {
    document.groups().iter().flat_map(move |(group, values)| {
        values.iter().filter_map(move |value| store.lookup(group, value))
    })
}

/// Collect a scalar attribute from every matched directive, de-duplicated,
/// first occurrence first. The caller picks the head as the effective value.
pub fn scalar<T, F>(document: &Document, store: &DirectiveStore, attribute: F) -> Vec<T>
where
    T: Clone + PartialEq,
    F: Fn(&Directive) -> Option<&T>,
{
    let mut merged = Vec::new();
    for directive in matched(document, store) {
        if let Some(value) = attribute(directive) {
            if !merged.contains(value) {
                merged.push(value.clone());
            }
        }
    }

    merged
}

/// Concatenate a sequence attribute from every matched directive,
/// de-duplicated by equality without disturbing encounter order.
pub fn list<T, F>(document: &Document, store: &DirectiveStore, attribute: F) -> Vec<T>
where
    T: Clone + PartialEq,
    F: Fn(&Directive) -> Option<&Vec<T>>,
{
    let mut merged = Vec::new();
    for directive in matched(document, store) {
        if let Some(values) = attribute(directive) {
            for value in values {
                if !merged.contains(value) {
                    merged.push(value.clone());
                }
            }
        }
    }

    merged
}

/// Union a key-map attribute from every matched directive; a key supplied
/// more than once keeps the value encountered last.
pub fn map<F>(document: &Document, store: &DirectiveStore, attribute: F) -> IndexMap<String, String>
where
    F: Fn(&Directive) -> Option<&IndexMap<String, String>>,
{
    let mut merged = IndexMap::new();
    for directive in matched(document, store) {
        if let Some(entries) = attribute(directive) {
            for (key, value) in entries {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use crate::directive::{Directive, DirectiveStore};
    use crate::document::Document;
    use crate::resolver;
    use indexmap::IndexMap;

    use anyhow::Result;

    fn document(groups: &[(&str, &[&str])]) -> Result<Document> {
        let mut captures = IndexMap::from([(
            "date".to_string(),
            vec!["2021-01-01".to_string()],
        )]);
        for (name, values) in groups {
            let values = values.iter().map(|value| value.to_string()).collect();
            captures.insert(name.to_string(), values);
        }

        Ok(Document::from_captures(captures)?)
    }

    fn narrated(narration: &str) -> Directive {
        Directive {
            narration: Some(narration.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn scalar_keeps_first_occurrence_order() -> Result<()> {
        let mut store = DirectiveStore::new();
        store.insert("identifier", "vendorA", narrated("Invoice"));
        store.insert("kind", "receipt", narrated("Receipt"));

        let document = document(&[("identifier", &["vendorA"]), ("kind", &["receipt"])])?;
        let narrations = resolver::scalar(&document, &store, |d| d.narration.as_ref());

        assert_eq!(narrations, vec!["Invoice".to_string(), "Receipt".to_string()]);
        Ok(())
    }

    #[test]
    fn scalar_skips_unset_and_unmatched() -> Result<()> {
        let mut store = DirectiveStore::new();
        store.insert("identifier", "vendorA", Directive::default());

        let document = document(&[("identifier", &["vendorA", "stray"])])?;
        let narrations = resolver::scalar(&document, &store, |d| d.narration.as_ref());

        assert!(narrations.is_empty());
        Ok(())
    }

    #[test]
    fn repeated_capture_contributes_once() -> Result<()> {
        let mut store = DirectiveStore::new();
        store.insert(
            "identifier",
            "vendorA",
            Directive {
                tags: Some(vec!["food".to_string(), "monthly".to_string()]),
                ..Default::default()
            },
        );

        // same substring captured twice in one filename
        let document = document(&[("identifier", &["vendorA", "vendorA"])])?;
        let tags = resolver::list(&document, &store, |d| d.tags.as_ref());

        assert_eq!(tags, vec!["food".to_string(), "monthly".to_string()]);
        Ok(())
    }

    #[test]
    fn list_merges_across_groups() -> Result<()> {
        let mut store = DirectiveStore::new();
        store.insert(
            "identifier",
            "vendorA",
            Directive {
                tags: Some(vec!["food".to_string(), "shared".to_string()]),
                ..Default::default()
            },
        );
        store.insert(
            "kind",
            "receipt",
            Directive {
                tags: Some(vec!["shared".to_string(), "paper".to_string()]),
                ..Default::default()
            },
        );

        let document = document(&[("identifier", &["vendorA"]), ("kind", &["receipt"])])?;
        let tags = resolver::list(&document, &store, |d| d.tags.as_ref());

        assert_eq!(
            tags,
            vec!["food".to_string(), "shared".to_string(), "paper".to_string()]
        );
        Ok(())
    }

    #[test]
    fn map_keeps_latest_value_on_collision() -> Result<()> {
        let mut store = DirectiveStore::new();
        store.insert(
            "identifier",
            "vendorA",
            Directive {
                metadata: Some(IndexMap::from([
                    ("ref".to_string(), "from-identifier".to_string()),
                    ("invoice".to_string(), "0122".to_string()),
                ])),
                ..Default::default()
            },
        );
        store.insert(
            "kind",
            "receipt",
            Directive {
                metadata: Some(IndexMap::from([(
                    "ref".to_string(),
                    "from-kind".to_string(),
                )])),
                ..Default::default()
            },
        );

        let document = document(&[("identifier", &["vendorA"]), ("kind", &["receipt"])])?;
        let metadata = resolver::map(&document, &store, |d| d.metadata.as_ref());

        assert_eq!(metadata.get("ref"), Some(&"from-kind".to_string()));
        assert_eq!(metadata.get("invoice"), Some(&"0122".to_string()));
        // the colliding key keeps its original position
        assert_eq!(metadata.get_index(0), Some((&"ref".to_string(), &"from-kind".to_string())));
        Ok(())
    }
}
