use indexmap::IndexMap;
use serde::Deserialize;

use crate::transaction::Posting;
use crate::Result;

/// A partial set of transaction attributes tied to one captured filename
/// value.
///
/// Every field is optional and unset by default; an unset field contributes
/// nothing when directives are merged, which is distinct from a field set to
/// an empty or false value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Directive {
    pub flag: Option<String>,
    pub payee: Option<String>,
    pub narration: Option<String>,
    pub tags: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
    pub metadata: Option<IndexMap<String, String>>,
    pub postings: Option<Vec<Posting>>,
    pub hide_payee: Option<bool>,
}

/// Raw directive shape as it appears in the configuration document, before
/// its posting specifications are resolved.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectiveSpec {
    flag: Option<String>,
    payee: Option<String>,
    narration: Option<String>,
    tags: Option<Vec<String>>,
    links: Option<Vec<String>>,
    metadata: Option<IndexMap<String, String>>,
    postings: Option<Vec<PostingSpec>>,
    hide_payee: Option<bool>,
}

/// A posting in configuration: either a bare account name, or a detailed
/// object. All amounts arrive as strings so their scale survives.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PostingSpec {
    Account(String),
    Detailed {
        account: String,
        amount: Option<String>,
        currency: Option<String>,
        cost_per: Option<String>,
        cost_total: Option<String>,
        cost_currency: Option<String>,
        hide_amount: Option<bool>,
    },
}

impl DirectiveSpec {
    fn resolve(self) -> Result<Directive> {
        let postings = self
            .postings
            .map(|specs| specs.into_iter().map(Posting::from_spec).collect())
            .transpose()?;

        Ok(Directive {
            flag: self.flag,
            payee: self.payee,
            narration: self.narration,
            tags: self.tags,
            links: self.links,
            metadata: self.metadata,
            postings,
            hide_payee: self.hide_payee,
        })
    }
}

/// Two-level directive lookup: group name first, captured value second.
///
/// Built once at configuration-load time and never mutated afterwards. A
/// group or value with no entry is not an error; it simply contributes
/// nothing at resolution time.
#[derive(Debug, Default)]
pub struct DirectiveStore {
    groups: IndexMap<String, IndexMap<String, Directive>>,
}

impl DirectiveStore {
    pub fn new() -> DirectiveStore {
        Default::default()
    }

    pub(crate) fn from_specs(
        specs: IndexMap<String, IndexMap<String, DirectiveSpec>>,
    ) -> Result<DirectiveStore> {
        let mut store = DirectiveStore::new();
        for (group, entries) in specs {
            let mut resolved = IndexMap::new();
            for (value, spec) in entries {
                resolved.insert(value, spec.resolve()?);
            }
            store.groups.insert(group, resolved);
        }

        Ok(store)
    }

    /// Register a directive for a captured value within a group.
    pub fn insert(&mut self, group: &str, value: &str, directive: Directive) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(value.to_string(), directive);
    }

    pub fn lookup(&self, group: &str, value: &str) -> Option<&Directive> {
        self.groups
            .get(group)
            .and_then(|entries| entries.get(value))
    }
}
