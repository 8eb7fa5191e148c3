//! The ACT Rules EARL context and its term definitions.
//!
//! The context is embedded rather than fetched from [`ACT_CONTEXT_URL`]:
//! compaction must not touch the network, and the output must not change
//! when the remote document does.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Map, Value};

use crate::error::JsonLdError;

/// Where the ACT Rules Community Group publishes the context.
pub const ACT_CONTEXT_URL: &str = "https://act-rules.github.io/earl-context.json";

/// The ACT Rules EARL context.
///
/// Entries carrying `"@type": "@id"` or `"@reverse"` change how values are
/// resolved, so this table must stay in sync with the published context.
#[must_use]
pub fn act_context() -> Value {
    json!({
        "@vocab": "http://www.w3.org/ns/earl#",
        "earl": "http://www.w3.org/ns/earl#",
        "WCAG": "https://www.w3.org/TR/WCAG/#",
        "WCAG10": "https://www.w3.org/TR/WCAG10/#",
        "WCAG2": "https://www.w3.org/TR/WCAG2/#",
        "WCAG20": "https://www.w3.org/TR/WCAG20/#",
        "WCAG21": "https://www.w3.org/TR/WCAG21/#",
        "WCAG22": "https://www.w3.org/TR/WCAG22/#",
        "WCAG30": "https://www.w3.org/TR/wcag-3.0/#",
        "dct": "http://purl.org/dc/terms/",
        "sch": "https://schema.org/",
        "doap": "http://usefulinc.com/ns/doap#",
        "foaf": "http://xmlns.com/foaf/0.1/",
        "ptr": "http://www.w3.org/2009/pointers#",
        "cnt": "http://www.w3.org/2011/content#",
        "http-vocab": "http://www.w3.org/2011/http#",
        "WebPage": "sch:WebPage",
        "url": "dct:source",
        "source": "dct:source",
        "redirectedTo": "dct:source",
        "title": "dct:title",
        "Project": "doap:Project",
        "Version": "doap:Version",
        "name": "doap:name",
        "description": "doap:description",
        "shortdesc": "doap:shortdesc",
        "created": "doap:created",
        "release": "doap:release",
        "revision": "doap:revision",
        "homepage": {
            "@id": "doap:homepage",
            "@type": "@id"
        },
        "license": {
            "@id": "doap:license",
            "@type": "@id"
        },
        "assertedThat": {
            "@reverse": "assertedBy"
        },
        "assertions": {
            "@reverse": "subject"
        },
        "assertedBy": {
            "@type": "@id"
        },
        "outcome": {
            "@type": "@id"
        },
        "mode": {
            "@type": "@id"
        },
        "pointer": {
            "@type": "ptr:CSSSelectorPointer"
        },
        "isPartOf": {
            "@id": "dct:isPartOf",
            "@type": "@id"
        }
    })
}

/// How a term coerces string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMapping {
    /// `"@type": "@id"`: strings are IRIs, resolved against prefixes.
    Id,
    /// `"@type": "@vocab"`: strings are IRIs, resolved against terms and `@vocab`.
    Vocab,
    /// Strings are literals of this datatype IRI.
    Datatype(String),
}

/// A resolved term definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinition {
    /// Absolute IRI the term maps to.
    pub iri: String,
    /// Whether the term names the reverse of `iri`.
    pub reverse: bool,
    /// Value coercion, if any.
    pub type_mapping: Option<TypeMapping>,
    /// Whether the term may be used as the prefix of a compact IRI.
    pub prefix: bool,
}

/// A parsed JSON-LD context.
#[derive(Debug, Clone)]
pub struct Context {
    source: Value,
    vocab: Option<String>,
    terms: BTreeMap<String, TermDefinition>,
}

impl Context {
    /// The embedded ACT Rules context.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded table is malformed.
    pub fn act() -> Result<Self, JsonLdError> {
        Self::parse(&act_context())
    }

    /// Parses a local context object.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError::RemoteContext`] if the context is (or contains)
    /// a URL, and [`JsonLdError::InvalidContext`] if a term cannot be resolved.
    pub fn parse(source: &Value) -> Result<Self, JsonLdError> {
        let raw = match source {
            Value::Object(map) => map,
            Value::String(url) => return Err(JsonLdError::RemoteContext(url.clone())),
            other => {
                return Err(JsonLdError::InvalidContext(format!(
                    "expected an object, found {other}"
                )))
            }
        };

        let vocab = match raw.get("@vocab") {
            None | Some(Value::Null) => None,
            Some(Value::String(v)) => Some(v.clone()),
            Some(other) => {
                return Err(JsonLdError::InvalidContext(format!("@vocab must be a string, found {other}")))
            }
        };

        let mut resolver = Resolver {
            raw,
            vocab: vocab.as_deref(),
            defined: BTreeMap::new(),
            active: BTreeSet::new(),
        };
        for term in raw.keys().filter(|k| !k.starts_with('@')) {
            resolver.define(term)?;
        }
        let terms = resolver.defined;

        Ok(Self {
            source: source.clone(),
            vocab,
            terms,
        })
    }

    /// The context as it appears in the `@context` of compacted output.
    #[must_use]
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// The `@vocab` mapping.
    #[must_use]
    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }

    /// The definition of `term`.
    #[must_use]
    pub fn term(&self, term: &str) -> Option<&TermDefinition> {
        self.terms.get(term)
    }

    /// All term definitions, ordered by term.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &TermDefinition)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Expands a term, compact IRI, or IRI to an absolute IRI.
    ///
    /// With `vocab`, terms and `@vocab` apply (property and type position);
    /// without, only prefixes do (`@id` position). Values that cannot be
    /// expanded are returned unchanged.
    #[must_use]
    pub fn expand_iri(&self, value: &str, vocab: bool) -> String {
        if value.starts_with('@') {
            return value.to_owned();
        }
        if vocab {
            if let Some(def) = self.terms.get(value).filter(|d| !d.reverse) {
                return def.iri.clone();
            }
        }
        if let Some((prefix, suffix)) = value.split_once(':') {
            if prefix == "_" || suffix.starts_with("//") {
                return value.to_owned();
            }
            return match self.terms.get(prefix).filter(|d| !d.reverse) {
                Some(def) => format!("{}{suffix}", def.iri),
                None => value.to_owned(),
            };
        }
        match (&self.vocab, vocab) {
            (Some(base), true) => format!("{base}{value}"),
            _ => value.to_owned(),
        }
    }
}

/// Returns true for IRIs that compact IRIs may be built on.
fn ends_with_gen_delim(iri: &str) -> bool {
    iri.ends_with([':', '/', '?', '#', '[', ']', '@'])
}

struct Resolver<'a> {
    raw: &'a Map<String, Value>,
    vocab: Option<&'a str>,
    defined: BTreeMap<String, TermDefinition>,
    active: BTreeSet<String>,
}

impl Resolver<'_> {
    fn define(&mut self, term: &str) -> Result<(), JsonLdError> {
        if self.defined.contains_key(term) {
            return Ok(());
        }
        if !self.active.insert(term.to_owned()) {
            return Err(JsonLdError::InvalidContext(format!(
                "cyclic definition of term {term:?}"
            )));
        }

        let definition = match self.raw.get(term) {
            Some(Value::String(iri)) => {
                let iri = self.resolve(term, iri)?;
                TermDefinition {
                    prefix: ends_with_gen_delim(&iri),
                    iri,
                    reverse: false,
                    type_mapping: None,
                }
            }
            Some(Value::Object(def)) => {
                let (iri, reverse) = match (def.get("@id"), def.get("@reverse")) {
                    (_, Some(Value::String(rev))) => (self.resolve(term, rev)?, true),
                    (Some(Value::String(id)), None) => (self.resolve(term, id)?, false),
                    (None, None) => (self.resolve(term, term)?, false),
                    _ => {
                        return Err(JsonLdError::InvalidContext(format!(
                            "term {term:?} has a non-string @id or @reverse"
                        )))
                    }
                };
                let type_mapping = match def.get("@type") {
                    None => None,
                    Some(Value::String(t)) if t == "@id" => Some(TypeMapping::Id),
                    Some(Value::String(t)) if t == "@vocab" => Some(TypeMapping::Vocab),
                    Some(Value::String(t)) => Some(TypeMapping::Datatype(self.resolve(term, t)?)),
                    Some(other) => {
                        return Err(JsonLdError::InvalidContext(format!(
                            "term {term:?} has invalid @type {other}"
                        )))
                    }
                };
                TermDefinition {
                    iri,
                    reverse,
                    type_mapping,
                    prefix: false,
                }
            }
            Some(other) => {
                return Err(JsonLdError::InvalidContext(format!(
                    "term {term:?} has invalid definition {other}"
                )))
            }
            None => {
                return Err(JsonLdError::InvalidContext(format!("undefined term {term:?}")));
            }
        };

        self.active.remove(term);
        self.defined.insert(term.to_owned(), definition);
        Ok(())
    }

    /// Resolves `value` appearing in the definition of `term`.
    fn resolve(&mut self, term: &str, value: &str) -> Result<String, JsonLdError> {
        if let Some((prefix, suffix)) = value.split_once(':') {
            if prefix != term && !suffix.starts_with("//") && self.raw.contains_key(prefix) {
                self.define(prefix)?;
                if let Some(def) = self.defined.get(prefix) {
                    return Ok(format!("{}{suffix}", def.iri));
                }
            }
            return Ok(value.to_owned());
        }
        if value != term && self.raw.contains_key(value) {
            self.define(value)?;
            if let Some(def) = self.defined.get(value) {
                return Ok(def.iri.clone());
            }
        }
        match self.vocab {
            Some(vocab) => Ok(format!("{vocab}{value}")),
            None => Err(JsonLdError::InvalidContext(format!(
                "term {term:?} maps to {value:?}, which is not an IRI and no @vocab is set"
            ))),
        }
    }
}
