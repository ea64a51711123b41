//! Duplicate-name resolution for record documents.
//!
//! Records sharing a `name` are grouped in document order. Every later member
//! of a group is diffed against the first one for review, then all members are
//! renamed with descending suffixes (`Fox.99`, `Fox.98`, ...). Resolution is a
//! pure in-memory pass over a [`Document`].

pub mod diff;
pub mod suffix;

use crate::document::{json_type_name, Document};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub use diff::{compare_records, FieldDiff};
pub use suffix::{marked_name, MAX_OCCURRENCES};

/// Key used to detect duplicates
pub const NAME_FIELD: &str = "name";

/// Positions of all records sharing one name, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameGroup {
    pub name: String,
    pub positions: Vec<usize>,
}

impl NameGroup {
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_duplicate(&self) -> bool {
        self.count() > 1
    }
}

/// Something the resolver observed or changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Finding {
    /// A record carries a `name` that is not a string and is left alone
    IgnoredName { index: usize, found: &'static str },
    DuplicateName { name: String, count: usize },
    /// Fields where occurrence `occurrence` (2-based) differs from the first one
    FieldDiffs {
        name: String,
        occurrence: usize,
        index: usize,
        diffs: Vec<FieldDiff>,
    },
    Renamed { index: usize, from: String, to: String },
}

/// Outcome of resolving one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub modified: bool,
    pub groups: Vec<NameGroup>,
    pub findings: Vec<Finding>,
}

impl Resolution {
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &NameGroup> + '_ {
        self.groups.iter().filter(|g| g.is_duplicate())
    }

    pub fn renamed_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Renamed { .. }))
            .count()
    }
}

/// Detects, diffs and renames duplicate names
#[derive(Debug, Default)]
pub struct DuplicateResolver;

impl DuplicateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Group records by name. Only non-empty string names take part.
    pub fn group_names(&self, document: &Document) -> (Vec<NameGroup>, Vec<Finding>) {
        let mut groups: Vec<NameGroup> = Vec::new();
        let mut lookup: HashMap<&str, usize> = HashMap::new();
        let mut ignored = Vec::new();

        for (index, record) in document.records() {
            match record.get(NAME_FIELD) {
                Some(Value::String(name)) if !name.is_empty() => {
                    match lookup.get(name.as_str()) {
                        Some(&slot) => groups[slot].positions.push(index),
                        None => {
                            lookup.insert(name.as_str(), groups.len());
                            groups.push(NameGroup {
                                name: name.clone(),
                                positions: vec![index],
                            });
                        }
                    }
                }
                Some(Value::String(_)) | Some(Value::Null) | None => {}
                // Only strings are grouped. Numbers, booleans, arrays and
                // objects are left as they are and surfaced as a finding.
                Some(other) => ignored.push(Finding::IgnoredName {
                    index,
                    found: json_type_name(other),
                }),
            }
        }

        (groups, ignored)
    }

    /// Report differences and rename every duplicated name in place.
    ///
    /// Fails without touching the document when a name occurs more often
    /// than there are suffixes for it.
    pub fn resolve(&self, document: &mut Document) -> Result<Resolution> {
        let (groups, mut findings) = self.group_names(document);

        if let Some(group) = groups.iter().find(|g| g.count() > MAX_OCCURRENCES) {
            return Err(Error::SuffixExhausted {
                name: group.name.clone(),
                count: group.count(),
                max: MAX_OCCURRENCES,
            });
        }

        let mut modified = false;

        for group in groups.iter().filter(|g| g.is_duplicate()) {
            debug!(
                "{}: '{}' occurs {} times",
                document.file_name(),
                group.name,
                group.count()
            );

            findings.push(Finding::DuplicateName {
                name: group.name.clone(),
                count: group.count(),
            });
            findings.extend(self.diff_group(document, group));

            for (ordinal, &index) in (1..).zip(&group.positions) {
                let Some(to) = marked_name(&group.name, ordinal) else {
                    continue;
                };
                let Some(slot) = document
                    .record_mut(index)
                    .and_then(|record| record.get_mut(NAME_FIELD))
                else {
                    continue;
                };

                *slot = Value::String(to.clone());
                modified = true;
                findings.push(Finding::Renamed {
                    index,
                    from: group.name.clone(),
                    to,
                });
            }
        }

        Ok(Resolution {
            modified,
            groups,
            findings,
        })
    }

    fn diff_group(&self, document: &Document, group: &NameGroup) -> Vec<Finding> {
        let Some(reference) = group
            .positions
            .first()
            .and_then(|&i| document.elements[i].as_object())
        else {
            return Vec::new();
        };

        (2..)
            .zip(group.positions.iter().skip(1))
            .filter_map(|(occurrence, &index)| {
                let compared = document.elements[index].as_object()?;
                let diffs = compare_records(reference, compared);
                (!diffs.is_empty()).then(|| Finding::FieldDiffs {
                    name: group.name.clone(),
                    occurrence,
                    index,
                    diffs,
                })
            })
            .collect()
    }
}
