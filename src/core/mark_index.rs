use crate::domain::model::{Element, MarkParameter, MarkReport, ReportLine};
use crate::domain::ports::UnsetMarkPolicy;
use crate::utils::error::{MarkError, Result};
use std::collections::BTreeMap;

/// Elements grouped by their exact Mark value.
///
/// Keys are compared case-sensitively with no normalization. `BTreeMap<String, _>`
/// orders keys byte-wise, which for UTF-8 is code-point order, so iteration is
/// the ordinal report order without a separate sort.
#[derive(Debug, Clone, Default)]
pub struct MarkIndex<'a> {
    groups: BTreeMap<String, Vec<&'a Element>>,
    total: usize,
}

impl<'a> MarkIndex<'a> {
    pub fn build<I>(elements: I, policy: UnsetMarkPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut groups: BTreeMap<String, Vec<&'a Element>> = BTreeMap::new();
        let mut total = 0;

        for element in elements {
            let key = mark_key(element, policy)?;
            match groups.get_mut(key) {
                Some(group) => group.push(element),
                None => {
                    groups.insert(key.to_string(), vec![element]);
                }
            }
            total += 1;
        }

        Ok(Self { groups, total })
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Members of one group in the order they were seen.
    pub fn group(&self, mark: &str) -> Option<&[&'a Element]> {
        self.groups.get(mark).map(Vec::as_slice)
    }

    /// Distinct marks, strictly ascending.
    pub fn sorted_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[&'a Element])> {
        self.groups
            .iter()
            .map(|(mark, members)| (mark.as_str(), members.as_slice()))
    }

    /// `None` for an empty input: nothing is reported, not even a zero summary.
    pub fn report(&self) -> Option<MarkReport> {
        if self.is_empty() {
            return None;
        }

        let lines = self
            .groups()
            .map(|(mark, members)| ReportLine {
                mark: mark.to_string(),
                count: members.len(),
            })
            .collect();

        Some(MarkReport {
            total_elements: self.total,
            lines,
        })
    }
}

fn mark_key(element: &Element, policy: UnsetMarkPolicy) -> Result<&str> {
    match &element.mark {
        MarkParameter::Value(mark) => Ok(mark.as_str()),
        MarkParameter::Unset => match policy {
            UnsetMarkPolicy::Empty => Ok(""),
            UnsetMarkPolicy::Reject => Err(MarkError::MissingMarkValue { id: element.id }),
        },
        MarkParameter::Absent => Err(MarkError::MarkAttributeMissing { id: element.id }),
    }
}
