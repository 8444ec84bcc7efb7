//! An in-memory store of formulas.

use crate::error::{EmptyFormula, Error, FormulaNotFound, InvalidAuthor, MissingField};
use std::{collections::BTreeMap, time::SystemTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ID of a stored formula. IDs start at 1 and are never reused.
pub type FormulaId = u64;

/// A stored formula.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormulaRecord {
    /// The ID of the formula.
    pub id: FormulaId,

    /// The formula, written in LaTeX.
    pub latex: String,

    /// The ID of the user who added the formula.
    pub author_id: u64,

    /// A short name for the formula, such as "mass-energy equivalence".
    pub legend: String,

    /// What the formula describes.
    pub description: String,

    /// When the formula was added.
    pub created_at: SystemTime,

    /// When the formula was last changed.
    pub updated_at: SystemTime,
}

/// The fields needed to add a formula to a [`FormulaStore`].
///
/// The legend and description are optional here so that a missing one can be reported, but
/// [`FormulaStore::create`] requires both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFormula {
    /// The formula, written in LaTeX.
    pub latex: String,

    /// The ID of the user adding the formula. Must be positive.
    pub author_id: i64,

    pub legend: Option<String>,
    pub description: Option<String>,
}

impl NewFormula {
    /// Creates a new formula by the given author, without a legend or description.
    pub fn new(latex: impl Into<String>, author_id: i64) -> Self {
        Self { latex: latex.into(), author_id, legend: None, description: None }
    }

    /// Sets the legend.
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Changes to a stored formula. The formula itself is always replaced; the legend and
/// description are only changed if given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaUpdate {
    pub latex: String,
    pub legend: Option<String>,
    pub description: Option<String>,
}

impl FormulaUpdate {
    /// Replaces the formula, keeping the legend and description.
    pub fn new(latex: impl Into<String>) -> Self {
        Self { latex: latex.into(), legend: None, description: None }
    }

    /// Also replaces the legend.
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Also replaces the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Returns the field's value, or a [`MissingField`] error if it is absent or blank.
fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::spanless(MissingField { field })),
    }
}

/// Returns an [`EmptyFormula`] error if the formula is blank.
fn non_empty(latex: String) -> Result<String, Error> {
    if latex.trim().is_empty() {
        Err(Error::spanless(EmptyFormula))
    } else {
        Ok(latex)
    }
}

/// Formulas keyed by their IDs.
///
/// The store does not parse the formulas it holds. A formula that cannot be parsed is kept, and
/// skipped when searching.
#[derive(Debug, Clone)]
pub struct FormulaStore {
    records: BTreeMap<FormulaId, FormulaRecord>,
    next_id: FormulaId,
}

impl Default for FormulaStore {
    fn default() -> Self {
        Self { records: BTreeMap::new(), next_id: 1 }
    }
}

impl FormulaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a formula to the store, returning the stored record.
    pub fn create(&mut self, new: NewFormula) -> Result<&FormulaRecord, Error> {
        let latex = non_empty(new.latex)?;
        let legend = required(new.legend, "legend")?;
        let description = required(new.description, "description")?;
        let author_id = u64::try_from(new.author_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| Error::spanless(InvalidAuthor { author_id: new.author_id }))?;

        let id = self.next_id;
        self.next_id += 1;

        let now = SystemTime::now();
        let record = FormulaRecord {
            id,
            latex,
            author_id,
            legend,
            description,
            created_at: now,
            updated_at: now,
        };
        Ok(&*self.records.entry(id).or_insert(record))
    }

    /// Replaces the formula with the given ID, and its legend and description if given.
    pub fn update(&mut self, id: FormulaId, update: FormulaUpdate) -> Result<&FormulaRecord, Error> {
        let latex = non_empty(update.latex)?;
        let record = self.records.get_mut(&id)
            .ok_or_else(|| Error::spanless(FormulaNotFound { id }))?;

        record.latex = latex;
        if let Some(legend) = update.legend {
            record.legend = legend;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        record.updated_at = SystemTime::now().max(record.created_at);
        Ok(&*record)
    }

    /// Removes the formula with the given ID, returning it.
    pub fn delete(&mut self, id: FormulaId) -> Result<FormulaRecord, Error> {
        self.records.remove(&id)
            .ok_or_else(|| Error::spanless(FormulaNotFound { id }))
    }

    /// Returns the formula with the given ID.
    pub fn get(&self, id: FormulaId) -> Option<&FormulaRecord> {
        self.records.get(&id)
    }

    /// Iterates over the stored formulas in order of ID.
    pub fn list(&self) -> impl Iterator<Item = &FormulaRecord> {
        self.records.values()
    }

    /// Returns the number of stored formulas.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn energy() -> NewFormula {
        NewFormula::new("E = m c^2", 7)
            .with_legend("energy")
            .with_description("mass-energy equivalence")
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut store = FormulaStore::new();
        assert_eq!(store.create(energy()).unwrap().id, 1);
        assert_eq!(store.create(energy()).unwrap().id, 2);
        store.delete(2).unwrap();
        assert_eq!(store.create(energy()).unwrap().id, 3);

        let record = store.get(1).unwrap();
        assert_eq!(record.latex, "E = m c^2");
        assert_eq!(record.author_id, 7);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(store.list().map(|record| record.id).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn create_requires_legend_and_description() {
        let mut store = FormulaStore::new();
        let err = store.create(NewFormula::new("x", 1).with_description("d")).unwrap_err();
        assert_eq!(err.downcast_ref::<MissingField>(), Some(&MissingField { field: "legend" }));

        let err = store.create(NewFormula::new("x", 1).with_legend("l").with_description("  ")).unwrap_err();
        assert_eq!(err.to_string(), "`description` is required to create a formula");
        assert!(store.is_empty());
    }

    #[test]
    fn create_validates_author_and_formula() {
        let mut store = FormulaStore::new();
        let err = store.create(NewFormula { author_id: 0, ..energy() }).unwrap_err();
        assert!(err.is::<InvalidAuthor>());
        let err = store.create(NewFormula { author_id: -3, ..energy() }).unwrap_err();
        assert_eq!(err.to_string(), "`-3` is not a valid author ID");
        let err = store.create(NewFormula { latex: " ".to_string(), ..energy() }).unwrap_err();
        assert!(err.is::<EmptyFormula>());
    }

    #[test]
    fn update_replaces_formula_and_given_fields() {
        let mut store = FormulaStore::new();
        store.create(energy()).unwrap();

        let record = store.update(1, FormulaUpdate::new("E^2 = (pc)^2 + (m c^2)^2")).unwrap();
        assert_eq!(record.latex, "E^2 = (pc)^2 + (m c^2)^2");
        assert_eq!(record.legend, "energy");
        assert!(record.updated_at >= record.created_at);

        let record = store.update(1, FormulaUpdate::new("E = h f").with_legend("photon energy")).unwrap();
        assert_eq!(record.legend, "photon energy");
        assert_eq!(record.description, "mass-energy equivalence");
    }

    #[test]
    fn unknown_ids() {
        let mut store = FormulaStore::new();
        let err = store.update(4, FormulaUpdate::new("x")).unwrap_err();
        assert_eq!(err.downcast_ref::<FormulaNotFound>(), Some(&FormulaNotFound { id: 4 }));
        let err = store.delete(4).unwrap_err();
        assert_eq!(err.to_string(), "no formula with ID 4");
        assert!(store.get(4).is_none());
    }
}
