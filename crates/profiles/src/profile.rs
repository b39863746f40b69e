use crate::error::{ProfileDefect, ProfileError};
use core_types::MetricSnapshot;
use criteria::{Criterion, Predicate};
use std::fmt;
use std::sync::Arc;

/// A named criterion bound to the predicate that decides it.
#[derive(Clone)]
pub struct CriterionBinding {
    name: String,
    predicate: Arc<dyn Predicate>,
}

impl CriterionBinding {
    pub fn new(name: impl Into<String>, predicate: impl Predicate + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> String {
        self.predicate.describe()
    }

    pub fn test(&self, snapshot: &MetricSnapshot) -> bool {
        self.predicate.test(snapshot)
    }
}

impl From<Criterion> for CriterionBinding {
    fn from(criterion: Criterion) -> Self {
        Self::new(criterion.kind().name(), criterion)
    }
}

impl fmt::Debug for CriterionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriterionBinding")
            .field("name", &self.name)
            .field("rule", &self.predicate.describe())
            .finish()
    }
}

/// An investing philosophy expressed as data: an ordered list of criteria and
/// the number of them that must pass.
///
/// A profile can be assembled in an invalid state; [`InvestorProfile::validate`]
/// is checked by the registry at registration and by the engine on every call.
#[derive(Debug, Clone)]
pub struct InvestorProfile {
    name: String,
    description: Option<String>,
    criteria: Vec<CriterionBinding>,
    pass_threshold: usize,
}

impl InvestorProfile {
    /// Starts a profile with no criteria.
    pub fn new(name: impl Into<String>, pass_threshold: usize) -> Self {
        Self {
            name: name.into(),
            description: None,
            criteria: Vec::new(),
            pass_threshold,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a criterion. Declaration order is report order.
    pub fn with_criterion(mut self, binding: impl Into<CriterionBinding>) -> Self {
        self.criteria.push(binding.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn criteria(&self) -> &[CriterionBinding] {
        &self.criteria
    }

    pub fn pass_threshold(&self) -> usize {
        self.pass_threshold
    }

    pub fn defect(&self) -> Option<ProfileDefect> {
        if self.criteria.is_empty() {
            return Some(ProfileDefect::EmptyCriteria);
        }
        if self.pass_threshold > self.criteria.len() {
            return Some(ProfileDefect::ThresholdOutOfRange {
                pass_threshold: self.pass_threshold,
                total: self.criteria.len(),
            });
        }
        None
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        match self.defect() {
            Some(defect) => Err(ProfileError::Invalid {
                profile: self.name.clone(),
                defect,
            }),
            None => Ok(()),
        }
    }
}
