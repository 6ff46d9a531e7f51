use super::dependency_model::DependencyModel;

/// Identifies a dependency model by provider type and model id, without the
/// target framework. Used for removals and for child links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    pub provider_type: String,
    pub model_id: String,
}

impl ModelRef {
    pub fn new(provider_type: &str, model_id: &str) -> Self {
        Self {
            provider_type: provider_type.to_string(),
            model_id: model_id.to_string(),
        }
    }

    fn matches(&self, provider_type: &str, model_id: &str) -> bool {
        self.provider_type.eq_ignore_ascii_case(provider_type)
            && self.model_id.eq_ignore_ascii_case(model_id)
    }
}

/// One batch of added/updated models and removed references for a single
/// target framework.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependenciesChanges {
    added: Vec<DependencyModel>,
    removed: Vec<ModelRef>,
}

impl DependenciesChanges {
    pub fn added(&self) -> &[DependencyModel] {
        &self.added
    }

    pub fn removed(&self) -> &[ModelRef] {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Accumulates changes for one batch. A later add or remove of the same
/// `(provider type, model id)` replaces the earlier one.
#[derive(Debug, Default)]
pub struct DependenciesChangesBuilder {
    added: Vec<DependencyModel>,
    removed: Vec<ModelRef>,
}

impl DependenciesChangesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&mut self, model: DependencyModel) -> &mut Self {
        match self
            .added
            .iter_mut()
            .find(|m| m.model_ref().matches(&model.provider_type, &model.id))
        {
            Some(existing) => *existing = model,
            None => self.added.push(model),
        }
        self
    }

    pub fn removed(&mut self, provider_type: &str, model_id: &str) -> &mut Self {
        if !self
            .removed
            .iter()
            .any(|r| r.matches(provider_type, model_id))
        {
            self.removed.push(ModelRef::new(provider_type, model_id));
        }
        self
    }

    /// Returns `None` when nothing was recorded, so callers can skip the update.
    pub fn try_build(self) -> Option<DependenciesChanges> {
        if self.added.is_empty() && self.removed.is_empty() {
            return None;
        }
        Some(DependenciesChanges {
            added: self.added,
            removed: self.removed,
        })
    }
}
