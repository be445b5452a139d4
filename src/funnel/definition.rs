use serde::{Deserialize, Serialize};

/// One funnel step: a count of leads under a display label.
///
/// `key` identifies the stage within its set; `name` is what the chart shows and
/// what edges join on. Values are not validated: zero, negative and NaN counts
/// flow through the builder unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub key: String,
    pub value: f64,
    pub name: String,
}

impl Stage {
    pub fn new(key: impl Into<String>, value: f64, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            name: name.into(),
        }
    }
}

/// An ordered sequence of stages. Position in the list is funnel order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageSet {
    stages: Vec<Stage>,
}

impl StageSet {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Builds a set from `(key, value, name)` triples, keeping their order.
    pub fn from_triples<K, N>(triples: impl IntoIterator<Item = (K, f64, N)>) -> Self
    where
        K: Into<String>,
        N: Into<String>,
    {
        Self {
            stages: triples
                .into_iter()
                .map(|(key, value, name)| Stage::new(key, value, name))
                .collect(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    pub fn first(&self) -> Option<&Stage> {
        self.stages.first()
    }

    pub fn last(&self) -> Option<&Stage> {
        self.stages.last()
    }

    /// Looks a stage up by its key.
    pub fn get(&self, key: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.key == key)
    }

    pub fn into_inner(self) -> Vec<Stage> {
        self.stages
    }
}

impl From<Vec<Stage>> for StageSet {
    fn from(stages: Vec<Stage>) -> Self {
        Self::new(stages)
    }
}

impl FromIterator<Stage> for StageSet {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StageSet {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}
