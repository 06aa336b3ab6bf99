use std::collections::BTreeMap;

use crate::CompositeIndex;
use crate::interpretation::{Band, Interpretation};

/// An index defined entirely by a config weight table. Band descriptions
/// use construct-neutral wording.
pub struct ConfiguredIndex {
    id: String,
    weights: BTreeMap<String, f64>,
}

impl ConfiguredIndex {
    pub fn new(id: impl Into<String>, weights: BTreeMap<String, f64>) -> Self {
        Self {
            id: id.into(),
            weights,
        }
    }
}

impl CompositeIndex for ConfiguredIndex {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    fn describe(&self, band: Band) -> String {
        let midpoint = band.index() as f64 * 20.0 + 10.0;
        Interpretation::generic(midpoint, &self.id).description
    }
}
