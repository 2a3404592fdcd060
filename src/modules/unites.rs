use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::base::client::AurionClient;
use crate::utils::constants::Field;
use crate::utils::xml::Element;
use crate::Error;

/// An Unite can be a subject or a set of subjects chosen for their coherence in this set. <br>
/// Aurion only knows the `code` and the `label`, the other fields are filled by other sources
/// (e.g. a timetable) and stay [None] here
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Unite {
    pub code: String,
    pub label: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub branch: Option<String>,
}

impl Unite {
    /// Length of the prefix put in front of every code by Aurion (e.g. `E1_`)
    const CODE_PREFIX_LEN: usize = 3;

    pub fn new(code: String, label: Option<String>) -> Self {
        Self { code, label, ..Default::default() }
    }

    /// Builds an [Unite] from a `row` of the units favorite
    pub fn from_row(row: &Element) -> Result<Self, Error> {
        let code = row.field(Field::UNITE_CODE)?.chars().skip(Self::CODE_PREFIX_LEN).collect::<String>();
        let label = row.optional_field(Field::UNITE_LABEL).map(|label| label.trim().to_string());

        Ok(Self::new(code, label))
    }

    /// Sets the label of this unit from a map produced by [labels_by_code] if it has none yet
    pub fn with_label_from(mut self, labels: &HashMap<String, String>) -> Self {
        if self.label.is_none() {
            self.label = labels.get(&self.code).cloned();
        }
        self
    }
}

/// Maps the code of every labelled unit to its label. The first occurrence of a code wins
pub fn labels_by_code(unites: &[Unite]) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for unite in unites {
        if let Some(label) = &unite.label {
            labels.entry(unite.code.clone()).or_insert_with(|| label.clone());
        }
    }
    labels
}

/// Reads every unit of a response, in document order
pub fn parse_unites(root: &Element) -> Result<Vec<Unite>, Error> {
    root.rows().into_iter().map(Unite::from_row).collect()
}

impl AurionClient {
    /// Extracts the units with their code and full description
    pub async fn get_unites(&self) -> Result<Vec<Unite>, Error> {
        let root = self.send_request(self.favorites().unites).await?;
        let unites = parse_unites(&root)?;
        debug!("Got {} unites from Aurion", unites.len());
        Ok(unites)
    }
}
