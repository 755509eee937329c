//! Portable form of a learner's tables and parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::params::SimulationParameters;
use super::state_key::StateKey;
use super::table::{ActionValueTable, ActionValues};
use crate::agent::Action;
use crate::error::SnapshotError;

/// Tables of both fighters plus the parameter set they were trained with.
///
/// Serialized as
/// `{"qTables": [{"<key>": [8 values], …}, {…}], "parameters": {…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerSnapshot {
    pub q_tables: Vec<BTreeMap<String, Vec<f64>>>,
    pub parameters: SimulationParameters,
}

impl LearnerSnapshot {
    pub(crate) fn capture(tables: &[ActionValueTable], parameters: SimulationParameters) -> Self {
        let q_tables = tables
            .iter()
            .map(|table| {
                table
                    .iter()
                    .map(|(key, values)| (key.as_str().to_string(), values.to_vec()))
                    .collect()
            })
            .collect();
        Self {
            q_tables,
            parameters,
        }
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks the shape and parameters, then builds `N` tables.
    pub(crate) fn into_tables<const N: usize>(
        self,
    ) -> Result<([ActionValueTable; N], SimulationParameters), SnapshotError> {
        self.parameters.validate()?;
        if self.q_tables.len() != N {
            return Err(SnapshotError::TableCount {
                expected: N,
                found: self.q_tables.len(),
            });
        }

        let mut tables: [ActionValueTable; N] = std::array::from_fn(|_| ActionValueTable::new());
        for (agent, rows) in self.q_tables.into_iter().enumerate() {
            for (key, values) in rows {
                let row: ActionValues =
                    values
                        .as_slice()
                        .try_into()
                        .map_err(|_| SnapshotError::RowWidth {
                            agent,
                            key: key.clone(),
                            expected: Action::COUNT,
                            found: values.len(),
                        })?;
                tables[agent].insert(StateKey::from(key), row);
            }
        }
        Ok((tables, self.parameters))
    }
}
