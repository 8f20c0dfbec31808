//! JSON request dispatcher.
//!
//! A request body names an operation in `functionName` and carries its parameters:
//!
//! ```json
//! {
//!   "functionName": "generateRandomUniqueCombinations",
//!   "sample": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
//!   "combinationSize": 3,
//!   "amount": 5
//! }
//! ```
//!
//! Every request is answered with a status code (200, 400 or 500) and a JSON body. Failed
//! requests carry `{"error": "..."}`.

use combina_engine::{CombinationSampler, Population, SampleSeed};
use combina_properties::{
    enricher::DEFAULT_START_INDEX,
    property::{DEFAULT_POPULATION_SIZE, PropertyConfig},
    record::CombinationRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    operation::{self, OperationError},
    store::{BlobStore, StoreError},
};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

const ACTUAL_MODELS: &str = "actualModels";
const ANALYTICS: &str = "analytics";

fn model_path(model_type: &str, model: &str) -> String {
    format!("{model_type}/{model}.json")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub function_name: Option<String>,
    pub sample: Option<Vec<u32>>,
    #[serde(alias = "size")]
    pub combination_size: Option<usize>,
    pub amount: Option<usize>,
    pub start_index: Option<u64>,
    pub population_size: Option<u32>,
    pub seed: Option<SampleSeed>,
    pub model: Option<String>,
    pub model_type: Option<String>,
    pub data: Option<Value>,
    pub key_members: Option<Vec<Value>>,
    pub filters: Option<Vec<String>>,
}

impl DispatchRequest {
    fn config(&self) -> PropertyConfig {
        PropertyConfig {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
        }
    }

    fn sampler(&self) -> CombinationSampler {
        self.seed
            .map_or_else(CombinationSampler::new, CombinationSampler::with_seed)
    }
}

fn required<'a, T>(value: Option<&'a T>, name: &'static str) -> Result<&'a T, DispatchError>
where
    T: ?Sized,
{
    value.ok_or(DispatchError::MissingParameter { name })
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DispatchError {
    #[display("invalid JSON format: {_0}")]
    InvalidBody(serde_json::Error),
    #[display("missing required parameter '{name}'")]
    MissingParameter { name: &'static str },
    #[display("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[display("unknown functionName '{name}'")]
    UnknownFunction { name: String },
    #[display("model '{path}' not found")]
    ModelNotFound { path: String },
    #[display("model '{path}' has an unexpected shape: {reason}")]
    MalformedModel { path: String, reason: String },
    #[display("{_0}")]
    #[from]
    Operation(OperationError),
    #[display("{_0}")]
    #[from]
    Store(StoreError),
}

impl DispatchError {
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidBody(_)
            | Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::UnknownFunction { .. }
            | Self::ModelNotFound { .. }
            | Self::Store(StoreError::InvalidPath { .. }) => STATUS_BAD_REQUEST,
            Self::Operation(e) if e.is_input_error() => STATUS_BAD_REQUEST,
            Self::Operation(_) | Self::MalformedModel { .. } | Self::Store(_) => {
                STATUS_INTERNAL_ERROR
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: Value,
}

impl DispatchResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: STATUS_OK,
            body,
        }
    }

    fn error(error: &DispatchError) -> Self {
        Self {
            status: error.status(),
            body: json!({ "error": error.to_string() }),
        }
    }
}

/// Routes requests to the core operations and the blob store.
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: S,
}

impl<S> Dispatcher<S>
where
    S: BlobStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decodes a raw request body and handles it.
    pub fn handle_body(&mut self, body: &str) -> DispatchResponse {
        match serde_json::from_str(body) {
            Ok(request) => self.handle(&request),
            Err(e) => DispatchResponse::error(&DispatchError::InvalidBody(e)),
        }
    }

    pub fn handle(&mut self, request: &DispatchRequest) -> DispatchResponse {
        match self.dispatch(request) {
            Ok(body) => DispatchResponse::ok(body),
            Err(e) => {
                log::warn!("Request failed with status {}: {e}", e.status());
                DispatchResponse::error(&e)
            }
        }
    }

    fn dispatch(&mut self, request: &DispatchRequest) -> Result<Value, DispatchError> {
        let function_name = required(request.function_name.as_deref(), "functionName")?;
        log::info!("Dispatching {function_name}");
        match function_name {
            "generateAllPossibleCombinations" => {
                let (population, size) = Self::combination_params(request)?;
                let records = operation::generate_all(&population, size, &request.config())?;
                Ok(json!({ "combinations": records }))
            }
            "generateRandomCombinations" => {
                let (population, size) = Self::combination_params(request)?;
                let mut sampler = request.sampler();
                let records = operation::generate_random(
                    &population,
                    size,
                    request.amount.unwrap_or(1),
                    request.start_index.unwrap_or(DEFAULT_START_INDEX),
                    &request.config(),
                    &mut sampler,
                )?;
                Ok(json!({ "combinations": records, "seed": sampler.seed() }))
            }
            "generateRandomUniqueCombinations" => {
                let (population, size) = Self::combination_params(request)?;
                let mut sampler = request.sampler();
                let records = operation::generate_random_unique(
                    &population,
                    size,
                    request.amount.unwrap_or(1),
                    request.start_index.unwrap_or(DEFAULT_START_INDEX),
                    &request.config(),
                    &mut sampler,
                )?;
                Ok(json!({ "combinations": records, "seed": sampler.seed() }))
            }
            "generatePopulation" => {
                let size = *required(request.combination_size.as_ref(), "size")?;
                let size = u32::try_from(size).map_err(|e| DispatchError::InvalidParameter {
                    name: "size",
                    reason: e.to_string(),
                })?;
                Ok(json!({ "population": Population::range(size) }))
            }
            "UploadModel" => self.upload_model(request, "uploaded"),
            "OverwriteModel" => self.upload_model(request, "overwritten"),
            "AddCombin" => self.add_combinations(request),
            "refreshAnalytics" => self.refresh_analytics(request),
            name => Err(DispatchError::UnknownFunction {
                name: name.to_owned(),
            }),
        }
    }

    fn combination_params(request: &DispatchRequest) -> Result<(Population, usize), DispatchError> {
        let sample = required(request.sample.as_ref(), "sample")?;
        let size = *required(request.combination_size.as_ref(), "combinationSize")?;
        Ok((Population::new(sample.clone()), size))
    }

    fn upload_model(
        &mut self,
        request: &DispatchRequest,
        verb: &str,
    ) -> Result<Value, DispatchError> {
        let model_type = required(request.model_type.as_deref(), "modelType")?;
        let model = required(request.model.as_deref(), "model")?;
        let data = required(request.data.as_ref(), "data")?;
        let path = model_path(model_type, model);
        self.store.put(&path, data)?;
        Ok(json!({
            "message": format!("Model {verb} successfully"),
            "result": {
                "status": "success",
                "message": format!("Model {model} of type {model_type} {verb} successfully to {path}."),
            },
        }))
    }

    /// Appends `data` (one record or a list of records) to the stored collection.
    fn add_combinations(&mut self, request: &DispatchRequest) -> Result<Value, DispatchError> {
        let model = required(request.model.as_deref(), "model")?;
        let data = required(request.data.as_ref(), "data")?;
        let path = model_path(ACTUAL_MODELS, model);
        let mut collection = match self.store.get(&path)? {
            Some(Value::Array(collection)) => collection,
            Some(other) => {
                return Err(DispatchError::MalformedModel {
                    path,
                    reason: format!("expected an array, found {other}"),
                });
            }
            None => vec![],
        };
        let before = collection.len();
        match data {
            Value::Array(items) => collection.extend(items.iter().cloned()),
            item => collection.push(item.clone()),
        }
        log::info!(
            "Appending {} entries to {path} ({before} existing)",
            collection.len() - before
        );
        self.store.put(&path, &Value::Array(collection))?;
        Ok(json!({
            "message": "Combination(s) added successfully",
            "result": {
                "status": "success",
                "message": format!("Data appended to model {model} successfully."),
            },
        }))
    }

    fn refresh_analytics(&mut self, request: &DispatchRequest) -> Result<Value, DispatchError> {
        let key_members = required(request.key_members.as_ref(), "keyMembers")?
            .iter()
            .map(|member| match member {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>();
        let filters = required(request.filters.as_ref(), "filters")?;

        let records: Vec<CombinationRecord> = match (&request.data, &request.model) {
            (Some(data), _) => Vec::deserialize(data).map_err(|e| {
                DispatchError::InvalidParameter {
                    name: "data",
                    reason: e.to_string(),
                }
            })?,
            (None, Some(model)) => {
                let path = model_path(ACTUAL_MODELS, model);
                let Some(stored) = self.store.get(&path)? else {
                    return Err(DispatchError::ModelNotFound { path });
                };
                Vec::deserialize(stored).map_err(|e| DispatchError::MalformedModel {
                    path,
                    reason: e.to_string(),
                })?
            }
            (None, None) => return Err(DispatchError::MissingParameter { name: "data" }),
        };

        let report = operation::refresh_analytics(&records, &key_members, filters)?;
        let report = serde_json::to_value(&report).map_err(|e| DispatchError::MalformedModel {
            path: ANALYTICS.to_owned(),
            reason: e.to_string(),
        })?;
        if let Some(model) = &request.model {
            self.store.put(&model_path(ANALYTICS, model), &report)?;
        }
        Ok(json!({ "analytics": report }))
    }
}
