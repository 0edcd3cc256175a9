use indexmap::IndexMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::{
    domain::{ModelName, Pollutant},
    error::{json_kind, ProtocolError},
};

/// Path of the prediction endpoint, relative to the service base URL.
pub const PREDICTION_PATH: &str = "get_prediction";

/// Body of `POST /get_prediction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub model: ModelName,
    /// `YYYY-MM-DD`, forwarded as typed; calendar validity is the service's concern.
    pub date: String,
}

impl PredictionRequest {
    pub fn new(model: ModelName, date: impl Into<String>) -> Self {
        Self {
            model,
            date: date.into(),
        }
    }
}

/// The six pollutant values of a prediction, numbers kept as the service wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantReadings {
    pm25: Number,
    pm10: Number,
    so2: Number,
    co: Number,
    o3: Number,
    no2: Number,
    fields: Map<String, Value>,
}

impl PollutantReadings {
    fn from_fields(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let number = |pollutant: Pollutant| match fields.get(pollutant.key()) {
            Some(Value::Number(value)) => Ok(value.clone()),
            Some(other) => Err(serde_json::Error::custom(format!(
                "pollutant `{pollutant}` must be a number, got {}",
                json_kind(other)
            ))),
            None => Err(serde_json::Error::custom(format!(
                "missing pollutant `{pollutant}`"
            ))),
        };
        Ok(Self {
            pm25: number(Pollutant::Pm25)?,
            pm10: number(Pollutant::Pm10)?,
            so2: number(Pollutant::So2)?,
            co: number(Pollutant::Co)?,
            o3: number(Pollutant::O3)?,
            no2: number(Pollutant::No2)?,
            fields,
        })
    }

    pub fn get(&self, pollutant: Pollutant) -> &Number {
        match pollutant {
            Pollutant::Pm25 => &self.pm25,
            Pollutant::Pm10 => &self.pm10,
            Pollutant::So2 => &self.so2,
            Pollutant::Co => &self.co,
            Pollutant::O3 => &self.o3,
            Pollutant::No2 => &self.no2,
        }
    }

    /// Readings in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, &Number)> + '_ {
        Pollutant::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Any key of the `prediction` object, pollutant or not.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// What the service returned for one model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    Failed {
        error: String,
    },
    Predicted {
        date: String,
        prediction: PollutantReadings,
    },
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Result<String, serde_json::Error> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(serde_json::Error::custom(format!(
            "`{key}` must be a string, got {}",
            json_kind(other)
        ))),
        None => Err(serde_json::Error::custom(format!("missing field `{key}`"))),
    }
}

/// One model's entry: the validated outcome plus the object exactly as received.
///
/// Serializes back to the received object, keys and number formatting intact.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    outcome: ModelOutcome,
    fields: Map<String, Value>,
}

impl ModelEntry {
    /// A non-null `error` key marks a failed entry; anything else must be a full prediction.
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let has_error = matches!(fields.get("error"), Some(error) if !error.is_null());
        let outcome = if has_error {
            ModelOutcome::Failed {
                error: string_field(&fields, "error")?,
            }
        } else {
            let prediction = match fields.get("prediction") {
                Some(Value::Object(readings)) => {
                    PollutantReadings::from_fields(readings.clone())?
                }
                Some(other) => {
                    return Err(serde_json::Error::custom(format!(
                        "`prediction` must be an object, got {}",
                        json_kind(other)
                    )))
                }
                None => return Err(serde_json::Error::custom("missing field `prediction`")),
            };
            ModelOutcome::Predicted {
                date: string_field(&fields, "date")?,
                prediction,
            }
        };
        Ok(Self { outcome, fields })
    }

    pub fn outcome(&self) -> &ModelOutcome {
        &self.outcome
    }

    /// The entry object as the service sent it.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for ModelEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModelEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

/// Per-model outcomes in the order the service listed them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult(IndexMap<String, ModelEntry>);

impl PredictionResult {
    /// Validates a raw response body against the documented shape.
    pub fn from_slice(raw: &[u8]) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_slice(raw).map_err(ProtocolError::InvalidJson)?;
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(ProtocolError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        let mut outcomes = IndexMap::with_capacity(entries.len());
        for (model, entry) in entries {
            let entry = ModelEntry::from_value(entry).map_err(|source| {
                ProtocolError::MalformedEntry {
                    model: model.clone(),
                    source,
                }
            })?;
            outcomes.insert(model, entry);
        }
        Ok(Self(outcomes))
    }

    pub fn get(&self, model: &str) -> Option<&ModelOutcome> {
        self.0.get(model).map(ModelEntry::outcome)
    }

    pub fn entry(&self, model: &str) -> Option<&ModelEntry> {
        self.0.get(model)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelOutcome)> {
        self.0
            .iter()
            .map(|(model, entry)| (model.as_str(), entry.outcome()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRU_BODY: &[u8] = br#"{"GRU":{"date":"2023-01-05","prediction":{"PM2.5":10,"PM10":20,"SO2":1,"CO":0.5,"O3":30,"NO2":15}}}"#;

    #[test]
    fn request_serializes_model_then_date() {
        let request = PredictionRequest::new(ModelName::Gru, "2023-01-05");
        assert_eq!(
            serde_json::to_string(&request).expect("json"),
            r#"{"model":"GRU","date":"2023-01-05"}"#
        );
    }

    #[test]
    fn parses_success_entry() {
        let result = PredictionResult::from_slice(GRU_BODY).expect("valid");
        let Some(ModelOutcome::Predicted { date, prediction }) = result.get("GRU") else {
            panic!("expected prediction");
        };
        assert_eq!(date, "2023-01-05");
        assert_eq!(prediction.get(Pollutant::Pm25).as_u64(), Some(10));
        assert_eq!(prediction.get(Pollutant::Co).as_f64(), Some(0.5));
        let keys: Vec<Pollutant> = prediction.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, Pollutant::ALL.to_vec());
    }

    #[test]
    fn parses_error_entry() {
        let raw = br#"{"LSTM":{"error":"No predictions found for 2030-01-01."}}"#;
        let result = PredictionResult::from_slice(raw).expect("valid");
        assert_eq!(
            result.get("LSTM"),
            Some(&ModelOutcome::Failed {
                error: "No predictions found for 2030-01-01.".to_string()
            })
        );
    }

    #[test]
    fn keeps_service_model_order() {
        let raw = br#"{
            "ReXNet": {"error": "x"},
            "CNN": {"error": "y"},
            "LSTM_Attention": {"error": "z"}
        }"#;
        let result = PredictionResult::from_slice(raw).expect("valid");
        let models: Vec<&str> = result.models().collect();
        assert_eq!(models, vec!["ReXNet", "CNN", "LSTM_Attention"]);
    }

    #[test]
    fn retains_unknown_prediction_keys() {
        let raw = br#"{"GRU":{"date":"2023-01-05","prediction":{"PM2.5":10,"PM10":20,"SO2":1,"CO":0.5,"O3":30,"NO2":15,"AQI":42}}}"#;
        let result = PredictionResult::from_slice(raw).expect("valid");
        let Some(ModelOutcome::Predicted { prediction, .. }) = result.get("GRU") else {
            panic!("expected prediction");
        };
        assert_eq!(prediction.field("AQI"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn rejects_non_object_body() {
        let err = PredictionResult::from_slice(b"[1,2]").expect_err("array");
        assert!(matches!(err, ProtocolError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn rejects_missing_pollutant_and_names_the_model() {
        let raw = br#"{"GRU":{"date":"2023-01-05","prediction":{"PM2.5":10}}}"#;
        let err = PredictionResult::from_slice(raw).expect_err("missing keys");
        match err {
            ProtocolError::MalformedEntry { model, source } => {
                assert_eq!(model, "GRU");
                assert!(source.to_string().contains("PM10"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_numeric_pollutant() {
        let raw = br#"{"GRU":{"date":"2023-01-05","prediction":{"PM2.5":"10","PM10":20,"SO2":1,"CO":0.5,"O3":30,"NO2":15}}}"#;
        let err = PredictionResult::from_slice(raw).expect_err("string reading");
        assert!(matches!(err, ProtocolError::MalformedEntry { .. }));
    }

    #[test]
    fn rejects_entry_that_is_not_an_object() {
        let err =
            PredictionResult::from_slice(br#"{"GRU":"oops"}"#).expect_err("string entry");
        assert!(matches!(err, ProtocolError::MalformedEntry { model, .. } if model == "GRU"));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = PredictionResult::from_slice(b"<html>").expect_err("html");
        assert!(matches!(err, ProtocolError::InvalidJson(_)));
    }

    #[test]
    fn null_error_is_treated_as_absent() {
        let raw = br#"{"GRU":{"error":null,"date":"2023-01-05","prediction":{"PM2.5":10,"PM10":20,"SO2":1,"CO":0.5,"O3":30,"NO2":15}}}"#;
        let result = PredictionResult::from_slice(raw).expect("valid");
        assert!(matches!(
            result.get("GRU"),
            Some(ModelOutcome::Predicted { .. })
        ));
    }

    #[test]
    fn reserializes_byte_for_byte_with_extra_and_reordered_keys() {
        let raw = r#"{"GRU":{"aqi":42.0,"prediction":{"NO2":15.0,"O3":30,"CO":0.5,"SO2":1,"PM10":20,"PM2.5":10,"AQI":"Good"},"date":"2023-01-05","status":"Good"},"CNN":{"error":"Model CNN not found.","code":404}}"#;
        let result = PredictionResult::from_slice(raw.as_bytes()).expect("valid");
        assert_eq!(serde_json::to_string(&result).expect("json"), raw);
        assert_eq!(
            result.entry("GRU").and_then(|entry| entry.fields().get("status")),
            Some(&serde_json::json!("Good"))
        );
    }
}
