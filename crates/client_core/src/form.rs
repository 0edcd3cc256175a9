//! Form field state as typed by the user.

use std::{fmt, str::FromStr};

use shared::{domain::ModelName, protocol::PredictionRequest};

use crate::error::{FormFieldError, ValidationError};

/// Earliest year the date widgets accept.
pub const MIN_YEAR: u32 = 2023;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Year,
    Month,
    Day,
    Model,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Year,
        FormField::Month,
        FormField::Day,
        FormField::Model,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Year => "year",
            FormField::Month => "month",
            FormField::Day => "day",
            FormField::Model => "model",
        }
    }

    /// Input filter for the widget bound to this field. Date fields are numeric.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            FormField::Year | FormField::Month | FormField::Day => {
                value.chars().all(|c| c.is_ascii_digit())
            }
            FormField::Model => true,
        }
    }
}

impl FromStr for FormField {
    type Err = FormFieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| FormFieldError::UnknownField(name.to_string()))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub year: String,
    pub month: String,
    pub day: String,
    pub model: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Year => &self.year,
            FormField::Month => &self.month,
            FormField::Day => &self.day,
            FormField::Model => &self.model,
        }
    }

    /// Replaces one field. No validation happens here.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Year => &mut self.year,
            FormField::Month => &mut self.month,
            FormField::Day => &mut self.day,
            FormField::Model => &mut self.model,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Selected model, if the field holds one of the known names.
    pub fn selected_model(&self) -> Option<ModelName> {
        self.model.parse().ok()
    }

    /// `year-month-day` with month and day zero-padded to two characters.
    pub fn formatted_date(&self) -> String {
        format!("{}-{:0>2}-{:0>2}", self.year, self.month, self.day)
    }

    pub fn to_request(&self) -> Result<PredictionRequest, ValidationError> {
        let model = self.selected_model().ok_or(ValidationError::MissingModel)?;
        Ok(PredictionRequest::new(model, self.formatted_date()))
    }

    /// Required/numeric/minimum constraints the date widgets enforce before submit.
    pub fn date_widgets_complete(&self) -> bool {
        let filled = [&self.year, &self.month, &self.day]
            .into_iter()
            .all(|value| !value.is_empty());
        let numeric = [FormField::Year, FormField::Month, FormField::Day]
            .into_iter()
            .all(|field| field.accepts(self.get(field)));
        filled
            && numeric
            && self
                .year
                .parse::<u32>()
                .is_ok_and(|year| year >= MIN_YEAR)
    }
}
