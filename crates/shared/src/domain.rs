use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! model_names {
    ($($variant:ident => $wire:literal),+ $(,)?) => {
        /// Models the prediction service knows how to serve.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ModelName {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl ModelName {
            pub const ALL: [ModelName; 12] = [$(ModelName::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ModelName::$variant => $wire,)+
                }
            }
        }

        impl FromStr for ModelName {
            type Err = UnknownModel;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(ModelName::$variant),)+
                    other => Err(UnknownModel(other.to_string())),
                }
            }
        }
    };
}

model_names! {
    Cnn => "CNN",
    CnnAttention => "CNN_Attention",
    Rnn => "RNN",
    RnnAttention => "RNN_Attention",
    Gru => "GRU",
    GruAttention => "GRU_Attention",
    Lstm => "LSTM",
    LstmAttention => "LSTM_Attention",
    ResNet => "ResNet",
    ResNetAttention => "ResNet_Attention",
    ReXNet => "ReXNet",
    ReXNetAttention => "ReXNet_Attention",
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model '{0}'")]
pub struct UnknownModel(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    Co,
    O3,
    No2,
}

impl Pollutant {
    /// Display order used by every renderer.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::No2,
    ];

    /// Key used on the wire and as the display label.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
