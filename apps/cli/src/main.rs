use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    config::load_settings, render::render_status, FormField, HttpPredictionService,
    PredictionFormController, UiStatus, MIN_YEAR,
};
use shared::domain::ModelName;
use tracing_subscriber::EnvFilter;

/// Predict urban air quality for a date using one of the trained models.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, required_unless_present = "list_models", value_parser = parse_year)]
    year: Option<String>,
    #[arg(long, required_unless_present = "list_models", value_parser = parse_digits)]
    month: Option<String>,
    #[arg(long, required_unless_present = "list_models", value_parser = parse_digits)]
    day: Option<String>,
    /// Leave out to see the form reject the submission.
    #[arg(long, value_parser = parse_model)]
    model: Option<ModelName>,
    /// Overrides `service_url` from predictor.toml and the environment.
    #[arg(long)]
    service_url: Option<String>,
    /// Print the validated response as JSON instead of the rendered text.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    list_models: bool,
}

fn parse_digits(value: &str) -> Result<String, String> {
    if !value.is_empty() && FormField::Day.accepts(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{value}' is not a number"))
    }
}

fn parse_year(value: &str) -> Result<String, String> {
    let digits = parse_digits(value)?;
    match digits.parse::<u32>() {
        Ok(year) if year >= MIN_YEAR => Ok(digits),
        _ => Err(format!("year must be {MIN_YEAR} or later")),
    }
}

fn parse_model(value: &str) -> Result<ModelName, String> {
    value.parse::<ModelName>().map_err(|err| {
        let known: Vec<&str> = ModelName::ALL.iter().map(|m| m.as_str()).collect();
        format!("{err}; expected one of: {}", known.join(", "))
    })
}

fn fill_form(controller: &mut PredictionFormController, args: &Args) {
    let fields = [
        (FormField::Year, args.year.as_deref()),
        (FormField::Month, args.month.as_deref()),
        (FormField::Day, args.day.as_deref()),
        (FormField::Model, args.model.map(ModelName::as_str)),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            controller.update_field(field, value);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.list_models {
        for model in ModelName::ALL {
            println!("{model}");
        }
        return Ok(());
    }

    let mut settings = load_settings();
    if let Some(service_url) = args.service_url.clone() {
        settings.service_url = service_url;
    }
    let service = HttpPredictionService::from_settings(&settings)
        .with_context(|| format!("failed to set up client for {}", settings.service_url))?;
    tracing::info!(endpoint = %service.endpoint(), "prediction service configured");

    let mut controller = PredictionFormController::new();
    fill_form(&mut controller, &args);

    match controller.submit(&service).await {
        UiStatus::Success(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        UiStatus::Failure(message) => bail!("{message}"),
        status => println!("{}", render_status(status)),
    }
    Ok(())
}
