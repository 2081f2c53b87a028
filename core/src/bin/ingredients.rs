use std::process::ExitCode;

use anyhow::Context;
use burger_client::{ApiClient, ClientConfig, IngredientsResponse, StellarBurgers};
use tracing_subscriber::EnvFilter;

const SAMPLE_SIZE: usize = 3;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env()?;
    let client = ApiClient::from_config(&config);
    let api = StellarBurgers::new(&client);

    let response = api
        .ingredients()
        .with_context(|| format!("fetching ingredients from {}", client.base_url()))?;
    println!("Status code: {}", response.status);

    if response.status != 200 {
        println!("Error: {}", response.status);
        println!("{}", response.text());
        return Ok(ExitCode::FAILURE);
    }

    let catalog: IngredientsResponse = response.json()?;
    println!("Total ingredients: {}", catalog.data.len());

    let sample = &catalog.data[..catalog.data.len().min(SAMPLE_SIZE)];
    println!("Sample ingredients:");
    for ingredient in sample {
        println!("ID: {}, Name: {}", ingredient.id, ingredient.name);
    }

    let ids: Vec<&str> = sample.iter().map(|i| i.id.as_str()).collect();
    println!("\nIngredient IDs: {ids:?}");
    Ok(ExitCode::SUCCESS)
}
