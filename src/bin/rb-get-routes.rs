use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use rb_pwms::{
    client::{Client, Endpoint, EndpointConfig},
    constants::DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN,
    group_by_city,
};
use serde_json::json;
use tokio_stream::{self, StreamExt};

#[derive(Parser, Debug)]
struct Args {
    #[arg(
        short = 'd',
        long = "date",
        required = true,
        help = "Route date (YYYY-MM-DD). May be given more than once."
    )]
    dates: Vec<NaiveDate>,
    #[arg(
        short = 'r',
        long,
        help = "Endpoint format to retrieve routes from, with a $date token. Defaults to the current PWMS API."
    )]
    routes_endpoint: Option<String>,
    #[arg(short = 'g', long, help = "Group the addresses by city before printing.")]
    grouped: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let http = reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .build()?;
    let endpoints = EndpointConfig {
        routes: args.routes_endpoint.map(|val| Endpoint {
            url: val,
            replace_token: Some(DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN.to_string()),
        }),
        photos: None,
    };
    endpoints.validate()?;
    let client = Client::new(http, Some(endpoints))?;

    let results = tokio_stream::iter(args.dates)
        .then(|date| {
            let client = client.clone();
            async move {
                let addresses = client.get_route_addresses(date).await?;
                Ok::<_, anyhow::Error>((date, addresses))
            }
        })
        .collect::<Vec<_>>()
        .await;

    let mut days = Vec::new();
    for result in results {
        let (date, addresses) = result?;
        if args.grouped {
            days.push(json!({"date": date, "cities": group_by_city(addresses)}));
        } else {
            days.push(json!({"date": date, "addresses": addresses}));
        }
    }
    println!("{}", serde_json::to_string(&days)?);

    Ok(())
}
