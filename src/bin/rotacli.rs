use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rb_pwms::{
    client::{Client, Endpoint, EndpointConfig},
    constants::DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN,
    group_by_city, Address, PhotoUploadBuilder,
};
use serde_json::json;
use tokio::time;

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(
        short = 'r',
        long,
        global = true,
        help = "Endpoint format to retrieve routes from, with a $date token."
    )]
    pub routes_endpoint: Option<String>,

    #[arg(short = 'u', long, global = true, help = "Endpoint to upload photos to.")]
    pub upload_endpoint: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "get-routes", about = "Get the route addresses for one date")]
    GetRoutes {
        #[arg(short = 'd', long, help = "Route date (YYYY-MM-DD)")]
        date: NaiveDate,

        #[arg(short = 'o', long, help = "Output file for the JSON payload")]
        output_path: Option<String>,
    },

    #[clap(
        name = "get-routes-range",
        about = "Get the route addresses for every date in an inclusive range"
    )]
    GetRoutesRange {
        #[arg(short = 'f', long, help = "First date of the range (YYYY-MM-DD)")]
        from: NaiveDate,

        #[arg(short = 't', long, help = "Last date of the range (YYYY-MM-DD)")]
        until: NaiveDate,

        #[arg(short = 'o', long, help = "Output file")]
        output_path: Option<String>,
    },

    #[clap(name = "upload-photo", about = "Upload one captured photo")]
    UploadPhoto {
        #[arg(help = "Path to the encoded image file")]
        path: PathBuf,

        #[arg(short = 'c', long, help = "Content type of the image")]
        content_type: Option<String>,
    },
}

fn print_grouped(addresses: Vec<Address>) {
    let groups = group_by_city(addresses);
    let mut cities = groups.keys().cloned().collect::<Vec<_>>();
    cities.sort();
    for city in cities {
        println!("{}", city);
        for (index, address) in groups[&city].iter().enumerate() {
            println!(
                "  {}. {}: {}, {} {}",
                index + 1,
                address.service_type,
                address.street_address,
                address.state,
                address.postal_code.as_deref().unwrap_or("-"),
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let http = reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .build()?;
    let endpoints = EndpointConfig {
        routes: args.global_opts.routes_endpoint.map(|val| Endpoint {
            url: val,
            replace_token: Some(DEFAULT_ROUTES_SERVICE_URL_REPLACE_TOKEN.to_string()),
        }),
        photos: args.global_opts.upload_endpoint.map(|val| Endpoint {
            url: val,
            replace_token: None,
        }),
    };
    endpoints.validate()?;
    let client = Client::new(http, Some(endpoints))?;

    match args.subcommand {
        Command::GetRoutes { date, output_path } => {
            let addresses = client.get_route_addresses(date).await?;
            if let Some(output_path) = output_path {
                let payload = json!({"date": date, "cities": group_by_city(addresses)});
                std::fs::write(output_path, serde_json::to_string_pretty(&payload)?)?;
            } else {
                print_grouped(addresses);
            }
        }
        Command::GetRoutesRange {
            from,
            until,
            output_path,
        } => {
            let dates = from
                .iter_days()
                .take_while(|date| *date <= until)
                .collect::<Vec<_>>();

            // Fetch in batches of 5 to go easy on the backend
            let progress = ProgressBar::new(dates.len() as u64);
            progress.set_style(ProgressStyle::with_template(
                "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?);
            let mut days = Vec::new();
            let delay_between_batches = Duration::from_secs(1);
            for date_batch in dates.chunks(5) {
                let day_batch = stream::iter(date_batch)
                    .map(|date| {
                        let client = client.clone();
                        let date = *date;
                        async move {
                            let addresses = client.get_route_addresses(date).await?;
                            Ok::<_, anyhow::Error>(json!({"date": date, "addresses": addresses}))
                        }
                    })
                    .buffer_unordered(5)
                    .collect::<Vec<_>>()
                    .await;
                for day in day_batch {
                    days.push(day?);
                }
                progress.inc(date_batch.len() as u64);
                time::sleep(delay_between_batches).await;
            }
            progress.finish();
            let json_output = serde_json::to_string_pretty(&days)?;
            if let Some(output_path) = output_path {
                std::fs::write(output_path, json_output)?;
            } else {
                println!("{}", json_output);
            }
        }
        Command::UploadPhoto { path, content_type } => {
            let bytes = tokio::fs::read(&path).await?;
            let mut builder = PhotoUploadBuilder::default();
            builder.bytes(bytes);
            if let Some(content_type) = content_type {
                builder.content_type(content_type);
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                builder.file_name(file_name);
            }
            let photo = builder.build()?;
            client.upload_photo(&photo).await?;
            println!("uploaded {}", path.display());
        }
    }

    Ok(())
}
