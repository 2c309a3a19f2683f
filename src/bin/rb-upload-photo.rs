use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rb_pwms::{
    client::{Client, Endpoint, EndpointConfig},
    PhotoUploadBuilder,
};

#[derive(Parser, Debug)]
struct Args {
    #[arg(help = "Path to the encoded image file to upload.")]
    path: PathBuf,
    #[arg(
        short = 'c',
        long,
        help = "Content type of the image. Defaults to image/jpeg."
    )]
    content_type: Option<String>,
    #[arg(
        short = 'u',
        long,
        help = "Endpoint to upload the photo to. Defaults to the current PWMS API."
    )]
    upload_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let http = reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .build()?;
    let endpoints = EndpointConfig {
        routes: None,
        photos: args.upload_endpoint.map(|val| Endpoint {
            url: val,
            replace_token: None,
        }),
    };
    endpoints.validate()?;
    let client = Client::new(http, Some(endpoints))?;

    let bytes = tokio::fs::read(&args.path).await?;
    let mut builder = PhotoUploadBuilder::default();
    builder.bytes(bytes);
    if let Some(content_type) = args.content_type {
        builder.content_type(content_type);
    }
    if let Some(file_name) = args.path.file_name().and_then(|name| name.to_str()) {
        builder.file_name(file_name);
    }
    let photo = builder.build()?;
    client.upload_photo(&photo).await?;
    println!("uploaded {}", args.path.display());

    Ok(())
}
