use std::time::Duration;

use clap::Parser;
use log::{debug, info};
use serde_json::json;

use promoted_delivery_example::{
    DEFAULT_TIMEOUT_MILLIS, DeliveryClient, DeliveryConfig, DeliveryRequest, Insertion, Paging,
    ProductCatalog, PromotedDeliveryClient, Properties, Request, StdResult, UseCase, UserInfo,
    parse_bool_or, parse_f64_or, parse_u64_or,
};

/// Command line arguments for the Promoted Delivery example client
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Metrics API endpoint URL
    #[arg(long, env = "METRICS_API_ENDPOINT_URL", default_value = "")]
    metrics_api_endpoint_url: String,

    /// Metrics API key
    #[arg(long, env = "METRICS_API_KEY", default_value = "", hide_env_values = true)]
    metrics_api_key: String,

    /// Delivery API endpoint URL
    #[arg(long, env = "DELIVERY_API_ENDPOINT_URL", default_value = "")]
    delivery_api_endpoint_url: String,

    /// Delivery API key
    #[arg(long, env = "DELIVERY_API_KEY", default_value = "", hide_env_values = true)]
    delivery_api_key: String,

    /// Only log the request to the Metrics API (e.g., true, false, 1, 0)
    #[arg(long, env = "ONLY_LOG")]
    only_log: Option<String>,

    /// Share of only-log requests also sent to the Delivery API, between 0 and 1
    #[arg(long, env = "SHADOW_TRAFFIC_DELIVERY_RATE")]
    shadow_traffic_delivery_rate: Option<String>,

    /// Wait for shadow traffic calls to complete
    #[arg(long, env = "BLOCKING_SHADOW_TRAFFIC")]
    blocking_shadow_traffic: Option<String>,

    /// Delivery API timeout in milliseconds
    #[arg(long, env = "DELIVERY_TIMEOUT_MILLIS")]
    delivery_timeout_millis: Option<String>,

    /// Metrics API timeout in milliseconds
    #[arg(long, env = "METRICS_TIMEOUT_MILLIS")]
    metrics_timeout_millis: Option<String>,
}

impl From<Args> for DeliveryConfig {
    fn from(args: Args) -> Self {
        Self {
            metrics_api_endpoint_url: args.metrics_api_endpoint_url,
            metrics_api_key: args.metrics_api_key,
            delivery_api_endpoint_url: args.delivery_api_endpoint_url,
            delivery_api_key: args.delivery_api_key,
            only_log: parse_bool_or(args.only_log.as_deref(), false),
            shadow_traffic_delivery_rate: parse_f64_or(
                args.shadow_traffic_delivery_rate.as_deref(),
                0.0,
            ),
            blocking_shadow_traffic: parse_bool_or(args.blocking_shadow_traffic.as_deref(), false),
            delivery_timeout: Duration::from_millis(parse_u64_or(
                args.delivery_timeout_millis.as_deref(),
                DEFAULT_TIMEOUT_MILLIS,
            )),
            metrics_timeout: Duration::from_millis(parse_u64_or(
                args.metrics_timeout_millis.as_deref(),
                DEFAULT_TIMEOUT_MILLIS,
            )),
        }
    }
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let config = DeliveryConfig::from(Args::parse());
    println!("Promoted Delivery Client");
    println!("{}", config.metrics_api_endpoint_url);
    config.validate()?;
    debug!("{config}");

    let client = PromotedDeliveryClient::builder()
        .with_config(&config)
        .build()?;
    let catalog = ProductCatalog::sample();
    let request = prepare_delivery_request(catalog.insertions(), config.only_log);
    info!("Calling Promoted delivery: {request}");

    let response = client.deliver(request).await?;
    println!("Execution server: {}", response.execution_server);
    println!("Client request ID: {}", response.client_request_id);
    println!("Response");
    for item in catalog.rerank(&response.response) {
        println!("{item}");
    }
    client.flush_shadow_traffic().await;

    Ok(())
}

fn prepare_delivery_request(insertions: Vec<Insertion>, only_log: bool) -> DeliveryRequest {
    let properties = json!({
        "category": "topic",
        "priceMin": 10.0,
    });
    let request = Request {
        user_info: Some(UserInfo::new("testAnonUserId1", "testUserId1")),
        use_case: UseCase::Search,
        search_query: "query".to_string(),
        paging: Some(Paging::with_offset(0, 3)),
        disable_personalization: false,
        properties: properties.as_object().cloned().map(Properties::from),
        insertion: insertions,
        ..Request::default()
    };

    DeliveryRequest::new(request, only_log)
}
