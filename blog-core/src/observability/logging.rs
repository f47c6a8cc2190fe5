use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

type OtelLayer = tracing_opentelemetry::OpenTelemetryLayer<Registry, sdktrace::Tracer>;

/// Span exporter for `endpoint`, or `None` when the pipeline cannot start.
fn otlp_layer(service_name: &str, endpoint: &str) -> Option<OtelLayer> {
    let resource = Resource::new(vec![KeyValue::new("service.name", service_name.to_string())]);
    let installed = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(sdktrace::config().with_resource(resource))
        .install_batch(runtime::Tokio);

    match installed {
        Ok(tracer) => Some(tracing_opentelemetry::layer().with_tracer(tracer)),
        Err(e) => {
            eprintln!("{}: OTLP export to {} disabled: {}", service_name, endpoint, e);
            None
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `log_level`. Events are written as flattened JSON
/// with source locations; spans are exported when `otlp_endpoint` is set.
pub fn init_tracing(service_name: &str, log_level: &str, otlp_endpoint: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let json = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(otlp_endpoint.and_then(|endpoint| otlp_layer(service_name, endpoint)))
        .with(filter)
        .with(json)
        .init();
}
