use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{ExporterBuildError, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler, SdkTracerProvider};
use opentelemetry_semantic_conventions::SCHEMA_URL;
use opentelemetry_semantic_conventions::resource::{DEPLOYMENT_ENVIRONMENT_NAME, SERVICE_NAME, SERVICE_VERSION};
use thiserror::Error;
use tracing_core::LevelFilter;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug)]
pub struct TracingConfig {
    pub package: &'static str,
    pub version: &'static str,
    #[builder(setter(into), default = String::from("dev"))]
    pub env: String,
    #[builder(default)]
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exporter(#[from] ExporterBuildError),
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Flushes and shuts down the span pipeline when dropped.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = &self.provider {
            if let Err(err) = provider.shutdown() {
                eprintln!("Error during tracer provider shutdown:\n{err:?}");
            }
        }
    }
}

pub fn setup(config: TracingConfig) -> Result<TracingGuard, Error> {
    let subscriber = tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).with(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy(),
    );

    let provider = if let Some(otlp_endpoint) = config.otlp_endpoint {
        global::set_text_map_propagator(opentelemetry_sdk::propagation::TraceContextPropagator::new());
        let keys = vec![
            KeyValue::new(SERVICE_NAME, config.package),
            KeyValue::new(SERVICE_VERSION, config.version),
            KeyValue::new(DEPLOYMENT_ENVIRONMENT_NAME, config.env),
        ];
        let resource = Resource::builder().with_schema_url(keys, SCHEMA_URL).build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otlp_endpoint)
            .build()?;

        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(1.0))))
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build();
        global::set_tracer_provider(provider.clone());
        Some(provider)
    } else {
        None
    };

    let subscriber = if let Some(provider) = &provider {
        let tracer = TracerProvider::tracer(provider, config.package);
        subscriber.with(Some(OpenTelemetryLayer::new(tracer)))
    } else {
        subscriber.with(None)
    };
    subscriber.try_init()?;

    Ok(TracingGuard { provider })
}
