use biometrics::{Collector, Counter, Moments};

pub(crate) static PROVIDER_REQUESTS: Counter = Counter::new("ace_explainer.provider.requests");
pub(crate) static PROVIDER_REQUEST_ERRORS: Counter =
    Counter::new("ace_explainer.provider.request_errors");
pub(crate) static PROVIDER_EMPTY_REPLIES: Counter =
    Counter::new("ace_explainer.provider.empty_replies");
pub(crate) static PROVIDER_REQUEST_DURATION: Moments =
    Moments::new("ace_explainer.provider.request_duration_seconds");

pub(crate) static SESSION_TURNS: Counter = Counter::new("ace_explainer.session.turns");
pub(crate) static SESSION_FAILED_TURNS: Counter =
    Counter::new("ace_explainer.session.failed_turns");
pub(crate) static SESSION_RESETS: Counter = Counter::new("ace_explainer.session.resets");

pub(crate) static EXPORTS: Counter = Counter::new("ace_explainer.export.documents");
pub(crate) static EXPORT_ERRORS: Counter = Counter::new("ace_explainer.export.errors");
pub(crate) static EXPORT_BLOCKS: Counter = Counter::new("ace_explainer.export.blocks");
pub(crate) static EXPORT_BYTES: Counter = Counter::new("ace_explainer.export.bytes");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&PROVIDER_REQUESTS);
    collector.register_counter(&PROVIDER_REQUEST_ERRORS);
    collector.register_counter(&PROVIDER_EMPTY_REPLIES);
    collector.register_moments(&PROVIDER_REQUEST_DURATION);

    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_FAILED_TURNS);
    collector.register_counter(&SESSION_RESETS);

    collector.register_counter(&EXPORTS);
    collector.register_counter(&EXPORT_ERRORS);
    collector.register_counter(&EXPORT_BLOCKS);
    collector.register_counter(&EXPORT_BYTES);
}
