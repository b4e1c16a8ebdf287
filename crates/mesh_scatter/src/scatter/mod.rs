//! Scattering pipeline: placement on a target surface, host instances, and baking.
use tracing::error;

use crate::error::Error;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};

pub mod bake;
pub mod events;
pub mod instance;
pub mod placement;
pub mod scatterer;
pub mod settings;

/// Consecutive rejected candidates after which a placement run stops.
pub const MAX_CONSECUTIVE_REJECTIONS: usize = 15;

/// Logs a validation failure, forwards it to the sink, and hands it back for returning.
pub(crate) fn report(sink: &mut dyn EventSink, context: &str, err: Error) -> Error {
    error!("Mesh scatterer {}: {}.", context, err);
    if sink.wants(ScatterEventKind::Error) {
        sink.send(ScatterEvent::Error {
            context: context.to_owned(),
            message: err.to_string(),
        });
    }
    err
}
