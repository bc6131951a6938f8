use std::panic::{self, AssertUnwindSafe};

use crate::{
    foundation::ids::LayerId,
    registry::component::Rendered,
    render::node::{BoundaryState, RenderNode},
};

/// Run one renderer call inside a boundary keyed by `key`.
///
/// Errors and panics become [`BoundaryState::Failed`], pending output becomes
/// [`BoundaryState::Loading`]. Nothing escapes to sibling or parent layers.
pub fn isolate<F>(key: &LayerId, render: F) -> RenderNode
where
    F: FnOnce() -> anyhow::Result<Rendered>,
{
    let state = match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(Ok(Rendered::Ready(node))) => BoundaryState::Ready {
            node: Box::new(node),
        },
        Ok(Ok(Rendered::Pending)) => {
            tracing::debug!(layer = %key, "renderer pending");
            BoundaryState::Loading
        }
        Ok(Err(err)) => {
            let message = format!("{err:#}");
            tracing::warn!(layer = %key, error = %message, "renderer failed");
            BoundaryState::Failed { message }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(layer = %key, panic = %message, "renderer panicked");
            BoundaryState::Failed { message }
        }
    };
    RenderNode::Boundary {
        key: key.clone(),
        state,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "renderer panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/isolate.rs"]
mod tests;
