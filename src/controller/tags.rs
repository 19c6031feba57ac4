//! Client tag toggle
//!
//! Tag buttons flip immediately and are put back if the portal does not
//! confirm the change.

use std::sync::Arc;

use crate::service::{PortalService, Reply, TagUpdateRequest};
use crate::types::ClientTag;

pub const TAG_UPDATE_FAILED_TEXT: &str = "Failed to update tag";

pub trait TagSurface {
    fn is_active(&self, tag: &ClientTag) -> bool;
    fn set_active(&self, tag: &ClientTag, active: bool);
    fn alert(&self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    /// The portal stored the new state
    Persisted { active: bool },
    /// The change was undone; `active` is the restored state
    Reverted { active: bool },
}

pub struct TagToggle<S: ?Sized, V> {
    service: Arc<S>,
    surface: V,
}

impl<S: ?Sized, V: Clone> Clone for TagToggle<S, V> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            surface: self.surface.clone(),
        }
    }
}

impl<S, V> TagToggle<S, V>
where
    S: PortalService + ?Sized,
    V: TagSurface,
{
    pub fn new(service: Arc<S>, surface: V) -> Self {
        Self { service, surface }
    }

    /// Flip the tag on screen and return the request persisting it
    pub fn begin_toggle(&self, tag: &ClientTag) -> TagUpdateRequest {
        let active = !self.surface.is_active(tag);
        self.surface.set_active(tag, active);
        TagUpdateRequest {
            tag: tag.tag.clone(),
            add: active,
        }
    }

    pub async fn finish_toggle(&self, tag: &ClientTag, request: TagUpdateRequest) -> TagOutcome {
        let active = request.add;
        let failure = match self.service.update_client_tag(&tag.client_id, &request).await {
            Ok(Reply::Accepted(())) => return TagOutcome::Persisted { active },
            Ok(Reply::Rejected(reason)) => reason.unwrap_or_else(|| "rejected".to_string()),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            "Tag '{}' on client {} not updated: {}",
            tag.tag,
            tag.client_id,
            failure
        );
        self.surface.set_active(tag, !active);
        self.surface.alert(TAG_UPDATE_FAILED_TEXT);
        TagOutcome::Reverted { active: !active }
    }

    pub async fn toggle(&self, tag: &ClientTag) -> TagOutcome {
        let request = self.begin_toggle(tag);
        self.finish_toggle(tag, request).await
    }
}
