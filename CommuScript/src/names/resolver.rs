//! Speaker resolution for spoken lines
//!
//! Choice buttons never reach the resolver; they are labelled
//! [`BUTTON_SPEAKER`](super::BUTTON_SPEAKER) when placed.

use super::{NARRATION_SPEAKER, NameCache};
use crate::diagnostics::{Diagnostics, Warning};
use crate::formats::commu::SpeakerRef;

/// Resolves character references to speaker labels
///
/// A line carries two references: the *display* character shown to the
/// reader and the *actor* actually speaking. The display reference is tried
/// first; when it is unknown the actor reference is used instead.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    names: &'a NameCache,
}

impl<'a> NameResolver<'a> {
    pub fn new(names: &'a NameCache) -> Self {
        Self { names }
    }

    /// Resolve the speaker label for a spoken line
    ///
    /// Returns `None` when the line cannot be attributed to any known
    /// character; the caller must skip it. Fallbacks and skips are recorded in
    /// `diagnostics`.
    pub fn resolve(
        &self,
        line_id: u32,
        display: &SpeakerRef,
        actor: &SpeakerRef,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        if display.is_null() && actor.is_null() {
            tracing::debug!("line {line_id} has no speaker, using {NARRATION_SPEAKER:?}");
            return Some(NARRATION_SPEAKER.to_string());
        }
        if let Some(name) = self.lookup(display) {
            return Some(name.to_string());
        }

        if let Some(name) = self.lookup(actor) {
            diagnostics.push(Warning::SpeakerFallback {
                line_id,
                display: display.to_string(),
                actor: actor.to_string(),
            });
            return Some(name.to_string());
        }

        diagnostics.push(Warning::UnresolvedSpeaker {
            line_id,
            display: display.to_string(),
            actor: actor.to_string(),
        });
        None
    }

    fn lookup(&self, reference: &SpeakerRef) -> Option<&'a str> {
        let name = self.names.display_name(reference.as_id()?)?;
        tracing::debug!("looked up character {reference}, found {name:?}");
        Some(name)
    }
}
