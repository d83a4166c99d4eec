//! Placement of choice buttons among spoken lines
//!
//! Choices are not part of the spoken event stream, so their position has
//! to be inferred: a choice whose derived id falls strictly between two
//! adjacent lines goes right before the later one. Anything that does not
//! fit strictly inside the sequence is dropped, never forced to an edge.

use super::options::MissingTextPolicy;
use super::types::ResolvedLine;
use crate::diagnostics::{Diagnostics, UnplaceableReason, Warning};
use crate::error::{Error, Result};
use crate::formats::commu::ChoiceEvent;
use crate::formats::gtx::StringTable;
use crate::names::BUTTON_SPEAKER;

/// Find where a line with `line_id` belongs in `lines`
///
/// `lines` must be sorted by strictly increasing `line_id`. Returns the index
/// of the `next` line of the unique adjacent pair with
/// `prev.line_id < line_id < next.line_id`.
pub fn find_insertion_point(lines: &[ResolvedLine], line_id: u32) -> std::result::Result<usize, UnplaceableReason> {
    if lines.is_empty() {
        return Err(UnplaceableReason::NoLines);
    }

    let idx = lines.partition_point(|l| l.line_id < line_id);
    if lines.get(idx).is_some_and(|l| l.line_id == line_id) {
        return Err(UnplaceableReason::Collision);
    }
    if idx == 0 {
        return Err(UnplaceableReason::BeforeFirst);
    }
    if idx == lines.len() {
        return Err(UnplaceableReason::AfterLast);
    }
    Ok(idx)
}

/// Insert choice buttons into sorted `lines`
///
/// Choices are handled in ascending id order; choices with equal ids keep
/// their event order, and since each is placed against the sequence as it
/// stands (including earlier buttons) only the first of them survives.
///
/// Returns the number of inserted buttons.
///
/// # Errors
/// Returns [`Error::MissingText`] for a placeable choice without text when
/// `policy` is [`MissingTextPolicy::Abort`]. Unplaceable choices are dropped
/// before their text is looked up.
pub fn insert_choices(
    lines: &mut Vec<ResolvedLine>,
    choices: &[ChoiceEvent],
    table: &StringTable,
    policy: MissingTextPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<usize> {
    let mut ordered: Vec<&ChoiceEvent> = choices.iter().collect();
    ordered.sort_by_key(|c| c.line_id);

    let mut inserted = 0;
    for choice in ordered {
        tracing::debug!("finding place for button {}...", choice.text_id);

        let idx = match find_insertion_point(lines, choice.line_id) {
            Ok(idx) => idx,
            Err(reason) => {
                diagnostics.push(Warning::UnplaceableChoice {
                    text_id: choice.text_id.clone(),
                    line_id: choice.line_id,
                    reason,
                });
                continue;
            }
        };

        let Some(text) = table.get(&choice.text_id) else {
            match policy {
                MissingTextPolicy::Abort => {
                    return Err(Error::MissingText {
                        line_id: choice.line_id,
                        text_id: choice.text_id.clone(),
                    });
                }
                MissingTextPolicy::Skip => {
                    diagnostics.push(Warning::MissingText {
                        line_id: choice.line_id,
                        text_id: choice.text_id.clone(),
                    });
                    continue;
                }
            }
        };

        tracing::debug!(
            "inserting button {} between lines {} and {}",
            choice.line_id,
            lines[idx - 1].line_id,
            lines[idx].line_id
        );
        lines.insert(idx, ResolvedLine::new(choice.line_id, BUTTON_SPEAKER, text));
        inserted += 1;
    }

    Ok(inserted)
}
