use crate::derive::{string_items, value_display};
use fleetboard_model::FieldKind;
use serde_json::Value;

/// Flattens one raw cell into the text the tabular view's search box
/// matches against. Keyed off the declared column kind, so list-shaped
/// columns flatten item by item instead of relying on positional index
/// checks at the call site.
#[must_use]
pub fn search_text(kind: FieldKind, raw: &Value) -> String {
    match kind {
        FieldKind::Repository => raw.as_str().unwrap_or_default().to_string(),
        FieldKind::Tags | FieldKind::BranchList => string_items(raw).join(" "),
        FieldKind::PullRequestList => raw
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|detail| {
                        detail
                            .values()
                            .map(value_display)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default(),
        FieldKind::Delta | FieldKind::Coverage => {
            if raw.is_number() {
                raw.to_string()
            } else {
                String::new()
            }
        }
        FieldKind::UnitTests => raw
            .as_array()
            .map(|counts| {
                counts
                    .iter()
                    .map(value_display)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default(),
        FieldKind::Pipeline => match raw {
            Value::String(status) => status.clone(),
            Value::Object(entries) => entries
                .iter()
                .map(|(name, status)| format!("{name} {}", value_display(status)))
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        },
        _ => unreachable!("unhandled FieldKind variant in search_text"),
    }
}
