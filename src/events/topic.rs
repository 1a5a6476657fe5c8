use std::borrow::Cow;

use crate::mapping::{ControlMapping, MappingTable};

/// Rewrite a compound topic that names a mapping into its control-key form.
///
/// `down:ps4_circle` becomes `down:button_1`. Bare kinds, raw control keys
/// and names the table does not know pass through untouched. Stick names are
/// left as they are since no events are published for sticks.
pub fn resolve_topic<'a>(mappings: &MappingTable, topic: &'a str) -> Cow<'a, str> {
    let Some((kind, name)) = topic.split_once(':') else {
        return Cow::Borrowed(topic);
    };
    match mappings.get(name) {
        Some(mapping @ (ControlMapping::Button(_) | ControlMapping::Axis(_))) => {
            Cow::Owned(format!("{kind}:{mapping}"))
        }
        Some(ControlMapping::Stick(_)) | None => Cow::Borrowed(topic),
    }
}
