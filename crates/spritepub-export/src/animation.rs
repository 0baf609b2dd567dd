//! Animation grouping for sequential-frame scene descriptions.
//!
//! Sprite names of the form `<animation>/<frame>` are grouped by the prefix
//! before the first `/`; names without a `/` fall into the `"default"`
//! animation. Each frame is identified by its 1-based sub-resource index,
//! which is its position in the frame set.
//!
//! Groups are keyed by name, not by span: a key that reappears after another
//! key interrupted it extends its original group instead of opening a new
//! one. Groups are listed in order of first appearance.

use std::collections::HashMap;

/// Animation name used for sprites without a `/` prefix.
pub const DEFAULT_ANIMATION: &str = "default";

/// Separator between sub-resource references in a frame list.
const REFERENCE_SEPARATOR: &str = ", ";

/// Returns the animation key of a sprite name.
pub fn animation_key(name: &str) -> &str {
    match name.find('/') {
        Some(index) => &name[..index],
        None => DEFAULT_ANIMATION,
    }
}

/// Formats a reference to the sub-resource with the given 1-based id.
pub fn sub_resource_ref(id: usize) -> String {
    format!("SubResource( {} )", id)
}

/// Joins sub-resource references for a scene `frames` list.
pub fn frame_list(ids: &[usize]) -> String {
    ids.iter()
        .map(|&id| sub_resource_ref(id))
        .collect::<Vec<_>>()
        .join(REFERENCE_SEPARATOR)
}

/// One named animation and the sub-resources it plays, in frame order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationGroup {
    /// Animation key.
    pub name: String,
    /// 1-based sub-resource ids.
    pub frames: Vec<usize>,
}

impl AnimationGroup {
    /// Comma-separated sub-resource references, without a trailing separator.
    pub fn frame_list(&self) -> String {
        frame_list(&self.frames)
    }
}

/// Partitions ordered sprite names into animation groups.
///
/// The n-th name (0-based) is assigned sub-resource id `n + 1`.
pub fn group_animations<'a, I>(names: I) -> Vec<AnimationGroup>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: Vec<AnimationGroup> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for (position, name) in names.into_iter().enumerate() {
        let key = animation_key(name);
        let id = position + 1;
        match slots.get(key) {
            Some(&slot) => groups[slot].frames.push(id),
            None => {
                slots.insert(key, groups.len());
                groups.push(AnimationGroup {
                    name: key.to_string(),
                    frames: vec![id],
                });
            }
        }
    }

    groups
}
