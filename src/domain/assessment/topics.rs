//! Topics offered as quick picks on the topic input screen.

/// Topics users can pick without typing.
pub const PRESET_TOPICS: &[&str] = &[
    "Python",
    "React Development",
    "Data Science",
    "Digital Marketing",
];
