use std::fmt;

/// The transform component a keyframe track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Translation, // Interpolated linearly
    Rotation,    // Interpolated spherically
    Scale,       // Interpolated linearly
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        };
        f.write_str(name)
    }
}
