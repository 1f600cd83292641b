//! Stringification options.

/// Options for [`stringify`](crate::stringify).
#[derive(Debug, Clone, Default)]
pub struct StringifyOptions {
    /// Collect a position map (default: none).
    pub map: Option<MapOptions>,

    /// Ignore captured raws and emit canonical spacing (default: false).
    pub normalize: bool,
}

impl StringifyOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a position map.
    pub fn map(mut self, map: MapOptions) -> Self {
        self.map = Some(map);
        self
    }

    /// Emit canonical spacing instead of the captured raws.
    pub fn normalize(mut self) -> Self {
        self.normalize = true;
        self
    }
}

/// How the caller intends to attach the map to the output.
///
/// Both flags are carried through to the [`SourceMap`](crate::SourceMap);
/// encoding the map is left to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapOptions {
    /// Embed the map in the output.
    pub inline: bool,
    /// Add a comment pointing at the map.
    pub annotation: bool,
}
