use alloc::borrow::Cow;

/// What an object does when the same key is appended twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Collect every value under the key into an array (default).
    #[default]
    Accumulate,
    /// Keep only the last value.
    Overwrite,
}

/// Options for [`JsonBuilder`](crate::JsonBuilder).
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Name that starts a top-level tree when no container is open (default: "json")
    pub root_name: Cow<'static, str>,
    /// Whether `set` tries to read text values as JSON (default: true)
    pub parse_text: bool,
    /// Behavior on repeated keys in an open object (default: accumulate)
    pub duplicate_keys: DuplicateKeys,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            root_name: Cow::Borrowed("json"),
            parse_text: true,
            duplicate_keys: DuplicateKeys::Accumulate,
        }
    }
}

impl BuilderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different reserved root name.
    pub fn root_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Keep text values literal instead of trying to parse them.
    pub fn literal_text(mut self) -> Self {
        self.parse_text = false;
        self
    }

    /// Choose how repeated keys are handled.
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }
}
