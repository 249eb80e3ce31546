use mockify_core::{FieldDef, Schema};

/// Options for a single build call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Pins the engine to this seed for the call and restores the previous
    /// seed and state afterwards.
    pub seed: Option<u64>,
}

impl BuildOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Arguments of a build call: an optional trait, per-call overrides and
/// options.
#[derive(Debug, Clone)]
pub enum BuildRequest {
    NoTrait {
        overrides: Schema,
        options: BuildOptions,
    },
    WithTrait {
        name: String,
        overrides: Schema,
        options: BuildOptions,
    },
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self::NoTrait {
            overrides: Schema::new(),
            options: BuildOptions::default(),
        }
    }
}

impl BuildRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that activates the trait `name`.
    pub fn for_trait(name: impl Into<String>) -> Self {
        Self::WithTrait {
            name: name.into(),
            overrides: Schema::new(),
            options: BuildOptions::default(),
        }
    }

    /// Replace the override schema.
    pub fn with_overrides(mut self, schema: Schema) -> Self {
        *self.overrides_mut() = schema;
        self
    }

    /// Override a single field.
    pub fn set(mut self, name: impl Into<String>, definition: impl Into<FieldDef>) -> Self {
        self.overrides_mut().insert(name, definition);
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        *self.options_mut() = options;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options_mut().seed = Some(seed);
        self
    }

    pub fn trait_name(&self) -> Option<&str> {
        match self {
            Self::NoTrait { .. } => None,
            Self::WithTrait { name, .. } => Some(name.as_str()),
        }
    }

    pub fn overrides(&self) -> &Schema {
        match self {
            Self::NoTrait { overrides, .. } | Self::WithTrait { overrides, .. } => overrides,
        }
    }

    pub fn options(&self) -> BuildOptions {
        match self {
            Self::NoTrait { options, .. } | Self::WithTrait { options, .. } => *options,
        }
    }

    fn overrides_mut(&mut self) -> &mut Schema {
        match self {
            Self::NoTrait { overrides, .. } | Self::WithTrait { overrides, .. } => overrides,
        }
    }

    fn options_mut(&mut self) -> &mut BuildOptions {
        match self {
            Self::NoTrait { options, .. } | Self::WithTrait { options, .. } => options,
        }
    }
}

impl From<&str> for BuildRequest {
    fn from(name: &str) -> Self {
        Self::for_trait(name)
    }
}

impl From<String> for BuildRequest {
    fn from(name: String) -> Self {
        Self::for_trait(name)
    }
}

impl From<Schema> for BuildRequest {
    fn from(overrides: Schema) -> Self {
        Self::new().with_overrides(overrides)
    }
}

impl From<(&str, Schema)> for BuildRequest {
    fn from((name, overrides): (&str, Schema)) -> Self {
        Self::for_trait(name).with_overrides(overrides)
    }
}

impl From<BuildOptions> for BuildRequest {
    fn from(options: BuildOptions) -> Self {
        Self::new().with_options(options)
    }
}

impl From<()> for BuildRequest {
    fn from(_: ()) -> Self {
        Self::new()
    }
}
