use std::borrow::Cow;

use crate::{ConfigError, Error, NodeSpec};

/// The environment variable [`EnvNodeSpec`] reads by default.
pub const NODE_SPEC_ENV_VAR: &str = "SCRU64_NODE_SPEC";

/// Supplies the node configuration of a [`LazyGenerator`] on first use.
///
/// Implemented by [`EnvNodeSpec`], by [`NodeSpec`] itself, and by closures
/// returning `Result<NodeSpec, Error>`.
///
/// ```
/// use scru64::{LazyGenerator, NodeSpec};
///
/// let lazy = LazyGenerator::new(|| "42/8".parse::<NodeSpec>());
/// assert_eq!(lazy.node_id().unwrap(), 42);
/// ```
///
/// [`LazyGenerator`]: crate::LazyGenerator
pub trait NodeSpecSource {
    /// Produces the node spec.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid node spec is available.
    fn node_spec(&self) -> Result<NodeSpec, Error>;
}

impl NodeSpecSource for NodeSpec {
    fn node_spec(&self) -> Result<NodeSpec, Error> {
        Ok(*self)
    }
}

impl<F> NodeSpecSource for F
where
    F: Fn() -> Result<NodeSpec, Error>,
{
    fn node_spec(&self) -> Result<NodeSpec, Error> {
        self()
    }
}

/// Reads a node spec string from an environment variable,
/// [`NODE_SPEC_ENV_VAR`] unless configured otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvNodeSpec {
    var: Cow<'static, str>,
}

impl EnvNodeSpec {
    /// Reads [`NODE_SPEC_ENV_VAR`].
    pub const fn new() -> Self {
        Self {
            var: Cow::Borrowed(NODE_SPEC_ENV_VAR),
        }
    }

    /// Reads the given environment variable instead.
    pub fn with_var(var: impl Into<Cow<'static, str>>) -> Self {
        Self { var: var.into() }
    }

    /// Returns the name of the environment variable.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvNodeSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeSpecSource for EnvNodeSpec {
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingNodeSpec`] if the variable is unset or
    /// not valid Unicode, and the node spec parse error if its value is
    /// malformed.
    fn node_spec(&self) -> Result<NodeSpec, Error> {
        let value = std::env::var(self.var()).map_err(|_| ConfigError::MissingNodeSpec {
            var: self.var.to_string(),
        })?;
        value.parse()
    }
}
