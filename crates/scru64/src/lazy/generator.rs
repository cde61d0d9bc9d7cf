use std::sync::OnceLock;

use crate::{EnvNodeSpec, Error, NodeSpec, NodeSpecSource, Scru64Generator, Scru64Id};

/// A generator configured on first use.
///
/// The node spec is taken from a [`NodeSpecSource`] the first time a
/// generation method is called, unless [`initialize`](Self::initialize) has
/// configured the generator before. A failure to obtain the node spec is
/// returned to the caller that triggered it and is not remembered; the next
/// call consults the source again.
///
/// A `LazyGenerator` is an ordinary value. Applications that want a
/// process-wide generator put one in a `static`:
///
/// ```
/// use scru64::{LazyGenerator, NodeSpec};
///
/// static GENERATOR: LazyGenerator = LazyGenerator::from_env();
///
/// let configured = GENERATOR.initialize("42/8".parse::<NodeSpec>().unwrap());
/// assert!(configured);
///
/// let a = GENERATOR.new_string().unwrap();
/// let b = GENERATOR.new_string().unwrap();
/// assert!(a < b);
/// ```
pub struct LazyGenerator<S = EnvNodeSpec> {
    source: S,
    inner: OnceLock<Scru64Generator>,
}

impl LazyGenerator {
    /// Creates a generator reading the node spec from the `SCRU64_NODE_SPEC`
    /// environment variable.
    pub const fn from_env() -> Self {
        Self::new(EnvNodeSpec::new())
    }
}

impl<S> LazyGenerator<S>
where
    S: NodeSpecSource,
{
    /// Creates a generator that obtains its node spec from `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            inner: OnceLock::new(),
        }
    }

    /// Configures the generator with `node_spec` if it is not configured yet.
    ///
    /// Returns `true` if this call configured the generator, or `false` if an
    /// earlier configuration is preserved.
    pub fn initialize(&self, node_spec: NodeSpec) -> bool {
        let mut initialized = false;
        self.inner.get_or_init(|| {
            initialized = true;
            Scru64Generator::new(node_spec)
        });
        #[cfg(feature = "tracing")]
        if initialized {
            tracing::debug!("Initialized generator with node spec {node_spec}");
        }
        initialized
    }

    /// Returns the underlying generator, configuring it from the source if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the generator is not configured yet and
    /// the source cannot provide a node spec.
    pub fn get(&self) -> Result<&Scru64Generator, Error> {
        if let Some(generator) = self.inner.get() {
            return Ok(generator);
        }

        let node_spec = self.source.node_spec()?;
        Ok(self.inner.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!("Initialized generator with node spec {node_spec}");
            Scru64Generator::new(node_spec)
        }))
    }

    /// Calls [`Scru64Generator::generate`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error or the generator's error.
    pub fn generate(&self) -> Result<Scru64Id, Error> {
        Ok(self.get()?.generate()?)
    }

    /// Calls [`Scru64Generator::generate_or_reset`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error or the generator's error.
    pub fn generate_or_reset(&self) -> Result<Scru64Id, Error> {
        Ok(self.get()?.generate_or_reset()?)
    }

    /// Calls [`Scru64Generator::generate_or_sleep`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error or the generator's fatal error.
    pub fn generate_or_sleep(&self) -> Result<Scru64Id, Error> {
        Ok(self.get()?.generate_or_sleep()?)
    }

    /// Generates a new SCRU64 ID encoded in the 12-digit canonical string
    /// representation, sleeping while the clock is behind.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_or_sleep`].
    pub fn new_string(&self) -> Result<String, Error> {
        self.generate_or_sleep().map(|id| id.to_string())
    }

    /// Calls [`Scru64Generator::node_id`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error.
    pub fn node_id(&self) -> Result<u32, Error> {
        Ok(self.get()?.node_id())
    }

    /// Calls [`Scru64Generator::node_id_size`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error.
    pub fn node_id_size(&self) -> Result<u8, Error> {
        Ok(self.get()?.node_id_size())
    }

    /// Calls [`Scru64Generator::node_spec`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error or the generator's error.
    pub fn node_spec(&self) -> Result<NodeSpec, Error> {
        Ok(self.get()?.node_spec()?)
    }
}

impl<S> core::fmt::Debug for LazyGenerator<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyGenerator")
            .field("inner", &self.inner.get())
            .finish_non_exhaustive()
    }
}
