/// Errors returned for an invalid node configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `node_id_size` is zero or larger than 23.
    #[error("`node_id_size` ({node_id_size}) must range from 1 to 23")]
    NodeIdSize {
        /// The rejected size.
        node_id_size: u32,
    },

    /// `node_id` needs more than `node_id_size` bits.
    #[error("`node_id` ({node_id}) must fit in `node_id_size` ({node_id_size}) bits")]
    NodeIdOverflow {
        /// The rejected node ID.
        node_id: u32,
        /// The configured node ID size.
        node_id_size: u8,
    },

    /// The configuration source had no node spec to offer.
    #[error("could not read node spec from `{var}`")]
    MissingNodeSpec {
        /// Name of the variable or source that was consulted.
        var: String,
    },
}
