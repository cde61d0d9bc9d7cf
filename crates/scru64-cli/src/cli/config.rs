use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use scru64::{NODE_SPEC_ENV_VAR, NodeSpec, Scru64Id};

/// Command-line arguments for the `scru64` binary.
///
/// The node spec can come from the `--node-spec` flag, the `SCRU64_NODE_SPEC`
/// environment variable, or a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "scru64",
    version,
    about = "Generate and inspect SCRU64 IDs"
)]
pub struct CliArgs {
    /// Node configuration specifier, e.g. `42/8`, `0xb00/12` or
    /// `0u2r85hm2pt3/16`.
    ///
    /// Required by `generate`; `inspect` uses it to split `node_ctr` into
    /// node ID and counter.
    ///
    /// Environment variable: `SCRU64_NODE_SPEC`
    #[arg(long, global = true, env = "SCRU64_NODE_SPEC")]
    pub node_spec: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print new IDs, one per line.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// What to do when the system clock moves back too far.
        #[arg(long, value_enum, default_value_t = Policy::Sleep)]
        policy: Policy,
    },

    /// Decode IDs into their integer value and fields.
    Inspect {
        /// IDs in their 12-digit text form.
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Validate a node spec and print its canonical form.
    NodeSpec {
        /// The node spec string to check.
        spec: String,
    },
}

/// Clock rollback handling for `generate`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Fail with an error.
    Abort,
    /// Start a new, unordered sequence.
    Reset,
    /// Wait until the clock catches up.
    Sleep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        node_spec: NodeSpec,
        count: usize,
        policy: Policy,
    },
    Inspect {
        node_spec: Option<NodeSpec>,
        ids: Vec<Scru64Id>,
    },
    NodeSpec {
        node_spec: NodeSpec,
    },
}

/// Validated configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub action: Action,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let node_spec = args
            .node_spec
            .as_deref()
            .map(|s| NodeSpec::parse(s).with_context(|| format!("invalid node spec `{s}`")))
            .transpose()?;

        let action = match args.command {
            Command::Generate { count, policy } => {
                let Some(node_spec) = node_spec else {
                    bail!("`generate` requires --node-spec or {NODE_SPEC_ENV_VAR}");
                };
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                Action::Generate {
                    node_spec,
                    count,
                    policy,
                }
            }
            Command::Inspect { ids } => {
                let ids = ids
                    .iter()
                    .map(|s| Scru64Id::parse(s).with_context(|| format!("invalid ID `{s}`")))
                    .collect::<anyhow::Result<_>>()?;
                Action::Inspect { node_spec, ids }
            }
            Command::NodeSpec { spec } => Action::NodeSpec {
                node_spec: NodeSpec::parse(&spec)
                    .with_context(|| format!("invalid node spec `{spec}`"))?,
            },
        };

        Ok(Self { action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> anyhow::Result<CliConfig> {
        let args = CliArgs::try_parse_from(std::iter::once("scru64").chain(args.iter().copied()))?;
        CliConfig::try_from(args)
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_defaults() {
        let cfg = config(&["--node-spec", "42/8", "generate"]).unwrap();
        assert_eq!(
            cfg.action,
            Action::Generate {
                node_spec: NodeSpec::with_node_id(42, 8).unwrap(),
                count: 1,
                policy: Policy::Sleep,
            }
        );
    }

    #[test]
    fn parses_generate_flags_after_subcommand() {
        let cfg = config(&["generate", "-n", "5", "--policy", "reset", "--node-spec", "0xb00/12"])
            .unwrap();
        assert_eq!(
            cfg.action,
            Action::Generate {
                node_spec: NodeSpec::with_node_id(0xb00, 12).unwrap(),
                count: 5,
                policy: Policy::Reset,
            }
        );
    }

    #[test]
    fn rejects_bad_generate_arguments() {
        let err = config(&["--node-spec", "42/8", "generate", "--count", "0"]).unwrap_err();
        assert!(err.to_string().contains("--count"));

        let err = config(&["--node-spec", "42/24", "generate"]).unwrap_err();
        assert!(err.to_string().contains("invalid node spec"));

        assert!(config(&["--node-spec", "42/8", "generate", "--policy", "panic"]).is_err());
    }

    #[test]
    fn parses_inspect_without_node_spec() {
        let cfg = config(&["inspect", "0u2r85hm2pt3", "0U2R85HM2PT4"]).unwrap();
        let Action::Inspect { ids, .. } = cfg.action else {
            panic!("expected inspect");
        };
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].to_string(), "0u2r85hm2pt3");
        assert_eq!(ids[1].to_string(), "0u2r85hm2pt4");
    }

    #[test]
    fn rejects_invalid_ids() {
        let err = config(&["inspect", "0u2r85hm2pt3", "not-an-id"]).unwrap_err();
        assert!(err.to_string().contains("not-an-id"));
        assert!(config(&["inspect"]).is_err());
    }

    #[test]
    fn validates_node_spec_argument() {
        let cfg = config(&["node-spec", "0XB00/12"]).unwrap();
        assert_eq!(
            cfg.action,
            Action::NodeSpec {
                node_spec: NodeSpec::with_node_id(0xb00, 12).unwrap(),
            }
        );
        assert!(config(&["node-spec", "1024/8"]).is_err());
    }
}
