use std::io::Write;

use anyhow::Context;
use scru64::{NodeSpec, Scru64Generator, Scru64Id};

use super::config::{Action, CliConfig, Policy};

/// Runs the configured action, writing its results to `out`.
pub fn run(config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.action {
        Action::Generate {
            node_spec,
            count,
            policy,
        } => generate(*node_spec, *count, *policy, out),
        Action::Inspect { node_spec, ids } => {
            for id in ids {
                inspect(*id, node_spec.as_ref(), out)?;
            }
            Ok(())
        }
        Action::NodeSpec { node_spec } => {
            writeln!(out, "{node_spec}")?;
            writeln!(out, "node_id={}", node_spec.node_id())?;
            writeln!(out, "node_id_size={}", node_spec.node_id_size())?;
            writeln!(out, "counter_size={}", node_spec.counter_size())?;
            Ok(())
        }
    }
}

fn generate(
    node_spec: NodeSpec,
    count: usize,
    policy: Policy,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let generator = Scru64Generator::new(node_spec);
    tracing::debug!(
        node_id = generator.node_id(),
        node_id_size = generator.node_id_size(),
        count,
        ?policy,
        "generating"
    );

    for i in 0..count {
        let id = match policy {
            Policy::Abort => generator.generate_or_abort(),
            Policy::Reset => generator.generate_or_reset(),
            Policy::Sleep => generator.generate_or_sleep(),
        }
        .with_context(|| format!("failed to generate ID #{}", i + 1))?;
        writeln!(out, "{id}")?;
    }

    // The next run can pass this spec to stay ordered after these IDs.
    let resume = generator.node_spec()?;
    tracing::info!(node_spec = %resume, "done");
    Ok(())
}

fn inspect(id: Scru64Id, node_spec: Option<&NodeSpec>, out: &mut impl Write) -> anyhow::Result<()> {
    let timestamp = id.timestamp();
    write!(
        out,
        "{id}\tinteger={}\ttimestamp={timestamp}\tunix_ts_ms={}\tnode_ctr={}",
        id.to_u64(),
        timestamp << 8,
        id.node_ctr(),
    )?;
    if let Some(node_spec) = node_spec {
        let counter_size = node_spec.counter_size();
        write!(
            out,
            "\tnode_id={}\tcounter={}",
            id.node_ctr() >> counter_size,
            id.node_ctr() & ((1 << counter_size) - 1),
        )?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(action: Action) -> String {
        let mut out = Vec::new();
        run(&CliConfig { action }, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn generates_requested_number_of_increasing_ids() {
        let node_spec = NodeSpec::with_node_id(42, 8).unwrap();
        for policy in [Policy::Abort, Policy::Reset, Policy::Sleep] {
            let output = run_to_string(Action::Generate {
                node_spec,
                count: 100,
                policy,
            });
            let ids: Vec<Scru64Id> = output.lines().map(|l| l.parse().unwrap()).collect();
            assert_eq!(ids.len(), 100);
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert!(ids.iter().all(|id| id.node_ctr() >> 16 == 42));
        }
    }

    #[test]
    fn inspects_fields() {
        let id = Scru64Id::from_parts(6_557_084_606, 0x2a_0001).unwrap();
        let output = run_to_string(Action::Inspect {
            node_spec: None,
            ids: vec![id],
        });
        assert_eq!(
            output,
            format!(
                "{id}\tinteger={}\ttimestamp=6557084606\tunix_ts_ms=1678613659136\tnode_ctr={}\n",
                id.to_u64(),
                0x2a_0001,
            )
        );
    }

    #[test]
    fn inspects_node_and_counter_with_node_spec() {
        let id = Scru64Id::from_parts(6_557_084_606, 0x2a_0001).unwrap();
        let output = run_to_string(Action::Inspect {
            node_spec: Some(NodeSpec::with_node_id(42, 8).unwrap()),
            ids: vec![id],
        });
        assert!(output.ends_with("\tnode_id=42\tcounter=1\n"));
    }

    #[test]
    fn prints_canonical_node_spec() {
        let output = run_to_string(Action::NodeSpec {
            node_spec: "0xb00/12".parse().unwrap(),
        });
        assert_eq!(output, "2816/12\nnode_id=2816\nnode_id_size=12\ncounter_size=12\n");
    }
}
