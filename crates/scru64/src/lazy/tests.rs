use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    ConfigError, EnvNodeSpec, Error, GenerateError, LazyGenerator, NODE_SPEC_ENV_VAR, NodeSpec,
    NodeSpecSource, ParseError,
};

fn spec(s: &str) -> NodeSpec {
    s.parse().unwrap()
}

// Each test uses its own variable so that tests running in parallel do not
// observe each other's environment.
fn set_env(var: &str, value: &str) {
    // SAFETY: no other thread reads or writes this variable.
    unsafe { std::env::set_var(var, value) };
}

#[test]
fn reads_configuration_from_env_var() {
    set_env("SCRU64_TEST_READS_ENV", "42/8");
    let lazy = LazyGenerator::new(EnvNodeSpec::with_var("SCRU64_TEST_READS_ENV"));

    assert_eq!(lazy.node_id().unwrap(), 42);
    assert_eq!(lazy.node_id_size().unwrap(), 8);
    assert!(!lazy.initialize(spec("1/1")));
    assert_eq!(lazy.node_id().unwrap(), 42);
}

#[test]
fn reads_default_env_var_name() {
    assert_eq!(EnvNodeSpec::new().var(), NODE_SPEC_ENV_VAR);
    assert_eq!(EnvNodeSpec::default().var(), "SCRU64_NODE_SPEC");
}

#[test]
fn initialize_preempts_source() {
    let lazy = LazyGenerator::new(|| -> Result<NodeSpec, Error> {
        panic!("source must not be consulted after initialize")
    });

    assert!(lazy.initialize(spec("0xb00/12")));
    assert!(!lazy.initialize(spec("42/8")));
    assert_eq!(lazy.node_id().unwrap(), 0xb00);
    assert_eq!(lazy.node_id_size().unwrap(), 12);
    assert_eq!(lazy.node_spec().unwrap().to_string(), "2816/12");
}

#[test]
fn missing_env_var_is_config_error() {
    let lazy = LazyGenerator::new(EnvNodeSpec::with_var("SCRU64_TEST_NEVER_SET"));
    assert_eq!(
        lazy.generate(),
        Err(Error::Config(ConfigError::MissingNodeSpec {
            var: "SCRU64_TEST_NEVER_SET".to_owned()
        }))
    );

    // the failure is not cached
    assert!(lazy.initialize(spec("42/8")));
    assert!(lazy.generate().is_ok());
}

#[test]
fn malformed_env_var_is_parse_error() {
    set_env("SCRU64_TEST_MALFORMED_ENV", "42 / 8");
    let lazy = LazyGenerator::new(EnvNodeSpec::with_var("SCRU64_TEST_MALFORMED_ENV"));
    assert_eq!(
        lazy.node_id(),
        Err(Error::Parse(ParseError::NodeSpecSyntax))
    );
}

#[test]
fn retries_source_until_it_succeeds() {
    let calls = AtomicUsize::new(0);
    let lazy = LazyGenerator::new(|| -> Result<NodeSpec, Error> {
        if calls.fetch_add(1, Ordering::Relaxed) == 0 {
            Err(ConfigError::MissingNodeSpec {
                var: "flaky".to_owned(),
            }
            .into())
        } else {
            Ok(spec("7/4"))
        }
    });

    assert!(lazy.get().is_err());
    assert_eq!(lazy.node_id().unwrap(), 7);
    assert_eq!(lazy.node_id().unwrap(), 7);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn node_spec_is_a_source() {
    let node_spec = spec("v0rbps7ay8ks/8");
    assert_eq!(node_spec.node_spec(), Ok(node_spec));

    // `node_prev` lies centuries ahead of the system clock
    let lazy = LazyGenerator::new(node_spec);
    assert_eq!(
        lazy.generate(),
        Err(Error::Generate(GenerateError::ClockRollback))
    );
    let id = lazy.generate_or_reset().unwrap();
    assert!(id < node_spec.node_prev().unwrap());
    assert_eq!(id.node_ctr() >> 16, 68);
}

#[test]
fn generates_increasing_strings() {
    let lazy = LazyGenerator::new(spec("42/8"));

    let mut prev = lazy.new_string().unwrap();
    for _ in 0..10_000 {
        let curr = lazy.new_string().unwrap();
        assert!(prev < curr);
        prev = curr;
    }
}

#[test]
fn continues_lineage_through_node_spec() {
    let lazy = LazyGenerator::new(spec("42/8"));
    let last = lazy.generate().unwrap();
    let saved = lazy.node_spec().unwrap();
    assert_eq!(saved.node_prev(), Some(last));

    let restarted = LazyGenerator::new(saved);
    assert!(restarted.generate_or_sleep().unwrap() > last);
}
