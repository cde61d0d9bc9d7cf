use core::fmt;

use ::serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::NodeSpec;

impl Serialize for NodeSpec {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeSpec {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeSpecVisitor;

        impl Visitor<'_> for NodeSpecVisitor {
            type Value = NodeSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(r#"a node spec string like "42/8""#)
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                NodeSpec::parse(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(NodeSpecVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Config {
        node_spec: NodeSpec,
    }

    #[test]
    fn serializes_canonical_form() {
        let config: Config = serde_json::from_value(json!({"node_spec": "0xb00/12"})).unwrap();
        assert_eq!(config.node_spec.node_id(), 0xb00);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"node_spec": "2816/12"})
        );

        let config: Config =
            serde_json::from_value(json!({"node_spec": "v0rbps7ay8ks/16"})).unwrap();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"node_spec": "v0rbps7ay8ks/16"})
        );
    }

    #[test]
    fn rejects_invalid_node_specs() {
        for bad in ["42", "0/24", "42 / 8", ""] {
            let json = json!({ "node_spec": bad });
            assert!(
                serde_json::from_value::<Config>(json).is_err(),
                "accepted {bad:?}"
            );
        }
        assert!(serde_json::from_value::<Config>(json!({"node_spec": 42})).is_err());
    }
}
