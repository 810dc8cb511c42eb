// src/functions/signature.rs
use serde::Serialize;

/// Element type of a UDF column, as declared to the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Str,
    Float32,
}

/// A named, typed column of a function's input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub dtype: ColumnType,
}

/// Declared I/O signature of a scalar function. The host engine validates
/// row shapes and output types against this before dispatching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub inputs: &'static [ColumnDef],
    pub outputs: &'static [ColumnDef],
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIG: Signature = Signature {
        inputs: &[
            ColumnDef {
                name: "prompt",
                dtype: ColumnType::Str,
            },
            ColumnDef {
                name: "text",
                dtype: ColumnType::Str,
            },
        ],
        outputs: &[ColumnDef {
            name: "response",
            dtype: ColumnType::Str,
        }],
    };

    #[test]
    fn test_arity() {
        assert_eq!(SIG.arity(), 2);
        assert_eq!(SIG.outputs.len(), 1);
    }

    #[test]
    fn test_serializes_for_host_introspection() {
        let json = serde_json::to_string(&SIG).unwrap();
        assert!(json.contains("\"name\":\"prompt\""));
        assert!(json.contains("\"dtype\":\"str\""));
    }
}
