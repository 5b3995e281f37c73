use serde::{Deserialize, Serialize};

use super::{lenient::lenient, scalar::Scalar};

/// Upstream rating; `average` is on a 0-1 scale and sometimes quoted.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub average: Option<Scalar>,
    #[serde(flatten)]
    pub extra:   serde_json::Map<String, serde_json::Value>,
}

impl Rating {
    /// The average on a 0-5 scale, as shown to the user.
    pub fn out_of_five(&self) -> Option<f64> {
        self.average.as_ref().and_then(Scalar::as_f64).map(|x| x * 5.0)
    }

    pub fn label(&self) -> Option<String> {
        self.out_of_five().map(|x| format!("{x:.1} / 5.0"))
    }
}
