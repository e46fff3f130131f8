//! Call-shape decision
//!
//! Every binding hands exactly one value to its private caller. The shape
//! decides what that value looks like, from whether the operation has path
//! parameters, query parameters and a body.

use crate::generation::ParameterInfo;

/// Identifier of the request body at the call site
pub const BODY_IDENT: &str = "body";

/// How the parameters of one operation are packed for its caller.
///
/// `composite` is true when more than one parameter is packed, in which case
/// they travel as a tuple instead of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// No parameters and no body: the caller is keyed by `()`
    Unit,
    /// Only a body
    BodyOnly,
    /// Only query parameters
    Query { composite: bool },
    /// Path parameters, with any query parameters folded into the same value
    Path { composite: bool },
    /// Parameters plus a body, as `(params, body)`
    ParamsWithBody { composite: bool },
}

impl CallShape {
    /// Picks the shape for an operation.
    ///
    /// ```
    /// use openapi_bindgen::generation::CallShape;
    ///
    /// assert_eq!(CallShape::classify(0, 0, false), CallShape::Unit);
    /// assert_eq!(CallShape::classify(0, 2, false), CallShape::Query { composite: true });
    /// assert_eq!(CallShape::classify(1, 1, false), CallShape::Path { composite: true });
    /// assert_eq!(CallShape::classify(1, 0, true), CallShape::ParamsWithBody { composite: false });
    /// ```
    pub fn classify(path_count: usize, query_count: usize, has_body: bool) -> Self {
        let total = path_count + query_count;
        match (path_count > 0, query_count > 0, has_body) {
            (false, false, false) => CallShape::Unit,
            (false, false, true) => CallShape::BodyOnly,
            (false, true, false) => CallShape::Query {
                composite: total > 1,
            },
            (true, _, false) => CallShape::Path {
                composite: total > 1,
            },
            (_, _, true) => CallShape::ParamsWithBody {
                composite: total > 1,
            },
        }
    }

    pub fn has_body(self) -> bool {
        matches!(self, CallShape::BodyOnly | CallShape::ParamsWithBody { .. })
    }

    /// Type of the value handed to the caller.
    ///
    /// `params` are in caller order: path parameters, then query parameters.
    pub fn caller_type(self, params: &[&ParameterInfo], body_type: &str) -> String {
        let param_types: Vec<String> = params.iter().map(|p| p.call_site_type()).collect();
        self.compose(&param_types, body_type, "()")
    }

    /// Closure pattern destructuring the caller value.
    pub fn caller_pattern(self, params: &[&ParameterInfo]) -> String {
        let idents: Vec<String> = params.iter().map(|p| p.ident.clone()).collect();
        self.compose(&idents, BODY_IDENT, "_")
    }

    /// Expression packing the public arguments into the caller value.
    pub fn call_arguments(self, params: &[&ParameterInfo]) -> String {
        let idents: Vec<String> = params.iter().map(|p| p.ident.clone()).collect();
        self.compose(&idents, BODY_IDENT, "()")
    }

    fn compose(self, items: &[String], body: &str, unit: &str) -> String {
        match self {
            CallShape::Unit => unit.to_string(),
            CallShape::BodyOnly => body.to_string(),
            CallShape::Query { composite } | CallShape::Path { composite } => {
                tuple_or_scalar(items, composite)
            }
            CallShape::ParamsWithBody { composite } => {
                format!("({}, {body})", tuple_or_scalar(items, composite))
            }
        }
    }
}

fn tuple_or_scalar(items: &[String], composite: bool) -> String {
    if composite {
        format!("({})", items.join(", "))
    } else {
        items.first().cloned().unwrap_or_else(|| "()".to_string())
    }
}
