use crate::frontend::linear_expression::LinearExpression;
use silex_algebra::prelude::*;

/// One piece of a formatted trace: static text or an unresolved expression.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Chunk {
    /// Static text.
    Text(String),
    /// An expression substituted with its field value during solving.
    Expr(LinearExpression),
}

/// The debug trace attached to a constraint: the source location captured at
/// emission and an interleaving of text and unresolved expressions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebugInfo {
    /// `file:line` of the call that emitted the constraint.
    pub location: String,
    /// The interleaved chunks.
    pub chunks: Vec<Chunk>,
}

impl DebugInfo {
    /// Build a debug trace from chunks, stamping the given location.
    pub fn new(location: String, chunks: Vec<Chunk>) -> Self {
        DebugInfo { location, chunks }
    }

    /// Render the trace, resolving expressions with `eval`.
    pub fn render<F: Scalar>(&self, eval: &mut dyn FnMut(&LinearExpression) -> Option<F>) -> String {
        let mut out = String::new();
        for chunk in self.chunks.iter() {
            match chunk {
                Chunk::Text(text) => out.push_str(text),
                Chunk::Expr(expr) => match eval(expr) {
                    Some(value) => out.push_str(&format!("{:?}", value.into_biguint())),
                    None => out.push_str("<unsolved>"),
                },
            }
        }
        out.push_str(" [");
        out.push_str(&self.location);
        out.push(']');
        out
    }
}

/// A deferred circuit print: a format string with `{}` placeholders and the
/// expressions filling them, resolved once the witness is solved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// The format string; each `{}` consumes one expression.
    pub format: String,
    /// The expressions to resolve.
    pub to_resolve: Vec<LinearExpression>,
}

impl LogEntry {
    /// Render the entry, resolving expressions with `eval`.
    pub fn render<F: Scalar>(&self, eval: &mut dyn FnMut(&LinearExpression) -> Option<F>) -> String {
        let mut out = String::new();
        let mut exprs = self.to_resolve.iter();
        let mut rest = self.format.as_str();
        while let Some(pos) = rest.find("{}") {
            out.push_str(&rest[..pos]);
            match exprs.next().and_then(|e| eval(e)) {
                Some(value) => out.push_str(&format!("{:?}", value.into_biguint())),
                None => out.push_str("<unsolved>"),
            }
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::coeffs::COEFF_ID_ONE;
    use crate::frontend::term::{Term, Visibility};
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_render_log_entry() {
        let entry = LogEntry {
            format: "x = {} and y = {}".to_string(),
            to_resolve: vec![
                LinearExpression::from_term(Term::pack(0, COEFF_ID_ONE, Visibility::Secret)),
                LinearExpression::from_term(Term::pack(1, COEFF_ID_ONE, Visibility::Secret)),
            ],
        };
        let values = [F::from(3u32), F::from(9u32)];
        let mut eval = |e: &LinearExpression| -> Option<F> {
            Some(values[e.0[0].wire_id()])
        };
        assert_eq!(entry.render(&mut eval), "x = 3 and y = 9");
    }

    #[test]
    fn test_render_debug_info() {
        let info = DebugInfo::new(
            "circuit.rs:42".to_string(),
            vec![
                Chunk::Text("inverse ".to_string()),
                Chunk::Expr(LinearExpression::from_term(Term::pack(
                    0,
                    COEFF_ID_ONE,
                    Visibility::Secret,
                ))),
                Chunk::Text(" * result == 1".to_string()),
            ],
        );
        let mut eval = |_: &LinearExpression| -> Option<F> { Some(F::from(5u32)) };
        assert_eq!(
            info.render(&mut eval),
            "inverse 5 * result == 1 [circuit.rs:42]"
        );
    }
}
