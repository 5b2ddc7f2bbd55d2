//! Default value template evaluation.
//!
//! Templates interpolate other properties (`${groupId}`, `$artifactId`) and
//! may transform them with method chains such as
//! `${artifactId.replaceAll('-', '_').toUpperCase()}`.

mod methods;
mod parser;

use archgen_core::{
    application::{EvaluationError, ExpressionEvaluator},
    domain::Properties,
};
use tracing::trace;

use parser::{Arg, Expr, Segment};

pub use methods::Value;

/// Evaluator for `${name}` / `$name` templates with string methods.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterpolatingEvaluator;

impl InterpolatingEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn eval_expr(&self, expr: &Expr, bindings: &Properties) -> Result<Value, EvaluationError> {
        let mut value = bindings
            .get(&expr.name)
            .map(|v| Value::Str(v.to_string()))
            .ok_or_else(|| EvaluationError::Unbound {
                name: expr.name.clone(),
            })?;

        for call in &expr.calls {
            let args = call
                .args
                .iter()
                .map(|arg| match arg {
                    Arg::Str(s) => Ok(Value::Str(s.clone())),
                    Arg::Int(n) => Ok(Value::Int(*n)),
                    Arg::Expr(inner) => self.eval_expr(inner, bindings),
                })
                .collect::<Result<Vec<_>, _>>()?;
            value = methods::call(&call.method, value, args)?;
        }
        Ok(value)
    }
}

impl ExpressionEvaluator for InterpolatingEvaluator {
    fn evaluate(&self, template: &str, bindings: &Properties) -> Result<String, EvaluationError> {
        let mut out = String::with_capacity(template.len());
        for segment in parser::parse(template)? {
            match segment {
                Segment::Text(text) => out.push_str(&text),
                Segment::Expr(expr) => out.push_str(&self.eval_expr(&expr, bindings)?.to_string()),
            }
        }
        trace!(template, result = %out, "Evaluated template");
        Ok(out)
    }

    fn references(&self, template: &str) -> Vec<String> {
        let segments = parser::parse_partial(template);
        let mut names = Vec::new();
        for segment in &segments {
            if let Segment::Expr(expr) = segment {
                expr.names(&mut names);
            }
        }

        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.iter().any(|u| u == name) {
                unique.push(name.to_string());
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn eval(template: &str, pairs: &[(&str, &str)]) -> Result<String, EvaluationError> {
        InterpolatingEvaluator::new().evaluate(template, &bindings(pairs))
    }

    #[test]
    fn interpolates_both_placeholder_forms() {
        assert_eq!(
            eval("${groupId}.$artifactId", &[("groupId", "com.acme"), ("artifactId", "svc")])
                .unwrap(),
            "com.acme.svc"
        );
    }

    #[test]
    fn literal_template_needs_no_bindings() {
        assert_eq!(eval("1.0-SNAPSHOT", &[]).unwrap(), "1.0-SNAPSHOT");
    }

    #[test]
    fn uppercase_service_name() {
        assert_eq!(
            eval("${serviceName.toUpperCase()}", &[("serviceName", "myServiceName")]).unwrap(),
            "MYSERVICENAME"
        );
    }

    #[test]
    fn camel_case_from_artifact_id() {
        assert_eq!(
            eval("${artifactId.toCamelCase()}Application", &[("artifactId", "my-service-name")])
                .unwrap(),
            "MyServiceNameApplication"
        );
    }

    #[test]
    fn package_from_artifact_id_with_regex_chain() {
        assert_eq!(
            eval(
                "${groupId}.${artifactId.replaceAll('^([0-9])', '_$1').replaceAll('[^A-Za-z0-9_]', '').toLowerCase()}",
                &[("groupId", "com.acme"), ("artifactId", "9-Lives")]
            )
            .unwrap(),
            "com.acme._9lives"
        );
    }

    #[test]
    fn camel_case_chain_with_look_ahead() {
        assert_eq!(
            eval(
                r"${artifactId.replaceAll('[^A-Za-z_0-9]', ' ').replaceAll('[A-Z](?=[^A-Z])', ' $0').toLowerCase().capitaliseAllWords().replaceAll('\s', '')}",
                &[("artifactId", "my-service-name")]
            )
            .unwrap(),
            "MyServiceName"
        );
    }

    #[test]
    fn arguments_can_reference_properties() {
        assert_eq!(
            eval(
                "${path.replace($sep, '.')}",
                &[("path", "a/b/c"), ("sep", "/")]
            )
            .unwrap(),
            "a.b.c"
        );
    }

    #[test]
    fn unbound_names_are_reported() {
        assert_eq!(
            eval("${groupId}-${missing}", &[("groupId", "g")]),
            Err(EvaluationError::Unbound {
                name: "missing".into()
            })
        );
    }

    #[test]
    fn method_and_syntax_errors_propagate() {
        assert!(matches!(
            eval("${a.nope()}", &[("a", "x")]),
            Err(EvaluationError::Method { .. })
        ));
        assert!(matches!(
            eval("${a", &[("a", "x")]),
            Err(EvaluationError::Syntax { .. })
        ));
    }

    #[test]
    fn references_are_unique_and_ordered() {
        let evaluator = InterpolatingEvaluator::new();
        assert_eq!(
            evaluator.references("${b}/${a.replace($b, ${c})}/$a"),
            ["b", "a", "c"]
        );
        assert!(evaluator.references("plain \\$text").is_empty());
    }

    #[test]
    fn references_survive_malformed_templates() {
        assert_eq!(
            InterpolatingEvaluator::new().references("${groupId}.${oops"),
            ["groupId"]
        );
    }
}
